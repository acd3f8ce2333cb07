use proc_macro::{self, TokenStream};
use proc_macro2::{Ident, Span};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// The path to `bevy_dialogue_triggers` as seen from the crate using the derive.
fn triggers_crate() -> proc_macro2::TokenStream {
    match crate_name("bevy_dialogue_triggers") {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Err(_) => quote!(::bevy_dialogue_triggers),
    }
}

#[proc_macro_derive(CompletionEventEmitter)]
pub fn derive_completion_event_emitter(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, data, .. } = parse_macro_input!(input);
    let struct_name = &ident;
    let event_struct_name = Ident::new(&format!("{}Event", struct_name), struct_name.span());
    let krate = triggers_crate();

    let output = match data {
        syn::Data::Struct(data_struct) => match data_struct.fields {
            syn::Fields::Unit => {
                quote! {
                    #[derive(Event, Reflect, Clone)]
                    #[reflect(Event)]
                    pub struct #event_struct_name {
                        pub trigger: Entity,
                    }

                    impl #krate::prelude::CompletionEventEmitter for #struct_name {
                        fn make(&self, trigger: Entity) -> Box<dyn Reflect> {
                            Box::from(#event_struct_name { trigger })
                        }
                    }
                }
            }
            syn::Fields::Named(fs) => {
                let field_names: Vec<Ident> =
                    fs.named.iter().filter_map(|f| f.ident.clone()).collect();
                let field_types: Vec<&syn::Type> = fs.named.iter().map(|f| &f.ty).collect();

                quote! {
                    #[derive(Event, Reflect, Clone)]
                    #[reflect(Event)]
                    pub struct #event_struct_name {
                        pub trigger: Entity,
                        #( pub #field_names: #field_types, )*
                    }

                    impl #krate::prelude::CompletionEventEmitter for #struct_name {
                        fn make(&self, trigger: Entity) -> Box<dyn Reflect> {
                            Box::from(#event_struct_name {
                                trigger,
                                #( #field_names: self.#field_names.clone(), )*
                            })
                        }
                    }
                }
            }
            syn::Fields::Unnamed(_) => {
                quote! {
                    compile_error!("CompletionEventEmitter can only be derived for structs with named fields. Tuple structs are not supported yet.");
                }
            }
        },
        syn::Data::Enum(_) => quote! {
            compile_error!("CompletionEventEmitter can only be derived for structs. Enums and unions are not supported yet.");
        },
        syn::Data::Union(_) => quote! {
            compile_error!("CompletionEventEmitter can only be derived for structs. Enums and unions are not supported yet.");
        },
    };

    output.into()
}
