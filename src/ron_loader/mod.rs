//! Loading of dialogue triggers from `.trigger.ron` files.

pub mod loader;
pub(crate) mod types;
