//! Events to drive the dialogue system and to observe it.
use bevy::prelude::*;
use bevy::reflect::{FromType, GetTypeRegistration, Reflect};
use bevy_trait_query::RegisterExt;

use crate::prelude::{MoveCanceledEvent, MoveEvent};

use self::{dialogue_events::*, requests::*};

pub mod dialogue_events;
pub mod requests;

/// All the built-in events for `bevy_dialogue_triggers`.
pub(crate) struct DialogueEventsPlugin;

impl Plugin for DialogueEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TriggerEntered>()
            .add_event::<NextLineRequest>()
            .add_event::<SkipConversationRequest>()
            .add_event::<MoveEvent>()
            .add_event::<MoveCanceledEvent>()
            .add_event::<ConversationStarted>()
            .add_event::<LineStarted>()
            .add_event::<ConversationEnded>()
            .add_event::<DialogueEndEvent>()
            .register_completion_event::<EndEventTag, TaggedEndEvent>();
    }
}

/// Extension trait for [`App`] to register completion events.
pub trait AppExt {
    /// Registers a component that emits the event `E` when the conversation
    /// of the trigger it is attached to completes.
    ///
    /// Must be called while building the app, before the first update.
    fn register_completion_event<
        C: Component + CompletionEventEmitter,
        E: Event + GetTypeRegistration,
    >(
        &mut self,
    ) -> &mut Self;
}

impl AppExt for App {
    fn register_completion_event<
        C: Component + CompletionEventEmitter,
        E: Event + GetTypeRegistration,
    >(
        &mut self,
    ) -> &mut Self {
        if !self.world.contains_resource::<Events<E>>() {
            self.add_event::<E>();
        }
        self.register_type::<E>();
        self.register_component_as::<dyn CompletionEventEmitter, C>();
        info!("Registered completion emitter: {}", std::any::type_name::<C>());

        self
    }
}

/// A struct used to operate on reflected [`Event`] of a type.
///
/// A [`ReflectEvent`] for type `T` can be obtained via
/// [`bevy::reflect::TypeRegistration::data`].
#[derive(Clone)]
pub struct ReflectEvent(ReflectEventFns);

/// The raw function pointers needed to make up a [`ReflectEvent`].
#[derive(Clone)]
pub struct ReflectEventFns {
    /// Function pointer implementing [`ReflectEvent::send()`].
    pub send: fn(&dyn Reflect, &mut World),
}

impl ReflectEventFns {
    /// Get the default set of [`ReflectEventFns`] for a specific event type using its
    /// [`FromType`] implementation.
    pub fn new<T: Event + Reflect + Clone>() -> Self {
        <ReflectEvent as FromType<T>>::from_type().0
    }
}

impl ReflectEvent {
    /// Sends reflected [`Event`] to world using [`send()`](ReflectEvent::send).
    pub fn send(&self, event: &dyn Reflect, world: &mut World) {
        (self.0.send)(event, world)
    }

    /// Create a custom implementation of [`ReflectEvent`].
    pub fn new(fns: ReflectEventFns) -> Self {
        Self(fns)
    }
}

impl<E: Event + Reflect + Clone> FromType<E> for ReflectEvent {
    fn from_type() -> Self {
        ReflectEvent(ReflectEventFns {
            send: |event, world| {
                if let Some(ev) = event.downcast_ref::<E>() {
                    world.send_event(ev.clone());
                }
            },
        })
    }
}

/// Trait to implement on trigger components to make them emit an event when
/// the trigger's conversation completes.
///
/// Emission only happens for triggers with `fire_event_on_completion` set.
/// It can be derived with `#[derive(CompletionEventEmitter)]`, which generates
/// a `<Name>Event` type holding the trigger entity and the component fields.
#[bevy_trait_query::queryable]
pub trait CompletionEventEmitter {
    /// Creates the event to emit for the given trigger entity.
    fn make(&self, trigger: Entity) -> Box<dyn Reflect>;
}

#[cfg(test)]
mod tests {
    use crate::tests::minimal_app;

    use super::*;

    #[test]
    fn dialogue_events_registered() {
        let app = minimal_app();
        assert!(app.world.contains_resource::<Events<TriggerEntered>>());
        assert!(app.world.contains_resource::<Events<NextLineRequest>>());
        assert!(app.world.contains_resource::<Events<SkipConversationRequest>>());
        assert!(app.world.contains_resource::<Events<ConversationStarted>>());
        assert!(app.world.contains_resource::<Events<LineStarted>>());
        assert!(app.world.contains_resource::<Events<ConversationEnded>>());
        assert!(app.world.contains_resource::<Events<DialogueEndEvent>>());
        assert!(app.world.contains_resource::<Events<TaggedEndEvent>>());
    }

    #[test]
    fn reflect_event_sends_to_world() {
        let mut app = minimal_app();
        let trigger = app.world.spawn_empty().id();
        let event = TaggedEndEvent {
            trigger,
            tag: "door".to_string(),
        };

        let reflect_event = ReflectEvent::new(ReflectEventFns::new::<TaggedEndEvent>());
        reflect_event.send(&event, &mut app.world);

        let events = app.world.resource::<Events<TaggedEndEvent>>();
        let sent = events.get_reader().read(events).next().cloned().unwrap();
        assert_eq!(sent.trigger, trigger);
        assert_eq!(sent.tag, "door");
    }
}
