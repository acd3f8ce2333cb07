//! Events the plugin emits.
use bevy::prelude::*;

use crate::prelude::DialogueKind;

use super::{CompletionEventEmitter, ReflectEvent};

/// Sent when a trigger starts a conversation.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ConversationStarted {
    /// The trigger entity.
    pub trigger: Entity,
    /// Which of the trigger's dialogue lists is played.
    pub kind: DialogueKind,
}

/// Sent when the active conversation starts typing a line.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct LineStarted {
    /// The trigger entity.
    pub trigger: Entity,
    /// The zero based index of the line in the conversation.
    pub index: usize,
    /// The full text of the line.
    pub text: String,
}

/// Sent when a conversation ends, normally or through a skip.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationEnded {
    /// The trigger entity.
    pub trigger: Entity,
    /// Whether the player skipped the conversation.
    pub skipped: bool,
}

/// Sent once per completed conversation of a trigger with
/// `fire_event_on_completion` set. Contains the trigger entity.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueEndEvent(pub Entity);

/// Names the end event of a trigger, so observers can tell triggers apart
/// without holding their entities.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct EndEventTag(pub String);

/// Emitted by triggers with an [`EndEventTag`] when their conversation completes.
#[derive(Event, Reflect, Debug, Clone)]
#[reflect(Event)]
pub struct TaggedEndEvent {
    /// The trigger entity.
    pub trigger: Entity,
    /// The tag of the trigger.
    pub tag: String,
}

impl CompletionEventEmitter for EndEventTag {
    fn make(&self, trigger: Entity) -> Box<dyn Reflect> {
        Box::from(TaggedEndEvent {
            trigger,
            tag: self.0.clone(),
        })
    }
}
