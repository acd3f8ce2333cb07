//! Prelude for the `bevy_dialogue_triggers` crate.
pub use super::{DialogueSet, DialogueTriggersPlugin};
pub use super::{
    commands::*,
    config::*,
    conversation::*,
    dialogue_system::*,
    display::*,
    errors::*,
    events::{dialogue_events::*, requests::*, *},
    input::*,
    player::*,
    proximity::*,
    ron_loader::loader::*,
    trigger::*,
    variables::*,
};

pub use bevy_dialogue_triggers_macros::CompletionEventEmitter;
