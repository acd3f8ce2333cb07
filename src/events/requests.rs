//! Events the plugin can receive.

use bevy::prelude::*;

/// Sent when the player enters a trigger. Contains the trigger entity.
///
/// The built-in [`TriggerVolume`](crate::prelude::TriggerVolume) sends it on
/// proximity; games with their own physics can send it from collision callbacks.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEntered(pub Entity);

/// Event to request the next line of the active conversation.
///
/// This event is typically wired to an input from the player, e.g. a key press to advance the dialogue.
/// If the current line is still being typed, the request is remembered until it is done.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct NextLineRequest;

/// Event to abort the active conversation, dropping every remaining line.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct SkipConversationRequest;
