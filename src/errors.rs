//! Errors that can happen when using `bevy_dialogue_triggers`.

use bevy::prelude::Entity;
use thiserror::Error;

/// Errors when a trigger tries to start a conversation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StartConversationError {
    /// Another conversation is already playing.
    #[error("another conversation is already playing")]
    AlreadyConversing,
    /// The trigger is linked to a prerequisite whose conversation is not complete yet.
    #[error("the conversation is locked until trigger {0:?} completes")]
    Locked(Entity),
    /// The trigger was already visited and its replay cooldown has not reset it.
    #[error("the trigger was already visited")]
    AlreadyVisited,
    /// The selected dialogue list has no lines to play.
    #[error("the selected dialogue list is empty")]
    EmptyDialogue,
    /// Every line of the one-by-one secondary dialogue was already played.
    #[error("all {0} one-by-one lines were already played")]
    OneByOneExhausted(usize),
}

/// Errors when driving the active conversation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConversationError {
    /// A request was sent but no conversation is playing.
    #[error("no conversation is playing")]
    NoActiveConversation,
    /// The conversation already reached its end.
    #[error("the conversation is already complete")]
    AlreadyComplete,
}
