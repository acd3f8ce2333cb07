//! The typing state machine of a conversation.
//!
//! A [`Conversation`] types its lines one character per interval, waits for a
//! "next" signal at the end of every line and completes after the last one.
//! It does not know about time sources or input: the plugin systems tick it with
//! the frame delta and forward next/skip requests to it.

use std::collections::VecDeque;
use std::time::Duration;

use bevy::time::{Timer, TimerMode};

use crate::prelude::{ConversationError, StartConversationError};

/// The phase of a [`Conversation`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    /// Characters of the current line are being appended.
    #[default]
    Typing,
    /// The current line is fully typed, waiting for the next signal.
    AwaitingNext,
    /// All lines were played, or the conversation was skipped.
    Complete,
}

/// An ordered playback of dialogue lines with a typing animation.
#[derive(Debug, Clone)]
pub struct Conversation {
    /// The lines still to be played after the current one.
    queued: VecDeque<String>,
    /// The full text of the line being played.
    current: String,
    /// The number of characters of the current line typed so far.
    typed: usize,
    /// The zero based index of the current line.
    line_index: usize,
    /// Fires once per typed character.
    timer: Timer,
    /// Set when next is requested while still typing.
    next_latched: bool,
    /// Where the state machine is.
    phase: TypingPhase,
    /// Whether the conversation ended through a skip.
    skipped: bool,
}

impl Conversation {
    /// Creates a conversation that types one character every `type_interval`.
    ///
    /// A zero interval types a whole line in a single tick.
    ///
    /// # Errors
    ///
    /// Returns [`StartConversationError::EmptyDialogue`] if `lines` is empty.
    pub fn new(
        lines: impl IntoIterator<Item = String>,
        type_interval: Duration,
    ) -> Result<Self, StartConversationError> {
        let mut queued: VecDeque<String> = lines.into_iter().collect();
        let current = queued
            .pop_front()
            .ok_or(StartConversationError::EmptyDialogue)?;

        let mut conversation = Self {
            queued,
            current: String::new(),
            typed: 0,
            line_index: 0,
            timer: Timer::new(type_interval, TimerMode::Repeating),
            next_latched: false,
            phase: TypingPhase::Typing,
            skipped: false,
        };
        conversation.begin_line(current);
        Ok(conversation)
    }

    /// The current phase.
    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    /// Whether the conversation reached its end.
    pub fn is_complete(&self) -> bool {
        self.phase == TypingPhase::Complete
    }

    /// Whether the conversation ended through a skip.
    pub fn was_skipped(&self) -> bool {
        self.skipped
    }

    /// The full text of the line being played.
    pub fn current_line(&self) -> &str {
        &self.current
    }

    /// The zero based index of the line being played.
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// The number of lines queued after the current one.
    pub fn remaining_lines(&self) -> usize {
        self.queued.len()
    }

    /// The part of the current line typed so far.
    pub fn typed_text(&self) -> String {
        self.current.chars().take(self.typed).collect()
    }

    /// Advances the typing animation by `delta`.
    ///
    /// Returns the number of characters appended by this tick.
    pub fn tick(&mut self, delta: Duration) -> usize {
        if self.phase != TypingPhase::Typing {
            return 0;
        }

        let total = self.current.chars().count();
        let due = if self.timer.duration().is_zero() {
            total - self.typed
        } else {
            self.timer.tick(delta);
            self.timer.times_finished_this_tick() as usize
        };

        let appended = due.min(total - self.typed);
        self.typed += appended;

        if self.typed == total {
            self.phase = TypingPhase::AwaitingNext;
            if std::mem::take(&mut self.next_latched) {
                self.advance();
            }
        }
        appended
    }

    /// Handles the "next" signal.
    ///
    /// While typing, the signal is remembered and the line advances as soon
    /// as it is fully typed.
    pub fn next(&mut self) -> Result<(), ConversationError> {
        match self.phase {
            TypingPhase::Typing => {
                self.next_latched = true;
                Ok(())
            }
            TypingPhase::AwaitingNext => {
                self.advance();
                Ok(())
            }
            TypingPhase::Complete => Err(ConversationError::AlreadyComplete),
        }
    }

    /// Handles the "skip" signal: drops every remaining line and completes.
    pub fn skip(&mut self) -> Result<(), ConversationError> {
        if self.phase == TypingPhase::Complete {
            return Err(ConversationError::AlreadyComplete);
        }
        self.queued.clear();
        self.next_latched = false;
        self.skipped = true;
        self.phase = TypingPhase::Complete;
        Ok(())
    }

    /// Moves to the following line, or completes if there is none.
    fn advance(&mut self) {
        match self.queued.pop_front() {
            Some(line) => {
                self.line_index += 1;
                self.begin_line(line);
            }
            None => self.phase = TypingPhase::Complete,
        }
    }

    /// Resets the typing state for a new line.
    fn begin_line(&mut self, line: String) {
        self.current = line;
        self.typed = 0;
        self.timer.reset();
        self.phase = if self.current.is_empty() {
            TypingPhase::AwaitingNext
        } else {
            TypingPhase::Typing
        };
    }
}
