//! Dialogue triggers: what a trigger says and how it behaves on revisits.

use std::time::Duration;

use bevy::prelude::{Bundle, Component, Reflect, ReflectComponent};
use rand::Rng;

use crate::prelude::StartConversationError;

/// The dialogue to play when a trigger is revisited after a completed conversation.
#[derive(Debug, Clone, PartialEq, Eq, Reflect)]
pub enum SecondaryDialogue {
    /// Play the whole list, like the primary dialogue.
    Linear(Vec<String>),
    /// Play one line per revisit, in order, until every line was played.
    OneByOne(Vec<String>),
    /// Play one line picked uniformly at random on every revisit.
    Random(Vec<String>),
}

/// How a trigger can be replayed after its conversation ends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Reflect)]
pub struct ReplayPolicy {
    /// The delay after which the trigger can be visited again.
    pub cooldown: Duration,
    /// Only replay if the player skipped the previous conversation.
    pub only_on_skip: bool,
    /// What to play on revisits. The primary lines are replayed when `None`.
    pub secondary: Option<SecondaryDialogue>,
}

/// A region that starts a conversation when the player enters it.
///
/// Secondary dialogues live inside the [`ReplayPolicy`], so a trigger that is
/// never replayed can never play them.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct DialogueTrigger {
    /// The name shown on the name plate.
    pub speaker: String,
    /// An optional asset path of the portrait shown next to the text.
    pub portrait: Option<String>,
    /// The lines played, one after the other, on the first visit.
    pub lines: Vec<String>,
    /// Whether and how the trigger is played again on revisit.
    pub replay: Option<ReplayPolicy>,
    /// Whether completion events are fired when a conversation ends.
    pub fire_event_on_completion: bool,
}

impl DialogueTrigger {
    /// Creates a trigger with the given speaker and no lines.
    pub fn new(speaker: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            ..Default::default()
        }
    }

    /// Appends a primary line.
    pub fn say(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Sets the portrait asset path.
    pub fn with_portrait(mut self, path: impl Into<String>) -> Self {
        self.portrait = Some(path.into());
        self
    }

    /// Makes the trigger playable again `cooldown` after each conversation.
    pub fn replay_on_revisit(mut self, cooldown: Duration) -> Self {
        self.replay = Some(ReplayPolicy {
            cooldown,
            ..Default::default()
        });
        self
    }

    /// Only replay the trigger if the player skipped the conversation.
    ///
    /// Does nothing unless [`DialogueTrigger::replay_on_revisit`] was called first.
    pub fn replay_only_on_skip(mut self) -> Self {
        if let Some(replay) = self.replay.as_mut() {
            replay.only_on_skip = true;
        }
        self
    }

    /// Sets the dialogue played on revisits.
    ///
    /// Does nothing unless [`DialogueTrigger::replay_on_revisit`] was called first.
    pub fn with_secondary(mut self, secondary: SecondaryDialogue) -> Self {
        if let Some(replay) = self.replay.as_mut() {
            replay.secondary = Some(secondary);
        }
        self
    }

    /// Fires the completion events when a conversation ends.
    pub fn fire_event_on_completion(mut self) -> Self {
        self.fire_event_on_completion = true;
        self
    }

    /// Picks the lines to play for the given trigger state.
    ///
    /// The primary lines are played until a conversation completes, then the
    /// secondary dialogue (if any) takes over.
    pub fn select_dialogue<R: Rng>(
        &self,
        state: &TriggerState,
        rng: &mut R,
    ) -> Result<SelectedDialogue, StartConversationError> {
        let secondary = self
            .replay
            .as_ref()
            .and_then(|r| r.secondary.as_ref())
            .filter(|_| state.completion_index > 0);

        let (kind, lines) = match secondary {
            None => (DialogueKind::Primary, self.lines.clone()),
            Some(SecondaryDialogue::Linear(lines)) => (DialogueKind::Linear, lines.clone()),
            Some(SecondaryDialogue::OneByOne(lines)) => {
                if !lines.is_empty() && state.one_by_one_index >= lines.len() {
                    return Err(StartConversationError::OneByOneExhausted(lines.len()));
                }
                let line = lines.get(state.one_by_one_index).cloned();
                (DialogueKind::OneByOne, line.into_iter().collect())
            }
            Some(SecondaryDialogue::Random(lines)) => {
                let line = match lines.len() {
                    0 => None,
                    n => lines.get(rng.random_range(0..n)).cloned(),
                };
                (DialogueKind::Random, line.into_iter().collect())
            }
        };

        if lines.is_empty() {
            return Err(StartConversationError::EmptyDialogue);
        }
        Ok(SelectedDialogue { kind, lines })
    }
}

/// Which list a conversation was taken from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DialogueKind {
    /// The primary lines.
    #[default]
    Primary,
    /// The linear secondary list.
    Linear,
    /// One line of the one-by-one secondary list.
    OneByOne,
    /// One random line of the random secondary list.
    Random,
}

/// The lines chosen for a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDialogue {
    /// Where the lines come from.
    pub kind: DialogueKind,
    /// The lines to play, in order.
    pub lines: Vec<String>,
}

/// The runtime state of a [`DialogueTrigger`].
#[derive(Component, Debug, Clone, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct TriggerState {
    /// Set when a conversation starts, cleared by the replay cooldown.
    pub visited: bool,
    /// Whether at least one conversation of this trigger completed.
    pub conversation_complete: bool,
    /// Whether the last conversation was skipped.
    pub skipped: bool,
    /// How many conversations of this trigger completed.
    pub completion_index: u32,
    /// The next line of the one-by-one secondary dialogue.
    pub one_by_one_index: usize,
}

impl TriggerState {
    /// Marks the trigger as visited for a new conversation.
    pub(crate) fn begin(&mut self) {
        self.visited = true;
        self.skipped = false;
    }

    /// Records the end of a conversation played from `kind`.
    pub(crate) fn complete(&mut self, kind: DialogueKind, skipped: bool) {
        self.conversation_complete = true;
        self.skipped = skipped;
        self.completion_index += 1;
        if kind == DialogueKind::OneByOne {
            self.one_by_one_index += 1;
        }
    }

    /// The cooldown to schedule after a conversation, if the trigger replays.
    pub fn replay_cooldown(&self, trigger: &DialogueTrigger) -> Option<Duration> {
        let replay = trigger.replay.as_ref()?;
        if replay.only_on_skip && !self.skipped {
            return None;
        }
        Some(replay.cooldown)
    }
}

/// The components needed to make an entity a dialogue trigger.
#[derive(Bundle, Default)]
pub struct DialogueTriggerBundle {
    /// What the trigger says.
    pub trigger: DialogueTrigger,
    /// The runtime state of the trigger.
    pub state: TriggerState,
}

impl From<DialogueTrigger> for DialogueTriggerBundle {
    fn from(trigger: DialogueTrigger) -> Self {
        Self {
            trigger,
            state: TriggerState::default(),
        }
    }
}
