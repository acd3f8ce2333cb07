//! Types used by the ron loader.

use serde::Deserialize;

use crate::prelude::SecondaryDialogue;

/// The ron trigger asset type.
///
/// Every field is optional. A missing speaker leaves the name plate empty.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RonTrigger {
    /// The name on the name plate.
    pub(crate) speaker: String,
    /// An asset path for the speaker portrait.
    pub(crate) portrait: Option<String>,
    /// The primary lines.
    pub(crate) lines: Vec<String>,
    /// How the trigger behaves on revisits. Absent means it plays once.
    pub(crate) replay: Option<RonReplay>,
    /// Whether completion events are fired.
    pub(crate) fire_event_on_completion: bool,
}

/// The replay section of a trigger file.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RonReplay {
    /// The cooldown in seconds.
    pub(crate) cooldown: f32,
    /// Only replay after a skip.
    pub(crate) only_on_skip: bool,
    /// What to play on revisits.
    pub(crate) secondary: Option<RonSecondary>,
}

/// The secondary dialogue of a trigger file.
#[derive(Deserialize, Debug, Clone)]
pub(crate) enum RonSecondary {
    /// Lines written without picking a strategy. Played as [`RonSecondary::Linear`].
    Unselected(Vec<String>),
    /// The whole list on every revisit.
    Linear(Vec<String>),
    /// One line per revisit, in order.
    OneByOne(Vec<String>),
    /// One random line per revisit.
    Random(Vec<String>),
}

impl From<RonSecondary> for SecondaryDialogue {
    fn from(value: RonSecondary) -> Self {
        match value {
            RonSecondary::Unselected(lines) | RonSecondary::Linear(lines) => {
                SecondaryDialogue::Linear(lines)
            }
            RonSecondary::OneByOne(lines) => SecondaryDialogue::OneByOne(lines),
            RonSecondary::Random(lines) => SecondaryDialogue::Random(lines),
        }
    }
}
