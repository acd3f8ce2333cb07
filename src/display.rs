//! The UI surface of the dialogue system.

use bevy::prelude::Resource;

use crate::prelude::DialogueTrigger;

/// What the dialogue box should show.
///
/// The plugin keeps it up to date while a conversation plays; the game mirrors
/// it into its own text, name plate and portrait widgets.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct DialogueDisplay {
    /// Whether the dialogue box is shown.
    pub visible: bool,
    /// The part of the current line typed so far.
    pub text: String,
    /// The name on the name plate.
    pub speaker: String,
    /// The asset path of the portrait, if the speaker has one.
    pub portrait: Option<String>,
}

impl DialogueDisplay {
    /// Shows an empty dialogue box for the trigger's speaker.
    pub(crate) fn show(&mut self, trigger: &DialogueTrigger) {
        self.visible = true;
        self.text.clear();
        self.speaker.clone_from(&trigger.speaker);
        self.portrait.clone_from(&trigger.portrait);
    }

    /// Hides and clears the dialogue box.
    pub(crate) fn hide(&mut self) {
        *self = Self::default();
    }
}
