//! Plugin configuration.

use std::time::Duration;

use bevy::prelude::Resource;

/// Settings shared by every conversation.
///
/// Insert it before adding the plugin to override the defaults.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct DialogueConfig {
    /// The delay between two typed characters. Zero types whole lines at once.
    pub type_interval: Duration,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            type_interval: Duration::from_millis(30),
        }
    }
}
