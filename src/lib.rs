#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]
// Often exceeded by queries
#![allow(clippy::type_complexity)]
// Unhelpful for systems
#![allow(clippy::too_many_arguments)]

//! [`bevy_dialogue_triggers`] is a Bevy plugin for trigger volumes that play
//! typed-out conversations.
//!
//! Entering a trigger starts its conversation if no other conversation is
//! playing and its prerequisite (if linked) has completed. The lines are typed
//! one character at a time, "next" advances and "skip" ends the conversation
//! right away. Triggers can be replayed after a cooldown, optionally with a
//! secondary dialogue played linearly, one line per revisit or at random.

use bevy::prelude::*;
use bevy::transform::TransformSystem;

use prelude::*;

pub mod commands;
pub mod config;
pub mod conversation;
pub mod dialogue_system;
pub mod display;
pub mod errors;
pub mod events;
pub mod input;
pub mod math;
pub mod player;
pub mod prelude;
pub mod proximity;
pub mod ron_loader;
pub mod trigger;
pub mod variables;

/// The plugin that drives dialogue triggers.
pub struct DialogueTriggersPlugin;

/// The systems of the plugin, in `Update`. Order your own request senders before it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct DialogueSet;

impl Plugin for DialogueTriggersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogueConfig>()
            .init_resource::<DialogueSystem>()
            .init_resource::<DialogueRng>()
            .init_resource::<DialogueDisplay>()
            .init_resource::<InputBindings>()
            .register_type::<DialogueTrigger>()
            .register_type::<TriggerState>()
            .register_type::<DialogueKind>()
            .register_type::<TriggerVolume>()
            .register_type::<PlayerController>()
            .register_type::<MoveDirection>()
            .register_type::<EndEventTag>()
            .init_asset::<TriggerData>()
            .init_asset_loader::<TriggerLoader>()
            .add_plugins(DialogueEventsPlugin)
            .add_systems(
                Update,
                (
                    read_player_input,
                    detect_volume_entry,
                    start_conversations,
                    handle_skip_requests.pipe(error_handler),
                    handle_next_requests.pipe(error_handler),
                    type_conversation,
                    sync_display,
                    finish_conversations,
                    tick_replay_cooldowns,
                )
                    .chain()
                    .in_set(DialogueSet),
            )
            .add_systems(
                Update,
                (apply_move_input, move_players)
                    .chain()
                    .after(read_player_input),
            )
            .add_systems(
                PostUpdate,
                follow_target.before(TransformSystem::TransformPropagate),
            );
    }
}

#[cfg(test)]
mod tests {
    use std::{any::TypeId, time::Duration};

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    /// A minimal Bevy app with the dialogue plugin, advancing 30ms per update.
    pub fn minimal_app() -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin::default(),
            DialogueTriggersPlugin,
        ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(30)));
        app
    }

    #[test]
    fn plugin_sets_up_resources() {
        let app = minimal_app();
        assert!(app.world.contains_resource::<DialogueConfig>());
        assert!(app.world.contains_resource::<DialogueRng>());
        assert!(app.world.contains_resource::<InputBindings>());
        assert!(!app.world.resource::<DialogueSystem>().is_conversing());
        assert!(!app.world.resource::<DialogueDisplay>().visible);
    }

    #[test]
    fn trigger_types_are_registered() {
        let app = minimal_app();
        let registry = app.world.resource::<AppTypeRegistry>().read();
        assert!(registry.get(TypeId::of::<DialogueTrigger>()).is_some());
        assert!(registry.get(TypeId::of::<TriggerState>()).is_some());
        assert!(registry.get(TypeId::of::<DialogueKind>()).is_some());
    }

    #[test]
    fn inserted_config_is_kept() {
        let mut app = App::new();
        app.insert_resource(DialogueConfig {
            type_interval: Duration::from_millis(80),
        })
        .add_plugins((MinimalPlugins, AssetPlugin::default(), DialogueTriggersPlugin));
        assert_eq!(
            app.world.resource::<DialogueConfig>().type_interval,
            Duration::from_millis(80)
        );
    }
}
