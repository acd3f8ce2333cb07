//! Commands extension to spawn and link dialogue triggers.

use bevy::{ecs::system::EntityCommands, prelude::*};

use crate::prelude::{DialogueTrigger, DialogueTriggerBundle, LinkConversationCommand};

/// Extension trait for [`Commands`] to work with dialogue triggers.
pub trait DialogueCommandsExt<'w, 's> {
    /// Spawns a dialogue trigger with a fresh state.
    fn spawn_dialogue_trigger<'a>(
        &'a mut self,
        trigger: DialogueTrigger,
    ) -> EntityCommands<'w, 's, 'a>;

    /// Makes `gated` unplayable until `prerequisite` completes a conversation.
    fn link_conversation(&mut self, gated: Entity, prerequisite: Entity);
}

impl<'w, 's> DialogueCommandsExt<'w, 's> for Commands<'w, 's> {
    fn spawn_dialogue_trigger<'a>(
        &'a mut self,
        trigger: DialogueTrigger,
    ) -> EntityCommands<'w, 's, 'a> {
        self.spawn(DialogueTriggerBundle::from(trigger))
    }

    fn link_conversation(&mut self, gated: Entity, prerequisite: Entity) {
        self.add(LinkConversationCommand {
            gated,
            prerequisite,
        });
    }
}

#[cfg(test)]
mod tests {
    use aery::{prelude::*, tuple_traits::RelationEntries};
    use bevy::ecs::system::CommandQueue;

    use crate::prelude::{GatedBy, TriggerState};

    use super::*;

    #[test]
    fn spawn_and_link() {
        let mut world = World::default();
        let mut queue = CommandQueue::default();

        let mut commands = Commands::new(&mut queue, &world);
        let first = commands
            .spawn_dialogue_trigger(DialogueTrigger::new("A").say("a"))
            .id();
        let second = commands
            .spawn_dialogue_trigger(DialogueTrigger::new("B").say("b"))
            .id();
        commands.link_conversation(second, first);
        queue.apply(&mut world);

        assert_eq!(world.get::<TriggerState>(first), Some(&TriggerState::default()));
        assert_eq!(world.get::<DialogueTrigger>(second).unwrap().speaker, "B");

        let mut query = world.query::<Relations<GatedBy>>();
        let edges = query.get(&world, second).unwrap();
        assert_eq!(edges.targets(GatedBy), &[first]);
    }

    #[test]
    fn linking_to_missing_prerequisite_is_ignored() {
        let mut world = World::default();
        let gated = world.spawn(DialogueTriggerBundle::default()).id();
        let missing = world.spawn_empty().id();
        world.despawn(missing);

        let mut queue = CommandQueue::default();
        Commands::new(&mut queue, &world).link_conversation(gated, missing);
        queue.apply(&mut world);

        let mut query = world.query::<Relations<GatedBy>>();
        if let Ok(edges) = query.get(&world, gated) {
            assert!(edges.targets(GatedBy).is_empty());
        }
    }

    #[test]
    fn linking_despawned_trigger_is_ignored() {
        let mut world = World::default();
        let prerequisite = world.spawn(DialogueTriggerBundle::default()).id();
        let gated = world.spawn(DialogueTriggerBundle::default()).id();
        world.despawn(gated);

        let mut queue = CommandQueue::default();
        Commands::new(&mut queue, &world).link_conversation(gated, prerequisite);
        queue.apply(&mut world);

        assert!(world.get_entity(gated).is_none());
        assert!(world.get::<TriggerState>(prerequisite).is_some());
    }
}
