//! Turns raw key presses into dialogue requests and movement events.

use bevy::prelude::*;

use crate::prelude::{NextLineRequest, SkipConversationRequest};

/// The keys the player uses to talk and to move.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct InputBindings {
    /// Advances the conversation.
    pub next: KeyCode,
    /// Skips the whole conversation.
    pub skip: KeyCode,
    /// Moves along positive y.
    pub up: KeyCode,
    /// Moves along negative y.
    pub down: KeyCode,
    /// Moves along negative x.
    pub left: KeyCode,
    /// Moves along positive x.
    pub right: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            next: KeyCode::Space,
            skip: KeyCode::Escape,
            up: KeyCode::W,
            down: KeyCode::S,
            left: KeyCode::A,
            right: KeyCode::D,
        }
    }
}

impl InputBindings {
    /// The movement axis for the keys currently held. Each component is -1, 0 or 1.
    pub fn axis(&self, keys: &Input<KeyCode>) -> Vec2 {
        let held = |key: KeyCode| if keys.pressed(key) { 1.0 } else { 0.0 };
        Vec2::new(
            held(self.right) - held(self.left),
            held(self.up) - held(self.down),
        )
    }
}

/// Sent when the movement input changes to a non zero value.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MoveEvent(pub Vec2);

/// Sent when the movement input is released. Holds the released value, always zero.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MoveCanceledEvent(pub Vec2);

/// Reads the keyboard and sends the matching requests and movement events.
///
/// Does nothing in apps without keyboard input, so tests and headless apps
/// drive the plugin by sending the events themselves.
pub(crate) fn read_player_input(
    keys: Option<Res<Input<KeyCode>>>,
    bindings: Res<InputBindings>,
    mut last_axis: Local<Vec2>,
    mut next: EventWriter<NextLineRequest>,
    mut skip: EventWriter<SkipConversationRequest>,
    mut moved: EventWriter<MoveEvent>,
    mut canceled: EventWriter<MoveCanceledEvent>,
) {
    let Some(keys) = keys else {
        return;
    };

    if keys.just_pressed(bindings.next) {
        next.send(NextLineRequest);
    }
    if keys.just_pressed(bindings.skip) {
        skip.send(SkipConversationRequest);
    }

    let axis = bindings.axis(&keys);
    if axis == *last_axis {
        return;
    }
    if axis == Vec2::ZERO {
        canceled.send(MoveCanceledEvent(axis));
    } else {
        moved.send(MoveEvent(axis));
    }
    *last_axis = axis;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::tests::minimal_app;

    use super::*;

    #[rstest]
    #[case(&[], Vec2::ZERO)]
    #[case(&[KeyCode::W], Vec2::Y)]
    #[case(&[KeyCode::S], Vec2::NEG_Y)]
    #[case(&[KeyCode::A, KeyCode::W], Vec2::new(-1.0, 1.0))]
    #[case(&[KeyCode::A, KeyCode::D], Vec2::ZERO)]
    fn axis_from_held_keys(#[case] held: &[KeyCode], #[case] expected: Vec2) {
        let mut keys = Input::<KeyCode>::default();
        for key in held {
            keys.press(*key);
        }
        assert_eq!(InputBindings::default().axis(&keys), expected);
    }

    #[test]
    fn key_presses_become_requests_and_moves() {
        let mut app = minimal_app();
        app.init_resource::<Input<KeyCode>>();
        let mut nexts = app.world.resource::<Events<NextLineRequest>>().get_reader();
        let mut moves = app.world.resource::<Events<MoveEvent>>().get_reader();
        let mut cancels = app
            .world
            .resource::<Events<MoveCanceledEvent>>()
            .get_reader();

        {
            let mut keys = app.world.resource_mut::<Input<KeyCode>>();
            keys.press(KeyCode::Space);
            keys.press(KeyCode::D);
        }
        app.update();

        let events = app.world.resource::<Events<NextLineRequest>>();
        assert_eq!(nexts.read(events).count(), 1);
        let events = app.world.resource::<Events<MoveEvent>>();
        assert_eq!(
            moves.read(events).copied().collect::<Vec<_>>(),
            vec![MoveEvent(Vec2::X)]
        );

        // Holding the same keys sends nothing new.
        app.update();
        let events = app.world.resource::<Events<MoveEvent>>();
        assert_eq!(moves.read(events).count(), 0);

        app.world.resource_mut::<Input<KeyCode>>().release(KeyCode::D);
        app.update();
        let events = app.world.resource::<Events<MoveCanceledEvent>>();
        assert_eq!(
            cancels.read(events).copied().collect::<Vec<_>>(),
            vec![MoveCanceledEvent(Vec2::ZERO)]
        );
    }
}
