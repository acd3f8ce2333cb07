//! Player movement and the follow camera.

use bevy::prelude::*;

use crate::prelude::{MoveCanceledEvent, MoveEvent};

/// Moves an entity from the movement input.
///
/// Entities with this component are also the ones that enter [`TriggerVolume`]s.
///
/// [`TriggerVolume`]: crate::prelude::TriggerVolume
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    /// Units per second.
    pub movement_speed: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self { movement_speed: 5.0 }
    }
}

/// The direction a player currently moves in, on the ground plane.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MoveDirection(pub Vec3);

/// The components of a player.
#[derive(Bundle, Default)]
pub struct PlayerBundle {
    /// Movement settings.
    pub controller: PlayerController,
    /// Current direction.
    pub direction: MoveDirection,
    /// Where the player is.
    pub transform: Transform,
    /// Where the player is, after propagation.
    pub global_transform: GlobalTransform,
}

/// Keeps a camera at a fixed offset from a target entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CameraFollow {
    /// The followed entity.
    pub target: Entity,
    /// Added to the target's translation.
    pub offset: Vec3,
}

/// Maps movement events on the ground plane: input `(x, y)` becomes `(x, 0, y)`.
pub(crate) fn apply_move_input(
    mut moved: EventReader<MoveEvent>,
    mut canceled: EventReader<MoveCanceledEvent>,
    mut players: Query<&mut MoveDirection, With<PlayerController>>,
) {
    let last_move = moved.read().map(|m| m.0).last();
    let last_cancel = canceled.read().map(|c| c.0).last();
    // A cancel only wins if no movement started in the same frame.
    let Some(input) = last_move.or(last_cancel) else {
        return;
    };

    let direction = Vec3::new(input.x, 0.0, input.y);
    for mut current in &mut players {
        current.0 = direction;
    }
}

/// Moves players by `speed * dt * direction`.
pub(crate) fn move_players(
    time: Res<Time>,
    mut players: Query<(&PlayerController, &MoveDirection, &mut Transform)>,
) {
    for (controller, direction, mut transform) in &mut players {
        if direction.0 == Vec3::ZERO {
            continue;
        }
        transform.translation += controller.movement_speed * time.delta_seconds() * direction.0;
    }
}

/// Places following cameras at their target plus offset, after all movement.
pub(crate) fn follow_target(
    targets: Query<&Transform, Without<CameraFollow>>,
    mut cameras: Query<(&CameraFollow, &mut Transform)>,
) {
    for (follow, mut transform) in &mut cameras {
        match targets.get(follow.target) {
            Ok(target) => transform.translation = target.translation + follow.offset,
            Err(_) => warn!("Camera follow target {:?} has no transform.", follow.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use crate::tests::minimal_app;

    use super::*;

    #[test]
    fn movement_maps_to_ground_plane() {
        let mut app = minimal_app();
        let player = app
            .world
            .spawn(PlayerBundle {
                controller: PlayerController {
                    movement_speed: 4.0,
                },
                ..Default::default()
            })
            .id();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)));

        app.world.send_event(MoveEvent(Vec2::new(1.0, -1.0)));
        app.update();
        assert_eq!(
            app.world.get::<MoveDirection>(player).unwrap().0,
            Vec3::new(1.0, 0.0, -1.0)
        );

        let before = app.world.get::<Transform>(player).unwrap().translation;
        app.update();
        let after = app.world.get::<Transform>(player).unwrap().translation;
        assert_eq!(after - before, Vec3::new(1.0, 0.0, -1.0));

        app.world.send_event(MoveCanceledEvent(Vec2::ZERO));
        app.update();
        let stopped = app.world.get::<Transform>(player).unwrap().translation;
        app.update();
        assert_eq!(app.world.get::<Transform>(player).unwrap().translation, stopped);
    }

    #[test]
    fn camera_follows_with_offset() {
        let mut app = minimal_app();
        let target = app
            .world
            .spawn(Transform::from_xyz(3.0, 0.0, 4.0))
            .id();
        let offset = Vec3::new(0.0, 10.0, -5.0);
        let camera = app
            .world
            .spawn((Transform::default(), CameraFollow { target, offset }))
            .id();

        app.update();
        assert_eq!(
            app.world.get::<Transform>(camera).unwrap().translation,
            Vec3::new(3.0, 10.0, -1.0)
        );
    }
}
