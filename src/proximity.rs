//! Spherical trigger volumes that detect the player entering them.

use bevy::prelude::*;

use crate::prelude::{PlayerController, TriggerEntered};

/// A sphere around a trigger. Entering it sends [`TriggerEntered`] for the trigger.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TriggerVolume {
    /// The radius of the sphere.
    pub radius: f32,
    /// Whether a player was inside last frame.
    #[reflect(ignore)]
    occupied: bool,
}

impl Default for TriggerVolume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TriggerVolume {
    /// Creates a volume with the given radius.
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            occupied: false,
        }
    }

    /// Whether a player is inside the volume.
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Whether `point` lies inside a volume centered on `center`.
    pub fn contains(&self, center: Vec3, point: Vec3) -> bool {
        center.distance_squared(point) <= self.radius * self.radius
    }
}

/// Sends [`TriggerEntered`] when a player crosses into a volume.
///
/// Staying inside sends nothing; the player has to leave and come back.
pub(crate) fn detect_volume_entry(
    players: Query<&Transform, With<PlayerController>>,
    mut volumes: Query<(Entity, &Transform, &mut TriggerVolume), Without<PlayerController>>,
    mut entered: EventWriter<TriggerEntered>,
) {
    for (entity, transform, mut volume) in &mut volumes {
        let occupied = players
            .iter()
            .any(|player| volume.contains(transform.translation, player.translation));

        if occupied && !volume.occupied {
            debug!("Player entered trigger volume {:?}.", entity);
            entered.send(TriggerEntered(entity));
        }
        if occupied != volume.occupied {
            volume.occupied = occupied;
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::event::ManualEventReader;

    use crate::tests::minimal_app;

    use super::*;

    /// Moves the player and runs a frame. Returns the entered triggers.
    fn step(
        app: &mut App,
        player: Entity,
        to: Vec3,
        reader: &mut ManualEventReader<TriggerEntered>,
    ) -> Vec<Entity> {
        app.world.get_mut::<Transform>(player).unwrap().translation = to;
        app.update();
        let events = app.world.resource::<Events<TriggerEntered>>();
        reader.read(events).map(|e| e.0).collect()
    }

    #[test]
    fn contains_is_inclusive() {
        let volume = TriggerVolume::new(2.0);
        assert!(volume.contains(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)));
        assert!(!volume.contains(Vec3::ZERO, Vec3::new(2.0, 0.1, 0.0)));
    }

    #[test]
    fn only_outside_to_inside_sends_entered() {
        let mut app = minimal_app();
        let trigger = app
            .world
            .spawn((Transform::default(), TriggerVolume::new(1.0)))
            .id();
        let player = app
            .world
            .spawn((
                Transform::from_xyz(5.0, 0.0, 0.0),
                PlayerController::default(),
            ))
            .id();
        let mut reader = app.world.resource::<Events<TriggerEntered>>().get_reader();

        let far = Vec3::new(5.0, 0.0, 0.0);
        let near = Vec3::new(0.5, 0.0, 0.0);
        assert!(step(&mut app, player, far, &mut reader).is_empty());
        assert_eq!(step(&mut app, player, near, &mut reader), vec![trigger]);
        assert!(step(&mut app, player, near, &mut reader).is_empty());
        assert!(app.world.get::<TriggerVolume>(trigger).unwrap().is_occupied());
        assert!(step(&mut app, player, far, &mut reader).is_empty());
        assert_eq!(step(&mut app, player, near, &mut reader), vec![trigger]);
    }
}
