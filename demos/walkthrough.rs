//! Walk into two characters with WASD. Bev talks first, Feri only talks once
//! Bev's conversation is over. Space advances, Escape skips.
//! The dialogue box is printed to the console.

use bevy::{asset::LoadState, prelude::*};
use bevy_dialogue_triggers::prelude::*;

#[derive(States, Default, Debug, Clone, Eq, PartialEq, Hash)]
enum AppState {
    #[default]
    LoadAssets,
    Loaded,
}

#[derive(Resource)]
struct TriggerAssets {
    bev: Handle<TriggerData>,
    feri: Handle<TriggerData>,
}

fn main() {
    App::new()
        .add_plugins((DefaultPlugins, DialogueTriggersPlugin))
        // region: boilerplate to load the triggers
        .add_state::<AppState>()
        .add_systems(OnEnter(AppState::LoadAssets), load_triggers)
        .add_systems(Update, check_loading.run_if(in_state(AppState::LoadAssets)))
        // endregion
        .add_systems(OnEnter(AppState::Loaded), setup)
        .add_systems(
            Update,
            (print_lines, print_ended, print_completed)
                .after(DialogueSet)
                .run_if(in_state(AppState::Loaded)),
        )
        .run();
}

fn load_triggers(mut commands: Commands, server: Res<AssetServer>) {
    commands.insert_resource(TriggerAssets {
        bev: server.load("triggers/bev.trigger.ron"),
        feri: server.load("triggers/feri.trigger.ron"),
    });
}

fn check_loading(
    server: Res<AssetServer>,
    handles: Res<TriggerAssets>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let loaded = |h: &Handle<TriggerData>| server.get_load_state(h) == Some(LoadState::Loaded);
    if loaded(&handles.bev) && loaded(&handles.feri) {
        next_state.set(AppState::Loaded);
    }
}

/// Spawns the player, the camera and the two triggers, and links Feri to Bev.
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    triggers: Res<Assets<TriggerData>>,
    handles: Res<TriggerAssets>,
) {
    let player = commands
        .spawn((
            PbrBundle {
                mesh: meshes.add(shape::Cube { size: 0.5 }.into()),
                material: materials.add(Color::rgb(0.3, 0.5, 0.9).into()),
                ..default()
            },
            PlayerController { movement_speed: 4.0 },
            MoveDirection::default(),
        ))
        .id();

    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 8.0, -8.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        CameraFollow {
            target: player,
            offset: Vec3::new(0.0, 8.0, -8.0),
        },
    ));
    commands.spawn(PointLightBundle {
        transform: Transform::from_xyz(0.0, 6.0, 0.0),
        ..default()
    });

    let mut spawn_npc = |data: &Handle<TriggerData>, at: Vec3, color: Color| {
        let Some(data) = triggers.get(data) else {
            return None;
        };
        let id = commands
            .spawn_dialogue_trigger(data.trigger().clone())
            .insert((
                PbrBundle {
                    mesh: meshes.add(shape::UVSphere { radius: 0.4, ..default() }.into()),
                    material: materials.add(color.into()),
                    transform: Transform::from_translation(at),
                    ..default()
                },
                TriggerVolume::new(1.5),
                EndEventTag(data.trigger().speaker.clone()),
            ))
            .id();
        Some(id)
    };

    let bev = spawn_npc(&handles.bev, Vec3::new(3.0, 0.0, 3.0), Color::ORANGE);
    let feri = spawn_npc(&handles.feri, Vec3::new(-3.0, 0.0, 3.0), Color::GREEN);
    if let (Some(bev), Some(feri)) = (bev, feri) {
        commands.link_conversation(feri, bev);
    }

    println!("-----------------------------------------------");
    println!("WASD to walk, space to advance, escape to skip.");
    println!("-----------------------------------------------");
}

fn print_lines(mut lines: EventReader<LineStarted>, display: Res<DialogueDisplay>) {
    for line in lines.read() {
        println!("{}: {}", display.speaker, line.text);
    }
}

fn print_ended(mut ended: EventReader<ConversationEnded>) {
    for ev in ended.read() {
        if ev.skipped {
            println!("--- conversation skipped.");
        } else {
            println!("--- conversation over.");
        }
    }
}

fn print_completed(mut tagged: EventReader<TaggedEndEvent>) {
    for ev in tagged.read() {
        println!("--- {} has nothing more to say for now.", ev.tag);
    }
}
