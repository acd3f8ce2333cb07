//! The dialogue system: the global conversation gate and the systems that
//! start, type, advance and finish conversations.

use std::time::Duration;

use aery::{prelude::*, tuple_traits::RelationEntries};
use bevy::ecs::system::Command;
use bevy::prelude::*;
use bevy::time::Real;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::prelude::*;

/// The relation linking a trigger to the trigger whose conversation must
/// complete before it can play.
///
/// A trigger has at most one prerequisite; linking it again replaces the old one.
#[derive(Relation)]
pub struct GatedBy;

/// Links two conversations: `gated` only plays once `prerequisite` has completed
/// its conversation. Use [`DialogueCommandsExt::link_conversation`] to queue it.
pub struct LinkConversationCommand {
    /// The trigger that waits.
    pub gated: Entity,
    /// The trigger that has to complete first.
    pub prerequisite: Entity,
}

impl Command for LinkConversationCommand {
    fn apply(self, world: &mut World) {
        if world.get_entity(self.prerequisite).is_none() {
            warn!(
                "Cannot link {:?} to missing prerequisite {:?}.",
                self.gated, self.prerequisite
            );
            return;
        }
        let Some(mut gated) = world.get_entity_mut(self.gated) else {
            warn!(
                "Cannot link missing trigger {:?} to prerequisite {:?}.",
                self.gated, self.prerequisite
            );
            return;
        };
        gated.set::<GatedBy>(self.prerequisite);
    }
}

/// The prerequisite of a linked trigger, as seen when it is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prerequisite {
    /// The prerequisite trigger entity.
    pub trigger: Entity,
    /// Whether the prerequisite completed a conversation.
    pub complete: bool,
}

/// The conversation being played and the trigger playing it.
#[derive(Debug)]
pub struct ActiveConversation {
    /// The trigger entity.
    pub trigger: Entity,
    /// Which of the trigger's dialogue lists is played.
    pub kind: DialogueKind,
    /// The typing state machine.
    pub conversation: Conversation,
    /// The last line announced with a [`LineStarted`] event.
    announced: Option<usize>,
}

/// The shared state of all triggers. At most one conversation plays at a time.
#[derive(Resource, Debug, Default)]
pub struct DialogueSystem {
    /// Set while a conversation plays. No trigger can start while it is true.
    conversing: bool,
    /// The conversation being played.
    active: Option<ActiveConversation>,
}

impl DialogueSystem {
    /// Whether a conversation is playing.
    pub fn is_conversing(&self) -> bool {
        self.conversing
    }

    /// The conversation being played, if any.
    pub fn active(&self) -> Option<&ActiveConversation> {
        self.active.as_ref()
    }

    /// Checks whether a trigger with the given prerequisite may start a conversation.
    pub fn can_play_conversation(
        &self,
        prerequisite: Option<Prerequisite>,
    ) -> Result<(), StartConversationError> {
        if self.conversing {
            return Err(StartConversationError::AlreadyConversing);
        }
        match prerequisite {
            Some(p) if !p.complete => Err(StartConversationError::Locked(p.trigger)),
            _ => Ok(()),
        }
    }

    /// Starts playing `selected` for `trigger`.
    fn begin(
        &mut self,
        trigger: Entity,
        selected: SelectedDialogue,
        type_interval: Duration,
    ) -> Result<(), StartConversationError> {
        let conversation = Conversation::new(selected.lines, type_interval)?;
        self.conversing = true;
        self.active = Some(ActiveConversation {
            trigger,
            kind: selected.kind,
            conversation,
            announced: None,
        });
        Ok(())
    }

    /// The active conversation, mutably.
    fn active_mut(&mut self) -> Result<&mut Conversation, ConversationError> {
        self.active
            .as_mut()
            .map(|a| &mut a.conversation)
            .ok_or(ConversationError::NoActiveConversation)
    }

    /// Removes the active conversation if it is complete.
    fn take_completed(&mut self) -> Option<ActiveConversation> {
        if !self.active.as_ref()?.conversation.is_complete() {
            return None;
        }
        self.conversing = false;
        self.active.take()
    }
}

/// The random generator used to pick random secondary lines.
#[derive(Resource, Debug, Clone)]
pub struct DialogueRng(pub ChaCha8Rng);

impl DialogueRng {
    /// A generator with a fixed seed, for reproducible picks.
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for DialogueRng {
    fn default() -> Self {
        Self::seeded(rand::random())
    }
}

/// Counts down until a visited trigger can be entered again.
#[derive(Component, Debug, Clone)]
pub struct ReplayCooldown(pub Timer);

/// Starts a conversation for every entered trigger that is allowed to play.
pub(crate) fn start_conversations(
    mut entered: EventReader<TriggerEntered>,
    mut system: ResMut<DialogueSystem>,
    mut rng: ResMut<DialogueRng>,
    mut display: ResMut<DialogueDisplay>,
    config: Res<DialogueConfig>,
    mut triggers: Query<(&DialogueTrigger, &mut TriggerState)>,
    gates: Query<Relations<GatedBy>>,
    mut started: EventWriter<ConversationStarted>,
) {
    for &TriggerEntered(entity) in entered.read() {
        let prerequisite = prerequisite_of(entity, &gates, &triggers);
        let Ok((trigger, mut state)) = triggers.get_mut(entity) else {
            warn!("Entered entity {:?} is not a dialogue trigger.", entity);
            continue;
        };

        let result = system
            .can_play_conversation(prerequisite)
            .and_then(|_| match state.visited {
                true => Err(StartConversationError::AlreadyVisited),
                false => trigger.select_dialogue(&state, &mut rng.0),
            })
            .and_then(|selected| {
                let kind = selected.kind;
                system.begin(entity, selected, config.type_interval)?;
                Ok(kind)
            });

        match result {
            Ok(kind) => {
                state.begin();
                display.show(trigger);
                info!("Trigger {:?} started a {:?} conversation.", entity, kind);
                started.send(ConversationStarted {
                    trigger: entity,
                    kind,
                });
            }
            Err(err) => debug!("Trigger {:?} did not start: {}", entity, err),
        }
    }
}

/// Looks up the prerequisite of a trigger and whether it completed.
fn prerequisite_of(
    trigger: Entity,
    gates: &Query<Relations<GatedBy>>,
    triggers: &Query<(&DialogueTrigger, &mut TriggerState)>,
) -> Option<Prerequisite> {
    let edges = gates.get(trigger).ok()?;
    let prerequisite = *edges.targets(GatedBy).first()?;
    let complete = match triggers.get(prerequisite) {
        Ok((_, state)) => state.conversation_complete,
        Err(_) => {
            warn!(
                "Prerequisite {:?} of trigger {:?} is not a dialogue trigger.",
                prerequisite, trigger
            );
            false
        }
    };
    Some(Prerequisite {
        trigger: prerequisite,
        complete,
    })
}

/// Forwards [`SkipConversationRequest`] events to the active conversation.
pub(crate) fn handle_skip_requests(
    mut requests: EventReader<SkipConversationRequest>,
    mut system: ResMut<DialogueSystem>,
) -> Result<(), ConversationError> {
    for _ in requests.read() {
        system.active_mut()?.skip()?;
    }
    Ok(())
}

/// Forwards [`NextLineRequest`] events to the active conversation.
pub(crate) fn handle_next_requests(
    mut requests: EventReader<NextLineRequest>,
    mut system: ResMut<DialogueSystem>,
) -> Result<(), ConversationError> {
    for _ in requests.read() {
        system.active_mut()?.next()?;
    }
    Ok(())
}

/// Logs the errors of the request handlers.
///
/// Requests sent while nothing plays are normal (the player mashing a key),
/// so they are only logged at debug level.
pub(crate) fn error_handler(In(result): In<Result<(), ConversationError>>) {
    if let Err(err) = result {
        debug!("Dialogue request ignored: {}", err);
    }
}

/// Types the active conversation with the real time elapsed since last frame.
pub(crate) fn type_conversation(time: Res<Time<Real>>, mut system: ResMut<DialogueSystem>) {
    if let Ok(conversation) = system.active_mut() {
        conversation.tick(time.delta());
    }
}

/// Mirrors the active conversation into the [`DialogueDisplay`] and announces new lines.
pub(crate) fn sync_display(
    mut system: ResMut<DialogueSystem>,
    mut display: ResMut<DialogueDisplay>,
    mut line_started: EventWriter<LineStarted>,
) {
    let Some(active) = system.active.as_mut() else {
        return;
    };
    if active.conversation.is_complete() {
        return;
    }

    let index = active.conversation.line_index();
    if active.announced != Some(index) {
        active.announced = Some(index);
        line_started.send(LineStarted {
            trigger: active.trigger,
            index,
            text: active.conversation.current_line().to_string(),
        });
    }

    let typed = active.conversation.typed_text();
    if display.text != typed {
        display.text = typed;
    }
}

/// Runs the completion path of a finished conversation.
pub(crate) fn finish_conversations(
    mut cmd: Commands,
    mut system: ResMut<DialogueSystem>,
    mut display: ResMut<DialogueDisplay>,
    mut triggers: Query<(&DialogueTrigger, &mut TriggerState)>,
    emitters: Query<&dyn CompletionEventEmitter>,
    type_registry: Res<AppTypeRegistry>,
    mut ended: EventWriter<ConversationEnded>,
    mut end_events: EventWriter<DialogueEndEvent>,
) {
    let Some(finished) = system.take_completed() else {
        return;
    };
    display.hide();

    let entity = finished.trigger;
    let skipped = finished.conversation.was_skipped();
    info!("Trigger {:?} finished its conversation (skipped: {}).", entity, skipped);
    ended.send(ConversationEnded {
        trigger: entity,
        skipped,
    });

    let Ok((trigger, mut state)) = triggers.get_mut(entity) else {
        warn!("Trigger {:?} was despawned during its conversation.", entity);
        return;
    };
    state.complete(finished.kind, skipped);

    if trigger.fire_event_on_completion {
        end_events.send(DialogueEndEvent(entity));
        emit_completion_events(&mut cmd, &emitters, entity, &type_registry);
    }

    if let Some(cooldown) = state.replay_cooldown(trigger) {
        cmd.entity(entity)
            .insert(ReplayCooldown(Timer::new(cooldown, TimerMode::Once)));
    }
}

/// Sends the events of every [`CompletionEventEmitter`] on the trigger.
fn emit_completion_events(
    cmd: &mut Commands,
    emitters: &Query<&dyn CompletionEventEmitter>,
    trigger: Entity,
    type_registry: &AppTypeRegistry,
) {
    let Ok(emitters) = emitters.get(trigger) else {
        return;
    };
    let type_registry = type_registry.read();

    for emitter in &emitters {
        let emitted_event = emitter.make(trigger);
        let event_type_id = emitted_event.as_any().type_id();

        let Some(reflect_event) = type_registry
            .get_type_data::<ReflectEvent>(event_type_id)
            .cloned()
        else {
            error!(
                "Completion event {} is not registered, use `register_completion_event`.",
                emitted_event.reflect_type_path()
            );
            continue;
        };

        cmd.add(move |world: &mut World| {
            reflect_event.send(&*emitted_event, world);
        });
    }
}

/// Ticks replay cooldowns and makes triggers enterable again when they run out.
pub(crate) fn tick_replay_cooldowns(
    mut cmd: Commands,
    time: Res<Time<Real>>,
    mut cooldowns: Query<(Entity, &mut ReplayCooldown, &mut TriggerState)>,
) {
    for (entity, mut cooldown, mut state) in &mut cooldowns {
        if cooldown.0.tick(time.delta()).finished() {
            state.visited = false;
            cmd.entity(entity).remove::<ReplayCooldown>();
            debug!("Trigger {:?} can be replayed.", entity);
        }
    }
}
