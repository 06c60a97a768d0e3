//! Lifecycle event broadcast to champion hook sources.
//!
//! Every champion exposes zero or more hook sources: its permanent passive
//! plus any temporary hook effects (stances, counter postures) attached at
//! runtime. Both are the same type, distinguished only by an expiry turn.
//!
//! Dispatch is a broadcast: a named event goes to every living champion in
//! the match, not only the two parties of the current action. Handlers see
//! an immutable view of the match and return reactions; the dispatcher
//! merges recognized override fields (`damage`, `crit`, `log`) in handler
//! order and applies the returned commands afterwards. Handlers never
//! mutate mid-iteration and never re-enter the damage pipeline.
//!
//! A handler error is isolated: it is recorded on the match and broadcast
//! continues with the next handler.

use std::fmt;
use std::sync::Arc;

use strum::Display;
use tracing::warn;

use crate::champion::{DamageReduction, KeywordSpec, Shield};
use crate::state::MatchState;
use crate::stats::StatChange;
use crate::turn::PendingDamage;
use crate::types::{ChampionId, Turn};

/// Named lifecycle events the pipeline and lifecycle manager broadcast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    BeforeDamageDealt,
    BeforeDamageTaken,
    AfterDamageDealt,
    AfterDamageTaken,
    OnCriticalHit,
    OnLifeSteal,
    OnHeal,
    OnTurnStart,
    OnResourceGain,
}

/// Payload carried by a broadcast event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventPayload {
    pub attacker: Option<ChampionId>,
    pub target: Option<ChampionId>,
    /// Working damage of the resolution, when one is in flight.
    pub damage: i32,
    pub crit: bool,
    /// Heal / life-steal / meter amount for the resource-flavored events.
    pub amount: i32,
    pub turn: Turn,
}

/// What a handler sees: the event payload, an immutable match view, and
/// which champion owns the reacting hook source.
pub struct HookCtx<'a> {
    pub owner: ChampionId,
    pub state: &'a MatchState,
    pub payload: &'a EventPayload,
}

impl<'a> HookCtx<'a> {
    /// Whether the owner is the attacker of the in-flight action.
    pub fn owner_is_attacker(&self) -> bool {
        self.payload.attacker == Some(self.owner)
    }

    /// Whether the owner is the target of the in-flight action.
    pub fn owner_is_target(&self) -> bool {
        self.payload.target == Some(self.owner)
    }
}

/// Error raised by a hook handler. Never aborts dispatch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    #[error("hook handler failed: {0}")]
    Failed(String),
}

/// Deferred mutation returned by a handler and applied by the dispatcher.
#[derive(Clone, Debug)]
pub enum HookCommand {
    ApplyKeyword {
        target: ChampionId,
        spec: KeywordSpec,
    },
    /// Enqueue secondary damage (recoil, counters, status ticks) on the
    /// per-turn queue. Drained by the turn engine, never inline.
    QueueDamage(PendingDamage),
    /// Champion-level heal. Deliberately does not re-dispatch OnHeal.
    Heal {
        target: ChampionId,
        amount: i32,
    },
    GainMeter {
        target: ChampionId,
        amount: i32,
    },
    ModifyStat {
        target: ChampionId,
        change: StatChange,
    },
    AddShield {
        target: ChampionId,
        shield: Shield,
    },
    AddDamageReduction {
        target: ChampionId,
        reduction: DamageReduction,
    },
    AttachHookEffect {
        target: ChampionId,
        source: HookSource,
    },
}

/// Partial override returned by a handler.
///
/// `damage`/`crit` replace the working values of the in-flight resolution;
/// `log` is appended to the resolution log; `commands` are applied by the
/// dispatcher after the broadcast completes.
#[derive(Clone, Debug, Default)]
pub struct HookReaction {
    pub damage: Option<i32>,
    pub crit: Option<bool>,
    pub log: Option<String>,
    pub commands: Vec<HookCommand>,
}

impl HookReaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_crit(mut self, crit: bool) -> Self {
        self.crit = Some(crit);
        self
    }

    pub fn with_log(mut self, log: impl Into<String>) -> Self {
        self.log = Some(log.into());
        self
    }

    pub fn with_command(mut self, command: HookCommand) -> Self {
        self.commands.push(command);
        self
    }
}

pub type HookResult = Result<Option<HookReaction>, HookError>;

/// Named optional handlers for each lifecycle event.
///
/// Implementors override only the events they care about; the defaults are
/// no-ops, so dispatch is a plain method call rather than reflection.
pub trait EventHooks: Send + Sync {
    fn before_damage_dealt(&self, _ctx: &HookCtx<'_>) -> HookResult {
        Ok(None)
    }
    fn before_damage_taken(&self, _ctx: &HookCtx<'_>) -> HookResult {
        Ok(None)
    }
    fn after_damage_dealt(&self, _ctx: &HookCtx<'_>) -> HookResult {
        Ok(None)
    }
    fn after_damage_taken(&self, _ctx: &HookCtx<'_>) -> HookResult {
        Ok(None)
    }
    fn on_critical_hit(&self, _ctx: &HookCtx<'_>) -> HookResult {
        Ok(None)
    }
    fn on_life_steal(&self, _ctx: &HookCtx<'_>) -> HookResult {
        Ok(None)
    }
    fn on_heal(&self, _ctx: &HookCtx<'_>) -> HookResult {
        Ok(None)
    }
    fn on_turn_start(&self, _ctx: &HookCtx<'_>) -> HookResult {
        Ok(None)
    }
    fn on_resource_gain(&self, _ctx: &HookCtx<'_>) -> HookResult {
        Ok(None)
    }
}

/// One hook source: a permanent passive (`expires_at: None`) or a temporary
/// hook effect (`expires_at: Some(turn)`), stored in one ordered collection
/// per champion.
#[derive(Clone)]
pub struct HookSource {
    pub name: String,
    pub expires_at: Option<Turn>,
    pub hooks: Arc<dyn EventHooks>,
}

impl HookSource {
    /// A permanent passive.
    pub fn passive(name: impl Into<String>, hooks: Arc<dyn EventHooks>) -> Self {
        Self {
            name: name.into(),
            expires_at: None,
            hooks,
        }
    }

    /// A temporary hook effect purged once `expires_at` is reached.
    pub fn effect(name: impl Into<String>, expires_at: Turn, hooks: Arc<dyn EventHooks>) -> Self {
        Self {
            name: name.into(),
            expires_at: Some(expires_at),
            hooks,
        }
    }
}

impl fmt::Debug for HookSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSource")
            .field("name", &self.name)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Record of an isolated handler failure, surfaced on the match state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookFailure {
    pub champion: ChampionId,
    pub source: String,
    pub event: GameEvent,
    pub message: String,
}

/// Merged result of one broadcast.
#[derive(Clone, Debug, Default)]
pub struct DispatchOutcome {
    /// Last damage override, if any handler produced one.
    pub damage: Option<i32>,
    /// Last crit override, if any handler produced one.
    pub crit: Option<bool>,
    /// Log fragments in handler order.
    pub logs: Vec<String>,
}

/// Broadcast `event` to every living champion's hook sources.
///
/// Handlers run against an immutable snapshot of the match in champion
/// order (attach order within a champion). Overrides merge in that order;
/// commands apply after the broadcast. Failures are recorded on
/// `state.hook_failures` and never stop delivery.
pub fn dispatch(state: &mut MatchState, event: GameEvent, payload: &EventPayload) -> DispatchOutcome {
    // Snapshot the handler list up front so command application cannot
    // invalidate the iteration.
    let sources: Vec<(ChampionId, String, Arc<dyn EventHooks>)> = state
        .champions()
        .filter(|c| c.is_alive())
        .flat_map(|c| {
            c.hook_sources
                .iter()
                .map(move |s| (c.id, s.name.clone(), Arc::clone(&s.hooks)))
        })
        .collect();

    let mut outcome = DispatchOutcome::default();
    let mut commands = Vec::new();
    let mut failures = Vec::new();

    for (owner, source_name, hooks) in sources {
        let ctx = HookCtx {
            owner,
            state,
            payload,
        };
        let result = match event {
            GameEvent::BeforeDamageDealt => hooks.before_damage_dealt(&ctx),
            GameEvent::BeforeDamageTaken => hooks.before_damage_taken(&ctx),
            GameEvent::AfterDamageDealt => hooks.after_damage_dealt(&ctx),
            GameEvent::AfterDamageTaken => hooks.after_damage_taken(&ctx),
            GameEvent::OnCriticalHit => hooks.on_critical_hit(&ctx),
            GameEvent::OnLifeSteal => hooks.on_life_steal(&ctx),
            GameEvent::OnHeal => hooks.on_heal(&ctx),
            GameEvent::OnTurnStart => hooks.on_turn_start(&ctx),
            GameEvent::OnResourceGain => hooks.on_resource_gain(&ctx),
        };

        match result {
            Ok(None) => {}
            Ok(Some(reaction)) => {
                if let Some(damage) = reaction.damage {
                    outcome.damage = Some(damage);
                }
                if let Some(crit) = reaction.crit {
                    outcome.crit = Some(crit);
                }
                if let Some(log) = reaction.log {
                    outcome.logs.push(log);
                }
                commands.extend(reaction.commands);
            }
            Err(err) => {
                warn!(%owner, source = %source_name, event = %event, error = %err, "hook handler failed, continuing dispatch");
                failures.push(HookFailure {
                    champion: owner,
                    source: source_name,
                    event,
                    message: err.to_string(),
                });
            }
        }
    }

    state.hook_failures.extend(failures);
    apply_commands(state, commands);
    outcome
}

fn apply_commands(state: &mut MatchState, commands: Vec<HookCommand>) {
    for command in commands {
        match command {
            HookCommand::ApplyKeyword { target, spec } => {
                let turn = state.turn;
                let blocked = state.is_action_blocked(target);
                if let Some(champion) = state.champion_mut(target) {
                    champion.apply_keyword(&spec, turn, blocked);
                }
            }
            HookCommand::QueueDamage(pending) => {
                state.extra_damage.push(pending);
            }
            HookCommand::Heal { target, amount } => {
                if let Some(champion) = state.champion_mut(target) {
                    champion.heal(amount);
                }
            }
            HookCommand::GainMeter { target, amount } => {
                if let Some(champion) = state.champion_mut(target) {
                    champion.meter.gain(amount);
                }
            }
            HookCommand::ModifyStat { target, change } => {
                let turn = state.turn;
                if let Some(champion) = state.champion_mut(target) {
                    champion.modify_stat(change, turn);
                }
            }
            HookCommand::AddShield { target, shield } => {
                if let Some(champion) = state.champion_mut(target) {
                    champion.shields.add(shield);
                }
            }
            HookCommand::AddDamageReduction { target, reduction } => {
                if let Some(champion) = state.champion_mut(target) {
                    champion.damage_reductions.push(reduction);
                }
            }
            HookCommand::AttachHookEffect { target, source } => {
                if let Some(champion) = state.champion_mut(target) {
                    champion.attach_hook_source(source);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::champion::Champion;
    use crate::stats::StatValues;
    use crate::types::{Elements, TeamId};

    struct Overrider;
    impl EventHooks for Overrider {
        fn before_damage_dealt(&self, ctx: &HookCtx<'_>) -> HookResult {
            Ok(Some(
                HookReaction::new()
                    .with_damage(ctx.payload.damage + 15)
                    .with_log("surge"),
            ))
        }
    }

    struct Faulty;
    impl EventHooks for Faulty {
        fn before_damage_dealt(&self, _ctx: &HookCtx<'_>) -> HookResult {
            Err(HookError::Failed("missing runtime counter".into()))
        }
    }

    struct Meterer;
    impl EventHooks for Meterer {
        fn before_damage_dealt(&self, ctx: &HookCtx<'_>) -> HookResult {
            Ok(Some(HookReaction::new().with_command(HookCommand::GainMeter {
                target: ctx.owner,
                amount: 10,
            })))
        }
    }

    fn test_state() -> MatchState {
        let mut state = MatchState::new(1);
        for id in 0..3 {
            state.add_champion(Champion::new(
                ChampionId(id),
                format!("c{id}"),
                TeamId((id % 2) as u8),
                Elements::FIRE,
                500,
                StatValues {
                    attack: 100,
                    defense: 35,
                    speed: 50,
                    evasion: 0,
                    crit_chance: 0,
                    life_steal: 0,
                },
                100,
            ));
        }
        state
    }

    #[test]
    fn broadcast_reaches_every_champion() {
        let mut state = test_state();
        for id in 0..3 {
            state
                .champion_mut(ChampionId(id))
                .unwrap()
                .attach_hook_source(HookSource::passive("meter", Arc::new(Meterer)));
        }
        dispatch(
            &mut state,
            GameEvent::BeforeDamageDealt,
            &EventPayload::default(),
        );
        for id in 0..3 {
            assert_eq!(state.champion(ChampionId(id)).unwrap().meter.current(), 10);
        }
    }

    #[test]
    fn failure_is_isolated_and_recorded() {
        let mut state = test_state();
        state
            .champion_mut(ChampionId(0))
            .unwrap()
            .attach_hook_source(HookSource::passive("broken", Arc::new(Faulty)));
        state
            .champion_mut(ChampionId(1))
            .unwrap()
            .attach_hook_source(HookSource::passive("surge", Arc::new(Overrider)));

        let payload = EventPayload {
            damage: 50,
            ..Default::default()
        };
        let outcome = dispatch(&mut state, GameEvent::BeforeDamageDealt, &payload);

        // The faulty handler did not stop the second one.
        assert_eq!(outcome.damage, Some(65));
        assert_eq!(outcome.logs, vec!["surge".to_string()]);
        assert_eq!(state.hook_failures.len(), 1);
        assert_eq!(state.hook_failures[0].champion, ChampionId(0));
        assert_eq!(state.hook_failures[0].event, GameEvent::BeforeDamageDealt);
    }

    #[test]
    fn later_overrides_win() {
        let mut state = test_state();
        state
            .champion_mut(ChampionId(0))
            .unwrap()
            .attach_hook_source(HookSource::passive("first", Arc::new(Overrider)));
        state
            .champion_mut(ChampionId(1))
            .unwrap()
            .attach_hook_source(HookSource::passive("second", Arc::new(Overrider)));

        let payload = EventPayload {
            damage: 50,
            ..Default::default()
        };
        let outcome = dispatch(&mut state, GameEvent::BeforeDamageDealt, &payload);
        // Both saw payload damage 50; the later handler's override stands.
        assert_eq!(outcome.damage, Some(65));
        assert_eq!(outcome.logs.len(), 2);
    }

    #[test]
    fn dead_champions_do_not_react() {
        let mut state = test_state();
        state
            .champion_mut(ChampionId(0))
            .unwrap()
            .attach_hook_source(HookSource::passive("meter", Arc::new(Meterer)));
        state.champion_mut(ChampionId(0)).unwrap().take_damage(10_000);

        dispatch(
            &mut state,
            GameEvent::BeforeDamageDealt,
            &EventPayload::default(),
        );
        assert_eq!(state.champion(ChampionId(0)).unwrap().meter.current(), 0);
    }
}
