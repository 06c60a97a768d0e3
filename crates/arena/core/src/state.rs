//! Match-scoped state: the champion roster plus per-resolution and
//! per-turn scratch space.
//!
//! A match owns its champions exclusively. Anything that looks like a
//! global toggle (fixed-damage debug mode) is a field here, threaded
//! through resolution, never a process-wide flag.

use std::fmt;

use arrayvec::ArrayVec;
use tracing::warn;

use crate::champion::Champion;
use crate::config::{EngineConfig, SimulationConfig};
use crate::extension::ExtensionStore;
use crate::events::{self, EventPayload, GameEvent, HookFailure};
use crate::rng::{PcgRng, RngOracle};
use crate::stats::{StatChange, StatChangeResult, StatKind};
use crate::turn::PendingDamage;
use crate::types::{ChampionId, TeamId, Turn};

/// All state owned by one running match.
pub struct MatchState {
    pub engine: EngineConfig,
    pub sim: SimulationConfig,
    pub turn: Turn,
    seed: u64,
    nonce: u64,
    rng: Box<dyn RngOracle>,
    champions: ArrayVec<Champion, { EngineConfig::MAX_CHAMPIONS }>,
    /// Deferred secondary hits, drained by the turn engine.
    pub extra_damage: Vec<PendingDamage>,
    /// Per-resolution log fragments appended by skills and hooks, drained
    /// into the outcome at the end of each resolution.
    pub extra_log: Vec<String>,
    /// Champions whose incoming action was negated this resolution; keyword
    /// application against them is denied until the block clears.
    action_blocked: ArrayVec<ChampionId, { EngineConfig::MAX_CHAMPIONS }>,
    /// Isolated hook handler failures, kept for diagnostics.
    pub hook_failures: Vec<HookFailure>,
    /// Typed champion-specific runtime state (content-declared schemas).
    pub extensions: ExtensionStore,
}

impl MatchState {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seed, Box::new(PcgRng))
    }

    pub fn with_rng(seed: u64, rng: Box<dyn RngOracle>) -> Self {
        Self {
            engine: EngineConfig::default(),
            sim: SimulationConfig::default(),
            turn: Turn(1),
            seed,
            nonce: 0,
            rng,
            champions: ArrayVec::new(),
            extra_damage: Vec::new(),
            extra_log: Vec::new(),
            action_blocked: ArrayVec::new(),
            hook_failures: Vec::new(),
            extensions: ExtensionStore::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng(&self) -> &dyn RngOracle {
        self.rng.as_ref()
    }

    /// Next action sequence number. Each resolved action consumes one, so
    /// replays with the same seed draw the same rolls.
    pub fn next_nonce(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce += 1;
        nonce
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Add a champion. Silently ignored once the roster is full.
    pub fn add_champion(&mut self, champion: Champion) {
        if self.champions.is_full() {
            warn!(id = %champion.id, "roster full, champion not added");
            return;
        }
        self.champions.push(champion);
    }

    pub fn champion(&self, id: ChampionId) -> Option<&Champion> {
        self.champions.iter().find(|c| c.id == id)
    }

    pub fn champion_mut(&mut self, id: ChampionId) -> Option<&mut Champion> {
        self.champions.iter_mut().find(|c| c.id == id)
    }

    pub fn champions(&self) -> impl Iterator<Item = &Champion> {
        self.champions.iter()
    }

    pub fn champions_mut(&mut self) -> impl Iterator<Item = &mut Champion> {
        self.champions.iter_mut()
    }

    pub fn team(&self, team: TeamId) -> impl Iterator<Item = &Champion> {
        self.champions.iter().filter(move |c| c.team == team)
    }

    /// Whether any champion on `team` is still alive.
    pub fn team_alive(&self, team: TeamId) -> bool {
        self.team(team).any(Champion::is_alive)
    }

    // ========================================================================
    // Action blocks
    // ========================================================================

    pub fn is_action_blocked(&self, id: ChampionId) -> bool {
        self.action_blocked.contains(&id)
    }

    /// Mark `id`'s incoming action as negated for the rest of this
    /// resolution.
    pub fn block_action(&mut self, id: ChampionId) {
        if !self.action_blocked.contains(&id) && !self.action_blocked.is_full() {
            self.action_blocked.push(id);
        }
    }

    /// Clear per-resolution block flags. Called by the turn engine once the
    /// primary action and its deferred queue are done.
    pub fn clear_action_blocks(&mut self) {
        self.action_blocked.clear();
    }

    // ========================================================================
    // Event-reporting mutations
    // ========================================================================

    /// Heal `target` and broadcast `OnHeal` with the applied amount, unless
    /// suppressed. Life-steal healing suppresses the event so it cannot
    /// feed back into heal-reactive passives.
    pub fn heal(&mut self, target: ChampionId, amount: i32, suppress_event: bool) -> i32 {
        let Some(champion) = self.champion_mut(target) else {
            return 0;
        };
        let healed = champion.heal(amount);
        if healed > 0 && !suppress_event {
            let payload = EventPayload {
                target: Some(target),
                amount: healed,
                turn: self.turn,
                ..Default::default()
            };
            events::dispatch(self, GameEvent::OnHeal, &payload);
        }
        healed
    }

    /// Add meter to `target`, clamped to `[0, cap]`. Broadcasts
    /// `OnResourceGain` with the applied (not requested) delta when it is
    /// positive. Returns the applied delta so callers can detect a no-op.
    pub fn gain_meter(&mut self, target: ChampionId, amount: i32) -> i32 {
        let Some(champion) = self.champion_mut(target) else {
            return 0;
        };
        let applied = champion.meter.gain(amount);
        if applied > 0 {
            let payload = EventPayload {
                target: Some(target),
                amount: applied,
                turn: self.turn,
                ..Default::default()
            };
            events::dispatch(self, GameEvent::OnResourceGain, &payload);
        }
        applied
    }

    /// Stat change addressed by name, for content defined as data. An
    /// unknown name is a diagnosed no-op, never an error and never a
    /// partial mutation.
    pub fn modify_stat_by_name(
        &mut self,
        target: ChampionId,
        stat: &str,
        change: StatChange,
    ) -> StatChangeResult {
        let Ok(kind) = stat.parse::<StatKind>() else {
            warn!(%target, stat, "unknown stat name, ignoring modifier");
            return StatChangeResult::noop();
        };
        let turn = self.turn;
        match self.champion_mut(target) {
            Some(champion) => champion.modify_stat(StatChange { stat: kind, ..change }, turn),
            None => StatChangeResult::noop(),
        }
    }
}

impl fmt::Debug for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchState")
            .field("turn", &self.turn)
            .field("seed", &self.seed)
            .field("nonce", &self.nonce)
            .field("champions", &self.champions)
            .field("extra_damage", &self.extra_damage)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatValues;
    use crate::types::Elements;

    fn state_with_one() -> MatchState {
        let mut state = MatchState::new(7);
        state.add_champion(Champion::new(
            ChampionId(1),
            "Solo",
            TeamId(0),
            Elements::WATER,
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
        state
    }

    #[test]
    fn nonce_is_sequential() {
        let mut state = state_with_one();
        assert_eq!(state.next_nonce(), 0);
        assert_eq!(state.next_nonce(), 1);
    }

    #[test]
    fn meter_gain_reports_applied_delta() {
        let mut state = state_with_one();
        assert_eq!(state.gain_meter(ChampionId(1), 80), 80);
        // Cap is 100: only 20 fits.
        assert_eq!(state.gain_meter(ChampionId(1), 80), 20);
        assert_eq!(state.gain_meter(ChampionId(1), 80), 0);
    }

    #[test]
    fn unknown_stat_name_is_a_noop() {
        let mut state = state_with_one();
        let result = state.modify_stat_by_name(
            ChampionId(1),
            "swagger",
            StatChange::flat(StatKind::Attack, 50, 2),
        );
        assert_eq!(result, StatChangeResult::noop());
        let c = state.champion(ChampionId(1)).unwrap();
        assert_eq!(c.stats.current(StatKind::Attack), Some(100));
    }

    #[test]
    fn stat_by_name_parses_snake_case() {
        let mut state = state_with_one();
        let result = state.modify_stat_by_name(
            ChampionId(1),
            "crit_chance",
            StatChange::flat(StatKind::Attack, 30, 2),
        );
        assert_eq!(result.stat, Some(StatKind::CritChance));
        assert_eq!(result.applied, 30);
    }

    #[test]
    fn action_blocks_clear_per_resolution() {
        let mut state = state_with_one();
        state.block_action(ChampionId(1));
        assert!(state.is_action_blocked(ChampionId(1)));
        state.clear_action_blocks();
        assert!(!state.is_action_blocked(ChampionId(1)));
    }
}
