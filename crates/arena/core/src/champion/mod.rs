//! The champion entity: stats, HP, shields, keywords, modifiers, resource
//! meter, cooldowns, and hook sources.
//!
//! A champion is created once per match with full base stats and empty
//! modifier state, mutated continuously by the pipeline and the lifecycle
//! manager, and never resurrected after HP reaches 0.

mod cooldown;
mod damage_mods;
mod keyword;
mod meter;
mod shield;

pub use cooldown::CooldownTable;
pub use damage_mods::{DamageModifier, DamageReduction, DamageTransform};
pub use keyword::{ABSOLUTE_IMMUNITY, Keyword, KeywordSet, KeywordSpec};
pub use meter::ResourceMeter;
pub use shield::{Shield, ShieldKind, ShieldStack};

use crate::events::HookSource;
use crate::stats::{StatBlock, StatChange, StatChangeResult, StatKind, StatModifier, StatValues, round5};
use crate::types::{ChampionId, Elements, TeamId, Turn};

/// How a `modify_hp` call is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HpChangeMode {
    /// Move the max-HP ceiling and shift current HP by the same delta.
    /// Recorded as a reversible modifier unless permanent.
    AffectMax,
    /// Move the ceiling only; current HP is re-clamped if the ceiling
    /// shrinks below it.
    MaxOnly,
    /// Plain heal or damage of current HP. Bypasses shields.
    Current,
}

/// Options for `modify_hp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HpChange {
    pub mode: HpChangeMode,
    pub permanent: bool,
    pub duration: u32,
    /// Percent amounts are computed against the current max HP.
    pub percent: bool,
}

impl HpChange {
    pub fn current() -> Self {
        Self {
            mode: HpChangeMode::Current,
            permanent: false,
            duration: 0,
            percent: false,
        }
    }

    pub fn affect_max(duration: u32) -> Self {
        Self {
            mode: HpChangeMode::AffectMax,
            permanent: false,
            duration,
            percent: false,
        }
    }

    pub fn max_only(duration: u32) -> Self {
        Self {
            mode: HpChangeMode::MaxOnly,
            permanent: false,
            duration,
            percent: false,
        }
    }

    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    pub fn percent(mut self) -> Self {
        self.percent = true;
        self
    }
}

/// Breakdown of a `take_damage` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TakeDamageResult {
    /// Portion soaked by regular shields.
    pub absorbed: i32,
    /// HP actually lost (after rounding).
    pub hp_loss: i32,
    pub hp_after: i32,
}

/// A champion in a match.
#[derive(Clone, Debug)]
pub struct Champion {
    pub id: ChampionId,
    pub name: String,
    pub team: TeamId,
    /// Elemental affinity. Immutable after creation.
    pub elements: Elements,
    pub stats: StatBlock,
    hp: i32,
    max_hp: i32,
    base_max_hp: i32,
    alive: bool,
    pub shields: ShieldStack,
    pub keywords: KeywordSet,
    pub stat_modifiers: Vec<StatModifier>,
    pub damage_reductions: Vec<DamageReduction>,
    pub damage_modifiers: Vec<DamageModifier>,
    pub meter: ResourceMeter,
    pub cooldowns: CooldownTable,
    /// Permanent passive plus temporary hook effects, in attach order.
    pub hook_sources: Vec<HookSource>,
    /// Per-champion crit bonus replacing the engine default (e.g. raised to
    /// 85 after a passive threshold).
    pub crit_bonus_override: Option<i32>,
}

impl Champion {
    pub fn new(
        id: ChampionId,
        name: impl Into<String>,
        team: TeamId,
        elements: Elements,
        max_hp: i32,
        stats: StatValues,
        meter_cap: i32,
    ) -> Self {
        let max_hp = StatKind::Hp.bounds().clamp(round5(max_hp));
        Self {
            id,
            name: name.into(),
            team,
            elements,
            stats: StatBlock::new(stats),
            hp: max_hp,
            max_hp,
            base_max_hp: max_hp,
            alive: true,
            shields: ShieldStack::empty(),
            keywords: KeywordSet::empty(),
            stat_modifiers: Vec::new(),
            damage_reductions: Vec::new(),
            damage_modifiers: Vec::new(),
            meter: ResourceMeter::new(meter_cap),
            cooldowns: CooldownTable::empty(),
            hook_sources: Vec::new(),
            crit_bonus_override: None,
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn base_max_hp(&self) -> i32 {
        self.base_max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn missing_hp(&self) -> i32 {
        self.max_hp - self.hp
    }

    /// Attach a hook source (passive or temporary effect).
    pub fn attach_hook_source(&mut self, source: HookSource) {
        self.hook_sources.push(source);
    }

    // ========================================================================
    // Keywords
    // ========================================================================

    /// Apply a keyword at `turn`.
    ///
    /// Rejected when the incoming action was already negated this
    /// resolution (`action_blocked`), when the holder has absolute immunity
    /// (unless the keyword IS immunity), or when the champion is dead.
    /// Returns whether it was applied.
    pub fn apply_keyword(&mut self, spec: &KeywordSpec, turn: Turn, action_blocked: bool) -> bool {
        if !self.alive || action_blocked {
            return false;
        }
        self.keywords.apply(spec, turn)
    }

    /// Purge expired keywords, returning removed names for logging.
    pub fn purge_expired_keywords(&mut self, turn: Turn) -> Vec<String> {
        self.keywords.purge_expired(turn)
    }

    // ========================================================================
    // Stats
    // ========================================================================

    /// Apply a buff or debuff, routed by the sign of `amount`.
    ///
    /// Percent amounts are computed against the stat's base value (current
    /// max for HP). The delta is rounded to the nearest multiple of 5 and
    /// the resulting value clamped to the stat's bounds. Non-permanent
    /// changes record a reversible entry.
    pub fn modify_stat(&mut self, change: StatChange, turn: Turn) -> StatChangeResult {
        if !self.alive {
            return StatChangeResult::noop();
        }
        if change.stat == StatKind::Hp {
            let opts = HpChange {
                mode: HpChangeMode::AffectMax,
                permanent: change.permanent,
                duration: change.duration,
                percent: change.percent,
            };
            return self.modify_hp(change.amount, opts, turn);
        }

        let base = self.stats.base(change.stat).unwrap_or(0);
        let raw = if change.percent {
            base * change.amount / 100
        } else {
            change.amount
        };
        let delta = round5(raw);

        let (applied, capped) = self.stats.shift_current(change.stat, delta);
        if change.permanent {
            self.stats.shift_base(change.stat, applied);
        } else if applied != 0 {
            self.stat_modifiers.push(StatModifier {
                stat: change.stat,
                applied,
                expires_at: turn.plus(change.duration),
                permanent: false,
            });
        }

        StatChangeResult {
            stat: Some(change.stat),
            applied,
            capped,
        }
    }

    /// Change HP in one of three modes (see [`HpChangeMode`]).
    pub fn modify_hp(&mut self, amount: i32, opts: HpChange, turn: Turn) -> StatChangeResult {
        if !self.alive {
            return StatChangeResult::noop();
        }

        match opts.mode {
            HpChangeMode::Current => {
                let applied = if amount >= 0 {
                    self.heal(amount)
                } else {
                    -self.lose_hp(-amount)
                };
                StatChangeResult {
                    stat: Some(StatKind::Hp),
                    applied,
                    capped: false,
                }
            }
            HpChangeMode::AffectMax | HpChangeMode::MaxOnly => {
                let raw = if opts.percent {
                    self.max_hp * amount / 100
                } else {
                    amount
                };
                let delta = round5(raw);
                let bounds = StatKind::Hp.bounds();
                let target = bounds.clamp(self.max_hp + delta);
                let applied = target - self.max_hp;
                let capped = target != self.max_hp + delta;
                self.max_hp = target;

                if opts.mode == HpChangeMode::AffectMax {
                    // Shift current HP by the same delta. A shrinking ceiling
                    // cannot kill: current HP floors at 5 here.
                    self.hp = (self.hp + applied).clamp(5.min(self.max_hp), self.max_hp);
                } else {
                    self.hp = self.hp.min(self.max_hp);
                }

                if opts.permanent {
                    self.base_max_hp = bounds.clamp(self.base_max_hp + applied);
                } else if applied != 0 {
                    self.stat_modifiers.push(StatModifier {
                        stat: StatKind::Hp,
                        applied,
                        expires_at: turn.plus(opts.duration),
                        permanent: false,
                    });
                }

                StatChangeResult {
                    stat: Some(StatKind::Hp),
                    applied,
                    capped,
                }
            }
        }
    }

    /// Revert and drop expired stat modifiers. Returns the reverted entries.
    pub fn purge_expired_stat_modifiers(&mut self, turn: Turn) -> Vec<StatModifier> {
        let mut reverted = Vec::new();
        let mut remaining = Vec::with_capacity(self.stat_modifiers.len());
        for modifier in self.stat_modifiers.drain(..) {
            if modifier.expired(turn) {
                reverted.push(modifier);
            } else {
                remaining.push(modifier);
            }
        }
        self.stat_modifiers = remaining;

        for modifier in &reverted {
            if modifier.stat == StatKind::Hp {
                let bounds = StatKind::Hp.bounds();
                self.max_hp = bounds.clamp(self.max_hp - modifier.applied);
                // Re-clamp whenever the ceiling shrinks.
                self.hp = self.hp.min(self.max_hp);
            } else {
                self.stats.shift_current(modifier.stat, -modifier.applied);
            }
        }
        reverted
    }

    // ========================================================================
    // Damage intake
    // ========================================================================

    /// Take final damage: regular shields absorb in order before HP.
    /// HP is rounded to the nearest multiple of 5; at 0 the champion is
    /// permanently dead.
    pub fn take_damage(&mut self, amount: i32) -> TakeDamageResult {
        if !self.alive || amount <= 0 {
            return TakeDamageResult {
                absorbed: 0,
                hp_loss: 0,
                hp_after: self.hp,
            };
        }
        let to_hp = self.shields.absorb(amount);
        let absorbed = amount - to_hp;
        let hp_loss = self.lose_hp(to_hp);
        TakeDamageResult {
            absorbed,
            hp_loss,
            hp_after: self.hp,
        }
    }

    fn lose_hp(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let before = self.hp;
        self.hp = round5((self.hp - amount).max(0)).clamp(0, self.max_hp);
        if self.hp <= 0 {
            self.hp = 0;
            self.alive = false;
        }
        before - self.hp
    }

    /// Heal current HP, clamped to max. Returns the amount actually healed
    /// (0 when dead). Event reporting is the match's job; see
    /// `MatchState::heal`.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.alive || amount <= 0 {
            return 0;
        }
        let healed = amount.min(self.missing_hp());
        self.hp += healed;
        healed
    }

    // ========================================================================
    // Damage modifiers
    // ========================================================================

    /// Sum of active flat incoming-damage reductions.
    pub fn flat_reduction(&self, turn: Turn) -> i32 {
        self.damage_reductions
            .iter()
            .filter(|r| !r.expired(turn))
            .map(|r| r.amount)
            .sum()
    }

    /// Run outgoing damage through this champion's transforms, in insertion
    /// order.
    pub fn apply_outgoing_modifiers(&self, damage: i32, turn: Turn) -> i32 {
        self.damage_modifiers
            .iter()
            .filter(|m| !m.expired(turn))
            .fold(damage, |acc, m| (m.transform)(acc))
    }

    /// Crit bonus percent for this champion.
    pub fn crit_bonus(&self, default: i32) -> i32 {
        self.crit_bonus_override.unwrap_or(default)
    }

    /// Drop expired flat reductions. Returns removed sources for logging.
    pub fn purge_expired_damage_reductions(&mut self, turn: Turn) -> Vec<String> {
        let mut removed = Vec::new();
        self.damage_reductions.retain(|r| {
            if r.expired(turn) {
                removed.push(r.source.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Drop expired outgoing-damage modifiers. Returns removed ids.
    pub fn purge_expired_damage_modifiers(&mut self, turn: Turn) -> Vec<String> {
        let mut removed = Vec::new();
        self.damage_modifiers.retain(|m| {
            if m.expired(turn) {
                removed.push(m.id.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Drop expired temporary hook effects (the permanent passive has no
    /// expiry). Returns removed source names.
    pub fn purge_expired_hook_effects(&mut self, turn: Turn) -> Vec<String> {
        let mut removed = Vec::new();
        self.hook_sources.retain(|s| {
            if s.expires_at.is_some_and(|at| turn >= at) {
                removed.push(s.name.clone());
                false
            } else {
                true
            }
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn champion() -> Champion {
        Champion::new(
            ChampionId(1),
            "Test",
            TeamId(0),
            Elements::FIRE,
            500,
            StatValues {
                attack: 100,
                defense: 35,
                speed: 50,
                evasion: 10,
                crit_chance: 20,
                life_steal: 0,
            },
            100,
        )
    }

    #[test]
    fn hp_invariant_holds_through_damage_and_heal() {
        let mut c = champion();
        c.take_damage(123);
        assert!(c.hp() >= 0 && c.hp() <= c.max_hp());
        assert_eq!(c.hp() % 5, 0);
        c.heal(10_000);
        assert_eq!(c.hp(), c.max_hp());
    }

    #[test]
    fn death_is_permanent() {
        let mut c = champion();
        c.take_damage(10_000);
        assert!(!c.is_alive());
        assert_eq!(c.heal(50), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn shields_absorb_before_hp() {
        let mut c = champion();
        c.shields.add(Shield::regular(50, 0));
        let result = c.take_damage(80);
        assert_eq!(result.absorbed, 50);
        assert_eq!(result.hp_loss, 30);
        assert_eq!(c.hp(), 470);
    }

    #[test]
    fn percent_buff_uses_base_and_rounds() {
        let mut c = champion();
        // +12% of base attack 100 = 12, rounded to 10.
        let result = c.modify_stat(StatChange::percent(StatKind::Attack, 12, 2), Turn(1));
        assert_eq!(result.applied, 10);
        assert!(!result.capped);
        assert_eq!(c.stats.current(StatKind::Attack), Some(110));
    }

    #[test]
    fn modifier_reverts_exactly_once() {
        let mut c = champion();
        c.modify_stat(StatChange::flat(StatKind::Defense, 40, 2), Turn(1));
        assert_eq!(c.stats.current(StatKind::Defense), Some(75));
        let reverted = c.purge_expired_stat_modifiers(Turn(3));
        assert_eq!(reverted.len(), 1);
        assert_eq!(c.stats.current(StatKind::Defense), Some(35));
        // Second purge finds nothing.
        assert!(c.purge_expired_stat_modifiers(Turn(4)).is_empty());
    }

    #[test]
    fn permanent_changes_move_base_and_skip_recording() {
        let mut c = champion();
        c.modify_stat(StatChange::permanent(StatKind::Attack, 20), Turn(1));
        assert_eq!(c.stats.base(StatKind::Attack), Some(120));
        assert!(c.stat_modifiers.is_empty());
    }

    #[test]
    fn capped_buff_reports_partial_delta() {
        let mut c = champion();
        let result = c.modify_stat(StatChange::flat(StatKind::CritChance, 100, 2), Turn(1));
        assert_eq!(result.applied, 75); // 20 -> 95
        assert!(result.capped);
    }

    #[test]
    fn affect_max_shifts_current_hp_and_reverts() {
        let mut c = champion();
        let result = c.modify_hp(100, HpChange::affect_max(2), Turn(1));
        assert_eq!(result.applied, 100);
        assert_eq!(c.max_hp(), 600);
        assert_eq!(c.hp(), 600);

        c.purge_expired_stat_modifiers(Turn(3));
        assert_eq!(c.max_hp(), 500);
        assert_eq!(c.hp(), 500); // re-clamped to the shrunk ceiling
    }

    #[test]
    fn max_only_leaves_current_hp() {
        let mut c = champion();
        c.take_damage(100);
        let hp_before = c.hp();
        c.modify_hp(100, HpChange::max_only(2), Turn(1));
        assert_eq!(c.max_hp(), 600);
        assert_eq!(c.hp(), hp_before);
    }

    #[test]
    fn dead_champions_reject_stat_changes() {
        let mut c = champion();
        c.take_damage(10_000);
        let result = c.modify_stat(StatChange::flat(StatKind::Attack, 50, 2), Turn(1));
        assert_eq!(result, StatChangeResult::noop());
    }

    #[test]
    fn keyword_rejected_when_action_blocked() {
        let mut c = champion();
        assert!(!c.apply_keyword(&KeywordSpec::new("stun", 2), Turn(1), true));
        assert!(c.apply_keyword(&KeywordSpec::new("stun", 2), Turn(1), false));
    }

    #[test]
    fn outgoing_modifiers_apply_in_insertion_order() {
        let mut c = champion();
        c.damage_modifiers
            .push(DamageModifier::permanent("plus20", |d| d + 20));
        c.damage_modifiers
            .push(DamageModifier::permanent("double", |d| d * 2));
        // (50 + 20) * 2, not 50 * 2 + 20
        assert_eq!(c.apply_outgoing_modifiers(50, Turn(1)), 140);
    }

    #[test]
    fn flat_reduction_sums_active_entries() {
        let mut c = champion();
        c.damage_reductions
            .push(DamageReduction::new(10, Turn(5), "aegis"));
        c.damage_reductions
            .push(DamageReduction::new(5, Turn(2), "stone skin"));
        assert_eq!(c.flat_reduction(Turn(1)), 15);
        assert_eq!(c.flat_reduction(Turn(2)), 10);
    }
}
