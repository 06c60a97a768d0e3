//! Structured outcome of a resolved action, consumed by presentation and
//! sync layers outside the engine.

use crate::types::ChampionId;

/// Outcome of one damage resolution against one target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    pub user: ChampionId,
    pub target: ChampionId,
    /// Damage the skill declared before modifiers and mitigation.
    pub base_damage: i32,
    /// Final damage applied to the target (shields plus HP).
    pub total_damage: i32,
    /// Target HP after the hit.
    pub final_hp: i32,
    /// Life-steal heal credited to the attacker, if any.
    pub heal: i32,
    pub crit: bool,
    pub evaded: bool,
    /// Log lines in resolution order: base outcome, hook fragments
    /// (before-deal, before-take, after-take, after-deal), life-steal,
    /// then per-resolution extra-log entries.
    pub log: Vec<String>,
}

impl DamageOutcome {
    /// Zero-damage outcome for short-circuit paths (immunity, negation,
    /// evasion).
    pub fn blocked(user: ChampionId, target: ChampionId, final_hp: i32, log: String) -> Self {
        Self {
            user,
            target,
            final_hp,
            log: vec![log],
            ..Self::default()
        }
    }
}
