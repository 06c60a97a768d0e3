//! Deferred secondary damage.
//!
//! Counter-attacks, recoil, and status ticks never re-enter the damage
//! pipeline from inside a hook. They are appended here and drained by the
//! turn engine after the primary action completes, so hook dispatch can
//! never recurse.

use crate::combat::DamageMode;
use crate::types::ChampionId;

/// One queued secondary hit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingDamage {
    /// Champion credited with the hit, when one exists (a poison tick has
    /// no attacker).
    pub source: Option<ChampionId>,
    pub target: ChampionId,
    pub amount: i32,
    pub mode: DamageMode,
    /// Line appended to the drain log, e.g. `"thorns strike back"`.
    pub log: String,
}

impl PendingDamage {
    pub fn new(
        source: Option<ChampionId>,
        target: ChampionId,
        amount: i32,
        mode: DamageMode,
        log: impl Into<String>,
    ) -> Self {
        Self {
            source,
            target,
            amount,
            mode,
            log: log.into(),
        }
    }
}
