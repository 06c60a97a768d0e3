//! Timed, reversible stat modifiers.

use crate::types::Turn;

use super::kind::StatKind;

/// A stat change request, as issued by skills and passives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatChange {
    pub stat: StatKind,
    /// Positive amounts buff, negative amounts debuff.
    pub amount: i32,
    /// Turns the change lasts. Ignored when `permanent`.
    pub duration: u32,
    pub permanent: bool,
    /// When set, `amount` is a percentage of the stat's base value
    /// (current max for HP).
    pub percent: bool,
}

impl StatChange {
    pub fn flat(stat: StatKind, amount: i32, duration: u32) -> Self {
        Self {
            stat,
            amount,
            duration,
            permanent: false,
            percent: false,
        }
    }

    pub fn percent(stat: StatKind, amount: i32, duration: u32) -> Self {
        Self {
            stat,
            amount,
            duration,
            permanent: false,
            percent: true,
        }
    }

    pub fn permanent(stat: StatKind, amount: i32) -> Self {
        Self {
            stat,
            amount,
            duration: 0,
            permanent: true,
            percent: false,
        }
    }
}

/// Outcome of a stat change: what was actually applied after rounding and
/// clamping, so callers can log it or detect a capped no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatChangeResult {
    pub stat: Option<StatKind>,
    pub applied: i32,
    pub capped: bool,
}

impl StatChangeResult {
    /// The no-op result for rejected changes (unknown stat, dead champion).
    pub fn noop() -> Self {
        Self::default()
    }
}

/// A recorded, reversible stat delta.
///
/// Reverted exactly once when `current_turn >= expires_at` and not
/// permanent. `applied` is the post-clamp delta, so the revert restores the
/// exact pre-change value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub applied: i32,
    pub expires_at: Turn,
    pub permanent: bool,
}

impl StatModifier {
    /// Whether this modifier should be reverted at `turn`.
    pub fn expired(&self, turn: Turn) -> bool {
        !self.permanent && turn >= self.expires_at
    }
}
