//! Stat kinds and their clamp bounds.

use strum::{Display, EnumIter, EnumString};

/// Bounds configuration for a stat value.
///
/// Centralizes every clamp range so the modifier paths and the damage
/// pipeline agree on what a legal stat value is.
#[derive(Clone, Copy, Debug)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Flat combat stats (Attack, Defense, Speed) stay in [10, 999].
    pub const COMBAT: Self = Self { min: 10, max: 999 };

    /// Percent-chance stats (Critical, Evasion, LifeSteal) stay in [0, 95].
    pub const CHANCE: Self = Self { min: 0, max: 95 };

    /// Maximum HP stays in [10, 9999].
    pub const MAX_HP: Self = Self { min: 10, max: 9999 };

    /// Clamp a value into this range.
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// The stats a champion carries.
///
/// `Hp` addresses the maximum-HP ceiling; current HP is tracked separately
/// on the champion and re-clamped whenever the ceiling moves.
///
/// Parses from lowercase names via strum so data-driven modifier calls can
/// address stats by string ("attack", "crit_chance", ...). An unknown name
/// fails to parse and the caller reports a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    Speed,
    Evasion,
    CritChance,
    LifeSteal,
}

impl StatKind {
    /// Clamp bounds for this stat.
    pub fn bounds(self) -> StatBounds {
        match self {
            StatKind::Hp => StatBounds::MAX_HP,
            StatKind::Attack | StatKind::Defense | StatKind::Speed => StatBounds::COMBAT,
            StatKind::Evasion | StatKind::CritChance | StatKind::LifeSteal => StatBounds::CHANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn parses_lowercase_names() {
        assert_eq!(StatKind::from_str("attack"), Ok(StatKind::Attack));
        assert_eq!(StatKind::from_str("crit_chance"), Ok(StatKind::CritChance));
        assert!(StatKind::from_str("swagger").is_err());
    }

    #[test]
    fn chance_stats_cap_at_95() {
        assert_eq!(StatKind::CritChance.bounds().clamp(140), 95);
        assert_eq!(StatKind::Evasion.bounds().clamp(-10), 0);
    }

    #[test]
    fn combat_stats_floor_at_10() {
        assert_eq!(StatKind::Defense.bounds().clamp(-50), 10);
        assert_eq!(StatKind::Attack.bounds().clamp(2000), 999);
    }
}
