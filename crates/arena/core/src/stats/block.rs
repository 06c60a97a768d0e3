//! Base/current stat storage.

use super::kind::StatKind;

/// The six combat stats a champion carries besides HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatValues {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub evasion: i32,
    pub crit_chance: i32,
    pub life_steal: i32,
}

impl StatValues {
    pub fn get(&self, stat: StatKind) -> Option<i32> {
        match stat {
            StatKind::Hp => None,
            StatKind::Attack => Some(self.attack),
            StatKind::Defense => Some(self.defense),
            StatKind::Speed => Some(self.speed),
            StatKind::Evasion => Some(self.evasion),
            StatKind::CritChance => Some(self.crit_chance),
            StatKind::LifeSteal => Some(self.life_steal),
        }
    }

    fn set(&mut self, stat: StatKind, value: i32) {
        match stat {
            StatKind::Hp => {}
            StatKind::Attack => self.attack = value,
            StatKind::Defense => self.defense = value,
            StatKind::Speed => self.speed = value,
            StatKind::Evasion => self.evasion = value,
            StatKind::CritChance => self.crit_chance = value,
            StatKind::LifeSteal => self.life_steal = value,
        }
    }
}

/// Base and current values for the non-HP stats.
///
/// Base values are the reference point for percent-based modifiers and the
/// revert target for non-permanent changes. Current values are what the
/// pipeline reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub base: StatValues,
    pub current: StatValues,
}

impl StatBlock {
    /// Creates a block with current == base.
    pub fn new(base: StatValues) -> Self {
        Self {
            base,
            current: base,
        }
    }

    /// Current value of a stat. `None` for `Hp`, which lives on the champion.
    pub fn current(&self, stat: StatKind) -> Option<i32> {
        self.current.get(stat)
    }

    /// Base value of a stat. `None` for `Hp`.
    pub fn base(&self, stat: StatKind) -> Option<i32> {
        self.base.get(stat)
    }

    /// Shift the current value of a stat by `delta`, clamped to the stat's
    /// bounds. Returns the delta actually applied and whether the clamp bit.
    pub fn shift_current(&mut self, stat: StatKind, delta: i32) -> (i32, bool) {
        let Some(current) = self.current.get(stat) else {
            return (0, false);
        };
        let bounds = stat.bounds();
        let target = bounds.clamp(current + delta);
        let capped = target != current + delta;
        self.current.set(stat, target);
        (target - current, capped)
    }

    /// Permanently shift the base value as well as the current value.
    pub fn shift_base(&mut self, stat: StatKind, delta: i32) {
        if let Some(base) = self.base.get(stat) {
            self.base.set(stat, stat.bounds().clamp(base + delta));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> StatBlock {
        StatBlock::new(StatValues {
            attack: 100,
            defense: 35,
            speed: 50,
            evasion: 10,
            crit_chance: 20,
            life_steal: 0,
        })
    }

    #[test]
    fn shift_reports_applied_delta_and_cap() {
        let mut b = block();
        let (applied, capped) = b.shift_current(StatKind::CritChance, 100);
        assert_eq!(applied, 75); // 20 -> 95 cap
        assert!(capped);
        assert_eq!(b.current(StatKind::CritChance), Some(95));
    }

    #[test]
    fn shift_down_floors_at_bounds() {
        let mut b = block();
        let (applied, capped) = b.shift_current(StatKind::Defense, -100);
        assert_eq!(applied, -25); // 35 -> 10 floor
        assert!(capped);
    }

    #[test]
    fn base_untouched_by_current_shift() {
        let mut b = block();
        b.shift_current(StatKind::Attack, 50);
        assert_eq!(b.base(StatKind::Attack), Some(100));
        assert_eq!(b.current(StatKind::Attack), Some(150));
    }
}
