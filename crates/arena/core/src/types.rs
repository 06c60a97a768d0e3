//! Common identifier and turn-counter types shared across the engine.

use bitflags::bitflags;

/// Unique champion identifier within a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChampionId(pub u32);

impl core::fmt::Display for ChampionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "champion#{}", self.0)
    }
}

/// Team identifier. Matches are team-vs-team; targeting rules and ally
/// reactions compare this value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamId(pub u8);

/// Discrete turn counter. Starts at 1 on the first turn of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn(pub u32);

impl Turn {
    /// The turn `duration` turns after this one.
    pub fn plus(self, duration: u32) -> Turn {
        Turn(self.0 + duration)
    }
}

impl core::fmt::Display for Turn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    /// Elemental affinity set. Fixed at champion creation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Elements: u8 {
        const FIRE   = 1 << 0;
        const WATER  = 1 << 1;
        const EARTH  = 1 << 2;
        const WIND   = 1 << 3;
        const LIGHT  = 1 << 4;
        const SHADOW = 1 << 5;
    }
}
