/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Percent bonus damage added by a critical hit when the champion
    /// carries no per-instance override.
    pub crit_bonus: i32,
    /// Upper clamp on critical-hit chance, regardless of cumulative buffs.
    pub crit_cap: i32,
    /// Minimum final damage of a resolved, non-evaded, non-immune hit.
    pub min_final_damage: i32,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum champions per match (two teams of up to six).
    pub const MAX_CHAMPIONS: usize = 12;
    pub const MAX_KEYWORDS: usize = 16;
    pub const MAX_SHIELDS: usize = 8;
    pub const MAX_SKILLS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRIT_BONUS: i32 = 55;
    pub const DEFAULT_CRIT_CAP: i32 = 95;
    pub const DEFAULT_MIN_FINAL_DAMAGE: i32 = 10;

    pub fn new() -> Self {
        Self {
            crit_bonus: Self::DEFAULT_CRIT_BONUS,
            crit_cap: Self::DEFAULT_CRIT_CAP,
            min_final_damage: Self::DEFAULT_MIN_FINAL_DAMAGE,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-match simulation switches.
///
/// Anything that used to be a process-wide debug toggle lives here instead,
/// threaded through the match so two concurrent matches never share flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// When set, every pipeline resolution uses this value as the
    /// post-modifier damage. Debug aid for content authors.
    pub fixed_damage: Option<i32>,
}
