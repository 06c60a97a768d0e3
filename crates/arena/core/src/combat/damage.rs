//! Damage modes and the mitigation arithmetic shared by the pipeline and
//! the extra-damage queue.

use super::mitigation::defense_reduction;

/// How defense mitigation shapes a hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageMode {
    /// Full defense mitigation plus flat reduction.
    #[default]
    Raw,
    /// Splits into a direct portion (flat reduction only, bounded by the
    /// declared amount) and a raw remainder (full mitigation).
    Hybrid { direct: i32 },
    /// Bypasses the defense fraction; flat reduction still applies.
    Direct,
    /// Guaranteed-effect hits and status ticks. Same mitigation shape as
    /// `Direct`, kept distinct so logs and content can tell them apart.
    Pure,
}

/// Apply defense mitigation and flat reduction to `damage`, per mode.
/// Floored at 0; the pipeline's minimum-damage floor is applied by the
/// caller, not here.
pub fn mitigate(damage: i32, mode: DamageMode, defense: i32, flat_reduction: i32) -> i32 {
    match mode {
        DamageMode::Raw => reduce_raw(damage, defense, flat_reduction),
        DamageMode::Hybrid { direct } => {
            let direct_portion = direct.clamp(0, damage);
            let raw_portion = damage - direct_portion;
            (direct_portion - flat_reduction).max(0) + reduce_raw(raw_portion, defense, flat_reduction)
        }
        DamageMode::Direct | DamageMode::Pure => (damage - flat_reduction).max(0),
    }
}

fn reduce_raw(damage: i32, defense: i32, flat_reduction: i32) -> i32 {
    if damage <= 0 {
        return 0;
    }
    let soaked = (f64::from(damage) * defense_reduction(defense)).round() as i32;
    (damage - soaked - flat_reduction).max(0)
}
