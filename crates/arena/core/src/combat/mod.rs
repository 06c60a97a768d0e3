//! Damage resolution: mitigation curve, damage modes, and the pipeline.

mod damage;
mod mitigation;
mod resolve;
mod result;

pub use damage::{DamageMode, mitigate};
pub use mitigation::{REDUCTION_CAP, defense_reduction};
pub use resolve::{DamageRequest, resolve_damage};
pub use result::DamageOutcome;
