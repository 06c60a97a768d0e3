//! The sample roster, one module per champion.

pub mod oracle;
pub mod vanguard;
pub mod warden;
