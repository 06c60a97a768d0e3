//! Champion stat system: stat kinds, base/current blocks, and timed
//! reversible modifiers.
//!
//! All combat numbers in the engine snap to multiples of 5 via [`round5`];
//! every stat has a fixed clamp range declared on [`StatKind`].

mod block;
mod kind;
mod modifier;

pub use block::{StatBlock, StatValues};
pub use kind::{StatBounds, StatKind};
pub use modifier::{StatChange, StatChangeResult, StatModifier};

/// Round to the nearest multiple of 5.
///
/// Remainders of 1-2 round down, 3-4 round up. Idempotent:
/// `round5(round5(x)) == round5(x)`.
pub fn round5(value: i32) -> i32 {
    let rem = value.rem_euclid(5);
    let base = value - rem;
    if rem >= 3 { base + 5 } else { base }
}
