//! Deterministic random number generation for combat rolls.
//!
//! Every roll in a match is derived from the match seed, the action nonce,
//! the rolling champion, and a roll context. Given the same seed and the
//! same action sequence, a match replays identically.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be stateless and deterministic: the same seed must
/// always produce the same value.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform percent roll in `[0, 100)`.
    ///
    /// Used for evasion and critical checks: the roll succeeds when it is
    /// strictly below the chance value, so chance 0 never succeeds and
    /// chance 100 always does.
    fn roll_percent(&self, seed: u64) -> i32 {
        (self.next_u32(seed) % 100) as i32
    }

    /// Generate a random value in range `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }
}

/// Which roll within a single resolution is being drawn.
///
/// Distinct contexts guarantee independent values when one resolution needs
/// several rolls from the same (seed, nonce, champion) triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollContext {
    Evasion,
    Critical,
    Skill(u32),
}

impl RollContext {
    fn as_u32(self) -> u32 {
        match self {
            RollContext::Evasion => 0,
            RollContext::Critical => 1,
            RollContext::Skill(n) => 16 + n,
        }
    }
}

/// PCG random number generator (PCG-XSH-RR variant).
///
/// Simple, fast, and statistically solid. 64-bit state, 32-bit output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one LCG step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then random rotate.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic roll seed from match state components.
///
/// # Arguments
///
/// * `match_seed` - Base seed fixed at match creation
/// * `nonce` - Action sequence number (increments each resolved action)
/// * `champion_id` - Champion the roll belongs to
/// * `context` - Which roll within the resolution is being drawn
pub fn compute_seed(match_seed: u64, nonce: u64, champion_id: u32, context: RollContext) -> u64 {
    // Mix all inputs using SplitMix64/FxHash-style combiners.
    let mut hash = match_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (champion_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context.as_u32() as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
