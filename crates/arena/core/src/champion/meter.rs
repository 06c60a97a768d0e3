//! Resource meter gating ultimate skills.

/// Bounded integer accumulator in `[0, cap]`.
///
/// Out-of-range writes clamp silently; the applied delta is returned so
/// callers can detect a capped or no-op change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: i32,
    cap: i32,
}

impl ResourceMeter {
    /// Creates an empty meter with the given cap. A non-positive cap yields
    /// a zero-capacity meter (for champions without an ultimate resource).
    pub fn new(cap: i32) -> Self {
        Self {
            current: 0,
            cap: cap.max(0),
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn cap(&self) -> i32 {
        self.cap
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.cap && self.cap > 0
    }

    /// Add `amount` (may be negative), clamped to `[0, cap]`.
    /// Returns the delta actually applied.
    pub fn gain(&mut self, amount: i32) -> i32 {
        let target = (self.current + amount).clamp(0, self.cap);
        let applied = target - self.current;
        self.current = target;
        applied
    }

    /// Spend `cost` from the meter. Returns false (no mutation) when the
    /// meter holds less than `cost`.
    pub fn spend(&mut self, cost: i32) -> bool {
        if cost < 0 || self.current < cost {
            return false;
        }
        self.current -= cost;
        true
    }
}
