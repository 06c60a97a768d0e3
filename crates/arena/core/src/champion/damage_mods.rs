//! Incoming flat damage reductions and outgoing damage transforms.

use std::fmt;
use std::sync::Arc;

use crate::types::Turn;

/// Flat reduction subtracted from incoming raw/direct damage before defense
/// mitigation. Summed across all active entries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReduction {
    pub amount: i32,
    pub expires_at: Turn,
    pub source: String,
}

impl DamageReduction {
    pub fn new(amount: i32, expires_at: Turn, source: impl Into<String>) -> Self {
        Self {
            amount,
            expires_at,
            source: source.into(),
        }
    }

    pub fn expired(&self, turn: Turn) -> bool {
        turn >= self.expires_at
    }
}

/// Transform applied to an attacker's outgoing damage.
pub type DamageTransform = Arc<dyn Fn(i32) -> i32 + Send + Sync>;

/// An outgoing-damage modifier. Applied in insertion order during the
/// pipeline's modifier pass.
#[derive(Clone)]
pub struct DamageModifier {
    pub id: String,
    /// `None` marks a permanent modifier that the lifecycle never purges.
    pub expires_at: Option<Turn>,
    pub transform: DamageTransform,
}

impl DamageModifier {
    pub fn new(
        id: impl Into<String>,
        expires_at: Option<Turn>,
        transform: impl Fn(i32) -> i32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            expires_at,
            transform: Arc::new(transform),
        }
    }

    pub fn permanent(
        id: impl Into<String>,
        transform: impl Fn(i32) -> i32 + Send + Sync + 'static,
    ) -> Self {
        Self::new(id, None, transform)
    }

    pub fn expired(&self, turn: Turn) -> bool {
        self.expires_at.is_some_and(|at| turn >= at)
    }
}

impl fmt::Debug for DamageModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DamageModifier")
            .field("id", &self.id)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
