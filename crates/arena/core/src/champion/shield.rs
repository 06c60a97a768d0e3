//! Shields: HP-absorbing buffers and action-negating wards.
//!
//! Regular shields absorb HP loss point for point and are consumed before
//! HP. Spell and Supreme shields never absorb: they negate one qualifying
//! incoming action outright and are consumed on use (Supreme blocks any
//! action, Spell only no-contact actions).

use arrayvec::ArrayVec;
use strum::Display;

use crate::config::EngineConfig;
use crate::stats::round5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShieldKind {
    Regular,
    Spell,
    Supreme,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shield {
    pub amount: i32,
    pub decay_per_turn: i32,
    pub kind: ShieldKind,
}

impl Shield {
    pub fn regular(amount: i32, decay_per_turn: i32) -> Self {
        Self {
            amount: round5(amount.max(0)),
            decay_per_turn,
            kind: ShieldKind::Regular,
        }
    }

    pub fn spell() -> Self {
        Self {
            amount: 0,
            decay_per_turn: 0,
            kind: ShieldKind::Spell,
        }
    }

    pub fn supreme() -> Self {
        Self {
            amount: 0,
            decay_per_turn: 0,
            kind: ShieldKind::Supreme,
        }
    }
}

/// Ordered shield list of one champion. Absorption walks front to back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldStack {
    shields: ArrayVec<Shield, { EngineConfig::MAX_SHIELDS }>,
}

impl ShieldStack {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Push a shield. Silently dropped when the stack is full.
    pub fn add(&mut self, shield: Shield) -> bool {
        if self.shields.is_full() {
            return false;
        }
        self.shields.push(shield);
        true
    }

    /// Absorb `amount` of incoming HP loss through regular shields, in
    /// order. Returns the amount left to take from HP. Depleted shields are
    /// removed.
    pub fn absorb(&mut self, amount: i32) -> i32 {
        let mut remaining = amount.max(0);
        for shield in &mut self.shields {
            if remaining == 0 {
                break;
            }
            if shield.kind != ShieldKind::Regular {
                continue;
            }
            let soaked = shield.amount.min(remaining);
            shield.amount -= soaked;
            remaining -= soaked;
        }
        self.shields
            .retain(|s| s.kind != ShieldKind::Regular || s.amount > 0);
        remaining
    }

    /// Consume a negation ward for an incoming action, if one qualifies.
    ///
    /// Supreme wards block any action; Spell wards only no-contact actions.
    /// The first qualifying ward (in order) is consumed and returned.
    pub fn consume_negation(&mut self, contact: bool) -> Option<ShieldKind> {
        let idx = self.shields.iter().position(|s| match s.kind {
            ShieldKind::Supreme => true,
            ShieldKind::Spell => !contact,
            ShieldKind::Regular => false,
        })?;
        let kind = self.shields[idx].kind;
        self.shields.remove(idx);
        Some(kind)
    }

    /// Apply per-turn decay; depleted regular shields are dropped.
    pub fn decay(&mut self) {
        for shield in &mut self.shields {
            if shield.decay_per_turn > 0 {
                shield.amount -= shield.decay_per_turn;
            }
        }
        self.shields
            .retain(|s| s.kind != ShieldKind::Regular || s.amount > 0);
    }

    /// Total absorbing capacity of the regular shields.
    pub fn total_regular(&self) -> i32 {
        self.shields
            .iter()
            .filter(|s| s.kind == ShieldKind::Regular)
            .map(|s| s.amount)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shield> {
        self.shields.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.shields.is_empty()
    }
}
