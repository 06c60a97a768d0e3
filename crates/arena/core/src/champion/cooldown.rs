//! Per-champion skill cooldown bookkeeping.

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::types::Turn;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct CooldownEntry {
    skill: String,
    available_at: Turn,
}

/// Skill key -> turn the skill becomes available again.
///
/// A skill with no entry is ready. Using a skill with `cooldown > 0`
/// schedules `available_at = current_turn + cooldown + 1`; the lifecycle
/// manager drops entries once their turn is reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownTable {
    entries: ArrayVec<CooldownEntry, { EngineConfig::MAX_SKILLS }>,
}

impl CooldownTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the skill can be used at `turn`.
    pub fn is_ready(&self, skill: &str, turn: Turn) -> bool {
        self.available_at(skill).is_none_or(|at| turn >= at)
    }

    /// Scheduled release turn, if the skill is cooling down.
    pub fn available_at(&self, skill: &str) -> Option<Turn> {
        self.entries
            .iter()
            .find(|e| e.skill == skill)
            .map(|e| e.available_at)
    }

    /// Record a use at `turn` with the given cooldown. Zero-cooldown skills
    /// are never recorded.
    pub fn record_use(&mut self, skill: &str, cooldown: u32, turn: Turn) {
        if cooldown == 0 {
            return;
        }
        let available_at = turn.plus(cooldown + 1);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.skill == skill) {
            entry.available_at = available_at;
            return;
        }
        if !self.entries.is_full() {
            self.entries.push(CooldownEntry {
                skill: skill.to_string(),
                available_at,
            });
        }
    }

    /// Active entries as `(skill key, release turn)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Turn)> {
        self.entries.iter().map(|e| (e.skill.as_str(), e.available_at))
    }

    /// Drop entries whose release turn has been reached. Returns the
    /// released skill keys for logging.
    pub fn release_ready(&mut self, turn: Turn) -> Vec<String> {
        let mut released = Vec::new();
        self.entries.retain(|e| {
            if turn >= e.available_at {
                released.push(e.skill.clone());
                false
            } else {
                true
            }
        });
        released
    }
}
