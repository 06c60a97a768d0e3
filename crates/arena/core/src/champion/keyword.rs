//! Keywords: named, timed status effects.
//!
//! Names are normalized to lowercase on application. Reapplying a
//! non-stackable keyword replaces the existing instance and resets its
//! duration; stackability is declared per application rather than inferred
//! from the name. The "absolute immunity" keyword blocks every other
//! application while active.

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::types::Turn;

/// Keyword name that blocks all other keyword applications while held.
pub const ABSOLUTE_IMMUNITY: &str = "absolute immunity";

/// A keyword application request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeywordSpec {
    pub name: String,
    /// Turns the keyword lasts. Ignored when `persistent`.
    pub duration: u32,
    /// Multiple instances coexist instead of replacing (poison-class).
    pub stackable: bool,
    /// Never purged by the lifecycle manager.
    pub persistent: bool,
    /// Content-defined payload (tick damage, source id, ...).
    pub metadata: Option<i32>,
}

impl KeywordSpec {
    pub fn new(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            duration,
            stackable: false,
            persistent: false,
            metadata: None,
        }
    }

    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    pub fn with_metadata(mut self, metadata: i32) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// An active keyword instance on a champion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyword {
    pub name: String,
    pub applied_at: Turn,
    pub duration: u32,
    pub expires_at: Turn,
    pub persistent: bool,
    pub stackable: bool,
    pub metadata: Option<i32>,
}

impl Keyword {
    /// Whether this keyword should be purged at `turn`.
    pub fn expired(&self, turn: Turn) -> bool {
        !self.persistent && turn >= self.expires_at
    }
}

/// The keyword table of one champion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeywordSet {
    keywords: ArrayVec<Keyword, { EngineConfig::MAX_KEYWORDS }>,
}

impl KeywordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a keyword with this name is held. Name is normalized.
    pub fn has(&self, name: &str) -> bool {
        let name = normalize(name);
        self.keywords.iter().any(|k| k.name == name)
    }

    /// First active instance with this name, if any.
    pub fn get(&self, name: &str) -> Option<&Keyword> {
        let name = normalize(name);
        self.keywords.iter().find(|k| k.name == name)
    }

    /// Number of stacked instances with this name.
    pub fn stacks(&self, name: &str) -> usize {
        let name = normalize(name);
        self.keywords.iter().filter(|k| k.name == name).count()
    }

    /// Whether the champion currently holds absolute immunity.
    pub fn immune(&self) -> bool {
        self.has(ABSOLUTE_IMMUNITY)
    }

    /// Apply a keyword at `turn`.
    ///
    /// Returns false without mutating when the holder has absolute immunity
    /// (unless the applied keyword IS immunity) or the table is full.
    /// Non-stackable keywords replace the existing instance, resetting its
    /// duration.
    pub fn apply(&mut self, spec: &KeywordSpec, turn: Turn) -> bool {
        let name = normalize(&spec.name);

        if self.immune() && name != ABSOLUTE_IMMUNITY {
            return false;
        }

        let keyword = Keyword {
            name: name.clone(),
            applied_at: turn,
            duration: spec.duration,
            expires_at: turn.plus(spec.duration),
            persistent: spec.persistent,
            stackable: spec.stackable,
            metadata: spec.metadata,
        };

        if !spec.stackable {
            if let Some(existing) = self.keywords.iter_mut().find(|k| k.name == name) {
                *existing = keyword;
                return true;
            }
        }

        if self.keywords.is_full() {
            return false;
        }
        self.keywords.push(keyword);
        true
    }

    /// Remove a keyword (all stacks) immediately. Returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let name = normalize(name);
        let before = self.keywords.len();
        self.keywords.retain(|k| k.name != name);
        before - self.keywords.len()
    }

    /// Purge everything expired at `turn`, returning the removed names for
    /// logging.
    pub fn purge_expired(&mut self, turn: Turn) -> Vec<String> {
        let mut removed = Vec::new();
        self.keywords.retain(|k| {
            if k.expired(turn) {
                removed.push(k.name.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_normalized() {
        let mut set = KeywordSet::empty();
        assert!(set.apply(&KeywordSpec::new("  Stun ", 2), Turn(1)));
        assert!(set.has("stun"));
        assert!(set.has("STUN"));
    }

    #[test]
    fn reapply_resets_duration() {
        let mut set = KeywordSet::empty();
        set.apply(&KeywordSpec::new("burn", 2), Turn(1));
        set.apply(&KeywordSpec::new("burn", 4), Turn(3));
        let kw = set.get("burn").unwrap();
        assert_eq!(kw.applied_at, Turn(3));
        assert_eq!(kw.expires_at, Turn(7));
        assert_eq!(set.stacks("burn"), 1);
    }

    #[test]
    fn stackable_keywords_accumulate() {
        let mut set = KeywordSet::empty();
        let poison = KeywordSpec::new("poison", 3).stackable().with_metadata(5);
        set.apply(&poison, Turn(1));
        set.apply(&poison, Turn(2));
        assert_eq!(set.stacks("poison"), 2);
    }

    #[test]
    fn immunity_blocks_other_keywords() {
        let mut set = KeywordSet::empty();
        set.apply(&KeywordSpec::new(ABSOLUTE_IMMUNITY, 1), Turn(1));
        assert!(!set.apply(&KeywordSpec::new("stun", 2), Turn(1)));
        assert!(!set.has("stun"));
        // Re-applying immunity itself is allowed.
        assert!(set.apply(&KeywordSpec::new(ABSOLUTE_IMMUNITY, 2), Turn(1)));
    }

    #[test]
    fn expiry_window_is_exact() {
        let mut set = KeywordSet::empty();
        set.apply(&KeywordSpec::new("stun", 2), Turn(3));
        // Present for turns 3..=4, purged once the counter reaches 5.
        assert!(set.purge_expired(Turn(4)).is_empty());
        assert!(set.has("stun"));
        let removed = set.purge_expired(Turn(5));
        assert_eq!(removed, vec!["stun".to_string()]);
        assert!(!set.has("stun"));
    }

    #[test]
    fn persistent_keywords_survive_purges() {
        let mut set = KeywordSet::empty();
        set.apply(&KeywordSpec::new("brand", 1).persistent(), Turn(1));
        assert!(set.purge_expired(Turn(100)).is_empty());
        assert!(set.has("brand"));
    }
}
