//! Entity and match snapshots for the sync layer.
//!
//! A data-shape contract only: the snapshot carries what a presentation or
//! state-sync consumer needs and nothing the engine mutates. With the
//! `serde` feature the match snapshot also hashes to a digest, so two
//! replicas can cheaply compare state.

use crate::champion::{Champion, Keyword, Shield};
use crate::state::MatchState;
use crate::stats::StatValues;
use crate::types::{ChampionId, TeamId, Turn};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownSnapshot {
    pub skill: String,
    pub available_at: Turn,
}

/// One champion's externally visible state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChampionSnapshot {
    pub id: ChampionId,
    pub name: String,
    pub team: TeamId,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    pub stats: StatValues,
    pub base_stats: StatValues,
    pub keywords: Vec<Keyword>,
    pub shields: Vec<Shield>,
    pub cooldowns: Vec<CooldownSnapshot>,
    pub meter: i32,
    pub meter_cap: i32,
}

impl ChampionSnapshot {
    pub fn of(champion: &Champion) -> Self {
        Self {
            id: champion.id,
            name: champion.name.clone(),
            team: champion.team,
            hp: champion.hp(),
            max_hp: champion.max_hp(),
            alive: champion.is_alive(),
            stats: champion.stats.current,
            base_stats: champion.stats.base,
            keywords: champion.keywords.iter().cloned().collect(),
            shields: champion.shields.iter().copied().collect(),
            cooldowns: champion
                .cooldowns
                .entries()
                .map(|(skill, available_at)| CooldownSnapshot {
                    skill: skill.to_string(),
                    available_at,
                })
                .collect(),
            meter: champion.meter.current(),
            meter_cap: champion.meter.cap(),
        }
    }
}

/// Full match state as seen by the sync layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSnapshot {
    pub turn: Turn,
    pub champions: Vec<ChampionSnapshot>,
}

impl MatchSnapshot {
    pub fn of(state: &MatchState) -> Self {
        Self {
            turn: state.turn,
            champions: state.champions().map(ChampionSnapshot::of).collect(),
        }
    }

    /// SHA-256 digest of the bincode encoding.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::champion::KeywordSpec;
    use crate::types::Elements;

    fn sample_state() -> MatchState {
        let mut state = MatchState::new(11);
        state.add_champion(Champion::new(
            ChampionId(1),
            "Snap",
            TeamId(0),
            Elements::LIGHT,
            500,
            StatValues {
                attack: 100,
                defense: 35,
                speed: 50,
                evasion: 5,
                crit_chance: 10,
                life_steal: 0,
            },
            100,
        ));
        state
    }

    #[test]
    fn snapshot_reflects_live_state() {
        let mut state = sample_state();
        let turn = state.turn;
        {
            let c = state.champion_mut(ChampionId(1)).unwrap();
            c.take_damage(100);
            c.apply_keyword(&KeywordSpec::new("burn", 2), turn, false);
            c.cooldowns.record_use("nova", 2, turn);
        }
        state.gain_meter(ChampionId(1), 30);

        let snapshot = MatchSnapshot::of(&state);
        let c = &snapshot.champions[0];
        assert_eq!(c.hp, 400);
        assert_eq!(c.max_hp, 500);
        assert_eq!(c.keywords.len(), 1);
        assert_eq!(c.cooldowns[0].skill, "nova");
        assert_eq!(c.meter, 30);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn equal_states_hash_equal() {
        let a = MatchSnapshot::of(&sample_state());
        let mut other = sample_state();
        other.champion_mut(ChampionId(1)).unwrap().take_damage(50);
        let b = MatchSnapshot::of(&other);

        let da = a.digest().unwrap();
        assert_eq!(da, MatchSnapshot::of(&sample_state()).digest().unwrap());
        assert_ne!(da, b.digest().unwrap());
        assert_eq!(hex::encode(da).len(), 64);
    }
}
