//! Champion kits: a stat line plus its skill list, bundled for the match
//! setup layer.

use arena_core::{Champion, ChampionId, SkillSpec, TeamId};

use crate::champions::{oracle, vanguard, warden};

/// One champion and the skills it brings into a match.
#[derive(Debug)]
pub struct ChampionKit {
    pub champion: Champion,
    pub skills: Vec<SkillSpec>,
}

impl ChampionKit {
    pub fn skill(&self, key: &str) -> Option<&SkillSpec> {
        self.skills.iter().find(|s| s.key == key)
    }

    /// The kit's ultimate, by flag. Position in the list carries no
    /// meaning.
    pub fn ultimate(&self) -> Option<&SkillSpec> {
        self.skills.iter().find(|s| s.is_ultimate)
    }
}

/// Build the sample kit for a roster slot.
pub fn roster_kit(name: &str, id: ChampionId, team: TeamId) -> Option<ChampionKit> {
    match name {
        "vanguard" => Some(ChampionKit {
            champion: vanguard::champion(id, team),
            skills: vanguard::skills(),
        }),
        "warden" => Some(ChampionKit {
            champion: warden::champion(id, team),
            skills: warden::skills(),
        }),
        "oracle" => Some(ChampionKit {
            champion: oracle::champion(id, team),
            skills: oracle::skills(),
        }),
        _ => None,
    }
}
