//! Skill records and the gate for using one.
//!
//! Skills are content: the engine consumes them as data plus an execute
//! callback and owns only the gating (cooldown, resource cost) and the
//! post-action bookkeeping (queue drain, action-block reset).

use std::fmt;
use std::sync::Arc;

use crate::combat::{DamageOutcome, DamageRequest, resolve_damage};
use crate::state::MatchState;
use crate::turn::drain_extra_damage;
use crate::types::{ChampionId, Turn};

/// Who a skill may be aimed at. Resolution of the concrete target list
/// happens upstream; the engine only carries the declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRule {
    SingleEnemy,
    AllEnemies,
    SingleAlly,
    AllAllies,
    SelfOnly,
}

/// Scratch space handed to a skill's execute callback.
pub struct SkillCtx<'a> {
    pub user: ChampionId,
    pub targets: &'a [ChampionId],
    pub state: &'a mut MatchState,
}

impl<'a> SkillCtx<'a> {
    pub fn turn(&self) -> Turn {
        self.state.turn
    }

    /// Run one hit through the damage pipeline.
    pub fn resolve(&mut self, request: DamageRequest) -> DamageOutcome {
        resolve_damage(self.state, request)
    }
}

pub type SkillExecute =
    Arc<dyn Fn(&mut SkillCtx<'_>) -> Result<Vec<DamageOutcome>, SkillError> + Send + Sync>;

/// One skill of one champion, as declared by the content layer.
#[derive(Clone)]
pub struct SkillSpec {
    pub key: String,
    pub name: String,
    pub description: String,
    pub cooldown: u32,
    /// Meter cost, consumed only by ultimates.
    pub resource_cost: i32,
    /// Ultimates gate on the resource meter. Declared explicitly; never
    /// inferred from catalog position.
    pub is_ultimate: bool,
    /// Action ordering weight for the turn engine.
    pub priority: i32,
    /// Whether the skill makes physical contact (spell wards only negate
    /// no-contact skills).
    pub contact: bool,
    pub targeting: TargetRule,
    pub execute: SkillExecute,
}

impl SkillSpec {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        targeting: TargetRule,
        execute: impl Fn(&mut SkillCtx<'_>) -> Result<Vec<DamageOutcome>, SkillError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: String::new(),
            cooldown: 0,
            resource_cost: 0,
            is_ultimate: false,
            priority: 0,
            contact: true,
            targeting,
            execute: Arc::new(execute),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn ultimate(mut self, resource_cost: i32) -> Self {
        self.is_ultimate = true;
        self.resource_cost = resource_cost;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn no_contact(mut self) -> Self {
        self.contact = false;
        self
    }
}

impl fmt::Debug for SkillSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillSpec")
            .field("key", &self.key)
            .field("cooldown", &self.cooldown)
            .field("is_ultimate", &self.is_ultimate)
            .field("targeting", &self.targeting)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("{skill} is on cooldown until turn {available_at}")]
    OnCooldown { skill: String, available_at: Turn },
    #[error("not enough resource: need {needed}, have {available}")]
    NotEnoughResource { needed: i32, available: i32 },
    #[error("{0} is down")]
    UserDown(ChampionId),
    #[error("{0} is not in the match")]
    UnknownChampion(ChampionId),
    #[error("no target resolved for {0}")]
    MissingTarget(String),
}

/// Use a skill: gate on cooldown and resource, run the execute callback,
/// then drain the extra-damage queue and clear per-resolution action
/// blocks. Drained-hit logs are appended to the last outcome.
pub fn use_skill(
    state: &mut MatchState,
    user: ChampionId,
    skill: &SkillSpec,
    targets: &[ChampionId],
) -> Result<Vec<DamageOutcome>, SkillError> {
    let turn = state.turn;
    {
        let champion = state
            .champion(user)
            .ok_or(SkillError::UnknownChampion(user))?;
        if !champion.is_alive() {
            return Err(SkillError::UserDown(user));
        }
        if let Some(available_at) = champion.cooldowns.available_at(&skill.key)
            && turn < available_at
        {
            return Err(SkillError::OnCooldown {
                skill: skill.key.clone(),
                available_at,
            });
        }
    }

    if skill.is_ultimate {
        let champion = state
            .champion_mut(user)
            .ok_or(SkillError::UnknownChampion(user))?;
        let available = champion.meter.current();
        if !champion.meter.spend(skill.resource_cost) {
            return Err(SkillError::NotEnoughResource {
                needed: skill.resource_cost,
                available,
            });
        }
    }

    if let Some(champion) = state.champion_mut(user) {
        champion.cooldowns.record_use(&skill.key, skill.cooldown, turn);
    }

    let mut ctx = SkillCtx {
        user,
        targets,
        state,
    };
    let execute = Arc::clone(&skill.execute);
    let result = execute(&mut ctx);

    let drained = drain_extra_damage(state);
    state.clear_action_blocks();

    let mut outcomes = result?;
    if let Some(last) = outcomes.last_mut() {
        last.log.extend(drained);
    }
    Ok(outcomes)
}
