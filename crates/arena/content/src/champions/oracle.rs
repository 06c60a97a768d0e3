//! Tide Oracle: a support that amplifies allied life-steal and shelters
//! teammates.

use std::sync::Arc;

use arena_core::{
    ABSOLUTE_IMMUNITY, Champion, ChampionId, DamageOutcome, DamageRequest, Elements, EventHooks,
    HookCommand, HookCtx, HookReaction, HookResult, HookSource, KeywordSpec, Shield, SkillError,
    SkillSpec, StatKind, StatValues, TargetRule, TeamId,
};

pub const KEY_SURGE: &str = "tide surge";
pub const KEY_MIST: &str = "renewing mist";
pub const KEY_SANCTUARY: &str = "sanctuary";

/// Extra healing granted when an ally life-steals.
const SPRING_TIDE_HEAL: i32 = 10;
const MIST_HEAL: i32 = 90;
const SANCTUARY_TURNS: u32 = 1;

pub fn champion(id: ChampionId, team: TeamId) -> Champion {
    let mut champion = Champion::new(
        id,
        "Tide Oracle",
        team,
        Elements::WATER,
        550,
        StatValues {
            attack: 70,
            defense: 60,
            speed: 70,
            evasion: 15,
            crit_chance: 10,
            life_steal: 0,
        },
        120,
    );
    champion.attach_hook_source(HookSource::passive("spring tide", Arc::new(SpringTide)));
    champion
}

/// When an ally life-steals, the tide tops the heal up.
struct SpringTide;

impl EventHooks for SpringTide {
    fn on_life_steal(&self, ctx: &HookCtx<'_>) -> HookResult {
        let Some(stealer) = ctx.payload.attacker else {
            return Ok(None);
        };
        if stealer == ctx.owner {
            return Ok(None);
        }
        let same_team = match (ctx.state.champion(ctx.owner), ctx.state.champion(stealer)) {
            (Some(owner), Some(other)) => owner.team == other.team,
            _ => false,
        };
        if !same_team {
            return Ok(None);
        }
        Ok(Some(
            HookReaction::new()
                .with_log("the tide rises with the stolen blood")
                .with_command(HookCommand::Heal {
                    target: stealer,
                    amount: SPRING_TIDE_HEAL,
                }),
        ))
    }
}

pub fn skills() -> Vec<SkillSpec> {
    vec![
        SkillSpec::new(KEY_SURGE, "Tide Surge", TargetRule::SingleEnemy, |ctx| {
            let attack = ctx
                .state
                .champion(ctx.user)
                .ok_or(SkillError::UnknownChampion(ctx.user))?
                .stats
                .current(StatKind::Attack)
                .unwrap_or(0);
            let target = ctx
                .targets
                .first()
                .copied()
                .ok_or_else(|| SkillError::MissingTarget(ctx.user.to_string()))?;
            Ok(vec![ctx.resolve(
                DamageRequest::new(ctx.user, target, attack * 60 / 100).no_contact(),
            )])
        })
        .describe("A ranged wave for 60% Attack.")
        .no_contact(),
        SkillSpec::new(KEY_MIST, "Renewing Mist", TargetRule::SingleAlly, |ctx| {
            let target = ctx
                .targets
                .first()
                .copied()
                .ok_or_else(|| SkillError::MissingTarget(ctx.user.to_string()))?;
            let healed = ctx.state.heal(target, MIST_HEAL, false);
            Ok(vec![DamageOutcome {
                user: ctx.user,
                target,
                heal: healed,
                final_hp: ctx.state.champion(target).map_or(0, |c| c.hp()),
                log: vec![format!("renewing mist restores {healed} HP")],
                ..DamageOutcome::default()
            }])
        })
        .describe("Restores 90 HP to an ally.")
        .with_cooldown(2)
        .no_contact(),
        SkillSpec::new(KEY_SANCTUARY, "Sanctuary", TargetRule::SingleAlly, |ctx| {
            let target = ctx
                .targets
                .first()
                .copied()
                .ok_or_else(|| SkillError::MissingTarget(ctx.user.to_string()))?;
            let turn = ctx.turn();
            let blocked = ctx.state.is_action_blocked(target);
            if let Some(ally) = ctx.state.champion_mut(target) {
                ally.apply_keyword(
                    &KeywordSpec::new(ABSOLUTE_IMMUNITY, SANCTUARY_TURNS),
                    turn,
                    blocked,
                );
                ally.shields.add(Shield::spell());
            }
            Ok(vec![DamageOutcome {
                user: ctx.user,
                target,
                log: vec!["sanctuary descends".to_string()],
                ..DamageOutcome::default()
            }])
        })
        .describe("Grants an ally absolute immunity for a turn and a spell ward.")
        .ultimate(120)
        .no_contact(),
    ]
}
