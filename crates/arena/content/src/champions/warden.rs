//! Stone Warden: a wall. Regenerates every turn, shrugs damage off, and
//! can adopt a stance that strikes back at attackers.

use std::sync::Arc;

use arena_core::{
    Champion, ChampionId, DamageMode, DamageOutcome, DamageReduction, DamageRequest, Elements,
    EventHooks, HookCommand, HookCtx, HookReaction, HookResult, HookSource, PendingDamage, Shield,
    SkillError, SkillSpec, StatKind, StatValues, TargetRule, TeamId,
};

pub const KEY_BASH: &str = "shield bash";
pub const KEY_GUARD: &str = "granite guard";
pub const KEY_STANCE: &str = "counter stance";
pub const KEY_UNBREAKABLE: &str = "unbreakable";

const REGEN_PER_TURN: i32 = 10;
const COUNTER_DAMAGE: i32 = 30;
const STANCE_TURNS: u32 = 2;
const GUARD_SHIELD: i32 = 120;
const GUARD_REDUCTION: i32 = 10;
const GUARD_TURNS: u32 = 2;

pub fn champion(id: ChampionId, team: TeamId) -> Champion {
    let mut champion = Champion::new(
        id,
        "Stone Warden",
        team,
        Elements::EARTH,
        800,
        StatValues {
            attack: 80,
            defense: 85,
            speed: 40,
            evasion: 0,
            crit_chance: 0,
            life_steal: 0,
        },
        100,
    );
    champion.attach_hook_source(HookSource::passive("bulwark", Arc::new(Bulwark)));
    champion
}

/// Flat per-turn regeneration.
struct Bulwark;

impl EventHooks for Bulwark {
    fn on_turn_start(&self, ctx: &HookCtx<'_>) -> HookResult {
        let hurt = ctx
            .state
            .champion(ctx.owner)
            .is_some_and(|c| c.is_alive() && c.missing_hp() > 0);
        if !hurt {
            return Ok(None);
        }
        Ok(Some(HookReaction::new().with_command(HookCommand::Heal {
            target: ctx.owner,
            amount: REGEN_PER_TURN,
        })))
    }
}

/// While the stance holds, every hit taken queues a counter strike
/// against the attacker.
struct CounterStance;

impl EventHooks for CounterStance {
    fn after_damage_taken(&self, ctx: &HookCtx<'_>) -> HookResult {
        if !ctx.owner_is_target() || ctx.payload.damage <= 0 {
            return Ok(None);
        }
        let Some(attacker) = ctx.payload.attacker else {
            return Ok(None);
        };
        Ok(Some(
            HookReaction::new()
                .with_log("the warden strikes back")
                .with_command(HookCommand::QueueDamage(PendingDamage::new(
                    Some(ctx.owner),
                    attacker,
                    COUNTER_DAMAGE,
                    DamageMode::Direct,
                    "counter strike",
                ))),
        ))
    }
}

pub fn skills() -> Vec<SkillSpec> {
    vec![
        SkillSpec::new(KEY_BASH, "Shield Bash", TargetRule::SingleEnemy, |ctx| {
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
            Ok(vec![ctx.resolve(DamageRequest::new(
                ctx.user,
                target,
                attack * 70 / 100,
            ))])
        })
        .describe("A contact blow for 70% Attack."),
        SkillSpec::new(KEY_GUARD, "Granite Guard", TargetRule::SelfOnly, |ctx| {
            let turn = ctx.turn();
            let user = ctx.user;
            if let Some(champion) = ctx.state.champion_mut(user) {
                champion.shields.add(Shield::regular(GUARD_SHIELD, 0));
                champion.damage_reductions.push(DamageReduction::new(
                    GUARD_REDUCTION,
                    turn.plus(GUARD_TURNS),
                    KEY_GUARD,
                ));
            }
            Ok(vec![status_outcome(user, "granite guard raised")])
        })
        .describe("Raises a regular shield and flat damage reduction.")
        .with_cooldown(3)
        .no_contact(),
        SkillSpec::new(KEY_STANCE, "Counter Stance", TargetRule::SelfOnly, |ctx| {
            let turn = ctx.turn();
            let user = ctx.user;
            if let Some(champion) = ctx.state.champion_mut(user) {
                champion.attach_hook_source(HookSource::effect(
                    KEY_STANCE,
                    turn.plus(STANCE_TURNS),
                    Arc::new(CounterStance),
                ));
            }
            Ok(vec![status_outcome(user, "counter stance assumed")])
        })
        .describe("For two turns, hits taken are answered with a counter strike.")
        .with_cooldown(4)
        .no_contact(),
        SkillSpec::new(KEY_UNBREAKABLE, "Unbreakable", TargetRule::SelfOnly, |ctx| {
            let user = ctx.user;
            if let Some(champion) = ctx.state.champion_mut(user) {
                champion.shields.add(Shield::supreme());
            }
            Ok(vec![status_outcome(user, "an unbreakable ward forms")])
        })
        .describe("Raises a supreme ward negating the next incoming action.")
        .ultimate(100)
        .no_contact(),
    ]
}

fn status_outcome(user: ChampionId, log: &str) -> DamageOutcome {
    DamageOutcome {
        user,
        target: user,
        log: vec![log.to_string()],
        ..DamageOutcome::default()
    }
}
