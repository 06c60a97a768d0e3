//! Ember Vanguard: a life-stealing bruiser whose passive banks meter on
//! every hit it lands.

use std::sync::Arc;

use arena_core::{
    Champion, ChampionId, DamageMode, DamageRequest, Elements, EventHooks, HookCommand, HookCtx,
    HookReaction, HookResult, HookSource, KeywordSpec, PendingDamage, SkillError, SkillSpec,
    StatKind, StatValues, TargetRule, TeamId,
};

pub const KEY_STRIKE: &str = "cinder strike";
pub const KEY_LASH: &str = "flame lash";
pub const KEY_IMMOLATION: &str = "immolation";

/// Meter banked per landed hit.
const SMOLDER_METER: i32 = 15;
/// Burn tick, applied as pure damage on each turn start.
const BURN_TICK: i32 = 5;
const BURN_TURNS: u32 = 2;
/// Extra base-factor points immolation gains per hit landed this match.
const FURY_PER_HIT: i32 = 5;
const FURY_CAP: i32 = 50;

/// Runtime schema for the vanguard: hits landed, feeding immolation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FuryLedger {
    pub hits: u32,
}

pub fn champion(id: ChampionId, team: TeamId) -> Champion {
    let mut champion = Champion::new(
        id,
        "Ember Vanguard",
        team,
        Elements::FIRE,
        600,
        StatValues {
            attack: 120,
            defense: 35,
            speed: 60,
            evasion: 0,
            crit_chance: 20,
            life_steal: 20,
        },
        100,
    );
    champion.attach_hook_source(HookSource::passive("smolder", Arc::new(Smolder)));
    champion
}

/// Banks meter whenever the vanguard lands a hit.
struct Smolder;

impl EventHooks for Smolder {
    fn after_damage_dealt(&self, ctx: &HookCtx<'_>) -> HookResult {
        if !ctx.owner_is_attacker() || ctx.payload.damage <= 0 {
            return Ok(None);
        }
        Ok(Some(HookReaction::new().with_command(HookCommand::GainMeter {
            target: ctx.owner,
            amount: SMOLDER_METER,
        })))
    }
}

/// Queues a burn tick on its holder every turn while the burn keyword is
/// active. Attached to the victim by flame lash.
struct BurnTick;

impl EventHooks for BurnTick {
    fn on_turn_start(&self, ctx: &HookCtx<'_>) -> HookResult {
        let burning = ctx
            .state
            .champion(ctx.owner)
            .is_some_and(|c| c.keywords.has("burn"));
        if !burning {
            return Ok(None);
        }
        let tick = ctx
            .state
            .champion(ctx.owner)
            .and_then(|c| c.keywords.get("burn"))
            .and_then(|k| k.metadata)
            .unwrap_or(BURN_TICK);
        Ok(Some(HookReaction::new().with_command(HookCommand::QueueDamage(
            PendingDamage::new(None, ctx.owner, tick, DamageMode::Pure, "burn ticks"),
        ))))
    }
}

pub fn skills() -> Vec<SkillSpec> {
    vec![
        SkillSpec::new(KEY_STRIKE, "Cinder Strike", TargetRule::SingleEnemy, |ctx| {
            let base = scaled_attack(ctx, 60)?;
            let target = first_target(ctx)?;
            let outcome = ctx.resolve(DamageRequest::new(ctx.user, target, base));
            record_hit(ctx, &outcome);
            Ok(vec![outcome])
        })
        .describe("A contact blow for 60% Attack."),
        SkillSpec::new(KEY_LASH, "Flame Lash", TargetRule::SingleEnemy, |ctx| {
            let base = scaled_attack(ctx, 80)?;
            let target = first_target(ctx)?;
            let outcome = ctx.resolve(DamageRequest::new(ctx.user, target, base).no_contact());
            record_hit(ctx, &outcome);
            if outcome.total_damage > 0 {
                let turn = ctx.turn();
                let burn = KeywordSpec::new("burn", BURN_TURNS).with_metadata(BURN_TICK);
                let blocked = ctx.state.is_action_blocked(target);
                if let Some(victim) = ctx.state.champion_mut(target)
                    && victim.apply_keyword(&burn, turn, blocked)
                {
                    victim.attach_hook_source(HookSource::effect(
                        "burning",
                        turn.plus(BURN_TURNS),
                        Arc::new(BurnTick),
                    ));
                }
            }
            Ok(vec![outcome])
        })
        .describe("A ranged lash for 80% Attack that leaves the target burning.")
        .with_cooldown(2)
        .no_contact(),
        SkillSpec::new(KEY_IMMOLATION, "Immolation", TargetRule::SingleEnemy, |ctx| {
            // Fury grows with every hit landed this match.
            let fury = (ctx.state.extensions.entry::<FuryLedger>(ctx.user).hits as i32
                * FURY_PER_HIT)
                .min(FURY_CAP);
            let base = scaled_attack(ctx, 150 + fury)?;
            let target = first_target(ctx)?;
            let outcome =
                ctx.resolve(DamageRequest::new(ctx.user, target, base).force_crit());
            record_hit(ctx, &outcome);
            // The blaze lingers: every later crit hits harder.
            if let Some(user) = ctx.state.champion_mut(ctx.user) {
                user.crit_bonus_override = Some(85);
            }
            Ok(vec![outcome])
        })
        .describe("Guaranteed critical scaling with hits landed; crits hit harder afterwards.")
        .ultimate(100)
        .with_cooldown(3),
    ]
}

fn record_hit(ctx: &mut arena_core::SkillCtx<'_>, outcome: &arena_core::DamageOutcome) {
    if outcome.total_damage > 0 {
        ctx.state.extensions.entry::<FuryLedger>(ctx.user).hits += 1;
    }
}

fn scaled_attack(ctx: &arena_core::SkillCtx<'_>, base_factor: i32) -> Result<i32, SkillError> {
    let attack = ctx
        .state
        .champion(ctx.user)
        .ok_or(SkillError::UnknownChampion(ctx.user))?
        .stats
        .current(StatKind::Attack)
        .unwrap_or(0);
    Ok(attack * base_factor / 100)
}

fn first_target(ctx: &arena_core::SkillCtx<'_>) -> Result<ChampionId, SkillError> {
    ctx.targets
        .first()
        .copied()
        .ok_or_else(|| SkillError::MissingTarget(ctx.user.to_string()))
}
