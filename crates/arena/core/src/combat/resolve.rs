//! The damage resolution pipeline.
//!
//! One call resolves one action against one target, terminal at the first
//! short-circuit. Step order per resolution:
//!
//! 1. absolute-immunity check (short-circuit, no hooks)
//! 2. negation ward check: supreme blocks anything, spell blocks
//!    no-contact actions; the ward is consumed and the target marked
//!    action-blocked (short-circuit, no hooks)
//! 3. evasion roll (short-circuit, no hooks)
//! 4. critical roll, firing `OnCriticalHit` on success
//! 5. attacker's outgoing damage transforms, in insertion order
//! 6. fixed-damage override from the simulation config, if set
//! 7. `BeforeDamageDealt` then `BeforeDamageTaken`; either may override
//!    damage and crit
//! 8. composition: crit bonus, defense mitigation, flat reduction,
//!    minimum floor, round to multiple of 5
//! 9. `take_damage` (regular shields absorb here)
//! 10. `AfterDamageTaken` then `AfterDamageDealt`
//! 11. life-steal with a suppressed heal event, then `OnLifeSteal`
//! 12. log assembly in the order the steps ran
//!
//! Hooks never re-enter this pipeline; secondary damage they request goes
//! on the extra-damage queue.

use tracing::debug;

use crate::champion::ABSOLUTE_IMMUNITY;
use crate::events::{self, EventPayload, GameEvent};
use crate::rng::{RollContext, compute_seed};
use crate::state::MatchState;
use crate::stats::{StatKind, round5};
use crate::types::ChampionId;

use super::damage::{DamageMode, mitigate};
use super::result::DamageOutcome;

/// One action to resolve.
#[derive(Clone, Debug)]
pub struct DamageRequest {
    pub attacker: ChampionId,
    pub target: ChampionId,
    /// Damage the skill declared (typically a base-factor percentage of
    /// Attack, computed by the content layer).
    pub base_damage: i32,
    pub mode: DamageMode,
    /// Whether the action makes physical contact. Spell wards only negate
    /// no-contact actions.
    pub contact: bool,
    /// Guarantee a critical hit, bypassing the roll.
    pub force_crit: bool,
    /// Forbid a critical hit, bypassing the roll.
    pub disable_crit: bool,
}

impl DamageRequest {
    pub fn new(attacker: ChampionId, target: ChampionId, base_damage: i32) -> Self {
        Self {
            attacker,
            target,
            base_damage,
            mode: DamageMode::Raw,
            contact: true,
            force_crit: false,
            disable_crit: false,
        }
    }

    pub fn mode(mut self, mode: DamageMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn no_contact(mut self) -> Self {
        self.contact = false;
        self
    }

    pub fn force_crit(mut self) -> Self {
        self.force_crit = true;
        self
    }

    pub fn disable_crit(mut self) -> Self {
        self.disable_crit = true;
        self
    }
}

/// Resolve one action. See the module docs for the step order.
pub fn resolve_damage(state: &mut MatchState, request: DamageRequest) -> DamageOutcome {
    let nonce = state.next_nonce();
    let turn = state.turn;

    let Some(target) = state.champion(request.target) else {
        return DamageOutcome::blocked(
            request.attacker,
            request.target,
            0,
            "target not in match".to_string(),
        );
    };
    if !target.is_alive() {
        let hp = target.hp();
        return DamageOutcome::blocked(
            request.attacker,
            request.target,
            hp,
            format!("{} is already down", target.name),
        );
    }

    // 1. Absolute immunity.
    if target.keywords.has(ABSOLUTE_IMMUNITY) {
        debug!(target = %request.target, "resolution short-circuits on absolute immunity");
        let log = format!("{} is absolutely immune: no damage", target.name);
        let hp = target.hp();
        return DamageOutcome::blocked(request.attacker, request.target, hp, log);
    }

    let target_name = target.name.clone();
    let target_evasion = target.stats.current(StatKind::Evasion).unwrap_or(0);

    // 2. Negation wards.
    if let Some(champion) = state.champion_mut(request.target)
        && let Some(kind) = champion.shields.consume_negation(request.contact)
    {
        let hp = champion.hp();
        state.block_action(request.target);
        debug!(target = %request.target, %kind, "resolution negated by ward");
        let log = format!("{target_name}'s {kind} shield negates the attack");
        return DamageOutcome::blocked(request.attacker, request.target, hp, log);
    }

    // 3. Evasion.
    if target_evasion > 0 {
        let seed = compute_seed(state.seed(), nonce, request.target.0, RollContext::Evasion);
        if state.rng().roll_percent(seed) < target_evasion {
            debug!(target = %request.target, "resolution short-circuits on evasion");
            let hp = state.champion(request.target).map_or(0, |c| c.hp());
            let mut outcome = DamageOutcome::blocked(
                request.attacker,
                request.target,
                hp,
                format!("{target_name} evades the attack"),
            );
            outcome.evaded = true;
            return outcome;
        }
    }

    // 4. Critical roll.
    let attacker_crit = state
        .champion(request.attacker)
        .and_then(|c| c.stats.current(StatKind::CritChance))
        .unwrap_or(0);
    let mut crit = if request.force_crit {
        true
    } else if request.disable_crit {
        false
    } else {
        let chance = attacker_crit.min(state.engine.crit_cap);
        let seed = compute_seed(state.seed(), nonce, request.attacker.0, RollContext::Critical);
        state.rng().roll_percent(seed) < chance
    };

    let mut damage = request.base_damage;
    let mut crit_logs = Vec::new();
    if crit {
        let payload = EventPayload {
            attacker: Some(request.attacker),
            target: Some(request.target),
            damage,
            crit: true,
            turn,
            ..Default::default()
        };
        let reaction = events::dispatch(state, GameEvent::OnCriticalHit, &payload);
        crit_logs = reaction.logs;
    }

    // 5. Outgoing damage transforms.
    if let Some(attacker) = state.champion(request.attacker) {
        damage = attacker.apply_outgoing_modifiers(damage, turn);
    }

    // 6. Fixed-damage override.
    if let Some(fixed) = state.sim.fixed_damage {
        damage = fixed;
    }

    // 7. Pre-damage hooks.
    let mut payload = EventPayload {
        attacker: Some(request.attacker),
        target: Some(request.target),
        damage,
        crit,
        turn,
        ..Default::default()
    };
    let before_deal = events::dispatch(state, GameEvent::BeforeDamageDealt, &payload);
    if let Some(override_damage) = before_deal.damage {
        damage = override_damage;
    }
    if let Some(override_crit) = before_deal.crit {
        crit = override_crit;
    }
    payload.damage = damage;
    payload.crit = crit;
    let before_take = events::dispatch(state, GameEvent::BeforeDamageTaken, &payload);
    if let Some(override_damage) = before_take.damage {
        damage = override_damage;
    }
    if let Some(override_crit) = before_take.crit {
        crit = override_crit;
    }

    // 8. Composition. Crit ignores positive defense buffs, not negative
    // ones, so it mitigates against the lower of base and current Defense.
    let (defense, flat_reduction) = match state.champion(request.target) {
        Some(t) => {
            let current = t.stats.current(StatKind::Defense).unwrap_or(0);
            let base = t.stats.base(StatKind::Defense).unwrap_or(0);
            let defense = if crit { base.min(current) } else { current };
            (defense, t.flat_reduction(turn))
        }
        None => (0, 0),
    };
    if crit {
        let bonus = state
            .champion(request.attacker)
            .map_or(state.engine.crit_bonus, |a| a.crit_bonus(state.engine.crit_bonus));
        damage += damage * bonus / 100;
    }
    let mitigated = mitigate(damage, request.mode, defense, flat_reduction);
    let total = round5(mitigated.max(state.engine.min_final_damage));

    // 9. Apply.
    let take = match state.champion_mut(request.target) {
        Some(t) => t.take_damage(total),
        None => Default::default(),
    };

    // 10. Post-damage hooks.
    payload.damage = total;
    payload.crit = crit;
    let after_take = events::dispatch(state, GameEvent::AfterDamageTaken, &payload);
    let after_deal = events::dispatch(state, GameEvent::AfterDamageDealt, &payload);

    // 11. Life-steal.
    let mut heal = 0;
    let mut steal_logs = Vec::new();
    let life_steal = state
        .champion(request.attacker)
        .filter(|a| a.is_alive())
        .and_then(|a| a.stats.current(StatKind::LifeSteal))
        .unwrap_or(0);
    if life_steal > 0 && total > 0 {
        let amount = round5(total * life_steal / 100).max(5);
        heal = state.heal(request.attacker, amount, true);
        if heal > 0 {
            let attacker_name = state
                .champion(request.attacker)
                .map_or_else(String::new, |a| a.name.clone());
            steal_logs.push(format!("{attacker_name} drains {heal} HP"));
            let steal_payload = EventPayload {
                attacker: Some(request.attacker),
                target: Some(request.target),
                damage: total,
                amount: heal,
                turn,
                ..Default::default()
            };
            let reaction = events::dispatch(state, GameEvent::OnLifeSteal, &steal_payload);
            steal_logs.extend(reaction.logs);
        }
    }

    // 12. Log assembly, in step order.
    let attacker_name = state
        .champion(request.attacker)
        .map_or_else(String::new, |a| a.name.clone());
    let mut log = Vec::new();
    log.push(if crit {
        format!("{attacker_name} critically hits {target_name} for {total} damage")
    } else {
        format!("{attacker_name} hits {target_name} for {total} damage")
    });
    log.extend(crit_logs);
    log.extend(before_deal.logs);
    log.extend(before_take.logs);
    log.extend(after_take.logs);
    log.extend(after_deal.logs);
    log.extend(steal_logs);
    log.append(&mut state.extra_log);

    DamageOutcome {
        user: request.attacker,
        target: request.target,
        base_damage: request.base_damage,
        total_damage: total,
        final_hp: take.hp_after,
        heal,
        crit,
        evaded: false,
        log,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::champion::{Champion, KeywordSpec, Shield};
    use crate::events::{EventHooks, HookCtx, HookReaction, HookResult, HookSource};
    use crate::rng::RngOracle;
    use crate::stats::{StatChange, StatValues};
    use crate::types::{Elements, TeamId, Turn};

    /// Oracle whose percent rolls always come up `value`.
    struct FixedRoll(u32);
    impl RngOracle for FixedRoll {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn duel(evasion: i32, crit_chance: i32, life_steal: i32) -> MatchState {
        let mut state = MatchState::with_rng(1, Box::new(FixedRoll(99)));
        state.add_champion(Champion::new(
            ChampionId(1),
            "Attacker",
            TeamId(0),
            Elements::FIRE,
            500,
            StatValues {
                attack: 100,
                defense: 35,
                speed: 50,
                evasion: 0,
                crit_chance,
                life_steal,
            },
            100,
        ));
        state.add_champion(Champion::new(
            ChampionId(2),
            "Target",
            TeamId(1),
            Elements::EARTH,
            500,
            StatValues {
                attack: 100,
                defense: 35,
                speed: 50,
                evasion,
                crit_chance: 0,
                life_steal: 0,
            },
            100,
        ));
        state
    }

    #[test]
    fn baseline_hit_matches_the_curve() {
        let mut state = duel(0, 0, 0);
        // base 60, defense 35 -> 25% reduction -> 45.
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        assert_eq!(outcome.total_damage, 45);
        assert_eq!(outcome.final_hp, 455);
        assert!(!outcome.crit);
        assert!(!outcome.evaded);
        assert_eq!(outcome.total_damage % 5, 0);
    }

    #[test]
    fn absolute_immunity_short_circuits() {
        let mut state = duel(0, 0, 0);
        let turn = state.turn;
        state
            .champion_mut(ChampionId(2))
            .unwrap()
            .apply_keyword(&KeywordSpec::new(crate::champion::ABSOLUTE_IMMUNITY, 2), turn, false);
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        assert_eq!(outcome.total_damage, 0);
        assert_eq!(outcome.final_hp, 500);
        assert!(outcome.log[0].contains("immune"));
    }

    #[test]
    fn evasion_short_circuits_without_hooks() {
        // FixedRoll(0): every roll is 0, any positive evasion evades.
        let mut state = MatchState::with_rng(1, Box::new(FixedRoll(0)));
        state.add_champion(Champion::new(
            ChampionId(1),
            "A",
            TeamId(0),
            Elements::FIRE,
            500,
            StatValues { attack: 100, defense: 35, speed: 50, evasion: 0, crit_chance: 0, life_steal: 0 },
            100,
        ));
        state.add_champion(Champion::new(
            ChampionId(2),
            "B",
            TeamId(1),
            Elements::WIND,
            500,
            StatValues { attack: 100, defense: 35, speed: 50, evasion: 10, crit_chance: 0, life_steal: 0 },
            100,
        ));
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        assert!(outcome.evaded);
        assert_eq!(outcome.total_damage, 0);
        assert_eq!(state.champion(ChampionId(2)).unwrap().hp(), 500);
    }

    #[test]
    fn forced_crit_adds_default_bonus() {
        let mut state = duel(0, 0, 0);
        // 60 * 1.55 = 93, defense 35 soaks 25% (23) -> 70.
        let outcome = resolve_damage(
            &mut state,
            DamageRequest::new(ChampionId(1), ChampionId(2), 60).force_crit(),
        );
        assert!(outcome.crit);
        assert_eq!(outcome.total_damage, 70);
    }

    #[test]
    fn crit_ignores_positive_defense_buffs() {
        let mut state = duel(0, 0, 0);
        let turn = state.turn;
        state
            .champion_mut(ChampionId(2))
            .unwrap()
            .modify_stat(StatChange::flat(StatKind::Defense, 100, 3), turn);
        // Current defense 135, base 35. A crit mitigates against 35.
        let outcome = resolve_damage(
            &mut state,
            DamageRequest::new(ChampionId(1), ChampionId(2), 60).force_crit(),
        );
        assert_eq!(outcome.total_damage, 70);
    }

    #[test]
    fn crit_respects_negative_defense_buffs() {
        let mut state = duel(0, 0, 0);
        let turn = state.turn;
        state
            .champion_mut(ChampionId(2))
            .unwrap()
            .modify_stat(StatChange::flat(StatKind::Defense, -25, 3), turn);
        // Current defense 10 (clamped floor), base 35: crit uses 10.
        let outcome = resolve_damage(
            &mut state,
            DamageRequest::new(ChampionId(1), ChampionId(2), 60).force_crit(),
        );
        // 93 damage, defense 10 -> 10/35 * 25% ≈ 7.14% -> soak round(6.64)=7 -> 86 -> 85.
        assert_eq!(outcome.total_damage, 85);
    }

    #[test]
    fn life_steal_heals_and_is_capped_by_missing_hp() {
        let mut state = duel(0, 0, 20);
        state.champion_mut(ChampionId(1)).unwrap().take_damage(50);
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        // damage 45, 20% -> 9 -> round5 = 10.
        assert_eq!(outcome.total_damage, 45);
        assert_eq!(outcome.heal, 10);
        assert_eq!(state.champion(ChampionId(1)).unwrap().hp(), 460);
    }

    #[test]
    fn life_steal_floor_is_five() {
        let mut state = duel(0, 0, 1);
        state.champion_mut(ChampionId(1)).unwrap().take_damage(50);
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        // 1% of 45 rounds to 0; the floor lifts it to 5.
        assert_eq!(outcome.heal, 5);
    }

    #[test]
    fn supreme_shield_negates_and_blocks_keywords() {
        let mut state = duel(0, 0, 0);
        state
            .champion_mut(ChampionId(2))
            .unwrap()
            .shields
            .add(Shield::supreme());
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        assert_eq!(outcome.total_damage, 0);
        assert!(outcome.log[0].contains("negates"));
        assert!(state.is_action_blocked(ChampionId(2)));
        // The ward is spent: a second hit lands.
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        assert_eq!(outcome.total_damage, 45);
    }

    #[test]
    fn spell_shield_only_stops_no_contact_actions() {
        let mut state = duel(0, 0, 0);
        state
            .champion_mut(ChampionId(2))
            .unwrap()
            .shields
            .add(Shield::spell());
        // Contact attack passes straight through the ward.
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        assert_eq!(outcome.total_damage, 45);
        let outcome = resolve_damage(
            &mut state,
            DamageRequest::new(ChampionId(1), ChampionId(2), 60).no_contact(),
        );
        assert_eq!(outcome.total_damage, 0);
    }

    #[test]
    fn minimum_damage_floor_applies() {
        let mut state = duel(0, 0, 0);
        state
            .champion_mut(ChampionId(2))
            .unwrap()
            .damage_reductions
            .push(crate::champion::DamageReduction::new(500, Turn(99), "wall"));
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        assert_eq!(outcome.total_damage, 10);
    }

    #[test]
    fn fixed_damage_override_replaces_post_modifier_damage() {
        let mut state = duel(0, 0, 0);
        state.sim.fixed_damage = Some(200);
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        // 200, defense 35 -> 150.
        assert_eq!(outcome.total_damage, 150);
    }

    struct Softener;
    impl EventHooks for Softener {
        fn before_damage_taken(&self, ctx: &HookCtx<'_>) -> HookResult {
            if ctx.owner_is_target() {
                Ok(Some(
                    HookReaction::new()
                        .with_damage(ctx.payload.damage / 2)
                        .with_crit(false)
                        .with_log("the blow is softened"),
                ))
            } else {
                Ok(None)
            }
        }
    }

    #[test]
    fn before_take_hook_overrides_damage_and_cancels_crit() {
        let mut state = duel(0, 0, 0);
        state
            .champion_mut(ChampionId(2))
            .unwrap()
            .attach_hook_source(HookSource::passive("soften", Arc::new(Softener)));
        let outcome = resolve_damage(
            &mut state,
            DamageRequest::new(ChampionId(1), ChampionId(2), 60).force_crit(),
        );
        // Crit cancelled before composition: 30 raw, defense 35 -> 22.5 -> 23 soak?
        // 30 - round(30*0.25) = 30 - 8 = 22 -> floor 10 not binding -> round5 = 20.
        assert!(!outcome.crit);
        assert_eq!(outcome.total_damage, 20);
        assert!(outcome.log.iter().any(|l| l == "the blow is softened"));
    }

    #[test]
    fn hit_on_dead_target_is_a_noop() {
        let mut state = duel(0, 0, 0);
        state.champion_mut(ChampionId(2)).unwrap().take_damage(10_000);
        let outcome = resolve_damage(&mut state, DamageRequest::new(ChampionId(1), ChampionId(2), 60));
        assert_eq!(outcome.total_damage, 0);
        assert!(outcome.log[0].contains("already down"));
    }
}
