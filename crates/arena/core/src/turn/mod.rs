//! Turn lifecycle: per-turn purges, turn-start hooks, cooldown release,
//! and draining of the deferred extra-damage queue.

mod queue;

pub use queue::PendingDamage;

use tracing::debug;

use crate::combat::mitigate;
use crate::events::{self, EventPayload, GameEvent};
use crate::state::MatchState;
use crate::stats::round5;
use crate::types::Turn;

/// What one turn advance changed, for logging.
#[derive(Clone, Debug, Default)]
pub struct TurnReport {
    pub turn: Turn,
    /// `"champion: detail"` lines in purge order.
    pub expired: Vec<String>,
    /// Log lines produced by draining the extra-damage queue.
    pub drained: Vec<String>,
}

/// Advance the match to the next turn.
///
/// Fixed order across every living champion:
/// (a) revert expired stat modifiers, (b) purge expired keywords,
/// (c) purge expired flat damage reductions, (d) purge expired outgoing
/// damage modifiers, (e) decay shields, (f) purge expired hook effects,
/// (g) broadcast `OnTurnStart`, (h) release elapsed cooldowns.
pub fn advance_turn(state: &mut MatchState) -> TurnReport {
    state.turn = state.turn.plus(1);
    let turn = state.turn;
    debug!(%turn, "advancing turn");

    let mut report = TurnReport {
        turn,
        ..Default::default()
    };

    for champion in state.champions_mut() {
        let name = champion.name.clone();
        for modifier in champion.purge_expired_stat_modifiers(turn) {
            report.expired.push(format!(
                "{name}: {} modifier ({:+}) wore off",
                modifier.stat, modifier.applied
            ));
        }
        for keyword in champion.purge_expired_keywords(turn) {
            report.expired.push(format!("{name}: {keyword} wore off"));
        }
        for source in champion.purge_expired_damage_reductions(turn) {
            report.expired.push(format!("{name}: {source} wore off"));
        }
        for id in champion.purge_expired_damage_modifiers(turn) {
            report.expired.push(format!("{name}: {id} wore off"));
        }
        champion.shields.decay();
        for source in champion.purge_expired_hook_effects(turn) {
            report.expired.push(format!("{name}: {source} wore off"));
        }
    }

    let payload = EventPayload {
        turn,
        ..Default::default()
    };
    let reaction = events::dispatch(state, GameEvent::OnTurnStart, &payload);
    report.expired.extend(reaction.logs);

    for champion in state.champions_mut() {
        let name = champion.name.clone();
        for skill in champion.cooldowns.release_ready(turn) {
            report.expired.push(format!("{name}: {skill} is ready"));
        }
    }

    report.drained = drain_extra_damage(state);
    report
}

/// Drain the extra-damage queue.
///
/// Queued hits are secondary effects (recoil, counters, status ticks):
/// they apply flat reduction and mode mitigation but fire no hooks, carry
/// no minimum-damage floor, and can never enqueue further work.
pub fn drain_extra_damage(state: &mut MatchState) -> Vec<String> {
    let turn = state.turn;
    let mut logs = Vec::new();
    let pending = std::mem::take(&mut state.extra_damage);
    for entry in pending {
        let Some(target) = state.champion_mut(entry.target) else {
            continue;
        };
        if !target.is_alive() {
            continue;
        }
        let defense = target.stats.current(crate::stats::StatKind::Defense).unwrap_or(0);
        let flat = target.flat_reduction(turn);
        let amount = round5(mitigate(entry.amount, entry.mode, defense, flat));
        let result = target.take_damage(amount);
        logs.push(format!(
            "{} ({} damage, HP {})",
            entry.log,
            result.absorbed + result.hp_loss,
            result.hp_after
        ));
    }
    logs
}
