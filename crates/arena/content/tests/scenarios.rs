//! Multi-turn match scenarios running the whole stack: kits, the damage
//! pipeline, hook dispatch, and the turn lifecycle together.

use arena_core::{
    ChampionId, MatchSnapshot, MatchState, TeamId, advance_turn, use_skill,
};
use arena_content::roster_kit;

fn setup(seed: u64) -> (MatchState, arena_content::ChampionKit, arena_content::ChampionKit) {
    let mut state = MatchState::new(seed);
    let vanguard = roster_kit("vanguard", ChampionId(1), TeamId(0)).unwrap();
    let warden = roster_kit("warden", ChampionId(2), TeamId(1)).unwrap();
    state.add_champion(vanguard.champion.clone());
    state.add_champion(warden.champion.clone());
    (state, vanguard, warden)
}

/// Play a fixed script of turns and return the end-state snapshot.
fn play_script(seed: u64) -> MatchSnapshot {
    let (mut state, vanguard, warden) = setup(seed);
    let strike = vanguard.skill("cinder strike").unwrap();
    let bash = warden.skill("shield bash").unwrap();
    let guard = warden.skill("granite guard").unwrap();

    use_skill(&mut state, ChampionId(1), strike, &[ChampionId(2)]).unwrap();
    use_skill(&mut state, ChampionId(2), guard, &[]).unwrap();
    advance_turn(&mut state);

    use_skill(&mut state, ChampionId(1), strike, &[ChampionId(2)]).unwrap();
    use_skill(&mut state, ChampionId(2), bash, &[ChampionId(1)]).unwrap();
    advance_turn(&mut state);

    use_skill(&mut state, ChampionId(1), strike, &[ChampionId(2)]).unwrap();
    advance_turn(&mut state);

    MatchSnapshot::of(&state)
}

#[test]
fn same_seed_replays_identically() {
    assert_eq!(play_script(1234), play_script(1234));
}

#[test]
fn state_invariants_hold_across_a_scripted_match() {
    let snapshot = play_script(777);
    for champion in &snapshot.champions {
        assert!(champion.hp >= 0 && champion.hp <= champion.max_hp, "{}", champion.name);
        assert_eq!(champion.hp % 5, 0, "{}", champion.name);
    }
}

#[test]
fn sustained_assault_wears_the_wall_down() {
    let (mut state, vanguard, _warden) = setup(42);
    let strike = vanguard.skill("cinder strike").unwrap();

    let mut last_hp = state.champion(ChampionId(2)).unwrap().hp();
    for _ in 0..10 {
        let outcomes = use_skill(&mut state, ChampionId(1), strike, &[ChampionId(2)]).unwrap();
        let hp = state.champion(ChampionId(2)).unwrap().hp();
        // Warden has no evasion or wards: every strike must land for at
        // least the minimum and the regen never outpaces it in one swing.
        assert!(outcomes[0].total_damage >= 10);
        assert!(hp < last_hp);
        last_hp = hp;
        advance_turn(&mut state);
        last_hp = state.champion(ChampionId(2)).unwrap().hp();
    }
    // Smolder banked meter for every landed hit.
    assert!(state.champion(ChampionId(1)).unwrap().meter.is_full());
}

#[test]
fn a_match_runs_to_a_knockout() {
    let (mut state, vanguard, _warden) = setup(9);
    state.sim.fixed_damage = Some(400);
    let strike = vanguard.skill("cinder strike").unwrap();

    let mut turns = 0;
    while state.team_alive(TeamId(1)) && turns < 20 {
        use_skill(&mut state, ChampionId(1), strike, &[ChampionId(2)]).unwrap();
        advance_turn(&mut state);
        turns += 1;
    }
    assert!(!state.team_alive(TeamId(1)));
    let warden = state.champion(ChampionId(2)).unwrap();
    assert_eq!(warden.hp(), 0);
    assert!(!warden.is_alive());
}
