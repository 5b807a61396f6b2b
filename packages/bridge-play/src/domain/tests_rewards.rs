use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{EngineSettings, TurnMode};
use crate::domain::rewards::{
    compute_rewards, last_trick_lookahead, PlayCards, RewardContext, RewardMode, RewardPolicy,
    Rewards, WinTricks,
};
use crate::domain::test_state_helpers::{late_game_state, lowest_legal, scenario_config};
use crate::domain::{Card, Contract, GameState, PlayEngine, Proposal, Seat, Trump};

fn ctx(
    state: &GameState,
    actor: Seat,
    valid: [bool; 4],
    trick_winner: Option<Seat>,
) -> RewardContext<'_> {
    RewardContext {
        state,
        actor,
        valid,
        trick_winner,
    }
}

fn rewards_of(r: Rewards) -> [i32; 4] {
    r.as_array()
}

fn nt(value: u8) -> Contract {
    Contract::new(Trump::NoTrump, value).unwrap()
}

#[test]
fn play_cards_rewards_the_valid_actor_only() {
    let state = late_game_state(Seat::N, nt(1), ["2H", "AC", "3H", "KS"], 6, Seat::E);
    let policy = RewardMode::PlayCards.policy();

    let ok = compute_rewards(policy.as_ref(), &ctx(&state, Seat::E, [true; 4], None));
    assert_eq!(rewards_of(ok), [0, 1, 0, 0]);

    let bad = compute_rewards(
        policy.as_ref(),
        &ctx(&state, Seat::E, [true, false, true, true], None),
    );
    assert_eq!(rewards_of(bad), [0, -2, 0, 0]);
    assert_eq!(PlayCards.invalid_penalty(), -2);
}

#[test]
fn penalties_depend_on_mode() {
    let state = late_game_state(Seat::N, nt(1), ["2H", "AC", "3H", "KS"], 6, Seat::E);
    let invalid_e = [true, false, true, true];
    let expected = [
        (RewardMode::PlayCards, -2),
        (RewardMode::WinTricks, -2),
        (RewardMode::Win, -2),
        (RewardMode::WinPoints, -1000),
    ];
    for (mode, penalty) in expected {
        let policy = mode.policy();
        let r = compute_rewards(policy.as_ref(), &ctx(&state, Seat::E, invalid_e, None));
        assert_eq!(r[Seat::E], penalty, "mode {mode}");
        assert_eq!(policy.mode(), mode);
    }
}

#[test]
fn penalty_overrides_a_trick_reward() {
    let state = late_game_state(Seat::N, nt(1), ["TD", "AC", "3H", "KS"], 6, Seat::E);
    let policy = RewardMode::WinTricks.policy();
    let r = compute_rewards(
        policy.as_ref(),
        &ctx(&state, Seat::S, [true, true, false, true], Some(Seat::N)),
    );
    assert_eq!(r[Seat::N], 1);
    assert_eq!(r[Seat::S], -2);
}

#[test]
fn lookahead_uses_winner_card_id_as_suit_key() {
    // N's last card is 2H (id 2): hearts index is 2, so hearts get +100.
    let state = late_game_state(Seat::N, nt(1), ["2H", "AC", "3H", "KS"], 6, Seat::E);
    assert_eq!(last_trick_lookahead(&state, Seat::N), Some(Seat::S));
    // Taking the last cards for the comparison leaves the hands untouched.
    for seat in Seat::ALL {
        assert_eq!(state.hand(seat).len(), 1);
    }

    // TD has id 33, which matches no suit index: raw ids decide.
    let state = late_game_state(Seat::N, nt(1), ["TD", "AC", "3H", "KS"], 6, Seat::E);
    assert_eq!(last_trick_lookahead(&state, Seat::N), Some(Seat::E));

    // A trump beats everything.
    let hearts = Contract::new(Trump::Hearts, 1).unwrap();
    let state = late_game_state(Seat::N, hearts, ["TD", "AC", "3H", "KS"], 6, Seat::E);
    assert_eq!(last_trick_lookahead(&state, Seat::N), Some(Seat::S));
}

#[test]
fn win_tricks_adds_lookahead_bonus_after_twelfth_trick() {
    let state = late_game_state(Seat::N, nt(1), ["TD", "AC", "3H", "KS"], 6, Seat::E);
    let r = WinTricks.base_rewards(&ctx(&state, Seat::W, [true; 4], Some(Seat::S)));
    // S/N take the trick, E is predicted to take the last one.
    assert_eq!(rewards_of(r), [1, 1, 1, 1]);

    let r = WinTricks.base_rewards(&ctx(&state, Seat::W, [true; 4], None));
    assert_eq!(rewards_of(r), [0, 0, 0, 0]);
}

#[test]
fn win_contract_scores_only_after_thirteenth_trick() {
    let mut state = late_game_state(Seat::N, nt(3), ["TD", "AC", "3H", "KS"], 9, Seat::E);
    let policy = RewardMode::WinPoints.policy();
    let mid = compute_rewards(policy.as_ref(), &ctx(&state, Seat::W, [true; 4], Some(Seat::N)));
    assert_eq!(rewards_of(mid), [0, 0, 0, 0]);

    state.tricks_played = 13;
    let made = compute_rewards(policy.as_ref(), &ctx(&state, Seat::W, [true; 4], Some(Seat::E)));
    assert_eq!(rewards_of(made), [1, 0, 1, 0]);

    state.tricks_won = [8, 5, 8, 5];
    let defeated =
        compute_rewards(policy.as_ref(), &ctx(&state, Seat::W, [true; 4], Some(Seat::E)));
    assert_eq!(rewards_of(defeated), [0, 1, 0, 1]);
}

/// Plays the fixed scenario deal with every seat proposing its lowest legal
/// card and returns the rewards of each step.
fn play_scenario(mode: RewardMode, value: u8) -> (GameState, Vec<(u8, Rewards)>) {
    let settings = EngineSettings::new(mode, TurnMode::Sequential);
    let mut engine = PlayEngine::new(settings, ChaCha8Rng::seed_from_u64(7));
    let (mut state, _) = engine.reset(&scenario_config(value)).unwrap();
    let mut steps = Vec::new();
    while !state.is_done() {
        let seat = state.active_seat;
        let card: Card = lowest_legal(&state, seat);
        let out = engine.step(&mut state, seat, Proposal::Card(card)).unwrap();
        assert!(out.info.action_valid);
        steps.push((out.info.tricks_played, out.rewards));
    }
    (state, steps)
}

#[test]
fn win_points_contract_made_with_exactly_nine_tricks() {
    let (state, steps) = play_scenario(RewardMode::WinPoints, 3);
    assert_eq!(state.tricks_won[Seat::N.index()], 9);
    assert_eq!(state.tricks_won[Seat::E.index()], 4);
    assert_eq!(steps.len(), 52);

    let (_, last) = steps.last().copied().unwrap();
    assert_eq!(last[Seat::N], 1);
    assert_eq!(last[Seat::S], 1);
    assert_eq!(last[Seat::E], 0);
    assert_eq!(last[Seat::W], 0);

    // Nothing is paid out before the end.
    assert!(steps[..51].iter().all(|(_, r)| r.as_array() == [0; 4]));
}

#[test]
fn win_mode_defenders_score_when_contract_fails() {
    let (_, steps) = play_scenario(RewardMode::Win, 4);
    let (_, last) = steps.last().copied().unwrap();
    assert_eq!(rewards_of(last), [0, 1, 0, 1]);
}

#[test]
fn win_tricks_scenario_twelfth_trick_bonus() {
    let (_, steps) = play_scenario(RewardMode::WinTricks, 3);
    // 48th card closes the 12th trick: S wins it and is predicted for the 13th.
    let (tricks, twelfth) = steps[47];
    assert_eq!(tricks, 12);
    assert_eq!(rewards_of(twelfth), [2, 0, 2, 0]);
    // Last trick: S again, no bonus.
    let (_, last) = steps[51];
    assert_eq!(rewards_of(last), [1, 0, 1, 0]);
}
