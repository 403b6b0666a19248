//! Properties of the board encoding, outcome rules and opponent that hold
//! over the whole state space.

use std::collections::HashSet;

use noughts::tictactoe::{
    Board, CELLS, Mark, NUM_STATES, OpponentPolicy, Outcome, StateId, apply, classify, decode,
    encode,
};

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

fn all_boards() -> impl Iterator<Item = Board> {
    (0..NUM_STATES as u32).map(|value| decode(StateId::new(value).unwrap()))
}

#[test]
fn every_state_round_trips_through_its_digits() {
    for value in 0..NUM_STATES as u32 {
        let id = StateId::new(value).unwrap();
        let decoded = decode(id);
        assert_eq!(encode(&decoded), id);

        let digits = decoded.to_digits();
        assert_eq!(digits.len(), CELLS);
        assert_eq!(board(&digits), decoded);
    }
}

#[test]
fn encoding_is_injective_and_bounded() {
    let ids: HashSet<u32> = all_boards().map(|b| encode(&b).value()).collect();
    assert_eq!(ids.len(), NUM_STATES);
    assert!(ids.iter().all(|&id| (id as usize) < NUM_STATES));
    assert!(StateId::new(NUM_STATES as u32).is_err());
}

#[test]
fn digits_are_most_significant_first() {
    assert_eq!(encode(&board("000000000")).value(), 0);
    assert_eq!(encode(&board("000000001")).value(), 1);
    assert_eq!(encode(&board("100000000")).value(), 6_561);
    assert_eq!(encode(&board("222222222")).value(), 19_682);
}

#[test]
fn outcome_examples() {
    assert_eq!(classify(&board("111000000")), Outcome::FirstPlayerWin);
    assert_eq!(classify(&board("222000000")), Outcome::SecondPlayerWin);
    assert_eq!(classify(&board("121121212")), Outcome::Draw);
    assert_eq!(classify(&board("000000000")), Outcome::Active);
    // Every line already holds both marks, so no one can win.
    assert_eq!(classify(&board("112221120")), Outcome::Draw);
}

#[test]
fn rewards_follow_outcomes() {
    assert_eq!(Outcome::FirstPlayerWin.reward(), 1);
    assert_eq!(Outcome::SecondPlayerWin.reward(), -5);
    assert_eq!(Outcome::Draw.reward(), -1);
    assert_eq!(Outcome::Active.reward(), -1);
}

#[test]
fn full_boards_are_never_active() {
    for b in all_boards().filter(Board::is_full) {
        assert_ne!(classify(&b), Outcome::Active, "board {b}");
    }
}

#[test]
fn occupied_placement_leaves_state_unchanged() {
    let mut opponent = OpponentPolicy::with_seed(11);
    for b in all_boards().step_by(97) {
        let id = encode(&b);
        for pos in (0..CELLS).filter(|&p| !b.is_empty(p)) {
            assert_eq!(apply(id, pos, Some(&mut opponent), Mark::First).unwrap(), b);
            assert_eq!(apply(id, pos, None, Mark::Second).unwrap(), b);
        }
    }
}

#[test]
fn out_of_range_action_is_rejected() {
    assert!(apply(StateId::EMPTY, CELLS, None, Mark::First).is_err());
}

#[test]
fn opponent_only_picks_empty_cells() {
    let mut opponent = OpponentPolicy::with_seed(3);
    for b in all_boards() {
        match opponent.choose_move(&b) {
            Some(pos) => assert!(b.is_empty(pos), "board {b} picked {pos}"),
            None => assert!(b.is_full(), "board {b} has room"),
        }
    }
}

#[test]
fn opponent_reply_adds_exactly_one_mark() {
    let mut opponent = OpponentPolicy::with_seed(8);
    opponent.set_rng_seed(9);
    for b in all_boards().filter(|b| !b.is_full()).step_by(13) {
        let next = opponent.place(b);
        assert_eq!(next.count(Mark::Second), b.count(Mark::Second) + 1);
        assert_eq!(next.count(Mark::First), b.count(Mark::First));
    }
}
