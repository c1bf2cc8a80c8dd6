//! Unit tests for the move-log state machine.

use chrono::Utc;
use roshambo_server::db::models::{move_id, Match, Move};
use roshambo_server::game::state::resolve_match_state;
use roshambo_server::game::types::{Gesture, MatchStatus};

fn pairing(user0: i64, user1: i64) -> Match {
    Match::new(1, 2, 1, user0, user1, Utc::now())
}

fn mv(m: &Match, turn: i32, user: i64, gesture: Gesture) -> Move {
    Move {
        id: move_id(m.id, user, turn),
        created_at: Utc::now(),
        match_id: m.id,
        user_id: user,
        turn,
        gesture,
        signature: "0x".into(),
    }
}

#[test]
fn no_moves_is_new() {
    let m = pairing(7, 8);
    let s = resolve_match_state(&m, &[]).unwrap();

    assert_eq!(s.match_id, m.id);
    assert_eq!(s.turn, 0);
    assert_eq!(s.status, MatchStatus::New);
    assert_eq!(s.winner, None);
    assert_eq!(s.loser, None);
    assert!(s.history0.is_empty());
    assert!(s.history1.is_empty());
}

#[test]
fn matched_gestures_keep_drawing() {
    let m = pairing(7, 8);
    let moves = vec![
        mv(&m, 0, 7, Gesture::Rock),
        mv(&m, 0, 8, Gesture::Rock),
        mv(&m, 1, 8, Gesture::Paper),
        mv(&m, 1, 7, Gesture::Paper),
    ];
    let s = resolve_match_state(&m, &moves).unwrap();

    assert_eq!(s.turn, 2);
    assert_eq!(s.status, MatchStatus::Draw);
    assert_eq!(s.winner, None);
    assert_eq!(s.loser, None);
    assert_eq!(s.history0, vec![Gesture::Rock, Gesture::Paper]);
    assert_eq!(s.history1, vec![Gesture::Rock, Gesture::Paper]);
}

#[test]
fn waiting_on_user1() {
    let m = pairing(7, 8);
    let moves = vec![
        mv(&m, 0, 7, Gesture::Rock),
        mv(&m, 0, 8, Gesture::Rock),
        mv(&m, 1, 7, Gesture::Paper),
    ];
    let s = resolve_match_state(&m, &moves).unwrap();

    assert_eq!(s.turn, 1);
    assert_eq!(s.status, MatchStatus::User0Played);
    assert_eq!(s.winner, None);
    // histories stop at the last fully-paired turn
    assert_eq!(s.history0, vec![Gesture::Rock]);
    assert_eq!(s.history1, vec![Gesture::Rock]);
}

#[test]
fn waiting_on_user0() {
    let m = pairing(7, 8);
    let moves = vec![
        mv(&m, 0, 7, Gesture::Rock),
        mv(&m, 0, 8, Gesture::Rock),
        mv(&m, 1, 8, Gesture::Paper),
        mv(&m, 1, 7, Gesture::Paper),
        mv(&m, 2, 8, Gesture::Paper),
    ];
    let s = resolve_match_state(&m, &moves).unwrap();

    assert_eq!(s.turn, 2);
    assert_eq!(s.status, MatchStatus::User1Played);
    assert_eq!(s.winner, None);
    assert_eq!(s.history0.len(), 2);
    assert_eq!(s.history1.len(), 2);
}

#[test]
fn first_decisive_turn_settles() {
    let m = pairing(7, 8);
    let moves = vec![
        mv(&m, 0, 7, Gesture::Rock),
        mv(&m, 0, 8, Gesture::Rock),
        mv(&m, 1, 8, Gesture::Scissors),
        mv(&m, 1, 7, Gesture::Paper),
    ];
    let s = resolve_match_state(&m, &moves).unwrap();

    // scissors cuts paper
    assert_eq!(s.turn, 1);
    assert_eq!(s.status, MatchStatus::Settled);
    assert_eq!(s.winner, Some(8));
    assert_eq!(s.loser, Some(7));
    assert_eq!(s.history0, vec![Gesture::Rock, Gesture::Paper]);
    assert_eq!(s.history1, vec![Gesture::Rock, Gesture::Scissors]);
}

#[test]
fn dominance_is_cyclic() {
    assert!(Gesture::Rock.beats(Gesture::Scissors));
    assert!(Gesture::Scissors.beats(Gesture::Paper));
    assert!(Gesture::Paper.beats(Gesture::Rock));
    assert!(!Gesture::Rock.beats(Gesture::Paper));
    assert!(!Gesture::Rock.beats(Gesture::Rock));
}

#[test]
fn misaligned_turn_indices_are_fatal() {
    let m = pairing(7, 8);
    let moves = vec![
        mv(&m, 0, 7, Gesture::Rock),
        mv(&m, 1, 8, Gesture::Rock),
        mv(&m, 1, 8, Gesture::Scissors),
        mv(&m, 2, 7, Gesture::Paper),
    ];
    assert!(resolve_match_state(&m, &moves).is_err());
}

#[test]
fn lopsided_move_counts_are_fatal() {
    let m = pairing(7, 8);
    let moves = vec![
        mv(&m, 0, 7, Gesture::Rock),
        mv(&m, 0, 8, Gesture::Rock),
        mv(&m, 1, 7, Gesture::Scissors),
        mv(&m, 2, 7, Gesture::Paper),
    ];
    assert!(resolve_match_state(&m, &moves).is_err());
}

#[test]
fn move_from_stranger_is_fatal() {
    let m = pairing(7, 8);
    let moves = vec![mv(&m, 0, 99, Gesture::Rock)];
    assert!(resolve_match_state(&m, &moves).is_err());
}
