//! Derives a match's live play state from its raw move log.

use crate::db::models::{Match, Move};
use crate::game::error::GameError;
use crate::game::types::{Gesture, MatchState, MatchStatus};

/// Pure function of the match row and whatever moves exist at read time.
///
/// Validates the log shape first: each player's turn indices must run
/// contiguously from 0, and the two counts may differ by at most one (one
/// side waiting on the other is the only legal asymmetry). Anything else
/// means the store was corrupted upstream and is fatal.
pub fn resolve_match_state(m: &Match, moves: &[Move]) -> Result<MatchState, GameError> {
    let mut moves0: Vec<&Move> = Vec::new();
    let mut moves1: Vec<&Move> = Vec::new();
    for mv in moves {
        if mv.user_id == m.user0 {
            moves0.push(mv);
        } else if mv.user_id == m.user1 {
            moves1.push(mv);
        } else {
            return Err(GameError::Corrupt(format!(
                "move {} in match {} from non-participant {}",
                mv.id, m.id, mv.user_id
            )));
        }
    }
    moves0.sort_by_key(|mv| mv.turn);
    moves1.sort_by_key(|mv| mv.turn);

    for list in [&moves0, &moves1] {
        for (i, mv) in list.iter().enumerate() {
            if mv.turn != i as i32 {
                return Err(GameError::Corrupt(format!(
                    "misaligned turn index {} (expected {}) for user {} in match {}",
                    mv.turn, i, mv.user_id, m.id
                )));
            }
        }
    }
    let (n0, n1) = (moves0.len(), moves1.len());
    if n0.abs_diff(n1) > 1 {
        return Err(GameError::Corrupt(format!(
            "move counts {n0}/{n1} differ by more than one in match {}",
            m.id
        )));
    }

    let paired = n0.min(n1);
    let history0: Vec<Gesture> = moves0[..paired].iter().map(|mv| mv.gesture).collect();
    let history1: Vec<Gesture> = moves1[..paired].iter().map(|mv| mv.gesture).collect();

    // Walk completed turns in lockstep; the first decisive turn ends the match.
    for turn in 0..paired {
        let (g0, g1) = (history0[turn], history1[turn]);
        if g0 == g1 {
            continue;
        }
        let (winner, loser) = if g0.beats(g1) {
            (m.user0, m.user1)
        } else {
            (m.user1, m.user0)
        };
        return Ok(MatchState {
            match_id: m.id,
            turn: turn as i32,
            status: MatchStatus::Settled,
            winner: Some(winner),
            loser: Some(loser),
            history0,
            history1,
        });
    }

    // All paired turns drawn: the next turn is owed, or one side is waiting.
    let (status, turn) = if n0 == n1 {
        if n0 == 0 {
            (MatchStatus::New, 0)
        } else {
            (MatchStatus::Draw, paired as i32)
        }
    } else if n0 > n1 {
        (MatchStatus::User0Played, n1 as i32)
    } else {
        (MatchStatus::User1Played, n0 as i32)
    };
    Ok(MatchState {
        match_id: m.id,
        turn,
        status,
        winner: None,
        loser: None,
        history0,
        history1,
    })
}
