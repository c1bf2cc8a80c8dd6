//! Settles a match's terminal outcome from its live state and round context.

use chrono::{DateTime, Utc};

use crate::db::models::Match;
use crate::game::error::GameError;
use crate::game::types::{MatchState, MatchStatus, ResultKind, Tiebreak};

/// Resolves the final Result of a match, or leaves it pending.
///
/// Idempotent: a match whose winner is already set is terminal and returned
/// unchanged. A decisive gesture outcome settles immediately; every other
/// status waits until the round has fully elapsed (`as_of_round` past the
/// match's round) and then falls to forfeit, draw or pass rules.
pub fn resolve_match(
    as_of_round: i32,
    mut m: Match,
    state: &MatchState,
    tiebreak: Tiebreak,
    now: DateTime<Utc>,
) -> Result<Match, GameError> {
    if m.winner.is_some() {
        return Ok(m);
    }

    if m.user1 == 0 {
        // No opponent was ever assigned; advances regardless of round.
        m.winner = Some(m.user0);
        m.loser = Some(0);
        m.result = ResultKind::Bye;
        m.updated_at = now;
        return Ok(m);
    }

    match state.status {
        MatchStatus::Settled => {
            let winner = state
                .winner
                .ok_or_else(|| GameError::Corrupt(format!("settled state of match {} has no winner", m.id)))?;
            let loser = state
                .loser
                .ok_or_else(|| GameError::Corrupt(format!("settled state of match {} has no loser", m.id)))?;
            let pair = [m.user0, m.user1];
            if !pair.contains(&winner) || !pair.contains(&loser) || winner == loser {
                return Err(GameError::Corrupt(format!(
                    "settled winner {winner} / loser {loser} are not the participants of match {}",
                    m.id
                )));
            }
            m.winner = Some(winner);
            m.loser = Some(loser);
            m.result = ResultKind::Played;
        }
        // Round still open: no settlement until it elapses.
        _ if as_of_round <= m.round => return Ok(m),
        MatchStatus::New => {
            let (w, l) = tiebreak.pick(m.user0, m.user1);
            m.winner = Some(w);
            m.loser = Some(l);
            m.result = ResultKind::Pass;
        }
        MatchStatus::Draw => {
            let (w, l) = tiebreak.pick(m.user0, m.user1);
            m.winner = Some(w);
            m.loser = Some(l);
            m.result = ResultKind::Draw;
        }
        MatchStatus::User0Played => {
            m.winner = Some(m.user0);
            m.loser = Some(m.user1);
            m.result = ResultKind::Forfeit;
        }
        MatchStatus::User1Played => {
            m.winner = Some(m.user1);
            m.loser = Some(m.user0);
            m.result = ResultKind::Forfeit;
        }
    }
    m.updated_at = now;
    Ok(m)
}
