use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the three cyclic gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum Gesture {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Gesture {
    /// Classic dominance rule: rock beats scissors, scissors beats paper,
    /// paper beats rock.
    pub fn beats(self, other: Gesture) -> bool {
        (other as i16 + 1) % 3 == self as i16
    }
}

/// Persisted outcome category of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum ResultKind {
    /// Round still open, no settlement yet.
    Pending = 0,
    /// Decided by an in-game gesture outcome.
    Played = 1,
    /// Round elapsed while tied after at least one played turn.
    Draw = 2,
    /// Round elapsed with exactly one side having played the current turn.
    Forfeit = 3,
    /// Round elapsed with neither side having played any move.
    Pass = 4,
    /// No opponent was ever assigned.
    Bye = 5,
}

/// Live play status derived from the move log. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    New,
    User0Played,
    User1Played,
    Draw,
    Settled,
}

/// Derived view of a match's play state. Recomputed from the move log on
/// every read, never cached as source of truth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchState {
    pub match_id: Uuid,
    /// Current 0-based turn index.
    pub turn: i32,
    pub status: MatchStatus,
    pub winner: Option<i64>,
    pub loser: Option<i64>,
    /// Gesture histories, truncated to fully-paired turns.
    pub history0: Vec<Gesture>,
    pub history1: Vec<Gesture>,
}

/// Which participant an undecided tie falls to once the round elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tiebreak {
    /// Lower id wins (the longer-tenured account).
    LowestId,
    HighestId,
}

impl Tiebreak {
    /// Returns (winner, loser) for a pair of participants.
    pub fn pick(self, user0: i64, user1: i64) -> (i64, i64) {
        let (lo, hi) = if user0 <= user1 {
            (user0, user1)
        } else {
            (user1, user0)
        };
        match self {
            Tiebreak::LowestId => (lo, hi),
            Tiebreak::HighestId => (hi, lo),
        }
    }
}
