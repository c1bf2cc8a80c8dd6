use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::game::types::{Gesture, ResultKind};

/// Namespace for deterministically derived row ids.
const ID_NAMESPACE: Uuid = Uuid::from_u128(0x6b1f_9c2e_5d48_4aa0_b37e_81c4_f5d2_0a96);

/// Derived match id: at most one row per bracket position.
pub fn match_id(tournament: i64, round: i32, slot: i32) -> Uuid {
    Uuid::new_v5(
        &ID_NAMESPACE,
        format!("match:{tournament}:{round}:{slot}").as_bytes(),
    )
}

/// Derived move id: at most one move per player per turn.
pub fn move_id(match_id: Uuid, user: i64, turn: i32) -> Uuid {
    Uuid::new_v5(
        &ID_NAMESPACE,
        format!("move:{match_id}:{user}:{turn}").as_bytes(),
    )
}

/// Immutable after creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tournament {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    /// Nominal start; the round clock aligns it to the daily cutover.
    pub start_at: DateTime<Utc>,
    /// Total entrant count, not necessarily a power of two.
    pub size: i64,
    /// Optional seeding parameter, stored for the bracket view.
    pub seed: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Match {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tournament_id: i64,
    pub round: i32,
    pub slot: i32,
    pub user0: i64,
    /// 0 means no opponent was assigned (bye).
    pub user1: i64,
    /// Terminal once set; never cleared or changed.
    pub winner: Option<i64>,
    pub loser: Option<i64>,
    pub result: ResultKind,
}

impl Match {
    /// Fresh pending match at a bracket position.
    pub fn new(
        tournament_id: i64,
        round: i32,
        slot: i32,
        user0: i64,
        user1: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Match {
            id: match_id(tournament_id, round, slot),
            created_at: now,
            updated_at: now,
            tournament_id,
            round,
            slot,
            user0,
            user1,
            winner: None,
            loser: None,
            result: ResultKind::Pending,
        }
    }
}

/// One player's single-turn action. Write-once; never updated or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Move {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub match_id: Uuid,
    pub user_id: i64,
    /// 0-based, strictly increasing per player, no gaps.
    pub turn: i32,
    pub gesture: Gesture,
    /// Externally signed action payload; stored opaquely, never validated here.
    pub signature: String,
}
