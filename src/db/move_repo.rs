use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Move;

/// All moves of a match, unordered; the state machine sorts them.
pub async fn for_match(db: &PgPool, match_id: Uuid) -> Result<Vec<Move>> {
    sqlx::query_as::<_, Move>(
        "SELECT id, created_at, match_id, user_id, turn, gesture, signature
           FROM moves
          WHERE match_id = $1",
    )
    .bind(match_id)
    .fetch_all(db)
    .await
    .context("fetching moves")
}

/// Write-once insert. Returns false if a move with the same derived id
/// already exists (this player already acted this turn).
pub async fn insert(db: &PgPool, mv: &Move) -> Result<bool> {
    let res = sqlx::query(
        "INSERT INTO moves (id, created_at, match_id, user_id, turn, gesture, signature)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(mv.id)
    .bind(mv.created_at)
    .bind(mv.match_id)
    .bind(mv.user_id)
    .bind(mv.turn)
    .bind(mv.gesture)
    .bind(mv.signature.as_str())
    .execute(db)
    .await;

    match res {
        Ok(_) => Ok(true),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
        Err(e) => Err(e).context("inserting move"),
    }
}
