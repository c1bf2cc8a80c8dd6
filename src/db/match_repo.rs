use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{match_id, Match};
use crate::game::types::ResultKind;

/// Fetch a match by its bracket position (via the derived id).
pub async fn get(db: &PgPool, tournament: i64, round: i32, slot: i32) -> Result<Option<Match>> {
    by_id(db, match_id(tournament, round, slot)).await
}

pub async fn by_id(db: &PgPool, id: Uuid) -> Result<Option<Match>> {
    sqlx::query_as::<_, Match>(
        "SELECT id, created_at, updated_at, tournament_id, round, slot,
                user0, user1, winner, loser, result
           FROM matches
          WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching match")
}

/// Idempotent write keyed by the derived id: concurrent lazy creators of the
/// same slot converge on one row. The update arm refuses to touch a row
/// whose winner is already set, so a settled match stays terminal even if a
/// stale writer races the settlement.
pub async fn upsert(db: &PgPool, m: &Match) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO matches (id, created_at, updated_at, tournament_id, round, slot,
                             user0, user1, winner, loser, result)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (id) DO UPDATE
           SET winner     = EXCLUDED.winner,
               loser      = EXCLUDED.loser,
               result     = EXCLUDED.result,
               updated_at = EXCLUDED.updated_at
         WHERE matches.winner IS NULL
        "#,
    )
    .bind(m.id)
    .bind(m.created_at)
    .bind(m.updated_at)
    .bind(m.tournament_id)
    .bind(m.round)
    .bind(m.slot)
    .bind(m.user0)
    .bind(m.user1)
    .bind(m.winner)
    .bind(m.loser)
    .bind(m.result)
    .execute(db)
    .await
    .context("upserting match")?;
    Ok(())
}

/// Count a tournament round's matches, optionally filtered by Result.
pub async fn count(
    db: &PgPool,
    tournament: i64,
    round: i32,
    result: Option<ResultKind>,
) -> Result<i64> {
    let n = match result {
        Some(r) => {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM matches
                  WHERE tournament_id = $1 AND round = $2 AND result = $3",
            )
            .bind(tournament)
            .bind(round)
            .bind(r)
            .fetch_one(db)
            .await
        }
        None => {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM matches
                  WHERE tournament_id = $1 AND round = $2",
            )
            .bind(tournament)
            .bind(round)
            .fetch_one(db)
            .await
        }
    }
    .context("counting matches")?;
    Ok(n)
}

/// The match a player was eliminated in, if any.
pub async fn by_loser(db: &PgPool, tournament: i64, loser: i64) -> Result<Option<Match>> {
    sqlx::query_as::<_, Match>(
        "SELECT id, created_at, updated_at, tournament_id, round, slot,
                user0, user1, winner, loser, result
           FROM matches
          WHERE tournament_id = $1 AND loser = $2
          ORDER BY round DESC
          LIMIT 1",
    )
    .bind(tournament)
    .bind(loser)
    .fetch_optional(db)
    .await
    .context("fetching match by loser")
}

/// Every materialized match from `round` onward, newest rounds first.
/// Feeds the late-stage bracket view.
pub async fn from_round(db: &PgPool, tournament: i64, round: i32) -> Result<Vec<Match>> {
    sqlx::query_as::<_, Match>(
        "SELECT id, created_at, updated_at, tournament_id, round, slot,
                user0, user1, winner, loser, result
           FROM matches
          WHERE tournament_id = $1 AND round >= $2
          ORDER BY round DESC, slot ASC",
    )
    .bind(tournament)
    .bind(round)
    .fetch_all(db)
    .await
    .context("fetching bracket matches")
}
