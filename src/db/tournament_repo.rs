use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::db::models::Tournament;

/// Id of the newest configured tournament, if any.
pub async fn current_id(db: &PgPool) -> Result<Option<i64>> {
    sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(id) FROM tournaments")
        .fetch_one(db)
        .await
        .context("fetching current tournament id")
}

pub async fn get(db: &PgPool, id: i64) -> Result<Option<Tournament>> {
    sqlx::query_as::<_, Tournament>(
        "SELECT id, created_at, start_at, size, seed
           FROM tournaments
          WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("fetching tournament")
}

pub async fn all(db: &PgPool) -> Result<Vec<Tournament>> {
    sqlx::query_as::<_, Tournament>(
        "SELECT id, created_at, start_at, size, seed
           FROM tournaments
          ORDER BY id",
    )
    .fetch_all(db)
    .await
    .context("listing tournaments")
}
