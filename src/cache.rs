//! In-memory warm cache for tournament rows.
//!
//! Tournament rows are immutable after creation, so they are safe to cache
//! for a process lifetime. Only the "which id is current" question goes back
//! to Postgres; the row itself is served from memory once seen.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use sqlx::PgPool;

use crate::db::models::Tournament;
use crate::db::tournament_repo;

/// Global map id → Tournament (immutable rows).
pub static TOURNAMENTS: Lazy<DashMap<i64, Tournament>> = Lazy::new(DashMap::new);

/// Fetch every tournament row and populate [`TOURNAMENTS`]. Idempotent.
pub async fn warm_tournaments(db: &PgPool) -> anyhow::Result<()> {
    for t in tournament_repo::all(db).await? {
        TOURNAMENTS.insert(t.id, t);
    }
    Ok(())
}

/// Retrieve a cached tournament row by id.
pub fn get_tournament(id: i64) -> Option<Tournament> {
    TOURNAMENTS.get(&id).map(|e| e.value().clone())
}

/// Newest tournament: id from the store, row read through the cache.
pub async fn current_tournament(db: &PgPool) -> anyhow::Result<Option<Tournament>> {
    let Some(id) = tournament_repo::current_id(db).await? else {
        return Ok(None);
    };
    if let Some(t) = get_tournament(id) {
        return Ok(Some(t));
    }
    let t = tournament_repo::get(db, id).await?;
    if let Some(ref t) = t {
        TOURNAMENTS.insert(t.id, t.clone());
    }
    Ok(t)
}

/// Warm every in-memory cache we have (called once at startup).
pub async fn warm_all(db: &PgPool) {
    if let Err(e) = warm_tournaments(db).await {
        log::warn!("cache warm-up failed: {e:?}");
    }
}
