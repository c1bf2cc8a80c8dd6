//! Lazy materialization and backfill of bracket matches, plus the
//! tournament-level aggregate queries built on top of it.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::models::{Match, Tournament};
use crate::db::{match_repo, move_repo};
use crate::game::bracket;
use crate::game::error::GameError;
use crate::game::outcome::resolve_match;
use crate::game::state::resolve_match_state;
use crate::game::types::{ResultKind, Tiebreak};

/// Fetch or lazily construct the match at `(round, slot)`, backfilling any
/// unmaterialized feeder matches first.
///
/// The backfill is an explicit post-order walk over `(round, slot)` frames
/// rather than language-level recursion, so depth is bounded by the round
/// count and partial brackets can be resolved step by step. Newly created
/// matches are written through the idempotent upsert, so two requests racing
/// on the same slot converge on one row.
pub async fn match_at_slot(
    db: &PgPool,
    t: &Tournament,
    as_of_round: i32,
    round: i32,
    slot: i32,
    tiebreak: Tiebreak,
    now: DateTime<Utc>,
) -> Result<Match> {
    let mut done: HashMap<(i32, i32), Match> = HashMap::new();
    let mut stack: Vec<(i32, i32)> = vec![(round, slot)];

    while let Some(&(r, s)) = stack.last() {
        if done.contains_key(&(r, s)) {
            stack.pop();
            continue;
        }

        if let Some(existing) = match_repo::get(db, t.id, r, s).await? {
            let m = refresh(db, as_of_round, existing, tiebreak, now).await?;
            done.insert((r, s), m);
            stack.pop();
            continue;
        }

        let fresh = if r == 0 {
            seed_match(t, s, now)?
        } else {
            let (pa, pb) = bracket::parent_slots(t.size, r, s)?;
            let (parent_a, parent_b) = (done.get(&(r - 1, pa)), done.get(&(r - 1, pb)));
            let (Some(parent_a), Some(parent_b)) = (parent_a, parent_b) else {
                // Feeders not materialized yet; resolve them first.
                stack.push((r - 1, pa));
                stack.push((r - 1, pb));
                continue;
            };
            promote_match(t, r, s, parent_a, parent_b, now)?
        };

        match_repo::upsert(db, &fresh)
            .await
            .context("creating match")?;
        let m = refresh(db, as_of_round, fresh, tiebreak, now).await?;
        done.insert((r, s), m);
        stack.pop();
    }

    done.remove(&(round, slot))
        .ok_or_else(|| GameError::Corrupt(format!("backfill lost target ({round},{slot})")).into())
}

/// Round-0 match from the seeding fold; the phantom half of a padded
/// bracket becomes a bye.
fn seed_match(t: &Tournament, slot: i32, now: DateTime<Utc>) -> Result<Match, GameError> {
    let (user0, user1) = bracket::seed_users(t.size, slot)?;
    Ok(Match::new(t.id, 0, slot, user0, user1, now))
}

/// Later-round match fed by two settled parents. A parent without a winner
/// here is an invariant violation: a round must never be materialized
/// before its feeders settle.
fn promote_match(
    t: &Tournament,
    round: i32,
    slot: i32,
    parent_a: &Match,
    parent_b: &Match,
    now: DateTime<Utc>,
) -> Result<Match, GameError> {
    let (Some(user0), Some(user1)) = (parent_a.winner, parent_b.winner) else {
        return Err(GameError::Corrupt(format!(
            "parent of ({round},{slot}) in tournament {} is undecided",
            t.id
        )));
    };
    Ok(Match::new(t.id, round, slot, user0, user1, now))
}

/// Run a match through the state machine and resolver, persisting any
/// transition away from Pending. Terminal matches short-circuit.
async fn refresh(
    db: &PgPool,
    as_of_round: i32,
    m: Match,
    tiebreak: Tiebreak,
    now: DateTime<Utc>,
) -> Result<Match> {
    if m.winner.is_some() {
        return Ok(m);
    }
    let moves = move_repo::for_match(db, m.id).await?;
    let state = resolve_match_state(&m, &moves)?;
    let resolved = resolve_match(as_of_round, m, &state, tiebreak, now)?;
    if resolved.result != ResultKind::Pending {
        match_repo::upsert(db, &resolved)
            .await
            .context("persisting settled match")?;
    }
    Ok(resolved)
}

/// The match a participant occupies at a round, materializing it on demand.
///
/// Rounds past the final clamp to the final itself: the bracket has no
/// further matches, so the champion keeps resolving to their settled final.
pub async fn match_for_user(
    db: &PgPool,
    t: &Tournament,
    round: i32,
    fid: i64,
    tiebreak: Tiebreak,
    now: DateTime<Utc>,
) -> Result<Match> {
    let last = bracket::total_rounds(t.size)? as i32 - 1;
    let target = round.min(last);
    let slot = bracket::match_slot(t.size, target, fid)?;
    match_at_slot(db, t, round, target, slot, tiebreak, now).await
}

/// A participant's most recent match: the one they lost if they were
/// knocked out, else their live match at the current round.
pub async fn last_match_for_user(
    db: &PgPool,
    t: &Tournament,
    round: i32,
    fid: i64,
    tiebreak: Tiebreak,
    now: DateTime<Utc>,
) -> Result<Match> {
    if let Some(lost) = match_repo::by_loser(db, t.id, fid).await? {
        return Ok(lost);
    }
    match_for_user(db, t, round, fid, tiebreak, now).await
}

/// Matches at a round whose Result has moved past Pending.
pub async fn round_settled(db: &PgPool, tournament: i64, round: i32) -> Result<i64> {
    let all = match_repo::count(db, tournament, round, None).await?;
    let pending = match_repo::count(db, tournament, round, Some(ResultKind::Pending)).await?;
    Ok(all - pending)
}

/// Winner of the whole tournament, once the final has settled.
pub async fn champion(
    db: &PgPool,
    t: &Tournament,
    as_of_round: i32,
    tiebreak: Tiebreak,
    now: DateTime<Utc>,
) -> Result<Option<i64>> {
    let final_round = bracket::total_rounds(t.size)? as i32 - 1;
    if as_of_round < final_round {
        // The final's feeders have not all settled; don't materialize it.
        return Ok(None);
    }
    let m = match_at_slot(db, t, as_of_round, final_round, 0, tiebreak, now).await?;
    Ok(m.winner)
}

/// Aggregate status for the home view.
#[derive(Debug, Serialize)]
pub struct TournamentState {
    pub tournament: i64,
    /// -1 before the aligned start.
    pub round: i32,
    pub remaining: i64,
    pub champion: Option<i64>,
}

pub async fn tournament_state(
    db: &PgPool,
    t: &Tournament,
    round: i32,
    tiebreak: Tiebreak,
    now: DateTime<Utc>,
) -> Result<TournamentState> {
    if round < 0 {
        return Ok(TournamentState {
            tournament: t.id,
            round,
            remaining: t.size,
            champion: None,
        });
    }
    let settled = round_settled(db, t.id, round).await?;
    let remaining = bracket::remaining_users(t.size, round, settled)?;
    let champion = champion(db, t, round, tiebreak, now).await?;
    Ok(TournamentState {
        tournament: t.id,
        round,
        remaining,
        champion,
    })
}

/// Late-stage bracket view: every materialized match from the quarterfinals
/// onward.
pub async fn final_bracket(db: &PgPool, t: &Tournament) -> Result<Vec<Match>> {
    let rounds = bracket::total_rounds(t.size)? as i32;
    let from = (rounds - 3).max(0);
    match_repo::from_round(db, t.id, from).await
}
