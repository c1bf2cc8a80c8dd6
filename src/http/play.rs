//! Move submission. The signature on the payload is externally produced and
//! verified upstream; it is stored opaquely alongside the gesture.

use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;

use crate::cache;
use crate::config;
use crate::db::models::{move_id, Move};
use crate::db::move_repo;
use crate::game::clock::RoundClock;
use crate::game::lifecycle;
use crate::game::state::resolve_match_state;
use crate::game::types::{Gesture, MatchStatus};
use crate::http::error_response;

#[derive(Deserialize)]
pub struct MoveRequest {
    pub gesture: Gesture,
    pub signature: String,
}

/// POST /api/match/{fid}/move
#[post("/match/{fid}/move")]
pub async fn submit_move(
    path: web::Path<i64>,
    body: web::Json<MoveRequest>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let fid = path.into_inner();
    let now = Utc::now();
    let clock = RoundClock::from_settings();
    let tiebreak = config::settings().tiebreak;

    let t = match cache::current_tournament(&db).await {
        Ok(Some(t)) => t,
        Ok(None) => return HttpResponse::NotFound().body("no tournament configured"),
        Err(e) => return error_response(e),
    };
    let round = clock.current_round(t.start_at, now);
    if round < 0 {
        return HttpResponse::BadRequest().body("tournament has not started");
    }

    let m = match lifecycle::match_for_user(&db, &t, round, fid, tiebreak, now).await {
        Ok(m) => m,
        Err(e) => return error_response(e),
    };
    if m.user0 != fid && m.user1 != fid {
        return HttpResponse::BadRequest().body("not a participant in this round");
    }
    if m.winner.is_some() {
        return HttpResponse::BadRequest().body("match is already decided");
    }

    let moves = match move_repo::for_match(&db, m.id).await {
        Ok(moves) => moves,
        Err(e) => return error_response(e),
    };
    let state = match resolve_match_state(&m, &moves) {
        Ok(s) => s,
        Err(e) => return error_response(e.into()),
    };

    // A gesture in New/Draw state opens a fresh turn; refuse that inside the
    // buffer window, where the turn could never resolve before settlement.
    let opens_turn = matches!(state.status, MatchStatus::New | MatchStatus::Draw);
    if opens_turn && clock.in_buffer(t.start_at, round, now) {
        return HttpResponse::BadRequest().body("round is closing, no new turn may start");
    }

    let already_played = match state.status {
        MatchStatus::User0Played => fid == m.user0,
        MatchStatus::User1Played => fid == m.user1,
        _ => false,
    };
    if already_played {
        return HttpResponse::BadRequest().body("already played this turn");
    }

    let mv = Move {
        id: move_id(m.id, fid, state.turn),
        created_at: now,
        match_id: m.id,
        user_id: fid,
        turn: state.turn,
        gesture: body.gesture,
        signature: body.signature.clone(),
    };
    match move_repo::insert(&db, &mv).await {
        Ok(true) => {}
        Ok(false) => return HttpResponse::Conflict().body("move already recorded"),
        Err(e) => return error_response(e),
    }

    // Fresh view after the write; may settle the match on the spot.
    let m = match lifecycle::match_for_user(&db, &t, round, fid, tiebreak, now).await {
        Ok(m) => m,
        Err(e) => return error_response(e),
    };
    let moves = match move_repo::for_match(&db, m.id).await {
        Ok(moves) => moves,
        Err(e) => return error_response(e),
    };
    match resolve_match_state(&m, &moves) {
        Ok(state) => HttpResponse::Ok().json(serde_json::json!({
            "match": m,
            "state": state,
        })),
        Err(e) => error_response(e.into()),
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_move);
}
