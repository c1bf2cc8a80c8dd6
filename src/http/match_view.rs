//! A participant's current (or last) match with its derived play state.

use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use sqlx::PgPool;

use crate::cache;
use crate::config;
use crate::db::move_repo;
use crate::game::clock::RoundClock;
use crate::game::lifecycle;
use crate::game::state::resolve_match_state;
use crate::http::error_response;

/// GET /api/match/{fid}
#[get("/match/{fid}")]
pub async fn view(path: web::Path<i64>, db: web::Data<PgPool>) -> impl Responder {
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

    let m = match lifecycle::last_match_for_user(&db, &t, round, fid, tiebreak, now).await {
        Ok(m) => m,
        Err(e) => return error_response(e),
    };
    let moves = match move_repo::for_match(&db, m.id).await {
        Ok(moves) => moves,
        Err(e) => return error_response(e),
    };
    let state = match resolve_match_state(&m, &moves) {
        Ok(s) => s,
        Err(e) => return error_response(e.into()),
    };

    HttpResponse::Ok().json(serde_json::json!({
        "round": round,
        "round_end": clock.round_end(t.start_at, round),
        "match": m,
        "state": state,
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(view);
}
