//! Current-tournament status for the home view.

use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use sqlx::PgPool;

use crate::cache;
use crate::config;
use crate::game::clock::RoundClock;
use crate::game::lifecycle;
use crate::http::error_response;

/// GET /api/tournament
#[get("/tournament")]
pub async fn status(db: web::Data<PgPool>) -> impl Responder {
    let now = Utc::now();
    let clock = RoundClock::from_settings();
    let tiebreak = config::settings().tiebreak;

    let t = match cache::current_tournament(&db).await {
        Ok(Some(t)) => t,
        Ok(None) => return HttpResponse::NotFound().body("no tournament configured"),
        Err(e) => return error_response(e),
    };
    let round = clock.current_round(t.start_at, now);

    match lifecycle::tournament_state(&db, &t, round, tiebreak, now).await {
        Ok(state) => HttpResponse::Ok().json(serde_json::json!({
            "tournament": t,
            "start": clock.tournament_start(t.start_at),
            "round_end": clock.round_end(t.start_at, round),
            "state": state,
        })),
        Err(e) => error_response(e),
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(status);
}
