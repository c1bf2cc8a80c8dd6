//! Late-stage bracket view, assembled from already-materialized matches.

use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use sqlx::PgPool;

use crate::cache;
use crate::game::clock::RoundClock;
use crate::game::lifecycle;
use crate::http::error_response;

/// GET /api/bracket
#[get("/bracket")]
pub async fn bracket_view(db: web::Data<PgPool>) -> impl Responder {
    let now = Utc::now();
    let clock = RoundClock::from_settings();

    let t = match cache::current_tournament(&db).await {
        Ok(Some(t)) => t,
        Ok(None) => return HttpResponse::NotFound().body("no tournament configured"),
        Err(e) => return error_response(e),
    };
    let round = clock.current_round(t.start_at, now);
    if round < 0 {
        return HttpResponse::BadRequest().body("tournament has not started");
    }

    match lifecycle::final_bracket(&db, &t).await {
        Ok(matches) => HttpResponse::Ok().json(serde_json::json!({
            "round": round,
            "matches": matches,
        })),
        Err(e) => error_response(e),
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(bracket_view);
}
