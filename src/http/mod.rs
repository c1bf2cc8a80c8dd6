use actix_web::HttpResponse;

use crate::game::error::GameError;

pub mod bracket;
pub mod health;
pub mod match_view;
pub mod play;
pub mod routes;
pub mod tournament;

/// Map a failure bubbling out of the engine to an HTTP response: input
/// validation errors become rejected requests, invariant violations are
/// logged loudly and answered with a 500, anything else is a storage fault.
pub(crate) fn error_response(e: anyhow::Error) -> HttpResponse {
    match e.downcast_ref::<GameError>() {
        Some(g) if !g.is_corrupt() => HttpResponse::BadRequest().body(g.to_string()),
        Some(g) => {
            log::error!("invariant violation: {g}");
            HttpResponse::InternalServerError().body("corrupt state")
        }
        None => {
            log::error!("storage failure: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
