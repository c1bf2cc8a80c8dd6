use crate::http;
use actix_web::web;

/// Mount every HTTP sub-module under `/api`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(http::tournament::init_routes)
            .configure(http::match_view::init_routes)
            .configure(http::play::init_routes)
            .configure(http::bracket::init_routes)
            .configure(http::health::init_routes),
    );
}
