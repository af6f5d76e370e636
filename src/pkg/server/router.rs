use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any);

    Router::new()
        .route(
            "/api/jobs",
            get(handlers::jobs::list).post(handlers::jobs::create),
        )
        .route(
            "/api/jobs/{id}",
            get(handlers::jobs::retrieve)
                .put(handlers::jobs::update)
                .delete(handlers::jobs::delete),
        )
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .layer(cors)
        .with_state(state)
}
