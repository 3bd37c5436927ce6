// handlers/mod.rs - Browser-facing endpoints
//
// ANY  /        → form::get      (schema fetch + render)
// POST /submit  → submit::post   (form parse + record forward)
// GET  /health  → health::get
pub mod form;
pub mod health;
pub mod submit;

use axum::{
    routing::{any, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(form::get))
        .route("/health", get(health::get))
        .route(
            "/submit",
            post(submit::post).fallback(submit::method_not_allowed),
        )
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
