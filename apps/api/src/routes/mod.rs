pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog_handlers;
use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Role catalog
        .route("/api/v1/roles", get(catalog_handlers::handle_list_roles))
        .route("/api/v1/roles/:name", get(catalog_handlers::handle_get_role))
        // Skill matching
        .route("/api/v1/skills/match", post(handlers::handle_match))
        .route(
            "/api/v1/skills/recommendations",
            post(handlers::handle_recommendations),
        )
        .route("/api/v1/skills/analyze", post(handlers::handle_analyze))
        .with_state(state)
}
