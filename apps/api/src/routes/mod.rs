pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/:id/matches",
            get(handlers::handle_get_matches),
        )
        .route(
            "/api/v1/resumes/:id/matches/refresh",
            post(handlers::handle_refresh_matches),
        )
        .with_state(state)
}
