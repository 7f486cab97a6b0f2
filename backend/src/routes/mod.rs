//! Route definitions for the Smart Crop Advisor

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/session", session_routes())
}

/// Recommendation form session routes
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_session))
        .route("/parameters", put(handlers::update_parameters))
        .route("/recommend", post(handlers::submit_recommendation))
        .route("/reset", post(handlers::reset_session))
}
