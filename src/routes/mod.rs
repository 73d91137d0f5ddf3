pub mod analytics;
pub mod auth;
pub mod candidate_routes;
pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{auth::require_bearer_auth, rate_limit};
use crate::AppState;

/// Full HTTP surface. Everything under `/api` except login needs a bearer token.
pub fn router(state: AppState, api_rps: u32) -> Router {
    let protected = Router::new()
        .route("/api/candidates", get(candidate_routes::list_candidates))
        .route("/api/candidates/:id", get(candidate_routes::get_candidate))
        .route(
            "/api/candidates/:id/status",
            patch(candidate_routes::update_candidate_status),
        )
        .route(
            "/api/candidates/:id/score",
            patch(candidate_routes::update_candidate_score),
        )
        .route("/api/analytics/statistics", get(analytics::get_statistics))
        .route("/api/analytics/referrals", get(analytics::get_referral_network))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth,
        ));

    let api = Router::new()
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new(api_rps),
            rate_limit::rate_limit,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
