use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all tipjar endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/stats", get(handler::stats_handler))
        .route("/v1/audit", get(handler::audit_handler))
        .route("/v1/donations", post(handler::donate_handler))
        .route("/v1/withdrawals", post(handler::withdraw_handler))
        .route("/v1/donors/:account", get(handler::donor_handler))
        .route("/v1/donors/:account/history", get(handler::history_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
