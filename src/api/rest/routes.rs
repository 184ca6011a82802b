//! # REST Routes
//!
//! Router assembly for the shipment API.

use crate::api::rest::handlers::{self, AppState};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the API router over the given state.
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/shipments", post(handlers::create_shipment))
        .route("/api/v1/shipments/{id}", get(handlers::get_shipment))
        .route(
            "/api/v1/shipments/{id}/submit",
            post(handlers::submit_shipment),
        )
        .route(
            "/api/v1/shipments/{id}/cancel",
            post(handlers::cancel_shipment),
        )
        .route("/api/v1/shipments/{id}/rates", get(handlers::fetch_rates))
        .route("/api/v1/shipments/{id}/book", post(handlers::book_shipment))
        .route("/api/v1/shipments/{id}/label", get(handlers::fetch_label))
        .route(
            "/api/v1/shipments/{id}/tracking/refresh",
            post(handlers::refresh_tracking),
        )
        .route(
            "/api/v1/parties/{party_type}/{party}/default-address",
            get(handlers::party_default_address),
        )
        .route(
            "/api/v1/parties/{party_type}/{party}/default-contact",
            get(handlers::party_default_contact),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
