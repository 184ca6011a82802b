//! # REST API
//!
//! REST endpoints using axum, consumed by the UI layer.
//!
//! # Endpoints
//!
//! ## Shipments
//! - `POST /api/v1/shipments` - create a draft shipment
//! - `GET /api/v1/shipments/{id}` - get a shipment
//! - `POST /api/v1/shipments/{id}/submit` - submit
//! - `POST /api/v1/shipments/{id}/cancel` - cancel
//!
//! ## Provider operations
//! - `GET /api/v1/shipments/{id}/rates` - fetch rates from all enabled
//!   providers, sorted ascending by total price
//! - `POST /api/v1/shipments/{id}/book` - book the chosen quote
//! - `GET /api/v1/shipments/{id}/label` - fetch the shipping label URL(s)
//! - `POST /api/v1/shipments/{id}/tracking/refresh` - refresh tracking
//!
//! ## Party defaults
//! - `GET /api/v1/parties/{party_type}/{party}/default-address`
//! - `GET /api/v1/parties/{party_type}/{party}/default-contact`
//!
//! ## Health
//! - `GET /api/v1/health`
//!
//! # Usage
//!
//! ```ignore
//! use parcelgate::api::rest::{AppState, create_router};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState { /* ... */ });
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    ApiError, ApiResult, AppState, BookShipmentRequest, CreateShipmentRequest,
    DefaultNameResponse, ErrorResponse, HealthResponse, LabelResponse, ParcelRequest,
    RatesResponse,
};
pub use routes::create_router;
