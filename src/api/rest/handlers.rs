//! # REST Handlers
//!
//! Request/response types and handler functions for the shipment API.

use crate::application::error::ApplicationError;
use crate::application::services::booking::BookingService;
use crate::application::services::party_resolution::PartyResolver;
use crate::application::services::rate_aggregation::{AggregationError, RateSheet};
use crate::application::services::shipments::ShipmentService;
use crate::application::services::tracking::TrackingService;
use crate::domain::entities::parcel::Parcel;
use crate::domain::entities::quote::ShippingQuote;
use crate::domain::entities::shipment::{
    BookingConfirmation, Party, Shipment, TrackingUpdate,
};
use crate::domain::value_objects::{Money, PartyType, ShipmentId};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Shared state for all handlers.
#[derive(Debug)]
pub struct AppState {
    /// Shipment lifecycle service.
    pub shipments: Arc<ShipmentService>,
    /// Booking dispatch service.
    pub booking: Arc<BookingService>,
    /// Tracking refresh service.
    pub tracking: Arc<TrackingService>,
    /// Party directory resolver.
    pub resolver: PartyResolver,
}

/// Error body returned to API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Application error with an HTTP status mapping.
#[derive(Debug)]
pub struct ApiError(ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            err if err.is_not_found() => StatusCode::NOT_FOUND,
            err if err.is_user_error() => StatusCode::BAD_REQUEST,
            ApplicationError::Aggregation(AggregationError::NoProvidersEnabled) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApplicationError::Provider(_) | ApplicationError::Aggregation(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the service is up.
    pub status: &'static str,
}

/// A parcel line as accepted over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParcelRequest {
    /// Length in centimeters.
    pub length_cm: u32,
    /// Width in centimeters.
    pub width_cm: u32,
    /// Height in centimeters.
    pub height_cm: u32,
    /// Weight in kilograms; must be positive.
    pub weight_kg: f64,
    /// Number of identical parcels; defaults to 1.
    #[serde(default = "default_parcel_count")]
    pub count: u32,
}

fn default_parcel_count() -> u32 {
    1
}

/// Body for creating a draft shipment.
#[derive(Debug, Deserialize)]
pub struct CreateShipmentRequest {
    /// Document name for the new shipment.
    pub id: String,
    /// Pickup party type.
    pub pickup_party_type: PartyType,
    /// Pickup party name; required unless the pickup side is the company.
    #[serde(default)]
    pub pickup_party: Option<String>,
    /// Delivery party type.
    pub delivery_party_type: PartyType,
    /// Delivery party name; required unless the delivery side is the
    /// company.
    #[serde(default)]
    pub delivery_party: Option<String>,
    /// Pickup address document name.
    pub pickup_address_name: String,
    /// Delivery address document name.
    pub delivery_address_name: String,
    /// Pickup contact document name.
    #[serde(default)]
    pub pickup_contact_name: Option<String>,
    /// Delivery contact document name.
    #[serde(default)]
    pub delivery_contact_name: Option<String>,
    /// Parcel lines.
    #[serde(default)]
    pub parcels: Vec<ParcelRequest>,
    /// Description of the shipment content.
    #[serde(default)]
    pub description_of_content: String,
    /// Requested pickup date.
    pub pickup_date: NaiveDate,
    /// Declared value of the goods.
    pub value_of_goods: f64,
    /// Linked delivery note ids.
    #[serde(default)]
    pub delivery_notes: Vec<String>,
}

impl CreateShipmentRequest {
    fn party(party_type: PartyType, name: Option<String>) -> Result<Party, ApplicationError> {
        if party_type.is_company() {
            return Ok(Party::company());
        }
        let name = name.ok_or_else(|| {
            ApplicationError::validation(format!("party name is required for {party_type}"))
        })?;
        Ok(Party::new(party_type, name))
    }

    fn into_shipment(self) -> Result<Shipment, ApplicationError> {
        let pickup = Self::party(self.pickup_party_type, self.pickup_party)?;
        let delivery = Self::party(self.delivery_party_type, self.delivery_party)?;
        let value_of_goods = Money::new(self.value_of_goods)?;

        let mut builder = Shipment::builder(
            ShipmentId::new(self.id),
            pickup,
            delivery,
            self.pickup_address_name,
            self.delivery_address_name,
            self.pickup_date,
            value_of_goods,
        )
        .description(self.description_of_content);

        if let Some(name) = self.pickup_contact_name {
            builder = builder.pickup_contact_name(name);
        }
        if let Some(name) = self.delivery_contact_name {
            builder = builder.delivery_contact_name(name);
        }
        for parcel in self.parcels {
            builder = builder.parcel(Parcel::new(
                parcel.length_cm,
                parcel.width_cm,
                parcel.height_cm,
                parcel.weight_kg,
                parcel.count,
            )?);
        }
        for note in self.delivery_notes {
            builder = builder.delivery_note(note.into());
        }

        Ok(builder.build())
    }
}

/// Body for booking a shipment.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookShipmentRequest {
    /// The quote to book, as returned by the rates endpoint.
    pub quote: ShippingQuote,
    /// E-mail notified about the booking.
    #[serde(default)]
    pub shipment_notification_email: Option<String>,
    /// E-mail notified about tracking updates.
    #[serde(default)]
    pub tracking_notification_email: Option<String>,
}

/// Response for the rates endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct RatesResponse {
    /// Quotes sorted ascending by total price.
    pub quotes: Vec<ShippingQuote>,
    /// Number of providers queried.
    pub providers_queried: usize,
    /// Number of providers that responded.
    pub providers_responded: usize,
    /// Per-provider error messages from providers that failed.
    pub errors: Vec<String>,
}

impl From<RateSheet> for RatesResponse {
    fn from(sheet: RateSheet) -> Self {
        Self {
            quotes: sheet.quotes,
            providers_queried: sheet.providers_queried,
            providers_responded: sheet.providers_responded,
            errors: sheet.errors,
        }
    }
}

/// Response for the label endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct LabelResponse {
    /// Label URL(s) returned by the provider.
    pub labels: Vec<String>,
}

/// Response naming a resolved default document.
#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultNameResponse {
    /// Document name of the default record.
    pub name: String,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `POST /shipments`
pub async fn create_shipment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateShipmentRequest>,
) -> ApiResult<(StatusCode, Json<Shipment>)> {
    let shipment = request.into_shipment()?;
    let created = state.shipments.create(shipment).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /shipments/{id}`
pub async fn get_shipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Shipment>> {
    let shipment = state.shipments.get(&ShipmentId::new(id)).await?;
    Ok(Json(shipment))
}

/// `POST /shipments/{id}/submit`
pub async fn submit_shipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Shipment>> {
    let shipment = state.shipments.submit(&ShipmentId::new(id)).await?;
    Ok(Json(shipment))
}

/// `POST /shipments/{id}/cancel`
pub async fn cancel_shipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Shipment>> {
    let shipment = state.shipments.cancel(&ShipmentId::new(id)).await?;
    Ok(Json(shipment))
}

/// `GET /shipments/{id}/rates`
pub async fn fetch_rates(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<RatesResponse>> {
    let sheet = state.shipments.fetch_rates(&ShipmentId::new(id)).await?;
    Ok(Json(sheet.into()))
}

/// `POST /shipments/{id}/book`
pub async fn book_shipment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<BookShipmentRequest>,
) -> ApiResult<Json<BookingConfirmation>> {
    let confirmation = state
        .booking
        .book(
            &ShipmentId::new(id),
            request.quote,
            request.shipment_notification_email,
            request.tracking_notification_email,
        )
        .await?;
    Ok(Json(confirmation))
}

/// `GET /shipments/{id}/label`
pub async fn fetch_label(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<LabelResponse>> {
    let labels = state.booking.fetch_label(&ShipmentId::new(id)).await?;
    Ok(Json(LabelResponse { labels }))
}

/// `POST /shipments/{id}/tracking/refresh`
pub async fn refresh_tracking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TrackingUpdate>> {
    let update = state.tracking.refresh(&ShipmentId::new(id)).await?;
    Ok(Json(update))
}

fn parse_party_type(value: &str) -> Result<PartyType, ApiError> {
    PartyType::from_str(value)
        .map_err(|e| ApplicationError::validation(e.to_string()).into())
}

/// `GET /parties/{party_type}/{party}/default-address`
pub async fn party_default_address(
    State(state): State<Arc<AppState>>,
    Path((party_type, party)): Path<(String, String)>,
) -> ApiResult<Json<DefaultNameResponse>> {
    let party_type = parse_party_type(&party_type)?;
    let name = state
        .resolver
        .default_address_name(party_type, &party)
        .await?;
    Ok(Json(DefaultNameResponse { name }))
}

/// `GET /parties/{party_type}/{party}/default-contact`
pub async fn party_default_contact(
    State(state): State<Arc<AppState>>,
    Path((party_type, party)): Path<(String, String)>,
) -> ApiResult<Json<DefaultNameResponse>> {
    let party_type = parse_party_type(&party_type)?;
    let name = state
        .resolver
        .default_contact_name(party_type, &party)
        .await?;
    Ok(Json(DefaultNameResponse { name }))
}
