//! # Provider Adapter Trait
//!
//! Port definition for carrier provider integrations.
//!
//! This module defines the [`ProviderAdapter`] trait that all carrier
//! integrations must implement. It provides a uniform interface for rate
//! requests, booking creation, label retrieval and tracking queries.
//!
//! # Examples
//!
//! ```ignore
//! use parcelgate::infrastructure::providers::traits::ProviderAdapter;
//! use parcelgate::infrastructure::providers::error::ProviderResult;
//!
//! struct MyProviderAdapter { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl ProviderAdapter for MyProviderAdapter {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::parcel::Parcel;
use crate::domain::entities::quote::ShippingQuote;
use crate::domain::entities::shipment::{BookingConfirmation, TrackingUpdate};
use crate::domain::value_objects::{Address, Contact, Money, ProviderId};
use crate::infrastructure::providers::error::ProviderResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized shipment data sent to every provider when fetching rates.
///
/// Built from the shipment document after its address and contact
/// references have been resolved and validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRequest {
    /// Validated pickup address.
    pub pickup_address: Address,
    /// Validated delivery address.
    pub delivery_address: Address,
    /// Validated pickup contact.
    pub pickup_contact: Contact,
    /// Validated delivery contact.
    pub delivery_contact: Contact,
    /// Parcels to ship.
    pub parcels: Vec<Parcel>,
    /// Description of the shipment content.
    pub description_of_content: String,
    /// Requested pickup date.
    pub pickup_date: NaiveDate,
    /// Declared value of the goods.
    pub value_of_goods: Money,
}

/// A booking order for a previously quoted service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// The normalized shipment data, identical to the rate request.
    pub rate_request: RateRequest,
    /// The quote being booked; its service code selects the service.
    pub quote: ShippingQuote,
    /// E-mail notified about the booking, for providers that support it.
    pub shipment_notification_email: Option<String>,
    /// E-mail notified about tracking updates, for providers that support
    /// it.
    pub tracking_notification_email: Option<String>,
}

impl BookingRequest {
    /// Creates a booking request without notification e-mails.
    #[must_use]
    pub fn new(rate_request: RateRequest, quote: ShippingQuote) -> Self {
        Self {
            rate_request,
            quote,
            shipment_notification_email: None,
            tracking_notification_email: None,
        }
    }

    /// Sets the booking notification e-mail.
    #[must_use]
    pub fn with_shipment_notification(mut self, email: impl Into<String>) -> Self {
        self.shipment_notification_email = Some(email.into());
        self
    }

    /// Sets the tracking notification e-mail.
    #[must_use]
    pub fn with_tracking_notification(mut self, email: impl Into<String>) -> Self {
        self.tracking_notification_email = Some(email.into());
        self
    }
}

/// Trait defining the interface for carrier provider adapters.
///
/// All provider integrations implement this trait so the engine can fan out
/// rate requests and route bookings, labels and tracking queries to the
/// provider named on the shipment.
///
/// # Error Handling
///
/// Methods return `ProviderResult<T>`. Implementations map provider-specific
/// failures onto the shared [`ProviderError`](super::error::ProviderError)
/// variants; no retries happen at this layer.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + fmt::Debug {
    /// Returns the provider id.
    fn provider_id(&self) -> &ProviderId;

    /// Returns the timeout in milliseconds for provider operations.
    fn timeout_ms(&self) -> u64;

    /// Requests shipping rates for the given shipment data.
    ///
    /// Returns every service the provider offers for the route; the caller
    /// merges and sorts across providers.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Timeout` - request timed out
    /// - `ProviderError::RatesUnavailable` - provider has no services for
    ///   the route
    /// - `ProviderError::InvalidRequest` - rejected shipment data
    async fn fetch_rates(&self, request: &RateRequest) -> ProviderResult<Vec<ShippingQuote>>;

    /// Books the service selected by the quote inside `request`.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Timeout` - request timed out
    /// - `ProviderError::BookingFailed` - provider rejected the booking
    async fn create_booking(&self, request: &BookingRequest) -> ProviderResult<BookingConfirmation>;

    /// Fetches the label URL(s) for a provider shipment reference.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Timeout` - request timed out
    /// - `ProviderError::ProtocolError` - unknown shipment reference
    async fn fetch_label(&self, shipment_ref: &str) -> ProviderResult<Vec<String>>;

    /// Fetches the current tracking state for a provider shipment
    /// reference.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Timeout` - request timed out
    /// - `ProviderError::ProtocolError` - unknown shipment reference
    async fn fetch_tracking(&self, shipment_ref: &str) -> ProviderResult<TrackingUpdate>;
}
