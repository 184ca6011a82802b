//! # Shipping Quote Entity
//!
//! A priced shipping option returned by a carrier provider.
//!
//! Quotes are ephemeral: they are produced by rate aggregation, shown to the
//! user, and consumed once to create a booking. They are never persisted.
//!
//! # Examples
//!
//! ```
//! use parcelgate::domain::entities::quote::ShippingQuote;
//! use parcelgate::domain::value_objects::{Money, ProviderId};
//!
//! let quote = ShippingQuote::new(
//!     ProviderId::new("LetMeShip"),
//!     "DHL",
//!     "Express Worldwide",
//!     "svc-4711",
//!     Money::new(18.90).unwrap(),
//! );
//!
//! assert_eq!(quote.carrier(), "DHL");
//! ```

use crate::domain::value_objects::{Money, ProviderId, QuoteId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A priced shipping option from a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    /// Unique identifier of this quote.
    id: QuoteId,
    /// Provider that produced the quote.
    service_provider: ProviderId,
    /// Carrier that would move the parcels.
    carrier: String,
    /// Human-readable service name.
    carrier_service: String,
    /// Provider-specific code needed to book this service.
    service_code: String,
    /// Total price for the shipment.
    total_price: Money,
    /// Estimated delivery time in days, when the provider reports one.
    estimated_delivery_days: Option<u32>,
}

impl ShippingQuote {
    /// Creates a new quote.
    #[must_use]
    pub fn new(
        service_provider: ProviderId,
        carrier: impl Into<String>,
        carrier_service: impl Into<String>,
        service_code: impl Into<String>,
        total_price: Money,
    ) -> Self {
        Self {
            id: QuoteId::new_v4(),
            service_provider,
            carrier: carrier.into(),
            carrier_service: carrier_service.into(),
            service_code: service_code.into(),
            total_price,
            estimated_delivery_days: None,
        }
    }

    /// Sets the estimated delivery time in days.
    #[must_use]
    pub fn with_estimated_delivery_days(mut self, days: u32) -> Self {
        self.estimated_delivery_days = Some(days);
        self
    }

    /// Returns the quote identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QuoteId {
        self.id
    }

    /// Returns the provider that produced this quote.
    #[inline]
    #[must_use]
    pub fn service_provider(&self) -> &ProviderId {
        &self.service_provider
    }

    /// Returns the carrier name.
    #[inline]
    #[must_use]
    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    /// Returns the service name.
    #[inline]
    #[must_use]
    pub fn carrier_service(&self) -> &str {
        &self.carrier_service
    }

    /// Returns the provider-specific service code.
    #[inline]
    #[must_use]
    pub fn service_code(&self) -> &str {
        &self.service_code
    }

    /// Returns the total price.
    #[inline]
    #[must_use]
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Returns the estimated delivery time in days, if reported.
    #[inline]
    #[must_use]
    pub fn estimated_delivery_days(&self) -> Option<u32> {
        self.estimated_delivery_days
    }
}

impl fmt::Display for ShippingQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} via {} @ {}",
            self.carrier, self.carrier_service, self.service_provider, self.total_price
        )
    }
}
