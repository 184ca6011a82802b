//! # Delivery Note Entity
//!
//! Minimal mirror of the delivery note fields this module writes.
//!
//! Delivery notes are owned elsewhere; after a booking or a tracking update
//! the carrier and tracking fields are copied onto every note linked to the
//! shipment.

use crate::domain::entities::shipment::{BookingConfirmation, TrackingUpdate};
use crate::domain::value_objects::{DeliveryNoteId, TrackingStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery type written after a parcel-service booking.
pub const DELIVERY_TYPE_PARCEL_SERVICE: &str = "Parcel Service";

/// The slice of a delivery note this module owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryNote {
    id: DeliveryNoteId,
    delivery_type: Option<String>,
    parcel_service: Option<String>,
    parcel_service_type: Option<String>,
    tracking_number: Option<String>,
    tracking_url: Option<String>,
    tracking_status: Option<TrackingStatus>,
    tracking_detail: Option<String>,
}

impl DeliveryNote {
    /// Creates an empty delivery note mirror.
    #[must_use]
    pub fn new(id: DeliveryNoteId) -> Self {
        Self {
            id,
            delivery_type: None,
            parcel_service: None,
            parcel_service_type: None,
            tracking_number: None,
            tracking_url: None,
            tracking_status: None,
            tracking_detail: None,
        }
    }

    /// Copies carrier fields from a booking confirmation.
    pub fn apply_booking(&mut self, confirmation: &BookingConfirmation) {
        self.delivery_type = Some(DELIVERY_TYPE_PARCEL_SERVICE.to_string());
        self.parcel_service = Some(confirmation.carrier.clone());
        self.parcel_service_type = Some(confirmation.carrier_service.clone());
    }

    /// Copies tracking fields from a tracking payload.
    pub fn apply_tracking(&mut self, update: &TrackingUpdate) {
        if let Some(awb) = &update.awb_number {
            self.tracking_number = Some(awb.clone());
        }
        self.tracking_status = Some(update.status);
        self.tracking_url = update.url.clone();
        self.tracking_detail = update.detail.clone();
    }

    /// Returns the delivery note identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &DeliveryNoteId {
        &self.id
    }

    /// Returns the delivery type, if set.
    #[inline]
    #[must_use]
    pub fn delivery_type(&self) -> Option<&str> {
        self.delivery_type.as_deref()
    }

    /// Returns the parcel service (carrier), if set.
    #[inline]
    #[must_use]
    pub fn parcel_service(&self) -> Option<&str> {
        self.parcel_service.as_deref()
    }

    /// Returns the parcel service type, if set.
    #[inline]
    #[must_use]
    pub fn parcel_service_type(&self) -> Option<&str> {
        self.parcel_service_type.as_deref()
    }

    /// Returns the tracking number, if set.
    #[inline]
    #[must_use]
    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    /// Returns the tracking URL, if set.
    #[inline]
    #[must_use]
    pub fn tracking_url(&self) -> Option<&str> {
        self.tracking_url.as_deref()
    }

    /// Returns the tracking status, if set.
    #[inline]
    #[must_use]
    pub fn tracking_status(&self) -> Option<TrackingStatus> {
        self.tracking_status
    }

    /// Returns the tracking status detail, if set.
    #[inline]
    #[must_use]
    pub fn tracking_detail(&self) -> Option<&str> {
        self.tracking_detail.as_deref()
    }
}

impl fmt::Display for DeliveryNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeliveryNote({})", self.id)
    }
}
