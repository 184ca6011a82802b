//! # Booking Service
//!
//! Routes a chosen quote to its provider, persists the confirmation and
//! propagates carrier info to linked delivery notes.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::party_resolution::PartyResolver;
use crate::domain::entities::quote::ShippingQuote;
use crate::domain::entities::shipment::BookingConfirmation;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{ShipmentId, ShipmentStatus};
use crate::infrastructure::persistence::traits::{DeliveryNoteRepository, ShipmentRepository};
use crate::infrastructure::providers::registry::ProviderRegistry;
use crate::infrastructure::providers::traits::BookingRequest;
use std::sync::Arc;

/// Service booking shipments with the provider named on a quote.
#[derive(Debug)]
pub struct BookingService {
    registry: Arc<dyn ProviderRegistry>,
    shipments: Arc<dyn ShipmentRepository>,
    delivery_notes: Arc<dyn DeliveryNoteRepository>,
    resolver: PartyResolver,
}

impl BookingService {
    /// Creates a new service.
    #[must_use]
    pub fn new(
        registry: Arc<dyn ProviderRegistry>,
        shipments: Arc<dyn ShipmentRepository>,
        delivery_notes: Arc<dyn DeliveryNoteRepository>,
        resolver: PartyResolver,
    ) -> Self {
        Self {
            registry,
            shipments,
            delivery_notes,
            resolver,
        }
    }

    /// Books a shipment with the provider named on the quote.
    ///
    /// On success the shipment carries the provider, carrier, service,
    /// provider reference, amount and AWB number, its status is `Booked`,
    /// and every linked delivery note has the carrier fields copied onto
    /// it.
    ///
    /// # Errors
    ///
    /// Returns a not found error for an unknown shipment or provider, a
    /// domain error if the shipment is not in a bookable state, and the
    /// provider error if the booking call fails.
    pub async fn book(
        &self,
        shipment_id: &ShipmentId,
        quote: ShippingQuote,
        shipment_notification_email: Option<String>,
        tracking_notification_email: Option<String>,
    ) -> ApplicationResult<BookingConfirmation> {
        let mut shipment = self
            .shipments
            .get(shipment_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Shipment", shipment_id.as_str()))?;

        // Fail before the remote call, not after it.
        if !shipment.status().can_transition_to(ShipmentStatus::Booked) {
            return Err(DomainError::InvalidStatusTransition {
                from: shipment.status(),
                to: ShipmentStatus::Booked,
            }
            .into());
        }

        let provider_id = quote.service_provider().clone();
        let provider = self
            .registry
            .get(&provider_id)
            .await
            .ok_or_else(|| ApplicationError::not_found("Provider", provider_id.as_str()))?;

        let rate_request = self.resolver.resolve_rate_request(&shipment).await?;
        let mut booking_request = BookingRequest::new(rate_request, quote);
        booking_request.shipment_notification_email = shipment_notification_email;
        booking_request.tracking_notification_email = tracking_notification_email;

        let confirmation = provider.create_booking(&booking_request).await?;

        shipment.record_booking(confirmation.clone())?;
        self.shipments.save(&shipment).await?;

        let notes = self.delivery_notes.get_many(shipment.delivery_notes()).await?;
        for mut note in notes {
            note.apply_booking(&confirmation);
            self.delivery_notes.save(&note).await?;
        }

        tracing::info!(
            shipment = %shipment_id,
            provider = %confirmation.service_provider,
            carrier = %confirmation.carrier,
            shipment_ref = %confirmation.shipment_ref,
            "shipment booked"
        );
        Ok(confirmation)
    }

    /// Fetches the shipping label URL(s) for a booked shipment.
    ///
    /// # Errors
    ///
    /// Returns a not found error for an unknown shipment or provider,
    /// `DomainError::NotBooked` if the shipment has no booking, and the
    /// provider error if the label call fails.
    pub async fn fetch_label(&self, shipment_id: &ShipmentId) -> ApplicationResult<Vec<String>> {
        let shipment = self
            .shipments
            .get(shipment_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Shipment", shipment_id.as_str()))?;

        let booking = shipment
            .booking()
            .ok_or_else(|| DomainError::not_booked(shipment_id.as_str()))?;

        let provider = self
            .registry
            .get(&booking.service_provider)
            .await
            .ok_or_else(|| {
                ApplicationError::not_found("Provider", booking.service_provider.as_str())
            })?;

        Ok(provider.fetch_label(&booking.shipment_ref).await?)
    }
}
