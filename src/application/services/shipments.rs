//! # Shipment Service
//!
//! Lifecycle operations on shipment documents: create, submit, cancel, and
//! the rate fan-out for a stored shipment.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::party_resolution::PartyResolver;
use crate::application::services::rate_aggregation::{RateAggregationEngine, RateSheet};
use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::ShipmentId;
use crate::infrastructure::persistence::traits::ShipmentRepository;
use std::sync::Arc;

/// Service owning the shipment lifecycle.
#[derive(Debug)]
pub struct ShipmentService {
    shipments: Arc<dyn ShipmentRepository>,
    resolver: PartyResolver,
    engine: Arc<RateAggregationEngine>,
}

impl ShipmentService {
    /// Creates a new service.
    #[must_use]
    pub fn new(
        shipments: Arc<dyn ShipmentRepository>,
        resolver: PartyResolver,
        engine: Arc<RateAggregationEngine>,
    ) -> Self {
        Self {
            shipments,
            resolver,
            engine,
        }
    }

    /// Validates and stores a new draft shipment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParcelWeight` if any parcel weight is
    /// zero or negative, and a duplicate error if the id is taken.
    pub async fn create(&self, shipment: Shipment) -> ApplicationResult<Shipment> {
        shipment.validate()?;
        self.shipments.insert(&shipment).await?;
        tracing::info!(shipment = %shipment.id(), "shipment created");
        Ok(shipment)
    }

    /// Returns the shipment with the given id.
    ///
    /// # Errors
    ///
    /// Returns a not found error if no such shipment exists.
    pub async fn get(&self, id: &ShipmentId) -> ApplicationResult<Shipment> {
        self.shipments
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Shipment", id.as_str()))
    }

    /// Submits a shipment.
    ///
    /// # Errors
    ///
    /// Returns the domain error if the shipment has no parcels, a zero
    /// value of goods, or is not a draft.
    pub async fn submit(&self, id: &ShipmentId) -> ApplicationResult<Shipment> {
        let mut shipment = self.get(id).await?;
        shipment.submit()?;
        self.shipments.save(&shipment).await?;
        tracing::info!(shipment = %id, "shipment submitted");
        Ok(shipment)
    }

    /// Cancels a shipment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if already cancelled.
    pub async fn cancel(&self, id: &ShipmentId) -> ApplicationResult<Shipment> {
        let mut shipment = self.get(id).await?;
        shipment.cancel()?;
        self.shipments.save(&shipment).await?;
        tracing::info!(shipment = %id, "shipment cancelled");
        Ok(shipment)
    }

    /// Fetches shipping rates for a stored shipment.
    ///
    /// Resolves the shipment's address and contact references, fans out to
    /// every enabled provider and returns the merged rate sheet sorted
    /// ascending by total price.
    ///
    /// # Errors
    ///
    /// Returns resolution errors (missing records, missing postal code or
    /// last name) and aggregation errors (no providers enabled, timeout,
    /// all providers failed).
    pub async fn fetch_rates(&self, id: &ShipmentId) -> ApplicationResult<RateSheet> {
        let shipment = self.get(id).await?;
        let request = self.resolver.resolve_rate_request(&shipment).await?;
        let sheet = self.engine.collect(&request).await?;
        tracing::info!(
            shipment = %id,
            quotes = sheet.quotes.len(),
            providers = sheet.providers_queried,
            "rates collected"
        );
        Ok(sheet)
    }
}
