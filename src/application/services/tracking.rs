//! # Tracking Service
//!
//! On-demand tracking refresh and the daily sweep over open shipments.
//!
//! A refresh queries the booking provider for the current tracking state,
//! persists it onto the shipment and propagates the fields to linked
//! delivery notes. The sweep runs the same refresh over every booked,
//! not-yet-delivered shipment; one shipment failing does not stop the rest.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::shipment::TrackingUpdate;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::ShipmentId;
use crate::infrastructure::persistence::traits::{DeliveryNoteRepository, ShipmentRepository};
use crate::infrastructure::providers::registry::ProviderRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Outcome of a tracking sweep.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Number of shipments polled.
    pub polled: usize,
    /// Number of shipments successfully updated.
    pub updated: usize,
    /// Error messages for shipments whose refresh failed.
    pub failures: Vec<String>,
}

/// Service refreshing tracking state from the booking provider.
#[derive(Debug)]
pub struct TrackingService {
    registry: Arc<dyn ProviderRegistry>,
    shipments: Arc<dyn ShipmentRepository>,
    delivery_notes: Arc<dyn DeliveryNoteRepository>,
}

impl TrackingService {
    /// Creates a new service.
    #[must_use]
    pub fn new(
        registry: Arc<dyn ProviderRegistry>,
        shipments: Arc<dyn ShipmentRepository>,
        delivery_notes: Arc<dyn DeliveryNoteRepository>,
    ) -> Self {
        Self {
            registry,
            shipments,
            delivery_notes,
        }
    }

    /// Refreshes the tracking state of a single shipment.
    ///
    /// # Errors
    ///
    /// Returns a not found error for an unknown shipment or provider,
    /// `DomainError::NotBooked` if the shipment has no booking,
    /// `DomainError::AlreadyDelivered` if it is already delivered, and the
    /// provider error if the tracking call fails.
    pub async fn refresh(&self, shipment_id: &ShipmentId) -> ApplicationResult<TrackingUpdate> {
        let mut shipment = self
            .shipments
            .get(shipment_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Shipment", shipment_id.as_str()))?;

        let booking = shipment
            .booking()
            .ok_or_else(|| DomainError::not_booked(shipment_id.as_str()))?
            .clone();

        // Delivered shipments are final; never poll them again.
        if shipment.tracking_status().is_delivered() {
            return Err(DomainError::already_delivered(shipment_id.as_str()).into());
        }

        let provider = self
            .registry
            .get(&booking.service_provider)
            .await
            .ok_or_else(|| {
                ApplicationError::not_found("Provider", booking.service_provider.as_str())
            })?;

        let update = provider.fetch_tracking(&booking.shipment_ref).await?;

        shipment.apply_tracking(update.clone())?;
        self.shipments.save(&shipment).await?;

        let notes = self.delivery_notes.get_many(shipment.delivery_notes()).await?;
        for mut note in notes {
            note.apply_tracking(&update);
            self.delivery_notes.save(&note).await?;
        }

        tracing::info!(
            shipment = %shipment_id,
            status = %update.status,
            "tracking refreshed"
        );
        Ok(update)
    }

    /// Refreshes every booked, not-yet-delivered shipment.
    ///
    /// A failure for one shipment is recorded and the sweep continues.
    ///
    /// # Errors
    ///
    /// Returns a repository error if the open-shipment query itself fails.
    pub async fn sweep(&self) -> ApplicationResult<SweepReport> {
        let open = self.shipments.find_awaiting_tracking().await?;
        let mut report = SweepReport {
            polled: open.len(),
            ..SweepReport::default()
        };

        for shipment in open {
            match self.refresh(shipment.id()).await {
                Ok(_) => report.updated += 1,
                Err(e) => {
                    tracing::warn!(
                        shipment = %shipment.id(),
                        error = %e,
                        "tracking refresh failed during sweep"
                    );
                    report.failures.push(format!("{}: {e}", shipment.id()));
                }
            }
        }

        tracing::info!(
            polled = report.polled,
            updated = report.updated,
            failed = report.failures.len(),
            "tracking sweep finished"
        );
        Ok(report)
    }
}

/// Scheduled daily sweep over open shipments.
#[derive(Debug)]
pub struct TrackingSweep {
    service: Arc<TrackingService>,
    interval: Duration,
}

impl TrackingSweep {
    /// Default sweep interval: once a day.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

    /// Creates a sweep with the given interval.
    #[must_use]
    pub fn new(service: Arc<TrackingService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Creates a sweep with the daily default interval.
    #[must_use]
    pub fn daily(service: Arc<TrackingService>) -> Self {
        Self::new(service, Self::DEFAULT_INTERVAL)
    }

    /// Spawns the sweep loop onto the runtime.
    ///
    /// The first tick fires after one full interval; sweep failures are
    /// logged and the loop keeps running.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // interval() fires immediately; skip the startup tick.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = self.service.sweep().await {
                    tracing::error!(error = %e, "tracking sweep failed");
                }
            }
        })
    }
}
