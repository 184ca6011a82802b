//! # Shipment Aggregate Root
//!
//! The shipment document tracking a parcel's pickup-to-delivery lifecycle.
//!
//! The aggregate owns the parcel list, the pickup/delivery party, address and
//! contact references, the declared value, and the booking and tracking
//! fields written back by provider calls.
//!
//! # State Machine
//!
//! ```text
//! Draft → Submitted → Booked
//!   ↓         ↓          ↓
//!   └─────────┴──────────┴→ Cancelled
//! ```
//!
//! # Examples
//!
//! ```
//! use parcelgate::domain::entities::parcel::Parcel;
//! use parcelgate::domain::entities::shipment::{Party, ShipmentBuilder};
//! use parcelgate::domain::value_objects::{Money, PartyType, ShipmentId, ShipmentStatus};
//! use chrono::NaiveDate;
//!
//! let mut shipment = ShipmentBuilder::new(
//!     ShipmentId::new("SHIPMENT-00001"),
//!     Party::company(),
//!     Party::new(PartyType::Customer, "Alpha GmbH"),
//!     "ADR-PICKUP",
//!     "ADR-DELIVERY",
//!     NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
//!     Money::new(150.0).unwrap(),
//! )
//! .parcel(Parcel::new(30, 20, 10, 2.5, 1).unwrap())
//! .build();
//!
//! shipment.submit().unwrap();
//! assert_eq!(shipment.status(), ShipmentStatus::Submitted);
//! ```

use crate::domain::entities::parcel::Parcel;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{
    DeliveryNoteId, Money, PartyType, ProviderId, ShipmentId, ShipmentStatus, TrackingStatus,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pickup or delivery party reference.
///
/// Company sides carry no party name; the operating company is implied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Kind of party.
    party_type: PartyType,
    /// Party document name; `None` for the company side.
    name: Option<String>,
}

impl Party {
    /// Creates a party reference of the given type.
    #[must_use]
    pub fn new(party_type: PartyType, name: impl Into<String>) -> Self {
        Self {
            party_type,
            name: Some(name.into()),
        }
    }

    /// Creates the company-side party reference.
    #[must_use]
    pub fn company() -> Self {
        Self {
            party_type: PartyType::Company,
            name: None,
        }
    }

    /// Returns the party type.
    #[inline]
    #[must_use]
    pub fn party_type(&self) -> PartyType {
        self.party_type
    }

    /// Returns the party document name, if any.
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", self.party_type, name),
            None => write!(f, "{}", self.party_type),
        }
    }
}

/// Identifiers returned by a provider after a successful booking.
///
/// Copied verbatim onto the shipment and propagated to linked delivery
/// notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Provider that booked the shipment.
    pub service_provider: ProviderId,
    /// Carrier moving the parcels.
    pub carrier: String,
    /// Booked carrier service name.
    pub carrier_service: String,
    /// Provider-side shipment reference used for labels and tracking.
    pub shipment_ref: String,
    /// Amount charged for the booking.
    pub amount: Money,
    /// Airway bill / tracking number, when assigned at booking time.
    pub awb_number: Option<String>,
}

/// A tracking payload returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingUpdate {
    /// Airway bill / tracking number, when (re)assigned.
    pub awb_number: Option<String>,
    /// Normalized tracking status.
    pub status: TrackingStatus,
    /// Free-form status detail from the carrier.
    pub detail: Option<String>,
    /// Public tracking URL.
    pub url: Option<String>,
}

/// The shipment document.
///
/// # Invariants
///
/// - Every parcel weight is strictly positive (checked on save)
/// - Submit requires at least one parcel and a nonzero value of goods
/// - `Booked` is reached only through [`Shipment::record_booking`]
/// - Tracking updates are rejected once the shipment is delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    id: ShipmentId,
    pickup: Party,
    delivery: Party,
    pickup_address_name: String,
    delivery_address_name: String,
    pickup_contact_name: Option<String>,
    delivery_contact_name: Option<String>,
    parcels: Vec<Parcel>,
    description_of_content: String,
    pickup_date: NaiveDate,
    value_of_goods: Money,
    status: ShipmentStatus,
    booking: Option<BookingConfirmation>,
    awb_number: Option<String>,
    tracking_status: TrackingStatus,
    tracking_detail: Option<String>,
    tracking_url: Option<String>,
    delivery_notes: Vec<DeliveryNoteId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Shipment {
    /// Returns a builder for constructing a draft shipment.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn builder(
        id: ShipmentId,
        pickup: Party,
        delivery: Party,
        pickup_address_name: impl Into<String>,
        delivery_address_name: impl Into<String>,
        pickup_date: NaiveDate,
        value_of_goods: Money,
    ) -> ShipmentBuilder {
        ShipmentBuilder::new(
            id,
            pickup,
            delivery,
            pickup_address_name,
            delivery_address_name,
            pickup_date,
            value_of_goods,
        )
    }

    /// Validates the save-time invariants.
    ///
    /// Parcels arriving over the wire bypass constructor validation, so the
    /// weight rule is re-checked here before the document is persisted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParcelWeight` if any parcel weight is
    /// zero or negative.
    pub fn validate(&self) -> DomainResult<()> {
        if self.parcels.iter().any(|p| !p.has_valid_weight()) {
            return Err(DomainError::InvalidParcelWeight);
        }
        Ok(())
    }

    /// Submits the shipment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingParcels` if no parcels are present,
    /// `DomainError::InvalidValueOfGoods` if the declared value is zero, and
    /// `DomainError::InvalidStatusTransition` if the shipment is not a
    /// draft.
    pub fn submit(&mut self) -> DomainResult<()> {
        self.validate()?;
        if self.parcels.is_empty() {
            return Err(DomainError::MissingParcels);
        }
        if self.value_of_goods.is_zero() {
            return Err(DomainError::InvalidValueOfGoods);
        }
        self.transition_to(ShipmentStatus::Submitted)
    }

    /// Cancels the shipment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if already cancelled.
    pub fn cancel(&mut self) -> DomainResult<()> {
        self.transition_to(ShipmentStatus::Cancelled)
    }

    /// Records a successful provider booking.
    ///
    /// Sets the booking fields, the AWB number if one was assigned, and
    /// moves the shipment to `Booked`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the shipment has
    /// not been submitted.
    pub fn record_booking(&mut self, confirmation: BookingConfirmation) -> DomainResult<()> {
        self.transition_to(ShipmentStatus::Booked)?;
        self.awb_number = confirmation.awb_number.clone();
        self.booking = Some(confirmation);
        Ok(())
    }

    /// Applies a tracking payload.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotBooked` if there is no booking, and
    /// `DomainError::AlreadyDelivered` if the shipment has already been
    /// delivered; delivered shipments are never polled again.
    pub fn apply_tracking(&mut self, update: TrackingUpdate) -> DomainResult<()> {
        if self.booking.is_none() {
            return Err(DomainError::not_booked(self.id.as_str()));
        }
        if self.tracking_status.is_delivered() {
            return Err(DomainError::already_delivered(self.id.as_str()));
        }
        if let Some(awb) = update.awb_number {
            self.awb_number = Some(awb);
        }
        self.tracking_status = update.status;
        self.tracking_detail = update.detail;
        self.tracking_url = update.url;
        self.touch();
        Ok(())
    }

    /// Returns true if the daily sweep should poll this shipment.
    ///
    /// Booked, carrying a provider reference, and not yet delivered.
    #[must_use]
    pub fn needs_tracking_refresh(&self) -> bool {
        self.status.is_booked()
            && self
                .booking
                .as_ref()
                .is_some_and(|b| !b.shipment_ref.is_empty())
            && !self.tracking_status.is_delivered()
    }

    /// Adds a parcel line.
    pub fn add_parcel(&mut self, parcel: Parcel) {
        self.parcels.push(parcel);
        self.touch();
    }

    /// Links a delivery note.
    pub fn add_delivery_note(&mut self, id: DeliveryNoteId) {
        if !self.delivery_notes.contains(&id) {
            self.delivery_notes.push(id);
            self.touch();
        }
    }

    fn transition_to(&mut self, target: ShipmentStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    /// Returns the shipment identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ShipmentId {
        &self.id
    }

    /// Returns the pickup party.
    #[inline]
    #[must_use]
    pub fn pickup(&self) -> &Party {
        &self.pickup
    }

    /// Returns the delivery party.
    #[inline]
    #[must_use]
    pub fn delivery(&self) -> &Party {
        &self.delivery
    }

    /// Returns the pickup address document name.
    #[inline]
    #[must_use]
    pub fn pickup_address_name(&self) -> &str {
        &self.pickup_address_name
    }

    /// Returns the delivery address document name.
    #[inline]
    #[must_use]
    pub fn delivery_address_name(&self) -> &str {
        &self.delivery_address_name
    }

    /// Returns the pickup contact document name, if any.
    #[inline]
    #[must_use]
    pub fn pickup_contact_name(&self) -> Option<&str> {
        self.pickup_contact_name.as_deref()
    }

    /// Returns the delivery contact document name, if any.
    #[inline]
    #[must_use]
    pub fn delivery_contact_name(&self) -> Option<&str> {
        self.delivery_contact_name.as_deref()
    }

    /// Returns the parcel lines.
    #[inline]
    #[must_use]
    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    /// Returns the description of content.
    #[inline]
    #[must_use]
    pub fn description_of_content(&self) -> &str {
        &self.description_of_content
    }

    /// Returns the pickup date.
    #[inline]
    #[must_use]
    pub fn pickup_date(&self) -> NaiveDate {
        self.pickup_date
    }

    /// Returns the declared value of goods.
    #[inline]
    #[must_use]
    pub fn value_of_goods(&self) -> Money {
        self.value_of_goods
    }

    /// Returns the lifecycle status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> ShipmentStatus {
        self.status
    }

    /// Returns the booking, if the shipment has been booked.
    #[inline]
    #[must_use]
    pub fn booking(&self) -> Option<&BookingConfirmation> {
        self.booking.as_ref()
    }

    /// Returns the AWB / tracking number, if assigned.
    #[inline]
    #[must_use]
    pub fn awb_number(&self) -> Option<&str> {
        self.awb_number.as_deref()
    }

    /// Returns the tracking status.
    #[inline]
    #[must_use]
    pub fn tracking_status(&self) -> TrackingStatus {
        self.tracking_status
    }

    /// Returns the carrier's tracking status detail, if any.
    #[inline]
    #[must_use]
    pub fn tracking_detail(&self) -> Option<&str> {
        self.tracking_detail.as_deref()
    }

    /// Returns the public tracking URL, if any.
    #[inline]
    #[must_use]
    pub fn tracking_url(&self) -> Option<&str> {
        self.tracking_url.as_deref()
    }

    /// Returns the linked delivery note ids.
    #[inline]
    #[must_use]
    pub fn delivery_notes(&self) -> &[DeliveryNoteId] {
        &self.delivery_notes
    }

    /// Returns when the shipment was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the shipment was last modified.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

impl fmt::Display for Shipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shipment({} {} → {}, {})",
            self.id, self.pickup, self.delivery, self.status
        )
    }
}

/// Builder for constructing [`Shipment`] drafts.
#[derive(Debug, Clone)]
pub struct ShipmentBuilder {
    id: ShipmentId,
    pickup: Party,
    delivery: Party,
    pickup_address_name: String,
    delivery_address_name: String,
    pickup_contact_name: Option<String>,
    delivery_contact_name: Option<String>,
    parcels: Vec<Parcel>,
    description_of_content: String,
    pickup_date: NaiveDate,
    value_of_goods: Money,
    delivery_notes: Vec<DeliveryNoteId>,
}

impl ShipmentBuilder {
    /// Creates a new builder with the required fields.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ShipmentId,
        pickup: Party,
        delivery: Party,
        pickup_address_name: impl Into<String>,
        delivery_address_name: impl Into<String>,
        pickup_date: NaiveDate,
        value_of_goods: Money,
    ) -> Self {
        Self {
            id,
            pickup,
            delivery,
            pickup_address_name: pickup_address_name.into(),
            delivery_address_name: delivery_address_name.into(),
            pickup_contact_name: None,
            delivery_contact_name: None,
            parcels: Vec::new(),
            description_of_content: String::new(),
            pickup_date,
            value_of_goods,
            delivery_notes: Vec::new(),
        }
    }

    /// Sets the pickup contact document name.
    #[must_use]
    pub fn pickup_contact_name(mut self, name: impl Into<String>) -> Self {
        self.pickup_contact_name = Some(name.into());
        self
    }

    /// Sets the delivery contact document name.
    #[must_use]
    pub fn delivery_contact_name(mut self, name: impl Into<String>) -> Self {
        self.delivery_contact_name = Some(name.into());
        self
    }

    /// Adds a parcel line.
    #[must_use]
    pub fn parcel(mut self, parcel: Parcel) -> Self {
        self.parcels.push(parcel);
        self
    }

    /// Sets the description of content.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description_of_content = description.into();
        self
    }

    /// Links a delivery note.
    #[must_use]
    pub fn delivery_note(mut self, id: DeliveryNoteId) -> Self {
        self.delivery_notes.push(id);
        self
    }

    /// Builds the draft shipment.
    #[must_use]
    pub fn build(self) -> Shipment {
        let now = Timestamp::now();
        Shipment {
            id: self.id,
            pickup: self.pickup,
            delivery: self.delivery,
            pickup_address_name: self.pickup_address_name,
            delivery_address_name: self.delivery_address_name,
            pickup_contact_name: self.pickup_contact_name,
            delivery_contact_name: self.delivery_contact_name,
            parcels: self.parcels,
            description_of_content: self.description_of_content,
            pickup_date: self.pickup_date,
            value_of_goods: self.value_of_goods,
            status: ShipmentStatus::Draft,
            booking: None,
            awb_number: None,
            tracking_status: TrackingStatus::Pending,
            tracking_detail: None,
            tracking_url: None,
            delivery_notes: self.delivery_notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pickup_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }

    fn parcel() -> Parcel {
        Parcel::new(30, 20, 10, 2.5, 1).unwrap()
    }

    fn draft() -> Shipment {
        Shipment::builder(
            ShipmentId::new("SHIPMENT-00001"),
            Party::company(),
            Party::new(PartyType::Customer, "Alpha GmbH"),
            "ADR-PICKUP",
            "ADR-DELIVERY",
            pickup_date(),
            Money::new(150.0).unwrap(),
        )
        .parcel(parcel())
        .description("Spare parts")
        .delivery_note(DeliveryNoteId::new("DN-0001"))
        .build()
    }

    fn confirmation() -> BookingConfirmation {
        BookingConfirmation {
            service_provider: ProviderId::new("LetMeShip"),
            carrier: "DHL".to_string(),
            carrier_service: "Express Worldwide".to_string(),
            shipment_ref: "LMS-789".to_string(),
            amount: Money::new(18.90).unwrap(),
            awb_number: Some("1Z999".to_string()),
        }
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn builder_creates_draft() {
            let shipment = draft();
            assert_eq!(shipment.status(), ShipmentStatus::Draft);
            assert_eq!(shipment.parcels().len(), 1);
            assert_eq!(shipment.tracking_status(), TrackingStatus::Pending);
            assert!(shipment.booking().is_none());
        }

        #[test]
        fn submit_moves_to_submitted() {
            let mut shipment = draft();
            shipment.submit().unwrap();
            assert_eq!(shipment.status(), ShipmentStatus::Submitted);
        }

        #[test]
        fn submit_without_parcels_fails() {
            let mut shipment = Shipment::builder(
                ShipmentId::new("SHIPMENT-00002"),
                Party::company(),
                Party::new(PartyType::Customer, "Alpha GmbH"),
                "ADR-PICKUP",
                "ADR-DELIVERY",
                pickup_date(),
                Money::new(150.0).unwrap(),
            )
            .build();

            assert!(matches!(
                shipment.submit(),
                Err(DomainError::MissingParcels)
            ));
            assert_eq!(shipment.status(), ShipmentStatus::Draft);
        }

        #[test]
        fn submit_with_zero_value_fails() {
            let mut shipment = Shipment::builder(
                ShipmentId::new("SHIPMENT-00003"),
                Party::company(),
                Party::new(PartyType::Customer, "Alpha GmbH"),
                "ADR-PICKUP",
                "ADR-DELIVERY",
                pickup_date(),
                Money::zero(),
            )
            .parcel(parcel())
            .build();

            assert!(matches!(
                shipment.submit(),
                Err(DomainError::InvalidValueOfGoods)
            ));
        }

        #[test]
        fn cancel_from_draft_and_submitted() {
            let mut shipment = draft();
            shipment.cancel().unwrap();
            assert_eq!(shipment.status(), ShipmentStatus::Cancelled);

            let mut shipment = draft();
            shipment.submit().unwrap();
            shipment.cancel().unwrap();
            assert_eq!(shipment.status(), ShipmentStatus::Cancelled);
        }

        #[test]
        fn cancel_twice_fails() {
            let mut shipment = draft();
            shipment.cancel().unwrap();
            assert!(matches!(
                shipment.cancel(),
                Err(DomainError::InvalidStatusTransition { .. })
            ));
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn validate_accepts_constructed_parcels() {
            assert!(draft().validate().is_ok());
        }

        #[test]
        fn validate_rejects_deserialized_zero_weight() {
            // Wire payloads bypass Parcel::new.
            let bad: Parcel = serde_json::from_str(
                r#"{"length_cm":30,"width_cm":20,"height_cm":10,"weight_kg":"0","count":1}"#,
            )
            .unwrap();

            let mut shipment = draft();
            shipment.add_parcel(bad);

            assert!(matches!(
                shipment.validate(),
                Err(DomainError::InvalidParcelWeight)
            ));
            assert!(shipment.submit().is_err());
        }
    }

    mod booking {
        use super::*;

        #[test]
        fn record_booking_from_submitted() {
            let mut shipment = draft();
            shipment.submit().unwrap();
            shipment.record_booking(confirmation()).unwrap();

            assert_eq!(shipment.status(), ShipmentStatus::Booked);
            assert_eq!(shipment.awb_number(), Some("1Z999"));
            assert_eq!(
                shipment.booking().unwrap().service_provider,
                ProviderId::new("LetMeShip")
            );
        }

        #[test]
        fn record_booking_from_draft_fails() {
            let mut shipment = draft();
            assert!(matches!(
                shipment.record_booking(confirmation()),
                Err(DomainError::InvalidStatusTransition { .. })
            ));
            assert!(shipment.booking().is_none());
        }
    }

    mod tracking {
        use super::*;

        fn booked() -> Shipment {
            let mut shipment = draft();
            shipment.submit().unwrap();
            shipment.record_booking(confirmation()).unwrap();
            shipment
        }

        fn update(status: TrackingStatus) -> TrackingUpdate {
            TrackingUpdate {
                awb_number: Some("1Z999-NEW".to_string()),
                status,
                detail: Some("Arrived at hub".to_string()),
                url: Some("https://track.example/1Z999".to_string()),
            }
        }

        #[test]
        fn apply_tracking_updates_fields() {
            let mut shipment = booked();
            shipment.apply_tracking(update(TrackingStatus::InTransit)).unwrap();

            assert_eq!(shipment.tracking_status(), TrackingStatus::InTransit);
            assert_eq!(shipment.awb_number(), Some("1Z999-NEW"));
            assert_eq!(shipment.tracking_detail(), Some("Arrived at hub"));
            assert_eq!(shipment.tracking_url(), Some("https://track.example/1Z999"));
        }

        #[test]
        fn apply_tracking_without_booking_fails() {
            let mut shipment = draft();
            assert!(matches!(
                shipment.apply_tracking(update(TrackingStatus::InTransit)),
                Err(DomainError::NotBooked { .. })
            ));
        }

        #[test]
        fn delivered_shipments_reject_further_updates() {
            let mut shipment = booked();
            shipment.apply_tracking(update(TrackingStatus::Delivered)).unwrap();

            assert!(matches!(
                shipment.apply_tracking(update(TrackingStatus::InTransit)),
                Err(DomainError::AlreadyDelivered { .. })
            ));
            assert_eq!(shipment.tracking_status(), TrackingStatus::Delivered);
        }

        #[test]
        fn needs_tracking_refresh() {
            let mut shipment = booked();
            assert!(shipment.needs_tracking_refresh());

            shipment.apply_tracking(update(TrackingStatus::Delivered)).unwrap();
            assert!(!shipment.needs_tracking_refresh());

            assert!(!draft().needs_tracking_refresh());
        }
    }
}
