//! # Parcelgate
//!
//! Shipment booking engine aggregating rates, bookings and tracking from
//! carrier providers.
//!
//! Parcelgate manages the shipment document lifecycle (draft, submit,
//! cancel), fans out rate requests to the enabled carrier-aggregation
//! providers and merges the results sorted ascending by total price, books
//! the chosen service, and keeps tracking state synchronized onto the
//! shipment and its linked delivery notes, on demand and via a daily
//! sweep.
//!
//! # Architecture
//!
//! The crate follows a layered architecture:
//!
//! - [`domain`] - entities, value objects and business rules; no I/O
//! - [`application`] - use-case services: rate aggregation, booking
//!   dispatch, tracking refresh, party resolution
//! - [`infrastructure`] - provider adapters (LetMeShip, Packlink) and the
//!   persistence ports over the document store
//! - [`api`] - the REST surface consumed by the UI layer
//! - [`config`] - typed settings wiring providers and timeouts
//!
//! # Example
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

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
