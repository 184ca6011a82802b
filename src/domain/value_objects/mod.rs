//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`ShipmentId`], [`DeliveryNoteId`]: document-name identifiers
//! - [`ProviderId`]: stable carrier provider name
//! - [`QuoteId`]: UUID identifier for ephemeral quotes
//!
//! ## Numeric Types
//!
//! - [`Money`]: non-negative decimal amount with checked arithmetic
//!
//! ## Normalized Records
//!
//! - [`Address`]: validated postal address (postal code mandatory)
//! - [`Contact`]: validated contact person (last name mandatory)
//!
//! ## Domain Enums
//!
//! - `PartyType`: Company, Customer or Supplier
//! - `ShipmentStatus`: shipment lifecycle states
//! - `TrackingStatus`: normalized carrier tracking states

pub mod address;
pub mod contact;
pub mod enums;
pub mod ids;
pub mod money;
pub mod timestamp;

pub use address::{Address, AddressRecord};
pub use contact::{Contact, ContactRecord, Gender, Salutation};
pub use enums::{ParseEnumError, PartyType, ShipmentStatus, TrackingStatus};
pub use ids::{DeliveryNoteId, ProviderId, QuoteId, ShipmentId};
pub use money::Money;
pub use timestamp::Timestamp;
