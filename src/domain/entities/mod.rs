//! # Domain Entities
//!
//! Aggregate roots and entities representing core business concepts.
//!
//! ## Aggregates
//!
//! - [`Shipment`]: shipment document with lifecycle state machine
//!
//! ## Entities
//!
//! - [`Parcel`]: parcel line with validated weight
//! - [`ShippingQuote`]: ephemeral priced shipping option
//! - [`DeliveryNote`]: mirror of the delivery note fields this module writes

pub mod delivery_note;
pub mod parcel;
pub mod quote;
pub mod shipment;

pub use delivery_note::{DELIVERY_TYPE_PARCEL_SERVICE, DeliveryNote};
pub use parcel::Parcel;
pub use quote::ShippingQuote;
pub use shipment::{BookingConfirmation, Party, Shipment, ShipmentBuilder, TrackingUpdate};
