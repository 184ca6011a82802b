//! # Domain Errors
//!
//! Error types for business rule violations.
//!
//! These errors carry the user-facing validation messages for the shipment
//! lifecycle: missing parcel information, zero declared value, invalid
//! parcel weights, and address/contact data required by the carrier
//! providers.

use crate::domain::value_objects::enums::ShipmentStatus;
use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A parcel weight was zero or negative.
    #[error("parcel weight cannot be zero or negative")]
    InvalidParcelWeight,

    /// A parcel count was zero.
    #[error("parcel count must be at least 1")]
    InvalidParcelCount,

    /// The shipment has no parcels.
    #[error("please enter shipment parcel information")]
    MissingParcels,

    /// The declared value of goods is zero.
    #[error("value of goods cannot be 0")]
    InvalidValueOfGoods,

    /// An address is missing its postal code.
    #[error("postal code is mandatory to continue, please set a postal code for address {address}")]
    MissingPostalCode {
        /// Name of the offending address record.
        address: String,
    },

    /// A contact is missing its last name.
    #[error("last name is mandatory to continue, please set a last name for contact {contact}")]
    MissingLastName {
        /// Name of the offending contact record.
        contact: String,
    },

    /// A contact has neither a phone nor a mobile number.
    #[error("phone or mobile number is mandatory to continue, please set one for contact {contact}")]
    MissingPhone {
        /// Name of the offending contact record.
        contact: String,
    },

    /// A monetary amount was invalid (negative, non-finite, or overflowed).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// An illegal lifecycle transition was attempted.
    #[error("invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: ShipmentStatus,
        /// Requested status.
        to: ShipmentStatus,
    },

    /// An operation required a booked shipment.
    #[error("shipment {id} has not been booked with a provider")]
    NotBooked {
        /// Shipment identifier.
        id: String,
    },

    /// Tracking refresh was attempted on a delivered shipment.
    #[error("shipment {id} is already delivered")]
    AlreadyDelivered {
        /// Shipment identifier.
        id: String,
    },

    /// Generic validation failure.
    #[error("validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Creates a missing postal code error.
    #[must_use]
    pub fn missing_postal_code(address: impl Into<String>) -> Self {
        Self::MissingPostalCode {
            address: address.into(),
        }
    }

    /// Creates a missing last name error.
    #[must_use]
    pub fn missing_last_name(contact: impl Into<String>) -> Self {
        Self::MissingLastName {
            contact: contact.into(),
        }
    }

    /// Creates a missing phone error.
    #[must_use]
    pub fn missing_phone(contact: impl Into<String>) -> Self {
        Self::MissingPhone {
            contact: contact.into(),
        }
    }

    /// Creates a not booked error.
    #[must_use]
    pub fn not_booked(id: impl Into<String>) -> Self {
        Self::NotBooked { id: id.into() }
    }

    /// Creates an already delivered error.
    #[must_use]
    pub fn already_delivered(id: impl Into<String>) -> Self {
        Self::AlreadyDelivered { id: id.into() }
    }

    /// Creates a generic validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true if this error is a user-facing validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::InvalidStatusTransition { .. } | Self::NotBooked { .. }
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
