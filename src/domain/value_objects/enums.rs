//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! This module provides the core enumerations of the shipment domain:
//!
//! - [`PartyType`] - which kind of party a shipment side refers to
//! - [`ShipmentStatus`] - shipment lifecycle states with FSM transitions
//! - [`TrackingStatus`] - normalized carrier tracking states
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEnumError {
    /// The value does not name a variant of the enum.
    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),
}

/// Kind of party on the pickup or delivery side of a shipment.
///
/// # Examples
///
/// ```
/// use parcelgate::domain::value_objects::enums::PartyType;
///
/// assert_eq!(PartyType::Customer.to_string(), "Customer");
/// assert!(PartyType::Company.is_company());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[repr(u8)]
pub enum PartyType {
    /// The operating company itself.
    Company = 0,
    /// A customer party.
    Customer = 1,
    /// A supplier party.
    Supplier = 2,
}

impl PartyType {
    /// Returns true if this side refers to the operating company.
    ///
    /// Company sides use the company contact instead of a party contact.
    #[inline]
    #[must_use]
    pub const fn is_company(self) -> bool {
        matches!(self, Self::Company)
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Company => write!(f, "Company"),
            Self::Customer => write!(f, "Customer"),
            Self::Supplier => write!(f, "Supplier"),
        }
    }
}

impl FromStr for PartyType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "company" => Ok(Self::Company),
            "customer" => Ok(Self::Customer),
            "supplier" => Ok(Self::Supplier),
            _ => Err(ParseEnumError::InvalidValue("PartyType", s.to_string())),
        }
    }
}

/// Shipment lifecycle status.
///
/// The shipment follows a strict state machine:
///
/// ```text
/// Draft → Submitted → Booked
///   ↓         ↓          ↓
///   └─────────┴──────────┴→ Cancelled
/// ```
///
/// A shipment becomes `Booked` only through a successful create-booking
/// call against a provider.
///
/// # Examples
///
/// ```
/// use parcelgate::domain::value_objects::enums::ShipmentStatus;
///
/// assert!(ShipmentStatus::Draft.can_transition_to(ShipmentStatus::Submitted));
/// assert!(!ShipmentStatus::Draft.can_transition_to(ShipmentStatus::Booked));
/// assert!(ShipmentStatus::Cancelled.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[repr(u8)]
pub enum ShipmentStatus {
    /// Unsubmitted working copy.
    #[default]
    Draft = 0,
    /// Submitted and ready for booking.
    Submitted = 1,
    /// Booked with a carrier provider.
    Booked = 2,
    /// Cancelled; terminal.
    Cancelled = 3,
}

impl ShipmentStatus {
    /// Returns true if the transition to `target` is allowed by the FSM.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Submitted)
                | (Self::Draft, Self::Cancelled)
                | (Self::Submitted, Self::Booked)
                | (Self::Submitted, Self::Cancelled)
                | (Self::Booked, Self::Cancelled)
        )
    }

    /// Returns true if no further transitions are possible.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if the shipment is booked with a provider.
    #[inline]
    #[must_use]
    pub const fn is_booked(self) -> bool {
        matches!(self, Self::Booked)
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::Submitted => write!(f, "Submitted"),
            Self::Booked => write!(f, "Booked"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for ShipmentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "booked" => Ok(Self::Booked),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseEnumError::InvalidValue(
                "ShipmentStatus",
                s.to_string(),
            )),
        }
    }
}

/// Normalized tracking status across carrier providers.
///
/// Providers report free-form status strings; adapters normalize them with
/// [`TrackingStatus::from_provider`], which never fails and falls back to
/// [`TrackingStatus::Unknown`].
///
/// # Examples
///
/// ```
/// use parcelgate::domain::value_objects::enums::TrackingStatus;
///
/// assert_eq!(TrackingStatus::from_provider("DELIVERED"), TrackingStatus::Delivered);
/// assert_eq!(TrackingStatus::from_provider("in transit"), TrackingStatus::InTransit);
/// assert_eq!(TrackingStatus::from_provider("weird"), TrackingStatus::Unknown);
/// assert!(TrackingStatus::Delivered.is_delivered());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TrackingStatus {
    /// No tracking information yet.
    #[default]
    Pending = 0,
    /// Picked up and moving through the carrier network.
    InTransit = 1,
    /// On the last-mile vehicle.
    OutForDelivery = 2,
    /// Delivered to the recipient.
    Delivered = 3,
    /// The carrier flagged a problem.
    Exception = 4,
    /// The provider reported a status this module does not know.
    Unknown = 5,
}

impl TrackingStatus {
    /// Returns true if the parcel has been delivered.
    ///
    /// Delivered shipments are excluded from tracking refresh.
    #[inline]
    #[must_use]
    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Normalizes a provider-reported status string.
    ///
    /// Matching is case-insensitive and tolerant of separators; anything
    /// unrecognized maps to [`TrackingStatus::Unknown`].
    #[must_use]
    pub fn from_provider(value: &str) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "pending" | "registered" | "awaitingpickup" => Self::Pending,
            "intransit" | "transit" | "pickedup" | "shipped" => Self::InTransit,
            "outfordelivery" | "indelivery" => Self::OutForDelivery,
            "delivered" => Self::Delivered,
            "exception" | "incident" | "problem" | "returned" => Self::Exception,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::InTransit => write!(f, "IN_TRANSIT"),
            Self::OutForDelivery => write!(f, "OUT_FOR_DELIVERY"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Exception => write!(f, "EXCEPTION"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl FromStr for TrackingStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_provider(s) {
            Self::Unknown => Err(ParseEnumError::InvalidValue(
                "TrackingStatus",
                s.to_string(),
            )),
            status => Ok(status),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod party_type {
        use super::*;

        #[test]
        fn parse_and_display() {
            assert_eq!(
                "customer".parse::<PartyType>().unwrap(),
                PartyType::Customer
            );
            assert_eq!("Company".parse::<PartyType>().unwrap(), PartyType::Company);
            assert_eq!(PartyType::Supplier.to_string(), "Supplier");
        }

        #[test]
        fn parse_rejects_unknown() {
            assert!("warehouse".parse::<PartyType>().is_err());
        }
    }

    mod shipment_status {
        use super::*;

        #[test]
        fn allowed_transitions() {
            use ShipmentStatus::*;
            assert!(Draft.can_transition_to(Submitted));
            assert!(Draft.can_transition_to(Cancelled));
            assert!(Submitted.can_transition_to(Booked));
            assert!(Submitted.can_transition_to(Cancelled));
            assert!(Booked.can_transition_to(Cancelled));
        }

        #[test]
        fn forbidden_transitions() {
            use ShipmentStatus::*;
            assert!(!Draft.can_transition_to(Booked));
            assert!(!Booked.can_transition_to(Draft));
            assert!(!Cancelled.can_transition_to(Draft));
            assert!(!Cancelled.can_transition_to(Submitted));
            assert!(!Submitted.can_transition_to(Draft));
        }

        #[test]
        fn default_is_draft() {
            assert_eq!(ShipmentStatus::default(), ShipmentStatus::Draft);
        }
    }

    mod tracking_status {
        use super::*;

        #[test]
        fn from_provider_is_lenient() {
            assert_eq!(
                TrackingStatus::from_provider("OUT_FOR_DELIVERY"),
                TrackingStatus::OutForDelivery
            );
            assert_eq!(
                TrackingStatus::from_provider("Picked up"),
                TrackingStatus::InTransit
            );
            assert_eq!(
                TrackingStatus::from_provider("???"),
                TrackingStatus::Unknown
            );
        }

        #[test]
        fn from_str_is_strict() {
            assert!("DELIVERED".parse::<TrackingStatus>().is_ok());
            assert!("???".parse::<TrackingStatus>().is_err());
        }

        #[test]
        fn serde_uses_screaming_snake_case() {
            let json = serde_json::to_string(&TrackingStatus::OutForDelivery).unwrap();
            assert_eq!(json, "\"OUT_FOR_DELIVERY\"");
        }
    }
}
