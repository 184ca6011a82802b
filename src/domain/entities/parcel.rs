//! # Parcel Entity
//!
//! A physical parcel line on a shipment.
//!
//! # Examples
//!
//! ```
//! use parcelgate::domain::entities::parcel::Parcel;
//!
//! let parcel = Parcel::new(30, 20, 10, 2.5, 1).unwrap();
//! assert_eq!(parcel.count(), 1);
//! assert!(Parcel::new(30, 20, 10, 0.0, 1).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parcel with dimensions, weight and count.
///
/// # Invariants
///
/// - Weight strictly positive
/// - Count at least 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Length in centimeters.
    length_cm: u32,
    /// Width in centimeters.
    width_cm: u32,
    /// Height in centimeters.
    height_cm: u32,
    /// Weight in kilograms.
    weight_kg: Decimal,
    /// Number of identical parcels on this line.
    count: u32,
}

impl Parcel {
    /// Creates a parcel with validation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParcelWeight` if the weight is zero or
    /// negative (or not representable), and `DomainError::InvalidParcelCount`
    /// if the count is zero.
    pub fn new(
        length_cm: u32,
        width_cm: u32,
        height_cm: u32,
        weight_kg: f64,
        count: u32,
    ) -> DomainResult<Self> {
        let weight =
            Decimal::from_f64(weight_kg).ok_or(DomainError::InvalidParcelWeight)?;
        Self::from_parts(length_cm, width_cm, height_cm, weight, count)
    }

    /// Creates a parcel from a decimal weight.
    ///
    /// # Errors
    ///
    /// Same validation as [`Parcel::new`].
    pub fn from_parts(
        length_cm: u32,
        width_cm: u32,
        height_cm: u32,
        weight_kg: Decimal,
        count: u32,
    ) -> DomainResult<Self> {
        if weight_kg <= Decimal::ZERO {
            return Err(DomainError::InvalidParcelWeight);
        }
        if count == 0 {
            return Err(DomainError::InvalidParcelCount);
        }
        Ok(Self {
            length_cm,
            width_cm,
            height_cm,
            weight_kg,
            count,
        })
    }

    /// Returns the length in centimeters.
    #[inline]
    #[must_use]
    pub fn length_cm(&self) -> u32 {
        self.length_cm
    }

    /// Returns the width in centimeters.
    #[inline]
    #[must_use]
    pub fn width_cm(&self) -> u32 {
        self.width_cm
    }

    /// Returns the height in centimeters.
    #[inline]
    #[must_use]
    pub fn height_cm(&self) -> u32 {
        self.height_cm
    }

    /// Returns the weight in kilograms.
    #[inline]
    #[must_use]
    pub fn weight_kg(&self) -> Decimal {
        self.weight_kg
    }

    /// Returns the parcel count.
    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns true if the weight invariant holds.
    #[must_use]
    pub fn has_valid_weight(&self) -> bool {
        self.weight_kg > Decimal::ZERO
    }
}

impl fmt::Display for Parcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{}cm {}kg x{}",
            self.length_cm, self.width_cm, self.height_cm, self.weight_kg, self.count
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_valid_parcel() {
        let parcel = Parcel::new(30, 20, 10, 2.5, 2).unwrap();
        assert_eq!(parcel.length_cm(), 30);
        assert_eq!(parcel.count(), 2);
        assert!(parcel.has_valid_weight());
    }

    #[test]
    fn zero_weight_is_rejected() {
        assert!(matches!(
            Parcel::new(30, 20, 10, 0.0, 1),
            Err(DomainError::InvalidParcelWeight)
        ));
    }

    #[test]
    fn negative_weight_is_rejected() {
        assert!(matches!(
            Parcel::new(30, 20, 10, -1.0, 1),
            Err(DomainError::InvalidParcelWeight)
        ));
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(matches!(
            Parcel::new(30, 20, 10, 1.0, 0),
            Err(DomainError::InvalidParcelCount)
        ));
    }

    #[test]
    fn display_format() {
        let parcel = Parcel::new(30, 20, 10, 2.5, 1).unwrap();
        assert_eq!(parcel.to_string(), "30x20x10cm 2.5kg x1");
    }
}
