//! # Money Value Object
//!
//! Non-negative decimal amount with checked arithmetic.
//!
//! Shipping prices and declared goods values are carried as [`Money`], a
//! wrapper over [`rust_decimal::Decimal`]. Construction rejects negative or
//! non-finite values; arithmetic is checked so provider payloads can never
//! silently overflow an amount.
//!
//! # Examples
//!
//! ```
//! use parcelgate::domain::value_objects::money::Money;
//!
//! let price = Money::new(12.99).unwrap();
//! let surcharge = Money::new(2.01).unwrap();
//!
//! let total = price.safe_add(surcharge).unwrap();
//! assert_eq!(total, Money::new(15.0).unwrap());
//! assert!(total > price);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative monetary amount.
///
/// # Invariants
///
/// - Never negative
/// - Arithmetic never wraps; overflow is an error
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a money amount from an `f64`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the value is negative or not
    /// representable as a decimal.
    pub fn new(value: f64) -> DomainResult<Self> {
        let decimal = Decimal::from_f64(value)
            .ok_or_else(|| DomainError::InvalidAmount(format!("{value} is not representable")))?;
        Self::from_decimal(decimal)
    }

    /// Creates a money amount from a decimal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the value is negative.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::InvalidAmount(format!(
                "{value} is negative"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the underlying decimal value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }

    /// Returns the amount as an `f64`, if representable.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }

    /// Returns true if the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Adds another amount, checking for overflow.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` on overflow.
    pub fn safe_add(self, other: Self) -> DomainResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidAmount("addition overflowed".to_string()))
    }

    /// Multiplies by a decimal factor, checking for overflow and sign.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` on overflow or if the result
    /// would be negative.
    pub fn safe_mul(self, factor: Decimal) -> DomainResult<Self> {
        let product = self
            .0
            .checked_mul(factor)
            .ok_or_else(|| DomainError::InvalidAmount("multiplication overflowed".to_string()))?;
        Self::from_decimal(product)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
