//! # Address Value Object
//!
//! Postal addresses as stored versus as sent to carrier providers.
//!
//! [`AddressRecord`] is the raw shape held by the document store; it may be
//! incomplete. [`Address`] is the validated, normalized form every provider
//! call requires: the postal code is mandatory and stripped of spaces, the
//! city is trimmed, and the country code is uppercased.
//!
//! # Examples
//!
//! ```
//! use parcelgate::domain::value_objects::address::{Address, AddressRecord};
//!
//! let record = AddressRecord {
//!     name: "ADR-0001".to_string(),
//!     title: "Warehouse North".to_string(),
//!     line1: "Industriestr. 5".to_string(),
//!     line2: None,
//!     city: " Hamburg ".to_string(),
//!     postal_code: Some("20095 ".to_string()),
//!     country: "Germany".to_string(),
//!     country_code: "de".to_string(),
//! };
//!
//! let address = Address::from_record(&record).unwrap();
//! assert_eq!(address.postal_code(), "20095");
//! assert_eq!(address.city(), "Hamburg");
//! assert_eq!(address.country_code(), "DE");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw address data as held by the document store.
///
/// No invariants; validation happens when converting to [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Document name of the address record.
    pub name: String,
    /// Human-readable address title.
    pub title: String,
    /// First address line.
    pub line1: String,
    /// Optional second address line.
    pub line2: Option<String>,
    /// City.
    pub city: String,
    /// Postal code; may be missing on incomplete records.
    pub postal_code: Option<String>,
    /// Country name.
    pub country: String,
    /// ISO country code.
    pub country_code: String,
}

/// A validated, normalized postal address.
///
/// # Invariants
///
/// - Postal code present and free of spaces
/// - City trimmed
/// - Country code uppercased
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    title: String,
    line1: String,
    line2: Option<String>,
    city: String,
    postal_code: String,
    country: String,
    country_code: String,
}

impl Address {
    /// Validates and normalizes a raw address record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingPostalCode` (naming the record) if the
    /// postal code is absent or blank.
    pub fn from_record(record: &AddressRecord) -> DomainResult<Self> {
        let postal_code = record
            .postal_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .ok_or_else(|| DomainError::missing_postal_code(&record.name))?;

        Ok(Self {
            title: record.title.clone(),
            line1: record.line1.clone(),
            line2: record.line2.clone(),
            city: record.city.trim().to_string(),
            postal_code: postal_code.replace(' ', ""),
            country: record.country.clone(),
            country_code: record.country_code.to_uppercase(),
        })
    }

    /// Returns the address title.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the first address line.
    #[inline]
    #[must_use]
    pub fn line1(&self) -> &str {
        &self.line1
    }

    /// Returns the second address line, if any.
    #[inline]
    #[must_use]
    pub fn line2(&self) -> Option<&str> {
        self.line2.as_deref()
    }

    /// Returns the city.
    #[inline]
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the normalized postal code.
    #[inline]
    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Returns the country name.
    #[inline]
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the uppercased ISO country code.
    #[inline]
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} {}, {}",
            self.line1, self.postal_code, self.city, self.country_code
        )
    }
}
