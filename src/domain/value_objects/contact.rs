//! # Contact Value Object
//!
//! Contact persons as stored versus as sent to carrier providers.
//!
//! [`ContactRecord`] is the raw shape held by the document store.
//! [`Contact`] is the validated, normalized form: the last name is
//! mandatory, the phone number falls back to the mobile number, the dialing
//! prefix is split off, and the remaining digits are stripped of separator
//! characters. Providers also expect a salutation, derived from the
//! recorded gender.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recorded gender of a contact, used only to derive the salutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other or undisclosed.
    Other,
}

/// Salutation title expected by carrier providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Salutation {
    /// "MR".
    Mr,
    /// "MS".
    Ms,
}

impl Salutation {
    /// Derives the salutation from an optional recorded gender.
    #[must_use]
    pub fn from_gender(gender: Option<Gender>) -> Self {
        match gender {
            Some(Gender::Male) => Self::Mr,
            _ => Self::Ms,
        }
    }
}

impl fmt::Display for Salutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mr => write!(f, "MR"),
            Self::Ms => write!(f, "MS"),
        }
    }
}

/// Raw contact data as held by the document store.
///
/// No invariants; validation happens when converting to [`Contact`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Document name of the contact record.
    pub name: String,
    /// First name.
    pub first_name: String,
    /// Last name; may be missing on incomplete records.
    pub last_name: Option<String>,
    /// E-mail address.
    pub email: Option<String>,
    /// Landline phone number.
    pub phone: Option<String>,
    /// Mobile phone number.
    pub mobile: Option<String>,
    /// Recorded gender.
    pub gender: Option<Gender>,
}

/// A validated, normalized contact person.
///
/// # Invariants
///
/// - Last name present
/// - A phone number present, split into dialing prefix and digits with
///   separators removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone_prefix: String,
    phone: String,
    salutation: Salutation,
}

impl Contact {
    /// Validates and normalizes a raw contact record.
    ///
    /// The phone number falls back to the mobile number. The first three
    /// characters become the dialing prefix; the remainder keeps only
    /// alphanumeric characters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingLastName` if the last name is absent or
    /// blank, and `DomainError::MissingPhone` if neither phone nor mobile
    /// number is usable. Both name the offending record.
    pub fn from_record(record: &ContactRecord) -> DomainResult<Self> {
        let last_name = record
            .last_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| DomainError::missing_last_name(&record.name))?;

        let number = record
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or_else(|| {
                record
                    .mobile
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
            })
            .ok_or_else(|| DomainError::missing_phone(&record.name))?;

        let phone_prefix: String = number.chars().take(3).collect();
        let phone: String = number
            .chars()
            .skip(3)
            .filter(char::is_ascii_alphanumeric)
            .collect();

        Ok(Self {
            first_name: record.first_name.clone(),
            last_name: last_name.to_string(),
            email: record.email.clone(),
            phone_prefix,
            phone,
            salutation: Salutation::from_gender(record.gender),
        })
    }

    /// Returns the first name.
    #[inline]
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    #[inline]
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the e-mail address, if any.
    #[inline]
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the dialing prefix.
    #[inline]
    #[must_use]
    pub fn phone_prefix(&self) -> &str {
        &self.phone_prefix
    }

    /// Returns the normalized phone number without the prefix.
    #[inline]
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the derived salutation.
    #[inline]
    #[must_use]
    pub fn salutation(&self) -> Salutation {
        self.salutation
    }

    /// Returns the full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.salutation, self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record() -> ContactRecord {
        ContactRecord {
            name: "CON-0001".to_string(),
            first_name: "Erika".to_string(),
            last_name: Some("Mustermann".to_string()),
            email: Some("erika@example.com".to_string()),
            phone: Some("+49 40 123-456".to_string()),
            mobile: None,
            gender: Some(Gender::Female),
        }
    }

    #[test]
    fn from_record_normalizes_phone() {
        let contact = Contact::from_record(&record()).unwrap();
        assert_eq!(contact.phone_prefix(), "+49");
        assert_eq!(contact.phone(), "40123456");
        assert_eq!(contact.salutation(), Salutation::Ms);
    }

    #[test]
    fn phone_falls_back_to_mobile() {
        let mut raw = record();
        raw.phone = None;
        raw.mobile = Some("+49 171 5554433".to_string());

        let contact = Contact::from_record(&raw).unwrap();
        assert_eq!(contact.phone_prefix(), "+49");
        assert_eq!(contact.phone(), "1715554433");
    }

    #[test]
    fn missing_last_name_is_rejected() {
        let mut raw = record();
        raw.last_name = Some("  ".to_string());

        let result = Contact::from_record(&raw);
        assert!(
            matches!(result, Err(DomainError::MissingLastName { ref contact }) if contact == "CON-0001")
        );
    }

    #[test]
    fn missing_phone_is_rejected() {
        let mut raw = record();
        raw.phone = None;
        raw.mobile = None;

        assert!(matches!(
            Contact::from_record(&raw),
            Err(DomainError::MissingPhone { .. })
        ));
    }

    #[test]
    fn salutation_from_gender() {
        assert_eq!(Salutation::from_gender(Some(Gender::Male)), Salutation::Mr);
        assert_eq!(Salutation::from_gender(Some(Gender::Female)), Salutation::Ms);
        assert_eq!(Salutation::from_gender(None), Salutation::Ms);
    }

    #[test]
    fn full_name_joins_parts() {
        let contact = Contact::from_record(&record()).unwrap();
        assert_eq!(contact.full_name(), "Erika Mustermann");
    }
}
