//! # Party Resolution
//!
//! Resolves a shipment's address and contact references into the validated
//! forms every provider call needs.
//!
//! The shipment document stores address and contact *names*; the actual
//! records live in the [`PartyDirectory`]. Resolution loads them, applies
//! the normalization rules (postal code mandatory, last name mandatory) and
//! picks the company contact for company-side legs. The same port also
//! answers the UI's "default address/contact for this party" lookups.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::shipment::{Party, Shipment};
use crate::domain::value_objects::{Address, Contact, PartyType};
use crate::infrastructure::persistence::traits::PartyDirectory;
use crate::infrastructure::providers::traits::RateRequest;
use std::sync::Arc;

/// Resolver over the party directory.
#[derive(Debug, Clone)]
pub struct PartyResolver {
    directory: Arc<dyn PartyDirectory>,
}

impl PartyResolver {
    /// Creates a new resolver.
    #[must_use]
    pub fn new(directory: Arc<dyn PartyDirectory>) -> Self {
        Self { directory }
    }

    /// Builds the normalized rate request for a shipment.
    ///
    /// # Errors
    ///
    /// Returns a not found error if a referenced address or contact record
    /// does not exist, and the corresponding domain error if a record fails
    /// validation (missing postal code, missing last name).
    pub async fn resolve_rate_request(&self, shipment: &Shipment) -> ApplicationResult<RateRequest> {
        let pickup_address = self.resolve_address(shipment.pickup_address_name()).await?;
        let delivery_address = self
            .resolve_address(shipment.delivery_address_name())
            .await?;
        let pickup_contact = self
            .resolve_contact(shipment.pickup(), shipment.pickup_contact_name())
            .await?;
        let delivery_contact = self
            .resolve_contact(shipment.delivery(), shipment.delivery_contact_name())
            .await?;

        Ok(RateRequest {
            pickup_address,
            delivery_address,
            pickup_contact,
            delivery_contact,
            parcels: shipment.parcels().to_vec(),
            description_of_content: shipment.description_of_content().to_string(),
            pickup_date: shipment.pickup_date(),
            value_of_goods: shipment.value_of_goods(),
        })
    }

    /// Loads and validates the address with the given document name.
    ///
    /// # Errors
    ///
    /// Returns a not found error if the record does not exist and
    /// `DomainError::MissingPostalCode` if it fails validation.
    pub async fn resolve_address(&self, name: &str) -> ApplicationResult<Address> {
        let record = self
            .directory
            .address(name)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Address", name))?;
        Ok(Address::from_record(&record)?)
    }

    /// Resolves the contact for one side of a shipment.
    ///
    /// Company-side legs use the company contact; other legs require a
    /// contact reference on the shipment.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a non-company leg has no contact
    /// reference, a not found error if the record does not exist, and
    /// `DomainError::MissingLastName`/`MissingPhone` if it fails
    /// validation.
    pub async fn resolve_contact(
        &self,
        party: &Party,
        contact_name: Option<&str>,
    ) -> ApplicationResult<Contact> {
        let record = if party.party_type().is_company() {
            self.directory
                .company_contact()
                .await?
                .ok_or_else(|| ApplicationError::not_found("Contact", "company contact"))?
        } else {
            let name = contact_name.ok_or_else(|| {
                ApplicationError::validation(format!("contact is required for {party}"))
            })?;
            self.directory
                .contact(name)
                .await?
                .ok_or_else(|| ApplicationError::not_found("Contact", name))?
        };
        Ok(Contact::from_record(&record)?)
    }

    /// Returns the document name of a party's default shipping address.
    ///
    /// # Errors
    ///
    /// Returns a not found error if the party has no default shipping
    /// address.
    pub async fn default_address_name(
        &self,
        party_type: PartyType,
        party_name: &str,
    ) -> ApplicationResult<String> {
        self.directory
            .default_shipping_address(party_type, party_name)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Address", party_name))
    }

    /// Returns the document name of a party's default contact.
    ///
    /// # Errors
    ///
    /// Returns a not found error if the party has no default contact.
    pub async fn default_contact_name(
        &self,
        party_type: PartyType,
        party_name: &str,
    ) -> ApplicationResult<String> {
        self.directory
            .default_contact(party_type, party_name)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Contact", party_name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::parcel::Parcel;
    use crate::domain::errors::DomainError;
    use crate::domain::value_objects::{AddressRecord, ContactRecord, Money, ShipmentId};
    use crate::infrastructure::persistence::in_memory::InMemoryPartyDirectory;
    use chrono::NaiveDate;

    fn address_record(name: &str, postal_code: Option<&str>) -> AddressRecord {
        AddressRecord {
            name: name.to_string(),
            title: "Office".to_string(),
            line1: "Street 1".to_string(),
            line2: None,
            city: "Hamburg".to_string(),
            postal_code: postal_code.map(ToString::to_string),
            country: "Germany".to_string(),
            country_code: "DE".to_string(),
        }
    }

    fn contact_record(name: &str) -> ContactRecord {
        ContactRecord {
            name: name.to_string(),
            first_name: "Max".to_string(),
            last_name: Some("Mustermann".to_string()),
            email: None,
            phone: Some("+49 40 5551234".to_string()),
            mobile: None,
            gender: None,
        }
    }

    async fn directory() -> Arc<InMemoryPartyDirectory> {
        let directory = Arc::new(InMemoryPartyDirectory::new());
        directory
            .put_address(address_record("ADR-P", Some("20095")))
            .await;
        directory
            .put_address(address_record("ADR-D", Some("80331")))
            .await;
        directory.put_contact(contact_record("CON-D")).await;
        directory.set_company_contact(contact_record("COMPANY")).await;
        directory
    }

    fn shipment() -> Shipment {
        Shipment::builder(
            ShipmentId::new("S-1"),
            Party::company(),
            Party::new(PartyType::Customer, "Alpha GmbH"),
            "ADR-P",
            "ADR-D",
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            Money::new(100.0).unwrap(),
        )
        .delivery_contact_name("CON-D")
        .parcel(Parcel::new(30, 20, 10, 2.5, 1).unwrap())
        .build()
    }

    #[tokio::test]
    async fn resolve_rate_request_uses_company_contact_for_company_leg() {
        let resolver = PartyResolver::new(directory().await);
        let request = resolver.resolve_rate_request(&shipment()).await.unwrap();

        assert_eq!(request.pickup_address.postal_code(), "20095");
        assert_eq!(request.delivery_address.postal_code(), "80331");
        assert_eq!(request.parcels.len(), 1);
        // Both contacts validate to the same test person here; the pickup
        // one came from the company contact slot.
        assert_eq!(request.pickup_contact.last_name(), "Mustermann");
    }

    #[tokio::test]
    async fn missing_address_record_is_not_found() {
        let directory = Arc::new(InMemoryPartyDirectory::new());
        let resolver = PartyResolver::new(directory);

        let result = resolver.resolve_address("ADR-MISSING").await;
        assert!(matches!(
            result,
            Err(ApplicationError::NotFound { entity: "Address", .. })
        ));
    }

    #[tokio::test]
    async fn address_without_postal_code_fails_validation() {
        let directory = Arc::new(InMemoryPartyDirectory::new());
        directory.put_address(address_record("ADR-1", None)).await;
        let resolver = PartyResolver::new(directory);

        let result = resolver.resolve_address("ADR-1").await;
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::MissingPostalCode { .. }))
        ));
    }

    #[tokio::test]
    async fn non_company_leg_requires_contact_reference() {
        let resolver = PartyResolver::new(directory().await);
        let party = Party::new(PartyType::Customer, "Alpha GmbH");

        let result = resolver.resolve_contact(&party, None).await;
        assert!(matches!(result, Err(ApplicationError::Validation(_))));
    }

    #[tokio::test]
    async fn company_leg_without_company_contact_is_not_found() {
        let directory = Arc::new(InMemoryPartyDirectory::new());
        let resolver = PartyResolver::new(directory);

        let result = resolver.resolve_contact(&Party::company(), None).await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn default_lookups() {
        let directory = directory().await;
        directory
            .set_default_shipping_address(PartyType::Customer, "Alpha GmbH", "ADR-D")
            .await;
        let resolver = PartyResolver::new(directory);

        let name = resolver
            .default_address_name(PartyType::Customer, "Alpha GmbH")
            .await
            .unwrap();
        assert_eq!(name, "ADR-D");

        let result = resolver
            .default_contact_name(PartyType::Customer, "Alpha GmbH")
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }
}
