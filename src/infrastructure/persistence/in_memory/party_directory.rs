//! # In-Memory Party Directory
//!
//! In-memory implementation of [`PartyDirectory`].
//!
//! Address and contact records are keyed by document name; per-party
//! defaults are keyed by party type and party name.

use crate::domain::value_objects::{AddressRecord, ContactRecord, PartyType};
use crate::infrastructure::persistence::traits::{PartyDirectory, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct DirectoryState {
    addresses: HashMap<String, AddressRecord>,
    contacts: HashMap<String, ContactRecord>,
    default_addresses: HashMap<(PartyType, String), String>,
    default_contacts: HashMap<(PartyType, String), String>,
    company_contact: Option<ContactRecord>,
}

/// In-memory implementation of [`PartyDirectory`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPartyDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryPartyDirectory {
    /// Creates a new empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an address record under its document name.
    pub async fn put_address(&self, record: AddressRecord) {
        let mut state = self.state.write().await;
        state.addresses.insert(record.name.clone(), record);
    }

    /// Stores a contact record under its document name.
    pub async fn put_contact(&self, record: ContactRecord) {
        let mut state = self.state.write().await;
        state.contacts.insert(record.name.clone(), record);
    }

    /// Sets a party's default shipping address.
    pub async fn set_default_shipping_address(
        &self,
        party_type: PartyType,
        party_name: impl Into<String>,
        address_name: impl Into<String>,
    ) {
        let mut state = self.state.write().await;
        state
            .default_addresses
            .insert((party_type, party_name.into()), address_name.into());
    }

    /// Sets a party's default contact.
    pub async fn set_default_contact(
        &self,
        party_type: PartyType,
        party_name: impl Into<String>,
        contact_name: impl Into<String>,
    ) {
        let mut state = self.state.write().await;
        state
            .default_contacts
            .insert((party_type, party_name.into()), contact_name.into());
    }

    /// Sets the company contact.
    pub async fn set_company_contact(&self, record: ContactRecord) {
        let mut state = self.state.write().await;
        state.company_contact = Some(record);
    }
}

#[async_trait]
impl PartyDirectory for InMemoryPartyDirectory {
    async fn address(&self, name: &str) -> RepositoryResult<Option<AddressRecord>> {
        let state = self.state.read().await;
        Ok(state.addresses.get(name).cloned())
    }

    async fn contact(&self, name: &str) -> RepositoryResult<Option<ContactRecord>> {
        let state = self.state.read().await;
        Ok(state.contacts.get(name).cloned())
    }

    async fn default_shipping_address(
        &self,
        party_type: PartyType,
        party_name: &str,
    ) -> RepositoryResult<Option<String>> {
        let state = self.state.read().await;
        Ok(state
            .default_addresses
            .get(&(party_type, party_name.to_string()))
            .cloned())
    }

    async fn default_contact(
        &self,
        party_type: PartyType,
        party_name: &str,
    ) -> RepositoryResult<Option<String>> {
        let state = self.state.read().await;
        Ok(state
            .default_contacts
            .get(&(party_type, party_name.to_string()))
            .cloned())
    }

    async fn company_contact(&self) -> RepositoryResult<Option<ContactRecord>> {
        let state = self.state.read().await;
        Ok(state.company_contact.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn address_record(name: &str) -> AddressRecord {
        AddressRecord {
            name: name.to_string(),
            title: "Office".to_string(),
            line1: "Street 1".to_string(),
            line2: None,
            city: "Hamburg".to_string(),
            postal_code: Some("20095".to_string()),
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

    #[tokio::test]
    async fn address_lookup() {
        let directory = InMemoryPartyDirectory::new();
        directory.put_address(address_record("ADR-1")).await;

        assert!(directory.address("ADR-1").await.unwrap().is_some());
        assert!(directory.address("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn party_defaults() {
        let directory = InMemoryPartyDirectory::new();
        directory
            .set_default_shipping_address(PartyType::Customer, "Alpha GmbH", "ADR-1")
            .await;
        directory
            .set_default_contact(PartyType::Customer, "Alpha GmbH", "CON-1")
            .await;

        assert_eq!(
            directory
                .default_shipping_address(PartyType::Customer, "Alpha GmbH")
                .await
                .unwrap()
                .as_deref(),
            Some("ADR-1")
        );
        assert_eq!(
            directory
                .default_contact(PartyType::Customer, "Alpha GmbH")
                .await
                .unwrap()
                .as_deref(),
            Some("CON-1")
        );
        assert!(
            directory
                .default_contact(PartyType::Supplier, "Alpha GmbH")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn company_contact() {
        let directory = InMemoryPartyDirectory::new();
        assert!(directory.company_contact().await.unwrap().is_none());

        directory.set_company_contact(contact_record("COMPANY")).await;
        assert!(directory.company_contact().await.unwrap().is_some());
    }
}
