//! # Repository Traits
//!
//! Port definitions for the document store.
//!
//! The shipment and delivery note documents are owned by the surrounding
//! application; this module only defines the operations it needs from the
//! store. Implementations can use different backends; the crate ships
//! thread-safe in-memory implementations.
//!
//! # Available Ports
//!
//! - [`ShipmentRepository`]: persistence for shipment documents
//! - [`DeliveryNoteRepository`]: persistence for the delivery note fields
//!   this module writes
//! - [`PartyDirectory`]: address/contact lookup and per-party defaults

use crate::domain::entities::delivery_note::DeliveryNote;
use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::{
    AddressRecord, ContactRecord, DeliveryNoteId, PartyType, ShipmentId,
};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate entity.
    #[error("duplicate entity: {entity_type} with id {id} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence port for shipment documents.
#[async_trait]
pub trait ShipmentRepository: Send + Sync + fmt::Debug {
    /// Inserts a new shipment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if the id already exists.
    async fn insert(&self, shipment: &Shipment) -> RepositoryResult<()>;

    /// Saves (upserts) a shipment.
    async fn save(&self, shipment: &Shipment) -> RepositoryResult<()>;

    /// Returns the shipment with the given id, if any.
    async fn get(&self, id: &ShipmentId) -> RepositoryResult<Option<Shipment>>;

    /// Returns all shipments.
    async fn get_all(&self) -> RepositoryResult<Vec<Shipment>>;

    /// Returns all booked shipments that still need a tracking refresh.
    ///
    /// Booked, carrying a provider shipment reference, and not yet
    /// delivered; the daily sweep iterates exactly this set.
    async fn find_awaiting_tracking(&self) -> RepositoryResult<Vec<Shipment>>;

    /// Deletes a shipment; returns true if one was removed.
    async fn delete(&self, id: &ShipmentId) -> RepositoryResult<bool>;

    /// Returns the number of stored shipments.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Persistence port for the delivery note fields this module writes.
#[async_trait]
pub trait DeliveryNoteRepository: Send + Sync + fmt::Debug {
    /// Saves (upserts) a delivery note mirror.
    async fn save(&self, note: &DeliveryNote) -> RepositoryResult<()>;

    /// Returns the delivery note with the given id, if any.
    async fn get(&self, id: &DeliveryNoteId) -> RepositoryResult<Option<DeliveryNote>>;

    /// Returns the delivery notes for the given ids, skipping unknown ids.
    async fn get_many(&self, ids: &[DeliveryNoteId]) -> RepositoryResult<Vec<DeliveryNote>>;
}

/// Lookup port for address and contact records and per-party defaults.
///
/// Mirrors what the surrounding application knows about parties: which
/// address is a party's default shipping address, which contact is its
/// default contact, and who the company contact is when a shipment side is
/// the company itself.
#[async_trait]
pub trait PartyDirectory: Send + Sync + fmt::Debug {
    /// Returns the raw address record with the given document name.
    async fn address(&self, name: &str) -> RepositoryResult<Option<AddressRecord>>;

    /// Returns the raw contact record with the given document name.
    async fn contact(&self, name: &str) -> RepositoryResult<Option<ContactRecord>>;

    /// Returns the document name of a party's default shipping address.
    async fn default_shipping_address(
        &self,
        party_type: PartyType,
        party_name: &str,
    ) -> RepositoryResult<Option<String>>;

    /// Returns the document name of a party's default contact.
    async fn default_contact(
        &self,
        party_type: PartyType,
        party_name: &str,
    ) -> RepositoryResult<Option<String>>;

    /// Returns the contact used for company-side shipment legs.
    async fn company_contact(&self) -> RepositoryResult<Option<ContactRecord>>;
}
