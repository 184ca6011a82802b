//! # In-Memory Shipment Repository
//!
//! In-memory implementation of [`ShipmentRepository`].
//!
//! Uses a thread-safe `HashMap` for storage. This is the reference
//! implementation; the real document store lives in the surrounding
//! application and only has to satisfy the same port.

use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::ShipmentId;
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, ShipmentRepository,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ShipmentRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryShipmentRepository {
    storage: Arc<RwLock<HashMap<ShipmentId, Shipment>>>,
}

impl InMemoryShipmentRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all shipments.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

#[async_trait]
impl ShipmentRepository for InMemoryShipmentRepository {
    async fn insert(&self, shipment: &Shipment) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        if storage.contains_key(shipment.id()) {
            return Err(RepositoryError::duplicate(
                "Shipment",
                shipment.id().as_str(),
            ));
        }
        storage.insert(shipment.id().clone(), shipment.clone());
        Ok(())
    }

    async fn save(&self, shipment: &Shipment) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(shipment.id().clone(), shipment.clone());
        Ok(())
    }

    async fn get(&self, id: &ShipmentId) -> RepositoryResult<Option<Shipment>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Shipment>> {
        let storage = self.storage.read().await;
        Ok(storage.values().cloned().collect())
    }

    async fn find_awaiting_tracking(&self) -> RepositoryResult<Vec<Shipment>> {
        let storage = self.storage.read().await;
        let awaiting: Vec<Shipment> = storage
            .values()
            .filter(|s| s.needs_tracking_refresh())
            .cloned()
            .collect();
        Ok(awaiting)
    }

    async fn delete(&self, id: &ShipmentId) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        Ok(storage.remove(id).is_some())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}
