//! # In-Memory Delivery Note Repository
//!
//! In-memory implementation of [`DeliveryNoteRepository`].

use crate::domain::entities::delivery_note::DeliveryNote;
use crate::domain::value_objects::DeliveryNoteId;
use crate::infrastructure::persistence::traits::{DeliveryNoteRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`DeliveryNoteRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveryNoteRepository {
    storage: Arc<RwLock<HashMap<DeliveryNoteId, DeliveryNote>>>,
}

impl InMemoryDeliveryNoteRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeliveryNoteRepository for InMemoryDeliveryNoteRepository {
    async fn save(&self, note: &DeliveryNote) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(note.id().clone(), note.clone());
        Ok(())
    }

    async fn get(&self, id: &DeliveryNoteId) -> RepositoryResult<Option<DeliveryNote>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn get_many(&self, ids: &[DeliveryNoteId]) -> RepositoryResult<Vec<DeliveryNote>> {
        let storage = self.storage.read().await;
        Ok(ids.iter().filter_map(|id| storage.get(id).cloned()).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_and_get() {
        let repo = InMemoryDeliveryNoteRepository::new();
        let note = DeliveryNote::new(DeliveryNoteId::new("DN-1"));
        repo.save(&note).await.unwrap();

        assert!(repo.get(note.id()).await.unwrap().is_some());
        assert!(repo.get(&DeliveryNoteId::new("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_many_skips_unknown_ids() {
        let repo = InMemoryDeliveryNoteRepository::new();
        repo.save(&DeliveryNote::new(DeliveryNoteId::new("DN-1")))
            .await
            .unwrap();
        repo.save(&DeliveryNote::new(DeliveryNoteId::new("DN-2")))
            .await
            .unwrap();

        let notes = repo
            .get_many(&[
                DeliveryNoteId::new("DN-1"),
                DeliveryNoteId::new("missing"),
                DeliveryNoteId::new("DN-2"),
            ])
            .await
            .unwrap();

        assert_eq!(notes.len(), 2);
    }
}
