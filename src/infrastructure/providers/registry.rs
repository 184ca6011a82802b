//! # Provider Registry
//!
//! Lookup of enabled carrier provider adapters.
//!
//! The registry is the seam between configuration ("which providers are
//! enabled") and the services that fan out to them. Only enabled providers
//! are registered; a provider disabled in the settings never appears here.

use crate::domain::value_objects::ProviderId;
use crate::infrastructure::providers::traits::ProviderAdapter;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Trait for provider lookup.
#[async_trait]
pub trait ProviderRegistry: Send + Sync + fmt::Debug {
    /// Returns all enabled provider adapters.
    async fn enabled_providers(&self) -> Vec<Arc<dyn ProviderAdapter>>;

    /// Returns the adapter registered under `provider_id`, if any.
    async fn get(&self, provider_id: &ProviderId) -> Option<Arc<dyn ProviderAdapter>>;
}

/// Registry over a fixed adapter list built at startup.
#[derive(Debug, Clone)]
pub struct StaticProviderRegistry {
    providers: Vec<Arc<dyn ProviderAdapter>>,
}

impl StaticProviderRegistry {
    /// Creates a registry over the given adapters.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { providers }
    }

    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl ProviderRegistry for StaticProviderRegistry {
    async fn enabled_providers(&self) -> Vec<Arc<dyn ProviderAdapter>> {
        self.providers.clone()
    }

    async fn get(&self, provider_id: &ProviderId) -> Option<Arc<dyn ProviderAdapter>> {
        self.providers
            .iter()
            .find(|p| p.provider_id() == provider_id)
            .cloned()
    }
}
