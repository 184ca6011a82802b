//! # Rate Aggregation Engine
//!
//! Fan-out over the enabled carrier providers.
//!
//! This module provides the [`RateAggregationEngine`] which queries every
//! enabled provider concurrently for the same shipment data, merges the
//! returned quotes and sorts them ascending by total price. One provider
//! failing does not prevent quotes from the others; per-provider errors are
//! collected on the resulting [`RateSheet`].

use crate::domain::entities::quote::ShippingQuote;
use crate::infrastructure::providers::registry::ProviderRegistry;
use crate::infrastructure::providers::traits::RateRequest;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Configuration for rate aggregation.
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// Overall timeout for the whole fan-out in milliseconds.
    pub timeout_ms: u64,
    /// Per-provider timeout in milliseconds.
    pub per_provider_timeout_ms: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            per_provider_timeout_ms: 15000,
        }
    }
}

impl AggregationConfig {
    /// Creates a configuration with the specified overall timeout.
    #[must_use]
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Default::default()
        }
    }

    /// Sets the per-provider timeout.
    #[must_use]
    pub fn with_per_provider_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_provider_timeout_ms = timeout_ms;
        self
    }
}

/// Result of a rate fan-out: merged quotes sorted ascending by total price.
#[derive(Debug)]
pub struct RateSheet {
    /// Quotes sorted ascending by total price.
    pub quotes: Vec<ShippingQuote>,
    /// Number of providers queried.
    pub providers_queried: usize,
    /// Number of providers that responded.
    pub providers_responded: usize,
    /// Per-provider error messages from providers that failed.
    pub errors: Vec<String>,
}

impl RateSheet {
    /// Creates a rate sheet, sorting the quotes ascending by total price.
    ///
    /// Sorting is stable, so quotes with equal prices keep the order their
    /// providers returned them in.
    #[must_use]
    pub fn new(
        mut quotes: Vec<ShippingQuote>,
        providers_queried: usize,
        providers_responded: usize,
        errors: Vec<String>,
    ) -> Self {
        quotes.sort_by(|a, b| a.total_price().cmp(&b.total_price()));
        Self {
            quotes,
            providers_queried,
            providers_responded,
            errors,
        }
    }

    /// Returns the cheapest quote, if any.
    #[must_use]
    pub fn cheapest(&self) -> Option<&ShippingQuote> {
        self.quotes.first()
    }

    /// Returns true if at least one quote was collected.
    #[must_use]
    pub fn has_quotes(&self) -> bool {
        !self.quotes.is_empty()
    }
}

/// Error type for rate aggregation.
#[derive(Debug, Clone, Error)]
pub enum AggregationError {
    /// No providers are enabled in the settings.
    #[error("no shipping providers are enabled")]
    NoProvidersEnabled,

    /// The overall fan-out timeout was exceeded.
    #[error("rate collection timed out")]
    Timeout,

    /// Every enabled provider failed and no quotes were collected.
    #[error("all providers failed: {}", .0.join(", "))]
    AllProvidersFailed(Vec<String>),
}

/// Result type for aggregation operations.
pub type AggregationResult<T> = Result<T, AggregationError>;

/// Engine collecting and merging quotes from all enabled providers.
#[derive(Debug)]
pub struct RateAggregationEngine {
    registry: Arc<dyn ProviderRegistry>,
    config: AggregationConfig,
}

impl RateAggregationEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new(registry: Arc<dyn ProviderRegistry>, config: AggregationConfig) -> Self {
        Self { registry, config }
    }

    /// Creates a new engine with default configuration.
    #[must_use]
    pub fn with_defaults(registry: Arc<dyn ProviderRegistry>) -> Self {
        Self::new(registry, AggregationConfig::default())
    }

    /// Queries every enabled provider and returns the merged, sorted rate
    /// sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no providers are enabled
    /// - the overall timeout is exceeded
    /// - every provider failed and nothing was collected
    ///
    /// An empty sheet with no errors is not a failure; the providers simply
    /// offer no services for the route.
    pub async fn collect(&self, request: &RateRequest) -> AggregationResult<RateSheet> {
        let providers = self.registry.enabled_providers().await;
        let providers_queried = providers.len();

        if providers.is_empty() {
            return Err(AggregationError::NoProvidersEnabled);
        }

        let overall_timeout = Duration::from_millis(self.config.timeout_ms);
        let collection = timeout(overall_timeout, self.collect_from_providers(request)).await;

        let (quotes, errors) = match collection {
            Ok(result) => result,
            Err(_) => return Err(AggregationError::Timeout),
        };

        let providers_responded = providers_queried - errors.len();

        if quotes.is_empty() && !errors.is_empty() {
            return Err(AggregationError::AllProvidersFailed(errors));
        }

        Ok(RateSheet::new(
            quotes,
            providers_queried,
            providers_responded,
            errors,
        ))
    }

    /// Queries all providers concurrently, merging quotes and collecting
    /// per-provider errors.
    async fn collect_from_providers(&self, request: &RateRequest) -> (Vec<ShippingQuote>, Vec<String>) {
        let providers = self.registry.enabled_providers().await;
        let mut handles = Vec::with_capacity(providers.len());

        for provider in providers {
            let request_clone = request.clone();
            let per_provider_timeout = Duration::from_millis(self.config.per_provider_timeout_ms);

            let handle = tokio::spawn(async move {
                let provider_id = provider.provider_id().clone();
                match timeout(per_provider_timeout, provider.fetch_rates(&request_clone)).await {
                    Ok(Ok(quotes)) => Ok(quotes),
                    Ok(Err(e)) => Err(format!("{provider_id}: {e}")),
                    Err(_) => Err(format!("{provider_id}: rate request timed out")),
                }
            });

            handles.push(handle);
        }

        let mut quotes = Vec::new();
        let mut errors = Vec::new();

        for handle in handles {
            match handle.await {
                Ok(Ok(provider_quotes)) => quotes.extend(provider_quotes),
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "provider failed during rate collection");
                    errors.push(e);
                }
                Err(e) => errors.push(format!("task panicked: {e}")),
            }
        }

        (quotes, errors)
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::parcel::Parcel;
    use crate::domain::entities::shipment::{BookingConfirmation, TrackingUpdate};
    use crate::domain::value_objects::{
        Address, AddressRecord, Contact, ContactRecord, Money, ProviderId,
    };
    use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
    use crate::infrastructure::providers::registry::StaticProviderRegistry;
    use crate::infrastructure::providers::traits::{BookingRequest, ProviderAdapter};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    #[derive(Debug)]
    struct MockProviderAdapter {
        provider_id: ProviderId,
        prices: Vec<f64>,
        fail: bool,
        delay_ms: u64,
    }

    impl MockProviderAdapter {
        fn successful(id: &str, prices: &[f64]) -> Self {
            Self {
                provider_id: ProviderId::new(id),
                prices: prices.to_vec(),
                fail: false,
                delay_ms: 0,
            }
        }

        fn failing(id: &str) -> Self {
            Self {
                provider_id: ProviderId::new(id),
                prices: Vec::new(),
                fail: true,
                delay_ms: 0,
            }
        }

        fn slow(id: &str, delay_ms: u64) -> Self {
            Self {
                provider_id: ProviderId::new(id),
                prices: vec![1.0],
                fail: false,
                delay_ms,
            }
        }
    }

    #[async_trait]
    impl ProviderAdapter for MockProviderAdapter {
        fn provider_id(&self) -> &ProviderId {
            &self.provider_id
        }

        fn timeout_ms(&self) -> u64 {
            1000
        }

        async fn fetch_rates(&self, _request: &RateRequest) -> ProviderResult<Vec<ShippingQuote>> {
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.fail {
                return Err(ProviderError::rates_unavailable("no services"));
            }
            Ok(self
                .prices
                .iter()
                .map(|price| {
                    ShippingQuote::new(
                        self.provider_id.clone(),
                        "Carrier",
                        "Service",
                        "svc",
                        Money::new(*price).unwrap(),
                    )
                })
                .collect())
        }

        async fn create_booking(
            &self,
            _request: &BookingRequest,
        ) -> ProviderResult<BookingConfirmation> {
            unimplemented!()
        }

        async fn fetch_label(&self, _shipment_ref: &str) -> ProviderResult<Vec<String>> {
            unimplemented!()
        }

        async fn fetch_tracking(&self, _shipment_ref: &str) -> ProviderResult<TrackingUpdate> {
            unimplemented!()
        }
    }

    fn rate_request() -> RateRequest {
        let address = Address::from_record(&AddressRecord {
            name: "ADR-1".to_string(),
            title: "Office".to_string(),
            line1: "Street 1".to_string(),
            line2: None,
            city: "Hamburg".to_string(),
            postal_code: Some("20095".to_string()),
            country: "Germany".to_string(),
            country_code: "DE".to_string(),
        })
        .unwrap();
        let contact = Contact::from_record(&ContactRecord {
            name: "CON-1".to_string(),
            first_name: "Max".to_string(),
            last_name: Some("Mustermann".to_string()),
            email: None,
            phone: Some("+49 40 5551234".to_string()),
            mobile: None,
            gender: None,
        })
        .unwrap();

        RateRequest {
            pickup_address: address.clone(),
            delivery_address: address,
            pickup_contact: contact.clone(),
            delivery_contact: contact,
            parcels: vec![Parcel::new(30, 20, 10, 2.5, 1).unwrap()],
            description_of_content: "Spare parts".to_string(),
            pickup_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            value_of_goods: Money::new(100.0).unwrap(),
        }
    }

    fn engine(providers: Vec<Arc<dyn ProviderAdapter>>) -> RateAggregationEngine {
        RateAggregationEngine::new(
            Arc::new(StaticProviderRegistry::new(providers)),
            AggregationConfig::with_timeout(5000),
        )
    }

    #[tokio::test]
    async fn collect_merges_and_sorts_across_providers() {
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(MockProviderAdapter::successful("LetMeShip", &[18.9, 12.5])),
            Arc::new(MockProviderAdapter::successful("Packlink", &[6.7, 25.0])),
        ];

        let sheet = engine(providers).collect(&rate_request()).await.unwrap();

        assert_eq!(sheet.providers_queried, 2);
        assert_eq!(sheet.providers_responded, 2);
        assert_eq!(sheet.quotes.len(), 4);

        let prices: Vec<Money> = sheet.quotes.iter().map(|q| q.total_price()).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);
        assert_eq!(
            sheet.cheapest().unwrap().total_price(),
            Money::new(6.7).unwrap()
        );
    }

    #[tokio::test]
    async fn one_provider_failing_is_not_fatal() {
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(MockProviderAdapter::successful("LetMeShip", &[18.9])),
            Arc::new(MockProviderAdapter::failing("Packlink")),
        ];

        let sheet = engine(providers).collect(&rate_request()).await.unwrap();

        assert_eq!(sheet.quotes.len(), 1);
        assert_eq!(sheet.providers_responded, 1);
        assert_eq!(sheet.errors.len(), 1);
        assert!(sheet.errors[0].contains("Packlink"));
    }

    #[tokio::test]
    async fn all_providers_failing_is_an_error() {
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
            Arc::new(MockProviderAdapter::failing("LetMeShip")),
            Arc::new(MockProviderAdapter::failing("Packlink")),
        ];

        let result = engine(providers).collect(&rate_request()).await;
        assert!(matches!(
            result,
            Err(AggregationError::AllProvidersFailed(_))
        ));
    }

    #[tokio::test]
    async fn no_providers_is_an_error() {
        let result = engine(Vec::new()).collect(&rate_request()).await;
        assert!(matches!(result, Err(AggregationError::NoProvidersEnabled)));
    }

    #[tokio::test]
    async fn overall_timeout() {
        let providers: Vec<Arc<dyn ProviderAdapter>> =
            vec![Arc::new(MockProviderAdapter::slow("LetMeShip", 500))];

        let engine = RateAggregationEngine::new(
            Arc::new(StaticProviderRegistry::new(providers)),
            AggregationConfig::with_timeout(50),
        );

        let result = engine.collect(&rate_request()).await;
        assert!(matches!(result, Err(AggregationError::Timeout)));
    }

    #[tokio::test]
    async fn empty_results_without_errors_are_ok() {
        let providers: Vec<Arc<dyn ProviderAdapter>> =
            vec![Arc::new(MockProviderAdapter::successful("LetMeShip", &[]))];

        let sheet = engine(providers).collect(&rate_request()).await.unwrap();
        assert!(!sheet.has_quotes());
        assert!(sheet.errors.is_empty());
    }

    #[test]
    fn aggregation_config_builder() {
        let config = AggregationConfig::with_timeout(5000).with_per_provider_timeout(3000);
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.per_provider_timeout_ms, 3000);
    }

    proptest! {
        /// Quotes come back sorted ascending regardless of input order.
        #[test]
        fn rate_sheet_sorts_ascending(prices in proptest::collection::vec(0.01f64..10_000.0, 0..32)) {
            let quotes: Vec<ShippingQuote> = prices
                .iter()
                .map(|price| {
                    ShippingQuote::new(
                        ProviderId::new("P"),
                        "Carrier",
                        "Service",
                        "svc",
                        Money::new((*price * 100.0).round() / 100.0).unwrap(),
                    )
                })
                .collect();

            let sheet = RateSheet::new(quotes, 1, 1, Vec::new());

            for pair in sheet.quotes.windows(2) {
                prop_assert!(pair[0].total_price() <= pair[1].total_price());
            }
        }
    }
}
