//! # Packlink Adapter
//!
//! Integration with the Packlink PRO shipping API.
//!
//! Packlink authenticates with a static `Authorization` API key. Service
//! search is a GET with bracketed query parameters; bookings, labels and
//! tracking are JSON endpoints keyed by the shipment reference.

use crate::domain::entities::quote::ShippingQuote;
use crate::domain::entities::shipment::{BookingConfirmation, TrackingUpdate};
use crate::domain::value_objects::{Address, Contact, Money, ProviderId, TrackingStatus};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::http_client::{AuthScheme, HttpClient};
use crate::infrastructure::providers::traits::{BookingRequest, ProviderAdapter, RateRequest};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Stable provider name for Packlink.
pub const PACKLINK_PROVIDER: &str = "Packlink";

/// Adapter for the Packlink PRO API.
#[derive(Debug, Clone)]
pub struct PacklinkAdapter {
    provider_id: ProviderId,
    client: HttpClient,
    base_url: String,
}

impl PacklinkAdapter {
    /// Creates a new adapter.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InternalError` if the HTTP client cannot be
    /// created.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_ms: u64,
    ) -> ProviderResult<Self> {
        let client =
            HttpClient::with_auth(timeout_ms, AuthScheme::api_key("Authorization", api_key))?;
        Ok(Self {
            provider_id: ProviderId::new(PACKLINK_PROVIDER),
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds the bracketed query parameters Packlink expects for a
    /// service search. Parcel lines with a count above one are expanded
    /// into individual packages.
    fn service_query(request: &RateRequest) -> Vec<(String, String)> {
        let mut params = vec![
            (
                "from[country]".to_string(),
                request.pickup_address.country_code().to_string(),
            ),
            (
                "from[zip]".to_string(),
                request.pickup_address.postal_code().to_string(),
            ),
            (
                "to[country]".to_string(),
                request.delivery_address.country_code().to_string(),
            ),
            (
                "to[zip]".to_string(),
                request.delivery_address.postal_code().to_string(),
            ),
        ];

        let mut index = 0;
        for parcel in &request.parcels {
            for _ in 0..parcel.count() {
                params.push((format!("packages[{index}][width]"), parcel.width_cm().to_string()));
                params.push((
                    format!("packages[{index}][height]"),
                    parcel.height_cm().to_string(),
                ));
                params.push((
                    format!("packages[{index}][length]"),
                    parcel.length_cm().to_string(),
                ));
                params.push((
                    format!("packages[{index}][weight]"),
                    parcel.weight_kg().to_string(),
                ));
                index += 1;
            }
        }
        params
    }
}

#[async_trait]
impl ProviderAdapter for PacklinkAdapter {
    fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    fn timeout_ms(&self) -> u64 {
        self.client.timeout_ms()
    }

    async fn fetch_rates(&self, request: &RateRequest) -> ProviderResult<Vec<ShippingQuote>> {
        let params = Self::service_query(request);
        let services: Vec<PacklinkService> = self
            .client
            .get_with_params(&self.url("/services"), &params)
            .await?;

        services
            .into_iter()
            .map(|service| service.into_quote(&self.provider_id))
            .collect()
    }

    async fn create_booking(&self, request: &BookingRequest) -> ProviderResult<BookingConfirmation> {
        let body = DraftRequest::from_booking_request(request);
        let response: DraftResponse = self.client.post(&self.url("/shipments"), &body).await?;

        if response.reference.is_empty() {
            return Err(ProviderError::booking_failed(
                "Packlink returned an empty shipment reference",
            ));
        }

        Ok(BookingConfirmation {
            service_provider: self.provider_id.clone(),
            carrier: request.quote.carrier().to_string(),
            carrier_service: request.quote.carrier_service().to_string(),
            shipment_ref: response.reference,
            amount: request.quote.total_price(),
            awb_number: None,
        })
    }

    async fn fetch_label(&self, shipment_ref: &str) -> ProviderResult<Vec<String>> {
        let labels: Vec<String> = self
            .client
            .get(&self.url(&format!("/shipments/{shipment_ref}/labels")))
            .await?;
        Ok(labels)
    }

    async fn fetch_tracking(&self, shipment_ref: &str) -> ProviderResult<TrackingUpdate> {
        let response: TrackResponse = self
            .client
            .get(&self.url(&format!("/shipments/{shipment_ref}/track")))
            .await?;

        let detail = response.history.last().map(|event| event.description.clone());

        Ok(TrackingUpdate {
            awb_number: response.tracking_number,
            status: TrackingStatus::from_provider(&response.state),
            detail,
            url: response.tracking_url,
        })
    }
}

// --- wire types ---

#[derive(Debug, Deserialize)]
struct PacklinkService {
    id: u64,
    carrier_name: String,
    name: String,
    price: PacklinkPrice,
    #[serde(default)]
    transit_hours: Option<u32>,
}

impl PacklinkService {
    fn into_quote(self, provider_id: &ProviderId) -> ProviderResult<ShippingQuote> {
        let total_price = Money::from_decimal(self.price.total_price).map_err(|e| {
            ProviderError::protocol_error(format!("invalid price in service search: {e}"))
        })?;

        let mut quote = ShippingQuote::new(
            provider_id.clone(),
            self.carrier_name,
            self.name,
            self.id.to_string(),
            total_price,
        );
        if let Some(hours) = self.transit_hours {
            quote = quote.with_estimated_delivery_days(hours.div_ceil(24));
        }
        Ok(quote)
    }
}

#[derive(Debug, Deserialize)]
struct PacklinkPrice {
    total_price: Decimal,
}

#[derive(Debug, Serialize)]
struct DraftRequest {
    service_id: String,
    content: String,
    contentvalue: f64,
    from: DraftAddress,
    to: DraftAddress,
    packages: Vec<DraftPackage>,
}

impl DraftRequest {
    fn from_booking_request(request: &BookingRequest) -> Self {
        let rate = &request.rate_request;
        let mut packages = Vec::new();
        for parcel in &rate.parcels {
            for _ in 0..parcel.count() {
                packages.push(DraftPackage {
                    width: parcel.width_cm(),
                    height: parcel.height_cm(),
                    length: parcel.length_cm(),
                    weight: parcel.weight_kg().to_f64().unwrap_or_default(),
                });
            }
        }

        Self {
            service_id: request.quote.service_code().to_string(),
            content: rate.description_of_content.clone(),
            contentvalue: rate.value_of_goods.to_f64().unwrap_or_default(),
            from: DraftAddress::new(&rate.pickup_address, &rate.pickup_contact),
            to: DraftAddress::new(&rate.delivery_address, &rate.delivery_contact),
            packages,
        }
    }
}

#[derive(Debug, Serialize)]
struct DraftAddress {
    country: String,
    zip_code: String,
    city: String,
    street1: String,
    name: String,
    surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    phone: String,
}

impl DraftAddress {
    fn new(address: &Address, contact: &Contact) -> Self {
        Self {
            country: address.country_code().to_string(),
            zip_code: address.postal_code().to_string(),
            city: address.city().to_string(),
            street1: address.line1().to_string(),
            name: contact.first_name().to_string(),
            surname: contact.last_name().to_string(),
            email: contact.email().map(ToString::to_string),
            phone: format!("{}{}", contact.phone_prefix(), contact.phone()),
        }
    }
}

#[derive(Debug, Serialize)]
struct DraftPackage {
    width: u32,
    height: u32,
    length: u32,
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct DraftResponse {
    reference: String,
}

#[derive(Debug, Deserialize)]
struct TrackResponse {
    state: String,
    #[serde(default)]
    tracking_number: Option<String>,
    #[serde(default)]
    tracking_url: Option<String>,
    #[serde(default)]
    history: Vec<TrackEvent>,
}

#[derive(Debug, Deserialize)]
struct TrackEvent {
    description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::parcel::Parcel;
    use crate::domain::value_objects::{AddressRecord, ContactRecord, Gender};
    use chrono::NaiveDate;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn address(name: &str, zip: &str) -> Address {
        Address::from_record(&AddressRecord {
            name: name.to_string(),
            title: name.to_string(),
            line1: "Calle Mayor 1".to_string(),
            line2: None,
            city: "Madrid".to_string(),
            postal_code: Some(zip.to_string()),
            country: "Spain".to_string(),
            country_code: "es".to_string(),
        })
        .unwrap()
    }

    fn contact() -> Contact {
        Contact::from_record(&ContactRecord {
            name: "CON-1".to_string(),
            first_name: "Ana".to_string(),
            last_name: Some("García".to_string()),
            email: Some("ana@example.com".to_string()),
            phone: None,
            mobile: Some("+34 600 111 222".to_string()),
            gender: Some(Gender::Female),
        })
        .unwrap()
    }

    fn rate_request() -> RateRequest {
        RateRequest {
            pickup_address: address("ADR-P", "28001"),
            delivery_address: address("ADR-D", "28002"),
            pickup_contact: contact(),
            delivery_contact: contact(),
            parcels: vec![Parcel::new(30, 20, 10, 2.5, 2).unwrap()],
            description_of_content: "Books".to_string(),
            pickup_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            value_of_goods: Money::new(80.0).unwrap(),
        }
    }

    fn adapter(server: &MockServer) -> PacklinkAdapter {
        PacklinkAdapter::new(server.uri(), "pl-api-key", 5000).unwrap()
    }

    #[test]
    fn service_query_expands_parcel_count() {
        let params = PacklinkAdapter::service_query(&rate_request());

        assert!(params.contains(&("from[zip]".to_string(), "28001".to_string())));
        assert!(params.contains(&("packages[0][weight]".to_string(), "2.5".to_string())));
        assert!(params.contains(&("packages[1][weight]".to_string(), "2.5".to_string())));
        assert!(!params.iter().any(|(k, _)| k == "packages[2][weight]"));
    }

    #[tokio::test]
    async fn fetch_rates_sends_api_key_and_parses_services() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services"))
            .and(header("Authorization", "pl-api-key"))
            .and(query_param("from[country]", "ES"))
            .and(query_param("to[zip]", "28002"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": 20149,
                    "carrier_name": "SEUR",
                    "name": "Classic",
                    "price": { "total_price": 6.70 },
                    "transit_hours": 48
                }
            ])))
            .mount(&server)
            .await;

        let quotes = adapter(&server).fetch_rates(&rate_request()).await.unwrap();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].carrier(), "SEUR");
        assert_eq!(quotes[0].service_code(), "20149");
        assert_eq!(quotes[0].total_price(), Money::new(6.70).unwrap());
        assert_eq!(quotes[0].estimated_delivery_days(), Some(2));
    }

    #[tokio::test]
    async fn create_booking_returns_reference() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/shipments"))
            .and(body_partial_json(serde_json::json!({
                "service_id": "20149",
                "content": "Books"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reference": "PL-2026-000123"
            })))
            .mount(&server)
            .await;

        let quote = ShippingQuote::new(
            ProviderId::new(PACKLINK_PROVIDER),
            "SEUR",
            "Classic",
            "20149",
            Money::new(6.70).unwrap(),
        );
        let request = BookingRequest::new(rate_request(), quote);

        let confirmation = adapter(&server).create_booking(&request).await.unwrap();

        assert_eq!(confirmation.shipment_ref, "PL-2026-000123");
        assert_eq!(confirmation.carrier, "SEUR");
        assert!(confirmation.awb_number.is_none());
    }

    #[tokio::test]
    async fn fetch_label_returns_urls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shipments/PL-2026-000123/labels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                "https://cdn.packlink.example/label.pdf"
            ])))
            .mount(&server)
            .await;

        let labels = adapter(&server).fetch_label("PL-2026-000123").await.unwrap();
        assert_eq!(labels.len(), 1);
    }

    #[tokio::test]
    async fn fetch_tracking_uses_latest_history_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shipments/PL-2026-000123/track"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "state": "IN_TRANSIT",
                "tracking_number": "SEUR-555",
                "tracking_url": "https://track.example/SEUR-555",
                "history": [
                    { "description": "Picked up" },
                    { "description": "Arrived at hub" }
                ]
            })))
            .mount(&server)
            .await;

        let update = adapter(&server).fetch_tracking("PL-2026-000123").await.unwrap();

        assert_eq!(update.status, TrackingStatus::InTransit);
        assert_eq!(update.detail.as_deref(), Some("Arrived at hub"));
        assert_eq!(update.awb_number.as_deref(), Some("SEUR-555"));
    }
}
