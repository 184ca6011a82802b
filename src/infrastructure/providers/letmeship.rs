//! # LetMeShip Adapter
//!
//! Integration with the LetMeShip carrier-aggregation API.
//!
//! LetMeShip authenticates with HTTP basic credentials and exposes JSON
//! endpoints for service availability, shipment creation, documents and
//! tracking. Wire types in this module mirror the provider's camelCase
//! payloads and never leak outside the adapter.

use crate::domain::entities::quote::ShippingQuote;
use crate::domain::entities::shipment::{BookingConfirmation, TrackingUpdate};
use crate::domain::value_objects::{Address, Contact, Money, ProviderId, TrackingStatus};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::http_client::{AuthScheme, HttpClient};
use crate::infrastructure::providers::traits::{BookingRequest, ProviderAdapter, RateRequest};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Stable provider name for LetMeShip.
pub const LETMESHIP_PROVIDER: &str = "LetMeShip";

/// Adapter for the LetMeShip API.
#[derive(Debug, Clone)]
pub struct LetMeShipAdapter {
    provider_id: ProviderId,
    client: HttpClient,
    base_url: String,
}

impl LetMeShipAdapter {
    /// Creates a new adapter.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InternalError` if the HTTP client cannot be
    /// created.
    pub fn new(
        base_url: impl Into<String>,
        api_id: impl Into<String>,
        api_password: impl Into<String>,
        timeout_ms: u64,
    ) -> ProviderResult<Self> {
        let client = HttpClient::with_auth(timeout_ms, AuthScheme::basic(api_id, api_password))?;
        Ok(Self {
            provider_id: ProviderId::new(LETMESHIP_PROVIDER),
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ProviderAdapter for LetMeShipAdapter {
    fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    fn timeout_ms(&self) -> u64 {
        self.client.timeout_ms()
    }

    async fn fetch_rates(&self, request: &RateRequest) -> ProviderResult<Vec<ShippingQuote>> {
        let body = AvailabilityRequest::from_rate_request(request);
        let response: AvailabilityResponse =
            self.client.post(&self.url("/available"), &body).await?;

        response
            .service_list
            .into_iter()
            .map(|entry| entry.into_quote(&self.provider_id))
            .collect()
    }

    async fn create_booking(&self, request: &BookingRequest) -> ProviderResult<BookingConfirmation> {
        let body = ShipmentApiRequest::from_booking_request(request);
        let response: ShipmentApiResponse =
            self.client.post(&self.url("/shipments"), &body).await?;

        if response.shipment_id.is_empty() {
            return Err(ProviderError::booking_failed(
                "LetMeShip returned an empty shipment id",
            ));
        }

        Ok(BookingConfirmation {
            service_provider: self.provider_id.clone(),
            carrier: request.quote.carrier().to_string(),
            carrier_service: request.quote.carrier_service().to_string(),
            shipment_ref: response.shipment_id,
            amount: request.quote.total_price(),
            awb_number: response.awb_number,
        })
    }

    async fn fetch_label(&self, shipment_ref: &str) -> ProviderResult<Vec<String>> {
        let response: DocumentsResponse = self
            .client
            .get(&self.url(&format!("/shipments/{shipment_ref}/documents")))
            .await?;
        Ok(response.label_url)
    }

    async fn fetch_tracking(&self, shipment_ref: &str) -> ProviderResult<TrackingUpdate> {
        let response: TrackingResponse = self
            .client
            .get_with_params(&self.url("/tracking"), &[("shipmentid", shipment_ref)])
            .await?;

        Ok(TrackingUpdate {
            awb_number: response.awb_number,
            status: TrackingStatus::from_provider(&response.status_code),
            detail: response.status_info,
            url: response.tracking_url,
        })
    }
}

// --- wire types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityRequest {
    pickup_info: SideInfo,
    delivery_info: SideInfo,
    shipment_details: ShipmentDetails,
}

impl AvailabilityRequest {
    fn from_rate_request(request: &RateRequest) -> Self {
        Self {
            pickup_info: SideInfo::new(&request.pickup_address, &request.pickup_contact),
            delivery_info: SideInfo::new(&request.delivery_address, &request.delivery_contact),
            shipment_details: ShipmentDetails::from_rate_request(request),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SideInfo {
    address: ApiAddress,
    person: ApiPerson,
}

impl SideInfo {
    fn new(address: &Address, contact: &Contact) -> Self {
        Self {
            address: ApiAddress {
                country_code: address.country_code().to_string(),
                zip: address.postal_code().to_string(),
                city: address.city().to_string(),
                street: address.line1().to_string(),
                address_info: address.line2().map(ToString::to_string),
            },
            person: ApiPerson {
                title: contact.salutation().to_string(),
                first_name: contact.first_name().to_string(),
                last_name: contact.last_name().to_string(),
                email: contact.email().map(ToString::to_string),
                phone_prefix: contact.phone_prefix().to_string(),
                phone_number: contact.phone().to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiAddress {
    country_code: String,
    zip: String,
    city: String,
    street: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    address_info: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiPerson {
    title: String,
    first_name: String,
    last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    phone_prefix: String,
    phone_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShipmentDetails {
    shipment_type: &'static str,
    content_description: String,
    pickup_date: NaiveDate,
    goods_value: f64,
    parcel_list: Vec<ApiParcel>,
}

impl ShipmentDetails {
    fn from_rate_request(request: &RateRequest) -> Self {
        Self {
            shipment_type: "PARCEL",
            content_description: request.description_of_content.clone(),
            pickup_date: request.pickup_date,
            goods_value: request.value_of_goods.to_f64().unwrap_or_default(),
            parcel_list: request
                .parcels
                .iter()
                .map(|p| ApiParcel {
                    length: p.length_cm(),
                    width: p.width_cm(),
                    height: p.height_cm(),
                    weight: p.weight_kg().to_f64().unwrap_or_default(),
                    quantity: p.count(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiParcel {
    length: u32,
    width: u32,
    height: u32,
    weight: f64,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityResponse {
    #[serde(default)]
    service_list: Vec<ServiceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceEntry {
    base_service_details: BaseServiceDetails,
}

impl ServiceEntry {
    fn into_quote(self, provider_id: &ProviderId) -> ProviderResult<ShippingQuote> {
        let details = self.base_service_details;
        let total_price = Money::from_decimal(details.price_info.total_price).map_err(|e| {
            ProviderError::protocol_error(format!("invalid price in service list: {e}"))
        })?;

        let mut quote = ShippingQuote::new(
            provider_id.clone(),
            details.carrier,
            details.name,
            details.id.to_string(),
            total_price,
        );
        if let Some(days) = details.transit_time_days {
            quote = quote.with_estimated_delivery_days(days);
        }
        Ok(quote)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BaseServiceDetails {
    id: u64,
    name: String,
    carrier: String,
    price_info: PriceInfo,
    #[serde(default)]
    transit_time_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceInfo {
    total_price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShipmentApiRequest {
    pickup_info: SideInfo,
    delivery_info: SideInfo,
    shipment_details: ShipmentDetails,
    service: ServiceSelection,
    label_email: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipment_notification_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tracking_notification_email: Option<String>,
}

impl ShipmentApiRequest {
    fn from_booking_request(request: &BookingRequest) -> Self {
        let rate = &request.rate_request;
        Self {
            pickup_info: SideInfo::new(&rate.pickup_address, &rate.pickup_contact),
            delivery_info: SideInfo::new(&rate.delivery_address, &rate.delivery_contact),
            shipment_details: ShipmentDetails::from_rate_request(rate),
            service: ServiceSelection {
                id: request.quote.service_code().to_string(),
            },
            label_email: true,
            shipment_notification_email: request.shipment_notification_email.clone(),
            tracking_notification_email: request.tracking_notification_email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceSelection {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShipmentApiResponse {
    shipment_id: String,
    #[serde(default)]
    awb_number: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentsResponse {
    #[serde(default)]
    label_url: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackingResponse {
    status_code: String,
    #[serde(default)]
    status_info: Option<String>,
    #[serde(default)]
    tracking_url: Option<String>,
    #[serde(default)]
    awb_number: Option<String>,
}
