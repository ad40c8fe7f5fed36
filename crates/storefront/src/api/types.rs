//! Wire types for the storefront REST backend.
//!
//! Most responses use the envelope `{status, message?, data?, count?}`. The
//! fulfillment endpoint is the exception and returns its payload bare.

use bharat_core::{CartItemId, Email, Price, Sku};
use serde::{Deserialize, Serialize};

/// Standard response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// `success` or `error`.
    #[serde(default)]
    pub status: Option<String>,
    /// Human-readable message, present on errors and some successes.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload.
    pub data: T,
    /// Number of items in `data` (list endpoints only).
    #[serde(default)]
    pub count: Option<usize>,
}

/// Error envelope used to extract the server message from non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
}

/// A product as served by the backend or the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku: Sku,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

/// Product list response payload plus its reported count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductList {
    pub products: Vec<Product>,
    /// Count reported by the backend, which may differ from `products.len()`.
    pub count: Option<usize>,
    /// Where the backend got the products from (`qikink` or `local`).
    pub source: Option<String>,
}

/// Raw product list envelope (carries the extra `source` field).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProductListEnvelope {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
    pub data: Vec<Product>,
}

/// Filters for the product list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub collection: Option<String>,
}

impl ProductQuery {
    /// Query pairs for the non-empty filters, in `category`, `collection` order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("category", self.category.as_deref()),
            ("collection", self.collection.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect()
    }
}

/// Body of `POST /cart/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartAddRequest {
    pub sku: Sku,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Line echoed back by `POST /cart/add`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartLine {
    pub sku: Sku,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub total_price: Option<Price>,
}

/// Response of `POST /cart/add`.
#[derive(Debug, Clone, Deserialize)]
pub struct CartAddResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cart_item: Option<CartLine>,
}

/// A shipping address. The backend forwards it to the fulfillment partner
/// without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

fn default_country() -> String {
    "IN".to_string()
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub sku: Sku,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Local cart entry the line came from; not sent to the backend.
    #[serde(skip)]
    pub cart_item_id: Option<CartItemId>,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest<'a> {
    pub customer_email: &'a Email,
    pub shipping_address: &'a ShippingAddress,
    pub items: &'a [OrderItem],
}

/// An order as reported by the backend.
///
/// `status` is passed through verbatim; the client does not interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub status: String,
    #[serde(default)]
    pub total: Option<Price>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// One event in a fulfillment timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentEvent {
    pub event: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Fulfillment status from the print-and-ship partner (not enveloped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentStatus {
    pub order_id: String,
    pub status: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub estimated_delivery: Option<String>,
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub events: Vec<FulfillmentEvent>,
}

/// Body of `POST /contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Response of `GET /qikink/status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionStatus {
    pub status: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub authenticated: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub last_check: Option<String>,
}
