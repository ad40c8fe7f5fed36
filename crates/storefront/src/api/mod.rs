//! REST client for the storefront backend.
//!
//! # Architecture
//!
//! - Stateless: the client only performs HTTP requests and decodes responses
//! - Every method returns a structured [`ApiError`]; turning failures into
//!   "use the fallback" decisions is the page controller's job
//! - No retries, no idempotency keys. Requests only time out when a timeout
//!   is configured
//!
//! # Example
//!
//! ```rust,ignore
//! use bharat_storefront::api::{ApiClient, ProductQuery};
//!
//! let client = ApiClient::new(&config)?;
//! let list = client.list_products(&ProductQuery::default()).await?;
//! ```

mod types;

pub use types::*;

use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::StorefrontConfig;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Returns `true` if the backend was reached and rejected the request.
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

/// Backend REST client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Create a client from an existing `reqwest` client and base URL.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The backend prefix requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Probe `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports non-2xx.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(&["health"])?;
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    /// List products, optionally filtered by category and collection.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the status is non-2xx, or the
    /// body is not a product list envelope.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductList, ApiError> {
        let mut url = self.endpoint(&["products"])?;
        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let response = self.client.get(url).send().await?;
        let envelope: ProductListEnvelope = decode(response).await?;

        Ok(ProductList {
            products: envelope.data,
            count: envelope.count,
            source: envelope.source,
        })
    }

    /// Fetch one product by SKU.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the product does not exist.
    pub async fn get_product(&self, sku: &bharat_core::Sku) -> Result<Product, ApiError> {
        let url = self.endpoint(&["products", sku.as_str()])?;
        let response = self.client.get(url).send().await?;
        let envelope: Envelope<Product> = decode(response).await?;
        Ok(envelope.data)
    }

    /// Mirror a cart addition to the backend cart.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the line
    /// (unknown SKU, insufficient stock).
    pub async fn add_to_cart(&self, request: &CartAddRequest) -> Result<CartAddResponse, ApiError> {
        let url = self.endpoint(&["cart", "add"])?;
        let response = self.client.post(url).json(request).send().await?;
        decode(response).await
    }

    /// Create an order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the order.
    /// The status code and server message are preserved in
    /// [`ApiError::Status`].
    pub async fn create_order(&self, request: &OrderRequest<'_>) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders"])?;
        let response = self.client.post(url).json(request).send().await?;
        let envelope: Envelope<Order> = decode(response).await?;
        Ok(envelope.data)
    }

    /// Look up an order by id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the order does not exist.
    pub async fn get_order(&self, order_id: &str) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders", order_id])?;
        let response = self.client.get(url).send().await?;
        let envelope: Envelope<Order> = decode(response).await?;
        Ok(envelope.data)
    }

    /// Look up the fulfillment status of an order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the order does not exist.
    pub async fn get_fulfillment_status(
        &self,
        order_id: &str,
    ) -> Result<FulfillmentStatus, ApiError> {
        let url = self.endpoint(&["qikink", "fulfillment", order_id])?;
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    /// Check the backend's connection to the fulfillment partner.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports non-2xx.
    pub async fn fulfillment_connection_status(&self) -> Result<ConnectionStatus, ApiError> {
        let url = self.endpoint(&["qikink", "status"])?;
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    /// Submit the contact form.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the form.
    pub async fn submit_contact(&self, submission: &ContactSubmission) -> Result<(), ApiError> {
        let url = self.endpoint(&["contact"])?;
        let response = self.client.post(url).json(submission).send().await?;
        ensure_success(response).await.map(|_| ())
    }

    /// Build an endpoint URL by appending percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turn a non-2xx response into [`ApiError::Status`], keeping the server's
/// message when the body is an error envelope.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or(body);

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Check the status and decode the JSON body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
}
