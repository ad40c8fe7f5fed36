//! Integration tests for The Bharat Collections storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bharat-integration-tests
//! ```
//!
//! No external services are needed: the backend and the asset server are
//! stood in for by `wiremock` servers, and storage lives in a temp directory.
//!
//! # Test Categories
//!
//! - `storefront_flows` - cart, wishlist and order flows across page loads
//! - `page_assembly` - fragment injection and grid rendering into a page

#![cfg_attr(not(test), forbid(unsafe_code))]

use bharat_core::{Price, Sku};
use bharat_storefront::Storefront;
use bharat_storefront::api::{ApiClient, Product};
use bharat_storefront::components::ComponentLoader;
use bharat_storefront::storage::FileStorage;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock backend plus a storage directory shared by every page load.
pub struct TestContext {
    pub server: MockServer,
    pub storage_dir: tempfile::TempDir,
}

impl TestContext {
    /// Start a mock server and create an empty storage directory.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory cannot be created.
    #[allow(clippy::expect_used)]
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            storage_dir: tempfile::tempdir().expect("create storage dir"),
        }
    }

    /// Backend prefix on the mock server.
    ///
    /// # Panics
    ///
    /// Panics if the server URI is not a valid URL.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn api_base_url(&self) -> Url {
        Url::parse(&format!("{}/api", self.server.uri())).expect("valid mock server url")
    }

    /// Asset origin on the mock server.
    ///
    /// # Panics
    ///
    /// Panics if the server URI is not a valid URL.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn assets_base_url(&self) -> Url {
        Url::parse(&self.server.uri()).expect("valid mock server url")
    }

    #[must_use]
    pub fn component_loader(&self) -> ComponentLoader {
        ComponentLoader::with_client(reqwest::Client::new(), self.assets_base_url())
    }

    /// Simulate a fresh page load: new storage handle, new controller.
    ///
    /// # Panics
    ///
    /// Panics if the storage directory cannot be opened.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn load_page(&self, catalog: Vec<Product>) -> Storefront<FileStorage> {
        let storage = FileStorage::open(self.storage_dir.path()).expect("open storage");
        let api = ApiClient::with_client(reqwest::Client::new(), self.api_base_url());
        Storefront::new(api, storage, catalog)
    }

    /// Answer every request with `status` and an empty body.
    pub async fn mount_fallback(&self, status: u16) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Answer `method path` (under `/api`) with a JSON body.
    pub async fn mount_json(&self, http_method: &str, api_path: &str, status: u16, body: Value) {
        Mock::given(method(http_method))
            .and(path(format!("/api{api_path}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

/// A product as the static catalog would describe it.
///
/// # Panics
///
/// Panics if `sku` is blank.
#[allow(clippy::expect_used)]
#[must_use]
pub fn catalog_product(sku: &str, name: &str, category: &str, price: i64, stock: i64) -> Product {
    Product {
        sku: Sku::new(sku).expect("non-blank sku"),
        name: name.to_string(),
        category: category.to_string(),
        collection: None,
        description: format!("{name}, made in India"),
        price: Price::from_rupees(price),
        image_url: format!("/images/{sku}.jpg"),
        stock,
        sizes: Vec::new(),
        colors: Vec::new(),
    }
}

/// A product as the backend would serve it.
#[must_use]
pub fn backend_product(sku: &str, name: &str, category: &str, price: i64, stock: i64) -> Value {
    json!({
        "sku": sku,
        "name": name,
        "category": category,
        "collection": "heritage",
        "price": price,
        "description": format!("{name}, made in India"),
        "sizes": ["S", "M", "L"],
        "colors": ["cream"],
        "stock": stock,
        "image_url": format!("/images/{sku}.jpg"),
        "manufacturer": "Qikink"
    })
}
