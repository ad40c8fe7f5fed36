//! Command implementations.
//!
//! Every command runs against one [`Context`]: the loaded configuration and a
//! [`Storefront`] whose cart and wishlist live in the file-backed storage.

pub mod cart;
pub mod contact;
pub mod order;
pub mod page;
pub mod products;

use bharat_core::Sku;
use bharat_storefront::api::ApiClient;
use bharat_storefront::catalog::load_catalog;
use bharat_storefront::config::StorefrontConfig;
use bharat_storefront::storage::FileStorage;
use bharat_storefront::{Storefront, StorefrontError};

/// Shared state for a single CLI invocation.
pub struct Context {
    pub config: StorefrontConfig,
    pub storefront: Storefront<FileStorage>,
}

impl Context {
    /// Open storage, load the static catalog and build the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory or HTTP client cannot be
    /// set up. A broken catalog file only logs.
    pub fn open(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let storage = FileStorage::open(&config.storage_dir)?;
        let catalog = load_catalog(&config.catalog_path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Starting with an empty product grid");
            Vec::new()
        });
        let api = ApiClient::new(&config)?;

        Ok(Self {
            storefront: Storefront::new(api, storage, catalog),
            config,
        })
    }

    /// Print and clear queued notifications.
    pub fn flush_notifications(&mut self) {
        for notification in self.storefront.drain_notifications() {
            print_line(&format!("[{}] {}", notification.level, notification.message));
        }
    }
}

/// Parse a SKU argument.
pub(crate) fn parse_sku(raw: &str) -> Result<Sku, StorefrontError> {
    Sku::new(raw).ok_or_else(|| StorefrontError::BadRequest("SKU cannot be blank".to_string()))
}

/// Write one line of command output.
#[allow(clippy::print_stdout)]
pub(crate) fn print_line(line: &str) {
    println!("{line}");
}
