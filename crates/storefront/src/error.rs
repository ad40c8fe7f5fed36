//! Unified error handling with Sentry integration.
//!
//! Each module has its own error enum; [`StorefrontError`] aggregates them for
//! callers (like the CLI) that drive several modules at once.

use thiserror::Error;

use crate::api::ApiError;
use crate::catalog::CatalogError;
use crate::components::ComponentError;
use crate::config::ConfigError;
use crate::contact::ContactError;
use crate::render::RenderError;
use crate::storage::StorageError;

/// Crate-level error type.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("{0}")]
    Contact(#[from] ContactError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// A referenced item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before any work was done.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl StorefrontError {
    /// Send the error to Sentry if it indicates a fault rather than bad input.
    ///
    /// Returns `true` if an event was captured.
    pub fn capture(&self) -> bool {
        if matches!(
            self,
            Self::Config(_) | Self::Storage(_) | Self::Catalog(_) | Self::Render(_)
        ) {
            let event_id = sentry::capture_error(self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Storefront error");
            return true;
        }
        false
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("sku", "BHRT-001-M")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
