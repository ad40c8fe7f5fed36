//! Wishlist store.

use bharat_core::Sku;
use serde::{Deserialize, Serialize};

use crate::storage::{Storage, StorageError, WISHLIST_KEY, load_json, save_json};

/// One wishlist entry; unique by `product_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: Sku,
    pub product_name: String,
}

/// In-memory wishlist mirrored to storage.
#[derive(Debug)]
pub struct WishlistStore<S> {
    items: Vec<WishlistItem>,
    storage: S,
}

impl<S: Storage> WishlistStore<S> {
    /// Restore the wishlist from storage.
    ///
    /// A missing or malformed `wishlist` entry yields an empty list. Duplicate
    /// products in stored data are collapsed to their first occurrence.
    pub fn load(storage: S) -> Self {
        let stored: Vec<WishlistItem> = match load_json(&storage, WISHLIST_KEY) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable wishlist from storage");
                Vec::new()
            }
        };

        let mut items: Vec<WishlistItem> = Vec::with_capacity(stored.len());
        for item in stored {
            if !items.iter().any(|i| i.product_id == item.product_id) {
                items.push(item);
            }
        }

        Self { items, storage }
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, product_id: &Sku) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }

    /// Add a product.
    ///
    /// Returns `false` without touching storage if it is already present.
    pub fn add(&mut self, product_id: Sku, product_name: String) -> bool {
        if self.contains(&product_id) {
            return false;
        }
        self.items.push(WishlistItem {
            product_id,
            product_name,
        });
        self.persist_logged();
        true
    }

    /// Remove a product. Storage is only rewritten when something was removed.
    pub fn remove(&mut self, product_id: &Sku) -> bool {
        let Some(index) = self
            .items
            .iter()
            .position(|item| &item.product_id == product_id)
        else {
            return false;
        };
        self.items.remove(index);
        self.persist_logged();
        true
    }

    /// Write the current entries to storage.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the storage write fails.
    pub fn persist(&self) -> Result<(), StorageError> {
        save_json(&self.storage, WISHLIST_KEY, &self.items)
    }

    fn persist_logged(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, count = self.items.len(), "Failed to persist wishlist");
        }
    }
}
