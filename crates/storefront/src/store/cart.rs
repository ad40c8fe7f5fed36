//! Shopping cart store.

use bharat_core::{CartItemId, Price, Sku};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::OrderItem;
use crate::storage::{CART_KEY, Storage, StorageError, load_json, save_json};

/// One cart entry.
///
/// Entries are not merged: adding the same product, size and colour twice
/// yields two entries. Serialized with camelCase keys under the `cart`
/// storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: Sku,
    pub product_name: String,
    pub price: Price,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            sku: item.product_id.clone(),
            name: item.product_name.clone(),
            price: item.price,
            quantity: item.quantity,
            size: item.size.clone(),
            color: item.color.clone(),
            cart_item_id: Some(item.id),
        }
    }
}

/// Product details for an add-to-cart action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCart {
    pub product_id: Sku,
    pub product_name: String,
    pub price: Price,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Parse the raw value of a quantity input.
///
/// Reads the leading integer the way a browser's `parseInt` does (leading
/// whitespace and sign allowed, trailing junk ignored). Missing, unparsable
/// and non-positive values fall back to 1.
#[must_use]
pub fn parse_quantity(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 1;
    };
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let Some(number) = digits.get(..end) else {
        return 1;
    };
    match number.parse::<u32>() {
        Ok(quantity) if quantity >= 1 && !negative => quantity,
        _ => 1,
    }
}

/// In-memory cart mirrored to storage.
#[derive(Debug)]
pub struct CartStore<S> {
    items: Vec<CartItem>,
    last_id: Option<CartItemId>,
    storage: S,
}

impl<S: Storage> CartStore<S> {
    /// Restore the cart from storage.
    ///
    /// A missing or malformed `cart` entry yields an empty cart.
    pub fn load(storage: S) -> Self {
        let items: Vec<CartItem> = match load_json(&storage, CART_KEY) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable cart from storage");
                Vec::new()
            }
        };
        let last_id = items.iter().map(|item| item.id).max();

        Self {
            items,
            last_id,
            storage,
        }
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of entries (not the summed quantity).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an entry by id.
    #[must_use]
    pub fn get(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Cart entries as order lines.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.items.iter().map(OrderItem::from).collect()
    }

    /// Append a new entry and persist.
    pub fn add(&mut self, line: AddToCart, quantity: u32) -> CartItem {
        self.add_at(line, quantity, Utc::now())
    }

    /// Append a new entry created at `now` and persist.
    ///
    /// The id is `now` in milliseconds, bumped past the last issued id when
    /// the clock has not advanced.
    pub fn add_at(&mut self, line: AddToCart, quantity: u32, now: DateTime<Utc>) -> CartItem {
        let id = self.next_id(now);
        let item = CartItem {
            id,
            product_id: line.product_id,
            product_name: line.product_name,
            price: line.price,
            size: line.size,
            color: line.color,
            quantity: quantity.max(1),
        };

        self.items.push(item.clone());
        self.last_id = Some(id);
        self.persist_logged();
        item
    }

    /// Remove the first entry with `id`.
    ///
    /// Returns `true` if an entry was removed. The cart is re-persisted
    /// either way.
    pub fn remove(&mut self, id: CartItemId) -> bool {
        let removed = self
            .items
            .iter()
            .position(|item| item.id == id)
            .map(|index| self.items.remove(index))
            .is_some();
        self.persist_logged();
        removed
    }

    /// Write the current entries to storage.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the storage write fails.
    pub fn persist(&self) -> Result<(), StorageError> {
        save_json(&self.storage, CART_KEY, &self.items)
    }

    fn persist_logged(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, count = self.items.len(), "Failed to persist cart");
        }
    }

    // A restored id at `i64::MAX` cannot be bumped; fall back to the clock
    // and step past any stored entry that already holds that value.
    fn next_id(&self, now: DateTime<Utc>) -> CartItemId {
        let candidate = now.timestamp_millis();
        let mut id = match self.last_id {
            Some(last) if last.as_i64() >= candidate => {
                last.as_i64().checked_add(1).unwrap_or(candidate)
            }
            _ => candidate,
        };
        while self.items.iter().any(|item| item.id.as_i64() == id) {
            id = id.wrapping_add(1);
        }
        CartItemId::new(id)
    }
}
