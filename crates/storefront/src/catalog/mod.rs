//! Product grid model.
//!
//! The grid is an ordered list of [`ProductCard`]s. Filtering and searching
//! only toggle each card's visibility; sorting reorders the cards in place.
//! Rendering to HTML lives in [`crate::render`].

mod fallback;

use std::cmp::Ordering;
use std::str::FromStr;

use bharat_core::{Price, Sku};

use crate::api::Product;

pub use fallback::{CatalogError, load_catalog};

/// Cards whose stock is at or below this level carry a low-stock badge.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// A product card on the grid along with the shopper's selections on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub product: Product,
    pub visible: bool,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
    /// Raw text of the card's quantity input, if the card has one.
    pub quantity_input: Option<String>,
}

impl ProductCard {
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            visible: true,
            selected_size: None,
            selected_color: None,
            quantity_input: None,
        }
    }

    #[must_use]
    pub fn sku(&self) -> &Sku {
        &self.product.sku
    }

    /// Value of the card's `data-category` attribute.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.product.category
    }

    /// Value of the card's `data-price` attribute.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.product.price
    }

    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.product.stock <= LOW_STOCK_THRESHOLD
    }

    /// Case-insensitive substring match over name, category and description.
    fn matches(&self, needle: &str) -> bool {
        [
            &self.product.name,
            &self.product.category,
            &self.product.description,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Grid ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Ascending by price.
    PriceLow,
    /// Descending by price.
    PriceHigh,
    /// Alphabetical by name, ignoring case.
    NameAsc,
    /// Current order, which is taken to be newest first.
    #[default]
    Newest,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::NameAsc => "name-asc",
            Self::Newest => "newest",
        }
    }

    fn compare(self, a: &ProductCard, b: &ProductCard) -> Ordering {
        match self {
            Self::PriceLow => a.price().cmp(&b.price()),
            Self::PriceHigh => b.price().cmp(&a.price()),
            Self::NameAsc => a
                .product
                .name
                .to_lowercase()
                .cmp(&b.product.name.to_lowercase())
                // lowercase before uppercase on case-only ties
                .then_with(|| b.product.name.cmp(&a.product.name)),
            Self::Newest => Ordering::Equal,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "name-asc" => Ok(Self::NameAsc),
            "newest" => Ok(Self::Newest),
            _ => Err(format!("unknown sort key: {s}")),
        }
    }
}

/// The product grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductGrid {
    cards: Vec<ProductCard>,
}

impl ProductGrid {
    /// Build a grid with one visible card per product.
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            cards: products.into_iter().map(ProductCard::new).collect(),
        }
    }

    /// Discard every card and rebuild from `products`.
    pub fn replace(&mut self, products: Vec<Product>) {
        *self = Self::from_products(products);
    }

    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    /// Number of cards, shown in the product-count element.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|card| card.visible).count()
    }

    pub fn visible(&self) -> impl Iterator<Item = &ProductCard> {
        self.cards.iter().filter(|card| card.visible)
    }

    #[must_use]
    pub fn card(&self, sku: &Sku) -> Option<&ProductCard> {
        self.cards.iter().find(|card| card.sku() == sku)
    }

    fn card_mut(&mut self, sku: &Sku) -> Option<&mut ProductCard> {
        self.cards.iter_mut().find(|card| card.sku() == sku)
    }

    /// Show only cards in one of `categories`; show everything when empty.
    pub fn apply_filters<S: AsRef<str>>(&mut self, categories: &[S]) {
        for card in &mut self.cards {
            card.visible = categories.is_empty()
                || categories.iter().any(|c| c.as_ref() == card.category());
        }
    }

    /// Show only cards whose name, category or description contains `query`.
    pub fn search(&mut self, query: &str) {
        let needle = query.to_lowercase();
        for card in &mut self.cards {
            card.visible = card.matches(&needle);
        }
    }

    /// Stable sort of the cards by `key`.
    pub fn sort(&mut self, key: SortKey) {
        self.cards.sort_by(|a, b| key.compare(a, b));
    }

    /// Record a size selection. Returns `false` if no card has `sku`.
    pub fn select_size(&mut self, sku: &Sku, size: &str) -> bool {
        self.card_mut(sku).is_some_and(|card| {
            card.selected_size = Some(size.to_string());
            true
        })
    }

    /// Record a colour selection. Returns `false` if no card has `sku`.
    pub fn select_color(&mut self, sku: &Sku, color: &str) -> bool {
        self.card_mut(sku).is_some_and(|card| {
            card.selected_color = Some(color.to_string());
            true
        })
    }

    /// Set the raw quantity input of a card. Returns `false` if no card has `sku`.
    pub fn set_quantity_input(&mut self, sku: &Sku, raw: &str) -> bool {
        self.card_mut(sku).is_some_and(|card| {
            card.quantity_input = Some(raw.to_string());
            true
        })
    }

    /// Raw quantity input of the card for `sku`, if both exist.
    #[must_use]
    pub fn quantity_input(&self, sku: &Sku) -> Option<&str> {
        self.card(sku).and_then(|card| card.quantity_input.as_deref())
    }
}
