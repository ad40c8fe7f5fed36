//! HTML rendering for the product grid and notifications.
//!
//! Templates live under `templates/partials/`. Askama escapes every
//! interpolated value, so product data from the backend cannot inject markup.

use askama::Template;

use crate::catalog::{ProductCard, ProductGrid};
use crate::notify::Notification;

/// Errors that can occur when rendering templates.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    /// Plain decimal for `data-price`.
    pub price_data: String,
    /// Rupee amount as shown to the shopper, e.g. `₹1,299`.
    pub price_display: String,
    pub stock_badge: &'static str,
    pub detail_href: String,
    pub hidden: bool,
    pub selected_size: String,
    pub selected_color: String,
}

impl From<&ProductCard> for ProductCardView {
    fn from(card: &ProductCard) -> Self {
        let product = &card.product;
        Self {
            sku: product.sku.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            price_data: product.price.amount().normalize().to_string(),
            price_display: format!("₹{}", product.price.format_grouped()),
            stock_badge: if card.is_low_stock() {
                "LOW STOCK"
            } else {
                "IN STOCK"
            },
            detail_href: product_detail_href(product.sku.as_str()),
            hidden: !card.visible,
            selected_size: card.selected_size.clone().unwrap_or_default(),
            selected_color: card.selected_color.clone().unwrap_or_default(),
        }
    }
}

/// Link to a product's detail page.
#[must_use]
pub fn product_detail_href(sku: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(sku.as_bytes()).collect();
    format!("product-detail.html?sku={encoded}")
}

/// The cards of a product grid (the inner HTML of `.products-grid`).
#[derive(Template)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub cards: Vec<ProductCardView>,
}

impl From<&ProductGrid> for ProductGridTemplate {
    fn from(grid: &ProductGrid) -> Self {
        Self {
            cards: grid.cards().iter().map(ProductCardView::from).collect(),
        }
    }
}

/// A single notification toast.
#[derive(Template)]
#[template(path = "partials/notification.html")]
pub struct NotificationTemplate<'a> {
    pub message: &'a str,
    pub level: &'static str,
}

impl<'a> From<&'a Notification> for NotificationTemplate<'a> {
    fn from(notification: &'a Notification) -> Self {
        Self {
            message: &notification.message,
            level: notification.level.as_str(),
        }
    }
}

/// Render the grid's cards.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_product_grid(grid: &ProductGrid) -> Result<String, RenderError> {
    Ok(ProductGridTemplate::from(grid).render()?)
}

/// Render one notification.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_notification(notification: &Notification) -> Result<String, RenderError> {
    Ok(NotificationTemplate::from(notification).render()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use bharat_core::{Price, Sku};

    use crate::api::Product;

    fn product(sku: &str, name: &str, price: i64, stock: i64) -> Product {
        Product {
            sku: Sku::new(sku).unwrap(),
            name: name.to_string(),
            category: "mens".to_string(),
            collection: Some("heritage".to_string()),
            description: "Premium cotton".to_string(),
            price: Price::from_rupees(price),
            image_url: "/images/product-001.jpg".to_string(),
            stock,
            sizes: Vec::new(),
            colors: Vec::new(),
        }
    }

    #[test]
    fn test_card_markup() {
        let grid = ProductGrid::from_products(vec![product(
            "BHRT-001-M",
            "Heritage Print T-Shirt",
            1299,
            15,
        )]);
        let html = render_product_grid(&grid).unwrap();

        assert!(html.contains(r#"data-category="mens""#));
        assert!(html.contains(r#"data-price="1299""#));
        assert!(html.contains(r#"data-product-id="BHRT-001-M""#));
        assert!(html.contains("IN STOCK"));
        assert!(html.contains("SKU: BHRT-001-M"));
        assert!(html.contains("₹1,299"));
        assert!(html.contains("product-detail.html?sku=BHRT-001-M"));
        assert!(!html.contains("display: none"));
    }

    #[test]
    fn test_low_stock_and_hidden_cards() {
        let mut grid = ProductGrid::from_products(vec![
            product("A", "Scarf", 499, 5),
            product("B", "Tee", 799, 6),
        ]);
        grid.search("tee");
        let html = render_product_grid(&grid).unwrap();

        assert_eq!(html.matches("LOW STOCK").count(), 1);
        assert_eq!(html.matches(r#"style="display: none""#).count(), 1);
    }

    #[test]
    fn test_selections_render_as_data_attributes() {
        let mut grid = ProductGrid::from_products(vec![product("A", "Scarf", 499, 10)]);
        grid.select_size(&Sku::new("A").unwrap(), "XL");
        let html = render_product_grid(&grid).unwrap();

        assert!(html.contains(r#"data-selected-size="XL""#));
        assert!(!html.contains("data-selected-color"));
    }

    #[test]
    fn test_product_data_is_escaped() {
        let grid =
            ProductGrid::from_products(vec![product("A&B", "<script>alert(1)</script>", 100, 10)]);
        let html = render_product_grid(&grid).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("product-detail.html?sku=A%26B"));
    }

    #[test]
    fn test_empty_grid_renders_nothing() {
        let html = render_product_grid(&ProductGrid::default()).unwrap();
        assert!(html.trim().is_empty());
    }

    #[test]
    fn test_notification_markup() {
        let html = render_notification(&Notification::error("Please fill all required fields"))
            .unwrap();
        assert!(html.contains("notification-error"));
        assert!(html.contains("Please fill all required fields"));
    }
}
