//! Product listing and backend status commands.

use bharat_storefront::StorefrontError;
use bharat_storefront::api::Product;
use bharat_storefront::catalog::ProductCard;

use super::{Context, parse_sku, print_line};

/// Arguments for `bharat products`.
#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Ask the backend for one category only
    #[arg(long)]
    pub category: Option<String>,

    /// Ask the backend for one collection only
    #[arg(long)]
    pub collection: Option<String>,

    /// Show only these categories (repeatable)
    #[arg(long)]
    pub filter: Vec<String>,

    /// Show only products whose name, category or description matches
    #[arg(long)]
    pub search: Option<String>,

    /// `price-low`, `price-high`, `name-asc` or `newest`
    #[arg(long)]
    pub sort: Option<String>,

    /// Print the rendered grid markup instead of a table
    #[arg(long)]
    pub html: bool,
}

/// Report backend and fulfillment connectivity.
///
/// # Errors
///
/// Never fails; unreachable services are reported, not raised.
pub async fn status(ctx: &mut Context) -> Result<(), StorefrontError> {
    let connected = ctx.storefront.initialize().await;
    print_line(&format!("Backend:     {}", ctx.config.api_base_url));
    print_line(&format!(
        "Status:      {}",
        if connected {
            "connected"
        } else {
            "not available (frontend-only mode)"
        }
    ));

    if connected {
        match ctx.storefront.fulfillment_connection_status().await {
            Some(status) => print_line(&format!(
                "Fulfillment: {} ({})",
                status.status,
                status.mode.as_deref().unwrap_or("unknown mode")
            )),
            None => print_line("Fulfillment: unknown"),
        }
    }

    print_line(&format!("Cart:        {} item(s)", ctx.storefront.cart_count()));
    print_line(&format!(
        "Wishlist:    {} item(s)",
        ctx.storefront.wishlist().len()
    ));
    Ok(())
}

/// List products from the backend, or the static catalog when it is down.
///
/// # Errors
///
/// Returns an error if `--html` rendering fails.
pub async fn list(ctx: &mut Context, args: &ListArgs) -> Result<(), StorefrontError> {
    if args.category.is_some() || args.collection.is_some() {
        let category = args.category.as_deref();
        let collection = args.collection.as_deref();
        if let Some(products) = ctx.storefront.fetch_products(category, collection).await {
            ctx.storefront.populate_products_grid(products);
        } else {
            tracing::warn!(
                category = category.unwrap_or_default(),
                collection = collection.unwrap_or_default(),
                "Backend filter unavailable, narrowing the static catalog locally"
            );
            let products = ctx
                .storefront
                .grid()
                .cards()
                .iter()
                .map(|card| card.product.clone())
                .collect();
            ctx.storefront
                .populate_products_grid(narrow(products, category, collection));
        }
    } else {
        ctx.storefront.load_dynamic_products().await;
    }

    ctx.storefront.apply_filters(args.filter.as_slice());
    if let Some(query) = &args.search {
        ctx.storefront.search_products(query);
    }
    if let Some(sort) = &args.sort {
        ctx.storefront.sort_products(sort);
    }

    if args.html {
        print_line(&ctx.storefront.render_grid()?);
        return Ok(());
    }

    let grid = ctx.storefront.grid();
    for card in grid.visible() {
        print_line(&card_row(card));
    }
    print_line(&format!(
        "{} of {} product(s) shown",
        grid.visible_count(),
        ctx.storefront.product_count()
    ));
    Ok(())
}

/// Show one product's details.
///
/// # Errors
///
/// Returns an error if the SKU is blank or the product is unknown both to the
/// backend and the static catalog.
pub async fn show(ctx: &Context, sku: &str) -> Result<(), StorefrontError> {
    let sku = parse_sku(sku)?;
    let product = match ctx.storefront.fetch_product_by_sku(&sku).await {
        Some(product) => product,
        None => ctx
            .storefront
            .grid()
            .card(&sku)
            .map(|card| card.product.clone())
            .ok_or_else(|| StorefrontError::NotFound(format!("product {sku}")))?,
    };

    for line in product_details(&product) {
        print_line(&line);
    }
    Ok(())
}

/// Keep the products in `category` and `collection`, where given.
fn narrow(products: Vec<Product>, category: Option<&str>, collection: Option<&str>) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .filter(|p| collection.is_none_or(|c| p.collection.as_deref() == Some(c)))
        .collect()
}

fn card_row(card: &ProductCard) -> String {
    let product = &card.product;
    let price = format!("₹{}", product.price.format_grouped());
    let badge = if card.is_low_stock() {
        "LOW STOCK"
    } else {
        "IN STOCK"
    };
    format!(
        "{:<12} {:<32} {:<10} {price:>10} {badge}",
        product.sku.as_str(),
        product.name,
        product.category
    )
}

fn product_details(product: &Product) -> Vec<String> {
    let mut lines = vec![
        product.name.clone(),
        format!("SKU:         {}", product.sku),
        format!("Category:    {}", product.category),
    ];
    if let Some(collection) = &product.collection {
        lines.push(format!("Collection:  {collection}"));
    }
    lines.push(format!("Price:       {}", product.price));
    lines.push(format!("Stock:       {}", product.stock));
    if !product.sizes.is_empty() {
        lines.push(format!("Sizes:       {}", product.sizes.join(", ")));
    }
    if !product.colors.is_empty() {
        lines.push(format!("Colors:      {}", product.colors.join(", ")));
    }
    if !product.description.is_empty() {
        lines.push(String::new());
        lines.push(product.description.clone());
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use bharat_core::{Price, Sku};

    fn tee() -> Product {
        Product {
            sku: Sku::new("BHRT-003-U").unwrap(),
            name: "Essential White Basics".to_string(),
            category: "unisex".to_string(),
            collection: Some("basics".to_string()),
            description: "Timeless white premium cotton t-shirt".to_string(),
            price: Price::from_rupees(899),
            image_url: String::new(),
            stock: 3,
            sizes: vec!["M".to_string(), "L".to_string()],
            colors: Vec::new(),
        }
    }

    #[test]
    fn test_card_row() {
        let row = card_row(&ProductCard::new(tee()));
        assert!(row.starts_with("BHRT-003-U"));
        assert!(row.contains("₹899"));
        assert!(row.ends_with("LOW STOCK"));
    }

    #[test]
    fn test_narrow_by_category_and_collection() {
        let mut kurti = tee();
        kurti.sku = Sku::new("BHRT-002-W").unwrap();
        kurti.category = "womens".to_string();
        kurti.collection = None;
        let products = vec![tee(), kurti];

        let skus = |kept: Vec<Product>| -> Vec<String> {
            kept.into_iter().map(|p| p.sku.as_str().to_string()).collect()
        };
        assert_eq!(skus(narrow(products.clone(), Some("womens"), None)), ["BHRT-002-W"]);
        assert_eq!(skus(narrow(products.clone(), None, Some("basics"))), ["BHRT-003-U"]);
        assert!(narrow(products.clone(), Some("womens"), Some("basics")).is_empty());
        assert_eq!(narrow(products, None, None).len(), 2);
    }

    #[test]
    fn test_product_details() {
        let lines = product_details(&tee());
        assert_eq!(lines[0], "Essential White Basics");
        assert!(lines.contains(&"Price:       ₹899.00".to_string()));
        assert!(lines.contains(&"Sizes:       M, L".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Colors")));
    }
}
