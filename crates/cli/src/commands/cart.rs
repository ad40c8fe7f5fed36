//! Cart and wishlist commands.

use bharat_core::{CartItemId, Price, Sku};
use bharat_storefront::StorefrontError;
use bharat_storefront::api::Product;
use bharat_storefront::store::{AddToCart, CartItem};

use super::{Context, parse_sku, print_line};

/// Arguments for `bharat cart add`.
#[derive(Debug, clap::Args)]
pub struct AddArgs {
    /// Product SKU
    pub sku: String,

    /// Quantity; anything that is not a positive number counts as 1
    #[arg(short, long)]
    pub quantity: Option<String>,

    /// Size, e.g. M
    #[arg(long)]
    pub size: Option<String>,

    /// Colour, e.g. indigo
    #[arg(long)]
    pub color: Option<String>,
}

/// Look a product up on the backend first, then in the static catalog.
///
/// A product only the backend knows is placed on the grid so that card
/// selections apply to it.
async fn resolve_product(ctx: &mut Context, sku: &Sku) -> Result<Product, StorefrontError> {
    if let Some(product) = ctx.storefront.fetch_product_by_sku(sku).await {
        if ctx.storefront.grid().card(sku).is_none() {
            ctx.storefront.populate_products_grid(vec![product.clone()]);
        }
        return Ok(product);
    }

    ctx.storefront
        .grid()
        .card(sku)
        .map(|card| card.product.clone())
        .ok_or_else(|| StorefrontError::NotFound(format!("product {sku}")))
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns an error if the product cannot be found.
pub async fn add(ctx: &mut Context, args: &AddArgs) -> Result<(), StorefrontError> {
    let sku = parse_sku(&args.sku)?;
    let product = resolve_product(ctx, &sku).await?;

    if let Some(size) = &args.size {
        ctx.storefront.select_size(&sku, size);
    }
    if let Some(color) = &args.color {
        ctx.storefront.select_color(&sku, color);
    }
    if let Some(quantity) = &args.quantity {
        ctx.storefront.set_quantity_input(&sku, quantity);
    }

    let item = ctx
        .storefront
        .add_to_cart(AddToCart {
            product_id: product.sku,
            product_name: product.name,
            price: product.price,
            size: None,
            color: None,
        })
        .await;

    print_line(&format!("Cart entry {} ({} x {})", item.id, item.quantity, item.price));
    Ok(())
}

/// Remove a cart entry.
///
/// # Errors
///
/// Returns an error if `id` is not a number.
pub fn remove(ctx: &mut Context, id: &str) -> Result<(), StorefrontError> {
    let id: CartItemId = id
        .parse()
        .map_err(|_| StorefrontError::BadRequest(format!("invalid cart entry id: {id}")))?;

    if ctx.storefront.remove_from_cart(id) {
        print_line(&format!("Removed cart entry {id}"));
    } else {
        print_line(&format!("No cart entry {id}"));
    }
    Ok(())
}

/// Print the cart.
pub fn list(ctx: &Context) {
    let cart = ctx.storefront.cart();
    if cart.is_empty() {
        print_line("Your cart is empty");
        return;
    }

    for item in cart.items() {
        print_line(&cart_row(item));
    }
    print_line(&format!("Subtotal: {}", cart.subtotal()));
}

/// Add a product to the wishlist.
///
/// # Errors
///
/// Returns an error if the product cannot be found.
pub async fn wishlist_add(ctx: &mut Context, sku: &str) -> Result<(), StorefrontError> {
    let sku = parse_sku(sku)?;
    let product = resolve_product(ctx, &sku).await?;
    ctx.storefront.add_to_wishlist(product.sku, &product.name);
    Ok(())
}

/// Remove a product from the wishlist.
///
/// # Errors
///
/// Returns an error if the SKU is blank.
pub fn wishlist_remove(ctx: &mut Context, sku: &str) -> Result<(), StorefrontError> {
    let sku = parse_sku(sku)?;
    if ctx.storefront.remove_from_wishlist(&sku) {
        print_line(&format!("Removed {sku} from wishlist"));
    } else {
        print_line(&format!("{sku} is not in the wishlist"));
    }
    Ok(())
}

/// Print the wishlist.
pub fn wishlist_list(ctx: &Context) {
    let wishlist = ctx.storefront.wishlist();
    if wishlist.is_empty() {
        print_line("Your wishlist is empty");
        return;
    }
    for item in wishlist.items() {
        print_line(&format!("{:<12} {}", item.product_id.as_str(), item.product_name));
    }
}

fn cart_row(item: &CartItem) -> String {
    let variant = [item.size.as_deref(), item.color.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" / ");
    let line_total: Price = item.line_total();
    format!(
        "{:<14} {:<12} {:<32} {:<14} x{:<3} {}",
        item.id.to_string(),
        item.product_id.as_str(),
        item.product_name,
        variant,
        item.quantity,
        line_total
    )
}
