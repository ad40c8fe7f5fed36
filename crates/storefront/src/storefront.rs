//! Page controller.
//!
//! [`Storefront`] owns everything one page of the shop works with: the cart
//! and wishlist stores, the product grid, the cart badge and product count,
//! and the notification queue. Backend calls go through [`ApiClient`] and
//! are best-effort: a transport failure or non-2xx answer is logged and the
//! page carries on with local state ("frontend-only mode").

use bharat_core::{CartItemId, Email, Sku};

use crate::api::{
    ApiClient, ApiError, CartAddRequest, ConnectionStatus, FulfillmentStatus, Order, OrderItem,
    OrderRequest, Product, ProductQuery, ShippingAddress,
};
use crate::catalog::{ProductGrid, SortKey};
use crate::components::{ElementSelector, Page};
use crate::contact::{CONTACT_THANKS, ContactError, ContactForm, ContactOutcome};
use crate::error::add_breadcrumb;
use crate::notify::{Notification, Notifications};
use crate::render::{RenderError, render_product_grid};
use crate::storage::Storage;
use crate::store::{AddToCart, CartItem, CartStore, WishlistStore, parse_quantity};

/// One storefront page and its state.
#[derive(Debug)]
pub struct Storefront<S> {
    api: ApiClient,
    cart: CartStore<S>,
    wishlist: WishlistStore<S>,
    grid: ProductGrid,
    notifications: Notifications,
    cart_badge: usize,
    product_count: usize,
    backend_available: Option<bool>,
}

impl<S: Storage + Clone> Storefront<S> {
    /// Restore the cart and wishlist from `storage` and lay out the
    /// pre-rendered `catalog` cards.
    pub fn new(api: ApiClient, storage: S, catalog: Vec<Product>) -> Self {
        let cart = CartStore::load(storage.clone());
        let wishlist = WishlistStore::load(storage);
        let grid = ProductGrid::from_products(catalog);

        tracing::debug!(
            cart = cart.len(),
            wishlist = wishlist.len(),
            products = grid.len(),
            "Storefront state restored"
        );

        Self {
            cart_badge: cart.len(),
            product_count: grid.len(),
            api,
            cart,
            wishlist,
            grid,
            notifications: Notifications::new(),
            backend_available: None,
        }
    }
}

impl<S: Storage> Storefront<S> {
    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore<S> {
        &self.wishlist
    }

    #[must_use]
    pub const fn grid(&self) -> &ProductGrid {
        &self.grid
    }

    /// The number shown in the cart badge.
    #[must_use]
    pub const fn cart_count(&self) -> usize {
        self.cart_badge
    }

    /// The number shown in the product-count element.
    #[must_use]
    pub const fn product_count(&self) -> usize {
        self.product_count
    }

    /// Result of the last connection check, `None` before the first.
    #[must_use]
    pub const fn backend_available(&self) -> Option<bool> {
        self.backend_available
    }

    #[must_use]
    pub const fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Take every pending notification, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    // =========================================================================
    // Page load
    // =========================================================================

    /// Check the backend and refresh the cart display.
    ///
    /// Returns whether the backend is reachable.
    pub async fn initialize(&mut self) -> bool {
        let connected = self.check_backend_connection().await;
        self.update_cart_display();
        connected
    }

    /// Probe `GET /health`. Any 2xx answer counts as connected.
    pub async fn check_backend_connection(&mut self) -> bool {
        let connected = match self.api.health().await {
            Ok(_) | Err(ApiError::Parse(_)) => {
                tracing::info!("Backend connected successfully");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Backend not available. Using frontend-only mode.");
                false
            }
        };
        self.backend_available = Some(connected);
        connected
    }

    // =========================================================================
    // Cart and wishlist
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// The quantity comes from the product card's quantity input (1 when the
    /// card or input is missing or unusable). Size and colour fall back to the
    /// card's current selection. The local cart is updated and persisted
    /// before the backend is told; a failed sync only logs.
    pub async fn add_to_cart(&mut self, mut line: AddToCart) -> CartItem {
        let quantity = parse_quantity(self.grid.quantity_input(&line.product_id));
        if let Some(card) = self.grid.card(&line.product_id) {
            if line.size.is_none() {
                line.size.clone_from(&card.selected_size);
            }
            if line.color.is_none() {
                line.color.clone_from(&card.selected_color);
            }
        }

        let item = self.cart.add(line, quantity);
        self.update_cart_display();
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("sku", item.product_id.as_str())]),
        );

        let request = CartAddRequest {
            sku: item.product_id.clone(),
            quantity: item.quantity,
            size: item.size.clone(),
            color: item.color.clone(),
        };
        match self.api.add_to_cart(&request).await {
            Ok(_) => tracing::info!(sku = %item.product_id, "Item synced to backend cart"),
            Err(e) => {
                tracing::info!(sku = %item.product_id, error = %e, "Using frontend cart only");
            }
        }

        self.notifications.push(Notification::success(format!(
            "{} added to cart!",
            item.product_name
        )));
        item
    }

    /// Remove a cart entry by id. Removing an unknown id changes nothing but
    /// still refreshes the display.
    pub fn remove_from_cart(&mut self, id: CartItemId) -> bool {
        let removed = self.cart.remove(id);
        self.update_cart_display();
        if removed {
            let id = id.to_string();
            add_breadcrumb("cart", "Removed from cart", Some(&[("id", id.as_str())]));
        }
        removed
    }

    /// Add a product to the wishlist unless it is already there.
    pub fn add_to_wishlist(&mut self, product_id: Sku, product_name: &str) -> bool {
        if self.wishlist.add(product_id, product_name.to_string()) {
            self.notifications.push(Notification::success(format!(
                "{product_name} added to wishlist!"
            )));
            true
        } else {
            self.notifications
                .push(Notification::info("Already in wishlist"));
            false
        }
    }

    pub fn remove_from_wishlist(&mut self, product_id: &Sku) -> bool {
        self.wishlist.remove(product_id)
    }

    fn update_cart_display(&mut self) {
        self.cart_badge = self.cart.len();
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch the product list, or `None` if the backend cannot supply it.
    pub async fn fetch_products(
        &self,
        category: Option<&str>,
        collection: Option<&str>,
    ) -> Option<Vec<Product>> {
        let query = ProductQuery {
            category: category.map(String::from),
            collection: collection.map(String::from),
        };
        match self.api.list_products(&query).await {
            Ok(list) => {
                tracing::info!(
                    count = list.count.unwrap_or(list.products.len()),
                    source = list.source.as_deref().unwrap_or("unknown"),
                    "Fetched products"
                );
                Some(list.products)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch products");
                None
            }
        }
    }

    /// Fetch one product, or `None` if the backend cannot supply it.
    pub async fn fetch_product_by_sku(&self, sku: &Sku) -> Option<Product> {
        match self.api.get_product(sku).await {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(sku = %sku, error = %e, "Failed to fetch product");
                None
            }
        }
    }

    /// Replace every card on the grid with `products`.
    pub fn populate_products_grid(&mut self, products: Vec<Product>) {
        self.grid.replace(products);
        self.product_count = self.grid.len();
    }

    /// Swap the pre-rendered cards for the backend's list when it has one.
    ///
    /// Returns `true` if the grid was repopulated.
    pub async fn load_dynamic_products(&mut self) -> bool {
        match self.fetch_products(None, None).await {
            Some(products) if !products.is_empty() => {
                self.populate_products_grid(products);
                tracing::info!(count = self.product_count, "Products dynamically loaded");
                true
            }
            _ => {
                tracing::debug!(count = self.product_count, "Keeping pre-rendered products");
                false
            }
        }
    }

    pub fn apply_filters<C: AsRef<str>>(&mut self, categories: &[C]) {
        self.grid.apply_filters(categories);
    }

    pub fn search_products(&mut self, query: &str) {
        self.grid.search(query);
    }

    /// Reorder the grid. Unknown keys leave the order alone.
    pub fn sort_products(&mut self, sort_by: &str) {
        match sort_by.parse::<SortKey>() {
            Ok(key) => self.grid.sort(key),
            Err(e) => tracing::debug!(error = %e, "Keeping current product order"),
        }
    }

    pub fn select_size(&mut self, product_id: &Sku, size: &str) -> bool {
        self.grid.select_size(product_id, size)
    }

    pub fn select_color(&mut self, product_id: &Sku, color: &str) -> bool {
        self.grid.select_color(product_id, color)
    }

    pub fn set_quantity_input(&mut self, product_id: &Sku, raw: &str) -> bool {
        self.grid.set_quantity_input(product_id, raw)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submit an order. Returns `None` if the backend is unreachable or
    /// refuses it.
    pub async fn submit_order(
        &self,
        customer_email: &Email,
        shipping_address: &ShippingAddress,
        items: &[OrderItem],
    ) -> Option<Order> {
        let request = OrderRequest {
            customer_email,
            shipping_address,
            items,
        };
        match self.api.create_order(&request).await {
            Ok(order) => {
                tracing::info!(order_id = %order.order_id, status = %order.status, "Order created");
                add_breadcrumb(
                    "order",
                    "Order created",
                    Some(&[("order_id", order.order_id.as_str())]),
                );
                Some(order)
            }
            Err(ApiError::Status { status, message }) => {
                tracing::warn!(status, message = %message, "Order rejected by backend");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Order submission failed");
                None
            }
        }
    }

    pub async fn get_order_status(&self, order_id: &str) -> Option<Order> {
        match self.api.get_order(order_id).await {
            Ok(order) => Some(order),
            Err(e) => {
                tracing::warn!(order_id = %order_id, error = %e, "Failed to fetch order status");
                None
            }
        }
    }

    pub async fn get_fulfillment_status(&self, order_id: &str) -> Option<FulfillmentStatus> {
        match self.api.get_fulfillment_status(order_id).await {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!(order_id = %order_id, error = %e, "Failed to fetch fulfillment status");
                None
            }
        }
    }

    pub async fn fulfillment_connection_status(&self) -> Option<ConnectionStatus> {
        match self.api.fulfillment_connection_status().await {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch fulfillment connection status");
                None
            }
        }
    }

    // =========================================================================
    // Contact
    // =========================================================================

    /// Validate and send the contact form.
    ///
    /// The shopper is thanked whether or not the backend takes the message.
    ///
    /// # Errors
    ///
    /// Returns the validation failure (also queued as an error notification);
    /// nothing is sent in that case.
    pub async fn handle_contact_form(
        &mut self,
        form: &ContactForm,
    ) -> Result<ContactOutcome, ContactError> {
        let submission = match form.validate() {
            Ok(submission) => submission,
            Err(e) => {
                self.notifications.push(Notification::error(e.to_string()));
                return Err(e);
            }
        };

        let outcome = match self.api.submit_contact(&submission).await {
            Ok(()) => ContactOutcome::Delivered,
            Err(e) => {
                tracing::info!(error = %e, "Using frontend-only mode for contact form");
                ContactOutcome::AcceptedOffline
            }
        };
        self.notifications.push(Notification::success(CONTACT_THANKS));
        Ok(outcome)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the grid's cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_grid(&self) -> Result<String, RenderError> {
        render_product_grid(&self.grid)
    }

    /// Write the grid, product count and cart badge into `page`.
    ///
    /// Elements the page does not have are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid fails to render.
    pub fn apply_to(&self, page: &mut Page) -> Result<(), RenderError> {
        let grid = self.render_grid()?;
        page.set_inner_html(&ElementSelector::class("products-grid"), &grid);
        page.set_inner_html(
            &ElementSelector::id("product-count"),
            &self.product_count.to_string(),
        );
        page.set_inner_html(
            &ElementSelector::class("cart-count"),
            &self.cart_badge.to_string(),
        );
        Ok(())
    }
}
