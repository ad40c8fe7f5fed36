//! Cart, wishlist, product and order flows across page loads.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use bharat_core::{Email, NotificationLevel, Price, Sku};
use bharat_integration_tests::{TestContext, backend_product, catalog_product};
use bharat_storefront::api::ShippingAddress;
use bharat_storefront::store::AddToCart;
use serde_json::json;

fn static_catalog() -> Vec<bharat_storefront::api::Product> {
    vec![
        catalog_product("BHRT-001-M", "Heritage Print T-Shirt", "mens", 1299, 15),
        catalog_product("BHRT-002-W", "Indigo Block Print Kurti", "womens", 1599, 12),
        catalog_product("BHRT-003-U", "Essential White Basics", "unisex", 899, 4),
    ]
}

fn add(sku: &str, name: &str, price: i64) -> AddToCart {
    AddToCart {
        product_id: Sku::new(sku).unwrap(),
        product_name: name.to_string(),
        price: Price::from_rupees(price),
        size: None,
        color: None,
    }
}

fn address() -> ShippingAddress {
    ShippingAddress {
        name: "Asha Rao".to_string(),
        line1: "12 MG Road".to_string(),
        line2: None,
        city: "Bengaluru".to_string(),
        state: "KA".to_string(),
        postal_code: "560001".to_string(),
        country: "IN".to_string(),
        phone: Some("+91 98765 43210".to_string()),
    }
}

#[tokio::test]
async fn test_frontend_only_mode_keeps_cart_across_page_loads() {
    let ctx = TestContext::new().await;
    ctx.mount_fallback(503).await;

    let first_id = {
        let mut page = ctx.load_page(static_catalog());
        assert!(!page.initialize().await);

        let sku = Sku::new("BHRT-002-W").unwrap();
        page.set_quantity_input(&sku, "2");
        page.select_size(&sku, "M");
        let first = page
            .add_to_cart(add("BHRT-002-W", "Indigo Block Print Kurti", 1599))
            .await;
        page.add_to_cart(add("BHRT-003-U", "Essential White Basics", 899))
            .await;
        assert!(!page.load_dynamic_products().await);
        assert_eq!(page.product_count(), 3);
        first.id
    };

    let mut page = ctx.load_page(static_catalog());
    assert_eq!(page.cart_count(), 2);
    let items = page.cart().items();
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].size.as_deref(), Some("M"));
    assert_eq!(page.cart().subtotal(), Price::from_rupees(4097));

    assert!(page.remove_from_cart(first_id));
    assert!(!page.remove_from_cart(first_id));
    assert_eq!(page.cart_count(), 1);

    let reloaded = ctx.load_page(static_catalog());
    assert_eq!(reloaded.cart_count(), 1);
}

#[tokio::test]
async fn test_wishlist_is_unique_across_page_loads() {
    let ctx = TestContext::new().await;
    ctx.mount_fallback(503).await;
    let sku = Sku::new("BHRT-001-M").unwrap();

    {
        let mut page = ctx.load_page(static_catalog());
        assert!(page.add_to_wishlist(sku.clone(), "Heritage Print T-Shirt"));
    }

    let mut page = ctx.load_page(static_catalog());
    assert!(!page.add_to_wishlist(sku.clone(), "Heritage Print T-Shirt"));
    assert_eq!(page.wishlist().len(), 1);

    let notification = page.drain_notifications().pop().unwrap();
    assert_eq!(notification.message, "Already in wishlist");
    assert_eq!(notification.level, NotificationLevel::Info);

    assert!(page.remove_from_wishlist(&sku));
    assert!(ctx.load_page(Vec::new()).wishlist().is_empty());
}

#[tokio::test]
async fn test_backend_products_replace_static_cards() {
    let ctx = TestContext::new().await;
    ctx.mount_json("GET", "/health", 200, json!({"status": "healthy"}))
        .await;
    ctx.mount_json(
        "GET",
        "/products",
        200,
        json!({
            "status": "success",
            "source": "qikink",
            "count": 2,
            "data": [
                backend_product("QK-10", "Ajrakh Shirt", "shirts", 1899, 20),
                backend_product("QK-11", "Kalamkari Tee", "tees", 999, 2)
            ]
        }),
    )
    .await;

    let mut page = ctx.load_page(static_catalog());
    assert!(page.initialize().await);
    assert!(page.load_dynamic_products().await);
    assert_eq!(page.product_count(), 2);

    page.apply_filters(&["shirts"]);
    let visible: Vec<_> = page.grid().visible().map(|c| c.sku().as_str()).collect();
    assert_eq!(visible, ["QK-10"]);

    page.apply_filters::<&str>(&[]);
    page.sort_products("price-low");
    assert_eq!(page.grid().cards()[0].sku().as_str(), "QK-11");

    let html = page.render_grid().unwrap();
    assert!(html.contains("LOW STOCK"));
    assert!(html.contains("₹1,899"));
}

#[tokio::test]
async fn test_checkout_submits_cart_lines() {
    let ctx = TestContext::new().await;
    ctx.mount_json(
        "POST",
        "/cart/add",
        201,
        json!({"status": "success", "message": "Item added to cart"}),
    )
    .await;
    ctx.mount_json(
        "POST",
        "/orders",
        201,
        json!({
            "status": "success",
            "message": "Order created successfully",
            "data": {
                "order_id": "BHRT-1718000000",
                "status": "pending",
                "total": 2598,
                "created_at": "2024-06-10T09:00:00"
            }
        }),
    )
    .await;
    ctx.mount_json(
        "GET",
        "/orders/BHRT-1718000000",
        200,
        json!({
            "status": "success",
            "data": {"order_id": "BHRT-1718000000", "status": "processing"}
        }),
    )
    .await;

    let mut page = ctx.load_page(static_catalog());
    let sku = Sku::new("BHRT-001-M").unwrap();
    page.set_quantity_input(&sku, "2");
    page.add_to_cart(add("BHRT-001-M", "Heritage Print T-Shirt", 1299))
        .await;

    let email = Email::parse("asha@example.com").unwrap();
    let items = page.cart().order_items();
    let order = page.submit_order(&email, &address(), &items).await.unwrap();
    assert_eq!(order.order_id, "BHRT-1718000000");
    assert_eq!(order.total, Some(Price::from_rupees(2598)));

    let requests = ctx.server.received_requests().await.unwrap();
    let order_request = requests
        .iter()
        .find(|r| r.url.path() == "/api/orders")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&order_request.body).unwrap();
    assert_eq!(body["customer_email"], "asha@example.com");
    assert_eq!(body["shipping_address"]["country"], "IN");
    assert_eq!(body["items"][0]["sku"], "BHRT-001-M");
    assert_eq!(body["items"][0]["quantity"], 2);

    let status = page.get_order_status("BHRT-1718000000").await.unwrap();
    assert_eq!(status.status, "processing");
}

#[tokio::test]
async fn test_rejected_order_is_none() {
    let ctx = TestContext::new().await;
    ctx.mount_json(
        "POST",
        "/orders",
        400,
        json!({"status": "error", "message": "Missing required field: items"}),
    )
    .await;

    let page = ctx.load_page(Vec::new());
    let email = Email::parse("asha@example.com").unwrap();
    assert!(page.submit_order(&email, &address(), &[]).await.is_none());
    assert!(page.get_fulfillment_status("BHRT-404").await.is_none());
}

#[tokio::test]
async fn test_fulfillment_status_is_read_unwrapped() {
    let ctx = TestContext::new().await;
    ctx.mount_json(
        "GET",
        "/qikink/fulfillment/BHRT-1",
        200,
        json!({
            "order_id": "BHRT-1",
            "status": "in_transit",
            "tracking_number": "QK123456",
            "events": [{"event": "Order received", "timestamp": "2024-06-10T09:00:00"}]
        }),
    )
    .await;
    ctx.mount_json(
        "GET",
        "/qikink/status",
        200,
        json!({"status": "connected", "mode": "sandbox", "authenticated": true}),
    )
    .await;

    let page = ctx.load_page(Vec::new());
    let status = page.get_fulfillment_status("BHRT-1").await.unwrap();
    assert_eq!(status.tracking_number.as_deref(), Some("QK123456"));
    assert_eq!(status.events.len(), 1);

    let connection = page.fulfillment_connection_status().await.unwrap();
    assert_eq!(connection.mode.as_deref(), Some("sandbox"));
}
