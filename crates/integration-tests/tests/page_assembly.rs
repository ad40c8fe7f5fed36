//! Fragment injection and grid rendering into a page shell.

#![allow(clippy::unwrap_used)]

use bharat_integration_tests::{TestContext, catalog_product};
use bharat_storefront::components::{ElementSelector, Page};
use bharat_storefront::store::AddToCart;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const SHOP_SHELL: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div id="navbar-placeholder"></div>
  <header><span class="cart-icon">Cart <span class="cart-count">0</span></span></header>
  <main>
    <p><span id="product-count">0</span> products</p>
    <div class="products-grid"><div class="product-card">placeholder</div></div>
  </main>
  <div id="footer-placeholder"></div>
</body>
</html>"#;

#[tokio::test]
async fn test_shop_page_is_assembled_without_backend() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/templates/components/navbar.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<nav class="navbar">Shop</nav>"#))
        .mount(&ctx.server)
        .await;
    ctx.mount_fallback(503).await;

    let mut page = Page::new(SHOP_SHELL);
    let loaded = ctx.component_loader().initialize_components(&mut page).await;
    assert_eq!(loaded, 1);

    let mut storefront = ctx.load_page(vec![
        catalog_product("BHRT-001-M", "Heritage Print T-Shirt", "mens", 1299, 15),
        catalog_product("BHRT-003-U", "Essential <b>White</b> Basics", "unisex", 899, 25),
    ]);
    storefront
        .add_to_cart(AddToCart {
            product_id: bharat_core::Sku::new("BHRT-001-M").unwrap(),
            product_name: "Heritage Print T-Shirt".to_string(),
            price: bharat_core::Price::from_rupees(1299),
            size: None,
            color: None,
        })
        .await;
    assert!(!storefront.load_dynamic_products().await);
    storefront.search_products("heritage");
    storefront.apply_to(&mut page).unwrap();

    assert_eq!(
        page.inner_html(&ElementSelector::id("navbar-placeholder")),
        Some(r#"<nav class="navbar">Shop</nav>"#)
    );
    assert_eq!(page.inner_html(&ElementSelector::id("footer-placeholder")), Some(""));
    assert_eq!(page.inner_html(&ElementSelector::class("cart-count")), Some("1"));
    assert_eq!(page.inner_html(&ElementSelector::id("product-count")), Some("2"));

    let grid = page
        .inner_html(&ElementSelector::class("products-grid"))
        .unwrap();
    assert!(!grid.contains("placeholder"));
    assert!(grid.contains(r#"data-product-id="BHRT-001-M""#));
    assert!(grid.contains("Essential &lt;b&gt;White&lt;/b&gt; Basics"));
    assert_eq!(grid.matches(r#"style="display: none""#).count(), 1);
}
