//! Integration tests for the storefront cart flows.
//!
//! These drive the running server over HTTP: add to cart, buy now, the mini
//! cart, and the demo checkout, with the session cookie carried between
//! requests.

#![allow(clippy::unwrap_used)]

use legumechanics_integration_tests::TestContext;
use reqwest::{Client, StatusCode};

async fn add(ctx: &TestContext, client: &Client, id: &str) -> reqwest::Response {
    client
        .post(ctx.url("/cart/add"))
        .header("HX-Request", "true")
        .form(&[("product_id", id)])
        .send()
        .await
        .unwrap()
}

async fn page(ctx: &TestContext, client: &Client, path: &str) -> String {
    client.get(ctx.url(path)).send().await.unwrap().text().await.unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_storefront_health() {
    let ctx = TestContext::new().await;
    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

// =============================================================================
// Cart Flows
// =============================================================================

#[tokio::test]
async fn test_add_twice_plus_one_other_totals_29_90() {
    let ctx = TestContext::new().await;

    for id in ["energy-bar", "energy-bar", "pea-protein"] {
        let resp = add(&ctx, &ctx.client, id).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("HX-Trigger").unwrap(), "cart-updated");
    }

    let count = page(&ctx, &ctx.client, "/cart/count").await;
    assert_eq!(
        count.trim(),
        r#"<span id="lm-cart-count" hx-get="/cart/count" hx-trigger="cart-updated from:body" hx-swap="outerHTML">3</span>"#
    );

    let checkout = page(&ctx, &ctx.client, "/checkout").await;
    assert!(checkout.contains("x2"));
    assert!(checkout.contains("5,00\u{a0}€"));
    assert!(checkout.contains("29,90\u{a0}€"));
}

#[tokio::test]
async fn test_buy_now_replaces_cart_and_lands_on_checkout() {
    let ctx = TestContext::new().await;
    add(&ctx, &ctx.client, "pea-protein").await;
    add(&ctx, &ctx.client, "pack-legumechanics").await;

    // Plain form post: 303 to /checkout, followed by the client
    let resp = ctx
        .client
        .post(ctx.url("/cart/buy-now"))
        .form(&[("product_id", "energy-bar")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/checkout");

    let html = resp.text().await.unwrap();
    assert!(html.contains("Energy Bar"));
    assert!(html.contains(r#"<strong id="lm-checkout-total">2,50"#));
    assert!(html.contains(r#"hx-swap="outerHTML">1</span>"#));
}

#[tokio::test]
async fn test_empty_checkout_shows_empty_copy() {
    let ctx = TestContext::new().await;
    let html = page(&ctx, &ctx.client, "/checkout").await;
    assert!(html.contains(
        "Tu carrito está vacío. Vuelve a la página de productos para elegir tus suplementos."
    ));
    assert!(html.contains(r#"<strong id="lm-checkout-total">0,00"#));
}

#[tokio::test]
async fn test_mini_cart_reflects_adds() {
    let ctx = TestContext::new().await;
    add(&ctx, &ctx.client, "recovery-doybag350").await;

    let html = page(&ctx, &ctx.client, "/cart/mini").await;
    assert!(html.contains("is-open"));
    assert!(html.contains("Recovery Gummies"));
    assert!(html.contains("Cantidad: 1"));
    assert!(html.contains("14,90\u{a0}€"));
}

#[tokio::test]
async fn test_unknown_product_counts_but_adds_nothing_to_total() {
    let ctx = TestContext::new().await;
    add(&ctx, &ctx.client, "bote500").await;

    let count = page(&ctx, &ctx.client, "/cart/count").await;
    assert!(count.contains(">1<"));

    let checkout = page(&ctx, &ctx.client, "/checkout").await;
    assert!(checkout.contains(r#"<strong id="lm-checkout-total">0,00"#));
    assert!(!checkout.contains("Tu carrito está vacío"));
}

#[tokio::test]
async fn test_shoppers_have_separate_carts() {
    let ctx = TestContext::new().await;
    add(&ctx, &ctx.client, "energy-bar").await;

    let other = TestContext::shopper();
    let count = page(&ctx, &other, "/cart/count").await;
    assert!(count.contains(">0<"));
}

// =============================================================================
// Demo Checkout
// =============================================================================

#[tokio::test]
async fn test_demo_checkout_submit_takes_no_payment() {
    let ctx = TestContext::new().await;
    add(&ctx, &ctx.client, "energy-bar").await;

    let resp = ctx
        .client
        .post(ctx.url("/checkout"))
        .form(&[("name", "Ana"), ("email", "ana@example.com"), ("address", "Calle Mayor 1")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/checkout");

    let html = resp.text().await.unwrap();
    assert!(html.contains("Pedido de demostración completado"));

    // The cart is untouched by the demo order
    let count = page(&ctx, &ctx.client, "/cart/count").await;
    assert!(count.contains(">1<"));
}
