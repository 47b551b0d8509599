//! Legumechanics Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart_slot;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, http::Request, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::Span;

use crate::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Build the storefront router with its full middleware stack.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::response::Response, latency: std::time::Duration, _span: &Span| {
                        tracing::info!(
                            status = response.status().as_u16(),
                            latency_ms = latency.as_millis(),
                            "Response"
                        );
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use legumechanics_core::Catalog;
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;

    fn test_app() -> Router {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        app(AppState::with_catalog(config, Catalog::builtin()))
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn post_form(uri: &str, body: &str, cookie: Option<&str>, htmx: bool) -> Request<Body> {
        let mut builder = Request::post(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if htmx {
            builder = builder.header("HX-Request", "true");
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_with(uri: &str, cookie: &str) -> Request<Body> {
        Request::get(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_home_renders_grid_and_zero_badge() {
        let response = test_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert!(response.headers().contains_key(header::CONTENT_SECURITY_POLICY));

        let html = body_text(response).await;
        assert!(html.contains(r#"hx-trigger="cart-updated from:body" hx-swap="outerHTML">0</span>"#));
        assert!(html.contains("Pack Legumechanics"));
        assert!(html.contains("24,90\u{a0}€"));
        assert!(!html.contains("lm-checkout-items"));
    }

    #[tokio::test]
    async fn test_add_then_checkout_totals() {
        let app = test_app();

        let first = app
            .clone()
            .oneshot(post_form("/cart/add", "product_id=energy-bar", None, true))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.headers().get("HX-Trigger").unwrap(), "cart-updated");
        let cookie = session_cookie(&first);
        let html = body_text(first).await;
        assert!(html.contains(r#"id="lm-notice""#));
        assert!(html.contains(r#"hx-swap-oob="true""#));
        assert!(html.contains("Producto añadido al carrito"));
        assert!(!html.contains("lm-cart-count"));

        for id in ["energy-bar", "pea-protein"] {
            let response = app
                .clone()
                .oneshot(post_form("/cart/add", &format!("product_id={id}"), Some(&cookie), true))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let count = app.clone().oneshot(get_with("/cart/count", &cookie)).await.unwrap();
        let count = body_text(count).await;
        assert!(count.contains(r#"hx-trigger="cart-updated from:body""#));
        assert!(count.contains(">3<"));

        let checkout = app.oneshot(get_with("/checkout", &cookie)).await.unwrap();
        let html = body_text(checkout).await;
        assert!(html.contains("x2"));
        assert!(html.contains("29,90\u{a0}€"));
    }

    #[tokio::test]
    async fn test_buy_now_replaces_cart() {
        let app = test_app();

        let added = app
            .clone()
            .oneshot(post_form("/cart/add", "product_id=pea-protein", None, true))
            .await
            .unwrap();
        let cookie = session_cookie(&added);

        let bought = app
            .clone()
            .oneshot(post_form("/cart/buy-now", "product_id=energy-bar", Some(&cookie), true))
            .await
            .unwrap();
        assert_eq!(bought.status(), StatusCode::OK);
        assert_eq!(bought.headers().get("HX-Redirect").unwrap(), "/checkout");

        let checkout = app.oneshot(get_with("/checkout", &cookie)).await.unwrap();
        let html = body_text(checkout).await;
        assert!(html.contains("lm-checkout-item"));
        assert!(html.contains("x1"));
        assert!(html.contains("2,50\u{a0}€"));
        assert!(!html.contains("24,90\u{a0}€"));
        assert!(html.contains(r#"hx-swap="outerHTML">1</span>"#));
    }

    #[tokio::test]
    async fn test_add_forms_refresh_badge_through_event() {
        let response = test_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains(r#"hx-post="/cart/add" hx-swap="none""#));
        assert!(html.contains(r#"<span id="lm-cart-count" hx-get="/cart/count""#));
    }

    #[tokio::test]
    async fn test_add_without_htmx_shows_notice() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(post_form("/cart/add", "product_id=energy-bar", None, false))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("HX-Trigger").is_none());
        let cookie = session_cookie(&response);

        let html = body_text(response).await;
        assert!(html.contains("Producto añadido al carrito"));
        assert!(html.contains("Pack Legumechanics"));
        assert!(html.contains(r#"hx-swap="outerHTML">1</span>"#));

        let count = app.oneshot(get_with("/cart/count", &cookie)).await.unwrap();
        assert!(body_text(count).await.contains(">1<"));
    }

    #[tokio::test]
    async fn test_buy_now_without_htmx_redirects() {
        let response = test_app()
            .oneshot(post_form("/cart/buy-now", "product_id=energy-bar", None, false))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/checkout");
    }

    #[tokio::test]
    async fn test_product_images_are_served() {
        let config = StorefrontConfig::from_lookup(|key| {
            (key == "LM_STATIC_DIR").then(|| concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string())
        })
        .unwrap();
        let app = app(AppState::with_catalog(config, Catalog::builtin()));

        let home = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(home).await;
        let images: Vec<&str> = html
            .split(r#"<img src=""#)
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();
        assert_eq!(images.len(), Catalog::builtin().len());

        for src in images {
            let response = app
                .clone()
                .oneshot(Request::get(src).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{src}");
            assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "image/svg+xml");
        }
    }

    #[tokio::test]
    async fn test_add_rejects_blank_product() {
        let response = test_app()
            .oneshot(post_form("/cart/add", "product_id=", None, true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_checkout_copy() {
        let response = test_app()
            .oneshot(Request::get("/checkout").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Vuelve a la página de productos"));
        assert!(html.contains("0,00\u{a0}€"));
    }

    #[tokio::test]
    async fn test_mini_cart_open_and_close() {
        let app = test_app();
        let opened = app
            .clone()
            .oneshot(Request::get("/cart/mini").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(opened).await;
        assert!(html.contains("is-open"));
        assert!(html.contains("Tu carrito está vacío."));

        let closed = app
            .oneshot(Request::get("/cart/mini/close").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(!body_text(closed).await.contains("is-open"));
    }

    #[tokio::test]
    async fn test_demo_checkout_submit_shows_notice() {
        let response = test_app()
            .oneshot(post_form("/checkout", "name=Ana", None, true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Pedido de demostración completado"));
    }
}
