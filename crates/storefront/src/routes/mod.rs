//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Product grid page
//! GET  /health             - Health check
//!
//! # Cart (HTMX fragments)
//! POST /cart/add           - Add to cart (returns notice, triggers cart-updated)
//! POST /cart/buy-now       - Replace cart with one item, redirect to checkout
//! GET  /cart/count         - Cart count badge (fragment)
//! GET  /cart/mini          - Open mini cart (fragment)
//! GET  /cart/mini/close    - Close mini cart (fragment)
//!
//! # Checkout
//! GET  /checkout           - Checkout summary page
//! POST /checkout           - Demo order submit (notice only, no payment)
//! ```

pub mod cart;
pub mod checkout;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/buy-now", post(cart::buy_now_handler))
        .route("/count", get(cart::count))
        .route("/mini", get(cart::open_mini_cart))
        .route("/mini/close", get(cart::close_mini_cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
}
