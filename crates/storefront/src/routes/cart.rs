//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Without HTMX the same forms post normally and get a full page back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use legumechanics_core::{
    BadgeCount, CartStore, MiniCartPanel, Notice, ProductId, Surfaces, add_to_cart, buy_now,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_slot::{SessionSlot, current_cart};
use crate::error::{AppError, Result, add_cart_breadcrumb};
use crate::routes::home::render_page;
use crate::state::AppState;

/// Event fired on the client after every cart save. The badge listens for
/// it and reloads itself from `/cart/count`.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Add-to-cart and buy-now form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: String,
}

impl ProductForm {
    fn product_id(&self) -> Result<ProductId> {
        let id = self.product_id.trim();
        if id.is_empty() {
            return Err(AppError::BadRequest("missing product_id".to_string()));
        }
        Ok(ProductId::new(id))
    }
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: BadgeCount,
}

/// Out-of-band notice returned after an add.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_added.html")]
pub struct CartAddedTemplate {
    pub notice: Notice,
}

/// Mini-cart overlay fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/mini_cart.html")]
pub struct MiniCartTemplate {
    pub panel: MiniCartPanel,
}

/// Whether the request was issued by HTMX.
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Add one unit of a product to the cart.
///
/// HTMX requests get the "added" notice and a `cart-updated` trigger.
/// Plain form posts get the product grid back with the notice shown.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let id = form.product_id()?;
    add_cart_breadcrumb("add_to_cart", id.as_str());

    let mut slot = SessionSlot::read(&session).await;
    let mut repo = CartStore::new(&mut slot);
    let outcome = add_to_cart(&mut repo, id)?;
    slot.flush(&session).await?;

    if !is_htmx(&headers) {
        let page = render_page(
            &state,
            &session,
            "Productos",
            Surfaces::products_page(),
            Some(outcome.notice),
        )
        .await;
        return Ok(page.into_response());
    }

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartAddedTemplate {
            notice: outcome.notice,
        },
    )
        .into_response())
}

/// Replace the cart with one unit of a product and go to checkout.
#[instrument(skip(session, headers))]
pub async fn buy_now_handler(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let id = form.product_id()?;
    add_cart_breadcrumb("buy_now", id.as_str());

    let mut slot = SessionSlot::read(&session).await;
    let mut repo = CartStore::new(&mut slot);
    let outcome = buy_now(&mut repo, id)?;
    slot.flush(&session).await?;

    if is_htmx(&headers) {
        return Ok((
            AppendHeaders([("HX-Redirect", outcome.redirect)]),
            StatusCode::OK,
        )
            .into_response());
    }

    Ok(Redirect::to(outcome.redirect).into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    CartCountTemplate {
        count: BadgeCount::of(&current_cart(&session).await),
    }
}

/// Open the mini cart: render the current cart, then reveal the overlay.
#[instrument(skip(state, session))]
pub async fn open_mini_cart(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = current_cart(&session).await;
    let mut panel = MiniCartPanel::closed();
    panel.open(&cart, state.catalog(), state.money());
    MiniCartTemplate { panel }
}

/// Close the mini cart.
pub async fn close_mini_cart() -> impl IntoResponse {
    MiniCartTemplate {
        panel: MiniCartPanel::closed(),
    }
}
