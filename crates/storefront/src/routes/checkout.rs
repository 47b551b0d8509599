//! Checkout route handlers.
//!
//! Checkout is a demonstration: submitting the form takes no payment and
//! never navigates. It only shows the "order completed (demo)" notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use legumechanics_core::{CheckoutForm, Notice, Surfaces};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_slot::current_cart;
use crate::routes::cart::is_htmx;
use crate::routes::home::render_page;
use crate::state::AppState;

/// Notice fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/notice.html")]
pub struct NoticeTemplate {
    pub notice: Notice,
}

/// Display the checkout page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    render_page(&state, &session, "Checkout", Surfaces::checkout_page(), None).await
}

/// Handle the demo checkout submit.
#[instrument(skip(state, session, headers))]
pub async fn submit(State(state): State<AppState>, session: Session, headers: HeaderMap) -> Response {
    let cart = current_cart(&session).await;
    let notice = CheckoutForm::demo().submit_notice;
    tracing::info!(
        items = cart.count(),
        total = %state.money().format(cart.total(state.catalog())),
        "Demo order submitted"
    );

    if is_htmx(&headers) {
        return NoticeTemplate { notice }.into_response();
    }

    render_page(
        &state,
        &session,
        "Checkout",
        Surfaces::checkout_page(),
        Some(notice),
    )
    .await
    .into_response()
}
