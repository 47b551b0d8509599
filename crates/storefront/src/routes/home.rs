//! Full-page rendering.
//!
//! Both storefront pages share one template. Each page names the surfaces it
//! carries and [`PageView::bootstrap`] fills those in; the template skips the
//! rest.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::Datelike;
use legumechanics_core::{Notice, PageContext, PageView, Surfaces};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_slot::current_cart;
use crate::state::AppState;

/// Storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub title: &'static str,
    pub page: PageView,
    pub notice: Option<Notice>,
}

/// Bootstrap a page for the session's current cart.
pub async fn render_page(
    state: &AppState,
    session: &Session,
    title: &'static str,
    surfaces: Surfaces,
    notice: Option<Notice>,
) -> PageTemplate {
    let cart = current_cart(session).await;
    let ctx = PageContext {
        catalog: state.catalog(),
        cart: &cart,
        order: state.product_order(),
        money: state.money(),
        year: chrono::Utc::now().year(),
    };

    PageTemplate {
        title,
        page: PageView::bootstrap(surfaces, &ctx),
        notice,
    }
}

/// Display the product grid page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    render_page(&state, &session, "Productos", Surfaces::products_page(), None).await
}
