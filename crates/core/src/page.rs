//! Page bootstrap.
//!
//! A page declares which surfaces it carries. [`PageView::bootstrap`] fills in
//! every surface that is present and leaves the rest as `None`, so the same
//! bootstrap runs unchanged on the product page and the checkout page.

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::notice::Notice;
use crate::types::MoneyFormatter;
use crate::view::{
    BadgeCount, CartSummary, MiniCartPanel, ProductCard, ProductOrder, SummaryKind, cart_summary,
    product_grid,
};

/// Named placeholders a page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Surfaces {
    pub year: bool,
    pub badge: bool,
    pub product_grid: bool,
    pub mini_cart: bool,
    pub checkout_summary: bool,
    pub checkout_form: bool,
}

impl Surfaces {
    /// The product listing page.
    #[must_use]
    pub const fn products_page() -> Self {
        Self {
            year: true,
            badge: true,
            product_grid: true,
            mini_cart: true,
            checkout_summary: false,
            checkout_form: false,
        }
    }

    /// The checkout page.
    #[must_use]
    pub const fn checkout_page() -> Self {
        Self {
            year: true,
            badge: true,
            product_grid: false,
            mini_cart: true,
            checkout_summary: true,
            checkout_form: true,
        }
    }
}

/// The demo checkout form.
///
/// Submitting never navigates; it only shows [`Notice::DemoOrderCompleted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutForm {
    pub submit_notice: Notice,
}

impl CheckoutForm {
    #[must_use]
    pub const fn demo() -> Self {
        Self {
            submit_notice: Notice::DemoOrderCompleted,
        }
    }
}

/// Everything bootstrap needs to render a page.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub catalog: &'a Catalog,
    pub cart: &'a Cart,
    pub order: &'a ProductOrder,
    pub money: &'a MoneyFormatter,
    pub year: i32,
}

/// Rendered surfaces of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub year: Option<i32>,
    pub badge: Option<BadgeCount>,
    pub product_grid: Option<Vec<ProductCard>>,
    pub checkout_summary: Option<CartSummary>,
    pub checkout_form: Option<CheckoutForm>,
    /// Starts closed; dismissal on backdrop click is wired for it.
    pub mini_cart: Option<MiniCartPanel>,
}

impl PageView {
    /// Render every present surface of a page.
    #[must_use]
    pub fn bootstrap(surfaces: Surfaces, ctx: &PageContext<'_>) -> Self {
        Self {
            year: surfaces.year.then_some(ctx.year),
            badge: surfaces.badge.then(|| BadgeCount::of(ctx.cart)),
            product_grid: surfaces
                .product_grid
                .then(|| product_grid(ctx.catalog, ctx.order, ctx.money)),
            checkout_summary: surfaces.checkout_summary.then(|| {
                cart_summary(SummaryKind::Checkout, ctx.cart, ctx.catalog, ctx.money)
            }),
            checkout_form: surfaces.checkout_form.then(CheckoutForm::demo),
            mini_cart: surfaces.mini_cart.then(MiniCartPanel::closed),
        }
    }
}
