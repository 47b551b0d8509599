//! View models for the storefront surfaces.
//!
//! Everything here is a pure projection of catalog and cart state into
//! display-ready data: formatted prices, quantity labels, empty-state copy.
//! Presentation layers (HTML templates, the terminal) only lay these out.

use core::str::FromStr;

use serde::Serialize;

use crate::cart::{Cart, line_subtotal};
use crate::catalog::{Catalog, Product};
use crate::types::{MoneyFormatter, ProductId};

/// Cart-count badge value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct BadgeCount(u64);

impl BadgeCount {
    /// Badge value for a cart: the sum of all quantities.
    #[must_use]
    pub fn of(cart: &Cart) -> Self {
        Self(cart.count())
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for BadgeCount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product grid
// =============================================================================

/// Explicit display order of the product grid.
///
/// Independent of catalog iteration order. Ids the catalog does not know are
/// skipped when the grid is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOrder(Vec<ProductId>);

impl ProductOrder {
    #[must_use]
    pub const fn new(ids: Vec<ProductId>) -> Self {
        Self(ids)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductId> {
        self.0.iter()
    }
}

impl Default for ProductOrder {
    fn default() -> Self {
        Self(
            [
                "pea-protein",
                "energy-bar",
                "recovery-doybag350",
                "pack-legumechanics",
            ]
            .into_iter()
            .map(ProductId::new)
            .collect(),
        )
    }
}

impl FromStr for ProductOrder {
    type Err = std::convert::Infallible;

    /// Parse a comma-separated id list, ignoring blanks.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            s.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(ProductId::new)
                .collect(),
        ))
    }
}

/// One product card in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub image: String,
    pub name: String,
    pub tag: String,
    pub subtitle: String,
    pub price: String,
    pub badge: String,
    pub details: String,
    pub meta_left: String,
    pub meta_right: String,
}

impl ProductCard {
    fn new(product: &Product, fmt: &MoneyFormatter) -> Self {
        Self {
            id: product.id.clone(),
            image: product.image.clone(),
            name: product.name.clone(),
            tag: product.tag.clone(),
            subtitle: product.subtitle.clone(),
            price: fmt.format(product.price),
            badge: product.badge.clone(),
            details: product.details.clone(),
            meta_left: product.meta_left.clone(),
            meta_right: product.meta_right.clone(),
        }
    }
}

/// Cards for every id in `order` that the catalog knows, in that order.
#[must_use]
pub fn product_grid(catalog: &Catalog, order: &ProductOrder, fmt: &MoneyFormatter) -> Vec<ProductCard> {
    order
        .iter()
        .filter_map(|id| catalog.get(id))
        .map(|product| ProductCard::new(product, fmt))
        .collect()
}

// =============================================================================
// Cart summaries
// =============================================================================

/// Which summary surface is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    MiniCart,
    Checkout,
}

impl SummaryKind {
    /// Copy shown when the cart has no entries.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::MiniCart => "Tu carrito está vacío.",
            Self::Checkout => {
                "Tu carrito está vacío. Vuelve a la página de productos para elegir tus suplementos."
            }
        }
    }

    /// Quantity caption under each line name.
    #[must_use]
    pub fn quantity_label(self, qty: u32) -> String {
        match self {
            Self::MiniCart => format!("Cantidad: {qty}"),
            Self::Checkout => format!("x{qty}"),
        }
    }
}

/// One line of a cart summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub quantity_label: String,
    pub subtotal: String,
}

/// Line items and grand total of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub kind: SummaryKind,
    pub lines: Vec<LineItem>,
    pub total: String,
    /// Set only when the cart has no entries at all.
    pub empty_message: Option<&'static str>,
}

impl CartSummary {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.empty_message.is_some()
    }
}

/// Project a cart into a summary for one surface.
///
/// Lines are emitted for known products only. The empty-state copy is shown
/// only for a cart with zero entries; a cart holding only unknown products
/// renders no lines and no empty message. The total is always set.
#[must_use]
pub fn cart_summary(
    kind: SummaryKind,
    cart: &Cart,
    catalog: &Catalog,
    fmt: &MoneyFormatter,
) -> CartSummary {
    let lines = cart
        .lines(catalog)
        .map(|(product, entry)| LineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            quantity: entry.qty.get(),
            quantity_label: kind.quantity_label(entry.qty.get()),
            subtotal: fmt.format(line_subtotal(product, entry)),
        })
        .collect();

    let total = fmt.format(cart.total(catalog));

    CartSummary {
        kind,
        lines,
        total,
        empty_message: cart.is_empty().then_some(kind.empty_message()),
    }
}

// =============================================================================
// Mini-cart panel
// =============================================================================

/// What a click inside the mini-cart overlay landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay itself, outside the panel content.
    Backdrop,
    /// Anything inside the panel content.
    Content,
}

/// Visibility state of the mini-cart overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MiniCartPanel {
    summary: Option<CartSummary>,
}

impl MiniCartPanel {
    /// A hidden panel.
    #[must_use]
    pub const fn closed() -> Self {
        Self { summary: None }
    }

    /// Render the current cart, then reveal the panel.
    pub fn open(&mut self, cart: &Cart, catalog: &Catalog, fmt: &MoneyFormatter) {
        self.summary = Some(cart_summary(SummaryKind::MiniCart, cart, catalog, fmt));
    }

    /// Hide the panel.
    pub fn close(&mut self) {
        self.summary = None;
    }

    /// Dismiss on a click that hits the backdrop itself.
    pub fn click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close();
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.summary.is_some()
    }

    #[must_use]
    pub const fn summary(&self) -> Option<&CartSummary> {
        self.summary.as_ref()
    }
}
