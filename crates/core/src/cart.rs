//! The cart model.
//!
//! A cart is an ordered list of `{id, qty}` entries. Insertion order is the
//! display order, and [`Cart::add_one`] never produces two entries for the
//! same product. Entries may name products the catalog does not know; those
//! count towards [`Cart::count`] but are skipped by [`Cart::total`] and
//! [`Cart::lines`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{ProductId, Quantity};

/// One product line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ProductId,
    pub qty: Quantity,
}

impl CartEntry {
    #[must_use]
    pub const fn new(id: ProductId, qty: Quantity) -> Self {
        Self { id, qty }
    }
}

/// An ordered sequence of cart entries.
///
/// Serializes as a bare JSON array: `[{"id":"energy-bar","qty":2}]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A cart holding exactly one unit of `id`.
    #[must_use]
    pub fn single(id: ProductId) -> Self {
        Self {
            entries: vec![CartEntry::new(id, Quantity::ONE)],
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add one unit of `id`, incrementing its entry or appending a new one.
    pub fn add_one(&mut self, id: ProductId) {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.qty = entry.qty.incremented(),
            None => self.entries.push(CartEntry::new(id, Quantity::ONE)),
        }
    }

    /// Total number of units, unknown products included.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.qty.get()))
            .sum()
    }

    /// Sum of `price × qty` over entries the catalog knows.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Decimal {
        self.lines(catalog)
            .map(|(product, entry)| line_subtotal(product, entry))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Entries paired with their catalog product, in cart order.
    pub fn lines<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = (&'a Product, &'a CartEntry)> + 'a {
        self.entries
            .iter()
            .filter_map(|entry| catalog.get(&entry.id).map(|product| (product, entry)))
    }
}

impl FromIterator<CartEntry> for Cart {
    fn from_iter<I: IntoIterator<Item = CartEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// `price × qty` for one line, saturating at [`Decimal::MAX`].
#[must_use]
pub fn line_subtotal(product: &Product, entry: &CartEntry) -> Decimal {
    product.price.saturating_mul(Decimal::from(entry.qty.get()))
}
