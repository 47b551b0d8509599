//! Cart operations.
//!
//! Each mutating operation is a full read-modify-write of the persisted cart
//! through an injected [`CartRepository`]. There is no locking: two writers on
//! the same slot resolve as last-write-wins.

use rust_decimal::Decimal;
use tracing::info;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::notice::Notice;
use crate::store::{CartRepository, CartStoreError};
use crate::types::ProductId;
use crate::view::BadgeCount;

/// Where buy-now sends the shopper.
pub const CHECKOUT_PATH: &str = "/checkout";

/// Result of [`add_to_cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub cart: Cart,
    pub badge: BadgeCount,
    pub notice: Notice,
}

/// Result of [`buy_now`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyNowOutcome {
    pub cart: Cart,
    pub badge: BadgeCount,
    pub redirect: &'static str,
}

/// Add one unit of `id` to the persisted cart.
///
/// Not idempotent: every call increments. The id is not checked against the
/// catalog.
///
/// # Errors
///
/// Returns an error if the updated cart cannot be saved.
pub fn add_to_cart<R: CartRepository + ?Sized>(
    repo: &mut R,
    id: ProductId,
) -> Result<AddOutcome, CartStoreError> {
    let mut cart = repo.load().into_cart();
    cart.add_one(id.clone());
    let saved = repo.save(&cart)?;

    info!(product_id = %id, count = saved.badge.get(), "Added to cart");
    Ok(AddOutcome {
        cart,
        badge: saved.badge,
        notice: Notice::ItemAdded,
    })
}

/// Replace the persisted cart with a single unit of `id`.
///
/// Whatever the cart held before is discarded.
///
/// # Errors
///
/// Returns an error if the replacement cart cannot be saved.
pub fn buy_now<R: CartRepository + ?Sized>(
    repo: &mut R,
    id: ProductId,
) -> Result<BuyNowOutcome, CartStoreError> {
    let cart = Cart::single(id.clone());
    let saved = repo.save(&cart)?;

    info!(product_id = %id, "Buy now");
    Ok(BuyNowOutcome {
        cart,
        badge: saved.badge,
        redirect: CHECKOUT_PATH,
    })
}

/// Sum of all quantities in the persisted cart.
pub fn cart_count<R: CartRepository + ?Sized>(repo: &R) -> u64 {
    repo.load().into_cart().count()
}

/// Total price of the persisted cart's known products.
pub fn cart_total<R: CartRepository + ?Sized>(repo: &R, catalog: &Catalog) -> Decimal {
    repo.load().into_cart().total(catalog)
}
