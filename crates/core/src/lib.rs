//! Legumechanics Core - catalog, cart, and storefront view models.
//!
//! This crate holds the storefront's only business logic:
//! - a static product [`catalog`],
//! - the [`cart`] model and its persisted [`store`] slot,
//! - cart [`ops`] (add, buy now, count, total),
//! - pure [`view`] models and the [`page`] bootstrap consumed by presentation
//!   layers (`storefront` over HTTP, `cli` in a terminal).
//!
//! # Architecture
//!
//! No I/O happens here. Persistence goes through the [`KeyValueStore`] trait,
//! which each presentation layer implements over its own storage.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod notice;
pub mod ops;
pub mod page;
pub mod store;
pub mod types;
pub mod view;

pub use cart::{Cart, CartEntry};
pub use catalog::{Catalog, CatalogError, Product};
pub use notice::Notice;
pub use ops::{AddOutcome, BuyNowOutcome, CHECKOUT_PATH, add_to_cart, buy_now, cart_count, cart_total};
pub use page::{CheckoutForm, PageContext, PageView, Surfaces};
pub use store::{
    CART_KEY, CartLoad, CartRepository, CartStore, CartStoreError, EmptyReason, KeyValueStore,
    MemoryStore, Saved, StorageError,
};
pub use types::*;
pub use view::{
    BadgeCount, CartSummary, ClickTarget, LineItem, MiniCartPanel, ProductCard, ProductOrder,
    SummaryKind, cart_summary, product_grid,
};
