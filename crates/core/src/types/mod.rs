//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for product identifiers,
//! cart quantities, and money formatting.

pub mod id;
pub mod price;
pub mod quantity;

pub use id::ProductId;
pub use price::{CurrencyCode, FormatError, Locale, MoneyFormatter};
pub use quantity::{Quantity, QuantityError};
