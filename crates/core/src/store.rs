//! Cart persistence.
//!
//! The cart lives in a single slot of a key-value store, serialized as a JSON
//! array under [`CART_KEY`]. The schema version is part of the key name; a
//! value that does not parse as that schema is treated as an empty cart.
//!
//! Loading never fails. Every fallback is reported through [`CartLoad`] so
//! callers and tests can see why a cart came back empty. Saving does fail:
//! storage errors propagate as [`CartStoreError`].

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cart::Cart;
use crate::view::BadgeCount;

/// Storage key for the persisted cart. The `v1` suffix is the schema version.
pub const CART_KEY: &str = "lm_cart_v1";

/// Error raised by a [`KeyValueStore`] backend.
#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create an error with a message and no underlying cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping an underlying cause.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Errors that can occur when saving a cart.
#[derive(thiserror::Error, Debug)]
pub enum CartStoreError {
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write cart: {0}")]
    Storage(#[from] StorageError),
}

/// A string key-value slot store, in the manner of browser local storage.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    dirty: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one value.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            values,
            dirty: false,
        }
    }

    /// Whether any value has been written since construction.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Raw value under `key`, if any.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        self.dirty = true;
        Ok(())
    }
}

/// Why a load produced an empty cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// Nothing stored under the key (or an empty string).
    Missing,
    /// The backend could not be read.
    Unreadable(String),
    /// The value is not JSON.
    InvalidJson(String),
    /// The value is JSON but not an array.
    NotAnArray,
    /// The value is an array holding something other than cart entries.
    InvalidEntry(String),
}

/// Outcome of [`CartRepository::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartLoad {
    Loaded(Cart),
    Empty(EmptyReason),
}

impl CartLoad {
    /// The loaded cart, or an empty one for every fallback.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        match self {
            Self::Loaded(cart) => cart,
            Self::Empty(_) => Cart::new(),
        }
    }

    /// Parse a raw persisted value.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return Self::Empty(EmptyReason::Missing);
        };

        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => return Self::Empty(EmptyReason::InvalidJson(e.to_string())),
        };

        if !value.is_array() {
            return Self::Empty(EmptyReason::NotAnArray);
        }

        match serde_json::from_value::<Cart>(value) {
            Ok(cart) => Self::Loaded(cart),
            Err(e) => Self::Empty(EmptyReason::InvalidEntry(e.to_string())),
        }
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Saved {
    /// Cart badge value after the save.
    pub badge: BadgeCount,
}

/// Load/save capability for the cart.
pub trait CartRepository {
    /// Load the persisted cart. Never fails; see [`CartLoad`].
    fn load(&self) -> CartLoad;

    /// Persist the full cart, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be serialized or written.
    fn save(&mut self, cart: &Cart) -> Result<Saved, CartStoreError>;
}

/// [`CartRepository`] over a [`KeyValueStore`] slot.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Use the standard [`CART_KEY`] slot.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_KEY)
    }

    /// Use a custom slot key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStore> CartRepository for CartStore<S> {
    fn load(&self) -> CartLoad {
        let load = match self.storage.get(&self.key) {
            Ok(raw) => CartLoad::parse(raw.as_deref()),
            Err(e) => CartLoad::Empty(EmptyReason::Unreadable(e.to_string())),
        };

        match &load {
            CartLoad::Empty(EmptyReason::Missing) => debug!(key = %self.key, "No persisted cart"),
            CartLoad::Empty(reason) => {
                warn!(key = %self.key, ?reason, "Discarding persisted cart");
            }
            CartLoad::Loaded(_) => {}
        }

        load
    }

    fn save(&mut self, cart: &Cart) -> Result<Saved, CartStoreError> {
        let raw = serde_json::to_string(cart)?;
        self.storage.set(&self.key, raw)?;

        let badge = BadgeCount::of(cart);
        debug!(key = %self.key, count = badge.get(), "Cart saved");
        Ok(Saved { badge })
    }
}
