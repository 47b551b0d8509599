//! Session-backed cart slot.
//!
//! The shopper's cart is kept in their session under [`CART_KEY`], as the raw
//! JSON string the core serializes. A request snapshots the slot, runs the
//! synchronous cart operations against the snapshot, then writes the slot
//! back if anything changed. Concurrent requests on the same session resolve
//! as last-write-wins.

use legumechanics_core::{CART_KEY, Cart, CartRepository, CartStore, KeyValueStore, StorageError};
use tower_sessions::Session;

use crate::error::Result;

/// Snapshot of one session's cart slot.
#[derive(Debug)]
pub struct SessionSlot {
    /// Value read from the session, or the read error message.
    current: std::result::Result<Option<String>, String>,
    /// Value to write back on [`SessionSlot::flush`].
    pending: Option<String>,
}

impl SessionSlot {
    /// Snapshot the cart slot of `session`.
    ///
    /// A read failure is kept in the snapshot rather than returned, so loading
    /// the cart falls back to empty like any other unreadable value.
    pub async fn read(session: &Session) -> Self {
        let current = session
            .get::<String>(CART_KEY)
            .await
            .map_err(|e| e.to_string());
        Self {
            current,
            pending: None,
        }
    }

    /// Write a pending value back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn flush(self, session: &Session) -> Result<()> {
        if let Some(raw) = self.pending {
            session.insert(CART_KEY, raw).await?;
        }
        Ok(())
    }

    /// Whether a save happened since the snapshot was taken.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.pending.is_some()
    }
}

impl KeyValueStore for SessionSlot {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        if key != CART_KEY {
            return Ok(None);
        }
        self.current.clone().map_err(StorageError::new)
    }

    fn set(&mut self, key: &str, value: String) -> std::result::Result<(), StorageError> {
        if key != CART_KEY {
            return Err(StorageError::new(format!("unsupported session key: {key}")));
        }
        self.current = Ok(Some(value.clone()));
        self.pending = Some(value);
        Ok(())
    }
}

/// Read the current cart of a session without modifying it.
pub async fn current_cart(session: &Session) -> Cart {
    CartStore::new(SessionSlot::read(session).await)
        .load()
        .into_cart()
}
