//! Type-safe product identifiers.
//!
//! Catalog products are keyed by short slugs (`"energy-bar"`), and cart
//! entries refer back to them by the same slug. Wrapping the slug in a newtype
//! keeps it from being mixed up with names, tags, or other free-form strings.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product identifier.
///
/// Serializes as a bare JSON string, which is how cart entries store it:
///
/// ```
/// use legumechanics_core::ProductId;
///
/// let id = ProductId::new("energy-bar");
/// assert_eq!(serde_json::to_string(&id).unwrap(), "\"energy-bar\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
