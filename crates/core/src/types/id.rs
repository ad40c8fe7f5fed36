//! Newtype identifiers for type-safe entity references.
//!
//! Use the `define_id!` macro to create numeric ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Product SKUs are
//! string identifiers shared with the backend and get their own [`Sku`] type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe numeric ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>`, `Into<i64>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use bharat_core::define_id;
/// define_id!(LineId);
/// define_id!(TicketId);
///
/// let line = LineId::new(1);
/// let ticket = TicketId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: LineId = ticket;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Cart entries are keyed by their creation timestamp in milliseconds.
define_id!(CartItemId);

/// A stock-keeping unit, the product identifier shared with the backend.
///
/// SKUs are opaque strings such as `BHRT-001-M`. The only constraint is that
/// they are not blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Create a SKU, trimming surrounding whitespace.
    ///
    /// Returns `None` if the input is blank.
    #[must_use]
    pub fn new(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Sku {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or_else(|| "SKU cannot be blank".to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_id_roundtrip() {
        let id = CartItemId::new(1_733_000_000_123);
        assert_eq!(id.as_i64(), 1_733_000_000_123);
        assert_eq!(i64::from(id), 1_733_000_000_123);
        assert_eq!(id.to_string(), "1733000000123");
        assert_eq!(" 42 ".parse::<CartItemId>().unwrap(), CartItemId::new(42));
    }

    #[test]
    fn test_cart_item_id_ordering() {
        assert!(CartItemId::new(1) < CartItemId::new(2));
    }

    #[test]
    fn test_sku_trims_and_rejects_blank() {
        assert_eq!(Sku::new("  BHRT-001-M ").unwrap().as_str(), "BHRT-001-M");
        assert!(Sku::new("   ").is_none());
        assert!("".parse::<Sku>().is_err());
    }

    #[test]
    fn test_sku_serializes_as_plain_string() {
        let sku = Sku::new("BHRT-002-W").unwrap();
        assert_eq!(serde_json::to_string(&sku).unwrap(), "\"BHRT-002-W\"");
    }
}
