//! Typed identifier newtypes.
//!
//! Each entity kind gets its own `i64` wrapper so that a `UserId` can never be
//! passed where an `NftId` is expected. Ids are assigned sequentially by the
//! store, starting at 1, and are never reused.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `i64` for type-safe identifiers.
///
/// Each generated type provides:
/// - Standard derives: Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord
/// - Serde with `#[serde(transparent)]` for wire format compatibility
/// - `From<i64>` and `Into<i64>` conversions
/// - `Display` with a semantic prefix (e.g., `user:1`)
/// - `new()` constructor and `value()` accessor
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $prefix:expr
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier from a raw value.
            #[inline]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw numeric value.
            #[inline]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}:{}", $prefix, self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = <i64 as std::str::FromStr>::Err;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user (artisan or collector).
    ///
    /// # Display
    ///
    /// Formats with `user:` prefix: `user:1`.
    UserId, "user"
);

define_id!(
    /// Unique identifier for a collection of NFTs.
    ///
    /// # Display
    ///
    /// Formats with `col:` prefix: `col:1`.
    CollectionId, "col"
);

define_id!(
    /// Unique identifier for an NFT.
    ///
    /// # Display
    ///
    /// Formats with `nft:` prefix: `nft:1`.
    NftId, "nft"
);

define_id!(
    /// Unique identifier for an ownership-transfer transaction.
    ///
    /// # Display
    ///
    /// Formats with `tx:` prefix: `tx:1`.
    TransactionId, "tx"
);
