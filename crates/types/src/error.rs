//! Error types for the Pusaka marketplace using snafu.
//!
//! Taxonomy:
//! - **Not-found**: a lookup by id yielded no record. Plain `Option` at the
//!   store layer, an error variant at the service boundary so the external
//!   HTTP layer can map it to a 404-equivalent.
//! - **Validation**: malformed or missing input fields, rejected before any
//!   state is mutated.
//! - **Dangling reference**: an entity references an id that does not
//!   resolve; surfaced explicitly by the resolver instead of being silently
//!   omitted.
//! - **Internal**: unexpected state; carries a source location for
//!   diagnostics. Never terminates the process.

use snafu::{Location, Snafu};

use crate::ids::{CollectionId, NftId, TransactionId, UserId};

/// Unified result type for marketplace operations.
pub type Result<T, E = MarketError> = std::result::Result<T, E>;

/// Top-level error type for marketplace operations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum MarketError {
    /// User not found.
    ///
    /// Expected for lookups by id; maps to an absent result at the boundary.
    #[snafu(display("User {user_id} not found"))]
    UserNotFound {
        /// User identifier.
        user_id: UserId,
    },

    /// Collection not found.
    #[snafu(display("Collection {collection_id} not found"))]
    CollectionNotFound {
        /// Collection identifier.
        collection_id: CollectionId,
    },

    /// NFT not found.
    #[snafu(display("NFT {nft_id} not found"))]
    NftNotFound {
        /// NFT identifier.
        nft_id: NftId,
    },

    /// Transaction not found.
    #[snafu(display("Transaction {transaction_id} not found"))]
    TransactionNotFound {
        /// Transaction identifier.
        transaction_id: TransactionId,
    },

    /// Username is already taken by another user.
    ///
    /// Usernames are a unique constraint, enforced at creation time.
    #[snafu(display("Username {username:?} is already taken"))]
    UsernameTaken {
        /// The conflicting username.
        username: String,
    },

    /// A stored entity references an id that does not resolve.
    ///
    /// Raised by the resolver when an NFT's creator or owner id is dangling;
    /// the composite view is not produced with silently missing fields.
    #[snafu(display("Dangling {entity} reference: {id}"))]
    DanglingReference {
        /// Kind of the referenced entity (e.g. `"user"`).
        entity: &'static str,
        /// The unresolvable raw id.
        id: i64,
    },

    /// Input field failed validation.
    #[snafu(display("Invalid {field}: {reason}"))]
    Validation {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Configuration loading or parsing failed.
    #[snafu(display("Configuration error: {message}"))]
    Config {
        /// Error description.
        message: String,
    },

    /// Internal error (unexpected state, invariant violation).
    #[snafu(display("Internal error at {location}: {message}"))]
    Internal {
        /// Error description.
        message: String,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },
}

impl MarketError {
    /// Whether this error is a not-found condition.
    ///
    /// Not-found is a normal, expected outcome; the external boundary maps
    /// it to an empty or absent result rather than a failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound { .. }
                | Self::CollectionNotFound { .. }
                | Self::NftNotFound { .. }
                | Self::TransactionNotFound { .. }
        )
    }
}
