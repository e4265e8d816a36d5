//! Entity records and their creation inputs.
//!
//! These types mirror the marketplace data model:
//!
//! - [`User`]: artisan or collector identity with profile fields
//! - [`Collection`]: a named grouping of NFTs by one creator
//! - [`Nft`]: a sellable digital craft item
//! - [`Transaction`]: a record of an ownership-transfer attempt
//!
//! Each entity has a `New*` input counterpart carrying only the
//! caller-supplied fields; ids, timestamps, token ids, and defaulted fields
//! are filled in by the store at creation time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CollectionId, NftId, TransactionId, UserId};

/// Currency applied when a caller does not supply one.
pub const DEFAULT_CURRENCY: &str = "ICP";

/// Prefix for derived NFT token ids.
pub const TOKEN_PREFIX: &str = "PUS-";

/// The canonical craft categories.
///
/// Category is stored as free text and not strictly enforced; this list is
/// the set the catalog and the browse UI are built around.
pub const CATEGORIES: [&str; 4] = ["batik", "wood_sculpture", "textile", "mask"];

/// Derives the token id for an NFT from its assigned id.
///
/// The token id is a pure function of the id, assigned exactly once at
/// creation and never changed by any later operation.
///
/// # Example
///
/// ```
/// # use pusaka_types::{token_id, NftId};
/// assert_eq!(token_id(NftId::new(1)), "PUS-000001");
/// ```
#[must_use]
pub fn token_id(id: NftId) -> String {
    format!("{TOKEN_PREFIX}{:06}", id.value())
}

// ============================================================================
// User
// ============================================================================

/// A marketplace user: an artisan listing crafts or a collector buying them.
///
/// Created once and never deleted. The only mutable field is
/// `followers_count`, which is externally settable and not touched by any
/// core operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned identifier, unique among users.
    pub id: UserId,
    /// Unique, immutable login handle.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Optional profile biography.
    pub bio: Option<String>,
    /// Optional avatar image URL.
    pub avatar: Option<String>,
    /// Whether the user is a verified artisan.
    pub is_verified: bool,
    /// Optional linked wallet address.
    pub wallet_address: Option<String>,
    /// Follower count; externally settable.
    pub followers_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a [`User`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    /// Unique login handle.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Optional profile biography.
    pub bio: Option<String>,
    /// Optional avatar image URL.
    pub avatar: Option<String>,
    /// Verified-artisan flag; defaults to `false`.
    #[serde(default)]
    pub is_verified: bool,
    /// Optional linked wallet address.
    pub wallet_address: Option<String>,
    /// Initial follower count; defaults to 0.
    #[serde(default)]
    pub followers_count: i64,
}

// ============================================================================
// Collection
// ============================================================================

/// A named grouping of NFTs, conceptually owned by one creator.
///
/// `item_count` is a derived counter maintained incrementally at NFT
/// creation time; it is never recomputed by scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Assigned identifier.
    pub id: CollectionId,
    /// Collection name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional cover image URL.
    pub image: Option<String>,
    /// Creating user (a reference, not ownership of the items).
    pub creator_id: UserId,
    /// Optional floor price as a decimal string.
    pub floor_price: Option<String>,
    /// Number of NFTs whose `collection_id` references this collection.
    pub item_count: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a [`Collection`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCollection {
    /// Collection name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional cover image URL.
    pub image: Option<String>,
    /// Creating user.
    pub creator_id: UserId,
    /// Optional floor price as a decimal string.
    pub floor_price: Option<String>,
}

// ============================================================================
// NFT
// ============================================================================

/// A sellable digital representation of a traditional craft item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nft {
    /// Assigned identifier.
    pub id: NftId,
    /// Item name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Image URL.
    pub image: String,
    /// Price as a decimal string.
    pub price: String,
    /// Currency code; defaults to [`DEFAULT_CURRENCY`].
    pub currency: String,
    /// Craft category; free text, canonically one of [`CATEGORIES`].
    pub category: String,
    /// Creating artisan; immutable.
    pub creator_id: UserId,
    /// Current owner; changes on transaction settlement.
    pub owner_id: UserId,
    /// Optional containing collection; immutable.
    pub collection_id: Option<CollectionId>,
    /// Whether the item appears in browse/search results.
    pub is_listed: bool,
    /// Derived token id; see [`token_id`].
    pub token_id: String,
    /// Opaque metadata, e.g. a serialized attribute map.
    pub metadata: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating an [`Nft`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNft {
    /// Item name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Image URL.
    pub image: String,
    /// Price as a decimal string.
    pub price: String,
    /// Currency code; `None` defaults to [`DEFAULT_CURRENCY`].
    pub currency: Option<String>,
    /// Craft category.
    pub category: String,
    /// Creating artisan.
    pub creator_id: UserId,
    /// Initial owner.
    pub owner_id: UserId,
    /// Optional containing collection.
    pub collection_id: Option<CollectionId>,
    /// Listed flag; `None` defaults to `true`.
    pub is_listed: Option<bool>,
    /// Opaque metadata string.
    pub metadata: Option<String>,
}

// ============================================================================
// Transaction
// ============================================================================

/// Settlement state of a [`Transaction`].
///
/// A transaction is created `Pending` and moves exactly once to a terminal
/// state; there is no transition out of `Completed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Created, settlement not yet run.
    Pending,
    /// Settled successfully; ownership transferred.
    Completed,
    /// Settlement faulted; no ownership mutation occurred.
    Failed,
}

impl TransactionStatus {
    /// Whether this status admits no further transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A record of an ownership-transfer attempt.
///
/// Carries a provisional `transaction_hash` from creation; settlement
/// replaces it with a fresh hash on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned identifier.
    pub id: TransactionId,
    /// NFT being transferred, if any.
    pub nft_id: Option<NftId>,
    /// Sending user.
    pub from_user_id: UserId,
    /// Receiving user; becomes the NFT owner on settlement.
    pub to_user_id: UserId,
    /// Price as a decimal string.
    pub price: String,
    /// Currency code; defaults to [`DEFAULT_CURRENCY`].
    pub currency: String,
    /// Chain-style hash; provisional until settlement.
    pub transaction_hash: String,
    /// Settlement state.
    pub status: TransactionStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a [`Transaction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    /// NFT being transferred, if any.
    pub nft_id: Option<NftId>,
    /// Sending user.
    pub from_user_id: UserId,
    /// Receiving user.
    pub to_user_id: UserId,
    /// Price as a decimal string.
    pub price: String,
    /// Currency code; `None` defaults to [`DEFAULT_CURRENCY`].
    pub currency: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_is_zero_padded() {
        assert_eq!(token_id(NftId::new(1)), "PUS-000001");
        assert_eq!(token_id(NftId::new(42)), "PUS-000042");
        assert_eq!(token_id(NftId::new(1_234_567)), "PUS-1234567");
    }

    #[test]
    fn test_token_id_is_deterministic() {
        assert_eq!(token_id(NftId::new(7)), token_id(NftId::new(7)));
    }

    #[test]
    fn test_status_terminality() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Completed.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&TransactionStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let back: TransactionStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(back, TransactionStatus::Completed);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TransactionStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn test_new_user_defaults() {
        let input: NewUser = serde_json::from_str(
            r#"{"username": "pak_sugeng", "display_name": "Pak Sugeng Wijaya"}"#,
        )
        .unwrap();
        assert!(!input.is_verified);
        assert_eq!(input.followers_count, 0);
        assert!(input.bio.is_none());
    }
}
