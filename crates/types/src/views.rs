//! Denormalized read-model views.
//!
//! Composites the resolver attaches to base records for read convenience.
//! They are computed per call from current store state and never persisted,
//! so a view always reflects the latest committed mutation.

use serde::{Deserialize, Serialize};

use crate::types::{Collection, Nft, User};

/// An NFT with its creator, current owner, and containing collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftWithDetails {
    /// The base NFT record.
    #[serde(flatten)]
    pub nft: Nft,
    /// The creating artisan.
    pub creator: User,
    /// The current owner.
    pub owner: User,
    /// The containing collection, when the NFT belongs to one.
    pub collection: Option<Collection>,
}

/// A collection with its creator and member NFTs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionWithDetails {
    /// The base collection record.
    #[serde(flatten)]
    pub collection: Collection,
    /// The creating artisan.
    pub creator: User,
    /// NFTs whose `collection_id` references this collection.
    pub nfts: Vec<Nft>,
}

/// A user with derived creation counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWithStats {
    /// The base user record.
    #[serde(flatten)]
    pub user: User,
    /// Number of NFTs this user created.
    pub nft_count: usize,
    /// Number of collections this user created.
    pub collections_count: usize,
}
