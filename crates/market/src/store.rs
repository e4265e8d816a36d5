//! The entity store.
//!
//! Authoritative keyed storage for the four entity kinds, with sequential
//! id assignment per kind. The store is an explicit object with injected
//! lifetime: construct one per process and pass handles to every consumer;
//! tests construct a fresh store each for isolation.
//!
//! All state lives behind a single `parking_lot::RwLock`, so every mutation
//! (creation, ownership transfer, status update, `item_count` increment) is
//! applied atomically with respect to the others: concurrent NFT creations
//! targeting the same collection cannot lose an increment, and id
//! assignment is serialized: ids are unique and strictly increasing within
//! their kind, never reused.
//!
//! Lookups return `Option`; absence is a normal outcome at this layer and
//! is surfaced as an error only by callers that need one.

use std::{collections::BTreeMap, sync::Arc};

use chrono::Utc;
use parking_lot::RwLock;
use pusaka_types::{
    generate_transaction_hash, token_id, Collection, CollectionId, MarketError, NewCollection,
    NewNft, NewTransaction, NewUser, Nft, NftId, Result, Transaction, TransactionId,
    TransactionStatus, User, UserId, DEFAULT_CURRENCY,
};

/// Next-id counters, one per entity kind, starting at 1.
struct NextIds {
    user: i64,
    collection: i64,
    nft: i64,
    transaction: i64,
}

impl Default for NextIds {
    fn default() -> Self {
        Self { user: 1, collection: 1, nft: 1, transaction: 1 }
    }
}

/// Store state guarded by the write lock.
///
/// `BTreeMap` keyed by id preserves insertion order, since ids are assigned
/// monotonically.
#[derive(Default)]
struct StoreInner {
    users: BTreeMap<UserId, User>,
    collections: BTreeMap<CollectionId, Collection>,
    nfts: BTreeMap<NftId, Nft>,
    transactions: BTreeMap<TransactionId, Transaction>,
    next_ids: NextIds,
}

/// Handle to the in-memory entity store.
///
/// Cloning is cheap and shares the underlying state.
#[derive(Clone, Default)]
pub struct MarketStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MarketStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Creates a user, enforcing username uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::UsernameTaken`] if another user already holds
    /// the username.
    pub fn create_user(&self, input: NewUser) -> Result<User> {
        let mut inner = self.inner.write();
        if inner.users.values().any(|u| u.username == input.username) {
            return Err(MarketError::UsernameTaken { username: input.username });
        }

        let id = UserId::new(inner.next_ids.user);
        inner.next_ids.user += 1;

        let user = User {
            id,
            username: input.username,
            display_name: input.display_name,
            bio: input.bio,
            avatar: input.avatar,
            is_verified: input.is_verified,
            wallet_address: input.wallet_address,
            followers_count: input.followers_count,
            created_at: Utc::now(),
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    /// Returns a user by id, or `None` if absent.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<User> {
        self.inner.read().users.get(&id).cloned()
    }

    /// Returns a user by username, or `None` if absent.
    #[must_use]
    pub fn user_by_username(&self, username: &str) -> Option<User> {
        self.inner.read().users.values().find(|u| u.username == username).cloned()
    }

    /// Returns all users in insertion order.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.inner.read().users.values().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------

    /// Creates a collection with `item_count` starting at 0.
    pub fn create_collection(&self, input: NewCollection) -> Collection {
        let mut inner = self.inner.write();
        let id = CollectionId::new(inner.next_ids.collection);
        inner.next_ids.collection += 1;

        let collection = Collection {
            id,
            name: input.name,
            description: input.description,
            image: input.image,
            creator_id: input.creator_id,
            floor_price: input.floor_price,
            item_count: 0,
            created_at: Utc::now(),
        };
        inner.collections.insert(id, collection.clone());
        collection
    }

    /// Returns a collection by id, or `None` if absent.
    #[must_use]
    pub fn collection(&self, id: CollectionId) -> Option<Collection> {
        self.inner.read().collections.get(&id).cloned()
    }

    /// Returns all collections in insertion order.
    #[must_use]
    pub fn collections(&self) -> Vec<Collection> {
        self.inner.read().collections.values().cloned().collect()
    }

    /// Returns the collections created by a user.
    #[must_use]
    pub fn collections_by_creator(&self, creator_id: UserId) -> Vec<Collection> {
        self.inner
            .read()
            .collections
            .values()
            .filter(|c| c.creator_id == creator_id)
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // NFTs
    // ------------------------------------------------------------------

    /// Creates an NFT, assigning its id and token id and applying defaults.
    ///
    /// If the input references an existing collection, that collection's
    /// `item_count` is incremented by one under the same write lock, so the
    /// counter always equals the number of member NFTs.
    pub fn create_nft(&self, input: NewNft) -> Nft {
        let mut inner = self.inner.write();
        let id = NftId::new(inner.next_ids.nft);
        inner.next_ids.nft += 1;

        let nft = Nft {
            id,
            name: input.name,
            description: input.description,
            image: input.image,
            price: input.price,
            currency: input.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            category: input.category,
            creator_id: input.creator_id,
            owner_id: input.owner_id,
            collection_id: input.collection_id,
            is_listed: input.is_listed.unwrap_or(true),
            token_id: token_id(id),
            metadata: input.metadata,
            created_at: Utc::now(),
        };
        inner.nfts.insert(id, nft.clone());

        if let Some(collection_id) = nft.collection_id {
            if let Some(collection) = inner.collections.get_mut(&collection_id) {
                collection.item_count += 1;
            }
        }

        nft
    }

    /// Returns an NFT by id, or `None` if absent.
    #[must_use]
    pub fn nft(&self, id: NftId) -> Option<Nft> {
        self.inner.read().nfts.get(&id).cloned()
    }

    /// Returns all NFTs in insertion order, listed or not.
    #[must_use]
    pub fn nfts(&self) -> Vec<Nft> {
        self.inner.read().nfts.values().cloned().collect()
    }

    /// Returns the NFTs created by a user.
    #[must_use]
    pub fn nfts_by_creator(&self, creator_id: UserId) -> Vec<Nft> {
        self.inner.read().nfts.values().filter(|n| n.creator_id == creator_id).cloned().collect()
    }

    /// Returns the NFTs belonging to a collection.
    #[must_use]
    pub fn nfts_by_collection(&self, collection_id: CollectionId) -> Vec<Nft> {
        self.inner
            .read()
            .nfts
            .values()
            .filter(|n| n.collection_id == Some(collection_id))
            .cloned()
            .collect()
    }

    /// Overwrites an NFT's owner in place. No-op for a missing id.
    pub fn update_nft_owner(&self, nft_id: NftId, new_owner_id: UserId) {
        let mut inner = self.inner.write();
        if let Some(nft) = inner.nfts.get_mut(&nft_id) {
            nft.owner_id = new_owner_id;
        }
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Creates a transaction in `Pending` state with a provisional hash.
    pub fn create_transaction(&self, input: NewTransaction) -> Transaction {
        let mut inner = self.inner.write();
        let id = TransactionId::new(inner.next_ids.transaction);
        inner.next_ids.transaction += 1;

        let transaction = Transaction {
            id,
            nft_id: input.nft_id,
            from_user_id: input.from_user_id,
            to_user_id: input.to_user_id,
            price: input.price,
            currency: input.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            transaction_hash: generate_transaction_hash(),
            status: TransactionStatus::Pending,
            created_at: Utc::now(),
        };
        inner.transactions.insert(id, transaction.clone());
        transaction
    }

    /// Returns a transaction by id, or `None` if absent.
    #[must_use]
    pub fn transaction(&self, id: TransactionId) -> Option<Transaction> {
        self.inner.read().transactions.get(&id).cloned()
    }

    /// Returns all transactions in insertion order.
    #[must_use]
    pub fn transactions(&self) -> Vec<Transaction> {
        self.inner.read().transactions.values().cloned().collect()
    }

    /// Returns the transactions where the user is sender or recipient.
    #[must_use]
    pub fn transactions_by_user(&self, user_id: UserId) -> Vec<Transaction> {
        self.inner
            .read()
            .transactions
            .values()
            .filter(|t| t.from_user_id == user_id || t.to_user_id == user_id)
            .cloned()
            .collect()
    }

    /// Overwrites a transaction's status, and its hash when one is supplied.
    ///
    /// No-op for a missing id. Status is monotonic: a transaction already in
    /// a terminal state is left untouched, so a settlement attempt can never
    /// re-open or re-settle a finished transaction.
    pub fn update_transaction_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
        hash: Option<String>,
    ) {
        let mut inner = self.inner.write();
        if let Some(transaction) = inner.transactions.get_mut(&id) {
            if transaction.status.is_terminal() {
                return;
            }
            transaction.status = status;
            if let Some(hash) = hash {
                transaction.transaction_hash = hash;
            }
        }
    }
}
