//! The marketplace service facade.
//!
//! One object owning the store handle, the query engine, and the settlement
//! submission handle. The external boundary (HTTP routes, CLI, tests) talks
//! to this type only; it never reaches into the store directly.
//!
//! Every mutating operation validates its input before touching the store,
//! and verifies the ids it references so the store never accumulates
//! records whose creator or owner cannot resolve.

use pusaka_types::{
    validate_new_collection, validate_new_nft, validate_new_transaction, validate_new_user,
    Collection, CollectionId, CollectionWithDetails, MarketError, NewCollection, NewNft,
    NewTransaction, NewUser, Nft, NftId, NftWithDetails, Result, Transaction, User, UserId,
    UserWithStats,
};
use tokio::task::JoinHandle;
use tracing::info;

use crate::{
    config::MarketConfig,
    query::{self, QueryEngine, SortOrder},
    resolver, seed,
    settlement::{SettlementHandle, SettlementPipeline},
    store::MarketStore,
};

/// Parameters for browsing the listed catalog.
///
/// `category` and `search` are mutually exclusive filters; when both are
/// supplied the search filter wins, matching the boundary's precedence.
#[derive(Debug, Clone, Default)]
pub struct BrowseRequest {
    /// Exact category filter.
    pub category: Option<String>,
    /// Case-insensitive substring query over name, description, category.
    pub search: Option<String>,
    /// Presentation order; `None` keeps insertion order.
    pub sort: Option<SortOrder>,
}

/// The marketplace service.
///
/// Cloning is cheap; clones share the store and the settlement queue.
#[derive(Clone)]
pub struct MarketService {
    store: MarketStore,
    query: QueryEngine,
    settlement: SettlementHandle,
}

impl MarketService {
    /// Builds a service over an existing store and settlement handle.
    #[must_use]
    pub fn new(store: MarketStore, settlement: SettlementHandle) -> Self {
        let query = QueryEngine::new(store.clone());
        Self { store, query, settlement }
    }

    /// Builds a fresh store, spawns the settlement worker, and optionally
    /// installs the sample catalog.
    ///
    /// Returns the service and the worker's join handle; the worker stops
    /// once every clone of the service has been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding the sample catalog fails.
    pub fn start(config: &MarketConfig) -> Result<(Self, JoinHandle<()>)> {
        let store = MarketStore::new();
        if config.seed_catalog {
            seed::populate(&store)?;
        }
        let (settlement, worker) = SettlementPipeline::spawn(store.clone(), config);
        Ok((Self::new(store, settlement), worker))
    }

    /// Read-only access to the underlying store, for the boundary's
    /// low-level lookups.
    #[must_use]
    pub fn store(&self) -> &MarketStore {
        &self.store
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Validation`] on malformed input and
    /// [`MarketError::UsernameTaken`] on a username conflict.
    pub fn register_user(&self, input: NewUser) -> Result<User> {
        validate_new_user(&input)?;
        let user = self.store.create_user(input)?;
        info!(user = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Returns all users in registration order.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.store.users()
    }

    /// Returns one user by id.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::UserNotFound`] if the id does not exist.
    pub fn user(&self, user_id: UserId) -> Result<User> {
        self.store.user(user_id).ok_or(MarketError::UserNotFound { user_id })
    }

    /// Looks up a user by username, or `None` if no user holds it.
    #[must_use]
    pub fn user_by_username(&self, username: &str) -> Option<User> {
        self.store.user_by_username(username)
    }

    /// Returns a user together with derived creation counts.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::UserNotFound`] if the id does not exist.
    pub fn user_stats(&self, user_id: UserId) -> Result<UserWithStats> {
        resolver::resolve_user_stats(&self.store, user_id)
    }

    // ------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------

    /// Creates a collection.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Validation`] on malformed input and
    /// [`MarketError::UserNotFound`] if the creator id does not exist.
    pub fn create_collection(&self, input: NewCollection) -> Result<Collection> {
        validate_new_collection(&input)?;
        self.require_user(input.creator_id)?;
        let collection = self.store.create_collection(input);
        info!(collection = %collection.id, name = %collection.name, "collection created");
        Ok(collection)
    }

    /// Returns all collections, resolved, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::DanglingReference`] if any collection carries
    /// an unresolvable creator id.
    pub fn collections(&self) -> Result<Vec<CollectionWithDetails>> {
        self.store
            .collections()
            .iter()
            .map(|c| resolver::resolve_collection(&self.store, c))
            .collect()
    }

    /// Returns one collection with its creator and member NFTs.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::CollectionNotFound`] if the id does not exist.
    pub fn collection_details(&self, collection_id: CollectionId) -> Result<CollectionWithDetails> {
        let collection = self
            .store
            .collection(collection_id)
            .ok_or(MarketError::CollectionNotFound { collection_id })?;
        resolver::resolve_collection(&self.store, &collection)
    }

    // ------------------------------------------------------------------
    // NFTs
    // ------------------------------------------------------------------

    /// Mints a new NFT.
    ///
    /// The collection reference, when present, is accepted without an
    /// existence check; membership in a missing collection simply has no
    /// `item_count` to maintain and resolves to no attachment.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Validation`] on malformed input and
    /// [`MarketError::UserNotFound`] if the creator or owner id does not
    /// exist.
    pub fn mint_nft(&self, input: NewNft) -> Result<Nft> {
        validate_new_nft(&input)?;
        self.require_user(input.creator_id)?;
        self.require_user(input.owner_id)?;
        let nft = self.store.create_nft(input);
        info!(nft = %nft.id, token = %nft.token_id, "nft minted");
        Ok(nft)
    }

    /// Browses the listed catalog with optional filter and sort.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::DanglingReference`] if any matching NFT
    /// carries an unresolvable creator or owner id.
    pub fn browse(&self, request: &BrowseRequest) -> Result<Vec<NftWithDetails>> {
        let mut nfts = match (&request.search, &request.category) {
            (Some(search), _) => self.query.search(search)?,
            (None, Some(category)) => self.query.by_category(category)?,
            (None, None) => self.query.listed()?,
        };
        if let Some(order) = request.sort {
            query::sort(&mut nfts, order);
        }
        Ok(nfts)
    }

    /// Returns one NFT with its creator, owner, and collection attached.
    ///
    /// Unlisted NFTs remain addressable here even though they never appear
    /// in browse results.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::NftNotFound`] if the id does not exist.
    pub fn nft_details(&self, nft_id: NftId) -> Result<NftWithDetails> {
        let nft = self.store.nft(nft_id).ok_or(MarketError::NftNotFound { nft_id })?;
        resolver::resolve_nft(&self.store, &nft)
    }

    /// Returns the resolved NFTs created by a user, listed or not.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::UserNotFound`] if the id does not exist.
    pub fn nfts_by_creator(&self, creator_id: UserId) -> Result<Vec<NftWithDetails>> {
        self.require_user(creator_id)?;
        self.store
            .nfts_by_creator(creator_id)
            .iter()
            .map(|nft| resolver::resolve_nft(&self.store, nft))
            .collect()
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Initiates a purchase.
    ///
    /// The transaction is created in `Pending` state and returned
    /// immediately; settlement runs in the background after the configured
    /// delay and moves the record to `Completed` (transferring ownership)
    /// or `Failed`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Validation`] on malformed input,
    /// [`MarketError::UserNotFound`] if either party does not exist,
    /// [`MarketError::NftNotFound`] if the referenced NFT does not exist,
    /// and [`MarketError::Internal`] if the settlement queue rejects the
    /// job.
    pub fn purchase(&self, input: NewTransaction) -> Result<Transaction> {
        validate_new_transaction(&input)?;
        self.require_user(input.from_user_id)?;
        self.require_user(input.to_user_id)?;
        if let Some(nft_id) = input.nft_id {
            if self.store.nft(nft_id).is_none() {
                return Err(MarketError::NftNotFound { nft_id });
            }
        }

        let transaction = self.store.create_transaction(input);
        self.settlement.submit(transaction.id)?;
        info!(
            transaction = %transaction.id,
            from = %transaction.from_user_id,
            to = %transaction.to_user_id,
            "purchase initiated"
        );
        Ok(transaction)
    }

    /// Returns the transaction history of a user, as sender or recipient.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::UserNotFound`] if the id does not exist.
    pub fn transactions_for(&self, user_id: UserId) -> Result<Vec<Transaction>> {
        self.require_user(user_id)?;
        Ok(self.store.transactions_by_user(user_id))
    }

    fn require_user(&self, user_id: UserId) -> Result<()> {
        if self.store.user(user_id).is_none() {
            return Err(MarketError::UserNotFound { user_id });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn service() -> MarketService {
        let store = MarketStore::new();
        let (settlement, _worker) = SettlementPipeline::spawn(store.clone(), &MarketConfig::for_test());
        MarketService::new(store, settlement)
    }

    fn register(service: &MarketService, username: &str) -> User {
        service
            .register_user(NewUser {
                username: username.to_string(),
                display_name: username.to_string(),
                ..NewUser::default()
            })
            .unwrap()
    }

    fn mint(service: &MarketService, creator: UserId, name: &str, category: &str) -> Nft {
        service
            .mint_nft(NewNft {
                name: name.to_string(),
                description: None,
                image: "https://example.com/item.jpg".to_string(),
                price: "2.5".to_string(),
                currency: None,
                category: category.to_string(),
                creator_id: creator,
                owner_id: creator,
                collection_id: None,
                is_listed: None,
                metadata: None,
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_user_validates_input() {
        let service = service();
        let err = service
            .register_user(NewUser {
                username: "Not Valid".to_string(),
                display_name: "x".to_string(),
                ..NewUser::default()
            })
            .unwrap_err();
        assert!(matches!(err, MarketError::Validation { field: "username", .. }));
        assert!(service.users().is_empty());
    }

    #[tokio::test]
    async fn test_mint_requires_existing_creator() {
        let service = service();
        let err = service
            .mint_nft(NewNft {
                name: "Megamendung #001".to_string(),
                description: None,
                image: "https://example.com/batik.jpg".to_string(),
                price: "2.5".to_string(),
                currency: None,
                category: "batik".to_string(),
                creator_id: UserId::new(404),
                owner_id: UserId::new(404),
                collection_id: None,
                is_listed: None,
                metadata: None,
            })
            .unwrap_err();
        assert!(matches!(err, MarketError::UserNotFound { .. }));
    }

    #[tokio::test]
    async fn test_browse_search_takes_precedence_over_category() {
        let service = service();
        let artisan = register(&service, "pak_sugeng");
        mint(&service, artisan.id, "Megamendung #001", "batik");
        mint(&service, artisan.id, "Garuda Sculpture", "wood_sculpture");

        let request = BrowseRequest {
            category: Some("batik".to_string()),
            search: Some("garuda".to_string()),
            sort: None,
        };
        let hits = service.browse(&request).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nft.name, "Garuda Sculpture");
    }

    #[tokio::test]
    async fn test_browse_default_returns_all_listed() {
        let service = service();
        let artisan = register(&service, "pak_sugeng");
        mint(&service, artisan.id, "Megamendung #001", "batik");
        mint(&service, artisan.id, "Garuda Sculpture", "wood_sculpture");

        let hits = service.browse(&BrowseRequest::default()).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_nft_details_includes_unlisted() {
        let service = service();
        let artisan = register(&service, "pak_sugeng");
        let nft = service
            .mint_nft(NewNft {
                name: "Hidden Topeng".to_string(),
                description: None,
                image: "https://example.com/mask.jpg".to_string(),
                price: "1.9".to_string(),
                currency: None,
                category: "mask".to_string(),
                creator_id: artisan.id,
                owner_id: artisan.id,
                collection_id: None,
                is_listed: Some(false),
                metadata: None,
            })
            .unwrap();

        assert!(service.browse(&BrowseRequest::default()).unwrap().is_empty());
        let details = service.nft_details(nft.id).unwrap();
        assert_eq!(details.nft.id, nft.id);
    }

    #[tokio::test]
    async fn test_collection_details_not_found() {
        let service = service();
        let err = service.collection_details(CollectionId::new(404)).unwrap_err();
        assert!(matches!(err, MarketError::CollectionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_purchase_returns_pending_immediately() {
        let service = service();
        let seller = register(&service, "pak_sugeng");
        let buyer = register(&service, "collector_01");
        let nft = mint(&service, seller.id, "Megamendung #001", "batik");

        let transaction = service
            .purchase(NewTransaction {
                nft_id: Some(nft.id),
                from_user_id: seller.id,
                to_user_id: buyer.id,
                price: "2.5".to_string(),
                currency: None,
            })
            .unwrap();
        assert_eq!(transaction.status, pusaka_types::TransactionStatus::Pending);
        assert_eq!(service.store().nft(nft.id).unwrap().owner_id, seller.id);
    }

    #[tokio::test]
    async fn test_purchase_rejects_self_transfer() {
        let service = service();
        let seller = register(&service, "pak_sugeng");
        let err = service
            .purchase(NewTransaction {
                nft_id: None,
                from_user_id: seller.id,
                to_user_id: seller.id,
                price: "2.5".to_string(),
                currency: None,
            })
            .unwrap_err();
        assert!(matches!(err, MarketError::Validation { .. }));
        assert!(service.transactions_for(seller.id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_purchase_rejects_missing_nft() {
        let service = service();
        let seller = register(&service, "pak_sugeng");
        let buyer = register(&service, "collector_01");
        let err = service
            .purchase(NewTransaction {
                nft_id: Some(NftId::new(404)),
                from_user_id: seller.id,
                to_user_id: buyer.id,
                price: "2.5".to_string(),
                currency: None,
            })
            .unwrap_err();
        assert!(matches!(err, MarketError::NftNotFound { .. }));
    }

    #[tokio::test]
    async fn test_transactions_for_unknown_user() {
        let service = service();
        let err = service.transactions_for(UserId::new(404)).unwrap_err();
        assert!(matches!(err, MarketError::UserNotFound { .. }));
    }

    #[tokio::test]
    async fn test_start_with_seed_catalog() {
        let config = MarketConfig { seed_catalog: true, ..MarketConfig::for_test() };
        let (service, _worker) = MarketService::start(&config).unwrap();

        assert!(!service.users().is_empty());
        assert!(!service.browse(&BrowseRequest::default()).unwrap().is_empty());
        assert!(!service.collections().unwrap().is_empty());
    }
}
