//! Relationship resolution.
//!
//! Attaches related entities to a base record without storing the join.
//! These are pure projections: no mutation, safe to call concurrently, and
//! every call re-reads the store, so the result is a fresh composite value
//! reflecting the latest committed state.
//!
//! A dangling creator or owner reference is propagated as an explicit
//! [`MarketError::DanglingReference`] rather than a silently missing field.
//! A dangling or absent collection reference is not an error; the
//! collection attachment is optional.

use pusaka_types::{
    Collection, CollectionWithDetails, MarketError, Nft, NftWithDetails, Result, User, UserId,
    UserWithStats,
};

use crate::store::MarketStore;

/// Looks up a user, converting absence into a dangling-reference error.
fn required_user(store: &MarketStore, id: UserId) -> Result<User> {
    store.user(id).ok_or(MarketError::DanglingReference { entity: "user", id: id.value() })
}

/// Attaches creator, owner, and (optionally) collection to an NFT.
///
/// # Errors
///
/// Returns [`MarketError::DanglingReference`] if the creator or owner id
/// does not resolve.
pub fn resolve_nft(store: &MarketStore, nft: &Nft) -> Result<NftWithDetails> {
    let creator = required_user(store, nft.creator_id)?;
    let owner = required_user(store, nft.owner_id)?;
    let collection = nft.collection_id.and_then(|id| store.collection(id));

    Ok(NftWithDetails { nft: nft.clone(), creator, owner, collection })
}

/// Attaches the creator and member NFTs to a collection.
///
/// # Errors
///
/// Returns [`MarketError::DanglingReference`] if the creator id does not
/// resolve.
pub fn resolve_collection(
    store: &MarketStore,
    collection: &Collection,
) -> Result<CollectionWithDetails> {
    let creator = required_user(store, collection.creator_id)?;
    let nfts = store.nfts_by_collection(collection.id);

    Ok(CollectionWithDetails { collection: collection.clone(), creator, nfts })
}

/// Attaches derived creation counts to a user.
///
/// # Errors
///
/// Returns [`MarketError::UserNotFound`] if the user id does not exist.
pub fn resolve_user_stats(store: &MarketStore, user_id: UserId) -> Result<UserWithStats> {
    let user = store.user(user_id).ok_or(MarketError::UserNotFound { user_id })?;
    let nft_count = store.nfts_by_creator(user_id).len();
    let collections_count = store.collections_by_creator(user_id).len();

    Ok(UserWithStats { user, nft_count, collections_count })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use pusaka_types::{CollectionId, NewCollection, NewNft, NewUser};

    use super::*;

    fn seed_user(store: &MarketStore, username: &str) -> User {
        store
            .create_user(NewUser {
                username: username.to_string(),
                display_name: username.to_string(),
                ..NewUser::default()
            })
            .unwrap()
    }

    fn seed_nft(store: &MarketStore, creator: UserId, collection: Option<CollectionId>) -> Nft {
        store.create_nft(NewNft {
            name: "Garuda Sculpture".to_string(),
            description: None,
            image: "https://example.com/garuda.jpg".to_string(),
            price: "5.2".to_string(),
            currency: None,
            category: "wood_sculpture".to_string(),
            creator_id: creator,
            owner_id: creator,
            collection_id: collection,
            is_listed: None,
            metadata: None,
        })
    }

    #[test]
    fn test_resolve_nft_attaches_relations() {
        let store = MarketStore::new();
        let creator = seed_user(&store, "made_artist");
        let collection = store.create_collection(NewCollection {
            name: "Balinese Wood Art".to_string(),
            description: None,
            image: None,
            creator_id: creator.id,
            floor_price: None,
        });
        let nft = seed_nft(&store, creator.id, Some(collection.id));

        let view = resolve_nft(&store, &nft).unwrap();
        assert_eq!(view.creator.id, creator.id);
        assert_eq!(view.owner.id, creator.id);
        assert_eq!(view.collection.as_ref().map(|c| c.id), Some(collection.id));
    }

    #[test]
    fn test_resolve_nft_without_collection() {
        let store = MarketStore::new();
        let creator = seed_user(&store, "made_artist");
        let nft = seed_nft(&store, creator.id, None);

        let view = resolve_nft(&store, &nft).unwrap();
        assert!(view.collection.is_none());
    }

    #[test]
    fn test_resolve_nft_with_dangling_collection_is_not_an_error() {
        let store = MarketStore::new();
        let creator = seed_user(&store, "made_artist");
        let nft = seed_nft(&store, creator.id, Some(CollectionId::new(404)));

        let view = resolve_nft(&store, &nft).unwrap();
        assert!(view.collection.is_none());
    }

    #[test]
    fn test_resolve_nft_with_dangling_owner_fails_explicitly() {
        let store = MarketStore::new();
        let creator = seed_user(&store, "made_artist");
        let nft = seed_nft(&store, creator.id, None);
        store.update_nft_owner(nft.id, UserId::new(404));

        let nft = store.nft(nft.id).unwrap();
        let err = resolve_nft(&store, &nft).unwrap_err();
        assert!(matches!(err, MarketError::DanglingReference { entity: "user", id: 404 }));
    }

    #[test]
    fn test_resolve_collection_gathers_members() {
        let store = MarketStore::new();
        let creator = seed_user(&store, "pak_sugeng");
        let collection = store.create_collection(NewCollection {
            name: "Royal Javanese Batik".to_string(),
            description: None,
            image: None,
            creator_id: creator.id,
            floor_price: None,
        });
        seed_nft(&store, creator.id, Some(collection.id));
        seed_nft(&store, creator.id, Some(collection.id));
        seed_nft(&store, creator.id, None);

        let collection = store.collection(collection.id).unwrap();
        let view = resolve_collection(&store, &collection).unwrap();
        assert_eq!(view.creator.id, creator.id);
        assert_eq!(view.nfts.len(), 2);
        assert_eq!(view.collection.item_count, 2);
    }

    #[test]
    fn test_resolve_user_stats() {
        let store = MarketStore::new();
        let artisan = seed_user(&store, "pak_sugeng");
        let other = seed_user(&store, "made_artist");
        store.create_collection(NewCollection {
            name: "Royal Javanese Batik".to_string(),
            description: None,
            image: None,
            creator_id: artisan.id,
            floor_price: None,
        });
        seed_nft(&store, artisan.id, None);
        seed_nft(&store, artisan.id, None);
        seed_nft(&store, other.id, None);

        let stats = resolve_user_stats(&store, artisan.id).unwrap();
        assert_eq!(stats.nft_count, 2);
        assert_eq!(stats.collections_count, 1);
    }

    #[test]
    fn test_resolve_user_stats_missing_user() {
        let store = MarketStore::new();
        let err = resolve_user_stats(&store, UserId::new(404)).unwrap_err();
        assert!(matches!(err, MarketError::UserNotFound { .. }));
    }

    #[test]
    fn test_views_are_fresh_per_call() {
        let store = MarketStore::new();
        let a = seed_user(&store, "a_user");
        let b = seed_user(&store, "b_user");
        let nft = seed_nft(&store, a.id, None);

        let before = resolve_nft(&store, &store.nft(nft.id).unwrap()).unwrap();
        assert_eq!(before.owner.id, a.id);

        store.update_nft_owner(nft.id, b.id);
        let after = resolve_nft(&store, &store.nft(nft.id).unwrap()).unwrap();
        assert_eq!(after.owner.id, b.id);
    }
}
