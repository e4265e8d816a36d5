//! The sample craft catalog.
//!
//! Installs four verified artisans, three collections, and six craft NFTs
//! so a freshly started marketplace has something to browse. Enabled by
//! [`crate::MarketConfig::seed_catalog`]; never installed in tests unless a
//! test asks for it.

use pusaka_types::{NewCollection, NewNft, NewUser, Result, UserId};
use tracing::info;

use crate::store::MarketStore;

fn artisan(
    username: &str,
    display_name: &str,
    bio: &str,
    avatar_photo: &str,
    wallet_address: &str,
    followers_count: i64,
) -> NewUser {
    NewUser {
        username: username.to_string(),
        display_name: display_name.to_string(),
        bio: Some(bio.to_string()),
        avatar: Some(format!(
            "https://images.unsplash.com/{avatar_photo}?w=150&h=150&fit=crop&crop=face"
        )),
        is_verified: true,
        wallet_address: Some(wallet_address.to_string()),
        followers_count,
    }
}

#[allow(clippy::too_many_arguments)]
fn craft(
    name: &str,
    description: &str,
    photo: &str,
    price: &str,
    category: &str,
    creator: UserId,
    collection: Option<pusaka_types::CollectionId>,
    metadata: &str,
) -> NewNft {
    NewNft {
        name: name.to_string(),
        description: Some(description.to_string()),
        image: format!("https://images.unsplash.com/{photo}?w=600&h=600&fit=crop"),
        price: price.to_string(),
        currency: None,
        category: category.to_string(),
        creator_id: creator,
        owner_id: creator,
        collection_id: collection,
        is_listed: None,
        metadata: Some(metadata.to_string()),
    }
}

/// Installs the sample catalog into an empty store.
///
/// Callable only against a fresh store: the seed entries reference each
/// other by their first-assigned ids.
///
/// # Errors
///
/// Returns [`pusaka_types::MarketError::UsernameTaken`] if the store
/// already holds a seed username, which indicates the store was not empty.
pub fn populate(store: &MarketStore) -> Result<()> {
    let batik_master = store
        .create_user(artisan(
            "pak_sugeng",
            "Pak Sugeng Wijaya",
            "Master Batik Artist from Solo with 40+ years of traditional batik experience",
            "photo-1507003211169-0a1dd7228f2d",
            "0x1234567890abcdef",
            5200,
        ))?
        .id;
    let wood_carver = store
        .create_user(artisan(
            "made_artist",
            "Made Sutrisna",
            "Wood Carving Master from Bali, traditional Balinese sculpture specialist",
            "photo-1472099645785-5658abf4ff4e",
            "0x2345678901bcdef1",
            3800,
        ))?
        .id;
    let textile_keeper = store
        .create_user(artisan(
            "ibu_sari",
            "Ibu Sari Lestari",
            "Textile Heritage Keeper specializing in traditional weaving patterns",
            "photo-1494790108755-2616b612b786",
            "0x3456789012cdef12",
            7100,
        ))?
        .id;
    let mask_maker = store
        .create_user(artisan(
            "dalang_jaya",
            "Dalang Jaya",
            "Traditional theater mask creator preserving Javanese wayang culture",
            "photo-1500648767791-00dcc994a43e",
            "0x4567890123def123",
            2900,
        ))?
        .id;

    let royal_batik = store
        .create_collection(NewCollection {
            name: "Royal Javanese Batik".to_string(),
            description: Some("Traditional royal patterns from Central Java".to_string()),
            image: Some(
                "https://images.unsplash.com/photo-1584464491033-06628f3a6b7b?w=600&h=400&fit=crop"
                    .to_string(),
            ),
            creator_id: batik_master,
            floor_price: Some("0.5".to_string()),
        })
        .id;
    let wood_art = store
        .create_collection(NewCollection {
            name: "Balinese Wood Art".to_string(),
            description: Some("Hand-carved sculptures from Bali masters".to_string()),
            image: Some(
                "https://images.unsplash.com/photo-1578912996078-305d92249aa6?w=600&h=400&fit=crop"
                    .to_string(),
            ),
            creator_id: wood_carver,
            floor_price: Some("1.2".to_string()),
        })
        .id;
    store.create_collection(NewCollection {
        name: "Heritage Textiles".to_string(),
        description: Some("Woven treasures from across Indonesia".to_string()),
        image: Some(
            "https://images.unsplash.com/photo-1615887990450-4a4c1b9b8e0c?w=600&h=400&fit=crop"
                .to_string(),
        ),
        creator_id: textile_keeper,
        floor_price: Some("0.8".to_string()),
    });

    store.create_nft(craft(
        "Megamendung #001",
        "Classic cloud pattern batik from Cirebon tradition, hand-drawn with traditional canting",
        "photo-1584464491033-06628f3a6b7b",
        "2.5",
        "batik",
        batik_master,
        Some(royal_batik),
        r#"{"origin":"Cirebon","technique":"Traditional Canting","year":"2024"}"#,
    ));
    store.create_nft(craft(
        "Garuda Sculpture",
        "Hand-carved Balinese Garuda sculpture representing Indonesian national symbol",
        "photo-1578912996078-305d92249aa6",
        "5.2",
        "wood_sculpture",
        wood_carver,
        Some(wood_art),
        r#"{"wood_type":"Hibiscus","height":"45cm","style":"Traditional Balinese"}"#,
    ));
    store.create_nft(craft(
        "Parang Kusuma",
        "Royal diagonal pattern batik, traditionally worn by Javanese nobility",
        "photo-1578662996442-48f60103fc96",
        "3.8",
        "batik",
        batik_master,
        Some(royal_batik),
        r#"{"origin":"Solo","royal_grade":"High","pattern_meaning":"Flowering Knife"}"#,
    ));
    store.create_nft(craft(
        "Topeng Wayang",
        "Traditional Javanese theater mask used in wayang performances",
        "photo-1596874047117-68fec3060b2a",
        "1.9",
        "mask",
        mask_maker,
        None,
        r#"{"character":"Arjuna","material":"Pule wood","age":"Contemporary"}"#,
    ));
    store.create_nft(craft(
        "Kawung Pattern",
        "Sacred four-circle motif representing the four cardinal directions",
        "photo-1617480355948-0c0c06117d98",
        "2.8",
        "batik",
        batik_master,
        Some(royal_batik),
        r#"{"sacred_meaning":"Universe harmony","origin":"Yogyakarta"}"#,
    ));
    store.create_nft(craft(
        "Barong Lion",
        "Balinese mythical lion sculpture for protection and good fortune",
        "photo-1611273426858-450d8e3c9fce",
        "4.5",
        "wood_sculpture",
        wood_carver,
        Some(wood_art),
        r#"{"purpose":"Temple guardian","wood_type":"Sandalwood"}"#,
    ));

    info!(
        users = store.users().len(),
        collections = store.collections().len(),
        nfts = store.nfts().len(),
        "sample catalog installed"
    );
    Ok(())
}
