//! Query engine: selection and ranking over listed NFTs.
//!
//! All results are resolved through [`crate::resolver`] and restricted to
//! listed NFTs; unlisted items never appear in any query result, though
//! they stay addressable by id through the store.
//!
//! The engine holds no state of its own; it re-reads the store on every
//! call.

use pusaka_types::{NftWithDetails, Result};

use crate::{resolver, store::MarketStore};

/// Presentation sort orders over resolved NFT lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Creation timestamp descending (newest first).
    Recent,
    /// Numeric price ascending.
    PriceAsc,
    /// Numeric price descending.
    PriceDesc,
}

/// Query operations over the listed subset of NFTs.
#[derive(Clone)]
pub struct QueryEngine {
    store: MarketStore,
}

impl QueryEngine {
    /// Creates a query engine over the given store handle.
    #[must_use]
    pub fn new(store: MarketStore) -> Self {
        Self { store }
    }

    /// Returns all listed NFTs, resolved, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`pusaka_types::MarketError::DanglingReference`] if any
    /// listed NFT carries an unresolvable creator or owner id.
    pub fn listed(&self) -> Result<Vec<NftWithDetails>> {
        self.store
            .nfts()
            .iter()
            .filter(|nft| nft.is_listed)
            .map(|nft| resolver::resolve_nft(&self.store, nft))
            .collect()
    }

    /// Returns the listed NFTs whose category exactly matches.
    ///
    /// The match is case-sensitive; categories are stored as free text.
    ///
    /// # Errors
    ///
    /// Same as [`QueryEngine::listed`].
    pub fn by_category(&self, category: &str) -> Result<Vec<NftWithDetails>> {
        self.store
            .nfts()
            .iter()
            .filter(|nft| nft.is_listed && nft.category == category)
            .map(|nft| resolver::resolve_nft(&self.store, nft))
            .collect()
    }

    /// Returns the listed NFTs matching a case-insensitive substring query.
    ///
    /// The query matches against name, description, or category. The empty
    /// query is a substring of everything and therefore matches every
    /// listed NFT, which coincides with the boundary's no-filter semantics.
    ///
    /// # Errors
    ///
    /// Same as [`QueryEngine::listed`].
    pub fn search(&self, query: &str) -> Result<Vec<NftWithDetails>> {
        let needle = query.to_lowercase();
        self.store
            .nfts()
            .iter()
            .filter(|nft| {
                nft.is_listed
                    && (nft.name.to_lowercase().contains(&needle)
                        || nft
                            .description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(&needle))
                        || nft.category.to_lowercase().contains(&needle))
            })
            .map(|nft| resolver::resolve_nft(&self.store, nft))
            .collect()
    }
}

/// Sorts resolved NFTs for presentation.
///
/// Price orderings parse the decimal price string; under the strict price
/// rule parsing cannot fail for stored records, but an unparsable price
/// would sort after every parsable one in either direction.
pub fn sort(nfts: &mut [NftWithDetails], order: SortOrder) {
    match order {
        SortOrder::Recent => {
            nfts.sort_by(|a, b| b.nft.created_at.cmp(&a.nft.created_at).then(b.nft.id.cmp(&a.nft.id)));
        },
        SortOrder::PriceAsc => {
            nfts.sort_by(|a, b| compare_prices(&a.nft.price, &b.nft.price));
        },
        SortOrder::PriceDesc => {
            nfts.sort_by(|a, b| compare_prices(&b.nft.price, &a.nft.price));
        },
    }
}

/// Compares two price strings numerically, sorting unparsable values last.
fn compare_prices(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) => a.total_cmp(&b),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => std::cmp::Ordering::Equal,
    }
}
