//! Marketplace core for Pusaka.
//!
//! This crate holds everything with state machinery and cross-entity
//! invariants:
//!
//! - [`MarketStore`]: authoritative keyed storage with monotonic id
//!   assignment for users, collections, NFTs, and transactions
//! - [`resolver`]: per-call denormalization into read-model views
//! - [`QueryEngine`]: filtering, search, and sort over listed NFTs
//! - [`SettlementPipeline`]: the deferred worker that moves transactions
//!   from pending to a terminal state and transfers NFT ownership
//! - [`MarketService`]: the operation surface consumed by the external
//!   HTTP layer
//!
//! The HTTP layer itself, page rendering, and the mocked wallet/chain
//! status endpoints are external collaborators and live outside this crate.

#![deny(unsafe_code)]

pub mod config;
pub mod query;
pub mod resolver;
pub mod seed;
pub mod service;
pub mod settlement;
pub mod store;

pub use config::MarketConfig;
pub use query::{QueryEngine, SortOrder};
pub use service::{BrowseRequest, MarketService};
pub use settlement::{SettlementHandle, SettlementPipeline};
pub use store::MarketStore;
