//! Core types for the Pusaka marketplace.
//!
//! This crate is the leaf of the workspace and defines:
//!
//! - Typed identifier newtypes (`UserId`, `CollectionId`, `NftId`, `TransactionId`)
//! - Entity records and their creation inputs
//! - Denormalized read-model views returned by the resolver
//! - Transaction hash generation
//! - Input validation rules shared with the external boundary
//! - The unified [`MarketError`] type

#![deny(unsafe_code)]

pub mod error;
mod ids;
mod txhash;
mod types;
mod validation;
mod views;

pub use error::{MarketError, Result};
pub use ids::{CollectionId, NftId, TransactionId, UserId};
pub use txhash::generate as generate_transaction_hash;
pub use types::{
    token_id, Collection, NewCollection, NewNft, NewTransaction, NewUser, Nft, Transaction,
    TransactionStatus, User, CATEGORIES, DEFAULT_CURRENCY, TOKEN_PREFIX,
};
pub use validation::{
    parse_price, validate_new_collection, validate_new_nft, validate_new_transaction,
    validate_new_user, validate_price, validate_username,
};
pub use views::{CollectionWithDetails, NftWithDetails, UserWithStats};
