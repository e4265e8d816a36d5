//! Input validation rules.
//!
//! The external HTTP/schema layer owns request validation, but the rules
//! themselves live here so the core and the boundary agree on them. Two of
//! these rules pin down behaviors the data model alone leaves open:
//!
//! - Prices are decimal strings; they must parse as finite, non-negative
//!   numbers so price-based ordering never meets a malformed value.
//! - Usernames are lowercase alphanumeric with underscores, 3–32 chars.

use snafu::ensure;

use crate::{
    error::{MarketError, Result, ValidationSnafu},
    types::{NewCollection, NewNft, NewTransaction, NewUser},
};

/// Minimum username length.
const USERNAME_MIN: usize = 3;

/// Maximum username length.
const USERNAME_MAX: usize = 32;

/// Parses a price string under the strict price rule.
///
/// # Errors
///
/// Returns [`MarketError::Validation`] if the string is not a finite,
/// non-negative decimal number.
pub fn parse_price(price: &str) -> Result<f64> {
    let value: f64 = price.trim().parse().map_err(|_| MarketError::Validation {
        field: "price",
        reason: format!("{price:?} is not a decimal number"),
    })?;
    ensure!(
        value.is_finite() && value >= 0.0,
        ValidationSnafu { field: "price", reason: format!("{price:?} must be non-negative") }
    );
    Ok(value)
}

/// Validates a price string without returning the parsed value.
///
/// # Errors
///
/// Returns [`MarketError::Validation`] under the same rule as [`parse_price`].
pub fn validate_price(price: &str) -> Result<()> {
    parse_price(price).map(|_| ())
}

/// Validates a username: 3–32 chars of `[a-z0-9_]`.
///
/// # Errors
///
/// Returns [`MarketError::Validation`] if the username is malformed.
pub fn validate_username(username: &str) -> Result<()> {
    ensure!(
        (USERNAME_MIN..=USERNAME_MAX).contains(&username.len()),
        ValidationSnafu {
            field: "username",
            reason: format!("length must be {USERNAME_MIN}-{USERNAME_MAX} characters"),
        }
    );
    ensure!(
        username.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
        ValidationSnafu {
            field: "username",
            reason: "only lowercase letters, digits, and underscores are allowed".to_string(),
        }
    );
    Ok(())
}

/// Validates a required, non-empty string field.
fn require(field: &'static str, value: &str) -> Result<()> {
    ensure!(
        !value.trim().is_empty(),
        ValidationSnafu { field, reason: "must not be empty".to_string() }
    );
    Ok(())
}

/// Validates the input for creating a user.
///
/// # Errors
///
/// Returns [`MarketError::Validation`] on a malformed username or an empty
/// display name. Uniqueness is checked by the store, not here.
pub fn validate_new_user(input: &NewUser) -> Result<()> {
    validate_username(&input.username)?;
    require("display_name", &input.display_name)
}

/// Validates the input for creating a collection.
///
/// # Errors
///
/// Returns [`MarketError::Validation`] on an empty name or a malformed
/// floor price.
pub fn validate_new_collection(input: &NewCollection) -> Result<()> {
    require("name", &input.name)?;
    if let Some(floor) = &input.floor_price {
        parse_price(floor).map_err(|_| MarketError::Validation {
            field: "floor_price",
            reason: format!("{floor:?} is not a valid price"),
        })?;
    }
    Ok(())
}

/// Validates the input for creating an NFT.
///
/// Category is deliberately not checked against [`crate::CATEGORIES`]; it is
/// stored as free text.
///
/// # Errors
///
/// Returns [`MarketError::Validation`] on an empty name or image, or a
/// malformed price.
pub fn validate_new_nft(input: &NewNft) -> Result<()> {
    require("name", &input.name)?;
    require("image", &input.image)?;
    require("category", &input.category)?;
    validate_price(&input.price)
}

/// Validates the input for creating a transaction.
///
/// # Errors
///
/// Returns [`MarketError::Validation`] on a malformed price or a
/// self-transfer (sender equals recipient).
pub fn validate_new_transaction(input: &NewTransaction) -> Result<()> {
    validate_price(&input.price)?;
    ensure!(
        input.from_user_id != input.to_user_id,
        ValidationSnafu {
            field: "to_user_id",
            reason: "sender and recipient must differ".to_string(),
        }
    );
    Ok(())
}
