//! Transaction hash generation.
//!
//! Transactions carry a chain-style hash: `0x` followed by 64 lowercase hex
//! characters drawn from 32 random bytes. A provisional hash is assigned at
//! creation and replaced with a fresh one when settlement completes, so the
//! settled hash always differs from the provisional one (up to the
//! negligible chance of a 256-bit collision).

use std::fmt::Write as _;

use rand::Rng;

/// Hash length in bytes before hex encoding.
const HASH_BYTES: usize = 32;

/// Generates a new random transaction hash.
///
/// # Example
///
/// ```
/// let hash = pusaka_types::generate_transaction_hash();
/// assert!(hash.starts_with("0x"));
/// assert_eq!(hash.len(), 66);
/// ```
#[must_use]
pub fn generate() -> String {
    let bytes: [u8; HASH_BYTES] = rand::rng().random();
    let mut hash = String::with_capacity(2 + HASH_BYTES * 2);
    hash.push_str("0x");
    for byte in bytes {
        // Writing to a String cannot fail.
        let _ = write!(hash, "{byte:02x}");
    }
    hash
}
