//! # Hashing
//!
//! Keccak-256, the hash used to derive role identifiers from role names.

use crate::entities::Hash;
use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 digest of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    Hash::new(digest.into())
}
