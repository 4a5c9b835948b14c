//! Naming scheme for on-disk response artifacts.
//!
//! Folder names must be unguessable (peers are handed them as opaque URLs)
//! and carry their own bookkeeping: cache folders get a `cache_` prefix,
//! POST-response folders are prefixed with their expiry time so the reaper
//! can drop them without opening them.
//!
//! The name hash is a SHA-256 over 16 bytes drawn uniformly from the
//! letters-only alphabet `[a-zA-Z]`, hex-encoded. The letters-only salt
//! alphabet is a protocol fixture; changing it changes the keyspace peers
//! have come to expect.

use crate::wire::types::{unix_now, Timestamp};
use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const SALT_LEN: usize = 16;

/// Generates a fresh 64-hex-character artifact name hash.
pub fn random_hash() -> String {
    let mut rng = OsRng;
    let mut salt = [0u8; SALT_LEN];
    for byte in salt.iter_mut() {
        *byte = NAME_ALPHABET[rng.gen_range(0..NAME_ALPHABET.len())];
    }
    hex::encode(Sha256::digest(salt))
}

/// Generates a fresh cache folder name, `cache_<hash>`.
pub fn cache_name() -> String {
    format!("cache_{}", random_hash())
}

/// Returns the Unix time at which a POST response generated now expires.
pub fn expiry_timestamp(expiry_minutes: i64) -> Timestamp {
    unix_now() + expiry_minutes * 60
}

/// Generates a fresh POST-response folder name, `<expiryUnix>_<hash>`.
pub fn post_response_folder(expiry_minutes: i64) -> String {
    format!("{}_{}", expiry_timestamp(expiry_minutes), random_hash())
}
