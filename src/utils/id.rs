//! Stable listing identifiers.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Hex characters kept from the digest.
const ID_LEN: usize = 24;

/// Derive a listing id from its seller, title and creation time.
pub fn listing_id(seller_id: &str, title: &str, created_at: &DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seller_id.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(title.as_bytes());
    hasher.update(b"\x1f");
    hasher.update(created_at.timestamp_millis().to_be_bytes());

    let mut id = hex::encode(hasher.finalize());
    id.truncate(ID_LEN);
    id
}
