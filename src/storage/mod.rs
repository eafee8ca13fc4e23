//! Storage abstractions for listing persistence.
//!
//! The matcher never touches storage; callers fetch the candidate set once
//! per request and hand it over.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml       # Search and catalog configuration
//! └── listings.json     # All listings
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Listing;

// Re-export for convenience
pub use local::LocalStorage;

/// On-disk listing document with a write timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsData {
    /// ISO 8601 timestamp of last update
    pub updated_at: DateTime<Utc>,
    /// Total listing count
    pub count: usize,
    pub listings: Vec<Listing>,
}

impl ListingsData {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            updated_at: Utc::now(),
            count: listings.len(),
            listings,
        }
    }
}

/// Trait for listing storage backends.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Load every stored listing; an absent store is empty.
    async fn load_listings(&self) -> Result<Vec<Listing>>;

    /// Replace the stored listings.
    async fn save_listings(&self, listings: &[Listing]) -> Result<()>;

    /// Append one listing, rejecting a duplicate id.
    async fn insert_listing(&self, listing: Listing) -> Result<()>;

    /// Find a listing by id.
    async fn find_listing(&self, id: &str) -> Result<Option<Listing>> {
        Ok(self
            .load_listings()
            .await?
            .into_iter()
            .find(|l| l.id == id))
    }
}
