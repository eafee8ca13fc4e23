// src/models/mod.rs

//! Domain models for the marketplace library.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod listing;
mod query;
mod taxonomy;

// Re-export all public types
pub use config::{AliasMapping, CatalogConfig, CategoryEntry, Config, LoggingConfig, SearchConfig};
pub use listing::{Condition, Listing, ListingDraft};
pub use query::{SearchPage, SearchParams, SearchQuery, SortMode};
pub use taxonomy::{CategoryGroup, CategoryTaxonomy};

#[cfg(test)]
pub(crate) use listing::tests::listing as test_listing;

/// Which of a seller's listings to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerStatus {
    /// Unsold only
    Active,
    Sold,
    #[default]
    All,
}

impl SellerStatus {
    /// Parse a request value; unknown values mean `All`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "active" => SellerStatus::Active,
            "sold" => SellerStatus::Sold,
            _ => SellerStatus::All,
        }
    }

    /// Whether a listing with the given sold flag is shown.
    pub fn admits(self, is_sold: bool) -> bool {
        match self {
            SellerStatus::Active => !is_sold,
            SellerStatus::Sold => is_sold,
            SellerStatus::All => true,
        }
    }
}

/// Number of listings under one category.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryFacet {
    pub category: String,
    pub count: usize,
}
