//! Listing data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Physical condition of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Brand New")]
    BrandNew,
    #[serde(rename = "Like New")]
    LikeNew,
    #[default]
    Good,
    Fair,
    Poor,
}

/// An item posted for sale.
///
/// Field names serialize in camelCase so stored documents keep the
/// marketplace's wire shape (`isSold`, `createdAt`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique identifier
    pub id: String,

    /// Posting user
    pub seller_id: String,

    /// Listing title
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub brand: String,

    /// Free-text category, possibly empty
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Asking price
    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,

    #[serde(default)]
    pub condition: Condition,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub warranty: bool,

    /// Cover image
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub is_sold: bool,

    /// Flagged by a user report
    #[serde(default)]
    pub is_reported: bool,

    /// Hidden by moderation
    #[serde(default)]
    pub is_hidden: bool,

    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Whether moderation keeps this listing out of public results.
    pub fn is_withheld(&self) -> bool {
        self.is_reported || self.is_hidden
    }

    /// Text used to infer a category when none is stored explicitly.
    ///
    /// Title, brand, the first `description_chars` characters of the
    /// description, and every tag, joined by single spaces.
    pub fn hint_text(&self, description_chars: usize) -> String {
        let description: String = self
            .description
            .graphemes(true)
            .take(description_chars)
            .collect();

        let mut parts: Vec<&str> = vec![&self.title, &self.brand, &description];
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// Listing as submitted by a seller, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingDraft {
    pub seller_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub brand: String,
    pub condition: Condition,
    pub location: String,
    pub warranty: bool,
    pub tags: Vec<String>,
    pub image: String,
    pub images: Vec<String>,
}
