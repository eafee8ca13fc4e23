// src/services/listings.rs

//! Turns a seller's draft into a stored listing.

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{Listing, ListingDraft};
use crate::services::CategoryMatcher;
use crate::utils::id::listing_id;

/// Validate a draft and produce a listing with a canonical category.
pub fn prepare_listing(
    matcher: &CategoryMatcher,
    draft: ListingDraft,
    created_at: DateTime<Utc>,
) -> Result<Listing> {
    let seller_id = draft.seller_id.trim().to_string();
    if seller_id.is_empty() {
        return Err(AppError::validation("sellerId is required"));
    }

    let title = draft.title.trim().to_string();
    let price = match draft.price {
        Some(price) if !title.is_empty() => price,
        _ => return Err(AppError::validation("title and price are required")),
    };
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation(format!("invalid price: {price}")));
    }
    if let Some(original) = draft.original_price {
        if !original.is_finite() || original < 0.0 {
            return Err(AppError::validation(format!(
                "invalid original price: {original}"
            )));
        }
    }

    let category = matcher.normalize_category(&draft.category).to_string();
    let tags: Vec<String> = draft
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();
    let images: Vec<String> = draft
        .images
        .into_iter()
        .filter(|i| !i.trim().is_empty())
        .collect();
    let image = if draft.image.trim().is_empty() {
        images.first().cloned().unwrap_or_default()
    } else {
        draft.image
    };

    log::debug!("Prepared listing '{}' as {}", title, category);

    Ok(Listing {
        id: listing_id(&seller_id, &title, &created_at),
        seller_id,
        title,
        description: draft.description,
        brand: draft.brand.trim().to_string(),
        category,
        tags,
        price,
        original_price: draft.original_price,
        condition: draft.condition,
        location: draft.location,
        warranty: draft.warranty,
        image,
        images,
        is_sold: false,
        is_reported: false,
        is_hidden: false,
        created_at,
    })
}
