// src/pipeline/recommend.rs

//! Home page recommendation rows.

use serde::{Deserialize, Serialize};

use crate::models::Listing;
use crate::services::CategoryMatcher;

/// Recommendation row selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecommendTab {
    #[default]
    ForYou,
    Popular,
    Latest,
}

impl RecommendTab {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "popular" => RecommendTab::Popular,
            "latest" => RecommendTab::Latest,
            _ => RecommendTab::ForYou,
        }
    }
}

/// Up to `limit` unsold, visible listings for a home page row.
///
/// `Popular` ranks by price descending, `Latest` by recency. `ForYou` is
/// scoped to `category` when one is given and ranked by recency.
pub fn recommend<'a>(
    matcher: &CategoryMatcher,
    listings: &'a [Listing],
    tab: RecommendTab,
    category: &str,
    limit: usize,
) -> Vec<&'a Listing> {
    let mut pool: Vec<&Listing> = listings
        .iter()
        .filter(|l| !l.is_sold && !l.is_withheld())
        .filter(|l| tab != RecommendTab::ForYou || matcher.belongs_to_category(l, category))
        .collect();

    match tab {
        RecommendTab::Popular => pool.sort_by(|a, b| {
            b.price
                .total_cmp(&a.price)
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
        RecommendTab::Latest | RecommendTab::ForYou => {
            pool.sort_by(|a, b| b.created_at.cmp(&a.created_at))
        }
    }

    pool.truncate(limit);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogConfig, SearchConfig, test_listing};
    use chrono::{Duration, TimeZone, Utc};

    fn matcher() -> CategoryMatcher {
        CategoryMatcher::from_config(&CatalogConfig::default(), &SearchConfig::default()).unwrap()
    }

    fn pool() -> Vec<Listing> {
        let base = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let rows = [
            ("guitar", "Acoustic guitar", "", 120.0, false),
            ("bike", "City bike", "Bikes", 80.0, false),
            ("ps5", "PS5 console", "Consoles", 400.0, true),
            ("desk", "Desk", "Furniture", 40.0, false),
        ];
        rows
            .iter()
            .enumerate()
            .map(|(i, (id, title, category, price, sold))| {
                let mut l = test_listing(id, title, category);
                l.price = *price;
                l.is_sold = *sold;
                l.created_at = base + Duration::days(i as i64);
                l
            })
            .collect()
    }

    fn ids(items: &[&Listing]) -> Vec<String> {
        items.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_popular_by_price_excluding_sold() {
        let m = matcher();
        let listings = pool();
        let row = recommend(&m, &listings, RecommendTab::Popular, "", 12);
        assert_eq!(ids(&row), vec!["guitar", "bike", "desk"]);
    }

    #[test]
    fn test_latest_with_limit() {
        let m = matcher();
        let listings = pool();
        let row = recommend(&m, &listings, RecommendTab::Latest, "", 2);
        assert_eq!(ids(&row), vec!["desk", "bike"]);
    }

    #[test]
    fn test_for_you_scoped_to_category() {
        let m = matcher();
        let listings = pool();
        let row = recommend(&m, &listings, RecommendTab::ForYou, "Sports", 12);
        assert_eq!(ids(&row), vec!["bike"]);

        let row = recommend(&m, &listings, RecommendTab::ForYou, "Instruments", 12);
        assert_eq!(ids(&row), vec!["guitar"]);

        let row = recommend(&m, &listings, RecommendTab::ForYou, "", 12);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_parse_tab() {
        assert_eq!(RecommendTab::parse("popular"), RecommendTab::Popular);
        assert_eq!(RecommendTab::parse("latest"), RecommendTab::Latest);
        assert_eq!(RecommendTab::parse("anything"), RecommendTab::ForYou);
    }
}
