// src/pipeline/rank.rs

//! Result ordering: unsold listings first, then the requested key.

use std::cmp::Ordering;

use crate::models::{Listing, SortMode};

/// Compare two listings under the given sort mode.
///
/// Unsold always precede sold. Ties on the secondary key fall back to
/// newest first.
pub fn compare(a: &Listing, b: &Listing, sort: SortMode) -> Ordering {
    a.is_sold
        .cmp(&b.is_sold)
        .then_with(|| match sort {
            SortMode::PriceAsc => a.price.total_cmp(&b.price),
            SortMode::PriceDesc => b.price.total_cmp(&a.price),
            SortMode::Latest | SortMode::ForYou => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sort listings in place. Stable, so fully tied listings keep input order.
pub fn rank(items: &mut [&Listing], sort: SortMode) {
    items.sort_by(|a, b| compare(a, b, sort));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_listing;
    use chrono::{Duration, TimeZone, Utc};

    fn item(id: &str, sold: bool, price: f64, day: i64) -> Listing {
        let mut l = test_listing(id, id, "");
        l.is_sold = sold;
        l.price = price;
        l.created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::days(day);
        l
    }

    fn ids(items: &[&Listing]) -> Vec<String> {
        items.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_unsold_before_sold_regardless_of_age() {
        let listings = vec![item("sold", true, 5.0, 30), item("a", false, 5.0, 1), item("b", false, 5.0, 2)];
        let mut refs: Vec<&Listing> = listings.iter().collect();
        rank(&mut refs, SortMode::Latest);
        assert_eq!(ids(&refs), vec!["b", "a", "sold"]);
    }

    #[test]
    fn test_price_orders_within_sold_groups() {
        let listings = vec![
            item("cheap-sold", true, 1.0, 0),
            item("mid", false, 50.0, 0),
            item("cheap", false, 10.0, 0),
            item("dear", false, 90.0, 0),
        ];
        let mut refs: Vec<&Listing> = listings.iter().collect();

        rank(&mut refs, SortMode::PriceAsc);
        assert_eq!(ids(&refs), vec!["cheap", "mid", "dear", "cheap-sold"]);

        rank(&mut refs, SortMode::PriceDesc);
        assert_eq!(ids(&refs), vec!["dear", "mid", "cheap", "cheap-sold"]);
    }

    #[test]
    fn test_price_ties_break_by_recency() {
        let listings = vec![item("old", false, 20.0, 1), item("new", false, 20.0, 9)];
        let mut refs: Vec<&Listing> = listings.iter().collect();
        rank(&mut refs, SortMode::PriceAsc);
        assert_eq!(ids(&refs), vec!["new", "old"]);
    }

    #[test]
    fn test_for_you_orders_by_recency() {
        let listings = vec![item("old", false, 1.0, 1), item("new", false, 99.0, 5)];
        let mut refs: Vec<&Listing> = listings.iter().collect();
        rank(&mut refs, SortMode::ForYou);
        assert_eq!(ids(&refs), vec!["new", "old"]);
    }
}
