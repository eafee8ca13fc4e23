// src/pipeline/shop.rs

//! Seller shop views: listings by status and category facets.

use crate::models::{CategoryFacet, Listing, SellerStatus};
use crate::services::CategoryMatcher;

/// A seller's listings, newest first. Reported listings are left out.
pub fn seller_listings<'a>(
    listings: &'a [Listing],
    seller_id: &str,
    status: SellerStatus,
) -> Vec<&'a Listing> {
    let mut items: Vec<&Listing> = listings
        .iter()
        .filter(|l| l.seller_id == seller_id && !l.is_reported)
        .filter(|l| status.admits(l.is_sold))
        .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}

/// Listing counts per category, in taxonomy display order.
///
/// A listing counts toward every category it belongs to, so a phone
/// counts under both `Phones` and `Electronics`. Empty categories are
/// omitted.
pub fn category_facets<'a>(
    matcher: &CategoryMatcher,
    listings: impl IntoIterator<Item = &'a Listing>,
) -> Vec<CategoryFacet> {
    let visible: Vec<&Listing> = listings.into_iter().filter(|l| !l.is_withheld()).collect();

    matcher
        .taxonomy()
        .names()
        .iter()
        .filter_map(|name| {
            let count = visible
                .iter()
                .filter(|l| matcher.belongs_to_category(l, name))
                .count();
            (count > 0).then(|| CategoryFacet {
                category: name.clone(),
                count,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogConfig, SearchConfig, test_listing};
    use chrono::{Duration, TimeZone, Utc};

    fn matcher() -> CategoryMatcher {
        CategoryMatcher::from_config(&CatalogConfig::default(), &SearchConfig::default()).unwrap()
    }

    fn shop() -> Vec<Listing> {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut listings = vec![
            test_listing("a", "iPhone 12", ""),
            test_listing("b", "Textbook bundle", "Textbooks"),
            test_listing("c", "Camping tent", "Outdoors"),
            test_listing("d", "Old sofa", "Furniture"),
        ];
        for (i, l) in listings.iter_mut().enumerate() {
            l.created_at = base + Duration::days(i as i64);
        }
        listings[2].is_sold = true;
        listings[3].seller_id = "someone-else".to_string();
        listings
    }

    #[test]
    fn test_seller_listings_by_status() {
        let listings = shop();
        let ids = |v: Vec<&Listing>| v.iter().map(|l| l.id.clone()).collect::<Vec<_>>();

        assert_eq!(
            ids(seller_listings(&listings, "seller-1", SellerStatus::All)),
            vec!["c", "b", "a"]
        );
        assert_eq!(
            ids(seller_listings(&listings, "seller-1", SellerStatus::Active)),
            vec!["b", "a"]
        );
        assert_eq!(
            ids(seller_listings(&listings, "seller-1", SellerStatus::Sold)),
            vec!["c"]
        );
    }

    #[test]
    fn test_seller_listings_skip_reported() {
        let mut listings = shop();
        listings[0].is_reported = true;
        let items = seller_listings(&listings, "seller-1", SellerStatus::All);
        assert!(items.iter().all(|l| l.id != "a"));
    }

    #[test]
    fn test_category_facets() {
        let m = matcher();
        let facets = category_facets(&m, &shop());
        let pairs: Vec<(&str, usize)> = facets
            .iter()
            .map(|f| (f.category.as_str(), f.count))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("Books", 1),
                ("Textbooks", 1),
                ("Electronics", 1),
                ("Phones", 1),
                ("Home", 1),
                ("Furniture", 1),
                ("Sports", 1),
                ("Outdoors", 1),
                ("Other", 1),
            ]
        );
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(SellerStatus::parse("active"), SellerStatus::Active);
        assert_eq!(SellerStatus::parse("sold"), SellerStatus::Sold);
        assert_eq!(SellerStatus::parse("whatever"), SellerStatus::All);
    }
}
