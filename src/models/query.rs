//! Search request and result structures.

use serde::{Deserialize, Serialize};

use crate::models::{Listing, SearchConfig};

/// Secondary ordering applied after the unsold-first rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    #[default]
    Latest,
    PriceAsc,
    PriceDesc,
    ForYou,
}

impl SortMode {
    /// Parse a request value; unknown values fall back to `Latest`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "priceAsc" => SortMode::PriceAsc,
            "priceDesc" => SortMode::PriceDesc,
            "forYou" => SortMode::ForYou,
            // "popular" was reserved upstream and always ordered by recency
            _ => SortMode::Latest,
        }
    }
}

/// Raw search parameters as they arrive on a request query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
    pub strict: Option<String>,
}

/// A parsed, bounded search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free text; empty means no textual filter
    pub search: String,
    /// Explicit category; empty means no category filter
    pub category: String,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    pub sort: SortMode,
    /// Disable plural leniency in keyword matching
    pub strict: bool,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            page: 1,
            page_size: SearchConfig::default().default_page_size,
            sort: SortMode::Latest,
            strict: false,
        }
    }
}

impl SearchQuery {
    /// Build a query from raw request values.
    ///
    /// Never fails: unparsable numbers use defaults, page is at least 1,
    /// and page size is clamped to `1..=max_page_size`.
    pub fn from_params(params: &SearchParams, config: &SearchConfig) -> Self {
        let page = parse_positive(params.page.as_deref()).unwrap_or(1);
        let page_size = parse_positive(params.page_size.as_deref())
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size.max(1));

        Self {
            search: params.search.clone().unwrap_or_default(),
            category: params.category.clone().unwrap_or_default(),
            page,
            page_size,
            sort: params
                .sort
                .as_deref()
                .map(SortMode::parse)
                .unwrap_or_default(),
            strict: params.strict.as_deref().is_some_and(parse_flag),
        }
    }

    /// Zero-based offset of the first item on the requested page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.page_size)
    }
}

fn parse_positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// One page of ranked search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub page: usize,
    pub page_size: usize,
    /// Size of the full filtered set before pagination
    pub total: usize,
    pub items: Vec<Listing>,
    /// Set when the `Other` fallback produced these results
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl SearchPage {
    /// An empty page echoing the request window.
    pub fn empty(query: &SearchQuery) -> Self {
        Self {
            page: query.page,
            page_size: query.page_size,
            total: 0,
            items: Vec::new(),
            fallback: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: &str, page_size: &str) -> SearchParams {
        SearchParams {
            page: Some(page.to_string()),
            page_size: Some(page_size.to_string()),
            ..SearchParams::default()
        }
    }

    #[test]
    fn test_default_query_uses_configured_page_size() {
        assert_eq!(
            SearchQuery::default().page_size,
            SearchConfig::default().default_page_size
        );
        let empty = SearchQuery::from_params(&SearchParams::default(), &SearchConfig::default());
        assert_eq!(empty.page_size, SearchQuery::default().page_size);
    }

    #[test]
    fn test_defaults_when_missing() {
        let query = SearchQuery::from_params(&SearchParams::default(), &SearchConfig::default());
        assert_eq!(query, SearchQuery::default());
    }

    #[test]
    fn test_page_size_is_clamped() {
        let config = SearchConfig::default();
        assert_eq!(SearchQuery::from_params(&params("1", "500"), &config).page_size, 48);
        assert_eq!(SearchQuery::from_params(&params("1", "0"), &config).page_size, 12);
        assert_eq!(SearchQuery::from_params(&params("1", "abc"), &config).page_size, 12);
    }

    #[test]
    fn test_invalid_page_defaults_to_first() {
        let config = SearchConfig::default();
        assert_eq!(SearchQuery::from_params(&params("-3", "12"), &config).page, 1);
        assert_eq!(SearchQuery::from_params(&params("4", "12"), &config).offset(), 36);
    }

    #[test]
    fn test_sort_and_strict_parsing() {
        let raw = SearchParams {
            sort: Some("priceDesc".to_string()),
            strict: Some("TRUE".to_string()),
            ..SearchParams::default()
        };
        let query = SearchQuery::from_params(&raw, &SearchConfig::default());
        assert_eq!(query.sort, SortMode::PriceDesc);
        assert!(query.strict);

        assert_eq!(SortMode::parse("popular"), SortMode::Latest);
        assert_eq!(SortMode::parse("bogus"), SortMode::Latest);
        assert_eq!(SortMode::parse("forYou"), SortMode::ForYou);
    }
}
