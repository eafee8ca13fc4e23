// src/pipeline/search.rs

//! Listing search: filter, rank, paginate.

use crate::error::Result;
use crate::models::{Listing, SearchPage, SearchQuery, SortMode};
use crate::pipeline::rank::rank;
use crate::services::{CategoryMatcher, KeywordFilter};

/// How free text narrows the candidate set.
#[derive(Debug, Clone)]
pub enum TextFilter {
    /// No free text was supplied
    None,
    /// The whole query resolved to a category
    Category(String),
    /// Word-boundary keyword matching over title and brand
    Keywords(KeywordFilter),
}

/// Filters derived from one search request.
#[derive(Debug, Clone)]
pub struct SearchPlan<'m> {
    matcher: &'m CategoryMatcher,
    category: Option<String>,
    text: TextFilter,
}

impl<'m> SearchPlan<'m> {
    /// Work out the filters for a query.
    ///
    /// Fails only if a keyword pattern cannot be compiled.
    pub fn new(matcher: &'m CategoryMatcher, query: &SearchQuery) -> Result<Self> {
        let category = Some(query.category.trim())
            .filter(|c| !c.is_empty())
            .map(String::from);

        let text = if query.search.is_empty() {
            TextFilter::None
        } else if let Some(inferred) = matcher.infer_category_from_query(&query.search) {
            log::debug!("Query {:?} resolved to category {}", query.search, inferred);
            TextFilter::Category(inferred.to_string())
        } else {
            let keywords = KeywordFilter::build(&query.search, query.strict)?;
            log::debug!("Query {:?} tokens: {:?}", query.search, keywords.tokens());
            TextFilter::Keywords(keywords)
        };

        Ok(Self {
            matcher,
            category,
            text,
        })
    }

    pub fn text(&self) -> &TextFilter {
        &self.text
    }

    /// The category the request is scoped to, explicit or inferred.
    pub fn scope(&self) -> Option<&str> {
        match (&self.category, &self.text) {
            (Some(explicit), _) => Some(self.matcher.normalize_category(explicit)),
            (None, TextFilter::Category(inferred)) => Some(inferred.as_str()),
            _ => None,
        }
    }

    /// Whether a visible listing passes every filter.
    pub fn admits(&self, listing: &Listing) -> bool {
        if let Some(category) = &self.category {
            if !self.matcher.belongs_to_category(listing, category) {
                return false;
            }
        }
        match &self.text {
            TextFilter::None => true,
            TextFilter::Category(inferred) => self.matcher.belongs_to_category(listing, inferred),
            TextFilter::Keywords(keywords) => keywords.matches(listing),
        }
    }
}

/// Run a search over the caller-supplied candidate listings.
///
/// Reported and hidden listings never appear. A `forYou` request scoped to
/// the fallback category that finds nothing is retried once with only the
/// fallback membership rule.
pub fn search(
    matcher: &CategoryMatcher,
    listings: &[Listing],
    query: &SearchQuery,
) -> Result<SearchPage> {
    let plan = SearchPlan::new(matcher, query)?;
    let visible = || listings.iter().filter(|l| !l.is_withheld());

    let mut matched: Vec<&Listing> = visible().filter(|l| plan.admits(l)).collect();
    let mut fallback = false;

    let fallback_category = matcher.taxonomy().fallback();
    if matched.is_empty()
        && query.sort == SortMode::ForYou
        && plan.scope() == Some(fallback_category)
    {
        log::debug!("No results for {fallback_category} feed; retrying with membership rule only");
        matched = visible()
            .filter(|l| matcher.belongs_to_category(l, fallback_category))
            .collect();
        fallback = !matched.is_empty();
    }

    rank(&mut matched, query.sort);

    let total = matched.len();
    let items: Vec<Listing> = matched
        .into_iter()
        .skip(query.offset())
        .take(query.page_size)
        .cloned()
        .collect();

    log::debug!(
        "Search {:?} in {:?}: {} of {} on page {}",
        query.search,
        query.category,
        items.len(),
        total,
        query.page
    );

    Ok(SearchPage {
        page: query.page,
        page_size: query.page_size,
        total,
        items,
        fallback,
    })
}
