// src/services/category.rs

//! Category normalization, inference and membership.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{CatalogConfig, CategoryTaxonomy, Listing, SearchConfig};
use crate::services::AliasTable;
use crate::utils::{strip_plural, title_case, to_key};

/// Decides which canonical category a listing or search term belongs to.
///
/// Immutable once built; share it by reference or `Arc` across requests.
#[derive(Debug, Clone)]
pub struct CategoryMatcher {
    taxonomy: CategoryTaxonomy,
    aliases: AliasTable,
    hint_description_chars: usize,
}

impl CategoryMatcher {
    /// Create a matcher from prebuilt tables.
    pub fn new(
        taxonomy: CategoryTaxonomy,
        aliases: AliasTable,
        hint_description_chars: usize,
    ) -> Self {
        Self {
            taxonomy,
            aliases,
            hint_description_chars,
        }
    }

    /// Build and validate the tables from configuration.
    pub fn from_config(catalog: &CatalogConfig, search: &SearchConfig) -> Result<Self> {
        let taxonomy = CategoryTaxonomy::new(&catalog.categories, &catalog.fallback)?;
        let aliases = AliasTable::new(&catalog.aliases, &catalog.excluded_terms, &taxonomy)?;

        log::debug!(
            "Category matcher ready: {} categories, {} aliases",
            taxonomy.names().len(),
            aliases.len()
        );

        Ok(Self::new(taxonomy, aliases, search.hint_description_chars))
    }

    pub fn taxonomy(&self) -> &CategoryTaxonomy {
        &self.taxonomy
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Canonical category for stored free text.
    ///
    /// Title-cases the trimmed input; anything that is not a taxonomy key
    /// (including empty input) becomes the fallback category.
    pub fn normalize_category(&self, raw: &str) -> &str {
        let cased = title_case(raw);
        self.taxonomy
            .names()
            .iter()
            .find(|name| **name == cased)
            .map(String::as_str)
            .unwrap_or_else(|| self.taxonomy.fallback())
    }

    /// Category hinted by a single search term, if any.
    ///
    /// `None` means the term is a plain keyword.
    pub fn infer_category_from_query(&self, term: &str) -> Option<&str> {
        let key = to_key(term);
        if key.is_empty() || self.aliases.is_excluded(&key) {
            return None;
        }
        if let Some(category) = self.aliases.get(&key) {
            return Some(category);
        }

        if let Some(stem) = strip_plural(&key) {
            if self.aliases.is_excluded(stem) {
                return None;
            }
            if let Some(category) = self.aliases.get(stem) {
                return Some(category);
            }
        }

        self.taxonomy.find_ignore_case(&key)
    }

    /// Categories hinted by aliases occurring as whole words in `text`.
    pub fn infer_categories_from_text(&self, text: &str) -> HashSet<&str> {
        self.aliases.scan(text)
    }

    /// The listing's explicit category, unless it is missing or the fallback.
    pub fn explicit_category(&self, listing: &Listing) -> Option<&str> {
        let main = self.normalize_category(&listing.category);
        (main != self.taxonomy.fallback()).then_some(main)
    }

    /// Whether a listing belongs to the selected category.
    ///
    /// An explicit category is authoritative: it matches the wanted category
    /// or any parent of it, never a sibling. Without one, category hints
    /// from the listing text decide. Selecting the fallback only matches
    /// listings that have no explicit category.
    pub fn belongs_to_category(&self, listing: &Listing, selected: &str) -> bool {
        if selected.trim().is_empty() {
            return true;
        }

        let wanted = self.normalize_category(selected);
        let explicit = self.explicit_category(listing);

        if wanted == self.taxonomy.fallback() {
            return explicit.is_none();
        }

        if let Some(main) = explicit {
            return self.taxonomy.subsumes(wanted, main);
        }

        let text = listing.hint_text(self.hint_description_chars);
        let hints = self.infer_categories_from_text(&text);
        if hints.contains(wanted) {
            return true;
        }
        hints.iter().any(|hint| self.taxonomy.is_child_of(hint, wanted))
    }
}
