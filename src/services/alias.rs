// src/services/alias.rs

//! Alias table: free-text synonyms mapped to canonical categories.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{AliasMapping, CategoryTaxonomy};
use crate::utils::to_key;

/// One alias with its precompiled whole-word pattern.
#[derive(Debug, Clone)]
struct AliasRule {
    category: String,
    pattern: Regex,
}

/// Lowercase alias → canonical category, plus terms barred from query inference.
#[derive(Debug, Clone)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
    lookup: HashMap<String, usize>,
    excluded: HashSet<String>,
}

impl AliasTable {
    /// Build the table, checking every alias against the taxonomy.
    pub fn new(
        mappings: &[AliasMapping],
        excluded_terms: &[String],
        taxonomy: &CategoryTaxonomy,
    ) -> Result<Self> {
        let mut rules = Vec::with_capacity(mappings.len());
        let mut lookup = HashMap::with_capacity(mappings.len());

        for mapping in mappings {
            let alias = to_key(&mapping.alias);
            if alias.is_empty() {
                return Err(AppError::taxonomy("alias is empty"));
            }
            if !taxonomy.contains(&mapping.category) {
                return Err(AppError::taxonomy(format!(
                    "alias '{alias}' targets unknown category '{}'",
                    mapping.category
                )));
            }
            if lookup.contains_key(&alias) {
                return Err(AppError::taxonomy(format!("duplicate alias '{alias}'")));
            }

            let source = format!(r"(?i)\b{}\b", regex::escape(&alias));
            let pattern = Regex::new(&source).map_err(|e| AppError::pattern(&alias, e))?;

            lookup.insert(alias, rules.len());
            rules.push(AliasRule {
                category: mapping.category.clone(),
                pattern,
            });
        }

        let excluded = excluded_terms
            .iter()
            .map(|t| to_key(t))
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Self {
            rules,
            lookup,
            excluded,
        })
    }

    /// Category for an exact (already lowercased) alias.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lookup
            .get(key)
            .map(|&idx| self.rules[idx].category.as_str())
    }

    /// Whether a term is barred from query inference.
    pub fn is_excluded(&self, key: &str) -> bool {
        self.excluded.contains(key)
    }

    /// Categories of every alias that occurs as a whole word in `text`.
    ///
    /// Excluded terms still count here; the exclusion only applies to
    /// search-query inference.
    pub fn scan<'a>(&'a self, text: &str) -> HashSet<&'a str> {
        self.rules
            .iter()
            .filter(|rule| rule.pattern.is_match(text))
            .map(|rule| rule.category.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
