// src/models/taxonomy.rs

//! Canonical category hierarchy.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::CategoryEntry;

/// Posting-form group of categories. Presentation only.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryGroup {
    pub group: String,
    pub items: Vec<String>,
}

/// Parent → children hierarchy of canonical categories.
///
/// A forest of depth at most two. The fallback category subsumes nothing.
#[derive(Debug, Clone)]
pub struct CategoryTaxonomy {
    names: Vec<String>,
    known: HashSet<String>,
    children: HashMap<String, Vec<String>>,
    groups: Vec<CategoryGroup>,
    fallback: String,
}

impl CategoryTaxonomy {
    /// Build and check a taxonomy from configured entries.
    pub fn new(entries: &[CategoryEntry], fallback: &str) -> Result<Self> {
        let mut names = Vec::with_capacity(entries.len());
        let mut known = HashSet::with_capacity(entries.len());

        for entry in entries {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(AppError::taxonomy("category name is empty"));
            }
            if !known.insert(name.to_string()) {
                return Err(AppError::taxonomy(format!("duplicate category '{name}'")));
            }
            names.push(name.to_string());
        }

        if !known.contains(fallback) {
            return Err(AppError::taxonomy(format!(
                "fallback category '{fallback}' is not defined"
            )));
        }

        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut parent_of: HashMap<&str, &str> = HashMap::new();

        for entry in entries.iter().filter(|e| !e.children.is_empty()) {
            let parent = entry.name.trim();
            if parent == fallback {
                return Err(AppError::taxonomy(format!(
                    "fallback category '{fallback}' cannot have children"
                )));
            }
            for child in &entry.children {
                let child = child.trim();
                if !known.contains(child) {
                    return Err(AppError::taxonomy(format!(
                        "'{parent}' lists unknown child '{child}'"
                    )));
                }
                if child == parent {
                    return Err(AppError::taxonomy(format!("'{parent}' lists itself")));
                }
                if let Some(previous) = parent_of.insert(child, parent) {
                    return Err(AppError::taxonomy(format!(
                        "'{child}' has two parents: '{previous}' and '{parent}'"
                    )));
                }
                children
                    .entry(parent.to_string())
                    .or_default()
                    .push(child.to_string());
            }
        }

        // Depth <= 2: a child may not itself be a parent
        if let Some(nested) = parent_of.keys().find(|c| children.contains_key(**c)) {
            return Err(AppError::taxonomy(format!(
                "'{nested}' is both a child and a parent"
            )));
        }

        let mut groups: Vec<CategoryGroup> = Vec::new();
        for entry in entries.iter().filter(|e| !e.group.trim().is_empty()) {
            let group = entry.group.trim();
            match groups.iter_mut().find(|g| g.group == group) {
                Some(existing) => existing.items.push(entry.name.trim().to_string()),
                None => groups.push(CategoryGroup {
                    group: group.to_string(),
                    items: vec![entry.name.trim().to_string()],
                }),
            }
        }

        Ok(Self {
            names,
            known,
            children,
            groups,
            fallback: fallback.to_string(),
        })
    }

    /// Canonical names in display order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` is a canonical category (exact, case-sensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// The absence-of-classification sentinel.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Direct children of a category.
    pub fn children(&self, name: &str) -> &[String] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `parent` lists `child` as a direct child.
    pub fn is_child_of(&self, child: &str, parent: &str) -> bool {
        self.children(parent).iter().any(|c| c == child)
    }

    /// Whether a query for `wanted` includes items classified as `category`.
    ///
    /// True for the category itself and its children; the fallback
    /// subsumes nothing.
    pub fn subsumes(&self, wanted: &str, category: &str) -> bool {
        if wanted == self.fallback || !self.contains(wanted) {
            return false;
        }
        wanted == category || self.is_child_of(category, wanted)
    }

    /// Case-insensitive lookup of a canonical name.
    pub fn find_ignore_case(&self, name: &str) -> Option<&str> {
        let key = name.trim().to_lowercase();
        self.names
            .iter()
            .find(|n| n.to_lowercase() == key)
            .map(String::as_str)
    }

    /// Display groups in first-seen order.
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogConfig;

    fn default_taxonomy() -> CategoryTaxonomy {
        let catalog = CatalogConfig::default();
        CategoryTaxonomy::new(&catalog.categories, &catalog.fallback).unwrap()
    }

    fn entry(name: &str, children: &[&str]) -> CategoryEntry {
        CategoryEntry {
            name: name.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
            group: String::new(),
        }
    }

    #[test]
    fn test_parent_subsumes_child_not_reverse() {
        let taxonomy = default_taxonomy();
        assert!(taxonomy.subsumes("Books", "Textbooks"));
        assert!(!taxonomy.subsumes("Textbooks", "Books"));
        assert!(taxonomy.subsumes("Electronics", "Phones"));
    }

    #[test]
    fn test_siblings_are_disjoint() {
        let taxonomy = default_taxonomy();
        assert!(!taxonomy.subsumes("Clothing", "Beauty"));
        assert!(!taxonomy.subsumes("Beauty", "Clothing"));
        assert!(!taxonomy.subsumes("Clothing", "Shoes"));
    }

    #[test]
    fn test_fallback_subsumes_nothing() {
        let taxonomy = default_taxonomy();
        assert!(!taxonomy.subsumes("Other", "Other"));
        assert!(!taxonomy.subsumes("Other", "Books"));
        assert!(taxonomy.children("Other").is_empty());
    }

    #[test]
    fn test_groups_keep_display_order() {
        let taxonomy = default_taxonomy();
        let groups: Vec<&str> = taxonomy.groups().iter().map(|g| g.group.as_str()).collect();
        assert_eq!(
            groups,
            vec![
                "Books",
                "Electronics",
                "Fashion",
                "Home & Living",
                "Sports & Outdoor",
                "Others"
            ]
        );
        assert_eq!(taxonomy.groups()[2].items, vec!["Clothing", "Shoes", "Beauty"]);
    }

    #[test]
    fn test_find_ignore_case() {
        let taxonomy = default_taxonomy();
        assert_eq!(taxonomy.find_ignore_case("eLeCtRoNiCs"), Some("Electronics"));
        assert_eq!(taxonomy.find_ignore_case("gizmos"), None);
    }

    #[test]
    fn test_rejects_nested_hierarchy() {
        let entries = vec![
            entry("A", &["B"]),
            entry("B", &["C"]),
            entry("C", &[]),
            entry("Other", &[]),
        ];
        assert!(CategoryTaxonomy::new(&entries, "Other").is_err());
    }

    #[test]
    fn test_rejects_unknown_child_and_missing_fallback() {
        let entries = vec![entry("A", &["Z"]), entry("Other", &[])];
        assert!(CategoryTaxonomy::new(&entries, "Other").is_err());

        let entries = vec![entry("A", &[])];
        assert!(CategoryTaxonomy::new(&entries, "Other").is_err());
    }

    #[test]
    fn test_rejects_fallback_with_children() {
        let entries = vec![entry("A", &[]), entry("Other", &["A"])];
        assert!(CategoryTaxonomy::new(&entries, "Other").is_err());
    }
}
