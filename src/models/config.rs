//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Paging and ranking limits
    #[serde(default)]
    pub search: SearchConfig,

    /// Category taxonomy and alias tables
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Log level settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    ///
    /// Cross-references between categories and aliases are checked when the
    /// matcher is built.
    pub fn validate(&self) -> Result<()> {
        if self.search.default_page_size == 0 {
            return Err(AppError::validation("search.default_page_size must be > 0"));
        }
        if self.search.max_page_size == 0 {
            return Err(AppError::validation("search.max_page_size must be > 0"));
        }
        if self.search.default_page_size > self.search.max_page_size {
            return Err(AppError::validation(
                "search.default_page_size must not exceed search.max_page_size",
            ));
        }
        if self.search.recommend_limit == 0 {
            return Err(AppError::validation("search.recommend_limit must be > 0"));
        }
        if self.catalog.categories.is_empty() {
            return Err(AppError::validation("No categories defined"));
        }
        if self.catalog.fallback.trim().is_empty() {
            return Err(AppError::validation("catalog.fallback is empty"));
        }
        Ok(())
    }
}

/// Search paging and ranking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size used when the request omits one
    #[serde(default = "defaults::default_page_size")]
    pub default_page_size: usize,

    /// Upper bound for a requested page size
    #[serde(default = "defaults::max_page_size")]
    pub max_page_size: usize,

    /// Description characters scanned for category hints
    #[serde(default = "defaults::hint_description_chars")]
    pub hint_description_chars: usize,

    /// Items per recommendation row
    #[serde(default = "defaults::recommend_limit")]
    pub recommend_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: defaults::default_page_size(),
            max_page_size: defaults::max_page_size(),
            hint_description_chars: defaults::hint_description_chars(),
            recommend_limit: defaults::recommend_limit(),
        }
    }
}

/// Category taxonomy, aliases and inference exclusions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Category that absorbs anything unrecognized
    #[serde(default = "defaults::fallback")]
    pub fallback: String,

    /// Terms that never resolve to a category from a search query
    #[serde(default = "defaults::excluded_terms")]
    pub excluded_terms: Vec<String>,

    /// Canonical categories in display order
    #[serde(default = "defaults::categories")]
    pub categories: Vec<CategoryEntry>,

    /// Free-text aliases
    #[serde(default = "defaults::aliases")]
    pub aliases: Vec<AliasMapping>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fallback: defaults::fallback(),
            excluded_terms: defaults::excluded_terms(),
            categories: defaults::categories(),
            aliases: defaults::aliases(),
        }
    }
}

/// A canonical category and the categories it subsumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Canonical name (e.g., "Electronics")
    pub name: String,

    /// Direct child categories
    #[serde(default)]
    pub children: Vec<String>,

    /// Display group on the posting form (e.g., "Fashion")
    #[serde(default)]
    pub group: String,
}

/// Mapping from a free-text alias to a canonical category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasMapping {
    /// Lowercase alias, may contain spaces
    pub alias: String,

    /// Target canonical category
    pub category: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use super::{AliasMapping, CategoryEntry};

    // Search defaults
    pub fn default_page_size() -> usize {
        12
    }
    pub fn max_page_size() -> usize {
        48
    }
    pub fn hint_description_chars() -> usize {
        160
    }
    pub fn recommend_limit() -> usize {
        12
    }

    pub fn log_level() -> String {
        "info".into()
    }

    // Catalog defaults
    pub fn fallback() -> String {
        "Other".into()
    }

    pub fn excluded_terms() -> Vec<String> {
        vec!["iphone".into(), "galaxy".into()]
    }

    fn entry(name: &str, children: &[&str], group: &str) -> CategoryEntry {
        CategoryEntry {
            name: name.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
            group: group.to_string(),
        }
    }

    pub fn categories() -> Vec<CategoryEntry> {
        vec![
            entry("Books", &["Textbooks"], "Books"),
            entry("Textbooks", &[], "Books"),
            entry(
                "Electronics",
                &[
                    "Phones",
                    "Laptops",
                    "Tablets",
                    "Cameras",
                    "Headphones",
                    "Consoles",
                    "Gaming",
                ],
                "Electronics",
            ),
            entry("Phones", &[], "Electronics"),
            entry("Laptops", &[], "Electronics"),
            entry("Tablets", &[], "Electronics"),
            entry("Cameras", &[], "Electronics"),
            entry("Headphones", &[], "Electronics"),
            entry("Consoles", &[], "Electronics"),
            entry("Gaming", &[], "Electronics"),
            // Clothing, Shoes and Beauty stay disjoint
            entry("Clothing", &[], "Fashion"),
            entry("Shoes", &[], "Fashion"),
            entry("Beauty", &[], "Fashion"),
            entry("Home", &["Furniture", "Appliances"], "Home & Living"),
            entry("Furniture", &[], "Home & Living"),
            entry("Appliances", &[], "Home & Living"),
            entry("Sports", &["Outdoors", "Bikes"], "Sports & Outdoor"),
            entry("Outdoors", &[], "Sports & Outdoor"),
            entry("Bikes", &[], "Sports & Outdoor"),
            entry("Instruments", &[], "Others"),
            entry("Tickets", &[], "Others"),
            entry("Other", &[], "Others"),
        ]
    }

    pub fn aliases() -> Vec<AliasMapping> {
        const TABLE: &[(&str, &[&str])] = &[
            ("Books", &["book", "books"]),
            ("Textbooks", &["textbook", "textbooks"]),
            ("Electronics", &["electronic", "electronics", "gadget"]),
            (
                "Phones",
                &["phone", "phones", "iphone", "android", "smartphone", "galaxy"],
            ),
            (
                "Laptops",
                &["laptop", "laptops", "notebook", "notebooks", "macbook"],
            ),
            ("Tablets", &["tablet", "tablets", "ipad"]),
            ("Cameras", &["camera", "cameras", "dslr"]),
            (
                "Headphones",
                &["headphone", "headphones", "earphone", "earbuds", "headset"],
            ),
            (
                "Consoles",
                &[
                    "console",
                    "consoles",
                    "game console",
                    "switch",
                    "nintendo",
                    "ps4",
                    "ps5",
                    "xbox",
                ],
            ),
            ("Gaming", &["game", "games", "gaming", "pc gaming", "steam"]),
            ("Clothing", &["clothing", "cloth", "clothes", "apparel"]),
            (
                "Shoes",
                &["shoe", "shoes", "sneaker", "sneakers", "boots"],
            ),
            ("Beauty", &["beauty", "makeup", "skincare", "cosmetics"]),
            ("Home", &["home", "kitchen", "decor"]),
            (
                "Furniture",
                &["furniture", "desk", "chair", "sofa", "table", "wardrobe"],
            ),
            (
                "Appliances",
                &[
                    "appliance",
                    "appliances",
                    "microwave",
                    "fridge",
                    "refrigerator",
                    "vacuum",
                    "washer",
                ],
            ),
            ("Sports", &["sport", "sports", "ball", "racket"]),
            (
                "Outdoors",
                &[
                    "outdoor", "outdoors", "camp", "camping", "hike", "hiking", "tent",
                ],
            ),
            ("Bikes", &["bike", "bicycle", "ebike"]),
            (
                "Instruments",
                &["instrument", "instruments", "guitar", "piano", "violin"],
            ),
            ("Tickets", &["ticket", "tickets", "voucher", "pass"]),
            ("Other", &["other", "misc"]),
        ];

        TABLE
            .iter()
            .flat_map(|(category, aliases)| {
                aliases.iter().map(move |alias| AliasMapping {
                    alias: alias.to_string(),
                    category: category.to_string(),
                })
            })
            .collect()
    }
}
