// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for loading configuration
//! and building the category matcher from it.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::CategoryMatcher;

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file is missing or unreadable.
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        log::info!("No config at {}; using defaults", path.display());
        return Config::default();
    }
    Config::load_or_default(path)
}

/// Build a category matcher from validated configuration.
pub fn build_matcher(config: &Config) -> Result<CategoryMatcher> {
    config.validate()?;
    CategoryMatcher::from_config(&config.catalog, &config.search)
        .map_err(|e| AppError::config(format!("Invalid catalog: {e}")))
}

/// Load configuration from `{storage_dir}/config.toml` and build the matcher.
pub fn load_all(storage_dir: &Path) -> Result<(Config, CategoryMatcher)> {
    let config = load_config(&storage_dir.join("config.toml"));
    let matcher = build_matcher(&config)?;
    Ok((config, matcher))
}
