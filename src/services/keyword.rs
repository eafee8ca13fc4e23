// src/services/keyword.rs

//! Keyword tokenizer and whole-word matcher for free-text search.
//!
//! A query like `"red shoes" nike` becomes the tokens `red shoes` and
//! `nike`. Every token must match (AND), and each token may match either
//! the title or the brand (OR).

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::Listing;

/// Brand word whose model names commonly follow it directly.
const MODEL_BRAND: &str = "iphone";

/// Generation and variant suffixes accepted after [`MODEL_BRAND`].
const MODEL_SUFFIX: &str = r"(?:\s*(?:\d{1,2}|se|xr|xs|x|plus|pro|max|mini))*";

/// Split search text into quoted phrases followed by plain words.
///
/// An unterminated quote is treated as ordinary text.
pub fn tokenize(text: &str) -> Vec<String> {
    let segments: Vec<&str> = text.split('"').collect();
    // An even segment count means the last quote was never closed
    let closed = if segments.len() % 2 == 0 {
        segments.len() - 1
    } else {
        segments.len()
    };

    let mut phrases = Vec::new();
    let mut words = Vec::new();

    for (idx, segment) in segments.iter().enumerate() {
        if idx % 2 == 1 && idx < closed {
            let phrase = segment.split_whitespace().collect::<Vec<_>>().join(" ");
            if !phrase.is_empty() {
                phrases.push(phrase);
            }
        } else {
            words.extend(segment.split_whitespace().map(String::from));
        }
    }

    phrases.extend(words);
    phrases
}

/// Case-insensitive whole-word pattern for one token.
fn token_pattern(token: &str, strict: bool) -> String {
    let lower = token.to_lowercase();
    let body = token
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    let plural = if strict {
        ""
    } else if ["ch", "sh", "x", "z"].iter().any(|end| lower.ends_with(end)) {
        "(?:es)?"
    } else {
        "s?"
    };
    let suffix = if lower == MODEL_BRAND {
        format!("{MODEL_SUFFIX}{plural}")
    } else {
        plural.to_string()
    };

    format!(r"(?i)(?:^|[^A-Za-z0-9]){body}{suffix}(?:$|[^A-Za-z0-9])")
}

/// Conjunction of per-token patterns over a listing's title and brand.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    tokens: Vec<String>,
    patterns: Vec<Regex>,
}

impl KeywordFilter {
    /// Compile one pattern per token of `text`.
    ///
    /// With `strict` off, a singular token also matches its plural form.
    pub fn build(text: &str, strict: bool) -> Result<Self> {
        let tokens = tokenize(text);
        let patterns = tokens
            .iter()
            .map(|token| {
                Regex::new(&token_pattern(token, strict)).map_err(|e| AppError::pattern(token, e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { tokens, patterns })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// True when the text produced no tokens; such a filter matches nothing.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether every token matches the title or the brand.
    pub fn matches(&self, listing: &Listing) -> bool {
        !self.is_empty()
            && self
                .patterns
                .iter()
                .all(|p| p.is_match(&listing.title) || p.is_match(&listing.brand))
    }
}
