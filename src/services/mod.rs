//! Matching services.
//!
//! - `alias`: alias table and whole-word alias scanning
//! - `category`: category normalization, inference and membership
//! - `keyword`: free-text tokenizer and keyword filter
//! - `listings`: draft validation for new listings

pub mod alias;
pub mod category;
pub mod keyword;
pub mod listings;

pub use alias::AliasTable;
pub use category::CategoryMatcher;
pub use keyword::{KeywordFilter, tokenize};
pub use listings::prepare_listing;
