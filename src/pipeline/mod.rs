//! Pipeline entry points for listing queries.
//!
//! - `search`: filter, rank and paginate a candidate set
//! - `shop`: seller listings by status and category facets
//! - `recommend`: home page recommendation rows

pub mod rank;
pub mod recommend;
pub mod search;
pub mod shop;

pub use rank::rank;
pub use recommend::{RecommendTab, recommend};
pub use search::{SearchPlan, TextFilter, search};
pub use shop::{category_facets, seller_listings};
