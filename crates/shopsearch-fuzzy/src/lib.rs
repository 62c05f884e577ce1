//! shopsearch-fuzzy
//!
//! Typo-tolerant product search over an in-memory catalog. `index` builds the
//! immutable [`CatalogIndex`]; `search` scores and ranks products against a
//! query with [`FuzzySearchEngine`]. Matching is an approximate substring
//! search (see `distance`) over text normalised by `normalize`.

pub mod distance;
pub mod index;
pub mod normalize;
pub mod search;

pub use distance::SubstringMatcher;
pub use index::{BuildReport, CatalogIndex};
pub use normalize::Normalizer;
pub use search::FuzzySearchEngine;
