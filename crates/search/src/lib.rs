//! Fuzzy matching of a query against field labels and keys, ranked by score.

mod config;
mod error;
mod fuzzy;

pub use config::{SearchConfig, SearchKey};
pub use error::{Result, SearchError};
pub use fuzzy::{search, FieldMatch, FuzzySearch};
