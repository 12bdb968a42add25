use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug, PartialEq)]
pub enum SearchError {
    #[error("Threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),

    #[error("At least one search key is required")]
    NoKeys,

    #[error("Limit must be greater than zero")]
    ZeroLimit,
}
