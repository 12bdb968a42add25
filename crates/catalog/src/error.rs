use std::path::PathBuf;

use review_protocol::MalformedResponse;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to fetch products")]
    MalformedListing(#[source] MalformedResponse),

    #[error("Failed to fetch product details")]
    MalformedProduct(#[source] MalformedResponse),

    #[error("Response to request #{0} arrived after a newer request")]
    Stale(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Late responses are dropped silently rather than shown
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale(_))
    }
}
