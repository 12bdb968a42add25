use std::path::{Path, PathBuf};

use review_protocol::SortOrder;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "catalog-review.toml";

pub const ENV_API_URL: &str = "CATALOG_REVIEW_API_URL";
pub const ENV_PAGE_SIZE: &str = "CATALOG_REVIEW_PAGE_SIZE";
pub const ENV_STATE_DIR: &str = "CATALOG_REVIEW_STATE_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Catalog API root, e.g. `http://localhost:3000/api`
    pub api_base_url: String,

    /// Products per listing page
    pub page_size: u32,

    pub sort_by: SortOrder,

    pub request_timeout_secs: u64,

    /// Directory holding local preferences (the listing filter)
    pub state_dir: PathBuf,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            page_size: 12,
            sort_by: SortOrder::Latest,
            request_timeout_secs: 30,
            state_dir: default_state_dir(),
        }
    }
}

fn default_state_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("catalog-review")
}

impl ReviewConfig {
    /// Defaults, then the TOML file, then environment overrides.
    ///
    /// An explicit `path` must exist; otherwise `catalog-review.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw).map_err(|source| CatalogError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override fields from environment-style lookups. Unparseable values
    /// are ignored with a warning.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            match raw.trim().parse::<u32>() {
                Ok(size) => self.page_size = size,
                Err(_) => log::warn!("Ignoring {ENV_PAGE_SIZE}={raw:?}: not a page size"),
            }
        }
        if let Some(dir) = lookup(ENV_STATE_DIR).filter(|v| !v.trim().is_empty()) {
            self.state_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "api_base_url must not be empty".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(CatalogError::InvalidConfig(
                "page_size must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
