use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Field attribute matched against the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKey {
    Label,
    Key,
}

/// Search behavior for the field palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Attributes scored for each field; the best one wins
    pub keys: Vec<SearchKey>,

    /// 0.0 accepts only perfect matches, 1.0 accepts any fuzzy match
    pub threshold: f64,

    /// Maximum number of results
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keys: vec![SearchKey::Label, SearchKey::Key],
            threshold: 0.3,
            limit: 50,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::InvalidThreshold(self.threshold));
        }
        if self.keys.is_empty() {
            return Err(SearchError::NoKeys);
        }
        if self.limit == 0 {
            return Err(SearchError::ZeroLimit);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}
