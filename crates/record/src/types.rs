use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One atomic, reviewable unit derived from a record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    /// Dotted/bracketed origin path, e.g. `pricing.plans[0].amount`
    pub key: String,

    /// Human-readable title derived from the path
    pub label: String,

    /// Scalar, array or object value under review
    pub value: Value,
}

impl Field {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
        }
    }
}

/// Fields sharing the same top-level record key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldGroup {
    /// Top-level record key
    pub key: String,

    /// Humanized key, e.g. `company_info` → `Company Info`
    pub name: String,

    /// Member fields in flattening order
    pub fields: Vec<Field>,
}

impl FieldGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
