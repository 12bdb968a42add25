//! # Review Record
//!
//! Turns one product's nested data snapshot into an ordered list of atomic,
//! independently reviewable fields, and buckets those fields into sections.
//!
//! ## Architecture
//!
//! ```text
//! Record (serde_json::Value)
//!     │
//!     ├──> Flattener
//!     │      ├─ Skip empty values (null, blank strings, [], {})
//!     │      ├─ Drop denylisted keys and top-level duplicates
//!     │      ├─ Arrays of records: keep whole or expand per element
//!     │      └─ Derive labels ("pricing.pricing_url" → "Pricing > Pricing Url")
//!     │
//!     ├──> Field[] (key, label, value)
//!     │
//!     └──> Section grouping
//!            └─ FieldGroup[] keyed by top-level record key, first-seen order
//! ```
//!
//! ## Example
//!
//! ```rust
//! use review_record::{flatten, group_fields};
//! use serde_json::json;
//!
//! let record = json!({
//!     "product_name": "Acme CRM",
//!     "pricing": { "overview": "Per seat", "pricing_url": "https://acme.test/pricing" },
//!     "is_active": true
//! });
//!
//! let fields = flatten(&record);
//! assert_eq!(fields.len(), 4);
//! assert_eq!(fields[1].label, "Pricing > Overview");
//! assert_eq!(fields[3].value, json!("True"));
//!
//! let sections = group_fields(&fields);
//! assert_eq!(sections.len(), 3);
//! assert_eq!(sections[1].name, "Pricing");
//! ```

mod flatten;
mod group;
mod label;
mod types;
mod value;

pub use flatten::{flatten, DuplicateRule, FlattenRules, Flattener};
pub use group::{group_fields, top_level_key};
pub use label::{capitalize_words, humanize_key, path_label};
pub use types::{Field, FieldGroup};
pub use value::{is_empty_value, review_record, value_at_path};
