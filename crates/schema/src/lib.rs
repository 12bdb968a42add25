//! # Review Schema
//!
//! Declarative description of a product snapshot and the completeness
//! analysis that diffs a concrete record against it.
//!
//! The schema is data, not code: a tree of `{name, kind, required, children}`
//! nodes, loaded from JSON and walked by one generic depth-first visitor.
//!
//! ```text
//! Schema tree ──┐
//!               ├──> declared paths (depth-first, objects before children)
//! Record ───────┘         │
//!                         ├─ per-type emptiness check
//!                         ├─ MissingField[] grouped by top-level category
//!                         └─ percentage = filled / declared
//! ```

mod completeness;
mod error;
mod quality;
mod registry;

pub use completeness::{
    analyze, group_missing, is_missing, CompletenessReport, MissingCategory, MissingField,
};
pub use error::{Result, SchemaError};
pub use quality::{BadgeVariant, CompletionQuality, CompletionQualityInfo, CoverageTier};
pub use registry::{DeclaredField, FieldKind, Schema, SchemaNode};
