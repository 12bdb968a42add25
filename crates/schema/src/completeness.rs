use std::collections::HashMap;

use review_record::{humanize_key, is_empty_value, top_level_key, value_at_path};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::{FieldKind, Schema};

/// A schema-declared field that is absent or empty in a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingField {
    pub path: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub is_required: bool,
}

/// Missing fields that share a top-level schema key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCategory {
    /// Humanized top-level key
    pub category: String,
    pub fields: Vec<MissingField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub missing_fields: Vec<MissingField>,
    pub grouped_by_category: Vec<MissingCategory>,
    pub total_fields: usize,
    pub filled_fields: usize,
    /// 0..=100, and 100 only when nothing is missing
    pub percentage: u8,
}

impl CompletenessReport {
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.missing_fields.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }
}

/// Diff a record against a schema.
///
/// Never fails: a value of the wrong type at a declared path counts as missing.
#[must_use]
pub fn analyze(record: &Value, schema: &Schema) -> CompletenessReport {
    let declared = schema.declared_fields();
    let total_fields = declared.len();

    let missing_fields: Vec<MissingField> = declared
        .into_iter()
        .filter(|field| is_missing(value_at_path(record, &field.path), field.node.kind))
        .map(|field| MissingField {
            label: humanize_key(&field.node.name),
            kind: field.node.kind,
            is_required: field.node.required,
            path: field.path,
        })
        .collect();

    let filled_fields = total_fields - missing_fields.len();
    let percentage = completion_percentage(filled_fields, total_fields);
    log::debug!(
        "Completeness for schema {}: {filled_fields}/{total_fields} ({percentage}%)",
        schema.name()
    );

    CompletenessReport {
        grouped_by_category: group_missing(&missing_fields),
        missing_fields,
        total_fields,
        filled_fields,
        percentage,
    }
}

/// Per-type emptiness check for a declared path
#[must_use]
pub fn is_missing(value: Option<&Value>, kind: FieldKind) -> bool {
    let Some(value) = value else {
        return true;
    };
    match (kind, value) {
        (_, Value::Null) => true,
        (FieldKind::String, Value::String(text)) => text.trim().is_empty(),
        (FieldKind::Number, Value::Number(_)) => false,
        (FieldKind::Boolean, Value::Bool(_)) => false,
        (FieldKind::Array, Value::Array(items)) => items.is_empty(),
        (FieldKind::Object, Value::Object(map)) => map.values().all(is_empty_value),
        _ => true,
    }
}

/// Bucket missing fields by humanized top-level key, first-seen order
#[must_use]
pub fn group_missing(missing: &[MissingField]) -> Vec<MissingCategory> {
    let mut categories: Vec<MissingCategory> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for field in missing {
        let category = humanize_key(top_level_key(&field.path));
        let slot = match index_by_name.get(&category) {
            Some(slot) => *slot,
            None => {
                index_by_name.insert(category.clone(), categories.len());
                categories.push(MissingCategory {
                    category,
                    fields: Vec::new(),
                });
                categories.len() - 1
            }
        };
        categories[slot].fields.push(field.clone());
    }

    categories
}

fn completion_percentage(filled: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let rounded = (filled as f64 * 100.0 / total as f64).round() as u8;
    if filled < total {
        rounded.min(99)
    } else {
        rounded
    }
}
