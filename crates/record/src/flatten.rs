use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::label::{humanize_key, path_label};
use crate::types::Field;
use crate::value::{is_empty_value, value_at_path};

/// Drop a top-level key when a nested equivalent is present and non-empty
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DuplicateRule {
    /// Top-level key to suppress
    pub key: String,

    /// Dotted path of the preferred nested value
    pub preferred: String,
}

impl DuplicateRule {
    fn new(key: &str, preferred: &str) -> Self {
        Self {
            key: key.to_string(),
            preferred: preferred.to_string(),
        }
    }
}

/// Exclusion and array policy applied while flattening
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlattenRules {
    /// Arrays of records whose path contains one of these are reviewed as one unit
    pub keep_whole: Vec<String>,

    /// Keys dropped wherever they appear (nested paths match by substring)
    pub denylist: Vec<String>,

    /// Top-level duplicates of nested values
    pub duplicates: Vec<DuplicateRule>,

    /// Substring replacements applied to generated labels
    pub label_corrections: Vec<(String, String)>,
}

impl Default for FlattenRules {
    fn default() -> Self {
        Self {
            keep_whole: [
                "pricing_plans",
                "features",
                "integrations",
                "deployment_options",
                "support_options",
                "social_links",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            denylist: vec!["review_sources".to_string()],
            duplicates: vec![
                DuplicateRule::new("pricing_overview", "pricing.overview"),
                DuplicateRule::new("pricing_details_web_url", "pricing.pricing_url"),
            ],
            label_corrections: vec![(
                "Software Analysis".to_string(),
                "Zoftware Analysis".to_string(),
            )],
        }
    }
}

impl FlattenRules {
    fn keeps_whole(&self, full_key: &str) -> bool {
        self.keep_whole
            .iter()
            .any(|pattern| full_key.contains(pattern.as_str()))
    }

    fn is_denied(&self, key: &str, full_key: &str, nested: bool) -> bool {
        self.denylist
            .iter()
            .any(|denied| key == denied || (nested && full_key.contains(denied.as_str())))
    }

    fn is_duplicate(&self, key: &str, root: &Value) -> bool {
        self.duplicates.iter().any(|rule| {
            rule.key == key
                && value_at_path(root, &rule.preferred).is_some_and(|v| !is_empty_value(v))
        })
    }
}

/// Converts a record into an ordered, duplicate-free list of fields
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    rules: FlattenRules,
}

impl Flattener {
    #[must_use]
    pub fn new(rules: FlattenRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &FlattenRules {
        &self.rules
    }

    /// Flatten a record. Non-object input yields no fields.
    #[must_use]
    pub fn flatten(&self, record: &Value) -> Vec<Field> {
        let Some(map) = record.as_object() else {
            return Vec::new();
        };

        let mut walk = Walk {
            rules: &self.rules,
            root: record,
            seen: HashSet::new(),
            fields: Vec::new(),
        };
        walk.object(map, "");

        log::debug!("Flattened record into {} fields", walk.fields.len());
        walk.fields
    }
}

/// Flatten with the default rules
#[must_use]
pub fn flatten(record: &Value) -> Vec<Field> {
    Flattener::default().flatten(record)
}

struct Walk<'a> {
    rules: &'a FlattenRules,
    root: &'a Value,
    seen: HashSet<String>,
    fields: Vec<Field>,
}

impl Walk<'_> {
    fn object(&mut self, map: &Map<String, Value>, parent: &str) {
        let nested = !parent.is_empty();

        for (key, value) in map {
            let full_key = join_key(parent, key);

            if is_empty_value(value) {
                continue;
            }
            if !nested && self.rules.is_duplicate(key, self.root) {
                continue;
            }
            if self.rules.is_denied(key, &full_key, nested) {
                continue;
            }

            match value {
                Value::Array(items) => self.array(items, full_key),
                Value::Object(child) => self.object(child, &full_key),
                scalar => {
                    let label = self.label(&full_key);
                    self.push(full_key, label, normalize_scalar(scalar));
                }
            }
        }
    }

    fn array(&mut self, items: &[Value], full_key: String) {
        let all_records = !items.is_empty() && items.iter().all(Value::is_object);

        if !all_records || self.rules.keeps_whole(&full_key) {
            let label = self.label(&full_key);
            self.push(full_key, label, Value::Array(items.to_vec()));
            return;
        }

        let array_label = self.label(&full_key);
        for (index, item) in items.iter().enumerate() {
            let Some(element) = item.as_object() else {
                continue;
            };
            let item_key = format!("{full_key}[{index}]");
            let item_label = format!("{array_label} #{}", index + 1);

            for (sub_key, sub_value) in element {
                if is_empty_value(sub_value) {
                    continue;
                }
                let sub_full_key = format!("{item_key}.{sub_key}");
                if self.rules.is_denied(sub_key, &sub_full_key, true) {
                    continue;
                }

                match sub_value {
                    Value::Object(child) => self.object(child, &sub_full_key),
                    other => {
                        let label = self.correct(format!(
                            "{item_label} > {}",
                            humanize_key(sub_key)
                        ));
                        let value = match other {
                            Value::Array(_) => other.clone(),
                            scalar => normalize_scalar(scalar),
                        };
                        self.push(sub_full_key, label, value);
                    }
                }
            }
        }
    }

    fn label(&self, full_key: &str) -> String {
        self.correct(path_label(full_key))
    }

    fn correct(&self, mut label: String) -> String {
        for (from, to) in &self.rules.label_corrections {
            if label.contains(from.as_str()) {
                label = label.replace(from.as_str(), to);
            }
        }
        label
    }

    fn push(&mut self, key: String, label: String, value: Value) {
        if !self.seen.insert(key.clone()) {
            log::debug!("Skipping field with colliding key {key}");
            return;
        }
        self.fields.push(Field { key, label, value });
    }
}

fn join_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn normalize_scalar(value: &Value) -> Value {
    match value {
        Value::Bool(true) => Value::String("True".to_string()),
        Value::Bool(false) => Value::String("False".to_string()),
        other => other.clone(),
    }
}
