use std::collections::HashMap;

use crate::label::humanize_key;
use crate::types::{Field, FieldGroup};

/// Portion of a field key before the first `.` or `[`
#[must_use]
pub fn top_level_key(key: &str) -> &str {
    key.split(['.', '[']).next().unwrap_or(key)
}

/// Bucket fields by top-level key, keeping first-seen section order and
/// flattening order within each section.
#[must_use]
pub fn group_fields(fields: &[Field]) -> Vec<FieldGroup> {
    let mut groups: Vec<FieldGroup> = Vec::new();
    let mut index_by_key: HashMap<&str, usize> = HashMap::new();

    for field in fields {
        let top = top_level_key(&field.key);
        let slot = *index_by_key.entry(top).or_insert_with(|| {
            groups.push(FieldGroup {
                key: top.to_string(),
                name: humanize_key(top),
                fields: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].fields.push(field.clone());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn field(key: &str) -> Field {
        Field::new(key, key, json!(key))
    }

    #[test]
    fn top_level_key_stops_at_first_separator() {
        assert_eq!(top_level_key("pricing.plans[0].amount"), "pricing");
        assert_eq!(top_level_key("items[1].a"), "items");
        assert_eq!(top_level_key("name"), "name");
        assert_eq!(top_level_key(""), "");
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let fields = vec![
            field("company_info.overview"),
            field("product_name"),
            field("company_info.founding"),
            field("items[0].a"),
            field("product_name_alt"),
        ];
        let groups = group_fields(&fields);

        let summary: Vec<(&str, &str, usize)> = groups
            .iter()
            .map(|g| (g.key.as_str(), g.name.as_str(), g.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("company_info", "Company Info", 2),
                ("product_name", "Product Name", 1),
                ("items", "Items", 1),
                ("product_name_alt", "Product Name Alt", 1),
            ]
        );
        assert_eq!(groups[0].fields[1].key, "company_info.founding");
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_fields(&[]).is_empty());
    }
}
