use pretty_assertions::assert_eq;
use proptest::prelude::*;
use review_schema::{analyze, FieldKind, Schema, SchemaNode};
use serde_json::{json, Map, Value};

const SECTIONS: [&str; 4] = ["alpha_info", "beta", "gamma_details", "delta"];

/// Four objects with nine string leaves each: 40 declared paths
fn forty_path_schema() -> Schema {
    let fields = SECTIONS
        .iter()
        .map(|section| {
            let children = (0..9)
                .map(|i| SchemaNode::leaf(format!("field_{i}"), FieldKind::String))
                .collect();
            SchemaNode::object(*section, children).required()
        })
        .collect();
    Schema::new("scenario", fields).unwrap()
}

fn record_with_gaps(gaps: &[(&str, usize)]) -> Value {
    let mut record = Map::new();
    for section in SECTIONS {
        let mut object = Map::new();
        for i in 0..9 {
            let missing = gaps.iter().any(|(s, idx)| *s == section && *idx == i);
            let value = if missing { json!("") } else { json!(format!("{section}-{i}")) };
            object.insert(format!("field_{i}"), value);
        }
        record.insert(section.to_string(), Value::Object(object));
    }
    Value::Object(record)
}

#[test]
fn eight_gaps_out_of_forty_paths_is_eighty_percent() {
    let schema = forty_path_schema();
    assert_eq!(schema.field_count(), 40);

    let gaps = [
        ("alpha_info", 0),
        ("alpha_info", 4),
        ("alpha_info", 8),
        ("gamma_details", 1),
        ("gamma_details", 2),
        ("gamma_details", 3),
        ("gamma_details", 5),
        ("gamma_details", 7),
    ];
    let report = analyze(&record_with_gaps(&gaps), &schema);

    assert_eq!(report.percentage, 80);
    assert_eq!(report.missing_count(), 8);
    assert_eq!(report.filled_fields, 32);

    let grouped: Vec<(&str, Vec<&str>)> = report
        .grouped_by_category
        .iter()
        .map(|c| {
            (
                c.category.as_str(),
                c.fields.iter().map(|f| f.path.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(
        grouped,
        vec![
            (
                "Alpha Info",
                vec!["alpha_info.field_0", "alpha_info.field_4", "alpha_info.field_8"]
            ),
            (
                "Gamma Details",
                vec![
                    "gamma_details.field_1",
                    "gamma_details.field_2",
                    "gamma_details.field_3",
                    "gamma_details.field_5",
                    "gamma_details.field_7",
                ]
            ),
        ]
    );
}

#[test]
fn builtin_schema_reports_on_sparse_product() {
    let schema = Schema::product_snapshot().unwrap();
    let record = json!({
        "product_name": "Acme CRM",
        "company_name": "Acme",
        "industry": ["Retail"],
        "pricing": {"overview": "Per seat", "pricing_plans": [{"plan": "Pro"}]},
        "reviews": {"overall_rating": 4.5, "review_sources": []}
    });
    let report = analyze(&record, &schema);

    assert_eq!(report.total_fields, 83);
    assert!(report.percentage > 0 && report.percentage < 100);
    assert!(report
        .missing_fields
        .iter()
        .any(|f| f.path == "reviews.review_sources" && f.is_required));
    assert!(!report.missing_fields.iter().any(|f| f.path == "pricing"));
    assert_eq!(report.grouped_by_category[0].category, "Website");
}

proptest! {
    #[test]
    fn percentage_is_bounded_and_full_only_without_gaps(
        gaps in prop::collection::vec((0usize..4, 0usize..9), 0..40)
    ) {
        let gaps: Vec<(&str, usize)> = gaps.iter().map(|(s, i)| (SECTIONS[*s], *i)).collect();
        let report = analyze(&record_with_gaps(&gaps), &forty_path_schema());

        prop_assert!(report.percentage <= 100);
        prop_assert_eq!(report.percentage == 100, report.missing_fields.is_empty());
        prop_assert_eq!(report.filled_fields + report.missing_count(), report.total_fields);
    }
}
