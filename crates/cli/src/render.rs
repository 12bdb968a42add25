use std::fmt::Write as _;

use review_catalog::ListingState;
use review_record::{Field, FieldGroup};
use review_schema::{CompletenessReport, CompletionQuality, CoverageTier};
use review_session::{PaletteSection, ReviewStatus, SectionProgress};
use serde_json::Value;

/// One-line rendering of a field value
pub(crate) fn inline_value(field: &Field) -> String {
    match &field.value {
        Value::String(text) => text.replace('\n', " "),
        other => other.to_string(),
    }
}

pub(crate) fn fields_text(groups: &[FieldGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "{} ({})", group.name, group.len());
        for field in &group.fields {
            let _ = writeln!(out, "  {} = {}", field.label, inline_value(field));
        }
    }
    out.trim_end().to_string()
}

pub(crate) fn missing_text(report: &CompletenessReport) -> String {
    let tier = CoverageTier::from_percentage(report.percentage);
    let mut out = format!(
        "Completeness: {}% ({}/{} fields) - {}",
        report.percentage,
        report.filled_fields,
        report.total_fields,
        tier.label()
    );
    for category in &report.grouped_by_category {
        let _ = write!(out, "\n{} ({})", category.category, category.fields.len());
        for field in &category.fields {
            let required = if field.is_required { ", required" } else { "" };
            let _ = write!(out, "\n  {} [{}{required}]", field.path, field.kind);
        }
    }
    out
}

pub(crate) fn search_text(sections: &[PaletteSection]) -> String {
    if sections.is_empty() {
        return "No matching fields".to_string();
    }
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(out, "{}", section.name);
        for entry in &section.entries {
            let mark = if entry.approved { "[x]" } else { "[ ]" };
            let _ = writeln!(out, "  {mark} {}. {}", entry.index + 1, entry.label);
        }
    }
    out.trim_end().to_string()
}

pub(crate) fn listing_text(state: &ListingState) -> String {
    let pagination = state.pagination();
    let mut out = format!(
        "Page {} of {} ({} products, sorted by {})",
        pagination.current_page,
        pagination.total_pages,
        pagination.total_items,
        state.sort_by()
    );
    if let Some(stats) = state.completion_stats() {
        let _ = write!(
            out,
            "\nHigh: {}  Medium: {}  Low: {}",
            stats.high, stats.medium, stats.low
        );
    }
    if !state.filter().is_empty() {
        let levels: Vec<&str> = state.filter().levels().iter().map(|l| l.as_str()).collect();
        let _ = write!(out, "\nFilter: {}", levels.join(", "));
    }

    let visible = state.visible_products();
    if visible.is_empty() {
        out.push_str("\nNo products match");
    }
    for product in visible {
        let quality = CompletionQuality::from_percentage(product.completion_percentage);
        let handle = product.slug().unwrap_or(product.id.as_str());
        let _ = write!(
            out,
            "\n  {:>5.1}% {:<18} {} ({handle})",
            product.completion_percentage,
            quality.label(),
            product.product_name
        );
    }
    out
}

pub(crate) fn status_line(status: &ReviewStatus, current: Option<&Field>, approved: bool) -> String {
    let Some(index) = status.current_index else {
        return "[0/0] nothing to review".to_string();
    };
    let mut out = format!("[{}/{}]", index + 1, status.total);
    if let Some(field) = current {
        let _ = write!(out, " {} = {}", field.label, inline_value(field));
    }
    if approved {
        out.push_str(" (approved)");
    }
    let _ = write!(
        out,
        " | {}/{} approved ({}%)",
        status.approved, status.total, status.progress
    );
    if status.palette_open {
        out.push_str(" | search open");
    }
    out
}

pub(crate) fn section_summary(sections: &[SectionProgress]) -> String {
    sections
        .iter()
        .map(|s| format!("  {} {}/{}", s.name, s.approved, s.total))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn inline_value_flattens_to_one_line() {
        let field = Field::new("a", "A", json!("two\nlines"));
        assert_eq!(inline_value(&field), "two lines");
        let field = Field::new("b", "B", json!([{"plan": "Pro"}]));
        assert_eq!(inline_value(&field), r#"[{"plan":"Pro"}]"#);
    }

    #[test]
    fn status_line_shows_position_and_progress() {
        let status = ReviewStatus {
            current_index: Some(1),
            current_key: Some("pricing.overview".into()),
            current_label: Some("Pricing > Overview".into()),
            progress: 50,
            approved: 1,
            total: 2,
            palette_open: false,
        };
        let field = Field::new("pricing.overview", "Pricing > Overview", json!("Per seat"));
        assert_eq!(
            status_line(&status, Some(&field), false),
            "[2/2] Pricing > Overview = Per seat | 1/2 approved (50%)"
        );
    }
}
