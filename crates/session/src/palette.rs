use review_record::{humanize_key, top_level_key};
use review_search::{FuzzySearch, Result, SearchConfig};
use serde::Serialize;

use crate::session::ReviewSession;

/// One search hit, addressed by its index in the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    pub index: usize,
    pub key: String,
    pub label: String,
    pub approved: bool,
    pub score: f32,
}

/// Hits sharing a top-level key, in the order the section first appears in
/// the ranked results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteSection {
    pub key: String,
    pub name: String,
    pub entries: Vec<PaletteEntry>,
}

/// Searchable jump list over the session's fields
pub struct CommandPalette {
    open: bool,
    query: String,
    engine: FuzzySearch,
}

impl std::fmt::Debug for CommandPalette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPalette")
            .field("open", &self.open)
            .field("query", &self.query)
            .field("config", self.engine.config())
            .finish()
    }
}

impl CommandPalette {
    pub fn new(config: SearchConfig) -> Result<Self> {
        Ok(Self {
            open: false,
            query: String::new(),
            engine: FuzzySearch::new(config)?,
        })
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing always discards the query
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Rank the session's fields against the current query and bucket the
    /// hits by section.
    pub fn results(&mut self, session: &ReviewSession) -> Vec<PaletteSection> {
        let fields = session.fields();
        let hits = self.engine.search(fields, &self.query);

        let mut sections: Vec<PaletteSection> = Vec::new();
        for hit in hits {
            let Some(field) = fields.get(hit.index) else {
                continue;
            };
            let section_key = top_level_key(&field.key);
            let entry = PaletteEntry {
                index: hit.index,
                key: field.key.clone(),
                label: field.label.clone(),
                approved: session.is_approved(&field.key),
                score: hit.score,
            };

            match sections.iter_mut().find(|s| s.key == section_key) {
                Some(section) => section.entries.push(entry),
                None => sections.push(PaletteSection {
                    key: section_key.to_string(),
                    name: humanize_key(section_key),
                    entries: vec![entry],
                }),
            }
        }
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AdvancePolicy;
    use pretty_assertions::assert_eq;
    use review_record::Field;
    use serde_json::json;

    fn session() -> ReviewSession {
        let fields = vec![
            Field::new("product_name", "Product Name", json!("Acme")),
            Field::new("pricing.overview", "Pricing > Overview", json!("Per seat")),
            Field::new("company_info.overview", "Company Info > Overview", json!("x")),
            Field::new("pricing.pricing_url", "Pricing > Pricing Url", json!("u")),
        ];
        ReviewSession::new(fields, AdvancePolicy::default())
    }

    #[test]
    fn toggle_and_close_clear_query() {
        let mut palette = CommandPalette::new(SearchConfig::default()).unwrap();
        palette.toggle();
        assert!(palette.is_open());
        palette.set_query("pricing");
        palette.toggle();
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "");
    }

    #[test]
    fn blank_query_lists_all_sections_in_field_order() {
        let mut palette = CommandPalette::new(SearchConfig::default()).unwrap();
        let sections = palette.results(&session());
        assert_eq!(
            sections.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
            vec!["product_name", "pricing", "company_info"]
        );
        assert_eq!(sections[1].entries.len(), 2);
        assert_eq!(sections[1].name, "Pricing");
    }

    #[test]
    fn entries_carry_approval_state() {
        let mut s = session();
        s.approve();
        let mut palette = CommandPalette::new(SearchConfig::default()).unwrap();
        palette.set_query("product");
        let sections = palette.results(&s);
        let entry = &sections[0].entries[0];
        assert_eq!(entry.key, "product_name");
        assert!(entry.approved);
        assert_eq!(entry.index, 0);
    }
}
