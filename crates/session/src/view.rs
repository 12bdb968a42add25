use review_record::{flatten, review_record, Field};
use review_search::{Result, SearchConfig};
use serde::Serialize;
use serde_json::Value;

use crate::input::{InputRouter, KeyEvent, ReviewCommand};
use crate::palette::{CommandPalette, PaletteSection};
use crate::session::{AdvancePolicy, ReviewSession, SectionProgress};

/// Snapshot of the review pointer for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStatus {
    pub current_index: Option<usize>,
    pub current_key: Option<String>,
    pub current_label: Option<String>,
    pub progress: u8,
    pub approved: usize,
    pub total: usize,
    pub palette_open: bool,
}

/// Review screen for one product: session, palette and key routing
#[derive(Debug)]
pub struct ReviewView {
    session: ReviewSession,
    palette: CommandPalette,
    router: InputRouter,
}

impl ReviewView {
    pub fn new(fields: Vec<Field>, policy: AdvancePolicy, search: SearchConfig) -> Result<Self> {
        Ok(Self {
            session: ReviewSession::new(fields, policy),
            palette: CommandPalette::new(search)?,
            router: InputRouter::new(),
        })
    }

    /// Flatten a product (its snapshot when present) and start reviewing it
    pub fn from_product(product: &Value, policy: AdvancePolicy, search: SearchConfig) -> Result<Self> {
        let fields = flatten(review_record(product));
        log::debug!("Review started with {} fields", fields.len());
        Self::new(fields, policy, search)
    }

    #[must_use]
    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    #[must_use]
    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn set_shortcuts_enabled(&mut self, enabled: bool) {
        self.router.set_enabled(enabled);
    }

    /// Route a key event and apply the resulting command
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<ReviewCommand> {
        let command = self.router.route(event, self.palette.is_open())?;
        self.apply(command);
        Some(command)
    }

    pub fn apply(&mut self, command: ReviewCommand) {
        match command {
            ReviewCommand::Approve => {
                self.session.approve();
            }
            ReviewCommand::Next => {
                self.session.next();
            }
            ReviewCommand::Previous => {
                self.session.previous();
            }
            ReviewCommand::TogglePalette => self.palette.toggle(),
            ReviewCommand::ClosePalette => self.palette.close(),
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.palette.set_query(query);
    }

    pub fn search_results(&mut self) -> Vec<PaletteSection> {
        self.palette.results(&self.session)
    }

    /// Focus a field directly by index
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.session.jump_to(index)
    }

    /// Jump to a palette hit and dismiss the palette
    pub fn select_search_result(&mut self, index: usize) -> bool {
        let moved = self.session.jump_to(index);
        if moved {
            self.palette.close();
        }
        moved
    }

    /// Focus the first field of a sidebar section
    pub fn select_section(&mut self, key: &str) -> Option<usize> {
        self.session.jump_to_path(key)
    }

    /// Focus the field a missing-field entry points at, if the record has it
    pub fn select_missing(&mut self, path: &str) -> Option<usize> {
        let index = self.session.jump_to_path(path);
        if index.is_none() {
            log::debug!("No reviewable field under '{path}'");
        }
        index
    }

    #[must_use]
    pub fn section_progress(&self) -> Vec<SectionProgress> {
        self.session.section_progress()
    }

    #[must_use]
    pub fn status(&self) -> ReviewStatus {
        let field = self.session.current_field();
        ReviewStatus {
            current_index: self.session.current_index(),
            current_key: field.map(|f| f.key.clone()),
            current_label: field.map(|f| f.label.clone()),
            progress: self.session.progress(),
            approved: self.session.approved_count(),
            total: self.session.fields().len(),
            palette_open: self.palette.is_open(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputTarget;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn view() -> ReviewView {
        let product = json!({
            "product_name": "Acme",
            "snapshot": {
                "product_name": "Acme CRM",
                "pricing": {"overview": "Per seat", "pricing_url": "https://acme.test"},
                "year_founded": 2010
            }
        });
        ReviewView::from_product(&product, AdvancePolicy::default(), SearchConfig::default()).unwrap()
    }

    #[test]
    fn reviews_snapshot_when_present() {
        let v = view();
        assert_eq!(v.status().total, 4);
        assert_eq!(v.status().current_key.as_deref(), Some("product_name"));
    }

    #[test]
    fn keys_drive_the_session() {
        let mut v = view();
        assert_eq!(v.handle_key(&KeyEvent::new("j")), Some(ReviewCommand::Next));
        assert_eq!(v.status().current_index, Some(1));
        v.handle_key(&KeyEvent::new("Enter"));
        assert_eq!(v.status().approved, 1);
        assert_eq!(v.status().current_index, Some(2));
        v.handle_key(&KeyEvent::new("ArrowUp"));
        assert_eq!(v.status().current_index, Some(1));
        assert_eq!(
            v.handle_key(&KeyEvent::new("j").in_target(InputTarget::TextArea)),
            None
        );
    }

    #[test]
    fn palette_blocks_review_keys_until_closed() {
        let mut v = view();
        v.handle_key(&KeyEvent::new("k").with_ctrl());
        assert!(v.status().palette_open);

        assert_eq!(v.handle_key(&KeyEvent::new(" ")), None);
        assert_eq!(v.status().approved, 0);

        v.set_search_query("founded");
        let results = v.search_results();
        let hit = results[0].entries[0].index;
        assert!(v.select_search_result(hit));
        assert_eq!(v.status().current_key.as_deref(), Some("year_founded"));
        assert!(!v.status().palette_open);
        assert_eq!(v.palette().query(), "");
    }

    #[test]
    fn escape_closes_palette() {
        let mut v = view();
        v.handle_key(&KeyEvent::new("/"));
        v.set_search_query("pri");
        assert_eq!(
            v.handle_key(&KeyEvent::new("Escape")),
            Some(ReviewCommand::ClosePalette)
        );
        assert!(!v.status().palette_open);
        assert_eq!(v.palette().query(), "");
    }

    #[test]
    fn disabled_shortcuts_leave_session_alone() {
        let mut v = view();
        v.set_shortcuts_enabled(false);
        assert_eq!(v.handle_key(&KeyEvent::new(" ")), None);
        assert_eq!(v.handle_key(&KeyEvent::new("j")), None);
        assert_eq!(v.status().approved, 0);
        assert_eq!(v.status().current_index, Some(0));

        assert_eq!(
            v.handle_key(&KeyEvent::new("k").with_meta()),
            Some(ReviewCommand::TogglePalette)
        );
        v.handle_key(&KeyEvent::new("Escape"));

        v.set_shortcuts_enabled(true);
        assert_eq!(v.handle_key(&KeyEvent::new(" ")), Some(ReviewCommand::Approve));
        assert_eq!(v.status().approved, 1);
    }

    #[test]
    fn section_and_missing_jumps() {
        let mut v = view();
        assert_eq!(v.select_section("pricing"), Some(1));
        assert_eq!(v.select_missing("year_founded"), Some(3));
        assert_eq!(v.select_missing("website"), None);
        assert_eq!(v.status().current_index, Some(3));
    }
}
