use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use review_protocol::{ProductSummary, FILTER_STORAGE_KEY};
use review_schema::CompletionQuality;

use crate::error::Result;

/// Selected completion-quality buckets. A product passes when its bucket is
/// any of the selected ones; an empty selection passes everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityFilter {
    selected: BTreeSet<CompletionQuality>,
}

impl QualityFilter {
    #[must_use]
    pub fn new(levels: impl IntoIterator<Item = CompletionQuality>) -> Self {
        Self {
            selected: levels.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn contains(&self, level: CompletionQuality) -> bool {
        self.selected.contains(&level)
    }

    /// Selected levels in high → low order
    #[must_use]
    pub fn levels(&self) -> Vec<CompletionQuality> {
        self.selected.iter().copied().collect()
    }

    /// Flip `level`; returns whether it is now selected
    pub fn toggle(&mut self, level: CompletionQuality) -> bool {
        if self.selected.remove(&level) {
            false
        } else {
            self.selected.insert(level);
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn matches(&self, product: &ProductSummary) -> bool {
        self.selected.is_empty()
            || self
                .selected
                .contains(&CompletionQuality::from_percentage(product.completion_percentage))
    }

    pub fn apply<'a>(&self, products: &'a [ProductSummary]) -> Vec<&'a ProductSummary> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Filter preference persisted as a JSON array of level names
#[derive(Debug, Clone)]
pub struct FilterStore {
    path: PathBuf,
}

impl FilterStore {
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(format!("{FILTER_STORAGE_KEY}.json")),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best effort: a missing file is an empty filter, a corrupt one is
    /// logged and treated as empty.
    #[must_use]
    pub fn load(&self) -> QualityFilter {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return QualityFilter::default();
            }
            Err(err) => {
                log::warn!("Failed to read filter from {}: {err}", self.path.display());
                return QualityFilter::default();
            }
        };

        match serde_json::from_str::<Vec<CompletionQuality>>(&raw) {
            Ok(levels) => QualityFilter::new(levels),
            Err(err) => {
                log::warn!(
                    "Ignoring corrupt filter in {}: {err}",
                    self.path.display()
                );
                QualityFilter::default()
            }
        }
    }

    pub fn save(&self, filter: &QualityFilter) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&filter.levels())
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Saved filter {:?} to {}", filter.levels(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product(id: &str, completion: f64) -> ProductSummary {
        ProductSummary {
            id: id.to_string(),
            completion_percentage: completion,
            ..ProductSummary::default()
        }
    }

    #[test]
    fn empty_filter_passes_everything() {
        let products = vec![product("a", 10.0), product("b", 90.0)];
        assert_eq!(QualityFilter::default().apply(&products).len(), 2);
    }

    #[test]
    fn selected_levels_are_or_combined() {
        let products = vec![
            product("low", 10.0),
            product("medium", 35.0),
            product("edge", 50.0),
            product("high", 50.5),
        ];
        let filter = QualityFilter::new([CompletionQuality::High, CompletionQuality::Low]);
        let ids: Vec<&str> = filter.apply(&products).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["low", "high"]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut filter = QualityFilter::default();
        assert!(filter.toggle(CompletionQuality::Medium));
        assert!(filter.contains(CompletionQuality::Medium));
        assert!(!filter.toggle(CompletionQuality::Medium));
        assert!(filter.is_empty());

        filter.toggle(CompletionQuality::Low);
        filter.toggle(CompletionQuality::High);
        assert_eq!(
            filter.levels(),
            vec![CompletionQuality::High, CompletionQuality::Low]
        );
        filter.clear();
        assert!(filter.is_empty());
    }
}
