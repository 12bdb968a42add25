use std::collections::HashSet;
use std::str::FromStr;

use review_record::{group_fields, top_level_key, Field, FieldGroup};
use serde::{Deserialize, Serialize};

/// Where the pointer goes after an approval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvancePolicy {
    /// Jump to the nearest later field that is not approved yet; stay put if none
    #[default]
    NextUnreviewed,
    /// Move to the following field, stopping at the last one
    Increment,
}

impl FromStr for AdvancePolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "next-unreviewed" => Ok(Self::NextUnreviewed),
            "increment" => Ok(Self::Increment),
            other => Err(format!(
                "unknown advance policy '{other}' (expected next-unreviewed|increment)"
            )),
        }
    }
}

/// Approval counts for one sidebar section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionProgress {
    pub key: String,
    pub name: String,
    pub approved: usize,
    pub total: usize,
    /// Index of the section's first field
    pub first_index: usize,
}

/// Pointer and approvals over a fixed field sequence
#[derive(Debug, Clone)]
pub struct ReviewSession {
    fields: Vec<Field>,
    groups: Vec<FieldGroup>,
    current: Option<usize>,
    approved: HashSet<String>,
    policy: AdvancePolicy,
}

impl ReviewSession {
    #[must_use]
    pub fn new(fields: Vec<Field>, policy: AdvancePolicy) -> Self {
        let groups = group_fields(&fields);
        let current = if fields.is_empty() { None } else { Some(0) };
        Self {
            fields,
            groups,
            current,
            approved: HashSet::new(),
            policy,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn groups(&self) -> &[FieldGroup] {
        &self.groups
    }

    #[must_use]
    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn current_field(&self) -> Option<&Field> {
        self.current.and_then(|index| self.fields.get(index))
    }

    /// Top-level key of the focused field
    #[must_use]
    pub fn current_section(&self) -> Option<&str> {
        self.current_field().map(|field| top_level_key(&field.key))
    }

    #[must_use]
    pub fn is_approved(&self, key: &str) -> bool {
        self.approved.contains(key)
    }

    #[must_use]
    pub fn approved_count(&self) -> usize {
        self.approved.len()
    }

    /// Approved keys in field order
    #[must_use]
    pub fn approved_keys(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| self.approved.contains(&field.key))
            .map(|field| field.key.as_str())
            .collect()
    }

    /// `round(100 * approved / total)`, 0 for an empty session
    #[must_use]
    pub fn progress(&self) -> u8 {
        if self.fields.is_empty() {
            return 0;
        }
        (self.approved.len() as f64 * 100.0 / self.fields.len() as f64).round() as u8
    }

    /// Approve the focused field, then advance per policy.
    ///
    /// Returns whether a new key was approved.
    pub fn approve(&mut self) -> bool {
        let Some(index) = self.current else {
            return false;
        };
        let Some(field) = self.fields.get(index) else {
            return false;
        };
        let newly_approved = self.approved.insert(field.key.clone());

        let last = self.fields.len() - 1;
        match self.policy {
            AdvancePolicy::NextUnreviewed => {
                let next = (index + 1..self.fields.len())
                    .find(|&i| !self.approved.contains(&self.fields[i].key));
                if let Some(next) = next {
                    self.current = Some(next);
                }
            }
            AdvancePolicy::Increment => {
                self.current = Some((index + 1).min(last));
            }
        }

        if newly_approved {
            log::debug!(
                "Approved field {index} ({}/{})",
                self.approved.len(),
                self.fields.len()
            );
        }
        newly_approved
    }

    /// Move forward one field; no-op at the end
    pub fn next(&mut self) -> bool {
        match self.current {
            Some(index) if index + 1 < self.fields.len() => {
                self.current = Some(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Move back one field; no-op at the start
    pub fn previous(&mut self) -> bool {
        match self.current {
            Some(index) if index > 0 => {
                self.current = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Focus an absolute index. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.fields.len() {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// Focus the first field at or beneath `path` (e.g. a section key or a
    /// schema path from the missing-fields panel).
    pub fn jump_to_path(&mut self, path: &str) -> Option<usize> {
        let index = self.fields.iter().position(|field| path_covers(path, &field.key))?;
        self.current = Some(index);
        Some(index)
    }

    #[must_use]
    pub fn section_progress(&self) -> Vec<SectionProgress> {
        self.groups
            .iter()
            .map(|group| SectionProgress {
                key: group.key.clone(),
                name: group.name.clone(),
                approved: group
                    .fields
                    .iter()
                    .filter(|field| self.approved.contains(&field.key))
                    .count(),
                total: group.fields.len(),
                first_index: self
                    .fields
                    .iter()
                    .position(|field| top_level_key(&field.key) == group.key)
                    .unwrap_or(0),
            })
            .collect()
    }
}

fn path_covers(path: &str, key: &str) -> bool {
    match key.strip_prefix(path) {
        Some("") => true,
        Some(rest) => rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}
