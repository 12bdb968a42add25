use serde::{Deserialize, Serialize};

/// What had focus when a key was pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputTarget {
    #[default]
    Document,
    TextInput,
    TextArea,
    ContentEditable,
}

impl InputTarget {
    fn is_text_entry(self) -> bool {
        !matches!(self, Self::Document)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key name as reported by the host, e.g. `"j"`, `"ArrowDown"`, `" "`
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub target: InputTarget,
}

impl KeyEvent {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
            target: InputTarget::Document,
        }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    #[must_use]
    pub fn in_target(mut self, target: InputTarget) -> Self {
        self.target = target;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCommand {
    Approve,
    Next,
    Previous,
    TogglePalette,
    ClosePalette,
}

/// Maps key events to review commands.
///
/// Review shortcuts fire only while enabled, while the palette is closed and
/// when focus is not in a text entry. The palette toggle works regardless of
/// the enabled flag.
#[derive(Debug, Clone)]
pub struct InputRouter {
    enabled: bool,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl InputRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn route(&self, event: &KeyEvent, palette_open: bool) -> Option<ReviewCommand> {
        let key = event.key.to_lowercase();

        let palette_chord = key == "k" && (event.ctrl || event.meta);
        if palette_chord || (key == "/" && !event.target.is_text_entry()) {
            return Some(ReviewCommand::TogglePalette);
        }

        if palette_open {
            return (key == "escape").then_some(ReviewCommand::ClosePalette);
        }

        if !self.enabled || event.target.is_text_entry() || event.ctrl || event.meta {
            return None;
        }

        match key.as_str() {
            " " | "space" | "enter" => Some(ReviewCommand::Approve),
            "j" | "arrowdown" => Some(ReviewCommand::Next),
            "k" | "arrowup" => Some(ReviewCommand::Previous),
            _ => None,
        }
    }
}
