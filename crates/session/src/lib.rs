//! # Review Session
//!
//! Ephemeral per-product review state: which field is focused, which fields
//! are approved, and how keyboard input reaches them.
//!
//! ```text
//! KeyEvent ──> InputRouter ──┬─> ReviewCommand::{Approve, Next, Previous}
//!                            │        └─> ReviewSession (current index, approved keys)
//!                            └─> palette toggle/close
//!                                     └─> CommandPalette (fuzzy field search)
//!                                              └─> jump_to(index)
//! ```
//!
//! [`ReviewView`] owns all three and is the only thing that mutates them.

mod input;
mod palette;
mod session;
mod view;

pub use input::{InputRouter, InputTarget, KeyEvent, ReviewCommand};
pub use palette::{CommandPalette, PaletteEntry, PaletteSection};
pub use session::{AdvancePolicy, ReviewSession, SectionProgress};
pub use view::{ReviewStatus, ReviewView};
