//! Note domain model.
//!
//! # Responsibility
//! - Define the title/content pair stored in the notes file.
//! - Provide input normalization (trimming) shared by add/edit paths.
//!
//! # Invariants
//! - Notes built through `Note::from_input` hold trimmed text.
//! - `NoteId` is session-scoped: assigned on load/create, never serialized.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder shown when a note has an empty title.
pub const UNTITLED_PLACEHOLDER: &str = "(untitled)";

/// Opaque in-memory identifier for a note held by an open store.
///
/// Positional indices shift after deletion; this ID does not, so presentation
/// layers can detect that an index they rendered earlier now points elsewhere.
pub type NoteId = Uuid;

/// Persisted note record.
///
/// Missing fields deserialize to empty strings; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Note {
    /// Creates a note with the given text as-is.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Creates a note from raw user input, trimming surrounding whitespace.
    pub fn from_input(title: &str, content: &str) -> Self {
        Self::new(title.trim(), content.trim())
    }

    /// Upgrades a legacy bare-string entry: empty title, text as content.
    pub fn from_legacy(content: impl Into<String>) -> Self {
        Self::new(String::new(), content)
    }

    /// Returns whether both fields are empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    /// Title for display, falling back to `UNTITLED_PLACEHOLDER`.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED_PLACEHOLDER
        } else {
            self.title.as_str()
        }
    }
}

/// A note plus its session identity, as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub id: NoteId,
    pub note: Note,
}

impl NoteEntry {
    /// Wraps a note with a freshly generated session ID.
    pub fn new(note: Note) -> Self {
        Self {
            id: Uuid::new_v4(),
            note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteEntry, UNTITLED_PLACEHOLDER};

    #[test]
    fn from_input_trims_both_fields() {
        let note = Note::from_input("  groceries \n", "\tmilk, eggs  ");
        assert_eq!(note, Note::new("groceries", "milk, eggs"));
    }

    #[test]
    fn blank_detection_ignores_whitespace() {
        assert!(Note::new(" ", "\n\t").is_blank());
        assert!(!Note::new("", "x").is_blank());
        assert!(!Note::new("x", "").is_blank());
    }

    #[test]
    fn legacy_upgrade_has_empty_title() {
        let note = Note::from_legacy("hello");
        assert_eq!(note.title, "");
        assert_eq!(note.content, "hello");
        assert_eq!(note.display_title(), UNTITLED_PLACEHOLDER);
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let note: Note = serde_json::from_str(r#"{"content":"body","color":"red"}"#)
            .expect("partial record should decode");
        assert_eq!(note, Note::new("", "body"));
    }

    #[test]
    fn entries_get_distinct_ids() {
        let first = NoteEntry::new(Note::new("a", ""));
        let second = NoteEntry::new(Note::new("a", ""));
        assert_ne!(first.id, second.id);
        assert_eq!(first.note, second.note);
    }
}
