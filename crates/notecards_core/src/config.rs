//! Note store configuration.
//!
//! # Responsibility
//! - Describe where the notes file lives and how it is written.
//! - Build a ready-to-use store from that description.
//!
//! # Invariants
//! - The notes path is never empty.
//! - Environment lookups belong to bootstrap layers (FFI, CLI), not here.

use crate::repo::note_repo::JsonFileNoteRepository;
use crate::service::note_store::{NoteStore, NoteStoreResult};
use std::path::PathBuf;

/// Conventional notes file name, resolved against the working directory.
pub const DEFAULT_NOTES_FILE: &str = "notes.json";

/// Settings for opening a JSON-backed note store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub notes_path: PathBuf,
    /// Write through a temp file and rename instead of overwriting in place.
    pub atomic_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            notes_path: PathBuf::from(DEFAULT_NOTES_FILE),
            atomic_writes: true,
        }
    }
}

impl StoreConfig {
    /// Builds a config from a user-supplied path string.
    ///
    /// # Errors
    /// - Returns an error when `raw` is empty after trimming.
    pub fn from_path_str(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("notes path cannot be empty".to_string());
        }
        Ok(Self {
            notes_path: PathBuf::from(trimmed),
            ..Self::default()
        })
    }

    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    /// JSON file repository described by this config.
    pub fn repository(&self) -> JsonFileNoteRepository {
        JsonFileNoteRepository::new(self.notes_path.clone()).with_atomic_writes(self.atomic_writes)
    }

    /// Opens the store, loading the notes file once.
    pub fn open_store(&self) -> NoteStoreResult<NoteStore<JsonFileNoteRepository>> {
        NoteStore::open(self.repository())
    }
}
