//! Core domain logic for notecards.
//! This crate is the single source of truth for the note collection and its
//! file persistence.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{StoreConfig, DEFAULT_NOTES_FILE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::note::{Note, NoteEntry, NoteId, UNTITLED_PLACEHOLDER};
pub use repo::note_repo::{JsonFileNoteRepository, NoteRepository, RepoError, RepoResult};
pub use service::intent::{IntentOutcome, NoteIntent, NoteTarget};
pub use service::note_store::{NoteStore, NoteStoreError, NoteStoreResult};
pub use view::card::{
    card_color, note_cards, CardColor, NoteCard, BACKGROUND_COLOR, PASTEL_PALETTE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
