//! FFI use-case API for the desktop card UI.
//!
//! # Responsibility
//! - Expose note list/add/edit/delete to Dart via FRB.
//! - Own the single note store session used by the UI process.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call returns an envelope; failures carry a human-readable message.
//! - Mutations return `changed=true` only when the file was rewritten, and the
//!   UI re-fetches `notes_list` after every changed response.

use log::warn;
use notecards_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, note_cards,
    IntentOutcome, JsonFileNoteRepository, NoteCard, NoteId, NoteIntent, NoteStore,
    NoteTarget, StoreConfig,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const NOTES_PATH_ENV: &str = "NOTECARDS_PATH";

static SESSION: Mutex<Session> = Mutex::new(Session::new());

/// Process-wide store session: configured path plus lazily opened store.
struct Session {
    path: Option<PathBuf>,
    store: Option<NoteStore<JsonFileNoteRepository>>,
}

impl Session {
    const fn new() -> Self {
        Self {
            path: None,
            store: None,
        }
    }

    fn store(&mut self) -> Result<&mut NoteStore<JsonFileNoteRepository>, String> {
        if self.store.is_none() {
            let path = self.path.get_or_insert_with(default_notes_path).clone();
            let config = StoreConfig {
                notes_path: path,
                ..StoreConfig::default()
            };
            let store = config
                .open_store()
                .map_err(|err| format!("notes store open failed: {err}"))?;
            self.store = Some(store);
        }
        self.store
            .as_mut()
            .ok_or_else(|| "notes store unavailable".to_string())
    }
}

/// Card item rendered by the UI grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCardItem {
    /// Current list position; shifts after deletions.
    pub index: u32,
    /// Session ID to echo back with edit/delete.
    pub note_id: String,
    /// Title with the untitled placeholder applied.
    pub title: String,
    pub content: String,
    /// Card background as `#RRGGBB`.
    pub color_hex: String,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub ok: bool,
    /// Cards in display order (empty on failure).
    pub items: Vec<NoteCardItem>,
    pub message: String,
}

/// Mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Whether the collection changed and the grid must be re-rendered.
    pub changed: bool,
    /// Session ID of the added note, when one was added.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, changed: bool, note_id: Option<NoteId>) -> Self {
        Self {
            ok: true,
            changed,
            note_id: note_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Sets the notes file path before the first store access.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
/// - Same path again is accepted; a different path is rejected once set.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_notes_path(path: String) -> String {
    let config = match StoreConfig::from_path_str(path.as_str()) {
        Ok(config) => config,
        Err(err) => return err,
    };
    let mut session = lock_session();
    if let Some(active) = session.path.as_ref() {
        if *active != config.notes_path {
            return format!(
                "notes path already set to `{}`; refusing to switch to `{}`",
                active.display(),
                config.notes_path.display()
            );
        }
    }
    session.path = Some(config.notes_path);
    String::new()
}

/// Lists all notes as cards in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    let mut session = lock_session();
    match session.store() {
        Ok(store) => list_response(note_cards(store.entries())),
        Err(err) => list_failure(format!("notes_list failed: {err}")),
    }
}

/// Re-reads the notes file and lists the result.
///
/// Previously returned note IDs are invalidated.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_reload() -> NotesListResponse {
    let mut session = lock_session();
    let store = match session.store() {
        Ok(store) => store,
        Err(err) => return list_failure(format!("notes_reload failed: {err}")),
    };
    match store.reload() {
        Ok(entries) => list_response(note_cards(entries)),
        Err(err) => list_failure(format!("notes_reload failed: {err}")),
    }
}

/// Adds a note from the input fields. Blank input is accepted as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn note_add(title: String, content: String) -> NoteActionResponse {
    dispatch("note_add", NoteIntent::AddNote { title, content })
}

/// Replaces the note rendered at `index`.
///
/// `note_id`, when given, must still identify the note at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_edit(
    index: u32,
    note_id: Option<String>,
    title: String,
    content: String,
) -> NoteActionResponse {
    match parse_target(index, note_id) {
        Ok(target) => dispatch(
            "note_edit",
            NoteIntent::EditNote {
                target,
                title,
                content,
            },
        ),
        Err(err) => NoteActionResponse::failure(format!("note_edit failed: {err}")),
    }
}

/// Deletes the note rendered at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(index: u32, note_id: Option<String>) -> NoteActionResponse {
    match parse_target(index, note_id) {
        Ok(target) => dispatch("note_delete", NoteIntent::DeleteNote { target }),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

fn dispatch(operation: &str, intent: NoteIntent) -> NoteActionResponse {
    let mut session = lock_session();
    let store = match session.store() {
        Ok(store) => store,
        Err(err) => return NoteActionResponse::failure(format!("{operation} failed: {err}")),
    };
    match store.apply(intent) {
        Ok(IntentOutcome::Added { id, .. }) => {
            NoteActionResponse::success("Note added.", true, Some(id))
        }
        Ok(IntentOutcome::Unchanged) => {
            NoteActionResponse::success("Nothing to add.", false, None)
        }
        Ok(IntentOutcome::Edited { .. }) => NoteActionResponse::success("Note saved.", true, None),
        Ok(IntentOutcome::Deleted { .. }) => {
            NoteActionResponse::success("Note deleted.", true, None)
        }
        Err(err) => NoteActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn parse_target(index: u32, note_id: Option<String>) -> Result<NoteTarget, String> {
    let index = index as usize;
    match note_id.as_deref().map(str::trim) {
        None | Some("") => Ok(NoteTarget::at(index)),
        Some(raw) => Uuid::parse_str(raw)
            .map(|id| NoteTarget::checked(index, id))
            .map_err(|_| format!("invalid note_id `{raw}`")),
    }
}

fn list_response(cards: Vec<NoteCard>) -> NotesListResponse {
    let items = cards.into_iter().map(to_card_item).collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No notes.".to_string()
    } else {
        format!("{} note(s).", items.len())
    };
    NotesListResponse {
        ok: true,
        items,
        message,
    }
}

fn list_failure(message: String) -> NotesListResponse {
    NotesListResponse {
        ok: false,
        items: Vec::new(),
        message,
    }
}

fn to_card_item(card: NoteCard) -> NoteCardItem {
    NoteCardItem {
        index: u32::try_from(card.index).unwrap_or(u32::MAX),
        note_id: card.id.to_string(),
        title: card.title,
        content: card.content,
        color_hex: card.color.to_hex(),
    }
}

fn default_notes_path() -> PathBuf {
    if let Ok(raw) = std::env::var(NOTES_PATH_ENV) {
        if let Ok(config) = StoreConfig::from_path_str(raw.as_str()) {
            return config.notes_path;
        }
    }
    StoreConfig::default().notes_path
}

fn lock_session() -> MutexGuard<'static, Session> {
    SESSION.lock().unwrap_or_else(|poisoned| {
        warn!("event=session_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}
