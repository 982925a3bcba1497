//! Note repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Read the notes file into an ordered note list.
//! - Rewrite the whole notes file from an ordered note list.
//! - Keep the on-disk JSON schema inside the persistence boundary.
//!
//! # Invariants
//! - A missing file loads as an empty list; it is never an error.
//! - A present but unparsable file is reported as `CorruptStore`, never reset.
//! - Writes always emit the object form `{title, content}`; legacy bare-string
//!   entries are only accepted on read.
//! - Logged events carry counts and durations, never note text.

use crate::model::note::Note;
use log::{error, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for the notes file.
#[derive(Debug)]
pub enum RepoError {
    /// File exists but is not a JSON array of notes.
    CorruptStore { path: PathBuf, reason: String },
    /// File-system failure while reading or writing.
    Io { path: PathBuf, source: std::io::Error },
    /// Serialization failure while encoding notes.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorruptStore { path, reason } => {
                write!(f, "corrupt notes file `{}`: {reason}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "notes file I/O failed for `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CorruptStore { .. } => None,
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Repository interface for whole-collection note persistence.
pub trait NoteRepository {
    /// Loads the full ordered note collection.
    fn load(&self) -> RepoResult<Vec<Note>>;
    /// Replaces the persisted collection with `notes`.
    fn save(&self, notes: &[Note]) -> RepoResult<()>;
}

/// JSON file-backed note repository.
#[derive(Debug, Clone)]
pub struct JsonFileNoteRepository {
    path: PathBuf,
    atomic_writes: bool,
}

impl JsonFileNoteRepository {
    /// Creates a repository over `path` with atomic writes enabled.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic_writes: true,
        }
    }

    /// Selects temp-file-and-rename (`true`) or in-place overwrite (`false`).
    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn atomic_writes(&self) -> bool {
        self.atomic_writes
    }

    fn io_error(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_direct(&self, notes: &[Note]) -> RepoResult<()> {
        let file = File::create(&self.path).map_err(|err| self.io_error(err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, notes).map_err(RepoError::Encode)?;
        writer.flush().map_err(|err| self.io_error(err))?;
        Ok(())
    }

    /// Replaces the file behind `self.path` via temp file and rename.
    ///
    /// Symlinks are followed so the link survives and its target gets the
    /// update; an existing file keeps its permissions.
    fn write_atomic(&self, notes: &[Note]) -> RepoResult<()> {
        let target = resolve_target(&self.path).map_err(|err| self.io_error(err))?;
        let permissions = match std::fs::metadata(&target) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => return Err(self.io_error(err)),
        };

        let mut tmp =
            NamedTempFile::new_in(parent_dir(&target)).map_err(|err| self.io_error(err))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, notes).map_err(RepoError::Encode)?;
            writer.flush().map_err(|err| self.io_error(err))?;
        }
        tmp.as_file().sync_all().map_err(|err| self.io_error(err))?;
        if let Some(permissions) = permissions {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|err| self.io_error(err))?;
        }
        tmp.persist(&target)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }
}

impl NoteRepository for JsonFileNoteRepository {
    fn load(&self) -> RepoResult<Vec<Note>> {
        let started_at = Instant::now();
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=notes_load module=repo status=ok source=missing count=0 duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=notes_load module=repo status=error error_code=read_failed error={}",
                    err
                );
                return Err(self.io_error(err));
            }
        };

        match decode_notes(&bytes) {
            Ok(decoded) => {
                if decoded.legacy_count > 0 {
                    warn!(
                        "event=notes_load module=repo status=ok legacy_entries={} detail=upgraded_on_read",
                        decoded.legacy_count
                    );
                }
                info!(
                    "event=notes_load module=repo status=ok source=file count={} duration_ms={}",
                    decoded.notes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(decoded.notes)
            }
            Err(reason) => {
                error!(
                    "event=notes_load module=repo status=error error_code=corrupt_store reason={}",
                    reason
                );
                Err(RepoError::CorruptStore {
                    path: self.path.clone(),
                    reason,
                })
            }
        }
    }

    fn save(&self, notes: &[Note]) -> RepoResult<()> {
        let started_at = Instant::now();
        let dir = parent_dir(&self.path);
        std::fs::create_dir_all(dir).map_err(|err| self.io_error(err))?;

        let result = if self.atomic_writes {
            self.write_atomic(notes)
        } else {
            self.write_direct(notes)
        };

        match &result {
            Ok(()) => info!(
                "event=notes_save module=repo status=ok atomic={} count={} duration_ms={}",
                self.atomic_writes,
                notes.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=notes_save module=repo status=error atomic={} duration_ms={} error={}",
                self.atomic_writes,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

#[derive(Debug)]
struct DecodedNotes {
    notes: Vec<Note>,
    legacy_count: usize,
}

/// Decodes notes file bytes, returning a human-readable reason on failure.
fn decode_notes(bytes: &[u8]) -> Result<DecodedNotes, String> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| format!("invalid JSON: {err}"))?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(format!(
                "expected a top-level array, found {}",
                json_kind(&other)
            ))
        }
    };

    let mut notes = Vec::with_capacity(items.len());
    let mut legacy_count = 0;
    for (position, item) in items.into_iter().enumerate() {
        let note = match item {
            Value::String(text) => {
                legacy_count += 1;
                Note::from_legacy(text)
            }
            Value::Object(_) => serde_json::from_value::<Note>(item)
                .map_err(|err| format!("entry {position}: {err}"))?,
            other => {
                return Err(format!(
                    "entry {position}: expected object or string, found {}",
                    json_kind(&other)
                ))
            }
        };
        notes.push(note);
    }

    Ok(DecodedNotes {
        notes,
        legacy_count,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Final file a write to `path` should land in; `path` itself when absent.
fn resolve_target(path: &Path) -> std::io::Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(err) => Err(err),
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, parent_dir};
    use crate::model::note::Note;
    use std::path::Path;

    #[test]
    fn decode_accepts_mixed_legacy_and_object_entries() {
        let decoded = decode_notes(br#"["old", {"title": "t", "content": "c"}]"#)
            .expect("mixed entries should decode");
        assert_eq!(
            decoded.notes,
            vec![Note::new("", "old"), Note::new("t", "c")]
        );
        assert_eq!(decoded.legacy_count, 1);
    }

    #[test]
    fn decode_rejects_non_array_top_level() {
        let reason = decode_notes(br#"{"title": "t"}"#).expect_err("object must be rejected");
        assert!(reason.contains("top-level array"));
        assert!(reason.contains("object"));
    }

    #[test]
    fn decode_reports_position_of_bad_entry() {
        let reason = decode_notes(br#"["ok", 42]"#).expect_err("number entry must be rejected");
        assert!(reason.starts_with("entry 1:"));

        let reason = decode_notes(br#"[{"title": 7, "content": ""}]"#)
            .expect_err("non-string title must be rejected");
        assert!(reason.starts_with("entry 0:"));
    }

    #[test]
    fn decode_rejects_empty_and_invalid_utf8_input() {
        assert!(decode_notes(b"").is_err());
        assert!(decode_notes(&[b'[', b'"', 0xff, b'"', b']']).is_err());
    }

    #[test]
    fn parent_dir_falls_back_to_current_directory() {
        assert_eq!(parent_dir(Path::new("notes.json")), Path::new("."));
        assert_eq!(parent_dir(Path::new("data/notes.json")), Path::new("data"));
    }
}
