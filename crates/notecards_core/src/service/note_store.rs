//! Note store: single source of truth for the note collection.
//!
//! # Responsibility
//! - Own the ordered in-memory note collection for the process lifetime.
//! - Persist the full collection through the repository after every mutation.
//!
//! # Invariants
//! - Display order equals storage order; identity is the positional index.
//! - Add is a no-op when both trimmed fields are empty.
//! - Mutations are committed to memory only after a successful save, so a
//!   failed write leaves the in-memory collection equal to the last saved one.
//! - Out-of-range edit/delete touches neither memory nor disk.

use crate::model::note::{Note, NoteEntry, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type NoteStoreResult<T> = Result<T, NoteStoreError>;

/// Store-level error for note use-cases.
#[derive(Debug)]
pub enum NoteStoreError {
    /// Backing file exists but cannot be parsed as a note array.
    CorruptStore { path: PathBuf, reason: String },
    /// Index is not a valid position in the current collection.
    IndexOutOfRange { index: usize, len: usize },
    /// Note at `index` no longer carries the ID the caller rendered.
    StaleNote { index: usize, expected: NoteId },
    /// Any other persistence failure.
    Repo(RepoError),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorruptStore { path, reason } => {
                write!(f, "corrupt notes file `{}`: {reason}", path.display())
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "note index {index} out of range for {len} note(s)")
            }
            Self::StaleNote { index, expected } => {
                write!(f, "note at index {index} is no longer note {expected}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteStoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::CorruptStore { path, reason } => Self::CorruptStore { path, reason },
            other => Self::Repo(other),
        }
    }
}

/// In-memory note collection bound to a repository.
pub struct NoteStore<R: NoteRepository> {
    repo: R,
    entries: Vec<NoteEntry>,
}

impl<R: NoteRepository> NoteStore<R> {
    /// Loads the collection from `repo` and returns a ready store.
    pub fn open(repo: R) -> NoteStoreResult<Self> {
        let entries = load_entries(&repo)?;
        Ok(Self { repo, entries })
    }

    /// Re-reads the backing file, replacing the collection.
    ///
    /// All session IDs are regenerated. On failure the current collection is
    /// kept.
    pub fn reload(&mut self) -> NoteStoreResult<&[NoteEntry]> {
        self.entries = load_entries(&self.repo)?;
        Ok(&self.entries)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current entries in display order.
    pub fn entries(&self) -> &[NoteEntry] {
        &self.entries
    }

    /// Cloned snapshot of the current notes in display order.
    pub fn notes(&self) -> Vec<Note> {
        self.entries.iter().map(|entry| entry.note.clone()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&NoteEntry> {
        self.entries.get(index)
    }

    /// Current position of the note with session ID `id`.
    pub fn position_of(&self, id: NoteId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Appends a trimmed note and persists.
    ///
    /// Returns `Ok(None)` without touching disk when both trimmed fields are
    /// empty, otherwise the new note's session ID.
    pub fn add(&mut self, title: &str, content: &str) -> NoteStoreResult<Option<NoteId>> {
        let note = Note::from_input(title, content);
        if note.is_blank() {
            info!("event=note_add module=store status=skipped reason=blank_input");
            return Ok(None);
        }

        let entry = NoteEntry::new(note);
        let id = entry.id;
        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)?;

        info!(
            "event=note_add module=store status=ok index={} count={}",
            self.entries.len() - 1,
            self.entries.len()
        );
        Ok(Some(id))
    }

    /// Replaces the note at `index` with the trimmed values and persists.
    ///
    /// The session ID of the slot is kept. Returns the previous note.
    pub fn edit(&mut self, index: usize, title: &str, content: &str) -> NoteStoreResult<Note> {
        self.check_index(index)?;

        let mut next = self.entries.clone();
        let previous = std::mem::replace(&mut next[index].note, Note::from_input(title, content));
        self.commit(next)?;

        info!(
            "event=note_edit module=store status=ok index={} count={}",
            index,
            self.entries.len()
        );
        Ok(previous)
    }

    /// Removes the note at `index`, shifting later notes down, and persists.
    ///
    /// Returns the removed note.
    pub fn delete(&mut self, index: usize) -> NoteStoreResult<Note> {
        self.check_index(index)?;

        let mut next = self.entries.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(
            "event=note_delete module=store status=ok index={} count={}",
            index,
            self.entries.len()
        );
        Ok(removed.note)
    }

    /// Fails with `StaleNote` when the entry at `index` is not `expected`.
    pub fn ensure_identity(&self, index: usize, expected: NoteId) -> NoteStoreResult<()> {
        let entry = self.check_index(index)?;
        if entry.id != expected {
            warn!(
                "event=note_identity module=store status=error error_code=stale_note index={}",
                index
            );
            return Err(NoteStoreError::StaleNote { index, expected });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> NoteStoreResult<&NoteEntry> {
        self.entries.get(index).ok_or_else(|| {
            warn!(
                "event=note_index module=store status=error error_code=index_out_of_range index={} count={}",
                index,
                self.entries.len()
            );
            NoteStoreError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            }
        })
    }

    fn commit(&mut self, next: Vec<NoteEntry>) -> NoteStoreResult<()> {
        let notes: Vec<Note> = next.iter().map(|entry| entry.note.clone()).collect();
        self.repo.save(&notes)?;
        self.entries = next;
        Ok(())
    }
}

fn load_entries<R: NoteRepository>(repo: &R) -> NoteStoreResult<Vec<NoteEntry>> {
    let notes = repo.load()?;
    Ok(notes.into_iter().map(NoteEntry::new).collect())
}
