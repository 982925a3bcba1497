//! Presentation intents and their dispatch onto the note store.
//!
//! # Responsibility
//! - Give presentation layers discrete add/edit/delete messages instead of
//!   closures that capture list positions.
//! - Report whether a dispatched intent changed the collection, so callers
//!   know when to re-render.
//!
//! # Invariants
//! - A target carrying `expected_id` is verified before any mutation.
//! - Failed intents leave the collection and file unchanged.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::NoteRepository;
use crate::service::note_store::{NoteStore, NoteStoreResult};

/// Position of a note as rendered by a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteTarget {
    pub index: usize,
    /// Session ID seen when the card was rendered; `None` skips the check.
    pub expected_id: Option<NoteId>,
}

impl NoteTarget {
    /// Targets a position without identity verification.
    pub fn at(index: usize) -> Self {
        Self {
            index,
            expected_id: None,
        }
    }

    /// Targets a position that must still hold note `id`.
    pub fn checked(index: usize, id: NoteId) -> Self {
        Self {
            index,
            expected_id: Some(id),
        }
    }
}

/// User intent emitted by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteIntent {
    AddNote { title: String, content: String },
    EditNote {
        target: NoteTarget,
        title: String,
        content: String,
    },
    DeleteNote { target: NoteTarget },
}

/// Result of applying one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Added { index: usize, id: NoteId },
    /// Blank add; nothing was written.
    Unchanged,
    Edited { index: usize, previous: Note },
    Deleted { index: usize, removed: Note },
}

impl IntentOutcome {
    /// Whether presentation should re-fetch and re-render the list.
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl<R: NoteRepository> NoteStore<R> {
    /// Applies `intent`, persisting on success.
    pub fn apply(&mut self, intent: NoteIntent) -> NoteStoreResult<IntentOutcome> {
        match intent {
            NoteIntent::AddNote { title, content } => {
                Ok(match self.add(title.as_str(), content.as_str())? {
                    Some(id) => IntentOutcome::Added {
                        index: self.len() - 1,
                        id,
                    },
                    None => IntentOutcome::Unchanged,
                })
            }
            NoteIntent::EditNote {
                target,
                title,
                content,
            } => {
                self.verify_target(target)?;
                let previous = self.edit(target.index, title.as_str(), content.as_str())?;
                Ok(IntentOutcome::Edited {
                    index: target.index,
                    previous,
                })
            }
            NoteIntent::DeleteNote { target } => {
                self.verify_target(target)?;
                let removed = self.delete(target.index)?;
                Ok(IntentOutcome::Deleted {
                    index: target.index,
                    removed,
                })
            }
        }
    }

    fn verify_target(&self, target: NoteTarget) -> NoteStoreResult<()> {
        match target.expected_id {
            Some(id) => self.ensure_identity(target.index, id),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IntentOutcome, NoteTarget};
    use crate::model::note::Note;

    #[test]
    fn only_unchanged_outcome_skips_rerender() {
        assert!(!IntentOutcome::Unchanged.changed());
        assert!(IntentOutcome::Deleted {
            index: 0,
            removed: Note::default(),
        }
        .changed());
    }

    #[test]
    fn unchecked_target_has_no_expected_id() {
        assert_eq!(NoteTarget::at(3).expected_id, None);
    }
}
