//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the note store.
//! - Isolate JSON file details from store orchestration.
//!
//! # Invariants
//! - Repository reads return semantic errors (`CorruptStore`) in addition to
//!   file-system transport errors.

pub mod note_repo;
