//! Domain model for card notes.
//!
//! # Responsibility
//! - Define the note value persisted to the notes file.
//! - Define the in-memory identity attached to notes while a store is open.
//!
//! # Invariants
//! - A persisted note is exactly a `title` + `content` pair.
//! - Session identity never reaches disk.

pub mod note;
