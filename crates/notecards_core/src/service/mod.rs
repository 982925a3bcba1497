//! Core use-case services.
//!
//! # Responsibility
//! - Own the note collection and route presentation intents into it.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod intent;
pub mod note_store;
