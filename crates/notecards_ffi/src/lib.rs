//! Flutter-facing bindings for notecards core.

pub mod api;
