//! Card projection for note grids.
//!
//! # Responsibility
//! - Turn store entries into display-ready cards (title, body, color).
//! - Own the pastel palette shared by every presentation layer.
//!
//! # Invariants
//! - Card order equals store order; `index` is the note's current position.
//! - A note keeps the same color for as long as its session ID lives.

use crate::model::note::{NoteEntry, NoteId};
use std::fmt::{Display, Formatter};

/// Window/background color behind the card grid.
pub const BACKGROUND_COLOR: CardColor = CardColor::rgb(0xFF, 0xF9, 0xC4);

/// Pastel card backgrounds.
pub const PASTEL_PALETTE: [CardColor; 14] = [
    CardColor::rgb(0xFF, 0xCD, 0xD2),
    CardColor::rgb(0xF8, 0xBB, 0xD0),
    CardColor::rgb(0xE1, 0xBE, 0xE7),
    CardColor::rgb(0xD1, 0xC4, 0xE9),
    CardColor::rgb(0xC5, 0xCA, 0xE9),
    CardColor::rgb(0xBB, 0xDE, 0xFB),
    CardColor::rgb(0xB3, 0xE5, 0xFC),
    CardColor::rgb(0xB2, 0xEB, 0xF2),
    CardColor::rgb(0xB2, 0xDF, 0xDB),
    CardColor::rgb(0xC8, 0xE6, 0xC9),
    CardColor::rgb(0xDC, 0xED, 0xC8),
    CardColor::rgb(0xFF, 0xF9, 0xC4),
    CardColor::rgb(0xFF, 0xEC, 0xB3),
    CardColor::rgb(0xFF, 0xE0, 0xB2),
];

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CardColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats as `#RRGGBB`.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl Display for CardColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Display model for one note card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub index: usize,
    pub id: NoteId,
    /// Title with the untitled placeholder applied.
    pub title: String,
    pub content: String,
    pub color: CardColor,
}

/// Projects store entries into cards, preserving order.
pub fn note_cards(entries: &[NoteEntry]) -> Vec<NoteCard> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| NoteCard {
            index,
            id: entry.id,
            title: entry.note.display_title().to_string(),
            content: entry.note.content.clone(),
            color: card_color(entry.id),
        })
        .collect()
}

/// Palette color assigned to a session ID.
pub fn card_color(id: NoteId) -> CardColor {
    let slot = (id.as_u128() % PASTEL_PALETTE.len() as u128) as usize;
    PASTEL_PALETTE[slot]
}
