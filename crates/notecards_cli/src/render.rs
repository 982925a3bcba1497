//! Terminal rendering of note cards.
//!
//! Cards are fixed-width blocks painted with their pastel background. Widths
//! are terminal columns: East Asian wide characters and emoji take two,
//! combining marks take none, and text never splits mid-character.

use notecards_core::{CardColor, NoteCard};
use yansi::{Color, Paint};

/// Inner text width of a grid card.
pub const CARD_WIDTH: usize = 28;
/// Inner text width of a single opened card.
pub const DETAIL_WIDTH: usize = 56;

const GRID_BLOCK_HEIGHT: usize = 4;
const COLUMN_GAP: &str = "  ";
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub columns: usize,
    pub color: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            columns: 2,
            color: false,
        }
    }
}

/// Renders cards as a grid, `style.columns` cards per row.
pub fn render_grid(cards: &[NoteCard], style: RenderStyle) -> String {
    if cards.is_empty() {
        return "No notes yet. Add one with `notecards add --title <TITLE>`.\n".to_string();
    }

    let mut out = String::new();
    for row in cards.chunks(style.columns.max(1)) {
        let blocks: Vec<Vec<String>> = row.iter().map(grid_block).collect();
        for line in 0..GRID_BLOCK_HEIGHT {
            let painted: Vec<String> = row
                .iter()
                .zip(&blocks)
                .map(|(card, block)| paint(&block[line], card.color, style.color))
                .collect();
            out.push_str(painted.join(COLUMN_GAP).trim_end());
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Renders one card with its full content, wrapped to `DETAIL_WIDTH`.
pub fn render_detail(card: &NoteCard, style: RenderStyle) -> String {
    let mut lines = vec![
        pad(&format!("#{}", card.index), DETAIL_WIDTH),
        center(&card.title, DETAIL_WIDTH),
        pad("", DETAIL_WIDTH),
    ];
    for raw_line in card.content.lines() {
        for wrapped in wrap(raw_line, DETAIL_WIDTH) {
            lines.push(pad(&wrapped, DETAIL_WIDTH));
        }
    }
    lines.push(pad("", DETAIL_WIDTH));

    let mut out = String::new();
    for line in &lines {
        out.push_str(&paint(line, card.color, style.color));
        out.push('\n');
    }
    out
}

fn grid_block(card: &NoteCard) -> Vec<String> {
    let preview = card.content.lines().next().unwrap_or("");
    vec![
        pad(&format!("#{}", card.index), CARD_WIDTH),
        center(&card.title, CARD_WIDTH),
        pad(preview, CARD_WIDTH),
        pad("", CARD_WIDTH),
    ]
}

fn paint(text: &str, color: CardColor, enabled: bool) -> String {
    let framed = format!(" {text} ");
    if !enabled {
        return framed;
    }
    framed
        .fg(Color::Black)
        .bg(Color::Rgb(color.r, color.g, color.b))
        .to_string()
}

/// Terminal columns taken by `c`.
fn char_width(c: char) -> usize {
    match c as u32 {
        0x0300..=0x036F | 0x200B..=0x200F | 0xFE00..=0xFE0F | 0x20D0..=0x20FF => 0,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1F64F
        | 0x1F900..=0x1F9FF
        | 0x20000..=0x3FFFD => 2,
        _ => 1,
    }
}

fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Longest prefix of `text` that fits in `width` columns, and its width.
fn take_columns(text: &str, width: usize) -> (&str, usize) {
    let mut used = 0;
    for (at, c) in text.char_indices() {
        let w = char_width(c);
        if used + w > width {
            return (&text[..at], used);
        }
        used += w;
    }
    (text, used)
}

fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    let (head, _) = take_columns(text, width.saturating_sub(1));
    format!("{head}{ELLIPSIS}")
}

fn pad(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let fill = width.saturating_sub(display_width(&text));
    format!("{text}{}", " ".repeat(fill))
}

fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let fill = width.saturating_sub(display_width(&text));
    let left = fill / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(fill - left))
}

fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let needed = if current.is_empty() {
            display_width(word)
        } else {
            display_width(&current) + 1 + display_width(word)
        };
        if needed > width && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
        while display_width(&current) > width {
            let (head, used) = take_columns(&current, width);
            // A single char wider than `width` still has to go somewhere.
            let split = if used == 0 {
                current.chars().next().map_or(0, char::len_utf8)
            } else {
                head.len()
            };
            let tail = current.split_off(split);
            out.push(std::mem::replace(&mut current, tail));
        }
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{
        center, display_width, pad, render_detail, render_grid, truncate, wrap, RenderStyle,
        CARD_WIDTH,
    };
    use notecards_core::{note_cards, Note, NoteEntry};

    fn cards(notes: &[(&str, &str)]) -> Vec<notecards_core::NoteCard> {
        let entries: Vec<NoteEntry> = notes
            .iter()
            .map(|(title, content)| NoteEntry::new(Note::new(*title, *content)))
            .collect();
        note_cards(&entries)
    }

    #[test]
    fn empty_grid_shows_hint() {
        let out = render_grid(&[], RenderStyle::default());
        assert!(out.contains("No notes yet"));
    }

    #[test]
    fn grid_places_two_cards_per_row_in_order() {
        let out = render_grid(
            &cards(&[("alpha", "a"), ("beta", "b"), ("gamma", "c")]),
            RenderStyle::default(),
        );
        let title_lines: Vec<&str> = out
            .lines()
            .filter(|line| line.contains("alpha") || line.contains("gamma"))
            .collect();
        assert_eq!(title_lines.len(), 2);
        assert!(title_lines[0].contains("beta"));
        assert!(!title_lines[1].contains("beta"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn untitled_placeholder_and_truncation_are_rendered() {
        let long = "x".repeat(CARD_WIDTH * 2);
        let out = render_grid(&cards(&[("", long.as_str())]), RenderStyle::default());
        assert!(out.contains("(untitled)"));
        assert!(out.contains('…'));
        assert!(!out.contains(long.as_str()));
    }

    #[test]
    fn colored_output_uses_card_background() {
        let cards = cards(&[("alpha", "")]);
        let out = render_grid(
            &cards,
            RenderStyle {
                columns: 2,
                color: true,
            },
        );
        let color = cards[0].color;
        assert!(out.contains(&format!("48;2;{};{};{}", color.r, color.g, color.b)));
    }

    #[test]
    fn detail_wraps_full_content() {
        let content = "word ".repeat(40);
        let cards = cards(&[("Długi", content.trim())]);
        let out = render_detail(&cards[0], RenderStyle::default());
        assert!(out.contains("Długi"));
        assert_eq!(out.matches("word").count(), 40);
    }

    #[test]
    fn helpers_count_chars_not_bytes() {
        assert_eq!(truncate("zażółć", 6), "zażółć");
        assert_eq!(truncate("zażółć gęślą", 6), "zażół…");
        assert_eq!(center("ąę", 6).chars().count(), 6);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 3), vec![""]);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        assert_eq!(display_width("漢字"), 4);
        assert_eq!(display_width("🍎a"), 3);
        assert_eq!(display_width("e\u{301}"), 1);

        assert_eq!(display_width(&pad("漢字", 6)), 6);
        assert_eq!(pad("漢字", 6), "漢字  ");
        assert_eq!(display_width(&center("🍎", 5)), 5);
        assert_eq!(truncate("漢字漢字", 5), "漢字…");
        assert_eq!(wrap("漢字漢字", 4), vec!["漢字", "漢字"]);
    }

    #[test]
    fn grid_rows_align_with_wide_titles() {
        let out = render_grid(
            &cards(&[("買い物リスト", "牛乳"), ("plain", "ascii")]),
            RenderStyle::default(),
        );
        let second_column = |marker: &str| {
            let line = out
                .lines()
                .find(|line| line.contains(marker))
                .expect("row line");
            display_width(&line[..line.find(marker).expect("marker")])
        };
        // One framing space, the first card, its framing space, the gap, then
        // the second card's framing space.
        assert_eq!(second_column("#1"), CARD_WIDTH + 5);
        assert_eq!(second_column("ascii"), CARD_WIDTH + 5);
    }
}
