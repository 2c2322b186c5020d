//! Pure wrapping helpers and dimensional constants for the InputBox.
//!
//! Input text is hard-wrapped by display width (no word wrap) so the cursor
//! position can be computed from the same split the renderer uses.

use unicode_width::UnicodeWidthChar;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before the view scrolls
pub(super) const MAX_VISIBLE_LINES: u16 = 4;
/// Offset from area edge to content (border + left padding)
pub(super) const CONTENT_OFFSET: u16 = 2;

/// Inner content width after borders and padding. 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Splits `text` into rows of at most `width` display columns.
///
/// Always returns at least one row. Wide characters never straddle rows.
pub(super) fn wrap_hard(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut rows = vec![String::new()];
    let mut col = 0usize;

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if col + w > width && col > 0 {
            rows.push(String::new());
            col = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(c);
        }
        col += w;
    }
    rows
}

/// (row, column) of a cursor at byte offset `pos`, using the `wrap_hard` layout.
pub(super) fn cursor_row_col(text: &str, pos: usize, width: u16) -> (u16, u16) {
    let width = width.max(1) as usize;
    let mut row = 0usize;
    let mut col = 0usize;

    for c in text[..pos].chars() {
        let w = c.width().unwrap_or(0);
        if col + w > width && col > 0 {
            row += 1;
            col = 0;
        }
        col += w;
    }
    // Cursor sitting exactly at the edge moves to the next row
    if col >= width {
        row += 1;
        col = 0;
    }
    (row as u16, col as u16)
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
