//! Viewport arithmetic for a paged list on a fixed number of rows.
//!
//! Focus is 1-based throughout. Every function assumes `body_rows >= 1`;
//! `MenuScreen::new` refuses geometries that would break that.

use core::ops::Range;

/// Rows taken by the non-empty title/subtitle lines (0, 1 or 2).
pub fn header_rows(title: &str, subtitle: &str) -> u8 {
    u8::from(!title.is_empty()) + u8::from(!subtitle.is_empty())
}

/// Zero-based page holding `focus`.
pub fn page_index(focus: usize, body_rows: usize) -> usize {
    focus.saturating_sub(1) / body_rows
}

/// Body row (within the page) holding `focus`.
pub fn cursor_row(focus: usize, body_rows: usize) -> usize {
    focus.saturating_sub(1) % body_rows
}

/// Number of pages needed for `item_count` options; an empty list has none.
pub fn page_count(item_count: usize, body_rows: usize) -> usize {
    item_count.div_ceil(body_rows)
}

/// Index range of the options shown on the page holding `focus`.
///
/// Clamped to `item_count`, so the last page may be short and an empty
/// list gives an empty range.
pub fn viewport(item_count: usize, focus: usize, body_rows: usize) -> Range<usize> {
    let start = (page_index(focus, body_rows) * body_rows).min(item_count);
    let end = (start + body_rows).min(item_count);
    start..end
}

/// Longest prefix of `text` that is at most `max_chars` characters.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
