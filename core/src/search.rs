//! Single-line literal search used by search-and-jump.
//!
//! Columns count Unicode scalar values, matching [`Point::column`](crate::Point).
//! Matching is exact and case-sensitive. Search never leaves the line and never
//! wraps around; when nothing matches the starting column is returned so the
//! cursor stays put.
//!
//! An empty search string matches at the first column scanned.

/// Signature shared by [`search_next`] and [`search_prev`].
pub type SearchFn = fn(line: &str, from: usize, text: &str) -> usize;

/// First column after `from` where `text` occurs in `line`, or `from`.
pub fn search_next(line: &str, from: usize, text: &str) -> usize {
    let line: Vec<char> = line.chars().collect();
    let needle: Vec<char> = text.chars().collect();
    (from.saturating_add(1)..line.len())
        .find(|&column| matches_at(&line, column, &needle))
        .unwrap_or(from)
}

/// Last column before `from` where `text` occurs in `line`, or `from`.
pub fn search_prev(line: &str, from: usize, text: &str) -> usize {
    let line: Vec<char> = line.chars().collect();
    let needle: Vec<char> = text.chars().collect();
    // An empty needle matches anywhere, even past the end of the line.
    if needle.is_empty() {
        return from.saturating_sub(1);
    }

    // Columns at or past the end of the line can never hold a non-empty match.
    (0..from.min(line.len()))
        .rev()
        .find(|&column| matches_at(&line, column, &needle))
        .unwrap_or(from)
}

fn matches_at(line: &[char], column: usize, needle: &[char]) -> bool {
    line.get(column..column + needle.len()) == Some(needle)
}
