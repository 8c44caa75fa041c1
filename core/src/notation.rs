//! Marked-text notation for describing surfaces with selections.
//!
//! # Syntax
//!
//! - `|` - cursor
//! - `<||text|>` - selection with the caret at its start
//! - `<|text||>` - selection with the caret at its end
//! - `||` outside a selection - a literal `|`
//!
//! Markers may appear on any line. Positions are [`Point`]s with columns
//! counted in chars, in the order the markers appear.
//!
//! ```ignore
//! let p = notation::parse("ab|c\n<|de||>f").unwrap();
//! assert_eq!(p.lines, vec!["abc", "def"]);
//! assert_eq!(p.selections[0], Selection::cursor(Point::new(0, 2)));
//! ```

use crate::selection::{Point, Selection};
use thiserror::Error;

/// Text and selections extracted from marked input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// Lines with all markers removed.
    pub lines: Vec<String>,
    pub selections: Vec<Selection>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Selection missing cursor marker (use <||text|> or <|text||>)")]
    SelectionMissingCursor,

    #[error("Cursor must be at selection boundary, not in middle")]
    CursorNotAtBoundary,

    #[error("Unclosed selection (missing |>)")]
    UnclosedSelection,

    #[error("Unexpected selection end |> without matching <|")]
    UnexpectedSelectionEnd,

    #[error("Selection has cursor at both start and end")]
    CursorAtBothEnds,
}

pub fn parse(input: &str) -> Result<Parsed, ParseError> {
    let mut lines = vec![String::new()];
    let mut selections = Vec::new();
    let mut chars = input.chars().peekable();
    let mut at = Point::default();

    // (start, caret at start)
    let mut open: Option<(Point, bool)> = None;

    while let Some(ch) = chars.next() {
        match ch {
            '|' => match chars.peek() {
                Some('|') => {
                    chars.next();
                    if chars.peek() == Some(&'>') {
                        chars.next();
                        let (start, caret_at_start) =
                            open.take().ok_or(ParseError::UnexpectedSelectionEnd)?;
                        if caret_at_start {
                            return Err(ParseError::CursorAtBothEnds);
                        }
                        selections.push(Selection::new(start, at));
                    } else {
                        if open.is_some() {
                            return Err(ParseError::CursorNotAtBoundary);
                        }
                        push_char(&mut lines, &mut at, '|');
                    }
                },
                Some('>') => {
                    chars.next();
                    let (start, caret_at_start) =
                        open.take().ok_or(ParseError::UnexpectedSelectionEnd)?;
                    if !caret_at_start {
                        return Err(ParseError::SelectionMissingCursor);
                    }
                    selections.push(Selection::new(at, start));
                },
                _ => {
                    if open.is_some() {
                        return Err(ParseError::CursorNotAtBoundary);
                    }
                    selections.push(Selection::cursor(at));
                },
            },
            '<' if chars.peek() == Some(&'|') => {
                if open.is_some() {
                    return Err(ParseError::UnclosedSelection);
                }
                chars.next();
                let caret_at_start = chars.peek() == Some(&'|');
                if caret_at_start {
                    chars.next();
                }
                open = Some((at, caret_at_start));
            },
            _ => push_char(&mut lines, &mut at, ch),
        }
    }

    if open.is_some() {
        return Err(ParseError::UnclosedSelection);
    }

    Ok(Parsed { lines, selections })
}

fn push_char(lines: &mut Vec<String>, at: &mut Point, ch: char) {
    if ch == '\n' {
        lines.push(String::new());
        *at = Point::new(at.row + 1, 0);
    } else if let Some(line) = lines.last_mut() {
        line.push(ch);
        at.column += 1;
    }
}

/// Render `lines` with `selections` marked. Inverse of [`parse`].
pub fn format(lines: &[String], selections: &[Selection]) -> String {
    let mut markers: Vec<(Point, &'static str)> = Vec::new();
    for sel in selections {
        if sel.is_empty() {
            markers.push((sel.active, "|"));
        } else if sel.reversed() {
            markers.push((sel.start(), "<||"));
            markers.push((sel.end(), "|>"));
        } else {
            markers.push((sel.start(), "<|"));
            markers.push((sel.end(), "||>"));
        }
    }
    // Stable: markers sharing a point keep selection order.
    markers.sort_by_key(|(point, _)| *point);
    let mut markers = markers.into_iter().peekable();

    let mut out = String::new();
    for (row, line) in lines.iter().enumerate() {
        if row > 0 {
            out.push('\n');
        }
        for (column, ch) in line.chars().enumerate() {
            while let Some((_, marker)) = markers.next_if(|(p, _)| *p <= Point::new(row, column)) {
                out.push_str(marker);
            }
            if ch == '|' {
                out.push_str("||");
            } else {
                out.push(ch);
            }
        }
        let eol = Point::new(row, line.chars().count());
        while let Some((_, marker)) = markers.next_if(|(p, _)| p.row == row && *p >= eol) {
            out.push_str(marker);
        }
    }
    out.extend(markers.map(|(_, marker)| marker));
    out
}
