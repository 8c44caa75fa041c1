use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A position in a surface: zero-based row, column counted in chars.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then(self.column.cmp(&other.column))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A range in a surface. `active` is where the caret is drawn; `anchor` is
/// the fixed end. Equal ends make a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Selection {
    pub anchor: Point,
    pub active: Point,
}

impl Selection {
    pub fn new(anchor: Point, active: Point) -> Self {
        Self { anchor, active }
    }

    /// Zero-width selection at `point`.
    pub fn cursor(point: Point) -> Self {
        Self::new(point, point)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// True when the caret sits at the start of the range.
    pub fn reversed(&self) -> bool {
        self.active < self.anchor
    }

    pub fn start(&self) -> Point {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> Point {
        self.anchor.max(self.active)
    }
}
