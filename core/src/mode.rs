//! Editing modes and the presentation derived from them.
//!
//! A session is always in exactly one [`Mode`]. Each mode maps to a fixed
//! [`CursorStyle`] and to the name published to the host's keybinding
//! context:
//!
//! | Mode         | Cursor style   | Context name   |
//! |--------------|----------------|----------------|
//! | `Code`       | `Line`         | `code`         |
//! | `Extension`  | `Block`        | `extension`    |
//! | `Overtype`   | `Underline`    | `overtype`     |
//! | `Replace`    | `Underline`    | `replace`      |
//! | `SearchNext` | `BlockOutline` | `searchNext`   |
//! | `SearchPrev` | `BlockOutline` | `searchPrev`   |
//! | `Nop`        | none           | `nop`          |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Editing modes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Mode {
    /// Keys go straight to the host editor as ordinary text input.
    Code,
    /// Keys are bound to overlay commands. The resting mode.
    #[default]
    Extension,
    /// Typed characters overwrite the text under the cursor.
    Overtype,
    /// A single character overwrites the text under the cursor, then the
    /// session returns to [`Mode::Extension`].
    Replace,
    /// The next typed text is searched for forward on the cursor's line.
    SearchNext,
    /// The next typed text is searched for backward on the cursor's line.
    SearchPrev,
    /// Placeholder target for keys with no applicable binding. Transitioning
    /// to it has no effect.
    Nop,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Code,
        Mode::Extension,
        Mode::Overtype,
        Mode::Replace,
        Mode::SearchNext,
        Mode::SearchPrev,
        Mode::Nop,
    ];

    /// Name published to the host context while this mode is active.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Code => "code",
            Mode::Extension => "extension",
            Mode::Overtype => "overtype",
            Mode::Replace => "replace",
            Mode::SearchNext => "searchNext",
            Mode::SearchPrev => "searchPrev",
            Mode::Nop => "nop",
        }
    }

    /// Cursor style shown while this mode is active.
    ///
    /// [`Mode::Nop`] has no presentation, which is what makes it a
    /// transition without side effects.
    pub fn cursor_style(&self) -> Option<CursorStyle> {
        match self {
            Mode::Code => Some(CursorStyle::Line),
            Mode::Extension => Some(CursorStyle::Block),
            Mode::Overtype | Mode::Replace => Some(CursorStyle::Underline),
            Mode::SearchNext | Mode::SearchPrev => Some(CursorStyle::BlockOutline),
            Mode::Nop => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering hint for the caret, applied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CursorStyle {
    Line,
    Block,
    Underline,
    BlockOutline,
}

impl CursorStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorStyle::Line => "line",
            CursorStyle::Block => "block",
            CursorStyle::Underline => "underline",
            CursorStyle::BlockOutline => "block-outline",
        }
    }
}

impl fmt::Display for CursorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_style_mapping() {
        assert_eq!(Mode::Code.cursor_style(), Some(CursorStyle::Line));
        assert_eq!(Mode::Extension.cursor_style(), Some(CursorStyle::Block));
        assert_eq!(Mode::Overtype.cursor_style(), Some(CursorStyle::Underline));
        assert_eq!(Mode::Replace.cursor_style(), Some(CursorStyle::Underline));
        assert_eq!(Mode::SearchNext.cursor_style(), Some(CursorStyle::BlockOutline));
        assert_eq!(Mode::SearchPrev.cursor_style(), Some(CursorStyle::BlockOutline));
        assert_eq!(Mode::Nop.cursor_style(), None);
    }

    #[test]
    fn context_names_are_unique() {
        let mut names: Vec<_> = Mode::ALL.iter().map(Mode::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Mode::ALL.len());
    }

    #[test]
    fn default_is_extension() {
        assert_eq!(Mode::default(), Mode::Extension);
    }

    #[test]
    fn mode_serialization() {
        let serialized = ron::to_string(&Mode::SearchNext).expect("Failed to serialize SearchNext");
        assert_eq!(serialized, "SearchNext");

        let mode: Mode = ron::from_str("Overtype").expect("Failed to parse Overtype");
        assert_eq!(mode, Mode::Overtype);
    }
}
