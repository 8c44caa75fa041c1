//! In-memory host used by tests and the `sistrum` CLI.
//!
//! Holds any number of surfaces, each a list of lines plus selections, and
//! records the cursor style and keybinding context the session publishes.
//! Cursor movement stays on the cursor's line.

use crate::{
    error::{NotationSnafu, Result, UnknownSurfaceSnafu},
    host::{ContextValue, Executor, Host, Request, SurfaceId},
    mode::CursorStyle,
    notation,
    selection::{Point, Selection},
};
use async_trait::async_trait;
use parking_lot::Mutex;
use snafu::{OptionExt, ResultExt};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
struct Surface {
    lines: Vec<String>,
    selections: Vec<Selection>,
    cursor_style: Option<CursorStyle>,
}

#[derive(Debug, Default)]
struct State {
    surfaces: HashMap<SurfaceId, Surface>,
    active: Option<SurfaceId>,
    context: BTreeMap<String, ContextValue>,
    next_id: u64,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    state: Mutex<State>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a surface from marked text (see [`notation`]) and focus it.
    pub fn open(&self, marked: &str) -> Result<SurfaceId> {
        let parsed = notation::parse(marked).context(NotationSnafu)?;
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = SurfaceId(state.next_id);
        let selections = if parsed.selections.is_empty() {
            vec![Selection::cursor(Point::default())]
        } else {
            parsed.selections
        };
        state.surfaces.insert(
            id,
            Surface {
                lines: parsed.lines,
                selections,
                cursor_style: None,
            },
        );
        state.active = Some(id);
        Ok(id)
    }

    /// Move input focus. Returns the newly active surface, which is `None`
    /// when `surface` is `None` or not open.
    pub fn focus(&self, surface: Option<SurfaceId>) -> Option<SurfaceId> {
        let mut state = self.state.lock();
        let active = surface.filter(|id| state.surfaces.contains_key(id));
        state.active = active;
        active
    }

    pub fn close(&self, surface: SurfaceId) {
        let mut state = self.state.lock();
        state.surfaces.remove(&surface);
        if state.active == Some(surface) {
            state.active = None;
        }
    }

    /// Contents of `surface` in marked-text notation.
    pub fn marked_text(&self, surface: SurfaceId) -> Option<String> {
        let state = self.state.lock();
        let surface = state.surfaces.get(&surface)?;
        Some(notation::format(&surface.lines, &surface.selections))
    }

    pub fn text(&self, surface: SurfaceId) -> Option<String> {
        let state = self.state.lock();
        state.surfaces.get(&surface).map(|s| s.lines.join("\n"))
    }

    pub fn cursor_style(&self, surface: SurfaceId) -> Option<CursorStyle> {
        let state = self.state.lock();
        state.surfaces.get(&surface).and_then(|s| s.cursor_style)
    }

    pub fn context(&self, key: &str) -> Option<ContextValue> {
        self.state.lock().context.get(key).cloned()
    }

    /// Every published context entry, sorted by key.
    pub fn contexts(&self) -> Vec<(String, ContextValue)> {
        let state = self.state.lock();
        state
            .context
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Apply `request` immediately.
    pub fn apply(&self, request: &Request) -> Result<()> {
        let mut state = self.state.lock();
        match request {
            Request::SetContext { key, value } => {
                state.context.insert(key.clone(), value.clone());
            },
            Request::SetCursorStyle { surface, style } => {
                state.surface_mut(*surface)?.cursor_style = Some(*style);
            },
            Request::SetSelections {
                surface,
                selections,
            } => {
                state.surface_mut(*surface)?.selections = selections.clone();
            },
            Request::MoveCursors { surface, offset } => {
                state.surface_mut(*surface)?.move_cursors(*offset);
            },
            Request::ReplacePreceding {
                surface,
                count,
                text,
            } => {
                state.surface_mut(*surface)?.replace_preceding(*count, text);
            },
        }
        Ok(())
    }
}

impl State {
    fn surface_mut(&mut self, surface: SurfaceId) -> Result<&mut Surface> {
        self.surfaces
            .get_mut(&surface)
            .context(UnknownSurfaceSnafu { surface })
    }
}

impl Surface {
    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |line| line.chars().count())
    }

    fn move_cursors(&mut self, offset: isize) {
        let moved: Vec<Selection> = self
            .selections
            .iter()
            .map(|sel| {
                let Point { row, column } = sel.active;
                let column = column
                    .saturating_add_signed(offset)
                    .min(self.line_len(row));
                Selection::cursor(Point::new(row, column))
            })
            .collect();
        self.selections = moved;
    }

    /// Cursors are edited left to right; later cursors on the same row shift
    /// by the length change of the earlier edits.
    fn replace_preceding(&mut self, count: usize, text: &str) {
        let inserted = text.chars().count();
        let mut order: Vec<usize> = (0..self.selections.len()).collect();
        order.sort_by_key(|&i| self.selections[i].active);

        let mut shift: Option<(usize, isize)> = None;
        for i in order {
            let Point { row, column } = self.selections[i].active;
            let delta = match shift {
                Some((shift_row, delta)) if shift_row == row => delta,
                _ => 0,
            };
            let Some(line) = self.lines.get_mut(row) else {
                continue;
            };

            let column = column.saturating_add_signed(delta);
            let mut chars: Vec<char> = line.chars().collect();
            let end = column.min(chars.len());
            let start = end.saturating_sub(count);
            chars.splice(start..end, text.chars());
            *line = chars.into_iter().collect();

            let cursor = start + inserted;
            self.selections[i] = Selection::cursor(Point::new(row, cursor));
            shift = Some((row, delta + inserted as isize - (end - start) as isize));
        }
    }
}

impl Host for MemoryHost {
    fn active_surface(&self) -> Option<SurfaceId> {
        self.state.lock().active
    }

    fn selections(&self, surface: SurfaceId) -> Vec<Selection> {
        let state = self.state.lock();
        state
            .surfaces
            .get(&surface)
            .map(|s| s.selections.clone())
            .unwrap_or_default()
    }

    fn line(&self, surface: SurfaceId, row: usize) -> String {
        let state = self.state.lock();
        state
            .surfaces
            .get(&surface)
            .and_then(|s| s.lines.get(row).cloned())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Executor for MemoryHost {
    async fn execute(&self, request: &Request) -> Result<()> {
        self.apply(request)
    }
}
