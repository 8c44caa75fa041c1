//! The per-session mode controller.
//!
//! A [`Session`] owns the current [`Mode`] and turns triggers into host
//! [`Request`]s. It never waits on the host: reads are synchronous queries
//! against [`Host`], writes are queued on a [`RequestSink`].
//!
//! Every operation quietly does nothing when the host has no active surface.

use crate::{
    action::Action,
    config::SessionConfig,
    host::{ContextValue, Host, Request, RequestSink, SurfaceId},
    mode::{CursorStyle, Mode},
    search::{search_next, search_prev, SearchFn},
    selection::Point,
};
use std::sync::Arc;

/// Something that happened in the host that the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A bound command was triggered.
    Command(Action),

    /// Input focus moved to another surface, or to none.
    ActiveSurfaceChanged(Option<SurfaceId>),
}

pub struct Session {
    config: SessionConfig,
    host: Arc<dyn Host>,
    requests: RequestSink,
    mode: Mode,
}

impl Session {
    pub fn new(host: Arc<dyn Host>, requests: RequestSink) -> Self {
        Self::with_config(SessionConfig::default(), host, requests)
    }

    pub fn with_config(config: SessionConfig, host: Arc<dyn Host>, requests: RequestSink) -> Self {
        let mode = config.initial_mode;
        Self {
            config,
            host,
            requests,
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor_style(&self) -> Option<CursorStyle> {
        self.mode.cursor_style()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Publish the initial mode and mark the session as enabled.
    pub fn activate(&mut self) {
        tracing::debug!(namespace = %self.config.namespace, "activating session");
        self.set_mode(self.config.initial_mode);
        self.requests.submit(Request::SetContext {
            key: self.config.enabled_key(),
            value: ContextValue::Bool(true),
        });
    }

    /// Switch to `mode`, restyle the active surface's cursor and publish the
    /// new mode name. [`Mode::Nop`] leaves everything untouched.
    pub fn set_mode(&mut self, mode: Mode) {
        let Some(style) = mode.cursor_style() else {
            return;
        };

        tracing::debug!(from = %self.mode, to = %mode, "set mode");
        self.mode = mode;

        if let Some(surface) = self.host.active_surface() {
            self.requests.submit(Request::SetCursorStyle { surface, style });
        }
        self.requests.submit(Request::SetContext {
            key: self.config.mode_key(),
            value: ContextValue::String(mode.as_str().to_string()),
        });
    }

    /// Focus moved. Any newly focused surface starts in extension mode,
    /// whatever mode was active before.
    pub fn on_active_surface_changed(&mut self, surface: Option<SurfaceId>) {
        if surface.is_some() {
            self.set_mode(Mode::Extension);
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Command(action) => self.execute(action),
            Event::ActiveSurfaceChanged(surface) => self.on_active_surface_changed(surface),
        }
    }

    pub fn execute(&mut self, action: Action) {
        tracing::trace!(?action, "execute");
        match action {
            Action::SetMode(mode) => self.set_mode(mode),
            Action::SearchNext { text } => self.goto_first_match_by(&text, search_next),
            Action::SearchPrev { text } => self.goto_first_match_by(&text, search_prev),
            Action::Overtype { text } => self.overtype(&text),
            Action::Replace { text } => self.replace(&text),
        }
    }

    /// Move every cursor to the column `search` finds on its own line, then
    /// return to extension mode.
    ///
    /// Each selection collapses to a cursor; one that finds nothing collapses
    /// at its current column.
    pub fn goto_first_match_by(&mut self, text: &str, search: SearchFn) {
        let Some(surface) = self.host.active_surface() else {
            return;
        };

        let points: Vec<Point> = self
            .host
            .selections(surface)
            .iter()
            .map(|sel| {
                let line = self.host.line(surface, sel.active.row);
                Point::new(sel.active.row, search(&line, sel.active.column, text))
            })
            .collect();
        self.requests.submit(Request::set_selections_at(surface, points));

        self.set_mode(Mode::Extension);
    }

    /// Overwrite the `text.len()` characters under each cursor with `text`:
    /// step right, then replace what is now behind the cursor.
    pub fn overtype(&mut self, text: &str) {
        let Some(surface) = self.host.active_surface() else {
            return;
        };
        self.submit_overtype(surface, text);
    }

    /// Overtype once, step back onto the written text and return to
    /// extension mode.
    pub fn replace(&mut self, text: &str) {
        let Some(surface) = self.host.active_surface() else {
            return;
        };
        self.submit_overtype(surface, text);
        self.requests.submit(Request::MoveCursors {
            surface,
            offset: -1,
        });
        self.set_mode(Mode::Extension);
    }

    fn submit_overtype(&self, surface: SurfaceId, text: &str) {
        self.requests.submit(Request::MoveCursors { surface, offset: 1 });
        self.requests.submit(Request::ReplacePreceding {
            surface,
            count: text.chars().count(),
            text: text.to_string(),
        });
    }
}
