//! Fluent test API for driving a [`Session`] against a [`MemoryHost`].
//!
//! Requests are applied synchronously after every step, the way a host
//! processes its command queue between keystrokes.
//!
//! ```ignore
//! Session::test()
//!     .with_text("a|bc")
//!     .replace("X")
//!     .assert_text("a|Xc")
//!     .assert_mode(Mode::Extension);
//! ```

use crate::{
    action::Action,
    host::{self, ContextValue, RequestReceiver, SurfaceId},
    memory::MemoryHost,
    mode::{CursorStyle, Mode},
    session::{Event, Session},
};
use std::sync::Arc;

pub struct TestSession {
    host: Arc<MemoryHost>,
    session: Session,
    requests: RequestReceiver,
    surface: Option<SurfaceId>,
}

impl Session {
    pub fn test() -> TestSession {
        TestSession::new()
    }
}

impl TestSession {
    /// Activated session with no surface open.
    pub fn new() -> Self {
        let host = Arc::new(MemoryHost::new());
        let (sink, requests) = host::channel();
        let mut session = Session::new(host.clone(), sink);
        session.activate();
        Self {
            host,
            session,
            requests,
            surface: None,
        }
        .flush()
    }

    /// Open a surface from marked text and focus it.
    pub fn with_text(mut self, marked: &str) -> Self {
        let id = self.host.open(marked).expect("invalid marked text");
        self.surface = Some(id);
        self.session.handle_event(Event::ActiveSurfaceChanged(Some(id)));
        self.flush()
    }

    pub fn blur(mut self) -> Self {
        self.host.focus(None);
        self.session.handle_event(Event::ActiveSurfaceChanged(None));
        self.flush()
    }

    pub fn focus(mut self) -> Self {
        let active = self.host.focus(self.surface);
        self.session.handle_event(Event::ActiveSurfaceChanged(active));
        self.flush()
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.session.set_mode(mode);
        self.flush()
    }

    pub fn action(mut self, action: Action) -> Self {
        self.session.execute(action);
        self.flush()
    }

    /// Trigger a command by id, e.g. `sistrum.searchNext`.
    pub fn command(self, id: &str, args: Option<serde_json::Value>) -> Self {
        let namespace = self.session.config().namespace.clone();
        let action = Action::from_command(&namespace, id, args).expect("invalid command");
        self.action(action)
    }

    pub fn search_next(self, text: &str) -> Self {
        self.action(Action::SearchNext { text: text.into() })
    }

    pub fn search_prev(self, text: &str) -> Self {
        self.action(Action::SearchPrev { text: text.into() })
    }

    pub fn overtype(self, text: &str) -> Self {
        self.action(Action::Overtype { text: text.into() })
    }

    pub fn replace(self, text: &str) -> Self {
        self.action(Action::Replace { text: text.into() })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    #[track_caller]
    pub fn assert_text(self, expected: &str) -> Self {
        let surface = self.surface.expect("no surface opened");
        assert_eq!(self.host.marked_text(surface).as_deref(), Some(expected));
        self
    }

    #[track_caller]
    pub fn assert_mode(self, expected: Mode) -> Self {
        assert_eq!(self.session.mode(), expected, "session mode");
        assert_eq!(
            self.host.context(&self.session.config().mode_key()),
            Some(ContextValue::String(expected.as_str().to_string())),
            "published mode"
        );
        self
    }

    #[track_caller]
    pub fn assert_cursor_style(self, expected: Option<CursorStyle>) -> Self {
        let surface = self.surface.expect("no surface opened");
        assert_eq!(self.host.cursor_style(surface), expected);
        self
    }

    fn flush(mut self) -> Self {
        while let Ok(request) = self.requests.try_recv() {
            self.host.apply(&request).expect("request failed");
        }
        self
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}
