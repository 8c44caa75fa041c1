//! The boundary between a [`Session`](crate::Session) and the host editor.
//!
//! Reads go through [`Host`] and are answered synchronously. Everything the
//! session wants changed is described as a [`Request`] and submitted through a
//! [`RequestSink`]. Submission never waits: the host applies requests later,
//! in submission order, through an [`Executor`] driven by [`run_requests`] or
//! [`drain_requests`].
//!
//! Request failures stay on the host side. They are logged by the runner and
//! never reported back to the session.

use crate::{
    error::Result,
    mode::CursorStyle,
    selection::{Point, Selection},
};
use async_trait::async_trait;
use std::fmt;
use tokio::sync::mpsc;

/// Identifies one editing surface (an open editor view) of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read access to host state.
pub trait Host: Send + Sync {
    /// The surface currently accepting input, if any.
    fn active_surface(&self) -> Option<SurfaceId>;

    /// All selections of `surface`, in host order.
    fn selections(&self, surface: SurfaceId) -> Vec<Selection>;

    /// Full text of `row` without its line ending. Rows past the end read as
    /// empty.
    fn line(&self, surface: SurfaceId, row: usize) -> String;
}

/// Value published to the host's keybinding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Bool(bool),
    String(String),
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Bool(value) => write!(f, "{value}"),
            ContextValue::String(value) => write!(f, "{value:?}"),
        }
    }
}

/// A change the session asks the host to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Publish `key = value` to the keybinding context.
    SetContext { key: String, value: ContextValue },

    /// Render the carets of `surface` with `style`.
    SetCursorStyle {
        surface: SurfaceId,
        style: CursorStyle,
    },

    /// Replace every selection of `surface`.
    SetSelections {
        surface: SurfaceId,
        selections: Vec<Selection>,
    },

    /// Move each caret by `offset` characters, collapsing selections.
    MoveCursors { surface: SurfaceId, offset: isize },

    /// Replace the `count` characters immediately before each caret with
    /// `text`.
    ReplacePreceding {
        surface: SurfaceId,
        count: usize,
        text: String,
    },
}

impl Request {
    pub fn set_selections_at(surface: SurfaceId, points: impl IntoIterator<Item = Point>) -> Self {
        Request::SetSelections {
            surface,
            selections: points.into_iter().map(Selection::cursor).collect(),
        }
    }
}

pub type RequestReceiver = mpsc::UnboundedReceiver<Request>;

/// Submission side of the request queue.
#[derive(Debug, Clone)]
pub struct RequestSink {
    tx: mpsc::UnboundedSender<Request>,
}

impl RequestSink {
    /// Queue `request` for the host. Requests submitted after the receiver is
    /// gone are dropped.
    pub fn submit(&self, request: Request) {
        tracing::trace!(?request, "submit");
        let _ = self.tx.send(request);
    }
}

/// Create a request queue.
pub fn channel() -> (RequestSink, RequestReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RequestSink { tx }, rx)
}

/// Applies requests to the host.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, request: &Request) -> Result<()>;
}

/// Apply requests in order until every [`RequestSink`] is dropped.
pub async fn run_requests(mut rx: RequestReceiver, executor: &dyn Executor) {
    while let Some(request) = rx.recv().await {
        apply(executor, request).await;
    }
    tracing::debug!("request queue closed");
}

/// Apply the requests queued so far and return how many were taken.
pub async fn drain_requests(rx: &mut RequestReceiver, executor: &dyn Executor) -> usize {
    let mut count = 0;
    while let Ok(request) = rx.try_recv() {
        apply(executor, request).await;
        count += 1;
    }
    count
}

async fn apply(executor: &dyn Executor, request: Request) {
    if let Err(err) = executor.execute(&request).await {
        tracing::warn!(?request, "host request failed: {err}");
    }
}
