//! The core of the Sistrum modal editing overlay. Ie the mode state machine and the
//! edit requests it issues, minus any particular host editor.
//!
//! A [`Session`] tracks the current [`Mode`], reads selections and line text through
//! [`Host`], and describes every change as a [`Request`] queued for the host to apply.
//! The host feeds the session [`Event`]s: decoded commands ([`Action`]) and focus changes.

pub mod action;
pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod mode;
pub mod notation;
pub mod search;
pub mod selection;
pub mod session;

#[cfg(test)]
mod test_session;

pub use action::Action;
pub use config::SessionConfig;
pub use error::{Error, Result};
pub use host::{ContextValue, Executor, Host, Request, RequestSink, SurfaceId};
pub use memory::MemoryHost;
pub use mode::{CursorStyle, Mode};
pub use search::{search_next, search_prev, SearchFn};
pub use selection::{Point, Selection};
pub use session::{Event, Session};
