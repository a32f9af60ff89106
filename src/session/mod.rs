//! Interactive mask-editing session.
//!
//! [`EditSession`] is the surface a front end drives: it loads a catalog,
//! keeps one item displayed, turns pointer gestures into brush strokes on the
//! working mask, recomposes the overlay after every change, and writes binary
//! exports on save. Buttons, sliders, and mouse gestures each map to one
//! method (or to an [`Action`](crate::input::Action) via [`EditSession::apply`]).

mod actions;
mod core;
mod mouse;
mod options;

pub use actions::ActionOutcome;
pub use core::{CursorRing, EditSession, EditState, SessionError};
pub use options::{SessionOptions, options_from_config};
