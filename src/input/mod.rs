//! Input vocabulary for driving an editing session.
//!
//! A windowed front end maps its native pointer and button events onto
//! [`Action`]s; the headless front end reads the same actions from a
//! line-oriented script.

pub mod action;
pub mod events;

// Re-export commonly used types at module level
pub use action::{Action, ActionParseError, parse_script};
pub use events::MouseButton;
