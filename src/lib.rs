//! Library exports for the maskbrush editing core.
//!
//! The crate turns mask rasters into translucent display overlays, applies
//! erase-only circular brush strokes, and writes clean binary exports. A
//! front end (the bundled CLI, or a windowed view) drives everything through
//! [`session::EditSession`].

pub mod brush;
pub mod catalog;
pub mod config;
pub mod input;
pub mod mask;
pub mod overlay;
pub mod raster;
pub mod session;
pub mod util;

pub use config::Config;
pub use session::{EditSession, EditState, SessionError};
