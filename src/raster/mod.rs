//! Raster value types for masks, overlays, and exports.
//!
//! - [`RawMask`]: three-channel working mask, edited in place by brush strokes
//! - [`OverlayRaster`]: RGBA display overlay plus the display-layer opacity
//! - [`BinaryRaster`]: single-channel 0/255 export
//! - [`io`]: decoding and encoding through the `image` crate

pub mod color;
pub mod io;
pub mod types;

// Re-export commonly used types at module level
pub use color::Rgb;
pub use io::{ensure_directory_exists, load_mask, load_source_image, save_binary, save_rgb};
pub use types::{BinaryRaster, OverlayRaster, RasterError, RawMask};
