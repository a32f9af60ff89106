//! Catalog of image/mask pairs and the position within it.
//!
//! A root folder holds an images directory and a masks directory. Both are
//! listed, sorted by file name, and paired either by position or by matching
//! file stems (see [`PairingMode`](crate::config::PairingMode)).

mod discovery;
mod navigator;

pub use discovery::{Catalog, CatalogEntry, CatalogLayout};
pub use navigator::Navigator;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or indexing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("I/O error while listing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog under {} contains no image/mask pairs", .0.display())]
    EmptyCatalog(PathBuf),

    #[error("found {images} images but {masks} masks; positional pairing needs equal counts")]
    PairingMismatch { images: usize, masks: usize },

    #[error("index {index} out of range for catalog of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}
