//! Ownership of the working mask raster.
//!
//! [`MaskStore`] holds the raster of the loaded item, a per-path cache of
//! first-load snapshots, and the recovery point captured at the start of each
//! press-to-release gesture. Every snapshot is a deep copy.

mod cache;

pub use cache::MaskCache;

use crate::raster::{self, RasterError, RawMask};
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct Working {
    path: PathBuf,
    mask: RawMask,
}

/// Working raster, snapshot cache, and recovery point for one session.
#[derive(Debug, Default)]
pub struct MaskStore {
    cache: MaskCache,
    working: Option<Working>,
    recovery: Option<RawMask>,
}

impl MaskStore {
    /// `max_cached` bounds the snapshot cache; 0 leaves it unbounded.
    pub fn new(max_cached: usize) -> Self {
        Self {
            cache: MaskCache::new(max_cached),
            working: None,
            recovery: None,
        }
    }

    /// Loads the mask at `path` from the cache or from disk.
    ///
    /// A cache hit yields a copy of the stored snapshot. A miss decodes the
    /// file, caches a copy, and keeps another as the working raster. On error
    /// the previous working raster stays in place.
    pub fn load(&mut self, path: &Path) -> Result<&RawMask, RasterError> {
        self.load_with(path, raster::load_mask)
    }

    /// Like [`MaskStore::load`] with a caller-supplied decoder.
    pub fn load_with<F>(&mut self, path: &Path, decode: F) -> Result<&RawMask, RasterError>
    where
        F: FnOnce(&Path) -> Result<RawMask, RasterError>,
    {
        let mask = match self.cache.get(path) {
            Some(snapshot) => {
                log::debug!("Mask cache hit: {}", path.display());
                snapshot.clone()
            }
            None => {
                log::debug!("Mask cache miss: {}", path.display());
                let decoded = decode(path)?;
                self.cache.insert(path, decoded.clone());
                decoded
            }
        };

        self.recovery = None;
        let working = self.working.insert(Working {
            path: path.to_path_buf(),
            mask,
        });
        Ok(&working.mask)
    }

    /// Captures the recovery point for a new gesture. No-op with nothing loaded.
    pub fn begin_edit(&mut self) {
        if let Some(working) = &self.working {
            self.recovery = Some(working.mask.clone());
        }
    }

    /// Restores the working raster from the recovery point.
    ///
    /// Returns `false` (and changes nothing) when no recovery point exists.
    /// The recovery point is kept, so recovering twice is harmless.
    pub fn recover(&mut self) -> bool {
        match (&mut self.working, &self.recovery) {
            (Some(working), Some(snapshot)) => {
                working.mask.clone_from(snapshot);
                true
            }
            _ => false,
        }
    }

    pub fn has_recovery_point(&self) -> bool {
        self.recovery.is_some()
    }

    pub fn current(&self) -> Option<&RawMask> {
        self.working.as_ref().map(|w| &w.mask)
    }

    pub fn current_mut(&mut self) -> Option<&mut RawMask> {
        self.working.as_mut().map(|w| &mut w.mask)
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.working.as_ref().map(|w| w.path.as_path())
    }

    /// Replaces the cached snapshot for the working path with the working raster.
    ///
    /// Called after a successful save so that revisiting the item shows the
    /// saved state instead of the first-load snapshot.
    pub fn commit(&mut self) {
        if let Some(working) = &self.working {
            self.cache.insert(&working.path, working.mask.clone());
        }
    }

    pub fn cache(&self) -> &MaskCache {
        &self.cache
    }

    /// Drops the working raster, recovery point and all cached snapshots.
    pub fn reset(&mut self) {
        self.working = None;
        self.recovery = None;
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{RasterPoint, stamp};
    use std::cell::Cell;

    fn decoder(calls: &Cell<usize>) -> impl Fn(&Path) -> Result<RawMask, RasterError> + '_ {
        move |path: &Path| {
            calls.set(calls.get() + 1);
            let shade = path.to_string_lossy().len() as u8;
            Ok(RawMask::filled(10, 10, [shade, 255, 255]))
        }
    }

    #[test]
    fn load_caches_first_snapshot() {
        let calls = Cell::new(0);
        let mut store = MaskStore::new(0);

        store.load_with(Path::new("a.png"), decoder(&calls)).unwrap();
        store.load_with(Path::new("a.png"), decoder(&calls)).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(store.cache().len(), 1);
        assert_eq!(store.current_path(), Some(Path::new("a.png")));
    }

    #[test]
    fn edits_do_not_reach_cache() {
        let calls = Cell::new(0);
        let mut store = MaskStore::new(0);
        let original = store
            .load_with(Path::new("a.png"), decoder(&calls))
            .unwrap()
            .clone();

        stamp(store.current_mut().unwrap(), RasterPoint::new(5, 5), 3);
        assert_ne!(store.current(), Some(&original));

        store.load_with(Path::new("b.png"), decoder(&calls)).unwrap();
        let reloaded = store.load_with(Path::new("a.png"), decoder(&calls)).unwrap();
        assert_eq!(reloaded, &original);
    }

    #[test]
    fn commit_makes_edits_visible_on_revisit() {
        let calls = Cell::new(0);
        let mut store = MaskStore::new(0);
        store.load_with(Path::new("a.png"), decoder(&calls)).unwrap();
        stamp(store.current_mut().unwrap(), RasterPoint::new(5, 5), 3);
        let edited = store.current().unwrap().clone();
        store.commit();

        store.load_with(Path::new("b.png"), decoder(&calls)).unwrap();
        assert_eq!(store.load_with(Path::new("a.png"), decoder(&calls)).unwrap(), &edited);
    }

    #[test]
    fn recover_restores_begin_edit_state() {
        let calls = Cell::new(0);
        let mut store = MaskStore::new(0);
        store.load_with(Path::new("a.png"), decoder(&calls)).unwrap();
        assert!(!store.recover());

        store.begin_edit();
        let snapshot = store.current().unwrap().clone();
        for i in 0..5 {
            stamp(store.current_mut().unwrap(), RasterPoint::new(i * 2, i), 2);
        }
        assert!(store.recover());
        assert_eq!(store.current(), Some(&snapshot));
        assert!(store.recover());
    }

    #[test]
    fn failed_load_keeps_previous_working_raster() {
        let calls = Cell::new(0);
        let mut store = MaskStore::new(0);
        store.load_with(Path::new("a.png"), decoder(&calls)).unwrap();
        store.begin_edit();

        let err = store
            .load_with(Path::new("broken.png"), |_| {
                Err(RasterError::InvalidFormat("two channels".into()))
            })
            .unwrap_err();
        assert!(matches!(err, RasterError::InvalidFormat(_)));
        assert_eq!(store.current_path(), Some(Path::new("a.png")));
        assert!(store.has_recovery_point());
        assert!(!store.cache().contains(Path::new("broken.png")));
    }

    #[test]
    fn loading_new_item_clears_recovery_point() {
        let calls = Cell::new(0);
        let mut store = MaskStore::new(0);
        store.load_with(Path::new("a.png"), decoder(&calls)).unwrap();
        store.begin_edit();
        store.load_with(Path::new("b.png"), decoder(&calls)).unwrap();
        assert!(!store.has_recovery_point());
    }

    #[test]
    fn begin_edit_without_item_is_noop() {
        let mut store = MaskStore::default();
        store.begin_edit();
        assert!(!store.has_recovery_point());
        assert!(store.current().is_none());
    }
}
