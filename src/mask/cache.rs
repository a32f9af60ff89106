//! Per-path snapshot cache of decoded masks.

use crate::raster::RawMask;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

/// Holds one immutable snapshot per mask path.
///
/// Entries are deep copies; edits to a working raster never reach the cache
/// unless explicitly committed with [`MaskCache::insert`]. With
/// `max_entries == 0` the cache grows for the whole session; otherwise the
/// oldest inserted path is evicted first.
#[derive(Debug, Default)]
pub struct MaskCache {
    entries: HashMap<PathBuf, RawMask>,
    order: VecDeque<PathBuf>,
    max_entries: usize,
}

impl MaskCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries,
        }
    }

    pub fn get(&self, path: &Path) -> Option<&RawMask> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Stores a snapshot for `path`, replacing any previous one in place.
    pub fn insert(&mut self, path: &Path, mask: RawMask) {
        if let Some(existing) = self.entries.get_mut(path) {
            *existing = mask;
            return;
        }

        if self.max_entries > 0 {
            while self.entries.len() >= self.max_entries {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                self.entries.remove(&oldest);
                log::debug!("Evicted cached mask {}", oldest.display());
            }
        }

        self.order.push_back(path.to_path_buf());
        self.entries.insert(path.to_path_buf(), mask);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_cache_keeps_everything() {
        let mut cache = MaskCache::new(0);
        for i in 0..50 {
            cache.insert(Path::new(&format!("m{i}.png")), RawMask::new(1, 1));
        }
        assert_eq!(cache.len(), 50);
        assert!(cache.contains(Path::new("m0.png")));
    }

    #[test]
    fn bounded_cache_evicts_oldest_insert() {
        let mut cache = MaskCache::new(2);
        cache.insert(Path::new("a.png"), RawMask::new(1, 1));
        cache.insert(Path::new("b.png"), RawMask::new(1, 1));
        cache.insert(Path::new("a.png"), RawMask::filled(1, 1, [9, 9, 9]));
        cache.insert(Path::new("c.png"), RawMask::new(1, 1));

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(Path::new("a.png")));
        assert!(cache.contains(Path::new("b.png")));
        assert!(cache.contains(Path::new("c.png")));
    }

    #[test]
    fn replacing_entry_updates_snapshot() {
        let mut cache = MaskCache::new(0);
        cache.insert(Path::new("a.png"), RawMask::new(1, 1));
        cache.insert(Path::new("a.png"), RawMask::filled(1, 1, [5, 5, 5]));
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(Path::new("a.png")).and_then(|m| m.pixel(0, 0)),
            Some([5, 5, 5])
        );
    }
}
