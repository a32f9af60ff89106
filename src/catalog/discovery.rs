//! Directory enumeration and image/mask pairing.

use super::CatalogError;
use crate::config::{CatalogConfig, PairingMode};
use image::ImageFormat;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where the two listings live under the root and how they are paired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    pub image_dir: String,
    pub mask_dir: String,
    pub pairing: PairingMode,
}

impl Default for CatalogLayout {
    fn default() -> Self {
        Self::from(&CatalogConfig::default())
    }
}

impl From<&CatalogConfig> for CatalogLayout {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            image_dir: config.image_dir.clone(),
            mask_dir: config.mask_dir.clone(),
            pairing: config.pairing,
        }
    }
}

/// One image file and the mask that belongs to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub image: PathBuf,
    pub mask: PathBuf,
}

impl CatalogEntry {
    pub fn new(image: impl Into<PathBuf>, mask: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            mask: mask.into(),
        }
    }

    /// File name of the image, e.g. `0001.jpg`.
    pub fn image_name(&self) -> String {
        file_name(&self.image)
    }

    /// File stem of the image, e.g. `0001`.
    pub fn image_stem(&self) -> String {
        file_stem(&self.image)
    }
}

/// Ordered list of image/mask pairs found under a root folder.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    root: PathBuf,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Lists both directories and pairs them according to `layout.pairing`.
    ///
    /// An empty result is returned as an empty catalog; callers decide whether
    /// that is an error.
    pub fn discover(root: &Path, layout: &CatalogLayout) -> Result<Self, CatalogError> {
        let images = list_rasters(&root.join(&layout.image_dir))?;
        let masks = list_rasters(&root.join(&layout.mask_dir))?;

        let entries = match layout.pairing {
            PairingMode::Position => pair_by_position(images, masks)?,
            PairingMode::Stem => pair_by_stem(images, masks),
        };

        log::info!(
            "Catalog {}: {} pairs ({:?} pairing)",
            root.display(),
            entries.len(),
            layout.pairing
        );

        Ok(Self::from_entries(root, entries))
    }

    pub fn from_entries(root: impl Into<PathBuf>, entries: Vec<CatalogEntry>) -> Self {
        Self {
            root: root.into(),
            entries,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&CatalogEntry, CatalogError> {
        self.entries
            .get(index)
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

/// Regular files with a raster extension directly inside `dir`, sorted by name.
fn list_rasters(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    if !dir.is_dir() {
        return Err(CatalogError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| CatalogError::Io {
            path: err.path().unwrap_or(dir).to_path_buf(),
            source: err.into(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if ImageFormat::from_path(&path).is_err() {
            log::warn!("Skipping non-raster file {}", path.display());
            continue;
        }
        files.push(path);
    }
    Ok(files)
}

fn pair_by_position(
    images: Vec<PathBuf>,
    masks: Vec<PathBuf>,
) -> Result<Vec<CatalogEntry>, CatalogError> {
    if images.len() != masks.len() {
        return Err(CatalogError::PairingMismatch {
            images: images.len(),
            masks: masks.len(),
        });
    }

    let entries: Vec<CatalogEntry> = images
        .into_iter()
        .zip(masks)
        .map(|(image, mask)| CatalogEntry { image, mask })
        .collect();

    let mismatched: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|entry| file_stem(&entry.image) != file_stem(&entry.mask))
        .collect();
    if let Some(first) = mismatched.first() {
        log::warn!(
            "{} positional pairs have different names (first: {} <-> {}); consider pairing = \"stem\"",
            mismatched.len(),
            first.image.display(),
            first.mask.display()
        );
    }

    Ok(entries)
}

fn pair_by_stem(images: Vec<PathBuf>, masks: Vec<PathBuf>) -> Vec<CatalogEntry> {
    let mut by_stem: HashMap<String, PathBuf> = HashMap::with_capacity(masks.len());
    for mask in masks {
        let stem = file_stem(&mask);
        if let Some(previous) = by_stem.insert(stem, mask) {
            log::warn!("Duplicate mask stem, ignoring {}", previous.display());
        }
    }

    let mut entries = Vec::with_capacity(images.len());
    for image in images {
        match by_stem.remove(&file_stem(&image)) {
            Some(mask) => entries.push(CatalogEntry { image, mask }),
            None => log::warn!("No mask for image {}", image.display()),
        }
    }

    for orphan in by_stem.values() {
        log::warn!("No image for mask {}", orphan.display());
    }

    entries
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), b"").unwrap();
    }

    fn layout(pairing: PairingMode) -> CatalogLayout {
        CatalogLayout {
            pairing,
            ..CatalogLayout::default()
        }
    }

    #[test]
    fn positional_pairing_sorts_both_listings() {
        let temp = tempfile::tempdir().unwrap();
        let images = temp.path().join("train_data");
        let masks = temp.path().join("train_mask");
        for name in ["b.jpg", "a.jpg", "c.jpg"] {
            touch(&images, name);
        }
        for name in ["c.png", "a.png", "b.png"] {
            touch(&masks, name);
        }
        touch(&masks, "notes.txt");

        let catalog = Catalog::discover(temp.path(), &layout(PairingMode::Position)).unwrap();
        assert_eq!(catalog.len(), 3);
        let names: Vec<String> = catalog.entries().iter().map(|e| e.image_name()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg"]);
        assert_eq!(catalog.get(1).unwrap().mask, masks.join("b.png"));
    }

    #[test]
    fn positional_pairing_rejects_count_mismatch() {
        let temp = tempfile::tempdir().unwrap();
        touch(&temp.path().join("train_data"), "a.png");
        touch(&temp.path().join("train_data"), "b.png");
        touch(&temp.path().join("train_mask"), "a.png");

        let err = Catalog::discover(temp.path(), &layout(PairingMode::Position)).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::PairingMismatch {
                images: 2,
                masks: 1
            }
        ));
    }

    #[test]
    fn stem_pairing_matches_names_and_drops_orphans() {
        let temp = tempfile::tempdir().unwrap();
        let images = temp.path().join("train_data");
        let masks = temp.path().join("train_mask");
        for name in ["001.jpg", "002.jpg", "003.jpg"] {
            touch(&images, name);
        }
        for name in ["001.png", "003.png", "999.png"] {
            touch(&masks, name);
        }

        let catalog = Catalog::discover(temp.path(), &layout(PairingMode::Stem)).unwrap();
        let stems: Vec<String> = catalog.entries().iter().map(|e| e.image_stem()).collect();
        assert_eq!(stems, ["001", "003"]);
        assert_eq!(catalog.get(1).unwrap().mask, masks.join("003.png"));
    }

    #[test]
    fn missing_directory_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        touch(&temp.path().join("train_data"), "a.png");
        let err = Catalog::discover(temp.path(), &CatalogLayout::default()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingDirectory(path) if path.ends_with("train_mask")));
    }

    #[test]
    fn empty_directories_give_empty_catalog() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("train_data")).unwrap();
        fs::create_dir_all(temp.path().join("train_mask")).unwrap();
        let catalog = Catalog::discover(temp.path(), &CatalogLayout::default()).unwrap();
        assert!(catalog.is_empty());
        assert!(matches!(
            catalog.get(0),
            Err(CatalogError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn custom_directory_names() {
        let temp = tempfile::tempdir().unwrap();
        touch(&temp.path().join("images"), "x.png");
        touch(&temp.path().join("masks"), "x.png");
        let layout = CatalogLayout {
            image_dir: "images".into(),
            mask_dir: "masks".into(),
            pairing: PairingMode::Position,
        };
        let catalog = Catalog::discover(temp.path(), &layout).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.root(), temp.path());
    }
}
