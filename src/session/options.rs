use crate::catalog::{CatalogEntry, CatalogLayout};
use crate::config::{Config, SaveFormat};
use crate::overlay::DEFAULT_OPACITY;
use crate::raster::{Rgb, color};
use std::path::{Path, PathBuf};

/// Runtime options derived from configuration for an editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub layout: CatalogLayout,
    pub save_dir: String,
    pub save_format: SaveFormat,
    pub default_radius: i32,
    pub opacity: f32,
    pub highlight: Rgb,
    pub overlay_visible: bool,
    pub max_cached: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            layout: CatalogLayout::default(),
            save_dir: "save".to_string(),
            save_format: SaveFormat::Lossless,
            default_radius: crate::brush::DEFAULT_RADIUS,
            opacity: DEFAULT_OPACITY,
            highlight: color::GREEN,
            overlay_visible: true,
            max_cached: 0,
        }
    }
}

impl SessionOptions {
    /// Directory exports are written to for a catalog rooted at `root`.
    pub fn save_directory(&self, root: &Path) -> PathBuf {
        root.join(&self.save_dir)
    }

    /// File name of the export for `entry`.
    pub fn save_file_name(&self, entry: &CatalogEntry) -> String {
        match self.save_format {
            SaveFormat::Lossless if is_lossy_target(&entry.image) => {
                format!("{}.png", entry.image_stem())
            }
            SaveFormat::Lossless | SaveFormat::Source => entry.image_name(),
            SaveFormat::Png => format!("{}.png", entry.image_stem()),
        }
    }

    /// Full export path for `entry` under `root`.
    pub fn save_path(&self, root: &Path, entry: &CatalogEntry) -> PathBuf {
        self.save_directory(root).join(self.save_file_name(entry))
    }
}

/// Build runtime session options from configuration values.
pub fn options_from_config(config: &Config) -> SessionOptions {
    SessionOptions {
        layout: CatalogLayout::from(&config.catalog),
        save_dir: config.save.directory.clone(),
        save_format: config.save.format,
        default_radius: config.brush.default_radius,
        opacity: config.overlay.opacity,
        highlight: config.overlay.highlight_color.to_color(),
        overlay_visible: config.overlay.visible,
        max_cached: config.cache.max_entries,
    }
}

/// Whether writing to `path` loses exactness of the 0/255 values.
pub(crate) fn is_lossy_target(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "jpg" | "jpeg" | "avif"
            )
        })
}
