//! Configuration type definitions.

use super::enums::{ColorSpec, PairingMode, SaveFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Eraser settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Eraser radius in raster pixels when the tool starts
    #[serde(default = "default_radius")]
    pub default_radius: i32,

    /// Smallest radius a front end's slider offers
    #[serde(default = "default_min_radius")]
    pub min_radius: i32,

    /// Largest radius a front end's slider offers
    #[serde(default = "default_max_radius")]
    pub max_radius: i32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_radius: default_radius(),
            min_radius: default_min_radius(),
            max_radius: default_max_radius(),
        }
    }
}

/// Mask overlay display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OverlayConfig {
    /// Opacity of the overlay layer over the source image (0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// Color painted over foreground mask pixels
    #[serde(default = "default_highlight_color")]
    pub highlight_color: ColorSpec,

    /// Whether the overlay is shown when an item is first displayed
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
            highlight_color: default_highlight_color(),
            visible: default_visible(),
        }
    }
}

/// Root folder layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogConfig {
    /// Images subdirectory of the root folder
    #[serde(default = "default_image_dir")]
    pub image_dir: String,

    /// Masks subdirectory of the root folder
    #[serde(default = "default_mask_dir")]
    pub mask_dir: String,

    /// How images and masks are paired ("position" or "stem")
    #[serde(default)]
    pub pairing: PairingMode,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            image_dir: default_image_dir(),
            mask_dir: default_mask_dir(),
            pairing: PairingMode::default(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SaveConfig {
    /// Output subdirectory of the root folder (created on first save)
    #[serde(default = "default_save_dir")]
    pub directory: String,

    /// "lossless" reuses the image file name unless it is lossy (then `<stem>.png`);
    /// "png" always writes `<stem>.png`; "source" always reuses the image file name
    #[serde(default)]
    pub format: SaveFormat,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            directory: default_save_dir(),
            format: SaveFormat::default(),
        }
    }
}

/// Mask snapshot cache.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheConfig {
    /// Maximum cached masks; 0 keeps every mask loaded this session
    #[serde(default)]
    pub max_entries: usize,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_radius() -> i32 {
    10
}

fn default_min_radius() -> i32 {
    1
}

fn default_max_radius() -> i32 {
    100
}

fn default_opacity() -> f32 {
    0.5
}

fn default_highlight_color() -> ColorSpec {
    ColorSpec::Name("green".to_string())
}

fn default_visible() -> bool {
    true
}

fn default_image_dir() -> String {
    "train_data".to_string()
}

fn default_mask_dir() -> String {
    "train_mask".to_string()
}

fn default_save_dir() -> String {
    "save".to_string()
}
