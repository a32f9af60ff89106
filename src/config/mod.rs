//! Configuration file support for maskbrush.
//!
//! Settings are read from `~/.config/maskbrush/config.toml` (or a path given on
//! the command line): brush radius, overlay appearance, folder layout, export
//! naming, and the mask cache bound.
//!
//! If no config file exists, defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, PairingMode, SaveFormat};
pub use types::{BrushConfig, CacheConfig, CatalogConfig, OverlayConfig, SaveConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Example configuration written by `maskbrush init-config`.
pub const EXAMPLE_CONFIG: &str = include_str!("../../config.example.toml");

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [brush]
/// default_radius = 10
///
/// [overlay]
/// opacity = 0.5
/// highlight_color = "green"
///
/// [catalog]
/// image_dir = "train_data"
/// mask_dir = "train_mask"
/// pairing = "position"
///
/// [save]
/// directory = "save"
/// format = "lossless"
///
/// [cache]
/// max_entries = 0
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Eraser defaults
    #[serde(default)]
    pub brush: BrushConfig,

    /// Overlay appearance
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Root folder layout
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Export settings
    #[serde(default)]
    pub save: SaveConfig,

    /// Mask cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are corrected and a warning is logged:
    /// - `brush.min_radius` >= 1, `brush.max_radius` >= `min_radius`
    /// - `brush.default_radius` within `min_radius..=max_radius`
    /// - `overlay.opacity` within 0.0 - 1.0
    /// - directory names must be single relative path components
    fn validate_and_clamp(&mut self) {
        if self.brush.min_radius < 1 {
            warn!(
                "Invalid min_radius {}, clamping to 1",
                self.brush.min_radius
            );
            self.brush.min_radius = 1;
        }

        if self.brush.max_radius < self.brush.min_radius {
            warn!(
                "max_radius {} is below min_radius {}, raising it",
                self.brush.max_radius, self.brush.min_radius
            );
            self.brush.max_radius = self.brush.min_radius;
        }

        let (min, max) = (self.brush.min_radius, self.brush.max_radius);
        if !(min..=max).contains(&self.brush.default_radius) {
            warn!(
                "Invalid default_radius {}, clamping to {}-{} range",
                self.brush.default_radius, min, max
            );
            self.brush.default_radius = self.brush.default_radius.clamp(min, max);
        }

        if self.overlay.opacity.is_nan() {
            warn!("Invalid overlay opacity NaN, using 0.5");
            self.overlay.opacity = 0.5;
        } else if !(0.0..=1.0).contains(&self.overlay.opacity) {
            warn!(
                "Invalid overlay opacity {:.2}, clamping to 0.0-1.0 range",
                self.overlay.opacity
            );
            self.overlay.opacity = self.overlay.opacity.clamp(0.0, 1.0);
        }

        let defaults = Config::default();
        sanitize_dir_name(
            "catalog.image_dir",
            &mut self.catalog.image_dir,
            &defaults.catalog.image_dir,
        );
        sanitize_dir_name(
            "catalog.mask_dir",
            &mut self.catalog.mask_dir,
            &defaults.catalog.mask_dir,
        );
        sanitize_dir_name(
            "save.directory",
            &mut self.save.directory,
            &defaults.save.directory,
        );

        if self.catalog.image_dir == self.catalog.mask_dir {
            warn!(
                "catalog.image_dir and catalog.mask_dir are both '{}'; every image will pair with itself",
                self.catalog.image_dir
            );
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/maskbrush/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("maskbrush");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path; the file must exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Writes the documented example config to `path`.
    ///
    /// # Errors
    /// Returns an error if a file already exists at `path` or it cannot be written.
    pub fn create_default_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn sanitize_dir_name(field: &str, value: &mut String, fallback: &str) {
    let mut components = Path::new(value.as_str()).components();
    let valid = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !valid {
        warn!(
            "Invalid {} '{}', falling back to '{}'",
            field, value, fallback
        );
        *value = fallback.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.brush.default_radius, 10);
        assert_eq!(config.overlay.opacity, 0.5);
        assert_eq!(config.catalog.pairing, PairingMode::Position);
        assert_eq!(config.save.format, SaveFormat::Lossless);
        assert_eq!(config.cache.max_entries, 0);
    }

    #[test]
    fn example_config_parses_to_defaults() {
        let config = Config::from_toml_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml_str(
            r#"
            [brush]
            default_radius = 500
            min_radius = -3
            max_radius = 40

            [overlay]
            opacity = 1.7
            "#,
        )
        .unwrap();
        assert_eq!(config.brush.min_radius, 1);
        assert_eq!(config.brush.default_radius, 40);
        assert_eq!(config.overlay.opacity, 1.0);
    }

    #[test]
    fn max_radius_below_min_is_raised() {
        let config = Config::from_toml_str(
            r#"
            [brush]
            default_radius = 2
            min_radius = 5
            max_radius = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.brush.max_radius, 5);
        assert_eq!(config.brush.default_radius, 5);
    }

    #[test]
    fn directory_names_must_be_single_components() {
        let config = Config::from_toml_str(
            r#"
            [catalog]
            image_dir = "../escape"
            mask_dir = "masks"
            pairing = "stem"

            [save]
            directory = ""
            format = "source"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.image_dir, "train_data");
        assert_eq!(config.catalog.mask_dir, "masks");
        assert_eq!(config.catalog.pairing, PairingMode::Stem);
        assert_eq!(config.save.directory, "save");
        assert_eq!(config.save.format, SaveFormat::Source);
    }

    #[test]
    fn highlight_color_accepts_rgb_array() {
        let config = Config::from_toml_str("[overlay]\nhighlight_color = [10, 20, 30]\n").unwrap();
        assert_eq!(config.overlay.highlight_color, ColorSpec::Rgb([10, 20, 30]));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml_str("[brush\nradius = ").is_err());
        assert!(Config::from_toml_str("[catalog]\npairing = \"diagonal\"\n").is_err());
    }

    #[test]
    fn create_default_file_refuses_to_overwrite() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        Config::create_default_file(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), EXAMPLE_CONFIG);
        assert!(Config::create_default_file(&path).is_err());

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = &schema["properties"];
        for section in ["brush", "overlay", "catalog", "save", "cache"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
