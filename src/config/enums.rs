//! Configuration enum types.

use crate::raster::{Rgb, color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the image and mask listings are matched up.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PairingMode {
    /// Pair the n-th sorted image with the n-th sorted mask
    #[default]
    Position,
    /// Pair files whose names match apart from the extension
    Stem,
}

/// File naming/format of saved masks.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SaveFormat {
    /// The image's own file name, except lossy extensions become `<image stem>.png`
    #[default]
    Lossless,
    /// Always `<image stem>.png`
    Png,
    /// The image's own file name; the extension picks the encoder
    Source,
}

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// highlight_color = "green"
///
/// # Custom RGB color (0-255 per component)
/// highlight_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves to a color; unknown names fall back to green with a warning.
    pub fn to_color(&self) -> Rgb {
        match self {
            ColorSpec::Name(name) => color::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using green", name);
                color::GREEN
            }),
            ColorSpec::Rgb(channels) => Rgb::from(*channels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_spec_resolves_names_and_arrays() {
        assert_eq!(ColorSpec::Name("red".into()).to_color(), color::RED);
        assert_eq!(ColorSpec::Name("nope".into()).to_color(), color::GREEN);
        assert_eq!(ColorSpec::Rgb([1, 2, 3]).to_color(), Rgb::new(1, 2, 3));
    }
}
