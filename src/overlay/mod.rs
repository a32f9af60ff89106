//! Mask classification, display overlay, and binary export.
//!
//! A mask pixel is classified by its BT.601 luma. Three literal cutoffs are in
//! play and are kept as separate comparisons:
//! - [`ALPHA_THRESHOLD`] (125) decides overlay visibility
//! - [`RECOLOR_THRESHOLD`] (120) decides which overlay pixels take the highlight color
//! - [`EXPORT_THRESHOLD`] (120) is the only cutoff used by the binary export
//!
//! Masks stored as 0/1 rather than 0/255 are detected by
//! [`DEGENERATE_CEILING`] and scaled before any comparison.

pub mod composite;

pub use composite::blend_preview;

use crate::raster::{BinaryRaster, OverlayRaster, RawMask, Rgb, color};
use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Brightness above which an overlay pixel is fully opaque.
pub const ALPHA_THRESHOLD: u8 = 125;

/// Brightness above which an overlay pixel is recolored to the highlight color.
pub const RECOLOR_THRESHOLD: u8 = 120;

/// Brightness above which an exported pixel is foreground (255).
pub const EXPORT_THRESHOLD: u8 = 120;

/// If no brightness value exceeds this, the mask is treated as 0/1 encoded.
pub const DEGENERATE_CEILING: u8 = 125;

/// Scale applied to 0/1 encoded masks.
const DEGENERATE_SCALE: u8 = 255;

/// Default display opacity of the overlay layer.
pub const DEFAULT_OPACITY: f32 = 0.5;

/// BT.601 luma in 14-bit fixed point, rounded to nearest.
pub fn luma([r, g, b]: [u8; 3]) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    ((r as u32 * R + g as u32 * G + b as u32 * B + (1 << 13)) >> 14) as u8
}

/// Per-pixel brightness of a mask after degenerate-data correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrightnessMap {
    width: u32,
    height: u32,
    values: Vec<u8>,
    scaled: bool,
}

impl BrightnessMap {
    /// Converts every pixel to luma; if nothing exceeds [`DEGENERATE_CEILING`]
    /// all values are multiplied by 255 (saturating).
    pub fn from_mask(mask: &RawMask) -> Self {
        let mut values: Vec<u8> = mask.pixels().map(luma).collect();
        let scaled = values.iter().all(|v| *v <= DEGENERATE_CEILING);
        if scaled {
            for value in &mut values {
                *value = value.saturating_mul(DEGENERATE_SCALE);
            }
        }
        Self {
            width: mask.width(),
            height: mask.height(),
            values,
            scaled,
        }
    }

    /// Whether the 0/1 correction was applied.
    pub fn was_scaled(&self) -> bool {
        self.scaled
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }
}

/// Builds the display overlay for `mask` with the default pure-green highlight.
pub fn to_overlay(mask: &RawMask, opacity: f32) -> OverlayRaster {
    overlay_with_highlight(mask, opacity, color::GREEN)
}

fn overlay_with_highlight(mask: &RawMask, opacity: f32, highlight: Rgb) -> OverlayRaster {
    let brightness = BrightnessMap::from_mask(mask);
    let mut pixels = RgbaImage::new(mask.width(), mask.height());

    for ((out, source), level) in pixels
        .pixels_mut()
        .zip(mask.pixels())
        .zip(brightness.values().iter().copied())
    {
        let alpha = if level > ALPHA_THRESHOLD { u8::MAX } else { 0 };
        let [r, g, b] = if level > RECOLOR_THRESHOLD {
            highlight.channels()
        } else {
            source
        };
        *out = Rgba([r, g, b, alpha]);
    }

    if brightness.was_scaled() {
        log::debug!("Mask brightness scaled by {DEGENERATE_SCALE} (0/1 encoding)");
    }

    OverlayRaster::new(pixels, opacity)
}

/// Produces the persisted mask: brightness > [`EXPORT_THRESHOLD`] becomes 255,
/// everything else 0. Single channel.
pub fn to_binary_export(mask: &RawMask) -> BinaryRaster {
    let brightness = BrightnessMap::from_mask(mask);
    let values = brightness
        .values()
        .iter()
        .map(|level| {
            if *level > EXPORT_THRESHOLD {
                BinaryRaster::FOREGROUND
            } else {
                BinaryRaster::BACKGROUND
            }
        })
        .collect();

    let pixels = GrayImage::from_raw(mask.width(), mask.height(), values)
        .unwrap_or_else(|| GrayImage::from_pixel(mask.width(), mask.height(), Luma([0])));
    BinaryRaster::from_gray_image(pixels)
}

/// Overlay settings carried by an editing session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayCompositor {
    opacity: f32,
    highlight: Rgb,
}

impl Default for OverlayCompositor {
    fn default() -> Self {
        Self::new(DEFAULT_OPACITY, color::GREEN)
    }
}

impl OverlayCompositor {
    pub fn new(opacity: f32, highlight: Rgb) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            highlight,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn highlight(&self) -> Rgb {
        self.highlight
    }

    pub fn to_overlay(&self, mask: &RawMask) -> OverlayRaster {
        overlay_with_highlight(mask, self.opacity, self.highlight)
    }

    pub fn to_binary_export(&self, mask: &RawMask) -> BinaryRaster {
        to_binary_export(mask)
    }
}
