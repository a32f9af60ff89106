//! Raster data types and the raster error kinds.

use image::{GrayImage, Luma, RgbImage, Rgba, RgbaImage};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, decoding, or writing rasters.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode raster {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid raster format: {0}")]
    InvalidFormat(String),

    #[error("cannot encode raster {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Working mask raster: three 8-bit channels per pixel, no alpha.
///
/// Pixel values are interpreted only through brightness classification (see
/// [`crate::overlay`]); erased pixels are `[0, 0, 0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMask {
    pixels: RgbImage,
}

impl RawMask {
    /// Creates an all-background mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::new(width, height),
        }
    }

    /// Creates a mask with every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: [u8; 3]) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width, height, image::Rgb(value)),
        }
    }

    pub fn from_rgb_image(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Builds a mask from an interleaved buffer with `channels` values per pixel.
    ///
    /// # Errors
    /// [`RasterError::InvalidFormat`] when `channels != 3` or the buffer length
    /// does not match `width * height * 3`.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
    ) -> Result<Self, RasterError> {
        if channels != 3 {
            return Err(RasterError::InvalidFormat(format!(
                "expected 3 channels, found {channels}"
            )));
        }
        let expected = width as usize * height as usize * 3;
        let actual = data.len();
        RgbImage::from_raw(width, height, data)
            .filter(|_| actual == expected)
            .map(Self::from_rgb_image)
            .ok_or_else(|| {
                RasterError::InvalidFormat(format!(
                    "{width}x{height} raster needs {expected} bytes, found {actual}"
                ))
            })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Returns the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Writes a pixel; out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: [u8; 3]) {
        if let Some(pixel) = self.pixels.get_pixel_mut_checked(x, y) {
            *pixel = image::Rgb(value);
        }
    }

    /// Iterates pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.pixels.pixels().map(|p| p.0)
    }

    /// Counts pixels exactly equal to `value`.
    pub fn count_pixels(&self, value: [u8; 3]) -> usize {
        self.pixels().filter(|p| *p == value).count()
    }

    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Display overlay derived from a [`RawMask`].
///
/// The per-pixel alpha is either 0 or 255. `opacity` is the display layer's
/// own transparency, applied on top of alpha when composited, never baked in.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRaster {
    pixels: RgbaImage,
    opacity: f32,
}

impl OverlayRaster {
    pub fn new(pixels: RgbaImage, opacity: f32) -> Self {
        Self {
            pixels,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels.pixels().map(|p: &Rgba<u8>| p.0)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Final coverage of the pixel in `[0, 1]`: `alpha / 255 * opacity`.
    pub fn effective_alpha(&self, x: u32, y: u32) -> f32 {
        self.pixel(x, y)
            .map(|[_, _, _, a]| a as f32 / 255.0 * self.opacity)
            .unwrap_or(0.0)
    }

    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Single-channel export raster whose values are exactly 0 or 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryRaster {
    pixels: GrayImage,
}

impl BinaryRaster {
    pub const FOREGROUND: u8 = 255;
    pub const BACKGROUND: u8 = 0;

    pub(crate) fn from_gray_image(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn value(&self, x: u32, y: u32) -> Option<u8> {
        self.pixels.get_pixel_checked(x, y).map(|Luma([v])| *v)
    }

    pub fn values(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn count_foreground(&self) -> usize {
        self.values()
            .iter()
            .filter(|v| **v == Self::FOREGROUND)
            .count()
    }

    pub fn as_gray_image(&self) -> &GrayImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_non_rgb_layouts() {
        let err = RawMask::from_raw(2, 2, 4, vec![0; 16]).unwrap_err();
        assert!(matches!(err, RasterError::InvalidFormat(_)));

        let err = RawMask::from_raw(2, 2, 3, vec![0; 11]).unwrap_err();
        assert!(matches!(err, RasterError::InvalidFormat(_)));

        let mask = RawMask::from_raw(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(mask.pixel(1, 0), Some([4, 5, 6]));
    }

    #[test]
    fn set_pixel_ignores_out_of_bounds() {
        let mut mask = RawMask::filled(3, 3, [9, 9, 9]);
        mask.set_pixel(3, 0, [0, 0, 0]);
        mask.set_pixel(1, 1, [0, 0, 0]);
        assert_eq!(mask.count_pixels([0, 0, 0]), 1);
        assert_eq!(mask.pixel(5, 5), None);
    }

    #[test]
    fn overlay_opacity_scales_alpha() {
        let pixels = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 255]));
        let mut overlay = OverlayRaster::new(pixels, 0.5);
        assert!((overlay.effective_alpha(0, 0) - 0.5).abs() < f32::EPSILON);

        overlay.set_opacity(3.0);
        assert_eq!(overlay.opacity(), 1.0);
        assert_eq!(overlay.effective_alpha(4, 4), 0.0);
    }
}
