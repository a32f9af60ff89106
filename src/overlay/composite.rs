//! Source-over blend of an overlay onto its source image, for previews.

use crate::raster::OverlayRaster;
use image::RgbImage;

/// Composites `overlay` over `source` with the overlay's display opacity.
///
/// The overlay is anchored at the origin; where the two rasters differ in size
/// only the common area is blended. `None` returns the source unchanged
/// (overlay hidden).
pub fn blend_preview(source: &RgbImage, overlay: Option<&OverlayRaster>) -> RgbImage {
    let mut out = source.clone();
    let Some(overlay) = overlay else {
        return out;
    };

    if overlay.dimensions() != source.dimensions() {
        log::warn!(
            "Overlay {:?} and source {:?} differ in size; blending the common area",
            overlay.dimensions(),
            source.dimensions()
        );
    }

    let width = source.width().min(overlay.width());
    let height = source.height().min(overlay.height());
    for y in 0..height {
        for x in 0..width {
            let coverage = overlay.effective_alpha(x, y);
            if coverage <= 0.0 {
                continue;
            }
            let Some([r, g, b, _]) = overlay.pixel(x, y) else {
                continue;
            };
            let pixel = out.get_pixel_mut(x, y);
            for (channel, top) in pixel.0.iter_mut().zip([r, g, b]) {
                let blended = *channel as f32 * (1.0 - coverage) + top as f32 * coverage;
                *channel = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::to_overlay;
    use crate::raster::RawMask;

    #[test]
    fn half_opacity_mixes_green_into_source() {
        let source = RgbImage::from_pixel(2, 1, image::Rgb([100, 100, 100]));
        let mut mask = RawMask::new(2, 1);
        mask.set_pixel(0, 0, [255, 255, 255]);

        let overlay = to_overlay(&mask, 0.5);
        let out = blend_preview(&source, Some(&overlay));

        assert_eq!(out.get_pixel(0, 0).0, [50, 178, 50]);
        assert_eq!(out.get_pixel(1, 0).0, [100, 100, 100]);
    }

    #[test]
    fn hidden_overlay_leaves_source_untouched() {
        let source = RgbImage::from_pixel(3, 3, image::Rgb([7, 8, 9]));
        assert_eq!(blend_preview(&source, None), source);
    }

    #[test]
    fn mismatched_sizes_blend_common_area() {
        let source = RgbImage::from_pixel(4, 4, image::Rgb([0, 0, 0]));
        let overlay = to_overlay(&RawMask::filled(2, 2, [255, 255, 255]), 1.0);
        let out = blend_preview(&source, Some(&overlay));
        assert_eq!(out.get_pixel(1, 1).0, [0, 255, 0]);
        assert_eq!(out.get_pixel(3, 3).0, [0, 0, 0]);
    }
}
