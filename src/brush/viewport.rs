//! View transforms between screen space and raster (scene) space.

use super::ScreenPoint;

/// Inverse mapping supplied by whatever view displays the raster.
///
/// Zoom/pan management lives in the view layer; the brush only needs to know
/// where a pointer position lands on the raster.
pub trait ViewTransform {
    /// Maps a screen position to continuous raster coordinates.
    fn screen_to_scene(&self, point: ScreenPoint) -> (f64, f64);
}

/// Uniform scale plus translation: `screen = scene * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity()
    }
}

impl Viewport {
    /// Creates a viewport; non-finite or non-positive scales fall back to 1.0.
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Scales a `raster_w` x `raster_h` raster to fit inside the view while
    /// keeping its aspect ratio, centred along the slack axis.
    pub fn fit(raster_w: u32, raster_h: u32, view_w: u32, view_h: u32) -> Self {
        if raster_w == 0 || raster_h == 0 || view_w == 0 || view_h == 0 {
            return Self::identity();
        }
        let scale_x = view_w as f64 / raster_w as f64;
        let scale_y = view_h as f64 / raster_h as f64;
        let scale = scale_x.min(scale_y);
        let offset_x = (view_w as f64 - raster_w as f64 * scale) / 2.0;
        let offset_y = (view_h as f64 - raster_h as f64 * scale) / 2.0;
        Self::new(scale, offset_x, offset_y)
    }

    /// Zooms by `factor` keeping the raster point under `anchor` fixed on screen.
    pub fn zoom_about(&mut self, factor: f64, anchor: ScreenPoint) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let (scene_x, scene_y) = self.screen_to_scene(anchor);
        self.scale *= factor;
        self.offset_x = anchor.x - scene_x * self.scale;
        self.offset_y = anchor.y - scene_y * self.scale;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn scene_to_screen(&self, x: f64, y: f64) -> ScreenPoint {
        ScreenPoint::new(x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }
}

impl ViewTransform for Viewport {
    fn screen_to_scene(&self, point: ScreenPoint) -> (f64, f64) {
        (
            (point.x - self.offset_x) / self.scale,
            (point.y - self.offset_y) / self.scale,
        )
    }
}
