//! Circular erase brush.
//!
//! Converts pointer positions into raster coordinates through a
//! [`ViewTransform`] and stamps filled background disks onto a [`RawMask`].

pub mod viewport;

pub use viewport::{ViewTransform, Viewport};

use crate::raster::{RawMask, color};
use crate::util::Rect;

/// Default eraser radius in raster pixels.
pub const DEFAULT_RADIUS: i32 = 10;

/// A pointer position in view (screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An integer raster coordinate. May lie outside the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterPoint {
    pub x: i32,
    pub y: i32,
}

impl RasterPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One circular edit: every pixel with `dx² + dy² <= radius²` is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushStroke {
    pub center: RasterPoint,
    pub radius: i32,
}

impl BrushStroke {
    pub fn new(center: RasterPoint, radius: i32) -> Self {
        Self { center, radius }
    }

    /// Unclipped bounding box, `None` for a negative radius.
    pub fn bounds(&self) -> Option<Rect> {
        if self.radius < 0 {
            return None;
        }
        let RasterPoint { x, y } = self.center;
        Rect::from_min_max(
            x.saturating_sub(self.radius),
            y.saturating_sub(self.radius),
            x.saturating_add(self.radius).saturating_add(1),
            y.saturating_add(self.radius).saturating_add(1),
        )
    }

    pub fn covers(&self, x: i32, y: i32) -> bool {
        if self.radius < 0 {
            return false;
        }
        let dx = x as i64 - self.center.x as i64;
        let dy = y as i64 - self.center.y as i64;
        let r = self.radius as i64;
        dx * dx + dy * dy <= r * r
    }
}

/// Maps a pointer position to raster space, truncating toward zero.
pub fn screen_to_raster(point: ScreenPoint, view: &dyn ViewTransform) -> RasterPoint {
    let (x, y) = view.screen_to_scene(point);
    RasterPoint::new(x.trunc() as i32, y.trunc() as i32)
}

/// Clears a disk of `radius` around `center` to background, clipped to the raster.
///
/// Returns the clipped region that was written, or `None` when the disk misses
/// the raster entirely. Stamping the same disk again rewrites the same pixels.
pub fn stamp(mask: &mut RawMask, center: RasterPoint, radius: i32) -> Option<Rect> {
    let stroke = BrushStroke::new(center, radius);
    let region = stroke.bounds()?.clip_to(mask.width(), mask.height())?;

    let background = color::BLACK.channels();
    for y in region.y..region.max_y() {
        for x in region.x..region.max_x() {
            if stroke.covers(x, y) {
                mask.set_pixel(x as u32, y as u32, background);
            }
        }
    }
    Some(region)
}

/// Brush state owned by an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushEditor {
    radius: i32,
}

impl Default for BrushEditor {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl BrushEditor {
    pub fn new(radius: i32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Range checks belong to the control surface; any value is accepted here.
    pub fn set_radius(&mut self, radius: i32) {
        self.radius = radius;
    }

    pub fn stroke_at(&self, center: RasterPoint) -> BrushStroke {
        BrushStroke::new(center, self.radius)
    }

    pub fn apply(&self, mask: &mut RawMask, center: RasterPoint) -> Option<Rect> {
        stamp(mask, center, self.radius)
    }
}
