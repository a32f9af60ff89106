//! Integer rectangle helper used for brush bounds and raster clipping.

/// Axis-aligned rectangle in raster pixels (inclusive min, exclusive max).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(
            min_x,
            min_y,
            max_x.saturating_sub(min_x),
            max_y.saturating_sub(min_y),
        )
    }

    pub fn max_x(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn max_y(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.max_y()
    }

    /// Returns the overlap of two rectangles, or `None` when they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        Self::from_min_max(
            self.x.max(other.x),
            self.y.max(other.y),
            self.max_x().min(other.max_x()),
            self.max_y().min(other.max_y()),
        )
    }

    /// Clips the rectangle to a `width` x `height` raster anchored at the origin.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Rect> {
        let bounds = Rect::new(
            0,
            0,
            width.min(i32::MAX as u32) as i32,
            height.min(i32::MAX as u32) as i32,
        )?;
        self.intersection(&bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_extent() {
        assert!(Rect::new(0, 0, 0, 5).is_none());
        assert!(Rect::new(0, 0, 5, -1).is_none());
        assert_eq!(Rect::new(1, 2, 3, 4).unwrap().area(), 12);
    }

    #[test]
    fn intersection_of_overlapping_rects() {
        let a = Rect::new(0, 0, 10, 10).unwrap();
        let b = Rect::new(5, -5, 10, 10).unwrap();
        assert_eq!(a.intersection(&b), Rect::new(5, 0, 5, 5));
    }

    #[test]
    fn disjoint_rects_have_no_intersection() {
        let a = Rect::new(0, 0, 4, 4).unwrap();
        let b = Rect::new(4, 0, 4, 4).unwrap();
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn clip_to_raster_bounds() {
        let rect = Rect::from_min_max(-3, 95, 8, 111).unwrap();
        let clipped = rect.clip_to(100, 100).unwrap();
        assert_eq!(clipped, Rect::new(0, 95, 8, 5).unwrap());
        assert!(clipped.contains(0, 99));
        assert!(!clipped.contains(8, 99));

        let outside = Rect::new(200, 200, 5, 5).unwrap();
        assert!(outside.clip_to(100, 100).is_none());
    }
}
