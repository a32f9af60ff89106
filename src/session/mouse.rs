use crate::brush::{RasterPoint, ScreenPoint, screen_to_raster};
use crate::input::MouseButton;
use crate::util::Rect;
use log::debug;

use super::{EditSession, EditState};

impl EditSession {
    /// Processes a mouse button press.
    ///
    /// Only the primary button starts an erase gesture; other buttons just
    /// move the cursor ring.
    pub fn on_mouse_press(&mut self, button: MouseButton, point: ScreenPoint) -> bool {
        if button.starts_gesture() {
            self.on_press_at(point)
        } else {
            self.update_cursor(point);
            false
        }
    }

    /// Starts an erase gesture at `point`.
    ///
    /// Captures the recovery snapshot; the press itself does not stamp.
    /// Returns `false` when nothing is loaded or a gesture is already active.
    pub fn on_press_at(&mut self, point: ScreenPoint) -> bool {
        self.update_cursor(point);
        let EditState::Loaded { modified } = self.state else {
            return false;
        };

        self.store.begin_edit();
        self.modified_at_press = modified;
        self.gesture_stroked = false;
        self.state = EditState::Editing;
        debug!("Gesture started at {:?}", self.cursor);
        true
    }

    /// Processes pointer motion.
    ///
    /// While a gesture is active, stamps the brush at the mapped raster point
    /// and recomposes the overlay. Returns the raster region that was written.
    /// Outside a gesture only the cursor ring follows the pointer.
    pub fn on_drag_to(&mut self, point: ScreenPoint) -> Option<Rect> {
        let center = self.update_cursor(point);
        if self.state != EditState::Editing {
            return None;
        }

        let mask = self.store.current_mut()?;
        let dirty = self.brush.apply(mask, center);
        match dirty {
            Some(region) => {
                debug!(
                    "Stroke r={} at ({}, {}) touched {:?}",
                    self.brush.radius(),
                    center.x,
                    center.y,
                    region
                );
                self.gesture_stroked = true;
                self.recompose();
            }
            None => debug!("Stroke at ({}, {}) outside raster", center.x, center.y),
        }
        dirty
    }

    /// Ends the active gesture. Returns `false` when no gesture was active.
    pub fn on_release(&mut self) -> bool {
        if self.state != EditState::Editing {
            return false;
        }
        self.state = EditState::Loaded {
            modified: self.modified_at_press || self.gesture_stroked,
        };
        true
    }

    /// Restores the raster captured at the most recent press.
    ///
    /// During a gesture the session stays in `Editing`; later moves keep
    /// stamping on the restored raster. Returns `false` when there is nothing
    /// to recover.
    pub fn recover_current(&mut self) -> bool {
        if self.state == EditState::Unloaded || !self.store.recover() {
            return false;
        }

        self.gesture_stroked = false;
        if let EditState::Loaded { .. } = self.state {
            self.state = EditState::Loaded {
                modified: self.modified_at_press,
            };
        }
        self.recompose();
        debug!("Recovered pre-gesture mask");
        true
    }

    fn update_cursor(&mut self, point: ScreenPoint) -> RasterPoint {
        let center = screen_to_raster(point, &self.viewport);
        self.cursor = Some(center);
        center
    }
}
