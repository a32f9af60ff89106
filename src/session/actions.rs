use crate::brush::ScreenPoint;
use crate::input::Action;
use std::path::PathBuf;

use super::{EditSession, SessionError};

/// What applying an [`Action`] changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing visible changed
    Unchanged,
    /// Display state changed (raster, overlay, cursor, or view)
    Redraw,
    /// A different item is now displayed
    Reloaded,
    /// The current item was written to this path
    Saved(PathBuf),
}

impl EditSession {
    /// Applies one user-level action.
    ///
    /// Navigation at a catalog boundary is reported as [`ActionOutcome::Unchanged`];
    /// load and save failures are returned as errors with the session left as it was.
    pub fn apply(&mut self, action: &Action) -> Result<ActionOutcome, SessionError> {
        let outcome = match *action {
            Action::Press { x, y } => changed(self.on_press_at(ScreenPoint::new(x, y))),
            Action::Drag { x, y } => {
                self.on_drag_to(ScreenPoint::new(x, y));
                ActionOutcome::Redraw
            }
            Action::Release => changed(self.on_release()),
            Action::Recover => changed(self.recover_current()),
            Action::ToggleOverlay => {
                self.toggle_overlay_visible();
                ActionOutcome::Redraw
            }
            Action::Radius(radius) => {
                self.set_brush_radius(radius);
                ActionOutcome::Redraw
            }
            Action::Next => reloaded(self.advance()?),
            Action::Prev => reloaded(self.retreat()?),
            Action::Save => ActionOutcome::Saved(self.save_current()?),
            Action::Fit { width, height } => {
                self.set_view_size(width, height);
                ActionOutcome::Redraw
            }
            Action::Identity => {
                self.reset_view();
                ActionOutcome::Redraw
            }
            Action::Zoom { factor, x, y } => {
                self.viewport.zoom_about(factor, ScreenPoint::new(x, y));
                ActionOutcome::Redraw
            }
            Action::Pan { dx, dy } => {
                self.viewport.pan_by(dx, dy);
                ActionOutcome::Redraw
            }
        };
        Ok(outcome)
    }
}

fn changed(flag: bool) -> ActionOutcome {
    if flag {
        ActionOutcome::Redraw
    } else {
        ActionOutcome::Unchanged
    }
}

fn reloaded(flag: bool) -> ActionOutcome {
    if flag {
        ActionOutcome::Reloaded
    } else {
        ActionOutcome::Unchanged
    }
}
