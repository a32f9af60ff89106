//! Generic pointer event types.

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (erases)
    Left,
    /// Right mouse button (unused by the editor)
    Right,
    /// Middle mouse button (unused by the editor)
    Middle,
}

impl MouseButton {
    /// Only the primary button starts an erase gesture.
    pub fn starts_gesture(self) -> bool {
        matches!(self, MouseButton::Left)
    }
}
