//! 8-bit RGB color type and the named palette used by configuration.

/// An 8-bit RGB color, matching the channel layout of [`RawMask`](super::RawMask).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels in raster order.
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Overlay highlight color and the default for `overlay.highlight_color`.
pub const GREEN: Rgb = Rgb::new(0, 255, 0);

pub const RED: Rgb = Rgb::new(255, 0, 0);

pub const BLUE: Rgb = Rgb::new(0, 0, 255);

pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

pub const ORANGE: Rgb = Rgb::new(255, 128, 0);

pub const PINK: Rgb = Rgb::new(255, 0, 255);

/// Export foreground.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Background: the value every erased pixel is forced to.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Maps color name strings to [`Rgb`] values (case-insensitive).
///
/// # Supported Names
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Rgb> {
    match name.trim().to_ascii_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(name_to_color("Green"), Some(GREEN));
        assert_eq!(name_to_color(" BLACK "), Some(BLACK));
        assert_eq!(name_to_color("teal"), None);
    }

    #[test]
    fn highlight_is_pure_green() {
        assert_eq!(GREEN.channels(), [0, 255, 0]);
        assert_eq!(Rgb::from([0, 255, 0]), GREEN);
    }
}
