//! Text labels
//!
//! The panel carries exactly two labels, one per player, created once at
//! startup and mutated in place for the life of the process. The P2 label is
//! rendered rotated 180 degrees so it reads correctly from the far side of
//! the cabinet.

use core::fmt;
use core::fmt::Write;

use heapless::String;

/// Maximum label text length.
///
/// Must hold the longest win banner plus its trailing gap, and an `unknown:`
/// echo of a full read chunk.
pub const TEXT_CAP: usize = 64;

/// P1 label color (green), 0xRRGGBB.
pub const P1_COLOR: u32 = 0x33FF55;

/// P2 label color (pink), 0xRRGGBB.
pub const P2_COLOR: u32 = 0xFF99FF;

/// Reading orientation of a label on the shared panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Faces the player on the near side.
    RightReading,
    /// Rotated 180 degrees, faces the player on the far side.
    UpsideDownReading,
}

/// Direction a label travels along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    /// Toward negative coordinates.
    Forward,
    /// Toward positive coordinates (mirror of the opposite-facing label).
    Reverse,
}

/// One scrolling text label.
#[derive(Debug, Clone)]
pub struct Label {
    text: String<TEXT_CAP>,
    /// Cross-axis position in pixels.
    pub x: i32,
    /// Scroll-axis position in pixels.
    pub y: i32,
    rest: (i32, i32),
    direction: ScrollDirection,
    orientation: Orientation,
    color: u32,
}

impl Label {
    /// Create a label at `position`, with `rest` as the pinned anchor used
    /// whenever scrolling is disabled.
    pub fn new(
        text: &str,
        position: (i32, i32),
        rest: (i32, i32),
        direction: ScrollDirection,
        orientation: Orientation,
        color: u32,
    ) -> Self {
        let mut label = Self {
            text: String::new(),
            x: position.0,
            y: position.1,
            rest,
            direction,
            orientation,
            color,
        };
        label.set_text(text);
        label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the label text, truncating at [`TEXT_CAP`].
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
    }

    /// Replace the label text with formatted output, truncating on overflow.
    pub fn set_text_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.text.clear();
        let _ = self.text.write_fmt(args);
    }

    /// Snap back to the fixed rest anchor.
    pub fn pin_to_rest(&mut self) {
        self.x = self.rest.0;
        self.y = self.rest.1;
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn color(&self) -> u32 {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> Label {
        Label::new(
            text,
            (8, -4),
            (8, -4),
            ScrollDirection::Forward,
            Orientation::RightReading,
            P1_COLOR,
        )
    }

    #[test]
    fn test_set_text_truncates_at_capacity() {
        let mut l = label("");
        let long: heapless::String<128> = core::iter::repeat('x').take(100).collect();
        l.set_text(&long);
        assert_eq!(l.text().len(), TEXT_CAP);
    }

    #[test]
    fn test_pin_to_rest_overrides_scroll_offset() {
        let mut l = label("Press Start      ");
        l.y = -37;
        l.pin_to_rest();
        assert_eq!((l.x, l.y), (8, -4));
    }

    #[test]
    fn test_set_text_fmt() {
        let mut l = label("");
        l.set_text_fmt(format_args!("Highscore: {}      ", 42));
        assert_eq!(l.text(), "Highscore: 42      ");
    }
}
