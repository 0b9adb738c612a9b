//! Panel surface trait

use crate::label::Label;

/// Errors from presenting a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Communication error with the panel hardware
    Communication,
    /// Scene element fell outside the drawable area
    OutOfBounds,
}

/// What the panel should show this frame.
#[derive(Debug, Clone, Copy)]
pub enum Scene<'a> {
    /// The two player labels.
    Labels { p1: &'a Label, p2: &'a Label },
    /// The attract-mode sprite at the given march-axis position.
    Splash { x: i32 },
}

/// A presentable pixel surface.
///
/// Implementations own composition and refresh: glyph rendering, the P2
/// label's 180-degree rotation, and sprite blitting all happen behind this
/// trait. The core only decides what to show and where.
pub trait PanelSurface {
    /// Panel size in pixels, (width, height).
    ///
    /// The width is the extent of the scroll axis and the splash march axis;
    /// the driver uses it as the wrap re-entry edge.
    fn dimensions(&self) -> (i32, i32);

    /// Compose and present one scene.
    fn present(&mut self, scene: Scene<'_>) -> Result<(), SurfaceError>;
}
