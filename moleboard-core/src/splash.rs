//! Splash / attract animation
//!
//! While splash mode is active the panel shows the mole sprite instead of
//! the text labels, marching it across the panel in an endless loop. This
//! runs every frame, independent of the scroll cadence.

/// Sprite position past the leading edge at which it has fully left the
/// panel and wraps around.
pub const SPLASH_MIN_X: i32 = -55;

/// Re-entry coordinate after a wrap (the panel's far edge).
pub const SPLASH_REENTRY_X: i32 = 32;

/// Looping sprite animation state.
#[derive(Debug, Clone)]
pub struct SplashAnimation {
    /// Current sprite position along the march axis.
    pub x: i32,
}

impl Default for SplashAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashAnimation {
    pub fn new() -> Self {
        Self { x: 0 }
    }

    /// Advance one frame: one pixel of travel, wrapping at the edge.
    pub fn update(&mut self) {
        self.x -= 1;
        if self.x < SPLASH_MIN_X {
            self.x = SPLASH_REENTRY_X;
        }
    }
}
