//! Viewport state: scroll offset plus visible window size.

use serde::{Deserialize, Serialize};

/// The visible window into the scrollable content.
///
/// `x`/`y` are content pixels already scrolled past; `width`/`height` are the
/// size of the window, header band included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Content y of the bottom edge of the visible window.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Convert a scrollable content x coordinate to screen x.
    pub fn to_screen_x(&self, x: f64) -> f64 {
        x - self.x
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_initial_scroll_zero() {
        let viewport = Viewport::default();
        assert_eq!(viewport.x, 0.0);
        assert_eq!(viewport.y, 0.0);
    }

    #[test]
    fn test_scroll_keeps_window_size() {
        let mut viewport = Viewport::new(0.0, 0.0, 300.0, 200.0);
        viewport.set_scroll(40.0, 60.0);
        assert_eq!(viewport, Viewport::new(40.0, 60.0, 300.0, 200.0));
        assert_eq!(viewport.bottom(), 260.0);
        assert_eq!(viewport.to_screen_x(50.0), 10.0);
    }
}
