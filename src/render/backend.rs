//! Drawing primitives consumed by the measurement and paint passes.
//!
//! Each capability is a small trait so tests can swap in a recording double
//! for exactly the part they exercise. [`DrawingSurface`] bundles all three
//! with the sizing calls the refresh pipeline needs.

use crate::types::Alignment;

/// Measures rendered text width in CSS pixels.
pub trait TextMeasurer {
    fn measure_text(&mut self, font: &str, text: &str) -> f64;
}

/// Stroked grid lines.
pub trait LineRenderer {
    fn set_line_color(&mut self, color: &str);

    fn set_line_width(&mut self, width: f64);

    fn render_horizontal_line(&mut self, from_x: f64, to_x: f64, y: f64);

    fn render_vertical_line(&mut self, from_y: f64, to_y: f64, x: f64);

    /// Clip subsequent drawing to a rectangle until [`Self::unset_visible_area`].
    /// Calls nest: each one saves the previous clip.
    fn set_visible_area(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn unset_visible_area(&mut self);
}

/// Filled cell backgrounds and cell text.
pub trait CellRenderer {
    fn set_font(&mut self, font: &str, color: &str);

    fn fill_cell(&mut self, color: &str, x: f64, y: f64, width: f64, height: f64);

    /// Draw text anchored at `(x, y)`, vertically centred on `y`.
    fn render_text(&mut self, text: &str, x: f64, y: f64, align: Alignment);

    fn set_visible_area(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn unset_visible_area(&mut self);
}

/// Everything a refresh needs from the host drawing surface.
pub trait DrawingSurface: TextMeasurer + LineRenderer + CellRenderer {
    /// Size the visible surface to the viewport and the scrollable extent to
    /// the full content size.
    fn resize(
        &mut self,
        viewport_width: f64,
        viewport_height: f64,
        content_width: f64,
        content_height: f64,
    );

    /// Clear the visible surface.
    fn clear(&mut self);
}
