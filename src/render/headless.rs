//! Off-screen drawing primitives.
//!
//! Recording doubles for each drawing trait, a deterministic text measurer
//! for layout dumps, and [`HeadlessSurface`] which combines them so the whole
//! refresh pipeline runs without a browser.

use std::collections::HashMap;

use crate::render::{CellRenderer, DrawingSurface, LineRenderer, TextMeasurer};
use crate::types::Alignment;

/// Text measurer returning preset widths per text.
#[derive(Debug, Clone, Default)]
pub struct StubTextMeasurer {
    widths: HashMap<String, f64>,
    default_width: f64,
    /// Every `(font, text)` pair measured, in call order
    pub calls: Vec<(String, String)>,
}

impl StubTextMeasurer {
    /// Measurer returning `default_width` for any text without a preset.
    pub fn new(default_width: f64) -> Self {
        Self {
            default_width,
            ..Self::default()
        }
    }

    pub fn with_width(mut self, text: impl Into<String>, width: f64) -> Self {
        self.set_width(text, width);
        self
    }

    pub fn set_width(&mut self, text: impl Into<String>, width: f64) {
        self.widths.insert(text.into(), width);
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Texts measured, in call order.
    pub fn measured_texts(&self) -> Vec<&str> {
        self.calls.iter().map(|(_, text)| text.as_str()).collect()
    }
}

impl TextMeasurer for StubTextMeasurer {
    fn measure_text(&mut self, font: &str, text: &str) -> f64 {
        self.calls.push((font.to_string(), text.to_string()));
        self.widths.get(text).copied().unwrap_or(self.default_width)
    }
}

/// Approximates text width from the font size in a CSS font shorthand.
///
/// Every character advances by `font_size * advance`. Good enough for layout
/// dumps where only relative widths matter.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceTextMeasurer {
    advance: f64,
}

impl MonospaceTextMeasurer {
    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceTextMeasurer {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for MonospaceTextMeasurer {
    fn measure_text(&mut self, font: &str, text: &str) -> f64 {
        text.chars().count() as f64 * font_size_px(font) * self.advance
    }
}

/// Pixel size from a font shorthand such as `"bold 14px Arial"`; 16 if absent.
pub fn font_size_px(font: &str) -> f64 {
    font.split_whitespace()
        .find_map(|part| part.strip_suffix("px")?.parse::<f64>().ok())
        .unwrap_or(16.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalLine {
    pub from_x: f64,
    pub to_x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerticalLine {
    pub from_y: f64,
    pub to_y: f64,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontCall {
    pub font: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillCall {
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCall {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub align: Alignment,
}

/// Records every line-drawing call.
#[derive(Debug, Clone, Default)]
pub struct RecordingLineRenderer {
    pub line_colors: Vec<String>,
    pub line_widths: Vec<f64>,
    pub horizontal_lines: Vec<HorizontalLine>,
    pub vertical_lines: Vec<VerticalLine>,
    pub visible_areas: Vec<VisibleArea>,
    pub unset_count: usize,
}

impl LineRenderer for RecordingLineRenderer {
    fn set_line_color(&mut self, color: &str) {
        self.line_colors.push(color.to_string());
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_widths.push(width);
    }

    fn render_horizontal_line(&mut self, from_x: f64, to_x: f64, y: f64) {
        self.horizontal_lines.push(HorizontalLine { from_x, to_x, y });
    }

    fn render_vertical_line(&mut self, from_y: f64, to_y: f64, x: f64) {
        self.vertical_lines.push(VerticalLine { from_y, to_y, x });
    }

    fn set_visible_area(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.visible_areas.push(VisibleArea {
            x,
            y,
            width,
            height,
        });
    }

    fn unset_visible_area(&mut self) {
        self.unset_count += 1;
    }
}

/// Records every cell-drawing call.
#[derive(Debug, Clone, Default)]
pub struct RecordingCellRenderer {
    pub fonts: Vec<FontCall>,
    pub fills: Vec<FillCall>,
    pub texts: Vec<TextCall>,
    pub visible_areas: Vec<VisibleArea>,
    pub unset_count: usize,
}

impl CellRenderer for RecordingCellRenderer {
    fn set_font(&mut self, font: &str, color: &str) {
        self.fonts.push(FontCall {
            font: font.to_string(),
            color: color.to_string(),
        });
    }

    fn fill_cell(&mut self, color: &str, x: f64, y: f64, width: f64, height: f64) {
        self.fills.push(FillCall {
            color: color.to_string(),
            x,
            y,
            width,
            height,
        });
    }

    fn render_text(&mut self, text: &str, x: f64, y: f64, align: Alignment) {
        self.texts.push(TextCall {
            text: text.to_string(),
            x,
            y,
            align,
        });
    }

    fn set_visible_area(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.visible_areas.push(VisibleArea {
            x,
            y,
            width,
            height,
        });
    }

    fn unset_visible_area(&mut self) {
        self.unset_count += 1;
    }
}

/// Surface-level events, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Resize {
        viewport_width: f64,
        viewport_height: f64,
        content_width: f64,
        content_height: f64,
    },
    Clear,
    /// Start of the cell pass (first `set_font` after a clear)
    Cells,
    /// Start of the line pass (first `set_line_color` after a clear)
    Lines,
}

/// A [`DrawingSurface`] that draws nothing and records everything.
#[derive(Debug, Clone)]
pub struct HeadlessSurface<M = StubTextMeasurer> {
    pub measurer: M,
    pub lines: RecordingLineRenderer,
    pub cells: RecordingCellRenderer,
    pub events: Vec<SurfaceEvent>,
}

impl<M: TextMeasurer + Default> Default for HeadlessSurface<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M: TextMeasurer> HeadlessSurface<M> {
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            lines: RecordingLineRenderer::default(),
            cells: RecordingCellRenderer::default(),
            events: Vec::new(),
        }
    }

    pub fn clear_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Clear))
            .count()
    }

    /// Most recent resize call, as `(viewport_w, viewport_h, content_w, content_h)`.
    pub fn last_resize(&self) -> Option<(f64, f64, f64, f64)> {
        self.events.iter().rev().find_map(|e| match *e {
            SurfaceEvent::Resize {
                viewport_width,
                viewport_height,
                content_width,
                content_height,
            } => Some((viewport_width, viewport_height, content_width, content_height)),
            _ => None,
        })
    }

    fn mark(&mut self, event: SurfaceEvent) {
        let started = self
            .events
            .iter()
            .rev()
            .take_while(|e| !matches!(e, SurfaceEvent::Clear))
            .any(|e| *e == event);
        if !started {
            self.events.push(event);
        }
    }
}

impl<M: TextMeasurer> TextMeasurer for HeadlessSurface<M> {
    fn measure_text(&mut self, font: &str, text: &str) -> f64 {
        self.measurer.measure_text(font, text)
    }
}

impl<M: TextMeasurer> LineRenderer for HeadlessSurface<M> {
    fn set_line_color(&mut self, color: &str) {
        self.mark(SurfaceEvent::Lines);
        self.lines.set_line_color(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.lines.set_line_width(width);
    }

    fn render_horizontal_line(&mut self, from_x: f64, to_x: f64, y: f64) {
        self.lines.render_horizontal_line(from_x, to_x, y);
    }

    fn render_vertical_line(&mut self, from_y: f64, to_y: f64, x: f64) {
        self.lines.render_vertical_line(from_y, to_y, x);
    }

    fn set_visible_area(&mut self, x: f64, y: f64, width: f64, height: f64) {
        LineRenderer::set_visible_area(&mut self.lines, x, y, width, height);
    }

    fn unset_visible_area(&mut self) {
        LineRenderer::unset_visible_area(&mut self.lines);
    }
}

impl<M: TextMeasurer> CellRenderer for HeadlessSurface<M> {
    fn set_font(&mut self, font: &str, color: &str) {
        self.mark(SurfaceEvent::Cells);
        self.cells.set_font(font, color);
    }

    fn fill_cell(&mut self, color: &str, x: f64, y: f64, width: f64, height: f64) {
        self.cells.fill_cell(color, x, y, width, height);
    }

    fn render_text(&mut self, text: &str, x: f64, y: f64, align: Alignment) {
        self.cells.render_text(text, x, y, align);
    }

    fn set_visible_area(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CellRenderer::set_visible_area(&mut self.cells, x, y, width, height);
    }

    fn unset_visible_area(&mut self) {
        CellRenderer::unset_visible_area(&mut self.cells);
    }
}

impl<M: TextMeasurer> DrawingSurface for HeadlessSurface<M> {
    fn resize(
        &mut self,
        viewport_width: f64,
        viewport_height: f64,
        content_width: f64,
        content_height: f64,
    ) {
        self.events.push(SurfaceEvent::Resize {
            viewport_width,
            viewport_height,
            content_width,
            content_height,
        });
    }

    /// Drops everything recorded by earlier paint passes.
    fn clear(&mut self) {
        self.lines = RecordingLineRenderer::default();
        self.cells = RecordingCellRenderer::default();
        self.events.push(SurfaceEvent::Clear);
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
    use test_case::test_case;

    #[test_case("normal 16px sans-serif", 16.0 ; "weight size family")]
    #[test_case("bold 12.5px Arial", 12.5 ; "fractional size")]
    #[test_case("Arial", 16.0 ; "no size")]
    fn test_font_size_px(font: &str, expected: f64) {
        assert_eq!(font_size_px(font), expected);
    }

    #[test]
    fn test_monospace_measurer_scales_with_font() {
        let mut measurer = MonospaceTextMeasurer::new(0.5);
        assert_eq!(measurer.measure_text("normal 10px mono", "abcd"), 20.0);
        assert_eq!(measurer.measure_text("normal 20px mono", ""), 0.0);
    }

    #[test]
    fn test_stub_measurer_records_calls() {
        let mut measurer = StubTextMeasurer::new(1.0).with_width("wide", 50.0);
        assert_eq!(measurer.measure_text("f", "wide"), 50.0);
        assert_eq!(measurer.measure_text("f", "other"), 1.0);
        assert_eq!(measurer.measured_texts(), vec!["wide", "other"]);
    }

    #[test]
    fn test_surface_clear_resets_recordings() {
        let mut surface = HeadlessSurface::new(StubTextMeasurer::new(0.0));
        surface.set_font("f", "c");
        surface.resize(1.0, 2.0, 3.0, 4.0);
        surface.clear();
        assert!(surface.cells.fonts.is_empty());
        assert_eq!(surface.clear_count(), 1);
        assert_eq!(surface.last_resize(), Some((1.0, 2.0, 3.0, 4.0)));
    }
}
