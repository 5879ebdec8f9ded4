//! The refresh pipeline: measure, resize, clear, paint.

use std::cell::RefCell;

use crate::layout::{CellMeasurer, Viewport};
use crate::render::{DrawingSurface, GridCellRenderer, GridLineRenderer};
use crate::rows::Row;
use crate::state::GridState;
use crate::types::{HeaderStyle, RowStyle, Schema, VisibleBoundingBoxes};

/// A virtualized grid drawing onto `S`.
///
/// Setters only replace state. Call [`Grid::refresh`] after setup and after
/// any setter; [`Grid::on_scroll`] refreshes on its own.
#[derive(Debug)]
pub struct Grid<S: DrawingSurface> {
    state: GridState,
    measurer: CellMeasurer,
    surface: S,
    visible: VisibleBoundingBoxes,
}

impl<S: DrawingSurface> Grid<S> {
    pub fn new(surface: S) -> Self {
        Self {
            state: GridState::new(),
            measurer: CellMeasurer::new(),
            surface,
            visible: VisibleBoundingBoxes::default(),
        }
    }

    pub fn set_schema(&mut self, schema: Schema) -> &mut Self {
        self.state.set_schema(schema);
        self
    }

    pub fn set_rows(&mut self, rows: Vec<Row>) -> &mut Self {
        self.state.set_rows(rows);
        self
    }

    pub fn set_header_style(&mut self, style: HeaderStyle) -> &mut Self {
        self.state.set_header_style(style);
        self
    }

    pub fn set_row_style(&mut self, style: RowStyle) -> &mut Self {
        self.state.set_row_style(style);
        self
    }

    pub fn set_width(&mut self, width: f64) -> &mut Self {
        self.state.set_width(width);
        self
    }

    pub fn set_height(&mut self, height: f64) -> &mut Self {
        self.state.set_height(height);
        self
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> &mut Self {
        self.state.set_viewport(viewport);
        self
    }

    pub fn set_fixed_column_count(&mut self, count: usize) -> &mut Self {
        self.state.set_fixed_column_count(count);
        self
    }

    /// Move the viewport to the host's scroll offsets and repaint.
    pub fn on_scroll(&mut self, scroll_left: f64, scroll_top: f64) {
        self.state.set_scroll(scroll_left, scroll_top);
        self.refresh();
    }

    /// Run one full measure, resize and paint cycle.
    ///
    /// Cells are painted before lines so rulings stay on top of the fills.
    pub fn refresh(&mut self) {
        let viewport = *self.state.viewport();
        let _span = tracing::debug_span!(
            "refresh",
            x = viewport.x,
            y = viewport.y,
            width = viewport.width,
            height = viewport.height
        )
        .entered();

        self.visible = self
            .measurer
            .compute_visible_bounding_boxes(&self.state, &mut self.surface);

        let content_width = self.measurer.total_width();
        let content_height = self.measurer.total_height(&self.state);
        self.surface
            .resize(viewport.width, viewport.height, content_width, content_height);
        self.surface.clear();

        GridCellRenderer::render(&self.state, &self.visible, &mut self.surface);
        GridLineRenderer::render(&self.state, &self.visible, &mut self.surface);

        tracing::debug!(
            headers = self.visible.headers.len(),
            cells = self.visible.rows.len(),
            content_width,
            content_height,
            "refreshed"
        );
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Boxes from the most recent refresh.
    pub fn visible_bounding_boxes(&self) -> &VisibleBoundingBoxes {
        &self.visible
    }

    pub fn total_width(&self) -> f64 {
        self.measurer.total_width()
    }

    pub fn total_height(&self) -> f64 {
        self.measurer.total_height(&self.state)
    }

    pub fn column_width(&self, key: &str) -> Option<f64> {
        self.measurer.column_width(key)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Scroll a grid shared with event handlers.
///
/// Returns `false` without repainting when the grid is already borrowed.
pub fn scroll_shared<S: DrawingSurface>(
    grid: &RefCell<Grid<S>>,
    scroll_left: f64,
    scroll_top: f64,
) -> bool {
    match grid.try_borrow_mut() {
        Ok(mut grid) => {
            grid.on_scroll(scroll_left, scroll_top);
            true
        }
        Err(_) => {
            tracing::debug!(scroll_left, scroll_top, "grid busy, scroll event dropped");
            false
        }
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
    use crate::render::headless::{HeadlessSurface, StubTextMeasurer, SurfaceEvent};
    use crate::types::{Alignment, Column};

    fn grid() -> Grid<HeadlessSurface> {
        let mut grid = Grid::new(HeadlessSurface::new(StubTextMeasurer::new(10.0)));
        grid.set_schema(Schema::new(vec![Column::new("a", "A", Alignment::Left)]))
            .set_width(200.0)
            .set_height(100.0);
        grid
    }

    #[test]
    fn test_setters_do_not_paint() {
        let grid = grid();
        assert!(grid.surface().events.is_empty());
        assert!(grid.visible_bounding_boxes().is_empty());
    }

    #[test]
    fn test_refresh_resizes_then_clears_then_paints() {
        let mut grid = grid();
        grid.refresh();
        let events = &grid.surface().events;
        assert!(matches!(events[0], SurfaceEvent::Resize { .. }));
        assert_eq!(events[1], SurfaceEvent::Clear);
        assert_eq!(events[2], SurfaceEvent::Cells);
        assert_eq!(events[3], SurfaceEvent::Lines);
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_on_scroll_refreshes() {
        let mut grid = grid();
        grid.on_scroll(0.0, 15.0);
        assert_eq!(grid.state().viewport().y, 15.0);
        assert_eq!(grid.surface().clear_count(), 1);
    }

    #[test]
    fn test_scroll_shared_skips_busy_grid() {
        let shared = RefCell::new(grid());

        let held = shared.borrow();
        assert!(!scroll_shared(&shared, 0.0, 15.0));
        assert_eq!(held.state().viewport().y, 0.0);
        assert!(held.surface().events.is_empty());
        drop(held);

        assert!(scroll_shared(&shared, 0.0, 15.0));
        let grid = shared.borrow();
        assert_eq!(grid.state().viewport().y, 15.0);
        assert_eq!(grid.surface().clear_count(), 1);
    }
}
