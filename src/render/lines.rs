//! Grid line pass: header rulings, then row rulings clipped below the header.

use crate::render::LineRenderer;
use crate::state::GridState;
use crate::types::{BoundingBox, VisibleBoundingBoxes};

/// Draws the grid rulings for one set of visible boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridLineRenderer;

impl GridLineRenderer {
    pub fn render<R>(state: &GridState, boxes: &VisibleBoundingBoxes, renderer: &mut R)
    where
        R: LineRenderer + ?Sized,
    {
        let pinned = Pinned::new(state, boxes);
        render_header_lines(state, &boxes.headers, pinned, renderer);
        render_row_lines(state, &boxes.rows, pinned, renderer);
    }
}

/// Pinned band geometry used to keep scrollable rulings out of it.
#[derive(Debug, Clone, Copy)]
struct Pinned {
    count: usize,
    right: f64,
}

impl Pinned {
    fn new(state: &GridState, boxes: &VisibleBoundingBoxes) -> Self {
        let count = state.pinned_column_count();
        Self {
            count,
            right: boxes.pinned_right(count),
        }
    }

    /// Left and right edges of the box at `position` within its run.
    fn edges(self, position: usize, bounds: &BoundingBox) -> (f64, f64) {
        if self.count > 0 && position >= self.count {
            (bounds.x.max(self.right), bounds.right().max(self.right))
        } else {
            (bounds.x, bounds.right())
        }
    }
}

fn same_x(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < f64::EPSILON)
}

fn render_header_lines<R>(state: &GridState, headers: &[BoundingBox], pinned: Pinned, renderer: &mut R)
where
    R: LineRenderer + ?Sized,
{
    let style = state.header_style();
    renderer.set_line_color(&style.border_color);
    renderer.set_line_width(style.border_width);

    let mut last_x = None;
    for (i, header) in headers.iter().enumerate() {
        let (left, right) = pinned.edges(i, header);
        if !same_x(last_x, left) {
            renderer.render_vertical_line(0.0, header.height, left);
        }
        last_x = Some(left);

        if i + 1 == headers.len() {
            renderer.render_vertical_line(0.0, header.height, right);
            renderer.render_horizontal_line(0.0, right, 0.0);
            renderer.render_horizontal_line(0.0, right, header.height);
        }
    }
}

fn render_row_lines<R>(state: &GridState, rows: &[BoundingBox], pinned: Pinned, renderer: &mut R)
where
    R: LineRenderer + ?Sized,
{
    let style = state.row_style();
    let header_height = state.header_style().height();
    let viewport = state.viewport();
    renderer.set_line_color(&style.border_color);
    renderer.set_line_width(style.border_width);
    renderer.set_visible_area(0.0, header_height, viewport.width, viewport.height - header_height);

    let mut position = 0;
    let mut last_x = None;
    for (i, cell) in rows.iter().enumerate() {
        let (left, right) = pinned.edges(position, cell);
        if !same_x(last_x, left) {
            renderer.render_vertical_line(cell.y, cell.bottom(), left);
        }
        last_x = Some(left);
        position += 1;

        let run_ends = !matches!(rows.get(i + 1), Some(next) if next.key == cell.key);
        if run_ends {
            renderer.render_vertical_line(cell.y, cell.bottom(), right);
            if cell.bottom() > header_height {
                renderer.render_horizontal_line(0.0, right, cell.bottom());
            }
            position = 0;
            last_x = None;
        }
    }

    renderer.unset_visible_area();
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
    use crate::render::headless::{HorizontalLine, RecordingLineRenderer, VerticalLine};
    use crate::types::{Alignment, BoxKey, Column, Schema};

    fn header(key: &str, x: f64, width: f64) -> BoundingBox {
        BoundingBox {
            key: BoxKey::Column(key.into()),
            x,
            y: 0.0,
            width,
            height: 10.0,
        }
    }

    #[test]
    fn test_no_boxes_still_sets_styles_and_clip() {
        let state = GridState::new();
        let mut lines = RecordingLineRenderer::default();
        GridLineRenderer::render(&state, &VisibleBoundingBoxes::default(), &mut lines);
        assert_eq!(lines.line_colors, vec!["black", "black"]);
        assert!(lines.vertical_lines.is_empty());
        assert!(lines.horizontal_lines.is_empty());
        assert_eq!(lines.visible_areas.len(), 1);
        assert_eq!(lines.unset_count, 1);
    }

    #[test]
    fn test_pinned_clamps_scrollable_left_edge() {
        let mut state = GridState::new();
        state.set_schema(Schema::new(vec![
            Column::new("a", "A", Alignment::Left),
            Column::new("b", "B", Alignment::Left),
            Column::new("c", "C", Alignment::Left),
        ]));
        state.set_fixed_column_count(1);
        let boxes = VisibleBoundingBoxes {
            headers: vec![header("a", 0.0, 10.0), header("b", 5.0, 10.0), header("c", 15.0, 10.0)],
            rows: Vec::new(),
        };
        let mut lines = RecordingLineRenderer::default();
        GridLineRenderer::render(&state, &boxes, &mut lines);

        let xs: Vec<f64> = lines.vertical_lines.iter().map(|l| l.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 15.0, 25.0]);
        assert_eq!(
            lines.horizontal_lines[0],
            HorizontalLine {
                from_x: 0.0,
                to_x: 25.0,
                y: 0.0
            }
        );
        assert_eq!(
            lines.vertical_lines[0],
            VerticalLine {
                from_y: 0.0,
                to_y: 10.0,
                x: 0.0
            }
        );
    }
}
