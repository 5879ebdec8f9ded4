//! Lazy column measurement and visible bounding box computation.
//!
//! Only header labels and cell values that can land on screen are measured.
//! Pinned columns sit at their content position; scrollable columns are placed
//! at `content_x - viewport.x` and slide beneath the pinned band.

use std::ops::Range;

use crate::layout::WidthCache;
use crate::render::TextMeasurer;
use crate::state::GridState;
use crate::types::{BoundingBox, BoxKey, Column, VisibleBoundingBoxes};

#[derive(Debug, Default)]
pub struct CellMeasurer {
    cache: WidthCache,
    schema_generation: u64,
    style_generation: u64,
}

/// Where the scrollable columns start for the current viewport.
#[derive(Debug, Clone, Copy)]
struct ScrollStart {
    /// Index into the scrollable (non-pinned) columns
    index: usize,
    /// Content x of that column's left edge
    left: f64,
}

impl CellMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure whatever is newly visible and return the on-screen boxes.
    ///
    /// Headers come first for pinned columns, then for scrollable columns in
    /// schema order. Row boxes repeat the header run once per visible row.
    pub fn compute_visible_bounding_boxes<M>(
        &mut self,
        state: &GridState,
        measurer: &mut M,
    ) -> VisibleBoundingBoxes
    where
        M: TextMeasurer + ?Sized,
    {
        let _span = tracing::debug_span!(
            "compute_visible_bounding_boxes",
            columns = state.schema().len(),
            rows = state.rows().row_count()
        )
        .entered();

        self.sync(state);

        let columns = state.schema().columns();
        if columns.is_empty() {
            return VisibleBoundingBoxes::default();
        }

        let viewport = *state.viewport();
        let header_font = state.header_style().font();
        let row_font = state.row_style().font();
        let padding = state.row_style().horizontal_padding * 2.0;
        let rows = visible_rows(state);
        let (pinned, scrollable) = columns.split_at(state.pinned_column_count());

        let mut pinned_width = 0.0;
        for column in pinned {
            self.measure_label(column, &header_font, padding, measurer);
            for row in rows.clone() {
                self.measure_cell(state, row, column, &row_font, padding, measurer);
            }
            pinned_width += self.width(&column.key);
        }

        // Skip scrollable columns already known to be scrolled past.
        let mut start = ScrollStart {
            index: 0,
            left: pinned_width,
        };
        for column in scrollable {
            match self.cache.measured_width(&column.key) {
                Some(width) if viewport.to_screen_x(start.left + width) <= pinned_width => {
                    start.index += 1;
                    start.left += width;
                }
                _ => break,
            }
        }

        let mut left = start.left;
        for (index, column) in scrollable.iter().enumerate().skip(start.index) {
            if viewport.to_screen_x(left) >= viewport.width {
                break;
            }
            let width = self.measure_label(column, &header_font, padding, measurer);
            if index == start.index && viewport.to_screen_x(left + width) <= pinned_width {
                start.index += 1;
                start.left = left + width;
            }
            left += width;
        }

        if !rows.is_empty() {
            let mut left = start.left;
            for column in scrollable.iter().skip(start.index) {
                if viewport.to_screen_x(left) >= viewport.width {
                    break;
                }
                for row in rows.clone() {
                    self.measure_cell(state, row, column, &row_font, padding, measurer);
                }
                left += self.width(&column.key);
            }
        }

        let header_height = state.header_style().height();
        let mut headers = Vec::new();
        let mut x = 0.0;
        for column in pinned {
            let width = self.width(&column.key);
            headers.push(header_box(column, x, width, header_height));
            x += width;
        }
        let mut left = start.left;
        for column in scrollable.iter().skip(start.index) {
            let x = viewport.to_screen_x(left);
            if x >= viewport.width {
                break;
            }
            let width = self.width(&column.key);
            headers.push(header_box(column, x, width, header_height));
            left += width;
        }

        let row_height = state.row_style().height();
        let mut row_boxes = Vec::with_capacity(headers.len() * rows.len());
        for row in rows.clone() {
            let y = header_height + row as f64 * row_height - viewport.y;
            row_boxes.extend(headers.iter().map(|header| BoundingBox {
                key: BoxKey::Row(row),
                x: header.x,
                y,
                width: header.width,
                height: row_height,
            }));
        }

        tracing::trace!(
            first_row = rows.start,
            end_row = rows.end,
            first_column = pinned.len() + start.index,
            headers = headers.len(),
            "visible range"
        );

        VisibleBoundingBoxes {
            headers,
            rows: row_boxes,
        }
    }

    /// Sum of every cached column width.
    pub fn total_width(&self) -> f64 {
        self.cache.total()
    }

    pub fn total_height(&self, state: &GridState) -> f64 {
        state.header_style().height()
            + state.rows().row_count() as f64 * state.row_style().height()
    }

    pub fn column_width(&self, key: &str) -> Option<f64> {
        self.cache.width(key)
    }

    pub fn width_cache(&self) -> &WidthCache {
        &self.cache
    }

    fn sync(&mut self, state: &GridState) {
        if state.schema_generation() != self.schema_generation {
            tracing::debug!(
                cached = self.cache.len(),
                "schema replaced, clearing width cache"
            );
            self.cache.clear();
            self.schema_generation = state.schema_generation();
        }
        if state.style_generation() != self.style_generation {
            tracing::debug!("styles replaced, labels will be re-measured");
            self.cache.forget_labels();
            self.style_generation = state.style_generation();
        }
    }

    fn width(&self, key: &str) -> f64 {
        self.cache.width(key).unwrap_or(0.0)
    }

    fn measure_label<M>(&mut self, column: &Column, font: &str, padding: f64, measurer: &mut M) -> f64
    where
        M: TextMeasurer + ?Sized,
    {
        if let Some(width) = self.cache.measured_width(&column.key) {
            return width;
        }
        let width = text_width(measurer.measure_text(font, &column.label)) + padding;
        self.cache.mark_label_measured(&column.key);
        self.cache.record(&column.key, width)
    }

    fn measure_cell<M>(
        &mut self,
        state: &GridState,
        row: usize,
        column: &Column,
        font: &str,
        padding: f64,
        measurer: &mut M,
    ) -> f64
    where
        M: TextMeasurer + ?Sized,
    {
        let value = state.rows().cell_value(row, &column.key);
        let width = text_width(measurer.measure_text(font, &value)) + padding;
        self.cache.record(&column.key, width)
    }
}

fn header_box(column: &Column, x: f64, width: f64, height: f64) -> BoundingBox {
    BoundingBox {
        key: BoxKey::Column(column.key.clone()),
        x,
        y: 0.0,
        width,
        height,
    }
}

/// Whole pixels; garbage from the measurer counts as zero.
fn text_width(measured: f64) -> f64 {
    if measured.is_finite() {
        measured.floor().max(0.0)
    } else {
        0.0
    }
}

/// Row indices whose top edge falls above the bottom of the viewport.
///
/// The first row is the one containing `viewport.y`; a row whose bottom edge
/// equals `viewport.y` has already scrolled out.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn visible_rows(state: &GridState) -> Range<usize> {
    let row_height = state.row_style().height();
    let count = state.rows().row_count();
    if row_height <= 0.0 || count == 0 {
        return 0..0;
    }
    let viewport = state.viewport();
    let header_height = state.header_style().height();
    let start = (viewport.y / row_height).floor().max(0.0) as usize;
    let mut end = start;
    while end < count && header_height + end as f64 * row_height < viewport.bottom() {
        end += 1;
    }
    start..end
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
    use crate::layout::Viewport;
    use crate::render::headless::StubTextMeasurer;
    use crate::rows::Row;
    use crate::types::{Alignment, HeaderStyleProps, RowStyleProps, Schema};
    use serde_json::json;

    fn state(viewport: Viewport) -> GridState {
        let mut state = GridState::new();
        state.set_schema(Schema::new(vec![
            Column::new("a", "A", Alignment::Left),
            Column::new("b", "B", Alignment::Left),
        ]));
        state.set_row_style(
            RowStyleProps {
                horizontal_padding: Some(0.0),
                ..Default::default()
            }
            .into(),
        );
        state.set_viewport(viewport);
        state
    }

    fn rows(values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .map(|v| {
                let mut row = Row::new();
                row.insert("a".into(), json!(v));
                row
            })
            .collect()
    }

    #[test]
    fn test_empty_schema_yields_nothing() {
        let mut measurer = StubTextMeasurer::new(10.0);
        let mut cells = CellMeasurer::new();
        let boxes = cells.compute_visible_bounding_boxes(&GridState::new(), &mut measurer);
        assert!(boxes.is_empty());
        assert_eq!(measurer.call_count(), 0);
    }

    #[test]
    fn test_labels_not_remeasured() {
        let state = state(Viewport::new(0.0, 0.0, 100.0, 100.0));
        let mut measurer = StubTextMeasurer::new(10.0);
        let mut cells = CellMeasurer::new();
        cells.compute_visible_bounding_boxes(&state, &mut measurer);
        cells.compute_visible_bounding_boxes(&state, &mut measurer);
        assert_eq!(measurer.call_count(), 2);
    }

    #[test]
    fn test_padding_added_to_floored_measurement() {
        let mut state = state(Viewport::new(0.0, 0.0, 100.0, 100.0));
        state.set_row_style(
            RowStyleProps {
                horizontal_padding: Some(4.0),
                ..Default::default()
            }
            .into(),
        );
        let mut measurer = StubTextMeasurer::new(10.7);
        let mut cells = CellMeasurer::new();
        cells.compute_visible_bounding_boxes(&state, &mut measurer);
        assert_eq!(cells.column_width("a"), Some(18.0));
    }

    #[test]
    fn test_schema_replacement_clears_cache() {
        let mut state = state(Viewport::new(0.0, 0.0, 100.0, 100.0));
        let mut measurer = StubTextMeasurer::new(10.0);
        let mut cells = CellMeasurer::new();
        cells.compute_visible_bounding_boxes(&state, &mut measurer);
        assert_eq!(cells.total_width(), 20.0);

        state.set_schema(Schema::new(vec![Column::new("c", "C", Alignment::Left)]));
        cells.compute_visible_bounding_boxes(&state, &mut measurer);
        assert_eq!(cells.column_width("a"), None);
        assert_eq!(cells.total_width(), 10.0);
    }

    #[test]
    fn test_style_replacement_remeasures_labels_without_shrinking() {
        let mut state = state(Viewport::new(0.0, 0.0, 100.0, 100.0));
        let mut measurer = StubTextMeasurer::new(10.0);
        let mut cells = CellMeasurer::new();
        cells.compute_visible_bounding_boxes(&state, &mut measurer);

        state.set_header_style(
            HeaderStyleProps {
                font_size: Some(8.0),
                ..Default::default()
            }
            .into(),
        );
        let mut smaller = StubTextMeasurer::new(4.0);
        cells.compute_visible_bounding_boxes(&state, &mut smaller);
        assert_eq!(smaller.call_count(), 2);
        assert_eq!(cells.column_width("a"), Some(10.0));
    }

    #[test]
    fn test_row_boxes_follow_headers() {
        let mut state = state(Viewport::new(0.0, 0.0, 100.0, 200.0));
        state.set_rows(rows(&["x", "y"]));
        let mut measurer = StubTextMeasurer::new(10.0);
        let mut cells = CellMeasurer::new();
        let boxes = cells.compute_visible_bounding_boxes(&state, &mut measurer);

        assert_eq!(boxes.headers.len(), 2);
        assert_eq!(boxes.rows.len(), 4);
        for (i, row_box) in boxes.rows.iter().enumerate() {
            let header = &boxes.headers[i % 2];
            assert_eq!(row_box.x, header.x);
            assert_eq!(row_box.width, header.width);
            assert_eq!(row_box.key, BoxKey::Row(i / 2));
        }
    }

    #[test]
    fn test_total_height() {
        let mut state = state(Viewport::new(0.0, 0.0, 100.0, 100.0));
        state.set_rows(rows(&["x", "y", "z"]));
        let cells = CellMeasurer::new();
        // header 16 + 2*12, rows 16 + 2*10
        assert_eq!(cells.total_height(&state), 40.0 + 3.0 * 36.0);
    }

    #[test]
    fn test_non_positive_row_height_has_no_rows() {
        let mut state = state(Viewport::new(0.0, 0.0, 100.0, 100.0));
        state.set_row_style(
            RowStyleProps {
                font_size: Some(0.0),
                vertical_padding: Some(0.0),
                horizontal_padding: Some(0.0),
                ..Default::default()
            }
            .into(),
        );
        state.set_rows(rows(&["x"]));
        let mut measurer = StubTextMeasurer::new(10.0);
        let mut cells = CellMeasurer::new();
        let boxes = cells.compute_visible_bounding_boxes(&state, &mut measurer);
        assert_eq!(boxes.headers.len(), 2);
        assert!(boxes.rows.is_empty());
    }

    #[test]
    fn test_non_finite_measurement_counts_as_zero() {
        assert_eq!(text_width(f64::NAN), 0.0);
        assert_eq!(text_width(-3.0), 0.0);
        assert_eq!(text_width(9.9), 9.0);
    }
}
