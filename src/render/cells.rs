//! Cell pass: header backgrounds and labels, then row backgrounds and values.

use crate::render::CellRenderer;
use crate::state::GridState;
use crate::types::{BoundingBox, Column, VisibleBoundingBoxes};

/// Paints header and row cells for one set of visible boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridCellRenderer;

impl GridCellRenderer {
    pub fn render<R>(state: &GridState, boxes: &VisibleBoundingBoxes, renderer: &mut R)
    where
        R: CellRenderer + ?Sized,
    {
        let columns = visible_columns(state, &boxes.headers);
        let pinned = state.pinned_column_count();
        let pinned_right = boxes.pinned_right(pinned);

        render_header_cells(state, &boxes.headers, &columns, pinned, pinned_right, renderer);
        render_row_cells(state, &boxes.rows, &columns, pinned, pinned_right, renderer);
    }
}

/// Columns in header-box order, resolved by key.
fn visible_columns<'a>(state: &'a GridState, headers: &[BoundingBox]) -> Vec<Option<&'a Column>> {
    headers
        .iter()
        .map(|header| {
            let column = header.key.as_column().and_then(|key| state.schema().find(key));
            if column.is_none() {
                tracing::warn!(key = ?header.key, "header box has no matching schema column");
            }
            column
        })
        .collect()
}

fn render_header_cells<R>(
    state: &GridState,
    headers: &[BoundingBox],
    columns: &[Option<&Column>],
    pinned: usize,
    pinned_right: f64,
    renderer: &mut R,
) where
    R: CellRenderer + ?Sized,
{
    let style = state.header_style();
    let font = style.font();
    let padding = state.row_style().horizontal_padding;
    let text_y = style.vertical_padding + style.font_size / 2.0;

    let draw = |renderer: &mut R, header: &BoundingBox, column: &Column| {
        renderer.set_font(&font, &style.color);
        renderer.fill_cell(&style.background_color, header.x, header.y, header.width, header.height);
        renderer.render_text(
            &column.label,
            column.align.text_x(header.x, header.width, padding),
            text_y,
            column.align,
        );
    };

    let clip_scrollable = pinned > 0 && headers.len() > pinned;
    for (i, (header, column)) in headers.iter().zip(columns).enumerate() {
        if i == pinned && clip_scrollable {
            let viewport = state.viewport();
            renderer.set_visible_area(
                pinned_right,
                0.0,
                viewport.width - pinned_right,
                style.height(),
            );
        }
        if let Some(column) = column {
            draw(renderer, header, column);
        }
    }
    if clip_scrollable {
        renderer.unset_visible_area();
    }
}

fn render_row_cells<R>(
    state: &GridState,
    rows: &[BoundingBox],
    columns: &[Option<&Column>],
    pinned: usize,
    pinned_right: f64,
    renderer: &mut R,
) where
    R: CellRenderer + ?Sized,
{
    let style = state.row_style();
    let header_height = state.header_style().height();
    let viewport = state.viewport();
    let font = style.font();
    renderer.set_visible_area(0.0, header_height, viewport.width, viewport.height - header_height);

    let draw = |renderer: &mut R, cell: &BoundingBox, column: &Column| {
        let Some(row) = cell.key.as_row() else {
            return;
        };
        renderer.set_font(&font, &style.color);
        renderer.fill_cell(&style.background_color, cell.x, cell.y, cell.width, cell.height);
        renderer.render_text(
            &state.rows().cell_value(row, &column.key),
            column.align.text_x(cell.x, cell.width, style.horizontal_padding),
            cell.y + style.vertical_padding + style.font_size / 2.0,
            column.align,
        );
    };

    // Nth box of a row run belongs to the Nth visible column.
    let with_column = |i: usize| match columns.len() {
        0 => None,
        len => columns.get(i % len).copied().flatten().map(|c| (i % len, c)),
    };

    if pinned > 0 {
        for (i, cell) in rows.iter().enumerate() {
            if let Some((position, column)) = with_column(i) {
                if position < pinned {
                    draw(renderer, cell, column);
                }
            }
        }
        renderer.set_visible_area(
            pinned_right,
            header_height,
            viewport.width - pinned_right,
            viewport.height - header_height,
        );
    }
    for (i, cell) in rows.iter().enumerate() {
        if let Some((position, column)) = with_column(i) {
            if position >= pinned {
                draw(renderer, cell, column);
            }
        }
    }
    if pinned > 0 {
        renderer.unset_visible_area();
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
    use crate::render::headless::RecordingCellRenderer;
    use crate::types::{Alignment, BoxKey, Schema};

    fn header(key: &str, x: f64) -> BoundingBox {
        BoundingBox {
            key: BoxKey::Column(key.into()),
            x,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        }
    }

    #[test]
    fn test_unknown_header_key_is_skipped() {
        let mut state = GridState::new();
        state.set_schema(Schema::new(vec![Column::new("a", "A", Alignment::Left)]));
        let boxes = VisibleBoundingBoxes {
            headers: vec![header("a", 0.0), header("zzz", 10.0)],
            rows: Vec::new(),
        };
        let mut cells = RecordingCellRenderer::default();
        GridCellRenderer::render(&state, &boxes, &mut cells);
        assert_eq!(cells.texts.len(), 1);
        assert_eq!(cells.texts[0].text, "A");
    }

    #[test]
    fn test_rows_without_headers_draw_nothing() {
        let state = GridState::new();
        let boxes = VisibleBoundingBoxes {
            headers: Vec::new(),
            rows: vec![BoundingBox {
                key: BoxKey::Row(0),
                x: 0.0,
                y: 40.0,
                width: 10.0,
                height: 10.0,
            }],
        };
        let mut cells = RecordingCellRenderer::default();
        GridCellRenderer::render(&state, &boxes, &mut cells);
        assert!(cells.fills.is_empty());
        assert_eq!(cells.visible_areas.len(), 1);
        assert_eq!(cells.unset_count, 1);
    }

    #[test]
    fn test_pinned_scrollable_headers_are_clipped_right_of_band() {
        let mut state = GridState::new();
        state.set_width(100.0);
        state.set_schema(Schema::new(vec![
            Column::new("a", "A", Alignment::Left),
            Column::new("b", "B", Alignment::Left),
        ]));
        state.set_fixed_column_count(1);
        let boxes = VisibleBoundingBoxes {
            headers: vec![header("a", 0.0), header("b", 5.0)],
            rows: Vec::new(),
        };
        let mut cells = RecordingCellRenderer::default();
        GridCellRenderer::render(&state, &boxes, &mut cells);

        let clip = &cells.visible_areas[0];
        assert_eq!((clip.x, clip.y, clip.width), (10.0, 0.0, 90.0));
        assert_eq!(clip.height, state.header_style().height());
        // header clip plus row clip plus nested pinned row clip
        assert_eq!(cells.visible_areas.len(), 3);
        assert_eq!(cells.unset_count, 3);
    }
}
