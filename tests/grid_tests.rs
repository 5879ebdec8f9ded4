//! End-to-end refresh tests on the headless surface
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use canvasgrid::render::headless::SurfaceEvent;
use canvasgrid::render::{HeadlessSurface, MonospaceTextMeasurer, StubTextMeasurer};
use canvasgrid::{BoxKey, Grid, GridDocument};
use common::*;

fn grid(width: f64, height: f64) -> Grid<HeadlessSurface> {
    let mut grid = Grid::new(HeadlessSurface::new(
        label_measurer()
            .with_width("c1", 5.0)
            .with_width("c2", 5.0)
            .with_width("c3", 5.0),
    ));
    grid.set_schema(three_columns())
        .set_row_style(row_style(Some(10.0), Some(5.0), Some(0.0)))
        .set_header_style(header_style(10.0, 10.0))
        .set_rows(c_rows(50))
        .set_width(width)
        .set_height(height);
    grid
}

#[test]
fn test_refresh_reports_viewport_and_content_size() {
    let mut grid = grid(30.0, 100.0);
    grid.refresh();

    // header 30, 50 rows of 20
    assert_eq!(
        grid.surface().last_resize(),
        Some((30.0, 100.0, 30.0, 30.0 + 50.0 * 20.0))
    );
}

#[test]
fn test_refresh_paints_visible_cells_only() {
    let mut grid = grid(30.0, 100.0);
    grid.refresh();

    // rows at 30, 50, 70, 90 start above the 100px bottom
    let visible = grid.visible_bounding_boxes();
    assert_eq!(visible.headers.len(), 3);
    assert_eq!(visible.rows.len(), 4 * 3);

    let cells = &grid.surface().cells;
    assert_eq!(cells.texts.len(), 3 + 12);
    assert_eq!(cells.texts[3].text, "c1");
}

#[test]
fn test_each_refresh_starts_from_a_clear_surface() {
    let mut grid = grid(30.0, 100.0);
    grid.refresh();
    grid.refresh();

    let surface = grid.surface();
    assert_eq!(surface.clear_count(), 2);
    assert_eq!(surface.cells.texts.len(), 3 + 12);
    assert_eq!(
        surface.events[4..],
        [
            SurfaceEvent::Resize {
                viewport_width: 30.0,
                viewport_height: 100.0,
                content_width: 30.0,
                content_height: 1030.0,
            },
            SurfaceEvent::Clear,
            SurfaceEvent::Cells,
            SurfaceEvent::Lines,
        ]
    );
}

#[test]
fn test_scrolling_down_moves_the_row_window() {
    let mut grid = grid(30.0, 100.0);
    grid.refresh();
    grid.on_scroll(0.0, 200.0);

    let visible = grid.visible_bounding_boxes();
    let first = visible.rows[0].clone();
    assert_eq!(first.key, BoxKey::Row(10));
    assert_eq!(first.y, 30.0);
    assert_eq!(grid.state().viewport().y, 200.0);
}

#[test]
fn test_partly_scrolled_first_row_is_ruled_off() {
    let mut grid = grid(30.0, 100.0);
    grid.refresh();
    grid.on_scroll(0.0, 10.0);

    // row 0 spans 20..40, half hidden under the 30px header
    let first = grid.visible_bounding_boxes().rows[0].clone();
    assert_eq!(first.key, BoxKey::Row(0));
    assert_eq!((first.y, first.bottom()), (20.0, 40.0));

    let ys: Vec<f64> = grid
        .surface()
        .lines
        .horizontal_lines
        .iter()
        .map(|l| l.y)
        .collect();
    assert!(ys.contains(&40.0), "no separator under the first row: {ys:?}");
    assert!(ys.contains(&60.0));
    assert!(ys.iter().all(|y| *y == 0.0 || *y >= 30.0));
}

#[test]
fn test_scrolling_right_keeps_pinned_column() {
    let mut grid = grid(30.0, 100.0);
    grid.set_fixed_column_count(1);
    grid.refresh();
    grid.on_scroll(5.0, 0.0);

    let visible = grid.visible_bounding_boxes();
    assert_eq!(visible.headers[0].key, BoxKey::Column(KEYS[0].into()));
    assert_eq!(visible.headers[0].x, 0.0);
    assert_eq!(visible.headers[1].x, 5.0);

    // scrollable headers are clipped to the right of the pinned band
    let clip = &grid.surface().cells.visible_areas[0];
    assert_eq!((clip.x, clip.y, clip.width), (10.0, 0.0, 20.0));
}

#[test]
fn test_new_schema_resets_widths() {
    let mut grid = grid(30.0, 100.0);
    grid.refresh();
    assert_eq!(grid.column_width(KEYS[0]), Some(10.0));

    grid.set_schema(canvasgrid::Schema::new(vec![canvasgrid::Column::new(
        "other",
        "column label 1",
        canvasgrid::Alignment::Left,
    )]));
    grid.refresh();
    assert_eq!(grid.column_width(KEYS[0]), None);
    assert_eq!(grid.total_width(), 10.0);
}

#[test]
fn test_empty_grid_refreshes_cleanly() {
    let mut grid = Grid::new(HeadlessSurface::new(StubTextMeasurer::new(10.0)));
    grid.set_width(100.0).set_height(100.0);
    grid.refresh();

    assert!(grid.visible_bounding_boxes().is_empty());
    assert_eq!(grid.surface().clear_count(), 1);
    assert!(grid.surface().cells.texts.is_empty());
    assert!(grid.surface().lines.vertical_lines.is_empty());
}

#[test]
fn test_document_layout_with_monospace_text() {
    let doc = GridDocument::from_json(
        r#"{
            "schema": [
                {"key": "name", "label": "Name"},
                {"key": "city", "label": "City", "align": "right"}
            ],
            "rows": [{"name": "Ada Lovelace", "city": "London"}],
            "viewport": {"width": 640, "height": 480}
        }"#,
    )
    .unwrap();
    let report = doc.layout(MonospaceTextMeasurer::default());

    // 12 chars x 9.6px = 115.2 -> 115, plus 15px padding on each side
    assert_eq!(report.headers[0].width, 145.0);
    // "London" 57.6 -> 57 beats "City" 38.4 -> 38
    assert_eq!(report.headers[1].width, 87.0);
    assert_eq!(report.headers[1].x, 145.0);
    assert_eq!(report.total_width, 232.0);
}

#[test]
fn test_layout_json_entry_point() {
    let json = canvasgrid::layout_json(
        r#"{"schema": [{"key": "a", "label": "AB"}], "viewport": {"width": 100, "height": 100}}"#,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["headers"][0]["key"], "a");
    assert!(value["rows"].as_array().unwrap().is_empty());
    // 2 chars x 9.6px -> 19, plus 30px padding
    assert_eq!(value["totalWidth"], 49.0);
}
