//! Line and cell pass tests against the recording renderers
//!
//! Boxes are built by hand so each pass is checked independently of the
//! measurer.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use canvasgrid::render::headless::{
    HorizontalLine, RecordingCellRenderer, RecordingLineRenderer, VerticalLine, VisibleArea,
};
use canvasgrid::render::{GridCellRenderer, GridLineRenderer};
use canvasgrid::{
    Alignment, BoundingBox, BoxKey, Column, GridState, HeaderStyleProps, RowStyleProps, Schema,
    VisibleBoundingBoxes,
};
use common::{row, viewport};
use serde_json::json;
use test_case::test_case;

fn header(key: &str, x: f64, width: f64, height: f64) -> BoundingBox {
    BoundingBox {
        key: BoxKey::Column(key.into()),
        x,
        y: 0.0,
        width,
        height,
    }
}

fn cell(row: usize, x: f64, y: f64, width: f64, height: f64) -> BoundingBox {
    BoundingBox {
        key: BoxKey::Row(row),
        x,
        y,
        width,
        height,
    }
}

// ============================================================================
// Line pass
// ============================================================================

fn line_state() -> GridState {
    let mut state = GridState::new();
    state.set_header_style(
        HeaderStyleProps {
            border_color: Some("red".into()),
            ..Default::default()
        }
        .into(),
    );
    state.set_row_style(
        RowStyleProps {
            border_color: Some("blue".into()),
            ..Default::default()
        }
        .into(),
    );
    state.set_viewport(viewport(0.0, 0.0, 200.0, 150.0));
    state
}

fn header_boxes() -> VisibleBoundingBoxes {
    VisibleBoundingBoxes {
        headers: vec![
            header("col-1", 0.0, 10.0, 10.0),
            header("col-2", 10.0, 30.0, 10.0),
        ],
        rows: Vec::new(),
    }
}

fn row_boxes(header_height: f64) -> VisibleBoundingBoxes {
    VisibleBoundingBoxes {
        headers: Vec::new(),
        rows: vec![
            cell(0, 0.0, header_height, 10.0, 10.0),
            cell(0, 10.0, header_height, 30.0, 10.0),
            cell(1, 0.0, header_height + 10.0, 10.0, 10.0),
            cell(1, 10.0, header_height + 10.0, 30.0, 10.0),
        ],
    }
}

#[test]
fn test_header_horizontal_lines_span_total_width() {
    let state = line_state();
    let mut lines = RecordingLineRenderer::default();
    GridLineRenderer::render(&state, &header_boxes(), &mut lines);

    assert_eq!(lines.line_colors[0], "red");
    assert_eq!(
        lines.horizontal_lines,
        vec![
            HorizontalLine {
                from_x: 0.0,
                to_x: 40.0,
                y: 0.0
            },
            HorizontalLine {
                from_x: 0.0,
                to_x: 40.0,
                y: 10.0
            },
        ]
    );
}

#[test]
fn test_header_vertical_lines_at_each_edge() {
    let state = line_state();
    let mut lines = RecordingLineRenderer::default();
    GridLineRenderer::render(&state, &header_boxes(), &mut lines);

    let expected: Vec<_> = [0.0, 10.0, 40.0]
        .iter()
        .map(|&x| VerticalLine {
            from_y: 0.0,
            to_y: 10.0,
            x,
        })
        .collect();
    assert_eq!(lines.vertical_lines, expected);
}

#[test]
fn test_row_horizontal_lines_at_bottom_edges() {
    let state = line_state();
    let header_height = state.header_style().height();
    let mut lines = RecordingLineRenderer::default();
    GridLineRenderer::render(&state, &row_boxes(header_height), &mut lines);

    assert_eq!(lines.line_colors[1], "blue");
    let ys: Vec<f64> = lines.horizontal_lines.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![header_height + 10.0, header_height + 20.0]);
    assert!(lines
        .horizontal_lines
        .iter()
        .all(|l| l.from_x == 0.0 && l.to_x == 40.0));
}

#[test]
fn test_row_partly_under_header_keeps_bottom_rule() {
    let state = line_state();
    let header_height = state.header_style().height();
    let boxes = VisibleBoundingBoxes {
        headers: Vec::new(),
        rows: vec![
            cell(0, 0.0, header_height - 5.0, 10.0, 10.0),
            cell(1, 0.0, header_height + 5.0, 10.0, 10.0),
        ],
    };
    let mut lines = RecordingLineRenderer::default();
    GridLineRenderer::render(&state, &boxes, &mut lines);

    let ys: Vec<f64> = lines.horizontal_lines.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![header_height + 5.0, header_height + 15.0]);
    assert_eq!(lines.vertical_lines.len(), 4);
}

#[test]
fn test_no_row_rule_on_header_edge() {
    let state = line_state();
    let header_height = state.header_style().height();
    let boxes = VisibleBoundingBoxes {
        headers: Vec::new(),
        rows: vec![cell(0, 0.0, header_height - 10.0, 10.0, 10.0)],
    };
    let mut lines = RecordingLineRenderer::default();
    GridLineRenderer::render(&state, &boxes, &mut lines);

    assert!(lines.horizontal_lines.is_empty());
    assert_eq!(lines.vertical_lines.len(), 2);
}

#[test]
fn test_row_vertical_lines_per_row() {
    let state = line_state();
    let h = state.header_style().height();
    let mut lines = RecordingLineRenderer::default();
    GridLineRenderer::render(&state, &row_boxes(h), &mut lines);

    let got: Vec<(f64, f64, f64)> = lines
        .vertical_lines
        .iter()
        .map(|l| (l.x, l.from_y, l.to_y))
        .collect();
    assert_eq!(
        got,
        vec![
            (0.0, h, h + 10.0),
            (10.0, h, h + 10.0),
            (40.0, h, h + 10.0),
            (0.0, h + 10.0, h + 20.0),
            (10.0, h + 10.0, h + 20.0),
            (40.0, h + 10.0, h + 20.0),
        ]
    );
}

#[test]
fn test_row_lines_clipped_below_header() {
    let state = line_state();
    let h = state.header_style().height();
    let mut lines = RecordingLineRenderer::default();
    GridLineRenderer::render(&state, &row_boxes(h), &mut lines);

    assert_eq!(
        lines.visible_areas,
        vec![VisibleArea {
            x: 0.0,
            y: h,
            width: 200.0,
            height: 150.0 - h
        }]
    );
    assert_eq!(lines.unset_count, 1);
}

#[test]
fn test_pinned_band_keeps_scrollable_lines_out() {
    let mut state = line_state();
    state.set_schema(Schema::new(vec![
        Column::new("col-1", "1", Alignment::Left),
        Column::new("col-2", "2", Alignment::Left),
        Column::new("col-3", "3", Alignment::Left),
    ]));
    state.set_fixed_column_count(1);
    // col-2 has scrolled 5px under the pinned column
    let boxes = VisibleBoundingBoxes {
        headers: vec![
            header("col-1", 0.0, 10.0, 10.0),
            header("col-2", 5.0, 10.0, 10.0),
            header("col-3", 15.0, 10.0, 10.0),
        ],
        rows: Vec::new(),
    };
    let mut lines = RecordingLineRenderer::default();
    GridLineRenderer::render(&state, &boxes, &mut lines);

    let xs: Vec<f64> = lines.vertical_lines.iter().map(|l| l.x).collect();
    assert_eq!(xs, vec![0.0, 10.0, 15.0, 25.0]);
}

// ============================================================================
// Cell pass
// ============================================================================

const PADDING: f64 = 10.0;

fn cell_state() -> GridState {
    let mut state = GridState::new();
    state.set_schema(Schema::new(vec![
        Column::new("col1", "Column 1", Alignment::Center),
        Column::new("col2", "Column 2", Alignment::Left),
        Column::new("col3", "Column 3", Alignment::Right),
    ]));
    state.set_row_style(
        RowStyleProps {
            horizontal_padding: Some(PADDING),
            ..Default::default()
        }
        .into(),
    );
    state.set_viewport(viewport(0.0, 0.0, 200.0, 150.0));
    state
}

fn three_headers() -> Vec<BoundingBox> {
    vec![
        header("col1", 0.0, 30.0, 10.0),
        header("col2", 30.0, 30.0, 10.0),
        header("col3", 60.0, 30.0, 10.0),
    ]
}

fn one_row_run() -> Vec<BoundingBox> {
    vec![
        cell(0, 0.0, 10.0, 30.0, 10.0),
        cell(0, 30.0, 10.0, 30.0, 10.0),
        cell(0, 60.0, 10.0, 30.0, 10.0),
    ]
}

#[test]
fn test_header_text_for_visible_headers() {
    let state = cell_state();
    let boxes = VisibleBoundingBoxes {
        headers: vec![
            header("col1", 0.0, 10.0, 10.0),
            header("col2", 10.0, 10.0, 10.0),
        ],
        rows: Vec::new(),
    };
    let mut cells = RecordingCellRenderer::default();
    GridCellRenderer::render(&state, &boxes, &mut cells);

    let texts: Vec<&str> = cells.texts.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Column 1", "Column 2"]);
    assert_eq!(cells.fills.len(), 2);
    assert_eq!(cells.fills[0].color, "red");
}

#[test_case(0, Alignment::Center, 15.0 ; "center")]
#[test_case(1, Alignment::Left, 30.0 + PADDING ; "left")]
#[test_case(2, Alignment::Right, 60.0 + 30.0 - PADDING ; "right")]
fn test_header_text_anchor(index: usize, align: Alignment, x: f64) {
    let state = cell_state();
    let boxes = VisibleBoundingBoxes {
        headers: three_headers(),
        rows: Vec::new(),
    };
    let mut cells = RecordingCellRenderer::default();
    GridCellRenderer::render(&state, &boxes, &mut cells);

    assert_eq!(cells.texts[index].align, align);
    assert_eq!(cells.texts[index].x, x);
    // middle of the default 40px header band
    assert_eq!(cells.texts[index].y, 12.0 + 8.0);
}

#[test]
fn test_row_text_for_visible_rows() {
    let mut state = cell_state();
    state.set_rows(vec![row(&[
        ("col1", "some value 1"),
        ("col2", "some value 2"),
        ("col3", "some value 3"),
    ])]);
    let boxes = VisibleBoundingBoxes {
        headers: three_headers(),
        rows: one_row_run(),
    };
    let mut cells = RecordingCellRenderer::default();
    GridCellRenderer::render(&state, &boxes, &mut cells);

    let texts: Vec<&str> = cells.texts[3..].iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["some value 1", "some value 2", "some value 3"]);
}

#[test_case(3, Alignment::Center, 15.0 ; "center")]
#[test_case(4, Alignment::Left, 30.0 + PADDING ; "left")]
#[test_case(5, Alignment::Right, 60.0 + 30.0 - PADDING ; "right")]
fn test_row_text_anchor(index: usize, align: Alignment, x: f64) {
    let mut state = cell_state();
    state.set_rows(vec![row(&[("col1", "a"), ("col2", "b"), ("col3", "c")])]);
    let boxes = VisibleBoundingBoxes {
        headers: three_headers(),
        rows: one_row_run(),
    };
    let mut cells = RecordingCellRenderer::default();
    GridCellRenderer::render(&state, &boxes, &mut cells);

    assert_eq!(cells.texts[index].align, align);
    assert_eq!(cells.texts[index].x, x);
    // box y + vertical padding + half the 16px font
    assert_eq!(cells.texts[index].y, 10.0 + 10.0 + 8.0);
}

#[test]
fn test_row_text_clipped_below_header() {
    let state = cell_state();
    let h = state.header_style().height();
    let mut cells = RecordingCellRenderer::default();
    GridCellRenderer::render(&state, &VisibleBoundingBoxes::default(), &mut cells);

    assert_eq!(
        cells.visible_areas,
        vec![VisibleArea {
            x: 0.0,
            y: h,
            width: 200.0,
            height: 150.0 - h
        }]
    );
    assert_eq!(cells.unset_count, 1);
}

#[test]
fn test_missing_value_renders_blank() {
    let mut state = cell_state();
    state.set_rows(vec![row(&[("col1", "only")])]);
    let boxes = VisibleBoundingBoxes {
        headers: three_headers(),
        rows: one_row_run(),
    };
    let mut cells = RecordingCellRenderer::default();
    GridCellRenderer::render(&state, &boxes, &mut cells);

    assert_eq!(cells.texts[3].text, "only");
    assert_eq!(cells.texts[4].text, "");
    assert_eq!(cells.texts[5].text, "");
}

#[test]
fn test_formatter_applied_to_row_values() {
    let mut state = cell_state();
    state.set_schema(Schema::new(vec![Column::new("n", "N", Alignment::Right)
        .with_formatter(|v| match v.as_f64() {
            Some(n) => format!("{n:.2}"),
            None => "-".to_string(),
        })]));
    let mut first = canvasgrid::Row::new();
    first.insert("n".into(), json!(1.5));
    state.set_rows(vec![first, canvasgrid::Row::new()]);
    let boxes = VisibleBoundingBoxes {
        headers: vec![header("n", 0.0, 50.0, 10.0)],
        rows: vec![cell(0, 0.0, 10.0, 50.0, 10.0), cell(1, 0.0, 20.0, 50.0, 10.0)],
    };
    let mut cells = RecordingCellRenderer::default();
    GridCellRenderer::render(&state, &boxes, &mut cells);

    assert_eq!(cells.texts[1].text, "1.50");
    assert_eq!(cells.texts[2].text, "-");
}

#[test]
fn test_row_fill_uses_row_background() {
    let mut state = cell_state();
    state.set_rows(vec![row(&[("col1", "a")])]);
    let boxes = VisibleBoundingBoxes {
        headers: three_headers(),
        rows: one_row_run(),
    };
    let mut cells = RecordingCellRenderer::default();
    GridCellRenderer::render(&state, &boxes, &mut cells);

    assert_eq!(cells.fills.len(), 6);
    assert!(cells.fills[3..].iter().all(|f| f.color == "#ffffff"));
    assert_eq!(cells.fonts[3].color, "#212529");
}
