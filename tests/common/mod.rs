//! Common test utilities: state fixtures and row builders.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use canvasgrid::render::StubTextMeasurer;
use canvasgrid::{
    Alignment, Column, GridState, HeaderStyleProps, Row, RowStyleProps, Schema, Viewport,
};
use serde_json::Value;

pub const LABELS: [&str; 3] = ["column label 1", "column label 2", "column label 3"];
pub const KEYS: [&str; 3] = ["column-key-1", "column-key-2", "column-key-3"];

/// Three centered columns keyed `column-key-{1,2,3}`.
pub fn three_columns() -> Schema {
    Schema::new(
        KEYS.iter()
            .zip(LABELS)
            .map(|(key, label)| Column::new(*key, label, Alignment::Center))
            .collect(),
    )
}

/// Default header style, row style without horizontal padding.
pub fn three_column_state() -> GridState {
    let mut state = GridState::new();
    state.set_schema(three_columns());
    state.set_row_style(row_style(None, None, Some(0.0)));
    state
}

/// A measurer that reports 10px for each of the three labels and 0 for anything else.
pub fn label_measurer() -> StubTextMeasurer {
    LABELS
        .iter()
        .fold(StubTextMeasurer::new(0.0), |m, label| m.with_width(*label, 10.0))
}

pub fn header_style(font_size: f64, vertical_padding: f64) -> canvasgrid::HeaderStyle {
    HeaderStyleProps {
        font_size: Some(font_size),
        vertical_padding: Some(vertical_padding),
        ..Default::default()
    }
    .into()
}

pub fn row_style(
    font_size: Option<f64>,
    vertical_padding: Option<f64>,
    horizontal_padding: Option<f64>,
) -> canvasgrid::RowStyle {
    RowStyleProps {
        font_size,
        vertical_padding,
        horizontal_padding,
        ..Default::default()
    }
    .into()
}

pub fn viewport(x: f64, y: f64, width: f64, height: f64) -> Viewport {
    Viewport::new(x, y, width, height)
}

/// Build a row from `(key, value)` string pairs.
pub fn row(cells: &[(&str, &str)]) -> Row {
    cells
        .iter()
        .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
        .collect()
}

/// `count` copies of a row holding `c1`, `c2`, `c3` in the three columns.
pub fn c_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|_| row(&[(KEYS[0], "c1"), (KEYS[1], "c2"), (KEYS[2], "c3")]))
        .collect()
}
