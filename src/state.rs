//! Grid state: the single owner of schema, rows, viewport and styles.
//!
//! Setters only replace data; nothing is recomputed here. Measurement and
//! painting read the state through shared references during a refresh.

use crate::layout::Viewport;
use crate::rows::{Row, RowStore};
use crate::types::{HeaderStyle, RowStyle, Schema};

#[derive(Debug, Default)]
pub struct GridState {
    schema: Schema,
    rows: RowStore,
    viewport: Viewport,
    header_style: HeaderStyle,
    row_style: RowStyle,
    fixed_column_count: usize,
    /// Bumped on every schema replacement
    schema_generation: u64,
    /// Bumped on every header or row style replacement
    style_generation: u64,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_schema(&mut self, schema: Schema) {
        self.rows.set_schema(&schema);
        self.schema = schema;
        self.schema_generation += 1;
    }

    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows.set_rows(rows);
    }

    pub fn set_header_style(&mut self, style: HeaderStyle) {
        self.header_style = style;
        self.style_generation += 1;
    }

    pub fn set_row_style(&mut self, style: RowStyle) {
        self.row_style = style;
        self.style_generation += 1;
    }

    pub fn set_width(&mut self, width: f64) {
        self.viewport.width = width;
    }

    pub fn set_height(&mut self, height: f64) {
        self.viewport.height = height;
    }

    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.viewport.set_scroll(x, y);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Number of leading columns excluded from horizontal scrolling.
    pub fn set_fixed_column_count(&mut self, count: usize) {
        self.fixed_column_count = count;
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn header_style(&self) -> &HeaderStyle {
        &self.header_style
    }

    pub fn row_style(&self) -> &RowStyle {
        &self.row_style
    }

    pub fn fixed_column_count(&self) -> usize {
        self.fixed_column_count
    }

    /// Pinned columns actually present in the schema.
    pub fn pinned_column_count(&self) -> usize {
        self.fixed_column_count.min(self.schema.len())
    }

    pub fn schema_generation(&self) -> u64 {
        self.schema_generation
    }

    pub fn style_generation(&self) -> u64 {
        self.style_generation
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
    use crate::types::{Alignment, Column, RowStyleProps};

    #[test]
    fn test_setters_replace_viewport_fields() {
        let mut state = GridState::new();
        state.set_width(300.0);
        state.set_height(200.0);
        state.set_scroll(10.0, 20.0);
        assert_eq!(*state.viewport(), Viewport::new(10.0, 20.0, 300.0, 200.0));
    }

    #[test]
    fn test_generations_bump_on_replacement() {
        let mut state = GridState::new();
        assert_eq!(state.schema_generation(), 0);
        state.set_schema(Schema::new(vec![Column::new("a", "A", Alignment::Left)]));
        state.set_schema(Schema::default());
        assert_eq!(state.schema_generation(), 2);

        state.set_row_style(RowStyleProps::default().into());
        state.set_header_style(HeaderStyle::default());
        assert_eq!(state.style_generation(), 2);

        state.set_rows(Vec::new());
        state.set_width(10.0);
        assert_eq!(state.schema_generation(), 2);
        assert_eq!(state.style_generation(), 2);
    }

    #[test]
    fn test_schema_formatters_reach_row_store() {
        let mut state = GridState::new();
        let mut row = Row::new();
        row.insert("a".into(), serde_json::json!(1));
        state.set_rows(vec![row]);
        state.set_schema(Schema::new(vec![
            Column::new("a", "A", Alignment::Left).with_formatter(|v| format!("#{v}"))
        ]));
        assert_eq!(state.rows().cell_value(0, "a"), "#1");
    }

    #[test]
    fn test_pinned_column_count_is_bounded_by_schema() {
        let mut state = GridState::new();
        state.set_fixed_column_count(3);
        state.set_schema(Schema::new(vec![Column::new("a", "A", Alignment::Left)]));
        assert_eq!(state.fixed_column_count(), 3);
        assert_eq!(state.pinned_column_count(), 1);
    }
}
