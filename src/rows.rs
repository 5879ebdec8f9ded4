//! Row storage and display-value resolution.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::types::{Schema, ValueFormatter};

/// A row record: column key to raw value.
pub type Row = Map<String, Value>;

/// Ordered row records plus the per-column formatters derived from the schema.
#[derive(Default, Clone)]
pub struct RowStore {
    rows: Vec<Row>,
    formatters: HashMap<String, ValueFormatter>,
}

impl RowStore {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            formatters: HashMap::new(),
        }
    }

    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    /// Rebuild the formatter map from a schema. Duplicate keys: the last one wins.
    pub fn set_schema(&mut self, schema: &Schema) {
        self.formatters = schema
            .columns()
            .iter()
            .filter_map(|c| {
                c.value_formatter
                    .as_ref()
                    .map(|f| (c.key.clone(), std::rc::Rc::clone(f)))
            })
            .collect();
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Raw value for a cell, if the row exists and has the key.
    pub fn raw_value(&self, row: usize, key: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(key))
    }

    /// Display string for a cell.
    ///
    /// A registered formatter always runs, receiving `Value::Null` when the row
    /// lacks the key. Without one, missing and null values display as blank.
    pub fn cell_value(&self, row: usize, key: &str) -> String {
        let raw = self.raw_value(row, key);
        match self.formatters.get(key) {
            Some(format) => format(raw.unwrap_or(&Value::Null)),
            None => raw.map(display_value).unwrap_or_default(),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

impl std::fmt::Debug for RowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowStore")
            .field("rows", &self.rows.len())
            .field("formatters", &self.formatters.keys().collect::<Vec<_>>())
            .finish()
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
    use crate::types::{Alignment, Column};
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("row fixtures must be objects"),
        }
    }

    #[test]
    fn test_row_count() {
        let mut store = RowStore::new(Vec::new());
        assert_eq!(store.row_count(), 0);
        store.set_rows(vec![Row::new()]);
        assert_eq!(store.row_count(), 1);
    }

    #[test]
    fn test_cell_value_raw() {
        let store = RowStore::new(vec![row(json!({"key": "value", "n": 42, "ok": true}))]);
        assert_eq!(store.cell_value(0, "key"), "value");
        assert_eq!(store.cell_value(0, "n"), "42");
        assert_eq!(store.cell_value(0, "ok"), "true");
    }

    #[test]
    fn test_missing_values_are_blank() {
        let store = RowStore::new(vec![row(json!({"a": null}))]);
        assert_eq!(store.cell_value(0, "a"), "");
        assert_eq!(store.cell_value(0, "b"), "");
        assert_eq!(store.cell_value(7, "a"), "");
    }

    #[test]
    fn test_formatter_applies() {
        let schema = Schema::new(vec![Column::new("price", "Price", Alignment::Right)
            .with_formatter(|v| format!("${:.2}", v.as_f64().unwrap_or(0.0)))]);
        let mut store = RowStore::new(vec![row(json!({"price": 3.5}))]);
        store.set_schema(&schema);
        assert_eq!(store.cell_value(0, "price"), "$3.50");
    }

    #[test]
    fn test_formatter_receives_null_for_missing_key() {
        let schema = Schema::new(vec![Column::new("a", "A", Alignment::Left)
            .with_formatter(|v| if v.is_null() { "-".into() } else { v.to_string() })]);
        let mut store = RowStore::new(vec![Row::new()]);
        store.set_schema(&schema);
        assert_eq!(store.cell_value(0, "a"), "-");
    }

    #[test]
    fn test_duplicate_key_last_formatter_wins() {
        let schema = Schema::new(vec![
            Column::new("a", "A1", Alignment::Left).with_formatter(|_| "first".into()),
            Column::new("a", "A2", Alignment::Left).with_formatter(|_| "second".into()),
        ]);
        let mut store = RowStore::new(vec![row(json!({"a": 1}))]);
        store.set_schema(&schema);
        assert_eq!(store.cell_value(0, "a"), "second");
    }

    #[test]
    fn test_replacing_schema_drops_formatters() {
        let mut store = RowStore::new(vec![row(json!({"a": 1}))]);
        store.set_schema(&Schema::new(vec![
            Column::new("a", "A", Alignment::Left).with_formatter(|_| "x".into())
        ]));
        store.set_schema(&Schema::new(vec![Column::new("a", "A", Alignment::Left)]));
        assert_eq!(store.cell_value(0, "a"), "1");
    }
}
