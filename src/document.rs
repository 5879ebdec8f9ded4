//! JSON grid documents: schema, rows, styles and an initial viewport in one file.
//!
//! ```json
//! {
//!   "schema": [{"key": "name", "label": "Name", "align": "left"}],
//!   "rows": [{"name": "Ada"}],
//!   "rowStyle": {"horizontalPadding": 8},
//!   "viewport": {"width": 640, "height": 480},
//!   "fixedColumnCount": 1
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::layout::Viewport;
use crate::render::{DrawingSurface, HeadlessSurface, TextMeasurer};
use crate::rows::Row;
use crate::types::{BoundingBox, Column, HeaderStyleProps, RowStyleProps, Schema};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    pub schema: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub header_style: HeaderStyleProps,
    #[serde(default)]
    pub row_style: RowStyleProps,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub fixed_column_count: usize,
}

impl GridDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Read and validate a document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        let vp = &self.viewport;
        if [vp.x, vp.y, vp.width, vp.height]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(GridError::Config(format!(
                "viewport must be finite and non-negative, got {vp:?}"
            )));
        }
        Ok(())
    }

    /// Build a grid on `surface` with this document's state applied.
    ///
    /// Nothing is painted until the caller refreshes.
    pub fn into_grid<S: DrawingSurface>(self, surface: S) -> Grid<S> {
        let mut grid = Grid::new(surface);
        grid.set_schema(Schema::new(self.schema))
            .set_rows(self.rows)
            .set_header_style(self.header_style.into())
            .set_row_style(self.row_style.into())
            .set_viewport(self.viewport)
            .set_fixed_column_count(self.fixed_column_count);
        grid
    }

    /// Run one headless refresh and report the resulting layout.
    pub fn layout<M: TextMeasurer>(self, measurer: M) -> LayoutReport {
        let mut grid = self.into_grid(HeadlessSurface::new(measurer));
        grid.refresh();
        LayoutReport::from_grid(&grid)
    }
}

/// Visible boxes and content size after a refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub headers: Vec<BoundingBox>,
    pub rows: Vec<BoundingBox>,
    pub total_width: f64,
    pub total_height: f64,
}

impl LayoutReport {
    pub fn from_grid<S: DrawingSurface>(grid: &Grid<S>) -> Self {
        let visible = grid.visible_bounding_boxes();
        Self {
            headers: visible.headers.clone(),
            rows: visible.rows.clone(),
            total_width: grid.total_width(),
            total_height: grid.total_height(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
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
    use crate::render::headless::StubTextMeasurer;
    use crate::types::{Alignment, BoxKey};

    #[test]
    fn test_minimal_document() {
        let doc = GridDocument::from_json(r#"{"schema": [{"key": "a", "label": "A"}]}"#).unwrap();
        assert_eq!(doc.schema.len(), 1);
        assert_eq!(doc.schema[0].align, Alignment::Left);
        assert!(doc.rows.is_empty());
        assert_eq!(doc.fixed_column_count, 0);
    }

    #[test]
    fn test_full_document_into_grid() {
        let doc = GridDocument::from_json(
            r#"{
                "schema": [
                    {"key": "a", "label": "A", "align": "right"},
                    {"key": "b", "label": "B", "align": "center"}
                ],
                "rows": [{"a": 1, "b": "x"}],
                "headerStyle": {"backgroundColor": "navy"},
                "rowStyle": {"horizontalPadding": 4},
                "viewport": {"x": 0, "y": 0, "width": 320, "height": 200},
                "fixedColumnCount": 1
            }"#,
        )
        .unwrap();
        let grid = doc.into_grid(HeadlessSurface::new(StubTextMeasurer::new(0.0)));
        let state = grid.state();
        assert_eq!(state.schema().len(), 2);
        assert_eq!(state.rows().row_count(), 1);
        assert_eq!(state.header_style().background_color, "navy");
        assert_eq!(state.row_style().horizontal_padding, 4.0);
        assert_eq!(state.viewport().width, 320.0);
        assert_eq!(state.fixed_column_count(), 1);
    }

    #[test]
    fn test_missing_schema_is_json_error() {
        let err = GridDocument::from_json(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, GridError::Json(_)));
    }

    #[test]
    fn test_negative_viewport_is_config_error() {
        let err = GridDocument::from_json(
            r#"{"schema": [], "viewport": {"width": -1, "height": 10}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_layout_report() {
        let doc = GridDocument::from_json(
            r#"{
                "schema": [{"key": "a", "label": "A"}, {"key": "b", "label": "B"}],
                "rows": [{"a": "x"}],
                "rowStyle": {"horizontalPadding": 0},
                "viewport": {"width": 100, "height": 100}
            }"#,
        )
        .unwrap();
        let report = doc.layout(StubTextMeasurer::new(10.0));
        assert_eq!(report.headers.len(), 2);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].key, BoxKey::Row(0));
        assert_eq!(report.total_width, 20.0);
        assert_eq!(report.total_height, 40.0 + 36.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalWidth"], 20.0);
        assert_eq!(json["headers"][1]["key"], "b");
        assert_eq!(json["rows"][1]["key"], 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("canvasgrid-no-such-document.json");
        let err = GridDocument::from_path(&path).unwrap_err();
        assert!(matches!(err, GridError::Io(_)));
    }

    #[test]
    fn test_report_written_to_disk() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("canvasgrid-doc-{}.json", std::process::id()));
        let output = dir.join(format!("canvasgrid-report-{}.json", std::process::id()));
        fs::write(&input, r#"{"schema": [{"key": "a", "label": "A"}]}"#).unwrap();

        let report = GridDocument::from_path(&input)
            .unwrap()
            .layout(StubTextMeasurer::new(10.0));
        report.write_to(&output).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&output);

        assert_eq!(written["headers"][0]["key"], "a");
        assert!(written["totalWidth"].is_number());
    }

    #[test]
    fn test_unwritable_report_path_is_io_error() {
        let report = GridDocument::from_json(r#"{"schema": []}"#)
            .unwrap()
            .layout(StubTextMeasurer::new(0.0));
        let path = std::env::temp_dir()
            .join("canvasgrid-missing-dir")
            .join("nested")
            .join("report.json");
        assert!(matches!(report.write_to(&path), Err(GridError::Io(_))));
    }
}
