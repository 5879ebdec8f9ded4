//! canvasgrid - virtualized data grid for the web
//!
//! Lays out and paints tabular data onto a Canvas 2D surface via WebAssembly:
//! - Column widths measured from header labels and visible cell text
//! - Row and column virtualization driven by native scrolling
//! - Pinned (fixed) leading columns
//! - Pluggable line and cell renderers, with a headless surface for tests
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'canvasgrid';
//! await init();
//! const grid = new GridView(container, window.devicePixelRatio);
//! grid.setSchema([{ key: 'name', label: 'Name' }]);
//! grid.setRows([{ name: 'Ada' }]);
//! grid.refresh();
//! ```

pub mod document;
pub mod error;
pub mod grid;
pub mod layout;
pub mod render;
pub mod rows;
pub mod state;
pub mod types;

#[cfg(target_arch = "wasm32")]
mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;

pub use document::{GridDocument, LayoutReport};
pub use error::GridError;
pub use grid::Grid;
pub use layout::{CellMeasurer, Viewport, WidthCache};
pub use rows::{Row, RowStore};
pub use state::GridState;
pub use types::*;

/// Lay out a JSON grid document and return the visible boxes as JSON
///
/// Text is measured with a monospace approximation, so widths are
/// estimates of what a canvas would report.
///
/// # Errors
/// Returns an error if the document is invalid or cannot be serialized.
#[wasm_bindgen(js_name = "layoutJson")]
pub fn layout_json(json: &str) -> Result<String, JsValue> {
    let document = GridDocument::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let report = document.layout(render::MonospaceTextMeasurer::default());

    serde_json::to_string(&report)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
