//! Drawing primitives and the two paint passes.
//!
//! This module provides:
//! - The drawing traits consumed by measurement and painting
//! - The grid line and grid cell passes
//! - A headless surface with recording doubles
//! - The Canvas 2D surface (wasm32 only)

pub mod backend;
pub mod cells;
pub mod headless;
pub mod lines;
pub mod text_cache;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use backend::{CellRenderer, DrawingSurface, LineRenderer, TextMeasurer};
pub use cells::GridCellRenderer;
pub use headless::{HeadlessSurface, MonospaceTextMeasurer, StubTextMeasurer};
pub use lines::GridLineRenderer;
pub use text_cache::{CachedTextMeasurer, TextMeasureCache};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
