//! Layout: viewport geometry, the column width cache and the cell measurer.

mod measurer;
mod viewport;
mod width_cache;

pub use measurer::CellMeasurer;
pub use viewport::Viewport;
pub use width_cache::WidthCache;
