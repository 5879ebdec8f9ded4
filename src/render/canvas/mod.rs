//! Canvas 2D drawing surface.
//!
//! Draws through the HTML Canvas 2D API via web-sys and lets the browser
//! handle scrolling natively over a content-sized spacer.

mod surface;

pub use surface::CanvasSurface;
