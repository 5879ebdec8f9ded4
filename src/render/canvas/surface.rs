//! Canvas 2D drawing surface.
//!
//! Builds this DOM structure inside the host container:
//! ```text
//! container (position: relative)
//! ├── canvas (position: absolute, pointer-events: none, z-index: 0, viewport-sized)
//! └── scroll_host (position: absolute, inset: 0, overflow: auto, z-index: 1)
//!     └── spacer (sized to the full content)
//! ```
//! The browser scrolls `scroll_host` natively; the canvas stays put and is
//! repainted for the new scroll offset.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlDivElement, HtmlElement};

use crate::error::{GridError, Result};
use crate::render::text_cache::{TextMeasureCache, TEXT_MEASURE_CACHE_CAP};
use crate::render::{CellRenderer, DrawingSurface, LineRenderer, TextMeasurer};
use crate::types::Alignment;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scroll_host: HtmlDivElement,
    spacer: HtmlDivElement,
    dpr: f64,
    viewport_width: f64,
    viewport_height: f64,
    /// Cache for text measurements (key: "font\ntext")
    text_measure_cache: TextMeasureCache,
}

impl CanvasSurface {
    /// Create the canvas and scroll host inside `container`.
    ///
    /// Fails if the document is unreachable or the canvas refuses a 2D context.
    pub fn new(container: &HtmlElement, dpr: f64) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GridError::Context("No document available".to_string()))?;

        let canvas = document
            .create_element("canvas")
            .map_err(|_| GridError::Context("Failed to create canvas".to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| GridError::Context("Failed to cast to HtmlCanvasElement".to_string()))?;

        let ctx = canvas
            .get_context("2d")
            .map_err(|_| GridError::Context("Failed to get 2d context".to_string()))?
            .ok_or_else(|| GridError::Context("No 2d context available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| {
                GridError::Context("Failed to cast to CanvasRenderingContext2d".to_string())
            })?;

        let scroll_host = create_div(&document)?;
        let spacer = create_div(&document)?;

        let container_style = container.style();
        if container_style
            .get_property_value("position")
            .unwrap_or_default()
            .is_empty()
        {
            let _ = container_style.set_property("position", "relative");
        }

        let canvas_style = canvas.style();
        let _ = canvas_style.set_property("position", "absolute");
        let _ = canvas_style.set_property("top", "0");
        let _ = canvas_style.set_property("left", "0");
        let _ = canvas_style.set_property("pointer-events", "none");
        let _ = canvas_style.set_property("z-index", "0");

        let host_style = scroll_host.style();
        let _ = host_style.set_property("position", "absolute");
        let _ = host_style.set_property("inset", "0");
        let _ = host_style.set_property("overflow", "auto");
        let _ = host_style.set_property("z-index", "1");
        let _ = host_style.set_property("background", "transparent");
        let _ = scroll_host.set_attribute("data-canvasgrid-scroll", "");

        let spacer_style = spacer.style();
        let _ = spacer_style.set_property("position", "absolute");
        let _ = spacer_style.set_property("top", "0");
        let _ = spacer_style.set_property("left", "0");

        container
            .append_child(&canvas)
            .map_err(|_| GridError::Context("Failed to attach canvas".to_string()))?;
        scroll_host
            .append_child(&spacer)
            .map_err(|_| GridError::Context("Failed to attach spacer".to_string()))?;
        container
            .append_child(&scroll_host)
            .map_err(|_| GridError::Context("Failed to attach scroll host".to_string()))?;

        Ok(Self {
            canvas,
            ctx,
            scroll_host,
            spacer,
            dpr: if dpr > 0.0 { dpr } else { 1.0 },
            viewport_width: 0.0,
            viewport_height: 0.0,
            text_measure_cache: TextMeasureCache::new(TEXT_MEASURE_CACHE_CAP),
        })
    }

    /// The element whose native scroll offsets drive the viewport.
    pub fn scroll_host(&self) -> &HtmlDivElement {
        &self.scroll_host
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Helper to get crisp pixel position for 1px lines
    fn crisp(x: f64) -> f64 {
        x.floor() + 0.5
    }

    fn stroke(&self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(x1, y1);
        self.ctx.line_to(x2, y2);
        self.ctx.stroke();
    }

    fn clip(&self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(x, y, width, height);
        self.ctx.clip();
    }
}

fn create_div(document: &Document) -> Result<HtmlDivElement> {
    document
        .create_element("div")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlDivElement>().ok())
        .ok_or_else(|| GridError::Context("Failed to create div".to_string()))
}

/// Device pixels for a CSS length, never negative.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn device_pixels(css: f64, dpr: f64) -> u32 {
    (css * dpr).max(0.0).round() as u32
}

impl TextMeasurer for CanvasSurface {
    fn measure_text(&mut self, font: &str, text: &str) -> f64 {
        let ctx = &self.ctx;
        self.text_measure_cache.get_or_measure(font, text, || {
            ctx.set_font(font);
            ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
        })
    }
}

impl LineRenderer for CanvasSurface {
    fn set_line_color(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn render_horizontal_line(&mut self, from_x: f64, to_x: f64, y: f64) {
        let y = Self::crisp(y);
        self.stroke(from_x, y, to_x, y);
    }

    fn render_vertical_line(&mut self, from_y: f64, to_y: f64, x: f64) {
        let x = Self::crisp(x);
        self.stroke(x, from_y, x, to_y);
    }

    fn set_visible_area(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.clip(x, y, width, height);
    }

    fn unset_visible_area(&mut self) {
        self.ctx.restore();
    }
}

impl CellRenderer for CanvasSurface {
    fn set_font(&mut self, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
    }

    fn fill_cell(&mut self, color: &str, x: f64, y: f64, width: f64, height: f64) {
        // Keep the text colour set by set_font.
        self.ctx.save();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
        self.ctx.restore();
    }

    fn render_text(&mut self, text: &str, x: f64, y: f64, align: Alignment) {
        self.ctx.set_text_align(align.as_css());
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn set_visible_area(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.clip(x, y, width, height);
    }

    fn unset_visible_area(&mut self) {
        self.ctx.restore();
    }
}

impl DrawingSurface for CanvasSurface {
    fn resize(
        &mut self,
        viewport_width: f64,
        viewport_height: f64,
        content_width: f64,
        content_height: f64,
    ) {
        self.viewport_width = viewport_width;
        self.viewport_height = viewport_height;

        let width = device_pixels(viewport_width, self.dpr);
        let height = device_pixels(viewport_height, self.dpr);
        if self.canvas.width() != width || self.canvas.height() != height {
            // Resizing the backing store resets the context, transform included.
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", viewport_width));
            let _ = style.set_property("height", &format!("{}px", viewport_height));
        }
        let _ = self
            .ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);

        let spacer_style = self.spacer.style();
        let _ = spacer_style.set_property("width", &format!("{}px", content_width));
        let _ = spacer_style.set_property("height", &format!("{}px", content_height));
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.viewport_width, self.viewport_height);
    }
}
