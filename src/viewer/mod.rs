//! `GridView` - the JavaScript entry point.
//!
//! Owns a [`Grid`] drawing onto a [`CanvasSurface`] and wires the surface's
//! scroll host to [`Grid::on_scroll`]. Host objects (schema, rows, styles)
//! arrive as plain JS values and are decoded with serde-wasm-bindgen.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlDivElement, HtmlElement};

use crate::error::GridError;
use crate::grid::{scroll_shared, Grid};
use crate::render::CanvasSurface;
use crate::rows::Row;
use crate::types::{Column, HeaderStyleProps, RowStyleProps, Schema};

type SharedGrid = Rc<RefCell<Grid<CanvasSurface>>>;

fn scroll_left_f64(element: &HtmlDivElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollLeft"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or_else(|| f64::from(element.scroll_left()))
}

fn scroll_top_f64(element: &HtmlDivElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollTop"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or_else(|| f64::from(element.scroll_top()))
}

fn config_error(what: &str, err: impl std::fmt::Display) -> JsValue {
    GridError::Config(format!("{what}: {err}")).into()
}

/// Wrap a JS `valueFormatter(value) => string` callback.
fn js_formatter(function: Function) -> impl Fn(&Value) -> String {
    move |value: &Value| {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let arg = value.serialize(&serializer).unwrap_or(JsValue::NULL);
        match function.call1(&JsValue::NULL, &arg) {
            Ok(result) => result
                .as_string()
                .or_else(|| result.as_f64().map(|n| n.to_string()))
                .unwrap_or_default(),
            Err(err) => {
                tracing::warn!(?err, "valueFormatter threw");
                String::new()
            }
        }
    }
}

fn decode_schema(schema: &JsValue) -> Result<Schema, JsValue> {
    if !Array::is_array(schema) {
        return Err(GridError::Config("schema must be an array".to_string()).into());
    }
    let mut columns = Vec::new();
    for entry in Array::from(schema).iter() {
        let mut column: Column = serde_wasm_bindgen::from_value(entry.clone())
            .map_err(|e| config_error("schema entry", e))?;
        let formatter = Reflect::get(&entry, &JsValue::from_str("valueFormatter"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());
        if let Some(function) = formatter {
            column = column.with_formatter(js_formatter(function));
        }
        columns.push(column);
    }
    Ok(Schema::new(columns))
}

/// Canvas-backed virtualized grid exported to JavaScript
#[wasm_bindgen]
pub struct GridView {
    grid: SharedGrid,
    #[allow(dead_code)] // Kept alive for the scroll listener
    scroll_closure: Closure<dyn FnMut(web_sys::Event)>,
}

#[wasm_bindgen]
impl GridView {
    /// Create a grid inside `container`, sized to the container's client box.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, dpr: f64) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let surface = CanvasSurface::new(&container, dpr)?;
        let scroll_host = surface.scroll_host().clone();

        let mut grid = Grid::new(surface);
        grid.set_width(f64::from(container.client_width()))
            .set_height(f64::from(container.client_height()));
        let grid: SharedGrid = Rc::new(RefCell::new(grid));

        let weak_grid = Rc::downgrade(&grid);
        let host_for_scroll = scroll_host.clone();
        let scroll_closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let Some(grid) = weak_grid.upgrade() else {
                return;
            };
            scroll_shared(
                &grid,
                scroll_left_f64(&host_for_scroll),
                scroll_top_f64(&host_for_scroll),
            );
        }) as Box<dyn FnMut(web_sys::Event)>);
        scroll_host
            .add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref())
            .map_err(|_| GridError::Context("Failed to attach scroll listener".to_string()))?;

        Ok(GridView {
            grid,
            scroll_closure,
        })
    }

    /// Replace the schema: an array of `{key, label, align?, valueFormatter?}`.
    #[wasm_bindgen(js_name = "setSchema")]
    pub fn set_schema(&self, schema: JsValue) -> Result<(), JsValue> {
        let schema = decode_schema(&schema)?;
        self.grid.borrow_mut().set_schema(schema);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setRows")]
    pub fn set_rows(&self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<Row> =
            serde_wasm_bindgen::from_value(rows).map_err(|e| config_error("rows", e))?;
        self.grid.borrow_mut().set_rows(rows);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setHeaderStyle")]
    pub fn set_header_style(&self, style: JsValue) -> Result<(), JsValue> {
        let props: HeaderStyleProps = if style.is_undefined() || style.is_null() {
            HeaderStyleProps::default()
        } else {
            serde_wasm_bindgen::from_value(style).map_err(|e| config_error("headerStyle", e))?
        };
        self.grid.borrow_mut().set_header_style(props.into());
        Ok(())
    }

    #[wasm_bindgen(js_name = "setRowStyle")]
    pub fn set_row_style(&self, style: JsValue) -> Result<(), JsValue> {
        let props: RowStyleProps = if style.is_undefined() || style.is_null() {
            RowStyleProps::default()
        } else {
            serde_wasm_bindgen::from_value(style).map_err(|e| config_error("rowStyle", e))?
        };
        self.grid.borrow_mut().set_row_style(props.into());
        Ok(())
    }

    #[wasm_bindgen(js_name = "setWidth")]
    pub fn set_width(&self, width: f64) {
        self.grid.borrow_mut().set_width(width);
    }

    #[wasm_bindgen(js_name = "setHeight")]
    pub fn set_height(&self, height: f64) {
        self.grid.borrow_mut().set_height(height);
    }

    #[wasm_bindgen(js_name = "setFixedColumnCount")]
    pub fn set_fixed_column_count(&self, count: usize) {
        self.grid.borrow_mut().set_fixed_column_count(count);
    }

    #[wasm_bindgen(js_name = "onScroll")]
    pub fn on_scroll(&self, scroll_left: f64, scroll_top: f64) {
        self.grid.borrow_mut().on_scroll(scroll_left, scroll_top);
    }

    pub fn refresh(&self) {
        self.grid.borrow_mut().refresh();
    }

    #[wasm_bindgen(js_name = "contentWidth")]
    pub fn content_width(&self) -> f64 {
        self.grid.borrow().total_width()
    }

    #[wasm_bindgen(js_name = "contentHeight")]
    pub fn content_height(&self) -> f64 {
        self.grid.borrow().total_height()
    }

    /// Boxes from the last refresh as `{headers, rows}`.
    #[wasm_bindgen(js_name = "visibleBoundingBoxes")]
    pub fn visible_bounding_boxes(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.grid.borrow().visible_bounding_boxes())
            .map_err(|e| GridError::Render(e.to_string()).into())
    }
}
