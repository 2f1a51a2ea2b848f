//! WebAssembly bindings for the Canvas2D path renderer.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.

use vecpaint_core::Point;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::backend::canvas2d::Canvas2DBackend;
use crate::backend::RenderBackend;
use crate::{PathPass, PathRenderer, RenderError};

fn to_js(err: RenderError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Whether this environment can create `<canvas>` 2D surfaces.
#[wasm_bindgen(js_name = canvas2dAvailable)]
#[must_use]
pub fn canvas2d_available() -> bool {
    Canvas2DBackend::new().probe()
}

/// A `<canvas>` surface driven by path commands from JavaScript.
///
/// Methods return `undefined` rather than the surface, so calls do not chain:
/// an exported method cannot hand back a borrow of itself, and returning the
/// surface by value would invalidate the caller's handle. Issue each call as
/// its own statement.
#[wasm_bindgen]
pub struct WasmPathSurface {
    renderer: PathRenderer<Canvas2DBackend>,
    pass: Option<PathPass>,
}

#[wasm_bindgen]
impl WasmPathSurface {
    /// Create or adopt the canvas with `id` and size it.
    ///
    /// # Errors
    ///
    /// Returns an error if no 2D context is available.
    #[wasm_bindgen(constructor)]
    pub fn new(id: Option<String>, width: u32, height: u32) -> Result<WasmPathSurface, JsValue> {
        let renderer = PathRenderer::new(&Canvas2DBackend::new(), id.as_deref(), width, height)
            .map_err(to_js)?;
        Ok(Self {
            renderer,
            pass: None,
        })
    }

    /// Set the pixel dimensions, clearing the canvas.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    /// Erase the canvas.
    pub fn clear(&mut self) {
        self.renderer.clear();
    }

    /// Begin a new path, discarding any unfinished one.
    pub fn start(&mut self) {
        self.pass = Some(self.renderer.start());
    }

    /// Move to `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if called before `start`.
    #[wasm_bindgen(js_name = "move")]
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.pass()?.move_to(Point::new(x, y));
        Ok(())
    }

    /// Line to `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if called before `start`.
    pub fn line(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.pass()?.line_to(Point::new(x, y));
        Ok(())
    }

    /// Cubic Bézier through two control points to `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if called before `start`.
    #[allow(clippy::too_many_arguments)]
    pub fn bezier(
        &mut self,
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    ) -> Result<(), JsValue> {
        self.pass()?.bezier_to(
            Point::new(c1x, c1y),
            Point::new(c2x, c2y),
            Point::new(x, y),
        );
        Ok(())
    }

    /// Close the current subpath.
    ///
    /// # Errors
    ///
    /// Returns an error if called before `start`.
    pub fn join(&mut self) -> Result<(), JsValue> {
        self.pass()?.join();
        Ok(())
    }

    /// Paint the path with a JSON style descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if called before `start`, if the style is malformed,
    /// or if painting fails. A malformed style leaves the pass pending.
    pub fn end(&mut self, style_json: &str) -> Result<(), JsValue> {
        self.renderer
            .end_json(&mut self.pass, style_json)
            .map_err(to_js)?;
        Ok(())
    }

    /// The `<canvas>` element, for mounting in the page.
    #[wasm_bindgen(js_name = toElement)]
    #[must_use]
    pub fn to_element(&self) -> HtmlCanvasElement {
        self.renderer.to_element().as_html().clone()
    }

    fn pass(&mut self) -> Result<&mut PathPass, JsValue> {
        self.pass
            .as_mut()
            .ok_or_else(|| to_js(RenderError::NoActivePass))
    }
}
