//! Browser `<canvas>` backend.
//!
//! Drives a real `CanvasRenderingContext2D` through web-sys. Only compiled
//! with the `wasm` feature.

use vecpaint_core::{Color, LineCap, LineJoin};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::context::{CompositeOperation, DrawingContext, Gradient, SurfaceElement};
use crate::{BackendType, RenderError, RenderResult};

use super::RenderBackend;

fn js_error(action: &str, err: &JsValue) -> RenderError {
    RenderError::Context(format!("{action}: {err:?}"))
}

fn document() -> RenderResult<Document> {
    web_sys::window()
        .ok_or_else(|| RenderError::Surface("No window object".to_string()))?
        .document()
        .ok_or_else(|| RenderError::Surface("No document object".to_string()))
}

fn context_2d(canvas: &HtmlCanvasElement) -> RenderResult<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| js_error("Failed to get 2D context", &e))?
        .ok_or_else(|| RenderError::Surface("2D context not available".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| RenderError::Surface("Failed to cast to 2D context".to_string()))
}

/// Wrapper around a native `CanvasGradient`.
pub struct DomGradient(web_sys::CanvasGradient);

impl Gradient for DomGradient {
    fn add_color_stop(&mut self, offset: f64, color: &Color) -> RenderResult<()> {
        #[allow(clippy::cast_possible_truncation)]
        let offset = offset as f32;
        self.0
            .add_color_stop(offset, &color.to_string())
            .map_err(|e| js_error("addColorStop", &e))
    }
}

/// A browser 2D context.
pub struct DomContext {
    ctx: CanvasRenderingContext2d,
}

impl DrawingContext for DomContext {
    type Gradient = DomGradient;

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.ctx.bezier_curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn create_linear_gradient(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> DomGradient {
        DomGradient(self.ctx.create_linear_gradient(x0, y0, x1, y1))
    }

    fn set_fill_color(&mut self, color: &Color) {
        self.ctx.set_fill_style_str(&color.to_string());
    }

    fn set_fill_gradient(&mut self, gradient: &DomGradient) {
        self.ctx.set_fill_style_canvas_gradient(&gradient.0);
    }

    fn fill(&mut self) -> RenderResult<()> {
        self.ctx.fill();
        Ok(())
    }

    fn set_stroke_color(&mut self, color: &Color) {
        self.ctx.set_stroke_style_str(&color.to_string());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ctx.set_line_join(join.as_str());
    }

    fn stroke(&mut self) -> RenderResult<()> {
        self.ctx.stroke();
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn translate(&mut self, x: f64, y: f64) -> RenderResult<()> {
        self.ctx.translate(x, y).map_err(|e| js_error("translate", &e))
    }

    fn set_composite_operation(&mut self, op: CompositeOperation) -> RenderResult<()> {
        self.ctx
            .set_global_composite_operation(op.as_str())
            .map_err(|e| js_error("globalCompositeOperation", &e))
    }
}

/// A `<canvas>` element.
#[derive(Debug, Clone)]
pub struct DomCanvasElement(HtmlCanvasElement);

impl DomCanvasElement {
    /// The underlying DOM element.
    #[must_use]
    pub fn as_html(&self) -> &HtmlCanvasElement {
        &self.0
    }
}

impl SurfaceElement for DomCanvasElement {
    fn id(&self) -> String {
        self.0.id()
    }

    fn width(&self) -> u32 {
        self.0.width()
    }

    fn height(&self) -> u32 {
        self.0.height()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.0.set_width(width);
        self.0.set_height(height);
    }
}

/// Backend rendering into browser `<canvas>` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canvas2DBackend;

impl Canvas2DBackend {
    /// Create a new 2D canvas backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RenderBackend for Canvas2DBackend {
    type Element = DomCanvasElement;
    type Context = DomContext;

    fn backend_type(&self) -> BackendType {
        BackendType::Canvas2D
    }

    /// Create a detached canvas and check that it yields a 2D context.
    fn probe(&self) -> bool {
        let Ok(document) = document() else {
            return false;
        };
        document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .is_some_and(|canvas| context_2d(&canvas).is_ok())
    }

    fn create_surface(&self, id: &str) -> RenderResult<(DomCanvasElement, DomContext)> {
        let document = document()?;

        let canvas = match document.get_element_by_id(id) {
            Some(existing) => existing
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| RenderError::Surface(format!("Element '{id}' is not a canvas")))?,
            None => {
                let canvas = document
                    .create_element("canvas")
                    .map_err(|e| js_error("createElement", &e))?
                    .dyn_into::<HtmlCanvasElement>()
                    .map_err(|_| RenderError::Surface("Element is not a canvas".to_string()))?;
                canvas.set_id(id);
                canvas
            }
        };

        let ctx = context_2d(&canvas)?;
        Ok((DomCanvasElement(canvas), DomContext { ctx }))
    }
}
