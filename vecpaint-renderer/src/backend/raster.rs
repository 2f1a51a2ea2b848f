//! In-memory raster backend built on tiny-skia.
//!
//! The element and its context share one [`Pixmap`]. Resizing the element
//! reallocates the pixmap, which clears it, matching `<canvas>` semantics.
//! A zero-sized surface has no pixmap; painting on it is a no-op.

use std::cell::RefCell;
use std::rc::Rc;

use tiny_skia::{
    BlendMode, FillRule, GradientStop, Paint, PathBuilder, Pixmap, Rect, Shader, SpreadMode,
    Stroke, Transform,
};
use vecpaint_core::{Color, LineCap, LineJoin};

use crate::context::{CompositeOperation, DrawingContext, Gradient, SurfaceElement};
use crate::{BackendType, RenderError, RenderResult};

use super::RenderBackend;

type SharedPixmap = Rc<RefCell<Option<Pixmap>>>;

/// Canvas default miter limit.
const MITER_LIMIT: f32 = 10.0;

#[allow(clippy::cast_possible_truncation)]
fn to_f32(v: f64) -> f32 {
    v as f32
}

fn skia_color(color: &Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.alpha_u8())
}

/// A linear gradient in user space.
#[derive(Debug, Clone)]
pub struct RasterGradient {
    start: tiny_skia::Point,
    end: tiny_skia::Point,
    stops: Vec<GradientStop>,
}

impl Gradient for RasterGradient {
    fn add_color_stop(&mut self, offset: f64, color: &Color) -> RenderResult<()> {
        if !(0.0..=1.0).contains(&offset) {
            return Err(RenderError::Gradient(format!(
                "color stop offset {offset} outside 0..=1"
            )));
        }
        self.stops
            .push(GradientStop::new(to_f32(offset), skia_color(color)));
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum FillSource {
    Solid(tiny_skia::Color),
    Gradient(RasterGradient),
}

/// 2D context painting into a shared pixmap.
pub struct RasterContext {
    pixmap: SharedPixmap,
    path: PathBuilder,
    transform: Transform,
    fill: FillSource,
    stroke_color: tiny_skia::Color,
    stroke: Stroke,
    blend_mode: BlendMode,
}

impl RasterContext {
    fn new(pixmap: SharedPixmap) -> Self {
        Self {
            pixmap,
            path: PathBuilder::new(),
            transform: Transform::identity(),
            fill: FillSource::Solid(tiny_skia::Color::BLACK),
            stroke_color: tiny_skia::Color::BLACK,
            stroke: Stroke {
                miter_limit: MITER_LIMIT,
                ..Stroke::default()
            },
            blend_mode: BlendMode::SourceOver,
        }
    }

    /// Map a user-space point to device space with the current transform.
    fn map(&self, x: f64, y: f64) -> (f32, f32) {
        let mut points = [tiny_skia::Point::from_xy(to_f32(x), to_f32(y))];
        self.transform.map_points(&mut points);
        (points[0].x, points[0].y)
    }

    fn paint_for(&self, shader: Shader<'static>) -> Paint<'static> {
        Paint {
            shader,
            blend_mode: self.blend_mode,
            anti_alias: true,
            ..Paint::default()
        }
    }

    fn fill_shader(&self) -> Option<Shader<'static>> {
        match &self.fill {
            FillSource::Solid(color) => Some(Shader::SolidColor(*color)),
            FillSource::Gradient(gradient) => tiny_skia::LinearGradient::new(
                gradient.start,
                gradient.end,
                gradient.stops.clone(),
                SpreadMode::Pad,
                self.transform,
            ),
        }
    }
}

impl DrawingContext for RasterContext {
    type Gradient = RasterGradient;

    fn begin_path(&mut self) {
        self.path = PathBuilder::new();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.map(x, y);
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.map(x, y);
        self.path.line_to(x, y);
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        let (cp1x, cp1y) = self.map(cp1x, cp1y);
        let (cp2x, cp2y) = self.map(cp2x, cp2y);
        let (x, y) = self.map(x, y);
        self.path.cubic_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn create_linear_gradient(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> RasterGradient {
        RasterGradient {
            start: tiny_skia::Point::from_xy(to_f32(x0), to_f32(y0)),
            end: tiny_skia::Point::from_xy(to_f32(x1), to_f32(y1)),
            stops: Vec::new(),
        }
    }

    fn set_fill_color(&mut self, color: &Color) {
        self.fill = FillSource::Solid(skia_color(color));
    }

    fn set_fill_gradient(&mut self, gradient: &RasterGradient) {
        self.fill = FillSource::Gradient(gradient.clone());
    }

    fn fill(&mut self) -> RenderResult<()> {
        let Some(path) = self.path.clone().finish() else {
            return Ok(());
        };
        let Some(shader) = self.fill_shader() else {
            tracing::trace!("Gradient without usable stops; nothing filled");
            return Ok(());
        };
        let paint = self.paint_for(shader);

        if let Some(pixmap) = self.pixmap.borrow_mut().as_mut() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        Ok(())
    }

    fn set_stroke_color(&mut self, color: &Color) {
        self.stroke_color = skia_color(color);
    }

    fn set_line_width(&mut self, width: f64) {
        // Non-positive and non-finite widths are ignored, as in a browser.
        if width.is_finite() && width > 0.0 {
            self.stroke.width = to_f32(width);
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.stroke.line_cap = match cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        };
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.stroke.line_join = match join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        };
    }

    fn stroke(&mut self) -> RenderResult<()> {
        let Some(path) = self.path.clone().finish() else {
            return Ok(());
        };
        let paint = self.paint_for(Shader::SolidColor(self.stroke_color));

        if let Some(pixmap) = self.pixmap.borrow_mut().as_mut() {
            pixmap.stroke_path(&path, &paint, &self.stroke, Transform::identity(), None);
        }
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(rect) = Rect::from_xywh(to_f32(x), to_f32(y), to_f32(width), to_f32(height))
        else {
            return;
        };
        let paint = Paint {
            blend_mode: BlendMode::Clear,
            ..Paint::default()
        };
        if let Some(pixmap) = self.pixmap.borrow_mut().as_mut() {
            pixmap.fill_rect(rect, &paint, self.transform, None);
        }
    }

    fn translate(&mut self, x: f64, y: f64) -> RenderResult<()> {
        self.transform = self.transform.pre_translate(to_f32(x), to_f32(y));
        Ok(())
    }

    fn set_composite_operation(&mut self, op: CompositeOperation) -> RenderResult<()> {
        self.blend_mode = match op {
            CompositeOperation::SourceOver => BlendMode::SourceOver,
            CompositeOperation::DestinationOver => BlendMode::DestinationOver,
        };
        Ok(())
    }
}

/// Element owning the pixmap.
pub struct RasterElement {
    id: String,
    width: u32,
    height: u32,
    pixmap: SharedPixmap,
}

impl RasterElement {
    /// Straight-alpha RGBA of the pixel at `(x, y)`, if inside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let pixmap = self.pixmap.borrow();
        let color = pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Encode the surface as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface is empty or encoding fails.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let pixmap = self.pixmap.borrow();
        let pixmap = pixmap
            .as_ref()
            .ok_or_else(|| RenderError::Surface("cannot encode a zero-sized surface".to_string()))?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Surface(format!("PNG encoding failed: {e}")))
    }
}

impl SurfaceElement for RasterElement {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        *self.pixmap.borrow_mut() = Pixmap::new(width, height);
    }
}

/// Backend producing tiny-skia surfaces. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterBackend;

impl RasterBackend {
    /// Create a raster backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RenderBackend for RasterBackend {
    type Element = RasterElement;
    type Context = RasterContext;

    fn backend_type(&self) -> BackendType {
        BackendType::Raster
    }

    fn probe(&self) -> bool {
        Pixmap::new(1, 1).is_some()
    }

    fn create_surface(&self, id: &str) -> RenderResult<(RasterElement, RasterContext)> {
        let pixmap: SharedPixmap = Rc::new(RefCell::new(None));
        let element = RasterElement {
            id: id.to_string(),
            width: 0,
            height: 0,
            pixmap: Rc::clone(&pixmap),
        };
        Ok((element, RasterContext::new(pixmap)))
    }
}
