//! Call-recording backend.
//!
//! Paints nothing; every context operation is appended to a log of
//! [`ContextCall`] values. Useful for asserting exact replay order and for
//! inspecting what a real context would receive.

use vecpaint_core::{Color, LineCap, LineJoin};

use crate::context::{CompositeOperation, DrawingContext, Gradient, SurfaceElement};
use crate::{BackendType, RenderResult};

use super::RenderBackend;

/// One recorded drawing-context call.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextCall {
    /// `beginPath()`
    BeginPath,
    /// `moveTo(x, y)`
    MoveTo(f64, f64),
    /// `lineTo(x, y)`
    LineTo(f64, f64),
    /// `bezierCurveTo(cp1x, cp1y, cp2x, cp2y, x, y)`
    BezierCurveTo([f64; 6]),
    /// `closePath()`
    ClosePath,
    /// `createLinearGradient(x0, y0, x1, y1)`
    CreateLinearGradient([f64; 4]),
    /// `fillStyle = "<color>"`
    SetFillStyle(String),
    /// `fillStyle = gradient`, with the gradient's stops at the time of the call.
    SetFillGradient(Vec<(f64, String)>),
    /// `fill()`
    Fill,
    /// `strokeStyle = "<color>"`
    SetStrokeStyle(String),
    /// `lineWidth = w`
    SetLineWidth(f64),
    /// `lineCap = cap`
    SetLineCap(LineCap),
    /// `lineJoin = join`
    SetLineJoin(LineJoin),
    /// `stroke()`
    Stroke,
    /// `clearRect(x, y, w, h)`
    ClearRect([f64; 4]),
    /// `translate(x, y)`
    Translate(f64, f64),
    /// `globalCompositeOperation = op`
    SetCompositeOperation(CompositeOperation),
}

/// Gradient that remembers its stops as serialized colors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedGradient {
    stops: Vec<(f64, String)>,
}

impl RecordedGradient {
    /// Stops added so far.
    #[must_use]
    pub fn stops(&self) -> &[(f64, String)] {
        &self.stops
    }
}

impl Gradient for RecordedGradient {
    fn add_color_stop(&mut self, offset: f64, color: &Color) -> RenderResult<()> {
        self.stops.push((offset, color.to_string()));
        Ok(())
    }
}

/// Drawing context that logs calls instead of painting.
#[derive(Debug, Default)]
pub struct RecordingContext {
    calls: Vec<ContextCall>,
}

impl RecordingContext {
    /// All calls in order.
    #[must_use]
    pub fn calls(&self) -> &[ContextCall] {
        &self.calls
    }

    /// Take the log, leaving it empty.
    pub fn take_calls(&mut self) -> Vec<ContextCall> {
        std::mem::take(&mut self.calls)
    }

    fn record(&mut self, call: ContextCall) {
        self.calls.push(call);
    }
}

impl DrawingContext for RecordingContext {
    type Gradient = RecordedGradient;

    fn begin_path(&mut self) {
        self.record(ContextCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(ContextCall::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.record(ContextCall::LineTo(x, y));
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.record(ContextCall::BezierCurveTo([cp1x, cp1y, cp2x, cp2y, x, y]));
    }

    fn close_path(&mut self) {
        self.record(ContextCall::ClosePath);
    }

    fn create_linear_gradient(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> RecordedGradient {
        self.record(ContextCall::CreateLinearGradient([x0, y0, x1, y1]));
        RecordedGradient::default()
    }

    fn set_fill_color(&mut self, color: &Color) {
        self.record(ContextCall::SetFillStyle(color.to_string()));
    }

    fn set_fill_gradient(&mut self, gradient: &RecordedGradient) {
        self.record(ContextCall::SetFillGradient(gradient.stops.clone()));
    }

    fn fill(&mut self) -> RenderResult<()> {
        self.record(ContextCall::Fill);
        Ok(())
    }

    fn set_stroke_color(&mut self, color: &Color) {
        self.record(ContextCall::SetStrokeStyle(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.record(ContextCall::SetLineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.record(ContextCall::SetLineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.record(ContextCall::SetLineJoin(join));
    }

    fn stroke(&mut self) -> RenderResult<()> {
        self.record(ContextCall::Stroke);
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(ContextCall::ClearRect([x, y, width, height]));
    }

    fn translate(&mut self, x: f64, y: f64) -> RenderResult<()> {
        self.record(ContextCall::Translate(x, y));
        Ok(())
    }

    fn set_composite_operation(&mut self, op: CompositeOperation) -> RenderResult<()> {
        self.record(ContextCall::SetCompositeOperation(op));
        Ok(())
    }
}

/// Element that only tracks its id and dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingElement {
    id: String,
    width: u32,
    height: u32,
}

impl SurfaceElement for RecordingElement {
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
    }
}

/// Backend producing [`RecordingElement`]/[`RecordingContext`] pairs.
#[derive(Debug, Clone, Copy)]
pub struct RecordingBackend {
    available: bool,
}

impl RecordingBackend {
    /// Create a recording backend that passes its probe.
    #[must_use]
    pub fn new() -> Self {
        Self { available: true }
    }

    /// Create a recording backend that fails its probe.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { available: false }
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for RecordingBackend {
    type Element = RecordingElement;
    type Context = RecordingContext;

    fn backend_type(&self) -> BackendType {
        BackendType::Recording
    }

    fn probe(&self) -> bool {
        self.available
    }

    fn create_surface(&self, id: &str) -> RenderResult<(RecordingElement, RecordingContext)> {
        let element = RecordingElement {
            id: id.to_string(),
            width: 0,
            height: 0,
        };
        Ok((element, RecordingContext::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_records_serialized_stops() {
        let mut ctx = RecordingContext::default();
        let mut gradient = ctx.create_linear_gradient(0.0, 1.0, 0.0, 2.0);
        gradient
            .add_color_stop(0.0, &Color::BLACK)
            .expect("stop");
        ctx.set_fill_gradient(&gradient);

        assert_eq!(
            ctx.take_calls(),
            vec![
                ContextCall::CreateLinearGradient([0.0, 1.0, 0.0, 2.0]),
                ContextCall::SetFillGradient(vec![(0.0, "rgba(0, 0, 0, 1)".to_string())]),
            ]
        );
        assert!(ctx.calls().is_empty());
    }

    #[test]
    fn probe_reflects_availability() {
        assert!(RecordingBackend::new().probe());
        assert!(!RecordingBackend::unavailable().probe());
    }
}
