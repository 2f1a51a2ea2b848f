//! The host 2D drawing surface consumed by [`PathRenderer`](crate::PathRenderer).
//!
//! These traits cover exactly the slice of the browser
//! `CanvasRenderingContext2D` that path replay needs. Backends map them onto
//! a real context (web-sys), a software rasterizer (tiny-skia) or a call log.

use std::fmt;

use vecpaint_core::{Color, LineCap, LineJoin};

use crate::RenderResult;

/// Compositing mode for subsequent drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompositeOperation {
    /// New drawing goes on top of existing content.
    #[default]
    SourceOver,
    /// New drawing goes behind existing content.
    DestinationOver,
}

impl CompositeOperation {
    /// The `globalCompositeOperation` keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::DestinationOver => "destination-over",
        }
    }
}

impl fmt::Display for CompositeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A linear gradient created by a [`DrawingContext`].
pub trait Gradient {
    /// Add a color stop at `offset` in `0.0..=1.0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the context rejects the offset or color.
    fn add_color_stop(&mut self, offset: f64, color: &Color) -> RenderResult<()>;
}

/// Immediate-mode 2D drawing operations on a surface.
///
/// Path construction calls build the context's current path; `fill` and
/// `stroke` paint it with the current style. Coordinates are in user space,
/// offset by the accumulated [`translate`](DrawingContext::translate).
pub trait DrawingContext {
    /// Gradient object produced by this context.
    type Gradient: Gradient;

    /// Discard the current path and start a new one.
    fn begin_path(&mut self);

    /// Start a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Add a straight segment to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Add a cubic Bézier segment.
    #[allow(clippy::too_many_arguments)]
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);

    /// Connect the current point back to the subpath start.
    fn close_path(&mut self);

    /// Create a linear gradient from `(x0, y0)` to `(x1, y1)`.
    fn create_linear_gradient(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Self::Gradient;

    /// Use a flat color for subsequent fills.
    fn set_fill_color(&mut self, color: &Color);

    /// Use a gradient for subsequent fills.
    fn set_fill_gradient(&mut self, gradient: &Self::Gradient);

    /// Fill the current path.
    ///
    /// # Errors
    ///
    /// Returns an error if the context fails to paint.
    fn fill(&mut self) -> RenderResult<()>;

    /// Use a flat color for subsequent strokes.
    fn set_stroke_color(&mut self, color: &Color);

    /// Set the stroke width.
    fn set_line_width(&mut self, width: f64);

    /// Set the stroke cap.
    fn set_line_cap(&mut self, cap: LineCap);

    /// Set the stroke join.
    fn set_line_join(&mut self, join: LineJoin);

    /// Stroke the current path.
    ///
    /// # Errors
    ///
    /// Returns an error if the context fails to paint.
    fn stroke(&mut self) -> RenderResult<()>;

    /// Reset a rectangle to transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Move the origin by `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the context rejects the transform.
    fn translate(&mut self, x: f64, y: f64) -> RenderResult<()>;

    /// Set the compositing mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the context rejects the mode.
    fn set_composite_operation(&mut self, op: CompositeOperation) -> RenderResult<()>;
}

/// The display element that owns a surface's pixels.
///
/// Setting the size reallocates the pixel buffer, which clears it.
pub trait SurfaceElement {
    /// Element identifier.
    fn id(&self) -> String;

    /// Pixel width.
    fn width(&self) -> u32;

    /// Pixel height.
    fn height(&self) -> u32;

    /// Set the pixel dimensions.
    fn set_size(&mut self, width: u32, height: u32);
}
