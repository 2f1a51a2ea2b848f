//! Path rendering onto a backend surface.
//!
//! ```text
//! start() ──► PathPass ──► move/line/bezier/join ──► end(pass, style)
//!                                                      │
//!                          ┌───────────────────────────┤
//!                          ▼                           ▼
//!               paint(commands, style)      shadow: translate(offset)
//!               replay → fill → outline       paint(commands, shadow style)
//!                                             translate(-offset)
//! ```
//!
//! Drawing calls only buffer [`PathCommand`]s; the native path is built when
//! `end` replays them. The shadow pass replays the same buffer a second time
//! behind the shape with the origin shifted by the shadow offset.

use vecpaint_core::{Color, Fill, FillMode, LineCap, LineJoin, Point, Style};

use crate::backend::RenderBackend;
use crate::command::{Bounds, PathCommand, PathPass};
use crate::context::{CompositeOperation, DrawingContext, Gradient, SurfaceElement};
use crate::{RenderError, RenderResult, RendererConfig};

/// Stroke parameters reused by the shadow pass.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OutlineMemo {
    width: Option<f64>,
    cap: Option<LineCap>,
    join: Option<LineJoin>,
}

#[derive(Debug, Clone, Copy)]
struct Outline {
    color: Color,
    memo: OutlineMemo,
}

/// What one replay of the command buffer paints.
#[derive(Debug, Clone, Copy, Default)]
struct PassPaint {
    fill: Option<Fill>,
    fill_mode: Option<FillMode>,
    outline: Option<Outline>,
}

impl PassPaint {
    fn from_style(style: &Style) -> Self {
        Self {
            fill: style.fill,
            fill_mode: style.fill_mode,
            outline: style.outline.map(|color| Outline {
                color,
                memo: OutlineMemo {
                    width: style.outline_width,
                    cap: style.outline_cap,
                    join: style.outline_join,
                },
            }),
        }
    }

    /// Silhouette paint: flat shadow color, stroked like the shape if it was.
    fn shadow(color: Color, memo: Option<OutlineMemo>) -> Self {
        Self {
            fill: Some(Fill::solid(color)),
            fill_mode: None,
            outline: memo.map(|memo| Outline { color, memo }),
        }
    }
}

/// A raster surface that renders declarative paths.
///
/// Owns the backend's display element and the 2D context bound to it.
pub struct PathRenderer<B: RenderBackend> {
    element: B::Element,
    context: B::Context,
}

impl<B: RenderBackend> PathRenderer<B> {
    /// Create a surface of `width`×`height` pixels.
    ///
    /// Adopts the element with `id`, or generates a unique id when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot provide a 2D context.
    pub fn new(backend: &B, id: Option<&str>, width: u32, height: u32) -> RenderResult<Self> {
        let id = id.map_or_else(
            || RendererConfig::default().generate_id(),
            ToString::to_string,
        );
        Self::create(backend, &id, width, height)
    }

    /// Create a surface with a generated id and the configured initial size.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot provide a 2D context.
    pub fn with_config(backend: &B, config: &RendererConfig) -> RenderResult<Self> {
        Self::create(backend, &config.generate_id(), config.width, config.height)
    }

    fn create(backend: &B, id: &str, width: u32, height: u32) -> RenderResult<Self> {
        let (element, context) = backend.create_surface(id)?;
        let mut renderer = Self { element, context };
        renderer.resize(width, height);
        tracing::debug!(
            "Created {:?} surface '{}' at {}x{}",
            backend.backend_type(),
            id,
            width,
            height
        );
        Ok(renderer)
    }

    /// Set the pixel dimensions. Existing pixel content is discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> &mut Self {
        self.element.set_size(width, height);
        tracing::debug!("Surface resized to {}x{}", width, height);
        self
    }

    /// Erase the whole surface to transparent.
    pub fn clear(&mut self) -> &mut Self {
        let width = f64::from(self.element.width());
        let height = f64::from(self.element.height());
        self.context.clear_rect(0.0, 0.0, width, height);
        self
    }

    /// Begin a new path. Drawing calls go to the returned pass.
    #[must_use = "the pass must be handed back to end() to paint"]
    pub fn start(&mut self) -> PathPass {
        self.context.begin_path();
        tracing::trace!("Path pass started");
        PathPass::new()
    }

    /// Replay the pass's commands and paint them with `style`.
    ///
    /// Fill, outline and shadow are applied in that order, each only when
    /// present in the style.
    ///
    /// # Errors
    ///
    /// Returns an error if a two-color fill has no usable gradient mode or
    /// bounds, or if the drawing context rejects a call. Painting stops at
    /// the first failure.
    pub fn end(&mut self, pass: PathPass, style: &Style) -> RenderResult<&mut Self> {
        let (commands, bounds) = pass.into_parts();
        tracing::trace!(commands = commands.len(), "Replaying path");

        let memo = self.paint(&commands, &bounds, &PassPaint::from_style(style))?;

        if let Some(color) = style.shadow {
            if let Some(blur) = style.shadow_blur {
                tracing::trace!(blur, "Shadow blur ignored; silhouette is drawn sharp");
            }
            let offset = style.shadow_offset.unwrap_or(Point::ZERO);
            self.cast_shadow(&commands, color, offset, memo)?;
        }

        Ok(self)
    }

    /// Paint the pass held in `pending` with a JSON style descriptor.
    ///
    /// The pass is taken only after the style parses, so a malformed
    /// descriptor leaves it pending for a retry.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Canvas`] for a malformed descriptor,
    /// [`RenderError::NoActivePass`] if `pending` is empty, or any error from
    /// [`end`](Self::end).
    pub fn end_json(
        &mut self,
        pending: &mut Option<PathPass>,
        style_json: &str,
    ) -> RenderResult<&mut Self> {
        let style = Style::from_json(style_json)?;
        let pass = pending.take().ok_or(RenderError::NoActivePass)?;
        self.end(pass, &style)
    }

    /// The display element, for mounting elsewhere.
    #[must_use]
    pub fn to_element(&self) -> &B::Element {
        &self.element
    }

    /// The 2D context bound to the element.
    #[must_use]
    pub fn context(&self) -> &B::Context {
        &self.context
    }

    /// Mutable access to the 2D context.
    pub fn context_mut(&mut self) -> &mut B::Context {
        &mut self.context
    }

    /// Replay `commands` and apply `paint`. Returns the outline memo if stroked.
    fn paint(
        &mut self,
        commands: &[PathCommand],
        bounds: &Bounds,
        paint: &PassPaint,
    ) -> RenderResult<Option<OutlineMemo>> {
        for command in commands {
            command.replay(&mut self.context);
        }

        if let Some(fill) = paint.fill {
            self.fill(fill, paint.fill_mode, bounds)?;
        }

        match paint.outline {
            Some(outline) => {
                self.outline(&outline)?;
                Ok(Some(outline.memo))
            }
            None => Ok(None),
        }
    }

    fn fill(&mut self, fill: Fill, mode: Option<FillMode>, bounds: &Bounds) -> RenderResult<()> {
        let Some(secondary) = fill.secondary else {
            self.context.set_fill_color(&fill.primary);
            return self.context.fill();
        };

        let missing = || RenderError::Gradient("path has no segments to span".to_string());
        let (x0, y0, x1, y1) = match mode {
            Some(FillMode::Vertical) => {
                let (min, max) = bounds.y_range().ok_or_else(missing)?;
                (0.0, min, 0.0, max)
            }
            Some(FillMode::Horizontal) => {
                let (min, max) = bounds.x_range().ok_or_else(missing)?;
                (min, 0.0, max, 0.0)
            }
            None => {
                return Err(RenderError::Gradient(
                    "two-color fill requires fillMode 'vertical' or 'horizontal'".to_string(),
                ))
            }
        };
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return Err(RenderError::Gradient(format!(
                "non-finite gradient extent ({x0}, {y0}) to ({x1}, {y1})"
            )));
        }

        let mut gradient = self.context.create_linear_gradient(x0, y0, x1, y1);
        gradient.add_color_stop(0.0, &fill.primary)?;
        gradient.add_color_stop(1.0, &secondary)?;
        self.context.set_fill_gradient(&gradient);
        self.context.fill()
    }

    fn outline(&mut self, outline: &Outline) -> RenderResult<()> {
        let memo = &outline.memo;
        self.context.set_stroke_color(&outline.color);
        if let Some(width) = memo.width {
            self.context.set_line_width(width);
        }
        if let Some(cap) = memo.cap {
            self.context.set_line_cap(cap);
        }
        if let Some(join) = memo.join {
            self.context.set_line_join(join);
        }
        self.context.stroke()
    }

    fn cast_shadow(
        &mut self,
        commands: &[PathCommand],
        color: Color,
        offset: Point,
        memo: Option<OutlineMemo>,
    ) -> RenderResult<()> {
        tracing::trace!(x = offset.x, y = offset.y, "Casting shadow");
        self.context
            .set_composite_operation(CompositeOperation::DestinationOver)?;
        self.context.translate(offset.x, offset.y)?;

        self.context.begin_path();
        self.paint(commands, &Bounds::default(), &PassPaint::shadow(color, memo))?;

        let back = offset.inverse();
        self.context.translate(back.x, back.y)?;
        self.context
            .set_composite_operation(CompositeOperation::SourceOver)
    }
}
