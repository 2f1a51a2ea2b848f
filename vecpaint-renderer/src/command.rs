//! Buffered path commands and the per-pass accumulation state.

use vecpaint_core::Point;

use crate::context::DrawingContext;

/// One primitive path operation awaiting replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight segment.
    LineTo(Point),
    /// Cubic Bézier segment.
    BezierTo {
        /// First control point.
        c1: Point,
        /// Second control point.
        c2: Point,
        /// Segment end point.
        end: Point,
    },
    /// Close the current subpath.
    ClosePath,
}

impl PathCommand {
    /// The 2D context operation this command replays as.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MoveTo(_) => "moveTo",
            Self::LineTo(_) => "lineTo",
            Self::BezierTo { .. } => "bezierCurveTo",
            Self::ClosePath => "closePath",
        }
    }

    /// The numeric arguments passed to [`name`](Self::name), in call order.
    #[must_use]
    pub fn arguments(&self) -> Vec<f64> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => vec![p.x, p.y],
            Self::BezierTo { c1, c2, end } => vec![c1.x, c1.y, c2.x, c2.y, end.x, end.y],
            Self::ClosePath => Vec::new(),
        }
    }

    /// Issue this command against a drawing context.
    pub fn replay<C: DrawingContext + ?Sized>(&self, ctx: &mut C) {
        match *self {
            Self::MoveTo(p) => ctx.move_to(p.x, p.y),
            Self::LineTo(p) => ctx.line_to(p.x, p.y),
            Self::BezierTo { c1, c2, end } => {
                ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
            }
            Self::ClosePath => ctx.close_path(),
        }
    }
}

/// Coordinates collected for gradient extents.
///
/// Holds every line/bézier endpoint and control point in insertion order.
/// This is not a geometric bounding box: a lone move-to never contributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounds {
    /// Collected x coordinates.
    pub x: Vec<f64>,
    /// Collected y coordinates.
    pub y: Vec<f64>,
}

impl Bounds {
    fn push(&mut self, p: Point) {
        self.x.push(p.x);
        self.y.push(p.y);
    }

    /// Whether no coordinates have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Smallest and largest collected x, if any. NaN if any x is NaN.
    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        range(&self.x)
    }

    /// Smallest and largest collected y, if any. NaN if any y is NaN.
    #[must_use]
    pub fn y_range(&self) -> Option<(f64, f64)> {
        range(&self.y)
    }
}

fn range(values: &[f64]) -> Option<(f64, f64)> {
    let (first, rest) = values.split_first()?;
    // f64::min/max skip NaN operands, so a NaN must poison the range explicitly.
    Some(rest.iter().fold((*first, *first), |(lo, hi), &v| {
        if lo.is_nan() || v.is_nan() {
            (f64::NAN, f64::NAN)
        } else {
            (lo.min(v), hi.max(v))
        }
    }))
}

/// State of one `start` → draw calls → `end` accumulation pass.
///
/// Only [`PathRenderer::start`](crate::PathRenderer::start) creates a pass, so
/// drawing calls cannot precede it. Each pass starts empty; nothing carries
/// over from the previous one.
#[derive(Debug)]
pub struct PathPass {
    commands: Vec<PathCommand>,
    bounds: Bounds,
    drawn: bool,
    pending_start: Option<Point>,
}

impl PathPass {
    pub(crate) fn new() -> Self {
        Self {
            commands: Vec::new(),
            bounds: Bounds::default(),
            drawn: false,
            pending_start: None,
        }
    }

    /// Begin a subpath at `to`.
    ///
    /// Until the first line or bézier, the point is held back from the bounds.
    pub fn move_to(&mut self, to: Point) -> &mut Self {
        if !self.drawn {
            self.pending_start = Some(to);
        }
        self.commands.push(PathCommand::MoveTo(to));
        self
    }

    /// Add a straight segment to `to`.
    pub fn line_to(&mut self, to: Point) -> &mut Self {
        self.flush_start();
        self.bounds.push(to);
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    /// Add a cubic Bézier segment. Both control points count toward bounds.
    pub fn bezier_to(&mut self, c1: Point, c2: Point, end: Point) -> &mut Self {
        self.flush_start();
        self.bounds.push(c1);
        self.bounds.push(c2);
        self.bounds.push(end);
        self.commands.push(PathCommand::BezierTo { c1, c2, end });
        self
    }

    /// Close the current subpath.
    pub fn join(&mut self) -> &mut Self {
        self.commands.push(PathCommand::ClosePath);
        self
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Coordinates collected so far.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Whether a line or bézier has been drawn in this pass.
    #[must_use]
    pub fn has_drawn(&self) -> bool {
        self.drawn
    }

    pub(crate) fn into_parts(self) -> (Vec<PathCommand>, Bounds) {
        (self.commands, self.bounds)
    }

    fn flush_start(&mut self) {
        if self.drawn {
            return;
        }
        if let Some(start) = self.pending_start.take() {
            self.bounds.push(start);
        }
        self.drawn = true;
    }
}
