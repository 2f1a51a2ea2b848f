//! The style descriptor applied when a path is finalized.
//!
//! Mirrors the JSON shape the upstream vector abstraction sends:
//!
//! ```json
//! {
//!   "fill": ["#ff0000", "#0000ff"], "fillMode": "vertical",
//!   "outline": "#000", "outlineWidth": 2, "outlineCap": "round", "outlineJoin": "bevel",
//!   "shadow": "rgba(0, 0, 0, 0.5)", "shadowOffset": {"x": 2, "y": 3}, "shadowBlur": 4
//! }
//! ```
//!
//! Every field is optional; an absent field skips that effect.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::color::Color;
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::Point;

/// Fill colors: a flat primary color, optionally blended into a secondary one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FillRepr", into = "FillRepr")]
pub struct Fill {
    /// Flat fill color, or the gradient start color.
    pub primary: Color,
    /// Gradient end color.
    pub secondary: Option<Color>,
}

impl Fill {
    /// A flat fill.
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self {
            primary: color,
            secondary: None,
        }
    }

    /// A two-color gradient fill.
    #[must_use]
    pub const fn gradient(from: Color, to: Color) -> Self {
        Self {
            primary: from,
            secondary: Some(to),
        }
    }
}

/// Wire form of [`Fill`]: a single color or a one/two element list.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FillRepr {
    Single(Color),
    List(Vec<Color>),
}

impl TryFrom<FillRepr> for Fill {
    type Error = CanvasError;

    fn try_from(repr: FillRepr) -> Result<Self, Self::Error> {
        match repr {
            FillRepr::Single(color) => Ok(Self::solid(color)),
            FillRepr::List(colors) => match colors.as_slice() {
                [primary] => Ok(Self::solid(*primary)),
                [primary, secondary] => Ok(Self::gradient(*primary, *secondary)),
                other => Err(CanvasError::InvalidValue(format!(
                    "fill expects one or two colors, got {}",
                    other.len()
                ))),
            },
        }
    }
}

impl From<Fill> for FillRepr {
    fn from(fill: Fill) -> Self {
        let mut colors = vec![fill.primary];
        colors.extend(fill.secondary);
        Self::List(colors)
    }
}

/// Axis of a two-color gradient fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Gradient runs top to bottom across the path's y extent.
    Vertical,
    /// Gradient runs left to right across the path's x extent.
    Horizontal,
}

impl FillMode {
    /// The keyword used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape drawn at the open ends of stroked lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat end at the endpoint.
    #[default]
    Butt,
    /// Semicircular end.
    Round,
    /// Flat end extended by half the line width.
    Square,
}

impl LineCap {
    /// The 2D context keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl fmt::Display for LineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape drawn where two stroked segments meet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    /// Sharp extended corner.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Corner cut off flat.
    Bevel,
}

impl LineJoin {
    /// The 2D context keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

impl fmt::Display for LineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finalize-time instructions for one path: fill, outline and shadow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    /// Fill colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    /// Gradient axis, required when `fill` has a secondary color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_mode: Option<FillMode>,
    /// Stroke color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Color>,
    /// Stroke width.
    #[serde(
        deserialize_with = "numeric",
        skip_serializing_if = "Option::is_none"
    )]
    pub outline_width: Option<f64>,
    /// Stroke cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_cap: Option<LineCap>,
    /// Stroke join.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_join: Option<LineJoin>,
    /// Shadow color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Color>,
    /// Shadow displacement from the shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_offset: Option<Point>,
    /// Shadow blur radius.
    #[serde(
        deserialize_with = "numeric",
        skip_serializing_if = "Option::is_none"
    )]
    pub shadow_blur: Option<f64>,
}

impl Style {
    /// An empty style: replay the path without painting it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a style descriptor from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong shape.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let style: Self = serde_json::from_str(json)?;
        tracing::trace!(
            fill = style.fill.is_some(),
            outline = style.outline.is_some(),
            shadow = style.shadow.is_some(),
            "Parsed style descriptor"
        );
        Ok(style)
    }

    /// Set a flat fill.
    #[must_use]
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(Fill::solid(color));
        self
    }

    /// Set a two-color gradient fill along `mode`.
    #[must_use]
    pub fn with_gradient(mut self, from: Color, to: Color, mode: FillMode) -> Self {
        self.fill = Some(Fill::gradient(from, to));
        self.fill_mode = Some(mode);
        self
    }

    /// Set the outline.
    #[must_use]
    pub fn with_outline(mut self, color: Color, width: f64, cap: LineCap, join: LineJoin) -> Self {
        self.outline = Some(color);
        self.outline_width = Some(width);
        self.outline_cap = Some(cap);
        self.outline_join = Some(join);
        self
    }

    /// Set the shadow.
    #[must_use]
    pub fn with_shadow(mut self, color: Color, offset: Point) -> Self {
        self.shadow = Some(color);
        self.shadow_offset = Some(offset);
        self
    }

    /// Set the shadow blur radius.
    #[must_use]
    pub fn with_shadow_blur(mut self, blur: f64) -> Self {
        self.shadow_blur = Some(blur);
        self
    }
}

/// Number-or-numeric-string, as loosely typed callers send widths.
#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

fn numeric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Numeric>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Numeric::Number(n)) => Ok(Some(n)),
        Some(Numeric::Text(text)) => text.trim().parse::<f64>().map(Some).map_err(|_| {
            D::Error::custom(CanvasError::InvalidValue(format!("not a number: {text}")))
        }),
    }
}
