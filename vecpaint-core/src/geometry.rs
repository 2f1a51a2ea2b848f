//! Points supplied by the upstream vector abstraction.

use serde::{Deserialize, Serialize};

/// A 2D point or offset vector in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// The origin, also used as the zero offset.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The same vector pointing the opposite way.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_negates_both_axes() {
        let offset = Point::new(3.0, -4.5);
        assert_eq!(offset.inverse(), Point::new(-3.0, 4.5));
    }

    #[test]
    fn deserializes_from_xy_object() {
        let p: Point = serde_json::from_str(r#"{"x": 1.5, "y": 2}"#).expect("point");
        assert_eq!(p, Point::new(1.5, 2.0));
    }
}
