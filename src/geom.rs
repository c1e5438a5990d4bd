#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A pointer position in client (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A flat, absolutely positioned element on the free-form canvas.
///
/// `x` / `y` is the top-left corner in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedElement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PositionedElement {
    #[must_use]
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { id: id.into(), x, y, width, height }
    }

    /// Left edge, horizontal center, and right edge.
    #[must_use]
    pub fn x_stops(&self) -> [f64; 3] {
        [self.x, self.x + self.width / 2.0, self.x + self.width]
    }

    /// Top edge, vertical center, and bottom edge.
    #[must_use]
    pub fn y_stops(&self) -> [f64; 3] {
        [self.y, self.y + self.height / 2.0, self.y + self.height]
    }
}
