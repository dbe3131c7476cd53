//! Geometry Primitives
//!
//! Surface-independent points and rectangles. Units are whatever the host
//! uses (points on a phone, cells in a terminal); the core never assumes a
//! pixel density.

use serde::{Deserialize, Serialize};

/// A 2D point or vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal component
    pub x: f32,
    /// Vertical component
    pub y: f32,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle (origin at top-left, y grows downward)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a rectangle
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The same rectangle moved horizontally by `dx`
    #[must_use]
    pub fn offset_x(self, dx: f32) -> Self {
        Self {
            x: self.x + dx,
            ..self
        }
    }

    /// The same rectangle with its top edge at `y`
    #[must_use]
    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }

    /// Right edge
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the point lies inside this rectangle
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }

    /// Linear interpolation between two rectangles (`t` clamped to 0..=1)
    #[must_use]
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            x: mix(from.x, to.x),
            y: mix(from.y, to.y),
            width: mix(from.width, to.width),
            height: mix(from.height, to.height),
        }
    }
}
