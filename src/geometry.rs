//! Geometric primitives for chart layout.

use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by an offset.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if a point lies inside the rectangle (edges inclusive).
    ///
    /// Always false for rectangles with NaN coordinates.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Space reserved around a plot area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    /// Top margin in pixels.
    pub top: u32,
    /// Right margin in pixels.
    pub right: u32,
    /// Bottom margin in pixels.
    pub bottom: u32,
    /// Left margin in pixels.
    pub left: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: 50, right: 30, bottom: 70, left: 60 }
    }
}

impl Margin {
    /// Create margins.
    #[must_use]
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Inner plot size for an outer size, or `None` if the margins do not fit.
    #[must_use]
    pub fn inner_size(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        let w = width.checked_sub(self.left.checked_add(self.right)?)?;
        let h = height.checked_sub(self.top.checked_add(self.bottom)?)?;
        (w > 0 && h > 0).then_some((w, h))
    }
}
