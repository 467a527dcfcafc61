//! Rendering surfaces and chart drawing.
//!
//! Layout code never touches an output format directly. It produces plain
//! data ([`crate::plots::ChartLayout`]) and [`draw_chart`] replays that data
//! as primitive calls against any [`Surface`]: boxes, text and lines.

mod chart;

pub use chart::{draw_chart, ChartFrame};

use crate::color::Rgba;
use crate::geometry::{Point, Rect};

/// Text anchor position for text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

/// How a piece of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    /// Text color.
    pub fill: Rgba,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Rotation in degrees around the anchor point.
    pub rotate: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { size: 10.0, fill: Rgba::BLACK, anchor: TextAnchor::Start, rotate: 0.0 }
    }
}

impl TextStyle {
    /// Set the anchor.
    #[must_use]
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }
}

/// A target that accepts drawing primitives.
pub trait Surface {
    /// Draw a filled box. `title` is hover text, where the surface supports it.
    fn draw_box(&mut self, rect: Rect, fill: Rgba, title: Option<&str>);

    /// Draw text anchored at a point.
    fn draw_text(&mut self, at: Point, text: &str, style: TextStyle);

    /// Draw a straight line.
    fn draw_line(&mut self, from: Point, to: Point, stroke: Rgba, width: f32);
}
