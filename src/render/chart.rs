//! Draws a grouped bar chart layout onto a surface.

use super::{Surface, TextAnchor, TextStyle};
use crate::color::Rgba;
use crate::geometry::{Margin, Point, Rect};
use crate::plots::{ChartLayout, TooltipPayload};

const LEGEND_SWATCH: f32 = 18.0;
const LEGEND_ROW: f32 = 20.0;
const TICK_SIZE: f32 = 6.0;

/// Decoration around the plot area: margins, axes and legend styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    /// Space around the plot area.
    pub margin: Margin,
    /// Axis line and label color.
    pub axis_color: Rgba,
    /// Axis and legend font size.
    pub font_size: f32,
    /// Approximate number of value-axis ticks.
    pub tick_count: usize,
    /// Rotation of group labels in degrees.
    pub label_rotation: f32,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            axis_color: Rgba::BLACK,
            font_size: 10.0,
            tick_count: 10,
            label_rotation: -45.0,
        }
    }
}

impl ChartFrame {
    /// Full surface size for a layout: plot area plus margins.
    #[must_use]
    pub fn outer_size(&self, layout: &ChartLayout) -> (u32, u32) {
        let m = self.margin;
        (
            (layout.width() as u32).saturating_add(m.left).saturating_add(m.right),
            (layout.height() as u32).saturating_add(m.top).saturating_add(m.bottom),
        )
    }

    fn origin(&self) -> Point {
        Point::new(self.margin.left as f32, self.margin.top as f32)
    }

    fn text(&self) -> TextStyle {
        TextStyle { size: self.font_size, fill: self.axis_color, ..TextStyle::default() }
    }
}

/// Draw `layout` with axes and legend, offset by the frame margins.
///
/// Draw order is bars, group axis, value axis, legend.
pub fn draw_chart<S: Surface>(layout: &ChartLayout, frame: &ChartFrame, surface: &mut S) {
    let origin = frame.origin();
    let at = |x: f32, y: f32| origin.offset(x, y);
    let w = layout.width();
    let h = layout.height();

    for bar in layout.bars() {
        let r = bar.rect;
        let title = TooltipPayload::from_bar(bar).to_text();
        surface.draw_box(Rect::new(origin.x + r.x, origin.y + r.y, r.width, r.height), bar.color, Some(&title));
    }

    // Group axis: no tick marks, rotated labels hanging from band centers.
    surface.draw_line(at(0.0, h), at(w, h), frame.axis_color, 1.0);
    let label_style = frame.text().anchor(TextAnchor::End).rotate(frame.label_rotation);
    for group in layout.groups() {
        surface.draw_text(at(group.center(), h + 9.0), &group.label, label_style);
    }

    // Value axis.
    surface.draw_line(at(0.0, 0.0), at(0.0, h), frame.axis_color, 1.0);
    let tick_style = frame.text().anchor(TextAnchor::End);
    for (value, y) in layout.y_ticks(frame.tick_count) {
        surface.draw_line(at(-TICK_SIZE, y), at(0.0, y), frame.axis_color, 1.0);
        surface.draw_text(at(-TICK_SIZE - 3.0, y + frame.font_size / 3.0), &format!("{value}"), tick_style);
    }

    for (i, entry) in layout.legend().iter().enumerate() {
        let top = i as f32 * LEGEND_ROW;
        let swatch = Rect::new(origin.x + w - LEGEND_SWATCH, origin.y + top, LEGEND_SWATCH, LEGEND_SWATCH);
        surface.draw_box(swatch, entry.color, None);
        surface.draw_text(at(w - 24.0, top + LEGEND_SWATCH / 2.0 + frame.font_size * 0.35), &entry.label, tick_style);
    }
}
