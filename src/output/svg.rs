//! SVG output encoder.
//!
//! Vector output for charts. Bars carry a `<title>` child, which browsers show
//! as a native hover tooltip without any script.

use super::escape_xml;
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::plots::ChartLayout;
use crate::render::{draw_chart, ChartFrame, Surface, TextAnchor, TextStyle};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background fill
    background: Rgba,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// One drawn primitive.
#[derive(Debug, Clone, PartialEq)]
enum SvgElement {
    /// Filled rectangle, with optional hover title
    Rect { rect: Rect, fill: Rgba, title: Option<String> },
    /// Line
    Line { from: Point, to: Point, stroke: Rgba, stroke_width: f32 },
    /// Text, optionally rotated around its anchor point
    Text { at: Point, text: String, style: TextStyle },
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Rgba::WHITE, elements: Vec::new() }
    }

    /// Render a chart layout with axes and legend into a new encoder sized to
    /// the layout plus frame margins.
    #[must_use]
    pub fn chart(layout: &ChartLayout, frame: &ChartFrame) -> Self {
        let (width, height) = frame.outer_size(layout);
        let mut encoder = Self::new(width, height);
        draw_chart(layout, frame, &mut encoder);
        encoder
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, self.background.to_css());

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

impl Surface for SvgEncoder {
    fn draw_box(&mut self, rect: Rect, fill: Rgba, title: Option<&str>) {
        self.elements.push(SvgElement::Rect { rect, fill, title: title.map(str::to_string) });
    }

    fn draw_text(&mut self, at: Point, text: &str, style: TextStyle) {
        self.elements.push(SvgElement::Text { at, text: text.to_string(), style });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: Rgba, width: f32) {
        self.elements.push(SvgElement::Line { from, to, stroke, stroke_width: width });
    }
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { rect, fill, title } => {
            let attrs = format!(
                r#"x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                fill.to_css()
            );
            match title {
                Some(title) => format!("<rect {attrs}><title>{}</title></rect>", escape_xml(title)),
                None => format!("<rect {attrs}/>"),
            }
        }
        SvgElement::Line { from, to, stroke, stroke_width } => {
            format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                stroke.to_css()
            )
        }
        SvgElement::Text { at, text, style } => {
            let anchor = match style.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let transform = if style.rotate == 0.0 {
                String::new()
            } else {
                format!(r#" transform="rotate({} {} {})""#, style.rotate, at.x, at.y)
            };
            format!(
                r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{anchor}" font-family="sans-serif"{transform}>{}</text>"#,
                at.x,
                at.y,
                style.size,
                style.fill.to_css(),
                escape_xml(text)
            )
        }
    }
}
