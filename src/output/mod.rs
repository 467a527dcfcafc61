//! Output encoders (SVG, HTML).

mod html;
mod svg;

pub use html::HtmlExporter;
pub use svg::SvgEncoder;

/// Escape XML/HTML special characters in text content and attribute values.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
