//! Hover tooltips.
//!
//! [`TooltipPayload`] is the pure data shown for a bar. [`Tooltip`] is the
//! caller-owned display state: one per chart host, shown, moved and hidden
//! in response to pointer events.

use crate::geometry::Point;
use crate::output::escape_xml;
use crate::plots::grouped_bar::Bar;

/// Offset of the tooltip from the pointer, in pixels.
pub const POINTER_OFFSET: f32 = 10.0;

/// Display data for one bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipPayload {
    /// Group label (e.g. `"A vs B"`).
    pub group: String,
    /// Cleaned subgroup label (e.g. `"Home Win"`).
    pub category: String,
    /// Value with two decimals and a percent sign.
    pub value: String,
    /// Secondary value with two decimals, if the subgroup has one.
    pub secondary: Option<String>,
}

impl TooltipPayload {
    /// Build the payload for a bar.
    #[must_use]
    pub fn from_bar(bar: &Bar) -> Self {
        Self {
            group: bar.group_label.clone(),
            category: bar.label.clone(),
            value: format_percent(bar.value),
            secondary: bar.secondary.map(format_decimal),
        }
    }

    /// Plain-text rendering, one field per line.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = format!("Match: {}\nCategory: {}\nProbability: {}", self.group, self.category, self.value);
        if let Some(secondary) = &self.secondary {
            text.push_str("\nOdds: ");
            text.push_str(secondary);
        }
        text
    }

    /// HTML fragment for a tooltip box.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<strong>Match:</strong> {}<br><strong>Category:</strong> {}<br><strong>Probability:</strong> {}",
            escape_xml(&self.group),
            escape_xml(&self.category),
            escape_xml(&self.value)
        );
        if let Some(secondary) = &self.secondary {
            html.push_str("<br><strong>Odds:</strong> ");
            html.push_str(&escape_xml(secondary));
        }
        html
    }
}

/// Format a percentage value: `37.456` → `"37.46%"`.
#[must_use]
pub fn format_percent(value: f32) -> String {
    format!("{value:.2}%")
}

/// Format a value with two decimals: `2.1` → `"2.10"`.
#[must_use]
pub fn format_decimal(value: f32) -> String {
    format!("{value:.2}")
}

/// Caller-owned tooltip display state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    payload: Option<TooltipPayload>,
    position: Point,
}

impl Tooltip {
    /// Create a hidden tooltip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a payload next to the pointer.
    pub fn show(&mut self, payload: TooltipPayload, pointer: Point) {
        self.payload = Some(payload);
        self.move_to(pointer);
    }

    /// Follow the pointer.
    pub fn move_to(&mut self, pointer: Point) {
        self.position = pointer.offset(POINTER_OFFSET, POINTER_OFFSET);
    }

    /// Hide the tooltip and drop its payload.
    pub fn hide(&mut self) {
        self.payload = None;
    }

    /// Check if the tooltip is showing.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.payload.is_some()
    }

    /// The payload being shown.
    #[must_use]
    pub fn payload(&self) -> Option<&TooltipPayload> {
        self.payload.as_ref()
    }

    /// Top-left corner of the tooltip box.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> TooltipPayload {
        TooltipPayload {
            group: "A vs B".to_string(),
            category: "Home Win".to_string(),
            value: format_percent(37.456),
            secondary: Some(format_decimal(2.1)),
        }
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_percent(37.456), "37.46%");
        assert_eq!(format_decimal(2.1), "2.10");
        assert_eq!(format_percent(60.0), "60.00%");
        assert_eq!(format_percent(f32::NAN), "NaN%");
    }

    #[test]
    fn test_to_text() {
        let text = payload().to_text();
        assert_eq!(text, "Match: A vs B\nCategory: Home Win\nProbability: 37.46%\nOdds: 2.10");
    }

    #[test]
    fn test_to_text_without_secondary() {
        let mut p = payload();
        p.secondary = None;
        assert!(!p.to_text().contains("Odds"));
    }

    #[test]
    fn test_to_html_escapes() {
        let mut p = payload();
        p.group = "<b>A</b> & B".to_string();
        let html = p.to_html();
        assert!(html.contains("&lt;b&gt;A&lt;/b&gt; &amp; B"));
        assert!(html.contains("<strong>Odds:</strong> 2.10"));
    }

    #[test]
    fn test_tooltip_lifecycle() {
        let mut tip = Tooltip::new();
        assert!(!tip.is_visible());

        tip.show(payload(), Point::new(100.0, 50.0));
        assert!(tip.is_visible());
        assert_eq!(tip.position(), Point::new(110.0, 60.0));

        tip.move_to(Point::new(120.0, 70.0));
        assert_eq!(tip.position(), Point::new(130.0, 80.0));
        assert_eq!(tip.payload().unwrap().category, "Home Win");

        tip.hide();
        assert!(!tip.is_visible());
        assert!(tip.payload().is_none());
    }
}
