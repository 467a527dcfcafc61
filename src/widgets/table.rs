//! Generic table rendering with schema inference and row highlighting.
//!
//! The header comes from the first record only. Every row is projected onto
//! that header: missing keys become empty cells, extra keys are dropped.

use crate::data::{DataValue, Record, Schema};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied by a [`HighlightRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Strictly greater than the threshold.
    #[default]
    Gt,
    /// Greater than or equal to the threshold.
    Ge,
    /// Strictly less than the threshold.
    Lt,
    /// Less than or equal to the threshold.
    Le,
}

impl Comparison {
    fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Gt => value > threshold,
            Self::Ge => value >= threshold,
            Self::Lt => value < threshold,
            Self::Le => value <= threshold,
        }
    }
}

/// Predicate over one numeric column that selects the highlight style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRule {
    /// Column to read.
    pub column: String,
    /// Comparison against the threshold.
    #[serde(default)]
    pub op: Comparison,
    /// Threshold value.
    pub threshold: f64,
}

impl Default for HighlightRule {
    /// `"Expected Value" > 1`.
    fn default() -> Self {
        Self::new("Expected Value", Comparison::Gt, 1.0)
    }
}

impl HighlightRule {
    /// Create a rule.
    #[must_use]
    pub fn new(column: impl Into<String>, op: Comparison, threshold: f64) -> Self {
        Self { column: column.into(), op, threshold }
    }

    /// Evaluate the rule. Missing or non-numeric values evaluate false.
    #[must_use]
    pub fn evaluate(&self, record: &Record) -> bool {
        record.get(&self.column).and_then(DataValue::as_f64).is_some_and(|v| self.op.holds(v, self.threshold))
    }
}

/// Style tag attached to a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowStyle {
    /// No special styling.
    #[default]
    None,
    /// Row matched the highlight rule.
    Highlight,
}

impl RowStyle {
    /// CSS class for the row, if any.
    #[must_use]
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Highlight => Some("highlight"),
        }
    }
}

impl fmt::Display for RowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Highlight => f.write_str("highlight"),
        }
    }
}

/// A rendered row: cell texts aligned to the header, plus a style tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Cell texts in header order.
    pub cells: Vec<String>,
    /// Row style.
    pub style: RowStyle,
}

/// Result of rendering a record set as a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    /// Header row (the inferred schema).
    pub header: Vec<String>,
    /// Body rows in record order.
    pub rows: Vec<TableRow>,
}

impl RenderedTable {
    /// Number of body rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no body rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of highlighted rows.
    #[must_use]
    pub fn highlighted(&self) -> usize {
        self.rows.iter().filter(|r| r.style == RowStyle::Highlight).count()
    }
}

/// Renders record sets into [`RenderedTable`]s.
#[derive(Debug, Clone, Default)]
pub struct TableRenderer {
    rule: HighlightRule,
}

impl TableRenderer {
    /// Create a renderer with the default highlight rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the highlight rule.
    #[must_use]
    pub fn highlight(mut self, rule: HighlightRule) -> Self {
        self.rule = rule;
        self
    }

    /// The active highlight rule.
    #[must_use]
    pub fn rule(&self) -> &HighlightRule {
        &self.rule
    }

    /// Render `records`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyInput`] if `records` is empty.
    pub fn render(&self, records: &[Record]) -> Result<RenderedTable> {
        let schema = Schema::infer(records)?;

        let rows: Vec<TableRow> = records
            .iter()
            .map(|record| TableRow {
                cells: schema.columns().iter().map(|column| record.text(column)).collect(),
                style: if self.rule.evaluate(record) { RowStyle::Highlight } else { RowStyle::None },
            })
            .collect();

        let table = RenderedTable { header: schema.columns().to_vec(), rows };
        log::debug!(
            "rendered table: {} rows, {} highlighted by {} {:?} {}",
            table.len(),
            table.highlighted(),
            self.rule.column,
            self.rule.op,
            self.rule.threshold
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn ev_row(m: &str, ev: &str) -> Record {
        Record::new().with("Match", m).with("Bookmaker", "pinnacle").with("Expected Value", ev)
    }

    #[test]
    fn test_render_header_and_cells() {
        let records = vec![ev_row("A vs B", "1.2"), ev_row("C vs D", "0.4")];
        let table = TableRenderer::new().render(&records).unwrap();

        assert_eq!(table.header, vec!["Match", "Bookmaker", "Expected Value"]);
        assert_eq!(table.rows[0].cells, vec!["A vs B", "pinnacle", "1.2"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_default_rule_highlights_above_one() {
        let records = vec![ev_row("A", "1.2"), ev_row("B", "1"), ev_row("C", "0.3")];
        let table = TableRenderer::new().render(&records).unwrap();

        let styles: Vec<RowStyle> = table.rows.iter().map(|r| r.style).collect();
        assert_eq!(styles, vec![RowStyle::Highlight, RowStyle::None, RowStyle::None]);
        assert_eq!(table.highlighted(), 1);
    }

    #[test]
    fn test_highlight_compares_in_double_precision() {
        let records = vec![ev_row("A", "1.00000001"), ev_row("B", "1.000000000")];
        let table = TableRenderer::new().render(&records).unwrap();
        assert_eq!(table.rows[0].style, RowStyle::Highlight);
        assert_eq!(table.rows[1].style, RowStyle::None);
    }

    #[test]
    fn test_non_numeric_never_highlights() {
        let records = vec![ev_row("A", "lots"), ev_row("B", ""), Record::new().with("Match", "C")];
        let table = TableRenderer::new().render(&records).unwrap();
        assert_eq!(table.highlighted(), 0);
    }

    #[test]
    fn test_missing_key_renders_empty_cell() {
        let records = vec![ev_row("A", "2"), Record::new().with("Match", "B")];
        let table = TableRenderer::new().render(&records).unwrap();
        assert_eq!(table.rows[1].cells, vec!["B", "", ""]);
    }

    #[test]
    fn test_extra_keys_ignored() {
        let records = vec![
            Record::new().with("a", "1"),
            Record::new().with("a", "2").with("b", "extra"),
        ];
        let table = TableRenderer::new().render(&records).unwrap();
        assert_eq!(table.header, vec!["a"]);
        assert_eq!(table.rows[1].cells, vec!["2"]);
    }

    #[test]
    fn test_empty_input() {
        let result = TableRenderer::new().render(&[]);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_custom_rule() {
        let rule = HighlightRule::new("Odds", Comparison::Le, 1.5);
        let records = vec![
            Record::new().with("Odds", "1.5"),
            Record::new().with("Odds", "1.6"),
            Record::new().with("Odds", 1.2_f32),
        ];
        let table = TableRenderer::new().highlight(rule).render(&records).unwrap();
        let styles: Vec<RowStyle> = table.rows.iter().map(|r| r.style).collect();
        assert_eq!(styles, vec![RowStyle::Highlight, RowStyle::None, RowStyle::Highlight]);
    }

    #[test]
    fn test_row_style_display() {
        assert_eq!(RowStyle::Highlight.to_string(), "highlight");
        assert_eq!(RowStyle::None.to_string(), "none");
        assert_eq!(RowStyle::Highlight.css_class(), Some("highlight"));
        assert_eq!(RowStyle::None.css_class(), None);
    }

    #[test]
    fn test_comparisons() {
        assert!(Comparison::Gt.holds(2.0, 1.0));
        assert!(!Comparison::Gt.holds(1.0, 1.0));
        assert!(Comparison::Ge.holds(1.0, 1.0));
        assert!(Comparison::Lt.holds(0.5, 1.0));
        assert!(!Comparison::Le.holds(f64::NAN, 1.0));
    }
}
