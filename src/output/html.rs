//! HTML output: tables and standalone pages.

use super::escape_xml;
use crate::error::Result;
use crate::widgets::RenderedTable;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const DEFAULT_STYLE: &str = "body { font-family: sans-serif; margin: 20px; }
table { border-collapse: collapse; margin-bottom: 24px; }
th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
th { background-color: #f2f2f2; }
tr.highlight { background-color: #c8f7c5; }";

/// Builds an HTML page from rendered tables and SVG charts.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    title: String,
    style: String,
    sections: Vec<String>,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new("Betting Odds")
    }
}

impl HtmlExporter {
    /// Create an exporter for a page with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), style: DEFAULT_STYLE.to_string(), sections: Vec::new() }
    }

    /// Replace the page stylesheet.
    #[must_use]
    pub fn style(mut self, css: impl Into<String>) -> Self {
        self.style = css.into();
        self
    }

    /// Append a rendered table.
    #[must_use]
    pub fn with_table(mut self, table: &RenderedTable) -> Self {
        self.sections.push(Self::table(table));
        self
    }

    /// Append an SVG document (inlined as-is).
    #[must_use]
    pub fn with_svg(mut self, svg: &str) -> Self {
        self.sections.push(format!("<div class=\"chart\">\n{}</div>\n", svg));
        self
    }

    /// Render a table as a `<table>` element. Highlighted rows get
    /// `class="highlight"`.
    #[must_use]
    pub fn table(table: &RenderedTable) -> String {
        let mut html = String::with_capacity(256 + table.len() * 128);
        html.push_str("<table>\n<thead>\n<tr>");
        for column in &table.header {
            let _ = write!(html, "<th>{}</th>", escape_xml(column));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for row in &table.rows {
            match row.style.css_class() {
                Some(class) => {
                    let _ = write!(html, "<tr class=\"{class}\">");
                }
                None => html.push_str("<tr>"),
            }
            for cell in &row.cells {
                let _ = write!(html, "<td>{}</td>", escape_xml(cell));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>\n</table>\n");
        html
    }

    /// Render the full page.
    #[must_use]
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(1024 + self.sections.iter().map(String::len).sum::<usize>());
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape_xml(&self.title));
        let _ = writeln!(html, "<style>\n{}\n</style>", self.style);
        html.push_str("</head>\n<body>\n");
        for section in &self.sections {
            html.push_str(section);
        }
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Write the page to a file.
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
