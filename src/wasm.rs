//! WebAssembly bindings for odds-viz.
//!
//! Browser hosts pass CSV text in and get HTML or SVG markup back.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { render_table_html, grouped_bar_svg } from 'odds-viz';
//!
//! await init();
//!
//! const csv = await (await fetch('average_odds.csv')).text();
//! document.getElementById('chart').innerHTML = grouped_bar_svg(csv, 960, 600);
//! document.getElementById('table').innerHTML = render_table_html(csv);
//! ```

use wasm_bindgen::prelude::*;

use crate::config::ChartConfig;
use crate::geometry::Point;
use crate::ingest::read_csv_str;
use crate::output::{HtmlExporter, SvgEncoder};
use crate::plots::ChartLayout;
use crate::widgets::TableRenderer;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn layout(csv: &str, config: &ChartConfig) -> Result<ChartLayout, JsValue> {
    let records = read_csv_str(csv).map_err(js_error)?;
    config.chart().and_then(|chart| chart.build(&records)).map_err(js_error)
}

/// Render CSV text as an HTML `<table>`, highlighting rows with
/// `Expected Value > 1`.
#[wasm_bindgen]
pub fn render_table_html(csv: &str) -> Result<String, JsValue> {
    let records = read_csv_str(csv).map_err(js_error)?;
    let table = TableRenderer::new().render(&records).map_err(js_error)?;
    Ok(HtmlExporter::table(&table))
}

/// Render match outcome probabilities from CSV text as a grouped bar chart
/// SVG of the given outer size.
#[wasm_bindgen]
pub fn grouped_bar_svg(csv: &str, width: u32, height: u32) -> Result<String, JsValue> {
    let config = ChartConfig { width, height, ..ChartConfig::default() };
    let layout = layout(csv, &config)?;
    Ok(SvgEncoder::chart(&layout, &config.frame()).render())
}

/// Tooltip HTML for the bar under a pointer, in outer chart coordinates.
///
/// Returns `None` when no bar is under the pointer.
#[wasm_bindgen]
pub fn grouped_bar_tooltip(csv: &str, width: u32, height: u32, x: f32, y: f32) -> Result<Option<String>, JsValue> {
    let config = ChartConfig { width, height, ..ChartConfig::default() };
    let layout = layout(csv, &config)?;
    let pointer = Point::new(x - config.margin.left as f32, y - config.margin.top as f32);
    Ok(layout.bar_at(pointer).and_then(|(index, _)| layout.tooltip(index)).map(|payload| payload.to_html()))
}
