//! # odds-viz
//!
//! Tables and grouped bar charts for match betting odds.
//!
//! Layout is computed as plain data (bands, bars, colors, legend, tooltip
//! payloads) and handed to a drawing surface afterwards, so the same chart
//! renders to SVG, HTML or any other [`render::Surface`].
//!
//! ## Features
//!
//! - **Tables**: header inferred from the first record, rows highlighted by a
//!   numeric predicate (`Expected Value > 1` by default)
//! - **Grouped bar charts**: one group per match, one bar per outcome, band
//!   scales with configurable padding, fixed `[0, 100]` value axis
//! - **Expected value**: rank bookmaker offers by the expected value of a
//!   unit stake
//! - **Outputs**: SVG and HTML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use odds_viz::prelude::*;
//!
//! let records = read_csv_file("average_odds.csv")?;
//! let layout = GroupedBarChart::new().build(&records)?;
//! let svg = SvgEncoder::chart(&layout, &ChartFrame::default()).render();
//!
//! let table = TableRenderer::new().render(&records)?;
//! HtmlExporter::default().with_svg(&svg).with_table(&table).write_to_file("index.html")?;
//! ```
//!
//! ## Feature Flags
//!
//! - `cli`: the `odds-viz` binary (default)
//! - `wasm`: WebAssembly bindings for browser hosts

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in layout code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and categorical palettes.
pub mod color;

/// Records, cell values and schema inference.
pub mod data;

/// Geometric primitives (points, rectangles, margins).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// CSV ingest and export.
pub mod ingest;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Chart layouts (grouped bar chart, legend, tooltip).
pub mod plots;

/// Tables with row highlighting.
pub mod widgets;

/// Expected-value ranking of bookmaker offers.
pub mod odds;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Drawing surfaces and chart decoration.
pub mod render;

/// Output encoders (SVG, HTML).
pub mod output;

// ============================================================================
// Configuration
// ============================================================================

/// YAML configuration.
pub mod config;

/// WebAssembly bindings for browser usage.
#[cfg(feature = "wasm")]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for odds-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use odds_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Palette, Rgba};
    pub use crate::config::Config;
    pub use crate::data::{DataValue, Record, Schema};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Margin, Point, Rect};
    pub use crate::ingest::{read_csv, read_csv_file, read_csv_str};
    pub use crate::odds::{arbitrage_opportunities, average_markets, expected_values, most_profitable, Market, OddsFormat};
    pub use crate::output::{HtmlExporter, SvgEncoder};
    pub use crate::plots::{
        ChartLayout, GroupedBarChart, LabelCleaner, NumericPolicy, Subgroup, Tooltip, TooltipPayload,
    };
    pub use crate::render::{draw_chart, ChartFrame, Surface};
    pub use crate::scale::{BandScale, LinearScale, OrdinalScale, Scale};
    pub use crate::widgets::{Comparison, HighlightRule, RenderedTable, TableRenderer};
}
