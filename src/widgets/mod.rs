//! Tabular widgets.
//!
//! - **TableRenderer**: schema-inferring table with conditional row highlighting
//!
//! # Example
//!
//! ```rust,ignore
//! use odds_viz::widgets::{HighlightRule, TableRenderer};
//!
//! let table = TableRenderer::new().highlight(HighlightRule::default()).render(&records)?;
//! ```

mod table;

pub use table::{Comparison, HighlightRule, RenderedTable, RowStyle, TableRenderer, TableRow};
