//! High-level chart types.
//!
//! Provides chart layouts with builder APIs. Layouts are plain data; see
//! [`crate::render`] for drawing them.

mod grouped_bar;
mod legend;
mod tooltip;

pub use grouped_bar::{
    matchup_label, Bar, ChartLayout, Group, GroupLabelFn, GroupedBarChart, NumericPolicy, Subgroup,
};
pub use legend::{LabelCleaner, LegendEntry};
pub use tooltip::{format_decimal, format_percent, Tooltip, TooltipPayload, POINTER_OFFSET};
