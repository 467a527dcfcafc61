//! Grouped bar chart layout.
//!
//! One group of bars per record, one bar per subgroup field within a group.
//! The outer band scale places groups across the plot width, the inner band
//! scale places subgroups within a group, and a fixed `[0, 100]` linear scale
//! maps values onto the plot height (0 at the bottom).
//!
//! Layout is a pure function of its inputs: building twice from the same
//! records yields identical output.

use crate::color::{Palette, Rgba};
use crate::data::Record;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::plots::legend::{LabelCleaner, LegendEntry};
use crate::plots::tooltip::TooltipPayload;
use crate::scale::{BandScale, LinearScale, OrdinalScale, Scale};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Function deriving a group label from a record.
pub type GroupLabelFn = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// A numeric field drawn as one bar per group, with an optional paired
/// field shown in the tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgroup {
    /// Field holding the bar value.
    pub field: String,
    /// Field holding the secondary value (e.g. the odds for a probability).
    #[serde(default)]
    pub secondary: Option<String>,
}

impl Subgroup {
    /// Create a subgroup without a secondary field.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into(), secondary: None }
    }

    /// Set the secondary field.
    #[must_use]
    pub fn with_secondary(mut self, field: impl Into<String>) -> Self {
        self.secondary = Some(field.into());
        self
    }

    /// Home win / draw / away win probabilities paired with their odds.
    #[must_use]
    pub fn match_outcomes() -> Vec<Self> {
        ["Home Win", "Draw", "Away Win"]
            .iter()
            .map(|outcome| {
                Self::new(format!("Average {outcome} Probability"))
                    .with_secondary(format!("Average {outcome} Odds"))
            })
            .collect()
    }
}

/// How to handle subgroup values that are missing or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// Use NaN, so the bar has undefined geometry instead of a false zero.
    #[default]
    PropagateNan,
    /// Fail with [`Error::InvalidNumericField`].
    Strict,
}

/// Group label `"{home} vs {away}"` from two columns.
#[must_use]
pub fn matchup_label(home: &str, away: &str) -> GroupLabelFn {
    let home = home.to_string();
    let away = away.to_string();
    Arc::new(move |record: &Record| format!("{} vs {}", record.text(&home), record.text(&away)))
}

/// Builder for grouped bar chart layouts.
#[derive(Clone)]
pub struct GroupedBarChart {
    subgroups: Vec<Subgroup>,
    group_label: GroupLabelFn,
    width: u32,
    height: u32,
    outer_padding: f32,
    inner_padding: f32,
    palette: Palette,
    cleaner: LabelCleaner,
    policy: NumericPolicy,
}

impl fmt::Debug for GroupedBarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedBarChart")
            .field("subgroups", &self.subgroups)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("outer_padding", &self.outer_padding)
            .field("inner_padding", &self.inner_padding)
            .field("palette", &self.palette)
            .field("cleaner", &self.cleaner)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Default for GroupedBarChart {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupedBarChart {
    /// Create a builder for match outcome probabilities on an 870x480 plot
    /// area.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subgroups: Subgroup::match_outcomes(),
            group_label: matchup_label("Home Team", "Away Team"),
            width: 870,
            height: 480,
            outer_padding: 0.2,
            inner_padding: 0.05,
            palette: Palette::category10(),
            cleaner: LabelCleaner::default(),
            policy: NumericPolicy::default(),
        }
    }

    /// Set the subgroups (bar order, color order and legend order).
    #[must_use]
    pub fn subgroups(mut self, subgroups: Vec<Subgroup>) -> Self {
        self.subgroups = subgroups;
        self
    }

    /// Set the group label function.
    #[must_use]
    pub fn group_label<F>(mut self, label: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        self.group_label = Arc::new(label);
        self
    }

    /// Set the plot area size (excluding margins).
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the padding fraction between groups.
    #[must_use]
    pub fn outer_padding(mut self, padding: f32) -> Self {
        self.outer_padding = padding;
        self
    }

    /// Set the padding fraction between bars within a group.
    #[must_use]
    pub fn inner_padding(mut self, padding: f32) -> Self {
        self.inner_padding = padding;
        self
    }

    /// Set the subgroup palette.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the legend label cleaner.
    #[must_use]
    pub fn label_cleaner(mut self, cleaner: LabelCleaner) -> Self {
        self.cleaner = cleaner;
        self
    }

    /// Set the numeric coercion policy.
    #[must_use]
    pub fn numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Compute the layout for `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot area is empty, a padding is out of range,
    /// or (under [`NumericPolicy::Strict`]) a subgroup value is not a finite number.
    pub fn build(&self, records: &[Record]) -> Result<ChartLayout> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }
        let width = self.width as f32;
        let height = self.height as f32;

        let labels: Vec<String> = records.iter().map(|r| (self.group_label)(r)).collect();
        warn_on_collisions(&labels);

        let outer = BandScale::new(labels.iter().cloned(), (0.0, width), self.outer_padding)?;
        let inner = BandScale::new(
            self.subgroups.iter().map(|s| s.field.clone()),
            (0.0, outer.bandwidth()),
            self.inner_padding,
        )?;
        let y = LinearScale::percent(height).nice(10);
        let colors = OrdinalScale::new(self.subgroups.iter().map(|s| s.field.clone()), self.palette.clone());

        let legend: Vec<LegendEntry> = self
            .subgroups
            .iter()
            .enumerate()
            .map(|(j, s)| LegendEntry { key: s.field.clone(), label: self.cleaner.clean(&s.field), color: colors.scale(j) })
            .collect();

        let mut groups = Vec::with_capacity(records.len());
        let mut bars = Vec::with_capacity(records.len() * self.subgroups.len());
        for (i, (record, label)) in records.iter().zip(&labels).enumerate() {
            let x0 = outer.scale(i);
            groups.push(Group { label: label.clone(), x: x0, width: outer.bandwidth() });

            for (j, subgroup) in self.subgroups.iter().enumerate() {
                let value = self.coerce(record, i, &subgroup.field)?;
                let secondary = match &subgroup.secondary {
                    Some(field) => Some(self.coerce(record, i, field)?),
                    None => None,
                };

                let top = y.scale(value);
                log::trace!("bar {label} / {}: value={value} y={top}", subgroup.field);
                bars.push(Bar {
                    group: i,
                    group_label: label.clone(),
                    key: subgroup.field.clone(),
                    label: legend[j].label.clone(),
                    value,
                    secondary,
                    rect: Rect::new(x0 + inner.scale(j), top, inner.bandwidth(), (height - top).abs()),
                    color: legend[j].color,
                });
            }
        }

        log::debug!(
            "grouped bar layout: {} groups x {} subgroups on {}x{}, band {:.2}/{:.2}",
            groups.len(),
            self.subgroups.len(),
            self.width,
            self.height,
            outer.bandwidth(),
            inner.bandwidth()
        );

        Ok(ChartLayout { width, height, outer, inner, y, colors, groups, bars, legend })
    }

    fn coerce(&self, record: &Record, row: usize, field: &str) -> Result<f32> {
        if let Some(value) = record.number(field).filter(|v| v.is_finite()) {
            return Ok(value);
        }
        match self.policy {
            NumericPolicy::Strict => Err(Error::InvalidNumericField {
                row,
                field: field.to_string(),
                value: record.text(field),
            }),
            NumericPolicy::PropagateNan => {
                log::warn!("row {row}: field '{field}' is not a finite number ({:?}), using NaN", record.text(field));
                Ok(f32::NAN)
            }
        }
    }
}

fn warn_on_collisions(labels: &[String]) {
    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(label.as_str()) {
            log::warn!("duplicate group label '{label}': groups keep separate bands but share a name");
        }
    }
}

/// One group (record) and its band.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Group label.
    pub label: String,
    /// Band start, relative to the plot area.
    pub x: f32,
    /// Band width.
    pub width: f32,
}

impl Group {
    /// Band center, where the axis label goes.
    #[must_use]
    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// One laid-out bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Index of the group (record) the bar belongs to.
    pub group: usize,
    /// Group label.
    pub group_label: String,
    /// Subgroup field name.
    pub key: String,
    /// Cleaned subgroup label.
    pub label: String,
    /// Bar value (NaN when the field was not numeric).
    pub value: f32,
    /// Secondary value, if the subgroup has a secondary field.
    pub secondary: Option<f32>,
    /// Geometry relative to the plot area (y grows downwards).
    pub rect: Rect,
    /// Fill color.
    pub color: Rgba,
}

/// Result of [`GroupedBarChart::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    width: f32,
    height: f32,
    outer: BandScale,
    inner: BandScale,
    y: LinearScale,
    colors: OrdinalScale,
    groups: Vec<Group>,
    bars: Vec<Bar>,
    legend: Vec<LegendEntry>,
}

impl ChartLayout {
    /// Plot area width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Plot area height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Group band scale.
    #[must_use]
    pub fn outer_scale(&self) -> &BandScale {
        &self.outer
    }

    /// Subgroup band scale (within one group).
    #[must_use]
    pub fn inner_scale(&self) -> &BandScale {
        &self.inner
    }

    /// Value scale.
    #[must_use]
    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    /// Subgroup color scale.
    #[must_use]
    pub fn color_scale(&self) -> &OrdinalScale {
        &self.colors
    }

    /// Groups in record order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Bars, group-major, subgroup order within each group.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Legend entries in subgroup order.
    #[must_use]
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Value-axis ticks as `(value, y)` pairs.
    #[must_use]
    pub fn y_ticks(&self, count: usize) -> Vec<(f32, f32)> {
        self.y.ticks(count).into_iter().map(|v| (v, self.y.scale(v))).collect()
    }

    /// The bar under a point in plot-area coordinates, with its index.
    ///
    /// When bars overlap the one drawn last wins.
    #[must_use]
    pub fn bar_at(&self, point: Point) -> Option<(usize, &Bar)> {
        self.bars.iter().enumerate().rev().find(|(_, bar)| bar.rect.contains(point))
    }

    /// Tooltip payload for the bar at `index`.
    #[must_use]
    pub fn tooltip(&self, index: usize) -> Option<TooltipPayload> {
        self.bars.get(index).map(TooltipPayload::from_bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn match_record(home: &str, away: &str, probs: [&str; 3], odds: [&str; 3]) -> Record {
        Record::new()
            .with("Home Team", home)
            .with("Away Team", away)
            .with("Average Home Win Probability", probs[0])
            .with("Average Draw Probability", probs[1])
            .with("Average Away Win Probability", probs[2])
            .with("Average Home Win Odds", odds[0])
            .with("Average Draw Odds", odds[1])
            .with("Average Away Win Odds", odds[2])
    }

    #[test]
    fn test_single_match_scenario() {
        let records = vec![match_record("A", "B", ["60", "20", "20"], ["1.5", "3.0", "4.0"])];
        let layout = GroupedBarChart::new().build(&records).unwrap();

        assert_eq!(layout.groups().len(), 1);
        assert_eq!(layout.groups()[0].label, "A vs B");
        assert_eq!(layout.bars().len(), 3);

        let values: Vec<f32> = layout.bars().iter().map(|b| b.value).collect();
        assert_eq!(values, vec![60.0, 20.0, 20.0]);

        let y = layout.y_scale();
        assert_relative_eq!(layout.bars()[0].rect.y, y.scale(60.0));
        assert_relative_eq!(layout.bars()[1].rect.y, y.scale(20.0));
        assert_relative_eq!(layout.bars()[2].rect.y, y.scale(20.0));

        let labels: Vec<&str> = layout.legend().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Home Win", "Draw", "Away Win"]);
    }

    #[test]
    fn test_bar_geometry() {
        let records = vec![
            match_record("A", "B", ["50", "25", "25"], ["2", "4", "4"]),
            match_record("C", "D", ["10", "30", "60"], ["9", "3", "1.6"]),
        ];
        let layout = GroupedBarChart::new().dimensions(400, 200).build(&records).unwrap();
        let outer = layout.outer_scale();
        let inner = layout.inner_scale();

        let bar = &layout.bars()[5];
        assert_eq!(bar.group, 1);
        assert_eq!(bar.key, "Average Away Win Probability");
        assert_relative_eq!(bar.rect.x, outer.scale(1) + inner.scale(2));
        assert_relative_eq!(bar.rect.width, inner.bandwidth());
        assert_relative_eq!(bar.rect.y, 80.0, epsilon = 1e-4);
        assert_relative_eq!(bar.rect.height, 120.0, epsilon = 1e-4);
        assert_relative_eq!(inner.range().1, outer.bandwidth());
    }

    #[test]
    fn test_secondary_values() {
        let records = vec![match_record("A", "B", ["60", "20", "20"], ["1.5", "3.0", "4.0"])];
        let layout = GroupedBarChart::new().build(&records).unwrap();
        let secondary: Vec<Option<f32>> = layout.bars().iter().map(|b| b.secondary).collect();
        assert_eq!(secondary, vec![Some(1.5), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_tooltip_payload() {
        let records = vec![match_record("A", "B", ["37.456", "20", "20"], ["2.1", "3.0", "4.0"])];
        let layout = GroupedBarChart::new().build(&records).unwrap();
        let payload = layout.tooltip(0).unwrap();

        assert_eq!(payload.group, "A vs B");
        assert_eq!(payload.category, "Home Win");
        assert_eq!(payload.value, "37.46%");
        assert_eq!(payload.secondary.as_deref(), Some("2.10"));
        assert!(layout.tooltip(3).is_none());
    }

    #[test]
    fn test_colors_follow_subgroup_order() {
        let records = vec![match_record("A", "B", ["60", "20", "20"], ["1", "1", "1"])];
        let layout = GroupedBarChart::new().build(&records).unwrap();
        let colors: Vec<String> = layout.legend().iter().map(|e| e.color.to_hex()).collect();
        assert_eq!(colors, vec!["#1f77b4", "#ff7f0e", "#2ca02c"]);
        assert_eq!(layout.bars()[1].color, layout.legend()[1].color);
    }

    #[test]
    fn test_non_numeric_propagates_nan() {
        let records = vec![match_record("A", "B", ["n/a", "20", ""], ["1", "x", "1"])];
        let layout = GroupedBarChart::new().build(&records).unwrap();

        assert!(layout.bars()[0].value.is_nan());
        assert!(layout.bars()[0].rect.y.is_nan());
        assert!(layout.bars()[0].rect.height.is_nan());
        assert!(layout.bars()[2].value.is_nan());
        assert!(layout.bars()[1].secondary.is_some_and(f32::is_nan));
        assert_relative_eq!(layout.bars()[1].value, 20.0);
    }

    #[test]
    fn test_strict_policy_errors() {
        let records = vec![
            match_record("A", "B", ["60", "20", "20"], ["1", "1", "1"]),
            match_record("C", "D", ["60", "oops", "20"], ["1", "1", "1"]),
        ];
        let result = GroupedBarChart::new().numeric_policy(NumericPolicy::Strict).build(&records);
        match result {
            Err(Error::InvalidNumericField { row, field, value }) => {
                assert_eq!(row, 1);
                assert_eq!(field, "Average Draw Probability");
                assert_eq!(value, "oops");
            }
            other => panic!("expected InvalidNumericField, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_policy_rejects_non_finite_text() {
        let chart = GroupedBarChart::new().numeric_policy(NumericPolicy::Strict);

        let records = vec![match_record("A", "B", ["NaN", "20", "20"], ["1", "1", "1"])];
        match chart.build(&records) {
            Err(Error::InvalidNumericField { row, field, value }) => {
                assert_eq!(row, 0);
                assert_eq!(field, "Average Home Win Probability");
                assert_eq!(value, "NaN");
            }
            other => panic!("expected InvalidNumericField, got {other:?}"),
        }

        let records = vec![match_record("A", "B", ["60", "inf", "20"], ["1", "1", "1"])];
        assert!(matches!(chart.build(&records), Err(Error::InvalidNumericField { row: 0, .. })));

        let records = vec![match_record("A", "B", ["60", "20", "20"], ["1", "1", "-infinity"])];
        assert!(matches!(chart.build(&records), Err(Error::InvalidNumericField { row: 0, .. })));
    }

    #[test]
    fn test_non_finite_text_becomes_nan() {
        let records = vec![match_record("A", "B", ["inf", "NaN", "20"], ["1", "1", "1"])];
        let layout = GroupedBarChart::new().build(&records).unwrap();
        assert!(layout.bars()[0].value.is_nan());
        assert!(layout.bars()[1].value.is_nan());
        assert_relative_eq!(layout.bars()[2].value, 20.0);
    }

    #[test]
    fn test_strict_policy_missing_field() {
        let records = vec![Record::new().with("Home Team", "A").with("Away Team", "B")];
        let result = GroupedBarChart::new().numeric_policy(NumericPolicy::Strict).build(&records);
        assert!(matches!(result, Err(Error::InvalidNumericField { row: 0, .. })));
    }

    #[test]
    fn test_duplicate_labels_keep_separate_bands() {
        let records = vec![
            match_record("A", "B", ["60", "20", "20"], ["1", "1", "1"]),
            match_record("A", "B", ["40", "30", "30"], ["1", "1", "1"]),
        ];
        let layout = GroupedBarChart::new().build(&records).unwrap();
        assert_eq!(layout.groups().len(), 2);
        assert_eq!(layout.groups()[0].label, layout.groups()[1].label);
        assert!(layout.groups()[1].x > layout.groups()[0].x);
    }

    #[test]
    fn test_out_of_range_values_do_not_panic() {
        let records = vec![match_record("A", "B", ["150", "-10", "20"], ["1", "1", "1"])];
        let layout = GroupedBarChart::new().dimensions(100, 100).build(&records).unwrap();
        assert_relative_eq!(layout.bars()[0].rect.y, -50.0, epsilon = 1e-4);
        assert_relative_eq!(layout.bars()[0].rect.height, 150.0, epsilon = 1e-4);
        assert_relative_eq!(layout.bars()[1].rect.y, 110.0, epsilon = 1e-4);
        assert_relative_eq!(layout.bars()[1].rect.height, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_empty_records() {
        let layout = GroupedBarChart::new().build(&[]).unwrap();
        assert!(layout.bars().is_empty());
        assert_eq!(layout.legend().len(), 3);
    }

    #[test]
    fn test_invalid_dimensions() {
        let result = GroupedBarChart::new().dimensions(0, 100).build(&[]);
        assert!(matches!(result, Err(Error::InvalidDimensions { width: 0, height: 100 })));
    }

    #[test]
    fn test_invalid_padding() {
        let result = GroupedBarChart::new().outer_padding(2.0).build(&[]);
        assert!(matches!(result, Err(Error::ScaleDomain(_))));
    }

    #[test]
    fn test_custom_group_label_and_subgroups() {
        let records = vec![Record::new().with("Match", "X vs Y").with("Over", "55").with("Under", "45")];
        let layout = GroupedBarChart::new()
            .group_label(|r: &Record| r.text("Match"))
            .subgroups(vec![Subgroup::new("Over"), Subgroup::new("Under")])
            .label_cleaner(LabelCleaner::identity())
            .build(&records)
            .unwrap();

        assert_eq!(layout.groups()[0].label, "X vs Y");
        assert_eq!(layout.bars().len(), 2);
        assert!(layout.bars()[0].secondary.is_none());
        assert_eq!(layout.legend()[1].label, "Under");
    }

    #[test]
    fn test_bar_at_lookup() {
        let records = vec![match_record("A", "B", ["60", "20", "20"], ["1.5", "3", "4"])];
        let layout = GroupedBarChart::new().build(&records).unwrap();

        let target = &layout.bars()[1].rect;
        let inside = Point::new(target.x + target.width / 2.0, target.bottom() - 1.0);
        let (index, bar) = layout.bar_at(inside).unwrap();
        assert_eq!(index, 1);
        assert_eq!(bar.label, "Draw");

        // Above the draw bar (20%) there is nothing.
        assert!(layout.bar_at(Point::new(inside.x, 10.0)).is_none());
    }

    #[test]
    fn test_y_ticks() {
        let layout = GroupedBarChart::new().dimensions(100, 200).build(&[]).unwrap();
        let ticks = layout.y_ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0], (0.0, 200.0));
        assert_eq!(ticks[10], (100.0, 0.0));
    }

    #[test]
    fn test_idempotent_build() {
        let records = vec![
            match_record("A", "B", ["60", "20", "20"], ["1.5", "3", "4"]),
            match_record("C", "D", ["33.3", "33.3", "33.4"], ["3", "3", "3"]),
        ];
        let chart = GroupedBarChart::new();
        assert_eq!(chart.build(&records).unwrap(), chart.build(&records).unwrap());
    }
}
