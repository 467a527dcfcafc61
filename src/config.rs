//! YAML configuration for the odds report.
//!
//! Precedence is CLI > file > defaults. Every key is optional.

use crate::color::Palette;
use crate::error::{Error, Result};
use crate::geometry::Margin;
use crate::odds::Market;
use crate::plots::{GroupedBarChart, LabelCleaner, NumericPolicy, Subgroup};
use crate::render::ChartFrame;
use crate::widgets::{HighlightRule, TableRenderer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Input files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Per-match odds and probabilities.
    #[serde(default = "default_odds_csv")]
    pub odds_csv: PathBuf,

    /// Precomputed most-profitable table. Derived from `odds_csv` when unset.
    #[serde(default)]
    pub profitable_csv: Option<PathBuf>,
}

fn default_odds_csv() -> PathBuf {
    PathBuf::from("odds.csv")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { odds_csv: default_odds_csv(), profitable_csv: None }
    }
}

/// Output location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `table.html`, `chart.svg` and `index.html`.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_output_dir() }
    }
}

/// Grouped bar chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Outer width in pixels, margins included.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Outer height in pixels, margins included.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Space around the plot area.
    #[serde(default)]
    pub margin: Margin,

    /// Padding fraction between match groups.
    #[serde(default = "default_outer_padding")]
    pub outer_padding: f32,

    /// Padding fraction between bars in a group.
    #[serde(default = "default_inner_padding")]
    pub inner_padding: f32,

    /// Subgroup colors as hex strings. Empty means category10.
    #[serde(default)]
    pub palette: Vec<String>,

    /// Bar fields in draw order.
    #[serde(default = "Subgroup::match_outcomes")]
    pub subgroups: Vec<Subgroup>,

    /// Prefix stripped from legend labels.
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,

    /// Suffix stripped from legend labels.
    #[serde(default = "default_label_suffix")]
    pub label_suffix: String,

    /// Fail on non-numeric bar values instead of drawing NaN bars.
    #[serde(default)]
    pub strict_numbers: bool,
}

fn default_width() -> u32 {
    960
}
fn default_height() -> u32 {
    600
}
fn default_outer_padding() -> f32 {
    0.2
}
fn default_inner_padding() -> f32 {
    0.05
}
fn default_label_prefix() -> String {
    "Average ".to_string()
}
fn default_label_suffix() -> String {
    " Probability".to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: Margin::default(),
            outer_padding: default_outer_padding(),
            inner_padding: default_inner_padding(),
            palette: Vec::new(),
            subgroups: Subgroup::match_outcomes(),
            label_prefix: default_label_prefix(),
            label_suffix: default_label_suffix(),
            strict_numbers: false,
        }
    }
}

impl ChartConfig {
    /// Plot area size: outer size minus margins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the margins leave no room.
    pub fn plot_size(&self) -> Result<(u32, u32)> {
        self.margin
            .inner_size(self.width, self.height)
            .ok_or(Error::InvalidDimensions { width: self.width, height: self.height })
    }

    /// Chart builder for these settings.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid palette color or a plot area with no
    /// room.
    pub fn chart(&self) -> Result<GroupedBarChart> {
        let (width, height) = self.plot_size()?;
        let palette = if self.palette.is_empty() { Palette::category10() } else { Palette::from_hex(&self.palette)? };
        let policy = if self.strict_numbers { NumericPolicy::Strict } else { NumericPolicy::PropagateNan };

        Ok(GroupedBarChart::new()
            .subgroups(self.subgroups.clone())
            .dimensions(width, height)
            .outer_padding(self.outer_padding)
            .inner_padding(self.inner_padding)
            .palette(palette)
            .label_cleaner(LabelCleaner::new(self.label_prefix.as_str(), self.label_suffix.as_str()))
            .numeric_policy(policy))
    }

    /// Axis and legend decoration for these settings.
    #[must_use]
    pub fn frame(&self) -> ChartFrame {
        ChartFrame { margin: self.margin, ..ChartFrame::default() }
    }
}

/// Table settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Row highlight rule.
    #[serde(default)]
    pub highlight: HighlightRule,
}

impl TableConfig {
    /// Table renderer for these settings.
    #[must_use]
    pub fn renderer(&self) -> TableRenderer {
        TableRenderer::new().highlight(self.highlight.clone())
    }
}

/// Expected-value derivation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsConfig {
    /// Bookmaker markets to evaluate.
    #[serde(default = "Market::defaults")]
    pub markets: Vec<Market>,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self { markets: Market::defaults() }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Input files.
    #[serde(default)]
    pub input: InputConfig,

    /// Output location.
    #[serde(default)]
    pub output: OutputConfig,

    /// Chart settings.
    #[serde(default)]
    pub chart: ChartConfig,

    /// Table settings.
    #[serde(default)]
    pub table: TableConfig,

    /// Expected-value settings.
    #[serde(default)]
    pub odds: OddsConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            chart: ChartConfig::default(),
            table: TableConfig::default(),
            odds: OddsConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content =
            std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        log::debug!("loaded config from {}", path.display());
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Serializes the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::ConfigParse { line: 0, message: e.to_string() })
    }
}
