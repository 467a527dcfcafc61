//! Legend entries and subgroup label cleaning.

use crate::color::Rgba;

/// Shortens field names for display by stripping a fixed prefix, then a
/// fixed suffix.
///
/// `"Average Home Win Probability"` becomes `"Home Win"` with the default
/// `"Average "` / `" Probability"` pair. Names without the prefix or suffix
/// are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCleaner {
    prefix: String,
    suffix: String,
}

impl Default for LabelCleaner {
    fn default() -> Self {
        Self::new("Average ", " Probability")
    }
}

impl LabelCleaner {
    /// Create a cleaner for the given prefix and suffix.
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), suffix: suffix.into() }
    }

    /// A cleaner that returns names unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self::new("", "")
    }

    /// Strip the prefix, then the suffix.
    #[must_use]
    pub fn clean(&self, name: &str) -> String {
        let name = name.strip_prefix(self.prefix.as_str()).unwrap_or(name);
        let name = name.strip_suffix(self.suffix.as_str()).unwrap_or(name);
        name.to_string()
    }
}

/// One legend entry: a subgroup, its display label and its color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// Subgroup field name.
    pub key: String,
    /// Cleaned display label.
    pub label: String,
    /// Swatch color.
    pub color: Rgba,
}
