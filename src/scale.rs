//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, size, color).
//! Band scales follow the usual "band" semantics: the range is split into
//! `n` equal steps, each holding one band plus inner padding, with outer
//! padding at both ends and any leftover space distributed by `align`.

use crate::color::{Palette, Rgba};
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
///
/// Values outside the domain extrapolate linearly; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max or either bound is not
    /// finite.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain bounds must be finite".to_string()));
        }
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Percentage scale: domain `[0, 100]` onto `[height, 0]`, so 0 sits at the
    /// bottom of a plot area of the given height.
    #[must_use]
    pub fn percent(height: f32) -> Self {
        Self { domain_min: 0.0, domain_max: 100.0, range_min: height, range_max: 0.0 }
    }

    /// Get the domain extent.
    #[must_use]
    pub fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    /// Extend the domain to round tick values.
    ///
    /// Only ever widens the domain; `[0, 100]` with 10 ticks is unchanged.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        let reversed = self.domain_max < self.domain_min;
        let (mut lo, mut hi) = if reversed {
            (f64::from(self.domain_max), f64::from(self.domain_min))
        } else {
            (f64::from(self.domain_min), f64::from(self.domain_max))
        };

        let mut previous = 0.0;
        for _ in 0..10 {
            let step = tick_step(lo, hi, count);
            if step == previous || step <= 0.0 || !step.is_finite() {
                break;
            }
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
            previous = step;
        }

        if reversed {
            self.domain_min = hi as f32;
            self.domain_max = lo as f32;
        } else {
            self.domain_min = lo as f32;
            self.domain_max = hi as f32;
        }
        self
    }

    /// Roughly `count` evenly spaced tick values within the domain, in
    /// increasing order, at multiples of 1, 2 or 5 times a power of ten.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        let lo = f64::from(self.domain_min.min(self.domain_max));
        let hi = f64::from(self.domain_min.max(self.domain_max));
        let step = tick_step(lo, hi, count);
        if step <= 0.0 || !step.is_finite() {
            return Vec::new();
        }

        // Negative powers divide by the inverse step to keep ticks exact.
        if step < 1.0 {
            let inverse = (1.0 / step).round();
            let first = (lo * inverse).ceil() as i64;
            let last = (hi * inverse).floor() as i64;
            (first..=last).map(|k| (k as f64 / inverse) as f32).collect()
        } else {
            let first = (lo / step).ceil() as i64;
            let last = (hi / step).floor() as i64;
            (first..=last).map(|k| (k as f64 * step) as f32).collect()
        }
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo).abs() / count.max(1) as f64;
    let power = raw.log10().floor();
    let mut step = 10f64.powf(power);
    let error = raw / step;

    if error >= 50f64.sqrt() {
        step *= 10.0;
    } else if error >= 10f64.sqrt() {
        step *= 5.0;
    } else if error >= 2f64.sqrt() {
        step *= 2.0;
    }
    step
}

/// Band scale for categorical-to-continuous mapping.
///
/// Each domain entry owns one band, addressed by its index. Duplicate labels
/// are kept, each with its own band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f32, f32),
    padding_inner: f32,
    padding_outer: f32,
    align: f32,
    start: f32,
    step: f32,
    bandwidth: f32,
}

impl BandScale {
    /// Create a band scale with the same inner and outer padding.
    ///
    /// # Errors
    ///
    /// Returns an error if `padding` is outside `[0, 1]`.
    pub fn new<I, S>(domain: I, range: (f32, f32), padding: f32) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_padding(domain, range, padding, padding)
    }

    /// Create a band scale with separate inner and outer padding fractions.
    ///
    /// # Errors
    ///
    /// Returns an error if `padding_inner` is outside `[0, 1]` or
    /// `padding_outer` is negative.
    pub fn with_padding<I, S>(
        domain: I,
        range: (f32, f32),
        padding_inner: f32,
        padding_outer: f32,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !(0.0..=1.0).contains(&padding_inner) {
            return Err(Error::ScaleDomain(format!(
                "Band inner padding must be within [0, 1], got {padding_inner}"
            )));
        }
        if padding_outer.is_nan() || padding_outer < 0.0 {
            return Err(Error::ScaleDomain(format!(
                "Band outer padding must be non-negative, got {padding_outer}"
            )));
        }

        let mut scale = Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            padding_inner,
            padding_outer,
            align: 0.5,
            start: 0.0,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        Ok(scale)
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f32;
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };

        let step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.start = start + (stop - start - step * (n - self.padding_inner)) * self.align;
        self.step = step;
        self.bandwidth = step * (1.0 - self.padding_inner);
    }

    /// Width of each band.
    #[must_use]
    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    /// Distance between the starts of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// The domain labels in order.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Number of bands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    /// Check if the scale has no bands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Start of the band for the first domain entry equal to `key`.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<f32> {
        self.domain.iter().position(|d| d == key).map(|i| self.scale(i))
    }
}

impl Scale<usize, f32> for BandScale {
    fn scale(&self, index: usize) -> f32 {
        let slot = if self.range.1 < self.range.0 {
            self.domain.len().saturating_sub(1).saturating_sub(index)
        } else {
            index
        };
        self.start + self.step * slot as f32
    }

    fn range(&self) -> (f32, f32) {
        self.range
    }
}

/// Ordinal color scale: domain entries take palette colors by position.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    palette: Palette,
}

impl OrdinalScale {
    /// Create an ordinal scale over `domain`.
    #[must_use]
    pub fn new<I, S>(domain: I, palette: Palette) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { domain: domain.into_iter().map(Into::into).collect(), palette }
    }

    /// Color for `key`, if it is in the domain.
    #[must_use]
    pub fn color(&self, key: &str) -> Option<Rgba> {
        self.domain.iter().position(|d| d == key).map(|i| self.palette.color(i))
    }

    /// The domain in order.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

impl Scale<usize, Rgba> for OrdinalScale {
    fn scale(&self, index: usize) -> Rgba {
        self.palette.color(index)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (self.palette.color(0), self.palette.color(self.palette.len() - 1))
    }
}
