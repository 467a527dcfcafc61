//! Color types and categorical palettes.
//!
//! Colors are assigned to subgroups by position, never by value, so the same
//! subgroup list always yields the same colors.

use crate::error::{Error, Result};
use std::fmt;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string (leading `#` optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the string is not valid hex of the
    /// expected length.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as lowercase `#rrggbb` (alpha dropped).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Format as a CSS color value (`rgb(..)` or `rgba(..)`).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, f32::from(self.a) / 255.0)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An ordered, non-empty list of categorical colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::category10()
    }
}

impl Palette {
    /// Create a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty.
    pub fn new(colors: Vec<Rgba>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidColor("palette requires at least one color".to_string()));
        }
        Ok(Self { colors })
    }

    /// Parse a palette from hex strings.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is not a valid hex color, or the list is
    /// empty.
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self> {
        let colors = hex.iter().map(|h| Rgba::from_hex(h.as_ref())).collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// The ten-color categorical scheme (`#1f77b4`, `#ff7f0e`, `#2ca02c`, ...).
    #[must_use]
    pub fn category10() -> Self {
        Self {
            colors: vec![
                Rgba::rgb(0x1f, 0x77, 0xb4),
                Rgba::rgb(0xff, 0x7f, 0x0e),
                Rgba::rgb(0x2c, 0xa0, 0x2c),
                Rgba::rgb(0xd6, 0x27, 0x28),
                Rgba::rgb(0x94, 0x67, 0xbd),
                Rgba::rgb(0x8c, 0x56, 0x4b),
                Rgba::rgb(0xe3, 0x77, 0xc2),
                Rgba::rgb(0x7f, 0x7f, 0x7f),
                Rgba::rgb(0xbc, 0xbd, 0x22),
                Rgba::rgb(0x17, 0xbe, 0xcf),
            ],
        }
    }

    /// Color for the item at `index`, cycling when the palette is shorter.
    #[must_use]
    pub fn color(&self, index: usize) -> Rgba {
        self.colors[index % self.colors.len()]
    }

    /// Number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette holds at least one color.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colors in order.
    #[must_use]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }
}
