//! Core data model for the drawing surface.
//!
//! Positions are expressed in *logical* units (CSS pixels of the element on
//! screen); the backing buffer may be denser. Colors are opaque 8-bit RGB,
//! matching what an `<input type="color">` produces.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// Opaque RGB color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string: `#RGB` or `#RRGGBB`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    /// Emit as lowercase `#rrggbb`, the form color inputs report.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// RGBA bytes with full opacity.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid hex color: {value:?}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Quick colors offered next to the canvas.
pub const DEFAULT_SWATCHES: [Color; 8] = [
    Color::rgb(0x11, 0x18, 0x27),
    Color::rgb(0xef, 0x44, 0x44),
    Color::rgb(0xf5, 0x9e, 0x0b),
    Color::rgb(0xfa, 0xcc, 0x15),
    Color::rgb(0x10, 0xb9, 0x81),
    Color::rgb(0x3b, 0x82, 0xf6),
    Color::rgb(0x7c, 0x3a, 0xed),
    Color::WHITE,
];

// ─── Geometry ────────────────────────────────────────────────────────────

/// A position in logical surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp into the rectangle `[0, width] × [0, height]`.
    pub fn clamp_to(self, width: f32, height: f32) -> Self {
        Self {
            x: self.x.clamp(0.0, width.max(0.0)),
            y: self.y.clamp(0.0, height.max(0.0)),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ─── Brush ───────────────────────────────────────────────────────────────

/// Inclusive range that brush widths are clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthRange {
    pub min: f32,
    pub max: f32,
}

impl Default for WidthRange {
    fn default() -> Self {
        Self { min: 1.0, max: 60.0 }
    }
}

impl WidthRange {
    /// `true` when `0 < min <= max` and both bounds are finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }

    /// Clamp `width` into the range. Non-finite input yields `None`.
    pub fn clamp(&self, width: f32) -> Option<f32> {
        width.is_finite().then(|| width.clamp(self.min, self.max))
    }
}

/// Brush settings read at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub color: Color,
    /// Stroke width in logical units.
    pub width: f32,
    /// Paint with the background color instead of `color`.
    pub eraser: bool,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_SWATCHES[0],
            width: 6.0,
            eraser: false,
        }
    }
}

impl BrushConfig {
    /// The color a segment is actually painted with.
    pub fn effective_color(&self, background: Color) -> Color {
        if self.eraser { background } else { self.color }
    }

    /// Set the width, clamped into `range`. Returns the width now in effect.
    pub fn set_width(&mut self, width: f32, range: WidthRange) -> f32 {
        match range.clamp(width) {
            Some(w) => self.width = w,
            None => log::warn!("ignoring non-finite brush width {width}"),
        }
        self.width
    }

    /// Select a quick color. Picking a color always leaves eraser mode.
    pub fn pick(&mut self, color: Color) {
        self.color = color;
        self.eraser = false;
    }

    pub fn toggle_eraser(&mut self) -> bool {
        self.eraser = !self.eraser;
        self.eraser
    }
}
