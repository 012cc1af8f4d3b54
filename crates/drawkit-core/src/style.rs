//! Style system: colors, pens, brushes, and the per-item key/value store
//! that items resolve their drawing attributes from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error raised when a hex color string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("hex color must be #rrggbb or #rrggbbaa, got {0:?}")]
    InvalidFormat(String),
    #[error("invalid hex digits in color {0:?}")]
    InvalidDigits(String),
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Scales the alpha channel by an opacity factor in [0, 1].
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::InvalidFormat(hex.to_string()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidFormat(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::InvalidDigits(hex.to_string()))
        };

        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        let a = if digits.len() == 8 { channel(6..8)? } else { 255 };
        Ok(Self { r, g, b, a })
    }

    /// Formats as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Stroke pattern of a pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum PenStyle {
    NoPen = 0,
    Solid = 1,
    Dash = 2,
    Dot = 3,
    DashDot = 4,
    DashDotDot = 5,
}

impl PenStyle {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::NoPen),
            1 => Some(Self::Solid),
            2 => Some(Self::Dash),
            3 => Some(Self::Dot),
            4 => Some(Self::DashDot),
            5 => Some(Self::DashDotDot),
            _ => None,
        }
    }
}

/// End-cap rendering of a pen stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum PenCapStyle {
    Flat = 0,
    Square = 1,
    Round = 2,
}

impl PenCapStyle {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Flat),
            1 => Some(Self::Square),
            2 => Some(Self::Round),
            _ => None,
        }
    }
}

/// Corner rendering where two stroke segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum PenJoinStyle {
    Miter = 0,
    Bevel = 1,
    Round = 2,
}

impl PenJoinStyle {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Miter),
            1 => Some(Self::Bevel),
            2 => Some(Self::Round),
            _ => None,
        }
    }
}

/// Fill pattern of a brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum BrushStyle {
    NoBrush = 0,
    Solid = 1,
}

impl BrushStyle {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::NoBrush),
            1 => Some(Self::Solid),
            _ => None,
        }
    }
}

/// Resolved stroke attributes of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
    pub style: PenStyle,
    pub cap: PenCapStyle,
    pub join: PenJoinStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            style: PenStyle::Solid,
            cap: PenCapStyle::Round,
            join: PenJoinStyle::Round,
        }
    }
}

/// Resolved fill attributes of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub color: Color,
    pub style: BrushStyle,
}

impl Brush {
    /// True when painting with this brush produces visible fill.
    pub fn is_opaque(&self) -> bool {
        self.style != BrushStyle::NoBrush && self.color.a > 0
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            style: BrushStyle::Solid,
        }
    }
}

/// Slots an item style can carry a value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleKey {
    PenStyle,
    PenColor,
    PenOpacity,
    PenWidth,
    PenCapStyle,
    PenJoinStyle,
    BrushStyle,
    BrushColor,
    BrushOpacity,
    CornerRadiusX,
    CornerRadiusY,
}

/// A tagged value stored in a style slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StyleValue {
    Number(f64),
    Color(Color),
    Integer(u32),
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u32> {
        match self {
            StyleValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

/// Per-item key/value store for drawing attributes.
///
/// Items seed their slots at construction through [`Style::value_lookup`] so
/// that values already defined (for example by an application-level default
/// style) are never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    values: HashMap<StyleKey, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value for `key`, or `fallback` when the slot is
    /// unset. Never inserts.
    pub fn value_lookup(&self, key: StyleKey, fallback: StyleValue) -> StyleValue {
        self.values.get(&key).copied().unwrap_or(fallback)
    }

    pub fn value(&self, key: StyleKey) -> Option<StyleValue> {
        self.values.get(&key).copied()
    }

    pub fn set_value(&mut self, key: StyleKey, value: StyleValue) {
        self.values.insert(key, value);
    }

    pub fn is_set(&self, key: StyleKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Resolves the pen from the pen slots, multiplying the opacity slot
    /// into the color alpha. Unset slots fall back to [`Pen::default`].
    pub fn pen(&self) -> Pen {
        let default = Pen::default();
        let color = self
            .value(StyleKey::PenColor)
            .and_then(|v| v.as_color())
            .unwrap_or(default.color);
        let opacity = self
            .value(StyleKey::PenOpacity)
            .and_then(|v| v.as_number())
            .unwrap_or(1.0);
        Pen {
            color: color.with_opacity(opacity),
            width: self
                .value(StyleKey::PenWidth)
                .and_then(|v| v.as_number())
                .unwrap_or(default.width),
            style: self
                .value(StyleKey::PenStyle)
                .and_then(|v| v.as_integer())
                .and_then(PenStyle::from_raw)
                .unwrap_or(default.style),
            cap: self
                .value(StyleKey::PenCapStyle)
                .and_then(|v| v.as_integer())
                .and_then(PenCapStyle::from_raw)
                .unwrap_or(default.cap),
            join: self
                .value(StyleKey::PenJoinStyle)
                .and_then(|v| v.as_integer())
                .and_then(PenJoinStyle::from_raw)
                .unwrap_or(default.join),
        }
    }

    /// Resolves the brush from the brush slots, multiplying the opacity slot
    /// into the color alpha.
    pub fn brush(&self) -> Brush {
        let default = Brush::default();
        let color = self
            .value(StyleKey::BrushColor)
            .and_then(|v| v.as_color())
            .unwrap_or(default.color);
        let opacity = self
            .value(StyleKey::BrushOpacity)
            .and_then(|v| v.as_number())
            .unwrap_or(1.0);
        Brush {
            color: color.with_opacity(opacity),
            style: self
                .value(StyleKey::BrushStyle)
                .and_then(|v| v.as_integer())
                .and_then(BrushStyle::from_raw)
                .unwrap_or(default.style),
        }
    }
}

/// A tagged value in the flat property map exposed by
/// `set_properties`/`properties` on items. This map of property name to
/// value is the only serialization surface the item model defines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum PropertyValue {
    Number(f64),
    Color(Color),
    Integer(u32),
}

/// Property names understood by the shape items.
pub mod property_names {
    pub const PEN_COLOR: &str = "pen-color";
    pub const PEN_WIDTH: &str = "pen-width";
    pub const PEN_STYLE: &str = "pen-style";
    pub const PEN_CAP_STYLE: &str = "pen-cap-style";
    pub const PEN_JOIN_STYLE: &str = "pen-join-style";
    pub const BRUSH_COLOR: &str = "brush-color";
    pub const CORNER_RADIUS_X: &str = "corner-radius-x";
    pub const CORNER_RADIUS_Y: &str = "corner-radius-y";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_lookup_prefers_existing_value() {
        let mut style = Style::new();
        assert_eq!(
            style.value_lookup(StyleKey::PenWidth, StyleValue::Number(4.0)),
            StyleValue::Number(4.0)
        );
        assert!(!style.is_set(StyleKey::PenWidth));

        style.set_value(StyleKey::PenWidth, StyleValue::Number(2.5));
        assert_eq!(
            style.value_lookup(StyleKey::PenWidth, StyleValue::Number(4.0)),
            StyleValue::Number(2.5)
        );
    }

    #[test]
    fn pen_resolution_applies_opacity() {
        let mut style = Style::new();
        style.set_value(StyleKey::PenColor, StyleValue::Color(Color::rgb(10, 20, 30)));
        style.set_value(StyleKey::PenOpacity, StyleValue::Number(0.5));
        style.set_value(StyleKey::PenWidth, StyleValue::Number(3.0));

        let pen = style.pen();
        assert_eq!(pen.color.r, 10);
        assert_eq!(pen.color.a, 128);
        assert!((pen.width - 3.0).abs() < 1e-9);
        assert_eq!(pen.style, PenStyle::Solid);
    }

    #[test]
    fn brush_opacity_zero_is_not_opaque() {
        let mut style = Style::new();
        style.set_value(StyleKey::BrushColor, StyleValue::Color(Color::WHITE));
        style.set_value(StyleKey::BrushOpacity, StyleValue::Number(0.0));
        assert!(!style.brush().is_opaque());
    }

    #[test]
    fn color_hex_round_trip() {
        let color = Color::new(18, 52, 86, 120);
        let parsed = Color::from_hex(&color.to_hex()).unwrap();
        assert_eq!(parsed, color);

        assert_eq!(Color::from_hex("#ff0000"), Ok(Color::rgb(255, 0, 0)));
        assert!(matches!(
            Color::from_hex("ff0000"),
            Err(ColorParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Color::from_hex("#ff00zz"),
            Err(ColorParseError::InvalidDigits(_))
        ));
    }

    #[test]
    fn unknown_enum_raw_values_are_rejected() {
        assert_eq!(PenStyle::from_raw(9), None);
        assert_eq!(PenCapStyle::from_raw(3), None);
        assert_eq!(BrushStyle::from_raw(2), None);
    }
}
