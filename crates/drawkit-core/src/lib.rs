//! # DrawKit Core
//!
//! Geometry and style primitives for the DrawKit item model: points, rects,
//! affine transforms, colors, pens, brushes, and the per-item style store.

pub mod geometry;
pub mod style;

pub use geometry::{
    mirror_horizontal, mirror_vertical, quarter_turn, quarter_turn_back, segment_distance,
    transform_point, Point, Rect, Transform,
};

pub use style::{
    property_names, Brush, BrushStyle, Color, ColorParseError, Pen, PenCapStyle, PenJoinStyle,
    PenStyle, PropertyValue, Style, StyleKey, StyleValue,
};
