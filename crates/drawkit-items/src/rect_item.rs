//! Rectangle item: eight control points on the rect's corners and edge
//! midpoints, with only the two opposite corners carrying independent state.

use std::any::Any;
use std::collections::HashMap;

use drawkit_core::{
    property_names, Brush, Pen, Point, PropertyValue, Rect, StyleKey, StyleValue,
};
use lyon::math::point;
use lyon::path::Path;

use crate::item::{Item, ItemBase};
use crate::outline::Outline;
use crate::painter::Painter;
use crate::point::{ItemPoint, PointFlags, PointId};

/// Canonical indices of a rect item's eight points, clockwise from the
/// top-left corner. The six non-corner points are derived drag handles,
/// always recomputed from the TopLeft/BottomRight pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum RectPoint {
    TopLeft = 0,
    TopMiddle = 1,
    TopRight = 2,
    MiddleRight = 3,
    BottomRight = 4,
    BottomMiddle = 5,
    BottomLeft = 6,
    MiddleLeft = 7,
}

/// Number of points a rect item owns.
pub const RECT_POINT_COUNT: usize = 8;

/// A rectangle item with an optional rounded corner.
#[derive(Debug)]
pub struct RectItem {
    base: ItemBase,
}

impl Default for RectItem {
    fn default() -> Self {
        Self::new()
    }
}

impl RectItem {
    /// Creates a rect item with its eight points at the local origin.
    ///
    /// Style slots are seeded with lookup-with-fallback semantics: a slot
    /// already defined on the style is kept, otherwise the default below is
    /// stored.
    pub fn new() -> Self {
        let mut base = ItemBase::new();
        let flags = PointFlags::CONTROL | PointFlags::CONNECTION;
        for _ in 0..RECT_POINT_COUNT {
            base.add_point(ItemPoint::new(Point::default(), flags));
        }

        seed_stroke_fill_defaults(&mut base);
        Self { base }
    }

    /// Repositions all eight points onto the given rect's corners and edge
    /// midpoints, in canonical order.
    pub fn set_rect(&mut self, rect: Rect) {
        update_points(&mut self.base, rect);
    }

    pub fn set_rect_xywh(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.set_rect(Rect::new(left, top, width, height));
    }

    /// The rect spanned by the TopLeft and BottomRight points. The other
    /// six points are visual handles and contribute no state.
    pub fn rect(&self) -> Rect {
        let points = self.base.points();
        if points.len() >= RECT_POINT_COUNT {
            Rect::from_points(
                points[RectPoint::TopLeft as usize].position(),
                points[RectPoint::BottomRight as usize].position(),
            )
        } else {
            Rect::default()
        }
    }

    /// Sets both corner radii independently.
    pub fn set_corner_radii(&mut self, radius_x: f64, radius_y: f64) {
        let style = self.base.style_mut();
        style.set_value(StyleKey::CornerRadiusX, StyleValue::Number(radius_x));
        style.set_value(StyleKey::CornerRadiusY, StyleValue::Number(radius_y));
    }

    pub fn corner_radius_x(&self) -> f64 {
        self.base
            .style()
            .value_lookup(StyleKey::CornerRadiusX, StyleValue::Number(0.0))
            .as_number()
            .unwrap_or(0.0)
    }

    pub fn corner_radius_y(&self) -> f64 {
        self.base
            .style()
            .value_lookup(StyleKey::CornerRadiusY, StyleValue::Number(0.0))
            .as_number()
            .unwrap_or(0.0)
    }

    pub fn pen(&self) -> Pen {
        self.base.style().pen()
    }

    pub fn brush(&self) -> Brush {
        self.base.style().brush()
    }
}

impl Item for RectItem {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn copy(&self) -> Box<dyn Item> {
        Box::new(RectItem {
            base: self.base.copied(),
        })
    }

    fn bounding_rect(&self) -> Rect {
        if !self.is_valid() {
            return Rect::default();
        }
        self.rect().normalized().adjusted(self.pen().width / 2.0)
    }

    fn shape(&self) -> Outline {
        if !self.is_valid() {
            return Outline::empty();
        }

        let rect = self.rect().normalized();
        let path = rounded_rect_path(rect, self.corner_radius_x(), self.corner_radius_y());
        Outline::new(path, self.pen().width, self.brush().is_opaque())
    }

    fn is_valid(&self) -> bool {
        let points = self.base.points();
        points.len() >= RECT_POINT_COUNT
            && points[RectPoint::TopLeft as usize].position()
                != points[RectPoint::BottomRight as usize].position()
    }

    fn render(&self, painter: &mut dyn Painter) {
        if !self.is_valid() {
            return;
        }

        let scene_pen = painter.pen();
        let scene_brush = painter.brush();

        painter.set_pen(self.pen());
        painter.set_brush(self.brush());
        painter.draw_rounded_rect(self.rect(), self.corner_radius_x(), self.corner_radius_y());

        painter.set_pen(scene_pen);
        painter.set_brush(scene_brush);
    }

    /// Resizes so that every point stays on the rect's perimeter, then
    /// re-anchors the local origin onto the TopLeft point.
    fn resize_event(&mut self, point: PointId, pos: Point) {
        self.base.resize_default(point, pos);

        if let Some(index) = self.base.point_index(point) {
            if self.base.points().len() >= RECT_POINT_COUNT && index < RECT_POINT_COUNT {
                let dragged = self.base.points()[index].position();
                let mut rect = self.rect();
                match index {
                    0 => rect.set_top_left(dragged),
                    1 => rect.set_top(dragged.y),
                    2 => rect.set_top_right(dragged),
                    3 => rect.set_right(dragged.x),
                    4 => rect.set_bottom_right(dragged),
                    5 => rect.set_bottom(dragged.y),
                    6 => rect.set_bottom_left(dragged),
                    7 => rect.set_left(dragged.x),
                    _ => {}
                }
                update_points(&mut self.base, rect);
            }
        }

        // Shift the point list and position so point 0 sits at local (0, 0)
        // while every point keeps its scene location.
        if let Some(first) = self.base.points().first() {
            let first_pos = first.position();
            let scene_pos = self.base.map_to_scene(first_pos);
            for p in self.base.points_mut() {
                p.set_position(p.position() - first_pos);
            }
            self.base.set_position(scene_pos);
        }
    }

    fn set_properties(&mut self, properties: &HashMap<String, PropertyValue>) {
        apply_stroke_fill_properties(&mut self.base, properties);

        if let Some(PropertyValue::Number(radius)) =
            properties.get(property_names::CORNER_RADIUS_X)
        {
            self.base
                .style_mut()
                .set_value(StyleKey::CornerRadiusX, StyleValue::Number(*radius));
        }
        if let Some(PropertyValue::Number(radius)) =
            properties.get(property_names::CORNER_RADIUS_Y)
        {
            self.base
                .style_mut()
                .set_value(StyleKey::CornerRadiusY, StyleValue::Number(*radius));
        }
    }

    fn properties(&self) -> HashMap<String, PropertyValue> {
        let mut properties = stroke_fill_properties(&self.base);
        properties.insert(
            property_names::CORNER_RADIUS_X.to_string(),
            PropertyValue::Number(self.corner_radius_x()),
        );
        properties.insert(
            property_names::CORNER_RADIUS_Y.to_string(),
            PropertyValue::Number(self.corner_radius_y()),
        );
        properties
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn update_points(base: &mut ItemBase, rect: Rect) {
    let center = rect.center();
    let positions = [
        Point::new(rect.left(), rect.top()),
        Point::new(center.x, rect.top()),
        Point::new(rect.right(), rect.top()),
        Point::new(rect.right(), center.y),
        Point::new(rect.right(), rect.bottom()),
        Point::new(center.x, rect.bottom()),
        Point::new(rect.left(), rect.bottom()),
        Point::new(rect.left(), center.y),
    ];

    let points = base.points_mut();
    for (p, position) in points.iter_mut().zip(positions) {
        p.set_position(position);
    }
}

/// Seeds pen and brush style slots without overwriting already-set values.
pub(crate) fn seed_stroke_fill_defaults(base: &mut ItemBase) {
    use drawkit_core::{BrushStyle, Color, PenCapStyle, PenJoinStyle, PenStyle};

    let defaults = [
        (
            StyleKey::PenStyle,
            StyleValue::Integer(PenStyle::Solid as u32),
        ),
        (StyleKey::PenColor, StyleValue::Color(Color::BLACK)),
        (StyleKey::PenOpacity, StyleValue::Number(1.0)),
        (StyleKey::PenWidth, StyleValue::Number(1.0)),
        (
            StyleKey::PenCapStyle,
            StyleValue::Integer(PenCapStyle::Round as u32),
        ),
        (
            StyleKey::PenJoinStyle,
            StyleValue::Integer(PenJoinStyle::Round as u32),
        ),
        (
            StyleKey::BrushStyle,
            StyleValue::Integer(BrushStyle::Solid as u32),
        ),
        (StyleKey::BrushColor, StyleValue::Color(Color::WHITE)),
        (StyleKey::BrushOpacity, StyleValue::Number(1.0)),
    ];

    let style = base.style_mut();
    for (key, fallback) in defaults {
        let value = style.value_lookup(key, fallback);
        style.set_value(key, value);
    }
}

/// Applies the shared pen/brush property vocabulary. Unknown names and
/// mistyped or out-of-range values are ignored.
pub(crate) fn apply_stroke_fill_properties(
    base: &mut ItemBase,
    properties: &HashMap<String, PropertyValue>,
) {
    use drawkit_core::{PenCapStyle, PenJoinStyle, PenStyle};

    let style = base.style_mut();
    if let Some(PropertyValue::Color(color)) = properties.get(property_names::PEN_COLOR) {
        style.set_value(StyleKey::PenColor, StyleValue::Color(*color));
    }
    if let Some(PropertyValue::Number(width)) = properties.get(property_names::PEN_WIDTH) {
        style.set_value(StyleKey::PenWidth, StyleValue::Number(*width));
    }
    if let Some(PropertyValue::Integer(raw)) = properties.get(property_names::PEN_STYLE) {
        if PenStyle::from_raw(*raw).is_some() {
            style.set_value(StyleKey::PenStyle, StyleValue::Integer(*raw));
        }
    }
    if let Some(PropertyValue::Integer(raw)) = properties.get(property_names::PEN_CAP_STYLE) {
        if PenCapStyle::from_raw(*raw).is_some() {
            style.set_value(StyleKey::PenCapStyle, StyleValue::Integer(*raw));
        }
    }
    if let Some(PropertyValue::Integer(raw)) = properties.get(property_names::PEN_JOIN_STYLE) {
        if PenJoinStyle::from_raw(*raw).is_some() {
            style.set_value(StyleKey::PenJoinStyle, StyleValue::Integer(*raw));
        }
    }
    if let Some(PropertyValue::Color(color)) = properties.get(property_names::BRUSH_COLOR) {
        style.set_value(StyleKey::BrushColor, StyleValue::Color(*color));
    }
}

/// The shared pen/brush property vocabulary, resolved from the style.
///
/// Colors are exported as stored, before the opacity slots are folded in;
/// applying the map back through [`apply_stroke_fill_properties`] must not
/// apply opacity a second time.
pub(crate) fn stroke_fill_properties(base: &ItemBase) -> HashMap<String, PropertyValue> {
    use drawkit_core::Color;

    let style = base.style();
    let pen = style.pen();
    let pen_color = style
        .value_lookup(StyleKey::PenColor, StyleValue::Color(Color::BLACK))
        .as_color()
        .unwrap_or(Color::BLACK);
    let brush_color = style
        .value_lookup(StyleKey::BrushColor, StyleValue::Color(Color::WHITE))
        .as_color()
        .unwrap_or(Color::WHITE);

    let mut properties = HashMap::new();
    properties.insert(
        property_names::PEN_COLOR.to_string(),
        PropertyValue::Color(pen_color),
    );
    properties.insert(
        property_names::PEN_WIDTH.to_string(),
        PropertyValue::Number(pen.width),
    );
    properties.insert(
        property_names::PEN_STYLE.to_string(),
        PropertyValue::Integer(pen.style as u32),
    );
    properties.insert(
        property_names::PEN_CAP_STYLE.to_string(),
        PropertyValue::Integer(pen.cap as u32),
    );
    properties.insert(
        property_names::PEN_JOIN_STYLE.to_string(),
        PropertyValue::Integer(pen.join as u32),
    );
    properties.insert(
        property_names::BRUSH_COLOR.to_string(),
        PropertyValue::Color(brush_color),
    );
    properties
}

fn rounded_rect_path(rect: Rect, radius_x: f64, radius_y: f64) -> Path {
    let rx = radius_x.clamp(0.0, rect.width / 2.0);
    let ry = radius_y.clamp(0.0, rect.height / 2.0);

    let x = rect.left() as f32;
    let y = rect.top() as f32;
    let right = rect.right() as f32;
    let bottom = rect.bottom() as f32;

    let mut builder = Path::builder();
    if rx > 0.0 && ry > 0.0 {
        let rx = rx as f32;
        let ry = ry as f32;
        builder.begin(point(x + rx, y));
        builder.line_to(point(right - rx, y));
        builder.quadratic_bezier_to(point(right, y), point(right, y + ry));
        builder.line_to(point(right, bottom - ry));
        builder.quadratic_bezier_to(point(right, bottom), point(right - rx, bottom));
        builder.line_to(point(x + rx, bottom));
        builder.quadratic_bezier_to(point(x, bottom), point(x, bottom - ry));
        builder.line_to(point(x, y + ry));
        builder.quadratic_bezier_to(point(x, y), point(x + rx, y));
        builder.close();
    } else {
        builder.begin(point(x, y));
        builder.line_to(point(right, y));
        builder.line_to(point(right, bottom));
        builder.line_to(point(x, bottom));
        builder.close();
    }
    builder.build()
}
