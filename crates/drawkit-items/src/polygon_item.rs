//! Polygon item: one control point per vertex, with user-driven vertex
//! insertion and removal.

use std::any::Any;
use std::collections::HashMap;

use drawkit_core::{segment_distance, Brush, Pen, Point, PropertyValue, Rect};
use lyon::math::point;
use lyon::path::Path;
use tracing::trace;

use crate::item::{Item, ItemBase, ItemFlags};
use crate::outline::Outline;
use crate::painter::Painter;
use crate::point::{ItemPoint, PointFlags, PointId};
use crate::rect_item::{
    apply_stroke_fill_properties, seed_stroke_fill_defaults, stroke_fill_properties,
};

/// Minimum number of vertices a polygon item may hold.
pub const POLYGON_MIN_POINTS: usize = 3;

/// A polygon item whose shape is literally its ordered point positions.
#[derive(Debug)]
pub struct PolygonItem {
    base: ItemBase,
}

impl Default for PolygonItem {
    fn default() -> Self {
        Self::new()
    }
}

impl PolygonItem {
    /// Creates a polygon item with the minimum three points at the local
    /// origin. Style slots are seeded with lookup-with-fallback semantics.
    pub fn new() -> Self {
        let mut base = ItemBase::new();
        let flags = PointFlags::CONTROL | PointFlags::CONNECTION;
        for _ in 0..POLYGON_MIN_POINTS {
            base.add_point(ItemPoint::new(Point::default(), flags));
        }
        base.set_flags(ItemFlags::standard() | ItemFlags::INSERT_POINTS | ItemFlags::REMOVE_POINTS);

        seed_stroke_fill_defaults(&mut base);
        Self { base }
    }

    /// Replaces the point list with one point per given vertex. Point
    /// identity is not preserved; positions govern.
    pub fn set_polygon(&mut self, vertices: &[Point]) {
        self.base.clear_points();
        let flags = PointFlags::CONTROL | PointFlags::CONNECTION;
        for vertex in vertices {
            self.base.add_point(ItemPoint::new(*vertex, flags));
        }
    }

    /// The polygon's vertices in order, in local coordinates.
    pub fn polygon(&self) -> Vec<Point> {
        self.base.points().iter().map(|p| p.position()).collect()
    }

    pub fn pen(&self) -> Pen {
        self.base.style().pen()
    }

    pub fn brush(&self) -> Brush {
        self.base.style().brush()
    }
}

impl Item for PolygonItem {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn copy(&self) -> Box<dyn Item> {
        Box::new(PolygonItem {
            base: self.base.copied(),
        })
    }

    fn bounding_rect(&self) -> Rect {
        if !self.is_valid() {
            return Rect::default();
        }
        Rect::bounding(self.polygon()).adjusted(self.pen().width / 2.0)
    }

    fn shape(&self) -> Outline {
        if !self.is_valid() {
            return Outline::empty();
        }

        let vertices = self.polygon();
        let mut builder = Path::builder();
        builder.begin(point(vertices[0].x as f32, vertices[0].y as f32));
        for vertex in &vertices[1..] {
            builder.line_to(point(vertex.x as f32, vertex.y as f32));
        }
        builder.close();

        Outline::new(builder.build(), self.pen().width, self.brush().is_opaque())
    }

    /// A polygon item is degenerate when every point shares one position.
    fn is_valid(&self) -> bool {
        let points = self.base.points();
        match points.first() {
            Some(first) => points.iter().any(|p| p.position() != first.position()),
            None => false,
        }
    }

    fn render(&self, painter: &mut dyn Painter) {
        if !self.is_valid() {
            return;
        }

        let scene_pen = painter.pen();
        let scene_brush = painter.brush();

        painter.set_pen(self.pen());
        painter.set_brush(self.brush());
        painter.draw_polygon(&self.polygon());

        painter.set_pen(scene_pen);
        painter.set_brush(scene_brush);
    }

    /// Proposes a new vertex on the edge nearest to `pos`, inserted right
    /// after that edge's start vertex.
    fn item_point_to_insert(&self, pos: Point) -> Option<(usize, ItemPoint)> {
        let vertices = self.polygon();
        if vertices.len() < 2 {
            return None;
        }

        let mut nearest_edge = 0;
        let mut nearest_distance = f64::INFINITY;
        for i in 0..vertices.len() {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            let distance = segment_distance(pos, a, b);
            if distance < nearest_distance {
                nearest_distance = distance;
                nearest_edge = i;
            }
        }

        trace!(edge = nearest_edge, "proposing polygon point insertion");
        let flags = PointFlags::CONTROL | PointFlags::CONNECTION;
        Some((nearest_edge + 1, ItemPoint::new(pos, flags)))
    }

    /// Proposes removing the point nearest to `pos`. Refuses when the item
    /// is at the polygon minimum of three points.
    fn item_point_to_remove(&self, pos: Point) -> Option<PointId> {
        if self.base.points().len() <= POLYGON_MIN_POINTS {
            return None;
        }
        self.base.point_nearest(pos).map(|p| p.id())
    }

    fn set_properties(&mut self, properties: &HashMap<String, PropertyValue>) {
        apply_stroke_fill_properties(&mut self.base, properties);
    }

    fn properties(&self) -> HashMap<String, PropertyValue> {
        stroke_fill_properties(&self.base)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_polygon_is_degenerate_until_spread() {
        let mut item = PolygonItem::new();
        assert_eq!(item.base().points().len(), POLYGON_MIN_POINTS);
        assert!(!item.is_valid());

        item.set_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ]);
        assert!(item.is_valid());
    }

    #[test]
    fn insertion_targets_the_nearest_edge() {
        let mut item = PolygonItem::new();
        item.set_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);

        // Near the bottom edge, which runs from vertex 2 to vertex 3.
        let (index, point) = item.item_point_to_insert(Point::new(5.0, 9.5)).unwrap();
        assert_eq!(index, 3);
        assert_eq!(point.position(), Point::new(5.0, 9.5));
        assert!(point.is_control());
        assert!(point.is_connection());

        // Near the closing edge from the last vertex back to the first.
        let (index, _) = item.item_point_to_insert(Point::new(0.5, 5.0)).unwrap();
        assert_eq!(index, 4);
    }
}
