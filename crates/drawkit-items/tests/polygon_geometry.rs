//! Polygon item geometry: vertex management, the three-point minimum, and
//! edge-based point insertion.

use drawkit_core::Point;
use drawkit_items::{Item, ItemFlags, PolygonItem, POLYGON_MIN_POINTS};

fn triangle() -> PolygonItem {
    let mut item = PolygonItem::new();
    item.set_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(5.0, 8.0),
    ]);
    item
}

#[test]
fn polygon_items_allow_point_insertion_and_removal() {
    let item = PolygonItem::new();
    let flags = item.base().flags();
    assert!(flags.contains(ItemFlags::INSERT_POINTS));
    assert!(flags.contains(ItemFlags::REMOVE_POINTS));
}

#[test]
fn set_polygon_replaces_the_point_list() {
    let mut item = triangle();
    let old_ids: Vec<_> = item.base().points().iter().map(|p| p.id()).collect();

    item.set_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 4.0),
        Point::new(0.0, 4.0),
    ]);
    assert_eq!(item.base().points().len(), 4);
    for point in item.base().points() {
        assert!(!old_ids.contains(&point.id()));
    }
}

#[test]
fn removal_refuses_at_the_minimum() {
    let item = triangle();
    assert_eq!(item.base().points().len(), POLYGON_MIN_POINTS);
    assert!(item.item_point_to_remove(Point::new(0.0, 0.0)).is_none());
}

#[test]
fn removal_targets_the_nearest_vertex_above_the_minimum() {
    let mut item = PolygonItem::new();
    item.set_polygon(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ]);

    let id = item.item_point_to_remove(Point::new(9.0, 9.0)).unwrap();
    assert_eq!(item.base().point_index(id), Some(2));

    // Removal itself is the host's call; applying it keeps the item valid.
    let removed = item.base_mut().remove_point(id).unwrap();
    assert_eq!(removed.position(), Point::new(10.0, 10.0));
    assert_eq!(item.base().points().len(), POLYGON_MIN_POINTS);
    assert!(item.is_valid());
}

#[test]
fn inserted_point_is_spliced_into_the_nearest_edge() {
    let mut item = triangle();
    let (index, point) = item.item_point_to_insert(Point::new(5.0, 0.5)).unwrap();
    assert_eq!(index, 1);

    item.base_mut().insert_point(index, point);
    assert_eq!(item.base().points().len(), 4);
    assert_eq!(
        item.polygon(),
        vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.5),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ]
    );
}

#[test]
fn all_coincident_points_make_the_polygon_degenerate() {
    let mut item = PolygonItem::new();
    assert!(!item.is_valid());
    assert!(item.shape().is_empty());
    assert!(!item.bounding_rect().is_valid());

    item.set_polygon(&[
        Point::new(3.0, 3.0),
        Point::new(3.0, 3.0),
        Point::new(3.0, 3.0),
    ]);
    assert!(!item.is_valid());
}

#[test]
fn bounding_rect_spans_the_vertices_plus_pen() {
    let item = triangle();
    let bounds = item.bounding_rect();
    assert!((bounds.left() - -0.5).abs() < 1e-9);
    assert!((bounds.top() - -0.5).abs() < 1e-9);
    assert!((bounds.right() - 10.5).abs() < 1e-9);
    assert!((bounds.bottom() - 8.5).abs() < 1e-9);
}

#[test]
fn shape_hits_interior_and_edges() {
    let item = triangle();
    let shape = item.shape();
    assert!(shape.contains(Point::new(5.0, 3.0)));
    // On the closing edge from the apex back to the first vertex.
    assert!(shape.contains(Point::new(2.5, 4.0)));
    assert!(!shape.contains(Point::new(-5.0, -5.0)));
}

#[test]
fn copies_carry_the_vertex_list() {
    let item = triangle();
    let copy = item.copy();
    let copy = copy.as_any().downcast_ref::<PolygonItem>().unwrap();
    assert_ne!(copy.base().id(), item.base().id());
    assert_eq!(copy.polygon(), item.polygon());
}
