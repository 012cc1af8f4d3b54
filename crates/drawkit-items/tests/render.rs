//! Rendering: items paint with their own pen and brush and leave the
//! painter state exactly as found.

mod common;

use common::{DrawCall, RecordingPainter};
use drawkit_core::{Color, Pen, PenStyle, Point, StyleKey, StyleValue};
use drawkit_items::{Item, Painter, PolygonItem, RectItem};

fn scene_painter() -> RecordingPainter {
    let scene_pen = Pen {
        color: Color::rgb(255, 0, 255),
        width: 9.0,
        style: PenStyle::Dot,
        ..Pen::default()
    };
    let scene_brush = drawkit_core::Brush {
        color: Color::rgb(0, 255, 0),
        ..Default::default()
    };
    RecordingPainter::new(scene_pen, scene_brush)
}

#[test]
fn rect_paints_with_its_style_and_restores_the_painter() {
    let mut item = RectItem::new();
    item.set_rect_xywh(0.0, 0.0, 100.0, 50.0);
    item.set_corner_radii(4.0, 6.0);

    let mut painter = scene_painter();
    let scene_pen = painter.pen();
    let scene_brush = painter.brush();

    item.render(&mut painter);

    assert_eq!(painter.calls.len(), 1);
    match &painter.calls[0] {
        DrawCall::RoundedRect {
            rect,
            radius_x,
            radius_y,
            pen,
            brush,
        } => {
            assert_eq!(rect.top_left(), Point::new(0.0, 0.0));
            assert_eq!(rect.bottom_right(), Point::new(100.0, 50.0));
            assert!((radius_x - 4.0).abs() < 1e-9);
            assert!((radius_y - 6.0).abs() < 1e-9);
            assert_eq!(*pen, item.pen());
            assert_eq!(*brush, item.brush());
        }
        other => panic!("expected a rounded rect call, got {other:?}"),
    }

    // The painter carries the scene state again after the call.
    assert_eq!(painter.pen(), scene_pen);
    assert_eq!(painter.brush(), scene_brush);
}

#[test]
fn polygon_paints_its_vertices_in_order() {
    let mut item = PolygonItem::new();
    let vertices = vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(5.0, 8.0),
    ];
    item.set_polygon(&vertices);

    let mut painter = scene_painter();
    let scene_pen = painter.pen();

    item.render(&mut painter);

    assert_eq!(painter.calls.len(), 1);
    match &painter.calls[0] {
        DrawCall::Polygon { points, pen, brush } => {
            assert_eq!(points, &vertices);
            assert_eq!(*pen, item.pen());
            assert_eq!(*brush, item.brush());
        }
        other => panic!("expected a polygon call, got {other:?}"),
    }
    assert_eq!(painter.pen(), scene_pen);
}

#[test]
fn degenerate_items_paint_nothing() {
    let rect = RectItem::new();
    let polygon = PolygonItem::new();

    let mut painter = scene_painter();
    let scene_pen = painter.pen();

    rect.render(&mut painter);
    polygon.render(&mut painter);

    assert!(painter.calls.is_empty());
    assert_eq!(painter.pen(), scene_pen);
}

#[test]
fn transparent_brush_leaves_the_interior_unhittable() {
    let mut item = RectItem::new();
    item.set_rect_xywh(0.0, 0.0, 100.0, 50.0);
    item.base_mut()
        .style_mut()
        .set_value(StyleKey::BrushColor, StyleValue::Color(Color::TRANSPARENT));

    let shape = item.shape();
    assert!(!shape.is_filled());
    assert!(!shape.contains(Point::new(50.0, 25.0)));
    // The stroke band still hits.
    assert!(shape.contains(Point::new(0.0, 25.0)));
}
