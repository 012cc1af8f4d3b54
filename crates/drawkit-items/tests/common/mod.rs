//! Shared test support: a painter that records draw calls and its pen/brush
//! state so tests can check what items painted and that they restored the
//! painter state.

use drawkit_core::{Brush, Pen, Point, Rect};
use drawkit_items::Painter;
use lyon::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    RoundedRect {
        rect: Rect,
        radius_x: f64,
        radius_y: f64,
        pen: Pen,
        brush: Brush,
    },
    Polygon {
        points: Vec<Point>,
        pen: Pen,
        brush: Brush,
    },
    Path {
        pen: Pen,
        brush: Brush,
    },
}

pub struct RecordingPainter {
    pen: Pen,
    brush: Brush,
    pub calls: Vec<DrawCall>,
}

impl RecordingPainter {
    pub fn new(pen: Pen, brush: Brush) -> Self {
        Self {
            pen,
            brush,
            calls: Vec::new(),
        }
    }
}

impl Painter for RecordingPainter {
    fn pen(&self) -> Pen {
        self.pen
    }

    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn brush(&self) -> Brush {
        self.brush
    }

    fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius_x: f64, radius_y: f64) {
        self.calls.push(DrawCall::RoundedRect {
            rect,
            radius_x,
            radius_y,
            pen: self.pen,
            brush: self.brush,
        });
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            pen: self.pen,
            brush: self.brush,
        });
    }

    fn draw_path(&mut self, _path: &Path) {
        self.calls.push(DrawCall::Path {
            pen: self.pen,
            brush: self.brush,
        });
    }
}
