//! Geometric primitives shared by every item: points, rects, and the 2D
//! affine transform used for scene/local coordinate mapping.

use std::ops::{Add, Neg, Sub};

use lyon::geom::euclid;
use serde::{Deserialize, Serialize};

/// A 2D affine transform in f64, relating an item's local coordinates to
/// scene-delta coordinates.
pub type Transform = euclid::default::Transform2D<f64>;

/// Represents a 2D location with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Applies a transform to a point.
pub fn transform_point(transform: &Transform, p: Point) -> Point {
    let q = transform.transform_point(euclid::default::Point2D::new(p.x, p.y));
    Point::new(q.x, q.y)
}

/// The exact quarter turn used by rotate events: (x, y) -> (-y, x), a
/// clockwise step in y-down scene coordinates.
pub fn quarter_turn() -> Transform {
    Transform::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0)
}

/// The exact inverse of [`quarter_turn`]: (x, y) -> (y, -x).
pub fn quarter_turn_back() -> Transform {
    Transform::new(0.0, -1.0, 1.0, 0.0, 0.0, 0.0)
}

/// Mirror about the vertical axis, used by horizontal flip events.
pub fn mirror_horizontal() -> Transform {
    Transform::scale(-1.0, 1.0)
}

/// Mirror about the horizontal axis, used by vertical flip events.
pub fn mirror_vertical() -> Transform {
    Transform::scale(1.0, -1.0)
}

/// Perpendicular distance from a point to the segment between `a` and `b`.
///
/// Falls back to the plain point distance when the segment is degenerate.
pub fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq < f64::EPSILON {
        return p.distance_to(&a);
    }

    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + ab.x * t, a.y + ab.y * t);
    p.distance_to(&closest)
}

/// An axis-aligned rectangle.
///
/// Width and height may be negative while a rect is being edited (dragging a
/// corner past its opposite corner); callers that need a well-formed rect go
/// through [`Rect::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rect spanning the two given corner points.
    pub fn from_points(top_left: Point, bottom_right: Point) -> Self {
        Self::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }

    /// An equivalent rect with non-negative width and height.
    pub fn normalized(&self) -> Rect {
        let mut rect = *self;
        if rect.width < 0.0 {
            rect.x += rect.width;
            rect.width = -rect.width;
        }
        if rect.height < 0.0 {
            rect.y += rect.height;
            rect.height = -rect.height;
        }
        rect
    }

    /// True when the normalized rect has strictly positive extent in both
    /// axes.
    pub fn is_valid(&self) -> bool {
        self.width.abs() > 0.0 && self.height.abs() > 0.0
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// Moves the left edge, keeping the right edge fixed.
    pub fn set_left(&mut self, left: f64) {
        self.width = self.right() - left;
        self.x = left;
    }

    /// Moves the top edge, keeping the bottom edge fixed.
    pub fn set_top(&mut self, top: f64) {
        self.height = self.bottom() - top;
        self.y = top;
    }

    /// Moves the right edge, keeping the left edge fixed.
    pub fn set_right(&mut self, right: f64) {
        self.width = right - self.x;
    }

    /// Moves the bottom edge, keeping the top edge fixed.
    pub fn set_bottom(&mut self, bottom: f64) {
        self.height = bottom - self.y;
    }

    /// Moves the top-left corner, keeping the bottom-right corner fixed.
    pub fn set_top_left(&mut self, p: Point) {
        self.set_left(p.x);
        self.set_top(p.y);
    }

    /// Moves the top-right corner, keeping the bottom-left corner fixed.
    pub fn set_top_right(&mut self, p: Point) {
        self.set_right(p.x);
        self.set_top(p.y);
    }

    /// Moves the bottom-left corner, keeping the top-right corner fixed.
    pub fn set_bottom_left(&mut self, p: Point) {
        self.set_left(p.x);
        self.set_bottom(p.y);
    }

    /// Moves the bottom-right corner, keeping the top-left corner fixed.
    pub fn set_bottom_right(&mut self, p: Point) {
        self.set_right(p.x);
        self.set_bottom(p.y);
    }

    /// Grows the rect outward by `amount` on every side.
    pub fn adjusted(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// The smallest rect containing both normalized rects.
    pub fn united(&self, other: &Rect) -> Rect {
        let a = self.normalized();
        let b = other.normalized();
        let left = a.left().min(b.left());
        let top = a.top().min(b.top());
        let right = a.right().max(b.right());
        let bottom = a.bottom().max(b.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    pub fn contains(&self, p: Point) -> bool {
        let rect = self.normalized();
        rect.left() <= p.x && p.x <= rect.right() && rect.top() <= p.y && p.y <= rect.bottom()
    }

    /// Bounding rect of a set of points. Empty for an empty slice.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Rect {
        let mut iter = points.into_iter();
        let first = match iter.next() {
            Some(p) => p,
            None => return Rect::default(),
        };

        let mut left = first.x;
        let mut top = first.y;
        let mut right = first.x;
        let mut bottom = first.y;
        for p in iter {
            left = left.min(p.x);
            top = top.min(p.y);
            right = right.max(p.x);
            bottom = bottom.max(p.y);
        }
        Rect::new(left, top, right - left, bottom - top)
    }
}
