//! The `shape()` result type: a precise item outline combining the draw
//! path with its stroke band and fill region for hit testing.

use drawkit_core::{segment_distance, Point, Rect};
use lyon::algorithms::hit_test::hit_test_path;
use lyon::math::point;
use lyon::path::iterator::PathIterator;
use lyon::path::{FillRule, Path};

/// Floor applied to the stroke width used for hit testing, so that a very
/// thin or zero-width stroke still yields a clickable region. A view-scale
/// aware floor belongs to the host view; this is a fixed local-coordinate
/// fallback.
pub const MIN_HIT_STROKE_WIDTH: f64 = 0.5;

/// Curve flattening tolerance used when measuring distance to the outline.
const FLATTEN_TOLERANCE: f32 = 0.05;

/// An item's precise outline in local coordinates: the draw path, the
/// effective stroke width painted around it, and whether its interior is
/// filled.
#[derive(Debug, Clone)]
pub struct Outline {
    path: Path,
    stroke_width: f64,
    filled: bool,
}

impl Outline {
    /// Builds an outline from a draw path. The stored stroke width is
    /// `pen_width` raised to [`MIN_HIT_STROKE_WIDTH`].
    pub fn new(path: Path, pen_width: f64, filled: bool) -> Self {
        Self {
            path,
            stroke_width: pen_width.max(MIN_HIT_STROKE_WIDTH),
            filled,
        }
    }

    /// An empty outline, produced by degenerate items.
    pub fn empty() -> Self {
        Self {
            path: Path::new(),
            stroke_width: MIN_HIT_STROKE_WIDTH,
            filled: false,
        }
    }

    /// A filled rectangular outline; the default `shape()` fallback.
    pub fn from_rect(rect: Rect) -> Self {
        if !rect.is_valid() {
            return Self::empty();
        }
        let rect = rect.normalized();
        let mut builder = Path::builder();
        builder.begin(point(rect.left() as f32, rect.top() as f32));
        builder.line_to(point(rect.right() as f32, rect.top() as f32));
        builder.line_to(point(rect.right() as f32, rect.bottom() as f32));
        builder.line_to(point(rect.left() as f32, rect.bottom() as f32));
        builder.close();
        Self::new(builder.build(), 0.0, true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stroke width the outline is hit-tested with: the pen width with
    /// the minimum floor applied.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.path.iter().next().is_none()
    }

    /// True when the local position lies on the stroked outline or, for
    /// filled outlines, inside the path.
    pub fn contains(&self, pos: Point) -> bool {
        if self.is_empty() {
            return false;
        }

        if self.filled {
            let hit = hit_test_path(
                &point(pos.x as f32, pos.y as f32),
                self.path.iter(),
                FillRule::EvenOdd,
                FLATTEN_TOLERANCE,
            );
            if hit {
                return true;
            }
        }

        self.distance_to_boundary(pos) <= self.stroke_width / 2.0
    }

    /// Distance from a local position to the flattened outline boundary.
    fn distance_to_boundary(&self, pos: Point) -> f64 {
        let mut min_distance = f64::INFINITY;
        for event in self.path.iter().flattened(FLATTEN_TOLERANCE) {
            match event {
                lyon::path::Event::Line { from, to } => {
                    let a = Point::new(from.x as f64, from.y as f64);
                    let b = Point::new(to.x as f64, to.y as f64);
                    min_distance = min_distance.min(segment_distance(pos, a, b));
                }
                lyon::path::Event::End {
                    last,
                    first,
                    close: true,
                } => {
                    let a = Point::new(last.x as f64, last.y as f64);
                    let b = Point::new(first.x as f64, first.y as f64);
                    min_distance = min_distance.min(segment_distance(pos, a, b));
                }
                _ => {}
            }
        }
        min_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_outline_contains_nothing() {
        let outline = Outline::empty();
        assert!(outline.is_empty());
        assert!(!outline.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn rect_outline_hits_interior_and_stroke() {
        let outline = Outline::from_rect(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert!(outline.contains(Point::new(50.0, 25.0)));
        assert!(outline.contains(Point::new(0.0, 25.0)));
        assert!(!outline.contains(Point::new(200.0, 25.0)));
    }

    #[test]
    fn unfilled_outline_hits_only_the_stroke_band() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(100.0, 0.0));
        builder.line_to(point(100.0, 100.0));
        builder.line_to(point(0.0, 100.0));
        builder.close();
        let outline = Outline::new(builder.build(), 4.0, false);

        assert!(outline.contains(Point::new(50.0, 1.5)));
        assert!(!outline.contains(Point::new(50.0, 50.0)));
    }

    #[test]
    fn zero_width_pen_still_has_a_hit_band() {
        let mut builder = Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(10.0, 0.0));
        builder.end(false);
        let outline = Outline::new(builder.build(), 0.0, false);

        assert!((outline.stroke_width() - MIN_HIT_STROKE_WIDTH).abs() < 1e-9);
        assert!(outline.contains(Point::new(5.0, 0.2)));
        assert!(!outline.contains(Point::new(5.0, 2.0)));
    }
}
