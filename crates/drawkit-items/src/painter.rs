//! The narrow paint contract items draw through.

use drawkit_core::{Brush, Pen, Point, Rect};
use lyon::path::Path;

/// Paint backend supplied by the host when rendering items.
///
/// Items draw in local coordinates with the painter's current pen and
/// brush, and are required to restore both to their pre-call values before
/// `render` returns; leaking pen or brush state corrupts sibling items'
/// rendering.
pub trait Painter {
    fn pen(&self) -> Pen;

    fn set_pen(&mut self, pen: Pen);

    fn brush(&self) -> Brush;

    fn set_brush(&mut self, brush: Brush);

    /// Draws a rectangle with the given corner radii (zero radii draw sharp
    /// corners), stroked with the current pen and filled with the current
    /// brush.
    fn draw_rounded_rect(&mut self, rect: Rect, radius_x: f64, radius_y: f64);

    /// Draws a closed polygon through the given points in order.
    fn draw_polygon(&mut self, points: &[Point]);

    /// Draws an arbitrary path.
    fn draw_path(&mut self, path: &Path);
}
