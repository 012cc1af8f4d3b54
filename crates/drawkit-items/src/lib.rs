//! # DrawKit Items
//!
//! The item model for an interactive 2D vector-drawing canvas: a base item
//! abstraction with position, transform, capability flags, and resizable
//! control points, plus concrete rectangle and polygon items.
//!
//! The owning scene, view event dispatch, undo history, and the actual
//! paint backend are external collaborators. They reach this model through
//! the [`Item`] trait, the [`Painter`] trait, and the flat property maps
//! exposed by `set_properties`/`properties`.
//!
//! Everything is single-threaded and synchronous: geometry queries are pure
//! with respect to point state, and item points are owned exclusively by
//! their item.

pub mod item;
pub mod outline;
pub mod painter;
pub mod point;
pub mod polygon_item;
pub mod rect_item;

pub use item::{copy_items, Item, ItemBase, ItemFlags, SceneId};
pub use outline::{Outline, MIN_HIT_STROKE_WIDTH};
pub use painter::Painter;
pub use point::{ItemId, ItemPoint, PointFlags, PointId, PointRef};
pub use polygon_item::{PolygonItem, POLYGON_MIN_POINTS};
pub use rect_item::{RectItem, RectPoint, RECT_POINT_COUNT};
