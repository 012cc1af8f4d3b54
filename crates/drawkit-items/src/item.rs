//! The canvas item abstraction: shared item state, the `Item` trait that
//! concrete shapes implement, and list-level copying.

use std::any::Any;
use std::collections::HashMap;

use bitflags::bitflags;
use drawkit_core::{
    mirror_horizontal, mirror_vertical, quarter_turn, quarter_turn_back, transform_point, Point,
    PropertyValue, Rect, Style, Transform,
};
use smallvec::SmallVec;
use tracing::debug;
use uuid::Uuid;

use crate::outline::Outline;
use crate::painter::Painter;
use crate::point::{ItemId, ItemPoint, PointId, PointRef};

/// Identifier handle of the scene an item currently belongs to. The scene
/// owns the association; items only carry the handle back.
pub type SceneId = Uuid;

bitflags! {
    /// Capability flags gating which interaction handlers the host view is
    /// allowed to invoke on an item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ItemFlags: u32 {
        const MOVABLE = 0x0001;
        const RESIZABLE = 0x0002;
        const ROTATABLE = 0x0004;
        const FLIPPABLE = 0x0008;
        const SELECTABLE = 0x0010;
        const HIDABLE = 0x0020;
        const DELETABLE = 0x0040;
        const INSERT_POINTS = 0x0080;
        const REMOVE_POINTS = 0x0100;
    }
}

impl ItemFlags {
    /// Flags set on newly constructed items.
    pub fn standard() -> Self {
        ItemFlags::MOVABLE
            | ItemFlags::RESIZABLE
            | ItemFlags::ROTATABLE
            | ItemFlags::FLIPPABLE
            | ItemFlags::SELECTABLE
            | ItemFlags::DELETABLE
    }
}

/// State shared by every item: position, transform, flags, visibility,
/// selection, the owned point list, the style store, and the scene handle.
///
/// All geometric state except `position` is expressed in the item's local
/// coordinate frame; local (0, 0) is the item's logical origin.
#[derive(Debug, Clone)]
pub struct ItemBase {
    id: ItemId,
    scene: Option<SceneId>,
    position: Point,
    transform: Transform,
    transform_inverse: Transform,
    flags: ItemFlags,
    points: Vec<ItemPoint>,
    visible: bool,
    selected: bool,
    style: Style,
}

impl Default for ItemBase {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemBase {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            scene: None,
            position: Point::default(),
            transform: Transform::identity(),
            transform_inverse: Transform::identity(),
            flags: ItemFlags::standard(),
            points: Vec::new(),
            visible: true,
            selected: false,
            style: Style::new(),
        }
    }

    /// A deep copy used by item `copy()` implementations: fresh item and
    /// point ids, same geometry, flags, and style. The copy is unselected
    /// and has no scene association.
    pub fn copied(&self) -> ItemBase {
        ItemBase {
            id: Uuid::new_v4(),
            scene: None,
            position: self.position,
            transform: self.transform,
            transform_inverse: self.transform_inverse,
            flags: self.flags,
            points: self.points.iter().map(ItemPoint::copied).collect(),
            visible: self.visible,
            selected: false,
            style: self.style.clone(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub fn set_scene(&mut self, scene: Option<SceneId>) {
        self.scene = scene;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Sets the scene position of the item's local origin.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_position_xy(&mut self, x: f64, y: f64) {
        self.position = Point::new(x, y);
    }

    pub fn set_x(&mut self, x: f64) {
        self.position.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.position.y = y;
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn transform_inverse(&self) -> Transform {
        self.transform_inverse
    }

    /// Replaces the transform, or post-multiplies it onto the current one
    /// when `combine` is set. The cached inverse is recomputed; a singular
    /// transform leaves the inverse at identity.
    pub fn set_transform(&mut self, transform: Transform, combine: bool) {
        self.transform = if combine {
            self.transform.then(&transform)
        } else {
            transform
        };
        self.transform_inverse = self.transform.inverse().unwrap_or(Transform::identity());
    }

    pub fn flags(&self) -> ItemFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: ItemFlags) {
        self.flags = flags;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    // ---- point management ------------------------------------------------

    pub fn points(&self) -> &[ItemPoint] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [ItemPoint] {
        &mut self.points
    }

    /// Appends a point, taking exclusive ownership of it.
    pub fn add_point(&mut self, point: ItemPoint) {
        let index = self.points.len();
        self.insert_point(index, point);
    }

    /// Inserts a point at `index`, taking exclusive ownership of it. The
    /// index is clamped to the list length. Inserting a point whose id is
    /// already present is a no-op.
    pub fn insert_point(&mut self, index: usize, point: ItemPoint) {
        if self.point_index(point.id()).is_some() {
            return;
        }
        let index = index.min(self.points.len());
        self.points.insert(index, point);
    }

    /// Releases the point with the given id back to the caller without
    /// destroying it. Returns `None` (and changes nothing) when the id is
    /// not one of this item's points.
    pub fn remove_point(&mut self, id: PointId) -> Option<ItemPoint> {
        let index = self.point_index(id)?;
        Some(self.points.remove(index))
    }

    /// Removes and destroys all owned points.
    pub fn clear_points(&mut self) {
        self.points.clear();
    }

    pub fn point(&self, id: PointId) -> Option<&ItemPoint> {
        self.points.iter().find(|p| p.id() == id)
    }

    pub fn point_mut(&mut self, id: PointId) -> Option<&mut ItemPoint> {
        self.points.iter_mut().find(|p| p.id() == id)
    }

    pub fn point_index(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id() == id)
    }

    /// The point located exactly at `pos` in local coordinates, if any.
    pub fn point_at(&self, pos: Point) -> Option<&ItemPoint> {
        self.points.iter().find(|p| p.position() == pos)
    }

    /// The point nearest to `pos` by Euclidean distance. `None` only when
    /// the item has no points; ties go to the earlier index.
    pub fn point_nearest(&self, pos: Point) -> Option<&ItemPoint> {
        self.points.iter().min_by(|a, b| {
            a.position()
                .distance_to(&pos)
                .total_cmp(&b.position().distance_to(&pos))
        })
    }

    // ---- coordinate mapping ----------------------------------------------

    /// Maps a point from the item's local coordinates to scene coordinates.
    pub fn map_to_scene(&self, p: Point) -> Point {
        self.position + transform_point(&self.transform, p)
    }

    /// Maps a point from scene coordinates to the item's local coordinates.
    /// Inverse of [`ItemBase::map_to_scene`] within floating-point
    /// tolerance.
    pub fn map_from_scene(&self, p: Point) -> Point {
        transform_point(&self.transform_inverse, p - self.position)
    }

    pub fn map_points_to_scene(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.map_to_scene(*p)).collect()
    }

    pub fn map_points_from_scene(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.map_from_scene(*p)).collect()
    }

    /// Maps a local rect to scene coordinates as its four corners, since the
    /// transform may rotate or mirror it out of axis alignment.
    pub fn map_rect_to_scene(&self, rect: Rect) -> [Point; 4] {
        [
            self.map_to_scene(rect.top_left()),
            self.map_to_scene(rect.top_right()),
            self.map_to_scene(rect.bottom_right()),
            self.map_to_scene(rect.bottom_left()),
        ]
    }

    /// Maps a scene rect to local coordinates as its four corners.
    pub fn map_rect_from_scene(&self, rect: Rect) -> [Point; 4] {
        [
            self.map_from_scene(rect.top_left()),
            self.map_from_scene(rect.top_right()),
            self.map_from_scene(rect.bottom_right()),
            self.map_from_scene(rect.bottom_left()),
        ]
    }

    // ---- default event handlers ------------------------------------------

    /// Default move handler: place the local origin at the given scene
    /// point.
    pub fn move_default(&mut self, pos: Point) {
        self.set_position(pos);
    }

    /// Default resize handler: set the dragged point's local position from
    /// the scene point. Unknown point ids are ignored.
    pub fn resize_default(&mut self, point: PointId, pos: Point) {
        let local = self.map_from_scene(pos);
        if let Some(p) = self.point_mut(point) {
            p.set_position(local);
        }
    }

    /// Default rotate handler: one exact quarter turn about the given scene
    /// point, recomputing position and transform.
    pub fn rotate_default(&mut self, pos: Point) {
        let d = self.position - pos;
        self.set_position(Point::new(pos.x - d.y, pos.y + d.x));
        self.set_transform(quarter_turn(), true);
    }

    /// Default rotate-back handler: the exact inverse of
    /// [`ItemBase::rotate_default`].
    pub fn rotate_back_default(&mut self, pos: Point) {
        let d = self.position - pos;
        self.set_position(Point::new(pos.x + d.y, pos.y - d.x));
        self.set_transform(quarter_turn_back(), true);
    }

    /// Default horizontal flip handler: mirror about the vertical line
    /// through the given scene point.
    pub fn flip_horizontal_default(&mut self, pos: Point) {
        self.set_position(Point::new(2.0 * pos.x - self.position.x, self.position.y));
        self.set_transform(mirror_horizontal(), true);
    }

    /// Default vertical flip handler: mirror about the horizontal line
    /// through the given scene point.
    pub fn flip_vertical_default(&mut self, pos: Point) {
        self.set_position(Point::new(self.position.x, 2.0 * pos.y - self.position.y));
        self.set_transform(mirror_vertical(), true);
    }
}

/// A drawable, selectable, transformable item in a drawing scene.
///
/// Concrete items embed an [`ItemBase`] and expose it through `base()`. The
/// geometry queries (`bounding_rect`, `shape`, `center_pos`, `is_valid`) are
/// pure with respect to the current point state and may be called repeatedly
/// between mutations.
///
/// The event handlers are invoked by the host view only when the matching
/// [`ItemFlags`] bit is set; the item itself does not check flags.
pub trait Item: Any {
    fn base(&self) -> &ItemBase;

    fn base_mut(&mut self) -> &mut ItemBase;

    /// Deep copy with fresh item and point ids. Point connections are
    /// carried over verbatim and still reference the source items; the
    /// scene association is never copied. Use [`copy_items`] to remap
    /// connections within a copied set.
    fn copy(&self) -> Box<dyn Item>;

    /// An estimate of the area painted by the item, in local coordinates.
    /// Implementations must be cheap: derived from point positions, no path
    /// construction.
    fn bounding_rect(&self) -> Rect;

    /// An accurate outline of the item's shape in local coordinates. The
    /// default falls back to the bounding rect.
    fn shape(&self) -> Outline {
        Outline::from_rect(self.bounding_rect())
    }

    /// A representative center point, used for multi-item centroids. The
    /// default is the center of the bounding rect.
    fn center_pos(&self) -> Point {
        self.bounding_rect().center()
    }

    /// False when the item is degenerate. The default checks that the
    /// bounding rect is non-degenerate.
    fn is_valid(&self) -> bool {
        self.bounding_rect().is_valid()
    }

    /// Paints the item in local coordinates; the caller has already applied
    /// the item's transform. Implementations must leave the painter's pen
    /// and brush exactly as found.
    fn render(&self, painter: &mut dyn Painter);

    fn move_event(&mut self, pos: Point) {
        self.base_mut().move_default(pos);
    }

    fn resize_event(&mut self, point: PointId, pos: Point) {
        self.base_mut().resize_default(point, pos);
    }

    fn rotate_event(&mut self, pos: Point) {
        self.base_mut().rotate_default(pos);
    }

    fn rotate_back_event(&mut self, pos: Point) {
        self.base_mut().rotate_back_default(pos);
    }

    fn flip_horizontal_event(&mut self, pos: Point) {
        self.base_mut().flip_horizontal_default(pos);
    }

    fn flip_vertical_event(&mut self, pos: Point) {
        self.base_mut().flip_vertical_default(pos);
    }

    /// Proposes a new point to insert at the given local position, together
    /// with its insertion index. Only meaningful on items carrying
    /// [`ItemFlags::INSERT_POINTS`]; the default produces nothing.
    fn item_point_to_insert(&self, _pos: Point) -> Option<(usize, ItemPoint)> {
        None
    }

    /// Proposes an existing point to remove near the given local position.
    /// Only meaningful on items carrying [`ItemFlags::REMOVE_POINTS`]; the
    /// default produces nothing.
    fn item_point_to_remove(&self, _pos: Point) -> Option<PointId> {
        None
    }

    /// Applies style attributes from a flat property map. Unknown names and
    /// mistyped values are ignored. The default does nothing.
    fn set_properties(&mut self, _properties: &HashMap<String, PropertyValue>) {}

    /// Returns the item's style attributes as a flat property map. The
    /// default is empty.
    fn properties(&self) -> HashMap<String, PropertyValue> {
        HashMap::new()
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Copies every item in the list, preserving order.
///
/// Point connections between items inside the list are re-established
/// between the corresponding copies, matched by item index and point index.
/// Connections to points of items outside the list are severed.
pub fn copy_items(items: &[Box<dyn Item>]) -> Vec<Box<dyn Item>> {
    let copies: Vec<Box<dyn Item>> = items.iter().map(|item| item.copy()).collect();

    let index_of: HashMap<ItemId, usize> = items
        .iter()
        .enumerate()
        .map(|(index, item)| (item.base().id(), index))
        .collect();
    let copy_ids: Vec<ItemId> = copies.iter().map(|copy| copy.base().id()).collect();
    let copy_point_ids: Vec<Vec<PointId>> = copies
        .iter()
        .map(|copy| copy.base().points().iter().map(|p| p.id()).collect())
        .collect();

    let mut copies = copies;
    for (item_index, original) in items.iter().enumerate() {
        for (point_index, original_point) in original.base().points().iter().enumerate() {
            let mut remapped: SmallVec<[PointRef; 2]> = SmallVec::new();
            for connection in original_point.connections() {
                let Some(&target_index) = index_of.get(&connection.item) else {
                    continue;
                };
                let Some(target_point_index) =
                    items[target_index].base().point_index(connection.point)
                else {
                    continue;
                };
                remapped.push(PointRef {
                    item: copy_ids[target_index],
                    point: copy_point_ids[target_index][target_point_index],
                });
            }
            copies[item_index].base_mut().points_mut()[point_index]
                .replace_connections(remapped);
        }
    }

    debug!(count = copies.len(), "copied item list");
    copies
}
