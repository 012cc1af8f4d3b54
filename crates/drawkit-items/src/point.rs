//! Item points: named, flagged locations owned by exactly one item, used for
//! resize-by-drag and inter-item connections.

use bitflags::bitflags;
use drawkit_core::Point;
use smallvec::SmallVec;
use uuid::Uuid;

/// Stable identifier of an [`ItemPoint`] within its owning item.
pub type PointId = Uuid;

/// Identifier of an item, used for the non-owning scene back reference and
/// for point connections across items.
pub type ItemId = Uuid;

bitflags! {
    /// Capability flags of an item point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PointFlags: u32 {
        /// The point can be dragged by the user to resize the item.
        const CONTROL = 0x01;
        /// The point can be connected to points of other items.
        const CONNECTION = 0x02;
    }
}

/// Names a point on some item. Connections are stored as plain identifier
/// pairs, so holding a `PointRef` never keeps the target item alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRef {
    pub item: ItemId,
    pub point: PointId,
}

/// A control/connection location owned by an item, expressed in the item's
/// local coordinates.
#[derive(Debug, Clone)]
pub struct ItemPoint {
    id: PointId,
    position: Point,
    flags: PointFlags,
    connections: SmallVec<[PointRef; 2]>,
}

impl ItemPoint {
    pub fn new(position: Point, flags: PointFlags) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            flags,
            connections: SmallVec::new(),
        }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn flags(&self) -> PointFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: PointFlags) {
        self.flags = flags;
    }

    pub fn is_control(&self) -> bool {
        self.flags.contains(PointFlags::CONTROL)
    }

    pub fn is_connection(&self) -> bool {
        self.flags.contains(PointFlags::CONNECTION)
    }

    pub fn connections(&self) -> &[PointRef] {
        &self.connections
    }

    /// Records a connection to a point on another item. Duplicate
    /// connections are ignored.
    pub fn connect(&mut self, target: PointRef) {
        if !self.connections.contains(&target) {
            self.connections.push(target);
        }
    }

    /// Removes a connection. Absent targets are a no-op.
    pub fn disconnect(&mut self, target: PointRef) {
        self.connections.retain(|c| *c != target);
    }

    pub fn clear_connections(&mut self) {
        self.connections.clear();
    }

    pub fn is_connected_to(&self, target: PointRef) -> bool {
        self.connections.contains(&target)
    }

    /// A deep copy with a fresh id. The connection list is carried over
    /// verbatim and still names points of the source items; use
    /// [`copy_items`](crate::copy_items) to remap connections within a
    /// copied set.
    pub(crate) fn copied(&self) -> ItemPoint {
        ItemPoint {
            id: Uuid::new_v4(),
            position: self.position,
            flags: self.flags,
            connections: self.connections.clone(),
        }
    }

    pub(crate) fn replace_connections(&mut self, connections: SmallVec<[PointRef; 2]>) {
        self.connections = connections;
    }
}
