use super::handles::{EntityHandle, GroupHandle};
use crate::geometry::{Point3, Quaternion};
use crate::store::Handled;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Point,
    /// Orientation-only entity; also the normal of workplanes, circles, arcs.
    Normal,
    /// `points[0]` is the origin, `normal` the plane's normal entity.
    Workplane,
    LineSegment,
    /// `points[0]` is the center.
    Circle,
    /// `points[0]` center, `points[1]` start, `points[2]` end.
    ArcOfCircle,
    /// Four control points, `points[0]` and `points[3]` are the endpoints.
    Cubic,
    /// Planar face: `position` is a point on it, `orientation`'s N is its normal.
    Face,
}

/// A geometric object in the sketch.
///
/// Only the fields relevant to `kind` are meaningful; unused references hold
/// [`EntityHandle::NONE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub handle: EntityHandle,
    pub kind: EntityKind,
    pub group: GroupHandle,
    pub points: [EntityHandle; 4],
    pub normal: EntityHandle,
    #[serde(default)]
    pub construction: bool,
    /// Current solved position (points, faces).
    pub position: Point3,
    /// Current solved orientation (normals, faces).
    pub orientation: Quaternion,
    /// Current solved radius (circles).
    pub radius: f64,
    #[serde(skip)]
    pub tag: i32,
}

impl Entity {
    pub fn new(kind: EntityKind, group: GroupHandle) -> Self {
        Self {
            handle: EntityHandle::NONE,
            kind,
            group,
            points: [EntityHandle::NONE; 4],
            normal: EntityHandle::NONE,
            construction: false,
            position: Point3::origin(),
            orientation: Quaternion::identity(),
            radius: 0.0,
            tag: 0,
        }
    }

    pub fn is_point(&self) -> bool {
        self.kind == EntityKind::Point
    }

    pub fn is_workplane(&self) -> bool {
        self.kind == EntityKind::Workplane
    }

    pub fn is_normal(&self) -> bool {
        self.kind == EntityKind::Normal
    }

    pub fn is_face(&self) -> bool {
        self.kind == EntityKind::Face
    }

    /// True for entities that define a direction: line segments and normals.
    pub fn has_vector(&self) -> bool {
        matches!(self.kind, EntityKind::LineSegment | EntityKind::Normal)
    }
}

impl Handled for Entity {
    type Handle = EntityHandle;

    fn handle(&self) -> EntityHandle {
        self.handle
    }
    fn set_handle(&mut self, h: EntityHandle) {
        self.handle = h;
    }
    fn tag(&self) -> i32 {
        self.tag
    }
    fn set_tag(&mut self, tag: i32) {
        self.tag = tag;
    }
}
