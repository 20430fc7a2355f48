use super::entity::{Entity, EntityKind};
use super::handles::{ConstraintHandle, EntityHandle, GroupHandle};
use super::undo::{UndoStack, UndoState};
use crate::config::SketchConfig;
use crate::constraint::Constraint;
use crate::geometry::{self, Point3, Quaternion, Vector3};
use crate::store::{HandleStore, Handled};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A phase of the construction history. Entities and constraints belong to
/// exactly one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub handle: GroupHandle,
    pub name: String,
    /// Cleared whenever something in the group changes; regeneration sets it.
    pub clean: bool,
    #[serde(skip)]
    pub tag: i32,
}

impl Handled for Group {
    type Handle = GroupHandle;

    fn handle(&self) -> GroupHandle {
        self.handle
    }
    fn set_handle(&mut self, h: GroupHandle) {
        self.handle = h;
    }
    fn tag(&self) -> i32 {
        self.tag
    }
    fn set_tag(&mut self, tag: i32) {
        self.tag = tag;
    }
}

/// Projection parameters of the current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub proj_right: Vector3,
    pub proj_up: Vector3,
    /// Pixels per model unit.
    pub scale: f64,
    pub offset: Vector3,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            proj_right: Vector3::x(),
            proj_up: Vector3::y(),
            scale: 5.0,
            offset: Vector3::zeros(),
        }
    }
}

/// What the pointer is currently over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hover {
    pub entity: Option<EntityHandle>,
    pub constraint: Option<ConstraintHandle>,
}

impl Hover {
    pub fn clear(&mut self) {
        self.entity = None;
        self.constraint = None;
    }
}

/// Work deferred until the current command returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Later {
    pub generate_all: bool,
}

/// The live sketch: stores plus the editing state every operation reads.
#[derive(Debug, Clone)]
pub struct Sketch {
    pub entities: HandleStore<Entity>,
    pub constraints: HandleStore<Constraint>,
    pub groups: HandleStore<Group>,
    pub active_group: GroupHandle,
    /// Workplane new constraints are locked into; `None` is free in 3D.
    pub active_workplane: Option<EntityHandle>,
    pub view: ViewState,
    pub hover: Hover,
    pub later: Later,
    pub undo: UndoStack,
}

impl Default for Sketch {
    fn default() -> Self {
        Self::with_config(&SketchConfig::default())
    }
}

impl Sketch {
    /// A sketch with a locked `#references` group and an active drawing group.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &SketchConfig) -> Self {
        let mut sketch = Self {
            entities: HandleStore::new(),
            constraints: HandleStore::new(),
            groups: HandleStore::new(),
            active_group: GroupHandle::default(),
            active_workplane: None,
            view: ViewState::default(),
            hover: Hover::default(),
            later: Later::default(),
            undo: UndoStack::new(config.max_undo),
        };
        sketch.add_group("#references");
        sketch.active_group = sketch.add_group("sketch-in-3d");
        sketch
    }

    pub fn add_group(&mut self, name: &str) -> GroupHandle {
        self.groups.add_and_assign_id(Group {
            handle: GroupHandle::default(),
            name: name.to_string(),
            clean: false,
            tag: 0,
        })
    }

    /// The first group; entities in it are treated as locked reference geometry.
    pub fn references_group(&self) -> GroupHandle {
        GroupHandle(1)
    }

    pub fn locked_in_workplane(&self) -> bool {
        self.active_workplane.is_some()
    }

    // =========================================================================
    // Entity construction (active group)
    // =========================================================================

    pub fn add_entity(&mut self, entity: Entity) -> EntityHandle {
        self.entities.add_and_assign_id(entity)
    }

    fn new_entity(&self, kind: EntityKind) -> Entity {
        Entity::new(kind, self.active_group)
    }

    pub fn add_point(&mut self, pos: Point3) -> EntityHandle {
        let mut e = self.new_entity(EntityKind::Point);
        e.position = pos;
        self.add_entity(e)
    }

    pub fn add_normal(&mut self, orientation: Quaternion) -> EntityHandle {
        let mut e = self.new_entity(EntityKind::Normal);
        e.orientation = orientation;
        self.add_entity(e)
    }

    pub fn add_line(&mut self, a: Point3, b: Point3) -> EntityHandle {
        let pa = self.add_point(a);
        let pb = self.add_point(b);
        let mut e = self.new_entity(EntityKind::LineSegment);
        e.points[0] = pa;
        e.points[1] = pb;
        self.add_entity(e)
    }

    pub fn add_workplane(&mut self, origin: Point3, orientation: Quaternion) -> EntityHandle {
        let p = self.add_point(origin);
        let n = self.add_normal(orientation);
        let mut e = self.new_entity(EntityKind::Workplane);
        e.points[0] = p;
        e.normal = n;
        self.add_entity(e)
    }

    pub fn add_circle(&mut self, center: Point3, radius: f64, orientation: Quaternion) -> EntityHandle {
        let c = self.add_point(center);
        let n = self.add_normal(orientation);
        let mut e = self.new_entity(EntityKind::Circle);
        e.points[0] = c;
        e.normal = n;
        e.radius = radius;
        self.add_entity(e)
    }

    pub fn add_arc(&mut self, center: Point3, start: Point3, end: Point3, orientation: Quaternion) -> EntityHandle {
        let c = self.add_point(center);
        let s = self.add_point(start);
        let t = self.add_point(end);
        let n = self.add_normal(orientation);
        let mut e = self.new_entity(EntityKind::ArcOfCircle);
        e.points = [c, s, t, EntityHandle::NONE];
        e.normal = n;
        self.add_entity(e)
    }

    pub fn add_cubic(&mut self, ctrl: [Point3; 4]) -> EntityHandle {
        let mut e = self.new_entity(EntityKind::Cubic);
        for (i, p) in ctrl.iter().enumerate() {
            e.points[i] = self.add_point(*p);
        }
        self.add_entity(e)
    }

    pub fn add_face(&mut self, point: Point3, orientation: Quaternion) -> EntityHandle {
        let mut e = self.new_entity(EntityKind::Face);
        e.position = point;
        e.orientation = orientation;
        self.add_entity(e)
    }

    // =========================================================================
    // Numeric queries
    // =========================================================================

    pub fn entity(&self, h: EntityHandle) -> &Entity {
        self.entities.find_by_id(h)
    }

    pub fn constraint(&self, h: ConstraintHandle) -> &Constraint {
        self.constraints.find_by_id(h)
    }

    pub fn point_position(&self, h: EntityHandle) -> Point3 {
        self.entity(h).position
    }

    pub fn line_endpoints(&self, line: EntityHandle) -> (Point3, Point3) {
        let e = self.entity(line);
        (self.point_position(e.points[0]), self.point_position(e.points[1]))
    }

    /// Direction of a line segment (start to end) or a normal's N.
    pub fn vector_of(&self, h: EntityHandle) -> Vector3 {
        let e = self.entity(h);
        match e.kind {
            EntityKind::LineSegment => {
                let (a, b) = self.line_endpoints(h);
                b - a
            }
            EntityKind::Normal | EntityKind::Face => geometry::rotation_n(&e.orientation),
            kind => panic!("entity {} of kind {:?} has no vector", h, kind),
        }
    }

    /// U, V and N directions of a normal or face.
    pub fn normal_basis(&self, h: EntityHandle) -> (Vector3, Vector3, Vector3) {
        let q = &self.entity(h).orientation;
        (geometry::rotation_u(q), geometry::rotation_v(q), geometry::rotation_n(q))
    }

    /// Basis of a workplane, taken from its normal entity.
    pub fn workplane_basis(&self, wp: EntityHandle) -> (Vector3, Vector3, Vector3) {
        self.normal_basis(self.entity(wp).normal)
    }

    pub fn workplane_origin(&self, wp: EntityHandle) -> Point3 {
        self.point_position(self.entity(wp).points[0])
    }

    /// Overwrite a normal's orientation in place.
    pub fn normal_force_to(&mut self, h: EntityHandle, orientation: Quaternion) {
        self.entities.find_by_id_mut(h).orientation = orientation;
    }

    // =========================================================================
    // Change notification and undo
    // =========================================================================

    /// Mark `group` for regeneration and schedule a full regenerate.
    pub fn mark_group_dirty(&mut self, group: GroupHandle) {
        self.groups.find_by_id_mut(group).clean = false;
        self.later.generate_all = true;
    }

    /// Snapshot the stores so the next mutation can be undone.
    pub fn remember_undo(&mut self) {
        let mut state = UndoState {
            active_group: self.active_group,
            ..UndoState::default()
        };
        self.entities.duplicate_into(&mut state.entities);
        self.constraints.duplicate_into(&mut state.constraints);
        self.groups.duplicate_into(&mut state.groups);
        self.undo.push(state);
        debug!("remembered undo state, depth {}", self.undo.depth());
    }

    /// Restore the most recent snapshot. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        let Some(mut state) = self.undo.pop() else {
            return false;
        };
        state.entities.move_ownership_into(&mut self.entities);
        state.constraints.move_ownership_into(&mut self.constraints);
        state.groups.move_ownership_into(&mut self.groups);
        self.active_group = state.active_group;
        self.hover.clear();
        self.later.generate_all = true;
        true
    }

    /// User delete: remove the given constraints as one undoable step.
    pub fn delete_constraints(&mut self, handles: &[ConstraintHandle]) -> usize {
        self.remember_undo();
        self.constraints.clear_tags();
        let mut dirty = Vec::new();
        for &h in handles {
            if let Some(c) = self.constraints.find_by_id_or_null(h) {
                dirty.push(c.group);
            }
            self.constraints.tag_by_handle(h, 1);
        }
        let removed = self.constraints.remove_tagged();
        self.hover.clear();
        for g in dirty {
            self.mark_group_dirty(g);
        }
        removed
    }
}
