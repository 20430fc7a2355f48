//! Classification of the user's selection into typed buckets.

use crate::sketch::{ConstraintHandle, EntityHandle, EntityKind, Sketch};

/// One selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selected {
    Entity(EntityHandle),
    Constraint(ConstraintHandle),
}

/// Read-only summary of a selection, in selection order within each bucket.
///
/// `n` counts selected entities only; selected constraints are listed in
/// `constraint` and do not contribute to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSummary {
    pub n: usize,
    pub point: Vec<EntityHandle>,
    /// Every selected entity that is not a point.
    pub entity: Vec<EntityHandle>,
    pub face: Vec<EntityHandle>,
    /// Line segments and normals.
    pub vector: Vec<EntityHandle>,
    pub any_normal: Vec<EntityHandle>,
    pub constraint: Vec<ConstraintHandle>,

    pub workplanes: usize,
    pub line_segments: usize,
    pub circles_or_arcs: usize,
    pub arcs: usize,
    pub cubics: usize,
}

impl SelectionSummary {
    pub fn classify(sketch: &Sketch, items: &[Selected]) -> Self {
        let mut gs = SelectionSummary::default();
        for item in items {
            match *item {
                Selected::Entity(h) => gs.add_entity(sketch, h),
                Selected::Constraint(h) => gs.constraint.push(h),
            }
        }
        gs
    }

    pub fn of_entities(sketch: &Sketch, handles: &[EntityHandle]) -> Self {
        let items: Vec<_> = handles.iter().map(|&h| Selected::Entity(h)).collect();
        Self::classify(sketch, &items)
    }

    fn add_entity(&mut self, sketch: &Sketch, h: EntityHandle) {
        let e = sketch.entity(h);
        self.n += 1;
        if e.is_point() {
            self.point.push(h);
        } else {
            self.entity.push(h);
        }
        if e.is_face() {
            self.face.push(h);
        }
        if e.has_vector() {
            self.vector.push(h);
        }
        if e.is_normal() {
            self.any_normal.push(h);
        }
        match e.kind {
            EntityKind::Workplane => self.workplanes += 1,
            EntityKind::LineSegment => self.line_segments += 1,
            EntityKind::Circle => self.circles_or_arcs += 1,
            EntityKind::ArcOfCircle => {
                self.circles_or_arcs += 1;
                self.arcs += 1;
            }
            EntityKind::Cubic => self.cubics += 1,
            EntityKind::Point | EntityKind::Normal | EntityKind::Face => {}
        }
    }

    pub fn points(&self) -> usize {
        self.point.len()
    }

    pub fn faces(&self) -> usize {
        self.face.len()
    }

    pub fn vectors(&self) -> usize {
        self.vector.len()
    }

    pub fn any_normals(&self) -> usize {
        self.any_normal.len()
    }

    pub fn constraints(&self) -> usize {
        self.constraint.len()
    }

    /// The `i`th non-point entity, or `NONE` past the end.
    pub fn entity_or_none(&self, i: usize) -> EntityHandle {
        self.entity.get(i).copied().unwrap_or(EntityHandle::NONE)
    }
}
