//! Building constraints from a menu command and the current selection.
//!
//! Synthesis runs in two steps. [`ConstraintSynthesizer::plan`] only reads the
//! sketch: it matches the selection against the command's accepted shapes,
//! fills in the constraint and works out any follow-up (redundant constraints
//! to prune, a normal to pre-rotate). [`ConstraintSynthesizer::apply`] then
//! performs the mutation. A rejected selection therefore never touches the
//! sketch.

use super::command::Command;
use super::error::SynthesisError;
use super::inference::{self, NormalAlignment};
use super::pruner::{self, PruneTarget};
use super::registry::describe;
use super::satisfy::{MeasuredSatisfier, Satisfier};
use super::selection::SelectionSummary;
use super::types::{Constraint, ConstraintKind};
use crate::config::SketchConfig;
use crate::sketch::{ConstraintHandle, EntityHandle, EntityKind, Sketch};
use tracing::{debug, info, warn};

/// A new constraint together with the side effects that go with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintPlan {
    pub constraint: Constraint,
    /// Constraints the new one supersedes.
    pub prune: Vec<PruneTarget>,
    /// One-off numeric nudge applied before insertion.
    pub alignment: Option<NormalAlignment>,
}

impl ConstraintPlan {
    fn new(constraint: Constraint) -> Self {
        Self { constraint, prune: Vec::new(), alignment: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add(ConstraintPlan),
    /// Flip `other` on an existing angle or equal-angle constraint.
    ToggleOther(ConstraintHandle),
    /// Flip `reference` on an existing labelled constraint.
    ToggleReference(ConstraintHandle),
}

pub struct ConstraintSynthesizer {
    config: SketchConfig,
    satisfier: Box<dyn Satisfier>,
}

impl Default for ConstraintSynthesizer {
    fn default() -> Self {
        Self::new(SketchConfig::default())
    }
}

impl ConstraintSynthesizer {
    pub fn new(config: SketchConfig) -> Self {
        Self::with_satisfier(config, Box::new(MeasuredSatisfier))
    }

    pub fn with_satisfier(config: SketchConfig, satisfier: Box<dyn Satisfier>) -> Self {
        Self { config, satisfier }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Plan and apply `command` on the selection. Returns the constraint as
    /// stored (handle assigned), or the diagnostic for a bad selection.
    pub fn synthesize(
        &self,
        sketch: &mut Sketch,
        command: Command,
        gs: &SelectionSummary,
    ) -> Result<Constraint, SynthesisError> {
        let action = self.plan(sketch, command, gs).map_err(|e| {
            warn!(?command, "constraint command rejected: {:?}", e);
            e
        })?;
        Ok(self.apply(sketch, action))
    }

    pub fn plan(&self, sketch: &Sketch, command: Command, gs: &SelectionSummary) -> Result<Action, SynthesisError> {
        let plan = match command {
            Command::DistanceDia => self.plan_distance(sketch, gs)?,
            Command::OnEntity => self.plan_on_entity(sketch, gs)?,
            Command::Equal => self.plan_equal(sketch, gs)?,
            Command::Ratio => self.plan_ratio(sketch, gs)?,
            Command::AtMidpoint => self.plan_at_midpoint(sketch, gs)?,
            Command::Symmetric => self.plan_symmetric(sketch, gs)?,
            Command::Horizontal | Command::Vertical => self.plan_horiz_vert(sketch, command, gs)?,
            Command::OrientedSame => self.plan_same_orientation(sketch, gs)?,
            Command::Angle => self.plan_angle(sketch, gs)?,
            Command::Parallel => self.plan_parallel(sketch, gs)?,
            Command::Perpendicular => self.plan_perpendicular(sketch, gs)?,
            Command::Comment => self.plan_comment(sketch),
            Command::OtherAngle => return Self::plan_other_angle(sketch, gs),
            Command::Reference => return Self::plan_reference(sketch, gs),
        };
        Ok(Action::Add(plan))
    }

    /// Perform a planned action: undo snapshot, prune, pre-rotate, insert,
    /// notify.
    pub fn apply(&self, sketch: &mut Sketch, action: Action) -> Constraint {
        match action {
            Action::Add(plan) => {
                sketch.remember_undo();
                for target in &plan.prune {
                    pruner::prune(sketch, target);
                }
                if let Some(alignment) = &plan.alignment {
                    inference::apply_normal_alignment(sketch, alignment);
                }
                let h = add_constraint(sketch, plan.constraint, false);
                sketch.constraint(h).clone()
            }
            Action::ToggleOther(h) => {
                sketch.remember_undo();
                let mut c = sketch.constraint(h).clone();
                c.other = !c.other;
                if c.kind == ConstraintKind::Angle {
                    self.satisfier.modify_to_satisfy(sketch, &mut c);
                }
                *sketch.constraints.find_by_id_mut(h) = c.clone();
                sketch.mark_group_dirty(c.group);
                debug!("toggled other on {}", describe(&c));
                c
            }
            Action::ToggleReference(h) => {
                let c = sketch.constraints.find_by_id_mut(h);
                c.reference = !c.reference;
                let c = c.clone();
                sketch.mark_group_dirty(c.group);
                debug!("toggled reference on {} to {}", describe(&c), c.reference);
                c
            }
        }
    }

    fn blank(sketch: &Sketch, kind: ConstraintKind) -> Constraint {
        Constraint::new(kind, sketch.active_group, sketch.active_workplane)
    }

    /// Zero the parameter and let the solver set it to the measured value.
    fn satisfied(&self, sketch: &Sketch, mut c: Constraint) -> Constraint {
        c.val_a = 0.0;
        self.satisfier.modify_to_satisfy(sketch, &mut c);
        c
    }

    fn plan_distance(&self, sketch: &Sketch, gs: &SelectionSummary) -> Result<ConstraintPlan, SynthesisError> {
        let mut c;
        if gs.points() == 2 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::PtPtDistance);
            c.pt_a = gs.point[0];
            c.pt_b = gs.point[1];
        } else if gs.line_segments == 1 && gs.n == 1 {
            c = Self::blank(sketch, ConstraintKind::PtPtDistance);
            let e = sketch.entity(gs.entity[0]);
            c.pt_a = e.points[0];
            c.pt_b = e.points[1];
        } else if gs.workplanes == 1 && gs.points() == 1 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::PtPlaneDistance);
            c.pt_a = gs.point[0];
            c.entity_a = gs.entity[0];
        } else if gs.line_segments == 1 && gs.points() == 1 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::PtLineDistance);
            c.pt_a = gs.point[0];
            c.entity_a = gs.entity[0];
        } else if gs.faces() == 1 && gs.points() == 1 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::PtFaceDistance);
            c.pt_a = gs.point[0];
            c.entity_a = gs.face[0];
        } else if gs.circles_or_arcs == 1 && gs.n == 1 {
            c = Self::blank(sketch, ConstraintKind::Diameter);
            c.entity_a = gs.entity[0];
        } else {
            return Err(SynthesisError::BadSelection(Command::DistanceDia));
        }

        if c.kind == ConstraintKind::PtPtDistance {
            c.disp.offset =
                inference::pt_pt_dimension_offset(sketch, c.pt_a, c.pt_b, self.config.dimension_offset_px);
        }
        Ok(ConstraintPlan::new(self.satisfied(sketch, c)))
    }

    fn plan_on_entity(&self, sketch: &Sketch, gs: &SelectionSummary) -> Result<ConstraintPlan, SynthesisError> {
        let mut c;
        if gs.points() == 2 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::PointsCoincident);
            c.pt_a = gs.point[0];
            c.pt_b = gs.point[1];
            return Ok(ConstraintPlan::new(c));
        }

        if gs.points() == 1 && gs.workplanes == 1 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::PtInPlane);
            c.entity_a = gs.entity[0];
        } else if gs.points() == 1 && gs.line_segments == 1 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::PtOnLine);
            c.entity_a = gs.entity[0];
        } else if gs.points() == 1 && gs.circles_or_arcs == 1 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::PtOnCircle);
            c.entity_a = gs.entity[0];
        } else if gs.points() == 1 && gs.faces() == 1 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::PtOnFace);
            c.entity_a = gs.face[0];
        } else {
            return Err(SynthesisError::BadSelection(Command::OnEntity));
        }
        c.pt_a = gs.point[0];
        Ok(ConstraintPlan::new(c))
    }

    fn plan_equal(&self, sketch: &Sketch, gs: &SelectionSummary) -> Result<ConstraintPlan, SynthesisError> {
        let mut c;
        if gs.line_segments == 2 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::EqualLengthLines);
            c.entity_a = gs.entity[0];
            c.entity_b = gs.entity[1];
        } else if gs.line_segments == 2 && gs.points() == 2 && gs.n == 4 {
            c = Self::blank(sketch, ConstraintKind::EqPtLnDistances);
            c.entity_a = gs.entity[0];
            c.pt_a = gs.point[0];
            c.entity_b = gs.entity[1];
            c.pt_b = gs.point[1];
        } else if gs.line_segments == 1 && gs.points() == 2 && gs.n == 3 {
            // One line for both distances, measured to different points.
            c = Self::blank(sketch, ConstraintKind::EqPtLnDistances);
            c.entity_a = gs.entity[0];
            c.pt_a = gs.point[0];
            c.entity_b = gs.entity[0];
            c.pt_b = gs.point[1];
        } else if gs.line_segments == 2 && gs.points() == 1 && gs.n == 3 {
            c = Self::blank(sketch, ConstraintKind::EqLenPtLineD);
            c.entity_a = gs.entity[0];
            c.entity_b = gs.entity[1];
            c.pt_a = gs.point[0];
        } else if gs.vectors() == 4 && gs.n == 4 {
            c = Self::blank(sketch, ConstraintKind::EqualAngle);
            c.entity_a = gs.vector[0];
            c.entity_b = gs.vector[1];
            c.entity_c = gs.vector[2];
            c.entity_d = gs.vector[3];
        } else if gs.vectors() == 3 && gs.n == 3 {
            c = Self::blank(sketch, ConstraintKind::EqualAngle);
            c.entity_a = gs.vector[0];
            c.entity_b = gs.vector[1];
            c.entity_c = gs.vector[1];
            c.entity_d = gs.vector[2];
        } else if gs.circles_or_arcs == 2 && gs.n == 2 {
            c = Self::blank(sketch, ConstraintKind::EqualRadius);
            c.entity_a = gs.entity[0];
            c.entity_b = gs.entity[1];
        } else {
            return Err(SynthesisError::BadSelection(Command::Equal));
        }

        if c.kind == ConstraintKind::EqualAngle {
            c.other = inference::equal_angle_is_supplementary(sketch, c.entity_a, c.entity_b, c.entity_c, c.entity_d);
        }
        Ok(ConstraintPlan::new(c))
    }

    fn plan_ratio(&self, sketch: &Sketch, gs: &SelectionSummary) -> Result<ConstraintPlan, SynthesisError> {
        if !(gs.line_segments == 2 && gs.n == 2) {
            return Err(SynthesisError::BadSelection(Command::Ratio));
        }
        let mut c = Self::blank(sketch, ConstraintKind::LengthRatio);
        c.entity_a = gs.entity[0];
        c.entity_b = gs.entity[1];
        Ok(ConstraintPlan::new(self.satisfied(sketch, c)))
    }

    fn plan_at_midpoint(&self, sketch: &Sketch, gs: &SelectionSummary) -> Result<ConstraintPlan, SynthesisError> {
        let mut c = Self::blank(sketch, ConstraintKind::AtMidpoint);
        if gs.line_segments == 1 && gs.points() == 1 && gs.n == 2 {
            c.entity_a = gs.entity[0];
            c.pt_a = gs.point[0];
            // A point at the midpoint is on the line already.
            let prune = PruneTarget {
                kind: ConstraintKind::PtOnLine,
                entity_a: c.entity_a,
                pt_a: c.pt_a,
            };
            let mut plan = ConstraintPlan::new(c);
            plan.prune.push(prune);
            Ok(plan)
        } else if gs.line_segments == 1 && gs.workplanes == 1 && gs.n == 2 {
            let i = if sketch.entity(gs.entity[0]).is_workplane() { 1 } else { 0 };
            c.entity_a = gs.entity[i];
            c.entity_b = gs.entity[1 - i];
            Ok(ConstraintPlan::new(c))
        } else {
            Err(SynthesisError::BadSelection(Command::AtMidpoint))
        }
    }

    fn plan_symmetric(&self, sketch: &Sketch, gs: &SelectionSummary) -> Result<ConstraintPlan, SynthesisError> {
        let mut c = Self::blank(sketch, ConstraintKind::Symmetric);
        let about_line;

        if gs.points() == 2 && ((gs.workplanes == 1 && gs.n == 3) || gs.n == 2) {
            c.entity_a = gs.entity_or_none(0);
            c.pt_a = gs.point[0];
            c.pt_b = gs.point[1];
            about_line = false;
        } else if gs.line_segments == 1 && ((gs.workplanes == 1 && gs.n == 2) || gs.n == 1) {
            let i = if sketch.entity(gs.entity[0]).is_workplane() { 1 } else { 0 };
            let line = sketch.entity(gs.entity[i]);
            c.entity_a = gs.entity_or_none(1 - i);
            c.pt_a = line.points[0];
            c.pt_b = line.points[1];
            about_line = false;
        } else if sketch.locked_in_workplane() && gs.line_segments == 2 && gs.n == 2 {
            let (axis, mirrored) = inference::order_symmetric_lines(sketch, gs.entity[0], gs.entity[1]);
            let m = sketch.entity(mirrored);
            c.pt_a = m.points[0];
            c.pt_b = m.points[1];
            c.entity_a = axis;
            about_line = true;
        } else if sketch.locked_in_workplane() && gs.line_segments == 1 && gs.points() == 2 && gs.n == 3 {
            c.pt_a = gs.point[0];
            c.pt_b = gs.point[1];
            c.entity_a = gs.entity[0];
            about_line = true;
        } else {
            return Err(SynthesisError::BadSelection(Command::Symmetric));
        }

        let mut plan;
        if about_line {
            c.kind = ConstraintKind::SymmetricLine;
            plan = ConstraintPlan::new(c);
        } else if c.entity_a.is_none() {
            // Implicit symmetry plane, normal to the workplane.
            let Some(wp) = c.workplane else {
                return Err(SynthesisError::SymmetricNeedsWorkplane);
            };
            c.kind = inference::symmetric_axis_kind(sketch, wp, c.pt_a, c.pt_b);
            plan = ConstraintPlan::new(c);
            if gs.line_segments == 1 {
                // Symmetry about an axis already makes the line horizontal
                // or vertical.
                for kind in [ConstraintKind::Horizontal, ConstraintKind::Vertical] {
                    plan.prune.push(PruneTarget {
                        kind,
                        entity_a: gs.entity[0],
                        pt_a: EntityHandle::NONE,
                    });
                }
            }
        } else {
            c.kind = ConstraintKind::Symmetric;
            plan = ConstraintPlan::new(c);
        }
        Ok(plan)
    }

    fn plan_horiz_vert(
        &self,
        sketch: &Sketch,
        command: Command,
        gs: &SelectionSummary,
    ) -> Result<ConstraintPlan, SynthesisError> {
        if !sketch.locked_in_workplane() {
            return Err(SynthesisError::HorizVertNeedsWorkplane);
        }
        let kind = if command == Command::Horizontal {
            ConstraintKind::Horizontal
        } else {
            ConstraintKind::Vertical
        };
        let mut c = Self::blank(sketch, kind);
        if gs.line_segments == 1 && gs.n == 1 {
            c.entity_a = gs.entity[0];
        } else if gs.points() == 2 && gs.n == 2 {
            c.pt_a = gs.point[0];
            c.pt_b = gs.point[1];
        } else {
            return Err(SynthesisError::BadSelection(command));
        }
        Ok(ConstraintPlan::new(c))
    }

    fn plan_same_orientation(&self, sketch: &Sketch, gs: &SelectionSummary) -> Result<ConstraintPlan, SynthesisError> {
        if !(gs.any_normals() == 2 && gs.n == 2) {
            return Err(SynthesisError::BadSelection(Command::OrientedSame));
        }
        let mut c = Self::blank(sketch, ConstraintKind::SameOrientation);
        c.entity_a = gs.any_normal[0];
        c.entity_b = gs.any_normal[1];
        let alignment = inference::plan_normal_alignment(sketch, c.entity_a, c.entity_b);
        let mut plan = ConstraintPlan::new(c);
        plan.alignment = alignment;
        Ok(plan)
    }

    fn plan_angle(&self, sketch: &Sketch, gs: &SelectionSummary) -> Result<ConstraintPlan, SynthesisError> {
        if !(gs.vectors() == 2 && gs.n == 2) {
            return Err(SynthesisError::BadSelection(Command::Angle));
        }
        let mut c = Self::blank(sketch, ConstraintKind::Angle);
        c.entity_a = gs.vector[0];
        c.entity_b = gs.vector[1];
        c.other = inference::angle_other_from_shared_endpoint(sketch, c.entity_a, c.entity_b);
        Ok(ConstraintPlan::new(self.satisfied(sketch, c)))
    }

    fn plan_parallel(&self, sketch: &Sketch, gs: &SelectionSummary) -> Result<ConstraintPlan, SynthesisError> {
        if gs.vectors() == 2 && gs.n == 2 {
            let mut c = Self::blank(sketch, ConstraintKind::Parallel);
            c.entity_a = gs.vector[0];
            c.entity_b = gs.vector[1];
            return Ok(ConstraintPlan::new(c));
        }

        let (kind, curve_is_first, err) = if gs.line_segments == 1 && gs.arcs == 1 && gs.n == 2 {
            (
                ConstraintKind::ArcLineTangent,
                sketch.entity(gs.entity[0]).kind == EntityKind::ArcOfCircle,
                SynthesisError::ArcTangentNeedsSharedEndpoint,
            )
        } else if gs.line_segments == 1 && gs.cubics == 1 && gs.n == 2 {
            (
                ConstraintKind::CubicLineTangent,
                sketch.entity(gs.entity[0]).kind == EntityKind::Cubic,
                SynthesisError::CubicTangentNeedsSharedEndpoint,
            )
        } else {
            return Err(SynthesisError::BadSelection(Command::Parallel));
        };

        let (curve, line) = if curve_is_first {
            (gs.entity[0], gs.entity[1])
        } else {
            (gs.entity[1], gs.entity[0])
        };
        let points = sketch.entity(curve).points;
        // Arcs end at points 1 and 2; cubics at 0 and 3.
        let (first, second) = if kind == ConstraintKind::ArcLineTangent {
            (points[1], points[2])
        } else {
            (points[0], points[3])
        };

        let other = inference::tangent_shared_endpoint(sketch, line, first, second).ok_or(err)?;
        let mut c = Self::blank(sketch, kind);
        c.entity_a = curve;
        c.entity_b = line;
        c.other = other;
        Ok(ConstraintPlan::new(c))
    }

    fn plan_perpendicular(&self, sketch: &Sketch, gs: &SelectionSummary) -> Result<ConstraintPlan, SynthesisError> {
        if !(gs.vectors() == 2 && gs.n == 2) {
            return Err(SynthesisError::BadSelection(Command::Perpendicular));
        }
        let mut c = Self::blank(sketch, ConstraintKind::Perpendicular);
        c.entity_a = gs.vector[0];
        c.entity_b = gs.vector[1];
        Ok(ConstraintPlan::new(c))
    }

    fn plan_comment(&self, sketch: &Sketch) -> ConstraintPlan {
        let mut c = Self::blank(sketch, ConstraintKind::Comment);
        c.comment = self.config.default_comment.clone();
        c.disp.offset = -sketch.view.offset;
        ConstraintPlan::new(c)
    }

    fn single_selected_constraint<'a>(sketch: &'a Sketch, gs: &SelectionSummary) -> Option<&'a Constraint> {
        if gs.constraints() == 1 && gs.n == 0 {
            Some(sketch.constraint(gs.constraint[0]))
        } else {
            None
        }
    }

    fn plan_other_angle(sketch: &Sketch, gs: &SelectionSummary) -> Result<Action, SynthesisError> {
        match Self::single_selected_constraint(sketch, gs) {
            Some(c) if matches!(c.kind, ConstraintKind::Angle | ConstraintKind::EqualAngle) => {
                Ok(Action::ToggleOther(c.handle))
            }
            _ => Err(SynthesisError::BadSelection(Command::OtherAngle)),
        }
    }

    fn plan_reference(sketch: &Sketch, gs: &SelectionSummary) -> Result<Action, SynthesisError> {
        match Self::single_selected_constraint(sketch, gs) {
            Some(c) if c.kind.has_label() && c.kind != ConstraintKind::Comment => Ok(Action::ToggleReference(c.handle)),
            _ => Err(SynthesisError::BadSelection(Command::Reference)),
        }
    }
}

/// Insert `c`, assigning its handle, and schedule regeneration of its group.
pub fn add_constraint(sketch: &mut Sketch, c: Constraint, remember_undo: bool) -> ConstraintHandle {
    if remember_undo {
        sketch.remember_undo();
    }
    let group = c.group;
    let h = sketch.constraints.add_and_assign_id(c);
    sketch.mark_group_dirty(group);
    info!("added constraint {}", describe(sketch.constraint(h)));
    h
}

/// Add a constraint in the active group and workplane without an undo
/// snapshot. Used by drawing tools that constrain as they create geometry.
pub fn constrain(
    sketch: &mut Sketch,
    kind: ConstraintKind,
    pt_a: EntityHandle,
    pt_b: EntityHandle,
    entity_a: EntityHandle,
    entity_b: EntityHandle,
    other: bool,
) -> ConstraintHandle {
    let mut c = Constraint::new(kind, sketch.active_group, sketch.active_workplane);
    c.pt_a = pt_a;
    c.pt_b = pt_b;
    c.entity_a = entity_a;
    c.entity_b = entity_b;
    c.other = other;
    add_constraint(sketch, c, false)
}

pub fn constrain_coincident(sketch: &mut Sketch, pt_a: EntityHandle, pt_b: EntityHandle) -> ConstraintHandle {
    constrain(
        sketch,
        ConstraintKind::PointsCoincident,
        pt_a,
        pt_b,
        EntityHandle::NONE,
        EntityHandle::NONE,
        false,
    )
}
