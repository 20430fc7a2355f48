//! Solve-to-satisfy: set a new constraint's parameter to the value already
//! present in the geometry, so it is created satisfied.

use super::types::{Constraint, ConstraintKind};
use crate::geometry::{self, Point3, Vector3, EPSILON};
use crate::sketch::{EntityHandle, EntityKind, Sketch};
use tracing::warn;

pub trait Satisfier {
    /// Update `c.val_a` from the current geometry. Must not fail; a
    /// degenerate measurement leaves the value as it was.
    fn modify_to_satisfy(&self, sketch: &Sketch, c: &mut Constraint);
}

/// Measures the current geometry directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasuredSatisfier;

impl MeasuredSatisfier {
    fn project(sketch: &Sketch, workplane: Option<EntityHandle>, v: Vector3) -> Vector3 {
        match workplane {
            Some(wp) => {
                let (_, _, n) = sketch.workplane_basis(wp);
                geometry::project_vector_into(&v, &n)
            }
            None => v,
        }
    }

    fn line_length(sketch: &Sketch, line: EntityHandle, workplane: Option<EntityHandle>) -> f64 {
        let (a, b) = sketch.line_endpoints(line);
        Self::project(sketch, workplane, b - a).norm()
    }

    fn signed_plane_distance(p: Point3, origin: Point3, normal: Vector3) -> f64 {
        geometry::with_magnitude(&normal, 1.0).dot(&(p - origin))
    }

    fn measure(sketch: &Sketch, c: &Constraint) -> Option<f64> {
        let wp = c.workplane;
        match c.kind {
            ConstraintKind::PtPtDistance => {
                let d = sketch.point_position(c.pt_a) - sketch.point_position(c.pt_b);
                Some(Self::project(sketch, wp, d).norm())
            }
            ConstraintKind::PtLineDistance => {
                let p = sketch.point_position(c.pt_a);
                let (a, b) = sketch.line_endpoints(c.entity_a);
                let dir = Self::project(sketch, wp, b - a);
                let len = dir.norm();
                if len < EPSILON {
                    return None;
                }
                let off = Self::project(sketch, wp, p - a);
                Some(off.cross(&dir).norm() / len)
            }
            ConstraintKind::PtPlaneDistance => {
                let (_, _, n) = sketch.workplane_basis(c.entity_a);
                let origin = sketch.workplane_origin(c.entity_a);
                Some(Self::signed_plane_distance(sketch.point_position(c.pt_a), origin, n))
            }
            ConstraintKind::PtFaceDistance => {
                let face = sketch.entity(c.entity_a);
                let n = geometry::rotation_n(&face.orientation);
                Some(Self::signed_plane_distance(sketch.point_position(c.pt_a), face.position, n))
            }
            ConstraintKind::Diameter => {
                let e = sketch.entity(c.entity_a);
                let r = match e.kind {
                    EntityKind::Circle => e.radius,
                    _ => (sketch.point_position(e.points[1]) - sketch.point_position(e.points[0])).norm(),
                };
                Some(2.0 * r)
            }
            ConstraintKind::LengthRatio => {
                let la = Self::line_length(sketch, c.entity_a, wp);
                let lb = Self::line_length(sketch, c.entity_b, wp);
                if lb < EPSILON {
                    return None;
                }
                Some(la / lb)
            }
            ConstraintKind::Angle => {
                let mut a = sketch.vector_of(c.entity_a);
                let b = sketch.vector_of(c.entity_b);
                if c.other {
                    a = -a;
                }
                let a = Self::project(sketch, wp, a);
                let b = Self::project(sketch, wp, b);
                let m = a.norm() * b.norm();
                if m < EPSILON * EPSILON {
                    return None;
                }
                let cos = (a.dot(&b) / m).clamp(-1.0, 1.0);
                Some(cos.acos().to_degrees())
            }
            _ => None,
        }
    }
}

impl Satisfier for MeasuredSatisfier {
    fn modify_to_satisfy(&self, sketch: &Sketch, c: &mut Constraint) {
        match Self::measure(sketch, c) {
            Some(v) => c.val_a = v,
            None if c.kind.has_label() && c.kind != ConstraintKind::Comment => {
                warn!("degenerate geometry, leaving {:?} value at {}", c.kind, c.val_a);
            }
            None => {}
        }
    }
}
