//! Geometric inference used while building constraints.
//!
//! Each rule reads the current solved geometry and decides a flag or an
//! ordering among interpretations that are otherwise equally valid.

use super::types::ConstraintKind;
use crate::geometry::{self, ApproxEq, Quaternion, Vector3};
use crate::sketch::{EntityHandle, EntityKind, Sketch};
use tracing::debug;

/// Display offset for a new point-point distance: perpendicular to `a - b`
/// in the view plane, `offset_px` pixels long on screen.
pub fn pt_pt_dimension_offset(sketch: &Sketch, a: EntityHandle, b: EntityHandle, offset_px: f64) -> Vector3 {
    let view = &sketch.view;
    let n = view.proj_right.cross(&view.proj_up);
    let d = sketch.point_position(a) - sketch.point_position(b);
    geometry::with_magnitude(&n.cross(&d), offset_px / view.scale)
}

/// True when the angle between (a, b) and the angle between (c, d) open in
/// opposite senses, so equal-angle should use the supplementary angle.
pub fn equal_angle_is_supplementary(
    sketch: &Sketch,
    a: EntityHandle,
    b: EntityHandle,
    c: EntityHandle,
    d: EntityHandle,
) -> bool {
    let d1 = sketch.vector_of(a).dot(&sketch.vector_of(b));
    let d2 = sketch.vector_of(c).dot(&sketch.vector_of(d));
    d1 * d2 < 0.0
}

/// `other` flag for an angle between two line segments.
///
/// Lines joined start-to-start or end-to-end are drawn in the same sense;
/// joined start-to-end they are opposite. With no shared endpoint, or when
/// either entity is not a line, the default is kept.
pub fn angle_other_from_shared_endpoint(sketch: &Sketch, ea: EntityHandle, eb: EntityHandle) -> bool {
    let both_lines = sketch.entity(ea).kind == EntityKind::LineSegment
        && sketch.entity(eb).kind == EntityKind::LineSegment;
    if !both_lines {
        return false;
    }

    let (a0, a1) = sketch.line_endpoints(ea);
    let (b0, b1) = sketch.line_endpoints(eb);
    if a0.approx_eq(&b0) || a1.approx_eq(&b1) {
        false
    } else {
        a0.approx_eq(&b1) || a1.approx_eq(&b0)
    }
}

/// Which curve endpoint a line touches, compared by position.
///
/// `Some(false)` if a line endpoint coincides with `first`, `Some(true)` if
/// with `second`, `None` if they share no endpoint.
pub fn tangent_shared_endpoint(
    sketch: &Sketch,
    line: EntityHandle,
    first: EntityHandle,
    second: EntityHandle,
) -> Option<bool> {
    let (l0, l1) = sketch.line_endpoints(line);
    let f = sketch.point_position(first);
    let s = sketch.point_position(second);
    if l0.approx_eq(&f) || l1.approx_eq(&f) {
        Some(false)
    } else if l0.approx_eq(&s) || l1.approx_eq(&s) {
        Some(true)
    } else {
        None
    }
}

/// Horizontal or vertical symmetry, by which workplane axis the displacement
/// between the two points runs along more.
pub fn symmetric_axis_kind(sketch: &Sketch, workplane: EntityHandle, pa: EntityHandle, pb: EntityHandle) -> ConstraintKind {
    let dp = sketch.point_position(pa) - sketch.point_position(pb);
    let (u, v, _) = sketch.workplane_basis(workplane);
    if dp.dot(&u).abs() > dp.dot(&v).abs() {
        ConstraintKind::SymmetricHoriz
    } else {
        ConstraintKind::SymmetricVert
    }
}

/// Order two lines for symmetric-about-line as `(axis, mirrored)`.
///
/// The mirrored line is the one being drawn now: it belongs to the active
/// group, and is not construction geometry unless both are.
pub fn order_symmetric_lines(sketch: &Sketch, first: EntityHandle, second: EntityHandle) -> (EntityHandle, EntityHandle) {
    let l0 = sketch.entity(first);
    let l1 = sketch.entity(second);
    if l1.group != sketch.active_group || (l1.construction && !l0.construction) {
        (second, first)
    } else {
        (first, second)
    }
}

/// A one-off rotation of a free normal onto a locked one.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalAlignment {
    pub normal: EntityHandle,
    pub orientation: Quaternion,
}

/// Plan a pre-rotation for same-orientation.
///
/// When exactly one of the two normals is in the active group, it is turned
/// to match the other one, which comes from an earlier group. Each in-plane
/// axis of the free normal goes to whichever of the locked normal's U/V axes
/// it lines up with better, keeping the sign of the existing dot product.
/// That leaves only the odd 90 degree turns about N that the constraint
/// itself allows.
pub fn plan_normal_alignment(sketch: &Sketch, a: EntityHandle, b: EntityHandle) -> Option<NormalAlignment> {
    let (mut nfree, mut nref) = (a, b);
    if sketch.entity(nref).group == sketch.active_group {
        std::mem::swap(&mut nfree, &mut nref);
    }
    if sketch.entity(nfree).group != sketch.active_group || sketch.entity(nref).group == sketch.active_group {
        return None;
    }

    let (mut ru, mut rv, _) = sketch.normal_basis(nref);
    let (fu, fv, _) = sketch.normal_basis(nfree);
    if fu.dot(&ru).abs() < fu.dot(&rv).abs() {
        std::mem::swap(&mut ru, &mut rv);
    }
    let u = if fu.dot(&ru) > 0.0 { ru } else { -ru };
    let v = if fv.dot(&rv) > 0.0 { rv } else { -rv };

    Some(NormalAlignment {
        normal: nfree,
        orientation: geometry::quaternion_from_basis(&u, &v),
    })
}

/// Force the planned orientation onto the free normal.
pub fn apply_normal_alignment(sketch: &mut Sketch, alignment: &NormalAlignment) {
    debug!("pre-rotating normal {} to align with locked normal", alignment.normal);
    sketch.normal_force_to(alignment.normal, alignment.orientation);
}
