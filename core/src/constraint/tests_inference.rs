use super::inference::{
    angle_other_from_shared_endpoint, equal_angle_is_supplementary, order_symmetric_lines, plan_normal_alignment,
    pt_pt_dimension_offset, symmetric_axis_kind, tangent_shared_endpoint,
};
use super::ConstraintKind;
use crate::geometry::{self, ApproxEq, Point3, Quaternion, Vector3};
use crate::sketch::{GroupHandle, Sketch};

fn pt(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

#[test]
fn test_dimension_offset_follows_view_and_scale() {
    let mut sketch = Sketch::new();
    let a = sketch.add_point(pt(0.0, 0.0));
    let b = sketch.add_point(pt(2.0, 0.0));

    // d = a - b = -x; z × -x = -y.
    let off = pt_pt_dimension_offset(&sketch, a, b, 50.0);
    assert!(off.approx_eq(&Vector3::new(0.0, -10.0, 0.0)));

    sketch.view.scale = 25.0;
    let off = pt_pt_dimension_offset(&sketch, a, b, 50.0);
    assert!(off.approx_eq(&Vector3::new(0.0, -2.0, 0.0)));

    // Viewing the XZ plane: the view normal is -y.
    sketch.view.proj_up = Vector3::z();
    let off = pt_pt_dimension_offset(&sketch, a, b, 50.0);
    assert!(off.approx_eq(&Vector3::new(0.0, 0.0, -2.0)));
}

#[test]
fn test_equal_angle_supplementary_only_on_sign_change() {
    let mut sketch = Sketch::new();
    let x = sketch.add_line(pt(0.0, 0.0), pt(1.0, 0.0));
    let up_right = sketch.add_line(pt(0.0, 0.0), pt(1.0, 1.0));
    let up_left = sketch.add_line(pt(0.0, 0.0), pt(-1.0, 1.0));
    let n = sketch.add_normal(Quaternion::identity());

    assert!(!equal_angle_is_supplementary(&sketch, x, up_right, x, up_right));
    assert!(equal_angle_is_supplementary(&sketch, x, up_right, x, up_left));
    assert!(equal_angle_is_supplementary(&sketch, x, up_left, x, up_right));
    // Both negative is still the same sense.
    assert!(!equal_angle_is_supplementary(&sketch, x, up_left, x, up_left));
    // A perpendicular pair has a zero product and never flips.
    assert!(!equal_angle_is_supplementary(&sketch, x, n, x, up_left));
}

#[test]
fn test_angle_other_needs_two_lines() {
    let mut sketch = Sketch::new();
    let a = sketch.add_line(pt(0.0, 0.0), pt(1.0, 0.0));
    let b = sketch.add_line(pt(1.0, 0.0), pt(1.0, 1.0));
    let n = sketch.add_normal(Quaternion::identity());
    let apart = sketch.add_line(pt(5.0, 5.0), pt(6.0, 6.0));

    assert!(angle_other_from_shared_endpoint(&sketch, a, b));
    assert!(angle_other_from_shared_endpoint(&sketch, b, a));
    assert!(!angle_other_from_shared_endpoint(&sketch, a, n));
    assert!(!angle_other_from_shared_endpoint(&sketch, a, apart));
}

#[test]
fn test_angle_other_prefers_same_sense_joints() {
    let mut sketch = Sketch::new();
    // Identical lines meet start-to-start.
    let a = sketch.add_line(pt(0.0, 0.0), pt(1.0, 0.0));
    let b = sketch.add_line(pt(0.0, 0.0), pt(1.0, 0.0));
    assert!(!angle_other_from_shared_endpoint(&sketch, a, b));

    let reversed = sketch.add_line(pt(1.0, 0.0), pt(0.0, 0.0));
    assert!(angle_other_from_shared_endpoint(&sketch, a, reversed));
}

#[test]
fn test_tangent_endpoint_compares_positions() {
    let mut sketch = Sketch::new();
    let line = sketch.add_line(pt(0.0, 0.0), pt(1.0, 0.0));
    // Distinct point entities at the same place still count as shared.
    let first = sketch.add_point(pt(1.0, 0.0));
    let second = sketch.add_point(pt(3.0, 3.0));
    let elsewhere = sketch.add_point(pt(7.0, 7.0));

    assert_eq!(tangent_shared_endpoint(&sketch, line, first, second), Some(false));
    assert_eq!(tangent_shared_endpoint(&sketch, line, second, first), Some(true));
    assert_eq!(tangent_shared_endpoint(&sketch, line, second, elsewhere), None);
    // Touching at both ends resolves to the first endpoint.
    let start = sketch.add_point(pt(0.0, 0.0));
    assert_eq!(tangent_shared_endpoint(&sketch, line, start, first), Some(false));
}

#[test]
fn test_symmetric_axis_kind_in_rotated_workplane() {
    let mut sketch = Sketch::new();
    // U along +y, V along -x.
    let wp = sketch.add_workplane(Point3::origin(), Quaternion::from_axis_angle(&Vector3::z_axis(), 90f64.to_radians()));
    let a = sketch.add_point(pt(0.0, 0.0));
    let b = sketch.add_point(pt(5.0, 1.0));

    assert_eq!(symmetric_axis_kind(&sketch, wp, a, b), ConstraintKind::SymmetricVert);
    assert_eq!(symmetric_axis_kind(&sketch, wp, b, a), ConstraintKind::SymmetricVert);

    let c = sketch.add_point(pt(1.0, 5.0));
    assert_eq!(symmetric_axis_kind(&sketch, wp, a, c), ConstraintKind::SymmetricHoriz);
}

#[test]
fn test_symmetric_line_order_prefers_solid_line_as_mirrored() {
    let mut sketch = Sketch::new();
    let solid = sketch.add_line(pt(1.0, 0.0), pt(2.0, 0.0));
    let construction = sketch.add_line(pt(0.0, -1.0), pt(0.0, 1.0));
    sketch.entities.find_by_id_mut(construction).construction = true;

    assert_eq!(order_symmetric_lines(&sketch, solid, construction), (construction, solid));
    assert_eq!(order_symmetric_lines(&sketch, construction, solid), (construction, solid));

    // Both construction: selection order stands.
    sketch.entities.find_by_id_mut(solid).construction = true;
    assert_eq!(order_symmetric_lines(&sketch, solid, construction), (solid, construction));
}

#[test]
fn test_symmetric_line_order_locked_line_is_axis() {
    let mut sketch = Sketch::new();
    sketch.active_group = sketch.references_group();
    let locked = sketch.add_line(pt(0.0, -1.0), pt(0.0, 1.0));
    sketch.active_group = GroupHandle(2);
    let drawn = sketch.add_line(pt(1.0, 0.0), pt(2.0, 0.0));

    assert_eq!(order_symmetric_lines(&sketch, drawn, locked), (locked, drawn));
    assert_eq!(order_symmetric_lines(&sketch, locked, drawn), (locked, drawn));
}

#[test]
fn test_normal_alignment_rotates_free_normal_only() {
    let mut sketch = Sketch::new();
    sketch.active_group = sketch.references_group();
    let locked = sketch.add_normal(Quaternion::identity());
    sketch.active_group = GroupHandle(2);
    let tilt = Quaternion::from_axis_angle(&Vector3::z_axis(), -170f64.to_radians());
    let free = sketch.add_normal(tilt);

    for (a, b) in [(locked, free), (free, locked)] {
        let plan = plan_normal_alignment(&sketch, a, b).unwrap();
        assert_eq!(plan.normal, free);
        // Nearest axes with the sign kept: U goes to -x and V to -y.
        assert!(geometry::rotation_u(&plan.orientation).approx_eq(&-Vector3::x()));
        assert!(geometry::rotation_v(&plan.orientation).approx_eq(&-Vector3::y()));
        assert!(geometry::rotation_n(&plan.orientation).approx_eq(&Vector3::z()));
    }

    // Both locked.
    let other_locked = {
        sketch.active_group = sketch.references_group();
        let h = sketch.add_normal(tilt);
        sketch.active_group = GroupHandle(2);
        h
    };
    assert!(plan_normal_alignment(&sketch, locked, other_locked).is_none());
}

#[test]
fn test_normal_alignment_swaps_axes_on_quarter_turn() {
    let mut sketch = Sketch::new();
    sketch.active_group = sketch.references_group();
    let locked = sketch.add_normal(Quaternion::identity());
    sketch.active_group = GroupHandle(2);
    // U near +y: it should land on the locked V axis.
    let free = sketch.add_normal(Quaternion::from_axis_angle(&Vector3::z_axis(), 80f64.to_radians()));

    let plan = plan_normal_alignment(&sketch, locked, free).unwrap();
    assert!(geometry::rotation_u(&plan.orientation).approx_eq(&Vector3::y()));
    assert!(geometry::rotation_v(&plan.orientation).approx_eq(&-Vector3::x()));
}
