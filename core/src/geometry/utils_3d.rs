//! 3D vector and orientation utilities.
//!
//! Pure functions with no state. Normals are stored as unit quaternions; the
//! rotation they describe maps the x, y and z axes onto the normal's U, V and
//! N directions.

use nalgebra as na;
use super::{Quaternion, Vector3, EPSILON};

// =============================================================================
// Vector Operations
// =============================================================================

/// Component-wise equality within [`EPSILON`].
#[inline]
pub fn vectors_equal(a: &Vector3, b: &Vector3) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
}

/// Rescale `v` to length `s`. A zero vector stays zero.
pub fn with_magnitude(v: &Vector3, s: f64) -> Vector3 {
    let m = v.norm();
    if m < EPSILON * EPSILON {
        Vector3::zeros()
    } else {
        v * (s / m)
    }
}

/// Drop the component of `v` along `plane_normal`, leaving its projection
/// into the plane.
pub fn project_vector_into(v: &Vector3, plane_normal: &Vector3) -> Vector3 {
    let n = with_magnitude(plane_normal, 1.0);
    v - n * n.dot(v)
}

// =============================================================================
// Orientation
// =============================================================================

/// First row of the rotation `[u' v' n']'` generated by `q`.
#[inline]
pub fn rotation_u(q: &Quaternion) -> Vector3 {
    q * Vector3::x()
}

#[inline]
pub fn rotation_v(q: &Quaternion) -> Vector3 {
    q * Vector3::y()
}

#[inline]
pub fn rotation_n(q: &Quaternion) -> Vector3 {
    q * Vector3::z()
}

/// Orientation whose U and V directions are `u` and `v`; N is `u × v`.
///
/// `u` and `v` must be orthonormal.
pub fn quaternion_from_basis(u: &Vector3, v: &Vector3) -> Quaternion {
    let n = u.cross(v);
    let m = na::Matrix3::from_columns(&[*u, *v, n]);
    Quaternion::from_rotation_matrix(&na::Rotation3::from_matrix_unchecked(m))
}
