//! Small 3D vector helpers shared by the curve code.
//!
//! All functions are total: zero-length inputs fall back to identity rotations or zero vectors
//! instead of producing NaN.

use nalgebra::{Rotation3, Unit};

use crate::foundation::core::{Matrix3, OUT, Point3, RIGHT, UP};

const INTERSECTION_THRESHOLD: f64 = 1e-5;

/// Euclidean length.
pub fn get_norm(v: &Point3) -> f64 {
    v.norm()
}

/// Unit vector in the direction of `v`, or the zero vector when `v` has no length.
pub fn normalize(v: &Point3) -> Point3 {
    let n = v.norm();
    if n > 0.0 && n.is_finite() {
        v / n
    } else {
        Point3::zeros()
    }
}

/// z-component of the cross product of the xy projections.
pub fn cross2d(a: &Point3, b: &Point3) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Unsigned angle between two vectors in `[0, pi]`.
pub fn angle_between_vectors(v1: &Point3, v2: &Point3) -> f64 {
    let n1 = normalize(v1);
    let n2 = normalize(v2);
    2.0 * (n1 - n2).norm().atan2((n1 + n2).norm())
}

/// Rotation by `angle` radians about `axis` (right-handed).
pub fn rotation_matrix(angle: f64, axis: &Point3) -> Matrix3<f64> {
    match Unit::try_new(*axis, f64::EPSILON) {
        Some(axis) => Rotation3::from_axis_angle(&axis, angle).into_inner(),
        None => Matrix3::identity(),
    }
}

/// Rotation by `angle` radians about the z axis.
pub fn rotation_about_z(angle: f64) -> Matrix3<f64> {
    rotation_matrix(angle, &OUT)
}

/// Rotation taking the direction of `v1` onto the direction of `v2`.
pub fn rotation_between_vectors(v1: &Point3, v2: &Point3) -> Matrix3<f64> {
    let n1 = normalize(v1);
    let n2 = normalize(v2);
    if (n1 - n2).norm() < 1e-9 {
        return Matrix3::identity();
    }
    let mut axis = v1.cross(v2);
    if axis.norm() < 1e-12 {
        // Antiparallel: any perpendicular axis works.
        axis = v1.cross(&OUT);
        if axis.norm() < 1e-12 {
            axis = v1.cross(&RIGHT);
        }
    }
    rotation_matrix(angle_between_vectors(v1, v2), &normalize(&axis))
}

/// Orthonormal basis (as matrix columns) whose third axis points along `vector`.
pub fn z_to_vector(vector: &Point3) -> Matrix3<f64> {
    let axis_z = normalize(vector);
    if axis_z.norm() == 0.0 {
        return Matrix3::identity();
    }
    let mut axis_y = normalize(&axis_z.cross(&RIGHT));
    let mut axis_x = axis_y.cross(&axis_z);
    if axis_y.norm() == 0.0 {
        axis_x = normalize(&UP.cross(&axis_z));
        axis_y = -axis_x.cross(&axis_z);
    }
    Matrix3::from_columns(&[axis_x, axis_y, axis_z])
}

/// Point on the line `p0 + t * v0` closest to the line `p1 + s * v1`.
///
/// Parallel lines yield `p0`.
pub fn find_intersection(p0: &Point3, v0: &Point3, p1: &Point3, v1: &Point3) -> Point3 {
    let numer = v1.cross(&(p1 - p0));
    let denom = v1.cross(v0);
    let numer_s = numer.dot(&numer);
    let denom_s = denom.dot(&numer);
    if !denom_s.is_finite() || denom_s.abs() < INTERSECTION_THRESHOLD {
        return *p0;
    }
    p0 + v0 * (numer_s / denom_s)
}

/// Arithmetic mean of two points.
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    (a + b) * 0.5
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/space.rs"]
mod tests;
