//! Smooth splines through anchor sequences.

use kurbo::CubicBez;
use nalgebra::DMatrix;

use crate::foundation::core::Point3;
use crate::foundation::math::points_close;
use crate::geometry::bezier::quadratic_approximation_of_cubic;
use crate::geometry::linalg::{diag_to_matrix, solve_banded, solve_dense};
use crate::geometry::space::{midpoint, z_to_vector};

const BAND: (usize, usize) = (2, 1);

/// `true` when the first and last points coincide (component-wise closeness).
pub fn is_closed(points: &[Point3]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => points_close(first, last),
        _ => false,
    }
}

/// Cubic handle pairs for the C2-smooth spline through `points`.
///
/// Returns one `(h1, h2)` per consecutive anchor pair. Closed sequences get a periodic system so
/// the joint at the seam is smooth too. If the linear system is singular the handles collapse onto
/// the anchors (straight segments).
pub fn get_smooth_cubic_bezier_handle_points(points: &[Point3]) -> (Vec<Point3>, Vec<Point3>) {
    let Some(num_handles) = points.len().checked_sub(1).filter(|n| *n >= 1) else {
        return (Vec::new(), Vec::new());
    };
    let m = 2 * num_handles;
    let (l, u) = BAND;

    let mut diag = DMatrix::<f64>::zeros(l + u + 1, m);
    for j in 0..m {
        let odd = j % 2 == 1;
        if odd {
            diag[(0, j)] = -1.0;
            diag[(1, j)] = 1.0;
            if j + 2 < m {
                diag[(2, j)] = -2.0;
            }
        } else {
            if j >= 2 {
                diag[(0, j)] = 1.0;
            }
            diag[(1, j)] = 2.0;
            if j + 3 < m {
                diag[(3, j)] = 1.0;
            }
        }
    }
    diag[(2, m - 2)] = -1.0;
    diag[(1, m - 1)] = 2.0;

    let mut b = DMatrix::<f64>::zeros(m, 3);
    for (k, p) in points.iter().enumerate().skip(1) {
        set_row(&mut b, 2 * k - 1, &(p * 2.0));
    }
    set_row(&mut b, 0, &points[0]);
    set_row(&mut b, m - 1, &points[num_handles]);

    let solved = if is_closed(points) {
        let mut matrix = diag_to_matrix(BAND, &diag);
        let cols = [0, 1, m - 2, m - 1];
        let vals = [2.0, -1.0, 1.0, -2.0];
        for (c, v) in cols.into_iter().zip(vals) {
            matrix[(m - 1, c)] = v;
        }
        matrix.row_mut(0).fill(0.0);
        matrix[(0, 0)] = 1.0;
        matrix[(0, m - 1)] = 1.0;
        set_row(&mut b, 0, &(points[0] * 2.0));
        set_row(&mut b, m - 1, &Point3::zeros());
        solve_dense(matrix, &b)
    } else {
        solve_banded(BAND, &diag, &b)
    };

    match solved.filter(|x| x.iter().all(|v| v.is_finite())) {
        Some(x) => {
            let row = |r: usize| Point3::new(x[(r, 0)], x[(r, 1)], x[(r, 2)]);
            let h1s = (0..num_handles).map(|k| row(2 * k)).collect();
            let h2s = (0..num_handles).map(|k| row(2 * k + 1)).collect();
            (h1s, h2s)
        }
        None => {
            tracing::debug!(
                anchors = points.len(),
                "singular spline system, using straight handles"
            );
            (points[..num_handles].to_vec(), points[1..].to_vec())
        }
    }
}

fn set_row(b: &mut DMatrix<f64>, r: usize, p: &Point3) {
    b[(r, 0)] = p.x;
    b[(r, 1)] = p.y;
    b[(r, 2)] = p.z;
}

/// One quadratic handle per consecutive pair, chosen so the parabolas through neighbouring
/// triples agree on average.
///
/// Two points give their midpoint. Closed sequences wrap around the seam.
pub fn approx_smooth_quadratic_bezier_handles(points: &[Point3]) -> Vec<Point3> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    if n == 2 {
        return vec![midpoint(&points[0], &points[1])];
    }
    let smooth = |ps: &[Point3]| -> Vec<Point3> {
        ps.windows(3)
            .map(|w| w[0] * 0.25 + w[1] - w[2] * 0.25)
            .collect()
    };
    let reversed: Vec<Point3> = points.iter().rev().copied().collect();
    let smooth_to_right = smooth(points);
    let smooth_to_left = smooth(&reversed);

    let (last_str, last_stl) = if points_close(&points[0], &points[n - 1]) {
        (
            points[n - 2] * 0.25 + points[n - 1] - points[1] * 0.25,
            points[1] * 0.25 + points[0] - points[n - 2] * 0.25,
        )
    } else {
        (smooth_to_left[0], smooth_to_right[0])
    };

    let right = smooth_to_right.iter().copied().chain(std::iter::once(last_str));
    let left = std::iter::once(last_stl).chain(smooth_to_left.iter().rev().copied());
    right.zip(left).map(|(r, l)| (r + l) * 0.5).collect()
}

/// Smooth quadratic spline (shared-anchor layout) passing through every anchor.
///
/// Non-planar anchors are rotated into the plane of their first three points, smoothed there and
/// rotated back.
pub fn smooth_quadratic_path(anchors: &[Point3]) -> Vec<Point3> {
    match anchors.len() {
        0 | 1 => return anchors.to_vec(),
        2 => return vec![anchors[0], midpoint(&anchors[0], &anchors[1]), anchors[1]],
        _ => {}
    }

    let is_flat = anchors.iter().all(|p| p.z == 0.0);
    let (local, rot, shift) = if is_flat {
        (anchors.to_vec(), None, 0.0)
    } else {
        let normal = (anchors[2] - anchors[1]).cross(&(anchors[1] - anchors[0]));
        let rot = z_to_vector(&normal);
        let inv = rot.transpose();
        let mut local: Vec<Point3> = anchors.iter().map(|p| inv * p).collect();
        let shift = local[0].z;
        for p in &mut local {
            p.z -= shift;
        }
        (local, Some(rot), shift)
    };

    let (h1s, h2s) = get_smooth_cubic_bezier_handle_points(&local);
    let mut quads = vec![flatten_z(&local[0])];
    for (k, (h1, h2)) in h1s.iter().zip(&h2s).enumerate() {
        let (a0, a1) = (local[k], local[k + 1]);
        quads.extend(cubic_to_quadratics(&a0, h1, h2, &a1));
    }

    quads
        .into_iter()
        .map(|mut p| {
            p.z += shift;
            match rot {
                Some(rot) => rot * p,
                None => p,
            }
        })
        .collect()
}

/// Quadratic pieces (without the leading anchor) approximating one planar cubic.
fn cubic_to_quadratics(a0: &Point3, h1: &Point3, h2: &Point3, a1: &Point3) -> Vec<Point3> {
    let accuracy = 0.1 * (a1 - a0).norm();
    if accuracy > 0.0 && accuracy.is_finite() {
        let to_kurbo = |p: &Point3| kurbo::Point::new(p.x, p.y);
        let cubic = CubicBez::new(to_kurbo(a0), to_kurbo(h1), to_kurbo(h2), to_kurbo(a1));
        let mut out = Vec::new();
        for (_, _, quad) in cubic.to_quads(accuracy) {
            out.push(Point3::new(quad.p1.x, quad.p1.y, 0.0));
            out.push(Point3::new(quad.p2.x, quad.p2.y, 0.0));
        }
        if !out.is_empty() && out.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
            return out;
        }
    }
    quadratic_approximation_of_cubic(a0, h1, h2, a1)[1..]
        .iter()
        .map(flatten_z)
        .collect()
}

fn flatten_z(p: &Point3) -> Point3 {
    Point3::new(p.x, p.y, 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/spline.rs"]
mod tests;
