//! Bezier evaluation, sub-curve extraction and cubic-to-quadratic approximation.

use std::ops::{Add, Mul};

use crate::foundation::core::{Point3, TAU};
use crate::geometry::space::{cross2d, find_intersection};

/// Values that can be combined as Bezier control points.
pub trait BezierValue: Copy + Add<Output = Self> + Mul<f64, Output = Self> {
    /// Additive identity.
    fn zero() -> Self;
}

impl BezierValue for f64 {
    fn zero() -> Self {
        0.0
    }
}

impl BezierValue for Point3 {
    fn zero() -> Self {
        Point3::zeros()
    }
}

/// Binomial coefficient `n choose k` as a float.
pub fn choose(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Bernstein-form evaluator for the curve defined by `points`.
///
/// An empty control sequence evaluates to zero everywhere.
pub fn bezier<T: BezierValue>(points: &[T]) -> impl Fn(f64) -> T + '_ {
    move |t: f64| {
        let n = points.len().saturating_sub(1);
        points
            .iter()
            .enumerate()
            .fold(T::zero(), |acc, (k, p)| {
                let w = (1.0 - t).powi((n - k) as i32) * t.powi(k as i32) * choose(n, k);
                acc + *p * w
            })
    }
}

/// Control points of the portion of the curve between parameters `a` and `b`.
pub fn partial_bezier_points<T: BezierValue>(points: &[T], a: f64, b: f64) -> Vec<T> {
    let Some(last) = points.last().copied() else {
        return Vec::new();
    };
    if a == 1.0 {
        return vec![last; points.len()];
    }
    let a_to_1: Vec<T> = (0..points.len())
        .map(|i| bezier(&points[i..])(a))
        .collect();
    let end_prop = (b - a) / (1.0 - a);
    (0..points.len())
        .map(|i| bezier(&a_to_1[..=i])(end_prop))
        .collect()
}

/// Closed-form [`partial_bezier_points`] for a single quadratic.
pub fn partial_quadratic_bezier_points<T: BezierValue>(points: &[T; 3], a: f64, b: f64) -> [T; 3] {
    if a == 1.0 {
        return [points[2]; 3];
    }
    let curve = |t: f64| {
        points[0] * ((1.0 - t) * (1.0 - t))
            + points[1] * (2.0 * t * (1.0 - t))
            + points[2] * (t * t)
    };
    let h0 = if a > 0.0 { curve(a) } else { points[0] };
    let h2 = if b < 1.0 { curve(b) } else { points[2] };
    let h1_prime = interpolate(points[1], points[2], a);
    let end_prop = (b - a) / (1.0 - a);
    let h1 = interpolate(h0, h1_prime, end_prop);
    [h0, h1, h2]
}

/// `start * (1 - alpha) + end * alpha`.
pub fn interpolate<T: BezierValue>(start: T, end: T, alpha: f64) -> T {
    start * (1.0 - alpha) + end * alpha
}

/// Element-wise [`interpolate`] of two equally long point sequences.
pub fn interpolate_points(start: &[Point3], end: &[Point3], alpha: f64) -> Vec<Point3> {
    start
        .iter()
        .zip(end)
        .map(|(a, b)| interpolate(*a, *b, alpha))
        .collect()
}

/// Split `alpha` over the integer range `[start, end)`.
///
/// Returns the integer slot and the residue within it; `alpha >= 1` maps to `(end - 1, 1.0)`.
pub fn integer_interpolate(start: i64, end: i64, alpha: f64) -> (i64, f64) {
    if alpha >= 1.0 {
        return (end - 1, 1.0);
    }
    if alpha <= 0.0 {
        return (start, 0.0);
    }
    let value = interpolate(start as f64, end as f64, alpha).trunc() as i64;
    let residue = ((end - start) as f64 * alpha).rem_euclid(1.0);
    (value, residue)
}

/// Midpoint of two values.
pub fn mid<T: BezierValue>(start: T, end: T) -> T {
    (start + end) * 0.5
}

/// Parameter at which `value` sits between `start` and `end`.
pub fn inverse_interpolate(start: f64, end: f64, value: f64) -> f64 {
    (value - start) / (end - start)
}

/// Map `old_value` from the range `[old_start, old_end]` onto `[new_start, new_end]`.
pub fn match_interpolate(
    new_start: f64,
    new_end: f64,
    old_start: f64,
    old_end: f64,
    old_value: f64,
) -> f64 {
    interpolate(
        new_start,
        new_end,
        inverse_interpolate(old_start, old_end, old_value),
    )
}

/// Approximate the cubic `(a0, h0, h1, a1)` with two quadratics `[a0, i0, mid, i1, a1]`.
///
/// The split parameter is the first inflection in `(0, 1)` when there is one, otherwise `0.5`.
/// Assumes the curve lies in the xy plane.
pub fn quadratic_approximation_of_cubic(
    a0: &Point3,
    h0: &Point3,
    h1: &Point3,
    a1: &Point3,
) -> [Point3; 5] {
    let t0 = h0 - a0;
    let t1 = a1 - h1;

    let p = h0 - a0;
    let q = h1 - h0 * 2.0 + a0;
    let r = a1 - h1 * 3.0 + h0 * 3.0 - a0;

    let a = cross2d(&q, &r);
    let b = cross2d(&p, &r);
    let c = cross2d(&p, &q);

    let disc = b * b - 4.0 * a * c;
    let has_infl = disc > 0.0;
    let sqrt_disc = disc.abs().sqrt();
    let root = |sgn: f64| -> f64 {
        if a == 0.0 {
            if b == 0.0 { 0.0 } else { -c / b }
        } else {
            (-b + sgn * sqrt_disc) / (2.0 * a)
        }
    };
    let ti_min = root(-1.0);
    let ti_max = root(1.0);
    let in_range = |t: f64| has_infl && t > 0.0 && t < 1.0;

    let t_mid = if in_range(ti_min) {
        ti_min
    } else if in_range(ti_max) {
        ti_max
    } else {
        0.5
    };

    let cubic = [*a0, *h0, *h1, *a1];
    let mid = bezier(&cubic)(t_mid);
    let tangent = bezier(&[t0, h1 - h0, t1])(t_mid);

    let i0 = find_intersection(a0, &t0, &mid, &tangent);
    let i1 = find_intersection(a1, &t1, &mid, &tangent);
    [*a0, i0, mid, i1, *a1]
}

/// Batched [`quadratic_approximation_of_cubic`]: five points per input cubic.
pub fn get_quadratic_approximation_of_cubic(
    a0: &[Point3],
    h0: &[Point3],
    h1: &[Point3],
    a1: &[Point3],
) -> Vec<Point3> {
    a0.iter()
        .zip(h0)
        .zip(h1)
        .zip(a1)
        .flat_map(|(((a0, h0), h1), a1)| quadratic_approximation_of_cubic(a0, h0, h1, a1))
        .collect()
}

/// Quadratic control points approximating a unit-circle arc.
///
/// Produces `2 * n_components + 1` points starting at `start_angle`; handle points are pushed out
/// by `1 / cos(theta / 2)` so each quadratic is tangent to the circle at its anchors.
pub fn quadratic_bezier_points_for_arc(
    angle: f64,
    start_angle: f64,
    n_components: usize,
) -> Vec<Point3> {
    let n_components = n_components.max(1);
    let n_points = 2 * n_components + 1;
    let theta = angle / n_components as f64;
    let handle_scale = 1.0 / (theta / 2.0).cos();
    (0..n_points)
        .map(|i| {
            let u = start_angle + angle * i as f64 / (n_points - 1) as f64;
            let p = Point3::new(u.cos(), u.sin(), 0.0);
            if i % 2 == 1 { p * handle_scale } else { p }
        })
        .collect()
}

/// Default segment count for an arc of `angle` radians: eight per full turn.
pub(crate) fn arc_components(angle: f64) -> usize {
    ((8.0 * angle.abs() / TAU).ceil() as usize).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bezier.rs"]
mod tests;
