//! Operations on whole quadratic point sequences (possibly several NaN-separated subpaths).

use crate::foundation::core::{Matrix3, NAN_POINT, Point3, is_nan_point};
use crate::geometry::bezier::{integer_interpolate, partial_quadratic_bezier_points};

/// Start and end anchors closer than this make a subpath closed.
pub const CLOSED_THRESHOLD: f64 = 1e-3;

/// Number of quadratic curves in the sequence (jump curves included).
pub fn curves_count(points: &[Point3]) -> usize {
    if points.len() < 3 {
        0
    } else {
        (points.len() - 1) / 2
    }
}

/// Index of each subpath's last anchor.
///
/// An anchor ends a subpath when the following point is a NaN separator; the final index always
/// ends the last subpath.
pub fn subpath_end_indices(points: &[Point3]) -> Vec<usize> {
    if points.is_empty() {
        return Vec::new();
    }
    let mut ends: Vec<usize> = points
        .windows(2)
        .enumerate()
        .filter(|(_, w)| !is_nan_point(&w[0]) && is_nan_point(&w[1]))
        .map(|(i, _)| i)
        .collect();
    ends.push(points.len() - 1);
    ends
}

/// Index of each subpath's first anchor, paired with [`subpath_end_indices`].
pub fn subpath_begin_indices(ends: &[usize]) -> Vec<usize> {
    std::iter::once(0)
        .chain(ends.iter().take(ends.len().saturating_sub(1)).map(|e| e + 2))
        .take(ends.len())
        .collect()
}

/// Split the sequence into its subpaths.
pub fn split_subpaths(points: &[Point3]) -> Vec<Vec<Point3>> {
    let ends = subpath_end_indices(points);
    let begins = subpath_begin_indices(&ends);
    begins
        .iter()
        .zip(&ends)
        .filter(|(b, e)| b <= e)
        .map(|(&b, &e)| points[b..=e].to_vec())
        .collect()
}

/// Join subpaths back into one sequence with NaN separators.
pub fn join_subpaths(subpaths: &[Vec<Point3>]) -> Vec<Point3> {
    let mut out = Vec::new();
    for (i, sub) in subpaths.iter().enumerate() {
        if i > 0 {
            out.push(NAN_POINT);
        }
        out.extend_from_slice(sub);
    }
    out
}

/// `true` when the subpath's first and last anchors are within [`CLOSED_THRESHOLD`].
pub fn subpath_is_closed(subpath: &[Point3]) -> bool {
    match (subpath.first(), subpath.last()) {
        (Some(a), Some(b)) => subpath.len() > 1 && (a - b).norm() < CLOSED_THRESHOLD,
        _ => false,
    }
}

/// `true` when the sequence holds at least one non-separator point.
pub fn has_points(points: &[Point3]) -> bool {
    points.iter().any(|p| !is_nan_point(p))
}

/// Partial quadratic that tolerates jump curves (NaN handle).
///
/// A jump survives only when the cut keeps it whole; otherwise it collapses onto whichever side
/// of the jump the cut retains.
fn partial_curve(curve: [Point3; 3], a: f64, b: f64) -> [Point3; 3] {
    if is_nan_point(&curve[1]) {
        if a <= 0.0 && b >= 1.0 {
            curve
        } else if b < 1.0 {
            [curve[0]; 3]
        } else {
            [curve[2]; 3]
        }
    } else {
        partial_quadratic_bezier_points(&curve, a, b)
    }
}

fn curve_at(points: &[Point3], index: usize) -> [Point3; 3] {
    [points[2 * index], points[2 * index + 1], points[2 * index + 2]]
}

/// Keep the `[a, b]` fraction of the path (by curve count) and collapse the rest.
///
/// The result has the same length as the input; curves outside the range collapse onto the cut
/// points so the layout stays aligned with the source.
pub fn pointwise_become_partial(points: &[Point3], a: f64, b: f64) -> Vec<Point3> {
    if a <= 0.0 && b >= 1.0 {
        return points.to_vec();
    }
    let num_curves = curves_count(points);
    if num_curves == 0 {
        return points.to_vec();
    }
    let b = b.max(a);
    let n = num_curves as i64;
    let (lower_index, lower_residue) = integer_interpolate(0, n, a);
    let (upper_index, upper_residue) = integer_interpolate(0, n, b);
    let (lower_index, upper_index) = (lower_index as usize, upper_index as usize);

    let i1 = 2 * lower_index;
    let i2 = i1 + 2;
    let i3 = 2 * upper_index;
    let i4 = i3 + 2;

    let mut out = points.to_vec();
    if lower_index == upper_index {
        let tup = partial_curve(curve_at(points, lower_index), lower_residue, upper_residue);
        out[..i1].fill(tup[0]);
        out[i1..=i2].copy_from_slice(&tup);
        out[i4..].fill(tup[2]);
    } else {
        let low = partial_curve(curve_at(points, lower_index), lower_residue, 1.0);
        let high = partial_curve(curve_at(points, upper_index), 0.0, upper_residue);
        out[..i1].fill(low[0]);
        out[i1..=i2].copy_from_slice(&low);
        out[i3..=i4].copy_from_slice(&high);
        out[i4..].fill(high[2]);
    }
    out
}

/// Subdivide a single subpath so it gains `n` extra curves, keeping its shape.
///
/// Curves are split as evenly as possible; a lone anchor becomes `2n + 1` copies of itself.
pub fn insert_n_curves(subpath: &[Point3], n: usize) -> Vec<Point3> {
    let Some(first) = subpath.first().copied() else {
        return Vec::new();
    };
    let num_curves = curves_count(subpath);
    if num_curves == 0 {
        return vec![first; 2 * n + 1];
    }
    let target = num_curves + n;
    let mut split_factors = vec![0usize; num_curves];
    for k in 0..target {
        split_factors[k * num_curves / target] += 1;
    }

    let mut out = vec![first];
    for (index, &factor) in split_factors.iter().enumerate() {
        let curve = curve_at(subpath, index);
        for j in 0..factor {
            let a1 = j as f64 / factor as f64;
            let a2 = (j + 1) as f64 / factor as f64;
            let piece = partial_curve(curve, a1, a2);
            out.extend([piece[1], piece[2]]);
        }
    }
    out
}

/// Make two paths structurally identical: same subpath count and per-subpath curve count.
///
/// Missing subpaths become degenerate paths parked at the last anchor of the shorter side; an
/// empty side is parked at the other side's center.
pub fn align_points(p1: &[Point3], p2: &[Point3]) -> (Vec<Point3>, Vec<Point3>) {
    if p1.is_empty() && p2.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let mut subs1 = split_subpaths(p1);
    let mut subs2 = split_subpaths(p2);
    if subs1.is_empty() {
        subs1.push(vec![center(p2)]);
    }
    if subs2.is_empty() {
        subs2.push(vec![center(p1)]);
    }
    let count = subs1.len().max(subs2.len());
    pad_subpaths(&mut subs1, count);
    pad_subpaths(&mut subs2, count);

    let (mut out1, mut out2) = (Vec::new(), Vec::new());
    for (s1, s2) in subs1.iter().zip(&subs2) {
        let (c1, c2) = (curves_count(s1), curves_count(s2));
        let (a, b) = match c1.cmp(&c2) {
            std::cmp::Ordering::Less => (insert_n_curves(s1, c2 - c1), s2.clone()),
            std::cmp::Ordering::Greater => (s1.clone(), insert_n_curves(s2, c1 - c2)),
            std::cmp::Ordering::Equal if s1.len() == s2.len() => (s1.clone(), s2.clone()),
            std::cmp::Ordering::Equal => (insert_n_curves(s1, 0), insert_n_curves(s2, 0)),
        };
        if !out1.is_empty() {
            out1.push(NAN_POINT);
            out2.push(NAN_POINT);
        }
        out1.extend(a);
        out2.extend(b);
    }
    (out1, out2)
}

fn pad_subpaths(subs: &mut Vec<Vec<Point3>>, count: usize) {
    let parked = subs
        .last()
        .and_then(|s| s.last())
        .copied()
        .unwrap_or_else(Point3::zeros);
    while subs.len() < count {
        subs.push(vec![parked]);
    }
}

/// Axis-aligned bounds `(min, max)` of the non-NaN points.
pub fn bounding_box(points: &[Point3]) -> Option<(Point3, Point3)> {
    let mut finite = points.iter().filter(|p| !is_nan_point(p));
    let first = *finite.next()?;
    Some(finite.fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p))))
}

/// Center of [`bounding_box`], or the origin for an empty path.
pub fn center(points: &[Point3]) -> Point3 {
    bounding_box(points)
        .map(|(lo, hi)| (lo + hi) * 0.5)
        .unwrap_or_else(Point3::zeros)
}

/// Translate every point by `delta`.
pub fn shift(points: &mut [Point3], delta: &Point3) {
    for p in points.iter_mut() {
        *p += delta;
    }
}

/// Scale every point by `factor` about `about`.
pub fn scale(points: &mut [Point3], factor: f64, about: &Point3) {
    for p in points.iter_mut() {
        *p = about + (*p - about) * factor;
    }
}

/// Apply a linear map about `about`.
pub fn apply_matrix(points: &mut [Point3], matrix: &Matrix3<f64>, about: &Point3) {
    for p in points.iter_mut() {
        *p = about + matrix * (*p - about);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/vpoints.rs"]
mod tests;
