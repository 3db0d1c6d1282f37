//! Band-matrix helpers for the spline solver.
//!
//! Band storage follows the LAPACK convention: for lower/upper bandwidths `(l, u)` the dense
//! entry `a[i][j]` lives at `ab[u + i - j][j]`.

use nalgebra::DMatrix;

const PIVOT_EPSILON: f64 = 1e-12;

/// Expand band storage into a dense square matrix.
pub fn diag_to_matrix((l, u): (usize, usize), ab: &DMatrix<f64>) -> DMatrix<f64> {
    let dim = ab.ncols();
    let mut matrix = DMatrix::zeros(dim, dim);
    for j in 0..dim {
        let lo = j.saturating_sub(u);
        let hi = (j + l).min(dim.saturating_sub(1));
        for i in lo..=hi {
            let row = u + i - j;
            if row < ab.nrows() {
                matrix[(i, j)] = ab[(row, j)];
            }
        }
    }
    matrix
}

/// Solve `A x = b` for a banded `A` given in band storage.
///
/// `b` may carry several right-hand sides as columns. Elimination uses partial pivoting within
/// the band, so fill-in is limited to `l + u` super-diagonals. Returns `None` when `A` is
/// singular.
pub fn solve_banded(
    (l, u): (usize, usize),
    ab: &DMatrix<f64>,
    b: &DMatrix<f64>,
) -> Option<DMatrix<f64>> {
    let m = ab.ncols();
    if b.nrows() != m {
        return None;
    }
    if m == 0 {
        return Some(b.clone());
    }
    let mut a = diag_to_matrix((l, u), ab);
    let mut x = b.clone();
    let width = l + u;

    for col in 0..m {
        let last_row = (col + l).min(m - 1);
        let (pivot, magnitude) = (col..=last_row)
            .map(|r| (r, a[(r, col)].abs()))
            .fold((col, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });
        if !(magnitude > PIVOT_EPSILON) {
            return None;
        }
        if pivot != col {
            a.swap_rows(col, pivot);
            x.swap_rows(col, pivot);
        }
        let last_col = (col + width).min(m - 1);
        for r in col + 1..=last_row {
            let factor = a[(r, col)] / a[(col, col)];
            if factor == 0.0 {
                continue;
            }
            for c in col..=last_col {
                a[(r, c)] -= factor * a[(col, c)];
            }
            for k in 0..x.ncols() {
                x[(r, k)] -= factor * x[(col, k)];
            }
        }
    }

    for r in (0..m).rev() {
        let last_col = (r + width).min(m - 1);
        for k in 0..x.ncols() {
            let mut s = x[(r, k)];
            for c in r + 1..=last_col {
                s -= a[(r, c)] * x[(c, k)];
            }
            x[(r, k)] = s / a[(r, r)];
        }
    }
    Some(x)
}

/// Dense LU solve; `None` for singular systems.
pub fn solve_dense(a: DMatrix<f64>, b: &DMatrix<f64>) -> Option<DMatrix<f64>> {
    a.lu().solve(b)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/linalg.rs"]
mod tests;
