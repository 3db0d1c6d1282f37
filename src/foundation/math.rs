use crate::foundation::core::{Point3, Rgba};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t`; `t == 0` and `t == 1` return the endpoints.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (1.0 - t) * a + t * b
    }
}

impl Lerp for Point3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a * (1.0 - t) + b * t
    }
}

impl Lerp for Rgba {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            r: Lerp::lerp(&a.r, &b.r, t),
            g: Lerp::lerp(&a.g, &b.g, t),
            b: Lerp::lerp(&a.b, &b.b, t),
            a: Lerp::lerp(&a.a, &b.a, t),
        }
    }
}

/// Clamp `v` into `[lo, hi]` without panicking on inverted bounds.
pub(crate) fn clip(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

const RTOL: f64 = 1e-5;
const ATOL: f64 = 1e-8;

/// Relative/absolute closeness with the usual `1e-5`/`1e-8` tolerances.
pub(crate) fn is_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= ATOL + RTOL * b.abs()
}

/// Component-wise [`is_close`] for points.
pub(crate) fn points_close(a: &Point3, b: &Point3) -> bool {
    is_close(a.x, b.x) && is_close(a.y, b.y) && is_close(a.z, b.z)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
