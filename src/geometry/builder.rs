use crate::foundation::core::{DEGREES, NAN_POINT, Point3};
use crate::foundation::error::{VecanimError, VecanimResult};
use crate::foundation::math::points_close;
use crate::geometry::bezier::{
    arc_components, quadratic_approximation_of_cubic, quadratic_bezier_points_for_arc,
};
use crate::geometry::space::{
    angle_between_vectors, find_intersection, midpoint, rotation_between_vectors,
};

/// Angles below this (radians) make [`PathBuilder::arc_to`] draw a straight line.
pub const ARC_LINE_THRESHOLD: f64 = 1e-3;

const SIMPLE_APPROX_MAX_ANGLE: f64 = 45.0 * DEGREES;

/// Incremental builder for quadratic Bezier point sequences.
///
/// Output uses the shared-anchor layout (`2n + 1` points for `n` curves); `move_to` after existing
/// points inserts a NaN separator so the next subpath starts fresh.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    points: Vec<Point3>,
    start_point: Option<Point3>,
    end_point: Option<Point3>,
    use_simple_quadratic_approx: bool,
}

impl PathBuilder {
    /// Empty builder; the first call must be [`PathBuilder::move_to`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose current point is `start`.
    pub fn with_start(start: Point3) -> Self {
        Self {
            points: vec![start],
            start_point: Some(start),
            end_point: Some(start),
            use_simple_quadratic_approx: false,
        }
    }

    /// Builder continuing an existing point sequence.
    ///
    /// An empty sequence behaves like [`new`](Self::new).
    pub fn from_points(points: Vec<Point3>) -> Self {
        let start_point = points.first().copied();
        let end_point = points.last().copied();
        Self {
            points,
            start_point,
            end_point,
            use_simple_quadratic_approx: false,
        }
    }

    /// Replace cubics whose end tangents differ by less than 45 degrees with one quadratic.
    pub fn simple_quadratic_approx(mut self, enabled: bool) -> Self {
        self.use_simple_quadratic_approx = enabled;
        self
    }

    /// Start point of the current subpath.
    pub fn start_point(&self) -> Option<Point3> {
        self.start_point
    }

    /// Current pen position.
    pub fn end_point(&self) -> Option<Point3> {
        self.end_point
    }

    /// Accumulated points (empty if nothing was added).
    pub fn get(&self) -> Vec<Point3> {
        self.points.clone()
    }

    /// Consume the builder and return its points.
    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    /// Append raw points (which must continue from the current anchor).
    ///
    /// With `line_to_start_point`, a straight-segment handle from the current end to `points[0]`
    /// is inserted first.
    pub fn append(&mut self, points: &[Point3], line_to_start_point: bool) -> &mut Self {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return self;
        };
        if line_to_start_point && let Some(end) = self.end_point {
            self.points.push(midpoint(&end, first));
        }
        self.points.extend_from_slice(points);
        if self.start_point.is_none() {
            self.start_point = Some(*first);
        }
        self.end_point = Some(*last);
        self
    }

    /// Begin a new subpath at `point`.
    pub fn move_to(&mut self, point: Point3) -> &mut Self {
        if self.end_point.is_some() {
            self.points.push(NAN_POINT);
        }
        self.points.push(point);
        self.start_point = Some(point);
        self.end_point = Some(point);
        self
    }

    /// Straight segment to `point`.
    pub fn line_to(&mut self, point: Point3) -> VecanimResult<&mut Self> {
        let end = self.require_end("line_to")?;
        self.points.extend([midpoint(&end, &point), point]);
        self.end_point = Some(point);
        Ok(self)
    }

    /// Quadratic segment through `handle` to `point`.
    pub fn conic_to(&mut self, handle: Point3, point: Point3) -> VecanimResult<&mut Self> {
        self.require_end("conic_to")?;
        self.push_conic(handle, point);
        Ok(self)
    }

    /// Cubic segment, stored as one or two quadratics.
    pub fn cubic_to(
        &mut self,
        handle1: Point3,
        handle2: Point3,
        anchor: Point3,
    ) -> VecanimResult<&mut Self> {
        let last = self.require_end("cubic_to")?;
        if points_close(&last, &handle1) {
            self.push_conic(handle2, anchor);
            return Ok(self);
        }
        if points_close(&handle1, &handle2) {
            self.push_conic(handle1, anchor);
            return Ok(self);
        }
        if points_close(&handle2, &anchor) {
            self.push_conic(handle1, handle2);
            return Ok(self);
        }

        let v1 = handle1 - last;
        let v2 = anchor - handle2;
        if self.use_simple_quadratic_approx
            && angle_between_vectors(&v1, &v2) < SIMPLE_APPROX_MAX_ANGLE
        {
            let handle = find_intersection(&last, &v1, &anchor, &-v2);
            self.points.extend([handle, anchor]);
        } else {
            let quads = quadratic_approximation_of_cubic(&last, &handle1, &handle2, &anchor);
            self.points.extend_from_slice(&quads[1..]);
        }
        self.end_point = Some(anchor);
        Ok(self)
    }

    /// Circular arc to `point` sweeping `angle` radians (positive is counter-clockwise).
    ///
    /// `n_components` defaults to eight segments per full turn. Angles under
    /// [`ARC_LINE_THRESHOLD`] degrade to [`line_to`](Self::line_to).
    pub fn arc_to(
        &mut self,
        point: Point3,
        angle: f64,
        n_components: Option<usize>,
    ) -> VecanimResult<&mut Self> {
        let end = self.require_end("arc_to")?;
        if angle.abs() < ARC_LINE_THRESHOLD {
            return self.line_to(point);
        }
        let n_components = n_components.unwrap_or_else(|| arc_components(angle));
        let unit_arc = quadratic_bezier_points_for_arc(angle, 0.0, n_components);
        let (Some(first), Some(last)) = (unit_arc.first(), unit_arc.last()) else {
            return self.line_to(point);
        };
        let target_vect = point - end;
        let curr_vect = last - first;
        let curr_len = curr_vect.norm();
        if curr_len < f64::EPSILON {
            return self.line_to(point);
        }

        let rot = rotation_between_vectors(&curr_vect, &target_vect);
        let scale = target_vect.norm() / curr_len;
        let placed: Vec<Point3> = unit_arc.iter().map(|p| rot * p * scale).collect();
        let offset = end - placed[0];
        let arc: Vec<Point3> = placed.iter().skip(1).map(|p| p + offset).collect();
        self.append(&arc, false);
        Ok(self)
    }

    /// Straight segment back to the current subpath's start point.
    pub fn close_path(&mut self) -> VecanimResult<&mut Self> {
        self.require_end("close_path")?;
        let start = self.start_point.ok_or_else(|| no_start_error("close_path"))?;
        self.line_to(start)
    }

    fn push_conic(&mut self, handle: Point3, point: Point3) {
        self.points.extend([handle, point]);
        self.end_point = Some(point);
    }

    fn require_end(&self, op: &str) -> VecanimResult<Point3> {
        self.end_point.ok_or_else(|| no_start_error(op))
    }
}

fn no_start_error(op: &str) -> VecanimError {
    VecanimError::point(format!(
        "PathBuilder must be initialized with a start point or points, \
         or have move_to as the first call, otherwise {op} cannot be invoked"
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/builder.rs"]
mod tests;
