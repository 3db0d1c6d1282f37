use crate::foundation::core::{OUT, Point3};
use crate::geometry::bezier::interpolate;
use crate::geometry::space::{normalize, rotation_matrix};

/// Arcs flatter than this (radians) are treated as straight paths.
pub const STRAIGHT_PATH_THRESHOLD: f64 = 0.01;

/// Trajectory followed by each point while a transform interpolates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PathFunc {
    /// Straight line between start and end.
    #[default]
    Straight,
    /// Circular arc sweeping `angle` radians about `axis`.
    Arc {
        /// Swept angle in radians.
        angle: f64,
        /// Rotation axis.
        axis: Point3,
    },
}

impl PathFunc {
    /// Path function for a transform with the given arc angle; `0` yields [`PathFunc::Straight`].
    pub fn new(path_arc: f64, axis: Point3) -> Self {
        if path_arc == 0.0 {
            Self::Straight
        } else {
            Self::Arc {
                angle: path_arc,
                axis,
            }
        }
    }

    /// Arc about the screen normal.
    pub fn arc(angle: f64) -> Self {
        Self::new(angle, OUT)
    }

    /// Interpolate two aligned point sequences.
    ///
    /// `alpha == 0` and `alpha == 1` return the inputs exactly; separator points stay NaN.
    pub fn interpolate(&self, start: &[Point3], end: &[Point3], alpha: f64) -> Vec<Point3> {
        if alpha <= 0.0 {
            return start.to_vec();
        }
        if alpha >= 1.0 {
            return end.to_vec();
        }
        match *self {
            Self::Arc { angle, axis } if angle.abs() >= STRAIGHT_PATH_THRESHOLD => {
                let unit_axis = normalize(&axis);
                let rot = rotation_matrix(alpha * angle, &unit_axis);
                let half_turn = angle == std::f64::consts::PI;
                let tan_half = (angle / 2.0).tan();
                start
                    .iter()
                    .zip(end)
                    .map(|(s, e)| {
                        let half = (e - s) / 2.0;
                        let mut center = s + half;
                        if !half_turn {
                            center += unit_axis.cross(&half) / tan_half;
                        }
                        center + rot * (s - center)
                    })
                    .collect()
            }
            _ => start
                .iter()
                .zip(end)
                .map(|(s, e)| interpolate(*s, *e, alpha))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/path_func.rs"]
mod tests;
