use crate::animation::path_func::PathFunc;
use crate::foundation::core::{Point3, Rgba};
use crate::foundation::math::Lerp;
use crate::geometry::vpoints::{self, align_points};

/// Stroke radius given to new items unless configured otherwise.
pub const DEFAULT_STROKE_RADIUS: f64 = 0.02;

/// Per-item paint attributes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    /// Stroke color.
    pub stroke: Rgba,
    /// Fill color.
    pub fill: Rgba,
    /// Half of the stroke width, in scene units.
    pub stroke_radius: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Rgba::WHITE,
            fill: Rgba::TRANSPARENT,
            stroke_radius: DEFAULT_STROKE_RADIUS,
        }
    }
}

impl Lerp for Style {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            stroke: Rgba::lerp(&a.stroke, &b.stroke, t),
            fill: Rgba::lerp(&a.fill, &b.fill, t),
            stroke_radius: Lerp::lerp(&a.stroke_radius, &b.stroke_radius, t),
        }
    }
}

/// The animatable state of one item: its path and its paint.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ItemData {
    /// Quadratic Bezier points, NaN-separated subpaths.
    pub points: Vec<Point3>,
    /// Paint attributes.
    #[serde(default)]
    pub style: Style,
}

/// Two values brought to a common structure, plus the structure itself.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedData<T> {
    /// Left side after alignment.
    pub data1: T,
    /// Right side after alignment.
    pub data2: T,
    /// Shape shared by both sides; written to the live item before interpolation.
    pub union: T,
}

impl ItemData {
    /// Item data with the given points and style.
    pub fn new(points: Vec<Point3>, style: Style) -> Self {
        Self { points, style }
    }

    /// Item data with default style.
    pub fn from_points(points: Vec<Point3>) -> Self {
        Self {
            points,
            style: Style::default(),
        }
    }

    /// Same style, no points.
    pub fn empty_like(&self) -> Self {
        Self {
            points: Vec::new(),
            style: self.style,
        }
    }

    /// `true` when there is at least one real (non-separator) point.
    pub fn has_points(&self) -> bool {
        vpoints::has_points(&self.points)
    }

    /// Align two item states so they can be interpolated point by point.
    pub fn align_for_interpolate(a: &Self, b: &Self) -> AlignedData<Self> {
        let (p1, p2) = align_points(&a.points, &b.points);
        let union = Self {
            points: p1.clone(),
            style: a.style,
        };
        AlignedData {
            data1: Self {
                points: p1,
                style: a.style,
            },
            data2: Self {
                points: p2,
                style: b.style,
            },
            union,
        }
    }

    /// Interpolate two aligned states, moving points along `path_func`.
    ///
    /// Unaligned inputs snap to whichever side `alpha` is closer to.
    pub fn interpolate(a: &Self, b: &Self, alpha: f64, path_func: &PathFunc) -> Self {
        if a.points.len() != b.points.len() {
            return if alpha < 0.5 { a.clone() } else { b.clone() };
        }
        Self {
            points: path_func.interpolate(&a.points, &b.points, alpha),
            style: Style::lerp(&a.style, &b.style, alpha),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/item.rs"]
mod tests;
