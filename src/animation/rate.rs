/// Rate functions mapping normalized animation progress to interpolation alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateFunc {
    /// Identity.
    Linear,
    /// Degree-5 smoothstep with zero first and second derivatives at both ends.
    #[default]
    Smooth,
    /// Smooth in, smooth out, with a plateau through the middle.
    DoubleSmooth,
    /// Slow start, full speed at the end.
    RushInto,
    /// Full speed at the start, slow end.
    RushFrom,
    /// Go to 1 at the midpoint and come back to 0.
    ThereAndBack,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
}

fn smooth(t: f64) -> f64 {
    let s = 1.0 - t;
    t * t * t * (10.0 * s * s + 5.0 * s * t + t * t)
}

impl RateFunc {
    /// Apply this rate function to progress `t` (clamped to `[0, 1]`).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => smooth(t),
            Self::DoubleSmooth => {
                if t < 0.5 {
                    0.5 * smooth(2.0 * t)
                } else {
                    0.5 * (1.0 + smooth(2.0 * t - 1.0))
                }
            }
            Self::RushInto => 2.0 * smooth(0.5 * t),
            Self::RushFrom => 2.0 * smooth(0.5 * (t + 1.0)) - 1.0,
            Self::ThereAndBack => {
                let new_t = if t < 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) };
                smooth(new_t)
            }
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/rate.rs"]
mod tests;
