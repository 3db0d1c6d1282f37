use crate::foundation::error::{VecanimError, VecanimResult};

/// Closed-open time interval `[at, at + duration)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Start time.
    pub at: f64,
    /// Length; never negative.
    pub duration: f64,
}

impl TimeRange {
    /// Validated range; `duration` must be finite and non-negative, `at` finite.
    pub fn new(at: f64, duration: f64) -> VecanimResult<Self> {
        if !at.is_finite() {
            return Err(VecanimError::validation(format!("range start {at} is not finite")));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(VecanimError::validation(format!(
                "duration must be finite and >= 0, got {duration}"
            )));
        }
        Ok(Self { at, duration })
    }

    /// `at + duration`.
    pub fn end(&self) -> f64 {
        self.at + self.duration
    }

    /// `true` when the two ranges share some instant (touching ranges do not overlap).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.at < other.end() && other.at < self.end()
    }

    /// `true` when `t` falls inside `[at, end)`.
    pub fn contains(&self, t: f64) -> bool {
        self.at <= t && t < self.end()
    }

    /// Same range moved by `dt`.
    pub fn shifted(&self, dt: f64) -> Self {
        Self {
            at: self.at + dt,
            duration: self.duration,
        }
    }

    /// Range with start and duration both multiplied by `factor` (about time zero).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            at: self.at * factor,
            duration: self.duration * factor,
        }
    }

    /// Normalized progress of `t` through this range, clamped to `[0, 1]`.
    ///
    /// Zero-length ranges jump from 0 to 1 at `at`.
    pub fn progress(&self, t: f64) -> f64 {
        if self.duration <= 0.0 {
            return if t >= self.at { 1.0 } else { 0.0 };
        }
        ((t - self.at) / self.duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/range.rs"]
mod tests;
