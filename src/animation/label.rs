//! Timeline display metadata: label colors, stacking rows and navigation helpers.
//!
//! Nothing here affects evaluation.

use crate::animation::range::TimeRange;

/// Display category of an animation node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelColor {
    /// Generic partial reveal.
    Abstract,
    /// Something appears.
    In,
    /// Something disappears.
    Out,
    /// Emphasis without lasting change.
    Indication,
    /// Shape or style change.
    Transform,
    /// Container.
    Group,
    /// Idle time.
    Wait,
}

impl LabelColor {
    /// 8-bit RGB used when drawing the label.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Abstract => [128, 128, 128],
            Self::In => [64, 160, 96],
            Self::Out => [176, 72, 72],
            Self::Indication => [200, 160, 48],
            Self::Transform => [72, 112, 184],
            Self::Group => [96, 96, 112],
            Self::Wait => [60, 60, 60],
        }
    }
}

/// Assign each range a stacking row so ranges in one row never overlap.
///
/// Ranges are visited by start time (ties keep input order). Each one takes the lowest row whose
/// last occupant has ended by its start (`end <= at`); otherwise it opens a new row. Trailing
/// rows that are free at that moment are dropped so the stack stays compact. Returns one row
/// index per input range, in input order.
pub fn assign_rows(ranges: &[TimeRange]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ranges.len()).collect();
    order.sort_by(|a, b| ranges[*a].at.total_cmp(&ranges[*b].at));

    let mut rows = vec![0; ranges.len()];
    let mut stack: Vec<f64> = Vec::new();
    for index in order {
        let range = ranges[index];
        let mut placed = None;
        let mut max_len = 0;
        for i in 0..stack.len() {
            if stack[i] <= range.at {
                if placed.is_none() {
                    stack[i] = range.end();
                    placed = Some(i);
                    max_len = i + 1;
                }
            } else {
                max_len = i + 1;
            }
        }
        rows[index] = match placed {
            Some(row) => {
                stack.truncate(max_len);
                row
            }
            None => {
                stack.push(range.end());
                stack.len() - 1
            }
        };
    }
    rows
}

/// Latest start strictly before `t`, from starts sorted ascending.
pub fn prev_start(sorted_starts: &[f64], t: f64) -> Option<f64> {
    let idx = sorted_starts.partition_point(|s| *s < t);
    idx.checked_sub(1).map(|i| sorted_starts[i])
}

/// Earliest start strictly after `t`, from starts sorted ascending.
pub fn next_start(sorted_starts: &[f64], t: f64) -> Option<f64> {
    let idx = sorted_starts.partition_point(|s| *s <= t);
    sorted_starts.get(idx).copied()
}

/// Whole preview frame nearest to `time`.
pub fn time_to_progress(time: f64, preview_fps: u32) -> u64 {
    (time * f64::from(preview_fps)).round().max(0.0) as u64
}

/// Time of preview frame `progress`.
pub fn progress_to_time(progress: u64, preview_fps: u32) -> f64 {
    progress as f64 / f64::from(preview_fps.max(1))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/label.rs"]
mod tests;
