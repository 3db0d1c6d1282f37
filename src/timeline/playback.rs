//! Timeline: places animation trees in global time and samples the scene at any instant.

use crate::animation::label::{self, assign_rows};
use crate::animation::node::AnimNode;
use crate::config::EngineConfig;
use crate::foundation::error::{VecanimError, VecanimResult};
use crate::scene::graph::Scene;
use crate::scene::render::RenderData;

/// Scene state at one instant, ready for a rendering backend.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame {
    /// Sample time in seconds.
    pub time: f64,
    /// Visible items in paint order.
    pub items: Vec<RenderData>,
}

/// One flattened leaf, as shown on a timeline track.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TrackEntry {
    /// Kind name.
    pub name: &'static str,
    /// Absolute start.
    pub at: f64,
    /// Absolute end.
    pub end: f64,
    /// Stacking row.
    pub row: usize,
    /// Label color.
    pub color: label::LabelColor,
}

/// A base scene plus every animation played on it.
///
/// Sampling never mutates the base scene: [`Timeline::seek`] replays the animations that started
/// at or before the requested time on a fresh copy, so seeks may happen in any order.
#[derive(Clone, Debug)]
pub struct Timeline {
    config: EngineConfig,
    base: Scene,
    root: AnimNode,
    cursor: f64,
}

impl Timeline {
    /// Empty timeline over `scene`.
    pub fn new(scene: Scene, config: EngineConfig) -> Self {
        Self {
            config,
            base: scene,
            root: AnimNode::succession(Vec::new()),
            cursor: 0.0,
        }
    }

    /// Settings used for frame stepping and navigation.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scene as it is before any animation.
    pub fn base_scene(&self) -> &Scene {
        &self.base
    }

    /// Mutable access to the base scene, for adding items between plays.
    pub fn base_scene_mut(&mut self) -> &mut Scene {
        &mut self.base
    }

    /// Time at which the next [`Timeline::play`] starts.
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Play `node` at the cursor and move the cursor to its end.
    pub fn play(&mut self, node: impl Into<AnimNode>) -> &mut Self {
        let at = self.cursor;
        let end = self.place(at, node.into());
        self.cursor = end;
        self
    }

    /// Play `node` starting at `at`; the cursor does not move.
    pub fn play_at(&mut self, at: f64, node: impl Into<AnimNode>) -> VecanimResult<&mut Self> {
        if !at.is_finite() || at < 0.0 {
            return Err(VecanimError::validation(format!(
                "play_at time must be finite and >= 0, got {at}"
            )));
        }
        self.place(at, node.into());
        Ok(self)
    }

    /// Advance the cursor by `duration` seconds of idle time.
    pub fn wait(&mut self, duration: f64) -> VecanimResult<&mut Self> {
        let node = AnimNode::wait(duration)?;
        Ok(self.play(node))
    }

    fn place(&mut self, at: f64, mut node: AnimNode) -> f64 {
        node.place(at);
        let end = node.range().end();
        self.root.push_child(node);
        end
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f64 {
        self.root.range().end().max(self.cursor)
    }

    /// Root of the animation tree; every range in it is absolute.
    pub fn root(&self) -> &AnimNode {
        &self.root
    }

    /// Every leaf animation in depth-first pre-order.
    pub fn flatten(&self) -> Vec<&AnimNode> {
        self.root.flatten()
    }

    /// Stacking row of each flattened leaf.
    pub fn rows(&self) -> Vec<usize> {
        let ranges: Vec<_> = self.flatten().iter().map(|n| n.range()).collect();
        assign_rows(&ranges)
    }

    /// Flattened leaves with their rows, for display.
    pub fn track(&self) -> Vec<TrackEntry> {
        self.flatten()
            .into_iter()
            .zip(self.rows())
            .map(|(node, row)| TrackEntry {
                name: node.name(),
                at: node.range().at,
                end: node.range().end(),
                row,
                color: node.label_color(),
            })
            .collect()
    }

    fn sorted_starts(&self) -> Vec<f64> {
        let mut starts: Vec<f64> = self.flatten().iter().map(|n| n.range().at).collect();
        starts.sort_by(f64::total_cmp);
        starts.dedup();
        starts
    }

    /// Start of the latest animation beginning strictly before `t`.
    pub fn prev_start(&self, t: f64) -> Option<f64> {
        label::prev_start(&self.sorted_starts(), t)
    }

    /// Start of the earliest animation beginning strictly after `t`.
    pub fn next_start(&self, t: f64) -> Option<f64> {
        label::next_start(&self.sorted_starts(), t)
    }

    /// Preview frame index of `time`.
    pub fn time_to_progress(&self, time: f64) -> u64 {
        label::time_to_progress(time, self.config.preview_fps)
    }

    /// Time of preview frame `progress`.
    pub fn progress_to_time(&self, progress: u64) -> f64 {
        label::progress_to_time(progress, self.config.preview_fps)
    }

    /// Scene state at time `t`.
    ///
    /// Leaves are entered in order of start time (pre-order among equal starts). Before a leaf
    /// begins, the leaves already running are advanced to its start, and those that have ended
    /// are finished and dropped. Whatever is still running is then sampled at `t`.
    #[tracing::instrument(skip(self))]
    pub fn seek(&mut self, t: f64) -> VecanimResult<Frame> {
        let scene = self.scene_at(t)?;
        Ok(Frame {
            time: t,
            items: scene.render_data(),
        })
    }

    /// Like [`Timeline::seek`], but returns the whole scene.
    pub fn scene_at(&mut self, t: f64) -> VecanimResult<Scene> {
        if !t.is_finite() {
            return Err(VecanimError::evaluation(format!("cannot seek to t = {t}")));
        }
        let mut scene = self.base.clone();
        let mut leaves = self.root.leaves_mut();
        leaves.sort_by(|a, b| a.range().at.total_cmp(&b.range().at));

        let mut active: Vec<usize> = Vec::new();
        for index in 0..leaves.len() {
            let at = leaves[index].range().at;
            if at > t {
                break;
            }
            let mut running = Vec::with_capacity(active.len() + 1);
            for j in active {
                leaves[j].sample(&mut scene, at)?;
                if leaves[j].range().end() > at {
                    running.push(j);
                }
            }
            leaves[index].begin(&mut scene)?;
            running.push(index);
            active = running;
        }
        for j in active {
            leaves[j].sample(&mut scene, t)?;
        }
        Ok(scene)
    }

    /// Number of export frames, the final state included.
    pub fn frame_count(&self) -> usize {
        (self.duration() * f64::from(self.config.fps)).ceil() as usize + 1
    }

    /// Every export frame in order, from `0` to [`Timeline::duration`].
    pub fn frames(&mut self) -> impl Iterator<Item = VecanimResult<Frame>> + '_ {
        let count = self.frame_count();
        let step = self.config.frame_duration();
        let end = self.duration();
        (0..count).map(move |i| self.seek((i as f64 * step).min(end)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/playback.rs"]
mod tests;
