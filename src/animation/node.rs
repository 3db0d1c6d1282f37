//! Animation tree: composite groups over leaf item animations.

use crate::animation::creation::{DrawBorderThenFill, ShowPartial, ShowSubsets};
use crate::animation::label::LabelColor;
use crate::animation::range::TimeRange;
use crate::animation::rate::RateFunc;
use crate::animation::transform::Transform;
use crate::foundation::error::{VecanimError, VecanimResult};
use crate::foundation::math::clip;
use crate::scene::graph::Scene;

/// Default length of a leaf animation, in seconds.
pub const DEFAULT_DURATION: f64 = 1.0;

/// Progress handed to an animation at each sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdaterParams {
    /// Raw progress through the node's range, in `[0, 1]`.
    pub progress: f64,
    /// Rate function of the node.
    pub rate: RateFunc,
}

impl UpdaterParams {
    /// Rate-mapped progress.
    pub fn alpha(&self) -> f64 {
        self.rate.apply(self.progress)
    }
}

/// Lifecycle of a leaf item animation.
///
/// `begin` captures whatever the animation needs from the scene and may be called again to
/// reset; `update` is a pure function of the captured state and the progress; `finish` runs once
/// when the node's range has been fully played.
pub(crate) trait ItemAnimation {
    fn begin(&mut self, scene: &mut Scene) -> VecanimResult<()>;

    fn update(&self, scene: &mut Scene, params: UpdaterParams) -> VecanimResult<()>;

    fn finish(&self, _scene: &mut Scene) -> VecanimResult<()> {
        Ok(())
    }
}

/// What a node does.
#[derive(Clone, Debug)]
pub enum AnimKind {
    /// Container; children start `lag_ratio` of the previous child's duration apart.
    Group {
        /// Stagger between consecutive children, as a fraction of the previous duration.
        lag_ratio: f64,
    },
    /// Placeholder that only occupies time.
    Wait,
    /// Interpolate an item towards a target state.
    Transform(Transform),
    /// Reveal or hide part of an item's path.
    ShowPartial(ShowPartial),
    /// Outline first, then fill in.
    DrawBorderThenFill(DrawBorderThenFill),
    /// Reveal a group's children one after another.
    ShowSubsets(ShowSubsets),
}

impl AnimKind {
    fn as_item_animation(&mut self) -> Option<&mut dyn ItemAnimation> {
        match self {
            Self::Group { .. } | Self::Wait => None,
            Self::Transform(t) => Some(t),
            Self::ShowPartial(s) => Some(s),
            Self::DrawBorderThenFill(d) => Some(d),
            Self::ShowSubsets(s) => Some(s),
        }
    }

    fn as_item_animation_ref(&self) -> Option<&dyn ItemAnimation> {
        match self {
            Self::Group { .. } | Self::Wait => None,
            Self::Transform(t) => Some(t),
            Self::ShowPartial(s) => Some(s),
            Self::DrawBorderThenFill(d) => Some(d),
            Self::ShowSubsets(s) => Some(s),
        }
    }
}

/// One node of the animation tree.
///
/// Ranges inside a tree are relative to the tree's own start until the tree is placed on a
/// timeline, after which every range is absolute.
#[derive(Clone, Debug)]
pub struct AnimNode {
    range: TimeRange,
    rate: RateFunc,
    kind: AnimKind,
    children: Vec<AnimNode>,
}

impl AnimNode {
    pub(crate) fn leaf(kind: AnimKind, duration: f64, rate: RateFunc) -> Self {
        Self {
            range: TimeRange { at: 0.0, duration },
            rate,
            kind,
            children: Vec::new(),
        }
    }

    /// Node that does nothing for `duration` seconds.
    pub fn wait(duration: f64) -> VecanimResult<Self> {
        let range = TimeRange::new(0.0, duration)?;
        Ok(Self::leaf(AnimKind::Wait, range.duration, RateFunc::Linear))
    }

    /// Group whose children start `lag_ratio` of the previous child's duration apart.
    ///
    /// `0` plays everything together, `1` plays them back to back.
    pub fn group(children: Vec<AnimNode>, lag_ratio: f64) -> VecanimResult<Self> {
        if !lag_ratio.is_finite() || lag_ratio < 0.0 {
            return Err(VecanimError::validation(format!(
                "lag_ratio must be finite and >= 0, got {lag_ratio}"
            )));
        }
        let mut node = Self {
            range: TimeRange {
                at: 0.0,
                duration: 0.0,
            },
            rate: RateFunc::Linear,
            kind: AnimKind::Group { lag_ratio },
            children,
        };
        node.layout_children(lag_ratio);
        Ok(node)
    }

    /// Children played back to back.
    pub fn succession(children: Vec<AnimNode>) -> Self {
        let mut node = Self {
            range: TimeRange {
                at: 0.0,
                duration: 0.0,
            },
            rate: RateFunc::Linear,
            kind: AnimKind::Group { lag_ratio: 1.0 },
            children,
        };
        node.layout_children(1.0);
        node
    }

    fn layout_children(&mut self, lag_ratio: f64) {
        let start = self.range.at;
        let mut cursor = start;
        let mut end = start;
        for child in &mut self.children {
            child.shift_subtree(cursor - child.range.at);
            end = end.max(child.range.end());
            cursor = child.range.at + lag_ratio * child.range.duration;
        }
        self.range.duration = end - start;
    }

    /// Set the duration. Groups rescale their children proportionally.
    pub fn with_duration(mut self, duration: f64) -> VecanimResult<Self> {
        let checked = TimeRange::new(self.range.at, duration)?;
        if self.children.is_empty() || self.range.duration <= 0.0 {
            self.range.duration = checked.duration;
        } else {
            let factor = checked.duration / self.range.duration;
            let origin = self.range.at;
            self.scale_subtree(factor, origin);
        }
        Ok(self)
    }

    /// Set the rate function; on a group it is applied to every leaf.
    pub fn with_rate(mut self, rate: RateFunc) -> Self {
        self.set_rate(rate);
        self
    }

    fn set_rate(&mut self, rate: RateFunc) {
        self.rate = rate;
        for child in &mut self.children {
            child.set_rate(rate);
        }
    }

    /// Time range (absolute once placed on a timeline).
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Rate function.
    pub fn rate(&self) -> RateFunc {
        self.rate
    }

    /// Node behavior.
    pub fn kind(&self) -> &AnimKind {
        &self.kind
    }

    /// Direct children (empty for leaves).
    pub fn children(&self) -> &[AnimNode] {
        &self.children
    }

    /// `true` for nodes that animate or wait rather than contain.
    pub fn is_leaf(&self) -> bool {
        !matches!(self.kind, AnimKind::Group { .. })
    }

    /// Short human-readable kind name.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            AnimKind::Group { lag_ratio } if *lag_ratio >= 1.0 => "Succession",
            AnimKind::Group { .. } => "AnimGroup",
            AnimKind::Wait => "Wait",
            AnimKind::Transform(t) => t.name(),
            AnimKind::ShowPartial(s) => s.name(),
            AnimKind::DrawBorderThenFill(d) => d.name(),
            AnimKind::ShowSubsets(s) => s.name(),
        }
    }

    /// Display category, for timeline visualizations.
    pub fn label_color(&self) -> LabelColor {
        match &self.kind {
            AnimKind::Group { .. } => LabelColor::Group,
            AnimKind::Wait => LabelColor::Wait,
            AnimKind::Transform(_) => LabelColor::Transform,
            AnimKind::ShowPartial(s) => s.label_color(),
            AnimKind::DrawBorderThenFill(_) => LabelColor::In,
            AnimKind::ShowSubsets(s) => s.label_color(),
        }
    }

    /// Leaf nodes in depth-first pre-order.
    pub fn flatten(&self) -> Vec<&AnimNode> {
        self.walk().into_iter().filter(|n| n.is_leaf()).collect()
    }

    /// Every node (groups included) in depth-first pre-order.
    pub fn walk(&self) -> Vec<&AnimNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub(crate) fn push_child(&mut self, child: AnimNode) {
        self.range.duration = self.range.duration.max(child.range.end() - self.range.at);
        self.children.push(child);
    }

    pub(crate) fn place(&mut self, at: f64) {
        self.shift_subtree(at - self.range.at);
    }

    fn shift_subtree(&mut self, dt: f64) {
        self.range = self.range.shifted(dt);
        for child in &mut self.children {
            child.shift_subtree(dt);
        }
    }

    fn scale_subtree(&mut self, factor: f64, origin: f64) {
        self.range = self.range.shifted(-origin).scaled(factor).shifted(origin);
        for child in &mut self.children {
            child.scale_subtree(factor, origin);
        }
    }

    pub(crate) fn leaves_mut(&mut self) -> Vec<&mut AnimNode> {
        let mut out = Vec::new();
        collect_leaves_mut(self, &mut out);
        out
    }

    pub(crate) fn begin(&mut self, scene: &mut Scene) -> VecanimResult<()> {
        tracing::debug!(name = self.name(), at = self.range.at, "begin");
        match self.kind.as_item_animation() {
            Some(anim) => anim.begin(scene),
            None => Ok(()),
        }
    }

    /// Apply the node's state at time `t`; runs `finish` once `t` reaches the end.
    pub(crate) fn sample(&self, scene: &mut Scene, t: f64) -> VecanimResult<()> {
        let Some(anim) = self.kind.as_item_animation_ref() else {
            return Ok(());
        };
        let params = UpdaterParams {
            progress: self.range.progress(t),
            rate: self.rate,
        };
        anim.update(scene, params)?;
        if t >= self.range.end() {
            anim.finish(scene)?;
        }
        Ok(())
    }
}

fn collect_leaves_mut<'a>(node: &'a mut AnimNode, out: &mut Vec<&'a mut AnimNode>) {
    if node.is_leaf() {
        out.push(node);
        return;
    }
    for child in &mut node.children {
        collect_leaves_mut(child, out);
    }
}

/// Per-item progress inside a node that staggers `n` items by `lag_ratio`.
pub(crate) fn sub_progress(progress: f64, index: usize, n: usize, lag_ratio: f64) -> f64 {
    let full = (n.saturating_sub(1)) as f64 * lag_ratio + 1.0;
    clip(progress * full - index as f64 * lag_ratio, 0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/node.rs"]
mod tests;
