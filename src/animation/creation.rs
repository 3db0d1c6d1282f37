//! Reveal animations: partial paths, border-then-fill writing and subset reveals.

use crate::animation::label::LabelColor;
use crate::animation::node::{
    AnimKind, AnimNode, DEFAULT_DURATION, ItemAnimation, UpdaterParams, sub_progress,
};
use crate::animation::path_func::PathFunc;
use crate::animation::rate::RateFunc;
use crate::foundation::core::{NAN_POINT, Point3, Rgba};
use crate::foundation::error::VecanimResult;
use crate::foundation::math::points_close;
use crate::geometry::bezier::integer_interpolate;
use crate::geometry::vpoints::{
    pointwise_become_partial, subpath_begin_indices, subpath_end_indices,
};
use crate::scene::graph::{ItemId, Scene};
use crate::scene::item::ItemData;

/// Stroke radius of the outline drawn by [`DrawBorderThenFill`].
pub const OUTLINE_STROKE_RADIUS: f64 = 0.01;

/// Which part of the path is visible at a given alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialBound {
    /// `(0, alpha)`: draw from the start.
    Create,
    /// `(0, 1 - alpha)`: erase from the end.
    Uncreate,
    /// `(alpha, 1)`: erase from the start.
    Destruction,
}

impl PartialBound {
    /// Lower and upper path fractions at `alpha`.
    pub fn bounds(self, alpha: f64) -> (f64, f64) {
        match self {
            Self::Create => (0.0, alpha),
            Self::Uncreate => (0.0, 1.0 - alpha),
            Self::Destruction => (alpha, 1.0),
        }
    }
}

/// [`pointwise_become_partial`] that keeps originally closed subpaths looking closed.
///
/// A subpath whose start and end anchors coincided before the cut but no longer do gets its end
/// anchor pulled back to its start. Its last curve becomes a jump (`[cut, NaN, start]`) and a
/// separator is written after it, so the collapsed tail never draws a chord back to the start.
pub fn partial_with_auto_close(points: &[Point3], a: f64, b: f64, auto_close: bool) -> Vec<Point3> {
    if !auto_close {
        return pointwise_become_partial(points, a, b);
    }
    let ends = subpath_end_indices(points);
    let begins = subpath_begin_indices(&ends);
    let coincide = |pts: &[Point3], first: usize, last: usize| {
        first < last && points_close(&pts[first], &pts[last])
    };
    let was_closed: Vec<bool> = begins
        .iter()
        .zip(&ends)
        .map(|(&first, &last)| coincide(points, first, last))
        .collect();

    let mut out = pointwise_become_partial(points, a, b);
    let last = out.len().saturating_sub(1);
    for ((&begin, &end), closed) in begins.iter().zip(&ends).zip(was_closed) {
        if !closed || coincide(&out[..], begin, end) {
            continue;
        }
        out[end] = out[begin];
        out[end - 1] = NAN_POINT;
        if end != last {
            out[end + 1] = NAN_POINT;
        }
    }
    out
}

/// Show only the part of an item's path given by a [`PartialBound`].
///
/// The item's real data is restored when the animation finishes.
#[derive(Clone, Debug)]
pub struct ShowPartial {
    item: ItemId,
    bound: PartialBound,
    auto_close_path: bool,
    root_only: bool,
    show_at_end: bool,
    originals: Vec<(ItemId, ItemData)>,
}

impl ShowPartial {
    /// Partial reveal of `item` driven by `bound`.
    pub fn new(scene: &Scene, item: ItemId, bound: PartialBound) -> VecanimResult<Self> {
        scene.item(item)?;
        Ok(Self {
            item,
            bound,
            auto_close_path: true,
            root_only: false,
            show_at_end: bound == PartialBound::Create,
            originals: Vec::new(),
        })
    }

    /// Draw the item's path from start to end.
    pub fn create(scene: &Scene, item: ItemId) -> VecanimResult<Self> {
        Self::new(scene, item, PartialBound::Create)
    }

    /// Reverse of [`ShowPartial::create`]; the item is hidden afterwards.
    pub fn uncreate(scene: &Scene, item: ItemId) -> VecanimResult<Self> {
        Self::new(scene, item, PartialBound::Uncreate)
    }

    /// Erase the path from its start; the item is hidden afterwards.
    pub fn destruction(scene: &Scene, item: ItemId) -> VecanimResult<Self> {
        Self::new(scene, item, PartialBound::Destruction)
    }

    /// Keep closed subpaths closed while they are partially drawn.
    pub fn auto_close_path(mut self, enabled: bool) -> Self {
        self.auto_close_path = enabled;
        self
    }

    /// Affect only the item itself, not its descendants.
    pub fn root_only(mut self, enabled: bool) -> Self {
        self.root_only = enabled;
        self
    }

    /// Leave the item visible after the animation.
    pub fn show_at_end(mut self, enabled: bool) -> Self {
        self.show_at_end = enabled;
        self
    }

    pub(crate) fn name(&self) -> &'static str {
        match self.bound {
            PartialBound::Create => "Create",
            PartialBound::Uncreate => "Uncreate",
            PartialBound::Destruction => "Destruction",
        }
    }

    pub(crate) fn label_color(&self) -> LabelColor {
        match self.bound {
            PartialBound::Create => LabelColor::In,
            PartialBound::Uncreate => LabelColor::Out,
            PartialBound::Destruction => LabelColor::Abstract,
        }
    }
}

impl From<ShowPartial> for AnimNode {
    fn from(s: ShowPartial) -> Self {
        AnimNode::leaf(AnimKind::ShowPartial(s), DEFAULT_DURATION, RateFunc::Smooth)
    }
}

fn members(scene: &Scene, item: ItemId, root_only: bool) -> VecanimResult<Vec<ItemId>> {
    if root_only {
        scene.item(item)?;
        Ok(vec![item])
    } else {
        scene.family(item)
    }
}

impl ItemAnimation for ShowPartial {
    fn begin(&mut self, scene: &mut Scene) -> VecanimResult<()> {
        scene.show(self.item)?;
        self.originals = members(scene, self.item, self.root_only)?
            .into_iter()
            .map(|id| Ok((id, scene.data(id)?.clone())))
            .collect::<VecanimResult<_>>()?;
        Ok(())
    }

    fn update(&self, scene: &mut Scene, params: UpdaterParams) -> VecanimResult<()> {
        let (a, b) = self.bound.bounds(params.alpha());
        for (id, data) in &self.originals {
            if !data.has_points() {
                continue;
            }
            let points = partial_with_auto_close(&data.points, a, b, self.auto_close_path);
            scene.set_points(*id, points)?;
        }
        Ok(())
    }

    fn finish(&self, scene: &mut Scene) -> VecanimResult<()> {
        for (id, data) in &self.originals {
            scene.set_data(*id, data.clone())?;
        }
        if !self.show_at_end {
            scene.hide(self.item)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct BorderMember {
    id: ItemId,
    data: ItemData,
    outline: ItemData,
}

/// Draw an item's outline, then cross-fade into its real stroke and fill.
///
/// Family members are staggered by `lag_ratio`. [`DrawBorderThenFill::write`] picks duration and
/// stagger from the number of members.
#[derive(Clone, Debug)]
pub struct DrawBorderThenFill {
    item: ItemId,
    stroke_radius: f64,
    stroke_color: Option<Rgba>,
    lag_ratio: f64,
    skip_null_items: bool,
    root_only: bool,
    write: bool,
    duration: f64,
    rate: RateFunc,
    members: Vec<BorderMember>,
}

impl DrawBorderThenFill {
    /// Two-second outline-then-fill of `item` with double-smooth timing.
    pub fn new(scene: &Scene, item: ItemId) -> VecanimResult<Self> {
        scene.item(item)?;
        Ok(Self {
            item,
            stroke_radius: OUTLINE_STROKE_RADIUS,
            stroke_color: None,
            lag_ratio: 0.0,
            skip_null_items: true,
            root_only: false,
            write: false,
            duration: 2.0,
            rate: RateFunc::DoubleSmooth,
            members: Vec::new(),
        })
    }

    /// Writing effect: linear timing, one second below 15 members (two otherwise), and a
    /// stagger of `min(4 / (n + 1), 0.2)`.
    pub fn write(scene: &Scene, item: ItemId) -> VecanimResult<Self> {
        let mut anim = Self::new(scene, item)?;
        let length = anim.member_ids(scene)?.len();
        anim.write = true;
        anim.duration = if length < 15 { 1.0 } else { 2.0 };
        anim.lag_ratio = (4.0 / (length as f64 + 1.0)).min(0.2);
        anim.rate = RateFunc::Linear;
        Ok(anim)
    }

    /// Outline stroke radius.
    pub fn stroke_radius(mut self, radius: f64) -> Self {
        self.stroke_radius = radius;
        self
    }

    /// Outline stroke color (defaults to each member's own stroke color).
    pub fn stroke_color(mut self, color: Rgba) -> Self {
        self.stroke_color = Some(color);
        self
    }

    /// Stagger between consecutive family members.
    pub fn lag_ratio(mut self, lag_ratio: f64) -> Self {
        self.lag_ratio = lag_ratio.max(0.0);
        self
    }

    /// Affect only the item itself.
    pub fn root_only(mut self, enabled: bool) -> Self {
        self.root_only = enabled;
        self
    }

    pub(crate) fn name(&self) -> &'static str {
        if self.write { "Write" } else { "DrawBorderThenFill" }
    }

    fn member_ids(&self, scene: &Scene) -> VecanimResult<Vec<ItemId>> {
        let ids = members(scene, self.item, self.root_only)?;
        if !self.skip_null_items {
            return Ok(ids);
        }
        let mut kept = Vec::with_capacity(ids.len());
        for id in ids {
            if scene.data(id)?.has_points() {
                kept.push(id);
            }
        }
        Ok(kept)
    }

    fn outline_of(&self, data: &ItemData) -> ItemData {
        let mut outline = data.clone();
        outline.style.stroke_radius = self.stroke_radius;
        outline.style.stroke = self.stroke_color.unwrap_or(data.style.stroke).with_alpha(1.0);
        outline.style.fill = data.style.fill.with_alpha(0.0);
        outline
    }
}

impl From<DrawBorderThenFill> for AnimNode {
    fn from(d: DrawBorderThenFill) -> Self {
        let (duration, rate) = (d.duration, d.rate);
        AnimNode::leaf(AnimKind::DrawBorderThenFill(d), duration, rate)
    }
}

impl ItemAnimation for DrawBorderThenFill {
    fn begin(&mut self, scene: &mut Scene) -> VecanimResult<()> {
        scene.show(self.item)?;
        let ids = self.member_ids(scene)?;
        let mut members = Vec::with_capacity(ids.len());
        for id in ids {
            let data = scene.data(id)?.clone();
            let outline = self.outline_of(&data);
            members.push(BorderMember { id, data, outline });
        }
        self.members = members;
        Ok(())
    }

    fn update(&self, scene: &mut Scene, params: UpdaterParams) -> VecanimResult<()> {
        let n = self.members.len();
        for (i, member) in self.members.iter().enumerate() {
            let sub = sub_progress(params.progress, i, n, self.lag_ratio);
            let alpha = params.rate.apply(sub);
            let (index, subalpha) = integer_interpolate(0, 2, alpha);
            let data = if index == 0 {
                let mut drawn = member.outline.clone();
                drawn.points = pointwise_become_partial(&member.outline.points, 0.0, subalpha);
                drawn
            } else {
                ItemData::interpolate(&member.outline, &member.data, subalpha, &PathFunc::Straight)
            };
            scene.set_data(member.id, data)?;
        }
        Ok(())
    }

    fn finish(&self, scene: &mut Scene) -> VecanimResult<()> {
        for member in &self.members {
            scene.set_data(member.id, member.data.clone())?;
        }
        Ok(())
    }
}

/// How [`ShowSubsets`] picks visible children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsetMode {
    /// The first `round(alpha * n)` children are visible.
    Increasing,
    /// Only child `ceil(alpha * n) - 1` is visible.
    OneByOne,
}

/// Reveal a group's direct children progressively.
#[derive(Clone, Debug)]
pub struct ShowSubsets {
    group: ItemId,
    mode: SubsetMode,
    hide_at_begin: bool,
    show_at_end: bool,
    children: Vec<ItemId>,
}

impl ShowSubsets {
    /// Subset reveal of `group`'s children.
    pub fn new(scene: &Scene, group: ItemId, mode: SubsetMode) -> VecanimResult<Self> {
        scene.item(group)?;
        Ok(Self {
            group,
            mode,
            hide_at_begin: true,
            show_at_end: mode == SubsetMode::Increasing,
            children: Vec::new(),
        })
    }

    /// Children appear one after another and stay.
    pub fn increasing(scene: &Scene, group: ItemId) -> VecanimResult<Self> {
        Self::new(scene, group, SubsetMode::Increasing)
    }

    /// Children flash one at a time.
    pub fn one_by_one(scene: &Scene, group: ItemId) -> VecanimResult<Self> {
        Self::new(scene, group, SubsetMode::OneByOne)
    }

    /// Hide the whole group when the animation begins.
    pub fn hide_at_begin(mut self, enabled: bool) -> Self {
        self.hide_at_begin = enabled;
        self
    }

    /// Show the whole group when the animation ends.
    pub fn show_at_end(mut self, enabled: bool) -> Self {
        self.show_at_end = enabled;
        self
    }

    /// Reveal index at `alpha`: a count for [`SubsetMode::Increasing`], a 1-based slot otherwise.
    pub fn index_at(&self, alpha: f64) -> usize {
        let scaled = alpha * self.children.len() as f64;
        let index = match self.mode {
            SubsetMode::Increasing => scaled.round_ties_even(),
            SubsetMode::OneByOne => scaled.ceil(),
        };
        index.max(0.0) as usize
    }

    fn is_child_visible(&self, i: usize, index: usize) -> bool {
        match self.mode {
            SubsetMode::Increasing => i < index,
            SubsetMode::OneByOne => i + 1 == index,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self.mode {
            SubsetMode::Increasing => "ShowIncreasingSubsets",
            SubsetMode::OneByOne => "ShowSubitemsOneByOne",
        }
    }

    pub(crate) fn label_color(&self) -> LabelColor {
        match self.mode {
            SubsetMode::Increasing => LabelColor::In,
            SubsetMode::OneByOne => LabelColor::Indication,
        }
    }
}

impl From<ShowSubsets> for AnimNode {
    fn from(s: ShowSubsets) -> Self {
        AnimNode::leaf(AnimKind::ShowSubsets(s), DEFAULT_DURATION, RateFunc::Smooth)
    }
}

impl ItemAnimation for ShowSubsets {
    fn begin(&mut self, scene: &mut Scene) -> VecanimResult<()> {
        self.children = scene.children(self.group)?;
        if self.hide_at_begin {
            scene.hide(self.group)?;
        }
        Ok(())
    }

    fn update(&self, scene: &mut Scene, params: UpdaterParams) -> VecanimResult<()> {
        let index = self.index_at(params.alpha());
        for (i, child) in self.children.iter().enumerate() {
            scene.set_visible(*child, self.is_child_visible(i, index))?;
        }
        Ok(())
    }

    fn finish(&self, scene: &mut Scene) -> VecanimResult<()> {
        if self.show_at_end {
            scene.show(self.group)
        } else if self.hide_at_begin {
            scene.hide(self.group)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/creation.rs"]
mod tests;
