//! Morphing one item family into another.

use std::fmt;
use std::sync::Arc;

use crate::animation::node::{
    AnimKind, AnimNode, DEFAULT_DURATION, ItemAnimation, UpdaterParams,
};
use crate::animation::path_func::PathFunc;
use crate::animation::rate::RateFunc;
use crate::foundation::core::{Point3, is_nan_point};
use crate::foundation::error::{VecanimError, VecanimResult};
use crate::scene::graph::{ItemId, Scene};
use crate::scene::item::{AlignedData, ItemData};

/// Deferred edit replayed on a scratch copy of the scene to compute a transform target.
pub type ItemCommand = Arc<dyn Fn(&mut Scene, ItemId) -> VecanimResult<()> + Send + Sync>;

#[derive(Clone)]
pub(crate) enum TargetSource {
    Item(ItemId),
    Snapshot(Vec<ItemData>),
    Deferred(Vec<ItemCommand>),
}

impl fmt::Debug for TargetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => f.debug_tuple("Item").field(id).finish(),
            Self::Snapshot(data) => f.debug_tuple("Snapshot").field(&data.len()).finish(),
            Self::Deferred(cmds) => f.debug_tuple("Deferred").field(&cmds.len()).finish(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TransformFlavor {
    Plain,
    Replacement,
    MoveToTarget,
    Method,
}

#[derive(Clone, Debug)]
struct MemberPlan {
    id: ItemId,
    aligned: AlignedData<ItemData>,
    null: bool,
    tri_equal: bool,
}

/// Interpolates an item's family towards a target state.
///
/// The start and target states are snapshotted at `begin`, aligned member by member (pre-order),
/// and the live items are rewritten at every sample.
#[derive(Clone, Debug)]
pub struct Transform {
    item: ItemId,
    source: TargetSource,
    path_func: PathFunc,
    replace: bool,
    flavor: TransformFlavor,
    plan: Vec<MemberPlan>,
}

impl Transform {
    /// Morph `item` into the shape and style of `target`.
    pub fn new(scene: &Scene, item: ItemId, target: ItemId) -> VecanimResult<Self> {
        scene.item(item)?;
        scene.item(target)?;
        Ok(Self::from_source(item, TargetSource::Item(target), TransformFlavor::Plain))
    }

    /// Like [`Transform::new`], but `target` takes `item`'s place in the tree at begin.
    pub fn replacement(scene: &Scene, item: ItemId, target: ItemId) -> VecanimResult<Self> {
        let mut t = Self::new(scene, item, target)?;
        t.replace = true;
        t.flavor = TransformFlavor::Replacement;
        Ok(t)
    }

    /// Animate `item` to the target registered under `key` with [`Scene::generate_target`].
    pub fn move_to_target(scene: &Scene, item: ItemId, key: &str) -> VecanimResult<Self> {
        let target = scene.item(item)?.target(key).ok_or_else(|| {
            VecanimError::animation(format!(
                "MoveToTarget called on item {} without generating target '{key}' first",
                item.0
            ))
        })?;
        Ok(Self::from_source(
            item,
            TargetSource::Item(target),
            TransformFlavor::MoveToTarget,
        ))
    }

    pub(crate) fn from_source(item: ItemId, source: TargetSource, flavor: TransformFlavor) -> Self {
        Self {
            item,
            source,
            path_func: PathFunc::Straight,
            replace: false,
            flavor,
            plan: Vec::new(),
        }
    }

    /// Move points along an arc of `angle` radians about the screen normal.
    pub fn path_arc(self, angle: f64) -> Self {
        self.path_func(PathFunc::arc(angle))
    }

    /// Move points along an arc of `angle` radians about `axis`.
    pub fn path_arc_axis(self, angle: f64, axis: Point3) -> Self {
        self.path_func(PathFunc::new(angle, axis))
    }

    /// Use an explicit path function.
    pub fn path_func(mut self, path_func: PathFunc) -> Self {
        self.path_func = path_func;
        self
    }

    /// Animated item.
    pub fn item(&self) -> ItemId {
        self.item
    }

    pub(crate) fn name(&self) -> &'static str {
        match self.flavor {
            TransformFlavor::Plain => "Transform",
            TransformFlavor::Replacement => "ReplacementTransform",
            TransformFlavor::MoveToTarget => "MoveToTarget",
            TransformFlavor::Method => "MethodAnimation",
        }
    }

    fn target_data(&self, scene: &Scene) -> VecanimResult<Vec<ItemData>> {
        match &self.source {
            TargetSource::Item(id) => scene.family_data(*id),
            TargetSource::Snapshot(data) => Ok(data.clone()),
            TargetSource::Deferred(commands) => {
                let mut scratch = scene.clone();
                for command in commands {
                    command(&mut scratch, self.item)?;
                }
                scratch.family_data(self.item)
            }
        }
    }
}

impl From<Transform> for AnimNode {
    fn from(t: Transform) -> Self {
        AnimNode::leaf(AnimKind::Transform(t), DEFAULT_DURATION, RateFunc::Smooth)
    }
}

impl ItemAnimation for Transform {
    fn begin(&mut self, scene: &mut Scene) -> VecanimResult<()> {
        let animated = match (&self.source, self.replace) {
            (TargetSource::Item(target), true) => {
                scene.replace_subitem(self.item, *target)?;
                *target
            }
            _ => self.item,
        };

        let mut start = scene.family_data(self.item)?;
        let mut target = self.target_data(scene)?;
        let len = start.len().max(target.len());
        pad_family(&mut start, len);
        pad_family(&mut target, len);

        let mut ids = scene.family(animated)?;
        while ids.len() < len {
            let extra = scene.create(ItemData::default());
            scene.add(animated, extra)?;
            ids.push(extra);
        }

        self.plan = ids
            .into_iter()
            .zip(start.iter().zip(&target))
            .map(|(id, (a, b))| {
                let aligned = ItemData::align_for_interpolate(a, b);
                MemberPlan {
                    id,
                    null: !a.has_points() && !b.has_points(),
                    tri_equal: same_points(&aligned.data1.points, &aligned.data2.points),
                    aligned,
                }
            })
            .collect();

        for member in &self.plan {
            if !member.null {
                scene.set_data(member.id, member.aligned.union.clone())?;
            }
        }
        Ok(())
    }

    fn update(&self, scene: &mut Scene, params: UpdaterParams) -> VecanimResult<()> {
        let alpha = params.alpha();
        for member in &self.plan {
            if member.null {
                continue;
            }
            let data = ItemData::interpolate(
                &member.aligned.data1,
                &member.aligned.data2,
                alpha,
                &self.path_func,
            );
            scene.set_data(member.id, data)?;
            if member.tri_equal {
                scene.set_triangulation_valid(member.id, true)?;
            }
        }
        Ok(())
    }
}

fn pad_family(family: &mut Vec<ItemData>, len: usize) {
    let filler = family.last().map(ItemData::empty_like).unwrap_or_default();
    family.resize(len, filler);
}

/// Point-wise equality where separators compare equal to each other.
fn same_points(a: &[Point3], b: &[Point3]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(p, q)| (is_nan_point(p) && is_nan_point(q)) || p == q)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transform.rs"]
mod tests;
