//! Animate recorded item edits.

use std::sync::Arc;

use crate::animation::node::AnimNode;
use crate::animation::path_func::PathFunc;
use crate::animation::transform::{ItemCommand, TargetSource, Transform, TransformFlavor};
use crate::foundation::core::{Point3, Rgba};
use crate::foundation::error::VecanimResult;
use crate::scene::graph::{ItemId, Scene};

/// Records item edits and animates from the current state to the edited one.
///
/// The edits are replayed at begin on a scratch copy of the scene, so they see the item as it is
/// when the animation starts rather than when it was built.
#[derive(Clone)]
pub struct MethodAnimation {
    item: ItemId,
    commands: Vec<ItemCommand>,
    path_func: PathFunc,
}

impl std::fmt::Debug for MethodAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodAnimation")
            .field("item", &self.item)
            .field("commands", &self.commands.len())
            .field("path_func", &self.path_func)
            .finish()
    }
}

impl MethodAnimation {
    /// Start recording edits for `item`.
    pub fn new(scene: &Scene, item: ItemId) -> VecanimResult<Self> {
        scene.item(item)?;
        Ok(Self {
            item,
            commands: Vec::new(),
            path_func: PathFunc::Straight,
        })
    }

    /// Record an arbitrary edit.
    pub fn call(
        mut self,
        command: impl Fn(&mut Scene, ItemId) -> VecanimResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.commands.push(Arc::new(command));
        self
    }

    /// Record a translation.
    pub fn shift(self, delta: Point3) -> Self {
        self.call(move |scene, id| scene.shift(id, delta))
    }

    /// Record a scale about the family center.
    pub fn scale(self, factor: f64) -> Self {
        self.call(move |scene, id| scene.scale(id, factor, None))
    }

    /// Record a rotation about the family center.
    pub fn rotate(self, angle: f64) -> Self {
        self.call(move |scene, id| scene.rotate(id, angle, None, None))
    }

    /// Record a fill color change.
    pub fn set_fill(self, color: Rgba) -> Self {
        self.call(move |scene, id| scene.set_fill(id, color))
    }

    /// Record a stroke color change.
    pub fn set_stroke(self, color: Rgba) -> Self {
        self.call(move |scene, id| scene.set_stroke(id, color))
    }

    /// Record a stroke radius change.
    pub fn set_stroke_radius(self, radius: f64) -> Self {
        self.call(move |scene, id| scene.set_stroke_radius(id, radius))
    }

    /// Interpolate along an arc instead of straight lines.
    pub fn path_arc(mut self, angle: f64) -> Self {
        self.path_func = PathFunc::arc(angle);
        self
    }

    /// Resolve the edits now, against `scene`, instead of at begin.
    pub fn call_immediately(self, scene: &Scene) -> VecanimResult<Transform> {
        let mut scratch = scene.clone();
        for command in &self.commands {
            command(&mut scratch, self.item)?;
        }
        let snapshot = scratch.family_data(self.item)?;
        let transform = Transform::from_source(
            self.item,
            TargetSource::Snapshot(snapshot),
            TransformFlavor::Method,
        );
        Ok(transform.path_func(self.path_func))
    }

    /// Convert into a transform whose target is computed at begin.
    pub fn into_transform(self) -> Transform {
        Transform::from_source(
            self.item,
            TargetSource::Deferred(self.commands),
            TransformFlavor::Method,
        )
        .path_func(self.path_func)
    }
}

impl From<MethodAnimation> for AnimNode {
    fn from(m: MethodAnimation) -> Self {
        m.into_transform().into()
    }
}
