//! Item arena with parent/child links.
//!
//! Items are addressed by [`ItemId`] and never freed; detaching an item only unlinks it from its
//! parent, so ids captured by animations stay valid for the lifetime of the scene.

use std::collections::BTreeMap;

use crate::foundation::core::{OUT, Point3, Rgba};
use crate::foundation::error::{VecanimError, VecanimResult};
use crate::geometry::space::rotation_matrix;
use crate::geometry::vpoints;
use crate::scene::item::{ItemData, Style};
use crate::scene::render::RenderData;

/// Stable handle of an item inside a [`Scene`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ItemId(pub u32);

/// One node of the scene tree.
#[derive(Clone, Debug, Default)]
pub struct Item {
    name: Option<String>,
    data: ItemData,
    parent: Option<ItemId>,
    children: Vec<ItemId>,
    depth: f64,
    visible: bool,
    triangulation_valid: bool,
    targets: BTreeMap<String, ItemId>,
}

impl Item {
    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Current points and style.
    pub fn data(&self) -> &ItemData {
        &self.data
    }

    /// Parent item, `None` for the root and detached items.
    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    /// Render order key; lower depths draw first.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Visibility flag of this item alone.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether a backend may reuse its previous triangulation for this item.
    pub fn triangulation_valid(&self) -> bool {
        self.triangulation_valid
    }

    /// Target copy registered under `key`.
    pub fn target(&self, key: &str) -> Option<ItemId> {
        self.targets.get(key).copied()
    }
}

/// Arena of items rooted at an invisible group.
#[derive(Clone, Debug)]
pub struct Scene {
    items: Vec<Item>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Scene holding only the root group.
    pub fn new() -> Self {
        let root = Item {
            name: Some("root".to_string()),
            visible: true,
            ..Item::default()
        };
        Self { items: vec![root] }
    }

    /// Root group; items attached below it are rendered.
    pub fn root(&self) -> ItemId {
        ItemId(0)
    }

    /// Number of items ever created (attached or not).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when only the root exists.
    pub fn is_empty(&self) -> bool {
        self.items.len() <= 1
    }

    /// `true` when `id` was created by this scene.
    pub fn contains(&self, id: ItemId) -> bool {
        (id.0 as usize) < self.items.len()
    }

    /// Look up an item.
    pub fn item(&self, id: ItemId) -> VecanimResult<&Item> {
        self.items
            .get(id.0 as usize)
            .ok_or_else(|| VecanimError::animation(format!("unknown item {}", id.0)))
    }

    fn item_mut(&mut self, id: ItemId) -> VecanimResult<&mut Item> {
        self.items
            .get_mut(id.0 as usize)
            .ok_or_else(|| VecanimError::animation(format!("unknown item {}", id.0)))
    }

    /// Create a detached, visible item.
    pub fn create(&mut self, data: ItemData) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(Item {
            data,
            visible: true,
            ..Item::default()
        });
        id
    }

    /// Create an item and attach it to the root.
    pub fn spawn(&mut self, data: ItemData) -> ItemId {
        let id = self.create(data);
        let root = self.root();
        self.items[root.0 as usize].children.push(id);
        self.items[id.0 as usize].parent = Some(root);
        id
    }

    /// Create a pointless group holding `children`, attached to the root.
    pub fn spawn_group(&mut self, children: &[ItemId]) -> VecanimResult<ItemId> {
        let group = self.spawn(ItemData::default());
        for &child in children {
            self.add(group, child)?;
        }
        Ok(group)
    }

    /// Set the display name.
    pub fn set_name(&mut self, id: ItemId, name: impl Into<String>) -> VecanimResult<()> {
        self.item_mut(id)?.name = Some(name.into());
        Ok(())
    }

    /// Move `child` (and its family) under `parent`, appended last.
    pub fn add(&mut self, parent: ItemId, child: ItemId) -> VecanimResult<()> {
        self.item(parent)?;
        self.item(child)?;
        if child == self.root() {
            return Err(VecanimError::validation("the root item cannot be re-parented"));
        }
        if self.ancestors(parent).any(|a| a == child) || parent == child {
            return Err(VecanimError::validation(format!(
                "adding item {} under {} would create a cycle",
                child.0, parent.0
            )));
        }
        self.detach(child);
        self.items[parent.0 as usize].children.push(child);
        self.items[child.0 as usize].parent = Some(parent);
        Ok(())
    }

    /// Unlink `id` from its parent; the item keeps its own children.
    pub fn remove(&mut self, id: ItemId) -> VecanimResult<()> {
        self.item(id)?;
        self.detach(id);
        Ok(())
    }

    fn detach(&mut self, id: ItemId) {
        if let Some(parent) = self.items[id.0 as usize].parent.take() {
            self.items[parent.0 as usize].children.retain(|c| *c != id);
        }
    }

    fn ancestors(&self, id: ItemId) -> impl Iterator<Item = ItemId> + '_ {
        std::iter::successors(self.items.get(id.0 as usize).and_then(|i| i.parent), |p| {
            self.items.get(p.0 as usize).and_then(|i| i.parent)
        })
    }

    /// `true` when `id` is reachable from the root.
    pub fn is_attached(&self, id: ItemId) -> bool {
        id == self.root() || self.ancestors(id).any(|a| a == self.root())
    }

    /// Put `new` where `old` sits in its parent; `old` becomes detached.
    ///
    /// Does nothing if `old` has no parent.
    pub fn replace_subitem(&mut self, old: ItemId, new: ItemId) -> VecanimResult<()> {
        self.item(old)?;
        self.item(new)?;
        if old == new {
            return Ok(());
        }
        let Some(parent) = self.items[old.0 as usize].parent else {
            return Ok(());
        };
        if new == self.root() || self.ancestors(parent).chain([parent]).any(|a| a == new) {
            return Err(VecanimError::validation(format!(
                "item {} cannot replace {} inside its own subtree",
                new.0, old.0
            )));
        }
        self.detach(new);
        let siblings = &mut self.items[parent.0 as usize].children;
        if let Some(slot) = siblings.iter_mut().find(|c| **c == old) {
            *slot = new;
        }
        self.items[old.0 as usize].parent = None;
        self.items[new.0 as usize].parent = Some(parent);
        Ok(())
    }

    /// The item followed by all descendants, pre-order.
    pub fn family(&self, id: ItemId) -> VecanimResult<Vec<ItemId>> {
        self.item(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            out.push(cur);
            stack.extend(self.items[cur.0 as usize].children.iter().rev());
        }
        Ok(out)
    }

    /// Snapshots of the family's data, pre-order.
    pub fn family_data(&self, id: ItemId) -> VecanimResult<Vec<ItemData>> {
        Ok(self
            .family(id)?
            .into_iter()
            .map(|m| self.items[m.0 as usize].data.clone())
            .collect())
    }

    /// Direct children of `id`.
    pub fn children(&self, id: ItemId) -> VecanimResult<Vec<ItemId>> {
        Ok(self.item(id)?.children.clone())
    }

    /// Current data of one item.
    pub fn data(&self, id: ItemId) -> VecanimResult<&ItemData> {
        Ok(&self.item(id)?.data)
    }

    /// Overwrite one item's data; invalidates its triangulation.
    pub fn set_data(&mut self, id: ItemId, data: ItemData) -> VecanimResult<()> {
        let item = self.item_mut(id)?;
        item.data = data;
        item.triangulation_valid = false;
        Ok(())
    }

    /// Overwrite one item's points.
    pub fn set_points(&mut self, id: ItemId, points: Vec<Point3>) -> VecanimResult<()> {
        let item = self.item_mut(id)?;
        item.data.points = points;
        item.triangulation_valid = false;
        Ok(())
    }

    pub(crate) fn set_triangulation_valid(&mut self, id: ItemId, valid: bool) -> VecanimResult<()> {
        self.item_mut(id)?.triangulation_valid = valid;
        Ok(())
    }

    /// Set the render order key of one item.
    pub fn set_depth(&mut self, id: ItemId, depth: f64) -> VecanimResult<()> {
        self.item_mut(id)?.depth = depth;
        Ok(())
    }

    /// Set the visibility of the whole family.
    pub fn set_visible(&mut self, id: ItemId, visible: bool) -> VecanimResult<()> {
        for member in self.family(id)? {
            self.items[member.0 as usize].visible = visible;
        }
        Ok(())
    }

    /// Make the family visible.
    pub fn show(&mut self, id: ItemId) -> VecanimResult<()> {
        self.set_visible(id, true)
    }

    /// Make the family invisible.
    pub fn hide(&mut self, id: ItemId) -> VecanimResult<()> {
        self.set_visible(id, false)
    }

    fn for_family(&mut self, id: ItemId, mut f: impl FnMut(&mut ItemData)) -> VecanimResult<()> {
        for member in self.family(id)? {
            let item = &mut self.items[member.0 as usize];
            f(&mut item.data);
            item.triangulation_valid = false;
        }
        Ok(())
    }

    /// Bounding box of every point in the family.
    pub fn family_bounds(&self, id: ItemId) -> VecanimResult<Option<(Point3, Point3)>> {
        let points: Vec<Point3> = self
            .family(id)?
            .into_iter()
            .flat_map(|m| self.items[m.0 as usize].data.points.iter().copied())
            .collect();
        Ok(vpoints::bounding_box(&points))
    }

    /// Center of [`family_bounds`](Self::family_bounds), origin when empty.
    pub fn family_center(&self, id: ItemId) -> VecanimResult<Point3> {
        Ok(self
            .family_bounds(id)?
            .map(|(lo, hi)| (lo + hi) * 0.5)
            .unwrap_or_else(Point3::zeros))
    }

    /// Translate the family.
    pub fn shift(&mut self, id: ItemId, delta: Point3) -> VecanimResult<()> {
        self.for_family(id, |d| vpoints::shift(&mut d.points, &delta))
    }

    /// Scale the family about `about` (its center by default).
    pub fn scale(&mut self, id: ItemId, factor: f64, about: Option<Point3>) -> VecanimResult<()> {
        let about = match about {
            Some(p) => p,
            None => self.family_center(id)?,
        };
        self.for_family(id, |d| vpoints::scale(&mut d.points, factor, &about))
    }

    /// Rotate the family by `angle` about `axis` (screen normal by default) through `about`.
    pub fn rotate(
        &mut self,
        id: ItemId,
        angle: f64,
        axis: Option<Point3>,
        about: Option<Point3>,
    ) -> VecanimResult<()> {
        let about = match about {
            Some(p) => p,
            None => self.family_center(id)?,
        };
        let matrix = rotation_matrix(angle, &axis.unwrap_or(OUT));
        self.for_family(id, |d| vpoints::apply_matrix(&mut d.points, &matrix, &about))
    }

    /// Set the stroke color of the family.
    pub fn set_stroke(&mut self, id: ItemId, color: Rgba) -> VecanimResult<()> {
        self.for_family(id, |d| d.style.stroke = color)
    }

    /// Set the fill color of the family.
    pub fn set_fill(&mut self, id: ItemId, color: Rgba) -> VecanimResult<()> {
        self.for_family(id, |d| d.style.fill = color)
    }

    /// Set the stroke radius of the family.
    pub fn set_stroke_radius(&mut self, id: ItemId, radius: f64) -> VecanimResult<()> {
        self.for_family(id, |d| d.style.stroke_radius = radius)
    }

    /// Replace the style of the family.
    pub fn set_style(&mut self, id: ItemId, style: Style) -> VecanimResult<()> {
        self.for_family(id, |d| d.style = style)
    }

    /// Deep-copy the family into new detached items; returns the copy of `id`.
    pub fn copy_family(&mut self, id: ItemId) -> VecanimResult<ItemId> {
        let src = self.item(id)?.clone();
        let copy = self.create(src.data.clone());
        {
            let item = &mut self.items[copy.0 as usize];
            item.name = src.name.clone();
            item.depth = src.depth;
            item.visible = src.visible;
        }
        for child in src.children {
            let child_copy = self.copy_family(child)?;
            self.items[copy.0 as usize].children.push(child_copy);
            self.items[child_copy.0 as usize].parent = Some(copy);
        }
        Ok(copy)
    }

    /// Register a detached copy of the family under `key` and return it for editing.
    ///
    /// Calling again with the same key replaces the previous target.
    pub fn generate_target(&mut self, id: ItemId, key: impl Into<String>) -> VecanimResult<ItemId> {
        let copy = self.copy_family(id)?;
        self.item_mut(id)?.targets.insert(key.into(), copy);
        Ok(copy)
    }

    /// Render data for every visible, attached item with points.
    ///
    /// Sorted by ascending depth; equal depths keep tree order.
    pub fn render_data(&self) -> Vec<RenderData> {
        let Ok(order) = self.family(self.root()) else {
            return Vec::new();
        };
        let mut out: Vec<RenderData> = order
            .into_iter()
            .filter_map(|id| {
                let item = &self.items[id.0 as usize];
                (item.visible && item.data.has_points()).then(|| RenderData::from_item(id, item))
            })
            .collect();
        out.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
