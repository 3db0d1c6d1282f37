//! Turn a [`SceneDef`] into a scene and a timeline.

use std::collections::BTreeMap;
use std::path::Path;

use crate::animation::creation::{DrawBorderThenFill, ShowPartial, ShowSubsets};
use crate::animation::method::MethodAnimation;
use crate::animation::node::AnimNode;
use crate::animation::transform::Transform;
use crate::assets::svg::{SvgImportOptions, add_to_scene, import_svg_file, path_from_svg_d};
use crate::foundation::core::{Point3, Rgba};
use crate::foundation::error::{VecanimError, VecanimResult};
use crate::scene::graph::{ItemId, Scene};
use crate::scene::item::{ItemData, Style};
use crate::script::model::{AnimDef, AnimKindDef, EditsDef, ItemDef, SceneDef, StepDef};
use crate::timeline::playback::Timeline;

/// Timeline built from a scene file, plus the ids of its named items.
#[derive(Clone, Debug)]
pub struct BuiltScene {
    /// Ready-to-sample timeline.
    pub timeline: Timeline,
    /// Item ids by their name in the file.
    pub ids: BTreeMap<String, ItemId>,
}

impl SceneDef {
    /// Build the scene and its timeline. Relative `svg` paths resolve against `base_dir`.
    pub fn build(&self, base_dir: &Path) -> VecanimResult<BuiltScene> {
        let mut builder = Builder {
            def: self,
            base_dir,
            scene: Scene::new(),
            ids: BTreeMap::new(),
        };
        for item in &self.items {
            builder.add_item(item)?;
        }
        let Builder { scene, ids, .. } = builder;

        let mut timeline = Timeline::new(scene, self.config.clone());
        for step in &self.timeline {
            match step {
                StepDef::Play(anim) => {
                    let node = build_anim(timeline.base_scene(), &ids, anim)?;
                    timeline.play(node);
                }
                StepDef::PlayAt { at, anim } => {
                    let node = build_anim(timeline.base_scene(), &ids, anim)?;
                    timeline.play_at(*at, node)?;
                }
                StepDef::Wait(d) => {
                    timeline.wait(*d)?;
                }
            }
        }
        Ok(BuiltScene { timeline, ids })
    }
}

struct Builder<'a> {
    def: &'a SceneDef,
    base_dir: &'a Path,
    scene: Scene,
    ids: BTreeMap<String, ItemId>,
}

impl Builder<'_> {
    fn add_item(&mut self, def: &ItemDef) -> VecanimResult<()> {
        if self.ids.contains_key(&def.id) {
            return Err(VecanimError::validation(format!("duplicate item id '{}'", def.id)));
        }
        let sources = [def.path.is_some(), def.svg.is_some(), def.points.is_some()];
        if sources.iter().filter(|s| **s).count() > 1 {
            return Err(VecanimError::validation(format!(
                "item '{}' must set at most one of path, svg, points",
                def.id
            )));
        }

        let style = Style {
            stroke_radius: self.def.config.default_stroke_radius,
            ..Style::default()
        };
        let id = if let Some(d) = &def.path {
            self.scene.create(ItemData::new(path_from_svg_d(d)?, style))
        } else if let Some(file) = &def.svg {
            let options = SvgImportOptions {
                width: def.width,
                height: def.height,
            };
            let paths = import_svg_file(self.base_dir.join(file), &self.def.config, options)?;
            let group = add_to_scene(&mut self.scene, &paths)?;
            self.scene.remove(group)?;
            group
        } else if let Some(points) = &def.points {
            let points = points.iter().map(|p| Point3::new(p[0], p[1], p[2])).collect();
            self.scene.create(ItemData::new(points, style))
        } else {
            self.scene.create(ItemData::default())
        };
        self.scene.set_name(id, def.id.clone())?;
        self.scene.set_depth(id, def.depth)?;

        if !def.detached {
            let parent = match &def.parent {
                Some(p) => lookup(&self.ids, p)?,
                None => self.scene.root(),
            };
            self.scene.add(parent, id)?;
        } else if def.parent.is_some() {
            return Err(VecanimError::validation(format!(
                "item '{}' cannot be both detached and parented",
                def.id
            )));
        }
        apply_edits(&mut self.scene, id, &def.edits)?;
        if def.hidden {
            self.scene.hide(id)?;
        }
        for (key, edits) in &def.targets {
            let target = self.scene.generate_target(id, key.clone())?;
            apply_edits(&mut self.scene, target, edits)?;
        }
        self.ids.insert(def.id.clone(), id);
        Ok(())
    }
}

fn lookup(ids: &BTreeMap<String, ItemId>, name: &str) -> VecanimResult<ItemId> {
    ids.get(name)
        .copied()
        .ok_or_else(|| VecanimError::validation(format!("unknown item '{name}'")))
}

fn build_anim(
    scene: &Scene,
    ids: &BTreeMap<String, ItemId>,
    def: &AnimDef,
) -> VecanimResult<AnimNode> {
    let node: AnimNode = match &def.kind {
        AnimKindDef::Create { item } => ShowPartial::create(scene, lookup(ids, item)?)?.into(),
        AnimKindDef::Uncreate { item } => ShowPartial::uncreate(scene, lookup(ids, item)?)?.into(),
        AnimKindDef::Destruction { item } => {
            ShowPartial::destruction(scene, lookup(ids, item)?)?.into()
        }
        AnimKindDef::Write { item } => DrawBorderThenFill::write(scene, lookup(ids, item)?)?.into(),
        AnimKindDef::DrawBorderThenFill { item } => {
            DrawBorderThenFill::new(scene, lookup(ids, item)?)?.into()
        }
        AnimKindDef::Transform {
            item,
            target,
            path_arc,
            replace,
        } => {
            let (item, target) = (lookup(ids, item)?, lookup(ids, target)?);
            let t = if *replace {
                Transform::replacement(scene, item, target)?
            } else {
                Transform::new(scene, item, target)?
            };
            t.path_arc(*path_arc).into()
        }
        AnimKindDef::MoveToTarget { item, key } => {
            Transform::move_to_target(scene, lookup(ids, item)?, key)?.into()
        }
        AnimKindDef::Shift { item, by } => MethodAnimation::new(scene, lookup(ids, item)?)?
            .shift(Point3::new(by[0], by[1], by[2]))
            .into(),
        AnimKindDef::Edit {
            item,
            edits,
            path_arc,
        } => edits_to_method(MethodAnimation::new(scene, lookup(ids, item)?)?, edits)?
            .path_arc(*path_arc)
            .into(),
        AnimKindDef::Group { anims, lag_ratio } => {
            let children = anims
                .iter()
                .map(|a| build_anim(scene, ids, a))
                .collect::<VecanimResult<_>>()?;
            AnimNode::group(children, *lag_ratio)?
        }
        AnimKindDef::Succession { anims } => {
            let children = anims
                .iter()
                .map(|a| build_anim(scene, ids, a))
                .collect::<VecanimResult<_>>()?;
            AnimNode::succession(children)
        }
        AnimKindDef::ShowIncreasingSubsets { item } => {
            ShowSubsets::increasing(scene, lookup(ids, item)?)?.into()
        }
        AnimKindDef::ShowSubitemsOneByOne { item } => {
            ShowSubsets::one_by_one(scene, lookup(ids, item)?)?.into()
        }
        AnimKindDef::Wait => AnimNode::wait(def.duration.unwrap_or(1.0))?,
    };
    let node = match def.duration {
        Some(d) => node.with_duration(d)?,
        None => node,
    };
    Ok(match def.rate {
        Some(rate) => node.with_rate(rate),
        None => node,
    })
}

fn parse_color(hex: Option<&str>) -> VecanimResult<Option<Rgba>> {
    hex.map(Rgba::from_hex).transpose()
}

fn apply_edits(scene: &mut Scene, id: ItemId, edits: &EditsDef) -> VecanimResult<()> {
    if let Some(s) = edits.scale {
        scene.scale(id, s, None)?;
    }
    if let Some(angle) = edits.rotate {
        scene.rotate(id, angle, None, None)?;
    }
    if let Some([x, y, z]) = edits.shift {
        scene.shift(id, Point3::new(x, y, z))?;
    }
    if let Some(c) = parse_color(edits.fill.as_deref())? {
        scene.set_fill(id, c)?;
    }
    if let Some(c) = parse_color(edits.stroke.as_deref())? {
        scene.set_stroke(id, c)?;
    }
    if let Some(r) = edits.stroke_radius {
        scene.set_stroke_radius(id, r)?;
    }
    Ok(())
}

fn edits_to_method(mut m: MethodAnimation, edits: &EditsDef) -> VecanimResult<MethodAnimation> {
    if let Some(s) = edits.scale {
        m = m.scale(s);
    }
    if let Some(angle) = edits.rotate {
        m = m.rotate(angle);
    }
    if let Some([x, y, z]) = edits.shift {
        m = m.shift(Point3::new(x, y, z));
    }
    if let Some(c) = parse_color(edits.fill.as_deref())? {
        m = m.set_fill(c);
    }
    if let Some(c) = parse_color(edits.stroke.as_deref())? {
        m = m.set_stroke(c);
    }
    if let Some(r) = edits.stroke_radius {
        m = m.set_stroke_radius(r);
    }
    Ok(m)
}

#[cfg(test)]
#[path = "../../tests/unit/script/build.rs"]
mod tests;
