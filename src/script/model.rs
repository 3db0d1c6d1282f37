//! JSON scene description: items, their edits, and a timeline of animation steps.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::rate::RateFunc;
use crate::config::EngineConfig;
use crate::foundation::error::{VecanimError, VecanimResult};

/// Whole scene file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    /// Engine settings; omitted fields take defaults.
    #[serde(default)]
    pub config: EngineConfig,
    /// Items in creation order; parents must come before their children.
    #[serde(default)]
    pub items: Vec<ItemDef>,
    /// Steps applied to the timeline in order.
    #[serde(default)]
    pub timeline: Vec<StepDef>,
}

/// One item (or group) of the scene.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDef {
    /// Name other definitions use to refer to this item.
    pub id: String,
    /// Parent item id; the scene root when absent.
    #[serde(default)]
    pub parent: Option<String>,
    /// SVG path data.
    #[serde(default)]
    pub path: Option<String>,
    /// SVG file, relative to the scene file; the item becomes a group of its paths.
    #[serde(default)]
    pub svg: Option<String>,
    /// Raw quadratic points (`2n + 1` per subpath, no separators).
    #[serde(default)]
    pub points: Option<Vec<[f64; 3]>>,
    /// Requested SVG width in scene units.
    #[serde(default)]
    pub width: Option<f64>,
    /// Requested SVG height in scene units.
    #[serde(default)]
    pub height: Option<f64>,
    /// Render order key.
    #[serde(default)]
    pub depth: f64,
    /// Keep the item out of the render tree (transform targets, items shown later).
    #[serde(default)]
    pub detached: bool,
    /// Start hidden.
    #[serde(default)]
    pub hidden: bool,
    /// Edits applied right after creation.
    #[serde(default)]
    pub edits: EditsDef,
    /// Named targets for `move_to_target`: a copy of the item with extra edits.
    #[serde(default)]
    pub targets: BTreeMap<String, EditsDef>,
}

/// Family edits; colors are `#RRGGBB` or `#RRGGBBAA`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditsDef {
    /// Translation.
    #[serde(default)]
    pub shift: Option<[f64; 3]>,
    /// Scale about the family center.
    #[serde(default)]
    pub scale: Option<f64>,
    /// Rotation in radians about the family center.
    #[serde(default)]
    pub rotate: Option<f64>,
    /// Fill color.
    #[serde(default)]
    pub fill: Option<String>,
    /// Stroke color.
    #[serde(default)]
    pub stroke: Option<String>,
    /// Stroke radius.
    #[serde(default)]
    pub stroke_radius: Option<f64>,
}

impl EditsDef {
    /// `true` when no edit is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One timeline step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDef {
    /// Play at the cursor.
    Play(AnimDef),
    /// Play at an absolute time without moving the cursor.
    PlayAt {
        /// Start time in seconds.
        at: f64,
        /// Animation to play.
        anim: AnimDef,
    },
    /// Idle time in seconds.
    Wait(f64),
}

/// Animation with optional timing overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimDef {
    /// What to animate.
    #[serde(flatten)]
    pub kind: AnimKindDef,
    /// Duration override in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Rate function override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<RateFunc>,
}

/// Animation kinds, tagged by `"anim"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "anim", rename_all = "snake_case")]
pub enum AnimKindDef {
    /// Draw the path from its start.
    Create {
        /// Item id.
        item: String,
    },
    /// Erase the path from its end.
    Uncreate {
        /// Item id.
        item: String,
    },
    /// Erase the path from its start.
    Destruction {
        /// Item id.
        item: String,
    },
    /// Staggered outline-then-fill over the family.
    Write {
        /// Item id.
        item: String,
    },
    /// Outline, then fill.
    DrawBorderThenFill {
        /// Item id.
        item: String,
    },
    /// Morph into another item.
    Transform {
        /// Item id.
        item: String,
        /// Target item id.
        target: String,
        /// Arc angle in radians; `0` moves in straight lines.
        #[serde(default)]
        path_arc: f64,
        /// Put the target in the item's place in the tree.
        #[serde(default)]
        replace: bool,
    },
    /// Animate to a target declared in the item's `targets`.
    MoveToTarget {
        /// Item id.
        item: String,
        /// Target key.
        key: String,
    },
    /// Animate a translation.
    Shift {
        /// Item id.
        item: String,
        /// Offset.
        by: [f64; 3],
    },
    /// Animate arbitrary family edits.
    Edit {
        /// Item id.
        item: String,
        /// Edits resolved when the animation begins.
        edits: EditsDef,
        /// Arc angle in radians.
        #[serde(default)]
        path_arc: f64,
    },
    /// Children staggered by `lag_ratio`.
    Group {
        /// Members.
        anims: Vec<AnimDef>,
        /// Stagger, as a fraction of the previous member's duration.
        #[serde(default)]
        lag_ratio: f64,
    },
    /// Children back to back.
    Succession {
        /// Members.
        anims: Vec<AnimDef>,
    },
    /// Reveal a group's children, keeping each one.
    ShowIncreasingSubsets {
        /// Group id.
        item: String,
    },
    /// Flash a group's children one at a time.
    ShowSubitemsOneByOne {
        /// Group id.
        item: String,
    },
    /// Idle; use `duration` for the length.
    Wait,
}

impl SceneDef {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VecanimResult<Self> {
        let def: Self = serde_json::from_reader(r)
            .map_err(|e| VecanimError::validation(format!("parse scene JSON: {e}")))?;
        def.config.validate()?;
        Ok(def)
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> VecanimResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VecanimError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
