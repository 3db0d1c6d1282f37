//! Vecanim is a timeline-driven vector path animation engine.
//!
//! Shapes are stored as flat lists of quadratic Bezier control points (three per curve, with a
//! NaN sentinel marking subpath breaks). On top of that geometry the crate provides:
//!
//! - a [`PathBuilder`] and a small Bezier/spline toolkit
//! - a [`Scene`] arena of items with styles, visibility and named targets
//! - composable [`AnimNode`] trees (transforms, partial reveals, writing, subset reveals)
//! - a [`Timeline`] that samples the scene at arbitrary times
//! - SVG import through `usvg` and a JSON scene script loader
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod animation;
pub(crate) mod assets;
pub(crate) mod config;
pub(crate) mod foundation;
pub(crate) mod geometry;
pub(crate) mod scene;
pub(crate) mod script;
pub(crate) mod timeline;

pub use crate::foundation::core::{
    DEGREES, Matrix3, NAN_POINT, ORIGIN, OUT, Point3, RIGHT, Rgba, TAU, UP, Vector3, is_nan_point,
};
pub use crate::foundation::error::{VecanimError, VecanimResult};
pub use crate::foundation::math::Lerp;

pub use crate::geometry::bezier::{
    BezierValue, bezier, choose, get_quadratic_approximation_of_cubic, integer_interpolate,
    interpolate, interpolate_points, inverse_interpolate, match_interpolate, mid,
    partial_bezier_points, partial_quadratic_bezier_points, quadratic_approximation_of_cubic,
    quadratic_bezier_points_for_arc,
};
pub use crate::geometry::builder::{ARC_LINE_THRESHOLD, PathBuilder};
pub use crate::geometry::linalg::{diag_to_matrix, solve_banded, solve_dense};
pub use crate::geometry::space::{
    angle_between_vectors, cross2d, find_intersection, get_norm, midpoint, normalize,
    rotation_about_z, rotation_between_vectors, rotation_matrix, z_to_vector,
};
pub use crate::geometry::spline::{
    approx_smooth_quadratic_bezier_handles, get_smooth_cubic_bezier_handle_points,
    smooth_quadratic_path,
};
pub use crate::geometry::vpoints::{
    CLOSED_THRESHOLD, align_points, bounding_box, center, curves_count, has_points,
    insert_n_curves, join_subpaths, pointwise_become_partial, split_subpaths, subpath_begin_indices,
    subpath_end_indices, subpath_is_closed,
};

pub use crate::scene::graph::{Item, ItemId, Scene};
pub use crate::scene::item::{AlignedData, DEFAULT_STROKE_RADIUS, ItemData, Style};
pub use crate::scene::render::RenderData;

pub use crate::animation::creation::{
    DrawBorderThenFill, OUTLINE_STROKE_RADIUS, PartialBound, ShowPartial, ShowSubsets, SubsetMode,
    partial_with_auto_close,
};
pub use crate::animation::label::{LabelColor, assign_rows};
pub use crate::animation::method::MethodAnimation;
pub use crate::animation::node::{AnimKind, AnimNode, DEFAULT_DURATION, UpdaterParams};
pub use crate::animation::path_func::{PathFunc, STRAIGHT_PATH_THRESHOLD};
pub use crate::animation::range::TimeRange;
pub use crate::animation::rate::RateFunc;
pub use crate::animation::transform::{ItemCommand, Transform};

pub use crate::assets::cache::SvgCache;
pub use crate::assets::svg::{
    ImportedPath, SvgImportOptions, add_to_scene, import_svg_bytes, import_svg_file,
    path_from_svg_d, replay_bez_path,
};
pub use crate::config::EngineConfig;
pub use crate::script::build::BuiltScene;
pub use crate::script::model::{AnimDef, AnimKindDef, EditsDef, ItemDef, SceneDef, StepDef};
pub use crate::timeline::playback::{Frame, Timeline, TrackEntry};
