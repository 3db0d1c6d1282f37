//! SVG import: usvg tree or raw path data to quadratic item paths.

use std::path::Path;

use anyhow::Context;
use kurbo::{BezPath, PathEl};

use crate::config::EngineConfig;
use crate::foundation::core::{Point3, Rgba};
use crate::foundation::error::{VecanimError, VecanimResult};
use crate::foundation::math::points_close;
use crate::geometry::builder::PathBuilder;
use crate::geometry::vpoints;
use crate::scene::graph::{ItemId, Scene};
use crate::scene::item::{ItemData, Style};

/// Size requested for an import; `None` keeps the configured scale.
///
/// When both are set the width wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SvgImportOptions {
    /// Final width of the whole drawing, in scene units.
    pub width: Option<f64>,
    /// Final height of the whole drawing, in scene units.
    pub height: Option<f64>,
}

/// One imported `<path>` (or flattened glyph outline) in document order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImportedPath {
    /// `id` attribute of the source element, if any.
    pub id: Option<String>,
    /// Points and paint, in scene units.
    pub data: ItemData,
}

struct RawPath {
    id: Option<String>,
    bez: BezPath,
    fill: Rgba,
    stroke: Rgba,
    stroke_width: Option<f64>,
}

/// Parse SVG bytes and convert every visible path.
pub fn import_svg_bytes(
    bytes: &[u8],
    config: &EngineConfig,
    options: SvgImportOptions,
) -> VecanimResult<Vec<ImportedPath>> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    let size = tree.size();
    let (w, h) = (f64::from(size.width()), f64::from(size.height()));

    let mut raw = Vec::new();
    collect_paths(tree.root(), &mut raw);
    tracing::debug!(paths = raw.len(), width = w, height = h, "svg parsed");

    let mut out = Vec::with_capacity(raw.len());
    for path in raw {
        let mut points = replay_bez_path(&path.bez)?;
        for p in points.iter_mut() {
            *p = Point3::new(p.x - w / 2.0, -(p.y - h / 2.0), 0.0);
        }
        out.push((path, points));
    }

    let scale = import_scale(&out, config, options);
    Ok(out
        .into_iter()
        .map(|(path, mut points)| {
            vpoints::scale(&mut points, scale, &Point3::zeros());
            let stroke_radius = path
                .stroke_width
                .map_or(config.default_stroke_radius, |sw| sw * scale / 2.0);
            let style = Style {
                stroke: path.stroke,
                fill: path.fill,
                stroke_radius,
            };
            ImportedPath {
                id: path.id,
                data: ItemData::new(points, style),
            }
        })
        .collect())
}

/// Read and import an SVG file.
pub fn import_svg_file(
    path: impl AsRef<Path>,
    config: &EngineConfig,
    options: SvgImportOptions,
) -> VecanimResult<Vec<ImportedPath>> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read svg file '{}'", path.display()))?;
    import_svg_bytes(&bytes, config, options)
}

/// Add imported paths to `scene` under a new group attached to the root.
pub fn add_to_scene(scene: &mut Scene, paths: &[ImportedPath]) -> VecanimResult<ItemId> {
    let children: Vec<ItemId> = paths
        .iter()
        .map(|p| {
            let id = scene.create(p.data.clone());
            if let Some(name) = &p.id {
                scene.set_name(id, name.clone())?;
            }
            Ok(id)
        })
        .collect::<VecanimResult<_>>()?;
    scene.spawn_group(&children)
}

/// Convert SVG path data (`d` attribute syntax) to quadratic points, y axis unchanged.
pub fn path_from_svg_d(d: &str) -> VecanimResult<Vec<Point3>> {
    let bez = BezPath::from_svg(d.trim())
        .map_err(|e| VecanimError::validation(format!("invalid svg path data: {e}")))?;
    replay_bez_path(&bez)
}

/// Replay kurbo path elements through [`PathBuilder`].
pub fn replay_bez_path(bez: &BezPath) -> VecanimResult<Vec<Point3>> {
    let pt = |p: kurbo::Point| Point3::new(p.x, p.y, 0.0);
    let mut builder = PathBuilder::new();
    for el in bez.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                builder.move_to(pt(p));
            }
            PathEl::LineTo(p) => {
                builder.line_to(pt(p))?;
            }
            PathEl::QuadTo(h, p) => {
                builder.conic_to(pt(h), pt(p))?;
            }
            PathEl::CurveTo(h1, h2, p) => {
                builder.cubic_to(pt(h1), pt(h2), pt(p))?;
            }
            PathEl::ClosePath => {
                if let (Some(start), Some(end)) = (builder.start_point(), builder.end_point())
                    && !points_close(&start, &end)
                {
                    builder.close_path()?;
                }
            }
        }
    }
    Ok(builder.into_points())
}

fn import_scale(
    paths: &[(RawPath, Vec<Point3>)],
    config: &EngineConfig,
    options: SvgImportOptions,
) -> f64 {
    let default = config.pixel_to_frame_ratio() * config.svg_scale_factor;
    let all: Vec<Point3> = paths.iter().flat_map(|(_, pts)| pts.iter().copied()).collect();
    let Some((lo, hi)) = vpoints::bounding_box(&all) else {
        return default;
    };
    let (bw, bh) = (hi.x - lo.x, hi.y - lo.y);
    match (options.width, options.height) {
        (Some(w), _) if bw > 0.0 => w / bw,
        (None, Some(h)) if bh > 0.0 => h / bh,
        _ => default,
    }
}

fn collect_paths(group: &usvg::Group, out: &mut Vec<RawPath>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => collect_paths(g.as_ref(), out),
            usvg::Node::Path(p) => {
                if !p.is_visible() {
                    continue;
                }
                if let Some(raw) = convert_path(p.as_ref()) {
                    out.push(raw);
                }
            }
            usvg::Node::Text(t) => collect_paths(t.flattened(), out),
            usvg::Node::Image(img) => {
                tracing::warn!(id = img.id(), "svg image elements are not supported; skipped");
            }
        }
    }
}

fn convert_path(path: &usvg::Path) -> Option<RawPath> {
    let ts = path.abs_transform();
    let map = |p: usvg::tiny_skia_path::Point| {
        let (x, y) = (f64::from(p.x), f64::from(p.y));
        kurbo::Point::new(
            f64::from(ts.sx) * x + f64::from(ts.kx) * y + f64::from(ts.tx),
            f64::from(ts.ky) * x + f64::from(ts.sy) * y + f64::from(ts.ty),
        )
    };

    let mut bez = BezPath::new();
    for seg in path.data().segments() {
        use usvg::tiny_skia_path::PathSegment;
        match seg {
            PathSegment::MoveTo(p) => bez.move_to(map(p)),
            PathSegment::LineTo(p) => bez.line_to(map(p)),
            PathSegment::QuadTo(h, p) => bez.quad_to(map(h), map(p)),
            PathSegment::CubicTo(h1, h2, p) => bez.curve_to(map(h1), map(h2), map(p)),
            PathSegment::Close => bez.close_path(),
        }
    }
    if bez.elements().is_empty() {
        return None;
    }

    let id = (!path.id().is_empty()).then(|| path.id().to_string());
    let fill = path
        .fill()
        .map_or(Rgba::TRANSPARENT, |f| solid_paint(f.paint(), f.opacity().get(), path.id()));
    let (stroke, stroke_width) = match path.stroke() {
        Some(s) => (
            solid_paint(s.paint(), s.opacity().get(), path.id()),
            Some(f64::from(s.width().get())),
        ),
        None => (Rgba::TRANSPARENT, None),
    };
    Some(RawPath {
        id,
        bez,
        fill,
        stroke,
        stroke_width,
    })
}

fn solid_paint(paint: &usvg::Paint, opacity: f32, id: &str) -> Rgba {
    match paint {
        usvg::Paint::Color(c) => {
            Rgba::from_rgba8(c.red, c.green, c.blue, 255).with_alpha(f64::from(opacity))
        }
        _ => {
            tracing::warn!(id, "only solid svg paints are supported; using transparent");
            Rgba::TRANSPARENT
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg.rs"]
mod tests;
