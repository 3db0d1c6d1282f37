use crate::foundation::core::{Point3, Rgba};
use crate::scene::graph::{Item, ItemId};

/// Everything a rendering backend needs to draw one item at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderData {
    /// Source item.
    pub item: ItemId,
    /// Render order key.
    pub depth: f64,
    /// Quadratic points (NaN separators serialize as `null`).
    pub points: Vec<Point3>,
    /// Stroke color.
    pub stroke: Rgba,
    /// Fill color.
    pub fill: Rgba,
    /// Stroke radius.
    pub stroke_radius: f64,
    /// Previous triangulation may be reused.
    pub triangulation_valid: bool,
}

impl RenderData {
    pub(crate) fn from_item(id: ItemId, item: &Item) -> Self {
        let data = item.data();
        Self {
            item: id,
            depth: item.depth(),
            points: data.points.clone(),
            stroke: data.style.stroke,
            fill: data.style.fill,
            stroke_radius: data.style.stroke_radius,
            triangulation_valid: item.triangulation_valid(),
        }
    }
}
