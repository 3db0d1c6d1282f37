//! Engine-wide settings loaded from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{VecanimError, VecanimResult};
use crate::scene::item::DEFAULT_STROKE_RADIUS;

/// Frame and import settings shared by the timeline, the SVG importer and the CLI.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Export frame rate.
    pub fps: u32,
    /// Granularity of navigation progress.
    pub preview_fps: u32,
    /// Visible frame width in scene units.
    pub frame_width: f64,
    /// Output width in pixels.
    pub pixel_width: u32,
    /// Output height in pixels.
    pub pixel_height: u32,
    /// Extra multiplier applied to imported SVG coordinates.
    pub svg_scale_factor: f64,
    /// Stroke radius given to imported paths without an explicit stroke width.
    pub default_stroke_radius: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            preview_fps: 60,
            frame_width: 8.0 * 16.0 / 9.0,
            pixel_width: 1920,
            pixel_height: 1080,
            svg_scale_factor: 3.272,
            default_stroke_radius: DEFAULT_STROKE_RADIUS,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> VecanimResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| VecanimError::validation(format!("parse engine config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> VecanimResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VecanimError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check ranges of every field.
    pub fn validate(&self) -> VecanimResult<()> {
        if self.fps == 0 || self.preview_fps == 0 {
            return Err(VecanimError::validation("fps and preview_fps must be > 0"));
        }
        if self.pixel_width == 0 || self.pixel_height == 0 {
            return Err(VecanimError::validation("pixel_width/pixel_height must be > 0"));
        }
        for (name, v) in [
            ("frame_width", self.frame_width),
            ("svg_scale_factor", self.svg_scale_factor),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(VecanimError::validation(format!("{name} must be finite and > 0")));
            }
        }
        if !self.default_stroke_radius.is_finite() || self.default_stroke_radius < 0.0 {
            return Err(VecanimError::validation(
                "default_stroke_radius must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Scene units per pixel.
    pub fn pixel_to_frame_ratio(&self) -> f64 {
        self.frame_width / f64::from(self.pixel_width)
    }

    /// Visible frame height in scene units, from the pixel aspect ratio.
    pub fn frame_height(&self) -> f64 {
        self.frame_width * f64::from(self.pixel_height) / f64::from(self.pixel_width)
    }

    /// Length of one export frame in seconds.
    pub fn frame_duration(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
