use crate::foundation::error::{VecanimError, VecanimResult};

pub use nalgebra::{Matrix3, Vector3};

/// 3-component point/vector used by all path geometry.
///
/// Paths are usually planar (`z == 0`); the third axis exists so rotations about arbitrary axes
/// stay closed over the point type.
pub type Point3 = Vector3<f64>;

/// Origin of the scene coordinate system.
pub const ORIGIN: Point3 = Vector3::new(0.0, 0.0, 0.0);
/// Unit vector pointing right.
pub const RIGHT: Point3 = Vector3::new(1.0, 0.0, 0.0);
/// Unit vector pointing up.
pub const UP: Point3 = Vector3::new(0.0, 1.0, 0.0);
/// Unit vector pointing out of the screen (rotation axis for planar arcs).
pub const OUT: Point3 = Vector3::new(0.0, 0.0, 1.0);

/// Full turn in radians.
pub const TAU: f64 = std::f64::consts::TAU;
/// One degree in radians.
pub const DEGREES: f64 = TAU / 360.0;

/// Sentinel point that separates subpaths inside one point sequence.
pub const NAN_POINT: Point3 = Vector3::new(f64::NAN, f64::NAN, f64::NAN);

/// Return `true` when `p` is a subpath separator.
pub fn is_nan_point(p: &Point3) -> bool {
    p.x.is_nan() || p.y.is_nan() || p.z.is_nan()
}

/// Straight-alpha RGBA color with `f64` channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Build a color from its channels.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> VecanimResult<Self> {
        let s = hex.trim();
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| VecanimError::validation(format!("color '{s}' must start with '#'")))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(VecanimError::validation(format!(
                "color '{s}' must be #RRGGBB or #RRGGBBAA"
            )));
        }
        let channel = |i: usize| -> VecanimResult<u8> {
            let pair = digits.get(i..i + 2).ok_or_else(|| {
                VecanimError::validation(format!("color '{s}' has invalid digits"))
            })?;
            u8::from_str_radix(pair, 16)
                .map_err(|e| VecanimError::validation(format!("color '{s}': {e}")))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_rgba8(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
