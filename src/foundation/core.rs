use crate::foundation::error::{SnapstripError, SnapstripResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Pixel dimensions of a raster surface or on-screen box.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelDims {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelDims {
    /// Build dimensions, rejecting zero-sized surfaces.
    pub fn new(width: u32, height: u32) -> SnapstripResult<Self> {
        if width == 0 || height == 0 {
            return Err(SnapstripError::validation(
                "pixel dimensions must be > 0 in both axes",
            ));
        }
        Ok(Self { width, height })
    }

    /// Width-over-height aspect ratio.
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Straight-alpha RGBA8 color.
///
/// The booth pipeline works in straight alpha throughout (matching the `image`
/// crate's `RgbaImage`); premultiplication happens only inside blend math.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color from RGB components.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string (the form used by the
    /// external color palette).
    pub fn from_hex(s: &str) -> SnapstripResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let parse = |range: std::ops::Range<usize>| -> SnapstripResult<u8> {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| SnapstripError::validation(format!("invalid hex color '{s}'")))
        };
        match hex.len() {
            6 => Ok(Self::opaque(parse(0..2)?, parse(2..4)?, parse(4..6)?)),
            8 => Ok(Self {
                r: parse(0..2)?,
                g: parse(2..4)?,
                b: parse(4..6)?,
                a: parse(6..8)?,
            }),
            _ => Err(SnapstripError::validation(format!(
                "invalid hex color '{s}' (expected #RRGGBB or #RRGGBBAA)"
            ))),
        }
    }

    /// Channels as an `[r, g, b, a]` array.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}
