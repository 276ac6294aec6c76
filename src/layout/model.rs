use crate::{
    foundation::core::Rgba8,
    foundation::error::{SnapstripError, SnapstripResult},
};

/// Identifier of an image in the external asset catalog.
///
/// The engine treats artwork and stickers as opaque drawable images once
/// resolved through [`crate::PreparedAssetStore`].
pub type AssetRef = String;

/// Supported photo-strip grid shapes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum SlotCount {
    /// Single column of 4 cells, tall narrow strip.
    Four,
    /// Two columns of 4 cells each, column-major fill order.
    Eight,
}

impl SlotCount {
    /// Number of layout slots.
    pub fn slots(self) -> usize {
        match self {
            SlotCount::Four => 4,
            SlotCount::Eight => 8,
        }
    }

    /// Width-over-height aspect ratio of the strip box.
    pub fn aspect_ratio(self) -> f64 {
        match self {
            SlotCount::Four => 1.0 / 3.0,
            SlotCount::Eight => 2.0 / 3.0,
        }
    }
}

/// Background fill behind the slot cells.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Background {
    /// Uniform color fill.
    Solid(Rgba8),
    /// Two-stop linear gradient.
    LinearGradient {
        /// Color at the gradient start.
        from: Rgba8,
        /// Color at the gradient end.
        to: Rgba8,
        /// Gradient direction in degrees; 180 points straight down
        /// (top-to-bottom), matching CSS `linear-gradient` angles.
        angle_deg: f64,
    },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Rgba8::WHITE)
    }
}

impl Background {
    /// Built-in gradient presets offered by the booth, as `(name, background)`
    /// pairs.
    pub fn gradient_presets() -> Vec<(&'static str, Background)> {
        let g = |from: Rgba8, to: Rgba8| Background::LinearGradient {
            from,
            to,
            angle_deg: 135.0,
        };
        vec![
            ("Peach", g(Rgba8::opaque(0xff, 0xec, 0xd2), Rgba8::opaque(0xfc, 0xb6, 0x9f))),
            ("Lavender", g(Rgba8::opaque(0xe0, 0xc3, 0xfc), Rgba8::opaque(0x8e, 0xc5, 0xfc))),
            ("Mint", g(Rgba8::opaque(0xd4, 0xfc, 0x79), Rgba8::opaque(0x96, 0xe6, 0xa1))),
            ("Ocean", g(Rgba8::opaque(0xa1, 0xc4, 0xfd), Rgba8::opaque(0xc2, 0xe9, 0xfb))),
            ("Rose", g(Rgba8::opaque(0xff, 0x9a, 0x9e), Rgba8::opaque(0xfe, 0xcf, 0xef))),
            ("Dusk", g(Rgba8::opaque(0x30, 0xcf, 0xd0), Rgba8::opaque(0x33, 0x08, 0x67))),
        ]
    }

    /// Built-in solid color palette.
    pub fn color_palette() -> Vec<Rgba8> {
        vec![
            Rgba8::WHITE,
            Rgba8::BLACK,
            Rgba8::opaque(0xf8, 0xbb, 0xd0),
            Rgba8::opaque(0xff, 0xcd, 0xd2),
            Rgba8::opaque(0xff, 0xe0, 0xb2),
            Rgba8::opaque(0xff, 0xf9, 0xc4),
            Rgba8::opaque(0xc8, 0xe6, 0xc9),
            Rgba8::opaque(0xb2, 0xdf, 0xdb),
            Rgba8::opaque(0xb3, 0xe5, 0xfc),
            Rgba8::opaque(0xc5, 0xca, 0xe9),
            Rgba8::opaque(0xd1, 0xc4, 0xe9),
            Rgba8::opaque(0xd7, 0xcc, 0xc8),
        ]
    }
}

/// Decorative artwork pair scoped to one slot count.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameArtwork {
    /// Image drawn beneath slot content, fit inside the strip box.
    pub background: Option<AssetRef>,
    /// Image drawn above slot content, typically with transparent slot-shaped
    /// cutouts.
    pub overlay: Option<AssetRef>,
}

/// Placement of a sticker, anchored to its own center.
///
/// Coordinates are percentages of the layout's own box so stickers scale with
/// the layout's render size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Horizontal center position as a percentage of the box width.
    pub x_pct: f64,
    /// Vertical center position as a percentage of the box height.
    pub y_pct: f64,
    /// Clockwise rotation in degrees.
    pub rotation_deg: f64,
    /// Uniform scale multiplier, > 0.
    pub scale: f64,
}

impl Placement {
    /// Validate placement invariants.
    pub fn validate(&self) -> SnapstripResult<()> {
        for (name, v) in [
            ("x_pct", self.x_pct),
            ("y_pct", self.y_pct),
            ("rotation_deg", self.rotation_deg),
        ] {
            if !v.is_finite() {
                return Err(SnapstripError::validation(format!(
                    "sticker placement {name} must be finite"
                )));
            }
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SnapstripError::validation(
                "sticker placement scale must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// A sticker image placed on the layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StickerInstance {
    /// Catalog reference of the sticker image.
    pub asset: AssetRef,
    /// Where and how the sticker sits on the strip.
    pub placement: Placement,
}

/// A complete styled photo-strip layout.
///
/// Pure data: grid shape, background fill, optional artwork pair, and placed
/// stickers. What fills the slots comes from the frame pool and selection at
/// render time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutSpec {
    /// Grid shape.
    pub slot_count: SlotCount,
    /// Fill behind the cells.
    pub background: Background,
    /// Optional artwork pair (background under cells, overlay above).
    pub frame: Option<FrameArtwork>,
    /// Stickers drawn above everything.
    pub stickers: Vec<StickerInstance>,
}

impl LayoutSpec {
    /// Undecorated layout for a slot count: white background, no artwork, no
    /// stickers.
    pub fn new(slot_count: SlotCount) -> Self {
        Self {
            slot_count,
            background: Background::default(),
            frame: None,
            stickers: Vec::new(),
        }
    }

    /// Validate layout invariants.
    pub fn validate(&self) -> SnapstripResult<()> {
        if let Background::LinearGradient { angle_deg, .. } = self.background
            && !angle_deg.is_finite()
        {
            return Err(SnapstripError::validation(
                "gradient angle_deg must be finite",
            ));
        }
        for sticker in &self.stickers {
            if sticker.asset.trim().is_empty() {
                return Err(SnapstripError::validation(
                    "sticker asset reference must be non-empty",
                ));
            }
            sticker.placement.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
