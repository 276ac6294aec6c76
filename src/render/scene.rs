use image::RgbaImage;

use crate::{
    assets::store::PreparedAssetStore,
    foundation::core::{Affine, PixelDims, Rgba8, Vec2},
    foundation::error::{SnapstripError, SnapstripResult},
    layout::geometry::slot_rects,
    layout::model::{Background, LayoutSpec, Placement},
    render::compositor::BoxRasterizer,
    render::raster::{
        FitMode, draw_image_over, draw_sprite_over, fill_linear_gradient, fill_rect_over,
        fill_solid,
    },
    session::pool::FramePool,
    session::selection::SelectionMapping,
};

/// Fill for slots with no selected frame.
const PLACEHOLDER_FILL: Rgba8 = Rgba8::opaque(0xF3, 0xF4, 0xF6);

/// A sticker's un-scaled width as a fraction of the strip box width.
const STICKER_BASE_FRACTION: f64 = 0.15;

/// In-process rasterizer for a styled photo-strip layout.
///
/// The built-in implementation of [`BoxRasterizer`]: it plays the role a
/// DOM-box-to-bitmap primitive plays in a browser host, drawing the layout in
/// z-order (background fill, artwork background, slot photos, artwork
/// overlay, stickers) at any requested scale. Asset lookups hit the prepared
/// store only; no IO happens during rasterization.
pub struct LayoutRasterizer<'a> {
    layout: &'a LayoutSpec,
    pool: &'a FramePool,
    selection: &'a SelectionMapping,
    assets: &'a PreparedAssetStore,
    base_size: PixelDims,
}

impl<'a> LayoutRasterizer<'a> {
    /// Build a rasterizer presenting the layout at `base_width` on-screen
    /// pixels (height follows from the slot count's aspect ratio).
    pub fn new(
        layout: &'a LayoutSpec,
        pool: &'a FramePool,
        selection: &'a SelectionMapping,
        assets: &'a PreparedAssetStore,
        base_width: u32,
    ) -> SnapstripResult<Self> {
        layout.validate()?;
        if base_width == 0 {
            return Err(SnapstripError::render("layout box has zero rendered size"));
        }
        if selection.slot_count() != layout.slot_count {
            return Err(SnapstripError::validation(
                "selection slot count does not match layout slot count",
            ));
        }
        let base_height =
            (f64::from(base_width) / layout.slot_count.aspect_ratio()).round() as u32;
        Ok(Self {
            layout,
            pool,
            selection,
            assets,
            base_size: PixelDims {
                width: base_width,
                height: base_height.max(1),
            },
        })
    }

    fn draw(&self, width: u32, height: u32) -> SnapstripResult<RgbaImage> {
        let mut surface = RgbaImage::new(width, height);
        let (w, h) = (f64::from(width), f64::from(height));
        let full_box = kurbo::Rect::new(0.0, 0.0, w, h);

        match self.layout.background {
            Background::Solid(color) => fill_solid(&mut surface, color),
            Background::LinearGradient {
                from,
                to,
                angle_deg,
            } => fill_linear_gradient(&mut surface, from, to, angle_deg),
        }

        if let Some(artwork) = &self.layout.frame
            && let Some(key) = &artwork.background
        {
            let img = self.resolve(key)?;
            draw_image_over(&mut surface, img, full_box, FitMode::Contain);
        }

        for (slot, rect) in slot_rects(self.layout.slot_count, w, h)
            .into_iter()
            .enumerate()
        {
            match self
                .selection
                .frame_for_slot(slot)
                .and_then(|idx| self.pool.get(idx))
            {
                Some(frame) => draw_image_over(&mut surface, &frame.image, rect, FitMode::Cover),
                None => fill_rect_over(&mut surface, rect, PLACEHOLDER_FILL),
            }
        }

        if let Some(artwork) = &self.layout.frame
            && let Some(key) = &artwork.overlay
        {
            let img = self.resolve(key)?;
            draw_image_over(&mut surface, img, full_box, FitMode::Contain);
        }

        for sticker in &self.layout.stickers {
            let img = self.resolve(&sticker.asset)?;
            let transform = sticker_transform(&sticker.placement, img, w, h);
            draw_sprite_over(&mut surface, img, transform);
        }

        Ok(surface)
    }

    fn resolve(&self, key: &str) -> SnapstripResult<&'a RgbaImage> {
        self.assets
            .get(key)
            .ok_or_else(|| SnapstripError::validation(format!("asset '{key}' is not prepared")))
    }
}

/// Transform mapping a sticker's local pixel space onto the strip box.
///
/// Placement percentages position the sticker's center; rotation and scale
/// apply about that center. The un-scaled sticker width is a fixed fraction
/// of the box width so stickers track the layout's render size.
fn sticker_transform(
    placement: &Placement,
    sticker: &RgbaImage,
    box_w: f64,
    box_h: f64,
) -> Affine {
    let (sw, sh) = (f64::from(sticker.width()), f64::from(sticker.height()));
    let base_scale = if sw > 0.0 {
        STICKER_BASE_FRACTION * box_w / sw
    } else {
        1.0
    };
    let scale = base_scale * placement.scale;
    let center_x = placement.x_pct / 100.0 * box_w;
    let center_y = placement.y_pct / 100.0 * box_h;

    Affine::translate(Vec2::new(center_x, center_y))
        * Affine::rotate(placement.rotation_deg.to_radians())
        * Affine::scale(scale)
        * Affine::translate(Vec2::new(-sw / 2.0, -sh / 2.0))
}

impl BoxRasterizer for LayoutRasterizer<'_> {
    fn measure(&self) -> SnapstripResult<PixelDims> {
        Ok(self.base_size)
    }

    fn rasterize(&mut self, scale: f64) -> SnapstripResult<RgbaImage> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SnapstripError::render("rasterize scale must be > 0"));
        }
        let width = (f64::from(self.base_size.width) * scale).round().max(1.0) as u32;
        let height = (f64::from(self.base_size.height) * scale).round().max(1.0) as u32;
        self.draw(width, height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
