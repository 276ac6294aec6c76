use image::RgbaImage;

use crate::{
    foundation::core::PixelDims,
    foundation::error::{SnapstripError, SnapstripResult},
    render::encode::{OutputFormat, encode_image},
};

/// The "rasterize a visual box to a bitmap" capability.
///
/// Stage 1 of composite rendering is platform-specific (in a browser it is a
/// DOM-subtree-to-canvas operation), so it enters the engine as an injected
/// interface. [`crate::LayoutRasterizer`] is the built-in in-process
/// implementation; tests use fakes returning known-size bitmaps.
pub trait BoxRasterizer {
    /// Current rendered size of the box in pixels.
    ///
    /// Fails with [`SnapstripError::RenderUnavailable`] when the box is not
    /// mounted or has collapsed to zero size.
    fn measure(&self) -> SnapstripResult<PixelDims>;

    /// Rasterize the box at a uniform scale factor relative to its measured
    /// size, preserving all child content proportionally.
    fn rasterize(&mut self, scale: f64) -> SnapstripResult<RgbaImage>;
}

/// Deterministic two-stage compositor from a live styled layout box to a
/// fixed-resolution raster.
///
/// The two stages are deliberate and must both happen: the box is first
/// rasterized at `target.width / measured.width` (so measurement and layout
/// resolve at that scale), and the result is then stretched onto a fresh
/// canvas of exactly the target dimensions, full source to full destination,
/// no letterboxing. Rasterizing directly at the final size would skip the
/// scale at which the on-screen measurements happen and is not equivalent.
pub struct CompositeRenderer;

impl CompositeRenderer {
    /// Render the box to exactly `target` pixels.
    #[tracing::instrument(skip(rasterizer))]
    pub fn render(
        rasterizer: &mut dyn BoxRasterizer,
        target: PixelDims,
    ) -> SnapstripResult<RgbaImage> {
        if target.width == 0 || target.height == 0 {
            return Err(SnapstripError::validation(
                "composite target dimensions must be > 0",
            ));
        }
        let measured = rasterizer.measure()?;
        if measured.width == 0 || measured.height == 0 {
            return Err(SnapstripError::render(
                "layout box has zero rendered size",
            ));
        }

        // Stage 1: rasterize at the scale that maps the box width onto the
        // target width.
        let scale = f64::from(target.width) / f64::from(measured.width);
        let raster = rasterizer.rasterize(scale)?;
        if raster.width() == 0 || raster.height() == 0 {
            return Err(SnapstripError::render("rasterizer produced an empty image"));
        }
        tracing::debug!(
            measured_w = measured.width,
            measured_h = measured.height,
            scale,
            raster_w = raster.width(),
            raster_h = raster.height(),
            "stage 1 raster complete"
        );

        // Stage 2: force-fit onto the exact target canvas.
        if raster.width() == target.width && raster.height() == target.height {
            return Ok(raster);
        }
        Ok(image::imageops::resize(
            &raster,
            target.width,
            target.height,
            image::imageops::FilterType::Triangle,
        ))
    }

    /// Render and encode in one step, producing the final shareable bytes.
    pub fn render_encoded(
        rasterizer: &mut dyn BoxRasterizer,
        target: PixelDims,
        format: OutputFormat,
    ) -> SnapstripResult<Vec<u8>> {
        let composite = Self::render(rasterizer, target)?;
        encode_image(&composite, format)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
