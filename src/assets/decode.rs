use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{SnapstripError, SnapstripResult};

/// Decode encoded image bytes to straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> SnapstripResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> SnapstripResult<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts)
        .context("parse svg tree")
        .map_err(SnapstripError::from)
}

/// Rasterize an SVG tree to straight-alpha RGBA8 at the given pixel size.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> SnapstripResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(SnapstripError::validation(
            "svg raster size must be > 0 in both axes",
        ));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SnapstripError::validation("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(tree, xform, &mut pixmap.as_mut());

    // tiny-skia produces premultiplied pixels; the booth pipeline is straight
    // alpha end-to-end.
    let mut data = pixmap.take();
    unpremultiply_rgba8_in_place(&mut data);
    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| SnapstripError::validation("svg pixmap size mismatch"))
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((u16::from(px[0]) * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((u16::from(px[1]) * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((u16::from(px[2]) * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
