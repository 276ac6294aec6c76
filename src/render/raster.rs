use image::RgbaImage;

use crate::foundation::core::{Affine, Rect, Rgba8};

/// How an image is fit into a destination rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitMode {
    /// Uniform scale to fill the rect completely, cropping the overflow
    /// (CSS `object-fit: cover`). Used for slot photos.
    Cover,
    /// Uniform scale to fit entirely inside the rect, centered
    /// (CSS `object-fit: contain`). Used for frame artwork.
    Contain,
}

/// Straight-alpha source-over blend of one pixel.
pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }
    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = f32::from(src[i]) / 255.0;
        let dc = f32::from(dst[i]) / 255.0;
        let c = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        out[i] = (c * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

/// Fill the whole surface with a solid color (no blending).
pub fn fill_solid(dst: &mut RgbaImage, color: Rgba8) {
    let px = image::Rgba(color.to_array());
    for p in dst.pixels_mut() {
        *p = px;
    }
}

/// Fill the whole surface with a two-stop linear gradient.
///
/// `angle_deg` follows CSS `linear-gradient` angles: 0 points up, 180 points
/// straight down, angles grow clockwise. The gradient line runs through the
/// surface center and spans the surface's projection onto it, so both stop
/// colors appear exactly at opposite corners/edges.
pub fn fill_linear_gradient(dst: &mut RgbaImage, from: Rgba8, to: Rgba8, angle_deg: f64) {
    let (width, height) = (dst.width(), dst.height());
    let (w, h) = (f64::from(width), f64::from(height));
    let rad = angle_deg.to_radians();
    // Unit vector along the gradient line, pointing toward the `to` stop.
    let (dx, dy) = (rad.sin(), -rad.cos());
    let line_len = (w * dx.abs() + h * dy.abs()).max(1e-9);
    let (cx, cy) = (w / 2.0, h / 2.0);

    for (x, y, px) in dst.enumerate_pixels_mut() {
        let proj = (f64::from(x) + 0.5 - cx) * dx + (f64::from(y) + 0.5 - cy) * dy;
        let t = proj / line_len + 0.5;
        *px = image::Rgba(from.lerp(to, t).to_array());
    }
}

/// Blend a solid color over one rectangle, clipped to the surface.
pub fn fill_rect_over(dst: &mut RgbaImage, rect: Rect, color: Rgba8) {
    let x0 = rect.x0.max(0.0).floor() as u32;
    let y0 = rect.y0.max(0.0).floor() as u32;
    let x1 = (rect.x1.min(f64::from(dst.width()))).ceil() as u32;
    let y1 = (rect.y1.min(f64::from(dst.height()))).ceil() as u32;
    let src = color.to_array();
    for y in y0..y1.max(y0) {
        for x in x0..x1.max(x0) {
            let cx = f64::from(x) + 0.5;
            let cy = f64::from(y) + 0.5;
            if cx < rect.x0 || cx >= rect.x1 || cy < rect.y0 || cy >= rect.y1 {
                continue;
            }
            let d = dst.get_pixel_mut(x, y);
            d.0 = over(d.0, src);
        }
    }
}

/// Draw `src` into `dst_rect` of `dst` with the given fit, blending over.
pub fn draw_image_over(dst: &mut RgbaImage, src: &RgbaImage, dst_rect: Rect, fit: FitMode) {
    if src.width() == 0 || src.height() == 0 || dst_rect.width() <= 0.0 || dst_rect.height() <= 0.0
    {
        return;
    }
    let (sw, sh) = (f64::from(src.width()), f64::from(src.height()));
    let scale_x = dst_rect.width() / sw;
    let scale_y = dst_rect.height() / sh;
    let scale = match fit {
        FitMode::Cover => scale_x.max(scale_y),
        FitMode::Contain => scale_x.min(scale_y),
    };

    // Rect the scaled source occupies, centered inside dst_rect.
    let draw_w = sw * scale;
    let draw_h = sh * scale;
    let draw_x0 = dst_rect.x0 + (dst_rect.width() - draw_w) / 2.0;
    let draw_y0 = dst_rect.y0 + (dst_rect.height() - draw_h) / 2.0;

    // Destination pixels to touch: the draw rect clipped by dst_rect (Cover
    // crops to the cell) and the surface bounds.
    let clip = Rect::new(
        draw_x0.max(dst_rect.x0).max(0.0),
        draw_y0.max(dst_rect.y0).max(0.0),
        (draw_x0 + draw_w).min(dst_rect.x1).min(f64::from(dst.width())),
        (draw_y0 + draw_h).min(dst_rect.y1).min(f64::from(dst.height())),
    );
    if clip.width() <= 0.0 || clip.height() <= 0.0 {
        return;
    }

    let x_start = clip.x0.floor() as u32;
    let x_end = clip.x1.ceil() as u32;
    let y_start = clip.y0.floor() as u32;
    let y_end = clip.y1.ceil() as u32;

    for y in y_start..y_end {
        for x in x_start..x_end {
            let cx = f64::from(x) + 0.5;
            let cy = f64::from(y) + 0.5;
            if cx < clip.x0 || cx >= clip.x1 || cy < clip.y0 || cy >= clip.y1 {
                continue;
            }
            let sx = (cx - draw_x0) / scale;
            let sy = (cy - draw_y0) / scale;
            let Some(sample) = sample_bilinear(src, sx, sy) else {
                continue;
            };
            let d = dst.get_pixel_mut(x, y);
            d.0 = over(d.0, sample);
        }
    }
}

/// Draw `src` through an affine transform (local pixel space -> destination
/// pixel space), blending over. Used for rotated/scaled stickers.
pub fn draw_sprite_over(dst: &mut RgbaImage, src: &RgbaImage, transform: Affine) {
    if src.width() == 0 || src.height() == 0 {
        return;
    }
    let det = transform.determinant();
    if det.abs() < 1e-12 {
        return;
    }
    let inverse = transform.inverse();

    // Bounding box of the transformed sprite, clipped to the surface.
    let (sw, sh) = (f64::from(src.width()), f64::from(src.height()));
    let corners = [
        transform * kurbo::Point::new(0.0, 0.0),
        transform * kurbo::Point::new(sw, 0.0),
        transform * kurbo::Point::new(0.0, sh),
        transform * kurbo::Point::new(sw, sh),
    ];
    let x0 = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min).max(0.0);
    let y0 = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min).max(0.0);
    let x1 = corners
        .iter()
        .map(|p| p.x)
        .fold(f64::NEG_INFINITY, f64::max)
        .min(f64::from(dst.width()));
    let y1 = corners
        .iter()
        .map(|p| p.y)
        .fold(f64::NEG_INFINITY, f64::max)
        .min(f64::from(dst.height()));
    if x1 <= x0 || y1 <= y0 {
        return;
    }

    for y in y0.floor() as u32..y1.ceil() as u32 {
        for x in x0.floor() as u32..x1.ceil() as u32 {
            let p = inverse * kurbo::Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if p.x < 0.0 || p.y < 0.0 || p.x >= sw || p.y >= sh {
                continue;
            }
            let Some(sample) = sample_bilinear(src, p.x, p.y) else {
                continue;
            };
            let d = dst.get_pixel_mut(x, y);
            d.0 = over(d.0, sample);
        }
    }
}

/// Bilinear sample at continuous pixel-center coordinates; `None` outside the
/// image.
fn sample_bilinear(src: &RgbaImage, x: f64, y: f64) -> Option<[u8; 4]> {
    let (w, h) = (src.width(), src.height());
    if x < 0.0 || y < 0.0 || x >= f64::from(w) || y >= f64::from(h) {
        return None;
    }
    // Sample positions are pixel centers; shift then clamp to the edge texels.
    let fx = (x - 0.5).clamp(0.0, f64::from(w - 1));
    let fy = (y - 0.5).clamp(0.0, f64::from(h - 1));
    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let tx = (fx - f64::from(x0)) as f32;
    let ty = (fy - f64::from(y0)) as f32;

    let p00 = src.get_pixel(x0, y0).0;
    let p10 = src.get_pixel(x1, y0).0;
    let p01 = src.get_pixel(x0, y1).0;
    let p11 = src.get_pixel(x1, y1).0;

    let mut out = [0u8; 4];
    for i in 0..4 {
        let top = f32::from(p00[i]) * (1.0 - tx) + f32::from(p10[i]) * tx;
        let bottom = f32::from(p01[i]) * (1.0 - tx) + f32::from(p11[i]) * tx;
        out[i] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    Some(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
