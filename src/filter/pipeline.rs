use image::RgbaImage;

use crate::filter::settings::FilterSettings;

/// A 3×3 color matrix plus bias, operating on straight-alpha RGB in `[0, 1]`.
///
/// Every adjustment in the booth filter set (brightness, contrast, grayscale,
/// sepia, saturation, hue rotation) is affine in RGB, so the whole fixed-order
/// chain composes into a single matrix applied once per pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix {
    /// Row-major 3×3 channel mixing matrix.
    pub m: [[f32; 3]; 3],
    /// Per-channel additive bias.
    pub bias: [f32; 3],
}

impl ColorMatrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        bias: [0.0, 0.0, 0.0],
    };

    /// Compose so that `self` is applied first, then `next`.
    pub fn then(self, next: Self) -> Self {
        let mut m = [[0.0f32; 3]; 3];
        let mut bias = [0.0f32; 3];
        for row in 0..3 {
            for col in 0..3 {
                for k in 0..3 {
                    m[row][col] += next.m[row][k] * self.m[k][col];
                }
            }
            bias[row] = next.bias[row];
            for k in 0..3 {
                bias[row] += next.m[row][k] * self.bias[k];
            }
        }
        Self { m, bias }
    }

    /// Apply to one straight-alpha RGB triple, clamping to `[0, 1]`.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let mut out = [0.0f32; 3];
        for row in 0..3 {
            out[row] = (self.m[row][0] * rgb[0]
                + self.m[row][1] * rgb[1]
                + self.m[row][2] * rgb[2]
                + self.bias[row])
                .clamp(0.0, 1.0);
        }
        out
    }

    fn brightness(pct: f32) -> Self {
        let s = pct / 100.0;
        Self {
            m: [[s, 0.0, 0.0], [0.0, s, 0.0], [0.0, 0.0, s]],
            bias: [0.0, 0.0, 0.0],
        }
    }

    fn contrast(pct: f32) -> Self {
        let s = pct / 100.0;
        let b = 0.5 - 0.5 * s;
        Self {
            m: [[s, 0.0, 0.0], [0.0, s, 0.0], [0.0, 0.0, s]],
            bias: [b, b, b],
        }
    }

    // Grayscale, sepia, saturate and hue-rotate use the filter-effects
    // reference matrices so output matches a browser preview channel-for-channel.

    fn grayscale(pct: f32) -> Self {
        let v = 1.0 - (pct / 100.0).clamp(0.0, 1.0);
        Self {
            m: [
                [0.2126 + 0.7874 * v, 0.7152 - 0.7152 * v, 0.0722 - 0.0722 * v],
                [0.2126 - 0.2126 * v, 0.7152 + 0.2848 * v, 0.0722 - 0.0722 * v],
                [0.2126 - 0.2126 * v, 0.7152 - 0.7152 * v, 0.0722 + 0.9278 * v],
            ],
            bias: [0.0, 0.0, 0.0],
        }
    }

    fn sepia(pct: f32) -> Self {
        let v = 1.0 - (pct / 100.0).clamp(0.0, 1.0);
        Self {
            m: [
                [0.393 + 0.607 * v, 0.769 - 0.769 * v, 0.189 - 0.189 * v],
                [0.349 - 0.349 * v, 0.686 + 0.314 * v, 0.168 - 0.168 * v],
                [0.272 - 0.272 * v, 0.534 - 0.534 * v, 0.131 + 0.869 * v],
            ],
            bias: [0.0, 0.0, 0.0],
        }
    }

    fn saturate(pct: f32) -> Self {
        let s = pct / 100.0;
        Self {
            m: [
                [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
            ],
            bias: [0.0, 0.0, 0.0],
        }
    }

    fn hue_rotate(deg: f32) -> Self {
        let (sin, cos) = deg.to_radians().sin_cos();
        Self {
            m: [
                [
                    0.213 + cos * 0.787 - sin * 0.213,
                    0.715 - cos * 0.715 - sin * 0.715,
                    0.072 - cos * 0.072 + sin * 0.928,
                ],
                [
                    0.213 - cos * 0.213 + sin * 0.143,
                    0.715 + cos * 0.285 + sin * 0.140,
                    0.072 - cos * 0.072 - sin * 0.283,
                ],
                [
                    0.213 - cos * 0.213 - sin * 0.787,
                    0.715 - cos * 0.715 + sin * 0.715,
                    0.072 + cos * 0.928 + sin * 0.072,
                ],
            ],
            bias: [0.0, 0.0, 0.0],
        }
    }
}

/// Compose the full color chain for the given settings, in the fixed order
/// brightness -> contrast -> grayscale -> sepia -> saturate -> hue-rotate.
pub fn color_matrix_for(settings: &FilterSettings) -> ColorMatrix {
    ColorMatrix::brightness(settings.brightness)
        .then(ColorMatrix::contrast(settings.contrast))
        .then(ColorMatrix::grayscale(settings.grayscale))
        .then(ColorMatrix::sepia(settings.sepia))
        .then(ColorMatrix::saturate(settings.saturate))
        .then(ColorMatrix::hue_rotate(settings.hue_rotate_deg))
}

/// Apply the filter chain and mirroring to a frame.
///
/// This is the single pixel path shared by the live preview and the still
/// capture draw: what the user sees is exactly what is captured. Alpha passes
/// through untouched.
pub fn apply_filter(settings: &FilterSettings, frame: &RgbaImage) -> RgbaImage {
    let matrix = color_matrix_for(settings);

    let mut out = frame.clone();
    if matrix != ColorMatrix::IDENTITY {
        for px in out.pixels_mut() {
            let rgb = matrix.apply([
                f32::from(px.0[0]) / 255.0,
                f32::from(px.0[1]) / 255.0,
                f32::from(px.0[2]) / 255.0,
            ]);
            px.0[0] = (rgb[0] * 255.0).round() as u8;
            px.0[1] = (rgb[1] * 255.0).round() as u8;
            px.0[2] = (rgb[2] * 255.0).round() as u8;
        }
    }

    if settings.mirrored {
        out = image::imageops::flip_horizontal(&out);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/filter/pipeline.rs"]
mod tests;
