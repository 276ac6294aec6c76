use std::io::Cursor;

use image::RgbaImage;

use crate::foundation::error::{SnapstripError, SnapstripResult};

/// Encoding of the final composite image.
///
/// A configuration knob, not something the engine varies on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OutputFormat {
    /// Lossless PNG.
    Png,
    /// JPEG at the given quality (1–100). Alpha is flattened onto white.
    Jpeg {
        /// Encoder quality, 1–100.
        quality: u8,
    },
}

/// Encode a raster to compressed bytes.
pub fn encode_image(image: &RgbaImage, format: OutputFormat) -> SnapstripResult<Vec<u8>> {
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Png => {
            image
                .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
                .map_err(|e| SnapstripError::encode(format!("png encode failed: {e}")))?;
        }
        OutputFormat::Jpeg { quality } => {
            // JPEG carries no alpha channel.
            let rgb = flatten_onto_white(image);
            let mut cursor = Cursor::new(&mut bytes);
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.clamp(1, 100));
            rgb.write_with_encoder(encoder)
                .map_err(|e| SnapstripError::encode(format!("jpeg encode failed: {e}")))?;
        }
    }
    Ok(bytes)
}

fn flatten_onto_white(image: &RgbaImage) -> image::RgbImage {
    image::RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let px = image.get_pixel(x, y).0;
        let a = f32::from(px[3]) / 255.0;
        let blend = |c: u8| -> u8 {
            (f32::from(c) * a + 255.0 * (1.0 - a)).round().clamp(0.0, 255.0) as u8
        };
        image::Rgb([blend(px[0]), blend(px[1]), blend(px[2])])
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
