use std::{collections::BTreeMap, sync::Arc};

use image::RgbaImage;

use crate::{
    assets::decode::{decode_image, parse_svg, rasterize_svg},
    foundation::error::SnapstripResult,
    layout::model::AssetRef,
};

/// Decoded catalog images keyed by their external references.
///
/// All IO and decoding is front-loaded here: the scene rasterizer never
/// touches bytes or the network, it only looks up prepared pixels. Frame
/// artwork and stickers come from an external catalog, so references are
/// opaque strings.
#[derive(Clone, Debug, Default)]
pub struct PreparedAssetStore {
    images: BTreeMap<AssetRef, Arc<RgbaImage>>,
}

impl PreparedAssetStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already-decoded image.
    pub fn insert_image(&mut self, key: impl Into<AssetRef>, image: RgbaImage) {
        self.images.insert(key.into(), Arc::new(image));
    }

    /// Decode and insert encoded raster bytes (PNG, JPEG, …).
    pub fn insert_image_bytes(
        &mut self,
        key: impl Into<AssetRef>,
        bytes: &[u8],
    ) -> SnapstripResult<()> {
        let image = decode_image(bytes)?;
        self.images.insert(key.into(), Arc::new(image));
        Ok(())
    }

    /// Parse and rasterize SVG bytes at the tree's intrinsic size.
    pub fn insert_svg_bytes(
        &mut self,
        key: impl Into<AssetRef>,
        bytes: &[u8],
    ) -> SnapstripResult<()> {
        let tree = parse_svg(bytes)?;
        let width = tree.size().width().ceil().max(1.0) as u32;
        let height = tree.size().height().ceil().max(1.0) as u32;
        let image = rasterize_svg(&tree, width, height)?;
        self.images.insert(key.into(), Arc::new(image));
        Ok(())
    }

    /// Look up a prepared image.
    pub fn get(&self, key: &str) -> Option<&RgbaImage> {
        self.images.get(key).map(Arc::as_ref)
    }

    /// True when a reference has been prepared.
    pub fn contains(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
