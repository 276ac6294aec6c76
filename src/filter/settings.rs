use crate::foundation::core::Affine;

/// Capture-time visual transform settings.
///
/// A pure value object: a new value replaces the old, nothing is mutated in
/// place and nothing persists beyond the booth session. Percentage fields are
/// pre-clamped by the producer (the UI sliders); this model performs no
/// validation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterSettings {
    /// Brightness in percent, `[0, 200]`, 100 = unchanged.
    pub brightness: f32,
    /// Contrast in percent, `[0, 200]`, 100 = unchanged.
    pub contrast: f32,
    /// Grayscale amount in percent, `[0, 100]`, 0 = unchanged.
    pub grayscale: f32,
    /// Sepia amount in percent, `[0, 100]`, 0 = unchanged.
    pub sepia: f32,
    /// Saturation in percent, `[0, 200]`, 100 = unchanged.
    pub saturate: f32,
    /// Hue rotation in degrees, 0 = unchanged.
    pub hue_rotate_deg: f32,
    /// Horizontally mirror the source about its own vertical center.
    pub mirrored: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            grayscale: 0.0,
            sepia: 0.0,
            saturate: 100.0,
            hue_rotate_deg: 0.0,
            mirrored: true,
        }
    }
}

impl FilterSettings {
    /// Drawing-surface filter description in the fixed application order
    /// brightness -> contrast -> grayscale -> sepia -> saturate -> hue-rotate.
    ///
    /// The same order is used by [`crate::apply_filter`], so a live preview
    /// styled with this string and a still frame captured through the pixel
    /// pipeline look identical.
    pub fn filter_string(&self) -> String {
        let mut s = format!(
            "brightness({}%) contrast({}%) grayscale({}%) sepia({}%) saturate({}%)",
            self.brightness, self.contrast, self.grayscale, self.sepia, self.saturate
        );
        if self.hue_rotate_deg != 0.0 {
            s.push_str(&format!(" hue-rotate({}deg)", self.hue_rotate_deg));
        }
        s
    }

    /// Affine transform mirroring a source of the given pixel width about its
    /// vertical center, or identity when mirroring is off.
    pub fn mirror_affine(&self, width: u32) -> Affine {
        if self.mirrored {
            // x' = width - x, y' = y
            Affine::new([-1.0, 0.0, 0.0, 1.0, f64::from(width), 0.0])
        } else {
            Affine::IDENTITY
        }
    }
}

/// Named filter presets from the booth's built-in gallery.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FilterPreset {
    /// No adjustment.
    Normal,
    /// Full grayscale.
    Mono,
    /// Faded warm grayscale mix.
    Vintage,
    /// High-contrast black and white.
    Noir,
    /// Strong sepia tone.
    Sepia,
    /// Punchy saturation boost.
    Pop,
    /// Brighter, more saturated boost.
    Vibrant,
    /// Warm red-shifted evening tone.
    Sunset,
    /// Soft warm golden tone.
    Golden,
}

impl FilterPreset {
    /// All presets in gallery order.
    pub const ALL: [FilterPreset; 9] = [
        FilterPreset::Normal,
        FilterPreset::Mono,
        FilterPreset::Vintage,
        FilterPreset::Noir,
        FilterPreset::Sepia,
        FilterPreset::Pop,
        FilterPreset::Vibrant,
        FilterPreset::Sunset,
        FilterPreset::Golden,
    ];

    /// The filter values for this preset (mirroring left at its default).
    pub fn settings(self) -> FilterSettings {
        let base = FilterSettings::default();
        match self {
            FilterPreset::Normal => base,
            FilterPreset::Mono => FilterSettings {
                grayscale: 100.0,
                ..base
            },
            FilterPreset::Vintage => FilterSettings {
                brightness: 95.0,
                contrast: 90.0,
                grayscale: 10.0,
                sepia: 40.0,
                saturate: 80.0,
                ..base
            },
            FilterPreset::Noir => FilterSettings {
                brightness: 90.0,
                contrast: 140.0,
                grayscale: 100.0,
                ..base
            },
            FilterPreset::Sepia => FilterSettings {
                sepia: 80.0,
                ..base
            },
            FilterPreset::Pop => FilterSettings {
                brightness: 110.0,
                contrast: 120.0,
                saturate: 150.0,
                ..base
            },
            FilterPreset::Vibrant => FilterSettings {
                brightness: 115.0,
                contrast: 125.0,
                saturate: 170.0,
                ..base
            },
            FilterPreset::Sunset => FilterSettings {
                brightness: 105.0,
                contrast: 110.0,
                sepia: 20.0,
                saturate: 130.0,
                hue_rotate_deg: -10.0,
                ..base
            },
            FilterPreset::Golden => FilterSettings {
                brightness: 105.0,
                contrast: 105.0,
                sepia: 30.0,
                saturate: 120.0,
                ..base
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/settings.rs"]
mod tests;
