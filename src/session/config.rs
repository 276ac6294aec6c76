use std::time::Duration;

use crate::{
    foundation::core::PixelDims,
    foundation::error::{SnapstripError, SnapstripResult},
    layout::model::SlotCount,
    render::encode::OutputFormat,
};

/// Injected booth configuration.
///
/// None of these values are hardcoded in the core logic: capacity, countdown
/// options, pacing and output resolutions all arrive here from the embedding
/// application.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BoothConfig {
    /// Frame pool capacity.
    pub max_capture: usize,
    /// Selectable countdown durations in whole seconds.
    pub timer_options: Vec<u32>,
    /// Index into `timer_options` selected at session start.
    pub default_timer_index: usize,
    /// Pause between shots in an auto-sequence, letting the UI settle.
    pub inter_shot_delay: Duration,
    /// Output resolution for the 4-slot single strip.
    pub output_single: PixelDims,
    /// Output resolution for the 8-slot double strip.
    pub output_double: PixelDims,
    /// Encoding of the final composite.
    pub output_format: OutputFormat,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            max_capture: 8,
            timer_options: vec![1, 3, 5, 10],
            default_timer_index: 1,
            inter_shot_delay: Duration::from_secs(1),
            output_single: PixelDims {
                width: 600,
                height: 1800,
            },
            output_double: PixelDims {
                width: 1200,
                height: 1800,
            },
            output_format: OutputFormat::Png,
        }
    }
}

impl BoothConfig {
    /// Validate configuration invariants.
    pub fn validate(&self) -> SnapstripResult<()> {
        if self.max_capture == 0 {
            return Err(SnapstripError::validation("max_capture must be > 0"));
        }
        if self.timer_options.is_empty() {
            return Err(SnapstripError::validation(
                "timer_options must not be empty",
            ));
        }
        if self.timer_options.contains(&0) {
            return Err(SnapstripError::validation(
                "timer_options must be whole positive seconds",
            ));
        }
        if self.default_timer_index >= self.timer_options.len() {
            return Err(SnapstripError::validation(
                "default_timer_index out of range",
            ));
        }
        for dims in [self.output_single, self.output_double] {
            if dims.width == 0 || dims.height == 0 {
                return Err(SnapstripError::validation(
                    "output resolutions must be > 0 in both axes",
                ));
            }
        }
        Ok(())
    }

    /// Target output resolution for a slot count.
    pub fn output_for(&self, slot_count: SlotCount) -> PixelDims {
        match slot_count {
            SlotCount::Four => self.output_single,
            SlotCount::Eight => self.output_double,
        }
    }

    /// Countdown seconds for a timer option index, clamped into range.
    pub fn timer_seconds(&self, index: usize) -> u32 {
        let index = index.min(self.timer_options.len().saturating_sub(1));
        self.timer_options[index]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
