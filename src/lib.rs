//! Snapstrip is a photo-booth capture and composite-rendering engine.
//!
//! It drives one booth session end to end: timed countdown capture from a
//! live video source, a capacity-bounded pool of filtered still frames,
//! order-preserving selection of frames onto a 4- or 8-slot strip layout, and
//! a deterministic two-stage composite render to a fixed-resolution image.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: `CaptureSequencer + FrameSource -> FramePool` (countdown
//!    ticks, exactly-once shutter, optional auto-sequence)
//! 2. **Select**: `FramePool + SelectionMapping -> slot assignment` (first
//!    selected fills slot 0, and so on)
//! 3. **Compose**: `LayoutSpec + LayoutRasterizer -> RgbaImage` (background,
//!    artwork, slot photos, stickers, in z-order)
//! 4. **Export**: `CompositeRenderer -> encoded bytes` (rasterize at target
//!    scale, stretch to the exact output canvas, encode)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: all time-based behavior flows through the
//!   injected [`TickScheduler`]; rendering the same inputs yields the same
//!   pixels.
//! - **No IO in renderers**: external IO is front-loaded in
//!   [`PreparedAssetStore`].
//! - **Straight-alpha RGBA8** end-to-end: captures, assets and composites all
//!   use unpremultiplied pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod filter;
mod foundation;
mod layout;
mod render;
mod session;

pub use assets::decode::{decode_image, parse_svg, rasterize_svg};
pub use assets::store::PreparedAssetStore;
pub use filter::pipeline::{ColorMatrix, apply_filter, color_matrix_for};
pub use filter::settings::{FilterPreset, FilterSettings};
pub use foundation::core::{Affine, PixelDims, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{SnapstripError, SnapstripResult};
pub use layout::geometry::slot_rects;
pub use layout::model::{
    AssetRef, Background, FrameArtwork, LayoutSpec, Placement, SlotCount, StickerInstance,
};
pub use render::compositor::{BoxRasterizer, CompositeRenderer};
pub use render::encode::{OutputFormat, encode_image};
pub use render::raster::{
    FitMode, draw_image_over, draw_sprite_over, fill_linear_gradient, fill_rect_over, fill_solid,
};
pub use render::scene::LayoutRasterizer;
pub use session::booth::{BoothSession, CameraStatus};
pub use session::config::BoothConfig;
pub use session::pool::{CapturedFrame, FramePool};
pub use session::selection::{SelectionMapping, ToggleOutcome};
pub use session::sequencer::{
    CaptureMode, CapturePhase, CaptureSequencer, FrameSource, TickScheduler, TimerEvent,
    TimerToken,
};
