use crate::{
    filter::settings::FilterSettings,
    foundation::core::PixelDims,
    foundation::error::{SnapstripError, SnapstripResult},
    layout::model::{LayoutSpec, SlotCount},
    session::config::BoothConfig,
    session::pool::FramePool,
    session::selection::{SelectionMapping, ToggleOutcome},
    session::sequencer::{
        CaptureMode, CapturePhase, CaptureSequencer, FrameSource, TickScheduler, TimerEvent,
        TimerToken,
    },
};

/// Lifecycle of the live camera attached to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraStatus {
    /// No camera attached yet; capture controls are inert.
    Unavailable,
    /// Live video is flowing and capture may start.
    Ready,
    /// Acquisition failed or the stream was lost.
    Failed,
}

/// One photo-booth session from camera acquisition to composite export.
///
/// Owns every piece of per-session state and enforces the cross-cutting
/// rules the individual parts cannot see on their own: capture requires a
/// ready camera, undo also drops dangling slot selections, and switching the
/// strip geometry clears the selection.
#[derive(Debug)]
pub struct BoothSession {
    config: BoothConfig,
    camera: CameraStatus,
    filter: FilterSettings,
    pool: FramePool,
    selection: SelectionMapping,
    layout: LayoutSpec,
    sequencer: CaptureSequencer,
}

impl BoothSession {
    /// Fresh session with an empty pool and the default 4-slot layout.
    pub fn new(config: BoothConfig) -> SnapstripResult<Self> {
        config.validate()?;
        let pool = FramePool::new(config.max_capture);
        let sequencer = CaptureSequencer::new(&config);
        Ok(Self {
            config,
            camera: CameraStatus::Unavailable,
            filter: FilterSettings::default(),
            pool,
            selection: SelectionMapping::new(SlotCount::Four),
            layout: LayoutSpec::new(SlotCount::Four),
            sequencer,
        })
    }

    /// Session configuration.
    pub fn config(&self) -> &BoothConfig {
        &self.config
    }

    /// Current camera lifecycle state.
    pub fn camera(&self) -> CameraStatus {
        self.camera
    }

    /// Active filter settings.
    pub fn filter(&self) -> &FilterSettings {
        &self.filter
    }

    /// Captured frames.
    pub fn pool(&self) -> &FramePool {
        &self.pool
    }

    /// Frame-to-slot selection.
    pub fn selection(&self) -> &SelectionMapping {
        &self.selection
    }

    /// Strip layout under construction.
    pub fn layout(&self) -> &LayoutSpec {
        &self.layout
    }

    /// Mutable layout access for background, artwork and sticker edits.
    pub fn layout_mut(&mut self) -> &mut LayoutSpec {
        &mut self.layout
    }

    /// Capture sequencer state.
    pub fn sequencer(&self) -> &CaptureSequencer {
        &self.sequencer
    }

    /// Record that live video is flowing.
    pub fn camera_acquired(&mut self) {
        self.camera = CameraStatus::Ready;
    }

    /// Record camera loss; aborts any pending countdown.
    pub fn camera_failed(&mut self, scheduler: &mut dyn TickScheduler) {
        self.camera = CameraStatus::Failed;
        self.sequencer.cancel(scheduler);
    }

    /// Replace the filter settings. Affects the preview and every subsequent
    /// capture; frames already in the pool keep their baked-in look.
    pub fn set_filter(&mut self, filter: FilterSettings) {
        self.filter = filter;
    }

    /// Switch between single-shot and auto-sequence capture.
    pub fn set_mode(&mut self, mode: CaptureMode, scheduler: &mut dyn TickScheduler) {
        self.sequencer.set_mode(mode, scheduler);
    }

    /// Advance to the next countdown duration.
    pub fn cycle_timer(&mut self) {
        self.sequencer.cycle_timer(&self.config);
    }

    /// Start a countdown toward a capture.
    ///
    /// Errors unless the camera is ready; otherwise behaves as
    /// [`CaptureSequencer::start_capture`] and reports whether a countdown
    /// actually began.
    pub fn start_capture(&mut self, scheduler: &mut dyn TickScheduler) -> SnapstripResult<bool> {
        if self.camera != CameraStatus::Ready {
            return Err(SnapstripError::camera(
                "capture requires an acquired camera stream",
            ));
        }
        Ok(self
            .sequencer
            .start_capture(&self.pool, &self.config, scheduler))
    }

    /// Route a fired timer callback into the sequencer.
    ///
    /// A camera error during the frame grab marks the camera failed before
    /// propagating.
    pub fn timer_fired(
        &mut self,
        token: TimerToken,
        source: &mut dyn FrameSource,
        scheduler: &mut dyn TickScheduler,
    ) -> SnapstripResult<TimerEvent> {
        let event = self.sequencer.timer_fired(
            token,
            &mut self.pool,
            source,
            &self.filter,
            &self.config,
            scheduler,
        );
        if event.is_err() {
            self.camera = CameraStatus::Failed;
        }
        event
    }

    /// Abort a pending countdown or auto-sequence.
    pub fn cancel_capture(&mut self, scheduler: &mut dyn TickScheduler) {
        self.sequencer.cancel(scheduler);
    }

    /// Toggle a captured frame in or out of the layout slots.
    pub fn toggle_select(&mut self, frame_index: usize) -> ToggleOutcome {
        self.selection.toggle(frame_index, self.pool.len())
    }

    /// Switch strip geometry; the selection clears and the layout follows.
    pub fn set_slot_count(&mut self, slot_count: SlotCount) {
        self.selection.set_slot_count(slot_count);
        self.layout.slot_count = slot_count;
    }

    /// Remove the most recent capture and any slot selection pointing at it.
    pub fn undo_last(&mut self) -> bool {
        let removed = self.sequencer.undo_last(&mut self.pool);
        if removed {
            self.selection.retain_valid(self.pool.len());
        }
        removed
    }

    /// Start the session over: discard every capture and selection and strip
    /// the layout back to its undecorated default. Filter settings and the
    /// acquired camera carry over, so a new sequence can start immediately.
    pub fn retake(&mut self, scheduler: &mut dyn TickScheduler) -> bool {
        if !self.sequencer.reset_all(&mut self.pool, scheduler) {
            return false;
        }
        let slot_count = self.selection.slot_count();
        self.selection = SelectionMapping::new(slot_count);
        self.layout = LayoutSpec::new(slot_count);
        true
    }

    /// True when the composite is ready to render: every slot has a frame.
    pub fn ready_to_render(&self) -> bool {
        self.selection.is_complete()
    }

    /// Output resolution for the current strip geometry.
    pub fn output_target(&self) -> PixelDims {
        self.config.output_for(self.layout.slot_count)
    }

    /// True while capture controls should be disabled.
    pub fn capture_busy(&self) -> bool {
        self.sequencer.phase() != CapturePhase::Idle
            || self.sequencer.sequence_active()
            || self.sequencer.has_pending_timer()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/booth.rs"]
mod tests;
