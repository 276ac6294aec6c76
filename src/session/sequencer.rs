use std::time::Duration;

use image::RgbaImage;

use crate::{
    filter::pipeline::apply_filter,
    filter::settings::FilterSettings,
    foundation::core::PixelDims,
    foundation::error::{SnapstripError, SnapstripResult},
    session::config::BoothConfig,
    session::pool::{CapturedFrame, FramePool},
};

/// Unique handle for one scheduled deferred callback.
///
/// The sequencer stores the token of its single outstanding timer and ignores
/// fired tokens that no longer match, so a cancelled or superseded callback
/// can never advance stale state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// Deferred single-shot timer facility injected by the embedding event loop.
///
/// Production drivers wrap `setTimeout`-style platform timers; tests use a
/// recording fake so countdown behavior is deterministic without wall-clock
/// waits.
pub trait TickScheduler {
    /// Schedule a single callback after `delay`, returning its token.
    fn schedule(&mut self, delay: Duration) -> TimerToken;

    /// Cancel a previously scheduled callback. Cancelling an already-fired
    /// token is a no-op.
    fn cancel(&mut self, token: TimerToken);
}

/// Live video frame source boundary.
///
/// Acquisition and permission handling are entirely external; the engine only
/// pulls the current frame and its native resolution.
pub trait FrameSource {
    /// Native pixel resolution of the live video. Grabbed frames are checked
    /// against this size; a mismatch aborts the capture.
    fn native_size(&self) -> SnapstripResult<PixelDims>;

    /// The current video frame as unfiltered straight-alpha pixels at native
    /// resolution.
    fn current_frame(&mut self) -> SnapstripResult<RgbaImage>;
}

/// Whether a capture fires once per trigger or repeats until the pool fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CaptureMode {
    /// One countdown, one shot.
    Manual,
    /// Countdowns repeat with an inter-shot pause until the pool is full.
    Auto,
}

/// Sequencer phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CapturePhase {
    /// Ready; no countdown pending.
    Idle,
    /// Whole seconds remaining before the shutter fires.
    Counting {
        /// Remaining whole seconds.
        remaining: u32,
    },
    /// Mid frame-grab; not interruptible.
    Capturing,
}

/// What a fired timer callback did, mostly of interest to drivers and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// The token did not match the outstanding timer; nothing happened.
    Stale,
    /// Countdown decremented; seconds still remaining.
    Ticked {
        /// Remaining whole seconds after the tick.
        remaining: u32,
    },
    /// Countdown hit zero and a frame was captured.
    Captured,
    /// Inter-shot pause elapsed and a new countdown started.
    CountdownRestarted,
    /// The auto-sequence ended (pool full at the inter-shot boundary).
    SequenceEnded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingKind {
    CountdownTick,
    InterShot,
}

/// Finite-state capture sequencer: single-shot, timed-countdown and
/// continuous auto-capture against a live video source.
///
/// All time-based suspension flows through the injected [`TickScheduler`];
/// every state-exiting transition clears the outstanding timer so no orphaned
/// callback can fire into the new state.
#[derive(Debug)]
pub struct CaptureSequencer {
    mode: CaptureMode,
    phase: CapturePhase,
    timer_index: usize,
    auto_active: bool,
    pending: Option<(TimerToken, PendingKind)>,
}

impl CaptureSequencer {
    /// Idle sequencer with the configured default timer option.
    pub fn new(config: &BoothConfig) -> Self {
        Self {
            mode: CaptureMode::Manual,
            phase: CapturePhase::Idle,
            timer_index: config.default_timer_index,
            auto_active: false,
            pending: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    /// Current capture mode.
    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Selected index into the configured timer options.
    pub fn timer_index(&self) -> usize {
        self.timer_index
    }

    /// True while an auto-sequence is running (counting, capturing, or in the
    /// inter-shot pause).
    pub fn sequence_active(&self) -> bool {
        self.auto_active
    }

    /// True when a deferred callback is outstanding.
    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    /// Switch capture mode; stops a running auto-sequence.
    pub fn set_mode(&mut self, mode: CaptureMode, scheduler: &mut dyn TickScheduler) {
        if self.auto_active || matches!(self.phase, CapturePhase::Counting { .. }) {
            self.cancel(scheduler);
        }
        self.mode = mode;
    }

    /// Advance to the next timer option. No-op while counting or mid-sequence.
    pub fn cycle_timer(&mut self, config: &BoothConfig) {
        if self.phase != CapturePhase::Idle || self.auto_active {
            return;
        }
        self.timer_index = (self.timer_index + 1) % config.timer_options.len();
    }

    /// Begin a countdown toward a capture.
    ///
    /// No-op (returns `false`) unless idle with room in the pool. In `Auto`
    /// mode this also marks the sequence active so captures repeat.
    #[tracing::instrument(skip(self, pool, config, scheduler))]
    pub fn start_capture(
        &mut self,
        pool: &FramePool,
        config: &BoothConfig,
        scheduler: &mut dyn TickScheduler,
    ) -> bool {
        if self.phase != CapturePhase::Idle || self.pending.is_some() || pool.is_full() {
            return false;
        }
        let remaining = config.timer_seconds(self.timer_index);
        self.phase = CapturePhase::Counting { remaining };
        if self.mode == CaptureMode::Auto {
            self.auto_active = true;
        }
        self.arm(scheduler, Duration::from_secs(1), PendingKind::CountdownTick);
        tracing::debug!(remaining, auto = self.auto_active, "countdown started");
        true
    }

    /// Handle a fired timer callback.
    ///
    /// Tokens that do not match the outstanding timer are stale and ignored;
    /// this is the exactly-once guard for the zero-crossing capture. Camera
    /// failures abort the countdown and any auto-sequence and propagate.
    #[tracing::instrument(skip(self, pool, source, filter, config, scheduler))]
    pub fn timer_fired(
        &mut self,
        token: TimerToken,
        pool: &mut FramePool,
        source: &mut dyn FrameSource,
        filter: &FilterSettings,
        config: &BoothConfig,
        scheduler: &mut dyn TickScheduler,
    ) -> SnapstripResult<TimerEvent> {
        let Some((pending_token, kind)) = self.pending else {
            return Ok(TimerEvent::Stale);
        };
        if pending_token != token {
            return Ok(TimerEvent::Stale);
        }
        self.pending = None;

        match kind {
            PendingKind::CountdownTick => {
                let CapturePhase::Counting { remaining } = self.phase else {
                    // Countdown state was exited without clearing the timer;
                    // treat the callback as stale rather than capture.
                    return Ok(TimerEvent::Stale);
                };
                let remaining = remaining.saturating_sub(1);
                if remaining > 0 {
                    self.phase = CapturePhase::Counting { remaining };
                    self.arm(scheduler, Duration::from_secs(1), PendingKind::CountdownTick);
                    Ok(TimerEvent::Ticked { remaining })
                } else {
                    self.capture_now(pool, source, filter, config, scheduler)?;
                    Ok(TimerEvent::Captured)
                }
            }
            PendingKind::InterShot => {
                if !self.auto_active || pool.is_full() {
                    self.auto_active = false;
                    tracing::debug!("auto-sequence ended at inter-shot boundary");
                    return Ok(TimerEvent::SequenceEnded);
                }
                let remaining = config.timer_seconds(self.timer_index);
                self.phase = CapturePhase::Counting { remaining };
                self.arm(scheduler, Duration::from_secs(1), PendingKind::CountdownTick);
                Ok(TimerEvent::CountdownRestarted)
            }
        }
    }

    /// Abort a pending shot and end any auto-sequence.
    ///
    /// Valid from `Counting` and from the inter-shot pause; a capture in
    /// flight always completes.
    pub fn cancel(&mut self, scheduler: &mut dyn TickScheduler) {
        if self.phase == CapturePhase::Capturing {
            return;
        }
        self.disarm(scheduler);
        self.phase = CapturePhase::Idle;
        self.auto_active = false;
    }

    /// Remove the most recent frame. Valid only when idle with a non-empty
    /// pool; returns whether a frame was removed.
    pub fn undo_last(&mut self, pool: &mut FramePool) -> bool {
        if self.phase != CapturePhase::Idle || self.auto_active || self.pending.is_some() {
            return false;
        }
        pool.remove_last()
    }

    /// Clear the pool and cancel any pending auto-sequence. Valid only when
    /// idle (an inter-shot pause counts as idle and is cancelled).
    pub fn reset_all(&mut self, pool: &mut FramePool, scheduler: &mut dyn TickScheduler) -> bool {
        if self.phase != CapturePhase::Idle {
            return false;
        }
        self.disarm(scheduler);
        self.auto_active = false;
        pool.clear();
        true
    }

    fn capture_now(
        &mut self,
        pool: &mut FramePool,
        source: &mut dyn FrameSource,
        filter: &FilterSettings,
        config: &BoothConfig,
        scheduler: &mut dyn TickScheduler,
    ) -> SnapstripResult<()> {
        self.phase = CapturePhase::Capturing;

        let frame = match grab_frame(source) {
            Ok(frame) => frame,
            Err(err) => {
                // Camera loss is terminal for the capture phase: drop back to
                // idle, end the sequence, and report.
                self.phase = CapturePhase::Idle;
                self.auto_active = false;
                self.disarm(scheduler);
                return Err(err);
            }
        };
        let still = apply_filter(filter, &frame);
        pool.append(CapturedFrame { image: still });
        self.phase = CapturePhase::Idle;
        tracing::debug!(pool_len = pool.len(), "frame captured");

        if self.auto_active && !pool.is_full() {
            self.arm(scheduler, config.inter_shot_delay, PendingKind::InterShot);
        } else {
            // Capacity forces the sequence to end even mid-flight.
            self.auto_active = false;
        }
        Ok(())
    }

    fn arm(&mut self, scheduler: &mut dyn TickScheduler, delay: Duration, kind: PendingKind) {
        self.disarm(scheduler);
        let token = scheduler.schedule(delay);
        self.pending = Some((token, kind));
    }

    fn disarm(&mut self, scheduler: &mut dyn TickScheduler) {
        if let Some((token, _)) = self.pending.take() {
            scheduler.cancel(token);
        }
    }
}

/// Pull one still from the source, checked against its advertised native
/// resolution. A mismatch means the stream changed or glitched mid-grab and
/// the frame cannot be trusted.
fn grab_frame(source: &mut dyn FrameSource) -> SnapstripResult<RgbaImage> {
    let native = source.native_size()?;
    let frame = source.current_frame()?;
    if frame.width() != native.width || frame.height() != native.height {
        return Err(SnapstripError::camera(
            "grabbed frame does not match the source's native resolution",
        ));
    }
    Ok(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/session/sequencer.rs"]
mod tests;
