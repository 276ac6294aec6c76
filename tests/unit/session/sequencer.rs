use super::*;

/// Route `tracing` output through the test harness so `--nocapture` shows the
/// sequencer's transition logs next to failing assertions.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[derive(Default)]
struct FakeScheduler {
    next: u64,
    scheduled: Vec<(TimerToken, Duration)>,
    cancelled: Vec<TimerToken>,
}

impl TickScheduler for FakeScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        self.next += 1;
        let token = TimerToken(self.next);
        self.scheduled.push((token, delay));
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.cancelled.push(token);
    }
}

impl FakeScheduler {
    fn last_token(&self) -> TimerToken {
        self.scheduled.last().unwrap().0
    }

    fn last_delay(&self) -> Duration {
        self.scheduled.last().unwrap().1
    }
}

struct FakeFrameSource {
    fail: bool,
    grabs: usize,
    frame_size: (u32, u32),
}

impl FakeFrameSource {
    fn new() -> Self {
        Self {
            fail: false,
            grabs: 0,
            frame_size: (4, 3),
        }
    }
}

impl FrameSource for FakeFrameSource {
    fn native_size(&self) -> SnapstripResult<PixelDims> {
        PixelDims::new(4, 3)
    }

    fn current_frame(&mut self) -> SnapstripResult<image::RgbaImage> {
        if self.fail {
            return Err(crate::SnapstripError::camera("stream lost"));
        }
        self.grabs += 1;
        Ok(image::RgbaImage::from_pixel(
            self.frame_size.0,
            self.frame_size.1,
            image::Rgba([10, 20, 30, 255]),
        ))
    }
}

fn quick_config() -> BoothConfig {
    BoothConfig {
        timer_options: vec![1],
        default_timer_index: 0,
        ..BoothConfig::default()
    }
}

fn fire(
    seq: &mut CaptureSequencer,
    token: TimerToken,
    pool: &mut FramePool,
    source: &mut FakeFrameSource,
    config: &BoothConfig,
    scheduler: &mut FakeScheduler,
) -> TimerEvent {
    seq.timer_fired(
        token,
        pool,
        source,
        &FilterSettings::default(),
        config,
        scheduler,
    )
    .unwrap()
}

#[test]
fn manual_countdown_ticks_down_then_captures_once() {
    init_tracing();
    let config = BoothConfig::default(); // default timer option is 3s
    let mut scheduler = FakeScheduler::default();
    let mut source = FakeFrameSource::new();
    let mut pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    assert!(seq.start_capture(&pool, &config, &mut scheduler));
    assert_eq!(seq.phase(), CapturePhase::Counting { remaining: 3 });
    assert_eq!(scheduler.last_delay(), Duration::from_secs(1));

    let t = scheduler.last_token();
    assert_eq!(
        fire(&mut seq, t, &mut pool, &mut source, &config, &mut scheduler),
        TimerEvent::Ticked { remaining: 2 }
    );
    let t = scheduler.last_token();
    assert_eq!(
        fire(&mut seq, t, &mut pool, &mut source, &config, &mut scheduler),
        TimerEvent::Ticked { remaining: 1 }
    );
    let t = scheduler.last_token();
    assert_eq!(
        fire(&mut seq, t, &mut pool, &mut source, &config, &mut scheduler),
        TimerEvent::Captured
    );

    assert_eq!(pool.len(), 1);
    assert_eq!(source.grabs, 1);
    assert_eq!(seq.phase(), CapturePhase::Idle);
    assert!(!seq.has_pending_timer());
    assert!(!seq.sequence_active());
}

#[test]
fn superseded_tokens_are_stale_and_never_capture() {
    let config = BoothConfig::default();
    let mut scheduler = FakeScheduler::default();
    let mut source = FakeFrameSource::new();
    let mut pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    seq.start_capture(&pool, &config, &mut scheduler);
    let first = scheduler.last_token();
    fire(
        &mut seq,
        first,
        &mut pool,
        &mut source,
        &config,
        &mut scheduler,
    );

    // The first token was consumed and replaced; replaying it does nothing.
    assert_eq!(
        fire(
            &mut seq,
            first,
            &mut pool,
            &mut source,
            &config,
            &mut scheduler
        ),
        TimerEvent::Stale
    );
    assert_eq!(seq.phase(), CapturePhase::Counting { remaining: 2 });
    assert!(pool.is_empty());
}

#[test]
fn cancel_during_countdown_returns_to_idle() {
    let config = BoothConfig::default();
    let mut scheduler = FakeScheduler::default();
    let mut source = FakeFrameSource::new();
    let mut pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    seq.start_capture(&pool, &config, &mut scheduler);
    let token = scheduler.last_token();
    seq.cancel(&mut scheduler);

    assert_eq!(seq.phase(), CapturePhase::Idle);
    assert!(scheduler.cancelled.contains(&token));
    assert!(!seq.has_pending_timer());

    // A late callback for the cancelled timer is stale.
    assert_eq!(
        fire(
            &mut seq,
            token,
            &mut pool,
            &mut source,
            &config,
            &mut scheduler
        ),
        TimerEvent::Stale
    );
    assert!(pool.is_empty());

    // And the sequencer can start over cleanly.
    assert!(seq.start_capture(&pool, &config, &mut scheduler));
}

#[test]
fn start_is_rejected_while_counting_or_at_capacity() {
    let config = quick_config();
    let mut scheduler = FakeScheduler::default();
    let pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    assert!(seq.start_capture(&pool, &config, &mut scheduler));
    assert!(!seq.start_capture(&pool, &config, &mut scheduler));

    let mut full = FramePool::new(1);
    full.append(CapturedFrame {
        image: image::RgbaImage::new(4, 3),
    });
    let mut seq = CaptureSequencer::new(&config);
    assert!(!seq.start_capture(&full, &config, &mut scheduler));
}

#[test]
fn auto_sequence_repeats_until_pool_is_full() {
    init_tracing();
    let config = BoothConfig {
        max_capture: 2,
        ..quick_config()
    };
    let mut scheduler = FakeScheduler::default();
    let mut source = FakeFrameSource::new();
    let mut pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    seq.set_mode(CaptureMode::Auto, &mut scheduler);
    assert!(seq.start_capture(&pool, &config, &mut scheduler));
    assert!(seq.sequence_active());

    // First shot: 1s countdown straight to capture, then the inter-shot pause.
    let t = scheduler.last_token();
    assert_eq!(
        fire(&mut seq, t, &mut pool, &mut source, &config, &mut scheduler),
        TimerEvent::Captured
    );
    assert_eq!(pool.len(), 1);
    assert!(seq.sequence_active());
    assert_eq!(scheduler.last_delay(), config.inter_shot_delay);

    // Pause elapses; countdown restarts on its own.
    let t = scheduler.last_token();
    assert_eq!(
        fire(&mut seq, t, &mut pool, &mut source, &config, &mut scheduler),
        TimerEvent::CountdownRestarted
    );
    assert_eq!(seq.phase(), CapturePhase::Counting { remaining: 1 });

    // Second shot fills the pool; the sequence ends with no pause armed.
    let t = scheduler.last_token();
    assert_eq!(
        fire(&mut seq, t, &mut pool, &mut source, &config, &mut scheduler),
        TimerEvent::Captured
    );
    assert!(pool.is_full());
    assert!(!seq.sequence_active());
    assert!(!seq.has_pending_timer());
    assert_eq!(source.grabs, 2);
}

#[test]
fn cancel_during_inter_shot_pause_ends_the_sequence() {
    let config = BoothConfig {
        max_capture: 3,
        ..quick_config()
    };
    let mut scheduler = FakeScheduler::default();
    let mut source = FakeFrameSource::new();
    let mut pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    seq.set_mode(CaptureMode::Auto, &mut scheduler);
    seq.start_capture(&pool, &config, &mut scheduler);
    let t = scheduler.last_token();
    fire(&mut seq, t, &mut pool, &mut source, &config, &mut scheduler);
    assert!(seq.sequence_active());

    let pause = scheduler.last_token();
    seq.cancel(&mut scheduler);
    assert!(!seq.sequence_active());
    assert!(scheduler.cancelled.contains(&pause));

    // The captured frame stays; only the pending sequence is gone.
    assert_eq!(pool.len(), 1);
    assert_eq!(
        fire(
            &mut seq,
            pause,
            &mut pool,
            &mut source,
            &config,
            &mut scheduler
        ),
        TimerEvent::Stale
    );
}

#[test]
fn camera_failure_aborts_countdown_and_sequence() {
    let config = quick_config();
    let mut scheduler = FakeScheduler::default();
    let mut source = FakeFrameSource::new();
    source.fail = true;
    let mut pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    seq.set_mode(CaptureMode::Auto, &mut scheduler);
    seq.start_capture(&pool, &config, &mut scheduler);
    let t = scheduler.last_token();
    let err = seq
        .timer_fired(
            t,
            &mut pool,
            &mut source,
            &FilterSettings::default(),
            &config,
            &mut scheduler,
        )
        .unwrap_err();
    assert!(matches!(err, crate::SnapstripError::CameraUnavailable(_)));
    assert_eq!(seq.phase(), CapturePhase::Idle);
    assert!(!seq.sequence_active());
    assert!(!seq.has_pending_timer());
    assert!(pool.is_empty());
}

#[test]
fn mismatched_frame_size_aborts_the_capture() {
    init_tracing();
    let config = quick_config();
    let mut scheduler = FakeScheduler::default();
    let mut source = FakeFrameSource::new();
    // The stream advertises 4x3 but delivers something else mid-grab.
    source.frame_size = (2, 2);
    let mut pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    seq.start_capture(&pool, &config, &mut scheduler);
    let t = scheduler.last_token();
    let err = seq
        .timer_fired(
            t,
            &mut pool,
            &mut source,
            &FilterSettings::default(),
            &config,
            &mut scheduler,
        )
        .unwrap_err();
    assert!(matches!(err, crate::SnapstripError::CameraUnavailable(_)));
    assert_eq!(seq.phase(), CapturePhase::Idle);
    assert!(!seq.has_pending_timer());
    assert!(pool.is_empty());
}

#[test]
fn cycle_timer_wraps_and_is_locked_while_counting() {
    let config = BoothConfig::default();
    let mut scheduler = FakeScheduler::default();
    let pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    assert_eq!(seq.timer_index(), 1);
    seq.cycle_timer(&config);
    seq.cycle_timer(&config);
    assert_eq!(seq.timer_index(), 3);
    seq.cycle_timer(&config);
    assert_eq!(seq.timer_index(), 0);

    seq.start_capture(&pool, &config, &mut scheduler);
    seq.cycle_timer(&config);
    assert_eq!(seq.timer_index(), 0);
}

#[test]
fn switching_mode_stops_a_running_countdown() {
    let config = BoothConfig::default();
    let mut scheduler = FakeScheduler::default();
    let pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    seq.start_capture(&pool, &config, &mut scheduler);
    seq.set_mode(CaptureMode::Auto, &mut scheduler);
    assert_eq!(seq.phase(), CapturePhase::Idle);
    assert!(!seq.has_pending_timer());
    assert_eq!(seq.mode(), CaptureMode::Auto);
}

#[test]
fn undo_and_reset_are_idle_only() {
    let config = quick_config();
    let mut scheduler = FakeScheduler::default();
    let mut source = FakeFrameSource::new();
    let mut pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    // Nothing to undo yet.
    assert!(!seq.undo_last(&mut pool));

    seq.start_capture(&pool, &config, &mut scheduler);
    // Locked while counting.
    assert!(!seq.undo_last(&mut pool));
    assert!(!seq.reset_all(&mut pool, &mut scheduler));

    let t = scheduler.last_token();
    fire(&mut seq, t, &mut pool, &mut source, &config, &mut scheduler);
    assert_eq!(pool.len(), 1);

    assert!(seq.undo_last(&mut pool));
    assert!(pool.is_empty());

    seq.start_capture(&pool, &config, &mut scheduler);
    let t = scheduler.last_token();
    fire(&mut seq, t, &mut pool, &mut source, &config, &mut scheduler);
    assert!(seq.reset_all(&mut pool, &mut scheduler));
    assert!(pool.is_empty());
}

#[test]
fn reset_during_inter_shot_pause_disarms_it() {
    let config = BoothConfig {
        max_capture: 3,
        ..quick_config()
    };
    let mut scheduler = FakeScheduler::default();
    let mut source = FakeFrameSource::new();
    let mut pool = FramePool::new(config.max_capture);
    let mut seq = CaptureSequencer::new(&config);

    seq.set_mode(CaptureMode::Auto, &mut scheduler);
    seq.start_capture(&pool, &config, &mut scheduler);
    let t = scheduler.last_token();
    fire(&mut seq, t, &mut pool, &mut source, &config, &mut scheduler);
    assert!(seq.has_pending_timer());

    // Idle phase with a pause pending still counts as resettable.
    assert!(seq.reset_all(&mut pool, &mut scheduler));
    assert!(pool.is_empty());
    assert!(!seq.has_pending_timer());
    assert!(!seq.sequence_active());
}
