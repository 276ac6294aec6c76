use image::RgbaImage;

/// One still frame produced by the capture sequencer.
///
/// The payload is opaque to the rest of the engine; a frame's ordinal position
/// is its index in the pool. Frames are never mutated after capture.
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    /// Filtered, mirrored pixels at the video source's native resolution.
    pub image: RgbaImage,
}

/// Ordered, capacity-bounded collection of captured frames.
///
/// Append-only except for "undo last" and "reset". The capacity guard is a
/// silent no-op rather than an error: callers are expected to disable capture
/// controls at capacity.
#[derive(Clone, Debug)]
pub struct FramePool {
    frames: Vec<CapturedFrame>,
    capacity: usize,
}

impl FramePool {
    /// Empty pool with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of captured frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when no frames are captured.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True when the pool holds `capacity` frames.
    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.capacity
    }

    /// Configured capacity bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Frame at `index`, if captured.
    pub fn get(&self, index: usize) -> Option<&CapturedFrame> {
        self.frames.get(index)
    }

    /// All frames in capture order.
    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    /// Append a frame. Returns `false` (leaving the pool unchanged) at
    /// capacity.
    pub fn append(&mut self, frame: CapturedFrame) -> bool {
        if self.is_full() {
            tracing::debug!(capacity = self.capacity, "append ignored: pool at capacity");
            return false;
        }
        self.frames.push(frame);
        true
    }

    /// Remove the most recent frame. Returns `false` when empty.
    pub fn remove_last(&mut self) -> bool {
        self.frames.pop().is_some()
    }

    /// Remove all frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/pool.rs"]
mod tests;
