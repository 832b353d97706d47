/// Time of one frame, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Wall time of this frame.
    pub now: f64,
    /// Seconds since the previous frame.
    pub delta: f64,
}

/// Converts driver-loop millisecond timestamps into per-frame deltas.
///
/// The previous timestamp starts at zero, so the first delta is the full
/// time elapsed since the driver's epoch.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    previous: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of the most recent tick (0 before the first).
    pub fn now(&self) -> f64 {
        self.previous
    }

    /// Record a new frame timestamp and return its time and delta.
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameTime {
        let now = timestamp_ms * 0.001;
        let delta = now - self.previous;
        self.previous = now;
        FrameTime { now, delta }
    }
}
