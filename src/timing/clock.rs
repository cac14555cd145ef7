//! Playback clock - the single "now" every instrument samples against

/// One frame's view of time. Sampled once per frame and handed to every
/// instrument, so all of them agree on when "now" is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since playback start (negative during pre-roll)
    pub time: f64,
    /// Seconds since the previous frame
    pub delta: f64,
}

impl FrameTime {
    pub fn new(time: f64, delta: f64) -> Self {
        Self { time, delta }
    }
}

/// Time since playback start, advanced from frame deltas.
///
/// Starts at `-pre_roll` so the stage has a short countdown before the first
/// tick. Only the playback driver writes to it.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    time_since_start: f64,
    latency_offset: f64,
    stall_threshold: f64,
    stall_guarded: bool,
}

impl PlaybackClock {
    pub fn new(pre_roll: f64, latency_offset: f64, stall_threshold: f64) -> Self {
        Self {
            time_since_start: -pre_roll.max(0.0),
            latency_offset,
            stall_threshold,
            stall_guarded: false,
        }
    }

    /// Advance by a frame delta and return the frame's time.
    ///
    /// Negative or non-finite deltas count as zero. The first frame longer
    /// than the stall threshold is dropped, whenever it comes: it carries time
    /// spent loading rather than playing. Later long frames pass through.
    pub fn advance(&mut self, delta: f64) -> FrameTime {
        let mut delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        if !self.stall_guarded && delta > self.stall_threshold {
            self.stall_guarded = true;
            delta = 0.0;
        }
        self.time_since_start += delta;
        FrameTime::new(self.time_since_start, delta)
    }

    /// Current frame time without advancing
    pub fn now(&self) -> f64 {
        self.time_since_start
    }

    pub fn latency_offset(&self) -> f64 {
        self.latency_offset
    }

    /// True once the audible position (video time plus latency) reaches zero
    pub fn transport_due(&self) -> bool {
        self.time_since_start + self.latency_offset >= 0.0
    }
}
