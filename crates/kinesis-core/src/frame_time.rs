/// Largest step a single physics update may integrate, in milliseconds.
pub const MAX_FRAME_DELTA_MS: f64 = 32.0;

/// Step assumed for the first frame of an animation (one 60 Hz frame).
pub const DEFAULT_FRAME_DELTA_MS: f64 = 16.67;

/// Converts a stream of frame timestamps into clamped per-frame deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    last_timestamp: Option<f64>,
    max_delta_ms: f64,
    first_delta_ms: f64,
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTime {
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
            max_delta_ms: MAX_FRAME_DELTA_MS,
            first_delta_ms: DEFAULT_FRAME_DELTA_MS,
        }
    }

    pub fn with_limits(max_delta_ms: f64, first_delta_ms: f64) -> Self {
        Self {
            last_timestamp: None,
            max_delta_ms,
            first_delta_ms,
        }
    }

    /// Records `timestamp` and returns the step since the previous one,
    /// clamped to `[0, max_delta_ms]`.
    pub fn advance(&mut self, timestamp: f64) -> f64 {
        let delta = match self.last_timestamp {
            Some(last) => (timestamp - last).clamp(0.0, self.max_delta_ms),
            None => self.first_delta_ms,
        };
        self.last_timestamp = Some(timestamp);
        delta
    }

    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }
}
