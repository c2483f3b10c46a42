use std::time::Duration;

/// Time state handed to the entities for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the first frame observed by the clock.
    pub elapsed: f64,
    /// Seconds since the previous frame; zero on the first frame.
    pub delta: f64,
    /// Monotonic frame counter, starting at zero.
    pub frame_index: u64,
}

impl FrameTime {
    /// Frame delta expressed in frames of `reference_fps`.
    ///
    /// Continuous motion is scaled by this so a display running at the
    /// reference rate advances exactly one step per frame.
    pub fn steps(&self, reference_fps: f32) -> f32 {
        (self.delta * reference_fps as f64) as f32
    }

    pub fn elapsed_duration(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed.max(0.0))
    }
}

/// Converts host frame timestamps (milliseconds) into [`FrameTime`]s.
///
/// The first timestamp seen after construction or [`FrameClock::reset`]
/// becomes the origin, so the first frame never applies a delta.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameClock {
    origin: Option<f64>,
    last: Option<f64>,
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> FrameTime {
        let origin = *self.origin.get_or_insert(timestamp_ms);
        let last = self.last.replace(timestamp_ms).unwrap_or(timestamp_ms);
        let sample = FrameTime {
            elapsed: ((timestamp_ms - origin) / 1000.0).max(0.0),
            delta: ((timestamp_ms - last) / 1000.0).max(0.0),
            frame_index: self.frame,
        };
        self.frame = self.frame.saturating_add(1);
        sample
    }
}
