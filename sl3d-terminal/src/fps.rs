/// Once-per-second frame rate sampling
use std::time::{Duration, Instant};

/// Counts frames and publishes the count once per sampling window.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    window_start: Instant,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self::with_window(now, Duration::from_secs(1))
    }

    pub fn with_window(now: Instant, window: Duration) -> Self {
        Self {
            window,
            window_start: now,
            frames: 0,
            fps: 0,
        }
    }

    /// Record one finished frame. Returns the new reading when a window closes.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames = self.frames.wrapping_add(1);

        if now.saturating_duration_since(self.window_start) < self.window {
            return None;
        }

        self.fps = self.frames;
        self.frames = 0;
        self.window_start = now;
        Some(self.fps)
    }

    /// Frames counted in the last closed window
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
