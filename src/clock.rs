//! Frame timing for driving a [`MorphScene`](crate::MorphScene).
//!
//! [`FrameClock`] hands out the two per-frame time values the swarm needs:
//! the delta that advances the morph, and a monotonic elapsed time that drives
//! the idle animation. Elapsed time is the sum of the deltas handed out, so
//! pausing and time scaling affect both consistently.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! loop {
//!     let (elapsed, delta) = clock.tick();
//!     scene.frame(target, delta, elapsed);
//! }
//! ```

use crate::morph::sanitize_delta;
use std::time::Instant;

/// Frame timer with pause, time scale and optional fixed step.
///
/// Elapsed time only grows by the deltas the clock hands out, so it stays
/// monotonic and never includes paused time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Wall-clock instant of the previous tick.
    last_frame: Instant,
    /// Sum of every delta handed out so far, in seconds.
    elapsed_secs: f32,
    /// Delta handed out by the latest tick or advance.
    delta_secs: f32,
    /// Ticks and advances since creation or reset, paused ones included.
    frame_count: u64,
    /// While set, deltas are zero and elapsed time stands still.
    paused: bool,
    /// Constant step used instead of the measured delta.
    fixed_delta: Option<f32>,
    /// Multiplier applied to every delta (1.0 = real time).
    time_scale: f32,
}

impl FrameClock {
    /// Create a clock at zero elapsed time, measuring from now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Measure wall time since the last tick and advance. Call once per frame.
    ///
    /// Returns `(elapsed, delta)`.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(raw_delta)
    }

    /// Advance by `raw_delta` seconds without reading the wall clock.
    ///
    /// Used for offline rendering and tests. The fixed delta, time scale and
    /// pause state apply exactly as in [`FrameClock::tick`].
    pub fn advance(&mut self, raw_delta: f32) -> (f32, f32) {
        self.frame_count += 1;

        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, self.delta_secs);
        }

        let delta = self.fixed_delta.unwrap_or(raw_delta) * self.time_scale;
        self.delta_secs = sanitize_delta(delta);
        self.elapsed_secs += self.delta_secs;

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total unpaused, scaled time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Delta handed out by the last tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Number of ticks and advances since creation or the last reset.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Whether the clock is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current speed multiplier.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// While paused, delta is 0 and elapsed stops.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after [`FrameClock::pause`]. The next tick measures from here.
    pub fn resume(&mut self) {
        if self.paused {
            // Time spent paused must not show up as one huge delta.
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Pause if running, resume if paused.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Use a constant delta instead of measured time. `None` restores real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Speed multiplier, clamped to be non-negative.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    }

    /// Back to zero elapsed time and frame count, unpaused. Time scale and
    /// fixed delta are kept.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
        self.paused = false;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
