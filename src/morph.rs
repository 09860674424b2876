//! Global morph progress and its smoothing toward a target layout.
//!
//! The whole swarm shares one `progress` value in `[0, 1]`: 0 is fully
//! dispersed, 1 is fully formed. Each frame it moves toward the current target by
//! exponential smoothing:
//!
//! ```text
//! progress += (target - progress) * min(1, smoothing_rate * dt)
//! ```
//!
//! Progress approaches the target asymptotically, so "finished" has to be
//! checked with a tolerance ([`MorphState::is_settled`]), never with equality.
//! Changing the target mid-transition just redirects the smoothing from
//! wherever progress currently is.

use std::fmt;

/// Default response speed of the smoothing, per second.
pub const DEFAULT_SMOOTHING_RATE: f32 = 2.5;

/// Default tolerance for [`MorphState::is_settled`].
pub const DEFAULT_SETTLE_EPSILON: f32 = 1e-4;

/// Which layout the swarm is heading toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MorphTarget {
    /// Random volumetric scatter (progress 0).
    #[default]
    Dispersed,
    /// Cone spiral (progress 1).
    Formed,
}

impl MorphTarget {
    /// Progress value this target pulls toward.
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            MorphTarget::Dispersed => 0.0,
            MorphTarget::Formed => 1.0,
        }
    }

    /// The other target.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            MorphTarget::Dispersed => MorphTarget::Formed,
            MorphTarget::Formed => MorphTarget::Dispersed,
        }
    }

    /// Display name of the state.
    pub fn label(self) -> &'static str {
        match self {
            MorphTarget::Dispersed => "Scattered",
            MorphTarget::Formed => "Formed",
        }
    }

    /// Label for a control that switches away from this state.
    pub fn action_label(self) -> &'static str {
        match self {
            MorphTarget::Dispersed => "Gather Shape",
            MorphTarget::Formed => "Release Energy",
        }
    }
}

impl From<bool> for MorphTarget {
    /// `true` means formed.
    fn from(formed: bool) -> Self {
        if formed {
            MorphTarget::Formed
        } else {
            MorphTarget::Dispersed
        }
    }
}

impl fmt::Display for MorphTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clamp a frame delta to something safe to integrate.
///
/// Negative, NaN and infinite deltas become zero.
#[inline]
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Swarm-wide morph progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphState {
    progress: f32,
    target: MorphTarget,
    smoothing_rate: f32,
}

impl MorphState {
    /// Start at `progress` (clamped into `[0, 1]`) heading toward `target`.
    pub fn new(progress: f32, target: MorphTarget) -> Self {
        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        Self {
            progress,
            target,
            smoothing_rate: DEFAULT_SMOOTHING_RATE,
        }
    }

    /// Fully dispersed and staying there.
    pub fn dispersed() -> Self {
        Self::new(0.0, MorphTarget::Dispersed)
    }

    /// Fully formed and staying there.
    pub fn formed() -> Self {
        Self::new(1.0, MorphTarget::Formed)
    }

    /// Set how fast progress follows the target (per second, non-negative).
    pub fn with_smoothing_rate(mut self, rate: f32) -> Self {
        self.smoothing_rate = if rate.is_finite() { rate.max(0.0) } else { DEFAULT_SMOOTHING_RATE };
        self
    }

    /// 0 is dispersed, 1 is formed.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn target(&self) -> MorphTarget {
        self.target
    }

    /// Response speed per second.
    #[inline]
    pub fn smoothing_rate(&self) -> f32 {
        self.smoothing_rate
    }

    /// Redirect toward `target`. Progress is untouched, so a reversal mid-morph
    /// continues from where the swarm is.
    pub fn set_target(&mut self, target: MorphTarget) {
        if target != self.target {
            log::debug!(
                "Morph target {} -> {} at progress {:.3}",
                self.target,
                target,
                self.progress
            );
            self.target = target;
        }
    }

    /// Flip the target and return the new one.
    pub fn toggle(&mut self) -> MorphTarget {
        self.set_target(self.target.toggled());
        self.target
    }

    /// Advance progress toward the current target by `dt` seconds.
    ///
    /// Invalid `dt` (negative or not finite) counts as zero. Returns the new
    /// progress.
    pub fn update(&mut self, dt: f32) -> f32 {
        let dt = sanitize_delta(dt);
        let blend = (self.smoothing_rate * dt).min(1.0);
        self.progress += (self.target.value() - self.progress) * blend;
        self.progress = self.progress.clamp(0.0, 1.0);
        self.progress
    }

    /// Set the target then advance, the per-frame entry point.
    pub fn step(&mut self, target: MorphTarget, dt: f32) -> f32 {
        self.set_target(target);
        self.update(dt)
    }

    /// Whether progress is within `epsilon` of the target.
    #[inline]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.target.value() - self.progress).abs() < epsilon
    }

    /// Jump straight to the target.
    pub fn snap_to_target(&mut self) {
        self.progress = self.target.value();
    }
}

impl Default for MorphState {
    /// Starts dispersed and heading for the formed layout.
    fn default() -> Self {
        Self::new(0.0, MorphTarget::Formed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_values() {
        assert_eq!(MorphTarget::Dispersed.value(), 0.0);
        assert_eq!(MorphTarget::Formed.value(), 1.0);
        assert_eq!(MorphTarget::Formed.toggled(), MorphTarget::Dispersed);
        assert_eq!(MorphTarget::from(true), MorphTarget::Formed);
    }

    #[test]
    fn test_labels() {
        assert_eq!(MorphTarget::Formed.label(), "Formed");
        assert_eq!(MorphTarget::Dispersed.to_string(), "Scattered");
        assert_eq!(MorphTarget::Formed.action_label(), "Release Energy");
        assert_eq!(MorphTarget::Dispersed.action_label(), "Gather Shape");
    }

    #[test]
    fn test_single_step_formula() {
        let mut state = MorphState::new(0.0, MorphTarget::Formed);
        let p = state.update(0.1);
        assert!((p - 0.25).abs() < 1e-6);
        let p = state.update(0.1);
        assert!((p - (0.25 + 0.75 * 0.25)).abs() < 1e-6);
    }

    #[test]
    fn test_converges_monotonically() {
        let mut state = MorphState::new(0.0, MorphTarget::Formed);
        let mut last = state.progress();
        let mut steps = 0;
        while !state.is_settled(1e-6) {
            let p = state.update(1.0 / 60.0);
            assert!(p >= last);
            assert!(p <= 1.0);
            last = p;
            steps += 1;
            assert!(steps < 2000, "did not converge");
        }
    }

    #[test]
    fn test_large_dt_does_not_overshoot() {
        let mut state = MorphState::new(0.3, MorphTarget::Formed);
        assert_eq!(state.update(10.0), 1.0);
        state.set_target(MorphTarget::Dispersed);
        assert_eq!(state.update(10.0), 0.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        for target in [MorphTarget::Formed, MorphTarget::Dispersed] {
            let mut state = MorphState::new(0.4, target);
            assert_eq!(state.update(0.0), 0.4);
        }
    }

    #[test]
    fn test_invalid_dt_is_noop() {
        let mut state = MorphState::new(0.6, MorphTarget::Formed);
        for dt in [-0.5, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(state.update(dt), 0.6);
        }
    }

    #[test]
    fn test_redirect_mid_stream() {
        let mut state = MorphState::formed();
        state.update(0.016);
        assert_eq!(state.progress(), 1.0);

        state.set_target(MorphTarget::Dispersed);
        let before = state.progress();
        let after = state.update(0.016);
        assert!(after < before);
        assert!(after > 0.9, "no discontinuity expected, got {after}");
    }

    #[test]
    fn test_toggle_and_snap() {
        let mut state = MorphState::dispersed();
        assert_eq!(state.toggle(), MorphTarget::Formed);
        assert!(!state.is_settled(DEFAULT_SETTLE_EPSILON));
        state.snap_to_target();
        assert!(state.is_settled(DEFAULT_SETTLE_EPSILON));
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn test_set_target_keeps_progress() {
        let mut state = MorphState::new(0.4, MorphTarget::Formed);
        state.set_target(MorphTarget::Dispersed);
        assert_eq!(state.target(), MorphTarget::Dispersed);
        assert_eq!(state.progress(), 0.4);
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(MorphState::new(2.0, MorphTarget::Formed).progress(), 1.0);
        assert_eq!(MorphState::new(-1.0, MorphTarget::Formed).progress(), 0.0);
        assert_eq!(MorphState::new(f32::NAN, MorphTarget::Formed).progress(), 0.0);
    }

    #[test]
    fn test_smoothing_rate() {
        let mut state = MorphState::default().with_smoothing_rate(5.0);
        assert!((state.update(0.1) - 0.5).abs() < 1e-6);
        assert_eq!(MorphState::default().with_smoothing_rate(-3.0).smoothing_rate(), 0.0);
    }
}
