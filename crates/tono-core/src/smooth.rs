//! Linearly smoothed control values for click-free parameter changes.
//!
//! An audible step in a gain control produces a click; ramping the value
//! over a short fixed duration removes it. [`LinearSmoother`] tracks a
//! target at a constant per-sample rate and snaps exactly onto the target
//! when the ramp ends, so a settled smoother returns the target bit-for-bit.

/// A control value that ramps linearly towards its target.
///
/// The ramp duration is fixed at [`reset`](Self::reset) time; every
/// subsequent target change takes the full duration from wherever the
/// current value happens to be. Advancing is one add per sample.
#[derive(Debug, Clone)]
pub struct LinearSmoother {
    /// Current smoothed value.
    current: f32,
    /// Target value.
    target: f32,
    /// Per-sample increment while ramping (positive or negative).
    step: f32,
    /// Samples left until the target is reached.
    samples_remaining: u32,
    /// Full ramp length in samples, derived at reset time.
    ramp_samples: u32,
}

impl LinearSmoother {
    /// Create a smoother holding `initial`, with no ramp configured.
    ///
    /// Until [`reset`](Self::reset) is called, target changes are instant.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            samples_remaining: 0,
            ramp_samples: 0,
        }
    }

    /// Configure the ramp duration and cancel any ramp in progress.
    ///
    /// `ramp_secs` is converted to a whole number of samples at
    /// `sample_rate`. The current value is kept.
    pub fn reset(&mut self, sample_rate: f32, ramp_secs: f32) {
        self.ramp_samples = if sample_rate > 0.0 && ramp_secs > 0.0 {
            (ramp_secs * sample_rate) as u32
        } else {
            0
        };
        self.target = self.current;
        self.step = 0.0;
        self.samples_remaining = 0;
    }

    /// Set both the current value and the target, with no ramp.
    ///
    /// Used at prepare time so the first block starts exactly on the
    /// parameter value instead of ramping up from a stale one.
    #[inline]
    pub fn set_current_and_target(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
        self.samples_remaining = 0;
    }

    /// Set a new target.
    ///
    /// Re-setting the current target is a no-op, so calling this once per
    /// block with an unchanged parameter does not restart the ramp.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.target = target;
        if self.ramp_samples == 0 {
            self.current = target;
            self.step = 0.0;
            self.samples_remaining = 0;
        } else {
            self.step = (target - self.current) / self.ramp_samples as f32;
            self.samples_remaining = self.ramp_samples;
        }
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn next(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.step;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                // Land exactly on the target, not within float-sum error of it.
                self.current = self.target;
            }
        }
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether a ramp is still in progress.
    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.samples_remaining > 0
    }
}

impl Default for LinearSmoother {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_smoother_returns_target_exactly() {
        let mut s = LinearSmoother::new(0.5);
        s.reset(44100.0, 0.05);
        s.set_current_and_target(0.5);
        for _ in 0..16 {
            assert_eq!(s.next(), 0.5);
        }
    }

    #[test]
    fn ramp_reaches_target_within_duration() {
        let mut s = LinearSmoother::new(0.0);
        s.reset(48000.0, 0.05);
        s.set_target(1.0);

        let ramp_len = (48000.0_f32 * 0.05) as usize;
        let mut last = 0.0;
        for _ in 0..ramp_len {
            last = s.next();
        }
        assert_eq!(last, 1.0, "must land exactly on target at ramp end");
        assert!(!s.is_smoothing());
    }

    #[test]
    fn ramp_is_monotonic_without_overshoot() {
        let mut s = LinearSmoother::new(1.0);
        s.reset(48000.0, 0.05);
        s.set_target(0.25);

        let mut prev = 1.0;
        for _ in 0..4000 {
            let v = s.next();
            assert!(v <= prev, "downward ramp must not rise: {v} > {prev}");
            assert!(v >= 0.25, "ramp must not overshoot below target: {v}");
            prev = v;
        }
        assert_eq!(prev, 0.25);
    }

    #[test]
    fn retarget_same_value_does_not_restart_ramp() {
        let mut s = LinearSmoother::new(0.0);
        s.reset(48000.0, 0.05);
        s.set_target(1.0);

        for _ in 0..100 {
            s.next();
        }
        let mid = s.current();
        s.set_target(1.0); // same target, e.g. once per block
        assert_eq!(s.current(), mid);
        assert!(s.next() > mid, "ramp keeps moving after a no-op retarget");
    }

    #[test]
    fn instant_when_no_ramp_configured() {
        let mut s = LinearSmoother::new(0.0);
        s.set_target(0.7);
        assert_eq!(s.next(), 0.7);
    }

    #[test]
    fn halfway_point_is_halfway() {
        let mut s = LinearSmoother::new(0.0);
        s.reset(48000.0, 0.05);
        s.set_target(1.0);

        let half = (48000.0_f32 * 0.05) as usize / 2;
        let mut v = 0.0;
        for _ in 0..half {
            v = s.next();
        }
        assert!((v - 0.5).abs() < 0.01, "expected ~0.5 at half ramp, got {v}");
    }
}
