//! Biquad (bi-quadratic) filter stages and the three-band coefficient designers.
//!
//! A [`BiquadStage`] implements the Direct Form I second-order IIR structure:
//!
//! ```text
//! y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
//!                - a1*y[n-1] - a2*y[n-2]
//! ```
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas for the
//! low shelf, peaking, and high shelf responses. All three band designs feed
//! the same stage type; the bands differ only in the coefficients they
//! produce.

use crate::math::db_to_amplitude;
use core::f32::consts::PI;
use libm::{cosf, sinf, sqrtf};

/// Number of stages in a [`FilterChain`]: low shelf, peak/bell, high shelf.
pub const NUM_STAGES: usize = 3;

/// Normalized biquad coefficients.
///
/// The five retained scalars are already divided by the design-time `a0`,
/// so the implicit leading denominator coefficient is 1. Construction goes
/// through [`BiquadCoeffs::normalized`], which is the single place a
/// potentially-small division occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    /// Feedforward coefficients.
    pub b0: f32,
    /// Feedforward, one sample back.
    pub b1: f32,
    /// Feedforward, two samples back.
    pub b2: f32,
    /// Feedback, one sample back.
    pub a1: f32,
    /// Feedback, two samples back.
    pub a2: f32,
}

impl BiquadCoeffs {
    /// Passthrough coefficients: `y[n] = x[n]`.
    pub const fn identity() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }

    /// Normalize a raw six-coefficient set by `a0`.
    ///
    /// Returns `None` when `a0` is effectively zero. In-range band
    /// parameters never produce a degenerate `a0`; callers keep their
    /// previous coefficients when they see `None`.
    pub fn normalized(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Option<Self> {
        if a0.abs() < 1e-10 {
            return None;
        }
        let inv = 1.0 / a0;
        Some(Self {
            b0: b0 * inv,
            b1: b1 * inv,
            b2: b2 * inv,
            a1: a1 * inv,
            a2: a2 * inv,
        })
    }
}

impl Default for BiquadCoeffs {
    fn default() -> Self {
        Self::identity()
    }
}

/// One second-order filter stage: coefficients plus its own delay line.
///
/// Each audio channel owns its own stages; coefficients may be shared
/// (copied) between channels but history never is.
#[derive(Debug, Clone)]
pub struct BiquadStage {
    coeffs: BiquadCoeffs,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl BiquadStage {
    /// Create a stage with passthrough coefficients and zeroed history.
    pub fn new() -> Self {
        Self {
            coeffs: BiquadCoeffs::identity(),
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Replace the coefficient set. History is deliberately left intact so
    /// a mid-stream redesign does not restart the filter transient.
    #[inline]
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    /// Current coefficient set.
    pub fn coeffs(&self) -> BiquadCoeffs {
        self.coeffs
    }

    /// Process a single sample through the stage.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output =
            c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clear the delay lines without touching coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for BiquadStage {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed cascade of three biquad stages for one audio channel.
///
/// Stage order is fixed: low shelf first, then peak/bell, then high shelf.
/// Each stage consumes the previous stage's output.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    stages: [BiquadStage; NUM_STAGES],
}

impl FilterChain {
    /// Create a chain of passthrough stages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all stage delay lines. Call at prepare time or when the input
    /// source changes, to avoid ringing from stale history.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.clear();
        }
    }

    /// Install one coefficient set per stage, in chain order.
    #[inline]
    pub fn set_coefficients(&mut self, coeffs: &[BiquadCoeffs; NUM_STAGES]) {
        for (stage, &c) in self.stages.iter_mut().zip(coeffs.iter()) {
            stage.set_coeffs(c);
        }
    }

    /// Coefficients currently installed, in chain order.
    pub fn coefficients(&self) -> [BiquadCoeffs; NUM_STAGES] {
        [
            self.stages[0].coeffs(),
            self.stages[1].coeffs(),
            self.stages[2].coeffs(),
        ]
    }

    /// Process one sample through all three stages.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let after_low = self.stages[0].process(input);
        let after_peak = self.stages[1].process(after_low);
        self.stages[2].process(after_peak)
    }

    /// Run the cascade over every sample of the buffer in place.
    #[inline]
    pub fn process_buffer(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// Angular frequency and its sine/cosine for a band design.
#[inline]
fn omega_terms(frequency: f32, sample_rate: f32) -> (f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    (cosf(omega), sinf(omega))
}

/// Low shelf coefficients (RBJ cookbook, shelf slope expressed through Q).
///
/// Boosts or cuts everything below `frequency` by approximately `gain_db`.
/// Returns `None` only when the normalization denominator degenerates,
/// which no in-domain `(frequency, gain_db, q)` can produce.
pub fn low_shelf_coefficients(
    frequency: f32,
    gain_db: f32,
    q: f32,
    sample_rate: f32,
) -> Option<BiquadCoeffs> {
    let a = db_to_amplitude(gain_db);
    let (cos_w, sin_w) = omega_terms(frequency, sample_rate);
    let beta = sin_w * sqrtf(a) / q;

    let b0 = a * ((a + 1.0) - (a - 1.0) * cos_w + beta);
    let b1 = 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_w);
    let b2 = a * ((a + 1.0) - (a - 1.0) * cos_w - beta);
    let a0 = (a + 1.0) + (a - 1.0) * cos_w + beta;
    let a1 = -2.0 * ((a - 1.0) + (a + 1.0) * cos_w);
    let a2 = (a + 1.0) + (a - 1.0) * cos_w - beta;

    BiquadCoeffs::normalized(b0, b1, b2, a0, a1, a2)
}

/// Peaking EQ coefficients (RBJ cookbook).
///
/// Boosts or cuts a band centered on `frequency`; `q` controls the width.
pub fn peak_coefficients(
    frequency: f32,
    gain_db: f32,
    q: f32,
    sample_rate: f32,
) -> Option<BiquadCoeffs> {
    let a = db_to_amplitude(gain_db);
    let (cos_w, sin_w) = omega_terms(frequency, sample_rate);
    let alpha = sin_w / (2.0 * q);

    let b0 = 1.0 + alpha * a;
    let b1 = -2.0 * cos_w;
    let b2 = 1.0 - alpha * a;
    let a0 = 1.0 + alpha / a;
    let a1 = -2.0 * cos_w;
    let a2 = 1.0 - alpha / a;

    BiquadCoeffs::normalized(b0, b1, b2, a0, a1, a2)
}

/// High shelf coefficients (RBJ cookbook).
///
/// Mirror of the low shelf: the signs on the `cos` terms flip, as do `b1`
/// and `a1`.
pub fn high_shelf_coefficients(
    frequency: f32,
    gain_db: f32,
    q: f32,
    sample_rate: f32,
) -> Option<BiquadCoeffs> {
    let a = db_to_amplitude(gain_db);
    let (cos_w, sin_w) = omega_terms(frequency, sample_rate);
    let beta = sin_w * sqrtf(a) / q;

    let b0 = a * ((a + 1.0) + (a - 1.0) * cos_w + beta);
    let b1 = -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_w);
    let b2 = a * ((a + 1.0) + (a - 1.0) * cos_w - beta);
    let a0 = (a + 1.0) - (a - 1.0) * cos_w + beta;
    let a1 = 2.0 * ((a - 1.0) - (a + 1.0) * cos_w);
    let a2 = (a + 1.0) - (a - 1.0) * cos_w - beta;

    BiquadCoeffs::normalized(b0, b1, b2, a0, a1, a2)
}
