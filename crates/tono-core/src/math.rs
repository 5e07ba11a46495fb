//! Mathematical utility functions for the equalizer.
//!
//! Level conversions between decibels and linear gain, plus the shelf
//! amplitude term used by the RBJ cookbook designers. All functions are
//! allocation-free and suitable for `no_std`.

use libm::{expf, logf, sqrtf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use tono_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Input is floored at a small positive value so silence maps to a large
/// negative number rather than -inf.
///
/// # Example
/// ```rust
/// use tono_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Shelf/peak amplitude term: `A = sqrt(10^(dB/20))`.
///
/// This is the `A` in the RBJ Audio EQ Cookbook shelf and peaking filter
/// derivations. Equivalent to `10^(dB/40)`.
#[inline]
pub fn db_to_amplitude(db: f32) -> f32 {
    sqrtf(db_to_linear(db))
}
