//! Integration tests for tono-core DSP primitives.
//!
//! Verifies the band designers with signal-level measurements: sine waves
//! are run through configured stages, RMS gain is measured after the filter
//! settles, and the result is compared against the designed response.

use proptest::prelude::*;
use tono_core::{
    BiquadStage, FilterChain, high_shelf_coefficients, low_shelf_coefficients, peak_coefficients,
};

const SAMPLE_RATE: f32 = 48000.0;
const TAU: f32 = core::f32::consts::TAU;

/// Generate a sine wave buffer at the given frequency.
fn generate_sine(freq_hz: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| libm::sinf(TAU * freq_hz * n as f32 / SAMPLE_RATE))
        .collect()
}

/// Measure RMS amplitude of a signal buffer.
fn rms(signal: &[f32]) -> f32 {
    let sum_sq: f32 = signal.iter().map(|&s| s * s).sum();
    libm::sqrtf(sum_sq / signal.len() as f32)
}

/// Convert linear amplitude to dB.
fn to_db(linear: f32) -> f32 {
    20.0 * libm::log10f(linear.max(1e-10))
}

/// Feed a sine through a stage and measure settled gain in dB.
fn measure_response(stage: &mut BiquadStage, freq_hz: f32) -> f32 {
    let num_samples = 4800; // 100ms at 48kHz - enough to settle a 2nd-order filter
    let settle = 2400;
    let input = generate_sine(freq_hz, num_samples);
    stage.clear();
    let output: Vec<f32> = input.iter().map(|&s| stage.process(s)).collect();
    to_db(rms(&output[settle..]) / rms(&input[settle..]))
}

#[test]
fn low_shelf_boosts_below_corner() {
    let coeffs = low_shelf_coefficients(200.0, 6.0, 0.707, SAMPLE_RATE).unwrap();
    let mut stage = BiquadStage::new();
    stage.set_coeffs(coeffs);

    // Deep in the shelf: full boost.
    for &freq in &[30.0, 50.0, 80.0] {
        let gain_db = measure_response(&mut stage, freq);
        assert!(
            (gain_db - 6.0).abs() < 1.0,
            "shelf region {freq} Hz: expected ~+6 dB, got {gain_db:.1} dB"
        );
    }

    // Far above the corner: untouched.
    for &freq in &[4000.0, 8000.0, 16000.0] {
        let gain_db = measure_response(&mut stage, freq);
        assert!(
            gain_db.abs() < 1.0,
            "above shelf {freq} Hz: expected ~0 dB, got {gain_db:.1} dB"
        );
    }
}

#[test]
fn high_shelf_boosts_above_corner() {
    let coeffs = high_shelf_coefficients(8000.0, 6.0, 0.707, SAMPLE_RATE).unwrap();
    let mut stage = BiquadStage::new();
    stage.set_coeffs(coeffs);

    for &freq in &[16000.0, 20000.0] {
        let gain_db = measure_response(&mut stage, freq);
        assert!(
            (gain_db - 6.0).abs() < 1.0,
            "shelf region {freq} Hz: expected ~+6 dB, got {gain_db:.1} dB"
        );
    }

    for &freq in &[100.0, 500.0, 1000.0] {
        let gain_db = measure_response(&mut stage, freq);
        assert!(
            gain_db.abs() < 1.0,
            "below shelf {freq} Hz: expected ~0 dB, got {gain_db:.1} dB"
        );
    }
}

#[test]
fn peak_boosts_at_center_only() {
    let coeffs = peak_coefficients(1000.0, 6.0, 2.0, SAMPLE_RATE).unwrap();
    let mut stage = BiquadStage::new();
    stage.set_coeffs(coeffs);

    let at_center = measure_response(&mut stage, 1000.0);
    assert!(
        (at_center - 6.0).abs() < 0.5,
        "bell center: expected ~+6 dB, got {at_center:.1} dB"
    );

    for &freq in &[100.0, 10000.0] {
        let gain_db = measure_response(&mut stage, freq);
        assert!(
            gain_db.abs() < 1.0,
            "bell skirt {freq} Hz: expected ~0 dB, got {gain_db:.1} dB"
        );
    }
}

#[test]
fn peak_cut_mirrors_boost() {
    let boost = peak_coefficients(1000.0, 6.0, 1.0, SAMPLE_RATE).unwrap();
    let cut = peak_coefficients(1000.0, -6.0, 1.0, SAMPLE_RATE).unwrap();

    let mut stage = BiquadStage::new();
    stage.set_coeffs(boost);
    let boost_db = measure_response(&mut stage, 1000.0);
    stage.set_coeffs(cut);
    let cut_db = measure_response(&mut stage, 1000.0);

    assert!(
        (boost_db + cut_db).abs() < 0.2,
        "boost ({boost_db:.2} dB) and cut ({cut_db:.2} dB) should mirror"
    );
}

#[test]
fn shelf_boost_then_cut_is_reciprocal() {
    // A +G shelf cascaded with a -G shelf at the same corner and Q is the
    // reciprocal filter pair: the cascade's steady-state gain is unity
    // across the band.
    let boost = low_shelf_coefficients(200.0, 9.0, 0.707, SAMPLE_RATE).unwrap();
    let cut = low_shelf_coefficients(200.0, -9.0, 0.707, SAMPLE_RATE).unwrap();

    let mut chain = FilterChain::new();
    chain.set_coefficients(&[boost, cut, tono_core::BiquadCoeffs::identity()]);

    let num_samples = 4800;
    let settle = 2400;
    for &freq in &[50.0, 200.0, 1000.0, 8000.0] {
        chain.reset();
        let input = generate_sine(freq, num_samples);
        let output: Vec<f32> = input.iter().map(|&s| chain.process(s)).collect();
        let gain_db = to_db(rms(&output[settle..]) / rms(&input[settle..]));
        assert!(
            gain_db.abs() < 0.25,
            "reciprocal cascade at {freq} Hz: expected ~0 dB, got {gain_db:.2} dB"
        );
    }
}

proptest! {
    /// For any in-domain (frequency, gain, Q), every designer yields finite,
    /// stable coefficients: |a2| < 1 and |a1| < 1 + a2 place both poles
    /// inside the unit circle.
    #[test]
    fn designers_stable_for_all_in_domain_params(
        freq in 20.0f32..20000.0,
        gain_db in -12.0f32..12.0,
        q in 0.1f32..10.0,
    ) {
        let designs = [
            low_shelf_coefficients(freq, gain_db, q, SAMPLE_RATE),
            peak_coefficients(freq, gain_db, q, SAMPLE_RATE),
            high_shelf_coefficients(freq, gain_db, q, SAMPLE_RATE),
        ];
        for coeffs in designs {
            let c = coeffs.expect("in-domain params must not degenerate a0");
            prop_assert!(c.b0.is_finite() && c.b1.is_finite() && c.b2.is_finite());
            prop_assert!(c.a1.is_finite() && c.a2.is_finite());
            prop_assert!(c.a2.abs() < 1.0, "pole radius: a2 = {}", c.a2);
            prop_assert!(c.a1.abs() < 1.0 + c.a2, "stability triangle: a1 = {}, a2 = {}", c.a1, c.a2);
        }
    }

    /// Processing bounded input through any in-domain design never produces
    /// non-finite samples.
    #[test]
    fn stage_output_finite(
        freq in 20.0f32..20000.0,
        gain_db in -12.0f32..12.0,
        q in 0.1f32..10.0,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let coeffs = peak_coefficients(freq, gain_db, q, SAMPLE_RATE).unwrap();
        let mut stage = BiquadStage::new();
        stage.set_coeffs(coeffs);
        for &sample in &input {
            let out = stage.process(sample);
            prop_assert!(out.is_finite(), "non-finite output {out} for input {sample}");
        }
    }
}
