//! Block processor: per-channel filter cascades plus smoothed master gain.

use std::sync::Arc;

use tono_core::{
    BiquadCoeffs, FilterChain, LinearSmoother, NUM_STAGES, high_shelf_coefficients,
    low_shelf_coefficients, peak_coefficients,
};

use crate::params::EqParams;

/// Maximum number of audio channels the processor drives.
pub const MAX_CHANNELS: usize = 2;

/// Master gain ramp length in seconds.
const GAIN_RAMP_SECS: f32 = 0.05;

/// Snapshot of the nine filter parameters read at the top of a block.
///
/// Compared structurally against the previously applied snapshot to decide
/// whether coefficients need recomputation. [`FilterParams::sentinel`]
/// produces an all-NaN value that compares unequal to every snapshot,
/// including itself, which guarantees the first comparison after
/// (re)initialization reports a change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Low shelf corner frequency in Hz.
    pub low_freq: f32,
    /// Low shelf gain in dB.
    pub low_gain: f32,
    /// Low shelf quality factor.
    pub low_q: f32,
    /// Peak/bell center frequency in Hz.
    pub mid_freq: f32,
    /// Peak/bell gain in dB.
    pub mid_gain: f32,
    /// Peak/bell quality factor.
    pub mid_q: f32,
    /// High shelf corner frequency in Hz.
    pub high_freq: f32,
    /// High shelf gain in dB.
    pub high_gain: f32,
    /// High shelf quality factor.
    pub high_q: f32,
}

impl FilterParams {
    /// A snapshot that compares unequal to every snapshot, itself included.
    #[must_use]
    pub fn sentinel() -> Self {
        Self {
            low_freq: f32::NAN,
            low_gain: f32::NAN,
            low_q: f32::NAN,
            mid_freq: f32::NAN,
            mid_gain: f32::NAN,
            mid_q: f32::NAN,
            high_freq: f32::NAN,
            high_gain: f32::NAN,
            high_q: f32::NAN,
        }
    }
}

/// Three-band equalizer processor for up to two channels.
///
/// Each channel owns an independent [`FilterChain`] (low shelf, peaking
/// bell, high shelf), so filter state never bleeds between channels.
/// Coefficients are recomputed only when the parameter snapshot differs from
/// the last applied one; the master gain target is refreshed every block and
/// ramped per sample.
pub struct EqProcessor {
    params: Arc<EqParams>,
    chains: [FilterChain; MAX_CHANNELS],
    coeffs: [BiquadCoeffs; NUM_STAGES],
    master_gain: LinearSmoother,
    last_params: FilterParams,
    sample_rate: f32,
    max_block_size: usize,
    coefficient_updates: u64,
}

impl EqProcessor {
    /// Creates a processor over a shared parameter table.
    ///
    /// [`EqProcessor::prepare`] must be called before the first block.
    #[must_use]
    pub fn new(params: Arc<EqParams>) -> Self {
        Self {
            params,
            chains: [FilterChain::new(), FilterChain::new()],
            coeffs: [BiquadCoeffs::identity(); NUM_STAGES],
            master_gain: LinearSmoother::new(0.5),
            last_params: FilterParams::sentinel(),
            sample_rate: 44_100.0,
            max_block_size: 512,
            coefficient_updates: 0,
        }
    }

    /// Prepares for playback at the given sample rate and block size.
    ///
    /// Clears all filter history, re-times the gain ramp, and pins the
    /// smoother to the current master gain so playback does not start with a
    /// fade. The applied-parameter snapshot is reset to the sentinel, so the
    /// next processed block always recomputes coefficients.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        for chain in &mut self.chains {
            chain.reset();
        }
        self.master_gain.reset(sample_rate, GAIN_RAMP_SECS);
        self.master_gain
            .set_current_and_target(self.params.master_gain());
        self.last_params = FilterParams::sentinel();
        tracing::debug!(sample_rate, max_block_size, "processor prepared");
    }

    /// Processes one block of planar audio in place.
    ///
    /// `buffers` holds one slice per output channel, all of equal length;
    /// the first `input_channels` of them carry input audio. Channels beyond
    /// the inputs are cleared to silence before anything else runs.
    ///
    /// Allocation-free and lock-free: safe to call from an audio callback.
    pub fn process(&mut self, buffers: &mut [&mut [f32]], input_channels: usize) {
        debug_assert!(input_channels <= MAX_CHANNELS);
        debug_assert!(input_channels <= buffers.len());
        let Some(block_len) = buffers.first().map(|b| b.len()) else {
            return;
        };
        debug_assert!(block_len <= self.max_block_size);
        debug_assert!(buffers.iter().all(|b| b.len() == block_len));

        for buffer in buffers.iter_mut().skip(input_channels) {
            buffer.fill(0.0);
        }

        let snapshot = self.params.snapshot();
        if snapshot != self.last_params {
            self.update_filters(&snapshot);
        }

        for (chain, buffer) in self
            .chains
            .iter_mut()
            .zip(buffers.iter_mut())
            .take(input_channels)
        {
            chain.process_buffer(buffer);
        }

        self.master_gain.set_target(self.params.master_gain());
        for i in 0..block_len {
            let gain = self.master_gain.next();
            for buffer in buffers.iter_mut().take(input_channels) {
                buffer[i] *= gain;
            }
        }
    }

    /// Processes interleaved audio in place. Offline convenience wrapper
    /// with the same per-block semantics as [`EqProcessor::process`].
    pub fn process_interleaved(&mut self, buffer: &mut [f32], channels: usize) {
        debug_assert!((1..=MAX_CHANNELS).contains(&channels));

        let snapshot = self.params.snapshot();
        if snapshot != self.last_params {
            self.update_filters(&snapshot);
        }

        self.master_gain.set_target(self.params.master_gain());
        for frame in buffer.chunks_exact_mut(channels) {
            let gain = self.master_gain.next();
            for (chain, sample) in self.chains.iter_mut().zip(frame.iter_mut()) {
                *sample = chain.process(*sample) * gain;
            }
        }
    }

    /// Number of coefficient recomputations since construction.
    #[must_use]
    pub fn coefficient_updates(&self) -> u64 {
        self.coefficient_updates
    }

    /// Coefficients currently loaded into both channel chains.
    #[must_use]
    pub fn coefficients(&self) -> [BiquadCoeffs; NUM_STAGES] {
        self.coeffs
    }

    /// The shared parameter table this processor reads from.
    #[must_use]
    pub fn params(&self) -> &Arc<EqParams> {
        &self.params
    }

    /// Designs all three stages from a snapshot and loads them into both
    /// chains. A stage whose design degenerates (normalizer too close to
    /// zero) keeps its previous coefficients; filter state is preserved
    /// either way.
    fn update_filters(&mut self, p: &FilterParams) {
        let designs = [
            low_shelf_coefficients(p.low_freq, p.low_gain, p.low_q, self.sample_rate),
            peak_coefficients(p.mid_freq, p.mid_gain, p.mid_q, self.sample_rate),
            high_shelf_coefficients(p.high_freq, p.high_gain, p.high_q, self.sample_rate),
        ];
        for (slot, design) in self.coeffs.iter_mut().zip(designs) {
            if let Some(coeffs) = design {
                *slot = coeffs;
            }
        }
        for chain in &mut self.chains {
            chain.set_coefficients(&self.coeffs);
        }
        self.last_params = *p;
        self.coefficient_updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    fn prepared(sample_rate: f32, block: usize) -> EqProcessor {
        let mut proc = EqProcessor::new(Arc::new(EqParams::new()));
        proc.prepare(sample_rate, block);
        proc
    }

    #[test]
    fn sentinel_compares_unequal_to_itself() {
        let s = FilterParams::sentinel();
        assert_ne!(s, s);
        assert_ne!(s, EqParams::new().snapshot());
    }

    #[test]
    fn first_block_recomputes_exactly_once() {
        let mut proc = prepared(48_000.0, 256);
        let mut left = [0.0_f32; 256];
        let mut right = [0.0_f32; 256];
        for _ in 0..4 {
            proc.process(&mut [&mut left, &mut right], 2);
        }
        assert_eq!(proc.coefficient_updates(), 1);
    }

    #[test]
    fn parameter_change_triggers_one_recompute() {
        let mut proc = prepared(48_000.0, 256);
        let mut left = [0.0_f32; 256];
        proc.process(&mut [&mut left], 1);
        proc.params().set(params::MID_GAIN, 3.0);
        proc.process(&mut [&mut left], 1);
        proc.process(&mut [&mut left], 1);
        assert_eq!(proc.coefficient_updates(), 2);
    }

    #[test]
    fn excess_output_channels_are_cleared() {
        let mut proc = prepared(44_100.0, 8);
        let mut left = [1.0_f32; 8];
        let mut right = [1.0_f32; 8];
        proc.process(&mut [&mut left, &mut right], 1);
        assert!(right.iter().all(|&s| s == 0.0));
        assert!(left.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn channel_state_is_independent() {
        let mut proc = prepared(44_100.0, 64);
        proc.params().set(params::LOW_GAIN, 9.0);
        let mut left = [0.0_f32; 64];
        let mut right = [0.0_f32; 64];
        left[0] = 1.0;
        proc.process(&mut [&mut left, &mut right], 2);
        assert!(right.iter().all(|&s| s == 0.0));
        assert!(left.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn prepare_pins_gain_without_initial_ramp() {
        let mut proc = EqProcessor::new(Arc::new(EqParams::new()));
        proc.params().set(params::MASTER_GAIN, 0.8);
        proc.prepare(44_100.0, 16);
        let mut left = [1.0_f32; 16];
        proc.process(&mut [&mut left], 1);
        // No fade-in: the very first sample already carries the full gain.
        assert!((left[0] - 0.8).abs() < 1e-4);
    }

    #[test]
    fn reprepare_forces_recompute() {
        let mut proc = prepared(44_100.0, 32);
        let mut left = [0.0_f32; 32];
        proc.process(&mut [&mut left], 1);
        proc.prepare(48_000.0, 32);
        proc.process(&mut [&mut left], 1);
        assert_eq!(proc.coefficient_updates(), 2);
    }

    #[test]
    fn interleaved_applies_settled_gain() {
        let mut proc = prepared(44_100.0, 4);
        let mut frames = [1.0_f32, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        proc.process_interleaved(&mut frames, 2);
        // Flat EQ at settled 0.5 gain.
        for s in frames {
            assert!((s.abs() - 0.5).abs() < 1e-3);
        }
    }
}
