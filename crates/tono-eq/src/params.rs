//! Lock-free parameter storage shared between control and audio threads.
//!
//! Each parameter lives in an [`AtomicU32`] holding the bit pattern of an
//! `f32`. Writers clamp to the parameter's range before storing, so readers
//! never observe an out-of-range value. Individual loads and stores are
//! atomic, but there is no consistency guarantee across slots: a snapshot
//! taken while another thread writes several parameters may mix old and new
//! values. Every such mixture is still a valid, in-range parameter set.

use std::sync::atomic::{AtomicU32, Ordering};

use tono_core::ParamDescriptor;

use crate::processor::FilterParams;

/// Number of automatable parameters.
pub const PARAM_COUNT: usize = 10;

/// Slot index of the linear master gain.
pub const MASTER_GAIN: usize = 0;
/// Slot index of the low shelf corner frequency.
pub const LOW_FREQ: usize = 1;
/// Slot index of the low shelf gain.
pub const LOW_GAIN: usize = 2;
/// Slot index of the low shelf Q.
pub const LOW_Q: usize = 3;
/// Slot index of the peak/bell center frequency.
pub const MID_FREQ: usize = 4;
/// Slot index of the peak/bell gain.
pub const MID_GAIN: usize = 5;
/// Slot index of the peak/bell Q.
pub const MID_Q: usize = 6;
/// Slot index of the high shelf corner frequency.
pub const HIGH_FREQ: usize = 7;
/// Slot index of the high shelf gain.
pub const HIGH_GAIN: usize = 8;
/// Slot index of the high shelf Q.
pub const HIGH_Q: usize = 9;

/// Descriptor for one parameter slot, or `None` for an out-of-range index.
#[must_use]
pub fn descriptor(index: usize) -> Option<ParamDescriptor> {
    let desc = match index {
        MASTER_GAIN => ParamDescriptor::linear("Master Gain", "Gain", 0.0, 1.0, 0.5)
            .with_id("masterGain"),
        LOW_FREQ => ParamDescriptor::freq_hz("Low Freq", "LoFreq", 20.0, 800.0, 200.0, 200.0)
            .with_id("lowFreq"),
        LOW_GAIN => ParamDescriptor::gain_db("Low Gain", "LoGain", -12.0, 12.0, 0.0)
            .with_id("lowGain"),
        LOW_Q => ParamDescriptor::q_factor("Low Q", "LoQ", 0.707).with_id("lowQ"),
        MID_FREQ => ParamDescriptor::freq_hz("Mid Freq", "MidFreq", 200.0, 8000.0, 1000.0, 1000.0)
            .with_id("midFreq"),
        MID_GAIN => ParamDescriptor::gain_db("Mid Gain", "MidGain", -12.0, 12.0, 0.0)
            .with_id("midGain"),
        MID_Q => ParamDescriptor::q_factor("Mid Q", "MidQ", 1.0).with_id("midQ"),
        HIGH_FREQ => {
            ParamDescriptor::freq_hz("High Freq", "HiFreq", 1000.0, 20000.0, 8000.0, 8000.0)
                .with_id("highFreq")
        }
        HIGH_GAIN => ParamDescriptor::gain_db("High Gain", "HiGain", -12.0, 12.0, 0.0)
            .with_id("highGain"),
        HIGH_Q => ParamDescriptor::q_factor("High Q", "HiQ", 0.707).with_id("highQ"),
        _ => return None,
    };
    Some(desc)
}

/// Slot index for a stable string id, or `None` if the id is unknown.
#[must_use]
pub fn index_of(id: &str) -> Option<usize> {
    (0..PARAM_COUNT).find(|&i| descriptor(i).is_some_and(|d| d.string_id == id))
}

/// The shared parameter table.
///
/// One instance is created per equalizer and shared (typically behind an
/// `Arc`) between whoever edits parameters and the audio-thread processor.
pub struct EqParams {
    values: [AtomicU32; PARAM_COUNT],
}

impl EqParams {
    /// Creates a table with every parameter at its default value.
    #[must_use]
    pub fn new() -> Self {
        let values = core::array::from_fn(|i| {
            let default = descriptor(i).map_or(0.0, |d| d.default);
            AtomicU32::new(default.to_bits())
        });
        Self { values }
    }

    /// Reads a parameter value. Returns `None` for an invalid index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Writes a parameter value, clamped to the parameter's range.
    ///
    /// Returns `false` for an invalid index. Non-finite values are rejected
    /// and leave the slot unchanged.
    pub fn set(&self, index: usize, value: f32) -> bool {
        let Some(desc) = descriptor(index) else {
            return false;
        };
        if !value.is_finite() {
            return false;
        }
        self.values[index].store(desc.clamp(value).to_bits(), Ordering::Release);
        true
    }

    /// Reads a parameter by its stable string id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<f32> {
        self.get(index_of(id)?)
    }

    /// Writes a parameter by its stable string id. Returns `false` if the id
    /// is unknown or the value non-finite.
    pub fn set_by_id(&self, id: &str, value: f32) -> bool {
        index_of(id).is_some_and(|i| self.set(i, value))
    }

    /// Resets every parameter to its default.
    pub fn reset(&self) {
        for i in 0..PARAM_COUNT {
            if let Some(desc) = descriptor(i) {
                self.values[i].store(desc.default.to_bits(), Ordering::Release);
            }
        }
    }

    /// Current master gain, a linear factor in `[0, 1]`.
    #[must_use]
    pub fn master_gain(&self) -> f32 {
        self.load(MASTER_GAIN)
    }

    /// Snapshot of the nine filter parameters.
    ///
    /// Each slot is read atomically; slots written concurrently by another
    /// thread may tear against each other, which is acceptable because every
    /// observed combination is in range.
    #[must_use]
    pub fn snapshot(&self) -> FilterParams {
        FilterParams {
            low_freq: self.load(LOW_FREQ),
            low_gain: self.load(LOW_GAIN),
            low_q: self.load(LOW_Q),
            mid_freq: self.load(MID_FREQ),
            mid_gain: self.load(MID_GAIN),
            mid_q: self.load(MID_Q),
            high_freq: self.load(HIGH_FREQ),
            high_gain: self.load(HIGH_GAIN),
            high_q: self.load(HIGH_Q),
        }
    }

    fn load(&self, index: usize) -> f32 {
        f32::from_bits(self.values[index].load(Ordering::Acquire))
    }
}

impl Default for EqParams {
    fn default() -> Self {
        Self::new()
    }
}
