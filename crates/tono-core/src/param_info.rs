//! Parameter metadata for display, validation, and host-style normalization.
//!
//! Each equalizer parameter is described by a [`ParamDescriptor`] carrying
//! its range, default, display unit, and normalization curve. Descriptors
//! drive the parameter table, the CLI's flag validation, and preset/state
//! round-trips (each parameter has a stable `string_id` that serialized
//! state keys on).
//!
//! Frequency and Q parameters use a power-curve normalization
//! ([`ParamScale::Power`]) so that the midpoint of a knob lands on a chosen
//! center value rather than the arithmetic middle of the range, the same
//! mapping JUCE exposes as `NormalisableRange::setSkewForCentre`.

use libm::{logf, powf};

/// Scaling curve for mapping between plain values and normalized \[0, 1\].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Power-curve mapping: `value = min + normalized^exp * (max - min)`.
    /// Exponents above 1 concentrate resolution at the low end, which is
    /// what frequency knobs want.
    Power(f32),
}

impl ParamScale {
    /// Power curve whose normalized midpoint maps to `center`.
    ///
    /// Solves `0.5^exp = (center - min) / (max - min)` for the exponent.
    /// `center` must lie strictly between `min` and `max`.
    pub fn power_from_center(min: f32, max: f32, center: f32) -> Self {
        let frac = (center - min) / (max - min);
        Self::Power(logf(frac) / logf(0.5))
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Decibels (dB) - band gains.
    Decibels,
    /// Hertz (Hz) - band frequencies.
    Hertz,
    /// Unitless - Q factors and the linear master gain.
    None,
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Low Freq").
    pub name: &'static str,

    /// Short name for constrained displays, 8 characters or less.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Default value.
    pub default: f32,

    /// Recommended increment for encoder-style control.
    pub step: f32,

    /// Normalization curve for mapping between plain and normalized values.
    pub scale: ParamScale,

    /// Stable identifier for serialization and automation
    /// (e.g., `"lowFreq"`). Must never change once assigned.
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// Gain parameter in decibels, linear scale.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.1,
            scale: ParamScale::Linear,
            string_id: "",
        }
    }

    /// Frequency parameter in Hz, power-skewed so the knob midpoint lands
    /// on `center`.
    pub fn freq_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
        center: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 0.1,
            scale: ParamScale::power_from_center(min, max, center),
            string_id: "",
        }
    }

    /// Quality-factor parameter (0.1–10), skewed to center on 1.0.
    pub fn q_factor(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.1,
            max: 10.0,
            default,
            step: 0.01,
            scale: ParamScale::power_from_center(0.1, 10.0, 1.0),
            string_id: "",
        }
    }

    /// Unitless linear parameter (e.g., the 0–1 master gain).
    pub const fn linear(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.001,
            scale: ParamScale::Linear,
            string_id: "",
        }
    }

    /// Sets the stable string ID. Builder pattern.
    pub const fn with_id(mut self, string_id: &'static str) -> Self {
        self.string_id = string_id;
        self
    }

    /// Clamps a value to this parameter's valid range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Converts a plain value to normalized \[0, 1\], respecting the scale.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let linear = (value - self.min) / range;
        match self.scale {
            ParamScale::Linear => linear,
            ParamScale::Power(exp) => powf(linear, 1.0 / exp),
        }
    }

    /// Converts a normalized value \[0, 1\] back to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Power(exp) => self.min + powf(normalized, exp) * (self.max - self.min),
        }
    }
}
