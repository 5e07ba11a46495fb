//! Tono Core - DSP primitives for the tono three-band equalizer.
//!
//! This crate provides the numeric building blocks for the equalizer engine,
//! designed for real-time audio processing with zero allocation in the audio
//! path.
//!
//! # Core Abstractions
//!
//! ## Filters
//!
//! - [`BiquadCoeffs`] - Normalized second-order IIR coefficient set
//! - [`BiquadStage`] - Direct Form I biquad with its own 2-sample history
//! - [`FilterChain`] - Fixed cascade of three stages (low shelf, peak, high shelf)
//! - [`low_shelf_coefficients`], [`peak_coefficients`],
//!   [`high_shelf_coefficients`] - RBJ Audio EQ Cookbook designers
//!
//! ## Parameter Smoothing
//!
//! - [`LinearSmoother`] - Linear ramp towards a target over a fixed duration,
//!   used for click-free master gain automation
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`] - Display/validation metadata for a parameter
//! - [`ParamScale`] - Linear or power-curve normalization (skew)
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`db_to_amplitude`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! tono-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations in audio processing paths
//! - **No dependencies on std**: pure `no_std` with `libm` for math
//! - **Pure coefficient design**: the same inputs always yield bit-identical
//!   coefficients

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod math;
pub mod param_info;
pub mod smooth;

// Re-export main types at crate root
pub use biquad::{
    BiquadCoeffs, BiquadStage, FilterChain, NUM_STAGES, high_shelf_coefficients,
    low_shelf_coefficients, peak_coefficients,
};
pub use math::{db_to_amplitude, db_to_linear, linear_to_db};
pub use param_info::{ParamDescriptor, ParamScale, ParamUnit};
pub use smooth::LinearSmoother;
