//! Three-band parametric equalizer engine.
//!
//! A cascade of three biquad stages per channel (low shelf, peaking bell,
//! high shelf) followed by a smoothed master gain. Parameters live in a
//! lock-free [`EqParams`] table shared between the control thread and the
//! audio-thread [`EqProcessor`]; coefficients are recomputed only when the
//! parameter snapshot actually changes.
//!
//! ```
//! use std::sync::Arc;
//! use tono_eq::{EqParams, EqProcessor};
//!
//! let shared = Arc::new(EqParams::new());
//! shared.set_by_id("lowGain", 6.0);
//!
//! let mut eq = EqProcessor::new(Arc::clone(&shared));
//! eq.prepare(44_100.0, 512);
//!
//! let mut left = [0.0_f32; 512];
//! let mut right = [0.0_f32; 512];
//! left[0] = 1.0;
//! right[0] = 1.0;
//! eq.process(&mut [&mut left, &mut right], 2);
//! ```

pub mod params;
pub mod processor;
pub mod state;

pub use params::EqParams;
pub use processor::{EqProcessor, FilterParams, MAX_CHANNELS};
pub use state::StateError;
pub use tono_core::{ParamDescriptor, ParamScale, ParamUnit};
