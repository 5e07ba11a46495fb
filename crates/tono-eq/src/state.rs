//! Parameter state persistence.
//!
//! State is a JSON object mapping stable parameter ids to plain values,
//! e.g. `{"lowGain": 6.0, "masterGain": 0.5}`. Unknown keys are ignored on
//! load so blobs from newer versions restore the parameters both sides
//! know about; missing keys leave the current values untouched.

use thiserror::Error;

use crate::params::{EqParams, PARAM_COUNT, descriptor};

/// Errors from decoding a state blob.
#[derive(Debug, Error)]
pub enum StateError {
    /// The blob is not valid JSON.
    #[error("failed to parse state blob: {0}")]
    Parse(#[from] serde_json::Error),

    /// The blob parsed, but the top level is not a JSON object.
    #[error("state blob is not a JSON object")]
    NotAnObject,
}

/// Serializes every parameter into a state blob.
pub fn save(params: &EqParams) -> Result<Vec<u8>, StateError> {
    let mut map = serde_json::Map::with_capacity(PARAM_COUNT);
    for i in 0..PARAM_COUNT {
        if let (Some(desc), Some(value)) = (descriptor(i), params.get(i)) {
            map.insert(desc.string_id.to_owned(), f64::from(value).into());
        }
    }
    Ok(serde_json::to_vec(&serde_json::Value::Object(map))?)
}

/// Restores parameters from a state blob produced by [`save`].
///
/// Values are clamped to each parameter's range on the way in. Non-numeric
/// values for known keys are skipped rather than treated as errors.
pub fn load(params: &EqParams, blob: &[u8]) -> Result<(), StateError> {
    let value: serde_json::Value = serde_json::from_slice(blob)?;
    let serde_json::Value::Object(map) = value else {
        return Err(StateError::NotAnObject);
    };
    for (key, entry) in &map {
        if let Some(number) = entry.as_f64() {
            params.set_by_id(key, number as f32);
        }
    }
    Ok(())
}
