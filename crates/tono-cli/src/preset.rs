//! Preset file format for equalizer settings.
//!
//! Presets are TOML files holding a `[params]` table keyed by the stable
//! parameter ids, e.g.:
//!
//! ```toml
//! name = "Warm Bass"
//! description = "Gentle low shelf lift"
//!
//! [params]
//! lowFreq = 120.0
//! lowGain = 4.5
//! masterGain = 0.8
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;

use tono_eq::EqParams;

/// Preset file format.
#[derive(Debug, Deserialize)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description.
    #[serde(default)]
    #[allow(dead_code)]
    pub description: Option<String>,

    /// Parameter values keyed by stable id.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl Preset {
    /// Parses a preset from TOML text.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Applies the preset's values to a parameter table.
    ///
    /// Unknown ids are skipped with a warning; values out of range are
    /// clamped by the table itself.
    pub fn apply(&self, params: &EqParams) {
        for (id, &value) in &self.params {
            if !params.set_by_id(id, value) {
                tracing::warn!(id, value, "ignoring unknown preset parameter");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_applies() {
        let preset = Preset::from_toml(
            r#"
            name = "Warm Bass"

            [params]
            lowFreq = 120.0
            lowGain = 4.5
            masterGain = 0.8
            "#,
        )
        .unwrap();
        assert_eq!(preset.name, "Warm Bass");

        let params = EqParams::new();
        preset.apply(&params);
        assert_eq!(params.get_by_id("lowFreq"), Some(120.0));
        assert_eq!(params.get_by_id("lowGain"), Some(4.5));
        assert_eq!(params.get_by_id("masterGain"), Some(0.8));
        // Untouched parameters keep defaults.
        assert_eq!(params.get_by_id("midGain"), Some(0.0));
    }

    #[test]
    fn unknown_ids_do_not_abort() {
        let preset = Preset::from_toml(
            r#"
            name = "Future"

            [params]
            lowGain = 2.0
            shimmer = 1.0
            "#,
        )
        .unwrap();
        let params = EqParams::new();
        preset.apply(&params);
        assert_eq!(params.get_by_id("lowGain"), Some(2.0));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let preset = Preset::from_toml(
            r#"
            name = "Loud"

            [params]
            highGain = 99.0
            "#,
        )
        .unwrap();
        let params = EqParams::new();
        preset.apply(&params);
        assert_eq!(params.get_by_id("highGain"), Some(12.0));
    }

    #[test]
    fn invalid_toml_errors() {
        assert!(Preset::from_toml("not toml [").is_err());
    }
}
