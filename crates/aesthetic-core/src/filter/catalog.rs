//! Built-in preset registry.

use std::sync::OnceLock;

use serde::Serialize;

use crate::error::FilterError;
use crate::filter::params::ParameterId::{Blur, Brightness, Contrast, HueRotate, Saturate, Sepia};
use crate::filter::params::{FilterParams, ParameterId};

/// Id of the preset used as fallback and as the reset target.
pub const DEFAULT_PRESET_ID: &str = "Basic";

/// A named, fixed combination of parameter values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Stable identifier (`"Vintage"`).
    pub id: &'static str,
    /// Style-class alias the web UI historically used (`"aesthetic-vintage"`).
    pub alias: &'static str,
    /// Label shown on the preset button and used in export file names.
    pub display_name: &'static str,
    /// Slots this preset specifies. The rest are neutral.
    pub overrides: &'static [(ParameterId, f32)],
}

impl Preset {
    /// Full parameter set with unspecified slots at their neutral value.
    pub fn parameters(&self) -> FilterParams {
        FilterParams::neutral_with(self.overrides)
    }

    fn matches(&self, id: &str) -> bool {
        self.id == id || self.alias == id
    }
}

const BUILTIN_PRESETS: [Preset; 6] = [
    Preset {
        id: "Basic",
        alias: "aesthetic-basic",
        display_name: "Básico",
        overrides: &[
            (Contrast, 1.4),
            (Saturate, 0.5),
            (Brightness, 0.8),
            (Sepia, 0.0),
            (HueRotate, -20.0),
            (Blur, 0.0),
        ],
    },
    Preset {
        id: "Vintage",
        alias: "aesthetic-vintage",
        display_name: "Vintage",
        overrides: &[
            (Contrast, 1.3),
            (Saturate, 0.6),
            (Brightness, 0.85),
            (Sepia, 0.2),
            (HueRotate, -15.0),
        ],
    },
    Preset {
        id: "Cold",
        alias: "aesthetic-cold",
        display_name: "Frío",
        overrides: &[
            (Contrast, 1.4),
            (Saturate, 0.5),
            (Brightness, 0.8),
            (HueRotate, -30.0),
            (Blur, 0.2),
        ],
    },
    Preset {
        id: "Warm",
        alias: "aesthetic-warm",
        display_name: "Cálido",
        overrides: &[
            (Contrast, 1.1),
            (Saturate, 0.8),
            (Brightness, 0.95),
            (Sepia, 0.15),
            (HueRotate, 10.0),
        ],
    },
    Preset {
        id: "Dreamy",
        alias: "aesthetic-dreamy",
        display_name: "Soñador",
        overrides: &[
            (Contrast, 1.1),
            (Saturate, 0.6),
            (Brightness, 1.1),
            (Sepia, 0.1),
            (HueRotate, -5.0),
            (Blur, 0.5),
        ],
    },
    Preset {
        id: "Dark",
        alias: "aesthetic-dark",
        display_name: "Oscuro",
        overrides: &[
            (Contrast, 1.3),
            (Saturate, 0.4),
            (Brightness, 0.7),
            (Sepia, 0.3),
            (HueRotate, -20.0),
        ],
    },
];

/// Immutable preset registry. Iteration order is insertion order.
#[derive(Debug)]
pub struct FilterCatalog {
    presets: Vec<Preset>,
}

impl FilterCatalog {
    /// Process-wide catalog of the six shipped presets, built on first use.
    pub fn builtin() -> &'static FilterCatalog {
        static CATALOG: OnceLock<FilterCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| FilterCatalog {
            presets: BUILTIN_PRESETS.to_vec(),
        })
    }

    /// Find a preset by id or alias.
    pub fn lookup(&self, id: &str) -> Result<&Preset, FilterError> {
        self.presets
            .iter()
            .find(|p| p.matches(id))
            .ok_or_else(|| FilterError::NotFound(id.to_string()))
    }

    /// Like [`lookup`](Self::lookup), but falls back to the default preset so
    /// callers always end up with something renderable.
    pub fn lookup_or_default(&self, id: &str) -> &Preset {
        match self.lookup(id) {
            Ok(preset) => preset,
            Err(e) => {
                tracing::warn!("{e}, falling back to {}", self.default_preset().id);
                self.default_preset()
            }
        }
    }

    /// The `Basic` preset, or the first entry if it is missing.
    pub fn default_preset(&self) -> &Preset {
        self.presets
            .iter()
            .find(|p| p.id == DEFAULT_PRESET_ID)
            .unwrap_or(&self.presets[0])
    }

    /// All presets in display order.
    pub fn list_all(&self) -> &[Preset] {
        &self.presets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_all_order_is_stable() {
        let ids: Vec<_> = FilterCatalog::builtin()
            .list_all()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, ["Basic", "Vintage", "Cold", "Warm", "Dreamy", "Dark"]);
    }

    #[test]
    fn test_lookup_by_alias() {
        let catalog = FilterCatalog::builtin();
        let preset = catalog.lookup("aesthetic-warm").expect("alias should resolve");
        assert_eq!(preset.id, "Warm");
    }

    #[test]
    fn test_lookup_unknown_is_not_found() {
        let err = FilterCatalog::builtin().lookup("Sunset").unwrap_err();
        assert_eq!(err, FilterError::NotFound("Sunset".to_string()));
    }

    #[test]
    fn test_lookup_or_default_falls_back_to_basic() {
        let preset = FilterCatalog::builtin().lookup_or_default("nope");
        assert_eq!(preset.id, DEFAULT_PRESET_ID);
    }

    #[test]
    fn test_unspecified_slots_are_neutral() {
        let cold = FilterCatalog::builtin().lookup("Cold").unwrap().parameters();
        assert_eq!(cold.sepia, 0.0);
        let warm = FilterCatalog::builtin().lookup("Warm").unwrap().parameters();
        assert_eq!(warm.blur, 0.0);
    }

    #[test]
    fn test_basic_matches_custom_defaults() {
        let basic = FilterCatalog::builtin().default_preset().parameters();
        assert_eq!(basic, FilterParams::CUSTOM_DEFAULTS);
    }
}
