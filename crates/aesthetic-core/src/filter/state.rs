//! Per-session filter state.
//!
//! `FilterState` is the single source of truth for what the preview and the
//! export render. It is owned by the session layer and mutated only through
//! the three operations below, each of which recomputes the pipeline and
//! notifies observers on success. A failed call leaves the state untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::filter::catalog::{FilterCatalog, Preset};
use crate::filter::params::{FilterParams, ParameterId};
use crate::filter::pipeline::PipelineDescription;

/// Where pipeline values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    /// Values come from the active catalog preset.
    Preset,
    /// Values come from the user-tuned sliders.
    Custom,
}

/// Receives the recomputed pipeline after every successful mutation.
pub trait PipelineObserver {
    fn pipeline_changed(&mut self, pipeline: &PipelineDescription);
}

impl<F> PipelineObserver for F
where
    F: FnMut(&PipelineDescription),
{
    fn pipeline_changed(&mut self, pipeline: &PipelineDescription) {
        self(pipeline)
    }
}

/// Value copy of a [`FilterState`] without its observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSnapshot {
    pub mode: FilterMode,
    pub active_preset_id: Option<String>,
    pub custom: FilterParams,
}

pub struct FilterState {
    catalog: &'static FilterCatalog,
    mode: FilterMode,
    active_preset_id: Option<String>,
    custom: FilterParams,
    observers: Vec<Box<dyn PipelineObserver + Send>>,
}

impl FilterState {
    /// Starts on the default preset with the sliders at their custom defaults.
    pub fn new() -> Self {
        let catalog = FilterCatalog::builtin();
        Self {
            catalog,
            mode: FilterMode::Preset,
            active_preset_id: Some(catalog.default_preset().id.to_string()),
            custom: FilterParams::CUSTOM_DEFAULTS,
            observers: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &'static FilterCatalog {
        self.catalog
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn active_preset_id(&self) -> Option<&str> {
        self.active_preset_id.as_deref()
    }

    /// Slider values. Kept while a preset is active so switching back to
    /// custom mode resumes where the user left off.
    pub fn custom_parameters(&self) -> &FilterParams {
        &self.custom
    }

    /// Register an observer for pipeline changes.
    pub fn subscribe(&mut self, observer: impl PipelineObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Make a catalog preset the active look.
    pub fn select_preset(&mut self, id: &str) -> Result<(), FilterError> {
        let preset = self.catalog.lookup(id)?;
        tracing::debug!(preset = preset.id, "preset selected");

        self.mode = FilterMode::Preset;
        self.active_preset_id = Some(preset.id.to_string());
        self.notify();
        Ok(())
    }

    /// Overwrite one slider value and switch to custom mode.
    ///
    /// The value is not range-checked.
    pub fn set_parameter(&mut self, id: ParameterId, value: f32) {
        tracing::debug!(parameter = %id, value, "parameter set");

        self.custom.set(id, value);
        self.mode = FilterMode::Custom;
        self.notify();
    }

    /// [`set_parameter`](Self::set_parameter) keyed by the UI's slider name.
    pub fn set_parameter_by_name(&mut self, name: &str, value: f32) -> Result<(), FilterError> {
        let id = name.parse::<ParameterId>()?;
        self.set_parameter(id, value);
        Ok(())
    }

    /// Restore slider defaults and reselect the default preset.
    pub fn reset_to_defaults(&mut self) {
        tracing::debug!("filter state reset");

        self.custom = FilterParams::CUSTOM_DEFAULTS;
        self.mode = FilterMode::Preset;
        self.active_preset_id = Some(self.catalog.default_preset().id.to_string());
        self.notify();
    }

    /// The preset whose values are currently rendered, if in preset mode.
    pub fn active_preset(&self) -> Option<&'static Preset> {
        match self.mode {
            FilterMode::Preset => Some(self.resolve_preset()),
            FilterMode::Custom => None,
        }
    }

    /// Pipeline for the current mode. Callable at any time, image or not.
    pub fn current_pipeline(&self) -> PipelineDescription {
        match self.mode {
            FilterMode::Preset => PipelineDescription::from_params(&self.resolve_preset().parameters()),
            FilterMode::Custom => PipelineDescription::from_params(&self.custom),
        }
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            mode: self.mode,
            active_preset_id: self.active_preset_id.clone(),
            custom: self.custom,
        }
    }

    fn resolve_preset(&self) -> &'static Preset {
        match self.active_preset_id.as_deref() {
            Some(id) => self.catalog.lookup_or_default(id),
            None => self.catalog.default_preset(),
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let pipeline = self.current_pipeline();
        for observer in &mut self.observers {
            observer.pipeline_changed(&pipeline);
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterState")
            .field("mode", &self.mode)
            .field("active_preset_id", &self.active_preset_id)
            .field("custom", &self.custom)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_initial_state_is_basic_preset() {
        let state = FilterState::new();
        assert_eq!(state.mode(), FilterMode::Preset);
        assert_eq!(state.active_preset_id(), Some("Basic"));
        assert_eq!(*state.custom_parameters(), FilterParams::CUSTOM_DEFAULTS);
    }

    #[test]
    fn test_select_alias_stores_canonical_id() {
        let mut state = FilterState::new();
        state.select_preset("aesthetic-dreamy").unwrap();
        assert_eq!(state.active_preset_id(), Some("Dreamy"));
    }

    #[test]
    fn test_set_parameter_keeps_active_preset_id() {
        let mut state = FilterState::new();
        state.select_preset("Dark").unwrap();
        state.set_parameter(ParameterId::Contrast, 2.0);
        assert_eq!(state.mode(), FilterMode::Custom);
        assert_eq!(state.active_preset_id(), Some("Dark"));
        assert!(state.active_preset().is_none());
    }

    #[test]
    fn test_set_parameter_by_name_rejects_unknown() {
        let mut state = FilterState::new();
        let before = state.snapshot();
        let err = state.set_parameter_by_name("opacity", 0.5).unwrap_err();
        assert_eq!(err, FilterError::InvalidParameter("opacity".to_string()));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_observers_see_each_successful_mutation() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut state = FilterState::new();
        state.subscribe(move |p: &PipelineDescription| {
            sink.lock().unwrap().push(p.value(ParameterId::Blur));
        });

        state.set_parameter(ParameterId::Blur, 3.0);
        assert!(state.select_preset("missing").is_err());
        state.select_preset("Dreamy").unwrap();
        state.reset_to_defaults();

        assert_eq!(*seen.lock().unwrap(), vec![3.0, 0.5, 0.0]);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut state = FilterState::new();
        state.set_parameter(ParameterId::HueRotate, 30.0);
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["mode"], "Custom");
        assert_eq!(json["activePresetId"], "Basic");
        assert_eq!(json["custom"]["hueRotate"], 30.0);
    }

    #[test]
    fn test_custom_values_survive_preset_round_trip() {
        let mut state = FilterState::new();
        state.set_parameter(ParameterId::Sepia, 0.9);
        state.select_preset("Cold").unwrap();
        state.set_parameter(ParameterId::Blur, 1.0);

        let pipeline = state.current_pipeline();
        assert_eq!(pipeline.value(ParameterId::Sepia), 0.9);
        assert_eq!(pipeline.value(ParameterId::Blur), 1.0);
        assert_eq!(pipeline.value(ParameterId::Contrast), 1.4);
    }
}
