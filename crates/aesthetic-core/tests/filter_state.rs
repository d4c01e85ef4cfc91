//! Behavioural tests for preset selection, slider tuning and reset.

use aesthetic_core::{
    FilterCatalog, FilterError, FilterMode, FilterParams, FilterState, ParameterId,
    PipelineDescription, Unit, export_file_name,
};

const EPSILON: f32 = 1e-6;

fn assert_pipeline(pipeline: &PipelineDescription, expected: [f32; 6]) {
    for (term, want) in pipeline.terms().iter().zip(expected) {
        assert!(
            (term.value - want).abs() < EPSILON,
            "{}: got {}, expected {}",
            term.id,
            term.value,
            want
        );
    }
}

#[test]
fn every_preset_renders_its_stored_parameters() {
    let catalog = FilterCatalog::builtin();
    let mut state = FilterState::new();

    for preset in catalog.list_all() {
        state.select_preset(preset.id).unwrap();
        assert_eq!(state.mode(), FilterMode::Preset);

        let pipeline = state.current_pipeline();
        let mut expected = FilterParams::NEUTRAL;
        for &(id, value) in preset.overrides {
            expected.set(id, value);
        }
        assert_eq!(pipeline.params(), expected, "preset {}", preset.id);

        let ids: Vec<_> = pipeline.terms().iter().map(|t| t.id).collect();
        assert_eq!(ids, ParameterId::ORDER);
    }
}

#[test]
fn vintage_pipeline_matches_reference() {
    let mut state = FilterState::new();
    state.select_preset("Vintage").unwrap();

    let pipeline = state.current_pipeline();
    assert_pipeline(&pipeline, [1.3, 0.6, 0.85, 0.2, -15.0, 0.0]);
    assert_eq!(
        pipeline.to_css(),
        "contrast(1.3) saturate(0.6) brightness(0.85) sepia(0.2) hue-rotate(-15deg) blur(0px)"
    );
}

#[test]
fn blur_from_defaults_switches_to_custom() {
    let mut state = FilterState::new();
    state.set_parameter(ParameterId::Blur, 2.5);

    assert_eq!(state.mode(), FilterMode::Custom);
    let pipeline = state.current_pipeline();
    assert_pipeline(&pipeline, [1.4, 0.5, 0.8, 0.0, -20.0, 2.5]);

    let blur = pipeline.terms()[5];
    assert_eq!(blur.unit, Unit::Pixel);
    assert_eq!(blur.to_string(), "blur(2.5px)");
}

#[test]
fn unknown_preset_leaves_state_unchanged() {
    let mut state = FilterState::new();
    state.set_parameter(ParameterId::Saturate, 1.7);
    let before = state.snapshot();

    let err = state.select_preset("nonexistent").unwrap_err();
    assert_eq!(err, FilterError::NotFound("nonexistent".to_string()));
    assert_eq!(state.snapshot(), before);
    assert_eq!(state.mode(), FilterMode::Custom);
}

#[test]
fn each_set_parameter_changes_only_its_slot() {
    let mut state = FilterState::new();
    let writes = [
        (ParameterId::HueRotate, 90.0),
        (ParameterId::Contrast, 0.3),
        (ParameterId::Blur, 4.0),
        (ParameterId::Sepia, 1.0),
        (ParameterId::Contrast, 2.2),
        (ParameterId::Brightness, 1.5),
        (ParameterId::Saturate, 0.0),
    ];

    for (id, value) in writes {
        let before = *state.custom_parameters();
        state.set_parameter(id, value);
        let after = *state.custom_parameters();
        for other in ParameterId::ORDER {
            if other == id {
                assert_eq!(after.get(other), value);
            } else {
                assert_eq!(after.get(other), before.get(other), "{other} changed");
            }
        }
    }
}

#[test]
fn set_parameter_forces_custom_even_when_already_custom() {
    let mut state = FilterState::new();
    state.set_parameter(ParameterId::Sepia, 0.5);
    assert_eq!(state.mode(), FilterMode::Custom);
    state.set_parameter(ParameterId::Sepia, 0.6);
    assert_eq!(state.mode(), FilterMode::Custom);
}

#[test]
fn out_of_range_values_pass_through() {
    let mut state = FilterState::new();
    state.set_parameter(ParameterId::Contrast, -5.0);
    state.set_parameter(ParameterId::HueRotate, 720.0);
    let pipeline = state.current_pipeline();
    assert_eq!(pipeline.value(ParameterId::Contrast), -5.0);
    assert_eq!(pipeline.value(ParameterId::HueRotate), 720.0);
}

#[test]
fn reset_is_idempotent() {
    let mut state = FilterState::new();
    state.select_preset("Dark").unwrap();
    state.set_parameter(ParameterId::Blur, 9.0);

    state.reset_to_defaults();
    let once = state.snapshot();
    state.reset_to_defaults();
    assert_eq!(state.snapshot(), once);

    assert_eq!(once.mode, FilterMode::Preset);
    assert_eq!(once.active_preset_id.as_deref(), Some("Basic"));
    assert_eq!(once.custom, FilterParams::CUSTOM_DEFAULTS);
}

#[test]
fn term_order_ignores_mutation_order() {
    let mut state = FilterState::new();
    for id in ParameterId::ORDER.iter().rev() {
        state.set_parameter(*id, 0.25);
    }
    let ids: Vec<_> = state.current_pipeline().terms().iter().map(|t| t.id).collect();
    assert_eq!(ids, ParameterId::ORDER);
}

#[test]
fn pipeline_is_available_before_any_image() {
    let state = FilterState::new();
    assert_pipeline(&state.current_pipeline(), [1.4, 0.5, 0.8, 0.0, -20.0, 0.0]);
}

#[test]
fn custom_export_is_named_personalizado() {
    let mut state = FilterState::new();
    state.set_parameter(ParameterId::Contrast, 1.0);
    assert_eq!(export_file_name(&state), "imagen-aesthetic-personalizado.png");

    state.reset_to_defaults();
    assert_eq!(export_file_name(&state), "imagen-aesthetic-básico.png");
}
