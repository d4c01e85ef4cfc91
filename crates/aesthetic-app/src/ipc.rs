//! IPC message contracts between the session and the web UI.
//!
//! Both directions use `#[serde(tag = "type", content = "data")]` so the UI
//! can switch on `type` and read the payload from `data`.

use serde::{Deserialize, Serialize};

use aesthetic_core::{FilterSnapshot, PipelineDescription, Preset};

use crate::notify::Notification;

/// A preset button as the UI renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetInfo {
    pub id: String,
    pub alias: String,
    pub display_name: String,
    /// CSS `filter` value for hover previews.
    pub css: String,
}

impl From<&Preset> for PresetInfo {
    fn from(preset: &Preset) -> Self {
        Self {
            id: preset.id.to_string(),
            alias: preset.alias.to_string(),
            display_name: preset.display_name.to_string(),
            css: PipelineDescription::from_params(&preset.parameters()).to_css(),
        }
    }
}

/// Messages from the session to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AppToUi {
    /// Full state sync when the UI connects.
    Initialize {
        /// Presets in display order.
        presets: Vec<PresetInfo>,
        /// Mode, active preset and slider values.
        state: FilterSnapshot,
        /// Pipeline for the current state.
        pipeline: PipelineDescription,
        /// Same pipeline as a CSS `filter` value.
        css: String,
    },

    /// The pipeline was recomputed after a mutation.
    PipelineChanged {
        pipeline: PipelineDescription,
        css: String,
    },

    /// Mode, active preset or slider positions changed in a way the UI did
    /// not initiate itself (preset click highlight, reset).
    StateSynced { state: FilterSnapshot },

    /// A new image became current.
    ImageLoaded {
        width: u32,
        height: u32,
        /// Increases with every image stored in the slot.
        generation: u64,
    },

    /// Server-rendered preview, base64 PNG.
    PreviewReady { width: u32, height: u32, data: String },

    /// Filtered export ready for download, base64 PNG.
    ExportReady {
        file_name: String,
        mime: String,
        data: String,
    },

    /// Transient toast.
    Notification(Notification),
}

/// Messages from the UI to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToApp {
    /// Request a fresh snapshot after connecting.
    RequestState,

    /// A preset button was clicked.
    SelectPreset { id: String },

    /// A slider moved. `param` is the slider name (`hueRotate`, `blur`, ...).
    SetParameter { param: String, value: f32 },

    /// The reset button was clicked.
    ResetToDefaults,

    /// A file was picked or dropped.
    LoadImage {
        /// MIME type reported by the browser, if any.
        #[serde(default)]
        mime: Option<String>,
        /// Base64 bytes or a `data:` URL.
        data: String,
    },

    /// Render a downscaled preview of the current image.
    RequestPreview,

    /// The download button was clicked.
    Export,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_parameter_parses_from_ui_json() {
        let json = r#"{"type":"SetParameter","data":{"param":"hueRotate","value":-12.5}}"#;
        match serde_json::from_str::<UiToApp>(json).unwrap() {
            UiToApp::SetParameter { param, value } => {
                assert_eq!(param, "hueRotate");
                assert_eq!(value, -12.5);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_unit_variant_parses_without_data() {
        let msg: UiToApp = serde_json::from_str(r#"{"type":"Export"}"#).unwrap();
        assert!(matches!(msg, UiToApp::Export));
    }

    #[test]
    fn test_load_image_mime_is_optional() {
        let json = r#"{"type":"LoadImage","data":{"data":"AAAA"}}"#;
        let msg: UiToApp = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, UiToApp::LoadImage { mime: None, .. }));
    }

    #[test]
    fn test_preset_info_carries_css() {
        let preset = aesthetic_core::FilterCatalog::builtin()
            .lookup("Vintage")
            .unwrap();
        let info = PresetInfo::from(preset);
        assert_eq!(info.display_name, "Vintage");
        assert_eq!(
            info.css,
            "contrast(1.3) saturate(0.6) brightness(0.85) sepia(0.2) hue-rotate(-15deg) blur(0px)"
        );
    }
}
