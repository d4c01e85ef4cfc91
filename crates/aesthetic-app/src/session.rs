//! Per-connection editing session.
//!
//! Owns the one [`FilterState`] and translates UI messages into core calls.
//! Filter changes are handled inline; image decoding, previews and exports
//! are spawned so the session keeps accepting filter changes while they run.

use std::path::PathBuf;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio::sync::mpsc;

use aesthetic_core::{EXPORT_MIME, FilterState, PipelineDescription, export_file_name};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::export;
use crate::image_loader;
use crate::image_slot::ImageSlot;
use crate::ipc::{AppToUi, PresetInfo, UiToApp};
use crate::notify::Notification;

/// Sender side of the outbound UI queue.
pub type Outbound = mpsc::UnboundedSender<AppToUi>;

pub struct Session {
    state: FilterState,
    images: Arc<ImageSlot>,
    config: AppConfig,
    outbound: Outbound,
}

impl Session {
    pub fn new(config: AppConfig, outbound: Outbound) -> Self {
        let mut state = FilterState::new();

        let tx = outbound.clone();
        state.subscribe(move |pipeline: &PipelineDescription| {
            let _ = tx.send(AppToUi::PipelineChanged {
                pipeline: *pipeline,
                css: pipeline.to_css(),
            });
        });

        Self {
            state,
            images: Arc::new(ImageSlot::new()),
            config,
            outbound,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Handle one UI message.
    pub fn dispatch(&mut self, msg: UiToApp) {
        match msg {
            UiToApp::RequestState => self.send_initialize(),
            UiToApp::SelectPreset { id } => match self.state.select_preset(&id) {
                Ok(()) => self.send_state(),
                Err(e) => {
                    tracing::warn!("{e}");
                    self.notify_error(&e.into());
                }
            },
            UiToApp::SetParameter { param, value } => {
                if let Err(e) = self.state.set_parameter_by_name(&param, value) {
                    tracing::warn!("{e}");
                    self.notify_error(&e.into());
                }
            }
            UiToApp::ResetToDefaults => {
                self.state.reset_to_defaults();
                self.send_state();
            }
            UiToApp::LoadImage { mime, data } => self.spawn_upload(mime, data),
            UiToApp::RequestPreview => self.spawn_preview(),
            UiToApp::Export => self.spawn_export(),
        }
    }

    /// Load an image from disk in the background.
    pub fn load_file(&self, path: PathBuf) {
        let images = Arc::clone(&self.images);
        let outbound = self.outbound.clone();
        let max_bytes = self.config.max_upload_bytes;

        tokio::spawn(async move {
            let label = path.display().to_string();
            let result = image_loader::load_file(path, max_bytes).await;
            finish_load(&images, &outbound, result, &label);
        });
    }

    fn spawn_upload(&self, mime: Option<String>, data: String) {
        let images = Arc::clone(&self.images);
        let outbound = self.outbound.clone();
        let max_bytes = self.config.max_upload_bytes;

        tokio::spawn(async move {
            let result = image_loader::load_upload(mime, data, max_bytes).await;
            finish_load(&images, &outbound, result, "upload");
        });
    }

    fn spawn_preview(&self) {
        let Some(current) = self.images.current() else {
            self.notify_error(&AppError::NoImage);
            return;
        };
        let pipeline = self.state.current_pipeline();
        let max_dim = self.config.preview_max_dim;
        let outbound = self.outbound.clone();

        tokio::spawn(async move {
            match export::preview_png(current.image, pipeline, max_dim).await {
                Ok(preview) => {
                    let _ = outbound.send(AppToUi::PreviewReady {
                        width: preview.width,
                        height: preview.height,
                        data: BASE64.encode(&preview.png),
                    });
                }
                Err(e) => {
                    tracing::error!("Preview failed: {e}");
                    let _ = outbound.send(AppToUi::Notification(Notification::from(&e)));
                }
            }
        });
    }

    /// Pipeline and file name are captured now; the render uses them even if
    /// the filter changes before it finishes.
    fn spawn_export(&self) {
        let Some(current) = self.images.current() else {
            self.notify_error(&AppError::NoImage);
            return;
        };
        let pipeline = self.state.current_pipeline();
        let file_name = export_file_name(&self.state);
        let outbound = self.outbound.clone();

        tokio::spawn(async move {
            match export::export_png(current.image, pipeline).await {
                Ok(export) => {
                    tracing::info!(
                        "Export written: {file_name} ({}x{}, {} bytes)",
                        export.width,
                        export.height,
                        export.png.len()
                    );
                    let _ = outbound.send(AppToUi::ExportReady {
                        file_name: file_name.clone(),
                        mime: EXPORT_MIME.to_string(),
                        data: BASE64.encode(&export.png),
                    });
                    let _ = outbound.send(AppToUi::Notification(Notification::info(format!(
                        "Downloaded {file_name}"
                    ))));
                }
                Err(e) => {
                    tracing::error!("Export failed: {e}");
                    let _ = outbound.send(AppToUi::Notification(Notification::from(&e)));
                }
            }
        });
    }

    fn send_initialize(&self) {
        let pipeline = self.state.current_pipeline();
        let presets = self
            .state
            .catalog()
            .list_all()
            .iter()
            .map(PresetInfo::from)
            .collect();
        self.send(AppToUi::Initialize {
            presets,
            state: self.state.snapshot(),
            pipeline,
            css: pipeline.to_css(),
        });

        if let Some(current) = self.images.current() {
            self.send(AppToUi::ImageLoaded {
                width: current.image.width,
                height: current.image.height,
                generation: current.generation,
            });
        }
    }

    fn send_state(&self) {
        self.send(AppToUi::StateSynced {
            state: self.state.snapshot(),
        });
    }

    /// Queue a toast for the UI.
    pub fn send_notification(&self, notification: Notification) {
        self.send(AppToUi::Notification(notification));
    }

    fn notify_error(&self, err: &AppError) {
        self.send_notification(Notification::from(err));
    }

    fn send(&self, msg: AppToUi) {
        if self.outbound.send(msg).is_err() {
            tracing::debug!("UI channel closed, dropping message");
        }
    }
}

/// Store a finished load in the slot and tell the UI, or report the failure.
fn finish_load(
    images: &ImageSlot,
    outbound: &Outbound,
    result: Result<aesthetic_core::FilterImage, AppError>,
    label: &str,
) {
    match result {
        Ok(image) => {
            let loaded = images.store(image);
            tracing::info!(
                "Image loaded: {label} ({}x{}, generation {})",
                loaded.image.width,
                loaded.image.height,
                loaded.generation
            );
            let _ = outbound.send(AppToUi::ImageLoaded {
                width: loaded.image.width,
                height: loaded.image.height,
                generation: loaded.generation,
            });
        }
        Err(e) => {
            tracing::error!("Failed to load image {label}: {e}");
            let _ = outbound.send(AppToUi::Notification(Notification::from(&e)));
        }
    }
}
