//! Async preview and export rendering.
//!
//! Both take a pipeline snapshot and an image handle, so later filter
//! changes or a newly loaded image never affect a render already in flight.

use std::sync::Arc;

use aesthetic_core::{
    CpuRasterizer, FilterImage, ParameterId, PipelineDescription, PipelineRenderer, encode_png,
};

use crate::error::AppError;

/// A finished PNG render.
#[derive(Debug, Clone)]
pub struct RenderedPng {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Render `pipeline` onto `image` at native size and encode it as PNG.
pub async fn export_png(
    image: Arc<FilterImage>,
    pipeline: PipelineDescription,
) -> Result<RenderedPng, AppError> {
    tokio::task::spawn_blocking(move || render_png(&image, &pipeline)).await?
}

/// Downscale to `max_dim`, then render `pipeline` and encode it as PNG.
///
/// The blur radius shrinks with the image so the preview looks like a
/// scaled-down export.
pub async fn preview_png(
    image: Arc<FilterImage>,
    pipeline: PipelineDescription,
    max_dim: u32,
) -> Result<RenderedPng, AppError> {
    tokio::task::spawn_blocking(move || {
        let preview = image.fit_within(max_dim);
        let scale = if image.width == 0 {
            1.0
        } else {
            preview.width as f32 / image.width as f32
        };
        render_png(&preview, &scale_blur(&pipeline, scale))
    })
    .await?
}

/// `pipeline` with its blur radius multiplied by `scale`.
fn scale_blur(pipeline: &PipelineDescription, scale: f32) -> PipelineDescription {
    let mut params = pipeline.params();
    params.set(ParameterId::Blur, pipeline.value(ParameterId::Blur) * scale);
    PipelineDescription::from_params(&params)
}

fn render_png(image: &FilterImage, pipeline: &PipelineDescription) -> Result<RenderedPng, AppError> {
    let rendered = CpuRasterizer.render(image, pipeline);
    let png = encode_png(&rendered)?;
    Ok(RenderedPng {
        width: rendered.width,
        height: rendered.height,
        png,
    })
}
