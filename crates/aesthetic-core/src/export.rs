//! PNG encoding and export file naming.

use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::error::FilterError;
use crate::filter::state::FilterState;
use crate::image::FilterImage;

/// Name segment used when the sliders, not a preset, define the look.
pub const CUSTOM_EXPORT_NAME: &str = "personalizado";

/// MIME type of every export.
pub const EXPORT_MIME: &str = "image/png";

/// `imagen-aesthetic-<name>.png`, where `<name>` is the active preset's
/// display name lower-cased, or [`CUSTOM_EXPORT_NAME`] in custom mode.
pub fn export_file_name(state: &FilterState) -> String {
    let name = match state.active_preset() {
        Some(preset) => preset.display_name.to_lowercase(),
        None => CUSTOM_EXPORT_NAME.to_string(),
    };
    format!("imagen-aesthetic-{name}.png")
}

/// Encode an image as 8-bit RGBA PNG at its native dimensions.
pub fn encode_png(image: &FilterImage) -> Result<Vec<u8>, FilterError> {
    if image.width == 0 || image.height == 0 {
        return Err(FilterError::ExportFailed(format!(
            "image has no pixels ({}x{})",
            image.width, image.height
        )));
    }

    let rgba = image.to_rgba8();
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            rgba.as_raw(),
            image.width,
            image.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| FilterError::ExportFailed(e.to_string()))?;
    Ok(out)
}
