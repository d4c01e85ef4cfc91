//! Upload validation and image decoding.
//!
//! Decoding runs on tokio's blocking pool so the session keeps handling
//! filter changes while a large upload is being decoded.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;

use aesthetic_core::{FilterError, FilterImage};

use crate::error::AppError;

/// Split an upload payload into declared MIME type and raw bytes.
///
/// Accepts either plain base64 or a `data:<mime>;base64,<payload>` URL; the
/// MIME type in a data URL wins over `declared`.
pub fn decode_payload(
    declared: Option<String>,
    data: &str,
) -> Result<(Option<String>, Vec<u8>), AppError> {
    let (mime, encoded) = match data.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').unwrap_or(("", rest));
            let mime = header.split(';').next().filter(|m| !m.is_empty());
            (mime.map(str::to_string).or(declared), payload)
        }
        None => (declared, data),
    };
    Ok((mime, BASE64.decode(encoded.trim())?))
}

/// Reject non-image uploads before decoding.
///
/// A declared MIME type outside `image/*` is refused outright; otherwise the
/// content itself must sniff as a known image format.
pub fn sniff_format(declared: Option<&str>, bytes: &[u8]) -> Result<ImageFormat, AppError> {
    if let Some(mime) = declared
        && !mime.starts_with("image/")
    {
        return Err(FilterError::UnsupportedMediaType(mime.to_string()).into());
    }

    image::guess_format(bytes).map_err(|_| {
        let what = declared.unwrap_or("unrecognised content");
        FilterError::UnsupportedMediaType(what.to_string()).into()
    })
}

/// Validate and decode an upload synchronously.
pub fn decode_upload(
    declared: Option<&str>,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<FilterImage, AppError> {
    if bytes.len() > max_bytes {
        return Err(AppError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }

    let format = sniff_format(declared, bytes)?;
    let img = image::load_from_memory_with_format(bytes, format)?;
    tracing::debug!(
        format = format.to_mime_type(),
        width = img.width(),
        height = img.height(),
        "upload decoded"
    );
    Ok(FilterImage::from_dynamic(&img))
}

/// Decode an uploaded payload off the async executor.
pub async fn load_upload(
    declared: Option<String>,
    data: String,
    max_bytes: usize,
) -> Result<FilterImage, AppError> {
    tokio::task::spawn_blocking(move || {
        let (mime, bytes) = decode_payload(declared, &data)?;
        decode_upload(mime.as_deref(), &bytes, max_bytes)
    })
    .await?
}

/// Load an image from disk, e.g. the startup image.
pub async fn load_file(path: PathBuf, max_bytes: usize) -> Result<FilterImage, AppError> {
    tokio::task::spawn_blocking(move || read_file(&path, max_bytes)).await?
}

fn read_file(path: &Path, max_bytes: usize) -> Result<FilterImage, AppError> {
    let bytes = std::fs::read(path)?;
    decode_upload(None, &bytes, max_bytes)
}
