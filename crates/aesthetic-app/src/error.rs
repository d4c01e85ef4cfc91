//! Errors raised by the session layer.

use aesthetic_core::FilterError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("upload of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },

    #[error("no image loaded")]
    NoImage,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
