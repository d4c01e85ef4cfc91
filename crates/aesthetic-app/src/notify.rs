//! Transient user-facing notifications.

use serde::{Deserialize, Serialize};

use aesthetic_core::FilterError;

use crate::error::AppError;

/// Visual treatment of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A short, non-blocking message for the UI to toast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&AppError> for Notification {
    fn from(err: &AppError) -> Self {
        let message = match err {
            AppError::Filter(FilterError::UnsupportedMediaType(_)) | AppError::Decode(_) => {
                "Please select a valid image file.".to_string()
            }
            AppError::NoImage => "Please upload an image first.".to_string(),
            AppError::TooLarge { limit, .. } => {
                format!("That image is too large (limit {} MB).", limit / (1024 * 1024))
            }
            AppError::Filter(FilterError::ExportFailed(_)) => {
                "The image could not be exported. Please try again.".to_string()
            }
            other => format!("Something went wrong: {other}"),
        };
        Self::error(message)
    }
}
