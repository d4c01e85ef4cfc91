//! Error kinds surfaced by the filter core.

/// Errors produced by catalog lookups, state mutations, decoding and export.
///
/// Every operation that returns one of these leaves [`FilterState`] exactly
/// as it was before the call.
///
/// [`FilterState`]: crate::filter::state::FilterState
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown preset: {0}")]
    NotFound(String),

    #[error("unknown filter parameter: {0}")]
    InvalidParameter(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("export failed: {0}")]
    ExportFailed(String),
}
