//! Aesthetic Core — filter-state model and pixel pipeline.
//!
//! This crate holds the preset catalog, the per-session filter state, the
//! canonical pipeline description derived from it, and a CPU rasterizer that
//! applies that pipeline to pixel data. No async, no network, no globals
//! beyond the read-only built-in catalog.

pub mod error;
pub mod export;
pub mod filter;
pub mod image;
pub mod render;

// Re-exports for convenience.
pub use error::FilterError;
pub use export::{CUSTOM_EXPORT_NAME, EXPORT_MIME, encode_png, export_file_name};
pub use filter::catalog::{FilterCatalog, Preset};
pub use filter::params::{FilterParameter, FilterParams, ParameterId, Unit};
pub use filter::pipeline::{PipelineDescription, PipelineTerm};
pub use filter::state::{FilterMode, FilterSnapshot, FilterState, PipelineObserver};
pub use crate::image::FilterImage;
pub use render::{CpuRasterizer, PipelineRenderer};
