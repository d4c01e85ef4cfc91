//! Filter model — parameters, presets, session state, and the pipeline they produce.

pub mod catalog;
pub mod params;
pub mod pipeline;
pub mod state;
