//! Batch orchestration for sceneviz
//!
//! Pairs annotation files with sensor files, builds frames through the
//! schema adapters, accumulates the sequence-wide extent, and renders one
//! raster per frame against that frozen extent.

pub mod batch;
pub mod config;

pub use batch::{BatchPipeline, RunSummary};
pub use config::PipelineConfig;
