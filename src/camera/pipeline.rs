//! Processing pipeline module
//!
//! The pipeline capability interface and the preview implementation.

mod preview_pipeline;
mod processor;

pub use preview_pipeline::PreviewPipeline;
pub use processor::CameraPipeline;
