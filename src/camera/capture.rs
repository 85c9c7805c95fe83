//! Capture orchestration module
//!
//! Runs a scene through the simulated sensor and a processing pipeline, and
//! times each step.

mod session;
mod timing;


pub use session::CaptureSession;
pub use timing::{PipelineTimings, StepTiming, Timer};
