//! Sensor simulation module
//!
//! Scene loading, the defect model and the stateful simulator that produces
//! raw sensor readings.

mod binary_scene_reader;
mod camera_sensor;
pub mod config;
mod defects;
mod reader;
mod simulator;
mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use binary_scene_reader::{BinarySceneReader, encode_scene};
pub use camera_sensor::CameraSensor;
pub use config::{SensorConfig, SensorConfigBuilder};
pub use defects::DefectModel;
pub use reader::SceneReader;
pub use simulator::SensorSimulator;
pub use store::SensorStore;
pub(crate) use store::read_scene_file;
pub use types::{FocalPlane, SensorData, SensorOptions, pack_burst};
