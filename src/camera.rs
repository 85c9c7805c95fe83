//! Camera sensor simulation module
//!
//! This module loads a multi-focal-plane scene, simulates a defective and
//! noisy camera sensor over it, and provides the image container and bitmap
//! codec that processing pipelines use to hand back their results.

pub mod capture;
pub mod common;
pub mod image;
pub mod pipeline;
pub mod sensor;

pub use common::{EntropyRandom, RandomSource, Result, SeededRandom, SensorError};

pub use image::{
    BmpWriter,
    Float3Pixel,
    FloatPixel,
    Image,
    ImageWriter,
    Pixel,
    RgbPixel,
    YuvPixel,
};

pub use sensor::{
    BinarySceneReader,
    CameraSensor,
    DefectModel,
    FocalPlane,
    SceneReader,
    SensorConfig,
    SensorConfigBuilder,
    SensorData,
    SensorOptions,
    SensorSimulator,
    SensorStore,
};

pub use pipeline::{
    CameraPipeline,
    PreviewPipeline,
};

pub use capture::{
    CaptureSession,
    PipelineTimings,
};
