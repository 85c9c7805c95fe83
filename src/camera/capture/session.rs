use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::camera::capture::timing::{PipelineTimings, Timer};
use crate::camera::{
    common::error::{Result, SensorError},
    image::{BmpWriter, ImageWriter},
    pipeline::{CameraPipeline, PreviewPipeline},
    sensor::{BinarySceneReader, CameraSensor, SceneReader, SensorConfig, SensorSimulator},
};
use crate::camera::sensor::read_scene_file;

/// Loads a scene, drives a pipeline against the simulated sensor and writes
/// the resulting picture.
pub struct CaptureSession<R: SceneReader, P: CameraPipeline, W: ImageWriter> {
    reader: R,
    pipeline: P,
    writer: W,
    config: SensorConfig,
}

impl CaptureSession<BinarySceneReader, PreviewPipeline, BmpWriter> {
    pub fn new(config: SensorConfig) -> Self {
        Self {
            reader: BinarySceneReader,
            pipeline: PreviewPipeline::new(),
            writer: BmpWriter,
            config,
        }
    }
}

impl<R: SceneReader, P: CameraPipeline, W: ImageWriter> CaptureSession<R, P, W> {
    pub fn with_custom(reader: R, pipeline: P, writer: W, config: SensorConfig) -> Self {
        Self {
            reader,
            pipeline,
            writer,
            config,
        }
    }

    #[instrument(skip(self, scene_data, output), fields(input_size = scene_data.len()))]
    pub fn capture(&mut self, scene_data: &[u8], output: &mut dyn Write) -> Result<PipelineTimings> {
        info!("Starting capture");
        let mut timings = PipelineTimings::new();

        let store = {
            let _span = tracing::info_span!("load_scene").entered();
            let timer = Timer::start("load_scene");
            let store = self.reader.read_scene(scene_data)?;
            timings.record(timer);
            store.report();
            store
        };

        let mut sensor = {
            let _span = tracing::info_span!("init_sensor",
                width = store.width(),
                height = store.height(),
                planes = store.plane_count()
            ).entered();
            let timer = Timer::start("init_sensor");
            let sensor = SensorSimulator::new(store, self.config.clone());
            timings.record(timer);
            sensor
        };

        let image = {
            let _span = tracing::info_span!("take_picture").entered();
            let timer = Timer::start("take_picture");
            let image = self.pipeline.take_picture(&mut sensor)?;
            timings.record(timer);
            image
        };

        {
            let _span = tracing::info_span!("encode_image").entered();
            let timer = Timer::start("encode_image");
            self.writer.write_image(&image, output)?;
            timings.record(timer);
        }

        info!(
            width = image.width(),
            height = image.height(),
            focal_plane = sensor.focal_plane(),
            "Capture complete"
        );
        Ok(timings)
    }

    /// Runs [`CaptureSession::capture`] from a scene file to an image file.
    ///
    /// The output file is only created once a picture has been produced.
    #[instrument(skip(self, scene_path, output_path))]
    pub fn capture_file<S: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        scene_path: S,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let scene_path = scene_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            scene = %scene_path.display(),
            output = %output_path.display(),
            "Capturing from file"
        );

        let scene_data = {
            let _span = tracing::info_span!("read_scene_file").entered();
            read_scene_file(scene_path)?
        };

        let mut encoded = Vec::new();
        let timings = self.capture(&scene_data, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            let mut output_file = std::fs::File::create(output_path).map_err(|e| {
                SensorError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
            output_file.write_all(&encoded)?;
        }

        Ok(timings)
    }
}
