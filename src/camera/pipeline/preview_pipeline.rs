//! Starter pipeline that visualizes raw sensor output.
//!
//! No demosaicing, denoising or tone mapping happens here: each raw intensity
//! is scaled to `[0, 255]` and copied into all three channels, giving a gray
//! picture of what the sensor reports.

use tracing::{debug, info};

use crate::camera::common::error::Result;
use crate::camera::image::{Image, RgbPixel};
use crate::camera::pipeline::processor::CameraPipeline;
use crate::camera::sensor::CameraSensor;

/// Raw intensities arrive normalized to `[0, 1]`; output channels span `[0, 255]`.
const OUTPUT_SCALE: f32 = 255.0;

pub struct PreviewPipeline {
    focal_plane: f32,
}

impl PreviewPipeline {
    pub fn new() -> Self {
        Self { focal_plane: 0.0 }
    }

    /// Focuses at `focal_plane` instead of 0.
    pub fn with_focal_plane(focal_plane: f32) -> Self {
        Self { focal_plane }
    }
}

impl Default for PreviewPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraPipeline for PreviewPipeline {
    fn auto_focus(&mut self, sensor: &mut dyn CameraSensor) -> Result<()> {
        sensor.set_focal_plane(self.focal_plane);
        debug!("Focused at {}", sensor.focal_plane());
        Ok(())
    }

    fn process_shot(&self, sensor: &mut dyn CameraSensor) -> Result<Image<RgbPixel>> {
        sensor.set_lens_cap(false);

        let width = sensor.sensor_width();
        let height = sensor.sensor_height();
        let raw = sensor.get_sensor_data(0, 0, width, height)?;
        info!("Processing {}x{} raw frame", width, height);

        let pixels = raw
            .as_slice()
            .iter()
            .map(|&v| {
                let level = v * OUTPUT_SCALE;
                RgbPixel::new(level, level, level)
            })
            .collect();
        Image::from_pixels(width, height, pixels)
    }
}
