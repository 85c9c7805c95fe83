use crate::camera::common::error::Result;
use crate::camera::image::{Image, RgbPixel};
use crate::camera::sensor::CameraSensor;

/// A swappable processing pipeline: choose a focus, then turn raw sensor
/// output into a finished image.
pub trait CameraPipeline {
    /// Picks a focal plane using data from `sensor`. May do nothing.
    fn auto_focus(&mut self, sensor: &mut dyn CameraSensor) -> Result<()>;

    /// Captures and processes a shot into an RGB image with channels in
    /// `[0, 255]`.
    fn process_shot(&self, sensor: &mut dyn CameraSensor) -> Result<Image<RgbPixel>>;

    /// Focus, then process.
    fn take_picture(&mut self, sensor: &mut dyn CameraSensor) -> Result<Image<RgbPixel>> {
        self.auto_focus(sensor)?;
        self.process_shot(sensor)
    }
}
