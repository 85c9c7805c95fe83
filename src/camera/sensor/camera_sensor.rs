use crate::camera::common::error::Result;
use crate::camera::image::{Image, RgbPixel};
use crate::camera::sensor::types::SensorData;

/// The capture surface a processing pipeline drives.
pub trait CameraSensor {
    /// Width in pixels of the full sensor.
    fn sensor_width(&self) -> usize;

    /// Height in pixels of the full sensor.
    fn sensor_height(&self) -> usize;

    /// Focal distance of the active plane.
    fn focal_plane(&self) -> f32;

    /// Smallest focal distance in the stack. May equal the maximum when the
    /// scene has a single plane.
    fn min_focal_plane(&self) -> f32;

    /// Largest focal distance in the stack.
    fn max_focal_plane(&self) -> f32;

    /// Activates the plane nearest to `focal_plane`. Targets outside the
    /// stack land on the nearest end; equidistant planes resolve to the lower
    /// index.
    fn set_focal_plane(&mut self, focal_plane: f32);

    /// With the lens cap on, live pixels read as a dark frame. Dark frames
    /// still carry noise and defects.
    fn set_lens_cap(&mut self, lens_cap: bool);

    fn lens_cap(&self) -> bool;

    /// Sets the magnitude of uniform noise added to every live pixel.
    fn set_noise_magnitude(&mut self, magnitude: f32);

    fn noise_magnitude(&self) -> f32;

    /// Raw output for the crop window at (`left`, `top`) of size
    /// `width x height`, with defects and fresh noise applied.
    fn get_sensor_data(
        &mut self,
        left: usize,
        top: usize,
        width: usize,
        height: usize,
    ) -> Result<SensorData>;

    /// The same crop captured once per focal plane, in plane order. The
    /// active plane is unchanged afterwards.
    fn get_burst_sensor_data(
        &mut self,
        left: usize,
        top: usize,
        width: usize,
        height: usize,
    ) -> Result<Vec<SensorData>>;

    /// Crop of the active plane's defect-free reference image.
    fn get_perfect_image(
        &self,
        left: usize,
        top: usize,
        width: usize,
        height: usize,
    ) -> Result<Image<RgbPixel>>;
}
