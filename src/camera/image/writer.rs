use std::io::Write;

use tracing::debug;

use crate::camera::common::error::Result;
use crate::camera::image::bmp::encode_bmp;
use crate::camera::image::{Image, RgbPixel};

pub trait ImageWriter {
    fn write_image(&self, image: &Image<RgbPixel>, output: &mut dyn Write) -> Result<()>;
}

/// Writes finished pictures as 24-bit bitmaps.
pub struct BmpWriter;

impl ImageWriter for BmpWriter {
    fn write_image(&self, image: &Image<RgbPixel>, output: &mut dyn Write) -> Result<()> {
        debug!("Writing {}x{} bitmap", image.width(), image.height());
        encode_bmp(image, output)
    }
}
