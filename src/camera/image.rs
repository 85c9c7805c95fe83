//! Image container module
//!
//! Pixel sample types, the owned `Image` buffer, its bitmap codec and the
//! writer used to save finished pictures.

pub mod bmp;
mod buffer;
pub mod pixel;
mod writer;

pub use bmp::{decode_bmp, encode_bmp};
pub use buffer::Image;
pub use pixel::{Float3Pixel, FloatPixel, Pixel, RgbPixel, YuvPixel};
pub use writer::{BmpWriter, ImageWriter};
