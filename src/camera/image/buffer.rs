//! Owned two-dimensional pixel buffer

use std::ops::{Index, IndexMut};

use crate::camera::common::error::{Result, SensorError};
use crate::camera::image::pixel::{Pixel, RgbPixel};

/// Dense `width x height` grid of pixels, row-major with row 0 at the top.
///
/// The buffer is move-only; `clone()` is the explicit deep copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<P: Pixel> {
    width: usize,
    height: usize,
    pixels: Vec<P>,
}

impl<P: Pixel> Image<P> {
    /// Allocates an image filled with default (zero) pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![P::default(); width * height],
        }
    }

    /// Wraps an existing row-major pixel vector.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<P>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(SensorError::InvalidDimensions(width, height));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    /// Borrows row `row` as a slice of `width` pixels.
    pub fn row(&self, row: usize) -> &[P] {
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Raises every channel of every pixel to `gamma`, in place.
    pub fn gamma_correct(&mut self, gamma: f32) {
        for pixel in &mut self.pixels {
            *pixel = pixel.powf(gamma);
        }
    }

    /// Copies the window starting at (`top`, `left`) into a new image.
    ///
    /// The caller guarantees the window lies inside this image.
    pub fn crop(&self, left: usize, top: usize, width: usize, height: usize) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for row in top..top + height {
            let start = row * self.width + left;
            pixels.extend_from_slice(&self.pixels[start..start + width]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }
}

impl<P: Pixel> Index<(usize, usize)> for Image<P> {
    type Output = P;

    fn index(&self, (row, col): (usize, usize)) -> &P {
        &self.pixels[row * self.width + col]
    }
}

impl<P: Pixel> IndexMut<(usize, usize)> for Image<P> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut P {
        &mut self.pixels[row * self.width + col]
    }
}

impl Image<RgbPixel> {
    /// Builds an RGB image from channel-planar samples: all R values, then
    /// all G, then all B, each plane `width * height` long and row-major.
    pub fn from_planar_rgb(width: usize, height: usize, samples: &[f32]) -> Result<Self> {
        let stride = width * height;
        if samples.len() != stride * 3 {
            return Err(SensorError::InvalidDimensions(width, height));
        }
        let (reds, rest) = samples.split_at(stride);
        let (greens, blues) = rest.split_at(stride);
        let pixels = reds
            .iter()
            .zip(greens)
            .zip(blues)
            .map(|((&r, &g), &b)| RgbPixel::new(r, g, b))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Inverse of [`Image::from_planar_rgb`].
    pub fn to_planar_rgb(&self) -> Vec<f32> {
        let stride = self.pixels.len();
        let mut samples = vec![0.0; stride * 3];
        for (i, pixel) in self.pixels.iter().enumerate() {
            samples[i] = pixel.r;
            samples[i + stride] = pixel.g;
            samples[i + 2 * stride] = pixel.b;
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::image::pixel::FloatPixel;

    #[test]
    fn test_indexing_is_row_major() {
        let mut image = Image::<FloatPixel>::new(3, 2);
        image[(1, 2)] = FloatPixel::new(5.0);
        assert_eq!(image.pixels()[5], FloatPixel::new(5.0));
        assert_eq!(image.row(1)[2], FloatPixel::new(5.0));
    }

    #[test]
    fn test_from_pixels_rejects_wrong_length() {
        let result = Image::from_pixels(2, 2, vec![FloatPixel::new(0.0); 3]);
        assert!(matches!(result, Err(SensorError::InvalidDimensions(2, 2))));
    }

    #[test]
    fn test_gamma_correct() {
        let mut image = Image::from_pixels(
            2,
            1,
            vec![RgbPixel::new(4.0, 9.0, 16.0), RgbPixel::new(1.0, 0.0, 25.0)],
        )
        .unwrap();
        image.gamma_correct(0.5);
        assert_eq!(image[(0, 0)], RgbPixel::new(2.0, 3.0, 4.0));
        assert_eq!(image[(0, 1)], RgbPixel::new(1.0, 0.0, 5.0));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Image::<RgbPixel>::new(2, 2);
        let copy = original.clone();
        original[(0, 0)] = RgbPixel::new(1.0, 1.0, 1.0);
        assert_eq!(copy[(0, 0)], RgbPixel::default());
    }

    #[test]
    fn test_crop() {
        let pixels = (0..12).map(|i| FloatPixel::new(i as f32)).collect();
        let image = Image::from_pixels(4, 3, pixels).unwrap();
        let crop = image.crop(1, 1, 2, 2);
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        let values: Vec<f32> = crop.pixels().iter().map(|p| p.i).collect();
        assert_eq!(values, vec![5.0, 6.0, 9.0, 10.0]);
    }

    #[test]
    fn test_planar_rgb_layout() {
        let samples = [1.0, 2.0, 10.0, 20.0, 100.0, 200.0];
        let image = Image::from_planar_rgb(2, 1, &samples).unwrap();
        assert_eq!(image[(0, 0)], RgbPixel::new(1.0, 10.0, 100.0));
        assert_eq!(image[(0, 1)], RgbPixel::new(2.0, 20.0, 200.0));
        assert_eq!(image.to_planar_rgb(), samples.to_vec());
    }
}
