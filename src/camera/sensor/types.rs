//! Sensor data types

use crate::camera::image::{Image, RgbPixel};

/// Raw single-channel intensities for one crop of sensor output.
///
/// Values are nominally in `[0, 1]`; the simulator clamps everything it emits.
/// Row 0 is the top row.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorData {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl SensorData {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Width of the crop, not necessarily of the sensor.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the crop, not necessarily of the sensor.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.width + col] = value;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Packs a burst into one contiguous buffer indexed `[plane][row][col]`
/// (column fastest), the layout accelerator backends consume.
pub fn pack_burst(burst: &[SensorData]) -> Vec<f32> {
    let total = burst.iter().map(|d| d.as_slice().len()).sum();
    let mut packed = Vec::with_capacity(total);
    for data in burst {
        packed.extend_from_slice(data.as_slice());
    }
    packed
}

/// Defect and noise settings stored at the end of a scene file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorOptions {
    /// Intensity every dead pixel reports.
    pub dead_pixel_value: f32,
    /// Lower bound of the bright-line gain range.
    pub row_gain_min: f32,
    /// Upper bound of the bright-line gain range.
    pub row_gain_max: f32,
    /// Noise magnitude; replaced by the configured value after loading.
    pub noise_magnitude: f32,
}

impl SensorOptions {
    /// Size of the on-disk record: four little-endian `f32`.
    pub const ENCODED_LEN: usize = 16;

    pub fn from_le_bytes(bytes: [u8; SensorOptions::ENCODED_LEN]) -> Self {
        let field = |i: usize| {
            f32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
        };
        Self {
            dead_pixel_value: field(0),
            row_gain_min: field(4),
            row_gain_max: field(8),
            noise_magnitude: field(12),
        }
    }

    pub fn to_le_bytes(&self) -> [u8; SensorOptions::ENCODED_LEN] {
        let mut bytes = [0u8; SensorOptions::ENCODED_LEN];
        bytes[0..4].copy_from_slice(&self.dead_pixel_value.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.row_gain_min.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.row_gain_max.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.noise_magnitude.to_le_bytes());
        bytes
    }
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self {
            dead_pixel_value: 10000.0,
            row_gain_min: 0.0,
            row_gain_max: 0.0,
            noise_magnitude: 0.0,
        }
    }
}

/// Borrowed view of one plane in a [`SensorStore`](super::SensorStore).
#[derive(Debug, Clone, Copy)]
pub struct FocalPlane<'a> {
    /// Focus distance this plane was captured at.
    pub focal_distance: f32,
    /// Raw intensities, row-major, `width * height` long.
    pub raw: &'a [f32],
    /// Defect-free ground truth for this plane.
    pub reference: &'a Image<RgbPixel>,
}
