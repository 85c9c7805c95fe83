//! Stateful sensor simulator.
//!
//! Wraps a [`SensorStore`] and turns its raw focal stack into realistic sensor
//! readings. Each live output pixel is built in a fixed order:
//!
//! 1. dead pixels report the sentinel value and nothing else applies
//! 2. base value is 0 under the lens cap, otherwise the raw sample
//! 3. the row's bright line gain is added
//! 4. uniform noise in `[-0.5, 0.5) * noise_magnitude` is added
//! 5. the result is clamped to `[0, 1]`, with NaN saturating to 1

use tracing::{debug, instrument};

use crate::camera::common::error::{Result, SensorError};
use crate::camera::common::random::{EntropyRandom, RandomSource, SeededRandom};
use crate::camera::image::{Image, RgbPixel};
use crate::camera::sensor::camera_sensor::CameraSensor;
use crate::camera::sensor::config::SensorConfig;
use crate::camera::sensor::defects::DefectModel;
use crate::camera::sensor::store::SensorStore;
use crate::camera::sensor::types::{FocalPlane, SensorData, SensorOptions};

pub struct SensorSimulator<N: RandomSource = EntropyRandom> {
    store: SensorStore,
    options: SensorOptions,
    defects: DefectModel,
    noise: N,
    validate_crop: bool,
    min_focal_plane: f32,
    max_focal_plane: f32,
    lens_cap: bool,
    active_plane: usize,
}

impl SensorSimulator<EntropyRandom> {
    /// Builds a simulator whose noise is drawn from OS entropy.
    pub fn new(store: SensorStore, config: SensorConfig) -> Self {
        Self::with_noise_source(store, config, EntropyRandom::new())
    }
}

impl<N: RandomSource> SensorSimulator<N> {
    pub fn with_noise_source(store: SensorStore, config: SensorConfig, noise: N) -> Self {
        let options = SensorOptions {
            noise_magnitude: config.noise_magnitude,
            ..*store.options()
        };

        let (min_focal_plane, max_focal_plane) = store.planes().fold(
            (f32::INFINITY, f32::NEG_INFINITY),
            |(lo, hi), plane| (lo.min(plane.focal_distance), hi.max(plane.focal_distance)),
        );

        let mut defect_rng = SeededRandom::new(config.defect_seed);
        let defects = DefectModel::generate(
            store.width(),
            store.height(),
            options.row_gain_min,
            options.row_gain_max,
            &mut defect_rng,
        );

        debug!(
            "Sensor ready: {}x{}, focal range [{}, {}], noise {}",
            store.width(),
            store.height(),
            min_focal_plane,
            max_focal_plane,
            options.noise_magnitude
        );

        Self {
            store,
            options,
            defects,
            noise,
            validate_crop: config.validate_crop,
            min_focal_plane,
            max_focal_plane,
            lens_cap: config.lens_cap,
            active_plane: 0,
        }
    }

    pub fn store(&self) -> &SensorStore {
        &self.store
    }

    pub fn defects(&self) -> &DefectModel {
        &self.defects
    }

    pub fn options(&self) -> &SensorOptions {
        &self.options
    }

    pub fn plane_count(&self) -> usize {
        self.store.plane_count()
    }

    pub fn active_plane_index(&self) -> usize {
        self.active_plane
    }

    fn active(&self) -> FocalPlane<'_> {
        self.store
            .plane(self.active_plane)
            .unwrap_or_else(|| unreachable!("active plane {} out of range", self.active_plane))
    }

    fn check_crop(&self, left: usize, top: usize, width: usize, height: usize) -> Result<()> {
        if !self.validate_crop {
            return Ok(());
        }
        let fits = |origin: usize, len: usize, limit: usize| {
            origin.checked_add(len).is_some_and(|end| end <= limit)
        };
        if fits(left, width, self.store.width()) && fits(top, height, self.store.height()) {
            return Ok(());
        }
        Err(SensorError::CropOutOfRange {
            left,
            top,
            width,
            height,
            sensor_width: self.store.width(),
            sensor_height: self.store.height(),
        })
    }
}

/// Clamps to `[0, 1]`. NaN saturates to full scale.
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(0.0, 1.0)
}

/// Raw sample at sensor coordinates, 0 outside the sensor.
fn raw_at(raw: &[f32], sensor_width: usize, row: usize, col: usize) -> f32 {
    if col >= sensor_width {
        return 0.0;
    }
    row.checked_mul(sensor_width)
        .and_then(|start| start.checked_add(col))
        .and_then(|index| raw.get(index))
        .copied()
        .unwrap_or(0.0)
}

impl<N: RandomSource> CameraSensor for SensorSimulator<N> {
    fn sensor_width(&self) -> usize {
        self.store.width()
    }

    fn sensor_height(&self) -> usize {
        self.store.height()
    }

    fn focal_plane(&self) -> f32 {
        self.active().focal_distance
    }

    fn min_focal_plane(&self) -> f32 {
        self.min_focal_plane
    }

    fn max_focal_plane(&self) -> f32 {
        self.max_focal_plane
    }

    fn set_focal_plane(&mut self, focal_plane: f32) {
        let mut best = 0;
        let mut best_distance = f32::INFINITY;
        for (i, plane) in self.store.planes().enumerate() {
            let distance = (plane.focal_distance - focal_plane).abs();
            // strict comparison keeps the lowest index on ties
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        debug!(
            "Focal plane {} requested, plane {} selected",
            focal_plane, best
        );
        self.active_plane = best;
    }

    fn set_lens_cap(&mut self, lens_cap: bool) {
        self.lens_cap = lens_cap;
    }

    fn lens_cap(&self) -> bool {
        self.lens_cap
    }

    fn set_noise_magnitude(&mut self, magnitude: f32) {
        self.options.noise_magnitude = magnitude;
    }

    fn noise_magnitude(&self) -> f32 {
        self.options.noise_magnitude
    }

    fn get_sensor_data(
        &mut self,
        left: usize,
        top: usize,
        width: usize,
        height: usize,
    ) -> Result<SensorData> {
        self.check_crop(left, top, width, height)?;
        debug!(
            left,
            top,
            width,
            height,
            plane = self.active_plane,
            lens_cap = self.lens_cap,
            "Synthesizing sensor data"
        );

        // every shot gets its own noise
        self.noise.reseed();

        let mut data = SensorData::new(width, height);
        let sensor_width = self.store.width();
        let raw = self
            .store
            .plane(self.active_plane)
            .map(|plane| plane.raw)
            .unwrap_or_default();
        let noise_magnitude = self.options.noise_magnitude;
        for row in 0..height {
            let gain = self.defects.row_gain(row);
            for col in 0..width {
                if self.defects.is_dead(row, col) {
                    data.set(row, col, self.options.dead_pixel_value);
                    continue;
                }
                let base = if self.lens_cap {
                    0.0
                } else {
                    raw_at(raw, sensor_width, top.saturating_add(row), left.saturating_add(col))
                };
                let noise = noise_magnitude * self.noise.uniform_f32(-0.5, 0.5);
                data.set(row, col, clamp_unit(base + gain + noise));
            }
        }
        Ok(data)
    }

    #[instrument(skip(self))]
    fn get_burst_sensor_data(
        &mut self,
        left: usize,
        top: usize,
        width: usize,
        height: usize,
    ) -> Result<Vec<SensorData>> {
        let saved = self.active_plane;
        let burst = (0..self.store.plane_count())
            .map(|plane| {
                self.active_plane = plane;
                self.get_sensor_data(left, top, width, height)
            })
            .collect::<Result<Vec<_>>>();
        self.active_plane = saved;
        burst
    }

    fn get_perfect_image(
        &self,
        left: usize,
        top: usize,
        width: usize,
        height: usize,
    ) -> Result<Image<RgbPixel>> {
        self.check_crop(left, top, width, height)?;
        let reference = self.active().reference;
        let fits = left.checked_add(width).is_some_and(|end| end <= reference.width())
            && top.checked_add(height).is_some_and(|end| end <= reference.height());
        if fits {
            return Ok(reference.crop(left, top, width, height));
        }

        let mut image = Image::new(width, height);
        for row in 0..height {
            for col in 0..width {
                let (src_row, src_col) = (top.saturating_add(row), left.saturating_add(col));
                if src_row < reference.height() && src_col < reference.width() {
                    image[(row, col)] = reference[(src_row, src_col)];
                }
            }
        }
        Ok(image)
    }
}
