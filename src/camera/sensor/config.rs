//! Sensor simulator configuration types

/// Noise magnitude applied after loading a scene, regardless of the file.
pub const DEFAULT_NOISE_MAGNITUDE: f32 = 0.05;

/// Seed for defect placement. Fixed so layouts match across runs.
pub const DEFAULT_DEFECT_SEED: u64 = 0;

/// Configuration for a [`SensorSimulator`](super::SensorSimulator)
#[derive(Debug, Clone)]
pub struct SensorConfig {
    /// Noise magnitude the sensor starts with
    pub noise_magnitude: f32,
    /// Whether the lens cap starts engaged
    pub lens_cap: bool,
    /// Seed for the dead pixel and bright line layout
    pub defect_seed: u64,
    /// Whether crop windows outside the sensor are rejected (true) or
    /// clipped, reading 0 outside the sensor (false)
    pub validate_crop: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            noise_magnitude: DEFAULT_NOISE_MAGNITUDE,
            lens_cap: false,
            defect_seed: DEFAULT_DEFECT_SEED,
            validate_crop: true,
        }
    }
}

impl SensorConfig {
    pub fn builder() -> SensorConfigBuilder {
        SensorConfigBuilder::default()
    }
}

/// Builder for SensorConfig
#[derive(Default)]
pub struct SensorConfigBuilder {
    noise_magnitude: Option<f32>,
    lens_cap: Option<bool>,
    defect_seed: Option<u64>,
    validate_crop: Option<bool>,
}

impl SensorConfigBuilder {
    pub fn noise_magnitude(mut self, magnitude: f32) -> Self {
        self.noise_magnitude = Some(magnitude);
        self
    }

    pub fn lens_cap(mut self, lens_cap: bool) -> Self {
        self.lens_cap = Some(lens_cap);
        self
    }

    pub fn defect_seed(mut self, seed: u64) -> Self {
        self.defect_seed = Some(seed);
        self
    }

    pub fn validate_crop(mut self, validate: bool) -> Self {
        self.validate_crop = Some(validate);
        self
    }

    pub fn build(self) -> SensorConfig {
        let default = SensorConfig::default();
        SensorConfig {
            noise_magnitude: self.noise_magnitude.unwrap_or(default.noise_magnitude),
            lens_cap: self.lens_cap.unwrap_or(default.lens_cap),
            defect_seed: self.defect_seed.unwrap_or(default.defect_seed),
            validate_crop: self.validate_crop.unwrap_or(default.validate_crop),
        }
    }
}
