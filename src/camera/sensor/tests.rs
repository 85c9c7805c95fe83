#[cfg(test)]
mod tests {
    use crate::camera::common::error::SensorError;
    use crate::camera::common::random::{EntropyRandom, RandomSource};
    use crate::camera::image::{Image, RgbPixel};
    use crate::camera::sensor::{
        CameraSensor, SensorConfig, SensorOptions, SensorSimulator, SensorStore,
    };
    use std::cell::Cell;
    use std::rc::Rc;

    const SIZE: usize = 200;
    const DEAD_VALUE: f32 = 10000.0;
    const PLANE_LEVELS: [f32; 3] = [0.2, 0.5, 0.8];

    /// Replays a fixed list of unit samples and counts reseeds.
    struct FixedNoise {
        samples: Vec<f32>,
        next: usize,
        reseeds: Rc<Cell<usize>>,
    }

    impl FixedNoise {
        fn new(samples: Vec<f32>) -> (Self, Rc<Cell<usize>>) {
            let reseeds = Rc::new(Cell::new(0));
            let noise = Self {
                samples,
                next: 0,
                reseeds: reseeds.clone(),
            };
            (noise, reseeds)
        }
    }

    impl RandomSource for FixedNoise {
        fn reseed(&mut self) {
            self.next = 0;
            self.reseeds.set(self.reseeds.get() + 1);
        }

        fn uniform_usize(&mut self, low: usize, _high: usize) -> usize {
            low
        }

        fn uniform_f32(&mut self, low: f32, high: f32) -> f32 {
            let unit = self.samples[self.next % self.samples.len()];
            self.next += 1;
            low + unit * (high - low)
        }
    }

    /// Three 200x200 planes at focus 0, 5 and 10. Each plane is flat at its
    /// level except for a horizontal ramp in the first row.
    fn store() -> SensorStore {
        let plane_len = SIZE * SIZE;
        let mut buffer = Vec::with_capacity(plane_len * 3);
        let mut references = Vec::new();
        for (p, &level) in PLANE_LEVELS.iter().enumerate() {
            for i in 0..plane_len {
                let value = if i < SIZE { i as f32 / SIZE as f32 } else { level };
                buffer.push(value);
            }
            let mut reference = Image::<RgbPixel>::new(SIZE, SIZE);
            for row in 0..SIZE {
                for col in 0..SIZE {
                    reference[(row, col)] = RgbPixel::new(p as f32, row as f32, col as f32);
                }
            }
            references.push(reference);
        }
        let options = SensorOptions {
            dead_pixel_value: DEAD_VALUE,
            row_gain_min: 0.1,
            row_gain_max: 0.2,
            noise_magnitude: 0.7,
        };
        SensorStore::new(SIZE, SIZE, vec![0.0, 5.0, 10.0], buffer, references, options).unwrap()
    }

    fn quiet() -> SensorConfig {
        SensorConfig::builder().noise_magnitude(0.0).build()
    }

    fn raw_value(plane: usize, row: usize, col: usize) -> f32 {
        if row == 0 {
            col as f32 / SIZE as f32
        } else {
            PLANE_LEVELS[plane]
        }
    }

    #[test]
    fn test_initial_state() {
        let sensor = SensorSimulator::new(store(), SensorConfig::default());
        assert!(!sensor.lens_cap());
        assert_eq!(sensor.active_plane_index(), 0);
        assert_eq!(sensor.focal_plane(), 0.0);
        assert_eq!(sensor.min_focal_plane(), 0.0);
        assert_eq!(sensor.max_focal_plane(), 10.0);
        assert_eq!(sensor.sensor_width(), SIZE);
        assert_eq!(sensor.sensor_height(), SIZE);
        // the file's stored magnitude is overridden
        assert_eq!(sensor.noise_magnitude(), 0.05);
    }

    #[test]
    fn test_defects_are_deterministic() {
        let a = SensorSimulator::new(store(), SensorConfig::default());
        let b = SensorSimulator::new(store(), quiet());
        assert_eq!(a.defects(), b.defects());
        assert_eq!(a.defects().dead_pixels().len(), 4);
        assert_eq!(a.defects().bright_lines().len(), 2);
    }

    #[test]
    fn test_noise_differs_between_shots() {
        let mut sensor = SensorSimulator::new(store(), SensorConfig::default());
        let first = sensor.get_sensor_data(0, 0, SIZE, SIZE).unwrap();
        let second = sensor.get_sensor_data(0, 0, SIZE, SIZE).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_zero_noise_is_repeatable() {
        let mut sensor = SensorSimulator::new(store(), quiet());
        let first = sensor.get_sensor_data(0, 0, SIZE, SIZE).unwrap();
        let second = sensor.get_sensor_data(0, 0, SIZE, SIZE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clean_capture_matches_raw_plus_gain() {
        let mut sensor = SensorSimulator::new(store(), quiet());
        let data = sensor.get_sensor_data(0, 0, SIZE, SIZE).unwrap();
        let defects = sensor.defects().clone();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let expected = if defects.is_dead(row, col) {
                    DEAD_VALUE
                } else {
                    (raw_value(0, row, col) + defects.row_gain(row)).clamp(0.0, 1.0)
                };
                assert_eq!(data.get(row, col), expected, "pixel ({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_dead_pixels_ignore_lens_cap_and_noise() {
        let mut sensor = SensorSimulator::new(store(), SensorConfig::default());
        sensor.set_noise_magnitude(5.0);
        let dead: Vec<(usize, usize)> = sensor.defects().dead_pixels().iter().copied().collect();
        assert!(!dead.is_empty());

        for lens_cap in [false, true] {
            sensor.set_lens_cap(lens_cap);
            let data = sensor.get_sensor_data(0, 0, SIZE, SIZE).unwrap();
            for &(row, col) in &dead {
                assert_eq!(data.get(row, col), DEAD_VALUE);
            }
        }
    }

    #[test]
    fn test_defects_use_crop_local_coordinates() {
        let mut sensor = SensorSimulator::new(store(), quiet());
        let (left, top, width, height) = (3, 4, 190, 190);
        let data = sensor.get_sensor_data(left, top, width, height).unwrap();
        let defects = sensor.defects().clone();

        for &(row, col) in defects.dead_pixels() {
            if row < height && col < width {
                assert_eq!(data.get(row, col), DEAD_VALUE);
            }
        }
        for (&row, &gain) in defects.bright_lines() {
            if row < height && !defects.is_dead(row, 10) {
                let expected = (raw_value(0, top + row, left + 10) + gain).clamp(0.0, 1.0);
                assert_eq!(data.get(row, 10), expected);
            }
        }
    }

    #[test]
    fn test_lens_cap_darkens_live_pixels() {
        let mut sensor = SensorSimulator::new(store(), quiet());
        sensor.set_lens_cap(true);
        let data = sensor.get_sensor_data(0, 0, SIZE, SIZE).unwrap();
        let defects = sensor.defects().clone();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if defects.is_dead(row, col) {
                    continue;
                }
                let expected = defects.row_gain(row).clamp(0.0, 1.0);
                assert_eq!(data.get(row, col), expected);
            }
        }
        assert!(defects.bright_lines().values().all(|&g| g > 0.0));
    }

    #[test]
    fn test_output_is_clamped_for_any_noise() {
        let mut sensor = SensorSimulator::new(store(), SensorConfig::default());
        for magnitude in [100.0, -100.0, 3.0, f32::INFINITY, f32::NAN] {
            sensor.set_noise_magnitude(magnitude);
            let data = sensor.get_sensor_data(0, 0, SIZE, SIZE).unwrap();
            for row in 0..SIZE {
                for col in 0..SIZE {
                    if sensor.defects().is_dead(row, col) {
                        continue;
                    }
                    let v = data.get(row, col);
                    assert!((0.0..=1.0).contains(&v), "value {} out of range", v);
                }
            }
        }
    }

    #[test]
    fn test_nan_samples_saturate() {
        let store = SensorStore::new(
            2,
            2,
            vec![0.0],
            vec![f32::NAN, 0.5, f32::NAN, 0.25],
            vec![Image::new(2, 2)],
            SensorOptions::default(),
        )
        .unwrap();
        let mut sensor = SensorSimulator::new(store, quiet());
        let data = sensor.get_sensor_data(0, 0, 2, 2).unwrap();
        assert_eq!(data.as_slice(), &[1.0, 0.5, 1.0, 0.25]);
    }

    #[test]
    fn test_noise_is_added_after_gain_and_before_clamp() {
        // a unit sample of 1.0 maps to +0.5 in the noise band
        let (noise, reseeds) = FixedNoise::new(vec![1.0]);
        let config = SensorConfig::builder().noise_magnitude(0.2).build();
        let mut sensor = SensorSimulator::with_noise_source(store(), config, noise);
        sensor.set_focal_plane(5.0);
        let defects = sensor.defects().clone();

        let data = sensor.get_sensor_data(0, 0, 4, 3).unwrap();
        assert_eq!(reseeds.get(), 1);
        for row in 1..3 {
            for col in 0..4 {
                if defects.is_dead(row, col) {
                    continue;
                }
                let expected = (0.5 + defects.row_gain(row) + 0.1).clamp(0.0, 1.0);
                assert!((data.get(row, col) - expected).abs() < 1e-6);
            }
        }

        sensor.set_noise_magnitude(-0.2);
        let inverted = sensor.get_sensor_data(0, 0, 4, 3).unwrap();
        assert_eq!(reseeds.get(), 2);
        for col in 0..4 {
            if defects.is_dead(2, col) {
                continue;
            }
            let expected = (0.5 + defects.row_gain(2) - 0.1).clamp(0.0, 1.0);
            assert!((inverted.get(2, col) - expected).abs() < 1e-6);
        }

        sensor.set_noise_magnitude(4.0);
        let saturated = sensor.get_sensor_data(0, 0, 4, 3).unwrap();
        for col in 0..4 {
            if !defects.is_dead(2, col) {
                assert_eq!(saturated.get(2, col), 1.0);
            }
        }
    }

    #[test]
    fn test_focal_plane_selects_nearest() {
        let mut sensor = SensorSimulator::new(store(), quiet());

        sensor.set_focal_plane(3.0);
        assert_eq!(sensor.focal_plane(), 5.0);

        sensor.set_focal_plane(1.0);
        assert_eq!(sensor.focal_plane(), 0.0);

        sensor.set_focal_plane(9.0);
        assert_eq!(sensor.focal_plane(), 10.0);
    }

    #[test]
    fn test_focal_plane_ties_pick_lower_index() {
        let mut sensor = SensorSimulator::new(store(), quiet());
        sensor.set_focal_plane(10.0);
        sensor.set_focal_plane(2.5);
        assert_eq!(sensor.active_plane_index(), 0);
        sensor.set_focal_plane(7.5);
        assert_eq!(sensor.active_plane_index(), 1);
    }

    #[test]
    fn test_focal_plane_out_of_range_clamps() {
        let mut sensor = SensorSimulator::new(store(), quiet());
        sensor.set_focal_plane(1000.0);
        assert_eq!(sensor.focal_plane(), 10.0);
        sensor.set_focal_plane(-50.0);
        assert_eq!(sensor.focal_plane(), 0.0);
    }

    #[test]
    fn test_burst_covers_every_plane_and_restores_state() {
        let (noise, reseeds) = FixedNoise::new(vec![0.5]);
        let mut sensor = SensorSimulator::with_noise_source(store(), quiet(), noise);
        sensor.set_focal_plane(5.0);

        let burst = sensor.get_burst_sensor_data(10, 10, 8, 8).unwrap();
        assert_eq!(burst.len(), 3);
        assert_eq!(reseeds.get(), 3);
        assert_eq!(sensor.active_plane_index(), 1);
        assert_eq!(sensor.focal_plane(), 5.0);

        let defects = sensor.defects().clone();
        for (plane, data) in burst.iter().enumerate() {
            assert_eq!(data.width(), 8);
            assert_eq!(data.height(), 8);
            for row in 0..8 {
                for col in 0..8 {
                    if defects.is_dead(row, col) {
                        continue;
                    }
                    let expected = (PLANE_LEVELS[plane] + defects.row_gain(row)).clamp(0.0, 1.0);
                    assert_eq!(data.get(row, col), expected);
                }
            }
        }
    }

    #[test]
    fn test_burst_restores_state_on_error() {
        let mut sensor = SensorSimulator::new(store(), quiet());
        sensor.set_focal_plane(10.0);
        let result = sensor.get_burst_sensor_data(SIZE, 0, 1, 1);
        assert!(matches!(result, Err(SensorError::CropOutOfRange { .. })));
        assert_eq!(sensor.active_plane_index(), 2);
    }

    #[test]
    fn test_perfect_image_crops_active_reference() {
        let mut sensor = SensorSimulator::new(store(), quiet());
        sensor.set_focal_plane(10.0);
        let image = sensor.get_perfect_image(7, 3, 5, 4).unwrap();
        assert_eq!(image.width(), 5);
        assert_eq!(image.height(), 4);
        assert_eq!(image[(0, 0)], RgbPixel::new(2.0, 3.0, 7.0));
        assert_eq!(image[(3, 4)], RgbPixel::new(2.0, 6.0, 11.0));
    }

    #[test]
    fn test_crop_out_of_range_is_rejected() {
        let mut sensor = SensorSimulator::new(store(), quiet());
        assert!(matches!(
            sensor.get_sensor_data(150, 0, 51, 10),
            Err(SensorError::CropOutOfRange { .. })
        ));
        assert!(matches!(
            sensor.get_sensor_data(0, usize::MAX, 1, 1),
            Err(SensorError::CropOutOfRange { .. })
        ));
        assert!(matches!(
            sensor.get_perfect_image(0, 199, 1, 2),
            Err(SensorError::CropOutOfRange { .. })
        ));
        assert!(sensor.get_sensor_data(150, 190, 50, 10).is_ok());
    }

    #[test]
    fn test_unvalidated_crop_reads_zero_outside_sensor() {
        let config = SensorConfig::builder()
            .noise_magnitude(0.0)
            .validate_crop(false)
            .build();
        let mut sensor = SensorSimulator::new(store(), config);
        let data = sensor.get_sensor_data(SIZE - 1, 1, 2, 1).unwrap();
        let defects = sensor.defects().clone();
        let gain = defects.row_gain(0);
        if !defects.is_dead(0, 0) {
            assert_eq!(data.get(0, 0), (PLANE_LEVELS[0] + gain).clamp(0.0, 1.0));
        }
        if !defects.is_dead(0, 1) {
            assert_eq!(data.get(0, 1), gain.clamp(0.0, 1.0));
        }

        let image = sensor.get_perfect_image(SIZE - 1, 0, 2, 1).unwrap();
        assert_eq!(image[(0, 0)], RgbPixel::new(0.0, 0.0, (SIZE - 1) as f32));
        assert_eq!(image[(0, 1)], RgbPixel::default());
    }

    #[test]
    fn test_entropy_source_is_default() {
        fn takes_default(_: &SensorSimulator) {}
        let sensor: SensorSimulator<EntropyRandom> = SensorSimulator::new(store(), quiet());
        takes_default(&sensor);
    }
}
