//! Fixed sensor defects: dead pixels and bright lines.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::camera::common::random::RandomSource;

/// One dead pixel per this many sensor pixels.
const PIXELS_PER_DEAD_PIXEL: usize = 10_000;

/// One bright line per this many sensor rows.
const ROWS_PER_BRIGHT_LINE: usize = 100;

/// Dead pixel positions and per-row bright line gains.
///
/// Positions are in crop-local coordinates: a defect at (row, col) affects
/// output pixel (row, col) of every capture, whatever the crop origin.
#[derive(Debug, Clone, PartialEq)]
pub struct DefectModel {
    dead_pixels: BTreeSet<(usize, usize)>,
    bright_lines: BTreeMap<usize, f32>,
}

impl DefectModel {
    /// Lays out defects for a `width x height` sensor.
    ///
    /// Draws `width * height / 10000` distinct dead pixels (row then column
    /// per draw), then `height / 100` bright rows. A bright row is rejected if
    /// it or either neighbor is already bright; its gain is drawn from
    /// `[gain_min, gain_max)` only once the row is accepted.
    pub fn generate<R: RandomSource + ?Sized>(
        width: usize,
        height: usize,
        gain_min: f32,
        gain_max: f32,
        rng: &mut R,
    ) -> Self {
        let mut dead_pixels = BTreeSet::new();
        let dead_count = width * height / PIXELS_PER_DEAD_PIXEL;
        while dead_pixels.len() < dead_count {
            let row = rng.uniform_usize(0, height - 1);
            let col = rng.uniform_usize(0, width - 1);
            dead_pixels.insert((row, col));
        }

        let mut bright_lines = BTreeMap::new();
        let line_count = height / ROWS_PER_BRIGHT_LINE;
        while bright_lines.len() < line_count {
            let row = rng.uniform_usize(0, height - 1);
            let taken = bright_lines.contains_key(&row)
                || (row > 0 && bright_lines.contains_key(&(row - 1)))
                || bright_lines.contains_key(&(row + 1));
            if taken {
                continue;
            }
            let gain = rng.uniform_f32(gain_min, gain_max);
            bright_lines.insert(row, gain);
        }

        debug!(
            "Generated {} dead pixels and {} bright lines for {}x{} sensor",
            dead_pixels.len(),
            bright_lines.len(),
            width,
            height
        );

        Self {
            dead_pixels,
            bright_lines,
        }
    }

    pub fn is_dead(&self, row: usize, col: usize) -> bool {
        self.dead_pixels.contains(&(row, col))
    }

    /// Additive gain for `row`, 0 for rows without a bright line.
    pub fn row_gain(&self, row: usize) -> f32 {
        self.bright_lines.get(&row).copied().unwrap_or(0.0)
    }

    pub fn dead_pixels(&self) -> &BTreeSet<(usize, usize)> {
        &self.dead_pixels
    }

    pub fn bright_lines(&self) -> &BTreeMap<usize, f32> {
        &self.bright_lines
    }
}
