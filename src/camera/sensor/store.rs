//! Storage for a loaded scene: the raw focal stack and its reference images.

use std::path::Path;

use tracing::{info, instrument};

use crate::camera::common::error::{Result, SensorError};
use crate::camera::image::{Image, RgbPixel};
use crate::camera::sensor::binary_scene_reader::BinarySceneReader;
use crate::camera::sensor::reader::SceneReader;
use crate::camera::sensor::types::{FocalPlane, SensorOptions};

#[derive(Debug, Clone, Copy)]
struct PlaneEntry {
    focal_distance: f32,
    offset: usize,
}

/// Immutable scene data shared by every capture.
///
/// All raw planes live in one contiguous allocation; each plane is an offset
/// into it, handed out as a borrowed [`FocalPlane`].
#[derive(Debug, Clone)]
pub struct SensorStore {
    width: usize,
    height: usize,
    buffer: Vec<f32>,
    planes: Vec<PlaneEntry>,
    references: Vec<Image<RgbPixel>>,
    options: SensorOptions,
}

impl SensorStore {
    /// Assembles a store from in-memory parts.
    ///
    /// `buffer` holds `focal_distances.len()` raw planes back to back, each
    /// `width * height` long; `references` holds one image per plane.
    pub fn new(
        width: usize,
        height: usize,
        focal_distances: Vec<f32>,
        buffer: Vec<f32>,
        references: Vec<Image<RgbPixel>>,
        options: SensorOptions,
    ) -> Result<Self> {
        if focal_distances.is_empty() {
            return Err(SensorError::CorruptScene("scene has no focal planes".into()));
        }
        let plane_len = width
            .checked_mul(height)
            .ok_or_else(|| SensorError::CorruptScene("plane size overflows".into()))?;
        let expected = plane_len
            .checked_mul(focal_distances.len())
            .ok_or_else(|| SensorError::CorruptScene("stack size overflows".into()))?;
        if buffer.len() != expected {
            return Err(SensorError::CorruptScene(format!(
                "expected {} raw samples, found {}",
                expected,
                buffer.len()
            )));
        }
        if references.len() != focal_distances.len() {
            return Err(SensorError::CorruptScene(format!(
                "{} focal planes but {} reference images",
                focal_distances.len(),
                references.len()
            )));
        }
        if let Some(bad) = references
            .iter()
            .find(|r| r.width() != width || r.height() != height)
        {
            return Err(SensorError::CorruptScene(format!(
                "reference image is {}x{}, sensor is {}x{}",
                bad.width(),
                bad.height(),
                width,
                height
            )));
        }

        let planes = focal_distances
            .into_iter()
            .enumerate()
            .map(|(i, focal_distance)| PlaneEntry {
                focal_distance,
                offset: i * plane_len,
            })
            .collect();

        Ok(Self {
            width,
            height,
            buffer,
            planes,
            references,
            options,
        })
    }

    /// Loads a scene file with the [`BinarySceneReader`].
    #[instrument(skip_all)]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = read_scene_file(path.as_ref())?;
        let store = BinarySceneReader.read_scene(&data)?;
        store.report();
        Ok(store)
    }

    /// Logs the shape of the loaded focal stack.
    pub fn report(&self) {
        info!(
            "Read {} sensor planes of size ({},{})",
            self.plane_count(),
            self.width,
            self.height
        );
        info!(focal_distances = ?self.focal_distances(), "Focal stack");
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn options(&self) -> &SensorOptions {
        &self.options
    }

    pub fn plane(&self, index: usize) -> Option<FocalPlane<'_>> {
        let entry = self.planes.get(index)?;
        let len = self.width * self.height;
        Some(FocalPlane {
            focal_distance: entry.focal_distance,
            raw: &self.buffer[entry.offset..entry.offset + len],
            reference: &self.references[index],
        })
    }

    pub fn planes(&self) -> impl Iterator<Item = FocalPlane<'_>> + '_ {
        (0..self.planes.len()).filter_map(move |i| self.plane(i))
    }

    pub fn focal_distances(&self) -> Vec<f32> {
        self.planes.iter().map(|p| p.focal_distance).collect()
    }
}

/// Reads a whole scene file into memory.
pub(crate) fn read_scene_file(path: &Path) -> Result<Vec<u8>> {
    info!(path = %path.display(), "Loading scene");
    std::fs::read(path)
        .map_err(|e| SensorError::InputReadError(format!("{}: {}", path.display(), e)))
}
