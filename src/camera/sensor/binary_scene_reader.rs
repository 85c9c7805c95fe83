//! Scene reader for the positional binary scene format.
//!
//! A scene file is unversioned and carries no magic number. Every field is
//! little-endian:
//!
//! 1. `i32` plane count
//! 2. `i32` width, `i32` height
//! 3. per plane: `f32` focal distance, `width * height` raw `f32` samples,
//!    then `3 * width * height` reference `f32` samples laid out as all R,
//!    all G, all B
//! 4. a trailing [`SensorOptions`] record
//!
//! Declared sizes are checked against the bytes actually present, so a
//! truncated file is reported as corrupt instead of producing garbage.

use std::io::{Cursor, Read};

use tracing::{debug, warn};

use crate::camera::common::error::{Result, SensorError};
use crate::camera::image::{Image, RgbPixel};
use crate::camera::sensor::reader::SceneReader;
use crate::camera::sensor::store::SensorStore;
use crate::camera::sensor::types::SensorOptions;

const F32_LEN: usize = 4;

/// Reader for scene files in the binary focal-stack format.
pub struct BinarySceneReader;

fn read_i32(cursor: &mut Cursor<&[u8]>, field: &str) -> Result<i32> {
    let mut bytes = [0u8; 4];
    cursor
        .read_exact(&mut bytes)
        .map_err(|_| SensorError::CorruptScene(format!("file ends before {}", field)))?;
    Ok(i32::from_le_bytes(bytes))
}

fn read_f32s(cursor: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<f32>> {
    let mut bytes = vec![0u8; count * F32_LEN];
    cursor
        .read_exact(&mut bytes)
        .map_err(|_| SensorError::CorruptScene(format!("file ends inside a block of {} samples", count)))?;
    Ok(bytes
        .chunks_exact(F32_LEN)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn positive(value: i32, field: &str) -> Result<usize> {
    if value <= 0 {
        return Err(SensorError::CorruptScene(format!(
            "{} must be positive, found {}",
            field, value
        )));
    }
    Ok(value as usize)
}

impl SceneReader for BinarySceneReader {
    /// Parses a scene file held in memory.
    ///
    /// Returns [`SensorError::CorruptScene`] when a count is not positive,
    /// when the declared planes do not fit in `data`, or when the options
    /// record is cut short. A file that ends exactly after the last plane
    /// falls back to [`SensorOptions::default`].
    fn read_scene(&self, data: &[u8]) -> Result<SensorStore> {
        debug!("Parsing scene, {} bytes", data.len());

        let mut cursor = Cursor::new(data);
        let plane_count = positive(read_i32(&mut cursor, "plane count")?, "plane count")?;
        let width = positive(read_i32(&mut cursor, "width")?, "width")?;
        let height = positive(read_i32(&mut cursor, "height")?, "height")?;

        let plane_len = width
            .checked_mul(height)
            .ok_or_else(|| SensorError::CorruptScene("plane size overflows".into()))?;
        // focal distance + raw samples + three reference channels
        let plane_bytes = plane_len
            .checked_mul(4 * F32_LEN)
            .and_then(|b| b.checked_add(F32_LEN))
            .ok_or_else(|| SensorError::CorruptScene("plane size overflows".into()))?;
        let stack_bytes = plane_bytes
            .checked_mul(plane_count)
            .ok_or_else(|| SensorError::CorruptScene("stack size overflows".into()))?;
        let remaining = data.len() - cursor.position() as usize;
        if remaining < stack_bytes {
            return Err(SensorError::CorruptScene(format!(
                "{} planes of {}x{} need {} bytes, only {} present",
                plane_count, width, height, stack_bytes, remaining
            )));
        }

        debug!("Scene header: {} planes of {}x{}", plane_count, width, height);

        let mut buffer = Vec::with_capacity(plane_count * plane_len);
        let mut focal_distances = Vec::with_capacity(plane_count);
        let mut references = Vec::with_capacity(plane_count);
        for _ in 0..plane_count {
            let focus = read_f32s(&mut cursor, 1)?[0];
            focal_distances.push(focus);
            buffer.extend(read_f32s(&mut cursor, plane_len)?);
            let planar = read_f32s(&mut cursor, 3 * plane_len)?;
            references.push(Image::<RgbPixel>::from_planar_rgb(width, height, &planar)?);
        }

        let remaining = data.len() - cursor.position() as usize;
        let options = match remaining {
            0 => {
                warn!("Scene has no options record, using defaults");
                SensorOptions::default()
            }
            n if n < SensorOptions::ENCODED_LEN => {
                return Err(SensorError::CorruptScene(format!(
                    "options record is {} bytes, expected {}",
                    n,
                    SensorOptions::ENCODED_LEN
                )));
            }
            n => {
                let mut record = [0u8; SensorOptions::ENCODED_LEN];
                cursor.read_exact(&mut record)?;
                if n > SensorOptions::ENCODED_LEN {
                    warn!(
                        "Ignoring {} trailing bytes after options record",
                        n - SensorOptions::ENCODED_LEN
                    );
                }
                SensorOptions::from_le_bytes(record)
            }
        };

        SensorStore::new(width, height, focal_distances, buffer, references, options)
    }
}

/// Serializes a store back into the binary scene format.
pub fn encode_scene(store: &SensorStore) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(store.plane_count() as i32).to_le_bytes());
    out.extend_from_slice(&(store.width() as i32).to_le_bytes());
    out.extend_from_slice(&(store.height() as i32).to_le_bytes());
    for plane in store.planes() {
        out.extend_from_slice(&plane.focal_distance.to_le_bytes());
        for v in plane.raw {
            out.extend_from_slice(&v.to_le_bytes());
        }
        for v in plane.reference.to_planar_rgb() {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
    out.extend_from_slice(&store.options().to_le_bytes());
    out
}
