//! 24-bit uncompressed bitmap encoding and decoding.
//!
//! Layout: a 14-byte file header, a 40-byte info header, then pixel rows
//! stored bottom-to-top as B, G, R bytes, each row zero-padded to a multiple
//! of four bytes.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::camera::common::error::{Result, SensorError};
use crate::camera::image::buffer::Image;
use crate::camera::image::pixel::Pixel;

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: usize = 40;
pub const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
const BITS_PER_PIXEL_OFFSET: usize = 28;
const BITS_PER_PIXEL: u16 = 24;

/// Zero bytes appended to each row of `width` pixels.
pub fn row_padding(width: usize) -> usize {
    (4 - (width % 4) * 3 % 4) % 4
}

fn require_rgb<P: Pixel>() -> Result<()> {
    if P::CHANNELS != 3 {
        return Err(SensorError::UnsupportedFormat(format!(
            "bitmaps hold 3-channel color, image has {} channel(s)",
            P::CHANNELS
        )));
    }
    Ok(())
}

fn to_byte(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// File size, width and height as stored in the header, or
/// [`SensorError::UnsupportedFormat`] when the image is too large for them.
fn header_sizes(width: usize, height: usize) -> Result<(u32, i32, i32)> {
    let too_large = || {
        SensorError::UnsupportedFormat(format!(
            "{}x{} image does not fit in a bitmap header",
            width, height
        ))
    };
    let file_size = width
        .checked_mul(3)
        .and_then(|len| len.checked_add(row_padding(width)))
        .and_then(|row_len| row_len.checked_mul(height))
        .and_then(|len| len.checked_add(HEADER_LEN))
        .ok_or_else(too_large)?;
    Ok((
        u32::try_from(file_size).map_err(|_| too_large())?,
        i32::try_from(width).map_err(|_| too_large())?,
        i32::try_from(height).map_err(|_| too_large())?,
    ))
}

/// Encodes `image` as a bitmap into `output`.
///
/// Channels are clamped to `[0, 255]` and truncated. Single-channel images
/// are rejected with [`SensorError::UnsupportedFormat`].
pub fn encode_bmp<P: Pixel>(image: &Image<P>, output: &mut dyn Write) -> Result<()> {
    require_rgb::<P>()?;

    let width = image.width();
    let height = image.height();
    let padding = row_padding(width);
    let (file_size, width_field, height_field) = header_sizes(width, height)?;

    debug!("Encoding bitmap: {}x{}, {} bytes", width, height, file_size);

    let mut buffer = Vec::with_capacity(file_size as usize);

    buffer.extend_from_slice(b"BM");
    buffer.extend_from_slice(&file_size.to_le_bytes());
    buffer.extend_from_slice(&[0u8; 4]);
    buffer.extend_from_slice(&(HEADER_LEN as u32).to_le_bytes());

    buffer.extend_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    buffer.extend_from_slice(&width_field.to_le_bytes());
    buffer.extend_from_slice(&height_field.to_le_bytes());
    buffer.extend_from_slice(&1u16.to_le_bytes());
    buffer.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    // compression, image size, resolution and palette fields stay zero
    buffer.extend_from_slice(&[0u8; 24]);

    for row in (0..height).rev() {
        for pixel in image.row(row) {
            let [r, g, b] = pixel
                .to_rgb()
                .ok_or_else(|| SensorError::UnsupportedFormat("pixel has no RGB form".into()))?;
            buffer.extend_from_slice(&[to_byte(b), to_byte(g), to_byte(r)]);
        }
        buffer.extend(std::iter::repeat_n(0u8, padding));
    }

    output.write_all(&buffer)?;

    debug!("Bitmap encoding complete");
    Ok(())
}

fn read_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Decodes a bitmap produced by [`encode_bmp`] (or any 24-bit bottom-up
/// uncompressed bitmap whose pixels follow the 54-byte header).
pub fn decode_bmp<P: Pixel>(data: &[u8]) -> Result<Image<P>> {
    require_rgb::<P>()?;

    if data.len() < HEADER_LEN {
        return Err(SensorError::CorruptBitmap(format!(
            "{} bytes is shorter than the {}-byte header",
            data.len(),
            HEADER_LEN
        )));
    }
    if &data[0..2] != b"BM" {
        return Err(SensorError::CorruptBitmap("missing BM signature".into()));
    }
    let bits = u16::from_le_bytes([data[BITS_PER_PIXEL_OFFSET], data[BITS_PER_PIXEL_OFFSET + 1]]);
    if bits != BITS_PER_PIXEL {
        return Err(SensorError::CorruptBitmap(format!(
            "expected {} bits per pixel, found {}",
            BITS_PER_PIXEL, bits
        )));
    }

    let width = read_i32(data, WIDTH_OFFSET);
    let height = read_i32(data, HEIGHT_OFFSET);
    if width <= 0 || height <= 0 {
        return Err(SensorError::CorruptBitmap(format!(
            "unsupported dimensions {}x{}",
            width, height
        )));
    }
    let width = width as usize;
    let height = height as usize;

    debug!("Decoding bitmap: {}x{}", width, height);

    let padding = row_padding(width);
    let row_len = width * 3 + padding;
    let pixel_bytes = row_len
        .checked_mul(height)
        .ok_or_else(|| SensorError::CorruptBitmap("pixel data size overflows".into()))?;
    let body = &data[HEADER_LEN..];
    if body.len() < pixel_bytes {
        return Err(SensorError::CorruptBitmap(format!(
            "expected {} bytes of pixel data, found {}",
            pixel_bytes,
            body.len()
        )));
    }

    let mut image = Image::<P>::new(width, height);
    for (i, line) in body.chunks_exact(row_len).take(height).enumerate() {
        let row = height - 1 - i;
        for (col, bgr) in line[..width * 3].chunks_exact(3).enumerate() {
            let rgb = [bgr[2] as f32, bgr[1] as f32, bgr[0] as f32];
            image[(row, col)] = P::from_rgb(rgb)
                .ok_or_else(|| SensorError::UnsupportedFormat("pixel has no RGB form".into()))?;
        }
    }

    Ok(image)
}

impl<P: Pixel> Image<P> {
    /// Writes this image to `path` as a bitmap.
    pub fn write_to_bmp<Q: AsRef<Path>>(&self, path: Q) -> Result<()> {
        require_rgb::<P>()?;
        let path = path.as_ref();
        let mut file = std::fs::File::create(path).map_err(|e| {
            SensorError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        encode_bmp(self, &mut file)
    }

    /// Reads a bitmap from `path`.
    pub fn read_from_bmp<Q: AsRef<Path>>(path: Q) -> Result<Self> {
        require_rgb::<P>()?;
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| SensorError::InputReadError(format!("{}: {}", path.display(), e)))?;
        decode_bmp(&data)
    }
}
