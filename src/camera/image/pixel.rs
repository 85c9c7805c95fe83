//! Pixel sample types

use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Common behavior for the sample types an [`Image`](super::Image) can hold.
pub trait Pixel:
    Copy
    + Default
    + PartialEq
    + std::fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f32, Output = Self>
    + Add<f32, Output = Self>
    + Sub<f32, Output = Self>
    + AddAssign
    + SubAssign
{
    /// Number of color channels stored per pixel.
    const CHANNELS: usize;

    /// Raises every channel to `power`.
    fn powf(self, power: f32) -> Self;

    /// The pixel as `[r, g, b]`, or `None` for single-channel samples.
    fn to_rgb(self) -> Option<[f32; 3]>;

    /// Builds a pixel from `[r, g, b]`, or `None` for single-channel samples.
    fn from_rgb(rgb: [f32; 3]) -> Option<Self>;
}

/// Three-channel float pixel.
///
/// The same three fields hold either RGB or YUV components; [`Float3Pixel::y`],
/// [`Float3Pixel::u`] and [`Float3Pixel::v`] read them under their YUV names.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Float3Pixel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

pub type RgbPixel = Float3Pixel;
pub type YuvPixel = Float3Pixel;

impl Float3Pixel {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn y(&self) -> f32 {
        self.r
    }

    pub fn u(&self) -> f32 {
        self.g
    }

    pub fn v(&self) -> f32 {
        self.b
    }

    pub fn rgb_to_yuv(rgb: RgbPixel) -> YuvPixel {
        let y = 0.299 * rgb.r + 0.587 * rgb.g + 0.114 * rgb.b;
        let u = 0.492 * (rgb.b - y);
        let v = 0.877 * (rgb.r - y);
        Self::new(y, u, v)
    }

    pub fn yuv_to_rgb(yuv: YuvPixel) -> RgbPixel {
        let (y, u, v) = (yuv.y(), yuv.u(), yuv.v());
        Self::new(y + 1.14 * v, y - 0.395 * u - 0.581 * v, y + 2.033 * u)
    }
}

impl Add for Float3Pixel {
    type Output = Self;
    fn add(self, that: Self) -> Self {
        Self::new(self.r + that.r, self.g + that.g, self.b + that.b)
    }
}

impl Sub for Float3Pixel {
    type Output = Self;
    fn sub(self, that: Self) -> Self {
        Self::new(self.r - that.r, self.g - that.g, self.b - that.b)
    }
}

impl Mul<f32> for Float3Pixel {
    type Output = Self;
    fn mul(self, a: f32) -> Self {
        Self::new(self.r * a, self.g * a, self.b * a)
    }
}

impl Add<f32> for Float3Pixel {
    type Output = Self;
    fn add(self, a: f32) -> Self {
        Self::new(self.r + a, self.g + a, self.b + a)
    }
}

impl Sub<f32> for Float3Pixel {
    type Output = Self;
    fn sub(self, a: f32) -> Self {
        Self::new(self.r - a, self.g - a, self.b - a)
    }
}

impl AddAssign for Float3Pixel {
    fn add_assign(&mut self, that: Self) {
        *self = *self + that;
    }
}

impl SubAssign for Float3Pixel {
    fn sub_assign(&mut self, that: Self) {
        *self = *self - that;
    }
}

impl Pixel for Float3Pixel {
    const CHANNELS: usize = 3;

    fn powf(self, power: f32) -> Self {
        Self::new(self.r.powf(power), self.g.powf(power), self.b.powf(power))
    }

    fn to_rgb(self) -> Option<[f32; 3]> {
        Some([self.r, self.g, self.b])
    }

    fn from_rgb(rgb: [f32; 3]) -> Option<Self> {
        Some(Self::new(rgb[0], rgb[1], rgb[2]))
    }
}

/// Single-channel intensity pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloatPixel {
    pub i: f32,
}

impl FloatPixel {
    pub const fn new(i: f32) -> Self {
        Self { i }
    }
}

impl Add for FloatPixel {
    type Output = Self;
    fn add(self, that: Self) -> Self {
        Self::new(self.i + that.i)
    }
}

impl Sub for FloatPixel {
    type Output = Self;
    fn sub(self, that: Self) -> Self {
        Self::new(self.i - that.i)
    }
}

impl Mul<f32> for FloatPixel {
    type Output = Self;
    fn mul(self, a: f32) -> Self {
        Self::new(self.i * a)
    }
}

impl Add<f32> for FloatPixel {
    type Output = Self;
    fn add(self, a: f32) -> Self {
        Self::new(self.i + a)
    }
}

impl Sub<f32> for FloatPixel {
    type Output = Self;
    fn sub(self, a: f32) -> Self {
        Self::new(self.i - a)
    }
}

impl AddAssign for FloatPixel {
    fn add_assign(&mut self, that: Self) {
        self.i += that.i;
    }
}

impl SubAssign for FloatPixel {
    fn sub_assign(&mut self, that: Self) {
        self.i -= that.i;
    }
}

impl Pixel for FloatPixel {
    const CHANNELS: usize = 1;

    fn powf(self, power: f32) -> Self {
        Self::new(self.i.powf(power))
    }

    fn to_rgb(self) -> Option<[f32; 3]> {
        None
    }

    fn from_rgb(_rgb: [f32; 3]) -> Option<Self> {
        None
    }
}
