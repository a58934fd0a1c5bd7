//! Types for debayering operations

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Bytes per interleaved RGB888 pixel.
pub const RGB_BYTES_PER_PIXEL: usize = 3;

/// Physical filter color over a sensor site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

/// The four 2x2 Bayer tilings, named by their top-left row-major cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CfaPattern {
    #[default]
    Rggb = 0,
    Bggr = 1,
    Grbg = 2,
    Gbrg = 3,
}

impl CfaPattern {
    pub const ALL: [CfaPattern; 4] = [Self::Rggb, Self::Bggr, Self::Grbg, Self::Gbrg];

    /// Filter color at a site of the given parities.
    pub fn channel_at(self, row: usize, col: usize) -> Channel {
        use Channel::*;
        let tile = match self {
            Self::Rggb => [Red, Green, Green, Blue],
            Self::Bggr => [Blue, Green, Green, Red],
            Self::Grbg => [Green, Red, Blue, Green],
            Self::Gbrg => [Green, Blue, Red, Green],
        };
        tile[((row & 1) << 1) | (col & 1)]
    }
}

impl fmt::Display for CfaPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rggb => "RGGB",
            Self::Bggr => "BGGR",
            Self::Grbg => "GRBG",
            Self::Gbrg => "GBRG",
        })
    }
}

impl FromStr for CfaPattern {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "RGGB" => Ok(Self::Rggb),
            "BGGR" => Ok(Self::Bggr),
            "GRBG" => Ok(Self::Grbg),
            "GBRG" => Ok(Self::Gbrg),
            _ => Err(ConversionError::UnsupportedCfa(s.to_string())),
        }
    }
}

impl TryFrom<u32> for CfaPattern {
    type Error = ConversionError;

    fn try_from(code: u32) -> Result<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| ConversionError::UnsupportedCfa(format!("code {code}")))
    }
}

/// Interpolation method used to fill in the missing channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Neighbor averaging with gradient-directed green at red/blue sites.
    #[default]
    Bilinear = 0,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bilinear => f.write_str("bilinear"),
        }
    }
}

impl FromStr for Interpolation {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bilinear" => Ok(Self::Bilinear),
            _ => Err(ConversionError::UnsupportedInterpolation(s.to_string())),
        }
    }
}

impl TryFrom<u32> for Interpolation {
    type Error = ConversionError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Self::Bilinear),
            _ => Err(ConversionError::UnsupportedInterpolation(format!("code {code}"))),
        }
    }
}

/// Write-only view over caller-owned interleaved RGB888 memory.
#[derive(Debug)]
pub struct RgbBuffer<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> RgbBuffer<'a> {
    /// Tightly packed rows: `stride = width * 3`.
    pub fn new(data: &'a mut [u8], width: usize, height: usize) -> Result<Self> {
        let stride = width
            .checked_mul(RGB_BYTES_PER_PIXEL)
            .ok_or(ConversionError::InvalidDimensions(width, height))?;
        Self::with_stride(data, width, height, stride)
    }

    pub fn with_stride(data: &'a mut [u8], width: usize, height: usize, stride: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
        let min = width
            .checked_mul(RGB_BYTES_PER_PIXEL)
            .ok_or(ConversionError::InvalidDimensions(width, height))?;
        if stride < min {
            return Err(ConversionError::StrideTooSmall { stride, min });
        }
        let expected = stride
            .checked_mul(height)
            .ok_or(ConversionError::InvalidDimensions(width, height))?;
        if data.len() < expected {
            return Err(ConversionError::BufferTooSmall { expected, got: data.len() });
        }

        Ok(Self { data, width, height, stride })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The `stride * height` bytes covered by the image.
    pub(crate) fn rows_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.stride * self.height]
    }
}

/// RGB image data after debayering
#[derive(Debug, Clone)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Bytes per row, at least `width * 3`
    pub stride: usize,
    /// RGB888 pixel data interleaved [R, G, B, R, G, B, ...] per row
    pub data: Vec<u8>,
}

impl RgbImageData {
    /// Zero-filled, tightly packed image.
    pub fn new(width: usize, height: usize) -> Self {
        let stride = width * RGB_BYTES_PER_PIXEL;
        Self {
            width,
            height,
            stride,
            data: vec![0u8; stride * height],
        }
    }

    pub fn as_buffer_mut(&mut self) -> Result<RgbBuffer<'_>> {
        RgbBuffer::with_stride(&mut self.data, self.width, self.height, self.stride)
    }

    /// Pixel rows without stride padding.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let row_bytes = self.width * RGB_BYTES_PER_PIXEL;
        self.data
            .chunks(self.stride)
            .take(self.height)
            .map(move |row| &row[..row_bytes])
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        let o = row * self.stride + col * RGB_BYTES_PER_PIXEL;
        [self.data[o], self.data[o + 1], self.data[o + 2]]
    }
}
