//! RAW image data types

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::types::CfaPattern;

/// Smallest width or height the +-2 border reflection can serve.
pub const MIN_DIMENSION: usize = 2;

/// In-memory layout of one raw sample.
///
/// The 10/12/14-bit variants are left-justified in little-endian 16-bit
/// cells: the significant value sits in the high bits and the low bits are
/// padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleEncoding {
    /// One byte per sample.
    Raw8,
    /// 10 significant bits in a 16-bit cell.
    Raw10Unpacked,
    /// 12 significant bits in a 16-bit cell.
    Raw12Unpacked,
    /// 14 significant bits in a 16-bit cell.
    Raw14Unpacked,
    /// Full-range 16-bit samples.
    Raw16,
}

impl SampleEncoding {
    pub const ALL: [SampleEncoding; 5] = [
        Self::Raw8,
        Self::Raw10Unpacked,
        Self::Raw12Unpacked,
        Self::Raw14Unpacked,
        Self::Raw16,
    ];

    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::Raw8 => 1,
            _ => 2,
        }
    }

    /// Right shift that drops the padding bits of a stored cell.
    pub fn sample_shift(self) -> u32 {
        match self {
            Self::Raw8 | Self::Raw16 => 0,
            Self::Raw10Unpacked => 6,
            Self::Raw12Unpacked => 4,
            Self::Raw14Unpacked => 2,
        }
    }

    /// Right shift that brings a normalized intensity down to 8 bits.
    pub fn output_shift(self) -> u32 {
        self.significant_bits() - 8
    }

    pub fn significant_bits(self) -> u32 {
        match self {
            Self::Raw8 => 8,
            Self::Raw10Unpacked => 10,
            Self::Raw12Unpacked => 12,
            Self::Raw14Unpacked => 14,
            Self::Raw16 => 16,
        }
    }

    /// Smallest 16-bit-cell encoding able to carry `bits` significant bits.
    pub fn for_bit_depth(bits: u32) -> Result<Self> {
        match bits {
            0..=10 => Ok(Self::Raw10Unpacked),
            11..=12 => Ok(Self::Raw12Unpacked),
            13..=14 => Ok(Self::Raw14Unpacked),
            15..=16 => Ok(Self::Raw16),
            _ => Err(ConversionError::UnsupportedEncoding(format!("{bits}-bit samples"))),
        }
    }

    /// Minimum row length in bytes for `width` samples, `None` if it
    /// does not fit in `usize`.
    pub fn min_stride(self, width: usize) -> Option<usize> {
        width.checked_mul(self.bytes_per_sample())
    }
}

impl fmt::Display for SampleEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Raw8 => "RAW8",
            Self::Raw10Unpacked => "RAW10_UNPACKED",
            Self::Raw12Unpacked => "RAW12_UNPACKED",
            Self::Raw14Unpacked => "RAW14_UNPACKED",
            Self::Raw16 => "RAW16",
        })
    }
}

impl FromStr for SampleEncoding {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "RAW8" => Ok(Self::Raw8),
            "RAW10_UNPACKED" => Ok(Self::Raw10Unpacked),
            "RAW12_UNPACKED" => Ok(Self::Raw12Unpacked),
            "RAW14_UNPACKED" => Ok(Self::Raw14Unpacked),
            "RAW16" | "RAW16_UNPACKED" => Ok(Self::Raw16),
            _ => Err(ConversionError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl TryFrom<u32> for SampleEncoding {
    type Error = ConversionError;

    fn try_from(code: u32) -> Result<Self> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| ConversionError::UnsupportedEncoding(format!("code {code}")))
    }
}

/// Bytes covered by `height` rows of `stride` bytes. Geometry whose size
/// overflows `usize` cannot describe a real buffer.
pub(crate) fn frame_len(stride: usize, width: usize, height: usize) -> Result<usize> {
    stride
        .checked_mul(height)
        .ok_or(ConversionError::InvalidDimensions(width, height))
}

/// Read-only view over caller-owned raw sensor bytes.
#[derive(Debug, Clone, Copy)]
pub struct RawBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    encoding: SampleEncoding,
}

impl<'a> RawBuffer<'a> {
    /// Tightly packed rows: `stride = width * bytes_per_sample`.
    pub fn new(data: &'a [u8], width: usize, height: usize, encoding: SampleEncoding) -> Result<Self> {
        let stride = encoding
            .min_stride(width)
            .ok_or(ConversionError::InvalidDimensions(width, height))?;
        Self::with_stride(data, width, height, stride, encoding)
    }

    pub fn with_stride(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        encoding: SampleEncoding,
    ) -> Result<Self> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
        let min = encoding
            .min_stride(width)
            .ok_or(ConversionError::InvalidDimensions(width, height))?;
        if stride < min {
            return Err(ConversionError::StrideTooSmall { stride, min });
        }
        let expected = frame_len(stride, width, height)?;
        if data.len() < expected {
            return Err(ConversionError::BufferTooSmall { expected, got: data.len() });
        }

        Ok(Self { data, width, height, stride, encoding })
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
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

    pub fn encoding(&self) -> SampleEncoding {
        self.encoding
    }
}

/// Raw sensor image owned by a reader
#[derive(Debug, Clone)]
pub struct RawImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Bytes per row
    pub stride: usize,
    /// Layout of each sample
    pub encoding: SampleEncoding,
    /// Raw sample bytes, `stride * height` long
    pub data: Vec<u8>,
    /// CFA layout reported by the source, if it carries one
    pub cfa: Option<CfaPattern>,
}

impl RawImageData {
    pub fn as_buffer(&self) -> Result<RawBuffer<'_>> {
        RawBuffer::with_stride(&self.data, self.width, self.height, self.stride, self.encoding)
    }
}
