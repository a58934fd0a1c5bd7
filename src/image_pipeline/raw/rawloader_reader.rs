//! RAW image reader implementation using the rawloader library.
//!
//! Camera raw files (ARW, CR2, NEF, DNG, ...) are decoded by rawloader into
//! right-justified 16-bit samples. This reader derives the sensor bit depth
//! from the white level and re-stores the samples left-justified in the
//! smallest unpacked [`SampleEncoding`] that holds them, so the demosaic
//! engine sees the same layout a sensor dump would have.

use std::io::Cursor;

use rawloader::RawImageData as RawloaderImageData;
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::types::CfaPattern;
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::{RawImageData, SampleEncoding};

/// RAW image reader that uses the rawloader library for decoding.
pub struct RawLoaderReader;

/// Bit depth assumed when the file reports no usable white level.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

/// The bit width of the u16 data type, used for calculating actual bits per sample.
const U16_BITS: u32 = 16;

impl RawImageReader for RawLoaderReader {
    fn read_raw(&self, bytes: &[u8]) -> Result<RawImageData> {
        debug!("Decoding camera RAW image, {} bytes", bytes.len());

        let decoded = rawloader::decode(&mut Cursor::new(bytes))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        if decoded.cpp != 1 {
            return Err(ConversionError::DecodeError(format!(
                "expected single-channel CFA data, got {} components per pixel",
                decoded.cpp
            )));
        }

        let cfa = decoded
            .cfa
            .name
            .parse::<CfaPattern>()
            .map_err(|_| ConversionError::UnsupportedCfa(decoded.cfa.name.clone()))?;

        let width = decoded.width;
        let height = decoded.height;
        debug!("Decoded image: {}x{}, CFA {}", width, height, cfa);

        let (samples, bits_per_sample) = match decoded.data {
            RawloaderImageData::Integer(values) => {
                let max_white_level = decoded.whitelevels.iter().max().copied().unwrap_or(u16::MAX);
                (values, bits_from_white_level(max_white_level))
            }
            // Normalized floats are scaled to the full u16 range
            RawloaderImageData::Float(values) => {
                warn!("Floating point RAW data, scaling to 16-bit");
                let scaled = values
                    .iter()
                    .map(|&v| (v.clamp(0.0, 1.0) * u16::MAX as f32) as u16)
                    .collect();
                (scaled, U16_BITS)
            }
        };

        let encoding = SampleEncoding::for_bit_depth(bits_per_sample)?;
        debug!(
            "Sensor bit depth {} stored as {}",
            bits_per_sample, encoding
        );

        let stride = encoding
            .min_stride(width)
            .ok_or(ConversionError::InvalidDimensions(width, height))?;
        let image = RawImageData {
            width,
            height,
            stride,
            encoding,
            data: left_justify(&samples, encoding),
            cfa: Some(cfa),
        };
        image.as_buffer()?;
        Ok(image)
    }
}

/// Minimum number of bits able to represent `white_level`,
/// e.g. 4095 -> 12, 16383 -> 14.
fn bits_from_white_level(white_level: u16) -> u32 {
    if white_level == 0 {
        DEFAULT_BITS_PER_SAMPLE
    } else {
        U16_BITS - white_level.leading_zeros()
    }
}

/// Moves right-justified samples into the high bits of little-endian cells.
/// Values above the encoding's range are clipped first.
fn left_justify(samples: &[u16], encoding: SampleEncoding) -> Vec<u8> {
    let max = ((1u32 << encoding.significant_bits()) - 1) as u16;
    let pad = encoding.sample_shift();
    samples
        .iter()
        .flat_map(|&v| (v.min(max) << pad).to_le_bytes())
        .collect()
}
