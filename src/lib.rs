//! Bilinear demosaicing of 2x2 Bayer sensor data into interleaved RGB888.
//!
//! ```
//! use bayer_rgb::image_pipeline::{CfaPattern, CpuDebayer, Interpolation, RawBuffer, RgbBuffer, SampleEncoding};
//!
//! // 4x4 RGGB frame, 12-bit samples left-justified in 16-bit cells
//! let raw_bytes: Vec<u8> = [0xfff0u16; 16].iter().flat_map(|w| w.to_le_bytes()).collect();
//! let raw = RawBuffer::new(&raw_bytes, 4, 4, SampleEncoding::Raw12Unpacked)?;
//!
//! let mut rgb_bytes = vec![0u8; 4 * 4 * 3];
//! let mut rgb = RgbBuffer::new(&mut rgb_bytes, 4, 4)?;
//!
//! CpuDebayer::new(Interpolation::Bilinear).convert(&raw, CfaPattern::Rggb, &mut rgb)?;
//! assert!(rgb_bytes.iter().all(|&b| b == 255));
//! # Ok::<(), bayer_rgb::image_pipeline::ConversionError>(())
//! ```

pub mod image_pipeline;
pub mod logger;
