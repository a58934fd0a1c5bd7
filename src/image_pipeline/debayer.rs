//! Debayering module for converting Bayer pattern RAW images to RGB
//!
//! The engine is split along the data path of a single output pixel:
//! the pattern table picks a reconstruction phase, the phase pulls up to
//! twelve neighbors through the border-safe sampler, and the writer shifts
//! the result down to RGB888.

mod cpu_debayer;
mod pattern;
mod phase;
mod sampler;
mod writer;
pub mod types;

pub use cpu_debayer::CpuDebayer;
pub use types::{CfaPattern, Channel, Interpolation, RgbBuffer, RgbImageData, RGB_BYTES_PER_PIXEL};
