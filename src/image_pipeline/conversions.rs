//! Pipeline conversions module
//!
//! Orchestrates reading a raw frame, debayering it and writing the RGB result.

mod raw_to_rgb;

#[cfg(test)]
mod tests;

pub use raw_to_rgb::RawToRgbPipeline;
