//! RGB output module
//!
//! Writers for the debayered image (headerless RGB888, binary PPM, TIFF)
//! and the conversion configuration they share with the pipeline.

mod writer;
mod pnm_writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::{FormatWriter, RgbWriter};
pub use pnm_writer::PnmWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder, OutputFormat, TiffCompression};
