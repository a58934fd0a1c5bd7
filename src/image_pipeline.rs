//! Image processing pipeline module
//!
//! Bayer raw frames go in, RGB888 comes out. The modules follow that path:
//! reading raw sensor data, demosaicing it, and writing the result.

pub mod raw;
pub mod debayer;
pub mod output;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use raw::{
    PlainRawReader,
    RawBuffer,
    RawImageData,
    RawImageReader,
    RawLoaderReader,
    SampleEncoding,
};

pub use debayer::{
    CfaPattern,
    CpuDebayer,
    Interpolation,
    RgbBuffer,
    RgbImageData,
};

pub use output::{
    ConversionConfig,
    ConversionConfigBuilder,
    FormatWriter,
    OutputFormat,
    PnmWriter,
    RgbWriter,
    StandardTiffWriter,
    TiffCompression,
};

pub use conversions::{
    RawToRgbPipeline,
};
