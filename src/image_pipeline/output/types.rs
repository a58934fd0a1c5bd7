//! Output and conversion configuration types

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::ConversionError;
use crate::image_pipeline::debayer::types::{CfaPattern, Interpolation};

/// Container written for the RGB result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Headerless interleaved RGB888 rows
    #[default]
    Raw,
    /// Binary PPM (P6)
    Pnm,
    /// RGB8 TIFF
    Tiff,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Raw => "raw",
            Self::Pnm => "pnm",
            Self::Tiff => "tiff",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "rgb" => Ok(Self::Raw),
            "pnm" | "ppm" => Ok(Self::Pnm),
            "tiff" | "tif" => Ok(Self::Tiff),
            _ => Err(ConversionError::EncodeError(format!("unknown output format '{s}'"))),
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

impl FromStr for TiffCompression {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "lzw" => Ok(Self::Lzw),
            "deflate-fast" => Ok(Self::DeflateFast),
            "deflate" | "deflate-balanced" => Ok(Self::DeflateBalanced),
            "deflate-best" => Ok(Self::DeflateBest),
            _ => Err(ConversionError::EncodeError(format!("unknown TIFF compression '{s}'"))),
        }
    }
}

/// Configuration for RAW to RGB conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Container for the RGB output
    pub output_format: OutputFormat,
    /// Compression method to use for TIFF output
    pub compression: TiffCompression,
    /// Predictor value for TIFF compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to check image dimensions before debayering
    pub validate_dimensions: bool,
    /// CFA layout; overrides whatever the reader reports
    pub cfa: Option<CfaPattern>,
    /// Demosaic method
    pub interpolation: Interpolation,
    /// Whether to debayer rows on the rayon pool
    pub parallel: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Raw,
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            cfa: None,
            interpolation: Interpolation::Bilinear,
            parallel: false,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    output_format: Option<OutputFormat>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    cfa: Option<CfaPattern>,
    interpolation: Option<Interpolation>,
    parallel: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn cfa(mut self, cfa: CfaPattern) -> Self {
        self.cfa = Some(cfa);
        self
    }

    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = Some(interpolation);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            output_format: self.output_format.unwrap_or(default.output_format),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            cfa: self.cfa.or(default.cfa),
            interpolation: self.interpolation.unwrap_or(default.interpolation),
            parallel: self.parallel.unwrap_or(default.parallel),
        }
    }
}
