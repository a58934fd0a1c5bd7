use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode RAW image: {0}")]
    DecodeError(String),

    #[error("Failed to encode output image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Raw and RGB dimensions differ: raw {raw_width}x{raw_height}, rgb {rgb_width}x{rgb_height}")]
    DimensionMismatch {
        raw_width: usize,
        raw_height: usize,
        rgb_width: usize,
        rgb_height: usize,
    },

    #[error("Stride too small: {stride} bytes, need at least {min}")]
    StrideTooSmall { stride: usize, min: usize },

    #[error("Buffer too small: expected at least {expected} bytes, got {got}")]
    BufferTooSmall { expected: usize, got: usize },

    #[error("Unsupported sample encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Unsupported interpolation method: {0}")]
    UnsupportedInterpolation(String),

    #[error("Unsupported CFA pattern: {0}")]
    UnsupportedCfa(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConversionError {
    /// True for errors caused by an unsupported encoding, method or pattern
    /// selector, which are reported before any pixel is processed.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEncoding(_) | Self::UnsupportedInterpolation(_) | Self::UnsupportedCfa(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
