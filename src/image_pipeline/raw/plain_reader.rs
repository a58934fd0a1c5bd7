//! Reader for headerless sensor dumps.

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::reader::RawImageReader;
use crate::image_pipeline::raw::types::{frame_len, RawImageData, SampleEncoding};

/// Reads a bare sample dump whose geometry is known up front.
///
/// The file carries no metadata, so width, height and encoding come from the
/// caller. When no stride is given rows are assumed tightly packed. Trailing
/// bytes past `stride * height` are ignored.
#[derive(Debug, Clone)]
pub struct PlainRawReader {
    width: usize,
    height: usize,
    stride: Option<usize>,
    encoding: SampleEncoding,
}

impl PlainRawReader {
    pub fn new(width: usize, height: usize, encoding: SampleEncoding) -> Self {
        Self {
            width,
            height,
            stride: None,
            encoding,
        }
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = Some(stride);
        self
    }

    /// Row length in bytes, `None` when a packed row would overflow `usize`.
    pub fn stride(&self) -> Option<usize> {
        self.stride
            .or_else(|| self.encoding.min_stride(self.width))
    }

    pub fn encoding(&self) -> SampleEncoding {
        self.encoding
    }
}

impl RawImageReader for PlainRawReader {
    fn read_raw(&self, bytes: &[u8]) -> Result<RawImageData> {
        let stride = self
            .stride()
            .ok_or(ConversionError::InvalidDimensions(self.width, self.height))?;
        let expected = frame_len(stride, self.width, self.height)?;
        debug!(
            width = self.width,
            height = self.height,
            stride,
            encoding = %self.encoding,
            "Reading plain raw dump, {} bytes",
            bytes.len()
        );

        if bytes.len() < expected {
            return Err(ConversionError::BufferTooSmall {
                expected,
                got: bytes.len(),
            });
        }

        let image = RawImageData {
            width: self.width,
            height: self.height,
            stride,
            encoding: self.encoding,
            data: bytes[..expected].to_vec(),
            cfa: None,
        };
        // Surface geometry errors here rather than at debayer time.
        image.as_buffer()?;
        Ok(image)
    }
}
