use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::RawImageData;

/// Source of raw sensor frames.
///
/// Implementations turn file bytes into an owned [`RawImageData`] whose
/// samples already follow one of the supported [`SampleEncoding`]s.
///
/// [`SampleEncoding`]: crate::image_pipeline::raw::types::SampleEncoding
pub trait RawImageReader {
    fn read_raw(&self, bytes: &[u8]) -> Result<RawImageData>;
}
