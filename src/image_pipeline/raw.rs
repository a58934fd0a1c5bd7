//! RAW image reading module
//!
//! Sample encodings, the borrowed raw buffer view handed to the debayer
//! engine, and the readers that produce owned raw frames.

mod reader;
mod plain_reader;
mod rawloader_reader;
pub mod types;

pub use reader::RawImageReader;
pub use plain_reader::PlainRawReader;
pub use rawloader_reader::RawLoaderReader;
pub use types::{RawBuffer, RawImageData, SampleEncoding, MIN_DIMENSION};
