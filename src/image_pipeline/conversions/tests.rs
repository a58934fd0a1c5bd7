use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::RawToRgbPipeline;
use crate::image_pipeline::debayer::{CfaPattern, RgbImageData};
use crate::image_pipeline::output::{ConversionConfig, OutputFormat, RgbWriter};
use crate::image_pipeline::raw::{RawImageData, RawImageReader, SampleEncoding};

struct MockReader {
    should_fail: bool,
    mock_data: Option<RawImageData>,
}

impl MockReader {
    fn ok() -> Self {
        Self { should_fail: false, mock_data: None }
    }

    fn with(data: RawImageData) -> Self {
        Self { should_fail: false, mock_data: Some(data) }
    }
}

impl RawImageReader for MockReader {
    fn read_raw(&self, _bytes: &[u8]) -> Result<RawImageData> {
        if self.should_fail {
            return Err(ConversionError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self.mock_data.clone().unwrap_or_else(|| uniform_raw(16, 16, 0x80, None)))
    }
}

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<RgbImageData>>>,
}

impl MockWriter {
    fn new(written_data: Arc<Mutex<Vec<RgbImageData>>>) -> Self {
        Self { should_fail: false, written_data }
    }
}

impl RgbWriter for MockWriter {
    fn write_rgb(&self, image: &RgbImageData, _output: &mut dyn Write, _config: &ConversionConfig) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::EncodeError("Mock encode error".to_string()));
        }
        self.written_data.lock().unwrap().push(image.clone());
        Ok(())
    }
}

fn uniform_raw(width: usize, height: usize, value: u8, cfa: Option<CfaPattern>) -> RawImageData {
    RawImageData {
        width,
        height,
        stride: width,
        encoding: SampleEncoding::Raw8,
        data: vec![value; width * height],
        cfa,
    }
}

/// Red sites 200, everything else 0, laid out as RGGB.
fn rggb_red_only(width: usize, height: usize, cfa: Option<CfaPattern>) -> RawImageData {
    let mut image = uniform_raw(width, height, 0, cfa);
    for y in (0..height).step_by(2) {
        for x in (0..width).step_by(2) {
            image.data[y * width + x] = 200;
        }
    }
    image
}

#[test]
fn test_successful_conversion() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let pipeline = RawToRgbPipeline::with_custom(
        MockReader::ok(),
        MockWriter::new(written.clone()),
        ConversionConfig::default(),
    );

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake raw data", &mut output);

    assert!(result.is_ok());
    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert!(written[0].data.iter().all(|&b| b == 0x80));
}

#[test]
fn test_reader_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader { should_fail: true, mock_data: None };
    let pipeline = RawToRgbPipeline::with_custom(reader, MockWriter::new(written.clone()), ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake raw data", &mut output);

    assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_decode_failure_creates_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.arw");
    let output = dir.path().join("output.tiff");
    std::fs::write(&input, b"fake raw data").unwrap();

    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader { should_fail: true, mock_data: None };
    let pipeline = RawToRgbPipeline::with_custom(reader, MockWriter::new(written), ConversionConfig::default());

    let result = pipeline.convert_file(&input, &output);

    assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
    assert!(!output.exists());
}

#[test]
fn test_writer_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter { should_fail: true, written_data: written };
    let pipeline = RawToRgbPipeline::with_custom(MockReader::ok(), writer, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake raw data", &mut output);

    assert!(matches!(result.unwrap_err(), ConversionError::EncodeError(_)));
}

#[test]
fn test_dimension_validation_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader::with(uniform_raw(1, 8, 0, None));
    let pipeline = RawToRgbPipeline::with_custom(reader, MockWriter::new(written.clone()), ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake raw data", &mut output);

    assert!(matches!(result.unwrap_err(), ConversionError::InvalidDimensions(1, 8)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_dimension_validation_disabled_still_guards_buffers() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader::with(uniform_raw(1, 8, 0, None));
    let config = ConversionConfig::builder().validate_dimensions(false).build();
    let pipeline = RawToRgbPipeline::with_custom(reader, MockWriter::new(written), config);

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake raw data", &mut output);

    // The raw buffer view refuses a geometry the border policy cannot serve.
    assert!(matches!(result.unwrap_err(), ConversionError::InvalidDimensions(1, 8)));
}

#[test]
fn test_cfa_from_reader_metadata() {
    let written = Arc::new(Mutex::new(Vec::new()));
    // Red sites at (even, even) only make sense as RGGB; read as BGGR they
    // become blue.
    let reader = MockReader::with(rggb_red_only(6, 6, Some(CfaPattern::Bggr)));
    let pipeline = RawToRgbPipeline::with_custom(reader, MockWriter::new(written.clone()), ConversionConfig::default());

    pipeline.convert(b"", &mut Cursor::new(Vec::new())).unwrap();

    let image = &written.lock().unwrap()[0];
    assert_eq!(image.pixel(2, 2), [0, 0, 200]);
}

#[test]
fn test_configured_cfa_overrides_metadata() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader::with(rggb_red_only(6, 6, Some(CfaPattern::Bggr)));
    let config = ConversionConfig::builder().cfa(CfaPattern::Rggb).build();
    let pipeline = RawToRgbPipeline::with_custom(reader, MockWriter::new(written.clone()), config);

    pipeline.convert(b"", &mut Cursor::new(Vec::new())).unwrap();

    let image = &written.lock().unwrap()[0];
    assert_eq!(image.pixel(2, 2), [200, 0, 0]);
    // Blue site: red from the four diagonals
    assert_eq!(image.pixel(3, 3), [200, 0, 0]);
    // Green on a red row: red from left/right
    assert_eq!(image.pixel(2, 3), [200, 0, 0]);
    // Green on a blue row: red from above/below
    assert_eq!(image.pixel(3, 2), [200, 0, 0]);
}

#[test]
fn test_cfa_defaults_to_rggb() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader::with(rggb_red_only(4, 4, None));
    let pipeline = RawToRgbPipeline::with_custom(reader, MockWriter::new(written.clone()), ConversionConfig::default());

    pipeline.convert(b"", &mut Cursor::new(Vec::new())).unwrap();

    assert_eq!(written.lock().unwrap()[0].pixel(0, 0), [200, 0, 0]);
}

#[test]
fn test_set_config_switches_engine() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = RawToRgbPipeline::with_custom(
        MockReader::ok(),
        MockWriter::new(written),
        ConversionConfig::default(),
    );
    assert!(!pipeline.config().parallel);

    pipeline.set_config(
        ConversionConfig::builder()
            .parallel(true)
            .output_format(OutputFormat::Pnm)
            .build(),
    );
    assert!(pipeline.config().parallel);
    assert_eq!(pipeline.config().output_format, OutputFormat::Pnm);
    pipeline.convert(b"", &mut Cursor::new(Vec::new())).unwrap();
}
