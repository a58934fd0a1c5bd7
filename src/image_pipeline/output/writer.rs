use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::output::pnm_writer::PnmWriter;
use crate::image_pipeline::output::standard_tiff_writer::StandardTiffWriter;
use crate::image_pipeline::output::types::{ConversionConfig, OutputFormat};

pub trait RgbWriter {
    fn write_rgb(&self, image: &RgbImageData, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}

/// Picks the concrete writer from `config.output_format`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormatWriter;

impl RgbWriter for FormatWriter {
    fn write_rgb(&self, image: &RgbImageData, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        match config.output_format {
            OutputFormat::Raw | OutputFormat::Pnm => PnmWriter.write_rgb(image, output, config),
            OutputFormat::Tiff => StandardTiffWriter.write_rgb(image, output, config),
        }
    }
}
