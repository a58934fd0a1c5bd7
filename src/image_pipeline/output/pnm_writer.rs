use std::io::Write;

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::debayer::types::RgbImageData;
use crate::image_pipeline::output::types::{ConversionConfig, OutputFormat};
use crate::image_pipeline::output::writer::RgbWriter;

/// Writes RGB888 rows as-is, preceded by a binary PPM header when the
/// configured format is [`OutputFormat::Pnm`]. Row padding is not written.
pub struct PnmWriter;

impl RgbWriter for PnmWriter {
    fn write_rgb(&self, image: &RgbImageData, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        let header = config.output_format == OutputFormat::Pnm;
        debug!(header, "Writing RGB888 image: {}x{}", image.width, image.height);

        if header {
            write!(output, "P6\n{} {}\n255\n", image.width, image.height)?;
        }
        for row in image.rows() {
            output.write_all(row)?;
        }
        output.flush()?;

        Ok(())
    }
}
