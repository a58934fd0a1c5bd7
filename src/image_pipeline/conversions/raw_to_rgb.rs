use tracing::{debug, info, instrument};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    debayer::{CfaPattern, CpuDebayer, RgbImageData},
    output::{ConversionConfig, FormatWriter, RgbWriter},
    raw::{RawImageReader, RawLoaderReader, MIN_DIMENSION},
};

pub struct RawToRgbPipeline<R: RawImageReader, W: RgbWriter> {
    reader: R,
    writer: W,
    debayer: CpuDebayer,
    config: ConversionConfig,
}

impl RawToRgbPipeline<RawLoaderReader, FormatWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_custom(RawLoaderReader, FormatWriter, config)
    }
}

impl<R: RawImageReader, W: RgbWriter> RawToRgbPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        let debayer = Self::debayer_for(&config);
        Self {
            reader,
            writer,
            debayer,
            config,
        }
    }

    fn debayer_for(config: &ConversionConfig) -> CpuDebayer {
        CpuDebayer::new(config.interpolation).with_parallel(config.parallel)
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Configured pattern first, then what the file says, then RGGB.
    fn resolve_cfa(&self, reported: Option<CfaPattern>) -> CfaPattern {
        match (self.config.cfa, reported) {
            (Some(configured), Some(reported)) if configured != reported => {
                debug!(%configured, %reported, "Configured CFA overrides file metadata");
                configured
            }
            (Some(configured), _) => configured,
            (None, Some(reported)) => reported,
            (None, None) => CfaPattern::default(),
        }
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        info!("Starting RAW to RGB conversion");

        let rgb_image = self.debayer_input(input_data)?;
        self.write_output(&rgb_image, output)
    }

    /// Decodes, validates and demosaics `input_data` without touching any output.
    fn debayer_input(&self, input_data: &[u8]) -> Result<RgbImageData> {
        let raw_image = {
            let _span = tracing::info_span!("decode_raw").entered();
            self.reader.read_raw(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = raw_image.width,
                height = raw_image.height
            ).entered();
            self.validate_dimensions(raw_image.width, raw_image.height)?;
        }

        let cfa = self.resolve_cfa(raw_image.cfa);

        let _span = tracing::info_span!("debayer", %cfa, encoding = %raw_image.encoding).entered();
        self.debayer.process(&raw_image, cfa)
    }

    fn write_output(&self, rgb_image: &RgbImageData, output: &mut dyn Write) -> Result<()> {
        {
            let _span = tracing::info_span!("encode_output", format = %self.config.output_format).entered();
            self.writer.write_rgb(rgb_image, output, &self.config)?;
        }

        info!(
            width = rgb_image.width,
            height = rgb_image.height,
            "Conversion complete"
        );
        Ok(())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // The output file only appears once there is an image to put in it.
        let rgb_image = self.debayer_input(&input_data)?;

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.write_output(&rgb_image, &mut output_file)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.debayer = Self::debayer_for(&config);
        self.config = config;
    }
}
