mod cli;

use anyhow::Context;
use bayer_rgb::image_pipeline::{
    ConversionConfig, FormatWriter, PlainRawReader, RawImageReader, RawToRgbPipeline, RgbWriter,
};
use bayer_rgb::logger;
use clap::Parser;
use tracing::info;

use cli::Cli;

fn run<R: RawImageReader, W: RgbWriter>(pipeline: RawToRgbPipeline<R, W>, cli: &Cli) -> anyhow::Result<()> {
    pipeline
        .convert_file(&cli.input, &cli.output)
        .with_context(|| format!("converting {}", cli.input.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(if cli.verbose { "debug" } else { "info" });

    let mut builder = ConversionConfig::builder()
        .output_format(cli.output_format)
        .compression(cli.compression)
        .parallel(cli.parallel);
    if let Some(cfa) = cli.cfa {
        builder = builder.cfa(cfa);
    }
    let config = builder.build();

    info!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        format = %config.output_format,
        "Starting bayer_rgb"
    );

    match cli.plain_geometry() {
        Some((width, height)) => {
            let mut reader = PlainRawReader::new(width, height, cli.format);
            if let Some(stride) = cli.stride {
                reader = reader.with_stride(stride);
            }
            info!(
                width,
                height,
                stride = ?reader.stride(),
                encoding = %reader.encoding(),
                "Reading plain sensor dump"
            );
            run(RawToRgbPipeline::with_custom(reader, FormatWriter, config), &cli)?;
        }
        None => {
            info!("Decoding camera raw file");
            run(RawToRgbPipeline::new(config), &cli)?;
        }
    }

    info!("Conversion successful");
    Ok(())
}
