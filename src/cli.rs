use std::path::PathBuf;

use bayer_rgb::image_pipeline::{CfaPattern, OutputFormat, SampleEncoding, TiffCompression};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bayer_rgb",
    version,
    about = "Demosaic Bayer raw sensor data into RGB888"
)]
pub(crate) struct Cli {
    /// Input file: a headerless sensor dump when --width/--height are given,
    /// otherwise a camera raw file (ARW, CR2, NEF, DNG, ...)
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Output file
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, short = 'w', requires = "height")]
    pub width: Option<usize>,

    /// Image height in pixels
    #[arg(long, short = 'v', requires = "width")]
    pub height: Option<usize>,

    /// Bytes per row; defaults to width times bytes per sample
    #[arg(long, short = 's', requires = "width")]
    pub stride: Option<usize>,

    /// Sample encoding: RAW8, RAW10_UNPACKED, RAW12_UNPACKED, RAW14_UNPACKED, RAW16
    #[arg(long, short = 'f', default_value = "RAW12_UNPACKED")]
    pub format: SampleEncoding,

    /// Color filter array: RGGB, BGGR, GRBG, GBRG. Camera raw files carry their own.
    #[arg(long, short = 'c')]
    pub cfa: Option<CfaPattern>,

    /// Output container: raw, pnm, tiff
    #[arg(long, default_value = "raw")]
    pub output_format: OutputFormat,

    /// TIFF compression: none, lzw, deflate-fast, deflate, deflate-best
    #[arg(long, default_value = "none")]
    pub compression: TiffCompression,

    /// Debayer rows in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(long, short = 'd')]
    pub verbose: bool,
}

impl Cli {
    /// Geometry of a plain dump, when one was described.
    pub(crate) fn plain_geometry(&self) -> Option<(usize, usize)> {
        self.width.zip(self.height)
    }
}
