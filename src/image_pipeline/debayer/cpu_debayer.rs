use rayon::prelude::*;
use tracing::debug;

use super::pattern::phases;
use super::sampler::BorderSampler;
use super::types::{CfaPattern, Interpolation, RgbBuffer, RgbImageData};
use super::writer::write_row;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::types::{RawBuffer, RawImageData};

/// Bayer to RGB888 demosaic engine.
///
/// Holds no per-image state; one instance can convert any number of frames,
/// from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct CpuDebayer {
    interpolation: Interpolation,
    parallel: bool,
}

impl CpuDebayer {
    pub fn new(interpolation: Interpolation) -> Self {
        Self {
            interpolation,
            parallel: false,
        }
    }

    /// Convert row chunks on the rayon pool. Output is identical to the
    /// serial path.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Demosaics `raw` into the caller-owned `out`.
    ///
    /// Every pixel of `out` is written exactly once. All checks happen
    /// before the first write, so on error `out` is untouched.
    pub fn convert(&self, raw: &RawBuffer<'_>, cfa: CfaPattern, out: &mut RgbBuffer<'_>) -> Result<()> {
        let write = match self.interpolation {
            Interpolation::Bilinear => write_row,
        };

        if out.width() != raw.width() || out.height() != raw.height() {
            return Err(ConversionError::DimensionMismatch {
                raw_width: raw.width(),
                raw_height: raw.height(),
                rgb_width: out.width(),
                rgb_height: out.height(),
            });
        }

        let encoding = raw.encoding();
        let shift = encoding.output_shift();
        let width = raw.width();
        let stride = out.stride();
        let sampler = BorderSampler::new(raw);
        let phases = phases(cfa);

        debug!(
            width,
            height = raw.height(),
            %encoding,
            %cfa,
            parallel = self.parallel,
            "Running {} demosaic",
            self.interpolation
        );

        let rows = out.rows_mut();
        if self.parallel {
            rows.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(row, line)| write(&sampler, phases, row, width, shift, line));
        } else {
            rows.chunks_mut(stride)
                .enumerate()
                .for_each(|(row, line)| write(&sampler, phases, row, width, shift, line));
        }

        Ok(())
    }

    /// Allocating variant of [`convert`](Self::convert) for owned frames.
    pub fn process(&self, raw_image: &RawImageData, cfa: CfaPattern) -> Result<RgbImageData> {
        let raw = raw_image.as_buffer()?;
        let mut rgb = RgbImageData::new(raw.width(), raw.height());
        self.convert(&raw, cfa, &mut rgb.as_buffer_mut()?)?;
        Ok(rgb)
    }
}

impl Default for CpuDebayer {
    fn default() -> Self {
        Self::new(Interpolation::Bilinear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::types::SampleEncoding;

    fn gradient_raw(width: usize, height: usize) -> Vec<u8> {
        (0..width * height)
            .flat_map(|i| ((((i * 2731) % 4096) as u16) << 4).to_le_bytes())
            .collect()
    }

    #[test]
    fn repeated_calls_are_identical() {
        let data = gradient_raw(9, 7);
        let raw = RawBuffer::new(&data, 9, 7, SampleEncoding::Raw12Unpacked).unwrap();
        let debayer = CpuDebayer::default();

        let mut first = vec![0u8; 9 * 7 * 3];
        let mut second = vec![0xffu8; 9 * 7 * 3];
        debayer
            .convert(&raw, CfaPattern::Grbg, &mut RgbBuffer::new(&mut first, 9, 7).unwrap())
            .unwrap();
        debayer
            .convert(&raw, CfaPattern::Grbg, &mut RgbBuffer::new(&mut second, 9, 7).unwrap())
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parallel_matches_serial() {
        let (w, h) = (33, 21);
        let data = gradient_raw(w, h);
        let raw = RawBuffer::new(&data, w, h, SampleEncoding::Raw12Unpacked).unwrap();

        for cfa in CfaPattern::ALL {
            let mut serial = vec![0u8; w * h * 3];
            let mut parallel = vec![0u8; w * h * 3];
            CpuDebayer::default()
                .convert(&raw, cfa, &mut RgbBuffer::new(&mut serial, w, h).unwrap())
                .unwrap();
            CpuDebayer::default()
                .with_parallel(true)
                .convert(&raw, cfa, &mut RgbBuffer::new(&mut parallel, w, h).unwrap())
                .unwrap();
            assert_eq!(serial, parallel, "{cfa}");
        }
    }

    #[test]
    fn mismatched_output_is_rejected_untouched() {
        let data = [0x40u8; 4 * 4];
        let raw = RawBuffer::new(&data, 4, 4, SampleEncoding::Raw8).unwrap();
        let mut out = vec![0xaau8; 4 * 3 * 3];
        let err = CpuDebayer::default()
            .convert(&raw, CfaPattern::Rggb, &mut RgbBuffer::new(&mut out, 4, 3).unwrap())
            .unwrap_err();

        assert!(matches!(err, ConversionError::DimensionMismatch { rgb_height: 3, .. }));
        assert!(out.iter().all(|&b| b == 0xaa));
    }

    #[test]
    fn padded_output_rows_keep_their_padding() {
        let data = [200u8; 4 * 2];
        let raw = RawBuffer::new(&data, 4, 2, SampleEncoding::Raw8).unwrap();
        let stride = 4 * 3 + 4;
        let mut out = vec![0x11u8; stride * 2 + 5];
        CpuDebayer::default()
            .with_parallel(true)
            .convert(&raw, CfaPattern::Bggr, &mut RgbBuffer::with_stride(&mut out, 4, 2, stride).unwrap())
            .unwrap();

        for row in out[..stride * 2].chunks(stride) {
            assert!(row[..12].iter().all(|&b| b == 200));
            assert!(row[12..].iter().all(|&b| b == 0x11));
        }
        assert!(out[stride * 2..].iter().all(|&b| b == 0x11));
    }

    #[test]
    fn process_allocates_tight_output() {
        let raw_image = RawImageData {
            width: 2,
            height: 2,
            stride: 4,
            encoding: SampleEncoding::Raw16,
            data: [0xff00u16; 4].iter().flat_map(|w| w.to_le_bytes()).collect(),
            cfa: None,
        };
        let rgb = CpuDebayer::default().process(&raw_image, CfaPattern::Rggb).unwrap();
        assert_eq!(rgb.stride, 6);
        assert_eq!(rgb.data, vec![0xff; 12]);
    }
}
