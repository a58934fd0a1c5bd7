//! Border-safe raw sample access.

use crate::image_pipeline::raw::types::RawBuffer;

/// Maps a coordinate up to 2 outside `0..len` back inside by stepping 2
/// toward the image. Stepping by 2 keeps the parity, so the reflected site
/// carries the same filter color as the one asked for.
#[inline]
pub(crate) fn reflect(coord: isize, len: usize) -> usize {
    let len = len as isize;
    let c = if coord < 0 {
        coord + 2
    } else if coord >= len {
        coord - 2
    } else {
        coord
    };
    debug_assert!((0..len).contains(&c), "coordinate {coord} too far outside 0..{len}");
    c as usize
}

/// Reads normalized intensities from a raw buffer at possibly out-of-range
/// coordinates.
#[derive(Clone, Copy)]
pub(crate) struct BorderSampler<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    bytes_per_sample: usize,
    shift: u32,
}

impl<'a> BorderSampler<'a> {
    pub(crate) fn new(raw: &RawBuffer<'a>) -> Self {
        let encoding = raw.encoding();
        Self {
            data: raw.data(),
            width: raw.width(),
            height: raw.height(),
            stride: raw.stride(),
            bytes_per_sample: encoding.bytes_per_sample(),
            shift: encoding.sample_shift(),
        }
    }

    /// Intensity at (`col`, `row`) with padding bits dropped.
    #[inline]
    pub(crate) fn at(&self, col: isize, row: isize) -> u16 {
        let row = reflect(row, self.height);
        let col = reflect(col, self.width);
        let offset = row * self.stride + col * self.bytes_per_sample;

        if self.bytes_per_sample == 1 {
            self.data[offset] as u16
        } else {
            u16::from_le_bytes([self.data[offset], self.data[offset + 1]]) >> self.shift
        }
    }
}
