//! Raw-scale RGB to RGB888 output.

use super::pattern::{phase_at, PhaseRow};
use super::sampler::BorderSampler;
use super::types::RGB_BYTES_PER_PIXEL;

/// Shifts an intensity down to 8 bits, clamping instead of wrapping.
#[inline]
pub(crate) fn to_channel(value: u16, shift: u32) -> u8 {
    (value >> shift).min(u8::MAX as u16) as u8
}

/// Reconstructs and writes one output row. `out` must hold at least
/// `width * 3` bytes; anything past that is left alone.
pub(crate) fn write_row(
    sampler: &BorderSampler<'_>,
    phases: &PhaseRow,
    row: usize,
    width: usize,
    shift: u32,
    out: &mut [u8],
) {
    let pixels = out[..width * RGB_BYTES_PER_PIXEL].chunks_exact_mut(RGB_BYTES_PER_PIXEL);
    for (col, px) in pixels.enumerate() {
        let rgb = phase_at(phases, row, col).reconstruct(sampler, row as isize, col as isize);
        px[0] = to_channel(rgb[0], shift);
        px[1] = to_channel(rgb[1], shift);
        px[2] = to_channel(rgb[2], shift);
    }
}
