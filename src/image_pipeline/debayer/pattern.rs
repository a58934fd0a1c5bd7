//! CFA layout to reconstruction phase lookup.

use super::phase::Phase::{self, Blue, GreenBlue, GreenRed, Red};
use super::types::CfaPattern;

/// Phases of one layout, indexed by `(row & 1) << 1 | (col & 1)`.
pub(crate) type PhaseRow = [Phase; 4];

/// One row per [`CfaPattern`], in discriminant order.
const PHASE_TABLE: [PhaseRow; 4] = [
    // RGGB
    [Red, GreenRed, GreenBlue, Blue],
    // BGGR
    [Blue, GreenBlue, GreenRed, Red],
    // GRBG
    [GreenRed, Red, Blue, GreenBlue],
    // GBRG
    [GreenBlue, Blue, Red, GreenRed],
];

#[inline]
pub(crate) fn phases(cfa: CfaPattern) -> &'static PhaseRow {
    &PHASE_TABLE[cfa as usize]
}

#[inline]
pub(crate) fn phase_at(phases: &PhaseRow, row: usize, col: usize) -> Phase {
    phases[((row & 1) << 1) | (col & 1)]
}
