//! Per-site bilinear reconstruction.
//!
//! Each CFA site samples one color; the other two are estimated from the
//! neighbors within two pixels. Every mean is an integer floor division.

use std::cmp::Ordering;

use super::sampler::BorderSampler;

/// Which color was sampled at a site, and on which row a green sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Red,
    /// Green on a red row: red to the left/right, blue above/below.
    GreenRed,
    /// Green on a blue row: blue to the left/right, red above/below.
    GreenBlue,
    Blue,
}

impl Phase {
    /// (R, G, B) at raw-sample scale.
    #[inline]
    pub(crate) fn reconstruct(self, s: &BorderSampler<'_>, row: isize, col: isize) -> [u16; 3] {
        match self {
            Self::Red => {
                let r = s.at(col, row);
                [r, directed_green(s, row, col), diagonal_mean(s, row, col)]
            }
            Self::Blue => {
                let b = s.at(col, row);
                [diagonal_mean(s, row, col), directed_green(s, row, col), b]
            }
            Self::GreenRed => {
                let g = s.at(col, row);
                [horizontal_mean(s, row, col), g, vertical_mean(s, row, col)]
            }
            Self::GreenBlue => {
                let g = s.at(col, row);
                [vertical_mean(s, row, col), g, horizontal_mean(s, row, col)]
            }
        }
    }
}

#[inline]
fn mean2(a: u16, b: u16) -> u16 {
    ((a as u32 + b as u32) / 2) as u16
}

#[inline]
fn mean4(a: u16, b: u16, c: u16, d: u16) -> u16 {
    ((a as u32 + b as u32 + c as u32 + d as u32) / 4) as u16
}

#[inline]
fn horizontal_mean(s: &BorderSampler<'_>, row: isize, col: isize) -> u16 {
    mean2(s.at(col - 1, row), s.at(col + 1, row))
}

#[inline]
fn vertical_mean(s: &BorderSampler<'_>, row: isize, col: isize) -> u16 {
    mean2(s.at(col, row - 1), s.at(col, row + 1))
}

#[inline]
fn diagonal_mean(s: &BorderSampler<'_>, row: isize, col: isize) -> u16 {
    mean4(
        s.at(col - 1, row - 1),
        s.at(col + 1, row - 1),
        s.at(col + 1, row + 1),
        s.at(col - 1, row + 1),
    )
}

/// Green at a red or blue site, averaged along the axis where the same-color
/// samples two steps away differ least; all four greens on a tie.
#[inline]
fn directed_green(s: &BorderSampler<'_>, row: isize, col: isize) -> u16 {
    let up = s.at(col, row - 1);
    let right = s.at(col + 1, row);
    let down = s.at(col, row + 1);
    let left = s.at(col - 1, row);

    let vertical = s.at(col, row - 2).abs_diff(s.at(col, row + 2));
    let horizontal = s.at(col + 2, row).abs_diff(s.at(col - 2, row));

    match vertical.cmp(&horizontal) {
        Ordering::Less => mean2(up, down),
        Ordering::Greater => mean2(right, left),
        Ordering::Equal => mean4(up, right, down, left),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::types::{RawBuffer, SampleEncoding};

    // Center (2,2) sits two pixels from every edge, so no reflection is involved.
    const GRID: [[u8; 5]; 5] = [
        [0, 0, 100, 0, 0],
        [0, 1, 40, 2, 0],
        [10, 7, 100, 9, 200],
        [0, 3, 41, 5, 0],
        [0, 0, 100, 0, 0],
    ];

    fn reconstruct(grid: [[u8; 5]; 5], phase: Phase) -> [u16; 3] {
        let data: Vec<u8> = grid.iter().flatten().copied().collect();
        let raw = RawBuffer::new(&data, 5, 5, SampleEncoding::Raw8).unwrap();
        phase.reconstruct(&BorderSampler::new(&raw), 2, 2)
    }

    #[test]
    fn red_site_prefers_vertical_when_flatter() {
        // vertical |100-100| = 0 < horizontal |200-10|
        assert_eq!(reconstruct(GRID, Phase::Red), [100, 40, 2]);
    }

    #[test]
    fn red_site_prefers_horizontal_when_flatter() {
        let mut grid = GRID;
        grid[0][2] = 10;
        grid[4][2] = 200;
        grid[2][0] = 100;
        grid[2][4] = 100;
        assert_eq!(reconstruct(grid, Phase::Red), [100, 8, 2]);
    }

    #[test]
    fn red_site_tie_uses_all_four_greens() {
        let mut grid = GRID;
        grid[2][0] = 100;
        grid[2][4] = 100;
        // (40 + 9 + 41 + 7) / 4 = 24.25
        assert_eq!(reconstruct(grid, Phase::Red), [100, 24, 2]);
    }

    #[test]
    fn blue_site_mirrors_red_site() {
        assert_eq!(reconstruct(GRID, Phase::Blue), [2, 40, 100]);
    }

    #[test]
    fn green_sites_swap_axes() {
        // horizontal (7 + 9) / 2 = 8, vertical (40 + 41) / 2 = 40
        assert_eq!(reconstruct(GRID, Phase::GreenRed), [8, 100, 40]);
        assert_eq!(reconstruct(GRID, Phase::GreenBlue), [40, 100, 8]);
    }

    #[test]
    fn means_floor_instead_of_rounding() {
        assert_eq!(mean2(1, 2), 1);
        assert_eq!(mean4(1, 1, 1, 2), 1);
        assert_eq!(mean4(u16::MAX, u16::MAX, u16::MAX, u16::MAX), u16::MAX);
        assert_eq!(mean2(u16::MAX, u16::MAX - 1), u16::MAX - 1);
    }

    #[test]
    fn uniform_field_is_reproduced() {
        let grid = [[77u8; 5]; 5];
        for phase in [Phase::Red, Phase::GreenRed, Phase::GreenBlue, Phase::Blue] {
            assert_eq!(reconstruct(grid, phase), [77, 77, 77], "{phase:?}");
        }
    }
}
