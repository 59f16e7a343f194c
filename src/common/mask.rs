use std::ops::Deref;

use super::bit_matrix::BitMatrix;
use super::error::{QRError, QRResult};

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern >= 8 {
            return Err(QRError::invalid_argument(format!("Invalid mask pattern {pattern}")));
        }
        Ok(Self(pattern))
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: usize, c: usize) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: usize, _: usize) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: usize, c: usize) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: usize, c: usize) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: usize, c: usize) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: usize, c: usize) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: usize, c: usize) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: usize, c: usize) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate over `(row, column)`; the module is inverted where it holds.
    pub fn mask_function(self) -> fn(usize, usize) -> bool {
        match self.0 {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}


// Penalty
//------------------------------------------------------------------------------

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

pub fn compute_total_penalty(m: &BitMatrix) -> u32 {
    let adj_pen = compute_adjacent_penalty(m, true) + compute_adjacent_penalty(m, false);
    let blk_pen = compute_block_penalty(m);
    let fp_pen = compute_finder_pattern_penalty(m, true) + compute_finder_pattern_penalty(m, false);
    let bal_pen = compute_balance_penalty(m);
    adj_pen + blk_pen + fp_pen + bal_pen
}

// Runs of five or more same colored modules
pub(crate) fn compute_adjacent_penalty(m: &BitMatrix, is_hor: bool) -> u32 {
    let (outer, inner) = if is_hor { (m.height(), m.width()) } else { (m.width(), m.height()) };
    let get = |i: usize, j: usize| if is_hor { m.get(i, j) } else { m.get(j, i) };
    let run_penalty = |len: u32| if len >= 5 { PENALTY_N1 + len - 5 } else { 0 };

    let mut pen = 0;
    for i in 0..outer {
        let mut last = get(i, 0);
        let mut run = 0;
        for j in 0..inner {
            let clr = get(i, j);
            if clr == last {
                run += 1;
            } else {
                pen += run_penalty(run);
                last = clr;
                run = 1;
            }
        }
        pen += run_penalty(run);
    }
    pen
}

// 2x2 blocks of one color
pub(crate) fn compute_block_penalty(m: &BitMatrix) -> u32 {
    let mut pen = 0;
    for r in 0..m.height().saturating_sub(1) {
        for c in 0..m.width().saturating_sub(1) {
            let clr = m.get(r, c);
            if clr == m.get(r + 1, c) && clr == m.get(r, c + 1) && clr == m.get(r + 1, c + 1) {
                pen += PENALTY_N2;
            }
        }
    }
    pen
}

// 1:1:3:1:1 finder-like runs with four light modules on either side
pub(crate) fn compute_finder_pattern_penalty(m: &BitMatrix, is_hor: bool) -> u32 {
    static PATTERN: [bool; 7] = [true, false, true, true, true, false, true];

    let (outer, inner) = if is_hor { (m.height(), m.width()) } else { (m.width(), m.height()) };
    let get = |i: usize, j: usize| if is_hor { m.get(i, j) } else { m.get(j, i) };

    let mut pen = 0;
    for i in 0..outer {
        let is_light = |from: usize, to: usize| (from..to.min(inner)).all(|j| !get(i, j));
        for j in 0..inner.saturating_sub(6) {
            if (0..7).any(|k| get(i, j + k) != PATTERN[k]) {
                continue;
            }
            if is_light(j.saturating_sub(4), j) || is_light(j + 7, j + 11) {
                pen += PENALTY_N3;
            }
        }
    }
    pen
}

// 10 points for every 5% the dark share strays from 50%
pub(crate) fn compute_balance_penalty(m: &BitMatrix) -> u32 {
    let dark = m.count_dark();
    let total = m.width() * m.height();
    let variance = (dark * 2).abs_diff(total) * 10 / total;
    variance as u32 * PENALTY_N4
}

#[cfg(test)]
mod penalty_tests {
    use super::{
        compute_adjacent_penalty, compute_balance_penalty, compute_block_penalty,
        compute_finder_pattern_penalty, compute_total_penalty,
    };
    use crate::common::bit_matrix::BitMatrix;

    fn matrix(rows: &[&str]) -> BitMatrix {
        let mut m = BitMatrix::new(rows[0].len(), rows.len());
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                m.set(r, c, ch == '1');
            }
        }
        m
    }

    #[test]
    fn test_adjacent_penalty() {
        let m = matrix(&["0000011", "1111111", "0101010"]);
        assert_eq!(compute_adjacent_penalty(&m, true), 3 + 5);
        assert_eq!(compute_adjacent_penalty(&m, false), 0);
        let m = BitMatrix::square(5);
        assert_eq!(compute_adjacent_penalty(&m, true), 15);
        assert_eq!(compute_adjacent_penalty(&m, false), 15);
    }

    #[test]
    fn test_block_penalty() {
        let m = matrix(&["110", "110", "001"]);
        assert_eq!(compute_block_penalty(&m), 3);
        assert_eq!(compute_block_penalty(&BitMatrix::square(5)), 48);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let m = matrix(&["10111010000"]);
        assert_eq!(compute_finder_pattern_penalty(&m, true), 40);
        let m = matrix(&["00001011101"]);
        assert_eq!(compute_finder_pattern_penalty(&m, true), 40);
        let m = matrix(&["0110111010110"]);
        assert_eq!(compute_finder_pattern_penalty(&m, true), 0);
        let m = matrix(&["1011101"]);
        // Both sides clip to nothing, which counts as light
        assert_eq!(compute_finder_pattern_penalty(&m, true), 40);
    }

    #[test]
    fn test_finder_pattern_penalty_vertical() {
        let rows = ["1", "0", "1", "1", "1", "0", "1", "0", "0", "0", "0"];
        let m = matrix(&rows);
        assert_eq!(compute_finder_pattern_penalty(&m, false), 40);
        assert_eq!(compute_finder_pattern_penalty(&m, true), 0);
    }

    #[test]
    fn test_balance_penalty() {
        assert_eq!(compute_balance_penalty(&BitMatrix::square(5)), 100);
        assert_eq!(compute_balance_penalty(&matrix(&["10", "01"])), 0);
        // 11 of 20 dark is one 5% bracket over
        assert_eq!(compute_balance_penalty(&matrix(&["1111111111", "1000000000"])), 10);
    }

    #[test]
    fn test_total_penalty() {
        let m = BitMatrix::square(5);
        assert_eq!(compute_total_penalty(&m), 30 + 48 + 100);
    }
}
