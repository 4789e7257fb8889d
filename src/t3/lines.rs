//! Line-sum analysis for Tic-Tac-Total

use std::collections::HashSet;

/// Sum a row, column, or diagonal must reach exactly to win
pub const TARGET_SUM: u32 = 13;

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing line sums on a Tic-Tac-Total board
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check whether any line sums to exactly [`TARGET_SUM`]
    pub fn has_target_sum(cells: &[u8; 9]) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| Self::line_sum(cells, line) == TARGET_SUM)
    }

    /// Find all (position, value) placements that would complete a line.
    ///
    /// Only lines with a single open cell qualify: two placed values cap
    /// out at 12, so a line with two or more open cells can never reach 13
    /// in one move.
    pub fn winning_placements(cells: &[u8; 9], values: [u8; 3]) -> HashSet<(usize, u8)> {
        let mut placements = HashSet::new();
        for line in &WINNING_LINES {
            let Some(open) = Self::single_open_cell(cells, line) else {
                continue;
            };
            let filled = Self::line_sum(cells, line);
            for &value in &values {
                if filled + u32::from(value) == TARGET_SUM {
                    placements.insert((open, value));
                }
            }
        }
        placements
    }

    /// Check if any of the given values can complete a line right now
    pub fn has_immediate_win(cells: &[u8; 9], values: [u8; 3]) -> bool {
        !Self::winning_placements(cells, values).is_empty()
    }

    fn line_sum(cells: &[u8; 9], line: &[usize; 3]) -> u32 {
        line.iter().map(|&idx| u32::from(cells[idx])).sum()
    }

    fn single_open_cell(cells: &[u8; 9], line: &[usize; 3]) -> Option<usize> {
        let mut open = None;
        for &idx in line {
            if cells[idx] == 0 {
                if open.is_some() {
                    // More than one open cell, unreachable in one move
                    return None;
                }
                open = Some(idx);
            }
        }
        open
    }
}
