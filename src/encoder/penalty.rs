//! Mask penalty scoring.
//!
//! Lower is better. The four rules are summed over the whole symbol,
//! function patterns included:
//!
//! 1. runs of five or more same-colored modules in a row or column
//! 2. 2x2 blocks of one color
//! 3. finder-like 1:1:3:1:1 runs with four light modules on one side
//! 4. deviation of the dark ratio from 50%

use crate::models::BitMatrix;

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// Total penalty of a fully drawn, masked matrix
pub fn penalty_score(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    debug_assert_eq!(size, matrix.height());

    let rows: u32 = (0..size)
        .map(|y| line_penalty((0..size).map(|x| matrix.get(x, y)), size))
        .sum();
    let cols: u32 = (0..size)
        .map(|x| line_penalty((0..size).map(|y| matrix.get(x, y)), size))
        .sum();

    rows + cols + block_penalty(matrix) + balance_penalty(matrix)
}

/// Rules 1 and 3 along a single row or column
fn line_penalty(line: impl Iterator<Item = bool>, size: usize) -> u32 {
    let mut score = 0;
    let mut run_color = false;
    let mut run_len = 0usize;
    let mut history = RunHistory::new(size);

    for dark in line {
        if dark == run_color {
            run_len += 1;
            if run_len == 5 {
                score += PENALTY_N1;
            } else if run_len > 5 {
                score += 1;
            }
        } else {
            history.push(run_len);
            if !run_color {
                score += history.count_finder_patterns() * PENALTY_N3;
            }
            run_color = dark;
            run_len = 1;
        }
    }
    score + history.terminate(run_color, run_len) * PENALTY_N3
}

/// Rule 2: every 2x2 window of one color
fn block_penalty(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut score = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size - 1 {
            let color = matrix.get(x, y);
            if color == matrix.get(x + 1, y)
                && color == matrix.get(x, y + 1)
                && color == matrix.get(x + 1, y + 1)
            {
                score += PENALTY_N2;
            }
        }
    }
    score
}

/// Rule 4: 10 points per full 5% step away from half dark
fn balance_penalty(matrix: &BitMatrix) -> u32 {
    let total = (matrix.width() * matrix.height()) as i64;
    if total == 0 {
        return 0;
    }
    let dark = matrix.count_ones() as i64;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    k.max(0) as u32 * PENALTY_N4
}

/// Lengths of the last seven runs, newest first. The area outside the
/// symbol counts as light, so the first light run is extended by `size`.
struct RunHistory {
    runs: [usize; 7],
    size: usize,
}

impl RunHistory {
    fn new(size: usize) -> Self {
        Self { runs: [0; 7], size }
    }

    fn push(&mut self, mut run_len: usize) {
        if self.runs[0] == 0 {
            run_len += self.size;
        }
        self.runs.copy_within(0..6, 1);
        self.runs[0] = run_len;
    }

    /// Finder-like patterns ending at the most recent light run; 0, 1 or 2
    fn count_finder_patterns(&self) -> u32 {
        let h = &self.runs;
        let n = h[1];
        debug_assert!(n <= self.size * 3);
        let core = n > 0 && h[2] == n && h[3] == n * 3 && h[4] == n && h[5] == n;
        (core && h[0] >= n * 4 && h[6] >= n) as u32 + (core && h[6] >= n * 4 && h[0] >= n) as u32
    }

    /// Close the line, adding the light border past its end
    fn terminate(&mut self, run_color: bool, mut run_len: usize) -> u32 {
        if run_color {
            self.push(run_len);
            run_len = 0;
        }
        run_len += self.size;
        self.push(run_len);
        self.count_finder_patterns()
    }
}
