//! Mask patterns, penalty scoring and mask selection.

use crate::matrix::{apply_data, DataModule, ModuleMatrix};
use tracing::trace;

const PENALTY_N1: u32 = 3;
#[cfg(feature = "block-penalty")]
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// The 1:1:3:1:1 finder-like run, dark first.
const FINDER_LIKE: [bool; 7] = [true, false, true, true, true, false, true];

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this mask flips the module at `(row, col)`.
    pub fn is_inverted(self, row: usize, col: usize) -> bool {
        let (i, j) = (row, col);
        match self.0 {
            0 => (i + j) % 2 == 0,
            1 => i % 2 == 0,
            2 => j % 3 == 0,
            3 => (i + j) % 3 == 0,
            4 => (i / 2 + j / 3) % 2 == 0,
            5 => (i * j) % 2 + (i * j) % 3 == 0,
            6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            7 => ((i * j) % 3 + (i + j) % 2) % 2 == 0,
            _ => unreachable!(),
        }
    }

    pub fn all() -> impl Iterator<Item = Mask> {
        (0u8..8).map(Mask)
    }
}

/// Result of trying every mask on the same data.
#[derive(Clone, Debug)]
pub struct MaskChoice {
    pub mask: Mask,
    pub penalties: [u32; 8],
    pub matrix: ModuleMatrix,
}

/// Applies each of the 8 masks to `placements` over `base`, scores the results and keeps
/// the lowest. A later mask only wins with a strictly lower score, so ties go to the
/// lowest index.
pub fn choose_best(base: &ModuleMatrix, placements: &[DataModule]) -> MaskChoice {
    let mut penalties = [0u32; 8];
    let mut best: Option<(Mask, ModuleMatrix)> = None;
    let mut minpenalty = u32::MAX;
    for mask in Mask::all() {
        let trial = apply_data(base, placements, mask);
        let penalty = penalty_score(&trial);
        trace!(mask = mask.value(), penalty, "scored mask trial");
        penalties[usize::from(mask.value())] = penalty;
        if best.is_none() || penalty < minpenalty {
            minpenalty = penalty;
            best = Some((mask, trial));
        }
    }
    let (mask, matrix) = match best {
        Some(best) => best,
        None => unreachable!("eight masks are always tried"),
    };
    MaskChoice { mask, penalties, matrix }
}

/// Total penalty of a finished grid. Lower is easier to scan.
pub fn penalty_score(matrix: &ModuleMatrix) -> u32 {
    let mut result = neighbour_penalty(matrix) + finder_like_penalty(matrix) + balance_penalty(matrix);
    #[cfg(feature = "block-penalty")]
    {
        result += block_penalty(matrix);
    }
    result
}

/// Modules whose 3x3 neighbourhood mostly repeats their own color.
fn neighbour_penalty(matrix: &ModuleMatrix) -> u32 {
    let size = matrix.size() as i32;
    let mut result = 0;
    for row in 0..size {
        for col in 0..size {
            let dark = matrix.is_dark(row as usize, col as usize);
            let mut samecount: u32 = 0;
            for dr in -1..=1 {
                for dc in -1..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let (r, c) = (row + dr, col + dc);
                    if r < 0 || c < 0 || r >= size || c >= size {
                        continue;
                    }
                    if matrix.is_dark(r as usize, c as usize) == dark {
                        samecount += 1;
                    }
                }
            }
            if samecount >= 5 {
                result += PENALTY_N1 + (samecount - 5);
            }
        }
    }
    result
}

/// Occurrences of the finder-like run along every row and column.
fn finder_like_penalty(matrix: &ModuleMatrix) -> u32 {
    let size = matrix.size();
    let mut result = 0;
    for a in 0..size {
        for b in 0..size.saturating_sub(6) {
            if (0..7).all(|k| matrix.is_dark(a, b + k) == FINDER_LIKE[k]) {
                result += PENALTY_N3;
            }
            if (0..7).all(|k| matrix.is_dark(b + k, a) == FINDER_LIKE[k]) {
                result += PENALTY_N3;
            }
        }
    }
    result
}

/// 10 points for every full 5% the dark share deviates from half.
fn balance_penalty(matrix: &ModuleMatrix) -> u32 {
    let dark = matrix.dark_count() as i64;
    let total = (matrix.size() * matrix.size()) as i64;
    // floor(|100 * dark / total - 50| / 5) without floating point.
    let k = (100 * dark - 50 * total).abs() / (5 * total);
    k as u32 * PENALTY_N4
}

/// 2x2 blocks of a single color.
#[cfg(feature = "block-penalty")]
fn block_penalty(matrix: &ModuleMatrix) -> u32 {
    let size = matrix.size();
    let mut result = 0;
    for row in 0..size - 1 {
        for col in 0..size - 1 {
            let color = matrix.is_dark(row, col);
            if color == matrix.is_dark(row + 1, col)
                && color == matrix.is_dark(row, col + 1)
                && color == matrix.is_dark(row + 1, col + 1)
            {
                result += PENALTY_N2;
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{function_patterns, Module};
    use crate::qrcode::Version;

    fn checkerboard(size: usize) -> ModuleMatrix {
        let mut m = ModuleMatrix::new(size);
        for r in 0..size {
            for c in 0..size {
                m.set(r, c, Module::from_dark((r + c) % 2 == 0));
            }
        }
        m
    }

    #[test]
    fn test_mask_predicates() {
        assert!(Mask::new(0).is_inverted(0, 0));
        assert!(!Mask::new(0).is_inverted(0, 1));
        assert!(Mask::new(1).is_inverted(2, 5));
        assert!(Mask::new(2).is_inverted(1, 3));
        assert!(!Mask::new(2).is_inverted(3, 1));
        assert!(Mask::new(4).is_inverted(1, 2));
        assert!(!Mask::new(4).is_inverted(2, 0));
        assert!(Mask::new(5).is_inverted(0, 7));
        assert!(Mask::new(7).is_inverted(0, 0));
        assert_eq!(Mask::all().count(), 8);
    }

    #[test]
    #[should_panic]
    fn test_mask_out_of_range() {
        Mask::new(8);
    }

    #[test]
    fn test_neighbour_penalty() {
        // A checkerboard interior module shares its color with exactly 4 diagonal neighbours.
        assert_eq!(neighbour_penalty(&checkerboard(9)), 0);

        // Every module of a uniform 3x3 grid: corners see 3, edges 5, centre 8.
        let mut m = ModuleMatrix::new(3);
        for r in 0..3 {
            for c in 0..3 {
                m.set(r, c, Module::Light);
            }
        }
        assert_eq!(neighbour_penalty(&m), 4 * 3 + (3 + 3));
    }

    #[test]
    fn test_finder_like_penalty() {
        let mut m = ModuleMatrix::new(7);
        for (k, &dark) in FINDER_LIKE.iter().enumerate() {
            m.set(3, k, Module::from_dark(dark));
        }
        // One horizontal match; no column can match since only row 3 has dark cells.
        assert_eq!(finder_like_penalty(&m), 40);
    }

    #[test]
    fn test_balance_penalty() {
        assert_eq!(balance_penalty(&checkerboard(10)), 0);
        let mut m = ModuleMatrix::new(10);
        assert_eq!(balance_penalty(&m), 100);
        for c in 0..10 {
            for r in 0..4 {
                m.set(r, c, Module::Dark);
            }
        }
        // 40% dark: exactly two 5% steps away.
        assert_eq!(balance_penalty(&m), 20);
        m.set(4, 0, Module::Dark);
        // 41% dark: 9% off rounds down to one step.
        assert_eq!(balance_penalty(&m), 10);
    }

    #[test]
    fn test_choose_best_is_minimal_and_first() {
        let ver = Version::new(1);
        let base = function_patterns(ver);
        let placements = crate::matrix::data_placements(&base, &[0x40, 0x54, 0x84, 0x54, 0xc4, 0xc4, 0xf0]);
        let choice = choose_best(&base, &placements);
        let best = choice.penalties[usize::from(choice.mask.value())];
        for (i, &p) in choice.penalties.iter().enumerate() {
            assert!(best <= p);
            if i < usize::from(choice.mask.value()) {
                assert!(p > best, "mask {} ties with the chosen one but has a lower index", i);
            }
        }
        assert_eq!(choice.matrix, apply_data(&base, &placements, choice.mask));
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        // No data cells: every mask leaves the grid untouched and scores the same.
        let base = checkerboard(21);
        let choice = choose_best(&base, &[]);
        assert_eq!(choice.mask, Mask::new(0));
        assert!(choice.penalties.iter().all(|&p| p == choice.penalties[0]));
    }

    #[cfg(feature = "block-penalty")]
    #[test]
    fn test_block_penalty_counts_uniform_squares() {
        let m = ModuleMatrix::new(4);
        assert_eq!(block_penalty(&m), 9 * 3);
        assert_eq!(block_penalty(&checkerboard(4)), 0);
    }

    #[cfg(not(feature = "block-penalty"))]
    #[test]
    fn test_block_rule_is_not_scored() {
        // A uniform light 2x2 grid only scores on balance.
        let m = ModuleMatrix::new(2);
        assert_eq!(penalty_score(&m), neighbour_penalty(&m) + balance_penalty(&m));
        assert_eq!(penalty_score(&m), 100);
    }
}
