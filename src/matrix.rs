//! The module grid and the layout of function patterns and data bits.

use crate::format::{format_cells, version_cells};
use crate::mask::Mask;
use crate::qrcode::Version;
use crate::tables::ALIGNMENT_POSITIONS;

/// State of one cell of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Module {
    #[default]
    Unset,
    Light,
    Dark,
}

impl Module {
    pub fn from_dark(isdark: bool) -> Self {
        if isdark {
            Module::Dark
        } else {
            Module::Light
        }
    }

    /// `Unset` reads as light.
    pub fn is_dark(self) -> bool {
        self == Module::Dark
    }
}

/// A square grid of modules stored row-major in one allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<Module>,
}

impl ModuleMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            modules: vec![Module::Unset; size * size],
        }
    }

    /// Width and height in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Module {
        self.modules[row * self.size + col]
    }

    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_dark()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, module: Module) {
        self.modules[row * self.size + col] = module;
    }

    fn set_unbounded(&mut self, row: i32, col: i32, module: Module) {
        let range = 0..self.size as i32;
        if range.contains(&row) && range.contains(&col) {
            self.set(row as usize, col as usize, module);
        }
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_dark()).count()
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Module]> {
        self.modules.chunks(self.size)
    }
}

/// One data cell together with the unmasked bit it carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataModule {
    pub row: usize,
    pub col: usize,
    pub dark: bool,
}

/// Builds everything that does not depend on the data or the mask: finder patterns with
/// separators, alignment and timing patterns, the dark module, and light placeholders over
/// the format and version information areas.
pub fn function_patterns(ver: Version) -> ModuleMatrix {
    let size = ver.size();
    let mut matrix = ModuleMatrix::new(size);
    draw_finder_pattern(&mut matrix, 0, 0);
    draw_finder_pattern(&mut matrix, size - 7, 0);
    draw_finder_pattern(&mut matrix, 0, size - 7);
    draw_alignment_patterns(&mut matrix, ver);
    draw_timing_patterns(&mut matrix);
    for i in 0..15 {
        for (row, col) in format_cells(size, i) {
            matrix.set(row, col, Module::Light);
        }
    }
    if ver.value() >= 7 {
        for i in 0..18 {
            for (row, col) in version_cells(size, i) {
                matrix.set(row, col, Module::Light);
            }
        }
    }
    matrix.set(size - 8, 8, Module::Dark);
    matrix
}

/// Draws a 7x7 finder with its top-left corner at `(top, left)` and the light separator
/// ring around it, clipped to the grid.
fn draw_finder_pattern(matrix: &mut ModuleMatrix, top: usize, left: usize) {
    for r in -1i32..=7 {
        for c in -1i32..=7 {
            let ring = (0..=6).contains(&r) && (c == 0 || c == 6);
            let edge = (0..=6).contains(&c) && (r == 0 || r == 6);
            let core = (2..=4).contains(&r) && (2..=4).contains(&c);
            matrix.set_unbounded(
                top as i32 + r,
                left as i32 + c,
                Module::from_dark(ring || edge || core),
            );
        }
    }
}

fn draw_alignment_patterns(matrix: &mut ModuleMatrix, ver: Version) {
    let positions: &[u8] = ALIGNMENT_POSITIONS[usize::from(ver.value()) - 1];
    let last = positions.len().saturating_sub(1);
    for (i, &row) in positions.iter().enumerate() {
        for (j, &col) in positions.iter().enumerate() {
            // These three overlap the finder patterns.
            if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                continue;
            }
            for dr in -2i32..=2 {
                for dc in -2i32..=2 {
                    let dist = dr.abs().max(dc.abs());
                    matrix.set(
                        (i32::from(row) + dr) as usize,
                        (i32::from(col) + dc) as usize,
                        Module::from_dark(dist != 1),
                    );
                }
            }
        }
    }
}

fn draw_timing_patterns(matrix: &mut ModuleMatrix) {
    let size = matrix.size();
    for i in 8..size - 8 {
        let module = Module::from_dark(i % 2 == 0);
        if matrix.get(i, 6) == Module::Unset {
            matrix.set(i, 6, module);
        }
        if matrix.get(6, i) == Module::Unset {
            matrix.set(6, i, module);
        }
    }
}

/// Walks the data area in placement order and pairs every free cell with its bit from
/// `codewords`, most significant bit first. Cells left over after the last codeword get
/// a light bit.
///
/// The walk goes through column pairs from the right edge, skipping the vertical timing
/// column, alternating upward and downward, and skips every cell that is already set.
pub fn data_placements(base: &ModuleMatrix, codewords: &[u8]) -> Vec<DataModule> {
    let size = base.size() as i32;
    let mut result = Vec::with_capacity(codewords.len() * 8);
    let mut i: usize = 0;
    let mut right: i32 = size - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        let upward: bool = ((right + 1) & 2) == 0;
        for vert in 0..size {
            let row = (if upward { size - 1 - vert } else { vert }) as usize;
            for j in 0..2 {
                let col = (right - j) as usize;
                if base.get(row, col) != Module::Unset {
                    continue;
                }
                let dark = codewords
                    .get(i >> 3)
                    .map_or(false, |&b| ((b >> (7 - (i & 7))) & 1) != 0);
                result.push(DataModule { row, col, dark });
                i += 1;
            }
        }
        right -= 2;
    }
    result
}

/// Copies `base` and fills the data cells, XORing each bit with `mask`.
pub fn apply_data(base: &ModuleMatrix, placements: &[DataModule], mask: Mask) -> ModuleMatrix {
    let mut matrix = base.clone();
    for p in placements {
        let dark = p.dark ^ mask.is_inverted(p.row, p.col);
        matrix.set(p.row, p.col, Module::from_dark(dark));
    }
    matrix
}
