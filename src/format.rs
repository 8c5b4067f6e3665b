//! BCH protected format and version information.

use crate::mask::Mask;
use crate::matrix::{Module, ModuleMatrix};
use crate::qrcode::{QrCodeEcc, Version};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_MASK: u32 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1f25;

/// The 15-bit format word for `ecl` and `mask`, BCH(15,5) encoded and masked.
pub fn format_bits(ecl: QrCodeEcc, mask: Mask) -> u32 {
    let data = u32::from((ecl.format_bits() << 3) | mask.value());
    let mut rem: u32 = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    ((data << 10) | rem) ^ FORMAT_MASK
}

/// The 18-bit version word, BCH(18,6) encoded. Only meaningful for version 7 and up.
pub fn version_bits(ver: Version) -> u32 {
    let ver = u32::from(ver.value());
    let mut rem: u32 = ver;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    (ver << 12) | rem
}

/// The two `(row, col)` cells holding format bit `i`: one next to the top-left finder
/// and one split between the other two finders.
pub(crate) fn format_cells(size: usize, i: usize) -> [(usize, usize); 2] {
    let vertical = if i < 6 {
        (i, 8)
    } else if i < 8 {
        (i + 1, 8)
    } else {
        (size - 15 + i, 8)
    };
    let horizontal = if i < 8 {
        (8, size - i - 1)
    } else if i < 9 {
        (8, 15 - i)
    } else {
        (8, 14 - i)
    };
    [vertical, horizontal]
}

/// The two `(row, col)` cells holding version bit `i`.
pub(crate) fn version_cells(size: usize, i: usize) -> [(usize, usize); 2] {
    let a = i / 3;
    let b = i % 3 + size - 11;
    [(a, b), (b, a)]
}

pub fn draw_format_bits(matrix: &mut ModuleMatrix, ecl: QrCodeEcc, mask: Mask) {
    let bits = format_bits(ecl, mask);
    let size = matrix.size();
    for i in 0..15 {
        let module = Module::from_dark(get_bit(bits, i));
        for (row, col) in format_cells(size, i) {
            matrix.set(row, col, module);
        }
    }
    matrix.set(size - 8, 8, Module::Dark);
}

pub fn draw_version_bits(matrix: &mut ModuleMatrix, ver: Version) {
    if ver.value() < 7 {
        return;
    }
    let bits = version_bits(ver);
    let size = matrix.size();
    for i in 0..18 {
        let module = Module::from_dark(get_bit(bits, i));
        for (row, col) in version_cells(size, i) {
            matrix.set(row, col, module);
        }
    }
}

fn get_bit(x: u32, i: usize) -> bool {
    ((x >> i) & 1) != 0
}
