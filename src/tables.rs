//! Fixed per-version tables for versions 1 to 10.
//!
//! Every table is indexed by `[version - 1]` and, where the level matters, by
//! `QrCodeEcc::ordinal()` (L, M, Q, H).

/// Byte-mode capacity in bytes.
#[rustfmt::skip]
pub static BYTE_CAPACITY: [[u16; 4]; 10] = [
    //  L    M    Q    H
    [  17,  14,  11,   7], // 1
    [  32,  26,  20,  14], // 2
    [  53,  42,  32,  24], // 3
    [  78,  62,  46,  34], // 4
    [ 106,  84,  60,  44], // 5
    [ 134, 106,  74,  58], // 6
    [ 154, 122,  86,  64], // 7
    [ 192, 152, 108,  84], // 8
    [ 230, 180, 130,  98], // 9
    [ 271, 213, 151, 119], // 10
];

/// Error correction block groups as `(count, total codewords, data codewords)`.
/// A second group with zero count is unused.
#[rustfmt::skip]
pub static RS_BLOCK_TABLE: [[[(u8, u8, u8); 2]; 4]; 10] = [
    // 1
    [[(1, 26, 19), (0, 0, 0)], [(1, 26, 16), (0, 0, 0)], [(1, 26, 13), (0, 0, 0)], [(1, 26, 9), (0, 0, 0)]],
    // 2
    [[(1, 44, 34), (0, 0, 0)], [(1, 44, 28), (0, 0, 0)], [(1, 44, 22), (0, 0, 0)], [(1, 44, 16), (0, 0, 0)]],
    // 3
    [[(1, 70, 55), (0, 0, 0)], [(1, 70, 44), (0, 0, 0)], [(2, 35, 17), (0, 0, 0)], [(2, 35, 13), (0, 0, 0)]],
    // 4
    [[(1, 100, 80), (0, 0, 0)], [(2, 50, 32), (0, 0, 0)], [(2, 50, 24), (0, 0, 0)], [(4, 25, 9), (0, 0, 0)]],
    // 5
    [[(1, 134, 108), (0, 0, 0)], [(2, 67, 43), (0, 0, 0)], [(2, 33, 15), (2, 34, 16)], [(2, 33, 11), (2, 34, 12)]],
    // 6
    [[(2, 86, 68), (0, 0, 0)], [(4, 43, 27), (0, 0, 0)], [(4, 43, 19), (0, 0, 0)], [(4, 43, 15), (0, 0, 0)]],
    // 7
    [[(2, 98, 78), (0, 0, 0)], [(4, 49, 31), (0, 0, 0)], [(2, 32, 14), (4, 33, 15)], [(4, 39, 13), (1, 40, 14)]],
    // 8
    [[(2, 121, 97), (0, 0, 0)], [(2, 60, 38), (2, 61, 39)], [(4, 40, 18), (2, 41, 19)], [(4, 40, 14), (2, 41, 15)]],
    // 9
    [[(2, 146, 116), (0, 0, 0)], [(3, 58, 36), (2, 59, 37)], [(4, 36, 16), (4, 37, 17)], [(4, 36, 12), (4, 37, 13)]],
    // 10
    [[(2, 86, 68), (2, 87, 69)], [(4, 69, 43), (1, 70, 44)], [(6, 43, 19), (2, 44, 20)], [(6, 43, 15), (2, 44, 16)]],
];

/// Centre coordinates of alignment patterns, used for both rows and columns.
pub static ALIGNMENT_POSITIONS: [&[u8]; 10] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
];

/// Total codewords (data plus error correction) in a symbol.
pub static TOTAL_CODEWORDS: [u16; 10] = [26, 44, 70, 100, 134, 172, 196, 242, 292, 346];
