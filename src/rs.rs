//! Reed-Solomon block planning, error correction codewords and interleaving.

use crate::error::QrError;
use crate::polynomial::Polynomial;
use crate::qrcode::{QrCodeEcc, Version};
use crate::tables::RS_BLOCK_TABLE;

/// One error correction block: `total_count` codewords of which the first
/// `data_count` carry data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RsBlock {
    pub total_count: usize,
    pub data_count: usize,
}

impl RsBlock {
    pub fn ec_count(&self) -> usize {
        self.total_count - self.data_count
    }
}

/// Expands the block table entry for `(ver, ecl)` into individual blocks, short blocks first.
pub fn blocks(ver: Version, ecl: QrCodeEcc) -> Vec<RsBlock> {
    let groups = &RS_BLOCK_TABLE[usize::from(ver.value()) - 1][ecl.ordinal()];
    let mut result = Vec::new();
    for &(count, total, data) in groups {
        for _ in 0..count {
            result.push(RsBlock {
                total_count: usize::from(total),
                data_count: usize::from(data),
            });
        }
    }
    result
}

/// Number of data codewords a symbol of `(ver, ecl)` holds.
pub fn num_data_codewords(ver: Version, ecl: QrCodeEcc) -> usize {
    blocks(ver, ecl).iter().map(|b| b.data_count).sum()
}

/// Computes the error correction codewords for one block of data.
///
/// The remainder is right aligned in an `ec_count` long vector, so a short remainder
/// leaves zeros in the leading positions.
pub fn ec_codewords(data: &[u8], ec_count: usize) -> Result<Vec<u8>, QrError> {
    let generator = Polynomial::generator(ec_count)?;
    let remainder = Polynomial::new(data, ec_count).modulo(&generator)?;
    let mut result = vec![0u8; ec_count];
    let offset = ec_count - remainder.len();
    result[offset..].copy_from_slice(remainder.coefficients());
    Ok(result)
}

/// Reads the blocks column by column: the i-th codeword of every block that has one,
/// for i from zero up to the longest block.
pub fn interleave(blocks: &[Vec<u8>]) -> Vec<u8> {
    let longest = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let mut result = Vec::with_capacity(blocks.iter().map(Vec::len).sum());
    for i in 0..longest {
        for block in blocks {
            if let Some(&b) = block.get(i) {
                result.push(b);
            }
        }
    }
    result
}

/// Splits `data` into the blocks for `(ver, ecl)`, appends error correction and returns
/// the final codeword sequence: interleaved data codewords followed by interleaved
/// error correction codewords.
pub fn add_ec_and_interleave(data: &[u8], ver: Version, ecl: QrCodeEcc) -> Result<Vec<u8>, QrError> {
    let plan = blocks(ver, ecl);
    debug_assert_eq!(data.len(), plan.iter().map(|b| b.data_count).sum::<usize>());
    let mut datablocks: Vec<Vec<u8>> = Vec::with_capacity(plan.len());
    let mut ecblocks: Vec<Vec<u8>> = Vec::with_capacity(plan.len());
    let mut rest: &[u8] = data;
    for block in &plan {
        let (dat, tail) = rest.split_at(block.data_count.min(rest.len()));
        ecblocks.push(ec_codewords(dat, block.ec_count())?);
        datablocks.push(dat.to_vec());
        rest = tail;
    }
    let mut result = interleave(&datablocks);
    result.extend(interleave(&ecblocks));
    Ok(result)
}
