//! Row codec for the binary variants.
//!
//! PBM rows are packed eight samples per byte, most significant bit first,
//! with the last byte of each row zero-padded. Gray and RGB rows are raw
//! bytes and need no packing.

use alloc::vec::Vec;

use crate::error::NetpbmError;

/// Bytes one packed PBM row of `width` samples occupies.
#[inline]
pub(crate) const fn packed_row_len(width: usize) -> usize {
    width.div_ceil(8)
}

/// Pack a bitmap row into `out`, column 0 landing in bit 7 of the first byte.
pub(crate) fn pack_bits(row: &[bool], out: &mut Vec<u8>) {
    let mut chunks = row.chunks_exact(8);
    for chunk in &mut chunks {
        let byte = chunk
            .iter()
            .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit));
        out.push(byte);
    }

    let rem = chunks.remainder();
    if !rem.is_empty() {
        let byte = rem
            .iter()
            .enumerate()
            .fold(0u8, |acc, (pos, &bit)| acc | (u8::from(bit) << (7 - pos)));
        out.push(byte);
    }
}

/// Unpack `width` samples from the front of `input`, appending them to `out`.
///
/// Padding bits in the final byte are ignored.
pub(crate) fn unpack_bits(input: &[u8], width: usize, out: &mut Vec<bool>) -> Result<(), NetpbmError> {
    let row = input
        .get(..packed_row_len(width))
        .ok_or(NetpbmError::TruncatedData)?;

    out.extend(
        row.iter()
            .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
            .take(width),
    );
    Ok(())
}
