//! PBM codec: P1 (plain) and P4 (raw, bit-packed).

use alloc::format;
use alloc::vec::Vec;
use enough::Stop;

use super::bits::{pack_bits, packed_row_len, unpack_bits};
use super::cursor::Cursor;
use super::{Encoding, Header, ascii_capacity, dimensions, short_body};
use crate::error::NetpbmError;
use crate::sample::sealed::Sealed;

impl Sealed for bool {
    fn decode_body(header: &Header, body: &[u8], stop: &dyn Stop) -> Result<Vec<Self>, NetpbmError> {
        let (w, h, total) = dimensions(header)?;
        match header.magic().encoding() {
            Encoding::Ascii => decode_plain(header, body, w, h, total, stop),
            Encoding::Binary => decode_raw(header, body, w, h, total, stop),
        }
    }

    fn encode_body(
        header: &Header,
        samples: &[Self],
        out: &mut Vec<u8>,
        stop: &dyn Stop,
    ) -> Result<(), NetpbmError> {
        let w = header.width() as usize;
        for (y, row) in samples.chunks_exact(w).enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            match header.magic().encoding() {
                Encoding::Ascii => {
                    for (x, &bit) in row.iter().enumerate() {
                        if x > 0 {
                            out.push(b' ');
                        }
                        out.push(if bit { b'1' } else { b'0' });
                    }
                    out.push(b'\n');
                }
                Encoding::Binary => pack_bits(row, out),
            }
        }
        Ok(())
    }

    fn body_len_hint(header: &Header) -> usize {
        let w = header.width() as usize;
        let h = header.height() as usize;
        match header.magic().encoding() {
            Encoding::Ascii => w.saturating_mul(2).saturating_mul(h),
            Encoding::Binary => packed_row_len(w).saturating_mul(h),
        }
    }
}

/// Plain PBM: one `0`/`1` character per sample, separators optional.
fn decode_plain(
    header: &Header,
    body: &[u8],
    w: usize,
    h: usize,
    total: usize,
    stop: &dyn Stop,
) -> Result<Vec<bool>, NetpbmError> {
    let mut cursor = Cursor::new(body);
    let mut out = Vec::with_capacity(ascii_capacity(total, body));
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        for x in 0..w {
            let bit = match cursor.next_byte() {
                Some(b'0') => false,
                Some(b'1') => true,
                Some(other) => {
                    return Err(NetpbmError::InvalidData(format!(
                        "plain PBM sample at ({x}, {y}) must be 0 or 1, got {:?}",
                        other as char
                    )));
                }
                None => return Err(short_body(header, x, y)),
            };
            out.push(bit);
        }
    }
    Ok(out)
}

/// Raw PBM: `ceil(width / 8)` bytes per row.
fn decode_raw(
    header: &Header,
    body: &[u8],
    w: usize,
    h: usize,
    total: usize,
    stop: &dyn Stop,
) -> Result<Vec<bool>, NetpbmError> {
    let row_len = packed_row_len(w);
    let needed = row_len.checked_mul(h).ok_or(NetpbmError::DimensionsTooLarge {
        width: header.width(),
        height: header.height(),
    })?;
    if body.len() < needed {
        return Err(NetpbmError::TruncatedData);
    }

    let mut out = Vec::with_capacity(total);
    for (y, row) in body[..needed].chunks_exact(row_len).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        unpack_bits(row, w, &mut out)?;
    }
    Ok(out)
}
