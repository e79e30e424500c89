//! PGM codec: P2 (plain) and P5 (raw, one byte per sample).

use alloc::format;
use alloc::vec::Vec;
use enough::Stop;

use super::cursor::Cursor;
use super::{
    Encoding, Header, ascii_capacity, dimensions, max_value_of, next_ascii_value, push_decimal,
};
use crate::error::NetpbmError;
use crate::sample::sealed::Sealed;

impl Sealed for u8 {
    fn decode_body(header: &Header, body: &[u8], stop: &dyn Stop) -> Result<Vec<Self>, NetpbmError> {
        let (w, h, total) = dimensions(header)?;
        let max = max_value_of(header)?;
        match header.magic().encoding() {
            Encoding::Ascii => {
                let mut cursor = Cursor::new(body);
                let mut out = Vec::with_capacity(ascii_capacity(total, body));
                for y in 0..h {
                    if y % 16 == 0 {
                        stop.check()?;
                    }
                    for x in 0..w {
                        out.push(next_ascii_value(&mut cursor, header, max, x, y)?);
                    }
                }
                Ok(out)
            }
            Encoding::Binary => {
                let raw = body.get(..total).ok_or(NetpbmError::TruncatedData)?;
                let mut out = Vec::with_capacity(total);
                for (y, row) in raw.chunks_exact(w).enumerate() {
                    if y % 16 == 0 {
                        stop.check()?;
                    }
                    if let Some(x) = row.iter().position(|&v| v > max) {
                        return Err(NetpbmError::InvalidData(format!(
                            "sample {} at ({x}, {y}) exceeds max value {max}",
                            row[x]
                        )));
                    }
                    out.extend_from_slice(row);
                }
                Ok(out)
            }
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
                    for (x, &v) in row.iter().enumerate() {
                        if x > 0 {
                            out.push(b' ');
                        }
                        push_decimal(out, v);
                    }
                    out.push(b'\n');
                }
                Encoding::Binary => out.extend_from_slice(row),
            }
        }
        Ok(())
    }

    fn body_len_hint(header: &Header) -> usize {
        let total = (header.width() as usize).saturating_mul(header.height() as usize);
        match header.magic().encoding() {
            Encoding::Ascii => total.saturating_mul(4),
            Encoding::Binary => total,
        }
    }
}
