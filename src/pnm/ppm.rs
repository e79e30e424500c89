//! PPM codec: P3 (plain, one `R G B` triple per line) and P6 (raw RGB bytes).

use alloc::format;
use alloc::vec::Vec;
use enough::Stop;
use rgb::RGB8;

use super::cursor::Cursor;
use super::{
    Encoding, Header, ascii_capacity, dimensions, max_value_of, next_ascii_value, push_decimal,
};
use crate::error::NetpbmError;
use crate::sample::sealed::Sealed;

impl Sealed for RGB8 {
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
                        let r = next_ascii_value(&mut cursor, header, max, x, y)?;
                        let g = next_ascii_value(&mut cursor, header, max, x, y)?;
                        let b = next_ascii_value(&mut cursor, header, max, x, y)?;
                        out.push(RGB8::new(r, g, b));
                    }
                }
                Ok(out)
            }
            Encoding::Binary => {
                let row_bytes = w.checked_mul(3).ok_or(NetpbmError::DimensionsTooLarge {
                    width: header.width(),
                    height: header.height(),
                })?;
                let needed = total.checked_mul(3).ok_or(NetpbmError::DimensionsTooLarge {
                    width: header.width(),
                    height: header.height(),
                })?;
                let raw = body.get(..needed).ok_or(NetpbmError::TruncatedData)?;

                let mut out = Vec::with_capacity(total);
                for (y, row) in raw.chunks_exact(row_bytes).enumerate() {
                    if y % 16 == 0 {
                        stop.check()?;
                    }
                    for (x, px) in row.chunks_exact(3).enumerate() {
                        let pixel = RGB8::new(px[0], px[1], px[2]);
                        if pixel.r > max || pixel.g > max || pixel.b > max {
                            return Err(NetpbmError::InvalidData(format!(
                                "pixel {pixel:?} at ({x}, {y}) exceeds max value {max}"
                            )));
                        }
                        out.push(pixel);
                    }
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
                    for px in row {
                        push_decimal(out, px.r);
                        out.push(b' ');
                        push_decimal(out, px.g);
                        out.push(b' ');
                        push_decimal(out, px.b);
                        out.push(b'\n');
                    }
                }
                Encoding::Binary => {
                    for px in row {
                        out.extend_from_slice(&[px.r, px.g, px.b]);
                    }
                }
            }
        }
        Ok(())
    }

    fn body_len_hint(header: &Header) -> usize {
        let total = (header.width() as usize).saturating_mul(header.height() as usize);
        match header.magic().encoding() {
            Encoding::Ascii => total.saturating_mul(12),
            Encoding::Binary => total.saturating_mul(3),
        }
    }
}
