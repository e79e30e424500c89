//! Byte cursor over Netpbm text: header fields and plain (ASCII) bodies.

/// Netpbm whitespace: space, TAB, CR, LF, VT, FF.
#[inline]
pub(crate) const fn is_pnm_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c)
}

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Everything not consumed yet.
    pub(crate) fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Skip whitespace and `#` comments (which run to the end of the line).
    pub(crate) fn skip_filler(&mut self) {
        while let Some(b) = self.peek() {
            if is_pnm_whitespace(b) {
                self.pos += 1;
            } else if b == b'#' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Next whitespace-delimited token, or `None` at end of input.
    pub(crate) fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_filler();
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_pnm_whitespace(b) || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.data[start..self.pos])
    }

    /// Next single non-filler byte. Plain PBM samples need not be separated.
    pub(crate) fn next_byte(&mut self) -> Option<u8> {
        self.skip_filler();
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Consume the one whitespace byte that ends a header.
    ///
    /// Returns false if the next byte is something other than whitespace.
    /// At end of input there is nothing to consume and that is not an error
    /// here; the body reader reports the missing data.
    pub(crate) fn end_of_header(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(b) if is_pnm_whitespace(b) => {
                self.pos += 1;
                true
            }
            Some(_) => false,
        }
    }
}

/// Parse an unsigned decimal token. Signs, empty tokens and overflow yield `None`.
pub(crate) fn parse_decimal(token: &[u8]) -> Option<u32> {
    if token.is_empty() {
        return None;
    }
    token.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
    })
}
