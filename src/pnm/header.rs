//! Netpbm header: magic number, dimensions and (for gray/RGB) max value.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::cursor::{Cursor, is_pnm_whitespace, parse_decimal};
use crate::error::NetpbmError;

/// Which Netpbm family an image belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// PBM, one bit per sample.
    Bitmap,
    /// PGM, one 8-bit gray level per sample.
    Graymap,
    /// PPM, three 8-bit channels per sample.
    Pixmap,
}

/// Plain text or raw binary raster body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ascii,
    Binary,
}

/// The six supported magic numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MagicNumber {
    /// `P1`
    AsciiBit,
    /// `P2`
    AsciiGray,
    /// `P3`
    AsciiRgb,
    /// `P4`
    BinaryBit,
    /// `P5`
    BinaryGray,
    /// `P6`
    BinaryRgb,
}

impl MagicNumber {
    pub const fn new(family: Family, encoding: Encoding) -> Self {
        match (family, encoding) {
            (Family::Bitmap, Encoding::Ascii) => Self::AsciiBit,
            (Family::Graymap, Encoding::Ascii) => Self::AsciiGray,
            (Family::Pixmap, Encoding::Ascii) => Self::AsciiRgb,
            (Family::Bitmap, Encoding::Binary) => Self::BinaryBit,
            (Family::Graymap, Encoding::Binary) => Self::BinaryGray,
            (Family::Pixmap, Encoding::Binary) => Self::BinaryRgb,
        }
    }

    pub const fn family(self) -> Family {
        match self {
            Self::AsciiBit | Self::BinaryBit => Family::Bitmap,
            Self::AsciiGray | Self::BinaryGray => Family::Graymap,
            Self::AsciiRgb | Self::BinaryRgb => Family::Pixmap,
        }
    }

    pub const fn encoding(self) -> Encoding {
        match self {
            Self::AsciiBit | Self::AsciiGray | Self::AsciiRgb => Encoding::Ascii,
            Self::BinaryBit | Self::BinaryGray | Self::BinaryRgb => Encoding::Binary,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AsciiBit => "P1",
            Self::AsciiGray => "P2",
            Self::AsciiRgb => "P3",
            Self::BinaryBit => "P4",
            Self::BinaryGray => "P5",
            Self::BinaryRgb => "P6",
        }
    }

    /// Identify the two leading bytes of a file.
    ///
    /// Other `P`-tags (PAM, PFM and unassigned digits) are recognized as
    /// Netpbm but unsupported; anything else is not a Netpbm header at all.
    pub fn from_bytes(tag: [u8; 2]) -> Result<Self, NetpbmError> {
        match tag {
            [b'P', b'1'] => Ok(Self::AsciiBit),
            [b'P', b'2'] => Ok(Self::AsciiGray),
            [b'P', b'3'] => Ok(Self::AsciiRgb),
            [b'P', b'4'] => Ok(Self::BinaryBit),
            [b'P', b'5'] => Ok(Self::BinaryGray),
            [b'P', b'6'] => Ok(Self::BinaryRgb),
            [b'P', b'7'] => Err(NetpbmError::UnsupportedVariant("PAM (P7) is not supported".into())),
            [b'P', b'f' | b'F'] => Err(NetpbmError::UnsupportedVariant("PFM is not supported".into())),
            [b'P', d] if d.is_ascii_digit() => Err(NetpbmError::UnsupportedVariant(format!(
                "unknown Netpbm variant P{}",
                d as char
            ))),
            _ => Err(NetpbmError::MalformedHeader(format!(
                "not a Netpbm magic number: {}",
                String::from_utf8_lossy(&tag)
            ))),
        }
    }
}

impl fmt::Display for MagicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated Netpbm header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    magic: MagicNumber,
    width: u32,
    height: u32,
    max_value: Option<u8>,
}

impl Header {
    /// Build a header, checking that dimensions are positive and that a max
    /// value is given exactly when the family has one.
    pub fn new(
        magic: MagicNumber,
        width: u32,
        height: u32,
        max_value: Option<u8>,
    ) -> Result<Self, NetpbmError> {
        if width == 0 || height == 0 {
            return Err(NetpbmError::MalformedHeader(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        match (magic.family(), max_value) {
            (Family::Bitmap, None) => {}
            (Family::Bitmap, Some(m)) => {
                return Err(NetpbmError::InvalidMaxValue(format!(
                    "bitmaps carry no max value, got {m}"
                )));
            }
            (_, None) | (_, Some(0)) => {
                return Err(NetpbmError::InvalidMaxValue(format!(
                    "{magic} requires a max value in 1..=255"
                )));
            }
            (_, Some(_)) => {}
        }
        Ok(Self {
            magic,
            width,
            height,
            max_value,
        })
    }

    pub fn magic(&self) -> MagicNumber {
        self.magic
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `None` for bitmaps.
    pub fn max_value(&self) -> Option<u8> {
        self.max_value
    }

    pub(crate) fn set_magic(&mut self, magic: MagicNumber) {
        debug_assert_eq!(magic.family(), self.magic.family());
        self.magic = magic;
    }

    pub(crate) fn set_max_value(&mut self, max_value: u8) {
        debug_assert!(self.max_value.is_some() && max_value > 0);
        self.max_value = Some(max_value);
    }

    pub(crate) fn transpose(&mut self) {
        core::mem::swap(&mut self.width, &mut self.height);
    }
}

fn read_field(cursor: &mut Cursor<'_>, name: &str) -> Result<u32, NetpbmError> {
    let token = cursor
        .next_token()
        .ok_or_else(|| NetpbmError::MalformedHeader(format!("missing {name}")))?;
    parse_decimal(token).ok_or_else(|| {
        NetpbmError::MalformedHeader(format!(
            "{name} is not a non-negative integer: {:?}",
            String::from_utf8_lossy(token)
        ))
    })
}

/// Parse a header, returning it together with the raster body that follows.
pub(crate) fn parse_header(data: &[u8]) -> Result<(Header, &[u8]), NetpbmError> {
    let tag = data
        .first_chunk::<2>()
        .ok_or_else(|| NetpbmError::MalformedHeader("missing magic number".into()))?;
    let magic = MagicNumber::from_bytes(*tag)?;

    match data.get(2) {
        Some(&b) if is_pnm_whitespace(b) || b == b'#' => {}
        _ => {
            return Err(NetpbmError::MalformedHeader(format!(
                "{magic} must be followed by whitespace"
            )));
        }
    }

    let mut cursor = Cursor::new(&data[2..]);
    let width = read_field(&mut cursor, "width")?;
    let height = read_field(&mut cursor, "height")?;
    if width == 0 || height == 0 {
        return Err(NetpbmError::MalformedHeader(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }

    let max_value = match magic.family() {
        Family::Bitmap => None,
        Family::Graymap | Family::Pixmap => {
            let max = read_field(&mut cursor, "max value")?;
            match max {
                0 => {
                    return Err(NetpbmError::MalformedHeader("max value is zero".into()));
                }
                1..=255 => Some(max as u8),
                256..=65535 => {
                    return Err(NetpbmError::UnsupportedVariant(format!(
                        "max value {max} needs 16-bit samples"
                    )));
                }
                _ => {
                    return Err(NetpbmError::MalformedHeader(format!(
                        "max value {max} exceeds 65535"
                    )));
                }
            }
        }
    };

    if !cursor.end_of_header() {
        return Err(NetpbmError::MalformedHeader(
            "header must end with a whitespace byte".into(),
        ));
    }

    let header = Header::new(magic, width, height, max_value)?;
    log::debug!(
        "parsed {} header: {}x{}, max {:?}",
        header.magic,
        header.width,
        header.height,
        header.max_value
    );
    Ok((header, cursor.remaining()))
}

/// Append the textual header. Writers never emit comments.
pub(crate) fn write_header(header: &Header, out: &mut Vec<u8>) {
    let text = match header.max_value {
        Some(max) => format!(
            "{}\n{} {}\n{}\n",
            header.magic, header.width, header.height, max
        ),
        None => format!("{}\n{} {}\n", header.magic, header.width, header.height),
    };
    out.extend_from_slice(text.as_bytes());
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn parses_graymap_header() {
        let (header, rest) = parse_header(b"P5\n3 2\n255\n\x01\x02").unwrap();
        assert_eq!(header.magic(), MagicNumber::BinaryGray);
        assert_eq!((header.width(), header.height()), (3, 2));
        assert_eq!(header.max_value(), Some(255));
        assert_eq!(rest, b"\x01\x02");
    }

    #[test]
    fn bitmap_header_has_no_max_value() {
        let (header, rest) = parse_header(b"P4\n10 1\n\xaa\x80").unwrap();
        assert_eq!(header.magic(), MagicNumber::BinaryBit);
        assert_eq!(header.max_value(), None);
        assert_eq!(rest, b"\xaa\x80");
    }

    #[test]
    fn comments_before_dimensions_are_skipped() {
        let (header, rest) =
            parse_header(b"P2\n# made by hand\n# twice\n4 5\n# between\n15\n1 2").unwrap();
        assert_eq!((header.width(), header.height()), (4, 5));
        assert_eq!(header.max_value(), Some(15));
        assert_eq!(rest, b"1 2");
    }

    #[test]
    fn unknown_p_variants_are_unsupported() {
        for data in [&b"P9\n1 1\n"[..], b"P7\nWIDTH 1\n", b"PF\n1 1\n-1.0\n"] {
            assert!(matches!(
                parse_header(data),
                Err(NetpbmError::UnsupportedVariant(_))
            ));
        }
    }

    #[test]
    fn foreign_magic_is_malformed() {
        assert!(matches!(
            parse_header(b"BM\x00\x00"),
            Err(NetpbmError::MalformedHeader(_))
        ));
        assert!(matches!(
            parse_header(b"P"),
            Err(NetpbmError::MalformedHeader(_))
        ));
        assert!(matches!(
            parse_header(b"P12 2\n"),
            Err(NetpbmError::MalformedHeader(_))
        ));
    }

    #[test]
    fn bad_numbers_are_malformed() {
        for data in [
            &b"P1\nx 2\n"[..],
            b"P1\n2\n",
            b"P1\n0 2\n",
            b"P2\n2 2\n0\n",
            b"P3\n2 2\nabc\n",
            b"P2\n2 2\n70000\n",
        ] {
            assert!(
                matches!(parse_header(data), Err(NetpbmError::MalformedHeader(_))),
                "{:?}",
                String::from_utf8_lossy(data)
            );
        }
    }

    #[test]
    fn sixteen_bit_max_is_unsupported() {
        assert!(matches!(
            parse_header(b"P5\n1 1\n65535\n\x00\x00"),
            Err(NetpbmError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn writes_two_and_three_line_headers() {
        let mut out = Vec::new();
        write_header(&Header::new(MagicNumber::AsciiBit, 7, 3, None).unwrap(), &mut out);
        assert_eq!(out, b"P1\n7 3\n");

        out.clear();
        write_header(
            &Header::new(MagicNumber::BinaryRgb, 2, 9, Some(100)).unwrap(),
            &mut out,
        );
        assert_eq!(out, b"P6\n2 9\n100\n");
    }

    #[test]
    fn header_constructor_checks_max_value() {
        assert!(Header::new(MagicNumber::AsciiBit, 1, 1, Some(1)).is_err());
        assert!(Header::new(MagicNumber::AsciiGray, 1, 1, None).is_err());
        assert!(Header::new(MagicNumber::AsciiGray, 1, 1, Some(0)).is_err());
        assert!(Header::new(MagicNumber::AsciiGray, 0, 1, Some(1)).is_err());
    }
}
