use crate::error::NetpbmError;
use crate::pnm::{Encoding, Family, Header, MagicNumber};

/// Image metadata obtained from probing the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub magic: MagicNumber,
    pub family: Family,
    pub encoding: Encoding,
    /// `None` for bitmaps.
    pub max_value: Option<u8>,
}

impl ImageInfo {
    /// Probe the header without decoding pixel data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, NetpbmError> {
        crate::pnm::probe_header(data)
    }

    pub(crate) fn from_header(header: &Header) -> Self {
        let magic = header.magic();
        Self {
            width: header.width(),
            height: header.height(),
            magic,
            family: magic.family(),
            encoding: magic.encoding(),
            max_value: header.max_value(),
        }
    }
}
