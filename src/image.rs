use alloc::format;
use alloc::vec::Vec;
use rgb::RGB8;

use crate::error::NetpbmError;
use crate::pnm::{self, Encoding, Family, Header, MagicNumber};
use crate::raster::Raster;
use crate::sample::Sample;

/// A Netpbm image: a header and a raster that always agree.
///
/// Pixel addressing is `(x, y)` with `x` the column and `y` the row, row 0
/// at the top. [`get`](Self::get) is lenient and returns `None` outside the
/// raster; [`at`](Self::at) and [`set`](Self::set) fail with
/// [`NetpbmError::IndexOutOfRange`]. Drawing primitives clip instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image<S> {
    header: Header,
    raster: Raster<S>,
}

/// PBM image, `true` meaning a set (black) bit.
pub type Bitmap = Image<bool>;
/// PGM image.
pub type Graymap = Image<u8>;
/// PPM image.
pub type Pixmap = Image<RGB8>;

impl<S: Sample> Image<S> {
    /// Pair a header with a raster.
    ///
    /// Fails if the header's family is not the sample's, if the raster's
    /// shape disagrees with the header, or if a sample exceeds the max value.
    pub fn from_parts(header: Header, raster: Raster<S>) -> Result<Self, NetpbmError> {
        if header.magic().family() != S::FAMILY {
            return Err(NetpbmError::UnsupportedVariant(format!(
                "{} header cannot hold {:?} samples",
                header.magic(),
                S::FAMILY
            )));
        }
        if raster.width() != header.width() as usize || raster.height() != header.height() as usize
        {
            return Err(NetpbmError::InconsistentDimensions {
                width: header.width(),
                height: header.height(),
                actual: raster.samples().len(),
            });
        }
        if let Some(max) = header.max_value() {
            if let Some(i) = raster.samples().iter().position(|s| !s.fits(max)) {
                let w = raster.width();
                return Err(NetpbmError::InvalidData(format!(
                    "sample at ({}, {}) exceeds max value {max}",
                    i % w,
                    i / w
                )));
            }
        }
        Ok(Self { header, raster })
    }

    /// Build from a sequence of rows, each exactly `header.width()` long.
    pub fn from_rows(header: Header, rows: &[Vec<S>]) -> Result<Self, NetpbmError> {
        let raster = Raster::from_rows(header.width() as usize, rows).ok_or_else(|| {
            NetpbmError::InconsistentDimensions {
                width: header.width(),
                height: header.height(),
                actual: rows.iter().map(Vec::len).sum(),
            }
        })?;
        Self::from_parts(header, raster)
    }

    /// An image of `width` x `height` copies of `fill`.
    pub(crate) fn filled(
        width: u32,
        height: u32,
        encoding: Encoding,
        max_value: Option<u8>,
        fill: S,
    ) -> Result<Self, NetpbmError> {
        let header = Header::new(
            MagicNumber::new(S::FAMILY, encoding),
            width,
            height,
            max_value,
        )?;
        let raster = Raster::filled(width as usize, height as usize, fill)
            .ok_or(NetpbmError::DimensionsTooLarge { width, height })?;
        Self::from_parts(header, raster)
    }

    /// Decode a Netpbm file of this image's family.
    pub fn decode(data: &[u8]) -> Result<Self, NetpbmError> {
        pnm::decode(data, None, &enough::Unstoppable)
    }

    /// Encode with the image's own magic number.
    pub fn encode(&self) -> Result<Vec<u8>, NetpbmError> {
        pnm::encode(self, self.header.magic(), &enough::Unstoppable)
    }

    /// Read and decode a whole file from `reader`.
    #[cfg(feature = "std")]
    pub fn read_from<R: std::io::Read>(mut reader: R) -> Result<Self, NetpbmError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::decode(&data)
    }

    /// Encode and write to `writer`.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> Result<(), NetpbmError> {
        let bytes = self.encode()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn magic(&self) -> MagicNumber {
        self.header.magic()
    }

    pub fn family(&self) -> Family {
        S::FAMILY
    }

    pub fn encoding(&self) -> Encoding {
        self.header.magic().encoding()
    }

    /// Switch between the plain and raw variant of this family.
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.header.set_magic(MagicNumber::new(S::FAMILY, encoding));
    }

    pub fn width(&self) -> u32 {
        self.header.width()
    }

    pub fn height(&self) -> u32 {
        self.header.height()
    }

    /// `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.header.width(), self.header.height())
    }

    /// `None` for bitmaps.
    pub fn max_value(&self) -> Option<u8> {
        self.header.max_value()
    }

    pub fn raster(&self) -> &Raster<S> {
        &self.raster
    }

    pub fn into_raster(self) -> Raster<S> {
        self.raster
    }

    /// Sample at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<S> {
        self.raster.get(x as usize, y as usize)
    }

    /// Sample at `(x, y)`.
    pub fn at(&self, x: u32, y: u32) -> Result<S, NetpbmError> {
        self.get(x, y).ok_or_else(|| self.out_of_range(x, y))
    }

    /// Overwrite the sample at `(x, y)`.
    ///
    /// Fails with [`NetpbmError::IndexOutOfRange`] outside the raster and with
    /// [`NetpbmError::InvalidData`] if `value` exceeds the max value.
    pub fn set(&mut self, x: u32, y: u32, value: S) -> Result<(), NetpbmError> {
        if let Some(max) = self.header.max_value() {
            if !value.fits(max) {
                return Err(NetpbmError::InvalidData(format!(
                    "{value:?} exceeds max value {max}"
                )));
            }
        }
        let err = self.out_of_range(x, y);
        let slot = self.raster.get_mut(x as usize, y as usize).ok_or(err)?;
        *slot = value;
        Ok(())
    }

    fn out_of_range(&self, x: u32, y: u32) -> NetpbmError {
        NetpbmError::IndexOutOfRange {
            x,
            y,
            width: self.header.width(),
            height: self.header.height(),
        }
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Header, &mut Raster<S>) {
        (&mut self.header, &mut self.raster)
    }
}

impl Image<bool> {
    /// A blank (all-zero) bitmap.
    pub fn new(width: u32, height: u32, encoding: Encoding) -> Result<Self, NetpbmError> {
        Self::filled(width, height, encoding, None, false)
    }
}

impl Image<u8> {
    /// A black graymap.
    pub fn new(
        width: u32,
        height: u32,
        max_value: u8,
        encoding: Encoding,
    ) -> Result<Self, NetpbmError> {
        Self::filled(width, height, encoding, Some(max_value), 0)
    }
}

impl Image<RGB8> {
    /// A black pixmap.
    pub fn new(
        width: u32,
        height: u32,
        max_value: u8,
        encoding: Encoding,
    ) -> Result<Self, NetpbmError> {
        Self::filled(width, height, encoding, Some(max_value), RGB8::default())
    }
}
