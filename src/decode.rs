use alloc::vec::Vec;
use enough::Stop;

use crate::error::NetpbmError;
use crate::export::RgbaView;
use crate::image::{Bitmap, Graymap, Image, Pixmap};
use crate::limits::Limits;
use crate::pnm::{self, Encoding, Family, Header};
use crate::sample::Sample;

/// An image of whichever family the input turned out to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyImage {
    Bitmap(Bitmap),
    Graymap(Graymap),
    Pixmap(Pixmap),
}

impl AnyImage {
    pub fn family(&self) -> Family {
        match self {
            AnyImage::Bitmap(_) => Family::Bitmap,
            AnyImage::Graymap(_) => Family::Graymap,
            AnyImage::Pixmap(_) => Family::Pixmap,
        }
    }

    pub fn header(&self) -> &Header {
        match self {
            AnyImage::Bitmap(img) => img.header(),
            AnyImage::Graymap(img) => img.header(),
            AnyImage::Pixmap(img) => img.header(),
        }
    }

    pub fn width(&self) -> u32 {
        self.header().width()
    }

    pub fn height(&self) -> u32 {
        self.header().height()
    }

    pub fn encoding(&self) -> Encoding {
        self.header().magic().encoding()
    }

    /// Encode with the image's own magic number.
    pub fn encode(&self) -> Result<Vec<u8>, NetpbmError> {
        match self {
            AnyImage::Bitmap(img) => img.encode(),
            AnyImage::Graymap(img) => img.encode(),
            AnyImage::Pixmap(img) => img.encode(),
        }
    }

    pub fn to_rgba(&self) -> RgbaView {
        match self {
            AnyImage::Bitmap(img) => img.to_rgba(),
            AnyImage::Graymap(img) => img.to_rgba(),
            AnyImage::Pixmap(img) => img.to_rgba(),
        }
    }

    pub fn into_bitmap(self) -> Option<Bitmap> {
        match self {
            AnyImage::Bitmap(img) => Some(img),
            _ => None,
        }
    }

    pub fn into_graymap(self) -> Option<Graymap> {
        match self {
            AnyImage::Graymap(img) => Some(img),
            _ => None,
        }
    }

    pub fn into_pixmap(self) -> Option<Pixmap> {
        match self {
            AnyImage::Pixmap(img) => Some(img),
            _ => None,
        }
    }
}

impl From<Bitmap> for AnyImage {
    fn from(img: Bitmap) -> Self {
        AnyImage::Bitmap(img)
    }
}

impl From<Graymap> for AnyImage {
    fn from(img: Graymap) -> Self {
        AnyImage::Graymap(img)
    }
}

impl From<Pixmap> for AnyImage {
    fn from(img: Pixmap) -> Self {
        AnyImage::Pixmap(img)
    }
}

/// Decode request builder.
///
/// ```
/// use netpbm_raster::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits {
///     max_pixels: Some(1 << 20),
///     ..Limits::default()
/// };
/// let img = DecodeRequest::new(b"P2\n2 1\n255\n0 255\n")
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(img.width(), 2);
/// # Ok::<(), netpbm_raster::NetpbmError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    /// Create a new decode request.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Set decode limits.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode whichever family the magic number names.
    pub fn decode(self, stop: impl Stop) -> Result<AnyImage, NetpbmError> {
        let (header, body) = pnm::parse_header(self.data)?;
        let image = match header.magic().family() {
            Family::Bitmap => {
                AnyImage::Bitmap(pnm::decode_with_header(header, body, self.limits, &stop)?)
            }
            Family::Graymap => {
                AnyImage::Graymap(pnm::decode_with_header(header, body, self.limits, &stop)?)
            }
            Family::Pixmap => {
                AnyImage::Pixmap(pnm::decode_with_header(header, body, self.limits, &stop)?)
            }
        };
        Ok(image)
    }

    /// Decode into a specific family; other families fail with
    /// [`NetpbmError::UnsupportedVariant`].
    pub fn decode_as<S: Sample>(self, stop: impl Stop) -> Result<Image<S>, NetpbmError> {
        pnm::decode(self.data, self.limits, &stop)
    }
}

/// Decode any PBM, PGM or PPM file.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<AnyImage, NetpbmError> {
    DecodeRequest::new(data).decode(stop)
}
