use alloc::vec::Vec;
use enough::Stop;

use crate::error::NetpbmError;
use crate::image::Image;
use crate::pnm::{self, Encoding, MagicNumber};
use crate::sample::Sample;

/// Encode request builder.
///
/// Writes the image under its own magic number unless an [`Encoding`] is
/// given, in which case the plain or raw variant of the same family is used.
/// The image itself is never modified.
///
/// ```
/// use netpbm_raster::{EncodeRequest, Encoding, Graymap, Unstoppable};
///
/// let img = Graymap::new(2, 2, 255, Encoding::Ascii)?;
/// let raw = EncodeRequest::new(&img)
///     .with_encoding(Encoding::Binary)
///     .encode(Unstoppable)?;
/// assert!(raw.starts_with(b"P5\n"));
/// # Ok::<(), netpbm_raster::NetpbmError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest<'a, S> {
    image: &'a Image<S>,
    encoding: Option<Encoding>,
}

impl<'a, S: Sample> EncodeRequest<'a, S> {
    pub fn new(image: &'a Image<S>) -> Self {
        Self {
            image,
            encoding: None,
        }
    }

    /// Override the plain/raw choice.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// The magic number that will be written.
    pub fn magic(&self) -> MagicNumber {
        match self.encoding {
            Some(encoding) => MagicNumber::new(S::FAMILY, encoding),
            None => self.image.magic(),
        }
    }

    pub fn encode(self, stop: impl Stop) -> Result<Vec<u8>, NetpbmError> {
        pnm::encode(self.image, self.magic(), &stop)
    }
}
