//! RGBA8 export for handing images to other codecs (PNG writers and the like).

use alloc::vec::Vec;
use rgb::RGBA8;

use crate::image::Image;
use crate::sample::Sample;

/// Opaque 8-bit RGBA pixels, row-major, channels scaled to `0..=255`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaView {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<RGBA8>,
}

impl RgbaView {
    /// Interleaved `R, G, B, A` bytes.
    pub fn as_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            out.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
        out
    }
}

impl<S: Sample> Image<S> {
    /// Convert to RGBA8. Bitmap bits map set to black, clear to white.
    pub fn to_rgba(&self) -> RgbaView {
        let max = self.max_value().unwrap_or(1);
        RgbaView {
            width: self.width(),
            height: self.height(),
            pixels: self
                .raster()
                .samples()
                .iter()
                .map(|s| s.to_rgba(max))
                .collect(),
        }
    }

    /// Convert to an [`imgref::ImgVec`] of RGBA8 pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<RGBA8> {
        let view = self.to_rgba();
        imgref::ImgVec::new(view.pixels, view.width as usize, view.height as usize)
    }
}
