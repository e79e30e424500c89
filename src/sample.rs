use alloc::vec::Vec;
use core::fmt;

use enough::Stop;
use rgb::{RGB8, RGBA8};

use crate::error::NetpbmError;
use crate::pnm::{Family, Header};

/// A raster sample: `bool` (PBM), `u8` (PGM) or [`RGB8`] (PPM).
///
/// Sealed; the three implementations carry the per-family codecs.
pub trait Sample: Copy + Default + PartialEq + fmt::Debug + Send + Sync + sealed::Sealed {
    /// The Netpbm family that stores this sample type.
    const FAMILY: Family;

    /// Whether every channel is at most `max`.
    fn fits(self, max: u8) -> bool;

    /// `max - sample` per channel; bitmaps negate.
    fn inverted(self, max: u8) -> Self;

    /// Scale every channel from `0..=old_max` to `0..=new_max`, rounding half up.
    fn rescaled(self, old_max: u8, new_max: u8) -> Self;

    /// Opaque 8-bit RGBA for display. A set bitmap bit is black.
    fn to_rgba(self, max: u8) -> RGBA8;
}

pub(crate) mod sealed {
    use super::*;

    pub trait Sealed: Sized {
        fn decode_body(header: &Header, body: &[u8], stop: &dyn Stop) -> Result<Vec<Self>, NetpbmError>;

        fn encode_body(
            header: &Header,
            samples: &[Self],
            out: &mut Vec<u8>,
            stop: &dyn Stop,
        ) -> Result<(), NetpbmError>;

        /// Encoded body size, for output preallocation.
        fn body_len_hint(header: &Header) -> usize;
    }
}

#[inline]
fn rescale_channel(v: u8, old_max: u8, new_max: u8) -> u8 {
    let old = u32::from(old_max);
    let scaled = (2 * u32::from(v) * u32::from(new_max) + old) / (2 * old);
    scaled.min(u32::from(new_max)) as u8
}

#[inline]
fn to_display(v: u8, max: u8) -> u8 {
    let max = u32::from(max);
    ((u32::from(v) * 255 + max / 2) / max).min(255) as u8
}

/// `299 R + 587 G + 114 B`, i.e. Rec. 601 luma scaled by 1000.
#[inline]
pub(crate) fn luma_x1000(p: RGB8) -> u32 {
    u32::from(p.r) * 299 + u32::from(p.g) * 587 + u32::from(p.b) * 114
}

impl Sample for bool {
    const FAMILY: Family = Family::Bitmap;

    fn fits(self, _max: u8) -> bool {
        true
    }

    fn inverted(self, _max: u8) -> Self {
        !self
    }

    fn rescaled(self, _old_max: u8, _new_max: u8) -> Self {
        self
    }

    fn to_rgba(self, _max: u8) -> RGBA8 {
        let v = if self { 0 } else { 255 };
        RGBA8::new(v, v, v, 255)
    }
}

impl Sample for u8 {
    const FAMILY: Family = Family::Graymap;

    fn fits(self, max: u8) -> bool {
        self <= max
    }

    fn inverted(self, max: u8) -> Self {
        max.saturating_sub(self)
    }

    fn rescaled(self, old_max: u8, new_max: u8) -> Self {
        rescale_channel(self, old_max, new_max)
    }

    fn to_rgba(self, max: u8) -> RGBA8 {
        let v = to_display(self, max);
        RGBA8::new(v, v, v, 255)
    }
}

impl Sample for RGB8 {
    const FAMILY: Family = Family::Pixmap;

    fn fits(self, max: u8) -> bool {
        self.r <= max && self.g <= max && self.b <= max
    }

    fn inverted(self, max: u8) -> Self {
        RGB8::new(
            max.saturating_sub(self.r),
            max.saturating_sub(self.g),
            max.saturating_sub(self.b),
        )
    }

    fn rescaled(self, old_max: u8, new_max: u8) -> Self {
        RGB8::new(
            rescale_channel(self.r, old_max, new_max),
            rescale_channel(self.g, old_max, new_max),
            rescale_channel(self.b, old_max, new_max),
        )
    }

    fn to_rgba(self, max: u8) -> RGBA8 {
        RGBA8::new(
            to_display(self.r, max),
            to_display(self.g, max),
            to_display(self.b, max),
            255,
        )
    }
}
