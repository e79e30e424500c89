//! In-place tonal and geometric transforms, and conversions between families.

use alloc::format;
use rgb::RGB8;

use crate::error::NetpbmError;
use crate::image::{Bitmap, Graymap, Image};
use crate::pnm::{Family, Header, MagicNumber};
use crate::sample::{Sample, luma_x1000};

impl<S: Sample> Image<S> {
    /// Replace every sample with `max - sample` (per channel); bitmaps negate.
    pub fn invert(&mut self) {
        let max = self.max_value().unwrap_or(1);
        let (_, raster) = self.parts_mut();
        raster.for_each_mut(|s| *s = s.inverted(max));
    }

    /// Mirror horizontally.
    pub fn flip(&mut self) {
        self.parts_mut().1.flip();
    }

    /// Mirror vertically.
    pub fn flop(&mut self) {
        self.parts_mut().1.flop();
    }

    /// Rotate 90° clockwise. Width and height swap.
    pub fn rotate_90_cw(&mut self) {
        let (header, raster) = self.parts_mut();
        let rotated = raster.rotated_90_cw();
        *raster = rotated;
        header.transpose();
        log::trace!("rotated to {}x{}", header.width(), header.height());
    }

    /// Rescale every sample from `0..=max` to `0..=new_max` and store the new max.
    ///
    /// Fails with [`NetpbmError::InvalidMaxValue`] for bitmaps and for `new_max == 0`.
    pub fn rescale_max(&mut self, new_max: u8) -> Result<(), NetpbmError> {
        let old_max = self.max_value().ok_or_else(|| {
            NetpbmError::InvalidMaxValue(format!("{:?} images have no max value", S::FAMILY))
        })?;
        if new_max == 0 {
            return Err(NetpbmError::InvalidMaxValue("new max value is zero".into()));
        }
        if old_max == 0 {
            return Err(NetpbmError::InvalidMaxValue("current max value is zero".into()));
        }

        let (header, raster) = self.parts_mut();
        if old_max != new_max {
            raster.for_each_mut(|s| *s = s.rescaled(old_max, new_max));
        }
        header.set_max_value(new_max);
        log::trace!("rescaled max value {old_max} -> {new_max}");
        Ok(())
    }
}

/// Header for a converted image: same size and encoding, new family.
fn converted_header<S: Sample>(
    src: &Image<S>,
    family: Family,
    max_value: Option<u8>,
) -> Result<Header, NetpbmError> {
    Header::new(
        MagicNumber::new(family, src.encoding()),
        src.width(),
        src.height(),
        max_value,
    )
}

impl Image<RGB8> {
    /// Luma graymap, `round(0.299 R + 0.587 G + 0.114 B)`, keeping the max value.
    pub fn to_graymap(&self) -> Result<Graymap, NetpbmError> {
        let header = converted_header(self, Family::Graymap, self.max_value())?;
        let raster = self
            .raster()
            .map(|&p| ((luma_x1000(p) + 500) / 1000) as u8);
        Image::from_parts(header, raster)
    }

    /// Threshold to a bitmap: a pixel is set when its luma exceeds half the max value.
    pub fn to_bitmap(&self) -> Result<Bitmap, NetpbmError> {
        let max = u32::from(self.max_value().unwrap_or(u8::MAX));
        let header = converted_header(self, Family::Bitmap, None)?;
        // luma / 1000 > max / 2  <=>  2 * luma > 1000 * max
        let raster = self.raster().map(|&p| 2 * luma_x1000(p) > 1000 * max);
        Image::from_parts(header, raster)
    }
}

impl Image<u8> {
    /// Threshold to a bitmap: a sample is set when it exceeds half the max value.
    pub fn to_bitmap(&self) -> Result<Bitmap, NetpbmError> {
        let max = u32::from(self.max_value().unwrap_or(u8::MAX));
        let header = converted_header(self, Family::Bitmap, None)?;
        let raster = self.raster().map(|&v| 2 * u32::from(v) > max);
        Image::from_parts(header, raster)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::image::Pixmap;
    use crate::pnm::Encoding;

    fn gray(rows: &[alloc::vec::Vec<u8>], max: u8) -> Graymap {
        let header = Header::new(
            MagicNumber::AsciiGray,
            rows[0].len() as u32,
            rows.len() as u32,
            Some(max),
        )
        .unwrap();
        Graymap::from_rows(header, rows).unwrap()
    }

    #[test]
    fn invert_uses_max_value() {
        let mut img = gray(&[vec![0, 3], vec![10, 15]], 15);
        img.invert();
        assert_eq!(img.raster().samples(), &[15, 12, 5, 0]);
    }

    #[test]
    fn rescale_updates_header() {
        let mut img = gray(&[vec![0, 1, 2, 3]], 3);
        img.rescale_max(255).unwrap();
        assert_eq!(img.max_value(), Some(255));
        assert_eq!(img.raster().samples(), &[0, 85, 170, 255]);
    }

    #[test]
    fn rescale_rejects_zero_and_bitmaps() {
        let mut img = gray(&[vec![1]], 3);
        assert!(matches!(
            img.rescale_max(0),
            Err(NetpbmError::InvalidMaxValue(_))
        ));
        assert_eq!(img.max_value(), Some(3));

        let mut bits = Bitmap::new(2, 2, Encoding::Ascii).unwrap();
        assert!(matches!(
            bits.rescale_max(1),
            Err(NetpbmError::InvalidMaxValue(_))
        ));
    }

    #[test]
    fn graymap_threshold_is_strictly_above_half() {
        let img = gray(&[vec![0, 127, 128, 200]], 255);
        let bits = img.to_bitmap().unwrap();
        assert_eq!(bits.raster().samples(), &[false, false, true, true]);
        assert_eq!(bits.magic(), MagicNumber::AsciiBit);
        assert_eq!(bits.max_value(), None);
    }

    #[test]
    fn pixmap_to_graymap_rounds_luma() {
        let mut img = Pixmap::new(3, 1, 255, Encoding::Binary).unwrap();
        img.set(0, 0, RGB8::new(255, 0, 0)).unwrap();
        img.set(1, 0, RGB8::new(0, 255, 0)).unwrap();
        img.set(2, 0, RGB8::new(255, 255, 255)).unwrap();
        let g = img.to_graymap().unwrap();
        // 76.245, 149.685, 255
        assert_eq!(g.raster().samples(), &[76, 150, 255]);
        assert_eq!(g.magic(), MagicNumber::BinaryGray);
        assert_eq!(g.max_value(), Some(255));
    }

    #[test]
    fn pixmap_threshold_compares_luma() {
        let mut img = Pixmap::new(3, 1, 255, Encoding::Ascii).unwrap();
        img.set(0, 0, RGB8::new(127, 127, 127)).unwrap();
        img.set(1, 0, RGB8::new(128, 128, 128)).unwrap();
        // luma 127.701
        img.set(2, 0, RGB8::new(127, 128, 128)).unwrap();
        let bits = img.to_bitmap().unwrap();
        assert_eq!(bits.raster().samples(), &[false, true, true]);
    }
}
