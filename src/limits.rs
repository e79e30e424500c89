use crate::NetpbmError;

/// Caps applied to a header before its body is decoded.
///
/// Every cap is optional and `Limits::default()` accepts anything.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Cap on `width * height`.
    pub max_pixels: Option<u64>,
    /// Cap on the decoded sample buffer, in bytes.
    pub max_memory_bytes: Option<u64>,
}

fn exceeded(what: &str, value: u64, cap: Option<u64>) -> Result<(), NetpbmError> {
    match cap {
        Some(cap) if value > cap => Err(NetpbmError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {cap}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Check a `width` x `height` raster of `sample_size`-byte samples.
    pub(crate) fn check_raster(
        &self,
        width: u32,
        height: u32,
        sample_size: usize,
    ) -> Result<(), NetpbmError> {
        let pixels = u64::from(width) * u64::from(height);
        // saturates past any representable cap
        let bytes = pixels.saturating_mul(sample_size as u64);
        exceeded("width", u64::from(width), self.max_width)?;
        exceeded("height", u64::from(height), self.max_height)?;
        exceeded("pixel count", pixels, self.max_pixels)?;
        exceeded("raster bytes", bytes, self.max_memory_bytes)
    }
}

#[cfg(test)]
mod tests {
    use rgb::RGB8;

    use super::*;

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check_raster(u32::MAX, u32::MAX, 3).is_ok());
    }

    #[test]
    fn pixel_limit_counts_area() {
        let limits = Limits {
            max_pixels: Some(12),
            ..Default::default()
        };
        assert!(limits.check_raster(4, 3, 1).is_ok());
        assert!(matches!(
            limits.check_raster(4, 4, 1),
            Err(NetpbmError::LimitExceeded(_))
        ));
    }

    #[test]
    fn memory_limit_scales_with_sample_size() {
        let limits = Limits {
            max_memory_bytes: Some(300),
            ..Default::default()
        };
        let rgb = core::mem::size_of::<RGB8>();
        assert!(limits.check_raster(10, 10, rgb).is_ok());
        assert!(limits.check_raster(10, 11, 1).is_ok());
        assert!(matches!(
            limits.check_raster(10, 11, rgb),
            Err(NetpbmError::LimitExceeded(msg)) if msg.contains("raster bytes")
        ));
    }

    #[test]
    fn byte_count_saturates_instead_of_wrapping() {
        let limits = Limits {
            max_memory_bytes: Some(u64::MAX - 1),
            ..Default::default()
        };
        assert!(limits.check_raster(u32::MAX, u32::MAX, usize::MAX).is_err());
    }
}
