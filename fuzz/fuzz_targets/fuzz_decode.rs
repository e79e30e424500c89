#![no_main]
use libfuzzer_sys::fuzz_target;
use netpbm_raster::{Bitmap, Graymap, ImageInfo, Limits, Pixmap};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Limits::default()
    };

    // Auto-detect decode must never panic
    let _ = ImageInfo::from_bytes(data);
    let _ = netpbm_raster::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);

    // Typed decodes reject other families without panicking
    let request = netpbm_raster::DecodeRequest::new(data).with_limits(&limits);
    let _: Result<Bitmap, _> = request.decode_as(enough::Unstoppable);
    let _: Result<Graymap, _> = request.decode_as(enough::Unstoppable);
    let _: Result<Pixmap, _> = request.decode_as(enough::Unstoppable);
});
