#![no_main]
use libfuzzer_sys::fuzz_target;
use netpbm_raster::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Limits::default()
    };
    // If we can decode it, re-encoding and decoding again must give the same image
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    for encoding in [Encoding::Ascii, Encoding::Binary] {
        let reencoded = match &decoded {
            AnyImage::Bitmap(img) => EncodeRequest::new(img).with_encoding(encoding).encode(enough::Unstoppable),
            AnyImage::Graymap(img) => EncodeRequest::new(img).with_encoding(encoding).encode(enough::Unstoppable),
            AnyImage::Pixmap(img) => EncodeRequest::new(img).with_encoding(encoding).encode(enough::Unstoppable),
        }
        .expect("decoded image failed to encode");

        let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
            panic!("re-encoded data failed to decode");
        };
        assert_eq!(decoded.family(), decoded2.family());
        assert_eq!(decoded.header().max_value(), decoded2.header().max_value());
        assert_eq!(decoded.to_rgba(), decoded2.to_rgba(), "roundtrip pixel mismatch");
    }
});
