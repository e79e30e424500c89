use netpbm_raster::*;

fn graymap(rows: &[Vec<u8>], max: u8) -> Graymap {
    let header = Header::new(
        MagicNumber::BinaryGray,
        rows[0].len() as u32,
        rows.len() as u32,
        Some(max),
    )
    .unwrap();
    Graymap::from_rows(header, rows).unwrap()
}

fn colourful(w: u32, h: u32) -> Pixmap {
    let mut img = Pixmap::new(w, h, 255, Encoding::Ascii).unwrap();
    for y in 0..h {
        for x in 0..w {
            img.set(x, y, RGB8::new((x * 40) as u8, (y * 50) as u8, (x ^ y) as u8))
                .unwrap();
        }
    }
    img
}

fn stripes(w: u32, h: u32) -> Bitmap {
    let mut img = Bitmap::new(w, h, Encoding::Binary).unwrap();
    for y in 0..h {
        for x in 0..w {
            img.set(x, y, x % 3 == 0 || y == 0).unwrap();
        }
    }
    img
}

#[test]
fn invert_flip_flop_are_involutions() {
    let p = colourful(5, 3);
    let g = graymap(&[vec![0, 7, 9], vec![3, 4, 15]], 15);
    let b = stripes(7, 4);

    for op in [Pixmap::invert, Pixmap::flip, Pixmap::flop] {
        let mut img = p.clone();
        op(&mut img);
        op(&mut img);
        assert_eq!(img, p);
    }
    for op in [Graymap::invert, Graymap::flip, Graymap::flop] {
        let mut img = g.clone();
        op(&mut img);
        op(&mut img);
        assert_eq!(img, g);
    }
    for op in [Bitmap::invert, Bitmap::flip, Bitmap::flop] {
        let mut img = b.clone();
        op(&mut img);
        op(&mut img);
        assert_eq!(img, b);
    }
}

#[test]
fn flip_mirrors_columns_and_flop_mirrors_rows() {
    let mut img = graymap(&[vec![1, 2, 3], vec![4, 5, 6]], 255);
    img.flip();
    assert_eq!(img.raster().samples(), &[3, 2, 1, 6, 5, 4]);
    img.flop();
    assert_eq!(img.raster().samples(), &[6, 5, 4, 3, 2, 1]);
}

#[test]
fn bitmap_invert_negates() {
    let mut img = stripes(3, 2);
    img.invert();
    assert_eq!(
        img.raster().samples(),
        &[false, false, false, false, true, true]
    );
}

#[test]
fn rotation_is_clockwise() {
    let mut img = graymap(&[vec![1, 2, 3], vec![4, 5, 6]], 255);
    img.rotate_90_cw();
    assert_eq!(img.size(), (2, 3));
    assert_eq!(img.raster().samples(), &[4, 1, 5, 2, 6, 3]);
    assert!(img.encode().unwrap().starts_with(b"P5\n2 3\n255\n"));
}

#[test]
fn four_rotations_restore_the_image() {
    let p = colourful(5, 3);
    let mut img = p.clone();
    for turn in 1..=4 {
        img.rotate_90_cw();
        let expected = if turn % 2 == 1 { (3, 5) } else { (5, 3) };
        assert_eq!(img.size(), expected);
    }
    assert_eq!(img, p);

    let b = stripes(10, 3);
    let mut bits = b.clone();
    for _ in 0..4 {
        bits.rotate_90_cw();
    }
    assert_eq!(bits, b);
}

#[test]
fn rotated_image_roundtrips() {
    let mut img = stripes(10, 3);
    img.rotate_90_cw();
    let decoded = Bitmap::decode(&img.encode().unwrap()).unwrap();
    assert_eq!(decoded, img);
}

#[test]
fn rescale_down_and_up() {
    let mut img = graymap(&[vec![0, 128, 255]], 255);
    img.rescale_max(15).unwrap();
    assert_eq!(img.max_value(), Some(15));
    // 7.53 rounds to 8
    assert_eq!(img.raster().samples(), &[0, 8, 15]);

    let mut p = colourful(2, 2);
    let before = p.clone();
    p.rescale_max(255).unwrap();
    assert_eq!(p, before);
}

#[test]
fn rescale_rejects_zero() {
    let mut img = colourful(1, 1);
    assert!(matches!(
        img.rescale_max(0),
        Err(NetpbmError::InvalidMaxValue(_))
    ));
}

#[test]
fn graymap_threshold() {
    let img = graymap(&[vec![200, 127, 128, 0]], 255);
    let bits = img.to_bitmap().unwrap();
    assert_eq!(bits.raster().samples(), &[true, false, true, false]);
    assert_eq!(bits.encoding(), Encoding::Binary);
}

#[test]
fn pixmap_conversions_keep_size_and_encoding() {
    let img = colourful(4, 3);
    let gray = img.to_graymap().unwrap();
    assert_eq!(gray.size(), (4, 3));
    assert_eq!(gray.magic(), MagicNumber::AsciiGray);
    assert_eq!(gray.at(0, 0).unwrap(), 0);
    // 0.299 * 120 + 0.587 * 100 + 0.114 * 1 = 94.694
    assert_eq!(gray.at(3, 2).unwrap(), 95);

    let bits = img.to_bitmap().unwrap();
    assert_eq!(bits.magic(), MagicNumber::AsciiBit);
    assert!(!bits.at(0, 0).unwrap());
}

#[test]
fn rgba_export_of_every_family() {
    let p = colourful(2, 1).to_rgba();
    assert_eq!(p.pixels[1], RGBA8::new(40, 0, 1, 255));

    let g = graymap(&[vec![0, 15]], 15).to_rgba();
    assert_eq!(g.as_bytes(), [0, 0, 0, 255, 255, 255, 255, 255]);

    let b = stripes(2, 2).to_rgba();
    assert_eq!(b.pixels.len(), 4);
    assert_eq!(b.pixels[3], RGBA8::new(255, 255, 255, 255));
}
