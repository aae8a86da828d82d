use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let mut img = image::RgbaImage::new(w, h);
    for p in img.pixels_mut() {
        *p = image::Rgba(px);
    }
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn decode_premultiplies() {
    let img = ImageData::decode(&png_bytes(2, 3, [200, 100, 50, 128])).unwrap();
    assert_eq!((img.width(), img.height()), (2, 3));
    assert_eq!(&img.premul_rgba8()[..4], &[100, 50, 25, 128]);
}

#[test]
fn decode_rejects_garbage() {
    let err = ImageData::decode(b"definitely not an image").unwrap_err();
    assert!(matches!(err, FlipbookError::Other(_)));
}

#[test]
fn raw_constructor_checks_length() {
    assert!(ImageData::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(ImageData::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(ImageData::from_premul_rgba8(0, 2, vec![]).is_err());
}
