use super::*;

#[test]
fn empty_font_bytes_are_rejected() {
    let err = FontFace::from_bytes(Vec::new()).unwrap_err();
    assert!(matches!(err, FlipbookError::Validation(_)));
}

#[test]
fn missing_font_file_reports_path() {
    let err = FontFace::open("/nonexistent/dir/font.ttf").unwrap_err();
    assert!(err.to_string().contains("font.ttf"));
}

#[test]
fn clones_share_bytes_and_compare_equal() {
    let a = FontFace::from_bytes(vec![1, 2, 3]).unwrap();
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(a.key(), b.key());
    assert_eq!(b.bytes(), &[1, 2, 3]);
}

#[test]
fn garbage_font_bytes_fail_at_layout() {
    let face = FontFace::from_bytes(vec![0u8; 64]).unwrap();
    let mut engine = TextEngine::new();
    let err = engine
        .layout_plain("hi", &face, 12.0, TextBrush::default())
        .err()
        .unwrap();
    assert!(matches!(err, FlipbookError::Validation(_)));
}

#[test]
fn non_positive_size_is_rejected() {
    let face = FontFace::from_bytes(vec![0u8; 64]).unwrap();
    let mut engine = TextEngine::new();
    assert!(
        engine
            .layout_plain("hi", &face, 0.0, TextBrush::default())
            .is_err()
    );
}

fn dejavu() -> FontFace {
    FontFace::open("tests/data/fonts/DejaVuSans.ttf").unwrap()
}

#[test]
fn vendored_font_lays_out() {
    let face = dejavu();
    let mut engine = TextEngine::new();
    let layout = engine
        .layout_plain("Play", &face, 32.0, TextBrush::default())
        .unwrap();
    let extents = TextExtents::of(&layout);
    assert!(extents.width > 32.0, "{extents:?}");
    assert!(extents.baseline > 0.0 && extents.baseline < extents.height);
}

#[test]
fn wider_text_measures_wider() {
    let face = dejavu();
    let short = TextExtents::measure("Go", &face, 20.0).unwrap();
    let long = TextExtents::measure("Go to chapter 12", &face, 20.0).unwrap();
    assert!(long.width > short.width * 3.0);

    let big = TextExtents::measure("Go", &face, 40.0).unwrap();
    assert!((big.width - 2.0 * short.width).abs() < 1.0);
}
