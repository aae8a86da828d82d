use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlipbookError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FlipbookError::color_parse("x")
            .to_string()
            .contains("color parse error:")
    );
    assert!(
        FlipbookError::unbalanced("x")
            .to_string()
            .contains("unbalanced graphics stack:")
    );
    assert!(FlipbookError::render("x").to_string().contains("render error:"));
}

#[test]
fn frame_wrapper_names_frame_and_keeps_root() {
    let err = FlipbookError::EmptyKeyframeSet
        .context("layer 'title'")
        .in_frame(7);
    let msg = err.to_string();
    assert!(msg.contains("frame 7"));
    assert!(msg.contains("layer 'title'"));
    assert!(matches!(err.root(), FlipbookError::EmptyKeyframeSet));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlipbookError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
