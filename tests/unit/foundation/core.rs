use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn inclusive_range_covers_last_frame() {
    let r = FrameRange::inclusive(FrameIndex(1), FrameIndex(3)).unwrap();
    assert_eq!(r.len_frames(), 3);
    let frames: Vec<u64> = r.iter().map(|f| f.0).collect();
    assert_eq!(frames, vec![1, 2, 3]);
}

#[test]
fn fps_rejects_zero_terms() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let ntsc = Fps::new(30000, 1001).unwrap();
    assert_eq!(ntsc.secs_to_frames_round(10.0), 300);
}

#[test]
fn size_rejects_zero_and_oversized() {
    assert!(Size::new(0, 10).is_err());
    assert!(Size::new(70_000, 10).is_err());
    assert_eq!(Size::new(720, 480).unwrap().as_vec2(), Vec2::new(720.0, 480.0));
}

#[test]
fn aspect_parses_and_reduces() {
    let a: Aspect = "16:9".parse().unwrap();
    assert_eq!(a, Aspect::WIDESCREEN);
    assert!("16x9".parse::<Aspect>().is_err());
    assert_eq!(Aspect::of(Size::new(640, 480).unwrap()), Aspect::STANDARD);
    assert_eq!(Aspect::STANDARD.to_string(), "4:3");
}
