use super::*;
use crate::{draw::command::Command, foundation::core::Size};

fn drawing() -> Drawing {
    Drawing::new(Size::new(100, 100).unwrap())
}

fn applied(effect: &Effect, frame: u64) -> Vec<Command> {
    let mut d = drawing();
    effect.draw_on(&mut d, FrameIndex(frame)).unwrap();
    d.into_commands()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn movement_clamps_to_its_interval() {
    let effect: Effect = Movement::new(1, 10, (0.0, 0.0), (100.0, 100.0))
        .unwrap()
        .into();

    for (frame, expected) in [(0, 0.0), (1, 0.0), (10, 100.0), (50, 100.0)] {
        assert_eq!(
            applied(&effect, frame),
            vec![Command::Translate {
                dx: expected,
                dy: expected
            }],
            "frame {frame}"
        );
    }
}

#[test]
fn movement_interpolates_inside_interval() {
    let m = Movement::new(1, 10, (0.0, 0.0), (90.0, -9.0)).unwrap();
    let (dx, dy) = m.offset_at(FrameIndex(4));
    assert!(approx(dx, 30.0) && approx(dy, -3.0));

    let eased = m.with_interpolation(Interpolation::Cosine);
    let (dx, _) = eased.offset_at(FrameIndex(1));
    assert_eq!(dx, 0.0);
    let (dx, _) = eased.offset_at(FrameIndex(10));
    assert_eq!(dx, 90.0);
}

#[test]
fn start_after_end_is_rejected() {
    assert!(matches!(
        Movement::new(10, 1, (0.0, 0.0), (1.0, 1.0)).unwrap_err(),
        FlipbookError::Validation(_)
    ));
    assert!(Spectrum::new(5, 4).is_err());
    assert!(Fade::new(3, 2, 0.0, 1.0).is_err());
}

#[test]
fn fade_applies_opacity() {
    let effect: Effect = Fade::new(0, 10, 0.0, 1.0).unwrap().into();
    assert_eq!(applied(&effect, 5), vec![Command::Opacity { alpha: 0.5 }]);
    assert_eq!(applied(&effect, 20), vec![Command::Opacity { alpha: 1.0 }]);
    assert!(Fade::new(0, 10, 0.0, 1.5).is_err());
}

#[test]
fn fade_in_out_holds_between_ramps() {
    let fade = Fade::in_out(1, 31, 10).unwrap();
    assert_eq!(fade.alpha_at(FrameIndex(1)), 0.0);
    assert!(approx(fade.alpha_at(FrameIndex(6)), 0.5));
    assert_eq!(fade.alpha_at(FrameIndex(11)), 1.0);
    assert_eq!(fade.alpha_at(FrameIndex(16)), 1.0);
    assert!(approx(fade.alpha_at(FrameIndex(26)), 0.5));
    assert_eq!(fade.alpha_at(FrameIndex(31)), 0.0);
    assert_eq!(fade.alpha_at(FrameIndex(40)), 0.0);

    assert!(Fade::in_out(1, 10, 5).is_err());
}

#[test]
fn colorfade_sets_source() {
    let effect: Effect = Colorfade::new(0, 4, "black", "white").unwrap().into();
    match &applied(&effect, 2)[..] {
        [Command::SetSource { color }] => {
            assert!(approx(color.r, 0.5) && approx(color.g, 0.5) && approx(color.b, 0.5));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(
        Colorfade::new(0, 4, "blurple", "white").unwrap_err(),
        FlipbookError::ColorParse(_)
    ));
}

#[test]
fn spectrum_reference_colors() {
    let s = Spectrum::new(1, 7).unwrap();
    let cases = [
        (0, (1.0, 0.0, 0.0)),
        (1, (1.0, 0.0, 0.0)),
        (2, (1.0, 1.0, 0.0)),
        (3, (0.0, 1.0, 0.0)),
        (4, (0.0, 1.0, 1.0)),
        (5, (0.0, 0.0, 1.0)),
        (6, (1.0, 0.0, 1.0)),
        (7, (1.0, 0.0, 0.0)),
        (99, (1.0, 0.0, 0.0)),
    ];
    for (frame, (r, g, b)) in cases {
        let c = s.color_at(FrameIndex(frame));
        assert!(
            approx(c.r, r) && approx(c.g, g) && approx(c.b, b) && c.a == 1.0,
            "frame {frame}: {c:?}"
        );
    }
    assert_eq!(s.progress_at(FrameIndex(0)), 0.0);
    assert_eq!(s.progress_at(FrameIndex(4)), 0.5);
    assert_eq!(s.progress_at(FrameIndex(70)), 1.0);
}

#[test]
fn degenerate_spectrum_steps() {
    let s = Spectrum::new(3, 3).unwrap();
    assert_eq!(s.progress_at(FrameIndex(3)), 0.0);
    assert_eq!(s.progress_at(FrameIndex(4)), 1.0);
}

#[test]
fn scale_and_whirl_transforms() {
    let scale: Effect = Scale::uniform(0, 10, 1.0, 2.0).unwrap().into();
    assert_eq!(
        applied(&scale, 5),
        vec![Command::Scale { sx: 1.5, sy: 1.5 }]
    );
    assert!(Scale::new(0, 1, (f64::NAN, 1.0), (1.0, 1.0)).is_err());

    let whirl: Effect = Whirl::new(0, 10, (50.0, 40.0), 0.0, 180.0).unwrap().into();
    let cmds = applied(&whirl, 10);
    assert_eq!(cmds.len(), 3);
    assert_eq!(cmds[0], Command::Translate { dx: 50.0, dy: 40.0 });
    assert_eq!(
        cmds[2],
        Command::Translate {
            dx: -50.0,
            dy: -40.0
        }
    );
    match &cmds[1] {
        Command::Rotate { radians } => assert!(approx(*radians, std::f64::consts::PI)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn effects_serialize_with_type_tag() {
    let effect: Effect = Spectrum::new(1, 30).unwrap().into();
    let json = serde_json::to_value(&effect).unwrap();
    assert_eq!(json["type"], "spectrum");
    let back: Effect = serde_json::from_value(json).unwrap();
    assert_eq!(back, effect);
    assert_eq!(back.span(), (1.0, 30.0));
    assert_eq!(back.name(), "spectrum");
}
