use super::*;
use crate::{draw::command::Command, foundation::core::Size};

fn apply(kf: &KeyFunction, frame: u64) -> Vec<Command> {
    let mut d = Drawing::new(Size::new(10, 10).unwrap());
    kf.draw_on(&mut d, FrameIndex(frame)).unwrap();
    d.into_commands()
}

#[test]
fn fill_opacity_by_setter_name() {
    let kf = KeyFunction::named("fill_opacity", [(1.0, 0.0), (11.0, 1.0)], "linear").unwrap();
    assert_eq!(kf.attribute(), Attribute::FillOpacity);
    assert_eq!(kf.span(), (1.0, 11.0));
    assert_eq!(apply(&kf, 6), vec![Command::FillOpacity { alpha: 0.5 }]);
    assert_eq!(apply(&kf, 0), vec![Command::FillOpacity { alpha: 0.0 }]);
}

#[test]
fn wrong_value_kind_is_a_type_mismatch() {
    let err = KeyFunction::new(
        Attribute::StrokeWidth,
        [(0.0, Value::Scalar(1.0)), (5.0, Value::Pair(1.0, 2.0))],
        "linear",
    )
    .unwrap_err();
    match err {
        FlipbookError::TypeMismatch { expected, found } => {
            assert_eq!(expected, "scalar");
            assert_eq!(found, "pair");
        }
        other => panic!("unexpected {other:?}"),
    }

    let err = KeyFunction::new(Attribute::Source, [(0.0, 1.0)], "linear").unwrap_err();
    assert!(matches!(err, FlipbookError::TypeMismatch { expected: "color", .. }));
}

#[test]
fn unknown_names_are_rejected() {
    assert!(matches!(
        KeyFunction::named("fill_opacity", [(0.0, 1.0)], "bouncy").unwrap_err(),
        FlipbookError::UnsupportedInterpolationMethod(_)
    ));
    assert!(matches!(
        KeyFunction::named("glow", [(0.0, 1.0)], "linear").unwrap_err(),
        FlipbookError::Validation(_)
    ));
    assert!(matches!(
        KeyFunction::new(Attribute::Opacity, Vec::<(f64, f64)>::new(), "linear").unwrap_err(),
        FlipbookError::EmptyKeyframeSet
    ));
}

#[test]
fn color_and_pair_attributes() {
    let kf = KeyFunction::new(
        Attribute::StrokeColor,
        [
            (0.0, Value::color("red").unwrap()),
            (2.0, Value::color("blue").unwrap()),
        ],
        "linear",
    )
    .unwrap();
    match &apply(&kf, 1)[..] {
        [Command::StrokeColor { color }] => {
            assert_eq!((color.r, color.g, color.b), (0.5, 0.0, 0.5));
        }
        other => panic!("unexpected {other:?}"),
    }

    let kf = KeyFunction::new(Attribute::Translate, [(0.0, (0.0, 0.0)), (4.0, (8.0, 4.0))], "cosine")
        .unwrap();
    assert_eq!(apply(&kf, 2), vec![Command::Translate { dx: 4.0, dy: 2.0 }]);
}

#[test]
fn out_of_range_keys_fail_at_construction() {
    let bad: [(Attribute, f64); 5] = [
        (Attribute::Opacity, 2.0),
        (Attribute::FillOpacity, -0.1),
        (Attribute::StrokeWidth, -1.0),
        (Attribute::FontSize, 0.0),
        (Attribute::Rotation, f64::NAN),
    ];
    for (attr, value) in bad {
        let err = KeyFunction::new(attr, [(1.0, 1.0_f64.min(value.abs())), (4.0, value)], "linear")
            .unwrap_err();
        assert!(matches!(err, FlipbookError::Validation(_)), "{attr}: {err}");
    }

    let err = KeyFunction::new(Attribute::Scale, [(0.0, (1.0, f64::INFINITY))], "linear")
        .unwrap_err();
    assert!(matches!(err, FlipbookError::Validation(_)));
}

#[test]
fn keys_inside_the_domain_draw_every_frame() {
    let kf = KeyFunction::new(Attribute::StrokeWidth, [(1.0, 4.0), (4.0, 0.0)], "in_out_cubic")
        .unwrap();
    for frame in 0..=5 {
        match &apply(&kf, frame)[..] {
            [Command::StrokeWidth { width }] => assert!((0.0..=4.0).contains(width)),
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn attribute_names_parse_leniently() {
    for attr in Attribute::ALL {
        assert_eq!(attr.name().parse::<Attribute>().unwrap(), attr);
        assert_eq!(attr.to_string(), attr.name());
    }
    assert_eq!(
        "Stroke-Width".parse::<Attribute>().unwrap(),
        Attribute::StrokeWidth
    );
}
