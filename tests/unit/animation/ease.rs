use super::*;

#[test]
fn endpoints_are_fixed_for_every_method() {
    for m in Interpolation::ALL {
        assert_eq!(m.apply(1.0), 1.0, "{m}");
        if m != Interpolation::Hold {
            assert_eq!(m.apply(0.0), 0.0, "{m}");
        }
    }
}

#[test]
fn cosine_is_symmetric_and_exact_at_midpoint() {
    assert_eq!(Interpolation::Cosine.apply(0.5), 0.5);
    let a = Interpolation::Cosine.apply(0.2);
    let b = Interpolation::Cosine.apply(0.8);
    assert!((a + b - 1.0).abs() < 1e-12);
    // Slower than linear near the start.
    assert!(a < 0.2);
}

#[test]
fn hold_steps_at_segment_end() {
    assert_eq!(Interpolation::Hold.apply(0.0), 0.0);
    assert_eq!(Interpolation::Hold.apply(0.99), 0.0);
}

#[test]
fn parses_names_case_and_separator_insensitively() {
    assert_eq!("linear".parse::<Interpolation>().unwrap(), Interpolation::Linear);
    assert_eq!("COSINE".parse::<Interpolation>().unwrap(), Interpolation::Cosine);
    assert_eq!(
        "in-out-cubic".parse::<Interpolation>().unwrap(),
        Interpolation::InOutCubic
    );
    for m in Interpolation::ALL {
        assert_eq!(m.name().parse::<Interpolation>().unwrap(), m);
    }
}

#[test]
fn unknown_name_is_unsupported() {
    let err = "bounce".parse::<Interpolation>().unwrap_err();
    assert!(matches!(
        err,
        FlipbookError::UnsupportedInterpolationMethod(ref n) if n == "bounce"
    ));
}
