use super::*;

fn ramp(method: Interpolation) -> Tween<f64> {
    Tween::<f64>::between(1.0, 0.0, 10.0, 100.0, method).unwrap()
}

#[test]
fn empty_keyframe_list_is_rejected() {
    let err = Tween::<f64>::new(Vec::<Keyframe<f64>>::new(), Interpolation::Linear).unwrap_err();
    assert!(matches!(err, FlipbookError::EmptyKeyframeSet));
}

#[test]
fn non_finite_time_is_rejected() {
    let err = Tween::<f64>::new([(f64::NAN, 1.0)], Interpolation::Linear).unwrap_err();
    assert!(matches!(err, FlipbookError::Validation(_)));
}

#[test]
fn boundary_values_are_held() {
    let t = ramp(Interpolation::Linear);
    for time in [-100.0, 0.0, 0.5, 1.0] {
        assert_eq!(t.value_at(time), 0.0);
    }
    for time in [10.0, 10.5, 1e9] {
        assert_eq!(t.value_at(time), 100.0);
    }
}

#[test]
fn linear_interpolates_between_keys() {
    let t = ramp(Interpolation::Linear);
    let expected = 100.0 * (5.0 - 1.0) / (10.0 - 1.0);
    assert!((t.value_at(5.0) - expected).abs() < 1e-12);
    assert!((t.value_at(5.0) - 44.444).abs() < 1e-3);
}

#[test]
fn cosine_agrees_with_linear_at_ends_and_midpoint() {
    let t = ramp(Interpolation::Cosine);
    assert_eq!(t.value_at(1.0), 0.0);
    assert_eq!(t.value_at(10.0), 100.0);
    assert_eq!(t.value_at(5.5), 50.0);
    assert!(t.value_at(2.0) < ramp(Interpolation::Linear).value_at(2.0));
}

#[test]
fn single_keyframe_is_constant() {
    let t = Tween::<f64>::new([(4.0, 7.5)], Interpolation::Cosine).unwrap();
    for time in [-1.0, 4.0, 100.0] {
        assert_eq!(t.value_at(time), 7.5);
    }
    assert_eq!(Tween::constant(3.0).value_at(42.0), 3.0);
}

#[test]
fn keys_are_sorted_at_construction_and_piecewise() {
    let t = Tween::<f64>::new(
        [(20.0, 0.0), (0.0, 0.0), (10.0, 10.0)],
        Interpolation::Linear,
    )
    .unwrap();
    let times: Vec<f64> = t.keyframes().iter().map(|k| k.time()).collect();
    assert_eq!(times, vec![0.0, 10.0, 20.0]);
    assert_eq!(t.value_at(5.0), 5.0);
    assert_eq!(t.value_at(10.0), 10.0);
    assert_eq!(t.value_at(15.0), 5.0);
    assert_eq!(t.span(), (0.0, 20.0));
}

#[test]
fn coincident_interior_keys_jump() {
    let t = Tween::<f64>::new(
        [(0.0, 0.0), (5.0, 1.0), (5.0, 9.0), (10.0, 9.0)],
        Interpolation::Linear,
    )
    .unwrap();
    assert!((t.value_at(4.999) - 0.9998).abs() < 1e-9);
    assert_eq!(t.value_at(5.0), 9.0);
}

#[test]
fn hold_keeps_left_value_until_next_key() {
    let t = Tween::<f64>::new([(0.0, 1.0), (10.0, 3.0)], Interpolation::Hold).unwrap();
    assert_eq!(t.value_at(5.0), 1.0);
    assert_eq!(t.value_at(10.0), 3.0);
}

#[test]
fn tuples_and_vectors_interpolate_component_wise() {
    let t = Tween::<(f64, f64)>::between(0.0, (0.0, 10.0), 10.0, (100.0, 20.0), Interpolation::Linear)
        .unwrap();
    assert_eq!(t.value_at(5.0), (50.0, 15.0));

    let v = Tween::<Vec2>::between(
        0.0,
        Vec2::new(0.0, 0.0),
        4.0,
        Vec2::new(8.0, -4.0),
        Interpolation::Linear,
    )
    .unwrap();
    assert_eq!(v.value_at(1.0), Vec2::new(2.0, -1.0));
}

#[test]
fn method_name_errors_propagate() {
    let err = Tween::<f64>::with_method_name([(0.0, 0.0), (1.0, 1.0)], "elastic").unwrap_err();
    assert!(matches!(err, FlipbookError::UnsupportedInterpolationMethod(_)));
    let ok = Tween::<f64>::with_method_name([(0.0, 0.0), (1.0, 1.0)], "cosine").unwrap();
    assert_eq!(ok.method(), Interpolation::Cosine);
}
