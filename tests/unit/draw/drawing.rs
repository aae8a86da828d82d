use super::*;

fn canvas(w: u32, h: u32) -> Drawing {
    Drawing::new(Size::new(w, h).unwrap())
}

#[test]
fn every_call_appends_one_command() {
    let mut d = canvas(100, 100);
    d.save();
    d.translate(5.0, 5.0).rotate_deg(90.0);
    d.set_source("red").unwrap().rectangle(0.0, 0.0, 10.0, 10.0).fill();
    d.restore().unwrap();

    assert_eq!(d.len(), 6);
    assert_eq!(d.depth(), 0);
    match &d.commands()[2] {
        Command::Rotate { radians } => assert!((radians - std::f64::consts::FRAC_PI_2).abs() < 1e-12),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        d.commands()[3],
        Command::SetSource {
            color: Color::rgb(1.0, 0.0, 0.0)
        }
    );
}

#[test]
fn restore_without_save_fails_at_record_time() {
    let mut d = canvas(10, 10);
    let err = d.restore().unwrap_err();
    assert!(matches!(err, FlipbookError::UnbalancedGraphicsStack(_)));
    assert!(d.is_empty());
}

#[test]
fn unmatched_restore_in_foreign_buffer_fails_at_replay() {
    let d = Drawing::from_commands(
        Size::new(10, 10).unwrap(),
        vec![Command::Restore, Command::Paint],
    );
    assert!(d.validate().is_err());
    let err = d.render(10, 10).unwrap_err();
    assert!(matches!(err.root(), FlipbookError::UnbalancedGraphicsStack(_)));
}

#[test]
fn outstanding_save_fails_validation_and_replay() {
    let mut d = canvas(10, 10);
    d.save().paint();
    assert_eq!(d.depth(), 1);
    assert!(d.validate().is_err());
    assert!(matches!(
        d.render(10, 10).unwrap_err(),
        FlipbookError::UnbalancedGraphicsStack(_)
    ));
}

#[test]
fn bad_colors_are_rejected() {
    let mut d = canvas(10, 10);
    assert!(matches!(
        d.set_source("not-a-color").unwrap_err(),
        FlipbookError::ColorParse(_)
    ));
    assert!(matches!(
        d.fill_color((1.5, 0.0, 0.0)).unwrap_err(),
        FlipbookError::ColorParse(_)
    ));
    d.stroke_color("#0f0").unwrap();
    d.fill_color((0.0, 0.0, 1.0)).unwrap();
    assert_eq!(d.len(), 2);
}

#[test]
fn style_setters_validate_ranges() {
    let mut d = canvas(10, 10);
    assert!(d.opacity(1.2).is_err());
    assert!(d.fill_opacity(-0.1).is_err());
    assert!(d.stroke_width(f64::NAN).is_err());
    assert!(d.font_size(0.0).is_err());
    assert!(d.stroke_dash(0.0, [0.0, 0.0]).is_err());
    d.stroke_dash(0.0, [4.0, 2.0]).unwrap();
    d.stroke_dash(0.0, []).unwrap();
    assert_eq!(d.len(), 2);
}

#[test]
fn render_is_idempotent() {
    let mut d = canvas(32, 24);
    d.fill_color("navy").unwrap().paint();
    d.save();
    d.translate(16.0, 12.0).rotate_deg(30.0);
    d.set_source("yellow").unwrap();
    d.rectangle(-6.0, -4.0, 12.0, 8.0).fill_preserve();
    d.stroke_width(2.0).unwrap().stroke_color("red").unwrap().stroke();
    d.restore().unwrap();
    d.polygon([(0.0, 0.0), (8.0, 0.0), (4.0, 6.0)]).fill();

    let before = d.clone();
    let a = d.render(64, 48).unwrap();
    let b = d.render(64, 48).unwrap();
    assert_eq!(a, b);
    assert_eq!(d, before);
}

#[test]
fn preview_and_final_sizes_share_one_buffer() {
    let mut d = canvas(100, 100);
    d.set_source("white").unwrap().rectangle(0.0, 0.0, 50.0, 100.0).fill();

    let small = d.render(10, 10).unwrap();
    let large = d.render(200, 200).unwrap();
    assert_eq!(small.pixel(2, 5), Some([255, 255, 255, 255]));
    assert_eq!(small.pixel(7, 5), Some([0, 0, 0, 0]));
    assert_eq!(large.pixel(40, 100), Some([255, 255, 255, 255]));
    assert_eq!(large.pixel(140, 100), Some([0, 0, 0, 0]));
}

#[test]
fn nested_opacity_composes_and_restores() {
    let mut d = canvas(4, 2);
    d.save();
    d.opacity(0.5).unwrap();
    d.save();
    d.opacity(0.5).unwrap();
    d.fill_color("white").unwrap().rectangle(0.0, 0.0, 2.0, 2.0).fill();
    d.restore().unwrap();
    d.restore().unwrap();
    d.fill_color("white").unwrap().rectangle(2.0, 0.0, 2.0, 2.0).fill();

    let r = d.render(4, 2).unwrap();
    let [_, _, _, faded] = r.pixel(0, 0).unwrap();
    assert!((i32::from(faded) - 64).abs() <= 1);
    assert_eq!(r.pixel(3, 1), Some([255, 255, 255, 255]));
}

#[test]
fn display_render_uses_aspect() {
    let d = Drawing::with_aspect(Size::new(720, 480).unwrap(), Aspect::STANDARD);
    let r = d.render_display(120).unwrap();
    assert_eq!((r.width, r.height), (160, 120));
    assert_eq!(canvas(720, 480).aspect(), Aspect::new(3, 2).unwrap());
}

#[test]
fn json_round_trip_replays_identically() {
    let mut d = canvas(20, 20);
    d.save();
    d.set_source("hsl(200, 80%, 40%)").unwrap();
    d.circle(10.0, 10.0, 6.0).fill();
    d.restore().unwrap();
    d.line(0.0, 0.0, 20.0, 20.0).stroke();

    let json = d.to_json().unwrap();
    let back = Drawing::from_json(&json).unwrap();
    assert_eq!(back, d);
    assert_eq!(back.render(20, 20).unwrap(), d.render(20, 20).unwrap());
}

#[test]
fn json_with_degenerate_canvas_or_aspect_is_rejected() {
    let dumped = canvas(20, 20).to_json().unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&dumped).unwrap();
    json["canvas"] = serde_json::json!({ "width": 0, "height": 0 });
    let err = Drawing::from_json(&json.to_string()).unwrap_err();
    assert!(matches!(err, FlipbookError::Validation(_)), "{err}");

    let mut json: serde_json::Value = serde_json::from_str(&dumped).unwrap();
    json["aspect"] = serde_json::json!({ "num": 0, "den": 0 });
    let err = Drawing::from_json(&json.to_string()).unwrap_err();
    assert!(matches!(err, FlipbookError::Validation(_)), "{err}");
}

#[test]
fn directly_built_zero_canvas_fails_to_render() {
    let mut d = Drawing::new(Size {
        width: 0,
        height: 10,
    });
    d.set_source("red").unwrap().rectangle(0.0, 0.0, 5.0, 5.0).fill();
    assert!(d.render(10, 10).is_err());
}

#[test]
fn zero_target_size_is_rejected() {
    assert!(canvas(10, 10).render(0, 10).is_err());
}
