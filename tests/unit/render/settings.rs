use super::*;

#[test]
fn defaults_are_vertical_hd_at_60fps() {
    let s = RenderSettings::default();
    assert_eq!((s.canvas.width, s.canvas.height), (1080, 1920));
    assert_eq!(s.fps, Fps { num: 60, den: 1 });
    let frame = s.scene_frame().unwrap();
    assert!((frame.px_per_unit() - 120.0).abs() < 1e-12);
    assert!((frame.frame_height() - 16.0).abs() < 1e-12);
    assert!(s.validate().is_ok());
}

#[test]
fn json_fields_are_optional_and_layer_over_defaults() {
    let s = RenderSettings::from_json_str(
        r##"{ "canvas": { "width": 540, "height": 960 }, "clear": "#000000" }"##,
    )
    .unwrap();
    assert_eq!(s.canvas.width, 540);
    assert_eq!(s.clear, Color::BLACK);
    assert_eq!(s.fps.num, 60);
    assert!((s.frame_width - 9.0).abs() < 1e-12);

    let empty = RenderSettings::from_json_str("{}").unwrap();
    assert_eq!(empty, RenderSettings::default());
}

#[test]
fn rejects_bad_values() {
    assert!(matches!(
        RenderSettings::from_json_str(r#"{ "fps": { "num": 0, "den": 1 } }"#),
        Err(StellateError::Validation(_))
    ));
    assert!(RenderSettings::from_json_str(r#"{ "frame_width": -1.0 }"#).is_err());
    assert!(RenderSettings::from_json_str(r#"{ "background": "" }"#).is_err());
    assert!(matches!(
        RenderSettings::from_json_str(r##"{ "colour": "#fff" }"##),
        Err(StellateError::Serde(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = RenderSettings::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
