use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = EngineConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.fps, 60);
    assert!((cfg.pixel_to_frame_ratio() - 8.0 * 16.0 / 9.0 / 1920.0).abs() < 1e-15);
    assert!((cfg.frame_height() - 8.0).abs() < 1e-12);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = EngineConfig::from_reader(r#"{ "fps": 30, "svg_scale_factor": 2.0 }"#.as_bytes())
        .unwrap();
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.svg_scale_factor, 2.0);
    assert_eq!(cfg.pixel_width, 1920);
    assert!((cfg.frame_duration() - 1.0 / 30.0).abs() < 1e-15);
}

#[test]
fn rejects_bad_values() {
    let err = EngineConfig::from_reader(r#"{ "fps": 0 }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, VecanimError::Validation(_)));
    assert!(EngineConfig::from_reader(r#"{ "frame_width": -1.0 }"#.as_bytes()).is_err());
    assert!(EngineConfig::from_reader("not json".as_bytes()).is_err());
}

#[test]
fn missing_file_is_reported() {
    let err = EngineConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open engine config"));
}
