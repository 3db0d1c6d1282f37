use super::*;

#[test]
fn nan_point_is_detected() {
    assert!(is_nan_point(&NAN_POINT));
    assert!(!is_nan_point(&ORIGIN));
    assert!(is_nan_point(&Point3::new(0.0, f64::NAN, 0.0)));
}

#[test]
fn hex_colors_parse_with_optional_alpha() {
    let c = Rgba::from_hex("#FF0000").unwrap();
    assert_eq!(c, Rgba::new(1.0, 0.0, 0.0, 1.0));

    let c = Rgba::from_hex("#00ff0080").unwrap();
    assert_eq!(c.g, 1.0);
    assert!((c.a - 128.0 / 255.0).abs() < 1e-12);

    assert!(Rgba::from_hex("FF0000").is_err());
    assert!(Rgba::from_hex("#FF00").is_err());
    assert!(Rgba::from_hex("#GG0000").is_err());
}

#[test]
fn with_alpha_keeps_rgb() {
    let c = Rgba::BLACK.with_alpha(0.25);
    assert_eq!((c.r, c.g, c.b, c.a), (0.0, 0.0, 0.0, 0.25));
}
