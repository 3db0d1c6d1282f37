use super::*;
use crate::foundation::core::{NAN_POINT, is_nan_point};

fn p(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

#[test]
fn zero_arc_is_straight() {
    assert_eq!(PathFunc::new(0.0, OUT), PathFunc::Straight);
    let out = PathFunc::Straight.interpolate(&[p(0.0, 0.0)], &[p(2.0, 4.0)], 0.25);
    assert_eq!(out, vec![p(0.5, 1.0)]);
}

#[test]
fn endpoints_are_exact() {
    let arc = PathFunc::arc(1.3);
    let start = [p(0.1, 0.2), p(3.0, -1.0)];
    let end = [p(-4.0, 0.7), p(2.5, 2.5)];
    assert_eq!(arc.interpolate(&start, &end, 0.0), start.to_vec());
    assert_eq!(arc.interpolate(&start, &end, 1.0), end.to_vec());
}

#[test]
fn half_turn_arc_passes_through_circle_top() {
    let arc = PathFunc::arc(std::f64::consts::PI);
    let out = arc.interpolate(&[p(-1.0, 0.0)], &[p(1.0, 0.0)], 0.5);
    assert!((out[0] - p(0.0, -1.0)).norm() < 1e-9);
}

#[test]
fn quarter_arc_keeps_radius() {
    let angle = std::f64::consts::FRAC_PI_2;
    let arc = PathFunc::arc(angle);
    let (s, e) = (p(1.0, 0.0), p(0.0, 1.0));
    for k in 1..10 {
        let q = arc.interpolate(&[s], &[e], k as f64 / 10.0)[0];
        assert!((q.norm() - 1.0).abs() < 1e-9, "{q:?}");
    }
}

#[test]
fn separators_stay_nan() {
    let out = PathFunc::arc(1.0).interpolate(&[NAN_POINT], &[NAN_POINT], 0.5);
    assert!(is_nan_point(&out[0]));
    let out = PathFunc::Straight.interpolate(&[NAN_POINT], &[NAN_POINT], 0.5);
    assert!(is_nan_point(&out[0]));
}
