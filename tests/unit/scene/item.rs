use super::*;

fn p(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

#[test]
fn default_style_is_white_outline() {
    let style = Style::default();
    assert_eq!(style.stroke, Rgba::WHITE);
    assert_eq!(style.fill.a, 0.0);
    assert_eq!(style.stroke_radius, DEFAULT_STROKE_RADIUS);
}

#[test]
fn alignment_equalizes_lengths() {
    let a = ItemData::from_points(vec![p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0)]);
    let b = ItemData::from_points(vec![
        p(0.0, 1.0),
        p(0.5, 1.0),
        p(1.0, 1.0),
        p(1.5, 1.0),
        p(2.0, 1.0),
    ]);
    let aligned = ItemData::align_for_interpolate(&a, &b);
    assert_eq!(aligned.data1.points.len(), 5);
    assert_eq!(aligned.data2.points, b.points);
    assert_eq!(aligned.union.points.len(), 5);
}

#[test]
fn interpolation_blends_points_and_style() {
    let mut a = ItemData::from_points(vec![p(0.0, 0.0)]);
    a.style.fill = Rgba::new(0.0, 0.0, 0.0, 0.0);
    let mut b = ItemData::from_points(vec![p(2.0, 0.0)]);
    b.style.fill = Rgba::new(1.0, 1.0, 1.0, 1.0);

    let mid = ItemData::interpolate(&a, &b, 0.5, &PathFunc::Straight);
    assert_eq!(mid.points, vec![p(1.0, 0.0)]);
    assert_eq!(mid.style.fill.a, 0.5);
    assert_eq!(ItemData::interpolate(&a, &b, 1.0, &PathFunc::Straight), b);
}

#[test]
fn empty_data_has_no_points() {
    let data = ItemData::from_points(vec![p(1.0, 1.0)]);
    assert!(data.has_points());
    assert!(!data.empty_like().has_points());
    assert_eq!(data.empty_like().style, data.style);
}
