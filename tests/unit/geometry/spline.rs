use super::*;

fn p(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

fn close(a: &Point3, b: &Point3) -> bool {
    (a - b).norm() < 1e-9
}

#[test]
fn closedness_uses_endpoint_tolerance() {
    assert!(is_closed(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1e-10)]));
    assert!(!is_closed(&[p(0.0, 0.0), p(1.0, 0.0)]));
    assert!(!is_closed(&[]));
}

#[test]
fn collinear_anchors_get_third_point_handles() {
    let anchors = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)];
    let (h1s, h2s) = get_smooth_cubic_bezier_handle_points(&anchors);
    let expected_h1 = [p(1.0 / 3.0, 0.0), p(4.0 / 3.0, 0.0)];
    let expected_h2 = [p(2.0 / 3.0, 0.0), p(5.0 / 3.0, 0.0)];
    for (got, want) in h1s.iter().zip(&expected_h1) {
        assert!(close(got, want), "{got:?} vs {want:?}");
    }
    for (got, want) in h2s.iter().zip(&expected_h2) {
        assert!(close(got, want), "{got:?} vs {want:?}");
    }
}

#[test]
fn handle_count_matches_segments() {
    let (h1s, h2s) = get_smooth_cubic_bezier_handle_points(&[p(0.0, 0.0)]);
    assert!(h1s.is_empty() && h2s.is_empty());

    let closed = [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(0.0, 0.0)];
    let (h1s, h2s) = get_smooth_cubic_bezier_handle_points(&closed);
    assert_eq!(h1s.len(), 3);
    assert_eq!(h2s.len(), 3);
    assert!(h1s.iter().chain(&h2s).all(|h| h.iter().all(|v| v.is_finite())));
}

#[test]
fn quadratic_handles_for_pairs_and_triples() {
    assert_eq!(
        approx_smooth_quadratic_bezier_handles(&[p(0.0, 0.0), p(2.0, 2.0)]),
        vec![p(1.0, 1.0)]
    );
    let handles = approx_smooth_quadratic_bezier_handles(&[
        p(0.0, 0.0),
        p(1.0, 1.0),
        p(2.0, 0.0),
        p(3.0, 1.0),
    ]);
    assert_eq!(handles.len(), 3);
    assert!(approx_smooth_quadratic_bezier_handles(&[p(0.0, 0.0)]).is_empty());
}

#[test]
fn smooth_path_passes_through_anchors() {
    let anchors = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0), p(3.0, 1.0)];
    let path = smooth_quadratic_path(&anchors);
    assert_eq!(path.len() % 2, 1);
    assert_eq!(path[0], anchors[0]);
    assert!(close(path.last().unwrap(), &anchors[3]));
    for anchor in &anchors {
        assert!(
            path.iter().step_by(2).any(|q| close(q, anchor)),
            "anchor {anchor:?} missing"
        );
    }
}

#[test]
fn smooth_path_keeps_non_planar_anchors() {
    let anchors = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(2.0, 0.0, 2.0),
        Point3::new(3.0, 1.0, 3.0),
    ];
    let path = smooth_quadratic_path(&anchors);
    for anchor in &anchors {
        assert!(path.iter().step_by(2).any(|q| (q - anchor).norm() < 1e-6));
    }
}

#[test]
fn short_inputs() {
    assert!(smooth_quadratic_path(&[]).is_empty());
    assert_eq!(
        smooth_quadratic_path(&[p(0.0, 0.0), p(2.0, 0.0)]),
        vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]
    );
}
