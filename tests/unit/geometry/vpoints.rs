use super::*;

fn p(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

fn line(xs: &[f64]) -> Vec<Point3> {
    xs.iter().map(|x| p(*x, 0.0)).collect()
}

fn two_subpaths() -> Vec<Point3> {
    vec![
        p(0.0, 0.0),
        p(0.5, 0.0),
        p(1.0, 0.0),
        NAN_POINT,
        p(3.0, 0.0),
        p(3.5, 0.0),
        p(4.0, 0.0),
    ]
}

#[test]
fn subpath_indices() {
    let pts = two_subpaths();
    let ends = subpath_end_indices(&pts);
    assert_eq!(ends, vec![2, 6]);
    assert_eq!(subpath_begin_indices(&ends), vec![0, 4]);
    assert!(subpath_end_indices(&[]).is_empty());
    assert_eq!(curves_count(&pts), 3);
}

#[test]
fn split_and_join_subpaths() {
    let pts = two_subpaths();
    let subs = split_subpaths(&pts);
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[1], line(&[3.0, 3.5, 4.0]));
    let joined = join_subpaths(&subs);
    assert_eq!(joined.len(), pts.len());
    assert!(is_nan_point(&joined[3]));
}

#[test]
fn closed_subpath_detection() {
    assert!(subpath_is_closed(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0005)]));
    assert!(!subpath_is_closed(&line(&[0.0, 0.5, 1.0])));
    assert!(!subpath_is_closed(&[p(0.0, 0.0)]));
}

#[test]
fn partial_keeps_first_half() {
    let pts = line(&[0.0, 0.5, 1.0, 1.5, 2.0]);
    assert_eq!(
        pointwise_become_partial(&pts, 0.0, 0.5),
        line(&[0.0, 0.5, 1.0, 1.0, 1.0])
    );
    assert_eq!(
        pointwise_become_partial(&pts, 0.25, 0.75),
        line(&[0.5, 0.75, 1.0, 1.25, 1.5])
    );
}

#[test]
fn partial_at_zero_collapses_to_start() {
    let pts = line(&[0.0, 0.5, 1.0, 1.5, 2.0]);
    let out = pointwise_become_partial(&pts, 0.0, 0.0);
    assert_eq!(out.len(), pts.len());
    assert!(out.iter().all(|q| *q == p(0.0, 0.0)));
    assert_eq!(pointwise_become_partial(&pts, 0.0, 1.0), pts);
}

#[test]
fn partial_drops_unreached_jumps() {
    let pts = two_subpaths();
    let out = pointwise_become_partial(&pts, 0.0, 0.3);
    assert_eq!(out.len(), pts.len());
    assert!(!out.iter().any(is_nan_point));

    let full = pointwise_become_partial(&pts, 0.0, 0.9);
    assert!(is_nan_point(&full[3]));
}

#[test]
fn insert_curves_preserves_shape() {
    let sub = line(&[0.0, 0.5, 1.0]);
    let out = insert_n_curves(&sub, 2);
    assert_eq!(out.len(), 7);
    assert_eq!(out[0], p(0.0, 0.0));
    assert!((out[6] - p(1.0, 0.0)).norm() < 1e-12);
    assert!(out.iter().all(|q| q.y == 0.0));
    assert_eq!(insert_n_curves(&[p(2.0, 2.0)], 2), vec![p(2.0, 2.0); 5]);
}

#[test]
fn align_matches_curve_and_subpath_counts() {
    let a = line(&[0.0, 0.5, 1.0]);
    let b = line(&[0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
    let (a2, b2) = align_points(&a, &b);
    assert_eq!(a2.len(), b2.len());
    assert_eq!(b2, b);
    assert_eq!(a2[0], a[0]);

    let (c, d) = align_points(&two_subpaths(), &a);
    assert_eq!(c.len(), d.len());
    let nan_c: Vec<bool> = c.iter().map(is_nan_point).collect();
    let nan_d: Vec<bool> = d.iter().map(is_nan_point).collect();
    assert_eq!(nan_c, nan_d);
}

#[test]
fn align_with_empty_parks_at_center() {
    let a = line(&[0.0, 1.0, 2.0]);
    let (e, a2) = align_points(&[], &a);
    assert_eq!(e.len(), a2.len());
    assert!(e.iter().all(|q| *q == p(1.0, 0.0)));
}

#[test]
fn bounds_ignore_separators() {
    let (lo, hi) = bounding_box(&two_subpaths()).unwrap();
    assert_eq!(lo, p(0.0, 0.0));
    assert_eq!(hi, p(4.0, 0.0));
    assert_eq!(center(&two_subpaths()), p(2.0, 0.0));
    assert!(bounding_box(&[NAN_POINT]).is_none());
}

#[test]
fn affine_helpers() {
    let mut pts = line(&[0.0, 1.0, 2.0]);
    shift(&mut pts, &p(1.0, 1.0));
    assert_eq!(pts[0], p(1.0, 1.0));
    scale(&mut pts, 2.0, &p(1.0, 1.0));
    assert_eq!(pts[2], p(5.0, 1.0));
}

#[test]
fn whole_path_predicates() {
    assert!(!has_points(&[NAN_POINT]));
    assert!(has_points(&two_subpaths()));
    assert!(subpath_is_closed(&[p(0.0, 0.0), p(1.0, 1.0), p(0.0, 0.0)]));
}
