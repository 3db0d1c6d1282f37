use super::*;
use crate::foundation::core::is_nan_point;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

const RECT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
  <path id="box" d="M0,0 L100,0 L100,50 L0,50 Z" fill="#ff0000"/>
  <path d="M0,0 L10,0" stroke="#00ff00" stroke-width="2" fill="none"/>
</svg>"##;

#[test]
fn svg_d_lines_and_close() {
    let points = path_from_svg_d("M0,0 L1,0 L1,1 Z").unwrap();
    assert_eq!(points.len(), 7);
    assert_eq!(points[0], points[6]);
    assert_eq!(points[1], Point3::new(0.5, 0.0, 0.0));
}

#[test]
fn svg_d_subpaths_are_separated() {
    let points = path_from_svg_d("M0,0 L1,0 M2,0 L3,0").unwrap();
    assert_eq!(points.len(), 7);
    assert!(is_nan_point(&points[3]));
    assert_eq!(points[4], Point3::new(2.0, 0.0, 0.0));
}

#[test]
fn svg_d_curves() {
    let quad = path_from_svg_d("M0,0 Q1,1 2,0").unwrap();
    assert_eq!(quad, vec![Point3::zeros(), Point3::new(1.0, 1.0, 0.0), Point3::new(2.0, 0.0, 0.0)]);

    let cubic = path_from_svg_d("M0,0 C0,1 1,1 1,0").unwrap();
    assert_eq!(cubic.len(), 5);
    assert_eq!(cubic[0], Point3::zeros());
    assert_eq!(cubic[4], Point3::new(1.0, 0.0, 0.0));
}

#[test]
fn svg_d_rejects_garbage() {
    let err = path_from_svg_d("M0,0 X1,1").unwrap_err();
    assert!(matches!(err, VecanimError::Validation(_)));
}

#[test]
fn import_centers_flips_and_scales_to_width() {
    let config = EngineConfig::default();
    let options = SvgImportOptions {
        width: Some(4.0),
        height: None,
    };
    let paths = import_svg_bytes(RECT.as_bytes(), &config, options).unwrap();
    assert_eq!(paths.len(), 2);

    let rect = &paths[0];
    assert_eq!(rect.id.as_deref(), Some("box"));
    assert_eq!(rect.data.points.len(), 9);
    let first = rect.data.points[0];
    assert!(close(first.x, -2.0) && close(first.y, 1.0));
    let (lo, hi) = vpoints::bounding_box(&rect.data.points).unwrap();
    assert!(close(hi.x - lo.x, 4.0));
    assert!(close(hi.y - lo.y, 2.0));
    assert_eq!(rect.data.style.fill, Rgba::new(1.0, 0.0, 0.0, 1.0));
    assert_eq!(rect.data.style.stroke, Rgba::TRANSPARENT);
    assert_eq!(rect.data.style.stroke_radius, config.default_stroke_radius);

    let line = &paths[1];
    assert_eq!(line.data.style.fill, Rgba::TRANSPARENT);
    assert_eq!(line.data.style.stroke, Rgba::new(0.0, 1.0, 0.0, 1.0));
    assert!(close(line.data.style.stroke_radius, 0.04));
}

#[test]
fn import_uses_configured_scale_by_default() {
    let config = EngineConfig::default();
    let paths = import_svg_bytes(RECT.as_bytes(), &config, SvgImportOptions::default()).unwrap();
    let scale = config.pixel_to_frame_ratio() * config.svg_scale_factor;
    let first = paths[0].data.points[0];
    assert!(close(first.x, -50.0 * scale));
    assert!(close(first.y, 25.0 * scale));
}

#[test]
fn invalid_svg_is_an_error() {
    let config = EngineConfig::default();
    assert!(import_svg_bytes(b"<not svg", &config, SvgImportOptions::default()).is_err());
}

#[test]
fn imported_paths_become_a_group() {
    let config = EngineConfig::default();
    let paths = import_svg_bytes(RECT.as_bytes(), &config, SvgImportOptions::default()).unwrap();
    let mut scene = Scene::new();
    let group = add_to_scene(&mut scene, &paths).unwrap();
    let children = scene.children(group).unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(scene.item(children[0]).unwrap().name(), Some("box"));
    assert_eq!(scene.render_data().len(), 2);
}
