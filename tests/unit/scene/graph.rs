use super::*;

fn p(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

fn segment(x0: f64, x1: f64) -> ItemData {
    ItemData::from_points(vec![p(x0, 0.0), p((x0 + x1) / 2.0, 0.0), p(x1, 0.0)])
}

#[test]
fn family_is_preorder() {
    let mut scene = Scene::new();
    let a = scene.spawn(segment(0.0, 1.0));
    let b = scene.create(segment(1.0, 2.0));
    let c = scene.create(segment(2.0, 3.0));
    let d = scene.create(segment(3.0, 4.0));
    scene.add(a, b).unwrap();
    scene.add(b, c).unwrap();
    scene.add(a, d).unwrap();
    assert_eq!(scene.family(a).unwrap(), vec![a, b, c, d]);
    assert_eq!(scene.family_data(a).unwrap().len(), 4);
    assert_eq!(scene.item(c).unwrap().parent(), Some(b));
}

#[test]
fn unknown_items_are_animation_errors() {
    let scene = Scene::new();
    let err = scene.item(ItemId(42)).unwrap_err();
    assert!(matches!(err, VecanimError::Animation(_)));
    assert!(!scene.contains(ItemId(42)));
}

#[test]
fn cycles_are_rejected() {
    let mut scene = Scene::new();
    let a = scene.spawn(ItemData::default());
    let b = scene.create(ItemData::default());
    scene.add(a, b).unwrap();
    assert!(scene.add(b, a).is_err());
    assert!(scene.add(a, a).is_err());
    assert!(scene.add(a, scene.root()).is_err());
}

#[test]
fn replace_subitem_swaps_in_place() {
    let mut scene = Scene::new();
    let first = scene.spawn(segment(0.0, 1.0));
    let second = scene.spawn(segment(1.0, 2.0));
    let fresh = scene.create(segment(5.0, 6.0));
    scene.replace_subitem(first, fresh).unwrap();
    assert_eq!(scene.children(scene.root()).unwrap(), vec![fresh, second]);
    assert!(!scene.is_attached(first));
    assert!(scene.is_attached(fresh));
}

#[test]
fn family_transforms() {
    let mut scene = Scene::new();
    let a = scene.spawn(segment(0.0, 2.0));
    scene.shift(a, p(1.0, 1.0)).unwrap();
    assert_eq!(scene.data(a).unwrap().points[0], p(1.0, 1.0));
    scene.scale(a, 2.0, None).unwrap();
    assert_eq!(scene.data(a).unwrap().points[0], p(0.0, 1.0));
    assert_eq!(scene.data(a).unwrap().points[2], p(4.0, 1.0));
    scene
        .rotate(a, std::f64::consts::PI, None, Some(p(2.0, 1.0)))
        .unwrap();
    assert!((scene.data(a).unwrap().points[0] - p(4.0, 1.0)).norm() < 1e-9);
    scene.set_fill(a, Rgba::BLACK).unwrap();
    assert_eq!(scene.data(a).unwrap().style.fill, Rgba::BLACK);
}

#[test]
fn targets_are_detached_copies() {
    let mut scene = Scene::new();
    let a = scene.spawn(segment(0.0, 1.0));
    let target = scene.generate_target(a, "moved").unwrap();
    scene.shift(target, p(0.0, 3.0)).unwrap();
    assert_eq!(scene.item(a).unwrap().target("moved"), Some(target));
    assert_eq!(scene.data(a).unwrap().points[0], p(0.0, 0.0));
    assert!(!scene.is_attached(target));
    assert!(scene.item(a).unwrap().target("missing").is_none());
}

#[test]
fn render_data_sorted_by_depth_then_tree_order() {
    let mut scene = Scene::new();
    let back = scene.spawn(segment(0.0, 1.0));
    let front = scene.spawn(segment(1.0, 2.0));
    let also_front = scene.spawn(segment(2.0, 3.0));
    let hidden = scene.spawn(segment(3.0, 4.0));
    let _group = scene.spawn(ItemData::default());
    scene.set_depth(back, -1.0).unwrap();
    scene.hide(hidden).unwrap();
    let detached = scene.create(segment(9.0, 10.0));

    let ids: Vec<ItemId> = scene.render_data().iter().map(|r| r.item).collect();
    assert_eq!(ids, vec![back, front, also_front]);
    assert!(!ids.contains(&detached));
}
