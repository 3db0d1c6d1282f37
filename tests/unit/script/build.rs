use super::*;
use crate::animation::rate::RateFunc;

fn build(json: &str) -> VecanimResult<BuiltScene> {
    SceneDef::from_reader(json.as_bytes())?.build(Path::new("."))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn builds_items_and_timeline() {
    let json = r##"{
      "items": [
        { "id": "line", "path": "M0,0 L2,0", "edits": { "stroke": "#00ff00" },
          "targets": { "up": { "shift": [0, 1, 0] } } },
        { "id": "child", "parent": "line", "points": [[0, 1, 0], [1, 1, 0], [2, 1, 0]], "depth": 1 }
      ],
      "timeline": [
        { "play": { "anim": "create", "item": "line" } },
        { "play": { "anim": "move_to_target", "item": "line", "key": "up", "rate": "linear" } },
        { "wait": 1.0 }
      ]
    }"##;
    let BuiltScene { mut timeline, ids } = build(json).unwrap();
    assert_eq!(timeline.duration(), 3.0);
    assert_eq!(timeline.flatten().len(), 3);

    let line = ids["line"];
    let scene = timeline.base_scene();
    assert_eq!(scene.children(line).unwrap(), vec![ids["child"]]);
    assert_eq!(scene.data(line).unwrap().style.stroke, Rgba::new(0.0, 1.0, 0.0, 1.0));
    assert_eq!(scene.item(line).unwrap().name(), Some("line"));

    let frame = timeline.seek(1.5).unwrap();
    let moved = frame.items.iter().find(|r| r.item == line).unwrap();
    assert!(close(moved.points[0].y, 0.5));

    let end = timeline.seek(3.0).unwrap();
    assert_eq!(end.items.len(), 2);
    assert_eq!(end.items[1].depth, 1.0);
}

#[test]
fn durations_and_rates_override_defaults() {
    let json = r#"{
      "items": [ { "id": "a", "path": "M0,0 L1,0" } ],
      "timeline": [
        { "play": { "anim": "succession", "duration": 4.0, "rate": "linear", "anims": [
            { "anim": "create", "item": "a" },
            { "anim": "shift", "item": "a", "by": [1, 0, 0] }
        ] } }
      ]
    }"#;
    let built = build(json).unwrap();
    let leaves = built.timeline.flatten();
    assert_eq!(leaves[1].range().at, 2.0);
    assert_eq!(leaves[1].range().duration, 2.0);
    assert!(leaves.iter().all(|n| n.rate() == RateFunc::Linear));
}

#[test]
fn subset_reveals_and_transforms() {
    let json = r##"{
      "items": [
        { "id": "row" },
        { "id": "a", "parent": "row", "path": "M0,0 L1,0" },
        { "id": "b", "parent": "row", "path": "M2,0 L3,0" },
        { "id": "goal", "path": "M0,2 L1,2", "detached": true }
      ],
      "timeline": [
        { "play": { "anim": "show_increasing_subsets", "item": "row" } },
        { "play": { "anim": "transform", "item": "a", "target": "goal", "replace": true } },
        { "play": { "anim": "edit", "item": "b", "edits": { "scale": 2.0, "fill": "#0000ff" } } }
      ]
    }"##;
    let BuiltScene { mut timeline, ids } = build(json).unwrap();
    assert_eq!(timeline.flatten()[0].name(), "ShowIncreasingSubsets");
    assert_eq!(timeline.flatten()[1].name(), "ReplacementTransform");

    let frame = timeline.seek(3.0).unwrap();
    let drawn: Vec<ItemId> = frame.items.iter().map(|r| r.item).collect();
    assert!(drawn.contains(&ids["goal"]));
    assert!(!drawn.contains(&ids["a"]));
    let b = frame.items.iter().find(|r| r.item == ids["b"]).unwrap();
    assert_eq!(b.fill, Rgba::new(0.0, 0.0, 1.0, 1.0));
    assert!(close(b.points[2].x - b.points[0].x, 2.0));
}

#[test]
fn reference_errors() {
    let unknown = r#"{ "timeline": [ { "play": { "anim": "create", "item": "ghost" } } ] }"#;
    assert!(matches!(build(unknown).unwrap_err(), VecanimError::Validation(_)));

    let missing_target = r#"{
      "items": [ { "id": "a", "path": "M0,0 L1,0" } ],
      "timeline": [ { "play": { "anim": "move_to_target", "item": "a", "key": "nope" } } ]
    }"#;
    assert!(matches!(build(missing_target).unwrap_err(), VecanimError::Animation(_)));

    let duplicate = r#"{ "items": [ { "id": "a" }, { "id": "a" } ] }"#;
    assert!(build(duplicate).is_err());

    let two_sources = r#"{ "items": [ { "id": "a", "path": "M0,0 L1,0", "points": [] } ] }"#;
    assert!(build(two_sources).is_err());

    let bad_color = r#"{ "items": [ { "id": "a", "edits": { "fill": "red" } } ] }"#;
    assert!(build(bad_color).is_err());
}
