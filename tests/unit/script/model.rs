use super::*;

const SCENE: &str = r##"{
  "config": { "fps": 30 },
  "items": [
    { "id": "square", "path": "M0,0 L1,0 L1,1 L0,1 Z",
      "edits": { "fill": "#ff0000" },
      "targets": { "up": { "shift": [0, 2, 0] } } },
    { "id": "dot", "points": [[0, 0, 0], [0.5, 0, 0], [1, 0, 0]], "detached": true }
  ],
  "timeline": [
    { "play": { "anim": "create", "item": "square", "duration": 2.0 } },
    { "wait": 0.5 },
    { "play": { "anim": "group", "lag_ratio": 0.5, "rate": "linear", "anims": [
        { "anim": "move_to_target", "item": "square", "key": "up" },
        { "anim": "wait" }
    ] } },
    { "play_at": { "at": 1.0, "anim": { "anim": "transform", "item": "square", "target": "dot", "path_arc": 1.5 } } }
  ]
}"##;

#[test]
fn parses_every_step_shape() {
    let def = SceneDef::from_reader(SCENE.as_bytes()).unwrap();
    assert_eq!(def.config.fps, 30);
    assert_eq!(def.config.preview_fps, 60);
    assert_eq!(def.items.len(), 2);
    assert!(def.items[1].detached);
    assert_eq!(def.items[0].targets["up"].shift, Some([0.0, 2.0, 0.0]));
    assert_eq!(def.timeline.len(), 4);

    match &def.timeline[0] {
        StepDef::Play(anim) => {
            assert_eq!(anim.duration, Some(2.0));
            assert_eq!(
                anim.kind,
                AnimKindDef::Create {
                    item: "square".into()
                }
            );
        }
        other => panic!("unexpected step {other:?}"),
    }
    assert_eq!(def.timeline[1], StepDef::Wait(0.5));
    match &def.timeline[2] {
        StepDef::Play(AnimDef {
            kind: AnimKindDef::Group { anims, lag_ratio },
            rate,
            ..
        }) => {
            assert_eq!(*lag_ratio, 0.5);
            assert_eq!(*rate, Some(RateFunc::Linear));
            assert_eq!(anims[1].kind, AnimKindDef::Wait);
        }
        other => panic!("unexpected step {other:?}"),
    }
    assert!(matches!(def.timeline[3], StepDef::PlayAt { at, .. } if at == 1.0));
}

#[test]
fn unknown_anim_kind_is_rejected() {
    let bad = r#"{ "timeline": [ { "play": { "anim": "explode", "item": "x" } } ] }"#;
    let err = SceneDef::from_reader(bad.as_bytes()).unwrap_err();
    assert!(matches!(err, VecanimError::Validation(_)));
}

#[test]
fn invalid_config_is_rejected() {
    let bad = r#"{ "config": { "fps": 0 } }"#;
    assert!(SceneDef::from_reader(bad.as_bytes()).is_err());
}

#[test]
fn empty_edits() {
    assert!(EditsDef::default().is_empty());
    let edits = EditsDef {
        scale: Some(2.0),
        ..EditsDef::default()
    };
    assert!(!edits.is_empty());
}
