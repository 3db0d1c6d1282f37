use super::*;
use crate::animation::creation::ShowPartial;
use crate::animation::method::MethodAnimation;
use crate::foundation::core::{Point3, RIGHT};
use crate::scene::graph::ItemId;
use crate::scene::item::ItemData;

fn p(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

fn segment(x0: f64, x1: f64) -> Vec<Point3> {
    vec![p(x0, 0.0), p((x0 + x1) / 2.0, 0.0), p(x1, 0.0)]
}

fn one_item() -> (Scene, ItemId) {
    let mut scene = Scene::new();
    let id = scene.spawn(ItemData::from_points(segment(0.0, 1.0)));
    (scene, id)
}

#[test]
fn play_and_wait_advance_the_cursor() {
    let (scene, id) = one_item();
    let create = ShowPartial::create(&scene, id).unwrap();
    let mut tl = Timeline::new(scene, EngineConfig::default());
    tl.play(create);
    tl.wait(0.5).unwrap();
    assert_eq!(tl.cursor(), 1.5);
    assert_eq!(tl.duration(), 1.5);
    assert_eq!(tl.flatten().len(), 2);
    assert!(tl.wait(-1.0).is_err());
}

#[test]
fn seek_applies_running_animation() {
    let (scene, id) = one_item();
    let create = ShowPartial::create(&scene, id).unwrap();
    let mut tl = Timeline::new(scene, EngineConfig::default());
    tl.play(create);

    let frame = tl.seek(0.0).unwrap();
    assert_eq!(frame.items.len(), 1);
    assert!(frame.items[0].points.iter().all(|q| *q == p(0.0, 0.0)));

    let end = tl.seek(1.0).unwrap();
    assert_eq!(end.items[0].points, segment(0.0, 1.0));
    assert_eq!(end.time, 1.0);

    // The base scene is never touched by sampling.
    assert_eq!(tl.base_scene().data(id).unwrap().points, segment(0.0, 1.0));
}

#[test]
fn later_animations_start_from_earlier_results() {
    let (scene, id) = one_item();
    let first = MethodAnimation::new(&scene, id).unwrap().shift(RIGHT);
    let second = MethodAnimation::new(&scene, id).unwrap().shift(RIGHT);
    let mut tl = Timeline::new(scene, EngineConfig::default());
    tl.play(first).play(second);

    let shifted =
        |n: f64| -> Vec<Point3> { segment(0.0, 1.0).iter().map(|q| q + RIGHT * n).collect() };
    let end = tl.seek(2.0).unwrap();
    for (got, want) in end.items[0].points.iter().zip(shifted(2.0)) {
        assert!((got - want).norm() < 1e-12);
    }

    let mid = tl.seek(1.5).unwrap();
    for (got, want) in mid.items[0].points.iter().zip(shifted(1.5)) {
        assert!((got - want).norm() < 1e-12);
    }

    // Seeking backwards replays from the base scene.
    let start = tl.seek(0.0).unwrap();
    assert_eq!(start.items[0].points, segment(0.0, 1.0));
}

#[test]
fn finished_uncreate_hides_the_item() {
    let (scene, id) = one_item();
    let uncreate = ShowPartial::uncreate(&scene, id).unwrap();
    let mut tl = Timeline::new(scene, EngineConfig::default());
    tl.play(uncreate);
    assert_eq!(tl.seek(0.5).unwrap().items.len(), 1);
    assert!(tl.seek(1.0).unwrap().items.is_empty());
    assert!(tl.seek(5.0).unwrap().items.is_empty());
}

#[test]
fn rows_and_navigation() {
    let mut tl = Timeline::new(Scene::new(), EngineConfig::default());
    tl.play_at(0.0, AnimNode::wait(5.0).unwrap()).unwrap();
    tl.play_at(3.0, AnimNode::wait(5.0).unwrap()).unwrap();
    tl.play_at(6.0, AnimNode::wait(4.0).unwrap()).unwrap();
    assert_eq!(tl.rows(), vec![0, 1, 0]);
    assert_eq!(tl.duration(), 10.0);
    assert_eq!(tl.cursor(), 0.0);

    assert_eq!(tl.prev_start(3.0), Some(0.0));
    assert_eq!(tl.next_start(3.0), Some(6.0));
    assert_eq!(tl.next_start(6.0), None);
    assert_eq!(tl.time_to_progress(0.5), 30);
    assert_eq!(tl.progress_to_time(30), 0.5);

    let track = tl.track();
    assert_eq!(track[1].row, 1);
    assert_eq!(track[2].end, 10.0);
    assert!(tl.play_at(-1.0, AnimNode::wait(1.0).unwrap()).is_err());
}

#[test]
fn frames_cover_the_whole_duration() {
    let (scene, id) = one_item();
    let create = ShowPartial::create(&scene, id).unwrap();
    let config = EngineConfig {
        fps: 4,
        ..EngineConfig::default()
    };
    let mut tl = Timeline::new(scene, config);
    tl.play(create);
    assert_eq!(tl.frame_count(), 5);
    let frames: Vec<Frame> = tl.frames().collect::<VecanimResult<_>>().unwrap();
    let times: Vec<f64> = frames.iter().map(|f| f.time).collect();
    assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(frames[4].items[0].points, segment(0.0, 1.0));
}

#[test]
fn non_finite_seek_is_an_evaluation_error() {
    let mut tl = Timeline::new(Scene::new(), EngineConfig::default());
    let err = tl.seek(f64::NAN).unwrap_err();
    assert!(matches!(err, VecanimError::Evaluation(_)));
}
