use kinesis_animation::AnimationConfig;
use kinesis_core::{ConfigValue, NodeTree, Point, Rect};
use kinesis_runtime::{FrameReport, Runtime};
use kinesis_testing::{Recorder, TouchScript, TreeBuilder};

#[test]
fn animation_runs_to_completion_on_vsync() {
    let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 400.0, 800.0));
    let badge = builder.view(builder.root(), Rect::new(10.0, 10.0, 40.0, 40.0));
    let mut runtime = Runtime::new(builder.build());
    let finished = Recorder::<bool>::new();

    runtime
        .animate_with(
            badge,
            "opacity",
            "timing",
            &[
                ("toValue", ConfigValue::Number(0.0)),
                ("duration", ConfigValue::Number(100.0)),
                ("easing", ConfigValue::from("linear")),
            ],
            Some(finished.callback()),
        )
        .unwrap();

    assert_eq!(
        runtime.on_vsync(0.0),
        FrameReport {
            scroll_engines: 0,
            animations: 1
        }
    );
    runtime.on_vsync(50.0);
    assert_eq!(runtime.tree().node(badge).unwrap().opacity, 0.5);
    runtime.on_vsync(100.0);

    assert_eq!(runtime.tree().node(badge).unwrap().opacity, 0.0);
    assert_eq!(finished.events(), vec![true]);
    assert!(!runtime.has_pending_work());
    assert!(runtime.on_vsync(116.0).is_idle());
}

#[test]
fn scroll_and_animation_advance_in_the_same_frame() {
    let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 400.0, 800.0));
    let list = builder.scroll(builder.root(), Rect::new(0.0, 0.0, 100.0, 100.0));
    builder.rows(list, 1, 400.0);
    let mut runtime = Runtime::new(builder.build());
    let engine = runtime.scroll_create(list).unwrap();

    runtime.scroll_to(engine, 0.0, 300.0, true).unwrap();
    runtime
        .animate(list, "borderRadius", "spring", AnimationConfig::to(12.0))
        .unwrap();

    let report = runtime.on_vsync(0.0);
    assert_eq!(report.scroll_engines, 1);
    assert_eq!(report.animations, 1);
    assert_eq!(runtime.tree_mut().take_dirty(), vec![list]);
}

#[test]
fn cancelled_animation_finishes_with_success_next_frame() {
    let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 400.0, 800.0));
    let node = builder.view(builder.root(), Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut runtime = Runtime::new(builder.build());
    let finished = Recorder::<bool>::new();

    let id = runtime
        .animate(
            node,
            "x",
            "spring",
            AnimationConfig::to(100.0).with_on_finish(finished.callback()),
        )
        .unwrap();
    runtime.on_vsync(0.0);
    assert!(runtime.cancel_animation(id));
    assert!(finished.is_empty());

    runtime.on_vsync(16.0);
    assert_eq!(finished.events(), vec![true]);
    assert!(!runtime.cancel_animation(id));
}

#[test]
fn removing_a_subtree_tears_down_its_engines() {
    let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 400.0, 800.0));
    let list = builder.scroll(builder.root(), Rect::new(0.0, 0.0, 100.0, 100.0));
    let row = builder.rows(list, 1, 300.0)[0];
    let mut runtime = Runtime::new(builder.build());

    let engine = runtime.scroll_create(list).unwrap();
    let pan = runtime.attach_gesture(row, "pan").unwrap();
    let finished = Recorder::<bool>::new();
    runtime
        .animate(
            row,
            "opacity",
            "timing",
            AnimationConfig::to(0.0).with_on_finish(finished.callback()),
        )
        .unwrap();
    let mut script = TouchScript::new();
    script.down(1, 20.0, 20.0);
    script.replay(|event| runtime.on_touch(event));
    assert!(runtime.dispatcher().has_active_touches());

    let mut removed = runtime.remove_node(list);
    removed.sort_unstable();
    assert_eq!(removed, vec![list, row]);

    assert!(runtime.scroll_engine(engine).is_none());
    assert!(runtime.dispatcher().gesture(pan).is_none());
    assert!(runtime.dispatcher().gestures_for(row).is_empty());
    assert!(!runtime.dispatcher().has_active_touches());

    runtime.on_vsync(0.0);
    assert_eq!(finished.events(), vec![true]);
    assert!(!runtime.has_pending_work());
}

#[test]
fn engines_fail_closed_when_the_host_drops_a_node_silently() {
    let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 400.0, 800.0));
    let list = builder.scroll(builder.root(), Rect::new(0.0, 0.0, 100.0, 100.0));
    builder.rows(list, 1, 300.0);
    let mut runtime = Runtime::new(builder.build());
    let engine = runtime.scroll_create(list).unwrap();
    runtime.scroll_to(engine, 0.0, 150.0, true).unwrap();

    runtime.tree_mut().remove_node(list);
    runtime.on_vsync(0.0);

    assert!(!runtime.has_pending_work());
    assert_eq!(runtime.scroll_offset(engine), Some(Point::ZERO));
}
