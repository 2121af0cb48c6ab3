use kinesis_core::{ConfigValue, NodeTree, Point, Rect};
use kinesis_runtime::Host;
use kinesis_testing::{Recorder, TreeBuilder};

fn host() -> (Host<kinesis_core::SceneTree>, i64, i64) {
    let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 400.0, 800.0));
    let list = builder.scroll(builder.root(), Rect::new(0.0, 0.0, 100.0, 100.0));
    builder.rows(list, 1, 300.0);
    let button = builder.button(builder.root(), Rect::new(0.0, 500.0, 100.0, 50.0));
    (Host::new(builder.build()), list as i64, button as i64)
}

#[test]
fn invalid_ids_collapse_to_sentinels() {
    let (mut host, _, button) = host();
    let signals = Recorder::<()>::new();

    assert_eq!(host.attach_gesture(-5, "pan"), -1);
    assert_eq!(host.attach_gesture(button, "swipe"), -1);
    assert!(!host.detach_gesture(42));
    assert!(!host.reset_gesture(-1));
    assert_eq!(host.scroll_create(999), -1);
    assert!(!host.scroll_destroy(7));
    assert!(!host.scroll_to(7, 0.0, 10.0, false));
    assert_eq!(host.scroll_offset(-1), Point::ZERO);
    assert!(!host.set_press_callback(button, "onHover", signals.callback()));
    assert_eq!(host.animate(button, "color", "timing", &[], None), -1);
    assert_eq!(
        host.animate(button, "opacity", "timing", &[("rate", ConfigValue::Number(2.0))], None),
        -1
    );
    assert!(!host.cancel_animation(3));
    assert!(!host.dispatch_touch(7, 0.0, 0.0, 1));
    assert!(!host.dispatch_touch(0, 0.0, 0.0, -1));
}

#[test]
fn gesture_config_is_validated() {
    let (mut host, _, button) = host();
    let pan = host.attach_gesture(button, "pan");
    let tap = host.attach_gesture(button, "tap");
    assert_eq!((pan, tap), (1, 2));

    assert!(host.set_gesture_config(pan, "activationThreshold", ConfigValue::Number(4.0)));
    assert!(host.set_gesture_config(pan, "numberOfTaps", ConfigValue::Number(2.0)));
    assert!(!host.set_gesture_config(tap, "numberOfTaps", ConfigValue::Number(0.0)));
    assert!(!host.set_gesture_config(tap, "velocityScale", ConfigValue::Number(1.0)));
    assert!(host.detach_gesture(pan));
    assert!(!host.detach_gesture(pan));
}

#[test]
fn press_through_the_bridge() {
    let (mut host, _, button) = host();
    let presses = Recorder::<()>::new();
    assert!(host.set_press_callback(button, "onPress", presses.callback()));

    assert!(host.dispatch_touch(0, 50.0, 520.0, 1));
    assert!(host.dispatch_touch(2, 50.0, 520.0, 1));
    assert_eq!(presses.len(), 1);
}

#[test]
fn scroll_engine_through_the_bridge() {
    let (mut host, list, _) = host();
    let engine = host.scroll_create(list);
    assert_eq!(engine, 1);
    assert_eq!(host.scroll_create(list), engine);
    assert!(host.set_scroll_config(engine, "snapToInterval", ConfigValue::Number(50.0)));
    assert!(!host.set_scroll_config(engine, "decelerationRate", ConfigValue::from("slow")));

    assert!(host.scroll_to(engine, 0.0, 120.0, false));
    assert_eq!(host.scroll_offset(engine), Point::new(0.0, 120.0));
    assert_eq!(
        host.runtime().tree().node(list as usize).unwrap().scroll_y,
        120.0
    );

    assert!(host.scroll_touch(engine, 0, 50.0, 50.0, 1));
    assert!(host.on_vsync(0.0));
    assert!(host.scroll_touch(engine, 3, 50.0, 50.0, 1));
    assert!(!host.on_vsync(16.0));
    assert!(host.scroll_destroy(engine));
    assert_eq!(host.scroll_offset(engine), Point::ZERO);
}

#[test]
fn animation_through_the_bridge() {
    let (mut host, _, button) = host();
    let finished = Recorder::<bool>::new();
    let id = host.animate(
        button,
        "fontSize",
        "timing",
        &[
            ("toValue", ConfigValue::Number(20.0)),
            ("duration", ConfigValue::Number(0.0)),
        ],
        Some(finished.callback()),
    );
    assert_eq!(id, 1);
    assert!(!host.on_vsync(0.0));
    assert_eq!(finished.events(), vec![true]);
    assert_eq!(
        host.runtime().tree().node(button as usize).unwrap().font_size,
        20.0
    );
}
