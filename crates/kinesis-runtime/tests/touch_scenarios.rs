use kinesis_core::{ConfigValue, NodeId, Point, Rect, SceneTree};
use kinesis_foundation::{GestureEvent, GestureState};
use kinesis_runtime::Runtime;
use kinesis_testing::{Journal, Recorder, TouchScript, TreeBuilder};

struct Scene {
    runtime: Runtime<SceneTree>,
    list: NodeId,
    rows: Vec<NodeId>,
    card: NodeId,
}

/// Root 400x800: a scroll list (0,0,400,200) of ten 20-unit rows and a
/// 200x200 card below it at y=300.
fn scene() -> Scene {
    let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 400.0, 800.0));
    let list = builder.scroll(builder.root(), Rect::new(0.0, 0.0, 400.0, 200.0));
    let rows = builder.rows(list, 10, 20.0);
    let card = builder.view(builder.root(), Rect::new(0.0, 300.0, 200.0, 200.0));
    Scene {
        runtime: Runtime::new(builder.build()),
        list,
        rows,
        card,
    }
}

fn play(runtime: &mut Runtime<SceneTree>, script: &TouchScript) {
    script.replay(|event| runtime.on_touch(event));
}

#[test]
fn pan_reports_start_updates_and_end() {
    let Scene {
        mut runtime, card, ..
    } = scene();
    let pan = runtime.attach_gesture(card, "pan").unwrap();
    let mut journal = Journal::new();
    let ends = Recorder::<GestureEvent>::new();
    runtime
        .set_gesture_callback(pan, "onStart", journal.callback::<GestureEvent>("start"))
        .unwrap();
    runtime
        .set_gesture_callback(pan, "onUpdate", journal.callback::<GestureEvent>("update"))
        .unwrap();
    runtime.set_gesture_callback(pan, "onEnd", ends.callback()).unwrap();

    let mut script = TouchScript::new();
    script.drag(1, Point::new(50.0, 350.0), Point::new(150.0, 350.0), 5, 50.0);
    play(&mut runtime, &script);

    assert_eq!(
        journal.labels(),
        vec!["start", "update", "update", "update", "update"]
    );
    let end = ends.last().unwrap();
    assert_eq!(end.translation, Point::new(100.0, 0.0));
    assert_eq!(
        runtime.dispatcher().gesture(pan).unwrap().state(),
        GestureState::Ended
    );
    assert!(!runtime.dispatcher().has_active_touches());
}

#[test]
fn pinch_scale_follows_finger_distance() {
    let Scene {
        mut runtime, card, ..
    } = scene();
    let pinch = runtime.attach_gesture(card, "pinch").unwrap();
    let starts = Recorder::<GestureEvent>::new();
    let updates = Recorder::<GestureEvent>::new();
    runtime
        .set_gesture_callback(pinch, "onStart", starts.callback())
        .unwrap();
    runtime
        .set_gesture_callback(pinch, "onUpdate", updates.callback())
        .unwrap();

    let mut script = TouchScript::new();
    script.pinch(Point::new(100.0, 400.0), 50.0, 150.0, 4, 40.0);
    play(&mut runtime, &script);

    assert_eq!(starts.len(), 1);
    let last = updates.last().unwrap();
    assert!((last.scale - 3.0).abs() < 1e-4, "scale {}", last.scale);
    assert_eq!(last.focal, Point::new(100.0, 400.0));
    assert_eq!(last.pointer_count, 2);
}

#[test]
fn double_tap_fires_once_and_a_late_tap_starts_over() {
    let Scene {
        mut runtime, card, ..
    } = scene();
    let tap = runtime.attach_gesture(card, "tap").unwrap();
    runtime
        .set_gesture_config(tap, "numberOfTaps", &ConfigValue::Number(2.0))
        .unwrap();
    let ends = Recorder::<GestureEvent>::new();
    runtime.set_gesture_callback(tap, "onEnd", ends.callback()).unwrap();

    let mut script = TouchScript::new();
    script
        .tap(1, 100.0, 400.0, 50.0)
        .wait(100.0)
        .tap(1, 104.0, 403.0, 50.0)
        .wait(400.0)
        .tap(1, 100.0, 400.0, 50.0);
    play(&mut runtime, &script);

    assert_eq!(ends.len(), 1);
}

#[test]
fn press_inside_scrolled_list_hits_content_row() {
    let Scene {
        mut runtime,
        list,
        rows,
        ..
    } = scene();
    let engine = runtime.scroll_create(list).unwrap();
    runtime.scroll_to(engine, 0.0, 50.0, false).unwrap();

    let mut journal = Journal::new();
    for name in ["onPressIn", "onPressOut", "onPress"] {
        runtime
            .set_press_callback(rows[3], name, journal.signal(name))
            .unwrap();
    }

    // Viewport y=15 is content y=65, inside the fourth row (60..80).
    assert_eq!(
        runtime
            .dispatcher()
            .hit_test(runtime.tree(), Point::new(10.0, 15.0)),
        Some(rows[3])
    );

    let mut script = TouchScript::new();
    script.tap(1, 10.0, 15.0, 80.0);
    play(&mut runtime, &script);
    assert_eq!(journal.labels(), vec!["onPressIn", "onPressOut", "onPress"]);
}

#[test]
fn press_dragged_away_is_abandoned() {
    let Scene {
        mut runtime, card, ..
    } = scene();
    let mut journal = Journal::new();
    for name in ["onPressIn", "onPressOut", "onPress"] {
        runtime
            .set_press_callback(card, name, journal.signal(name))
            .unwrap();
    }

    let mut script = TouchScript::new();
    script.drag(1, Point::new(50.0, 350.0), Point::new(50.0, 380.0), 2, 20.0);
    play(&mut runtime, &script);

    assert_eq!(journal.labels(), vec!["onPressIn", "onPressOut"]);
}

#[test]
fn long_hold_fires_long_press() {
    let Scene {
        mut runtime, card, ..
    } = scene();
    let presses = Recorder::<()>::new();
    let long_presses = Recorder::<()>::new();
    runtime
        .set_press_callback(card, "onPress", presses.callback())
        .unwrap();
    runtime
        .set_press_callback(card, "onLongPress", long_presses.callback())
        .unwrap();

    let mut script = TouchScript::new();
    script.tap(1, 100.0, 400.0, 600.0);
    play(&mut runtime, &script);

    assert!(presses.is_empty());
    assert_eq!(long_presses.len(), 1);
}

#[test]
fn unknown_names_are_errors() {
    let Scene {
        mut runtime, card, ..
    } = scene();
    let signals = Recorder::<()>::new();
    assert!(runtime.attach_gesture(card, "swipe").is_err());
    assert!(runtime
        .set_press_callback(card, "onHover", signals.callback())
        .is_err());
}
