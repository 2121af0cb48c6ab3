use kinesis_animation::AnimationConfig;
use kinesis_core::{CallbackHandle, NodeId, Point, Rect, SceneTree};
use kinesis_foundation::{GestureEvent, ScrollEngineId};
use kinesis_runtime::{Runtime, RuntimeError};
use kinesis_testing::{TouchScript, TreeBuilder};

const FRAME_MS: f64 = 1000.0 / 60.0;

struct Demo {
    runtime: Runtime<SceneTree>,
    list: NodeId,
    photo: NodeId,
}

/// A 360x640 screen: a scroll list of thirty rows on top and a photo below.
fn build_scene() -> Demo {
    let mut builder = TreeBuilder::new(Rect::new(0.0, 0.0, 360.0, 640.0));
    let list = builder.scroll(builder.root(), Rect::new(0.0, 0.0, 360.0, 400.0));
    for row in builder.rows(list, 30, 48.0) {
        builder.touchable(row);
    }
    let photo = builder.view(builder.root(), Rect::new(30.0, 420.0, 300.0, 200.0));
    Demo {
        runtime: Runtime::new(builder.build()),
        list,
        photo,
    }
}

/// Ticks frames from `start` until nothing is moving; returns the end time.
fn settle(runtime: &mut Runtime<SceneTree>, start: f64) -> f64 {
    let mut now = start;
    while runtime.has_pending_work() {
        now += FRAME_MS;
        runtime.on_vsync(now);
    }
    now
}

fn scroll_session(
    runtime: &mut Runtime<SceneTree>,
    engine: ScrollEngineId,
    script: &TouchScript,
) -> Result<f64, RuntimeError> {
    for event in script.events() {
        runtime.scroll_touch(engine, event)?;
    }
    Ok(settle(runtime, script.now()))
}

fn run() -> Result<(), RuntimeError> {
    let Demo {
        mut runtime,
        list,
        photo,
    } = build_scene();

    let engine = runtime.scroll_create(list)?;
    let scroll_end = CallbackHandle::new(|offset: Point| {
        log::info!("onScrollEnd at y={:.1}", offset.y);
    });
    runtime.set_scroll_offset_callback(engine, "onScrollEnd", scroll_end.callback())?;

    println!("--- fling ---");
    let mut fling = TouchScript::new();
    fling.drag(1, Point::new(180.0, 350.0), Point::new(180.0, 80.0), 6, 60.0);
    let now = scroll_session(&mut runtime, engine, &fling)?;

    println!("--- overscroll bounce ---");
    let mut bounce = TouchScript::starting_at(now + 500.0);
    let top = runtime.scroll_offset(engine).map_or(0.0, |offset| offset.y);
    bounce.drag(1, Point::new(180.0, 40.0), Point::new(180.0, 40.0 + top + 120.0), 8, 400.0);
    let now = scroll_session(&mut runtime, engine, &bounce)?;

    println!("--- pinch ---");
    let pinch = runtime.attach_gesture(photo, "pinch")?;
    let on_update = CallbackHandle::new(|event: GestureEvent| {
        log::debug!("pinch scale {:.3}", event.scale);
    });
    let on_end = CallbackHandle::new(|event: GestureEvent| {
        log::info!("pinch ended, focal ({:.0}, {:.0})", event.focal.x, event.focal.y);
    });
    runtime.set_gesture_callback(pinch, "onUpdate", on_update.callback())?;
    runtime.set_gesture_callback(pinch, "onEnd", on_end.callback())?;

    let mut gesture = TouchScript::starting_at(now + 500.0);
    gesture.pinch(Point::new(180.0, 520.0), 60.0, 180.0, 10, 300.0);
    gesture.replay(|event| runtime.on_touch(event));

    let finished = CallbackHandle::new(|success: bool| {
        log::info!("photo fade finished (success: {success})");
    });
    runtime.animate(
        photo,
        "opacity",
        "timing",
        AnimationConfig::to(0.25).with_on_finish(finished.callback()),
    )?;
    settle(&mut runtime, gesture.now());

    println!("{}", runtime.stats().display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Kinesis Touch Replay ===");
    if let Err(err) = run() {
        log::error!("replay failed: {err}");
        std::process::exit(1);
    }
}
