//! Sentinel-returning surface for a scripting bridge.
//!
//! Bridges pass raw integers and names and cannot do anything useful with a
//! typed error, so every failure here is logged at `debug` and collapsed to
//! `-1`, `false` or a no-op.

use crate::clock::MonotonicClock;
use crate::error::RuntimeError;
use crate::runtime::Runtime;
use kinesis_animation::AnimationId;
use kinesis_core::{Callback, ConfigValue, NodeId, NodeTree, Point};
use kinesis_foundation::{GestureEvent, GestureId, InputError, ScrollEngineId, TouchEvent, TouchPhase};

/// A [`Runtime`] plus the clock that stamps bridge touches.
pub struct Host<T: NodeTree> {
    runtime: Runtime<T>,
    clock: MonotonicClock,
}

impl<T: NodeTree> Host<T> {
    pub fn new(tree: T) -> Self {
        Self::with_clock(tree, MonotonicClock::new())
    }

    pub fn with_clock(tree: T, clock: MonotonicClock) -> Self {
        Self {
            runtime: Runtime::new(tree),
            clock,
        }
    }

    pub fn runtime(&self) -> &Runtime<T> {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime<T> {
        &mut self.runtime
    }

    pub fn into_runtime(self) -> Runtime<T> {
        self.runtime
    }

    /// Returns whether another frame is wanted.
    pub fn on_vsync(&mut self, timestamp_ms: f64) -> bool {
        self.runtime.on_vsync(timestamp_ms);
        self.runtime.has_pending_work()
    }

    /// `phase` uses the bridge encoding 0=began, 1=moved, 2=ended, 3=cancelled.
    pub fn dispatch_touch(&mut self, phase: i32, x: f32, y: f32, pointer_id: i64) -> bool {
        let Some(event) = self.touch(phase, x, y, pointer_id) else {
            return false;
        };
        self.runtime.on_touch(&event);
        true
    }

    pub fn set_press_callback(&mut self, node: i64, name: &str, callback: Callback<()>) -> bool {
        let Some(node) = node_id(node) else {
            return false;
        };
        succeeded(self.runtime.set_press_callback(node, name, callback))
    }

    pub fn attach_gesture(&mut self, node: i64, type_name: &str) -> i64 {
        let Some(node) = node_id(node) else {
            return -1;
        };
        match self.runtime.attach_gesture(node, type_name) {
            Ok(id) => i64::from(id.0),
            Err(err) => rejected(err, -1),
        }
    }

    pub fn detach_gesture(&mut self, id: i64) -> bool {
        let Some(id) = raw_u32(id).map(GestureId) else {
            return false;
        };
        succeeded(self.runtime.detach_gesture(id))
    }

    pub fn set_gesture_callback(&mut self, id: i64, name: &str, callback: Callback<GestureEvent>) -> bool {
        let Some(id) = raw_u32(id).map(GestureId) else {
            return false;
        };
        succeeded(self.runtime.set_gesture_callback(id, name, callback))
    }

    pub fn set_gesture_config(&mut self, id: i64, key: &str, value: ConfigValue) -> bool {
        let Some(id) = raw_u32(id).map(GestureId) else {
            return false;
        };
        succeeded(self.runtime.set_gesture_config(id, key, &value))
    }

    pub fn reset_gesture(&mut self, id: i64) -> bool {
        let Some(id) = raw_u32(id).map(GestureId) else {
            return false;
        };
        succeeded(self.runtime.reset_gesture(id))
    }

    pub fn scroll_create(&mut self, node: i64) -> i64 {
        let Some(node) = node_id(node) else {
            return -1;
        };
        match self.runtime.scroll_create(node) {
            Ok(id) => i64::from(id.0),
            Err(err) => rejected(err, -1),
        }
    }

    pub fn scroll_destroy(&mut self, id: i64) -> bool {
        raw_u32(id)
            .map(ScrollEngineId)
            .is_some_and(|id| self.runtime.scroll_destroy(id))
    }

    pub fn scroll_touch(&mut self, id: i64, phase: i32, x: f32, y: f32, pointer_id: i64) -> bool {
        let Some(id) = raw_u32(id).map(ScrollEngineId) else {
            return false;
        };
        let Some(event) = self.touch(phase, x, y, pointer_id) else {
            return false;
        };
        self.runtime.scroll_touch(id, &event).unwrap_or_else(|err| rejected(err, false))
    }

    pub fn scroll_to(&mut self, id: i64, x: f32, y: f32, animated: bool) -> bool {
        let Some(id) = raw_u32(id).map(ScrollEngineId) else {
            return false;
        };
        succeeded(self.runtime.scroll_to(id, x, y, animated))
    }

    pub fn set_scroll_config(&mut self, id: i64, key: &str, value: ConfigValue) -> bool {
        let Some(id) = raw_u32(id).map(ScrollEngineId) else {
            return false;
        };
        succeeded(self.runtime.set_scroll_config(id, key, &value))
    }

    pub fn set_scroll_offset_callback(&mut self, id: i64, name: &str, callback: Callback<Point>) -> bool {
        let Some(id) = raw_u32(id).map(ScrollEngineId) else {
            return false;
        };
        succeeded(self.runtime.set_scroll_offset_callback(id, name, callback))
    }

    pub fn set_scroll_drag_callback(&mut self, id: i64, name: &str, callback: Callback<()>) -> bool {
        let Some(id) = raw_u32(id).map(ScrollEngineId) else {
            return false;
        };
        succeeded(self.runtime.set_scroll_drag_callback(id, name, callback))
    }

    /// Offset of the engine, or `(0, 0)` for an unknown id.
    pub fn scroll_offset(&self, id: i64) -> Point {
        raw_u32(id)
            .and_then(|id| self.runtime.scroll_offset(ScrollEngineId(id)))
            .unwrap_or(Point::ZERO)
    }

    pub fn animate(
        &mut self,
        node: i64,
        property: &str,
        driver: &str,
        params: &[(&str, ConfigValue)],
        on_finish: Option<Callback<bool>>,
    ) -> i64 {
        let Some(node) = node_id(node) else {
            return -1;
        };
        match self
            .runtime
            .animate_with(node, property, driver, params, on_finish)
        {
            Ok(id) => i64::from(id.0),
            Err(err) => rejected(err, -1),
        }
    }

    pub fn cancel_animation(&mut self, id: i64) -> bool {
        raw_u32(id)
            .map(AnimationId)
            .is_some_and(|id| self.runtime.cancel_animation(id))
    }

    pub fn forget_node(&mut self, node: i64) {
        if let Some(node) = node_id(node) {
            self.runtime.forget_node(node);
        }
    }

    fn touch(&self, phase: i32, x: f32, y: f32, pointer_id: i64) -> Option<TouchEvent> {
        let Some(phase) = TouchPhase::from_raw(phase) else {
            return rejected(InputError::InvalidPhase { raw: phase }.into(), None);
        };
        let pointer_id = u64::try_from(pointer_id).ok()?;
        Some(TouchEvent::new(
            phase,
            Point::new(x, y),
            pointer_id,
            self.clock.now_ms(),
        ))
    }
}

fn node_id(raw: i64) -> Option<NodeId> {
    let id = NodeId::try_from(raw).ok();
    if id.is_none() {
        log::debug!("host passed invalid node id {raw}");
    }
    id
}

fn raw_u32(raw: i64) -> Option<u32> {
    u32::try_from(raw).ok()
}

fn rejected<R>(err: RuntimeError, sentinel: R) -> R {
    log::debug!("host call rejected: {err}");
    sentinel
}

fn succeeded(result: Result<(), RuntimeError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => rejected(err, false),
    }
}
