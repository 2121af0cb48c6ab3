//! Hit testing and touch routing.
//!
//! A touch-down is hit-tested once against the node tree. The result feeds two
//! independent consumers:
//!
//! * gesture routing: the pointer is captured to the hit node when that node
//!   has recognizers attached, and every later phase of the pointer goes to
//!   the same recognizers;
//! * press tracking: `onPressIn`/`onPressOut`/`onPress`/`onLongPress` for
//!   simple tappable nodes.

use super::hit_path_tracker::HitPathTracker;
use super::types::{PointerId, TouchEvent, TouchPhase};
use crate::error::InputError;
use crate::gesture_constants::{LONG_PRESS_MS, PRESS_CANCEL_DISTANCE};
use crate::gestures::{
    GestureCallbackKind, GestureEvent, GestureId, GestureRecognizer, GestureType,
};
use indexmap::IndexMap;
use kinesis_core::collections::map::HashMap;
use kinesis_core::{fire, Callback, ConfigValue, NodeId, NodeTree, Point, Rect};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressEventKind {
    PressIn,
    PressOut,
    Press,
    LongPress,
}

impl PressEventKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "onPressIn" => Some(PressEventKind::PressIn),
            "onPressOut" => Some(PressEventKind::PressOut),
            "onPress" => Some(PressEventKind::Press),
            "onLongPress" => Some(PressEventKind::LongPress),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PressCallbacks {
    pub on_press_in: Option<Callback<()>>,
    pub on_press_out: Option<Callback<()>>,
    pub on_press: Option<Callback<()>>,
    pub on_long_press: Option<Callback<()>>,
}

#[derive(Clone, Copy, Debug)]
struct ActivePress {
    node: NodeId,
    start: Point,
    start_time_ms: f64,
}

#[derive(Debug)]
pub struct TouchDispatcher {
    press_callbacks: HashMap<NodeId, PressCallbacks>,
    recognizers: IndexMap<GestureId, GestureRecognizer>,
    node_gestures: HashMap<NodeId, SmallVec<[GestureId; 2]>>,
    hit_paths: HitPathTracker,
    active_presses: HashMap<PointerId, ActivePress>,
    next_gesture_id: u32,
}

impl Default for TouchDispatcher {
    fn default() -> Self {
        Self {
            press_callbacks: HashMap::default(),
            recognizers: IndexMap::new(),
            node_gestures: HashMap::default(),
            hit_paths: HitPathTracker::new(),
            active_presses: HashMap::default(),
            next_gesture_id: 1,
        }
    }
}

impl TouchDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_press_callback(&mut self, node: NodeId, kind: PressEventKind, callback: Callback<()>) {
        let callbacks = self.press_callbacks.entry(node).or_default();
        let slot = match kind {
            PressEventKind::PressIn => &mut callbacks.on_press_in,
            PressEventKind::PressOut => &mut callbacks.on_press_out,
            PressEventKind::Press => &mut callbacks.on_press,
            PressEventKind::LongPress => &mut callbacks.on_long_press,
        };
        *slot = Some(callback);
    }

    pub fn set_press_callback_by_name(
        &mut self,
        node: NodeId,
        name: &str,
        callback: Callback<()>,
    ) -> Result<(), InputError> {
        let kind = PressEventKind::from_name(name).ok_or_else(|| InputError::UnknownEvent {
            name: name.to_owned(),
        })?;
        self.set_press_callback(node, kind, callback);
        Ok(())
    }

    pub fn attach_gesture(&mut self, node: NodeId, gesture_type: GestureType) -> GestureId {
        let id = GestureId(self.next_gesture_id);
        self.next_gesture_id += 1;
        self.recognizers
            .insert(id, GestureRecognizer::new(id, node, gesture_type));
        self.node_gestures.entry(node).or_default().push(id);
        log::debug!("attached {} gesture {id} to node {node}", gesture_type.name());
        id
    }

    pub fn attach_gesture_by_name(&mut self, node: NodeId, name: &str) -> Result<GestureId, InputError> {
        let gesture_type = GestureType::from_name(name).ok_or_else(|| {
            InputError::UnknownGestureType {
                name: name.to_owned(),
            }
        })?;
        Ok(self.attach_gesture(node, gesture_type))
    }

    /// Destroys the recognizer. Touches already in flight simply stop reaching it.
    pub fn detach_gesture(&mut self, id: GestureId) -> Result<(), InputError> {
        let recognizer = self
            .recognizers
            .shift_remove(&id)
            .ok_or(InputError::MissingGesture { id })?;
        let node = recognizer.node();
        if let Some(ids) = self.node_gestures.get_mut(&node) {
            ids.retain(|attached| *attached != id);
            if ids.is_empty() {
                self.node_gestures.remove(&node);
            }
        }
        Ok(())
    }

    pub fn set_gesture_callback(
        &mut self,
        id: GestureId,
        name: &str,
        callback: Callback<GestureEvent>,
    ) -> Result<(), InputError> {
        let kind = GestureCallbackKind::from_name(name).ok_or_else(|| InputError::UnknownEvent {
            name: name.to_owned(),
        })?;
        self.gesture_mut(id)?.set_callback(kind, callback);
        Ok(())
    }

    pub fn set_gesture_config(
        &mut self,
        id: GestureId,
        key: &str,
        value: &ConfigValue,
    ) -> Result<(), InputError> {
        self.gesture_mut(id)?.apply_config(key, value)?;
        Ok(())
    }

    pub fn reset_gesture(&mut self, id: GestureId) -> Result<(), InputError> {
        self.gesture_mut(id)?.reset();
        Ok(())
    }

    pub fn gesture(&self, id: GestureId) -> Option<&GestureRecognizer> {
        self.recognizers.get(&id)
    }

    fn gesture_mut(&mut self, id: GestureId) -> Result<&mut GestureRecognizer, InputError> {
        self.recognizers
            .get_mut(&id)
            .ok_or(InputError::MissingGesture { id })
    }

    pub fn gestures_for(&self, node: NodeId) -> &[GestureId] {
        self.node_gestures
            .get(&node)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Forgets everything bound to `node`: press callbacks, recognizers,
    /// pointer captures and in-flight presses.
    pub fn remove_node(&mut self, node: NodeId) {
        self.press_callbacks.remove(&node);
        if let Some(ids) = self.node_gestures.remove(&node) {
            for id in ids {
                self.recognizers.shift_remove(&id);
            }
        }
        self.hit_paths.release_node(node);
        self.active_presses.retain(|_, press| press.node != node);
    }

    /// Whether a pointer is currently captured or pressing.
    pub fn has_active_touches(&self) -> bool {
        !self.hit_paths.is_empty() || !self.active_presses.is_empty()
    }

    pub fn dispatch_touch(&mut self, tree: &dyn NodeTree, event: &TouchEvent) {
        if event.phase == TouchPhase::Began {
            let target = self.hit_test(tree, event.position);
            log::trace!(
                "touch began at ({}, {}) pointer {} -> {:?}",
                event.position.x,
                event.position.y,
                event.pointer_id,
                target
            );
            if let Some(node) = target {
                if self.node_gestures.contains_key(&node) {
                    self.hit_paths.capture(event.pointer_id, node);
                    self.dispatch_to_gestures(node, event);
                }
                self.press_began(node, event);
            }
            return;
        }

        if let Some(node) = self.hit_paths.captured(event.pointer_id) {
            self.dispatch_to_gestures(node, event);
            if event.phase.is_release() {
                self.hit_paths.release(event.pointer_id);
            }
        }

        match event.phase {
            TouchPhase::Moved => self.press_moved(event),
            TouchPhase::Ended => self.press_ended(tree, event),
            TouchPhase::Cancelled => self.press_cancelled(event),
            TouchPhase::Began => {}
        }
    }

    fn dispatch_to_gestures(&mut self, node: NodeId, event: &TouchEvent) {
        let Some(ids) = self.node_gestures.get(&node) else {
            return;
        };
        for id in ids {
            if let Some(recognizer) = self.recognizers.get_mut(id) {
                recognizer.on_touch_event(event);
            }
        }
    }

    /// Deepest touch target under `position`, topmost-drawn first.
    pub fn hit_test(&self, tree: &dyn NodeTree, position: Point) -> Option<NodeId> {
        let root = tree.root()?;
        self.hit_test_node(tree, root, position)
    }

    fn hit_test_node(&self, tree: &dyn NodeTree, id: NodeId, position: Point) -> Option<NodeId> {
        let node = tree.node(id)?;
        if !node.is_hit_testable() {
            return None;
        }
        if !node.layout.absolute_rect().contains(position.x, position.y) {
            return None;
        }

        // Children sit in content space; the touch arrives in viewport space.
        let child_position = if node.is_scroll_container() {
            Point::new(position.x + node.scroll_x, position.y + node.scroll_y)
        } else {
            position
        };
        for child in node.children.iter().rev() {
            if let Some(hit) = self.hit_test_node(tree, *child, child_position) {
                return Some(hit);
            }
        }

        if node.touchable
            || self.press_callbacks.contains_key(&id)
            || self.node_gestures.contains_key(&id)
        {
            Some(id)
        } else {
            None
        }
    }

    fn press_began(&mut self, node: NodeId, event: &TouchEvent) {
        self.active_presses.insert(
            event.pointer_id,
            ActivePress {
                node,
                start: event.position,
                start_time_ms: event.timestamp_ms,
            },
        );
        if let Some(callbacks) = self.press_callbacks.get(&node) {
            fire(&callbacks.on_press_in, ());
        }
    }

    fn press_moved(&mut self, event: &TouchEvent) {
        let Some(press) = self.active_presses.get(&event.pointer_id) else {
            return;
        };
        let limit = PRESS_CANCEL_DISTANCE * PRESS_CANCEL_DISTANCE;
        if press.start.distance_squared_to(event.position) <= limit {
            return;
        }
        let node = press.node;
        self.active_presses.remove(&event.pointer_id);
        log::trace!("press on node {node} abandoned after moving too far");
        if let Some(callbacks) = self.press_callbacks.get(&node) {
            fire(&callbacks.on_press_out, ());
        }
    }

    fn press_ended(&mut self, tree: &dyn NodeTree, event: &TouchEvent) {
        let Some(press) = self.active_presses.remove(&event.pointer_id) else {
            return;
        };
        let Some(callbacks) = self.press_callbacks.get(&press.node) else {
            return;
        };
        fire(&callbacks.on_press_out, ());

        let inside = viewport_rect(tree, press.node)
            .is_some_and(|rect| rect.contains(event.position.x, event.position.y));
        if !inside {
            return;
        }
        let held_ms = event.timestamp_ms - press.start_time_ms;
        if held_ms >= LONG_PRESS_MS && callbacks.on_long_press.is_some() {
            fire(&callbacks.on_long_press, ());
        } else {
            fire(&callbacks.on_press, ());
        }
    }

    fn press_cancelled(&mut self, event: &TouchEvent) {
        let Some(press) = self.active_presses.remove(&event.pointer_id) else {
            return;
        };
        if let Some(callbacks) = self.press_callbacks.get(&press.node) {
            fire(&callbacks.on_press_out, ());
        }
    }
}

/// Where `id` currently appears on screen: its absolute rect shifted by the
/// scroll offsets of every scrolling ancestor.
fn viewport_rect(tree: &dyn NodeTree, id: NodeId) -> Option<Rect> {
    let node = tree.node(id)?;
    let mut rect = node.layout.absolute_rect();
    let mut parent = node.parent;
    while let Some(ancestor_id) = parent {
        let ancestor = tree.node(ancestor_id)?;
        if ancestor.is_scroll_container() {
            rect = rect.translate(-ancestor.scroll_x, -ancestor.scroll_y);
        }
        parent = ancestor.parent;
    }
    Some(rect)
}

#[cfg(test)]
#[path = "../tests/dispatcher_tests.rs"]
mod tests;
