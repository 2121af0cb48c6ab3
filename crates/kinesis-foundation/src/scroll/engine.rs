//! Per-node scroll controller.
//!
//! ```text
//! Idle --touch began--> Dragging --release--> Bouncing   (out of bounds)
//!                                          -> Snapping   (paging / snap interval)
//!                                          -> Decelerating
//!                                          -> Idle       (too slow to fling)
//! Decelerating --stopped--> Bouncing | Snapping | Idle
//! Bouncing | Snapping --settled--> Idle
//! ```
//!
//! The engine only holds the id of its node. Every operation that touches the
//! node looks it up in the tree passed in and does nothing if it is gone.

use super::config::ScrollConfig;
use super::physics::{
    deceleration_step, find_page_target, find_snap_target, rubber_band_clamp, spring_step,
    SPRING_OMEGA, VELOCITY_THRESHOLD,
};
use crate::input::{PointerId, TouchEvent, TouchPhase};
use crate::velocity_tracker::VelocityTracker;
use kinesis_core::{fire, Callback, FrameTime, NodeId, NodeTree, Point, SceneNode, Size};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScrollEngineId(pub u32);

impl fmt::Display for ScrollEngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    #[default]
    Idle,
    Dragging,
    Decelerating,
    Bouncing,
    Snapping,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollCallbackKind {
    Scroll,
    ScrollEnd,
    BeginDrag,
    EndDrag,
}

impl ScrollCallbackKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "onScroll" => Some(ScrollCallbackKind::Scroll),
            "onScrollEnd" => Some(ScrollCallbackKind::ScrollEnd),
            "onScrollBeginDrag" => Some(ScrollCallbackKind::BeginDrag),
            "onScrollEndDrag" => Some(ScrollCallbackKind::EndDrag),
            _ => None,
        }
    }

    /// Whether the callback receives the current offset.
    pub fn carries_offset(self) -> bool {
        matches!(self, ScrollCallbackKind::Scroll | ScrollCallbackKind::ScrollEnd)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScrollCallbacks {
    /// Fired with the new offset every time it is written to the node.
    pub on_scroll: Option<Callback<Point>>,
    /// Fired with the resting offset whenever the engine returns to idle.
    pub on_scroll_end: Option<Callback<Point>>,
    pub on_scroll_begin_drag: Option<Callback<()>>,
    pub on_scroll_end_drag: Option<Callback<()>>,
}

#[derive(Debug)]
pub struct ScrollEngine {
    id: ScrollEngineId,
    node: NodeId,
    pub config: ScrollConfig,
    pub callbacks: ScrollCallbacks,
    phase: ScrollPhase,
    offset: Point,
    velocity: Point,
    snap_target: Point,
    viewport: Size,
    content: Size,
    tracker_x: VelocityTracker,
    tracker_y: VelocityTracker,
    last_touch: Point,
    active_pointer: Option<PointerId>,
    frame_time: FrameTime,
}

impl ScrollEngine {
    pub fn new(id: ScrollEngineId, node: NodeId) -> Self {
        Self {
            id,
            node,
            config: ScrollConfig::default(),
            callbacks: ScrollCallbacks::default(),
            phase: ScrollPhase::Idle,
            offset: Point::ZERO,
            velocity: Point::ZERO,
            snap_target: Point::ZERO,
            viewport: Size::ZERO,
            content: Size::ZERO,
            tracker_x: VelocityTracker::new(),
            tracker_y: VelocityTracker::new(),
            last_touch: Point::ZERO,
            active_pointer: None,
            frame_time: FrameTime::new(),
        }
    }

    /// Binds an engine to `node`, adopting its orientation, enabled flag and
    /// current scroll position.
    pub fn for_node(id: ScrollEngineId, node: &SceneNode) -> Self {
        let mut engine = Self::new(id, node.id);
        engine.config.horizontal = node.horizontal;
        engine.config.scroll_enabled = node.scroll_enabled;
        engine.offset = Point::new(node.scroll_x, node.scroll_y);
        engine
    }

    pub fn id(&self) -> ScrollEngineId {
        self.id
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn content(&self) -> Size {
        self.content
    }

    /// Animating: the engine wants frame ticks.
    pub fn needs_tick(&self) -> bool {
        !matches!(self.phase, ScrollPhase::Idle | ScrollPhase::Dragging)
    }

    /// Animating or under a finger.
    pub fn is_active(&self) -> bool {
        self.phase != ScrollPhase::Idle
    }

    pub fn max_scroll(&self) -> Point {
        Point::new(
            (self.content.width - self.viewport.width).max(0.0),
            (self.content.height - self.viewport.height).max(0.0),
        )
    }

    /// Overrides the extents measured from the node. The next touch-down
    /// measures the node again.
    pub fn update_bounds(&mut self, viewport: Size, content: Size) {
        self.viewport = viewport;
        self.content = content;
    }

    pub fn on_touch_event(&mut self, tree: &mut dyn NodeTree, event: &TouchEvent) -> bool {
        match event.phase {
            TouchPhase::Began => return self.on_touch_began(tree, event),
            TouchPhase::Moved => self.on_touch_moved(tree, event),
            TouchPhase::Ended => self.on_touch_ended(tree, event),
            TouchPhase::Cancelled => self.on_touch_cancelled(tree, event),
        }
        true
    }

    /// Starts a drag. Returns `false` when scrolling is disabled or the node
    /// is gone.
    pub fn on_touch_began(&mut self, tree: &mut dyn NodeTree, event: &TouchEvent) -> bool {
        if !self.config.scroll_enabled || !self.measure(tree) {
            return false;
        }
        self.cancel_animation();
        self.set_phase(ScrollPhase::Dragging);
        self.active_pointer = Some(event.pointer_id);
        self.last_touch = event.position;
        self.velocity = Point::ZERO;
        self.tracker_x.reset();
        self.tracker_y.reset();
        self.tracker_x.add_point(event.timestamp_ms, event.position.x);
        self.tracker_y.add_point(event.timestamp_ms, event.position.y);
        fire(&self.callbacks.on_scroll_begin_drag, ());
        true
    }

    pub fn on_touch_moved(&mut self, tree: &mut dyn NodeTree, event: &TouchEvent) {
        if self.phase != ScrollPhase::Dragging || self.active_pointer != Some(event.pointer_id) {
            return;
        }
        self.tracker_x.add_point(event.timestamp_ms, event.position.x);
        self.tracker_y.add_point(event.timestamp_ms, event.position.y);

        let delta = event.position - self.last_touch;
        self.last_touch = event.position;
        let max = self.max_scroll();

        // Content moves against the finger.
        if self.config.horizontal {
            self.offset.x = self.apply_delta(self.offset.x, -delta.x, max.x, self.viewport.width);
        } else {
            self.offset.y = self.apply_delta(self.offset.y, -delta.y, max.y, self.viewport.height);
        }
        self.commit_offset(tree);
    }

    pub fn on_touch_ended(&mut self, tree: &mut dyn NodeTree, event: &TouchEvent) {
        if self.phase != ScrollPhase::Dragging || self.active_pointer != Some(event.pointer_id) {
            return;
        }
        self.active_pointer = None;
        fire(&self.callbacks.on_scroll_end_drag, ());

        self.velocity = Point::new(-self.tracker_x.velocity(), -self.tracker_y.velocity());
        log::trace!(
            "scroll {} released at {:?} with velocity {:?}",
            self.id,
            self.offset,
            self.velocity
        );

        if self.is_overscrolled() {
            self.start_bounce();
        } else if self.config.paging_enabled {
            self.start_snap(true);
        } else if self.config.snap_interval > 0.0 {
            self.start_snap(false);
        } else {
            self.start_deceleration(tree);
        }
    }

    /// Releases the drag without a fling: bounce back if needed, else stop.
    pub fn on_touch_cancelled(&mut self, tree: &mut dyn NodeTree, event: &TouchEvent) {
        if self.active_pointer != Some(event.pointer_id) {
            return;
        }
        self.active_pointer = None;
        self.velocity = Point::ZERO;
        if self.is_overscrolled() {
            self.start_bounce();
        } else {
            self.finish(tree);
        }
    }

    /// Moves to `(x, y)`, clamped to the scrollable range. The animated form
    /// springs there from rest.
    pub fn scroll_to(&mut self, tree: &mut dyn NodeTree, x: f32, y: f32, animated: bool) {
        if !self.measure(tree) {
            return;
        }
        self.cancel_animation();
        self.active_pointer = None;
        let max = self.max_scroll();
        let target = Point::new(x.clamp(0.0, max.x), y.clamp(0.0, max.y));

        if animated {
            self.snap_target = target;
            self.velocity = Point::ZERO;
            self.set_phase(ScrollPhase::Snapping);
        } else {
            self.offset = target;
            self.commit_offset(tree);
            self.fire_scroll_end();
        }
    }

    /// Advances the running animation to `timestamp_ms`.
    pub fn tick(&mut self, tree: &mut dyn NodeTree, timestamp_ms: f64) {
        if !self.needs_tick() {
            return;
        }
        if tree.node(self.node).is_none() {
            log::debug!("scroll {} lost node {}; stopping", self.id, self.node);
            self.cancel_animation();
            return;
        }
        let dt = self.frame_time.advance(timestamp_ms) as f32;
        let finished = match self.phase {
            ScrollPhase::Decelerating => self.step_deceleration(dt),
            ScrollPhase::Bouncing => self.step_bounce(dt),
            ScrollPhase::Snapping => self.step_snap(dt),
            ScrollPhase::Idle | ScrollPhase::Dragging => return,
        };
        self.commit_offset(tree);
        if finished {
            self.finish(tree);
        }
    }

    /// Stops any animation in place without firing callbacks.
    pub fn cancel_animation(&mut self) {
        self.set_phase(ScrollPhase::Idle);
        self.frame_time.reset();
    }

    fn start_deceleration(&mut self, tree: &mut dyn NodeTree) {
        if self.axis(self.velocity).abs() < VELOCITY_THRESHOLD {
            self.finish(tree);
            return;
        }
        self.set_phase(ScrollPhase::Decelerating);
        self.frame_time.reset();
    }

    fn step_deceleration(&mut self, dt: f32) -> bool {
        let max = self.axis(self.max_scroll());
        let rate = self.config.deceleration_rate.per_ms();
        let step = deceleration_step(
            self.axis(self.offset),
            self.axis(self.velocity),
            dt,
            rate,
            0.0,
            max,
        );
        self.set_axis_state(step.offset, step.velocity);
        if !step.finished {
            return false;
        }

        if step.offset < 0.0 || step.offset > max {
            if self.config.bounces {
                self.start_bounce();
                return false;
            }
            self.set_axis_state(step.offset.clamp(0.0, max), 0.0);
        }
        if self.config.paging_enabled {
            self.start_snap(true);
            return false;
        }
        if self.config.snap_interval > 0.0 {
            self.start_snap(false);
            return false;
        }
        true
    }

    fn start_bounce(&mut self) {
        self.set_phase(ScrollPhase::Bouncing);
        self.frame_time.reset();
    }

    fn step_bounce(&mut self, dt: f32) -> bool {
        let offset = self.axis(self.offset);
        let target = offset.clamp(0.0, self.axis(self.max_scroll()));
        let step = spring_step(offset, self.axis(self.velocity), target, dt, SPRING_OMEGA);
        self.set_axis_state(step.offset, step.velocity);
        step.finished
    }

    fn start_snap(&mut self, paging: bool) {
        let max = self.max_scroll();
        let rate = self.config.deceleration_rate.per_ms();
        let horizontal = self.config.horizontal;
        let (offset, velocity, limit, viewport) = if horizontal {
            (self.offset.x, self.velocity.x, max.x, self.viewport.width)
        } else {
            (self.offset.y, self.velocity.y, max.y, self.viewport.height)
        };
        let target = if paging {
            find_page_target(offset, velocity, viewport, 0.0, limit)
        } else {
            find_snap_target(offset, velocity, self.config.snap_interval, 0.0, limit, rate)
        };
        self.snap_target = if horizontal {
            Point::new(target, self.offset.y)
        } else {
            Point::new(self.offset.x, target)
        };
        self.set_phase(ScrollPhase::Snapping);
        self.frame_time.reset();
    }

    fn step_snap(&mut self, dt: f32) -> bool {
        let x = spring_step(self.offset.x, self.velocity.x, self.snap_target.x, dt, SPRING_OMEGA);
        let y = spring_step(self.offset.y, self.velocity.y, self.snap_target.y, dt, SPRING_OMEGA);
        self.offset = Point::new(x.offset, y.offset);
        self.velocity = Point::new(x.velocity, y.velocity);
        x.finished && y.finished
    }

    /// Drag delta with rubber-band resistance outside `[0, max]`.
    fn apply_delta(&self, offset: f32, delta: f32, max: f32, viewport: f32) -> f32 {
        if !self.config.bounces {
            return (offset + delta).clamp(0.0, max);
        }
        if (0.0..=max).contains(&offset) {
            let next = offset + delta;
            if next < 0.0 {
                let in_bounds = -offset;
                return rubber_band_clamp(delta - in_bounds, 0.0, viewport);
            }
            if next > max {
                let in_bounds = max - offset;
                return max + rubber_band_clamp(delta - in_bounds, 0.0, viewport);
            }
            return next;
        }
        let overscroll = if offset < 0.0 { -offset } else { offset - max };
        offset + rubber_band_clamp(delta, overscroll, viewport)
    }

    fn is_overscrolled(&self) -> bool {
        let offset = self.axis(self.offset);
        offset < 0.0 || offset > self.axis(self.max_scroll())
    }

    fn axis(&self, value: Point) -> f32 {
        if self.config.horizontal {
            value.x
        } else {
            value.y
        }
    }

    fn set_axis_state(&mut self, offset: f32, velocity: f32) {
        if self.config.horizontal {
            self.offset.x = offset;
            self.velocity.x = velocity;
        } else {
            self.offset.y = offset;
            self.velocity.y = velocity;
        }
    }

    /// Viewport from the node's layout, content from its children's extents.
    fn measure(&mut self, tree: &dyn NodeTree) -> bool {
        let Some(node) = tree.node(self.node) else {
            return false;
        };
        self.viewport = node.layout.size();
        let mut content = Size::ZERO;
        for child in node.children.iter().filter_map(|child| tree.node(*child)) {
            content.width = content.width.max(child.layout.x + child.layout.width);
            content.height = content.height.max(child.layout.y + child.layout.height);
        }
        self.content = content;
        true
    }

    /// Writes the offset into the node and reports it.
    fn commit_offset(&mut self, tree: &mut dyn NodeTree) {
        let Some(node) = tree.node_mut(self.node) else {
            return;
        };
        node.scroll_x = self.offset.x;
        node.scroll_y = self.offset.y;
        tree.mark_dirty(self.node);
        fire(&self.callbacks.on_scroll, self.offset);
    }

    fn finish(&mut self, tree: &dyn NodeTree) {
        self.velocity = Point::ZERO;
        self.cancel_animation();
        if tree.node(self.node).is_some() {
            self.fire_scroll_end();
        }
    }

    fn fire_scroll_end(&self) {
        fire(&self.callbacks.on_scroll_end, self.offset);
    }

    fn set_phase(&mut self, phase: ScrollPhase) {
        if self.phase != phase {
            log::debug!("scroll {} on node {}: {:?} -> {:?}", self.id, self.node, self.phase, phase);
            self.phase = phase;
        }
    }
}

#[cfg(test)]
#[path = "../tests/scroll_engine_tests.rs"]
mod tests;
