//! Timestamped touch sequences.

use kinesis_core::Point;
use kinesis_foundation::input::{PointerId, TouchEvent, TouchPhase};
use std::f32::consts::PI;

/// Accumulates touch events on a virtual clock.
///
/// Primitive steps (`down`, `move_to`, `up`) stamp the current time;
/// `wait` advances it. The compound helpers spread their samples evenly over
/// the requested duration.
#[derive(Debug, Clone, Default)]
pub struct TouchScript {
    now_ms: f64,
    events: Vec<TouchEvent>,
}

impl TouchScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now_ms,
            events: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now_ms
    }

    pub fn wait(&mut self, ms: f64) -> &mut Self {
        self.now_ms += ms;
        self
    }

    pub fn down(&mut self, pointer: PointerId, x: f32, y: f32) -> &mut Self {
        self.push(TouchPhase::Began, pointer, Point::new(x, y))
    }

    pub fn move_to(&mut self, pointer: PointerId, x: f32, y: f32) -> &mut Self {
        self.push(TouchPhase::Moved, pointer, Point::new(x, y))
    }

    pub fn up(&mut self, pointer: PointerId, x: f32, y: f32) -> &mut Self {
        self.push(TouchPhase::Ended, pointer, Point::new(x, y))
    }

    pub fn cancel(&mut self, pointer: PointerId, x: f32, y: f32) -> &mut Self {
        self.push(TouchPhase::Cancelled, pointer, Point::new(x, y))
    }

    /// Press and release in place after `hold_ms`.
    pub fn tap(&mut self, pointer: PointerId, x: f32, y: f32, hold_ms: f64) -> &mut Self {
        self.down(pointer, x, y).wait(hold_ms).up(pointer, x, y)
    }

    /// Straight-line drag in `steps` moves, released at `to` without a pause,
    /// so the release carries the drag velocity.
    pub fn drag(
        &mut self,
        pointer: PointerId,
        from: Point,
        to: Point,
        steps: usize,
        duration_ms: f64,
    ) -> &mut Self {
        let steps = steps.max(1);
        let step_ms = duration_ms / steps as f64;
        self.down(pointer, from.x, from.y);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.wait(step_ms);
            self.move_to(
                pointer,
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            );
        }
        self.up(pointer, to.x, to.y)
    }

    /// Two pointers (1 and 2) on a horizontal line through `center`, moving
    /// from `from_distance` to `to_distance` apart.
    pub fn pinch(
        &mut self,
        center: Point,
        from_distance: f32,
        to_distance: f32,
        steps: usize,
        duration_ms: f64,
    ) -> &mut Self {
        self.two_finger(center, steps, duration_ms, |t| {
            let distance = from_distance + (to_distance - from_distance) * t;
            (distance / 2.0, 0.0)
        })
    }

    /// Two pointers (1 and 2) on opposite ends of a `radius` circle around
    /// `center`, turning from `from_angle` to `to_angle` radians.
    pub fn rotate(
        &mut self,
        center: Point,
        radius: f32,
        from_angle: f32,
        to_angle: f32,
        steps: usize,
        duration_ms: f64,
    ) -> &mut Self {
        self.two_finger(center, steps, duration_ms, |t| {
            let angle = from_angle + (to_angle - from_angle) * t + PI;
            (radius * angle.cos(), radius * angle.sin())
        })
    }

    pub fn events(&self) -> &[TouchEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TouchEvent> {
        self.events
    }

    /// Feeds every event to `sink` in order.
    pub fn replay(&self, mut sink: impl FnMut(&TouchEvent)) {
        for event in &self.events {
            sink(event);
        }
    }

    /// `offset(t)` is pointer 1's displacement from `center` at progress
    /// `t`; pointer 2 mirrors it.
    fn two_finger(
        &mut self,
        center: Point,
        steps: usize,
        duration_ms: f64,
        offset: impl Fn(f32) -> (f32, f32),
    ) -> &mut Self {
        let steps = steps.max(1);
        let step_ms = duration_ms / steps as f64;
        let at = |t: f32| {
            let (dx, dy) = offset(t);
            (
                Point::new(center.x + dx, center.y + dy),
                Point::new(center.x - dx, center.y - dy),
            )
        };

        let (a, b) = at(0.0);
        self.down(1, a.x, a.y).down(2, b.x, b.y);
        for step in 1..=steps {
            let (a, b) = at(step as f32 / steps as f32);
            self.wait(step_ms);
            self.move_to(1, a.x, a.y).move_to(2, b.x, b.y);
        }
        let (a, b) = at(1.0);
        self.up(2, b.x, b.y).up(1, a.x, a.y)
    }

    fn push(&mut self, phase: TouchPhase, pointer: PointerId, position: Point) -> &mut Self {
        self.events
            .push(TouchEvent::new(phase, position, pointer, self.now_ms));
        self
    }
}
