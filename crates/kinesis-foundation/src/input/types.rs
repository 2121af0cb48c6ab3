use kinesis_core::Point;

pub type PointerId = u64;

/// Raw touch phase as delivered by the platform layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

impl TouchPhase {
    /// Decodes the bridge encoding: 0=began, 1=moved, 2=ended, 3=cancelled.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(TouchPhase::Began),
            1 => Some(TouchPhase::Moved),
            2 => Some(TouchPhase::Ended),
            3 => Some(TouchPhase::Cancelled),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            TouchPhase::Began => 0,
            TouchPhase::Moved => 1,
            TouchPhase::Ended => 2,
            TouchPhase::Cancelled => 3,
        }
    }

    /// Ended or cancelled: the pointer is leaving.
    pub fn is_release(self) -> bool {
        matches!(self, TouchPhase::Ended | TouchPhase::Cancelled)
    }
}

/// A single per-finger touch sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub position: Point,
    pub pointer_id: PointerId,
    /// Monotonic timestamp in milliseconds.
    pub timestamp_ms: f64,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, position: Point, pointer_id: PointerId, timestamp_ms: f64) -> Self {
        Self {
            phase,
            position,
            pointer_id,
            timestamp_ms,
        }
    }

    pub fn began(x: f32, y: f32, pointer_id: PointerId, timestamp_ms: f64) -> Self {
        Self::new(TouchPhase::Began, Point::new(x, y), pointer_id, timestamp_ms)
    }

    pub fn moved(x: f32, y: f32, pointer_id: PointerId, timestamp_ms: f64) -> Self {
        Self::new(TouchPhase::Moved, Point::new(x, y), pointer_id, timestamp_ms)
    }

    pub fn ended(x: f32, y: f32, pointer_id: PointerId, timestamp_ms: f64) -> Self {
        Self::new(TouchPhase::Ended, Point::new(x, y), pointer_id, timestamp_ms)
    }

    pub fn cancelled(x: f32, y: f32, pointer_id: PointerId, timestamp_ms: f64) -> Self {
        Self::new(TouchPhase::Cancelled, Point::new(x, y), pointer_id, timestamp_ms)
    }
}

/// Tracking state for one finger, owned by whoever follows it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub pointer_id: PointerId,
    pub position: Point,
    pub start: Point,
    pub start_time_ms: f64,
    pub last_time_ms: f64,
    pub active: bool,
}

impl TouchPoint {
    /// Overwrites the point with a fresh touch-down.
    pub fn begin(&mut self, event: &TouchEvent) {
        *self = TouchPoint {
            pointer_id: event.pointer_id,
            position: event.position,
            start: event.position,
            start_time_ms: event.timestamp_ms,
            last_time_ms: event.timestamp_ms,
            active: true,
        };
    }

    /// Whether `event` belongs to the finger being followed.
    pub fn tracks(&self, event: &TouchEvent) -> bool {
        self.active && self.pointer_id == event.pointer_id
    }

    pub fn translation(&self) -> Point {
        self.position - self.start
    }

    pub fn clear(&mut self) {
        *self = TouchPoint::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_round_trips_bridge_encoding() {
        for raw in 0..4 {
            assert_eq!(TouchPhase::from_raw(raw).map(TouchPhase::as_raw), Some(raw));
        }
        assert_eq!(TouchPhase::from_raw(4), None);
        assert_eq!(TouchPhase::from_raw(-1), None);
    }

    #[test]
    fn touch_point_follows_only_its_pointer() {
        let mut point = TouchPoint::default();
        point.begin(&TouchEvent::began(1.0, 2.0, 7, 10.0));

        assert!(point.tracks(&TouchEvent::moved(3.0, 4.0, 7, 20.0)));
        assert!(!point.tracks(&TouchEvent::moved(3.0, 4.0, 8, 20.0)));

        point.clear();
        assert!(!point.tracks(&TouchEvent::moved(3.0, 4.0, 7, 20.0)));
    }
}
