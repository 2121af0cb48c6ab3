use super::{GestureCallbacks, GestureEvent, GestureState};
use crate::gesture_constants::PAN_ACTIVATION_THRESHOLD;
use crate::input::{TouchEvent, TouchPhase, TouchPoint};
use kinesis_core::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanConfig {
    /// Distance from the touch-down point before the pan activates.
    pub activation_threshold: f32,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            activation_threshold: PAN_ACTIVATION_THRESHOLD,
        }
    }
}

/// Single-pointer drag. Reported velocity is the instantaneous rate over the
/// previous sample only.
#[derive(Clone, Debug, Default)]
pub struct PanRecognizer {
    pub config: PanConfig,
    touch: TouchPoint,
    previous: Point,
    previous_time_ms: f64,
}

impl PanRecognizer {
    pub(crate) fn on_touch_event(
        &mut self,
        event: &TouchEvent,
        state: &mut GestureState,
        callbacks: &GestureCallbacks,
    ) {
        match event.phase {
            TouchPhase::Began => {
                self.touch.begin(event);
                self.previous = event.position;
                self.previous_time_ms = event.timestamp_ms;
                *state = GestureState::Possible;
            }
            TouchPhase::Moved => {
                if !self.touch.tracks(event) {
                    return;
                }
                self.touch.position = event.position;
                self.touch.last_time_ms = event.timestamp_ms;
                let translation = self.touch.translation();
                let distance = self.touch.start.distance_to(event.position);

                if *state == GestureState::Possible
                    && distance >= self.config.activation_threshold
                {
                    *state = GestureState::Began;
                    callbacks.start(GestureEvent {
                        translation,
                        pointer_count: 1,
                        ..GestureEvent::at(event.position)
                    });
                    *state = GestureState::Changed;
                } else if *state == GestureState::Changed {
                    callbacks.update(GestureEvent {
                        translation,
                        velocity: self.instantaneous_velocity(event),
                        pointer_count: 1,
                        ..GestureEvent::at(event.position)
                    });
                }

                self.previous = event.position;
                self.previous_time_ms = event.timestamp_ms;
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if !self.touch.tracks(event) {
                    return;
                }
                self.touch.active = false;

                if matches!(*state, GestureState::Began | GestureState::Changed) {
                    callbacks.end(GestureEvent {
                        translation: event.position - self.touch.start,
                        velocity: self.instantaneous_velocity(event),
                        pointer_count: 0,
                        ..GestureEvent::at(event.position)
                    });
                }
                *state = if event.phase == TouchPhase::Ended {
                    GestureState::Ended
                } else {
                    GestureState::Cancelled
                };
            }
        }
    }

    fn instantaneous_velocity(&self, event: &TouchEvent) -> Point {
        let dt = (event.timestamp_ms - self.previous_time_ms) / 1000.0;
        if dt <= 0.0 {
            return Point::ZERO;
        }
        let delta = event.position - self.previous;
        Point::new(delta.x / dt as f32, delta.y / dt as f32)
    }

    pub(crate) fn reset(&mut self) {
        self.touch.clear();
        self.previous = Point::ZERO;
        self.previous_time_ms = 0.0;
    }
}
