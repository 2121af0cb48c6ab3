use super::{GestureCallbacks, GestureEvent, GestureState};
use crate::gesture_constants::{TAP_MAX_DELAY_MS, TAP_MAX_DISTANCE, TAP_MAX_DURATION_MS};
use crate::input::{TouchEvent, TouchPhase, TouchPoint};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapConfig {
    /// Taps needed before `onEnd` fires (2 for a double tap).
    pub required_taps: u32,
    /// Movement allowed during a single tap.
    pub max_distance: f32,
    pub max_duration_ms: f64,
    /// Longest gap between consecutive qualifying taps.
    pub max_delay_ms: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            required_taps: 1,
            max_distance: TAP_MAX_DISTANCE,
            max_duration_ms: TAP_MAX_DURATION_MS,
            max_delay_ms: TAP_MAX_DELAY_MS,
        }
    }
}

/// Single and multi-tap recognition.
///
/// Any failed tap (moved too far, held too long, cancelled) breaks a
/// multi-tap sequence: the counter goes back to zero.
#[derive(Clone, Debug, Default)]
pub struct TapRecognizer {
    pub config: TapConfig,
    touch: TouchPoint,
    tap_count: u32,
    last_tap_ms: f64,
}

impl TapRecognizer {
    /// Qualifying taps seen so far in the current sequence.
    pub fn tap_count(&self) -> u32 {
        self.tap_count
    }

    pub(crate) fn on_touch_event(
        &mut self,
        event: &TouchEvent,
        state: &mut GestureState,
        callbacks: &GestureCallbacks,
    ) {
        match event.phase {
            TouchPhase::Began => {
                self.touch.begin(event);
                *state = GestureState::Possible;
                if self.tap_count > 0
                    && event.timestamp_ms - self.last_tap_ms > self.config.max_delay_ms
                {
                    self.tap_count = 0;
                }
            }
            TouchPhase::Moved => {
                if !self.touch.tracks(event) {
                    return;
                }
                self.touch.position = event.position;
                if self.touch.start.distance_to(event.position) > self.config.max_distance {
                    self.fail(state, GestureState::Failed);
                }
            }
            TouchPhase::Ended => {
                if !self.touch.tracks(event) {
                    return;
                }
                self.touch.active = false;

                let held_ms = event.timestamp_ms - self.touch.start_time_ms;
                if held_ms > self.config.max_duration_ms {
                    self.fail(state, GestureState::Failed);
                    return;
                }

                self.tap_count += 1;
                self.last_tap_ms = event.timestamp_ms;

                if self.tap_count >= self.config.required_taps {
                    *state = GestureState::Ended;
                    callbacks.end(GestureEvent::at(event.position));
                    self.tap_count = 0;
                }
            }
            TouchPhase::Cancelled => {
                if !self.touch.tracks(event) {
                    return;
                }
                self.fail(state, GestureState::Cancelled);
            }
        }
    }

    fn fail(&mut self, state: &mut GestureState, outcome: GestureState) {
        self.touch.active = false;
        self.tap_count = 0;
        *state = outcome;
    }

    pub(crate) fn reset(&mut self) {
        self.touch.clear();
        self.tap_count = 0;
        self.last_tap_ms = 0.0;
    }
}
