use super::pointer_pair::PointerPair;
use super::{GestureCallbacks, GestureEvent, GestureState};
use crate::input::{TouchEvent, TouchPhase};

/// Two-finger rotation in radians: the current `atan2` angle of the finger
/// vector minus its angle when the second finger went down.
///
/// The difference is not normalized, so crossing the `atan2` seam at ±π
/// shows up as a jump of a full turn.
#[derive(Clone, Debug, Default)]
pub struct RotationRecognizer {
    pointers: PointerPair,
    initial_angle: f32,
}

impl RotationRecognizer {
    pub(crate) fn on_touch_event(
        &mut self,
        event: &TouchEvent,
        state: &mut GestureState,
        callbacks: &GestureCallbacks,
    ) {
        match event.phase {
            TouchPhase::Began => {
                if !self.pointers.add(event) {
                    return;
                }
                self.initial_angle = self.pointers.angle();
                *state = GestureState::Began;
                callbacks.start(self.event(2));
                *state = GestureState::Changed;
            }
            TouchPhase::Moved => {
                if self.pointers.update(event)
                    && *state == GestureState::Changed
                    && self.pointers.is_complete()
                {
                    callbacks.update(self.event(2));
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if !self.pointers.update(event) {
                    return;
                }
                if *state == GestureState::Changed && self.pointers.is_complete() {
                    callbacks.end(self.event(1));
                    *state = GestureState::Ended;
                }
                self.pointers.remove(event.pointer_id);
            }
        }
    }

    fn rotation(&self) -> f32 {
        self.pointers.angle() - self.initial_angle
    }

    fn event(&self, pointer_count: usize) -> GestureEvent {
        let focal = self.pointers.focal();
        GestureEvent {
            rotation: self.rotation(),
            focal,
            pointer_count,
            ..GestureEvent::at(focal)
        }
    }

    pub(crate) fn reset(&mut self) {
        self.pointers.clear();
        self.initial_angle = 0.0;
    }
}
