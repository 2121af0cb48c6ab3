use super::pointer_pair::PointerPair;
use super::{GestureCallbacks, GestureEvent, GestureState};
use crate::gesture_constants::MIN_PINCH_DISTANCE;
use crate::input::{TouchEvent, TouchPhase};

/// Two-finger scale. `scale` is the current pointer distance over the
/// distance when the second finger went down.
#[derive(Clone, Debug)]
pub struct PinchRecognizer {
    pointers: PointerPair,
    initial_distance: f32,
}

impl Default for PinchRecognizer {
    fn default() -> Self {
        Self {
            pointers: PointerPair::default(),
            initial_distance: MIN_PINCH_DISTANCE,
        }
    }
}

impl PinchRecognizer {
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
                self.initial_distance = self.pointers.distance().max(MIN_PINCH_DISTANCE);
                *state = GestureState::Began;
                callbacks.start(GestureEvent {
                    scale: 1.0,
                    ..self.event(2)
                });
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

    fn event(&self, pointer_count: usize) -> GestureEvent {
        let focal = self.pointers.focal();
        GestureEvent {
            scale: self.pointers.distance() / self.initial_distance,
            focal,
            pointer_count,
            ..GestureEvent::at(focal)
        }
    }

    pub(crate) fn reset(&mut self) {
        self.pointers.clear();
        self.initial_distance = MIN_PINCH_DISTANCE;
    }
}
