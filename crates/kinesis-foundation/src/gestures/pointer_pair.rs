//! Two-finger tracking shared by pinch and rotation.

use crate::input::{PointerId, TouchEvent, TouchPoint};
use kinesis_core::Point;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PointerPair {
    slots: [TouchPoint; 2],
}

impl PointerPair {
    /// Starts tracking the event's pointer in the first free slot.
    ///
    /// Returns `true` when this touch made the pair complete.
    pub(crate) fn add(&mut self, event: &TouchEvent) -> bool {
        if self.slots.iter().any(|slot| slot.tracks(event)) {
            return false;
        }
        match self.slots.iter_mut().find(|slot| !slot.active) {
            Some(slot) => {
                slot.begin(event);
                self.count() == 2
            }
            None => false,
        }
    }

    /// Returns whether the pointer is one of the pair.
    pub(crate) fn update(&mut self, event: &TouchEvent) -> bool {
        match self.slots.iter_mut().find(|slot| slot.tracks(event)) {
            Some(slot) => {
                slot.position = event.position;
                slot.last_time_ms = event.timestamp_ms;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, pointer_id: PointerId) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|slot| slot.active && slot.pointer_id == pointer_id)
        {
            Some(slot) => {
                slot.clear();
                true
            }
            None => false,
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.count() == 2
    }

    pub(crate) fn distance(&self) -> f32 {
        let [a, b] = &self.slots;
        a.position.distance_to(b.position)
    }

    /// Angle of the vector from the first to the second pointer.
    pub(crate) fn angle(&self) -> f32 {
        let [a, b] = &self.slots;
        let delta = b.position - a.position;
        delta.y.atan2(delta.x)
    }

    pub(crate) fn focal(&self) -> Point {
        let [a, b] = &self.slots;
        a.position.midpoint(b.position)
    }

    pub(crate) fn clear(&mut self) {
        self.slots = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_pointer_is_ignored() {
        let mut pair = PointerPair::default();
        assert!(!pair.add(&TouchEvent::began(0.0, 0.0, 1, 0.0)));
        assert!(pair.add(&TouchEvent::began(10.0, 0.0, 2, 0.0)));
        assert!(!pair.add(&TouchEvent::began(50.0, 50.0, 3, 0.0)));
        assert_eq!(pair.distance(), 10.0);
    }

    #[test]
    fn freed_first_slot_is_reused() {
        let mut pair = PointerPair::default();
        pair.add(&TouchEvent::began(0.0, 0.0, 1, 0.0));
        pair.add(&TouchEvent::began(10.0, 0.0, 2, 0.0));
        assert!(pair.remove(1));
        assert_eq!(pair.count(), 1);

        assert!(pair.add(&TouchEvent::began(0.0, 10.0, 3, 0.0)));
        assert!(pair.update(&TouchEvent::moved(10.0, 10.0, 2, 5.0)));
        assert_eq!(pair.focal(), Point::new(5.0, 10.0));
    }
}
