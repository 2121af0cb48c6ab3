//! Gesture recognizers.
//!
//! The recognizer set is closed, so it is modelled as a tagged variant
//! ([`RecognizerKind`]) wrapped by [`GestureRecognizer`], which owns the
//! shared identity, state and host callbacks. Every variant follows the same
//! state machine:
//!
//! `Possible -> Began -> Changed -> Ended | Cancelled | Failed`
//!
//! Host callbacks only fire at state transitions and on updates while
//! `Changed`, never for touches the recognizer ignores.

mod pan;
mod pinch;
mod pointer_pair;
mod rotation;
mod tap;

pub use pan::{PanConfig, PanRecognizer};
pub use pinch::PinchRecognizer;
pub use rotation::RotationRecognizer;
pub use tap::{TapConfig, TapRecognizer};

use crate::input::TouchEvent;
use kinesis_core::{fire, Callback, ConfigValue, CoreError, NodeId, Point};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureId(pub u32);

impl fmt::Display for GestureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GestureState {
    /// Not yet recognized.
    #[default]
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    /// Touches did not meet the recognizer's criteria.
    Failed,
}

/// Payload handed to gesture callbacks. Built fresh for every invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent {
    pub position: Point,
    pub absolute: Point,
    pub translation: Point,
    /// Units per second.
    pub velocity: Point,
    pub scale: f32,
    /// Radians.
    pub rotation: f32,
    pub focal: Point,
    pub pointer_count: usize,
}

impl Default for GestureEvent {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            absolute: Point::ZERO,
            translation: Point::ZERO,
            velocity: Point::ZERO,
            scale: 1.0,
            rotation: 0.0,
            focal: Point::ZERO,
            pointer_count: 0,
        }
    }
}

impl GestureEvent {
    pub(crate) fn at(position: Point) -> Self {
        Self {
            position,
            absolute: position,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureType {
    Pan,
    Pinch,
    Rotation,
    Tap,
}

impl GestureType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pan" => Some(GestureType::Pan),
            "pinch" => Some(GestureType::Pinch),
            "rotation" => Some(GestureType::Rotation),
            "tap" => Some(GestureType::Tap),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GestureType::Pan => "pan",
            GestureType::Pinch => "pinch",
            GestureType::Rotation => "rotation",
            GestureType::Tap => "tap",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureCallbackKind {
    Start,
    Update,
    End,
}

impl GestureCallbackKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "onStart" => Some(GestureCallbackKind::Start),
            "onUpdate" => Some(GestureCallbackKind::Update),
            "onEnd" => Some(GestureCallbackKind::End),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GestureCallbacks {
    pub on_start: Option<Callback<GestureEvent>>,
    pub on_update: Option<Callback<GestureEvent>>,
    pub on_end: Option<Callback<GestureEvent>>,
}

impl GestureCallbacks {
    pub(crate) fn start(&self, event: GestureEvent) {
        fire(&self.on_start, event);
    }

    pub(crate) fn update(&self, event: GestureEvent) {
        fire(&self.on_update, event);
    }

    pub(crate) fn end(&self, event: GestureEvent) {
        fire(&self.on_end, event);
    }
}

#[derive(Clone, Debug)]
pub enum RecognizerKind {
    Pan(PanRecognizer),
    Pinch(PinchRecognizer),
    Rotation(RotationRecognizer),
    Tap(TapRecognizer),
}

impl RecognizerKind {
    pub fn new(gesture_type: GestureType) -> Self {
        match gesture_type {
            GestureType::Pan => RecognizerKind::Pan(PanRecognizer::default()),
            GestureType::Pinch => RecognizerKind::Pinch(PinchRecognizer::default()),
            GestureType::Rotation => RecognizerKind::Rotation(RotationRecognizer::default()),
            GestureType::Tap => RecognizerKind::Tap(TapRecognizer::default()),
        }
    }

    pub fn gesture_type(&self) -> GestureType {
        match self {
            RecognizerKind::Pan(_) => GestureType::Pan,
            RecognizerKind::Pinch(_) => GestureType::Pinch,
            RecognizerKind::Rotation(_) => GestureType::Rotation,
            RecognizerKind::Tap(_) => GestureType::Tap,
        }
    }
}

/// A recognizer attached to one node.
#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    id: GestureId,
    node: NodeId,
    state: GestureState,
    callbacks: GestureCallbacks,
    kind: RecognizerKind,
}

impl GestureRecognizer {
    pub fn new(id: GestureId, node: NodeId, gesture_type: GestureType) -> Self {
        Self {
            id,
            node,
            state: GestureState::Possible,
            callbacks: GestureCallbacks::default(),
            kind: RecognizerKind::new(gesture_type),
        }
    }

    pub fn id(&self) -> GestureId {
        self.id
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn gesture_type(&self) -> GestureType {
        self.kind.gesture_type()
    }

    pub fn kind(&self) -> &RecognizerKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut RecognizerKind {
        &mut self.kind
    }

    pub fn set_callback(&mut self, kind: GestureCallbackKind, callback: Callback<GestureEvent>) {
        let slot = match kind {
            GestureCallbackKind::Start => &mut self.callbacks.on_start,
            GestureCallbackKind::Update => &mut self.callbacks.on_update,
            GestureCallbackKind::End => &mut self.callbacks.on_end,
        };
        *slot = Some(callback);
    }

    /// Feeds one raw touch sample through the variant's state machine.
    pub fn on_touch_event(&mut self, event: &TouchEvent) {
        let previous = self.state;
        let state = &mut self.state;
        let callbacks = &self.callbacks;
        match &mut self.kind {
            RecognizerKind::Pan(pan) => pan.on_touch_event(event, state, callbacks),
            RecognizerKind::Pinch(pinch) => pinch.on_touch_event(event, state, callbacks),
            RecognizerKind::Rotation(rotation) => {
                rotation.on_touch_event(event, state, callbacks)
            }
            RecognizerKind::Tap(tap) => tap.on_touch_event(event, state, callbacks),
        }
        if previous != self.state {
            log::debug!(
                "{} gesture {} on node {}: {:?} -> {:?}",
                self.gesture_type().name(),
                self.id,
                self.node,
                previous,
                self.state
            );
        }
    }

    /// Returns to `Possible` between independent gesture episodes.
    pub fn reset(&mut self) {
        self.state = GestureState::Possible;
        match &mut self.kind {
            RecognizerKind::Pan(pan) => pan.reset(),
            RecognizerKind::Pinch(pinch) => pinch.reset(),
            RecognizerKind::Rotation(rotation) => rotation.reset(),
            RecognizerKind::Tap(tap) => tap.reset(),
        }
    }

    /// Applies a numeric threshold from the host.
    ///
    /// Keys that belong to another recognizer type are ignored.
    pub fn apply_config(&mut self, key: &str, value: &ConfigValue) -> Result<(), CoreError> {
        let applies = match key {
            "activationThreshold" => {
                let threshold = non_negative(key, value)?;
                if let RecognizerKind::Pan(pan) = &mut self.kind {
                    pan.config.activation_threshold = threshold as f32;
                    true
                } else {
                    false
                }
            }
            "numberOfTaps" => {
                let taps = value.as_number(key)?;
                if taps < 1.0 {
                    return Err(CoreError::invalid(key, "at least one tap is required"));
                }
                self.tap_config(|config| config.required_taps = taps as u32)
            }
            "maxDistance" => {
                let distance = non_negative(key, value)?;
                self.tap_config(|config| config.max_distance = distance as f32)
            }
            "maxDurationMs" => {
                let duration = non_negative(key, value)?;
                self.tap_config(|config| config.max_duration_ms = duration)
            }
            "maxDelayMs" => {
                let delay = non_negative(key, value)?;
                self.tap_config(|config| config.max_delay_ms = delay)
            }
            _ => return Err(CoreError::unknown(key)),
        };
        if !applies {
            log::debug!(
                "config `{key}` does not apply to {} gesture {}",
                self.gesture_type().name(),
                self.id
            );
        }
        Ok(())
    }

    fn tap_config(&mut self, update: impl FnOnce(&mut TapConfig)) -> bool {
        if let RecognizerKind::Tap(tap) = &mut self.kind {
            update(&mut tap.config);
            true
        } else {
            false
        }
    }
}

fn non_negative(key: &str, value: &ConfigValue) -> Result<f64, CoreError> {
    let number = value.as_number(key)?;
    if number < 0.0 {
        return Err(CoreError::invalid(key, "must not be negative"));
    }
    Ok(number)
}

#[cfg(test)]
#[path = "../tests/gesture_tests.rs"]
mod tests;
