//! Touch dispatch, gesture recognition and scroll physics.
//!
//! Everything here is driven by the caller: touches arrive as [`TouchEvent`]s
//! carrying their own timestamps, and scroll engines advance only when ticked
//! with a frame timestamp. Node state is read from and written to a
//! [`kinesis_core::NodeTree`] passed into each call.

mod error;
pub mod gesture_constants;
pub mod gestures;
pub mod input;
pub mod scroll;
pub mod velocity_tracker;

pub use error::InputError;
pub use gestures::{
    GestureCallbackKind, GestureEvent, GestureId, GestureRecognizer, GestureState, GestureType,
};
pub use input::{PressEventKind, TouchDispatcher, TouchEvent, TouchPhase};
pub use scroll::{
    DecelerationRate, ScrollCallbackKind, ScrollConfig, ScrollEngine, ScrollEngineId,
    ScrollEngineManager, ScrollPhase,
};
pub use velocity_tracker::VelocityTracker;

pub mod prelude {
    pub use crate::gestures::{GestureEvent, GestureState, GestureType};
    pub use crate::input::{TouchDispatcher, TouchEvent, TouchPhase};
    pub use crate::scroll::{ScrollEngine, ScrollEngineManager, ScrollPhase};
}
