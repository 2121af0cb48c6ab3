//! Raw touch input: event types, pointer capture and the dispatcher that
//! routes touches to presses and gesture recognizers.

mod dispatcher;
mod hit_path_tracker;
mod types;

pub use dispatcher::{PressCallbacks, PressEventKind, TouchDispatcher};
pub use hit_path_tracker::HitPathTracker;
pub use types::{PointerId, TouchEvent, TouchPhase, TouchPoint};
