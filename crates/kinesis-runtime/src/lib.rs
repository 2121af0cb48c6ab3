//! Frame driver and host surface for the Kinesis interaction core.
//!
//! [`Runtime`] is the single owner of the touch dispatcher, the scroll
//! engines, the animation ticker and the node tree. Per display refresh the
//! host calls [`Runtime::on_vsync`], which ticks scroll engines and then
//! animations. [`host::Host`] wraps it for scripting bridges that expect
//! sentinel results instead of errors.

pub mod clock;
mod error;
pub mod frame_stats;
pub mod host;
mod runtime;

pub use clock::MonotonicClock;
pub use error::RuntimeError;
pub use frame_stats::{FrameStats, FrameStatsSnapshot};
pub use host::Host;
pub use runtime::{FrameReport, Runtime};

pub mod prelude {
    pub use crate::host::Host;
    pub use crate::runtime::{FrameReport, Runtime};
    pub use kinesis_animation::prelude::*;
    pub use kinesis_core::prelude::*;
    pub use kinesis_foundation::prelude::*;
}
