//! Frame-driven property animations.
//!
//! An [`AnimationTicker`] owns the running [`Animation`]s and advances them
//! once per display refresh, writing each value straight into the node's
//! property and marking the node dirty.

mod animation;
mod config;
pub mod driver;
pub mod easing;
mod error;
mod property;
mod ticker;

pub use animation::{Animation, AnimationId};
pub use config::AnimationConfig;
pub use driver::{DecayDriver, Driver, DriverKind, SpringDriver, TimingDriver};
pub use easing::Easing;
pub use error::AnimationError;
pub use property::AnimatedProperty;
pub use ticker::AnimationTicker;

pub mod prelude {
    pub use crate::animation::AnimationId;
    pub use crate::config::AnimationConfig;
    pub use crate::property::AnimatedProperty;
    pub use crate::ticker::AnimationTicker;
}
