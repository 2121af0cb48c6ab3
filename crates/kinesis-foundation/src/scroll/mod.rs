//! Scroll physics and the per-node scroll engines built on it.

mod config;
mod engine;
mod manager;
pub mod physics;

pub use config::{DecelerationRate, ScrollConfig};
pub use engine::{
    ScrollCallbackKind, ScrollCallbacks, ScrollEngine, ScrollEngineId, ScrollPhase,
};
pub use manager::ScrollEngineManager;
pub use physics::PhysicsStep;
