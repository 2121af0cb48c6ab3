//! Shared contracts for the Kinesis interaction core.
//!
//! This crate holds the pieces every engine depends on: geometry, the node
//! tree interface, weak host callbacks, frame-delta clamping and the error
//! type used by the configuration surface.

pub mod callback;
pub mod collections;
pub mod config;
mod error;
pub mod frame_time;
mod geometry;
pub mod tree;

pub use callback::{fire, Callback, CallbackHandle};
pub use config::ConfigValue;
pub use error::CoreError;
pub use frame_time::FrameTime;
pub use geometry::*;
pub use tree::{Layout, NodeId, NodeKind, NodeTree, SceneNode, SceneTree};

pub mod prelude {
    pub use crate::callback::{Callback, CallbackHandle};
    pub use crate::geometry::{CornerRadii, Point, Rect, Size};
    pub use crate::tree::{NodeId, NodeKind, NodeTree, SceneTree};
}
