//! Testing utilities and harness for Kinesis

pub mod recorder;
pub mod touch_script;
pub mod tree_builder;

pub use recorder::{Journal, Recorder};
pub use touch_script::TouchScript;
pub use tree_builder::TreeBuilder;

pub mod prelude {
    pub use crate::recorder::{Journal, Recorder};
    pub use crate::touch_script::TouchScript;
    pub use crate::tree_builder::TreeBuilder;
}
