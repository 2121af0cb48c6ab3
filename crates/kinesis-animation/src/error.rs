use kinesis_core::{CoreError, NodeId};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    UnknownProperty { name: String },
    UnknownDriver { name: String },
    MissingNode { id: NodeId },
    Config(CoreError),
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationError::UnknownProperty { name } => {
                write!(f, "property `{name}` cannot be animated")
            }
            AnimationError::UnknownDriver { name } => write!(f, "unknown animation driver `{name}`"),
            AnimationError::MissingNode { id } => write!(f, "node {id} missing"),
            AnimationError::Config(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AnimationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnimationError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoreError> for AnimationError {
    fn from(err: CoreError) -> Self {
        AnimationError::Config(err)
    }
}
