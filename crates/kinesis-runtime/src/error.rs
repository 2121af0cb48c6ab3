use kinesis_animation::AnimationError;
use kinesis_core::CoreError;
use kinesis_foundation::InputError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    Input(InputError),
    Animation(AnimationError),
    Core(CoreError),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Input(err) => err.fmt(f),
            RuntimeError::Animation(err) => err.fmt(f),
            RuntimeError::Core(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Input(err) => Some(err),
            RuntimeError::Animation(err) => Some(err),
            RuntimeError::Core(err) => Some(err),
        }
    }
}

impl From<InputError> for RuntimeError {
    fn from(err: InputError) -> Self {
        RuntimeError::Input(err)
    }
}

impl From<AnimationError> for RuntimeError {
    fn from(err: AnimationError) -> Self {
        RuntimeError::Animation(err)
    }
}

impl From<CoreError> for RuntimeError {
    fn from(err: CoreError) -> Self {
        RuntimeError::Core(err)
    }
}
