use crate::gestures::GestureId;
use crate::scroll::ScrollEngineId;
use kinesis_core::CoreError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    UnknownGestureType { name: String },
    UnknownEvent { name: String },
    MissingGesture { id: GestureId },
    MissingEngine { id: ScrollEngineId },
    InvalidPhase { raw: i32 },
    Core(CoreError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::UnknownGestureType { name } => write!(f, "unknown gesture type `{name}`"),
            InputError::UnknownEvent { name } => write!(f, "unknown callback event `{name}`"),
            InputError::MissingGesture { id } => write!(f, "gesture {id} missing"),
            InputError::MissingEngine { id } => write!(f, "scroll engine {id} missing"),
            InputError::InvalidPhase { raw } => write!(f, "invalid touch phase {raw}"),
            InputError::Core(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Core(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoreError> for InputError {
    fn from(err: CoreError) -> Self {
        InputError::Core(err)
    }
}
