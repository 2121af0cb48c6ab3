use crate::tree::NodeId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    MissingNode { id: NodeId },
    UnknownKey { key: String },
    InvalidConfig { key: String, reason: &'static str },
}

impl CoreError {
    pub fn invalid(key: &str, reason: &'static str) -> Self {
        CoreError::InvalidConfig {
            key: key.to_owned(),
            reason,
        }
    }

    pub fn unknown(key: &str) -> Self {
        CoreError::UnknownKey {
            key: key.to_owned(),
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::MissingNode { id } => write!(f, "node {id} missing"),
            CoreError::UnknownKey { key } => write!(f, "unknown config key `{key}`"),
            CoreError::InvalidConfig { key, reason } => {
                write!(f, "invalid value for `{key}`: {reason}")
            }
        }
    }
}

impl std::error::Error for CoreError {}
