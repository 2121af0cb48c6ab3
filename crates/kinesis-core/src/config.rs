//! Loosely typed values coming from the host configuration surface.

use crate::error::CoreError;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ConfigValue {
    /// Numbers are truthy when non-zero, as the scripting layer treats them.
    pub fn as_bool(&self, key: &str) -> Result<bool, CoreError> {
        match self {
            ConfigValue::Bool(value) => Ok(*value),
            ConfigValue::Number(value) => Ok(*value != 0.0),
            ConfigValue::Text(_) => Err(CoreError::invalid(key, "expected a boolean")),
        }
    }

    pub fn as_number(&self, key: &str) -> Result<f64, CoreError> {
        match self {
            ConfigValue::Number(value) if value.is_finite() => Ok(*value),
            ConfigValue::Number(_) => Err(CoreError::invalid(key, "expected a finite number")),
            _ => Err(CoreError::invalid(key, "expected a number")),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<f32> for ConfigValue {
    fn from(value: f32) -> Self {
        ConfigValue::Number(value as f64)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Number(value as f64)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_owned())
    }
}
