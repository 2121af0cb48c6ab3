use super::physics::{DECELERATION_RATE_FAST, DECELERATION_RATE_NORMAL};
use kinesis_core::{ConfigValue, CoreError};

/// Friction preset for flings.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DecelerationRate {
    #[default]
    Normal,
    Fast,
    /// Raw per-millisecond rate in (0, 1].
    Custom(f32),
}

impl DecelerationRate {
    pub fn per_ms(self) -> f32 {
        match self {
            DecelerationRate::Normal => DECELERATION_RATE_NORMAL,
            DecelerationRate::Fast => DECELERATION_RATE_FAST,
            DecelerationRate::Custom(rate) => rate,
        }
    }

    fn parse(key: &str, value: &ConfigValue) -> Result<Self, CoreError> {
        if let Some(name) = value.as_text() {
            return match name {
                "normal" => Ok(DecelerationRate::Normal),
                "fast" => Ok(DecelerationRate::Fast),
                _ => Err(CoreError::invalid(key, "expected \"normal\", \"fast\" or a number")),
            };
        }
        let rate = value.as_number(key)?;
        if rate <= 0.0 || rate > 1.0 {
            return Err(CoreError::invalid(key, "rate must be in (0, 1]"));
        }
        Ok(DecelerationRate::Custom(rate as f32))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollConfig {
    pub horizontal: bool,
    /// Rubber-band past the edges and spring back.
    pub bounces: bool,
    pub scroll_enabled: bool,
    pub paging_enabled: bool,
    /// Snap the resting offset to multiples of this; 0 disables snapping.
    pub snap_interval: f32,
    pub deceleration_rate: DecelerationRate,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            horizontal: false,
            bounces: true,
            scroll_enabled: true,
            paging_enabled: false,
            snap_interval: 0.0,
            deceleration_rate: DecelerationRate::Normal,
        }
    }
}

impl ScrollConfig {
    /// Applies one host-supplied key. Rejected values leave the config as is.
    pub fn apply(&mut self, key: &str, value: &ConfigValue) -> Result<(), CoreError> {
        match key {
            "horizontal" => self.horizontal = value.as_bool(key)?,
            "bounces" => self.bounces = value.as_bool(key)?,
            "scrollEnabled" => self.scroll_enabled = value.as_bool(key)?,
            "pagingEnabled" => self.paging_enabled = value.as_bool(key)?,
            "snapToInterval" => {
                let interval = value.as_number(key)?;
                if interval < 0.0 {
                    return Err(CoreError::invalid(key, "must not be negative"));
                }
                self.snap_interval = interval as f32;
            }
            "decelerationRate" => self.deceleration_rate = DecelerationRate::parse(key, value)?,
            _ => return Err(CoreError::unknown(key)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deceleration_rate_accepts_presets_and_numbers() {
        let mut config = ScrollConfig::default();
        config.apply("decelerationRate", &"fast".into()).unwrap();
        assert_eq!(config.deceleration_rate.per_ms(), DECELERATION_RATE_FAST);

        config.apply("decelerationRate", &ConfigValue::Number(0.95)).unwrap();
        assert_eq!(config.deceleration_rate, DecelerationRate::Custom(0.95));

        assert!(config.apply("decelerationRate", &ConfigValue::Number(1.5)).is_err());
        assert!(config.apply("decelerationRate", &"slow".into()).is_err());
        assert_eq!(config.deceleration_rate, DecelerationRate::Custom(0.95));
    }

    #[test]
    fn unknown_keys_are_reported() {
        let mut config = ScrollConfig::default();
        assert_eq!(
            config.apply("overscrollMode", &true.into()),
            Err(CoreError::unknown("overscrollMode"))
        );
    }

    #[test]
    fn booleans_and_intervals() {
        let mut config = ScrollConfig::default();
        config.apply("pagingEnabled", &true.into()).unwrap();
        config.apply("bounces", &false.into()).unwrap();
        config.apply("snapToInterval", &ConfigValue::Number(50.0)).unwrap();

        assert!(config.paging_enabled);
        assert!(!config.bounces);
        assert_eq!(config.snap_interval, 50.0);
        assert!(config.apply("snapToInterval", &ConfigValue::Number(-1.0)).is_err());
    }
}
