use crate::driver::{
    DecayDriver, Driver, DriverKind, SpringDriver, TimingDriver, DEFAULT_DECAY_RATE,
    DEFAULT_DURATION_MS, DEFAULT_FRICTION, DEFAULT_MASS, DEFAULT_TENSION,
};
use crate::easing::Easing;
use kinesis_core::{Callback, ConfigValue, CoreError};

/// Parameters of an animation request. Each driver reads the fields it
/// understands and ignores the rest.
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    pub to_value: f32,
    pub duration_ms: f32,
    pub easing: Easing,
    pub tension: f32,
    pub friction: f32,
    /// Units per millisecond, for spring and decay.
    pub velocity: f32,
    pub mass: f32,
    pub rate: f32,
    /// Fires once with `true` when the animation leaves the ticker.
    pub on_finish: Option<Callback<bool>>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            to_value: 0.0,
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
            tension: DEFAULT_TENSION,
            friction: DEFAULT_FRICTION,
            velocity: 0.0,
            mass: DEFAULT_MASS,
            rate: DEFAULT_DECAY_RATE,
            on_finish: None,
        }
    }
}

impl AnimationConfig {
    pub fn to(to_value: f32) -> Self {
        Self {
            to_value,
            ..Self::default()
        }
    }

    pub fn with_on_finish(mut self, callback: Callback<bool>) -> Self {
        self.on_finish = Some(callback);
        self
    }

    /// Applies one host-supplied key.
    ///
    /// An unknown easing name falls back to the default curve.
    pub fn apply(&mut self, key: &str, value: &ConfigValue) -> Result<(), CoreError> {
        match key {
            "toValue" => self.to_value = value.as_number(key)? as f32,
            "duration" => self.duration_ms = value.as_number(key)? as f32,
            "easing" => {
                let name = value
                    .as_text()
                    .ok_or_else(|| CoreError::invalid(key, "expected an easing name"))?;
                self.easing = Easing::from_name(name).unwrap_or_else(|| {
                    log::warn!("unknown easing `{name}`, using the default curve");
                    Easing::default()
                });
            }
            "tension" => self.tension = value.as_number(key)? as f32,
            "friction" => self.friction = value.as_number(key)? as f32,
            "velocity" => self.velocity = value.as_number(key)? as f32,
            "mass" => {
                let mass = value.as_number(key)?;
                if mass <= 0.0 {
                    return Err(CoreError::invalid(key, "mass must be positive"));
                }
                self.mass = mass as f32;
            }
            "rate" => {
                let rate = value.as_number(key)?;
                if rate <= 0.0 || rate >= 1.0 {
                    return Err(CoreError::invalid(key, "rate must be in (0, 1)"));
                }
                self.rate = rate as f32;
            }
            _ => return Err(CoreError::unknown(key)),
        }
        Ok(())
    }

    pub fn driver(&self, kind: DriverKind) -> Driver {
        match kind {
            DriverKind::Timing => Driver::Timing(TimingDriver {
                duration_ms: self.duration_ms,
                easing: self.easing,
            }),
            DriverKind::Spring => Driver::Spring(SpringDriver {
                tension: self.tension,
                friction: self.friction,
                mass: self.mass,
                velocity: self.velocity,
            }),
            DriverKind::Decay => Driver::Decay(DecayDriver {
                velocity: self.velocity,
                rate: self.rate,
            }),
        }
    }
}
