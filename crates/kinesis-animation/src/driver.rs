//! Value drivers. Each one advances `current` toward or away from its target
//! and reports when it is done.

use crate::easing::Easing;

pub const DEFAULT_DURATION_MS: f32 = 300.0;
pub const DEFAULT_TENSION: f32 = 170.0;
pub const DEFAULT_FRICTION: f32 = 26.0;
pub const DEFAULT_MASS: f32 = 1.0;
pub const DEFAULT_DECAY_RATE: f32 = 0.998;

/// Largest step the spring integrates in one tick.
pub const MAX_SPRING_STEP_MS: f64 = 32.0;

const SPRING_SETTLE_DISTANCE: f32 = 0.5;
/// Units per millisecond.
const SPRING_SETTLE_VELOCITY: f32 = 0.01;
/// Units per millisecond.
const DECAY_STOP_VELOCITY: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    Timing,
    Spring,
    Decay,
}

impl DriverKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "timing" => Some(DriverKind::Timing),
            "spring" => Some(DriverKind::Spring),
            "decay" => Some(DriverKind::Decay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingDriver {
    pub duration_ms: f32,
    pub easing: Easing,
}

impl Default for TimingDriver {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

/// Damped spring integrated with one explicit Euler step per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringDriver {
    pub tension: f32,
    pub friction: f32,
    pub mass: f32,
    /// Units per millisecond.
    pub velocity: f32,
}

impl Default for SpringDriver {
    fn default() -> Self {
        Self {
            tension: DEFAULT_TENSION,
            friction: DEFAULT_FRICTION,
            mass: DEFAULT_MASS,
            velocity: 0.0,
        }
    }
}

/// Exponential velocity decay, `v(t) = v0 * rate^t`, with no target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayDriver {
    /// Initial velocity in units per millisecond.
    pub velocity: f32,
    /// Per-millisecond retention in (0, 1).
    pub rate: f32,
}

impl Default for DecayDriver {
    fn default() -> Self {
        Self {
            velocity: 0.0,
            rate: DEFAULT_DECAY_RATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Driver {
    Timing(TimingDriver),
    Spring(SpringDriver),
    Decay(DecayDriver),
}

impl Driver {
    pub fn kind(&self) -> DriverKind {
        match self {
            Driver::Timing(_) => DriverKind::Timing,
            Driver::Spring(_) => DriverKind::Spring,
            Driver::Decay(_) => DriverKind::Decay,
        }
    }
}

/// Outcome of one driver step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DriverStep {
    pub value: f32,
    pub finished: bool,
}

impl TimingDriver {
    pub(crate) fn step(&self, from: f32, to: f32, elapsed_ms: f32) -> DriverStep {
        if self.duration_ms <= 0.0 {
            return DriverStep {
                value: to,
                finished: true,
            };
        }
        let t = (elapsed_ms / self.duration_ms).min(1.0);
        if t >= 1.0 {
            return DriverStep {
                value: to,
                finished: true,
            };
        }
        DriverStep {
            value: from + (to - from) * self.easing.transform(t),
            finished: false,
        }
    }
}

impl SpringDriver {
    pub(crate) fn step(&mut self, current: f32, to: f32, dt_ms: f32) -> DriverStep {
        let mass = if self.mass > 0.0 { self.mass } else { DEFAULT_MASS };
        let dt = dt_ms / 1000.0;
        let displacement = current - to;

        let mut velocity = self.velocity * 1000.0;
        let acceleration = (-self.tension * displacement - self.friction * velocity) / mass;
        velocity += acceleration * dt;
        self.velocity = velocity / 1000.0;

        let value = current + self.velocity * dt_ms;
        if (value - to).abs() < SPRING_SETTLE_DISTANCE && self.velocity.abs() < SPRING_SETTLE_VELOCITY {
            self.velocity = 0.0;
            return DriverStep {
                value: to,
                finished: true,
            };
        }
        DriverStep {
            value,
            finished: false,
        }
    }
}

impl DecayDriver {
    pub(crate) fn step(&self, from: f32, elapsed_ms: f32) -> DriverStep {
        if self.rate <= 0.0 || self.rate >= 1.0 {
            return DriverStep {
                value: from,
                finished: true,
            };
        }
        let retained = self.rate.powf(elapsed_ms);
        DriverStep {
            value: from + self.velocity * (1.0 - retained) / (1.0 - self.rate),
            finished: (self.velocity * retained).abs() < DECAY_STOP_VELOCITY,
        }
    }
}
