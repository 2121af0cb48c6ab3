use crate::driver::{Driver, DriverStep, MAX_SPRING_STEP_MS};
use crate::property::AnimatedProperty;
use kinesis_core::{Callback, FrameTime, NodeId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u32);

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One property animation bound to a node.
///
/// Time starts on the first tick, not at creation, so an animation started
/// between frames does not jump.
#[derive(Debug)]
pub struct Animation {
    node: NodeId,
    property: AnimatedProperty,
    driver: Driver,
    from: f32,
    to: f32,
    current: f32,
    start_time: Option<f64>,
    frame_time: FrameTime,
    finished: bool,
    cancelled: bool,
    on_finish: Option<Callback<bool>>,
}

impl Animation {
    pub fn new(node: NodeId, property: AnimatedProperty, driver: Driver, from: f32, to: f32) -> Self {
        Self {
            node,
            property,
            driver,
            from,
            to,
            current: from,
            start_time: None,
            frame_time: FrameTime::with_limits(MAX_SPRING_STEP_MS, 0.0),
            finished: false,
            cancelled: false,
            on_finish: None,
        }
    }

    pub fn with_on_finish(mut self, callback: Option<Callback<bool>>) -> Self {
        self.on_finish = callback;
        self
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn property(&self) -> AnimatedProperty {
        self.property
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn from_value(&self) -> f32 {
        self.from
    }

    pub fn to_value(&self) -> f32 {
        self.to
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stops the animation; the owner removes it on its next pass.
    pub fn cancel(&mut self) {
        if !self.finished {
            self.finished = true;
            self.cancelled = true;
        }
    }

    pub(crate) fn take_on_finish(&mut self) -> Option<Callback<bool>> {
        self.on_finish.take()
    }

    /// Advances to `timestamp` and returns the new value.
    pub fn tick(&mut self, timestamp: f64) -> f32 {
        if self.finished {
            return self.current;
        }
        let start = *self.start_time.get_or_insert(timestamp);
        let elapsed = (timestamp - start).max(0.0) as f32;
        let dt = self.frame_time.advance(timestamp) as f32;

        let step = match &mut self.driver {
            Driver::Timing(timing) => timing.step(self.from, self.to, elapsed),
            Driver::Spring(spring) => {
                if dt > 0.0 {
                    spring.step(self.current, self.to, dt)
                } else {
                    DriverStep {
                        value: self.current,
                        finished: false,
                    }
                }
            }
            Driver::Decay(decay) => decay.step(self.from, elapsed),
        };
        self.current = step.value;
        self.finished = step.finished;
        self.current
    }
}
