//! Stateless scroll physics.
//!
//! Velocities are in units per second, time steps in milliseconds. Each step
//! function returns a [`PhysicsStep`]; `finished` tells the caller to leave the
//! current phase.

/// Per-millisecond friction of the default deceleration curve.
pub const DECELERATION_RATE_NORMAL: f32 = 0.998;
pub const DECELERATION_RATE_FAST: f32 = 0.990;

/// Below this speed motion is considered stopped.
pub const VELOCITY_THRESHOLD: f32 = 20.0;

pub const RUBBER_BAND_COEFFICIENT: f32 = 0.55;

/// Natural frequency of the bounce/snap spring, rad/s.
pub const SPRING_OMEGA: f32 = 20.0;
pub const SPRING_SETTLE_DISTANCE: f32 = 0.5;
pub const SPRING_SETTLE_VELOCITY: f32 = 20.0;

/// Release speed needed to flip to the neighbouring page.
pub const PAGE_FLIP_VELOCITY: f32 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsStep {
    pub offset: f32,
    pub velocity: f32,
    pub finished: bool,
}

impl PhysicsStep {
    fn running(offset: f32, velocity: f32) -> Self {
        Self {
            offset,
            velocity,
            finished: false,
        }
    }

    fn done(offset: f32, velocity: f32) -> Self {
        Self {
            offset,
            velocity,
            finished: true,
        }
    }
}

/// One step of exponential friction, `v(t) = v0 * rate^t`.
///
/// Stops (clamped into `[min, max]`) once the speed drops under
/// [`VELOCITY_THRESHOLD`]. Leaving the bounds also stops the step, unclamped
/// and with the remaining velocity, so the caller can hand over to a bounce.
pub fn deceleration_step(
    offset: f32,
    velocity: f32,
    dt_ms: f32,
    rate: f32,
    min: f32,
    max: f32,
) -> PhysicsStep {
    let friction = rate.powf(dt_ms);
    let next_velocity = velocity * friction;

    let ln_rate = rate.ln();
    let displacement = if ln_rate.abs() > f32::EPSILON {
        velocity * (friction - 1.0) / (ln_rate * 1000.0)
    } else {
        velocity * dt_ms / 1000.0
    };
    let next_offset = offset + displacement;

    if next_velocity.abs() < VELOCITY_THRESHOLD {
        return PhysicsStep::done(next_offset.clamp(min, max), 0.0);
    }
    if next_offset < min || next_offset > max {
        return PhysicsStep::done(next_offset, next_velocity);
    }
    PhysicsStep::running(next_offset, next_velocity)
}

/// Critically damped spring with the closed-form solution
/// `x(t) = (C1 + C2 t) e^(-ωt) + target`.
///
/// Stable for any step size. A non-positive `omega` falls back to
/// [`SPRING_OMEGA`].
pub fn spring_step(offset: f32, velocity: f32, target: f32, dt_ms: f32, omega: f32) -> PhysicsStep {
    let omega = if omega > 0.0 { omega } else { SPRING_OMEGA };
    let t = dt_ms.max(0.0) / 1000.0;
    let c1 = offset - target;
    let c2 = velocity + omega * c1;
    let decay = (-omega * t).exp();

    let next_offset = (c1 + c2 * t) * decay + target;
    let next_velocity = (c2 - omega * (c1 + c2 * t)) * decay;

    if (next_offset - target).abs() < SPRING_SETTLE_DISTANCE
        && next_velocity.abs() < SPRING_SETTLE_VELOCITY
    {
        return PhysicsStep::done(target, 0.0);
    }
    PhysicsStep::running(next_offset, next_velocity)
}

/// Resistance applied to drag deltas past a boundary. The further out, the
/// smaller the returned delta.
pub fn rubber_band_clamp(delta: f32, overscroll: f32, viewport: f32) -> f32 {
    if viewport <= 0.0 {
        return 0.0;
    }
    let c = RUBBER_BAND_COEFFICIENT;
    delta * c / (1.0 + overscroll.abs() * c / viewport)
}

/// Where a fling under `rate` would come to rest.
pub fn projected_rest(offset: f32, velocity: f32, rate: f32) -> f32 {
    let ln_rate = rate.ln();
    if ln_rate.abs() > f32::EPSILON && velocity.abs() > VELOCITY_THRESHOLD {
        offset + velocity / (-ln_rate * 1000.0)
    } else {
        offset
    }
}

/// Nearest multiple of `interval` to the projected resting position.
pub fn find_snap_target(
    offset: f32,
    velocity: f32,
    interval: f32,
    min: f32,
    max: f32,
    rate: f32,
) -> f32 {
    if interval <= 0.0 {
        return offset.clamp(min, max);
    }
    let projected = projected_rest(offset, velocity, rate);
    ((projected / interval).round() * interval).clamp(min, max)
}

/// The current page, or its neighbour when the release is fast enough.
pub fn find_page_target(offset: f32, velocity: f32, viewport: f32, min: f32, max: f32) -> f32 {
    if viewport <= 0.0 {
        return offset.clamp(min, max);
    }
    let current = (offset / viewport).round();
    let target = if velocity > PAGE_FLIP_VELOCITY {
        current + 1.0
    } else if velocity < -PAGE_FLIP_VELOCITY {
        current - 1.0
    } else {
        current
    };
    let last_page = (max / viewport).ceil().max(0.0);
    (target.clamp(0.0, last_page) * viewport).clamp(min, max)
}

#[cfg(test)]
#[path = "../tests/physics_tests.rs"]
mod tests;
