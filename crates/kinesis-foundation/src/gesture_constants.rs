//! Shared gesture thresholds, in logical points and milliseconds.

/// Movement from the start point before a pan recognizer activates.
pub const PAN_ACTIVATION_THRESHOLD: f32 = 10.0;

/// Maximum movement allowed during a single tap.
pub const TAP_MAX_DISTANCE: f32 = 15.0;

/// Maximum hold duration of a single tap.
pub const TAP_MAX_DURATION_MS: f64 = 300.0;

/// Maximum delay between consecutive taps of a multi-tap sequence.
pub const TAP_MAX_DELAY_MS: f64 = 300.0;

/// Smallest initial finger distance a pinch divides by.
pub const MIN_PINCH_DISTANCE: f32 = 1.0;

/// Movement that abandons a plain press. Compared squared, strictly greater.
pub const PRESS_CANCEL_DISTANCE: f32 = 10.0;

/// Hold duration after which a release fires `onLongPress` instead of `onPress`.
pub const LONG_PRESS_MS: f64 = 500.0;
