//! Velocity tracking for fling detection.
//!
//! Estimates release velocity from a short trailing window of position
//! samples. Consecutive-pair velocities are averaged with a quadratic recency
//! weight, so a single noisy delta cannot dominate and stale motion from the
//! start of a drag fades out.

use smallvec::SmallVec;

/// Maximum number of retained samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one contribute.
pub const HORIZON_MS: f64 = 150.0;

/// Fewer samples than this yield zero velocity.
const MIN_SAMPLES: usize = 3;

/// Sample pairs closer than this are treated as duplicates.
const MIN_PAIR_DELTA_MS: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
struct DataPointAtTime {
    time_ms: f64,
    data_point: f32,
}

/// 1D weighted-window velocity tracker.
///
/// # Usage
/// ```ignore
/// let mut tracker = VelocityTracker::new();
/// tracker.add_point(time_ms, position);
/// // ... more points ...
/// let velocity = tracker.velocity(); // units/sec
/// ```
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[DataPointAtTime; HISTORY_SIZE]>,
    last_time_ms: f64,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a position sample.
    ///
    /// Samples that do not advance the clock are dropped once the tracker
    /// holds at least one sample.
    pub fn add_point(&mut self, time_ms: f64, position: f32) {
        if !self.samples.is_empty() && time_ms <= self.last_time_ms {
            log::trace!(
                "velocity sample at {time_ms}ms rejected (last {}ms)",
                self.last_time_ms
            );
            return;
        }
        self.last_time_ms = time_ms;
        if self.samples.len() == HISTORY_SIZE {
            self.samples.remove(0);
        }
        self.samples.push(DataPointAtTime {
            time_ms,
            data_point: position,
        });
    }

    /// Velocity in units/second; positive means increasing position.
    ///
    /// Prunes samples that fell out of the trailing window first.
    pub fn velocity(&mut self) -> f32 {
        self.prune();
        let count = self.samples.len();
        if count < MIN_SAMPLES {
            return 0.0;
        }

        let newest = self.samples[count - 1].time_ms;
        let mut weight_sum = 0.0f64;
        let mut weighted_velocity = 0.0f64;

        for pair in self.samples.windows(2) {
            let (previous, current) = (pair[0], pair[1]);
            let dt = current.time_ms - previous.time_ms;
            if dt <= MIN_PAIR_DELTA_MS {
                continue;
            }
            let velocity = (current.data_point - previous.data_point) as f64 / dt;
            let age = newest - current.time_ms;
            let weight = (1.0 - age / HORIZON_MS).max(0.0);
            let weight = weight * weight;
            weight_sum += weight;
            weighted_velocity += velocity * weight;
        }

        if weight_sum > 0.0 {
            ((weighted_velocity / weight_sum) * 1000.0) as f32
        } else {
            0.0
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clears all tracked data.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.last_time_ms = 0.0;
    }

    fn prune(&mut self) {
        let Some(newest) = self.samples.last().map(|sample| sample.time_ms) else {
            return;
        };
        let cutoff = newest - HORIZON_MS;
        let stale = self
            .samples
            .iter()
            .take_while(|sample| sample.time_ms < cutoff)
            .count();
        if stale > 0 {
            self.samples.drain(..stale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_returns_zero() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn fewer_than_three_samples_return_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_point(0.0, 0.0);
        tracker.add_point(10.0, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn constant_velocity() {
        let mut tracker = VelocityTracker::new();
        // 100 units per 10ms = 10000 units/s
        tracker.add_point(0.0, 0.0);
        tracker.add_point(10.0, 100.0);
        tracker.add_point(20.0, 200.0);
        tracker.add_point(30.0, 300.0);

        let velocity = tracker.velocity();
        assert!(
            (velocity - 10_000.0).abs() < 1.0,
            "Expected ~10000, got {}",
            velocity
        );
    }

    #[test]
    fn negative_velocity() {
        let mut tracker = VelocityTracker::new();
        tracker.add_point(0.0, 300.0);
        tracker.add_point(10.0, 200.0);
        tracker.add_point(20.0, 100.0);

        assert!(tracker.velocity() < 0.0);
    }

    #[test]
    fn identical_timestamps_return_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_point(5.0, 0.0);
        tracker.add_point(5.0, 50.0);
        tracker.add_point(5.0, 100.0);

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn near_duplicate_pairs_are_skipped() {
        let mut tracker = VelocityTracker::new();
        tracker.add_point(0.0, 0.0);
        tracker.add_point(0.25, 500.0);
        tracker.add_point(0.5, 1000.0);

        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn out_of_order_sample_leaves_estimate_unchanged() {
        let mut tracker = VelocityTracker::new();
        tracker.add_point(200.0, 0.0);
        tracker.add_point(210.0, 40.0);
        tracker.add_point(220.0, 80.0);
        let before = tracker.velocity();

        tracker.add_point(10.0, -5000.0);

        assert_eq!(tracker.velocity(), before);
    }

    #[test]
    fn stale_samples_are_pruned() {
        let mut tracker = VelocityTracker::new();
        tracker.add_point(0.0, 0.0);
        tracker.add_point(10.0, 5000.0);
        tracker.add_point(300.0, 0.0);
        tracker.add_point(310.0, 10.0);
        tracker.add_point(320.0, 20.0);

        let velocity = tracker.velocity();
        assert_eq!(tracker.len(), 3);
        assert!((velocity - 1000.0).abs() < 1.0, "got {velocity}");
    }

    #[test]
    fn recent_motion_dominates() {
        let mut tracker = VelocityTracker::new();
        tracker.add_point(0.0, 0.0);
        tracker.add_point(100.0, 100.0); // 1 unit/ms, old
        tracker.add_point(140.0, 500.0); // 10 units/ms, recent

        let velocity = tracker.velocity();
        assert!(velocity > 5_000.0, "got {velocity}");
    }

    #[test]
    fn capacity_is_bounded() {
        let mut tracker = VelocityTracker::new();
        for i in 0..50 {
            tracker.add_point(i as f64, i as f32);
        }
        assert_eq!(tracker.len(), HISTORY_SIZE);
    }

    #[test]
    fn reset_clears_guard() {
        let mut tracker = VelocityTracker::new();
        tracker.add_point(100.0, 0.0);
        tracker.reset();
        tracker.add_point(10.0, 0.0);

        assert_eq!(tracker.len(), 1);
    }
}
