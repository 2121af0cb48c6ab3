//! Frame rate tracking over a sliding one-second window.
//!
//! Driven by the vsync timestamps themselves, so stats are deterministic
//! under test and need no clock of their own.

use std::collections::VecDeque;

const WINDOW_MS: f64 = 1000.0;

#[derive(Clone, Copy, Debug)]
struct FrameSample {
    timestamp_ms: f64,
    active: bool,
}

/// Counts vsync ticks and the subset that advanced at least one engine.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    window: VecDeque<FrameSample>,
    frame_count: u64,
    active_frame_count: u64,
}

/// Frame statistics snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStatsSnapshot {
    /// Vsync ticks in the last second.
    pub vsync_rate: usize,
    /// Ticks in the last second that moved something.
    pub active_fps: usize,
    /// Total ticks since start.
    pub frame_count: u64,
    pub active_frame_count: u64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, timestamp_ms: f64, active: bool) {
        self.window.push_back(FrameSample {
            timestamp_ms,
            active,
        });
        self.frame_count += 1;
        if active {
            self.active_frame_count += 1;
        }
        while self
            .window
            .front()
            .is_some_and(|oldest| oldest.timestamp_ms <= timestamp_ms - WINDOW_MS)
        {
            self.window.pop_front();
        }
    }

    pub fn snapshot(&self) -> FrameStatsSnapshot {
        FrameStatsSnapshot {
            vsync_rate: self.window.len(),
            active_fps: self.window.iter().filter(|sample| sample.active).count(),
            frame_count: self.frame_count,
            active_frame_count: self.active_frame_count,
        }
    }

    /// Formats the snapshot as a display string.
    pub fn display(&self) -> String {
        let stats = self.snapshot();
        format!(
            "{} Hz vsync | {} fps active | {} frames",
            stats.vsync_rate, stats.active_fps, stats.frame_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_slides_over_one_second() {
        let mut stats = FrameStats::new();
        for frame in 0..120 {
            stats.record(frame as f64 * 10.0, frame % 2 == 0);
        }
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.vsync_rate, 100);
        assert_eq!(snapshot.active_fps, 50);
        assert_eq!(snapshot.frame_count, 120);
        assert_eq!(snapshot.active_frame_count, 60);
    }

    #[test]
    fn long_pause_empties_the_window() {
        let mut stats = FrameStats::new();
        stats.record(0.0, true);
        stats.record(16.0, true);
        stats.record(5000.0, false);
        assert_eq!(stats.snapshot().vsync_rate, 1);
        assert_eq!(stats.snapshot().active_fps, 0);
    }
}
