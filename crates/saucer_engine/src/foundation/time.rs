//! Time management utilities

use std::time::{Duration, Instant};

/// Frame clock for the update loop.
///
/// A fixed-step timer advances by the same delta every tick so that a run is
/// reproducible; a wall-clock timer measures real elapsed time.
#[derive(Debug, Clone)]
pub struct Timer {
    fixed_delta: Option<f32>,
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a wall-clock timer
    pub fn new() -> Self {
        Self {
            fixed_delta: None,
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Create a timer that advances by `delta` seconds every tick
    pub fn fixed(delta: f32) -> Self {
        Self {
            fixed_delta: Some(delta),
            ..Self::new()
        }
    }

    /// Advance one frame and return the delta time in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = self
            .fixed_delta
            .unwrap_or_else(|| now.duration_since(self.last_frame).as_secs_f32());
        self.last_frame = now;
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Time of the last frame in seconds
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Accumulated frame time in seconds
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Simple stopwatch for measuring elapsed time
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a stopped stopwatch
    pub const fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start (or resume) the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Total elapsed time
    pub fn elapsed(&self) -> Duration {
        self.elapsed + self.start_time.map_or(Duration::ZERO, |start| start.elapsed())
    }

    /// Elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_timer_is_deterministic() {
        let mut timer = Timer::fixed(0.25);
        for _ in 0..4 {
            assert_relative_eq!(timer.tick(), 0.25);
        }
        assert_eq!(timer.frame_count(), 4);
        assert_relative_eq!(timer.total_time(), 1.0);
    }

    #[test]
    fn test_stopped_stopwatch_does_not_advance() {
        let mut stopwatch = Stopwatch::start_new();
        stopwatch.stop();
        let first = stopwatch.elapsed();
        assert_eq!(first, stopwatch.elapsed());
    }
}
