//! Time management for the game loop.

use std::time::Duration;

/// Manages frame timing, the fixed physics step and pausing.
///
/// Frames are advanced by hand ([`Time::advance`]); the accumulated time is
/// drained in fixed steps by [`Time::should_fixed_update`].
#[derive(Debug)]
pub struct Time {
    /// Total simulated time.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed timestep for physics (default 60 Hz).
    fixed_timestep: Duration,
    /// Accumulated time for fixed updates.
    accumulator: Duration,
    /// While paused, frames accumulate nothing.
    paused: bool,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            accumulator: Duration::ZERO,
            paused: false,
        }
    }

    /// Advance the clock by one frame of length `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.frame_count += 1;
        if self.paused {
            return;
        }
        self.elapsed += delta;
        self.accumulator += delta;
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fixed_timestep(&self) -> Duration {
        self.fixed_timestep
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            true
        } else {
            false
        }
    }

    /// Set the fixed timestep rate in Hz.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        self.fixed_timestep = Duration::from_secs_f64(1.0 / hz);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            self.accumulator = Duration::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_fixed_step_per_fixed_frame() {
        let mut time = Time::new();
        time.set_fixed_rate(120.0);
        for _ in 0..10 {
            time.advance(time.fixed_timestep());
            assert!(time.should_fixed_update());
            assert!(!time.should_fixed_update());
        }
        assert_eq!(time.frame_count(), 10);
        assert!((time.elapsed_seconds() - 10.0 / 120.0).abs() < 1e-5);
    }

    #[test]
    fn fixed_update_consumes_accumulator() {
        let mut time = Time::new();
        time.set_fixed_rate(50.0);
        time.advance(Duration::from_millis(45));
        assert!(time.should_fixed_update());
        assert!(time.should_fixed_update());
        assert!(!time.should_fixed_update());
    }

    #[test]
    fn paused_clock_runs_no_fixed_updates() {
        let mut time = Time::new();
        time.set_paused(true);
        time.advance(Duration::from_millis(100));
        assert_eq!(time.elapsed_seconds(), 0.0);
        assert_eq!(time.frame_count(), 1);
        assert!(!time.should_fixed_update());
    }
}
