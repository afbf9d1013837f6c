//! Time management utilities

use std::time::{Duration, Instant};

use crate::physics::PhysicsError;

/// Fixed-step accumulator that turns variable frame times into whole ticks
///
/// Frame time is banked and drained in `step` sized chunks. At most
/// `max_substeps` ticks are produced per frame; any excess is dropped so a
/// long stall does not snowball into an ever-growing backlog.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    max_substeps: u32,
    accumulator: f64,
}

impl FixedTimestep {
    /// Create a new accumulator with the given tick length in seconds
    ///
    /// `step` must be finite and positive.
    pub fn new(step: f64, max_substeps: u32) -> Result<Self, PhysicsError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(PhysicsError::DegenerateInput(format!(
                "fixed timestep must be positive, got {step}"
            )));
        }

        Ok(Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        })
    }

    /// Length of one tick in seconds
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Bank `frame_time` and return how many ticks should run now
    pub fn advance(&mut self, frame_time: f64) -> u32 {
        if !frame_time.is_finite() || frame_time <= 0.0 {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if ticks == self.max_substeps && self.accumulator >= self.step {
            log::warn!(
                "Dropping {:.4}s of simulation time after {} substeps",
                self.accumulator,
                ticks
            );
            self.accumulator %= self.step;
        }

        ticks
    }

    /// Fraction of a tick left in the accumulator, in `[0, 1)`
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.step
    }
}

/// Simple stopwatch for measuring elapsed wall-clock time
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
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let running = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + running
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}
