//! # Game Timer
//!
//! Fixed-step simulation clock.
//!
//! Wall-clock time is fed in through [`GameTimer::advance`] and converted into
//! a strictly ordered sequence of constant-length ticks, independent of how
//! often the caller renders.

use crate::config;
use log::warn;
use std::time::Duration;

/// Fixed-rate clock that emits one delta per simulation tick.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tickpath::GameTimer;
///
/// let mut timer = GameTimer::new();
/// timer.start();
///
/// let mut ticks = 0;
/// timer.advance(Duration::from_millis(30), |_delta| ticks += 1);
/// assert_eq!(ticks, 3);
/// ```
#[derive(Debug, Clone)]
pub struct GameTimer {
    running: bool,
    paused: bool,
    fps: u32,
    remainder: f64,
    /// Seconds elapsed since the timer was started.
    simulated_time: f64,
    time_speed_multiplier: f64,
}

impl GameTimer {
    /// Creates a stopped timer running at the default tick rate.
    pub fn new() -> Self {
        Self::with_fps(config::DEFAULT_TICK_RATE)
    }

    /// Creates a stopped timer emitting `fps` ticks per second.
    pub fn with_fps(fps: u32) -> Self {
        Self {
            running: false,
            paused: false,
            fps: fps.max(1),
            remainder: 0.0,
            simulated_time: 0.0,
            time_speed_multiplier: 1.0,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.paused = false;
        self.remainder = 0.0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.remainder = 0.0;
    }

    pub fn pause(&mut self) {
        if self.paused || !self.running {
            warn!("Timer already paused");
            return;
        }
        self.paused = true;
    }

    /// Resumes a paused timer. Time that passed while paused is disregarded.
    pub fn resume(&mut self) {
        if !self.paused {
            warn!("Timer already running");
            return;
        }
        self.paused = false;
        self.remainder = 0.0;
    }

    pub fn toggle_paused(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Returns true if started and not paused.
    pub fn is_running(&self) -> bool {
        self.running && !self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Length of one tick in seconds.
    pub fn delta(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }

    /// Simulated seconds, scaled by the time speed multiplier.
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time * self.time_speed_multiplier
    }

    pub fn time_speed_multiplier(&self) -> f64 {
        self.time_speed_multiplier
    }

    /// Sets the time speed multiplier. Values below 1 are raised to 1.
    pub fn set_time_speed_multiplier(&mut self, multiplier: f64) {
        self.time_speed_multiplier = multiplier.max(1.0);
    }

    /// Consumes `elapsed` wall time, calling `on_tick` with the fixed delta
    /// until the accumulated time is used up. Returns the number of ticks.
    pub fn advance<F>(&mut self, elapsed: Duration, mut on_tick: F) -> usize
    where
        F: FnMut(f64),
    {
        if !self.is_running() {
            return 0;
        }

        let delta = self.delta();
        // Fixed steps accumulate rounding error, so leave sub-nanosecond residue.
        let epsilon = 1e-9;
        self.remainder += elapsed.as_secs_f64();

        let mut ticks = 0;
        while self.remainder > epsilon {
            on_tick(delta);
            self.remainder -= delta;
            self.simulated_time += delta;
            ticks += 1;
        }
        ticks
    }
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_creation() {
        let timer = GameTimer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.fps(), 100);
        assert!((timer.delta() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_stopped_timer_emits_nothing() {
        let mut timer = GameTimer::new();
        let ticks = timer.advance(Duration::from_millis(100), |_| panic!("ticked"));
        assert_eq!(ticks, 0);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut timer = GameTimer::with_fps(10);
        timer.start();

        // A partial tick is emitted up front and paid back later.
        assert_eq!(timer.advance(Duration::from_millis(150), |_| {}), 2);
        assert_eq!(timer.advance(Duration::from_millis(50), |_| {}), 0);
        assert_eq!(timer.advance(Duration::from_millis(100), |_| {}), 1);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut timer = GameTimer::new();
        timer.start();
        timer.pause();
        assert!(timer.is_paused());
        assert_eq!(timer.advance(Duration::from_millis(50), |_| {}), 0);

        timer.toggle_paused();
        assert!(timer.is_running());
        assert_eq!(timer.advance(Duration::from_millis(20), |_| {}), 2);
    }

    #[test]
    fn test_simulated_time_and_multiplier() {
        let mut timer = GameTimer::with_fps(10);
        timer.start();
        timer.advance(Duration::from_secs(1), |_| {});
        assert!((timer.simulated_time() - 1.0).abs() < 1e-9);

        timer.set_time_speed_multiplier(0.5);
        assert_eq!(timer.time_speed_multiplier(), 1.0);
        timer.set_time_speed_multiplier(2.0);
        assert!((timer.simulated_time() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_deltas_are_fixed() {
        let mut timer = GameTimer::with_fps(50);
        timer.start();
        let mut deltas = Vec::new();
        timer.advance(Duration::from_millis(100), |delta| deltas.push(delta));
        assert_eq!(deltas.len(), 5);
        assert!(deltas.iter().all(|&d| (d - 0.02).abs() < 1e-12));
    }
}
