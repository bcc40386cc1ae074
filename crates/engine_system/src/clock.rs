//! The scheduler's clock.

use std::time::{Duration, Instant};

/// Elapsed simulation time and per-tick delta.
///
/// Advanced exactly once per [`Scheduler::tick`](crate::Scheduler::tick);
/// nothing else mutates it.
#[derive(Debug, Clone)]
pub struct Clock {
    elapsed: Duration,
    delta: Duration,
    ticks: u64,
    last: Instant,
}

impl Clock {
    /// A clock whose first delta is measured from now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// A clock whose first delta is measured from `start`.
    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self {
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            ticks: 0,
            last: start,
        }
    }

    /// Measure the time since the previous advance and accumulate it.
    pub fn advance(&mut self) {
        self.advance_to(Instant::now());
    }

    /// Advance as if the current time were `now`.
    ///
    /// An instant earlier than the previous one yields a zero delta and does
    /// not move the clock backwards.
    pub fn advance_to(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last);
        if now > self.last {
            self.last = now;
        }
        self.elapsed += self.delta;
        self.ticks += 1;
    }

    /// Total time accumulated over all advances.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time between the last two advances.
    #[must_use]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[must_use]
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Number of advances so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_is_zero() {
        let clock = Clock::new();
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert_eq!(clock.delta(), Duration::ZERO);
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_first_delta_measured_from_construction() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        clock.advance_to(start + Duration::from_millis(16));
        assert_eq!(clock.delta(), Duration::from_millis(16));
        assert_eq!(clock.elapsed(), Duration::from_millis(16));
        assert_eq!(clock.ticks(), 1);
    }

    #[test]
    fn test_elapsed_is_sum_of_deltas() {
        let start = Instant::now();
        let mut clock = Clock::starting_at(start);
        let steps = [5u64, 17, 0, 33];
        let mut now = start;
        let mut sum = Duration::ZERO;
        for ms in steps {
            now += Duration::from_millis(ms);
            clock.advance_to(now);
            sum += clock.delta();
        }
        assert_eq!(clock.elapsed(), sum);
        assert_eq!(clock.elapsed(), Duration::from_millis(55));
        assert_eq!(clock.ticks(), 4);
    }

    #[test]
    fn test_backwards_instant_gives_zero_delta() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = Clock::starting_at(start);
        clock.advance_to(start - Duration::from_millis(500));
        assert_eq!(clock.delta(), Duration::ZERO);
        clock.advance_to(start + Duration::from_millis(10));
        assert_eq!(clock.delta(), Duration::from_millis(10));
    }

    #[test]
    fn test_real_advance_is_non_negative() {
        let mut clock = Clock::new();
        for _ in 0..3 {
            clock.advance();
        }
        assert_eq!(clock.ticks(), 3);
        assert!(clock.elapsed() >= clock.delta());
    }
}
