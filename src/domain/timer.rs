//! Elapsed-time tracking for a single observed operation.

use std::time::{Duration, Instant};

/// API for tracking how long something took to happen.
pub trait Timer {
    // ---
    /// Set the starting point for the timer.
    fn start(&mut self) -> &mut Self;

    /// Stop the timer and mark the end of the duration.
    fn stop(&mut self);

    /// The duration that was tracked, zero until `stop` has been called.
    fn elapsed(&self) -> Duration;
}

/// Wall-clock implementation of [`Timer`].
///
/// Owned by the one request being timed. Calling `start` again resets the
/// starting point, but `elapsed` only changes on the next `stop`.
#[derive(Debug, Default, Clone)]
pub struct MemoryTimer {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl MemoryTimer {
    // ---
    pub fn new() -> Self {
        // ---
        Self::default()
    }

    /// Builds a timer that is already running.
    pub fn started() -> Self {
        // ---
        let mut timer = Self::new();
        timer.start();
        timer
    }
}

impl Timer for MemoryTimer {
    // ---
    fn start(&mut self) -> &mut Self {
        // ---
        self.start_time = Some(Instant::now());
        self
    }

    fn stop(&mut self) {
        // ---
        match self.start_time {
            Some(start) => self.elapsed = start.elapsed(),
            None => tracing::warn!("Timer stopped before it was started; elapsed left unchanged"),
        }
    }

    fn elapsed(&self) -> Duration {
        // ---
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::thread::sleep;

    #[test]
    fn elapsed_is_zero_after_creation() {
        // ---
        let timer = MemoryTimer::new();
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn tracks_the_duration_of_an_operation() {
        // ---
        let mut timer = MemoryTimer::new();

        timer.start();
        sleep(Duration::from_millis(50));
        timer.stop();

        assert!(timer.elapsed() >= Duration::from_millis(50));
        assert!(
            timer.elapsed() < Duration::from_millis(50) + Duration::from_secs(1),
            "elapsed should be close to the sleep: {:?}",
            timer.elapsed()
        );
    }

    #[test]
    fn start_returns_the_timer_instance() {
        // ---
        let mut timer = MemoryTimer::new();
        let expected: *const MemoryTimer = &timer;

        let returned: *const MemoryTimer = timer.start();
        assert!(std::ptr::eq(returned, expected));
    }

    #[test]
    fn elapsed_is_stable_after_stop() {
        // ---
        let mut timer = MemoryTimer::started();
        sleep(Duration::from_millis(5));
        timer.stop();

        let first = timer.elapsed();
        sleep(Duration::from_millis(5));
        assert_eq!(timer.elapsed(), first);
    }

    #[test]
    fn stop_without_start_leaves_elapsed_at_zero() {
        // ---
        let mut timer = MemoryTimer::new();
        timer.stop();
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn restart_requires_another_stop() {
        // ---
        let mut timer = MemoryTimer::started();
        sleep(Duration::from_millis(20));
        timer.stop();
        let first = timer.elapsed();

        timer.start();
        assert_eq!(timer.elapsed(), first);

        timer.stop();
        assert!(timer.elapsed() < first);
    }
}
