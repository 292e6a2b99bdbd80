use std::time::{Duration, Instant};

use spin_sleep::SpinSleeper;

pub trait Clock {
    // Time since a fixed epoch, never decreasing
    fn now(&self) -> Duration;
    fn sleep(&self, duration: Duration);
}

#[derive(Clone)]
pub struct SystemClock {
    start: Instant,
    sleeper: SpinSleeper,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            sleeper: SpinSleeper::default(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        if duration > Duration::from_millis(0) {
            // accounts for platform dependent sleep resolution
            self.sleeper.sleep(duration);
        }
    }
}
