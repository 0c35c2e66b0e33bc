// src/timer.rs

use std::time::{Duration, Instant};

/// Named stopwatch that logs how long its scope took when dropped.
///
/// ```
/// use spamsplit::Timer;
///
/// {
///     let _t = Timer::new("load").msg("Loading dataset into memory...");
///     // work
/// } // logs "- Timer-load has expired in ..."
/// ```
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    pub fn new(name: impl Into<String>) -> Self {
        Timer { name: name.into(), start: Instant::now() }
    }

    /// Logs `text` and hands the timer back, so it can be chained off `new`.
    pub fn msg(self, text: &str) -> Self {
        tracing::info!("{}", text);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        tracing::info!("- Timer-{} has expired in {:?}.", self.name, self.elapsed());
    }
}
