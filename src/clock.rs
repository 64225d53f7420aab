//! Clock abstraction for simulated latency
//!
//! Every mock delay in the dashboard goes through a [`Clock`], so tests and
//! the `--instant` CLI mode can skip real timers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::time::Duration;

/// Source of time and delays
#[async_trait]
pub trait Clock: Send + Sync {
    /// Wait for the given duration
    async fn sleep(&self, duration: Duration);

    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;
}

/// Real clock backed by tokio timers
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that never waits
///
/// `sleep` yields to the scheduler once and records the requested delay.
/// `now` returns a pinned instant when one was given.
#[derive(Debug, Default)]
pub struct InstantClock {
    pinned: Option<DateTime<Utc>>,
    slept: Mutex<Vec<Duration>>,
}

impl InstantClock {
    /// Create a clock reporting the real current time
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock whose `now` always returns `at`
    pub fn pinned(at: DateTime<Utc>) -> Self {
        Self {
            pinned: Some(at),
            slept: Mutex::new(Vec::new()),
        }
    }

    /// Delays requested so far, in call order
    pub fn slept(&self) -> Vec<Duration> {
        self.slept
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut slept) = self.slept.lock() {
            slept.push(duration);
        }
        tokio::task::yield_now().await;
    }

    fn now(&self) -> DateTime<Utc> {
        self.pinned.unwrap_or_else(Utc::now)
    }
}
