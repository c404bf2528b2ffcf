//! Inter-request pacing for the Drive metadata loop.
//!
//! A fixed-interval policy object rather than a bare sleep in the loop body,
//! so the spacing decision is testable without timers.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last_request: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// How long the next request must wait at `now`. `None` means the
    /// request may proceed immediately. Pure; does not record the request.
    pub fn delay_before_next(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed >= self.interval {
            None
        } else {
            Some(self.interval - elapsed)
        }
    }

    /// Marks a request as issued at `now`.
    pub fn record_request(&mut self, now: Instant) {
        self.last_request = Some(now);
    }

    /// Waits out the remaining interval, then records the request.
    pub async fn pause(&mut self) {
        if let Some(delay) = self.delay_before_next(Instant::now()) {
            tokio::time::sleep(delay).await;
        }
        self.record_request(Instant::now());
    }
}
