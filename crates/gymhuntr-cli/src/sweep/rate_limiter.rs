//! Rate limiting for the grid sweep
//!
//! The API enforces a daily quota, so requests are paced at a fixed minimum
//! interval with exponential backoff layered on top whenever it answers 429.

use std::time::{Duration, Instant};

/// Default pause between requests, matching the interval the original
/// collection ran at
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(15);

/// Rate limiter pacing the sweep's requests
pub struct RateLimiter {
    /// Minimum delay between requests
    min_delay: Duration,
    /// Current backoff delay
    backoff: Duration,
    /// Maximum backoff delay
    max_backoff: Duration,
    /// Last request time
    last_request: Option<Instant>,
    /// Consecutive rate limit hits
    consecutive_429s: u32,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl RateLimiter {
    /// Create a rate limiter with the given minimum inter-request delay
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            backoff: Duration::ZERO,
            max_backoff: Duration::from_secs(300),
            last_request: None,
            consecutive_429s: 0,
        }
    }

    /// Wait before making the next request
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            let required_delay = self.min_delay + self.backoff;

            if elapsed < required_delay {
                tokio::time::sleep(required_delay - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }

    /// Handle a successful request
    pub fn on_success(&mut self) {
        self.backoff = Duration::ZERO;
        self.consecutive_429s = 0;
    }

    /// Handle a rate limit (HTTP 429) response
    pub fn on_rate_limit(&mut self) {
        self.consecutive_429s += 1;
        self.backoff = (self.backoff * 2)
            .max(Duration::from_secs(1))
            .min(self.max_backoff);
    }

    /// Check if the sweep should pause due to repeated rate limits
    pub fn should_pause(&self) -> bool {
        self.consecutive_429s >= 5
    }

    /// Get the current backoff duration
    pub fn current_backoff(&self) -> Duration {
        self.backoff
    }

    /// Pause duration after repeated rate limits
    pub fn pause_duration(&self) -> Duration {
        Duration::from_secs(1800)
    }
}
