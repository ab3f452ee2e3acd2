//! Token bucket throttle for identifier providers.
//!
//! Each provider instance owns one bucket sized from its [`RateLimit`].
//! Callers await [`RateLimiter::acquire`] before every outbound request.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

use super::capabilities::RateLimit;

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
    /// Tokens per second.
    rate: f64,
    capacity: f64,
}

impl TokenBucket {
    fn from_limit(limit: &RateLimit) -> Self {
        let capacity = f64::from(limit.burst_capacity.max(1));
        Self {
            tokens: capacity,
            last_update: Instant::now(),
            rate: f64::from(limit.requests_per_minute.max(1)) / 60.0,
            capacity,
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_update = now;
    }

    /// Take a token if one is available, otherwise report the wait.
    fn take(&mut self) -> Result<(), Duration> {
        self.refill();
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            Ok(())
        } else {
            Err(Duration::from_secs_f64((1.0 - self.tokens) / self.rate))
        }
    }
}

/// Async token bucket limiter for a single provider.
pub struct RateLimiter {
    provider: &'static str,
    bucket: Mutex<TokenBucket>,
}

impl RateLimiter {
    pub fn new(provider: &'static str, limit: &RateLimit) -> Self {
        Self {
            provider,
            bucket: Mutex::new(TokenBucket::from_limit(limit)),
        }
    }

    /// A poisoned lock only means a panicked caller; the bucket state is still usable.
    fn lock_bucket(&self) -> MutexGuard<'_, TokenBucket> {
        self.bucket.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter mutex for '{}' was poisoned, recovering", self.provider);
            poisoned.into_inner()
        })
    }

    /// Wait until a request slot is available.
    pub async fn acquire(&self) {
        loop {
            let wait = match self.lock_bucket().take() {
                Ok(()) => return,
                Err(wait) => wait,
            };
            debug!("Rate limiter: waiting {:?} for '{}'", wait, self.provider);
            tokio::time::sleep(wait).await;
        }
    }

    /// Take a slot without waiting. Returns false when throttled.
    pub fn try_acquire(&self) -> bool {
        self.lock_bucket().take().is_ok()
    }

    pub fn remaining(&self) -> f64 {
        let mut bucket = self.lock_bucket();
        bucket.refill();
        bucket.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(requests_per_minute: u32, burst_capacity: u32) -> RateLimit {
        RateLimit {
            requests_per_minute,
            burst_capacity,
            request_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_burst_then_throttle() {
        let limiter = RateLimiter::new("TEST", &limit(25, 5));
        for _ in 0..5 {
            assert!(limiter.try_acquire());
        }
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn test_bucket_refills_over_time() {
        let mut bucket = TokenBucket::from_limit(&limit(60, 1));
        assert!(bucket.take().is_ok());
        assert!(bucket.take().is_err());

        bucket.last_update = Instant::now() - Duration::from_secs(2);
        assert!(bucket.take().is_ok());
    }

    #[test]
    fn test_wait_estimate_matches_rate() {
        let mut bucket = TokenBucket::from_limit(&limit(60, 1));
        bucket.take().unwrap();
        let wait = bucket.take().unwrap_err();
        assert!(wait <= Duration::from_secs(1));
        assert!(wait > Duration::from_millis(900));
    }

    #[test]
    fn test_remaining_tracks_usage() {
        let limiter = RateLimiter::new("TEST", &limit(25, 5));
        limiter.try_acquire();
        limiter.try_acquire();
        assert!((limiter.remaining() - 3.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_acquire_waits_when_empty() {
        let limiter = RateLimiter::new("TEST", &limit(6000, 2));
        limiter.acquire().await;
        limiter.acquire().await;

        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed().as_millis() >= 5);
    }
}
